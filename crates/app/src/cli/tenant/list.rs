use clap::Args;
use tessera_app::{
    database,
    domain::tenants::{PgTenantsService, TenantsService},
};

#[derive(Debug, Args)]
pub(crate) struct ListTenantsArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ListTenantsArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let tenants = PgTenantsService::new(pool)
        .list_tenants()
        .await
        .map_err(|error| format!("failed to list tenants: {error}"))?;

    for tenant in tenants {
        let state = if tenant.status().is_active {
            "active"
        } else {
            "inactive"
        };

        println!("{}\t{}\t{state}\t{}", tenant.uuid(), tenant.slug, tenant.name);
    }

    Ok(())
}
