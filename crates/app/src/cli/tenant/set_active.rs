use clap::Args;
use tessera::tenancy::TenantSlug;
use tessera_app::{
    database,
    domain::tenants::{PgTenantsService, TenantsService},
};

#[derive(Debug, Args)]
pub(crate) struct SetTenantActiveArgs {
    /// Tenant slug
    #[arg(long)]
    slug: TenantSlug,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: SetTenantActiveArgs, is_active: bool) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let tenant = PgTenantsService::new(pool)
        .set_tenant_active(&args.slug, is_active)
        .await
        .map_err(|error| format!("failed to update tenant {}: {error}", args.slug))?;

    println!("tenant_slug: {}", tenant.slug);
    println!("is_active: {}", tenant.is_active);

    Ok(())
}
