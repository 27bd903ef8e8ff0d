use clap::Args;
use sqlx::migrate::Migrator;
use tessera_app::database;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

#[derive(Debug, Args)]
pub(crate) struct MigrateArgs {
    /// Administrative PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: MigrateArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    MIGRATOR
        .run(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    for migration in MIGRATOR.iter() {
        println!("{} {}", migration.version, migration.description);
    }

    Ok(())
}
