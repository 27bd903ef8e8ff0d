use clap::Args;
use sqlx::{PgConnection, query, query_scalar};
use tessera_app::database;

/// Privileges the runtime role needs. Records are only ever soft deleted, so the role is
/// never granted `DELETE`.
const TABLE_GRANTS: [(&str, &str); 2] = [
    ("tenants", "SELECT, INSERT, UPDATE"),
    ("tenant_records", "SELECT, INSERT, UPDATE"),
];

const ROLE_FLAGS: &str = "LOGIN NOSUPERUSER NOCREATEDB NOCREATEROLE NOREPLICATION NOBYPASSRLS";

#[derive(Debug, Args)]
pub(crate) struct EnsureAppRoleArgs {
    /// Administrative PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Role the API connects as
    #[arg(long, default_value = "tessera_app")]
    role_name: String,

    /// Password to set on the role
    #[arg(long, env = "APP_DB_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(args: EnsureAppRoleArgs) -> Result<(), String> {
    if args.role_name.trim().is_empty() {
        return Err("role_name cannot be empty".to_string());
    }

    if args.password.trim().is_empty() {
        return Err("password cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|error| format!("failed to start transaction: {error}"))?;

    let role = quote(&mut tx, "quote_ident", &args.role_name).await?;
    let password = quote(&mut tx, "quote_literal", &args.password).await?;

    let exists: bool = query_scalar("SELECT EXISTS (SELECT 1 FROM pg_roles WHERE rolname = $1)")
        .bind(&args.role_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|error| format!("failed to check role existence: {error}"))?;

    let verb = if exists { "ALTER" } else { "CREATE" };

    let mut statements = vec![
        format!("{verb} ROLE {role} {ROLE_FLAGS} PASSWORD {password}"),
        format!("GRANT USAGE ON SCHEMA public TO {role}"),
    ];

    statements.extend(
        TABLE_GRANTS
            .iter()
            .map(|(table, privileges)| format!("GRANT {privileges} ON {table} TO {role}")),
    );

    let database_name: String = query_scalar("SELECT quote_ident(current_database())")
        .fetch_one(&mut *tx)
        .await
        .map_err(|error| format!("failed to resolve database name: {error}"))?;

    statements.push(format!("GRANT CONNECT ON DATABASE {database_name} TO {role}"));

    for sql in &statements {
        query(sql)
            .execute(&mut *tx)
            .await
            .map_err(|error| format!("failed to apply `{}`: {error}", redact(sql)))?;
    }

    tx.commit()
        .await
        .map_err(|error| format!("failed to commit changes: {error}"))?;

    println!("ensured app role: {}", args.role_name);

    for (table, privileges) in TABLE_GRANTS {
        println!("granted {privileges} on {table}");
    }

    Ok(())
}

async fn quote(conn: &mut PgConnection, function: &str, value: &str) -> Result<String, String> {
    query_scalar(&format!("SELECT {function}($1)"))
        .bind(value)
        .fetch_one(conn)
        .await
        .map_err(|error| format!("failed to {function} value: {error}"))
}

/// Statement text with any password literal removed.
fn redact(sql: &str) -> &str {
    sql.split_once(" PASSWORD ").map_or(sql, |(head, _)| head)
}
