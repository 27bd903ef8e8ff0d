use clap::{Args, Subcommand};

mod create;
mod list;
mod set_active;

#[derive(Debug, Args)]
pub(crate) struct TenantCommand {
    #[command(subcommand)]
    command: TenantSubcommand,
}

#[derive(Debug, Subcommand)]
enum TenantSubcommand {
    Create(create::CreateTenantArgs),
    List(list::ListTenantsArgs),
    /// Allow requests for the tenant again
    Activate(set_active::SetTenantActiveArgs),
    /// Refuse all requests for the tenant; its data is kept
    Deactivate(set_active::SetTenantActiveArgs),
}

pub(crate) async fn run(command: TenantCommand) -> Result<(), String> {
    match command.command {
        TenantSubcommand::Create(args) => create::run(args).await,
        TenantSubcommand::List(args) => list::run(args).await,
        TenantSubcommand::Activate(args) => set_active::run(args, true).await,
        TenantSubcommand::Deactivate(args) => set_active::run(args, false).await,
    }
}
