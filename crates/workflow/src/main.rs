mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use dotenvy::dotenv;
use workflow::Result;

#[tokio::main]
async fn main() {
    // Load .env if present, ignore if missing
    dotenv().ok();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("\n❌ Error: {}", e);
        if let Some(instructions) = e.funding_instructions() {
            eprintln!("   {}", instructions);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let network = cli.network;
    match cli.command {
        Some(Commands::Workflow) => cli::workflow_cmd::handle_workflow_command(network).await,
        Some(Commands::StoreEvent) => cli::store::handle_store_event_command(network).await,
        Some(Commands::Download { piece_cid }) => {
            cli::download::handle_download_command(piece_cid, network).await
        }
        Some(Commands::Balance { address }) => {
            cli::balance::handle_balance_command(address, network).await
        }
        Some(Commands::Deposit { amount }) => {
            cli::deposit::handle_deposit_command(amount, network).await
        }
        Some(Commands::Providers) => cli::providers::handle_providers_command(network).await,
        Some(Commands::Network) => cli::network::handle_network_command(network).await,
        None => cli::menu::handle_menu(network).await,
    }
}
