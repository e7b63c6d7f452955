use chain::FilecoinNetwork;
use tracing_subscriber::prelude::*;
use workflow::{Result, StorageWorkflow};

pub async fn handle_deposit_command(amount: f64, network_override: Option<String>) -> Result<()> {
    // Initialize minimal logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new("info"))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut workflow = StorageWorkflow::from_env(network_override.as_deref())?;
    workflow.initialize().await?;

    let address = workflow.address()?;
    println!("\n🔑 Wallet: {}", address);
    println!("💰 Depositing {} USDFC as storage collateral...", amount);

    let receipt = workflow.ensure_collateral(amount).await?;

    println!("\n✅ Deposit confirmed!");
    println!("   Amount: {} USDFC", receipt.amount);
    println!("   Operator: {}", receipt.operator);
    println!("   Transaction: {}", receipt.tx_hash);
    if let Some(catalog) = FilecoinNetwork::get_network(&workflow.config().network) {
        if let Some(url) = catalog.explorer_address_url(&address) {
            println!("   🔗 Explorer: {}", url);
        }
    }
    println!();

    workflow.close();
    Ok(())
}
