use chain::FilecoinNetwork;
use tracing_subscriber::prelude::*;
use workflow::{Result, WorkflowConfig};

pub async fn handle_network_command(network_override: Option<String>) -> Result<()> {
    // Initialize minimal logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new("info"))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WorkflowConfig::from_env(network_override.as_deref())?;
    let status = chain::probe_network(&config.network).await?;

    println!("\n🌐 Network: {}", status.network);
    println!("   Endpoint: {}", status.endpoint);
    println!("   Chain ID: {}", status.chain_id);
    println!("   Latest block: {}", status.latest_block);
    if status.chain_id_matches() {
        println!("   ✅ Chain ID matches the expected {}", status.expected_chain_id);
    } else {
        println!(
            "   ⚠️  Expected chain ID {}, endpoint reports {}",
            status.expected_chain_id, status.chain_id
        );
    }

    if let Some(catalog) = FilecoinNetwork::get_network(&config.network) {
        if let Some(explorer) = &catalog.explorer {
            println!("   🔗 Explorer: {}", explorer);
        }
        if let Some(faucet) = &catalog.gas_faucet {
            println!("   💧 Gas faucet: {}", faucet);
        }
        if let Some(faucet) = &catalog.usdfc_faucet {
            println!("   💧 USDFC faucet: {}", faucet);
        }
    }
    println!();
    Ok(())
}
