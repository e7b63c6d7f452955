use storage::{PieceStoreClient, StoreConfig};
use tracing_subscriber::prelude::*;
use workflow::{Result, WorkflowConfig};

/// List the storage providers behind the publisher. Needs no wallet.
pub async fn handle_providers_command(network_override: Option<String>) -> Result<()> {
    // Initialize minimal logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new("info"))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WorkflowConfig::from_env(network_override.as_deref())?;
    let store = PieceStoreClient::with_config(StoreConfig::for_network(&config.network));

    println!("\n💾 Storage providers on {}:\n", config.network);

    let providers = store.provider_info().await?;
    if providers.is_empty() {
        println!("   No providers reported\n");
        return Ok(());
    }

    for provider in &providers {
        let marker = if provider.active { "✅" } else { "💤" };
        println!("   {} [{}] {}", marker, provider.id, provider.name);
        println!("      Address: {}", provider.service_provider);
    }
    let active = providers.iter().filter(|p| p.active).count();
    println!("\n   Active providers: {}/{}\n", active, providers.len());
    Ok(())
}
