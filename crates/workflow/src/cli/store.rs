use tracing_subscriber::prelude::*;
use workflow::demo::demo_event;
use workflow::{Result, StorageWorkflow};

pub async fn handle_store_event_command(network_override: Option<String>) -> Result<()> {
    // Initialize minimal logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new("info"))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut workflow = StorageWorkflow::from_env(network_override.as_deref())?;
    workflow.initialize().await?;

    let receipt = workflow.store_event(demo_event()).await?;

    println!("\n✅ Event stored on Filecoin!");
    println!("   PieceCID: {}", receipt.piece_cid);
    println!("   Size: {} bytes", receipt.size);
    println!("   🔗 {}\n", workflow.piece_url(&receipt.piece_cid)?);

    workflow.close();
    Ok(())
}
