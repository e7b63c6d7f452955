use storage::{PieceStoreClient, StoreConfig};
use tracing_subscriber::prelude::*;
use workflow::demo::{demo_catalog, demo_event, demo_results};
use workflow::{Result, StorageWorkflow};

/// `pof workflow`: the complete lifecycle with demo data, from deposit
/// to verified download, closing the session at the end.
pub async fn handle_workflow_command(network_override: Option<String>) -> Result<()> {
    // Initialize minimal logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new("info"))
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("\n{}", "🌟".repeat(30));
    println!("   PROOF OF FUN - FILECOIN STORAGE");
    println!("{}", "🌟".repeat(30));

    let mut workflow = StorageWorkflow::from_env(network_override.as_deref())?;
    let network = workflow.config().network.clone();

    let summary = workflow
        .full_workflow(demo_event(), demo_results(), demo_catalog())
        .await?;

    // The session is closed at this point, so build gateway links
    // from the network configuration instead.
    let store = PieceStoreClient::with_config(StoreConfig::for_network(&network));

    println!("\n{}", "=".repeat(60));
    println!("✨ STORAGE SUMMARY");
    println!("{}", "=".repeat(60));

    println!("\n💰 Collateral:");
    println!("   Amount: {} USDFC", summary.deposit.amount);
    println!("   Operator: {}", summary.deposit.operator);
    println!("   Transaction: {}", summary.deposit.tx_hash);

    println!("\n📅 Event:");
    println!("   PieceCID: {}", summary.event.piece_cid);
    println!("   Size: {} bytes", summary.event.size);

    println!("\n🎯 Proof of Fun:");
    println!("   PieceCID: {}", summary.results.piece_cid);
    println!("   Size: {} bytes", summary.results.size);

    println!("\n👕 Merchandise:");
    println!("   PieceCID: {}", summary.catalog.piece_cid);
    println!("   Size: {} bytes", summary.catalog.size);

    println!("\n💾 Total stored: {} bytes", summary.total_bytes());
    println!("📊 Active providers: {}", summary.active_providers);
    if summary.round_trip_verified {
        println!("🔁 Round trip verified: results read back intact");
    } else {
        println!("⚠️  Round trip check failed: downloaded document differs");
    }

    println!("\n🔗 Gateway: {}", store.piece_url(&summary.results.piece_cid)?);
    println!("   Retrieve any document with: pof download <PieceCID>");

    println!("\n{}", "=".repeat(60));
    println!("🎉 WORKFLOW COMPLETED");
    println!("{}", "=".repeat(60));
    Ok(())
}
