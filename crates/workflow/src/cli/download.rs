use anyhow::anyhow;
use tracing_subscriber::prelude::*;
use workflow::{Result, StorageWorkflow};

pub async fn handle_download_command(
    piece_cid: String,
    network_override: Option<String>,
) -> Result<()> {
    // Initialize minimal logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new("info"))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut workflow = StorageWorkflow::from_env(network_override.as_deref())?;
    workflow.initialize().await?;

    println!("\n📥 Downloading from Filecoin...");
    println!("   PieceCID: {}\n", piece_cid);

    let document = workflow.fetch(&piece_cid).await?;
    let json = String::from_utf8(document.encode()?)
        .map_err(|e| anyhow!("document is not valid UTF-8: {}", e))?;

    println!("✅ Downloaded ({}):\n", document.type_tag());
    println!("{}\n", json);

    workflow.close();
    Ok(())
}
