use anyhow::anyhow;
use documents::EventMetadata;
use std::io::{self, Write};
use tracing_subscriber::prelude::*;
use workflow::demo::{RATING_CATEGORIES, demo_catalog, demo_event, demo_results};
use workflow::{Result, StorageWorkflow};

/// Interactive menu, shown when `pof` runs without a subcommand.
///
/// One session serves the whole menu; errors inside an option are
/// printed and the menu keeps running.
pub async fn handle_menu(network_override: Option<String>) -> Result<()> {
    // Initialize minimal logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new("info"))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut workflow = StorageWorkflow::from_env(network_override.as_deref())?;

    println!("\n⏳ Connecting to Filecoin...");
    workflow.initialize().await?;
    println!("✅ Session ready on {}", workflow.config().network);

    loop {
        let choice = show_menu()?;

        let outcome = match choice.as_str() {
            "1" => store_event(&workflow).await,
            "2" => {
                println!("\n🎯 Not available from the menu");
                println!("   Results are stored by the full workflow: pof workflow\n");
                Ok(())
            }
            "3" => {
                println!("\n👕 Not available from the menu");
                println!("   The catalog is stored by the full workflow: pof workflow\n");
                Ok(())
            }
            "4" => download(&workflow).await,
            "5" => storage_info(&workflow).await,
            "6" => run_demo_uploads(&workflow).await,
            "7" => {
                println!("\n👋 Goodbye!\n");
                break;
            }
            _ => {
                println!("\n❌ Invalid option\n");
                Ok(())
            }
        };

        if let Err(e) = outcome {
            eprintln!("\n❌ Error: {}\n", e);
            if let Some(instructions) = e.funding_instructions() {
                eprintln!("   {}\n", instructions);
            }
        }
    }

    workflow.close();
    Ok(())
}

fn show_menu() -> Result<String> {
    println!("\n{}", "=".repeat(60));
    println!("🌟 PROOF OF FUN - FILECOIN ONCHAIN CLOUD");
    println!("{}", "=".repeat(60));
    println!("\n1. 📅 Store event metadata");
    println!("2. 🎯 Store Proof of Fun results");
    println!("3. 👕 Store merchandise catalog");
    println!("4. 📥 Download data (by PieceCID)");
    println!("5. 💰 Storage provider info");
    println!("6. 🔄 Full workflow");
    println!("7. 🚪 Exit\n");

    prompt("Choose an option (1-7): ")
}

fn prompt(question: &str) -> Result<String> {
    print!("{}", question);
    io::stdout()
        .flush()
        .map_err(|e| anyhow!("failed to flush stdout: {}", e))?;

    let mut line = String::new();
    let read = io::stdin()
        .read_line(&mut line)
        .map_err(|e| anyhow!("failed to read input: {}", e))?;
    if read == 0 {
        return Err(anyhow!("input stream closed").into());
    }
    Ok(line.trim().to_string())
}

async fn store_event(workflow: &StorageWorkflow) -> Result<()> {
    println!("\n📅 Store an event on Filecoin\n");

    let event = EventMetadata {
        id: 1,
        name: prompt("Event name: ")?,
        description: prompt("Description: ")?,
        location: prompt("Location: ")?,
        start_date: prompt("Start date (YYYY-MM-DD): ")?,
        end_date: prompt("End date (YYYY-MM-DD): ")?,
        categories: RATING_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        contract_address: workflow.config().contract_address.clone(),
    };

    let receipt = workflow.store_event(event).await?;
    println!("\n✅ Event stored!");
    println!("   PieceCID: {}", receipt.piece_cid);
    println!("   Size: {} bytes\n", receipt.size);
    Ok(())
}

async fn download(workflow: &StorageWorkflow) -> Result<()> {
    println!("\n📥 Download data from Filecoin\n");

    let cid = prompt("Enter the PieceCID: ")?;

    println!("\n⏳ Downloading...");
    let document = workflow.fetch(&cid).await?;
    let json = String::from_utf8(document.encode()?)
        .map_err(|e| anyhow!("document is not valid UTF-8: {}", e))?;

    println!("\n✅ Downloaded ({}):\n", document.type_tag());
    println!("{}\n", json);
    Ok(())
}

async fn storage_info(workflow: &StorageWorkflow) -> Result<()> {
    println!("\n💾 Storage provider info\n");

    let providers = workflow.storage_info().await?;
    if providers.is_empty() {
        println!("   No providers reported\n");
        return Ok(());
    }

    for provider in &providers {
        let marker = if provider.active { "✅" } else { "💤" };
        println!(
            "   {} [{}] {} ({})",
            marker, provider.id, provider.name, provider.service_provider
        );
    }
    let active = providers.iter().filter(|p| p.active).count();
    println!("\n   Active providers: {}/{}\n", active, providers.len());
    Ok(())
}

/// Demo uploads on the live session: one event, its results and the
/// merch catalog, then a verification download. Does not deposit and
/// leaves the session open.
async fn run_demo_uploads(workflow: &StorageWorkflow) -> Result<()> {
    println!("\n🔄 Running the full workflow with demo data...\n");

    let event = demo_event();
    let event_id = event.id;

    println!("📅 Storing event...");
    let event_receipt = workflow.store_event(event).await?;
    println!("   ✅ PieceCID: {}\n", event_receipt.piece_cid);

    println!("🎯 Storing results...");
    let results_receipt = workflow.store_results(event_id, demo_results()).await?;
    println!("   ✅ PieceCID: {}\n", results_receipt.piece_cid);

    println!("👕 Storing merchandise...");
    let catalog_receipt = workflow.store_catalog(demo_catalog()).await?;
    println!("   ✅ PieceCID: {}\n", catalog_receipt.piece_cid);

    println!("🔁 Verifying download...");
    let document = workflow.fetch(&results_receipt.piece_cid).await?;
    println!("   Document type: {}", document.type_tag());

    println!("\n🎉 Workflow completed!\n");
    Ok(())
}
