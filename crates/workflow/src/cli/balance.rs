use chain::{Asset, FilecoinNetwork};
use tracing_subscriber::prelude::*;
use workflow::{Result, StorageWorkflow, WalletBalances, WorkflowConfig, WorkflowError};

/// Minimum balances considered ready for the workflow
const MIN_GAS: f64 = 0.1;
const MIN_USDFC: f64 = 0.5;

/// Check gas and USDFC balances and point at the faucets when they run low
pub async fn handle_balance_command(
    address: Option<String>,
    network_override: Option<String>,
) -> Result<()> {
    // Initialize minimal logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new("info"))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WorkflowConfig::from_env(network_override.as_deref())?;
    let balances = match address {
        // Read-only path, works without PRIVATE_KEY
        Some(addr) => lookup(&addr, &config).await?,
        None => {
            let mut workflow = StorageWorkflow::new(config.clone())?;
            workflow.initialize().await?;
            let balances = workflow.balances().await?;
            workflow.close();
            balances
        }
    };

    let catalog = FilecoinNetwork::get_network(&config.network).ok_or_else(|| {
        WorkflowError::Configuration(format!("unknown network {}", config.network))
    })?;

    println!("\n{}", "=".repeat(60));
    println!("🔍 BALANCE CHECK - {}", balances.network.to_uppercase());
    println!("{}", "=".repeat(60));
    println!("\n🔑 Wallet address: {}", balances.address);

    let symbol = &balances.gas_symbol;
    println!("\n💰 Checking {} (for gas)...", symbol);
    println!("   Balance: {} {}", balances.gas, symbol);
    if balances.gas == 0.0 {
        println!("   ⚠️  No {} for gas fees!", symbol);
        if let Some(faucet) = &catalog.gas_faucet {
            println!("   👉 Visit: {}", faucet);
            println!("   👉 Paste your address: {}", balances.address);
        }
    } else if balances.gas < MIN_GAS {
        println!("   ⚠️  Low {} balance", symbol);
        println!("   👉 Top up before running the workflow");
    } else {
        println!("   ✅ Enough {} for gas fees", symbol);
    }

    if let Some(usdfc) = balances.usdfc {
        println!("\n💵 Checking USDFC (for storage)...");
        println!("   Balance: {} USDFC", usdfc);
        if usdfc == 0.0 {
            println!("   ⚠️  No USDFC!");
            if let Some(faucet) = &catalog.usdfc_faucet {
                println!("   👉 Visit: {}", faucet);
                println!("   👉 Paste your address: {}", balances.address);
            }
        } else if usdfc < MIN_USDFC {
            println!("   ⚠️  Low USDFC balance");
            println!(
                "   👉 The faucet dispenses more (recommended minimum {} USDFC)",
                MIN_USDFC
            );
        } else {
            println!("   ✅ Enough USDFC for storage payments");
        }
    }

    let gas_ready = balances.gas >= MIN_GAS;
    let usdfc_ready = balances.usdfc.map(|u| u >= MIN_USDFC).unwrap_or(true);

    println!("\n{}", "=".repeat(60));
    println!("📊 SUMMARY");
    println!("{}", "=".repeat(60));
    println!(
        "{} {}: {}",
        if gas_ready { "✅" } else { "❌" },
        symbol,
        balances.gas
    );
    if let Some(usdfc) = balances.usdfc {
        println!("{} USDFC: {}", if usdfc_ready { "✅" } else { "❌" }, usdfc);
    }
    println!("{}", "=".repeat(60));

    if gas_ready && usdfc_ready {
        println!("\n🎉 All set! Run the workflow:\n");
        println!("   pof workflow\n");
    } else {
        println!("\n⏰ Waiting for tokens...");
        if !usdfc_ready {
            println!("   ⏳ USDFC pending (minimum {} USDFC)", MIN_USDFC);
            if let Some(faucet) = &catalog.usdfc_faucet {
                println!("      {}", faucet);
            }
        }
        println!("   💡 Run this command again to re-check\n");
    }

    if let Some(url) = catalog.explorer_address_url(&balances.address) {
        println!("🔗 Explorer: {}", url);
    }
    println!();
    Ok(())
}

/// Balances for an arbitrary address, without a session or private key
async fn lookup(address: &str, config: &WorkflowConfig) -> Result<WalletBalances> {
    chain::parse_address(address)?;
    let network = FilecoinNetwork::get_network(&config.network).ok_or_else(|| {
        WorkflowError::Configuration(format!("unknown network {}", config.network))
    })?;

    let gas = chain::get_balance(address, Asset::Native, &config.network).await?;
    let usdfc = if network.usdfc_address.is_some() {
        Some(chain::get_balance(address, Asset::Usdfc, &config.network).await?)
    } else {
        None
    };

    Ok(WalletBalances {
        address: address.to_string(),
        network: network.name.clone(),
        gas_symbol: network.native_currency.symbol.clone(),
        gas,
        usdfc,
    })
}
