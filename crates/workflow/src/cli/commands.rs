use clap::{Parser, Subcommand};
use workflow::config::DEFAULT_DEPOSIT_USDFC;

#[derive(Parser)]
#[command(name = "pof")]
#[command(about = "Proof of Fun event storage on Filecoin", long_about = None)]
pub struct Cli {
    /// Override the Filecoin network (calibration, mainnet or localhost)
    #[arg(long, global = true, env = "FILECOIN_NETWORK")]
    pub network: Option<String>,

    /// Interactive menu when no subcommand is given
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the complete storage workflow with demo data
    Workflow,

    /// Store demo event metadata
    StoreEvent,

    /// Download a stored document and print it
    Download {
        /// The piece CID to download
        piece_cid: String,
    },

    /// Check wallet gas and USDFC balances
    Balance {
        /// Address to inspect, defaults to the wallet from PRIVATE_KEY
        #[arg(long)]
        address: Option<String>,
    },

    /// Deposit USDFC collateral and authorize the storage operator
    Deposit {
        /// Amount to deposit, in USDFC
        #[arg(long, env = "DEPOSIT_AMOUNT", default_value_t = DEFAULT_DEPOSIT_USDFC)]
        amount: f64,
    },

    /// List storage providers
    Providers,

    /// Probe the configured RPC endpoint
    Network,
}
