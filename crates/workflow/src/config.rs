use crate::error::{Result, WorkflowError};
use chain::FilecoinNetwork;

/// Network used when neither the CLI nor the environment picks one
pub const DEFAULT_NETWORK: &str = "calibration";

/// Collateral deposited by the guided workflow, in USDFC
pub const DEFAULT_DEPOSIT_USDFC: f64 = 2.5;

/// Rating contract recorded in stored result documents
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x970fad202ADD7A19a3c377E0eCB4bbbDba9AAE49";

/// Chain name recorded alongside verified ratings
pub const DEFAULT_VERIFICATION_NETWORK: &str = "Base Sepolia";

/// Settings shared by every workflow operation.
///
/// Read once from the environment at startup; none of the operations
/// consult environment variables afterwards.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Network catalog key: "calibration", "mainnet" or "localhost"
    pub network: String,

    /// Explicit RPC endpoint, overriding the catalog defaults
    pub rpc_url: Option<String>,

    /// Wallet key signing deposits, 0x-prefixed hex
    pub private_key: Option<String>,

    /// Collateral amount for the guided workflow, in USDFC
    pub deposit_amount: f64,

    /// Rating contract address stamped into result documents
    pub contract_address: String,

    /// Chain name stamped into result documents
    pub verification_network: String,
}

impl WorkflowConfig {
    /// Build the configuration from the environment.
    ///
    /// `network_override` wins over `FILECOIN_NETWORK`; the remaining
    /// variables are `RPC_URL`, `PRIVATE_KEY`, `DEPOSIT_AMOUNT`,
    /// `PROOF_OF_FUN_ADDRESS` and `VERIFICATION_NETWORK`.
    pub fn from_env(network_override: Option<&str>) -> Result<Self> {
        let network = network_override
            .map(str::to_string)
            .or_else(|| env_var("FILECOIN_NETWORK"))
            .unwrap_or_else(|| DEFAULT_NETWORK.to_string())
            .to_lowercase();

        let deposit_amount = match env_var("DEPOSIT_AMOUNT") {
            Some(raw) => raw.trim().parse::<f64>().map_err(|_| {
                WorkflowError::Configuration(format!("DEPOSIT_AMOUNT is not a number: {}", raw))
            })?,
            None => DEFAULT_DEPOSIT_USDFC,
        };

        let config = Self {
            network,
            rpc_url: env_var("RPC_URL"),
            private_key: env_var("PRIVATE_KEY"),
            deposit_amount,
            contract_address: env_var("PROOF_OF_FUN_ADDRESS")
                .unwrap_or_else(|| DEFAULT_CONTRACT_ADDRESS.to_string()),
            verification_network: env_var("VERIFICATION_NETWORK")
                .unwrap_or_else(|| DEFAULT_VERIFICATION_NETWORK.to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values no workflow operation could work with
    pub fn validate(&self) -> Result<()> {
        if FilecoinNetwork::get_network(&self.network).is_none() {
            return Err(WorkflowError::Configuration(format!(
                "unknown network '{}', supported: {}",
                self.network,
                FilecoinNetwork::list_networks().join(", ")
            )));
        }

        if !self.deposit_amount.is_finite() || self.deposit_amount <= 0.0 {
            return Err(WorkflowError::Configuration(format!(
                "deposit amount must be positive, got {}",
                self.deposit_amount
            )));
        }

        chain::parse_address(&self.contract_address).map_err(|e| {
            WorkflowError::Configuration(format!("invalid PROOF_OF_FUN_ADDRESS: {}", e))
        })?;

        Ok(())
    }

    /// The signing key, or a configuration error telling the user how to set one
    pub fn require_private_key(&self) -> Result<&str> {
        self.private_key.as_deref().ok_or_else(|| {
            WorkflowError::Configuration(
                "PRIVATE_KEY is not set - add it to .env or export it".to_string(),
            )
        })
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
