//! Configuration for the collateral payment layer

use crate::error::{PaymentsError, Result};
use chain::FilecoinNetwork;
use serde::{Deserialize, Serialize};

/// Filecoin Pay contract on Calibration
const CALIBRATION_PAYMENTS_ADDRESS: &str = "0x0e690d3e60b0576d01352ab03b258115eb84a047";

/// Warm storage operator on Calibration, the service authorized to draw
/// from deposited collateral
const CALIBRATION_OPERATOR_ADDRESS: &str = "0x394feca6bcb84502d93c0c5c03c620ba8897e8f4";

/// One Filecoin epoch is 30 seconds
pub const EPOCHS_PER_DAY: u64 = 2880;
pub const EPOCHS_PER_MONTH: u64 = 30 * EPOCHS_PER_DAY;

/// Configuration for collateral deposits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentsConfig {
    /// Network catalog key: "calibration", "mainnet" or "localhost"
    pub network: String,

    /// RPC URL used for both balance reads and the deposit transaction
    pub rpc_url: String,

    /// USDFC token contract address
    pub token_address: String,

    /// Payments contract receiving the deposit
    pub payments_address: String,

    /// Storage operator granted a spending allowance over the deposit
    pub operator_address: String,

    /// Private key for signing deposits (optional for read-only use)
    /// Format: 0x-prefixed hex string (64 hex chars + 0x prefix = 66 chars)
    pub private_key: Option<String>,

    /// Longest period, in epochs, the operator may lock deposited funds
    pub max_lockup_epochs: u64,

    /// Faucet dispensing test USDFC, surfaced in funding instructions
    pub usdfc_faucet: Option<String>,
}

impl PaymentsConfig {
    /// Build a configuration for a catalog network, applying environment
    /// overrides.
    ///
    /// `USDFC_ADDRESS`, `PAYMENTS_ADDRESS` and `OPERATOR_ADDRESS` override
    /// the per-network defaults; `RPC_URL` overrides the endpoint.
    pub fn for_network(network: &str) -> Result<Self> {
        let catalog = FilecoinNetwork::get_network(network)
            .ok_or_else(|| PaymentsError::Configuration(format!("unknown network: {}", network)))?;

        let endpoints = chain::resolve_rpc_endpoints(None, network)?;

        let (default_payments, default_operator) = match network {
            "calibration" => (CALIBRATION_PAYMENTS_ADDRESS, CALIBRATION_OPERATOR_ADDRESS),
            // No public defaults elsewhere, the deployment must be configured
            _ => ("", ""),
        };

        Ok(Self {
            network: network.to_string(),
            rpc_url: endpoints[0].clone(),
            token_address: env_or(
                "USDFC_ADDRESS",
                catalog.usdfc_address.as_deref().unwrap_or(""),
            ),
            payments_address: env_or("PAYMENTS_ADDRESS", default_payments),
            operator_address: env_or("OPERATOR_ADDRESS", default_operator),
            private_key: None,
            max_lockup_epochs: EPOCHS_PER_MONTH,
            usdfc_faucet: catalog.usdfc_faucet.clone(),
        })
    }

    /// Validate configuration
    ///
    /// Returns `Ok(())` if valid, otherwise returns error message
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.rpc_url.is_empty() {
            return Err("rpc_url cannot be empty".to_string());
        }

        if !self.rpc_url.starts_with("http://") && !self.rpc_url.starts_with("https://") {
            return Err("rpc_url must start with http:// or https://".to_string());
        }

        validate_address("token_address", &self.token_address)?;
        validate_address("payments_address", &self.payments_address)?;
        validate_address("operator_address", &self.operator_address)?;

        // Validate private key if provided
        if let Some(ref pk) = self.private_key {
            if !pk.is_empty() {
                if !pk.starts_with("0x") {
                    return Err("private_key must start with 0x".to_string());
                }

                if pk.len() != 66 {
                    return Err(format!(
                        "private_key must be 66 characters (0x + 64 hex), got {}",
                        pk.len()
                    ));
                }

                if !pk[2..].chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err("private_key must contain only hex characters after 0x".to_string());
                }
            }
        }

        if self.max_lockup_epochs == 0 {
            return Err("max_lockup_epochs must be > 0".to_string());
        }

        if self.max_lockup_epochs > 365 * EPOCHS_PER_DAY {
            return Err("max_lockup_epochs too large (max 1 year)".to_string());
        }

        Ok(())
    }

    /// Check if configuration supports write operations (has private key)
    pub fn can_write(&self) -> bool {
        self.private_key.is_some() && !self.private_key.as_ref().unwrap().is_empty()
    }
}

fn validate_address(label: &str, address: &str) -> std::result::Result<(), String> {
    if address.is_empty() {
        return Err(format!("{} cannot be empty", label));
    }

    if !address.starts_with("0x") {
        return Err(format!("{} must start with 0x", label));
    }

    if address.len() != 42 {
        return Err(format!(
            "{} must be 42 characters (0x + 40 hex), got {}",
            label,
            address.len()
        ));
    }

    if !address[2..].chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!(
            "{} must contain only hex characters after 0x",
            label
        ));
    }

    Ok(())
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
