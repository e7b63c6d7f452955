//! Error types for the collateral payment layer

use thiserror::Error;

/// Result type alias for payment operations
pub type Result<T> = std::result::Result<T, PaymentsError>;

/// Errors that can occur while checking or depositing collateral
#[derive(Debug, Error)]
pub enum PaymentsError {
    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// RPC connection or transport error
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Contract call (read operation) failed
    #[error("Contract call failed: {0}")]
    ContractCall(String),

    /// Transaction (write operation) failed
    #[error("Transaction failed: {0}")]
    Transaction(String),

    /// Wallet does not hold enough USDFC to cover the requested deposit.
    ///
    /// Carries the shortfall and, when known, the faucet dispensing test
    /// tokens. No transaction has been sent when this is returned.
    #[error(
        "Insufficient USDFC balance: required {required}, available {available}, short {shortfall}"
    )]
    InsufficientCollateral {
        required: f64,
        available: f64,
        shortfall: f64,
        faucet: Option<String>,
    },

    /// No private key configured for write operations
    #[error("No private key configured - deposits require PRIVATE_KEY")]
    NoPrivateKey,

    /// Invalid EVM address format
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Provider creation or connection error
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Error from the chain query layer
    #[error(transparent)]
    Chain(#[from] chain::ChainError),

    /// Generic error from anyhow
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PaymentsError {
    /// Check if this error is transient and worth retrying by a caller
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Rpc(_) | Self::ContractCall(_) | Self::ProviderError(_) => true,
            Self::Chain(e) => e.is_retriable(),
            _ => false,
        }
    }

    /// Check if this error indicates a configuration problem
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Self::Configuration(_)
            | Self::NoPrivateKey
            | Self::InvalidAddress(_) => true,
            Self::Chain(e) => e.is_configuration_error(),
            _ => false,
        }
    }

    /// Human guidance for topping up the wallet, when this error is an
    /// insufficient-collateral failure with a known faucet
    pub fn funding_instructions(&self) -> Option<String> {
        match self {
            Self::InsufficientCollateral {
                shortfall,
                faucet: Some(faucet),
                ..
            } => Some(format!(
                "Get at least {} test USDFC at: {}",
                shortfall, faucet
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_retriable() {
        let rpc_error = PaymentsError::Rpc("connection refused".to_string());
        assert!(rpc_error.is_retriable());

        let balance_error = PaymentsError::InsufficientCollateral {
            required: 2.5,
            available: 0.0,
            shortfall: 2.5,
            faucet: None,
        };
        assert!(!balance_error.is_retriable());

        let config_error = PaymentsError::Configuration("bad".to_string());
        assert!(!config_error.is_retriable());
    }

    #[test]
    fn test_is_configuration_error() {
        assert!(PaymentsError::NoPrivateKey.is_configuration_error());
        assert!(
            PaymentsError::InvalidAddress("0x123".to_string()).is_configuration_error()
        );
        assert!(!PaymentsError::Transaction("reverted".to_string()).is_configuration_error());
    }

    #[test]
    fn test_insufficient_collateral_display() {
        let err = PaymentsError::InsufficientCollateral {
            required: 2.5,
            available: 0.0,
            shortfall: 2.5,
            faucet: Some("https://forest-explorer.chainsafe.dev/faucet/calibnet_usdfc".to_string()),
        };

        assert_eq!(
            err.to_string(),
            "Insufficient USDFC balance: required 2.5, available 0, short 2.5"
        );

        let instructions = err.funding_instructions().unwrap();
        assert!(instructions.contains("2.5"));
        assert!(instructions.contains("forest-explorer.chainsafe.dev"));
    }

    #[test]
    fn test_no_funding_instructions_without_faucet() {
        let err = PaymentsError::InsufficientCollateral {
            required: 2.5,
            available: 1.0,
            shortfall: 1.5,
            faucet: None,
        };
        assert!(err.funding_instructions().is_none());

        let other = PaymentsError::NoPrivateKey;
        assert!(other.funding_instructions().is_none());
    }
}
