use thiserror::Error;

/// Errors surfaced by the storage workflow and CLI
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Storage session is not initialized - call initialize() first")]
    Uninitialized,

    #[error("Storage session is closed - create a new workflow to continue")]
    SessionClosed,

    #[error("Chain error: {0}")]
    Chain(#[from] chain::ChainError),

    #[error("Payment error: {0}")]
    Payments(#[from] payments::PaymentsError),

    #[error("Storage error: {0}")]
    Store(#[from] storage::StoreError),

    #[error("Document error: {0}")]
    Codec(#[from] documents::CodecError),

    #[error("Error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, WorkflowError>;

impl WorkflowError {
    /// True for transient failures a caller may retry
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Chain(e) => e.is_retriable(),
            Self::Payments(e) => e.is_retriable(),
            Self::Store(e) => e.is_retriable(),
            _ => false,
        }
    }

    /// True for errors fixed by editing configuration rather than retrying
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Self::Configuration(_) => true,
            Self::Chain(e) => e.is_configuration_error(),
            Self::Payments(e) => e.is_configuration_error(),
            _ => false,
        }
    }

    /// Faucet guidance when the wallet balance cannot cover a deposit
    pub fn funding_instructions(&self) -> Option<String> {
        match self {
            Self::Payments(e) => e.funding_instructions(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_error_display() {
        assert_eq!(
            WorkflowError::Uninitialized.to_string(),
            "Storage session is not initialized - call initialize() first"
        );
        assert_eq!(
            WorkflowError::SessionClosed.to_string(),
            "Storage session is closed - create a new workflow to continue"
        );
    }

    #[test]
    fn test_configuration_classification() {
        assert!(WorkflowError::Configuration("bad".to_string()).is_configuration_error());
        assert!(!WorkflowError::Uninitialized.is_configuration_error());

        let chain_err = WorkflowError::Chain(chain::ChainError::UnknownNetwork("x".to_string()));
        assert!(chain_err.is_configuration_error());
    }

    #[test]
    fn test_retriable_classification() {
        let store_err =
            WorkflowError::Store(storage::StoreError::Connection("refused".to_string()));
        assert!(store_err.is_retriable());

        assert!(!WorkflowError::SessionClosed.is_retriable());
        assert!(!WorkflowError::Configuration("bad".to_string()).is_retriable());
    }

    #[test]
    fn test_funding_instructions_pass_through() {
        let err = WorkflowError::Payments(payments::PaymentsError::InsufficientCollateral {
            required: 2.5,
            available: 0.0,
            shortfall: 2.5,
            faucet: Some("https://faucet.example/usdfc".to_string()),
        });
        let instructions = err.funding_instructions().unwrap();
        assert!(instructions.contains("https://faucet.example/usdfc"));

        assert!(WorkflowError::Uninitialized.funding_instructions().is_none());
    }
}
