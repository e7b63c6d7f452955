//! Error types for chain queries

use thiserror::Error;

/// Result type alias for chain operations
pub type Result<T> = std::result::Result<T, ChainError>;

/// Errors that can occur while talking to a Filecoin EVM endpoint
#[derive(Debug, Error)]
pub enum ChainError {
    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// RPC connection or transport error
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Network name not present in the catalog
    #[error("Unsupported network: {0}")]
    UnknownNetwork(String),

    /// Invalid EVM address format
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid private key format
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Contract call (read operation) failed
    #[error("Contract call failed: {0}")]
    ContractCall(String),

    /// Generic error from anyhow
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChainError {
    /// Check if this error is transient and worth retrying by a caller
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::Rpc(_) | Self::ContractCall(_))
    }

    /// Check if this error indicates a configuration problem
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_)
                | Self::UnknownNetwork(_)
                | Self::InvalidAddress(_)
                | Self::InvalidPrivateKey(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_retriable() {
        let rpc_error = ChainError::Rpc("connection refused".to_string());
        assert!(rpc_error.is_retriable());

        let call_error = ChainError::ContractCall("execution reverted".to_string());
        assert!(call_error.is_retriable());

        let network_error = ChainError::UnknownNetwork("devnet".to_string());
        assert!(!network_error.is_retriable());
    }

    #[test]
    fn test_is_configuration_error() {
        let network_error = ChainError::UnknownNetwork("devnet".to_string());
        assert!(network_error.is_configuration_error());

        let key_error = ChainError::InvalidPrivateKey("too short".to_string());
        assert!(key_error.is_configuration_error());

        let rpc_error = ChainError::Rpc("timeout".to_string());
        assert!(!rpc_error.is_configuration_error());
    }

    #[test]
    fn test_error_display() {
        let network_error = ChainError::UnknownNetwork("devnet".to_string());
        assert_eq!(network_error.to_string(), "Unsupported network: devnet");

        let address_error = ChainError::InvalidAddress("0x123".to_string());
        assert_eq!(address_error.to_string(), "Invalid address: 0x123");
    }
}
