use crate::error::{ChainError, Result};
use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

/// A funded EVM account derived from a secp256k1 private key.
///
/// Holds the live signer so the same account can both answer balance
/// queries and sign deposit transactions.
#[derive(Debug, Clone)]
pub struct Account {
    signer: PrivateKeySigner,
    address: Address,
}

impl Account {
    /// Create an account from a hex private key, with or without 0x prefix
    pub fn from_private_key(private_key: &str) -> Result<Account> {
        let key_hex = if private_key.starts_with("0x") || private_key.starts_with("0X") {
            &private_key[2..]
        } else {
            private_key
        };

        let key_bytes = hex::decode(key_hex)
            .map_err(|e| ChainError::InvalidPrivateKey(format!("invalid hex: {}", e)))?;

        if key_bytes.len() != 32 {
            return Err(ChainError::InvalidPrivateKey(format!(
                "must be 32 bytes, got {}",
                key_bytes.len()
            )));
        }

        let key_array: [u8; 32] = key_bytes
            .try_into()
            .map_err(|_| ChainError::InvalidPrivateKey("must be exactly 32 bytes".to_string()))?;
        let signer = PrivateKeySigner::from_bytes(&key_array.into())
            .map_err(|e| ChainError::InvalidPrivateKey(e.to_string()))?;

        let address = signer.address();

        Ok(Account { signer, address })
    }

    /// Generate a fresh random account
    pub fn generate() -> Account {
        let signer = PrivateKeySigner::random();
        let address = signer.address();
        Account { signer, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Address as 0x-prefixed checksummed string
    pub fn address_string(&self) -> String {
        format!("{:?}", self.address)
    }

    /// Wallet for provider builders that sign transactions
    pub fn wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}

/// Parse an EVM address from a string
pub fn parse_address(address: &str) -> Result<Address> {
    address
        .parse::<Address>()
        .map_err(|e| ChainError::InvalidAddress(format!("{}: {}", address, e)))
}
