//! Contract client for the payments and token contracts
//!
//! Holds the parsed addresses and the signing account, and builds
//! providers on demand, one per call, read-only or signing.

use crate::config::PaymentsConfig;
use crate::error::{PaymentsError, Result};
use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use chain::Account;
use std::str::FromStr;

pub struct PaymentsClient {
    /// Payments contract receiving deposits
    pub payments_address: Address,
    /// USDFC token contract
    pub token_address: Address,
    /// Operator granted an allowance over the deposit
    pub operator_address: Address,
    /// Signing account, absent for read-only use
    account: Option<Account>,
    /// Configuration
    pub config: PaymentsConfig,
}

impl PaymentsClient {
    /// Creates a new payments client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configured address is invalid, or the
    /// private key (if provided) cannot be parsed.
    pub fn new(config: PaymentsConfig) -> Result<Self> {
        let account = if config.can_write() {
            let key = config.private_key.as_deref().unwrap_or_default();
            Some(Account::from_private_key(key).map_err(|e| {
                PaymentsError::Configuration(format!("Invalid private key: {}", e))
            })?)
        } else {
            None
        };
        Self::build(config, account)
    }

    /// Creates a payments client signing with an already-derived account.
    ///
    /// The account stands in for `private_key` in the configuration, so
    /// the key is not parsed a second time.
    pub fn for_account(config: PaymentsConfig, account: Account) -> Result<Self> {
        Self::build(config, Some(account))
    }

    fn build(config: PaymentsConfig, account: Option<Account>) -> Result<Self> {
        config
            .validate()
            .map_err(PaymentsError::Configuration)?;

        let payments_address = Address::from_str(&config.payments_address).map_err(|e| {
            PaymentsError::Configuration(format!(
                "Invalid payments address '{}': {}",
                config.payments_address, e
            ))
        })?;

        let token_address = Address::from_str(&config.token_address).map_err(|e| {
            PaymentsError::Configuration(format!(
                "Invalid token address '{}': {}",
                config.token_address, e
            ))
        })?;

        let operator_address = Address::from_str(&config.operator_address).map_err(|e| {
            PaymentsError::Configuration(format!(
                "Invalid operator address '{}': {}",
                config.operator_address, e
            ))
        })?;

        Ok(Self {
            payments_address,
            token_address,
            operator_address,
            account,
            config,
        })
    }

    /// Checks if the client has a wallet for signing transactions
    pub fn has_wallet(&self) -> bool {
        self.account.is_some()
    }

    /// Returns the RPC URL
    pub fn rpc_url(&self) -> &str {
        &self.config.rpc_url
    }

    /// Address of the signing account
    pub fn wallet_address(&self) -> Result<Address> {
        Ok(self.account()?.address())
    }

    fn account(&self) -> Result<&Account> {
        self.account.as_ref().ok_or(PaymentsError::NoPrivateKey)
    }

    /// Create a read-only provider for contract calls
    pub fn create_provider(&self) -> Result<impl Provider> {
        let rpc_url = self
            .config
            .rpc_url
            .parse()
            .map_err(|e| PaymentsError::ProviderError(format!("Invalid RPC URL: {}", e)))?;

        Ok(ProviderBuilder::new().connect_http(rpc_url))
    }

    /// Create a provider with wallet for sending transactions
    pub fn create_provider_with_signer(&self) -> Result<impl Provider> {
        let wallet = self.account()?.wallet();

        let rpc_url = self
            .config
            .rpc_url
            .parse()
            .map_err(|e| PaymentsError::ProviderError(format!("Invalid RPC URL: {}", e)))?;

        Ok(ProviderBuilder::new().wallet(wallet).connect_http(rpc_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EPOCHS_PER_MONTH;

    fn test_config() -> PaymentsConfig {
        PaymentsConfig {
            network: "localhost".to_string(),
            rpc_url: "http://localhost:8545".to_string(),
            token_address: "0xb3042734b608a1b16e9e86b374a3f3e389b4cdf0".to_string(),
            payments_address: "0x0e690d3e60b0576d01352ab03b258115eb84a047".to_string(),
            operator_address: "0x394feca6bcb84502d93c0c5c03c620ba8897e8f4".to_string(),
            private_key: None,
            max_lockup_epochs: EPOCHS_PER_MONTH,
            usdfc_faucet: None,
        }
    }

    #[test]
    fn test_client_creation() {
        let client = PaymentsClient::new(test_config());
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_payments_address() {
        let mut config = test_config();
        config.payments_address = "invalid".to_string();
        assert!(PaymentsClient::new(config).is_err());
    }

    #[test]
    fn test_client_methods() {
        let client = PaymentsClient::new(test_config()).unwrap();
        assert!(!client.has_wallet());
        assert_eq!(client.rpc_url(), "http://localhost:8545");
        assert!(matches!(
            client.wallet_address().unwrap_err(),
            PaymentsError::NoPrivateKey
        ));
    }

    #[test]
    fn test_wallet_address() {
        let mut config = test_config();
        // Well-known development key
        config.private_key =
            Some("0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80".to_string());

        let client = PaymentsClient::new(config).unwrap();
        assert!(client.has_wallet());
        assert_eq!(
            format!("{:?}", client.wallet_address().unwrap()).to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_for_account_reuses_the_derived_wallet() {
        // The config carries no private key, the account supplies the signer
        let account = Account::from_private_key(
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        )
        .unwrap();

        let client = PaymentsClient::for_account(test_config(), account.clone()).unwrap();
        assert!(client.has_wallet());
        assert_eq!(client.wallet_address().unwrap(), account.address());
        assert!(client.create_provider_with_signer().is_ok());
    }
}
