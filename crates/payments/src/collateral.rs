//! Collateral checks and deposits.
//!
//! The deposit path is strictly check-then-act: the wallet balance is
//! read first and a shortfall aborts the operation before any
//! transaction is signed or sent.

use crate::abi::{Erc20, FilecoinPay};
use crate::contract::PaymentsClient;
use crate::error::{PaymentsError, Result};
use alloy::primitives::{TxHash, U256};
use chain::{USDFC_DECIMALS, atto_to_fil, fil_to_atto};
use tracing::info;

/// Confirmation of a successful collateral deposit
#[derive(Debug, Clone)]
pub struct DepositReceipt {
    pub tx_hash: String,
    pub amount: f64,
    pub amount_atto: U256,
    pub operator: String,
}

/// Require `available` to cover `required`, both in USDFC base units.
///
/// Fails with [`PaymentsError::InsufficientCollateral`] carrying the
/// shortfall and faucet guidance. Never touches the chain.
pub fn check_collateral(available: U256, required: U256, faucet: Option<&str>) -> Result<()> {
    if available < required {
        let shortfall = required - available;
        return Err(PaymentsError::InsufficientCollateral {
            required: atto_to_fil(required, USDFC_DECIMALS),
            available: atto_to_fil(available, USDFC_DECIMALS),
            shortfall: atto_to_fil(shortfall, USDFC_DECIMALS),
            faucet: faucet.map(str::to_string),
        });
    }
    Ok(())
}

impl PaymentsClient {
    /// Read the signing wallet's USDFC balance through this client's endpoint
    pub async fn wallet_balance_atto(&self) -> Result<U256> {
        let owner = self.wallet_address()?;
        let provider = self.create_provider()?;

        let token = Erc20::new(self.token_address, &provider);
        token
            .balanceOf(owner)
            .call()
            .await
            .map_err(|e| PaymentsError::ContractCall(format!("balanceOf failed: {}", e)))
    }

    /// Deposit `amount` USDFC into the payments contract and authorize the
    /// operator, as a single combined transaction.
    ///
    /// The wallet balance is verified first; a shortfall fails with
    /// [`PaymentsError::InsufficientCollateral`] and zero transactions sent.
    pub async fn ensure_collateral(&self, amount: f64) -> Result<DepositReceipt> {
        if amount <= 0.0 {
            return Err(PaymentsError::Configuration(format!(
                "deposit amount must be positive, got {}",
                amount
            )));
        }

        let required = fil_to_atto(amount, USDFC_DECIMALS);
        let available = self.wallet_balance_atto().await?;

        info!(
            "Wallet balance: {} USDFC",
            atto_to_fil(available, USDFC_DECIMALS)
        );

        check_collateral(available, required, self.config.usdfc_faucet.as_deref())?;

        info!(
            "Depositing {} USDFC and approving operator {:?}",
            amount, self.operator_address
        );

        let provider = self.create_provider_with_signer()?;
        let payments = FilecoinPay::new(self.payments_address, &provider);

        let pending = payments
            .depositWithPermitAndApproveOperator(
                self.token_address,
                required,
                self.operator_address,
                // Unbounded rate and lockup allowances, bounded lockup period
                U256::MAX,
                U256::MAX,
                U256::from(self.config.max_lockup_epochs),
            )
            .send()
            .await
            .map_err(|e| PaymentsError::Transaction(format!("deposit failed to send: {}", e)))?;

        let receipt = pending.get_receipt().await.map_err(|e| {
            PaymentsError::Transaction(format!("deposit confirmation failed: {}", e))
        })?;

        if !receipt.status() {
            return Err(PaymentsError::Transaction(format!(
                "deposit reverted in tx {}",
                format_tx_hash(receipt.transaction_hash)
            )));
        }

        let tx_hash = format_tx_hash(receipt.transaction_hash);
        info!("Deposit confirmed in tx {}", tx_hash);

        Ok(DepositReceipt {
            tx_hash,
            amount,
            amount_atto: required,
            operator: format!("{:?}", self.operator_address),
        })
    }
}

fn format_tx_hash(hash: TxHash) -> String {
    format!("0x{:x}", hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EPOCHS_PER_MONTH, PaymentsConfig};

    #[test]
    fn test_check_collateral_shortfall() {
        // 2.5 required against an empty wallet
        let required = fil_to_atto(2.5, USDFC_DECIMALS);
        let err = check_collateral(U256::ZERO, required, Some("https://faucet.example"))
            .unwrap_err();

        let PaymentsError::InsufficientCollateral {
            required,
            available,
            shortfall,
            faucet,
        } = err
        else {
            panic!("expected insufficient collateral");
        };
        assert_eq!(required, 2.5);
        assert_eq!(available, 0.0);
        assert_eq!(shortfall, 2.5);
        assert_eq!(faucet.as_deref(), Some("https://faucet.example"));
    }

    #[test]
    fn test_check_collateral_partial_shortfall() {
        let available = fil_to_atto(1.0, USDFC_DECIMALS);
        let required = fil_to_atto(2.5, USDFC_DECIMALS);

        let err = check_collateral(available, required, None).unwrap_err();
        let PaymentsError::InsufficientCollateral { shortfall, .. } = err else {
            panic!("expected insufficient collateral");
        };
        assert!((shortfall - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_check_collateral_sufficient() {
        let available = fil_to_atto(10.0, USDFC_DECIMALS);
        let required = fil_to_atto(2.5, USDFC_DECIMALS);
        assert!(check_collateral(available, required, None).is_ok());

        // An exact match is sufficient
        assert!(check_collateral(required, required, None).is_ok());
    }

    #[test]
    fn test_format_tx_hash() {
        let hash = TxHash::from([0xab; 32]);
        let formatted = format_tx_hash(hash);
        assert!(formatted.starts_with("0x"));
        assert_eq!(formatted.len(), 66);
    }

    #[tokio::test]
    async fn test_wallet_balance_localhost() {
        // Requires a local node, skip when unavailable
        let config = PaymentsConfig {
            network: "localhost".to_string(),
            rpc_url: "http://localhost:8545".to_string(),
            token_address: "0xb3042734b608a1b16e9e86b374a3f3e389b4cdf0".to_string(),
            payments_address: "0x0e690d3e60b0576d01352ab03b258115eb84a047".to_string(),
            operator_address: "0x394feca6bcb84502d93c0c5c03c620ba8897e8f4".to_string(),
            // Well-known development key
            private_key: Some(
                "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80".to_string(),
            ),
            max_lockup_epochs: EPOCHS_PER_MONTH,
            usdfc_faucet: None,
        };
        let client = PaymentsClient::new(config).unwrap();

        if let Ok(balance) = client.wallet_balance_atto().await {
            println!(
                "Dev wallet holds {} USDFC",
                atto_to_fil(balance, USDFC_DECIMALS)
            );
        }
    }
}
