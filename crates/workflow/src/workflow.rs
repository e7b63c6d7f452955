use crate::config::WorkflowConfig;
use crate::error::{Result, WorkflowError};
use chain::Account;
use documents::{Document, EventMetadata, MerchItem, ProofOfFunResults};
use payments::{DepositReceipt, PaymentsClient, PaymentsConfig};
use storage::{PieceStoreClient, ProviderInfo, StoreConfig, UploadReceipt};
use tracing::{info, warn};

/// Clients built once per session and shared by every operation
struct Session {
    account: Account,
    store: PieceStoreClient,
    payments: PaymentsClient,
}

enum SessionState {
    Uninitialized,
    Active(Session),
    Closed,
}

/// Orchestrates collateral deposits and document storage for one wallet.
///
/// A workflow starts uninitialized, becomes active after [`initialize`],
/// and ends permanently once [`close`] is called. Operations called
/// outside the active phase fail with [`WorkflowError::Uninitialized`]
/// or [`WorkflowError::SessionClosed`] before touching the network.
///
/// [`initialize`]: StorageWorkflow::initialize
/// [`close`]: StorageWorkflow::close
pub struct StorageWorkflow {
    config: WorkflowConfig,
    state: SessionState,
}

/// Gas and USDFC balances for the session wallet
#[derive(Debug, Clone)]
pub struct WalletBalances {
    pub address: String,
    pub network: String,
    pub gas_symbol: String,
    pub gas: f64,
    /// None on networks without a USDFC deployment
    pub usdfc: Option<f64>,
}

/// Everything the guided workflow produced, in order
#[derive(Debug, Clone)]
pub struct WorkflowSummary {
    pub deposit: DepositReceipt,
    pub active_providers: usize,
    pub event: UploadReceipt,
    pub results: UploadReceipt,
    pub catalog: UploadReceipt,
    pub round_trip_verified: bool,
}

impl WorkflowSummary {
    pub fn total_bytes(&self) -> u64 {
        self.event.size + self.results.size + self.catalog.size
    }
}

impl StorageWorkflow {
    pub fn new(config: WorkflowConfig) -> Result<StorageWorkflow> {
        config.validate()?;
        Ok(StorageWorkflow {
            config,
            state: SessionState::Uninitialized,
        })
    }

    /// Convenience constructor reading [`WorkflowConfig`] from the environment
    pub fn from_env(network_override: Option<&str>) -> Result<StorageWorkflow> {
        StorageWorkflow::new(WorkflowConfig::from_env(network_override)?)
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, SessionState::Closed)
    }

    /// Build the wallet, payment and storage clients for this session.
    ///
    /// Requires `PRIVATE_KEY`. Calling this twice is a no-op; calling it
    /// after [`close`](StorageWorkflow::close) is an error.
    pub async fn initialize(&mut self) -> Result<()> {
        match self.state {
            SessionState::Active(_) => {
                warn!("Storage session already initialized, ignoring");
                return Ok(());
            }
            SessionState::Closed => return Err(WorkflowError::SessionClosed),
            SessionState::Uninitialized => {}
        }

        let private_key = self.config.require_private_key()?;
        let account = Account::from_private_key(private_key)?;

        let mut payments_config = PaymentsConfig::for_network(&self.config.network)?;
        if let Some(url) = &self.config.rpc_url {
            payments_config.rpc_url = url.clone();
        }
        let payments = PaymentsClient::for_account(payments_config, account.clone())?;

        let store = PieceStoreClient::with_config(StoreConfig::for_network(&self.config.network));

        info!(
            "Storage session initialized on {} for {}",
            self.config.network,
            account.address_string()
        );
        self.state = SessionState::Active(Session {
            account,
            store,
            payments,
        });
        Ok(())
    }

    fn session(&self) -> Result<&Session> {
        match &self.state {
            SessionState::Active(session) => Ok(session),
            SessionState::Uninitialized => Err(WorkflowError::Uninitialized),
            SessionState::Closed => Err(WorkflowError::SessionClosed),
        }
    }

    /// Address of the session wallet
    pub fn address(&self) -> Result<String> {
        Ok(self.session()?.account.address_string())
    }

    /// Gas and USDFC balances of the session wallet
    pub async fn balances(&self) -> Result<WalletBalances> {
        let session = self.session()?;
        let address = session.account.address_string();
        let network = chain::FilecoinNetwork::get_network(&self.config.network)
            .ok_or_else(|| chain::ChainError::UnknownNetwork(self.config.network.clone()))?;

        let gas = chain::get_balance(&address, chain::Asset::Native, &self.config.network).await?;
        let usdfc = if network.usdfc_address.is_some() {
            Some(chain::get_balance(&address, chain::Asset::Usdfc, &self.config.network).await?)
        } else {
            None
        };

        Ok(WalletBalances {
            address,
            network: network.name.clone(),
            gas_symbol: network.native_currency.symbol.clone(),
            gas,
            usdfc,
        })
    }

    /// Deposit `amount` USDFC as collateral and authorize the operator.
    ///
    /// Checks the wallet balance first and fails with funding guidance,
    /// without sending anything, when it cannot cover the amount.
    pub async fn ensure_collateral(&self, amount: f64) -> Result<DepositReceipt> {
        let session = self.session()?;
        Ok(session.payments.ensure_collateral(amount).await?)
    }

    /// Store event metadata, returning the piece receipt
    pub async fn store_event(&self, event: EventMetadata) -> Result<UploadReceipt> {
        let session = self.session()?;
        info!("Storing event: {}", event.name);
        self.upload_document(session, &Document::event(event)).await
    }

    /// Store rating results for an event, returning the piece receipt
    pub async fn store_results(
        &self,
        event_id: u64,
        results: ProofOfFunResults,
    ) -> Result<UploadReceipt> {
        let session = self.session()?;
        info!("Storing rating results for event {}", event_id);
        let document = Document::results(
            event_id,
            results,
            &self.config.verification_network,
            &self.config.contract_address,
        );
        self.upload_document(session, &document).await
    }

    /// Store a merchandise catalog, returning the piece receipt
    pub async fn store_catalog(&self, items: Vec<MerchItem>) -> Result<UploadReceipt> {
        let session = self.session()?;
        info!("Storing merchandise catalog with {} items", items.len());
        self.upload_document(session, &Document::merch(items))
            .await
    }

    async fn upload_document(
        &self,
        session: &Session,
        document: &Document,
    ) -> Result<UploadReceipt> {
        let bytes = document.encode()?;
        let receipt = session.store.upload(&bytes).await?;
        info!(
            "Stored {} document as {} ({} bytes)",
            document.type_tag(),
            receipt.piece_cid,
            receipt.size
        );
        Ok(receipt)
    }

    /// Download a stored document by piece CID and decode it
    pub async fn fetch(&self, piece_cid: &str) -> Result<Document> {
        let session = self.session()?;
        let bytes = session.store.download(piece_cid).await?;
        Ok(Document::decode(&bytes)?)
    }

    /// Gateway URL serving a stored piece
    pub fn piece_url(&self, piece_cid: &str) -> Result<String> {
        Ok(self.session()?.store.piece_url(piece_cid)?)
    }

    /// Storage providers reported by the publisher
    pub async fn storage_info(&self) -> Result<Vec<ProviderInfo>> {
        let session = self.session()?;
        Ok(session.store.provider_info().await?)
    }

    /// Run the complete storage workflow end to end.
    ///
    /// Initializes the session, deposits the configured collateral,
    /// stores the event, its rating results and the merchandise catalog,
    /// verifies the results document by downloading it back, and closes
    /// the session. The summary reports every receipt in order.
    pub async fn full_workflow(
        &mut self,
        event: EventMetadata,
        results: ProofOfFunResults,
        items: Vec<MerchItem>,
    ) -> Result<WorkflowSummary> {
        self.initialize().await?;

        info!(
            "Depositing {} USDFC collateral before uploads",
            self.config.deposit_amount
        );
        let deposit = self.ensure_collateral(self.config.deposit_amount).await?;

        let providers = self.storage_info().await?;
        let active_providers = providers.iter().filter(|p| p.active).count();
        info!(
            "Storage network ready: {}/{} providers active",
            active_providers,
            providers.len()
        );

        let event_id = event.id;
        let event_receipt = self.store_event(event).await?;
        let results_receipt = self.store_results(event_id, results).await?;
        let catalog_receipt = self.store_catalog(items).await?;

        let fetched = self.fetch(&results_receipt.piece_cid).await?;
        let round_trip_verified = match &fetched {
            Document::Results(envelope) => envelope.event_id == event_id,
            _ => false,
        };
        if round_trip_verified {
            info!("Round trip verified for {}", results_receipt.piece_cid);
        } else {
            warn!(
                "Downloaded document does not match what was stored for {}",
                results_receipt.piece_cid
            );
        }

        self.close();

        Ok(WorkflowSummary {
            deposit,
            active_providers,
            event: event_receipt,
            results: results_receipt,
            catalog: catalog_receipt,
            round_trip_verified,
        })
    }

    /// End the session. Idempotent; every later operation fails with
    /// [`WorkflowError::SessionClosed`].
    pub fn close(&mut self) {
        if matches!(self.state, SessionState::Closed) {
            return;
        }
        self.state = SessionState::Closed;
        info!("Storage session closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_CONTRACT_ADDRESS, DEFAULT_VERIFICATION_NETWORK};
    use payments::DepositReceipt;

    fn test_config() -> WorkflowConfig {
        WorkflowConfig {
            network: "calibration".to_string(),
            rpc_url: None,
            private_key: None,
            deposit_amount: 2.5,
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            verification_network: DEFAULT_VERIFICATION_NETWORK.to_string(),
        }
    }

    #[test]
    fn test_new_workflow_is_uninitialized() {
        let workflow = StorageWorkflow::new(test_config()).unwrap();
        assert!(!workflow.is_initialized());
        assert!(!workflow.is_closed());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = test_config();
        config.network = "nope".to_string();
        assert!(StorageWorkflow::new(config).is_err());
    }

    #[tokio::test]
    async fn test_initialize_requires_private_key() {
        let mut workflow = StorageWorkflow::new(test_config()).unwrap();
        let err = workflow.initialize().await.unwrap_err();
        assert!(err.is_configuration_error());
        assert!(!workflow.is_initialized());
    }

    #[test]
    fn test_summary_total_bytes() {
        let summary = WorkflowSummary {
            deposit: DepositReceipt {
                tx_hash: "0xabc".to_string(),
                amount: 2.5,
                amount_atto: alloy::primitives::U256::ZERO,
                operator: "0xdef".to_string(),
            },
            active_providers: 3,
            event: UploadReceipt {
                piece_cid: "bafk1".to_string(),
                size: 100,
            },
            results: UploadReceipt {
                piece_cid: "bafk2".to_string(),
                size: 250,
            },
            catalog: UploadReceipt {
                piece_cid: "bafk3".to_string(),
                size: 50,
            },
            round_trip_verified: true,
        };
        assert_eq!(summary.total_bytes(), 400);
    }
}
