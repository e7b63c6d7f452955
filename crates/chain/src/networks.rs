use crate::error::{ChainError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilecoinNetwork {
    pub name: String,
    pub chain_id: u64,
    pub rpc_endpoints: Vec<String>,
    pub explorer: Option<String>,
    pub native_currency: NativeCurrency,
    /// USDFC stable token contract, if deployed on this network
    pub usdfc_address: Option<String>,
    /// Faucet dispensing the native gas token
    pub gas_faucet: Option<String>,
    /// Faucet dispensing USDFC
    pub usdfc_faucet: Option<String>,
    pub testnet: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl FilecoinNetwork {
    pub fn get_network(name: &str) -> Option<&'static FilecoinNetwork> {
        NETWORKS.get(name)
    }

    pub fn list_networks() -> Vec<&'static str> {
        NETWORKS.keys().map(|s| s.as_str()).collect()
    }

    /// Explorer page for an address, e.g. https://calibration.filscan.io/address/0x...
    pub fn explorer_address_url(&self, address: &str) -> Option<String> {
        self.explorer
            .as_ref()
            .map(|base| format!("{}/address/{}", base, address))
    }
}

/// Resolve the RPC endpoints to try for a network.
///
/// Precedence: explicit URL argument, then the `RPC_URL` environment
/// variable, then the catalog defaults for the network.
pub fn resolve_rpc_endpoints(url: Option<&str>, network: &str) -> Result<Vec<String>> {
    if let Some(url) = url {
        if !url.is_empty() {
            return Ok(vec![url.to_string()]);
        }
    }

    if let Ok(url) = std::env::var("RPC_URL") {
        if !url.is_empty() {
            return Ok(vec![url]);
        }
    }

    let network_config = FilecoinNetwork::get_network(network)
        .ok_or_else(|| ChainError::UnknownNetwork(network.to_string()))?;

    if network_config.rpc_endpoints.is_empty() {
        return Err(ChainError::Configuration(format!(
            "No RPC endpoints configured for network: {}",
            network
        )));
    }

    Ok(network_config.rpc_endpoints.clone())
}

static NETWORKS: Lazy<HashMap<String, FilecoinNetwork>> = Lazy::new(|| {
    let mut networks = HashMap::new();

    // Filecoin Calibration testnet
    networks.insert("calibration".to_string(), FilecoinNetwork {
        name: "Filecoin Calibration".to_string(),
        chain_id: 314159,
        rpc_endpoints: vec![
            "https://api.calibration.node.glif.io/rpc/v1".to_string(),
            "https://filecoin-calibration.chainup.net/rpc/v1".to_string(),
            "https://rpc.ankr.com/filecoin_testnet".to_string(),
        ],
        explorer: Some("https://calibration.filscan.io".to_string()),
        native_currency: NativeCurrency {
            name: "Test Filecoin".to_string(),
            symbol: "tFIL".to_string(),
            decimals: 18,
        },
        usdfc_address: Some("0xb3042734b608a1B16e9e86B374A3f3e389B4cDf0".to_string()),
        gas_faucet: Some("https://faucet.calibnet.chainsafe-fil.io/".to_string()),
        usdfc_faucet: Some(
            "https://forest-explorer.chainsafe.dev/faucet/calibnet_usdfc".to_string(),
        ),
        testnet: true,
    });

    // Filecoin Mainnet
    networks.insert("mainnet".to_string(), FilecoinNetwork {
        name: "Filecoin Mainnet".to_string(),
        chain_id: 314,
        rpc_endpoints: vec![
            "https://api.node.glif.io/rpc/v1".to_string(),
            "https://filecoin.chainup.net/rpc/v1".to_string(),
            "https://rpc.ankr.com/filecoin".to_string(),
        ],
        explorer: Some("https://filscan.io".to_string()),
        native_currency: NativeCurrency {
            name: "Filecoin".to_string(),
            symbol: "FIL".to_string(),
            decimals: 18,
        },
        usdfc_address: Some("0x80B98d3aa09ffff255c3ba4A241111Ff1262F045".to_string()),
        gas_faucet: None,
        usdfc_faucet: None,
        testnet: false,
    });

    // Local development
    networks.insert("localhost".to_string(), FilecoinNetwork {
        name: "Localhost".to_string(),
        chain_id: 31337,
        rpc_endpoints: vec![
            "http://127.0.0.1:8545".to_string(),
            "http://localhost:8545".to_string(),
        ],
        explorer: None,
        native_currency: NativeCurrency {
            name: "Filecoin".to_string(),
            symbol: "FIL".to_string(),
            decimals: 18,
        },
        usdfc_address: None,
        gas_faucet: None,
        usdfc_faucet: None,
        testnet: true,
    });

    networks
});
