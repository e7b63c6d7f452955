use crate::error::{ChainError, Result};
use crate::networks::{FilecoinNetwork, resolve_rpc_endpoints};
use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::sol;
use tracing::debug;

/// USDFC uses 18 decimals, same as FIL
pub const USDFC_DECIMALS: u8 = 18;

/// Asset a balance is denominated in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    /// Native gas token (FIL / tFIL)
    Native,
    /// USDFC stable token, pays for storage
    Usdfc,
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug)]
    contract Erc20 {
        function balanceOf(address account) external view returns (uint256);
    }
}

/// Get the native gas balance in attoFIL for an address on a specific network
pub async fn get_gas_balance_atto(address: &str, network: &str) -> Result<U256> {
    let addr: Address = address
        .parse()
        .map_err(|e| ChainError::InvalidAddress(format!("{}: {}", address, e)))?;

    // Try each endpoint until one succeeds
    let mut last_error = None;
    for endpoint in resolve_rpc_endpoints(None, network)? {
        match fetch_gas_balance(addr, &endpoint).await {
            Ok(balance) => return Ok(balance),
            Err(e) => {
                debug!("endpoint {} failed: {}", endpoint, e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| ChainError::Rpc("failed to fetch balance".to_string())))
}

async fn fetch_gas_balance(address: Address, endpoint: &str) -> Result<U256> {
    let provider = ProviderBuilder::new().connect_http(
        endpoint
            .parse()
            .map_err(|e| ChainError::Rpc(format!("invalid endpoint {}: {}", endpoint, e)))?,
    );

    provider
        .get_balance(address)
        .await
        .map_err(|e| ChainError::Rpc(format!("failed to fetch balance from {}: {}", endpoint, e)))
}

/// Get the native gas balance as f64, in whole FIL
pub async fn get_gas_balance(address: &str, network: &str) -> Result<f64> {
    let network_config = FilecoinNetwork::get_network(network)
        .ok_or_else(|| ChainError::UnknownNetwork(network.to_string()))?;

    let balance_atto = get_gas_balance_atto(address, network).await?;

    Ok(atto_to_fil(balance_atto, network_config.native_currency.decimals))
}

/// Get an ERC-20 token balance in base units for an address
pub async fn get_token_balance_atto(address: &str, token: &str, network: &str) -> Result<U256> {
    let addr: Address = address
        .parse()
        .map_err(|e| ChainError::InvalidAddress(format!("{}: {}", address, e)))?;
    let token_addr: Address = token
        .parse()
        .map_err(|e| ChainError::InvalidAddress(format!("{}: {}", token, e)))?;

    let mut last_error = None;
    for endpoint in resolve_rpc_endpoints(None, network)? {
        match fetch_token_balance(addr, token_addr, &endpoint).await {
            Ok(balance) => return Ok(balance),
            Err(e) => {
                debug!("endpoint {} failed: {}", endpoint, e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| ChainError::Rpc("failed to fetch token balance".to_string())))
}

async fn fetch_token_balance(address: Address, token: Address, endpoint: &str) -> Result<U256> {
    let provider = ProviderBuilder::new().connect_http(
        endpoint
            .parse()
            .map_err(|e| ChainError::Rpc(format!("invalid endpoint {}: {}", endpoint, e)))?,
    );

    let contract = Erc20::new(token, &provider);
    contract
        .balanceOf(address)
        .call()
        .await
        .map_err(|e| ChainError::ContractCall(format!("balanceOf failed: {}", e)))
}

/// Get the USDFC balance in base units, using the token address from the catalog
pub async fn get_usdfc_balance_atto(address: &str, network: &str) -> Result<U256> {
    let network_config = FilecoinNetwork::get_network(network)
        .ok_or_else(|| ChainError::UnknownNetwork(network.to_string()))?;

    let token = network_config.usdfc_address.as_ref().ok_or_else(|| {
        ChainError::Configuration(format!("USDFC is not deployed on network: {}", network))
    })?;

    get_token_balance_atto(address, token, network).await
}

/// Get the USDFC balance as f64, in whole tokens
pub async fn get_usdfc_balance(address: &str, network: &str) -> Result<f64> {
    let balance_atto = get_usdfc_balance_atto(address, network).await?;
    Ok(atto_to_fil(balance_atto, USDFC_DECIMALS))
}

/// Get the balance of an asset in base units
pub async fn get_balance_atto(address: &str, asset: Asset, network: &str) -> Result<U256> {
    match asset {
        Asset::Native => get_gas_balance_atto(address, network).await,
        Asset::Usdfc => get_usdfc_balance_atto(address, network).await,
    }
}

/// Get the balance of an asset as f64, in whole units
pub async fn get_balance(address: &str, asset: Asset, network: &str) -> Result<f64> {
    match asset {
        Asset::Native => get_gas_balance(address, network).await,
        Asset::Usdfc => get_usdfc_balance(address, network).await,
    }
}

/// Convert attoFIL (or token base units with the given decimals) to f64
pub fn atto_to_fil(atto: U256, decimals: u8) -> f64 {
    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = atto / divisor;
    let fraction = atto % divisor;

    // May lose precision for very large values, fine for display
    let whole_f64 = whole.to_string().parse::<f64>().unwrap_or(0.0);
    let fraction_f64 =
        fraction.to_string().parse::<f64>().unwrap_or(0.0) / (10_f64.powi(decimals as i32));

    whole_f64 + fraction_f64
}

/// Convert whole FIL (or tokens with the given decimals) to base units
pub fn fil_to_atto(fil: f64, decimals: u8) -> U256 {
    let atto_per_fil = 10_f64.powi(decimals as i32);
    let atto = (fil * atto_per_fil) as u128;
    U256::from(atto)
}

/// Get account information (native balance and nonce)
pub async fn get_account_info(address: &str, network: &str) -> Result<AccountInfo> {
    let network_config = FilecoinNetwork::get_network(network)
        .ok_or_else(|| ChainError::UnknownNetwork(network.to_string()))?;

    let addr: Address = address
        .parse()
        .map_err(|e| ChainError::InvalidAddress(format!("{}: {}", address, e)))?;

    let mut last_error = None;
    for endpoint in resolve_rpc_endpoints(None, network)? {
        match fetch_account_info(addr, &endpoint, network_config).await {
            Ok(info) => return Ok(info),
            Err(e) => {
                debug!("endpoint {} failed: {}", endpoint, e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| ChainError::Rpc("failed to fetch account info".to_string())))
}

async fn fetch_account_info(
    address: Address,
    endpoint: &str,
    network: &FilecoinNetwork,
) -> Result<AccountInfo> {
    let provider = ProviderBuilder::new().connect_http(
        endpoint
            .parse()
            .map_err(|e| ChainError::Rpc(format!("invalid endpoint {}: {}", endpoint, e)))?,
    );

    // Balance and nonce in parallel
    let (balance, nonce) = tokio::try_join!(
        provider.get_balance(address),
        provider.get_transaction_count(address)
    )
    .map_err(|e| ChainError::Rpc(format!("failed to fetch account data: {}", e)))?;

    Ok(AccountInfo {
        address: format!("{:?}", address),
        balance_atto: balance,
        balance: atto_to_fil(balance, network.native_currency.decimals),
        nonce,
        network: network.name.clone(),
        symbol: network.native_currency.symbol.clone(),
    })
}

/// Probe a network endpoint: chain id and latest block height
pub async fn probe_network(network: &str) -> Result<NetworkStatus> {
    let network_config = FilecoinNetwork::get_network(network)
        .ok_or_else(|| ChainError::UnknownNetwork(network.to_string()))?;

    let mut last_error = None;
    for endpoint in resolve_rpc_endpoints(None, network)? {
        match probe_endpoint(&endpoint, network_config).await {
            Ok(status) => return Ok(status),
            Err(e) => {
                debug!("endpoint {} failed: {}", endpoint, e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| ChainError::Rpc("all endpoints unreachable".to_string())))
}

async fn probe_endpoint(endpoint: &str, network: &FilecoinNetwork) -> Result<NetworkStatus> {
    let provider = ProviderBuilder::new().connect_http(
        endpoint
            .parse()
            .map_err(|e| ChainError::Rpc(format!("invalid endpoint {}: {}", endpoint, e)))?,
    );

    let (chain_id, latest_block) =
        tokio::try_join!(provider.get_chain_id(), provider.get_block_number())
            .map_err(|e| ChainError::Rpc(format!("probe of {} failed: {}", endpoint, e)))?;

    Ok(NetworkStatus {
        network: network.name.clone(),
        expected_chain_id: network.chain_id,
        chain_id,
        latest_block,
        endpoint: endpoint.to_string(),
    })
}

#[derive(Debug)]
pub struct AccountInfo {
    pub address: String,
    pub balance_atto: U256,
    pub balance: f64,
    pub nonce: u64,
    pub network: String,
    pub symbol: String,
}

#[derive(Debug)]
pub struct NetworkStatus {
    pub network: String,
    pub expected_chain_id: u64,
    pub chain_id: u64,
    pub latest_block: u64,
    pub endpoint: String,
}

impl NetworkStatus {
    /// True when the endpoint reports the chain id the catalog expects
    pub fn chain_id_matches(&self) -> bool {
        self.chain_id == self.expected_chain_id
    }
}
