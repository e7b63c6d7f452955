pub mod error;

pub use error::{Result, StoreError};

use serde::Deserialize;
use std::time::Instant;
use tracing::{error, info};

#[derive(Debug, Clone, Default)]
pub enum Service {
    #[default]
    Calibration,
    Mainnet,
    Local,
}

impl Service {
    /// Map a chain network name onto the matching storage service
    pub fn for_network(network: &str) -> Service {
        match network {
            "mainnet" => Service::Mainnet,
            "localhost" => Service::Local,
            _ => Service::Calibration,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub service: Service,
}

impl StoreConfig {
    pub fn for_network(network: &str) -> Self {
        Self {
            service: Service::for_network(network),
        }
    }

    /// Publisher endpoint receiving piece uploads.
    ///
    /// Override with `POF_PUBLISHER_URL`.
    pub fn publisher_url(&self) -> String {
        if let Ok(url) = std::env::var("POF_PUBLISHER_URL") {
            if !url.is_empty() {
                return url;
            }
        }
        match self.service {
            Service::Calibration => "https://pdp.calibration.filbeam.io".to_string(),
            Service::Mainnet => "https://pdp.filbeam.io".to_string(),
            Service::Local => "http://127.0.0.1:7777".to_string(),
        }
    }

    /// Retrieval gateway, with the piece path baked in so a CID can be
    /// appended directly.
    ///
    /// Override with `POF_GATEWAY_URL`.
    pub fn gateway_url(&self) -> String {
        if let Ok(url) = std::env::var("POF_GATEWAY_URL") {
            if !url.is_empty() {
                return url;
            }
        }
        match self.service {
            Service::Calibration => "https://gateway.calibration.filbeam.io/piece/".to_string(),
            Service::Mainnet => "https://gateway.filbeam.io/piece/".to_string(),
            Service::Local => "http://127.0.0.1:7777/piece/".to_string(),
        }
    }
}

/// Acknowledgement returned by the publisher after a successful upload
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    pub piece_cid: String,
    pub size: u64,
}

/// One storage provider as reported by the publisher
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    pub id: u64,
    pub name: String,
    pub active: bool,
    pub service_provider: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    piece_cid: String,
    size: u64,
}

#[derive(Debug, Deserialize)]
struct ProvidersResponse {
    providers: Vec<ProviderInfo>,
}

/// HTTP client for the content-addressed piece store.
///
/// One upload is one HTTP request; callers decide whether a failed
/// request is worth repeating.
pub struct PieceStoreClient {
    config: StoreConfig,
    client: reqwest::Client,
}

impl PieceStoreClient {
    pub fn new() -> Self {
        Self {
            config: StoreConfig::default(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Upload a payload and return the provider's receipt.
    ///
    /// The acknowledged size must equal the number of bytes sent, anything
    /// else fails with [`StoreError::Integrity`].
    pub async fn upload(&self, data: &[u8]) -> Result<UploadReceipt> {
        let sent = data.len() as u64;

        info!("Uploading {} bytes to piece store", sent);
        let start = Instant::now();

        let url = format!("{}/pdp/v1/pieces", self.config.publisher_url());

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/octet-stream")
            .body(data.to_vec())
            .send()
            .await
            .map_err(|e| StoreError::Connection(format!("failed to send request: {}", e)))?;

        let elapsed = start.elapsed();
        info!("Uploaded in {:?}", elapsed);

        let status = response.status();
        if !status.is_success() {
            error!(
                "upload failed: {} {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            );
            return Err(StoreError::Gateway {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        let ack: UploadResponse = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(format!("failed to parse response: {}", e)))?;

        let receipt = verify_ack(sent, ack)?;
        info!("Piece CID: {}", receipt.piece_cid);
        Ok(receipt)
    }

    /// Download the raw bytes stored under a piece CID
    pub async fn download(&self, piece_cid: &str) -> Result<Vec<u8>> {
        if piece_cid.is_empty() {
            return Err(StoreError::MissingPieceCid);
        }

        info!("Reading piece: {}", piece_cid);
        let start = Instant::now();

        let url = format!("{}{}", self.config.gateway_url(), piece_cid);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StoreError::Connection(format!("failed to send request: {}", e)))?;

        let elapsed = start.elapsed();
        info!("Read in {:?}", elapsed);

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(piece_cid.to_string()));
        }
        if !status.is_success() {
            error!(
                "download failed: {} {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            );
            return Err(StoreError::Gateway {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StoreError::Connection(format!("failed to read response: {}", e)))?;

        Ok(bytes.to_vec())
    }

    /// List the storage providers behind the publisher
    pub async fn provider_info(&self) -> Result<Vec<ProviderInfo>> {
        let url = format!("{}/pdp/v1/providers", self.config.publisher_url());

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StoreError::Connection(format!("failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Gateway {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        let info: ProvidersResponse = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(format!("failed to parse response: {}", e)))?;

        Ok(info.providers)
    }

    /// Public gateway URL for a stored piece
    pub fn piece_url(&self, piece_cid: &str) -> Result<String> {
        if piece_cid.is_empty() {
            return Err(StoreError::MissingPieceCid);
        }

        Ok(format!("{}{}", self.config.gateway_url(), piece_cid))
    }
}

impl Default for PieceStoreClient {
    fn default() -> Self {
        Self::new()
    }
}

/// The acknowledged size must equal the number of bytes sent
fn verify_ack(sent: u64, ack: UploadResponse) -> Result<UploadReceipt> {
    if ack.size != sent {
        return Err(StoreError::Integrity {
            sent,
            acknowledged: ack.size,
        });
    }
    Ok(UploadReceipt {
        piece_cid: ack.piece_cid,
        size: ack.size,
    })
}
