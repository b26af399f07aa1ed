//! Occupancy API Client
//!
//! Read-only access to the three upstream endpoints. [`ParkingApi`] is the
//! seam the renderer depends on; [`HttpParkingApi`] is the reqwest
//! implementation.

mod error;

pub use error::{ClientError, ClientResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::model::{LotHistory, OverallHistory, SnapshotResponse};

/// Current snapshot of all lots
pub const PARKING_DATA_PATH: &str = "/api/parking-data";

/// Per-route vehicle counts over time
pub const OVERALL_HISTORY_PATH: &str = "/api/overall-history";

/// History of one lot, takes `?id=`
pub const LOT_HISTORY_PATH: &str = "/api/parking-lot-history";

/// Source of occupancy data
#[async_trait]
pub trait ParkingApi: Send + Sync {
    /// `GET /api/parking-data`
    async fn fetch_snapshot(&self) -> ClientResult<SnapshotResponse>;

    /// `GET /api/overall-history`
    async fn fetch_overall_history(&self) -> ClientResult<OverallHistory>;

    /// `GET /api/parking-lot-history?id={lot_id}`
    async fn fetch_lot_history(&self, lot_id: &str) -> ClientResult<LotHistory>;
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the occupancy API (e.g., "http://localhost:5000")
    pub base_url: String,
    /// Request timeout; `None` leaves it to the transport
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// reqwest-backed [`ParkingApi`]
#[derive(Debug, Clone)]
pub struct HttpParkingApi {
    client: Client,
    base_url: String,
}

impl HttpParkingApi {
    /// Create a client for the given upstream
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the lot history endpoint for one lot
    pub fn lot_history_url(&self, lot_id: &str) -> String {
        format!(
            "{}{}?id={}",
            self.base_url,
            LOT_HISTORY_PATH,
            urlencoding::encode(lot_id)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ClientResult<T> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(ClientError::from_transport)?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ParkingApi for HttpParkingApi {
    async fn fetch_snapshot(&self) -> ClientResult<SnapshotResponse> {
        self.get_json(&format!("{}{}", self.base_url, PARKING_DATA_PATH))
            .await
    }

    async fn fetch_overall_history(&self) -> ClientResult<OverallHistory> {
        self.get_json(&format!("{}{}", self.base_url, OVERALL_HISTORY_PATH))
            .await
    }

    async fn fetch_lot_history(&self, lot_id: &str) -> ClientResult<LotHistory> {
        self.get_json(&self.lot_history_url(lot_id)).await
    }
}
