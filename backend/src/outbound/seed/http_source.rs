//! Reqwest-backed user seed adapter.
//!
//! This adapter owns transport details only: the GET request, timeout and
//! HTTP status mapping, and JSON decoding into domain users.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::domain::User;
use crate::domain::ports::{UserSeedSource, UserSeedSourceError};

/// Remote endpoint serving the initial user set.
pub const DEFAULT_SEED_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// Upper bound on the whole seed request.
pub const DEFAULT_SEED_TIMEOUT: Duration = Duration::from_secs(5);

/// Seed source performing a single HTTP GET against one endpoint.
pub struct HttpUserSeedSource {
    client: Client,
    endpoint: Url,
}

impl HttpUserSeedSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// Endpoint queried for seed users.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl UserSeedSource for HttpUserSeedSource {
    async fn fetch_users(&self) -> Result<Vec<User>, UserSeedSourceError> {
        debug!(endpoint = %self.endpoint, "requesting seed users");
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(status));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        parse_users(body.as_ref())
    }
}

fn parse_users(body: &[u8]) -> Result<Vec<User>, UserSeedSourceError> {
    serde_json::from_slice(body).map_err(|error| UserSeedSourceError::decode(error.to_string()))
}

fn map_transport_error(error: reqwest::Error) -> UserSeedSourceError {
    if error.is_timeout() {
        UserSeedSourceError::timeout(error.to_string())
    } else {
        UserSeedSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode) -> UserSeedSourceError {
    UserSeedSourceError::status(status.as_u16())
}
