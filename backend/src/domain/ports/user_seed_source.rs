//! Driven port for the one-time initial user seed.
//!
//! Storage consults the seed only when no persisted snapshot exists. Every
//! error is recoverable: callers fall back to an empty user list.

use async_trait::async_trait;

use crate::domain::User;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while fetching seed users.
    pub enum UserSeedSourceError {
        /// The request did not complete within the configured timeout.
        Timeout { message: String } => "user seed request timed out: {message}",
        /// Network transport failed before a response arrived.
        Transport { message: String } => "user seed transport failed: {message}",
        /// The remote answered with a non-success status.
        Status { status: u16 } => "user seed request returned status {status}",
        /// The response body was not a JSON array of users.
        Decode { message: String } => "user seed payload could not be decoded: {message}",
    }
}

/// Source of the initial user set.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserSeedSource: Send + Sync {
    /// Fetch the seed users.
    async fn fetch_users(&self) -> Result<Vec<User>, UserSeedSourceError>;
}

/// Seed source used when remote seeding is switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledUserSeedSource;

#[async_trait]
impl UserSeedSource for DisabledUserSeedSource {
    async fn fetch_users(&self) -> Result<Vec<User>, UserSeedSourceError> {
        Ok(Vec::new())
    }
}
