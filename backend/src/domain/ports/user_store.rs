//! Driven port for user record storage.
//!
//! HTTP handlers depend on this trait only, so the JSON file adapter can be
//! replaced by a database-backed one without touching routing.

use async_trait::async_trait;

use crate::domain::{User, UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user storage adapters.
    pub enum UserStoreError {
        /// The in-memory state cannot be accessed.
        Unavailable { message: String } => "user store unavailable: {message}",
        /// No further identifiers can be assigned.
        IdsExhausted => "user store has no identifiers left to assign",
        /// Writing the durable representation failed.
        Persistence { message: String } => "user store persistence failed: {message}",
    }
}

/// Storage operations over the full set of user records.
///
/// Mutating operations persist the complete set before returning. A failed
/// persist is logged by the adapter and does not fail the mutation; only
/// [`UserStore::persist`] reports it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Every stored user in storage order.
    async fn list(&self) -> Result<Vec<User>, UserStoreError>;

    /// The first user whose identifier matches `id`.
    async fn get(&self, id: UserId) -> Result<Option<User>, UserStoreError>;

    /// Store a new user under the next free identifier and return it.
    async fn add(&self, profile: UserProfile) -> Result<User, UserStoreError>;

    /// Replace every field except the identifier.
    ///
    /// Returns `None` without persisting when no user matches `id`.
    async fn update(
        &self,
        id: UserId,
        profile: UserProfile,
    ) -> Result<Option<User>, UserStoreError>;

    /// Remove a user, returning the removed record.
    ///
    /// Returns `None` without persisting when no user matches `id`.
    async fn delete(&self, id: UserId) -> Result<Option<User>, UserStoreError>;

    /// Write the complete set to durable storage.
    async fn persist(&self) -> Result<(), UserStoreError>;
}
