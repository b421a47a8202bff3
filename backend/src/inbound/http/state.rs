//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable with in-memory doubles.

use std::sync::Arc;

use crate::domain::ports::UserStore;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserStore>,
}

impl HttpState {
    /// Construct state around a user store.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use users_backend::inbound::http::state::HttpState;
    /// use users_backend::outbound::persistence::{JsonFileUserStore, UserSnapshotFile};
    ///
    /// let snapshot = UserSnapshotFile::new("Data/users.json").expect("valid path");
    /// let state = HttpState::new(Arc::new(JsonFileUserStore::with_users(snapshot, Vec::new())));
    /// let _users = state.users.clone();
    /// ```
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}
