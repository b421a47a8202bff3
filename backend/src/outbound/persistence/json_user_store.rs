//! JSON-file-backed [`UserStore`] adapter.
//!
//! The full user list lives in memory and is rewritten to a pretty-printed
//! JSON snapshot after every mutation. A failed rewrite is logged and the
//! in-memory state stays authoritative.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info, warn};

use super::snapshot_file::{SnapshotPathError, UserSnapshotFile};
use crate::domain::ports::{UserSeedSource, UserStore, UserStoreError};
use crate::domain::{User, UserId, UserProfile};

/// Errors returned by [`JsonFileUserStore::initialise`].
#[derive(Debug, Error)]
pub enum UserStoreInitError {
    /// The configured snapshot location is unusable.
    #[error(transparent)]
    SnapshotPath(#[from] SnapshotPathError),
}

/// Identifier following the highest one in `users`, or [`UserId::FIRST`].
fn next_id(users: &[User]) -> Result<UserId, UserStoreError> {
    match users.iter().map(User::id).max() {
        None => Ok(UserId::FIRST),
        Some(max) => max.next().ok_or_else(UserStoreError::ids_exhausted),
    }
}

/// User store persisting the full list to a JSON snapshot file.
#[derive(Debug)]
pub struct JsonFileUserStore {
    users: Mutex<Vec<User>>,
    snapshot: UserSnapshotFile,
}

impl JsonFileUserStore {
    /// Load users from the snapshot at `path`, seeding it when absent.
    ///
    /// - An existing snapshot is decoded; read or decode failures are logged
    ///   and yield an empty list.
    /// - A missing snapshot triggers one call to `seed`; seed failures are
    ///   logged and yield an empty list.
    ///
    /// The resulting list is always written back before returning.
    ///
    /// # Errors
    /// Returns [`UserStoreInitError::SnapshotPath`] when `path` does not name
    /// a file.
    ///
    /// # Examples
    /// ```no_run
    /// use users_backend::domain::ports::DisabledUserSeedSource;
    /// use users_backend::outbound::persistence::JsonFileUserStore;
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let store = JsonFileUserStore::initialise("Data/users.json", &DisabledUserSeedSource).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn initialise(
        path: impl AsRef<Path>,
        seed: &dyn UserSeedSource,
    ) -> Result<Self, UserStoreInitError> {
        let snapshot = UserSnapshotFile::new(path)?;
        let users = match snapshot.read() {
            Ok(Some(contents)) => decode_snapshot(&snapshot, &contents),
            Ok(None) => {
                info!(
                    path = %snapshot.path().display(),
                    "user snapshot not found; fetching seed users"
                );
                fetch_seed(seed).await
            }
            Err(err) => {
                error!(
                    path = %snapshot.path().display(),
                    error = %err,
                    "failed to read user snapshot; starting empty"
                );
                Vec::new()
            }
        };

        let store = Self::with_users(snapshot, users);
        if let Err(err) = store.persist().await {
            error!(error = %err, "failed to write initial user snapshot");
        }
        Ok(store)
    }

    /// Build a store over `users` without touching the filesystem.
    #[must_use]
    pub fn with_users(snapshot: UserSnapshotFile, users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            snapshot,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<User>>, UserStoreError> {
        self.users
            .lock()
            .map_err(|err| UserStoreError::unavailable(err.to_string()))
    }

    fn write_snapshot(&self, users: &[User]) -> Result<(), UserStoreError> {
        let json = serde_json::to_string_pretty(users)
            .map_err(|err| UserStoreError::persistence(err.to_string()))?;
        self.snapshot
            .write(&json)
            .map_err(|err| UserStoreError::persistence(err.to_string()))
    }

    fn persist_or_log(&self, users: &[User]) {
        if let Err(err) = self.write_snapshot(users) {
            error!(
                path = %self.snapshot.path().display(),
                error = %err,
                "failed to persist users; keeping in-memory state"
            );
        }
    }
}

fn decode_snapshot(snapshot: &UserSnapshotFile, contents: &str) -> Vec<User> {
    match serde_json::from_str::<Vec<User>>(contents) {
        Ok(users) => {
            info!(
                path = %snapshot.path().display(),
                user_count = users.len(),
                "loaded user snapshot"
            );
            users
        }
        Err(err) => {
            error!(
                path = %snapshot.path().display(),
                error = %err,
                "failed to decode user snapshot; starting empty"
            );
            Vec::new()
        }
    }
}

async fn fetch_seed(seed: &dyn UserSeedSource) -> Vec<User> {
    match seed.fetch_users().await {
        Ok(users) => {
            info!(user_count = users.len(), "seed users fetched");
            users
        }
        Err(err) => {
            warn!(error = %err, "failed to fetch seed users; starting empty");
            Vec::new()
        }
    }
}

#[async_trait]
impl UserStore for JsonFileUserStore {
    async fn list(&self) -> Result<Vec<User>, UserStoreError> {
        Ok(self.lock()?.clone())
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, UserStoreError> {
        let users = self.lock()?;
        Ok(users.iter().find(|user| user.id() == id).cloned())
    }

    async fn add(&self, profile: UserProfile) -> Result<User, UserStoreError> {
        let mut users = self.lock()?;
        let user = User::new(next_id(&users)?, profile);
        users.push(user.clone());
        self.persist_or_log(&users);
        Ok(user)
    }

    async fn update(
        &self,
        id: UserId,
        profile: UserProfile,
    ) -> Result<Option<User>, UserStoreError> {
        let mut users = self.lock()?;
        let Some(existing) = users.iter_mut().find(|user| user.id() == id) else {
            return Ok(None);
        };
        existing.replace_profile(profile);
        let updated = existing.clone();
        self.persist_or_log(&users);
        Ok(Some(updated))
    }

    async fn delete(&self, id: UserId) -> Result<Option<User>, UserStoreError> {
        let mut users = self.lock()?;
        let Some(index) = users.iter().position(|user| user.id() == id) else {
            return Ok(None);
        };
        let removed = users.remove(index);
        self.persist_or_log(&users);
        Ok(Some(removed))
    }

    async fn persist(&self) -> Result<(), UserStoreError> {
        let users = self.lock()?;
        self.write_snapshot(&users)
    }
}

#[cfg(test)]
mod tests;
