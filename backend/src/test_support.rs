//! Test utilities for integration tests.
//!
//! Compiled only with the `test-support` feature so the production binary
//! carries no test doubles.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tempfile::TempDir;

use crate::domain::User;
use crate::domain::ports::{UserSeedSource, UserSeedSourceError};

/// In-process seed source returning a fixed outcome and counting calls.
///
/// # Examples
/// ```
/// use users_backend::domain::ports::UserSeedSource;
/// use users_backend::test_support::StubUserSeedSource;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let stub = StubUserSeedSource::with_users(Vec::new());
/// assert!(stub.fetch_users().await.expect("stub succeeds").is_empty());
/// assert_eq!(stub.calls(), 1);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct StubUserSeedSource {
    outcome: Result<Vec<User>, UserSeedSourceError>,
    calls: Arc<AtomicUsize>,
}

impl StubUserSeedSource {
    /// Seed source yielding `users`.
    #[must_use]
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            outcome: Ok(users),
            calls: Arc::default(),
        }
    }

    /// Seed source failing with `error`.
    #[must_use]
    pub fn failing(error: UserSeedSourceError) -> Self {
        Self {
            outcome: Err(error),
            calls: Arc::default(),
        }
    }

    /// Number of `fetch_users` calls observed so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserSeedSource for StubUserSeedSource {
    async fn fetch_users(&self) -> Result<Vec<User>, UserSeedSourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// Temporary directory holding a `users.json` snapshot path.
///
/// The directory is removed when the value is dropped.
#[derive(Debug)]
pub struct TempSnapshot {
    dir: TempDir,
}

impl TempSnapshot {
    /// Create an empty temporary directory.
    ///
    /// # Errors
    /// Returns the I/O error raised while creating the directory.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// Snapshot path nested one directory deep, so the store must create it.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("Data").join("users.json")
    }

    /// Root of the temporary directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}
