//! File persistence adapters.
//!
//! The user store keeps its records in memory and mirrors them to a single
//! JSON snapshot after each mutation. Filesystem access is capability scoped
//! through `cap_std`.

mod json_user_store;
mod snapshot_file;

pub use json_user_store::{JsonFileUserStore, UserStoreInitError};
pub use snapshot_file::{SnapshotPathError, UserSnapshotFile};
