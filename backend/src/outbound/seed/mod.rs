//! Seed source adapters.
//!
//! This module provides a thin HTTP implementation of the `UserSeedSource`
//! port.

mod http_source;

pub use http_source::{DEFAULT_SEED_TIMEOUT, DEFAULT_SEED_URL, HttpUserSeedSource};
