//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: JSON snapshot file backing the user store.
//! - **seed**: reqwest client fetching the initial user set.
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no routing or validation logic.

pub mod persistence;
pub mod seed;
