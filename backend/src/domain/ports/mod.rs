//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod user_seed_source;
mod user_store;

#[cfg(test)]
pub use user_seed_source::MockUserSeedSource;
pub use user_seed_source::{DisabledUserSeedSource, UserSeedSource, UserSeedSourceError};
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{UserStore, UserStoreError};
