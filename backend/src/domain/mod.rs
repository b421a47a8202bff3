//! Domain primitives and ports.
//!
//! Purpose: define the user record model, the transport-agnostic error
//! envelope, and the ports that storage and seed adapters implement.
//!
//! Public surface:
//! - `User`, `UserId`, `UserProfile` and nested `Address`, `Geo`, `Company`.
//! - `Error` and `ErrorCode`: error payload returned to clients.
//! - `TraceId`: request correlation identifier.
//! - `ports`: `UserStore` and `UserSeedSource`.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
pub use self::user::{
    Address, Company, Geo, User, UserId, UserProfile, UserValidationError,
};
