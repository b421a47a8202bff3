//! Extractor configuration returning the JSON error envelope.
//!
//! Actix answers malformed paths and bodies with plain-text errors by default;
//! these configs route them through [`Error`] so every failure shares one
//! response shape.

use actix_web::web;
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// JSON body config rejecting malformed payloads with a 400 envelope.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected JSON payload");
        Error::invalid_request("Invalid JSON payload")
            .with_details(json!({ "reason": err.to_string() }))
            .into()
    })
}

/// Path config rejecting non-numeric identifiers with a 400 envelope.
#[must_use]
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected path parameters");
        Error::invalid_request("Invalid user id")
            .with_details(json!({ "reason": err.to_string() }))
            .into()
    })
}
