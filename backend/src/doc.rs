//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the users and health endpoints together with the
//! record and error schemas. The document backs Swagger UI in debug builds
//! and is exported by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::domain::{Address, Company, Error, ErrorCode, Geo, User, UserProfile};
use crate::inbound::http::users::MessageResponse;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        description = "CRUD over user records persisted to a local JSON snapshot."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        UserProfile,
        Address,
        Geo,
        Company,
        MessageResponse,
        Error,
        ErrorCode
    )),
    tags(
        (name = "users", description = "User record management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
