//! Users API handlers.
//!
//! ```text
//! GET    /api/users
//! GET    /api/users/{id}
//! POST   /api/users       {"name":"Ann"}
//! PUT    /api/users/{id}  {"name":"Annie","email":"ann@example.test"}
//! DELETE /api/users/{id}
//! ```

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, User, UserId, UserProfile, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

const USER_NOT_FOUND: &str = "User not found";

/// Confirmation payload for successful mutations without a record body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "User updated successfully")]
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn validate_profile(profile: &UserProfile) -> Result<(), Error> {
    profile.validate().map_err(|err| match err {
        UserValidationError::BlankName => Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "name", "code": "blank_name" })),
    })
}

/// Map a numeric path segment onto a storable id.
///
/// Values outside the `u32` range can never have been issued, so they are
/// reported as missing rather than malformed.
fn stored_id(raw: i64) -> Result<UserId, Error> {
    u32::try_from(raw)
        .map(UserId::new)
        .map_err(|_| Error::not_found(USER_NOT_FOUND))
}

/// List every stored user.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use users_backend::inbound::http::users::list_users;
///
/// let app = App::new().service(web::scope("/api").service(list_users));
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = [User]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list().await?;
    Ok(web::Json(users))
}

/// Fetch one user by identifier.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}", name = "get_user")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<User>> {
    let id = stored_id(path.into_inner())?;
    state
        .users
        .get(id)
        .await?
        .map(web::Json)
        .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
}

/// Create a user; the identifier is assigned by storage.
///
/// Responds with `201 Created` and a `Location` header pointing at the new
/// record. Any `id` in the body is ignored.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserProfile,
    responses(
        (status = 201, description = "User created", body = User,
            headers(("Location" = String, description = "URL of the created user"))),
        (status = 400, description = "Name is required", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    req: HttpRequest,
    state: web::Data<HttpState>,
    payload: web::Json<UserProfile>,
) -> ApiResult<HttpResponse> {
    let profile = payload.into_inner();
    validate_profile(&profile)?;

    let user = state.users.add(profile).await?;
    let location = req
        .url_for("get_user", [user.id().to_string()])
        .map_err(|err| Error::internal(format!("failed to build user location: {err}")))?;
    info!(user_id = %user.id(), "user created");

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location.as_str()))
        .json(user))
}

/// Replace every field of a user except its identifier.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserProfile,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UserProfile>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = stored_id(path.into_inner())?;
    match state.users.update(id, payload.into_inner()).await? {
        Some(_) => {
            info!(user_id = %id, "user updated");
            Ok(web::Json(MessageResponse::new("User updated successfully")))
        }
        None => Err(Error::not_found(USER_NOT_FOUND)),
    }
}

/// Remove a user.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = stored_id(path.into_inner())?;
    match state.users.delete(id).await? {
        Some(_) => {
            info!(user_id = %id, "user deleted");
            Ok(web::Json(MessageResponse::new("User deleted successfully")))
        }
        None => Err(Error::not_found(USER_NOT_FOUND)),
    }
}

/// Register the users endpoints and their extractor configs on a scope.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use users_backend::inbound::http::users::configure;
///
/// let app = App::new().service(web::scope("/api").configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(crate::inbound::http::extractors::json_config())
        .app_data(crate::inbound::http::extractors::path_config())
        .service(list_users)
        .service(get_user)
        .service(create_user)
        .service(update_user)
        .service(delete_user);
}
