//! Server construction and middleware wiring.

mod config;

pub use config::{AppSettings, ServerConfig};

use std::future::Future;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use users_backend::Trace;
#[cfg(debug_assertions)]
use users_backend::doc::ApiDoc;
use users_backend::domain::ports::{DisabledUserSeedSource, UserSeedSource};
use users_backend::inbound::http::health::{HealthState, live, ready};
use users_backend::inbound::http::state::HttpState;
use users_backend::inbound::http::users;
use users_backend::outbound::persistence::JsonFileUserStore;
use users_backend::outbound::seed::HttpUserSeedSource;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Build the seed source selected by configuration.
///
/// # Errors
/// Returns [`std::io::Error`] when the HTTP client cannot be constructed.
fn build_seed_source(config: &ServerConfig) -> std::io::Result<Box<dyn UserSeedSource>> {
    match config.seed() {
        Some(seed) => {
            let source = HttpUserSeedSource::new(seed.endpoint.clone(), seed.timeout)
                .map_err(|err| std::io::Error::other(format!("seed client init failed: {err}")))?;
            Ok(Box::new(source))
        }
        None => {
            info!("remote seeding disabled");
            Ok(Box::new(DisabledUserSeedSource))
        }
    }
}

/// Load the user store, fetching seed users when no snapshot exists.
///
/// # Errors
/// Returns [`std::io::Error`] when the configured data path is unusable or the
/// seed client cannot be built.
pub async fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let seed = build_seed_source(config)?;
    let store = JsonFileUserStore::initialise(config.data_path(), seed.as_ref())
        .await
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;
    Ok(web::Data::new(HttpState::new(Arc::new(store))))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(web::scope("/api").configure(users::configure))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server over an initialised user store.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    config: &ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "users API listening");
    health_state.mark_ready();
    Ok(server)
}

/// Fail liveness once `signal` resolves, so probes report the drain.
///
/// Returns `true` when the signal fired and the state was marked unhealthy.
pub async fn mark_unhealthy_on<F>(health_state: web::Data<HealthState>, signal: F) -> bool
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            info!("shutdown requested; failing liveness while draining");
            health_state.mark_unhealthy();
            true
        }
        Err(err) => {
            warn!(error = %err, "failed to listen for shutdown signal");
            false
        }
    }
}
