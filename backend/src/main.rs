//! Users API entry-point: loads settings, initialises storage, serves HTTP.

mod server;

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use server::{AppSettings, build_http_state, create_server, mark_unhealthy_on};
use users_backend::inbound::http::health::HealthState;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppSettings::load_from_process()?.into_server_config()?;
    let health_state = web::Data::new(HealthState::new());
    let http_state = build_http_state(&config).await?;

    let server = create_server(health_state.clone(), http_state, &config)?;
    let handle = server.handle();
    actix_web::rt::spawn(async move {
        if mark_unhealthy_on(health_state, tokio::signal::ctrl_c()).await {
            handle.stop(true).await;
        }
    });

    server.await
}
