//! Service entry-point: loads settings, wires the host adapters and serves
//! the action API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use portal::config::PortalSettings;
use portal::inbound::http::health::HealthState;
use server::{ServerConfig, build_ports, create_server};

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

    let mut settings = PortalSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let ports = build_ports(&mut settings)?;
    let config =
        ServerConfig::new(bind_addr, ports).with_notice_settings(settings.notice_settings());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "portal extension listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}
