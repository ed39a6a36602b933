//! Builders wiring outbound adapters into the HTTP state ports.

use std::io;
use std::sync::Arc;

use tracing::{info, warn};

use portal::config::PortalSettings;
use portal::domain::ports::Mailer;
use portal::inbound::http::state::HttpStatePorts;
use portal::outbound::ckan::CkanActionClient;
use portal::outbound::mail::{HttpMailRelay, LoggingMailer};

/// Build every port from `settings`, taking the API token out of them.
///
/// The host action client backs search, user listing, the administrator
/// check and the core user actions. Mail goes to the relay when one is
/// configured and to the log otherwise.
///
/// # Errors
/// Returns [`io::Error`] when a setting is invalid or an HTTP client cannot
/// be constructed.
pub fn build_ports(settings: &mut PortalSettings) -> io::Result<HttpStatePorts> {
    let host_url = settings.host_url().map_err(io::Error::other)?;
    let timeout = settings.request_timeout();
    let api_token = settings.take_api_token();
    if api_token.is_none() {
        warn!(host = %host_url, "no host API token configured; calls run unauthenticated");
    }
    let host = Arc::new(
        CkanActionClient::new(host_url, timeout, api_token)
            .map_err(|e| io::Error::other(format!("host client: {e}")))?,
    );

    Ok(HttpStatePorts {
        host_users: host.clone(),
        authorizer: host.clone(),
        directory: host.clone(),
        mailer: build_mailer(settings)?,
        search: host,
    })
}

fn build_mailer(settings: &PortalSettings) -> io::Result<Arc<dyn Mailer>> {
    match settings.mail_relay_url().map_err(io::Error::other)? {
        Some(endpoint) => {
            info!(relay = %endpoint, "mail relay configured");
            let relay =
                HttpMailRelay::new(endpoint, settings.mail_from(), settings.request_timeout())
                    .map_err(|e| io::Error::other(format!("mail relay client: {e}")))?;
            Ok(Arc::new(relay))
        }
        None => {
            warn!("no mail relay configured; password notices will only be logged");
            Ok(Arc::new(LoggingMailer))
        }
    }
}
