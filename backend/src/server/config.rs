//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use portal::domain::NoticeSettings;
use portal::inbound::http::state::HttpStatePorts;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) ports: HttpStatePorts,
    pub(crate) notice_settings: NoticeSettings,
}

impl ServerConfig {
    /// Construct a server configuration serving `ports` on `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, ports: HttpStatePorts) -> Self {
        Self {
            bind_addr,
            ports,
            notice_settings: NoticeSettings::default(),
        }
    }

    /// Override the password notice settings.
    #[must_use]
    pub fn with_notice_settings(mut self, settings: NoticeSettings) -> Self {
        self.notice_settings = settings;
        self
    }
}
