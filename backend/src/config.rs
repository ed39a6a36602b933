//! Portal extension settings loaded via OrthoConfig.
//!
//! Values come from `PORTAL_*` environment variables, command-line flags or
//! a configuration file. Unset values fall back to the defaults below.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;
use zeroize::Zeroizing;

use crate::domain::{DEFAULT_PASS_DATE, NoticeSettings};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_HOST_URL: &str = "http://localhost:5000/";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAIL_FROM: &str = "no-reply@opendata.dk";

/// Errors raised when settings hold unusable values.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The bind address is not a socket address.
    #[error("invalid bind address `{value}`: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// A URL setting does not parse.
    #[error("invalid {field} `{value}`: {source}")]
    Url {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Runtime settings of the portal extension service.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PORTAL")]
pub struct PortalSettings {
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// Base URL of the host portal's action API.
    pub host_url: Option<String>,
    /// API token presented to the host portal; moved out by
    /// [`PortalSettings::take_api_token`] at startup.
    pub api_token: Option<String>,
    /// Timeout applied to every outbound request, in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Deadline quoted in the password notice.
    pub pass_date: Option<String>,
    /// Mail relay endpoint; notices are only logged when unset.
    pub mail_relay_url: Option<String>,
    /// Sender address of outbound mail.
    pub mail_from: Option<String>,
}

impl PortalSettings {
    /// Socket address to bind, falling back to the default.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Base URL of the host action API, falling back to a local portal.
    pub fn host_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "host URL",
            self.host_url.as_deref().unwrap_or(DEFAULT_HOST_URL),
        )
    }

    /// Move the host API token into memory that is wiped on drop.
    ///
    /// The settings hold no copy afterwards. A blank token counts as unset.
    pub fn take_api_token(&mut self) -> Option<Zeroizing<String>> {
        let token = Zeroizing::new(self.api_token.take()?);
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.len() < token.len() {
            return Some(Zeroizing::new(trimmed.to_owned()));
        }
        Some(token)
    }

    /// Timeout applied to outbound requests.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Password notice settings.
    pub fn notice_settings(&self) -> NoticeSettings {
        NoticeSettings::new(self.pass_date.as_deref().unwrap_or(DEFAULT_PASS_DATE))
    }

    /// Mail relay endpoint, if configured.
    pub fn mail_relay_url(&self) -> Result<Option<Url>, SettingsError> {
        self.mail_relay_url
            .as_deref()
            .map(|value| parse_url("mail relay URL", value))
            .transpose()
    }

    /// Sender address of outbound mail.
    pub fn mail_from(&self) -> &str {
        self.mail_from.as_deref().unwrap_or(DEFAULT_MAIL_FROM)
    }
}

impl fmt::Debug for PortalSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalSettings")
            .field("bind_addr", &self.bind_addr)
            .field("host_url", &self.host_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("pass_date", &self.pass_date)
            .field("mail_relay_url", &self.mail_relay_url)
            .field("mail_from", &self.mail_from)
            .finish()
    }
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, SettingsError> {
    Url::parse(value).map_err(|source| SettingsError::Url {
        field,
        value: value.to_owned(),
        source,
    })
}
