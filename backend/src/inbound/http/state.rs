//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{Authorizer, HostUserActions, Mailer, PackageSearch, UserDirectory};
use crate::domain::{DatasetHelpers, NoticeSettings, PasswordNoticeService, UserActionService};

/// User action service as held by the HTTP state.
pub type SharedUserActions = UserActionService<dyn HostUserActions>;
/// Password notice service as held by the HTTP state.
pub type SharedPasswordNotices = PasswordNoticeService<dyn Authorizer, dyn UserDirectory, dyn Mailer>;
/// Dataset helpers as held by the HTTP state.
pub type SharedDatasetHelpers = DatasetHelpers<dyn PackageSearch>;

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub host_users: Arc<dyn HostUserActions>,
    pub authorizer: Arc<dyn Authorizer>,
    pub directory: Arc<dyn UserDirectory>,
    pub mailer: Arc<dyn Mailer>,
    pub search: Arc<dyn PackageSearch>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub user_actions: SharedUserActions,
    pub notices: SharedPasswordNotices,
    pub datasets: SharedDatasetHelpers,
}

impl HttpState {
    /// Build the action services from `ports`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use portal::domain::NoticeSettings;
    /// use portal::domain::ports::{
    ///     FixtureHostUserActions, FixturePackageSearch, FixtureUserDirectory, StaticAuthorizer,
    /// };
    /// use portal::inbound::http::state::{HttpState, HttpStatePorts};
    /// use portal::outbound::mail::LoggingMailer;
    ///
    /// let ports = HttpStatePorts {
    ///     host_users: Arc::new(FixtureHostUserActions),
    ///     authorizer: Arc::new(StaticAuthorizer::new(["admin"])),
    ///     directory: Arc::new(FixtureUserDirectory),
    ///     mailer: Arc::new(LoggingMailer::default()),
    ///     search: Arc::new(FixturePackageSearch),
    /// };
    /// let state = HttpState::new(ports, NoticeSettings::default());
    /// assert_eq!(state.notices.settings().pass_date, "24th June 2020");
    /// ```
    pub fn new(ports: HttpStatePorts, notice_settings: NoticeSettings) -> Self {
        let HttpStatePorts {
            host_users,
            authorizer,
            directory,
            mailer,
            search,
        } = ports;
        Self {
            user_actions: UserActionService::new(host_users),
            notices: PasswordNoticeService::new(authorizer, directory, mailer, notice_settings),
            datasets: DatasetHelpers::new(search),
        }
    }
}
