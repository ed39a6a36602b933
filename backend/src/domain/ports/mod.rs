//! Domain ports for the host portal services the extension calls into.
//!
//! Each trait exposes a strongly typed error so adapters map their failures
//! into predictable variants; services translate those into the domain
//! [`Error`](crate::domain::Error).

mod authorizer;
mod host_user_actions;
mod mailer;
mod package_search;
mod user_directory;

#[cfg(test)]
pub use authorizer::MockAuthorizer;
pub use authorizer::{Authorizer, AuthorizerError, StaticAuthorizer};
#[cfg(test)]
pub use host_user_actions::MockHostUserActions;
pub use host_user_actions::{FixtureHostUserActions, HostUserActions, HostUserActionsError};
#[cfg(test)]
pub use mailer::MockMailer;
pub use mailer::{MailMessage, Mailer, MailerError};
#[cfg(test)]
pub use package_search::MockPackageSearch;
pub use package_search::{
    FixturePackageSearch, PackageSearch, PackageSearchError, PackageSearchQuery,
    PackageSearchResult,
};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{
    FixtureUserDirectory, UserDirectory, UserDirectoryError, UserListParams, UserSummary,
};
