//! Mail outbound adapters.
//!
//! [`HttpMailRelay`] posts each message to a relay endpoint; [`LoggingMailer`]
//! records messages in the log for deployments without a relay.

mod logging;
mod relay;

pub use logging::LoggingMailer;
pub use relay::HttpMailRelay;
