//! Password policy extension for the Open Data DK portal.
//!
//! The crate validates user passwords on the portal's create and update
//! actions, lets administrators mail every user a notice about the policy,
//! and serves the front-page dataset helpers. Domain logic lives in
//! [`domain`]; [`inbound`] and [`outbound`] hold the HTTP edge and the
//! adapters for the host portal and mail relay.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use inbound::http::trace::{Trace, TraceId};
