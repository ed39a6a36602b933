//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **ckan**: the host portal's action API (search, user listing,
//!   administrator check, core user actions)
//! - **mail**: relay-backed and log-only mailers
//!
//! Adapters are thin translators between domain types and wire
//! representations. They contain no business logic.

pub mod ckan;
pub mod mail;
