//! Host portal outbound adapters.
//!
//! One HTTP client implements every port backed by the host's action API:
//! dataset search, user listing, the administrator check and the core user
//! actions.

mod client;
mod dto;

pub use client::CkanActionClient;
