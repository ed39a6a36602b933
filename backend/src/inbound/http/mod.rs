//! HTTP inbound adapter exposing the action and helper endpoints.

pub mod actions;
pub mod error;
pub mod health;
pub mod helpers;
pub mod identity;
pub mod state;
pub mod trace;

pub use error::ApiResult;
