//! HTTP inbound adapter exposing the public site and the admin API.

pub mod admin;
pub mod cache_control;
pub mod error;
pub mod health;
pub mod public;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::ApiResult;
