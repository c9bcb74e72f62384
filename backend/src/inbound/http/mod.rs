//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod envelope;
pub mod error;
pub mod health;
pub mod schemas;
pub mod spdx;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod usage_logs;

pub use error::ApiResult;
