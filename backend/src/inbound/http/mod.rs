//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod campaigns;
pub mod contacts;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
