//! HTTP inbound adapter exposing REST endpoints.

pub mod adoptions;
pub mod diagnostics;
pub mod envelope;
pub mod error;
pub mod mocks;
pub mod pets;
pub mod pipeline;
pub mod routes;
pub mod schemas;
pub mod session;
pub mod sessions;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
