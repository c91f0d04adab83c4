//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing, request logging, and routing failures through the error pipeline.

pub mod error_boundary;
pub mod request_log;
pub mod trace;

pub use error_boundary::{ErrorBoundary, response_latch};
pub use request_log::RequestLog;
pub use trace::Trace;
