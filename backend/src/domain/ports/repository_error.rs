//! Errors shared by every document repository.

use serde_json::json;

use super::define_port_error;
use crate::domain::{Error, ErrorKind};

define_port_error! {
    /// Failures raised by document repository adapters.
    pub enum RepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "document store connection failed: {message}",
        /// A query or mutation failed while executing.
        Query { message: String } => "document store query failed: {message}",
        /// An operation did not finish in time.
        Timeout { operation: String } => "document store timed out during {operation}",
        /// A unique key is already taken.
        Duplicate { key: String } => "duplicate document key: {key}",
    }
}

impl From<RepositoryError> for Error {
    fn from(error: RepositoryError) -> Self {
        tracing::debug!(variant = error.variant(), %error, "repository failure mapped to domain error");
        match error {
            RepositoryError::Connection { message } | RepositoryError::Query { message } => {
                Self::new(ErrorKind::DatabaseError).with_detail(message)
            }
            RepositoryError::Timeout { operation } => {
                Self::new(ErrorKind::Timeout).with_detail(json!({ "operation": operation }))
            }
            RepositoryError::Duplicate { key } => {
                Self::new(ErrorKind::ResourceAlreadyExists).with_detail(json!({ "key": key }))
            }
        }
    }
}
