//! Error types for the mock-data crate.
//!
//! Generation is infallible for well-formed requests; these errors cover
//! oversized batches and exhausted uniqueness retries.

use thiserror::Error;

/// Errors that can occur while generating mock records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The requested batch exceeds the generator's ceiling.
    #[error("requested {requested} records but at most {max} can be generated per batch")]
    BatchTooLarge {
        /// Number of records requested.
        requested: usize,
        /// Largest batch the generator accepts.
        max: usize,
    },

    /// No unused email address could be produced for a user.
    #[error("failed to generate a unique email address after {max_attempts} attempts")]
    EmailExhausted {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },
}
