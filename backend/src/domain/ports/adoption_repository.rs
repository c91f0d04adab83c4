//! Port for adoption document storage.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Adoption, AdoptionId};

/// Persistence operations on adoption documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdoptionRepository: Send + Sync {
    /// Every adoption, in insertion order.
    async fn list(&self) -> Result<Vec<Adoption>, RepositoryError>;

    /// Fetch an adoption by id.
    async fn find_by_id(&self, id: &AdoptionId) -> Result<Option<Adoption>, RepositoryError>;

    /// Store a new adoption.
    async fn insert(&self, adoption: &Adoption) -> Result<(), RepositoryError>;
}
