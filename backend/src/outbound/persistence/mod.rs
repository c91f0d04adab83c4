//! In-process document store.
//!
//! Each repository owns an insertion-ordered [`Collection`] guarded by a
//! `tokio::sync::RwLock`. Reads clone documents out; writes replace whole
//! documents by id, matching the CRUD-by-id contract of the ports.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use adoptme_backend::domain::ports::PetRepository;
//! use adoptme_backend::outbound::persistence::MemoryPetRepository;
//!
//! # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
//! let repo: Arc<dyn PetRepository> = Arc::new(MemoryPetRepository::default());
//! assert!(repo.list().await.expect("list").is_empty());
//! # });
//! ```

mod collection;
mod memory_adoption_repository;
mod memory_pet_repository;
mod memory_user_repository;

pub use collection::{Collection, Document};
pub use memory_adoption_repository::MemoryAdoptionRepository;
pub use memory_pet_repository::MemoryPetRepository;
pub use memory_user_repository::MemoryUserRepository;
