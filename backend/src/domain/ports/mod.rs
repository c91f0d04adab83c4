//! Domain ports: the traits driven adapters implement.
//!
//! Repositories expose typed [`RepositoryError`]s so adapters map their
//! failures into a fixed set of variants, which the domain then binds to
//! dictionary kinds.

mod macros;
pub(crate) use macros::define_port_error;

mod adoption_repository;
mod pet_repository;
mod repository_error;
mod user_repository;

#[cfg(test)]
pub use adoption_repository::MockAdoptionRepository;
pub use adoption_repository::AdoptionRepository;
#[cfg(test)]
pub use pet_repository::MockPetRepository;
pub use pet_repository::PetRepository;
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
