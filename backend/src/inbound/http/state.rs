//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AdoptionRepository, PetRepository, UserRepository};
use crate::domain::{AdoptionsService, MockingService, PetsService, SessionsService, UsersService};
use crate::logging::Logger;

/// Parameter object bundling the repositories the services run on.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn UserRepository>,
    pub pets: Arc<dyn PetRepository>,
    pub adoptions: Arc<dyn AdoptionRepository>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: UsersService,
    pub pets: PetsService,
    pub adoptions: AdoptionsService,
    pub sessions: SessionsService,
    pub mocks: MockingService,
    pub logger: Logger,
}

impl HttpState {
    /// Wire every service over the given repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use adoptme_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use adoptme_backend::logging::{Logger, Mode};
    /// use adoptme_backend::outbound::persistence::{
    ///     MemoryAdoptionRepository, MemoryPetRepository, MemoryUserRepository,
    /// };
    ///
    /// let ports = HttpStatePorts {
    ///     users: Arc::new(MemoryUserRepository::default()),
    ///     pets: Arc::new(MemoryPetRepository::default()),
    ///     adoptions: Arc::new(MemoryAdoptionRepository::default()),
    /// };
    /// let state = HttpState::new(ports, Logger::builder(Mode::Development).build());
    /// ```
    #[must_use]
    pub fn new(ports: HttpStatePorts, logger: Logger) -> Self {
        let HttpStatePorts {
            users,
            pets,
            adoptions,
        } = ports;
        Self {
            users: UsersService::new(users.clone()),
            pets: PetsService::new(pets.clone()),
            adoptions: AdoptionsService::new(users.clone(), pets.clone(), adoptions),
            sessions: SessionsService::new(users.clone()),
            mocks: MockingService::new(users, pets),
            logger,
        }
    }

    /// Replace the mock generator with a seeded one.
    #[must_use]
    pub fn with_mock_seed(mut self, seed: u64) -> Self {
        self.mocks = self.mocks.with_seed(seed);
        self
    }
}
