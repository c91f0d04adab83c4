//! Domain layer: documents, the error dictionary, and the services the
//! HTTP adapter drives.
//!
//! Nothing here knows about Actix. Failures are expressed as [`Error`]
//! values bound to an [`ErrorKind`]; inbound adapters turn them into
//! responses.

pub mod adoptions_service;
pub mod error;
pub mod error_kind;
pub mod failure;
pub mod mocking_service;
pub mod object_id;
pub mod password;
pub mod pet;
pub mod pets_service;
pub mod ports;
pub mod sessions_service;
pub mod trace_id;
pub mod user;
pub mod users_service;
pub mod validation;

pub use self::adoptions_service::AdoptionsService;
pub use self::error::{
    Error, ErrorBody, ErrorEnvelope, LogPayload, UNCLASSIFIED_CODE, UNCLASSIFIED_MESSAGE,
    UNKNOWN_ERROR_MESSAGE,
};
pub use self::error_kind::{ErrorEntry, ErrorKind, UnknownErrorKind};
pub use self::failure::{Failure, UnclassifiedFailure};
pub use self::mocking_service::{GeneratedCounts, MockingService};
pub use self::object_id::{AdoptionId, ObjectId, ObjectIdError, PetId, UserId};
pub use self::password::PasswordHash;
pub use self::pet::{Adoption, NewPet, Pet, PetClaim, PetUpdate};
pub use self::pets_service::PetsService;
pub use self::sessions_service::{Registration, SessionsService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Role, User, UserUpdate};
pub use self::users_service::UsersService;
pub use self::validation::{EmailAddress, RequiredFields};
