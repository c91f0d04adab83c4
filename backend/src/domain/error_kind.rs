//! Dictionary of every error kind the service can report.
//!
//! Each kind binds a frozen numeric code, a client-facing message, the HTTP
//! status it maps to, and whether it is operational (an expected outcome of
//! bad input or state) or not (a fault in the service or its dependencies).
//! Codes are grouped by their leading digits: `401xx`/`403xx` for
//! authentication, `400xx`/`404xx`/`409xx` for resources and business rules,
//! `422xx` for validation, and `500xx` for system and configuration faults.
//!
//! Kinds are looked up by symbolic name only. New kinds are added as one row
//! in the table below.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Static metadata attached to an [`ErrorKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorEntry {
    code: u32,
    message: &'static str,
    http_status: u16,
    operational: bool,
}

impl ErrorEntry {
    /// Stable numeric code exposed to clients.
    #[must_use]
    pub const fn code(&self) -> u32 {
        self.code
    }

    /// Default client-facing message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.message
    }

    /// HTTP status code used when the kind reaches a client.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.http_status
    }

    /// Whether the kind describes an expected, client-caused outcome.
    #[must_use]
    pub const fn is_operational(&self) -> bool {
        self.operational
    }
}

/// Raised when a symbolic name does not match any dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error kind: {0}")]
pub struct UnknownErrorKind(pub String);

macro_rules! error_dictionary {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident = $name:literal {
                code: $code:literal,
                status: $status:literal,
                operational: $operational:literal,
                message: $message:literal $(,)?
            }
        ),+ $(,)?
    ) => {
        /// Symbolic name of a dictionary entry.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum ErrorKind {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl ErrorKind {
            /// Every kind, in dictionary order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Metadata for this kind.
            #[must_use]
            pub const fn entry(self) -> ErrorEntry {
                match self {
                    $(
                        Self::$variant => ErrorEntry {
                            code: $code,
                            message: $message,
                            http_status: $status,
                            operational: $operational,
                        },
                    )+
                }
            }

            /// Symbolic name, e.g. `RESOURCE_NOT_FOUND`.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl FromStr for ErrorKind {
            type Err = UnknownErrorKind;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)+
                    other => Err(UnknownErrorKind(other.to_owned())),
                }
            }
        }
    };
}

error_dictionary! {
    /// Credentials did not match a known account.
    AuthInvalidCredentials = "AUTH_INVALID_CREDENTIALS" {
        code: 40101, status: 401, operational: true,
        message: "Incorrect email or password",
    },
    /// The presented token has expired.
    AuthTokenExpired = "AUTH_TOKEN_EXPIRED" {
        code: 40102, status: 401, operational: true,
        message: "Token expired",
    },
    /// The presented token or session is missing, malformed or tampered.
    AuthTokenInvalid = "AUTH_TOKEN_INVALID" {
        code: 40103, status: 401, operational: true,
        message: "Invalid or tampered token",
    },
    /// The caller is authenticated but may not perform the action.
    AuthForbidden = "AUTH_FORBIDDEN" {
        code: 40301, status: 403, operational: true,
        message: "The user is not allowed to perform this action",
    },
    /// The caller's credentials lack a required scope.
    AuthScopeInsufficient = "AUTH_SCOPE_INSUFFICIENT" {
        code: 40302, status: 403, operational: true,
        message: "The token lacks the required scope",
    },
    /// The addressed resource does not exist.
    ResourceNotFound = "RESOURCE_NOT_FOUND" {
        code: 40401, status: 404, operational: true,
        message: "The requested resource does not exist",
    },
    /// A resource with the same identity already exists.
    ResourceAlreadyExists = "RESOURCE_ALREADY_EXISTS" {
        code: 40901, status: 409, operational: true,
        message: "Conflict: the resource already exists",
    },
    /// A resource identifier is malformed.
    InvalidResourceId = "INVALID_RESOURCE_ID" {
        code: 40001, status: 400, operational: true,
        message: "The resource id is not valid",
    },
    /// One or more required fields were not supplied.
    MissingRequiredFields = "MISSING_REQUIRED_FIELDS" {
        code: 40002, status: 400, operational: true,
        message: "Required fields are missing",
    },
    /// The payload does not match the expected schema.
    ValidationError = "VALIDATION_ERROR" {
        code: 42201, status: 422, operational: true,
        message: "The submitted data does not match the expected schema",
    },
    /// A field is shorter than allowed.
    FieldTooShort = "FIELD_TOO_SHORT" {
        code: 42202, status: 422, operational: true,
        message: "A field is too short",
    },
    /// A field is longer than allowed.
    FieldTooLong = "FIELD_TOO_LONG" {
        code: 42203, status: 422, operational: true,
        message: "A field is too long",
    },
    /// A field does not have the expected format.
    FieldInvalidFormat = "FIELD_INVALID_FORMAT" {
        code: 42204, status: 422, operational: true,
        message: "A field has an invalid format",
    },
    /// An uploaded file type is not accepted.
    UnsupportedFileType = "UNSUPPORTED_FILE_TYPE" {
        code: 42205, status: 422, operational: true,
        message: "File type not allowed",
    },
    /// A resource the operation depends on is missing.
    DependencyNotFound = "DEPENDENCY_NOT_FOUND" {
        code: 40010, status: 400, operational: true,
        message: "A dependent resource was not found",
    },
    /// The resource is referenced elsewhere and cannot be removed.
    CannotDeleteInUse = "CANNOT_DELETE_IN_USE" {
        code: 40011, status: 400, operational: true,
        message: "Cannot delete the resource because it is in use",
    },
    /// The relation being created is already recorded.
    RelationAlreadyExists = "RELATION_ALREADY_EXISTS" {
        code: 40012, status: 400, operational: true,
        message: "The relation is already registered",
    },
    /// The operation breaks a business rule.
    BusinessRuleViolation = "BUSINESS_RULE_VIOLATION" {
        code: 40910, status: 409, operational: true,
        message: "The operation violates a business rule",
    },
    /// The resource's current state does not allow the operation.
    InconsistentState = "INCONSISTENT_STATE" {
        code: 40020, status: 400, operational: true,
        message: "The current state of the resource does not allow this operation",
    },
    /// An unexpected fault inside the service.
    InternalServerError = "INTERNAL_SERVER_ERROR" {
        code: 50001, status: 500, operational: false,
        message: "Unhandled server error",
    },
    /// The document store failed.
    DatabaseError = "DATABASE_ERROR" {
        code: 50002, status: 500, operational: false,
        message: "Failed to access the database",
    },
    /// An external service failed.
    ThirdPartyError = "THIRD_PARTY_ERROR" {
        code: 50003, status: 500, operational: false,
        message: "External service failure",
    },
    /// An operation did not complete in time.
    Timeout = "TIMEOUT" {
        code: 50004, status: 504, operational: false,
        message: "Timeout exceeded",
    },
    /// A required environment variable is unset.
    MissingEnvVariable = "MISSING_ENV_VARIABLE" {
        code: 50010, status: 500, operational: false,
        message: "A required environment variable is missing",
    },
    /// Configuration values are present but invalid.
    InvalidConfig = "INVALID_CONFIG" {
        code: 50011, status: 500, operational: false,
        message: "Invalid configuration",
    },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
