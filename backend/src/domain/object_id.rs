//! Document identifiers.
//!
//! Every stored document is keyed by a 12-byte object id rendered as 24
//! lowercase hex characters: a big-endian seconds timestamp followed by
//! eight random bytes. Typed wrappers keep user, pet, and adoption ids from
//! being mixed up.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use uuid::Uuid;

use super::Error;

/// Raw 12-byte document identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

/// Validation errors for textual object ids.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObjectIdError {
    /// The value is not 24 characters long.
    #[error("object id must be 24 hex characters, got {0}")]
    Length(usize),
    /// The value contains non-hex characters.
    #[error("object id must be hexadecimal")]
    NotHex,
}

impl ObjectId {
    /// Generate a new id stamped with the current time.
    #[must_use]
    pub fn generate() -> Self {
        let seconds = u32::try_from(Utc::now().timestamp()).unwrap_or(u32::MAX);
        let random = Uuid::new_v4();
        let mut bytes = [0_u8; 12];
        let (stamp, tail) = bytes.split_at_mut(4);
        stamp.copy_from_slice(&seconds.to_be_bytes());
        for (slot, byte) in tail.iter_mut().zip(random.as_bytes()) {
            *slot = *byte;
        }
        Self(bytes)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 24 {
            return Err(ObjectIdError::Length(s.len()));
        }
        if s.bytes().any(|b| b.is_ascii_uppercase()) {
            return Err(ObjectIdError::NotHex);
        }
        let mut bytes = [0_u8; 12];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| ObjectIdError::NotHex)?;
        Ok(Self(bytes))
    }
}

macro_rules! document_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(ObjectId);

        impl $name {
            /// Allocate a fresh identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(ObjectId::generate())
            }

            /// Parse a path or session value, reporting `INVALID_RESOURCE_ID`.
            ///
            /// # Errors
            /// Returns an [`Error`] when `raw` is not a valid object id.
            pub fn parse(raw: &str) -> Result<Self, Error> {
                raw.parse().map_err(|_| Error::invalid_id(raw))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ObjectIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

document_id! {
    /// Identifier of a user document.
    UserId
}

document_id! {
    /// Identifier of a pet document.
    PetId
}

document_id! {
    /// Identifier of an adoption document.
    AdoptionId
}
