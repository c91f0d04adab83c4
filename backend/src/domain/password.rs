//! Salted password digests.
//!
//! Stored form: `sha256$<salt hex>$<digest hex>` where the digest is
//! `SHA-256(salt || password)` and the salt is sixteen random bytes.

use std::fmt;

use sha2::{Digest, Sha256};
use uuid::Uuid;

const SCHEME: &str = "sha256";

/// A salted password digest. Never serialised to clients.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `plain` with a fresh random salt.
    #[must_use]
    pub fn create(plain: &str) -> Self {
        let salt = Uuid::new_v4();
        Self::with_salt(plain, salt.as_bytes())
    }

    fn with_salt(plain: &str, salt: &[u8]) -> Self {
        let digest = digest(salt, plain);
        Self(format!("{SCHEME}${}${}", hex::encode(salt), hex::encode(digest)))
    }

    /// Wrap a digest previously produced by [`PasswordHash::create`].
    #[must_use]
    pub fn from_stored(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    /// Check `plain` against the digest in constant time.
    #[must_use]
    pub fn verify(&self, plain: &str) -> bool {
        let mut parts = self.0.split('$');
        let (Some(SCHEME), Some(salt), Some(expected), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        let (Ok(salt), Ok(expected)) = (hex::decode(salt), hex::decode(expected)) else {
            return false;
        };
        let actual = digest(&salt, plain);
        actual.len() == expected.len()
            && actual
                .iter()
                .zip(&expected)
                .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }

    /// Stored representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn digest(salt: &[u8], plain: &str) -> Vec<u8> {
    Sha256::new()
        .chain_update(salt)
        .chain_update(plain.as_bytes())
        .finalize()
        .to_vec()
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}
