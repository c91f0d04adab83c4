//! User administration service backing `/api/users`.

use std::sync::Arc;

use serde_json::json;

use crate::domain::ports::UserRepository;
use crate::domain::validation::{EmailAddress, bounded_text};
use crate::domain::{Error, ErrorKind, Role, User, UserId, UserUpdate};

/// `RESOURCE_NOT_FOUND` for a user id.
pub(crate) fn user_not_found(id: &UserId) -> Error {
    Error::not_found(json!({ "resource": "user", "id": id.to_string() }))
}

/// Reads and edits user documents.
#[derive(Clone)]
pub struct UsersService {
    users: Arc<dyn UserRepository>,
}

impl UsersService {
    /// Create the service over a user repository.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Every user.
    ///
    /// # Errors
    /// Repository failures, mapped to dictionary kinds.
    pub async fn list(&self) -> Result<Vec<User>, Error> {
        Ok(self.users.list().await?)
    }

    /// One user by id.
    ///
    /// # Errors
    /// `RESOURCE_NOT_FOUND` when absent, or a repository failure.
    pub async fn get(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| user_not_found(id))
    }

    /// Apply a partial update.
    ///
    /// # Errors
    /// `VALIDATION_ERROR` for an empty update, field validation errors,
    /// `RESOURCE_ALREADY_EXISTS` when the new email belongs to someone else,
    /// and `RESOURCE_NOT_FOUND` when the user is absent.
    pub async fn update(&self, id: &UserId, update: UserUpdate) -> Result<User, Error> {
        if update.is_empty() {
            return Err(Error::new(ErrorKind::ValidationError)
                .with_detail("no updatable fields supplied"));
        }
        let mut user = self.get(id).await?;
        if let Some(first_name) = update.first_name {
            user.first_name = bounded_text("first_name", &first_name)?;
        }
        if let Some(last_name) = update.last_name {
            user.last_name = bounded_text("last_name", &last_name)?;
        }
        if let Some(raw) = update.email {
            let email = EmailAddress::parse(&raw)?;
            if email != user.email {
                if let Some(owner) = self.users.find_by_email(&email).await? {
                    return Err(Error::new(ErrorKind::ResourceAlreadyExists)
                        .with_detail(json!({ "field": "email", "ownerId": owner.id.to_string() })));
                }
                user.email = email;
            }
        }
        if let Some(role) = update.role {
            user.role = role.parse::<Role>()?;
        }
        if !self.users.update(&user).await? {
            return Err(user_not_found(id));
        }
        Ok(user)
    }

    /// Delete a user.
    ///
    /// # Errors
    /// `RESOURCE_NOT_FOUND` when absent, or a repository failure.
    pub async fn delete(&self, id: &UserId) -> Result<(), Error> {
        if self.users.delete(id).await? {
            Ok(())
        } else {
            Err(user_not_found(id))
        }
    }
}
