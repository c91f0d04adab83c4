//! Registration and login backing `/api/sessions`.
//!
//! Session storage itself belongs to the HTTP adapter; this service only
//! validates credentials and keeps `last_connection` current.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::domain::password::PasswordHash;
use crate::domain::ports::UserRepository;
use crate::domain::users_service::user_not_found;
use crate::domain::validation::{EmailAddress, RequiredFields, bounded_text};
use crate::domain::{Error, ErrorKind, Role, User, UserId};

/// Registration input, before validation.
#[derive(Debug, Default)]
pub struct Registration {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Plain-text password.
    pub password: Option<String>,
}

/// Credential checks and connection bookkeeping.
#[derive(Clone)]
pub struct SessionsService {
    users: Arc<dyn UserRepository>,
}

impl SessionsService {
    /// Create the service over a user repository.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Register a new account with the default role.
    ///
    /// # Errors
    /// `MISSING_REQUIRED_FIELDS`, field validation errors, or
    /// `RESOURCE_ALREADY_EXISTS` when the email is taken.
    pub async fn register(&self, input: Registration) -> Result<User, Error> {
        let mut required = RequiredFields::default();
        let first_name = required.take("first_name", input.first_name);
        let last_name = required.take("last_name", input.last_name);
        let email = required.take("email", input.email);
        let password = required.take("password", input.password);
        required.finish()?;

        let email = EmailAddress::parse(&email)?;
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(Error::new(ErrorKind::ResourceAlreadyExists)
                .with_detail(json!({ "field": "email", "value": email.as_str() })));
        }
        let user = User::register(
            bounded_text("first_name", &first_name)?,
            bounded_text("last_name", &last_name)?,
            email,
            PasswordHash::create(&password),
            Role::User,
        );
        self.users.insert(&user).await?;
        Ok(user)
    }

    /// Check credentials and stamp `last_connection`.
    ///
    /// Unknown emails and wrong passwords are indistinguishable to callers.
    ///
    /// # Errors
    /// `MISSING_REQUIRED_FIELDS` or `AUTH_INVALID_CREDENTIALS`.
    pub async fn login(&self, email: Option<String>, password: Option<String>) -> Result<User, Error> {
        let mut required = RequiredFields::default();
        let email = required.take("email", email);
        let password = required.take("password", password);
        required.finish()?;

        let invalid = || Error::new(ErrorKind::AuthInvalidCredentials);
        let email = EmailAddress::parse(&email).map_err(|_| invalid())?;
        let mut user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(invalid)?;
        if !user.password.verify(&password) {
            return Err(invalid());
        }
        user.last_connection = Some(Utc::now());
        if !self.users.update(&user).await? {
            return Err(user_not_found(&user.id));
        }
        Ok(user)
    }

    /// The user a session refers to.
    ///
    /// # Errors
    /// `AUTH_TOKEN_INVALID` when the user no longer exists.
    pub async fn current(&self, id: &UserId) -> Result<User, Error> {
        self.users.find_by_id(id).await?.ok_or_else(|| {
            Error::new(ErrorKind::AuthTokenInvalid).with_detail("session refers to an unknown user")
        })
    }

    /// Stamp `last_connection` on logout. Users unknown at lookup are
    /// ignored.
    ///
    /// # Errors
    /// `RESOURCE_NOT_FOUND` when the user disappears before the stamp is
    /// stored; repository failures.
    pub async fn logout(&self, id: &UserId) -> Result<(), Error> {
        if let Some(mut user) = self.users.find_by_id(id).await? {
            user.last_connection = Some(Utc::now());
            if !self.users.update(&user).await? {
                return Err(user_not_found(id));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::MockUserRepository;

    fn stored_user(password: &str) -> User {
        User::register(
            "Ana".to_owned(),
            "Lopez".to_owned(),
            EmailAddress::parse("ana@example.com").expect("email"),
            PasswordHash::create(password),
            Role::User,
        )
    }

    fn registration() -> Registration {
        Registration {
            first_name: Some("Ana".to_owned()),
            last_name: Some("Lopez".to_owned()),
            email: Some("Ana@Example.com".to_owned()),
            password: Some("123456".to_owned()),
        }
    }

    #[tokio::test]
    async fn register_hashes_password_and_normalises_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().times(1).return_once(|_| Ok(None));
        repo.expect_insert().times(1).return_once(|_| Ok(()));

        let user = SessionsService::new(Arc::new(repo))
            .register(registration())
            .await
            .expect("registered");
        assert_eq!(user.email.as_str(), "ana@example.com");
        assert!(user.password.verify("123456"));
        assert_ne!(user.password.as_str(), "123456");
    }

    #[tokio::test]
    async fn register_rejects_taken_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(Some(stored_user("x"))));
        repo.expect_insert().never();

        let err = SessionsService::new(Arc::new(repo))
            .register(registration())
            .await
            .expect_err("taken");
        assert_eq!(err.kind(), ErrorKind::ResourceAlreadyExists);
        assert_eq!(err.http_status(), 409);
    }

    #[tokio::test]
    async fn register_lists_missing_fields() {
        let err = SessionsService::new(Arc::new(MockUserRepository::new()))
            .register(Registration {
                email: Some("ana@example.com".to_owned()),
                ..Registration::default()
            })
            .await
            .expect_err("incomplete");
        assert_eq!(
            err.details(),
            &[
                Value::from("first_name"),
                Value::from("last_name"),
                Value::from("password")
            ]
        );
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(Some(stored_user("right"))));
        repo.expect_update().never();

        let err = SessionsService::new(Arc::new(repo))
            .login(Some("ana@example.com".to_owned()), Some("wrong".to_owned()))
            .await
            .expect_err("wrong password");
        assert_eq!(err.kind(), ErrorKind::AuthInvalidCredentials);
    }

    #[tokio::test]
    async fn login_rejects_unknown_email_the_same_way() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().times(1).return_once(|_| Ok(None));

        let err = SessionsService::new(Arc::new(repo))
            .login(Some("ghost@example.com".to_owned()), Some("pw".to_owned()))
            .await
            .expect_err("unknown email");
        assert_eq!(err.kind(), ErrorKind::AuthInvalidCredentials);
    }

    #[tokio::test]
    async fn login_stamps_last_connection() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(Some(stored_user("right"))));
        repo.expect_update()
            .withf(|user| user.last_connection.is_some())
            .times(1)
            .return_once(|_| Ok(true));

        let user = SessionsService::new(Arc::new(repo))
            .login(Some("ana@example.com".to_owned()), Some("right".to_owned()))
            .await
            .expect("logged in");
        assert!(user.last_connection.is_some());
    }

    #[tokio::test]
    async fn login_fails_when_the_user_vanishes_before_the_stamp() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(Some(stored_user("right"))));
        repo.expect_update().times(1).return_once(|_| Ok(false));

        let err = SessionsService::new(Arc::new(repo))
            .login(Some("ana@example.com".to_owned()), Some("right".to_owned()))
            .await
            .expect_err("user vanished");
        assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
        assert_eq!(err.details()[0]["resource"], "user");
    }

    #[tokio::test]
    async fn logout_fails_when_the_user_vanishes_before_the_stamp() {
        let stored = stored_user("right");
        let id = stored.id;
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(stored)));
        repo.expect_update().times(1).return_once(|_| Ok(false));

        let err = SessionsService::new(Arc::new(repo))
            .logout(&id)
            .await
            .expect_err("user vanished");
        assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
    }

    #[tokio::test]
    async fn logout_ignores_users_unknown_at_lookup() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
        repo.expect_update().never();

        SessionsService::new(Arc::new(repo))
            .logout(&UserId::generate())
            .await
            .expect("ignored");
    }
}
