/**
 * Authentication Service
 *
 * Orchestrates login and registration over the user store, the credential
 * hasher, and the token codec.
 *
 * # Login
 *
 * Lookup by username, bcrypt verification, token issuance. A missing user
 * and a wrong password fail identically with `InvalidCredentials`; the
 * caller cannot tell which occurred, so usernames cannot be enumerated
 * through the login endpoint.
 *
 * # Registration
 *
 * Username uniqueness check, password hash, persist. The plaintext password
 * is dropped as soon as the hash exists and is never logged.
 */

use std::sync::Arc;
use thiserror::Error;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::sessions::TokenCodec;
use crate::users::model::{NewUser, UserRecord};
use crate::users::store::{StoreError, UserStore};

/// Errors surfaced by authentication operations
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username or wrong password; deliberately undifferentiated
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Registration collided with an existing username or email
    #[error("user '{0}' already exists")]
    UserAlreadyExists(String),

    /// Credential hashing failed
    #[error("credential hashing failed: {0}")]
    Hashing(String),

    /// Token issuance failed
    #[error("failed to issue session token: {0}")]
    TokenIssue(String),

    /// Underlying store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Registration input, as accepted after boundary validation
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub age: i32,
    pub university: String,
    pub school: String,
    pub work: String,
}

/// Successful login: the signed token plus what callers need to use it
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub username: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    /// Token lifetime in milliseconds, for clients scheduling a re-login
    pub expires_in_ms: i64,
}

/// Login and registration over a user store and token codec
pub struct AuthService {
    store: Arc<dyn UserStore>,
    tokens: Arc<TokenCodec>,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, tokens: Arc<TokenCodec>) -> Self {
        Self { store, tokens }
    }

    /// Authenticate a username/password pair and issue a session token
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] when the username is unknown or the
    /// password does not verify; the two cases are indistinguishable to the
    /// caller by design.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let user = self.store.find_by_username(username).await?;

        let user = match user {
            Some(user) if verify_password(password, &user.password_hash) => user,
            _ => {
                tracing::warn!("failed login attempt for username: {}", username);
                return Err(AuthError::InvalidCredentials);
            }
        };

        let issued = self
            .tokens
            .issue(user.id, &user.username)
            .map_err(|e| AuthError::TokenIssue(e.to_string()))?;

        tracing::info!("user logged in: {} ({})", user.username, user.id);

        Ok(LoginOutcome {
            token: issued.token,
            username: user.username,
            expires_at: issued.expires_at,
            expires_in_ms: self.tokens.ttl().as_millis() as i64,
        })
    }

    /// Register a new user
    ///
    /// Checks username availability, hashes the password, and persists the
    /// record. The store's own uniqueness constraint backs the check, so a
    /// race between two registrations still resolves to one winner and one
    /// [`AuthError::UserAlreadyExists`].
    pub async fn register(&self, registration: NewRegistration) -> Result<UserRecord, AuthError> {
        if self
            .store
            .find_by_username(&registration.username)
            .await?
            .is_some()
        {
            tracing::warn!("registration for taken username: {}", registration.username);
            return Err(AuthError::UserAlreadyExists(registration.username));
        }

        let password_hash =
            hash_password(&registration.password).map_err(|e| AuthError::Hashing(e.to_string()))?;

        let username = registration.username.clone();
        let new_user = NewUser {
            name: registration.name,
            username: registration.username,
            email: registration.email,
            password_hash,
            age: registration.age,
            university: registration.university,
            school: registration.school,
            work: registration.work,
        };

        let created = self.store.create(new_user).await.map_err(|e| match e {
            StoreError::Conflict => AuthError::UserAlreadyExists(username.clone()),
            other => AuthError::Store(other),
        })?;

        tracing::info!("registered user: {} ({})", created.username, created.id);
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::memory::InMemoryUserStore;
    use std::time::Duration;

    fn service() -> AuthService {
        let store = Arc::new(InMemoryUserStore::new());
        let tokens = Arc::new(TokenCodec::new("test-secret", Duration::from_secs(3600)));
        AuthService::new(store, tokens)
    }

    fn registration(username: &str) -> NewRegistration {
        NewRegistration {
            name: "Alice Example".to_string(),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: "Secr3t!pass".to_string(),
            age: 24,
            university: "Colombo".to_string(),
            school: "Engineering".to_string(),
            work: "".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let auth = service();

        let created = auth.register(registration("alice")).await.unwrap();
        assert!(!created.id.is_nil());
        assert_ne!(created.password_hash, "Secr3t!pass");

        let outcome = auth.login("alice", "Secr3t!pass").await.unwrap();
        assert!(!outcome.token.is_empty());
        assert_eq!(outcome.username, "alice");
        assert_eq!(outcome.expires_in_ms, 3600 * 1000);
    }

    #[tokio::test]
    async fn test_login_token_claims_match_subject() {
        let store: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
        let tokens = Arc::new(TokenCodec::new("test-secret", Duration::from_secs(3600)));
        let auth = AuthService::new(store, tokens.clone());

        let created = auth.register(registration("alice")).await.unwrap();
        let outcome = auth.login("alice", "Secr3t!pass").await.unwrap();

        let claims = tokens.verify(&outcome.token).unwrap();
        assert_eq!(claims.sub, created.id.to_string());
        assert_eq!(claims.username, "alice");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_fail_alike() {
        let auth = service();
        auth.register(registration("alice")).await.unwrap();

        let wrong_password = auth.login("alice", "wrong").await;
        let unknown_user = auth.login("nobody", "Secr3t!pass").await;

        assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));
        assert!(matches!(unknown_user, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_duplicate_registration_rejected() {
        let auth = service();
        let first = auth.register(registration("alice")).await.unwrap();

        let second = auth.register(registration("alice")).await;
        assert!(matches!(second, Err(AuthError::UserAlreadyExists(_))));

        // The first registration is untouched.
        let outcome = auth.login("alice", "Secr3t!pass").await.unwrap();
        assert_eq!(outcome.username, first.username);
    }
}
