//! Registration, authentication and the current-session slot.
//!
//! Passwords are never stored as typed: they are hashed with Argon2id and a
//! random salt, and the PHC string is what lands in the `users` table.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::{debug, info};

use crate::error::{BlogError, Result};
use crate::storage::{BlogStore, User};

/// Maximum characters in a username. Enforced by the store.
pub const MAX_USERNAME_CHARS: usize = 50;

const SALT_LEN: usize = 16;

/// Proof that a user has authenticated.
///
/// Every operation that needs an identity takes a `&Session` instead of
/// reading ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: User,
}

impl Session {
    pub(crate) fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user_id(&self) -> i64 {
        self.user.id
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }
}

/// Holds at most one logged-in session.
#[derive(Debug, Default)]
pub struct SessionSlot {
    current: Option<Session>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Authenticate and, on success, replace the current session.
    ///
    /// On failure the slot is left empty.
    pub fn login<S>(&mut self, store: &S, username: &str, password: &str) -> Result<&Session>
    where
        S: BlogStore + ?Sized,
    {
        self.current = None;
        let session = authenticate(store, username, password)?;
        Ok(self.current.insert(session))
    }

    /// Clear the current session, if any.
    pub fn logout(&mut self) -> Option<Session> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}

/// Register a new user.
///
/// # Errors
///
/// Returns `BlogError::InvalidInput` for a blank username or password, and
/// `BlogError::DuplicateUsername` if the name is taken.
pub fn register<S>(store: &S, username: &str, password: &str) -> Result<User>
where
    S: BlogStore + ?Sized,
{
    let username = username.trim();
    if username.is_empty() {
        return Err(BlogError::InvalidInput("Username cannot be empty".to_string()));
    }
    if username.chars().count() > MAX_USERNAME_CHARS {
        return Err(BlogError::InvalidInput(format!(
            "Username too long (max {} characters)",
            MAX_USERNAME_CHARS
        )));
    }
    if password.is_empty() {
        return Err(BlogError::InvalidInput("Password cannot be empty".to_string()));
    }

    let password_hash = hash_password(password)?;
    let user = store.insert_user(username, &password_hash)?;
    info!(user_id = user.id, username = %user.username, "registered user");
    Ok(user)
}

/// Check a username and password against the store.
///
/// The username is trimmed the same way `register` trims it. Unknown users
/// and wrong passwords both yield `BlogError::AuthenticationFailed`.
pub fn authenticate<S>(store: &S, username: &str, password: &str) -> Result<Session>
where
    S: BlogStore + ?Sized,
{
    let username = username.trim();
    let credential = match store.find_credential(username)? {
        Some(credential) => credential,
        None => {
            debug!(username, "login for unknown user");
            return Err(BlogError::AuthenticationFailed);
        }
    };

    if !verify_password(password, &credential.password_hash)? {
        debug!(username, "login with wrong password");
        return Err(BlogError::AuthenticationFailed);
    }

    info!(user_id = credential.user.id, "user logged in");
    Ok(Session::new(credential.user))
}

/// Hash a password into a PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let mut salt_bytes = [0u8; SALT_LEN];
    getrandom::getrandom(&mut salt_bytes)
        .map_err(|e| BlogError::Credential(format!("Failed to generate salt: {}", e)))?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| BlogError::Credential(format!("Failed to encode salt: {}", e)))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| BlogError::Credential(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a stored PHC string.
///
/// A malformed stored hash is an error; a mismatch is `Ok(false)`.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| BlogError::Credential(format!("Stored password hash is invalid: {}", e)))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(BlogError::Credential(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStore;

    fn store() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store
    }

    #[test]
    fn test_hash_is_salted_and_verifiable() {
        let first = hash_password("hunter2").unwrap();
        let second = hash_password("hunter2").unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with("$argon2id$"));
        assert!(verify_password("hunter2", &first).unwrap());
        assert!(!verify_password("hunter3", &first).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(matches!(
            verify_password("x", "admin123"),
            Err(BlogError::Credential(_))
        ));
    }

    #[test]
    fn test_register_then_authenticate() {
        let store = store();
        let user = register(&store, "  alice ", "s3cret").unwrap();
        assert_eq!(user.username, "alice");

        let session = authenticate(&store, "alice", "s3cret").unwrap();
        assert_eq!(session.user_id(), user.id);
        assert_eq!(session.username(), "alice");
    }

    #[test]
    fn test_login_accepts_the_name_as_typed_at_registration() {
        let store = store();
        register(&store, " frank ", "pw").unwrap();
        let session = authenticate(&store, " frank ", "pw").unwrap();
        assert_eq!(session.username(), "frank");
        assert!(matches!(
            authenticate(&store, "Frank", "pw"),
            Err(BlogError::AuthenticationFailed)
        ));
    }

    #[test]
    fn test_register_duplicate_username() {
        let store = store();
        register(&store, "bob", "pw").unwrap();
        let err = register(&store, "bob", "other").unwrap_err();
        assert!(matches!(err, BlogError::DuplicateUsername(name) if name == "bob"));
    }

    #[test]
    fn test_register_rejects_blank_fields() {
        let store = store();
        assert!(matches!(
            register(&store, "   ", "pw"),
            Err(BlogError::InvalidInput(_))
        ));
        assert!(matches!(
            register(&store, "carol", ""),
            Err(BlogError::InvalidInput(_))
        ));
        let long_name = "x".repeat(MAX_USERNAME_CHARS + 1);
        assert!(matches!(
            register(&store, &long_name, "pw"),
            Err(BlogError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_authenticate_failures_are_indistinguishable() {
        let store = store();
        register(&store, "dave", "right").unwrap();
        let wrong_password = authenticate(&store, "dave", "wrong").unwrap_err();
        let unknown_user = authenticate(&store, "nobody", "right").unwrap_err();
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert!(matches!(wrong_password, BlogError::AuthenticationFailed));
    }

    #[test]
    fn test_default_admin_can_log_in() {
        let store = store();
        let session = authenticate(&store, "admin", "admin123").unwrap();
        assert_eq!(session.username(), "admin");
    }

    #[test]
    fn test_session_slot_login_logout() {
        let store = store();
        register(&store, "erin", "pw").unwrap();

        let mut slot = SessionSlot::new();
        assert!(!slot.is_authenticated());

        slot.login(&store, "erin", "pw").unwrap();
        assert_eq!(slot.current().map(Session::username), Some("erin"));

        let err = slot.login(&store, "erin", "bad").unwrap_err();
        assert!(matches!(err, BlogError::AuthenticationFailed));
        assert!(slot.current().is_none());

        slot.login(&store, "erin", "pw").unwrap();
        assert!(slot.logout().is_some());
        assert!(slot.logout().is_none());
        assert!(!slot.is_authenticated());
    }
}
