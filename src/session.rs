//! Session
//!
//! Explicit credentials for the remote API and their persisted form. Requests
//! only carry a bearer token or API key when one was supplied here.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::storage::{DocumentStorage, StorageError};

/// Storage key of the access token document.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Storage key of the signed-in user document.
pub const USER_DATA_KEY: &str = "userData";

/// Errors reading or writing the session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The storage backend failed.
    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),

    /// The user document could not be encoded.
    #[error("failed to encode user data: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A secret string that is wiped from memory on drop and never printed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    /// Wrap a secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the secret value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(**redacted**)")
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Credentials attached to API requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    access_token: Option<Secret>,
    api_key: Option<Secret>,
}

impl Credentials {
    /// No credentials.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Attach a bearer token. Empty tokens are ignored.
    #[must_use]
    pub fn with_access_token(mut self, token: Secret) -> Self {
        self.access_token = (!token.is_empty()).then_some(token);
        self
    }

    /// Attach an API key. Empty keys are ignored.
    #[must_use]
    pub fn with_api_key(mut self, key: Secret) -> Self {
        self.api_key = (!key.is_empty()).then_some(key);
        self
    }

    /// Bearer token, if any.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_ref().map(Secret::expose)
    }

    /// API key, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(Secret::expose)
    }
}

/// Profile of the signed-in user as returned by the login endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    /// User name
    #[serde(default)]
    pub name: String,

    /// Email address
    #[serde(default)]
    pub email: String,

    /// Access token issued at login
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<Secret>,

    /// Remaining profile fields, kept as received
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Persisted session over a document store.
#[derive(Debug, Clone)]
pub struct SessionStore<S: DocumentStorage> {
    storage: S,
}

impl<S: DocumentStorage> SessionStore<S> {
    /// Session kept in `storage`.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Persist the access token.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the token cannot be stored.
    pub fn save_token(&self, token: &Secret) -> Result<(), SessionError> {
        self.storage.set(ACCESS_TOKEN_KEY, token.expose())?;

        Ok(())
    }

    /// The stored access token, if any.
    pub fn token(&self) -> Option<Secret> {
        match self.storage.get(ACCESS_TOKEN_KEY) {
            Ok(token) => token.map(Secret::new).filter(|token| !token.is_empty()),
            Err(error) => {
                warn!(%error, "failed to read access token");
                None
            }
        }
    }

    /// Forget the access token.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the token cannot be removed.
    pub fn remove_token(&self) -> Result<(), SessionError> {
        self.storage.remove(ACCESS_TOKEN_KEY)?;

        Ok(())
    }

    /// Whether an access token is stored.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Persist the user profile.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the profile cannot be encoded or stored.
    pub fn save_user(&self, user: &UserData) -> Result<(), SessionError> {
        let document = serde_json::to_string(user)?;

        self.storage.set(USER_DATA_KEY, &document)?;

        Ok(())
    }

    /// The stored user profile. Unreadable documents read as signed out.
    pub fn user(&self) -> Option<UserData> {
        let document = match self.storage.get(USER_DATA_KEY) {
            Ok(document) => document?,
            Err(error) => {
                warn!(%error, "failed to read user data");
                return None;
            }
        };

        serde_json::from_str(&document)
            .inspect_err(|error| warn!(%error, "ignoring malformed user data"))
            .ok()
    }

    /// Forget the user profile.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the profile cannot be removed.
    pub fn remove_user(&self) -> Result<(), SessionError> {
        self.storage.remove(USER_DATA_KEY)?;

        Ok(())
    }

    /// Store a freshly signed-in user and their token.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if either document cannot be stored.
    pub fn sign_in(&self, user: &UserData) -> Result<(), SessionError> {
        if let Some(token) = &user.access_token {
            self.save_token(token)?;
        }

        self.save_user(user)?;

        debug!(email = %user.email, "signed in");

        Ok(())
    }

    /// Forget the token and profile.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if either document cannot be removed.
    pub fn sign_out(&self) -> Result<(), SessionError> {
        self.remove_token()?;
        self.remove_user()?;

        debug!("signed out");

        Ok(())
    }

    /// Request credentials from the stored token and an optional API key.
    pub fn credentials(&self, api_key: Option<Secret>) -> Credentials {
        let mut credentials = Credentials::anonymous();

        if let Some(token) = self.token() {
            credentials = credentials.with_access_token(token);
        }

        if let Some(key) = api_key {
            credentials = credentials.with_api_key(key);
        }

        credentials
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::storage::MemoryStorage;

    use super::*;

    #[test]
    fn secret_debug_is_redacted() {
        let secret = Secret::new("hunter22");

        assert_eq!(format!("{secret:?}"), "Secret(**redacted**)");
        assert_eq!(secret.expose(), "hunter22");
    }

    #[test]
    fn anonymous_credentials_carry_nothing() {
        let credentials = Credentials::anonymous();

        assert_eq!(credentials.access_token(), None);
        assert_eq!(credentials.api_key(), None);
    }

    #[test]
    fn empty_credentials_are_ignored() {
        let credentials = Credentials::anonymous()
            .with_access_token(Secret::new(""))
            .with_api_key(Secret::new("key"));

        assert_eq!(credentials.access_token(), None);
        assert_eq!(credentials.api_key(), Some("key"));
    }

    #[test]
    fn fresh_session_is_signed_out() {
        let session = SessionStore::new(MemoryStorage::new());

        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert_eq!(session.credentials(None), Credentials::anonymous());
    }

    #[test]
    fn sign_in_persists_token_and_profile() -> TestResult {
        let storage = MemoryStorage::new();
        let session = SessionStore::new(storage.clone());

        let user: UserData = serde_json::from_str(
            r#"{"name": "kari", "email": "kari@stud.noroff.no", "accessToken": "tok", "venueManager": false}"#,
        )?;

        session.sign_in(&user)?;

        assert!(session.is_authenticated());
        assert_eq!(storage.get(ACCESS_TOKEN_KEY)?, Some("tok".to_string()));

        let stored = session.user().ok_or("user missing")?;

        assert_eq!(stored.name, "kari");
        assert_eq!(stored.extra.get("venueManager"), Some(&serde_json::json!(false)));
        assert_eq!(session.credentials(None).access_token(), Some("tok"));

        Ok(())
    }

    #[test]
    fn sign_out_forgets_everything() -> TestResult {
        let session = SessionStore::new(MemoryStorage::new());

        session.save_token(&Secret::new("tok"))?;
        session.sign_out()?;

        assert!(!session.is_authenticated());
        assert!(session.user().is_none());

        Ok(())
    }
}
