//! Auth session manager.
//!
//! Holds the bearer token, answers expiry questions, and classifies HTTP
//! statuses. Deliberately side-effect free on failure: a 401 from a
//! background request must NOT log the user out of a view where they are
//! still authenticated, so nothing here clears the token except an explicit
//! [`AuthSession::clear_token`] call.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use tracing::debug;

use crate::storage::{KvStore, StorageError, StorageKey};

/// How a response status relates to authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthClassification {
    /// 401 or 403: the token was missing, expired, or insufficient.
    AuthError,
    /// Anything else; not an auth concern.
    Other,
}

impl AuthClassification {
    /// Classify an HTTP status code.
    #[must_use]
    pub const fn of(status: u16) -> Self {
        match status {
            401 | 403 => Self::AuthError,
            _ => Self::Other,
        }
    }
}

/// Bearer-token session backed by the key-value store.
///
/// The token survives reloads via storage; in-memory reads go through
/// storage every time so there is exactly one source of truth.
pub struct AuthSession<S: KvStore> {
    store: Arc<S>,
}

impl<S: KvStore> Clone for AuthSession<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KvStore> AuthSession<S> {
    /// Create a session manager over the given store.
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The current bearer token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted token blob cannot be read.
    pub fn token(&self) -> Result<Option<String>, StorageError> {
        self.store.get::<String>(StorageKey::AuthToken)
    }

    /// Persist a new bearer token, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        debug!("storing bearer token");
        self.store.set(StorageKey::AuthToken, &token)
    }

    /// Explicit logout: remove the persisted token.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails.
    pub fn clear_token(&self) -> Result<(), StorageError> {
        debug!("clearing bearer token");
        self.store.remove(StorageKey::AuthToken)
    }

    /// Whether a token is currently stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted token blob cannot be read.
    pub fn has_token(&self) -> Result<bool, StorageError> {
        Ok(self.token()?.is_some())
    }

    /// Whether the stored token is absent or past its embedded expiry.
    ///
    /// A token whose expiry claim cannot be decoded is treated as expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted token blob cannot be read.
    pub fn is_expired(&self) -> Result<bool, StorageError> {
        let Some(token) = self.token()? else {
            return Ok(true);
        };
        Ok(match decode_expiry_epoch(&token) {
            Some(exp) => exp <= Utc::now().timestamp(),
            None => true,
        })
    }

    /// Classify a response status. Never mutates session state; the caller
    /// decides whether an auth error warrants clearing the token.
    #[must_use]
    pub const fn classify_response(status: u16) -> AuthClassification {
        AuthClassification::of(status)
    }
}

/// Extract the `exp` claim from a self-contained signed token.
///
/// No signature verification: the server is the authority, this is only
/// used to avoid sending requests that are guaranteed to bounce.
fn decode_expiry_epoch(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    claims.get("exp")?.as_i64()
}
