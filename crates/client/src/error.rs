//! Unified error type for the client SDK.
//!
//! Remote failures are classified once, at the gateway boundary (see
//! [`crate::gateway`]), into the kinds the UI layer distinguishes:
//! validation, auth, network, and domain. Local subsystem errors (storage,
//! config) convert in via `From`.

use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

/// Top-level error for SDK operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Local precondition failed (empty cart, no address selected, bad
    /// input). Recoverable; shown as a transient notice.
    #[error("validation error: {0}")]
    Validation(String),

    /// The server answered 401/403. The session token is NOT cleared as a
    /// side effect; the caller decides whether to log out.
    #[error("authentication required")]
    Auth,

    /// Transport-level failure: connect, timeout, or malformed response
    /// body. The user may retry manually; the SDK never retries.
    #[error("network error: {0}")]
    Network(String),

    /// The server processed the request and said no. The message passes
    /// through verbatim for display.
    #[error("{0}")]
    Domain(String),

    /// Local persistence failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration is missing or invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The session-wide store context could not be resolved. Unlike every
    /// other kind this is a dead end: nothing is usable without a store.
    #[error("store not available: {0}")]
    StoreUnavailable(String),
}

impl ClientError {
    /// Whether the failure leaves the app usable (everything except a
    /// failed store resolution).
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::StoreUnavailable(_))
    }
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_passes_domain_message_verbatim() {
        let err = ClientError::Domain("품절된 메뉴입니다.".to_string());
        assert_eq!(err.to_string(), "품절된 메뉴입니다.");
    }

    #[test]
    fn test_recoverability() {
        assert!(ClientError::Network("timeout".into()).is_recoverable());
        assert!(ClientError::Auth.is_recoverable());
        assert!(!ClientError::StoreUnavailable("unknown subdomain".into()).is_recoverable());
    }
}
