//! Local key-value persistence for client state.
//!
//! The browser build of this app keeps cart, orders, addresses, session, and
//! point balances in `localStorage` as JSON blobs. This module is that
//! surface as a trait: named logical stores ([`StorageKey`]), full-object
//! JSON reads and writes, no partial updates. Two implementations ship:
//! [`MemoryStore`] (tests, ephemeral sessions) and [`FileStore`] (one JSON
//! file per key under a directory).
//!
//! Writes are synchronous and whole-value, so a crash never loses more than
//! the in-flight mutation. There is no cross-process coordination: a single
//! logical writer per profile is an explicit constraint, the same last-write
//! -wins discipline the browser original has across tabs.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Names of the logical stores the client persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Cart line items.
    Cart,
    /// Mirror of the customer's order history.
    Orders,
    /// Mirror of the customer's addresses.
    Addresses,
    /// Authenticated user profile.
    User,
    /// Bearer token.
    AuthToken,
    /// Owner-configured reward rate.
    RewardRate,
    /// Available point balance.
    Points,
}

impl StorageKey {
    /// The stable storage name, shared with the browser build.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cart => "maejang_cart",
            Self::Orders => "maejang_orders",
            Self::Addresses => "maejang_addresses",
            Self::User => "maejang_user",
            Self::AuthToken => "maejang_auth_token",
            Self::RewardRate => "maejang_reward_rate",
            Self::Points => "maejang_points",
        }
    }
}

/// Errors from the storage adapter.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted blob could not be (de)serialized.
    ///
    /// Blobs carry no version field; a schema change surfaces here and the
    /// recovery is a clearing migration.
    #[error("storage serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Typed get/set/remove over named JSON blobs.
///
/// Implementations must make `set` atomic per key: a reader never observes
/// a half-written value.
pub trait KvStore: Send + Sync {
    /// Read and deserialize the value under `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored blob exists but cannot be read or
    /// deserialized into `T`.
    fn get<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>, StorageError>;

    /// Serialize and persist `value` under `key`, replacing any previous
    /// value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    fn set<T: Serialize>(&self, key: StorageKey, value: &T) -> Result<(), StorageError>;

    /// Remove the value under `key`. No-op if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails at the I/O layer.
    fn remove(&self, key: StorageKey) -> Result<(), StorageError>;
}
