//! [`Cache`]-related implementations.

#[cfg(feature = "redis")]
pub mod redis;

use std::time::Duration;

use derive_more::{AsRef, Display, Error as StdError, From};

#[cfg(feature = "redis")]
pub use self::redis::Redis;

/// Cache operation.
pub use common::Handler as Cache;

/// Key identifying a cached value.
#[derive(AsRef, Clone, Debug, Display, Eq, From, Hash, PartialEq)]
#[as_ref(forward)]
#[from(forward)]
pub struct Key(String);

impl Key {
    /// Returns this [`Key`] as a [`str`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Field of a hash stored under a [`Key`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, Hash, PartialEq)]
#[as_ref(forward)]
#[from(forward)]
pub struct Field(String);

impl Field {
    /// Returns this [`Field`] as a [`str`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Operation of reading the value stored under a [`Key`].
#[derive(Clone, Debug)]
pub struct Read(pub Key);

/// Operation of reading a single [`Field`] of the hash stored under a [`Key`].
#[derive(Clone, Debug)]
pub struct ReadField {
    /// [`Key`] of the hash.
    pub key: Key,

    /// [`Field`] to read.
    pub field: Field,
}

/// Operation of storing a value under a [`Key`] with an expiration.
#[derive(Clone, Debug)]
pub struct Write {
    /// [`Key`] to store the value under.
    pub key: Key,

    /// Value to store.
    pub value: String,

    /// [TTL] of the stored value.
    ///
    /// [TTL]: https://en.wikipedia.org/wiki/Time_to_live
    pub ttl: Duration,
}

/// Operation of storing a single [`Field`] of the hash under a [`Key`] with
/// an expiration.
///
/// The [`Field`] write and the expiration are applied atomically, so the hash
/// never exists without an expiration set.
#[derive(Clone, Debug)]
pub struct WriteField {
    /// [`Key`] of the hash.
    pub key: Key,

    /// [`Field`] to store the value under.
    pub field: Field,

    /// Value to store.
    pub value: String,

    /// [TTL] of the whole hash.
    ///
    /// [TTL]: https://en.wikipedia.org/wiki/Time_to_live
    pub ttl: Duration,
}

/// [`Cache`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "redis")]
    /// [`Redis`] error.
    Redis(redis::Error),
}
