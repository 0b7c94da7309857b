//! [`Query`] definition.

pub mod areas;
pub mod house;
pub mod houses;

use derive_more::{Display, From, Into};
use serde::Serialize;

#[cfg(doc)]
use crate::Service;

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// Pre-serialized JSON output of a [`Query`].
///
/// Cached and returned to clients byte-for-byte, so a cache hit and a fresh
/// database result of the same [`Query`] are indistinguishable on the wire.
#[derive(Clone, Debug, Display, Eq, From, Into, PartialEq)]
pub struct Payload(String);

impl Payload {
    /// Returns this [`Payload`] as a [`str`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Serializes the provided value into a [`Payload`].
    pub(crate) fn encode<T: Serialize>(value: &T) -> Self {
        Self(
            serde_json::to_string(value)
                .expect("JSON serialization cannot fail"),
        )
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Test doubles shared by [`Query`] tests.

    use std::{collections::HashMap, sync::Mutex, time::Duration};

    use tracerr::Traced;

    use crate::infra::{cache, Cache};

    /// In-memory [`Cache`] recording all reads and writes.
    #[derive(Debug, Default)]
    pub(crate) struct FakeCache {
        /// Stored values, keyed by the cache key and the optional hash field.
        pub(crate) values:
            Mutex<HashMap<(String, Option<String>), String>>,

        /// Expirations assigned to keys.
        pub(crate) ttls: Mutex<HashMap<String, Duration>>,

        /// Makes all read operations fail, imitating an unavailable server.
        pub(crate) fail_reads: bool,
    }

    impl FakeCache {
        /// Creates an error resembling a lost connection.
        fn error() -> Traced<cache::Error> {
            let e = ::redis::RedisError::from((
                ::redis::ErrorKind::IoError,
                "connection refused",
            ));
            tracerr::new!(cache::Error::Redis(cache::redis::Error::Client(e)))
        }
    }

    impl Cache<cache::Read> for FakeCache {
        type Ok = Option<String>;
        type Err = Traced<cache::Error>;

        async fn execute(
            &self,
            cache::Read(key): cache::Read,
        ) -> Result<Self::Ok, Self::Err> {
            if self.fail_reads {
                return Err(Self::error());
            }
            Ok(self
                .values
                .lock()
                .unwrap()
                .get(&(key.as_str().to_owned(), None))
                .cloned())
        }
    }

    impl Cache<cache::ReadField> for FakeCache {
        type Ok = Option<String>;
        type Err = Traced<cache::Error>;

        async fn execute(
            &self,
            cache::ReadField { key, field }: cache::ReadField,
        ) -> Result<Self::Ok, Self::Err> {
            if self.fail_reads {
                return Err(Self::error());
            }
            Ok(self
                .values
                .lock()
                .unwrap()
                .get(&(
                    key.as_str().to_owned(),
                    Some(field.as_str().to_owned()),
                ))
                .cloned())
        }
    }

    impl Cache<cache::Write> for FakeCache {
        type Ok = ();
        type Err = Traced<cache::Error>;

        async fn execute(
            &self,
            cache::Write { key, value, ttl }: cache::Write,
        ) -> Result<Self::Ok, Self::Err> {
            let key = key.as_str().to_owned();
            drop(
                self.values
                    .lock()
                    .unwrap()
                    .insert((key.clone(), None), value),
            );
            drop(self.ttls.lock().unwrap().insert(key, ttl));
            Ok(())
        }
    }

    impl Cache<cache::WriteField> for FakeCache {
        type Ok = ();
        type Err = Traced<cache::Error>;

        async fn execute(
            &self,
            cache::WriteField { key, field, value, ttl }: cache::WriteField,
        ) -> Result<Self::Ok, Self::Err> {
            let key = key.as_str().to_owned();
            drop(self.values.lock().unwrap().insert(
                (key.clone(), Some(field.as_str().to_owned())),
                value,
            ));
            drop(self.ttls.lock().unwrap().insert(key, ttl));
            Ok(())
        }
    }
}
