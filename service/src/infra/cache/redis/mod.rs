//! Redis [`Cache`] implementation.

use ::redis::{aio::ConnectionManager, AsyncCommands as _, Client};
use derive_more::{Debug, Display, Error as StdError, From};
use tracerr::Traced;

use crate::infra::cache;
#[cfg(doc)]
use crate::infra::Cache;

/// [`Redis`] client configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Host of the Redis server.
    pub host: String,

    /// Port of the Redis server.
    pub port: u16,

    /// Number of the Redis logical database to use.
    pub db: i64,
}

impl Config {
    /// Returns the connection URL expressed by this [`Config`].
    #[must_use]
    pub fn url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.db)
    }
}

/// Redis [`Cache`] client.
#[derive(Clone, Debug)]
pub struct Redis {
    /// Managed connection to the Redis server.
    #[debug(skip)]
    conn: ConnectionManager,
}

impl Redis {
    /// Creates a new [`Redis`] client with the provided [`Config`].
    ///
    /// Pings the server to verify the connectivity.
    ///
    /// # Errors
    ///
    /// If failed to connect to the Redis server.
    pub async fn new(conf: &Config) -> Result<Self, Traced<cache::Error>> {
        let client = Client::open(conf.url())
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        let mut conn = ConnectionManager::new(client)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        let _: String = ::redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        Ok(Self { conn })
    }

    /// Converts the provided [TTL] into whole seconds as expected by Redis
    /// expiration commands.
    ///
    /// [TTL]: https://en.wikipedia.org/wiki/Time_to_live
    fn ttl_seconds(ttl: std::time::Duration) -> usize {
        usize::try_from(ttl.as_secs()).unwrap_or(usize::MAX)
    }
}

/// [`Redis`] cache [`Error`].
#[derive(Debug, Display, StdError, From)]
pub enum Error {
    /// Redis client error.
    #[display("Redis client error: {_0}")]
    Client(::redis::RedisError),
}

impl cache::Cache<cache::Read> for Redis {
    type Ok = Option<String>;
    type Err = Traced<cache::Error>;

    async fn execute(
        &self,
        cache::Read(key): cache::Read,
    ) -> Result<Self::Ok, Self::Err> {
        let mut conn = self.conn.clone();
        conn.get::<_, Option<String>>(key.as_str())
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }
}

impl cache::Cache<cache::ReadField> for Redis {
    type Ok = Option<String>;
    type Err = Traced<cache::Error>;

    async fn execute(
        &self,
        cache::ReadField { key, field }: cache::ReadField,
    ) -> Result<Self::Ok, Self::Err> {
        let mut conn = self.conn.clone();
        conn.hget::<_, _, Option<String>>(key.as_str(), field.as_str())
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }
}

impl cache::Cache<cache::Write> for Redis {
    type Ok = ();
    type Err = Traced<cache::Error>;

    async fn execute(
        &self,
        cache::Write { key, value, ttl }: cache::Write,
    ) -> Result<Self::Ok, Self::Err> {
        let mut conn = self.conn.clone();
        let secs = u64::try_from(Self::ttl_seconds(ttl)).unwrap_or(u64::MAX);
        conn.set_ex::<_, _, ()>(key.as_str(), value, secs)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }
}

impl cache::Cache<cache::WriteField> for Redis {
    type Ok = ();
    type Err = Traced<cache::Error>;

    async fn execute(
        &self,
        cache::WriteField { key, field, value, ttl }: cache::WriteField,
    ) -> Result<Self::Ok, Self::Err> {
        let mut conn = self.conn.clone();
        let mut pipe = ::redis::pipe();
        let _ = pipe
            .atomic()
            .hset(key.as_str(), field.as_str(), value)
            .ignore()
            .expire(
                key.as_str(),
                i64::try_from(Self::ttl_seconds(ttl)).unwrap_or(i64::MAX),
            )
            .ignore();
        pipe.query_async::<_, ()>(&mut conn)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }
}
