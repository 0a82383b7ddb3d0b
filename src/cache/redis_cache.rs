//! Redis product cache.
//!
//! Products are stored as JSON strings with `SET key value EX ttl`. All calls
//! share one multiplexed connection, opened on first use. A connection that
//! fails at the transport level is dropped and the next call opens a new one,
//! so an outage only fails the calls made while Redis is down.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError};
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::ProductCache;
use crate::error::CacheFailure;
use crate::product::Product;

#[derive(Clone)]
pub struct RedisCache {
    client: Client,
    conn: Arc<Mutex<Option<MultiplexedConnection>>>,
}

impl RedisCache {
    /// Creates a cache for `url` (e.g. `redis://localhost:6379`).
    ///
    /// Only the URL is checked here; no connection is made until first use.
    pub fn open(url: &str) -> Result<Self, CacheFailure> {
        let client = Client::open(url)
            .map_err(|e| CacheFailure::Backend(format!("invalid Redis URL: {}", e)))?;
        Ok(Self {
            client,
            conn: Arc::new(Mutex::new(None)),
        })
    }

    async fn connection(&self) -> Result<MultiplexedConnection, CacheFailure> {
        let mut slot = self.conn.lock().await;
        if let Some(conn) = slot.as_ref() {
            return Ok(conn.clone());
        }

        let conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CacheFailure::Backend(format!("Redis connection failed: {}", e)))?;
        debug!("Opened Redis connection");
        *slot = Some(conn.clone());
        Ok(conn)
    }

    /// Wraps a command error, forgetting the shared connection if it is broken.
    async fn command_failed(&self, command: &str, err: RedisError) -> CacheFailure {
        if err.is_io_error() || err.is_connection_dropped() || err.is_unrecoverable_error() {
            self.conn.lock().await.take();
            debug!(command, "Dropped broken Redis connection");
        }
        CacheFailure::Backend(format!("Redis {} failed: {}", command, err))
    }
}

#[async_trait]
impl ProductCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Product>, CacheFailure> {
        let mut conn = self.connection().await?;

        let raw: Option<String> = match conn.get(key).await {
            Ok(raw) => raw,
            Err(err) => return Err(self.command_failed("GET", err).await),
        };

        raw.map(|value| serde_json::from_str(&value).map_err(CacheFailure::Decode))
            .transpose()
    }

    async fn set(&self, key: &str, product: &Product, ttl: Duration) -> Result<(), CacheFailure> {
        let value = serde_json::to_string(product).map_err(CacheFailure::Encode)?;
        let mut conn = self.connection().await?;

        // EX rejects 0, and sub-second TTLs round down to it
        let seconds = ttl.as_secs().max(1);
        let stored: Result<(), RedisError> = conn.set_ex(key, value, seconds).await;
        if let Err(err) = stored {
            return Err(self.command_failed("SET", err).await);
        }

        debug!(key, seconds, "Cached product in Redis");
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheFailure> {
        let mut conn = self.connection().await?;
        let pong: Result<String, RedisError> = redis::cmd("PING").query_async(&mut conn).await;
        match pong {
            Ok(_) => Ok(()),
            Err(err) => Err(self.command_failed("PING", err).await),
        }
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache").finish_non_exhaustive()
    }
}
