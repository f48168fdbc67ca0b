// src/infrastructure/security/redis_replay_guard.rs
use crate::application::{AuthResult, error::AuthError, ports::replay::ReplayGuard};
use async_trait::async_trait;
use deadpool_redis::{Config as DeadpoolConfig, Connection, Pool, Runtime};
use redis::AsyncCommands;
use std::time::Duration;

/// Redis-backed replay guard. `SET NX EX` gives the atomic check-and-mark
/// the one-time-use guarantee relies on.
#[derive(Clone)]
pub struct RedisReplayGuard {
    pool: Pool,
}

impl RedisReplayGuard {
    /// Create a pooled client from a redis URL (e.g. redis://:password@host:6379/0)
    pub fn from_url(url: &str) -> Result<Self, AuthError> {
        let cfg = DeadpoolConfig::from_url(url);
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|err| AuthError::infrastructure(err.to_string()))?;

        Ok(Self { pool })
    }

    async fn conn(&self) -> AuthResult<Connection> {
        self.pool
            .get()
            .await
            .map_err(|err| AuthError::infrastructure(err.to_string()))
    }
}

#[async_trait]
impl ReplayGuard for RedisReplayGuard {
    async fn set_if_absent(&self, key: &str, ttl: Duration) -> AuthResult<bool> {
        let mut conn = self.conn().await?;

        // SET key 1 NX EX <ttl> replies OK when newly set, nil otherwise.
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(1)
            .arg("NX")
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async(&mut conn)
            .await
            .map_err(|err| AuthError::infrastructure(err.to_string()))?;

        Ok(reply.is_some())
    }

    async fn exists(&self, key: &str) -> AuthResult<bool> {
        let mut conn = self.conn().await?;

        let exists: bool = conn
            .exists(key)
            .await
            .map_err(|err| AuthError::infrastructure(err.to_string()))?;
        Ok(exists)
    }
}
