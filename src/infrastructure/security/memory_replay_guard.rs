// src/infrastructure/security/memory_replay_guard.rs
use crate::application::{AuthResult, ports::replay::ReplayGuard};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Mutex-guarded in-memory replay guard for tests and single-process
/// deployments. The lock spans the whole lookup-then-insert, which is the
/// same atomicity `SET NX EX` provides in the redis adapter.
#[derive(Default)]
pub struct InMemoryReplayGuard {
    // key -> expiry instant
    inner: Mutex<HashMap<String, Instant>>,
}

impl InMemoryReplayGuard {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_live(expiry: &Instant) -> bool {
        *expiry > Instant::now()
    }
}

#[async_trait]
impl ReplayGuard for InMemoryReplayGuard {
    async fn set_if_absent(&self, key: &str, ttl: Duration) -> AuthResult<bool> {
        let mut guard = self.inner.lock().unwrap();

        if guard.get(key).is_some_and(Self::is_live) {
            return Ok(false);
        }

        guard.insert(key.to_string(), Instant::now() + ttl);
        Ok(true)
    }

    async fn exists(&self, key: &str) -> AuthResult<bool> {
        let guard = self.inner.lock().unwrap();
        Ok(guard.get(key).is_some_and(Self::is_live))
    }
}
