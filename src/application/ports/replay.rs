// src/application/ports/replay.rs
use crate::application::AuthResult;
use async_trait::async_trait;
use std::time::Duration;

/// TTL-capable key-value store used to enforce one-time use of
/// authorization codes. The only shared mutable resource in the system.
#[async_trait]
pub trait ReplayGuard: Send + Sync {
    /// Atomically record `key` unless it is already present. Returns true
    /// when the key was newly set. The check and the mark must be a single
    /// operation so two concurrent callers can never both observe "absent".
    async fn set_if_absent(&self, key: &str, ttl: Duration) -> AuthResult<bool>;

    async fn exists(&self, key: &str) -> AuthResult<bool>;
}
