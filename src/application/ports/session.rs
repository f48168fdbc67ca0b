// src/application/ports/session.rs
use crate::application::AuthResult;
use async_trait::async_trait;

/// External identity provider that maps a bearer session token to a subject
/// identifier. Fails with `Unauthenticated` for rejected tokens and
/// `UpstreamUnavailable` for transport problems.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    async fn validate(&self, session_token: &str) -> AuthResult<String>;
}
