// src/application/ports/scopes.rs
use crate::application::AuthResult;
use crate::domain::grant::ScopeSet;
use async_trait::async_trait;

/// Source of the per-(subject, audience) scope allow-list consulted before
/// any code is issued.
#[async_trait]
pub trait ScopeAuthority: Send + Sync {
    async fn allowed_scopes(&self, subject: &str, audience: &str) -> AuthResult<ScopeSet>;
}
