// src/application/ports/audit.rs
use crate::application::{AuthResult, dto::AuditEvent};
use async_trait::async_trait;

/// Fire-and-forget audit collaborator. Call sites log failures but never
/// let them block the primary flow.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, event: AuditEvent) -> AuthResult<()>;
}
