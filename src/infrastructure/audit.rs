// src/infrastructure/audit.rs
use crate::application::{AuthResult, dto::AuditEvent, ports::audit::AuditSink};
use async_trait::async_trait;

/// Audit sink that emits structured tracing events. Persistent audit
/// storage lives behind an external collaborator; this adapter makes every
/// grant/denial visible in the service logs.
#[derive(Clone, Debug, Default)]
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn record(&self, event: AuditEvent) -> AuthResult<()> {
        tracing::info!(
            subject = event.subject.as_deref().unwrap_or("-"),
            audience = %event.audience,
            scopes = %event.scopes.join(" "),
            action = %event.action,
            status = event.status.as_str(),
            reason = event.reason.as_deref().unwrap_or("-"),
            "audit event"
        );
        Ok(())
    }
}
