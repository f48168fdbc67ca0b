// src/application/services/consent.rs
use crate::application::{
    AuthResult,
    dto::AuditEvent,
    error::AuthError,
    ports::{audit::AuditSink, scopes::ScopeAuthority, session::SessionValidator},
    services::CodeGrantService,
};
use crate::domain::grant::ScopeSet;
use std::sync::Arc;

const ACTION_CONSENT: &str = "oauth_consent";

/// Consent boundary: authenticates the end-user session, checks the
/// requested scopes against the externally sourced allow-list, and only
/// then issues an authorization code.
pub struct ConsentService {
    code_grants: Arc<CodeGrantService>,
    session_validator: Arc<dyn SessionValidator>,
    scope_authority: Arc<dyn ScopeAuthority>,
    audit_sink: Arc<dyn AuditSink>,
}

impl ConsentService {
    pub fn new(
        code_grants: Arc<CodeGrantService>,
        session_validator: Arc<dyn SessionValidator>,
        scope_authority: Arc<dyn ScopeAuthority>,
        audit_sink: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            code_grants,
            session_validator,
            scope_authority,
            audit_sink,
        }
    }

    /// Run the consent check and issue a code on success.
    ///
    /// The scope check happens strictly before issuance; a denial is
    /// audited (with the reason) before the error is returned.
    pub async fn authorize(
        &self,
        session_token: &str,
        audience: &str,
        requested: ScopeSet,
    ) -> AuthResult<String> {
        let subject = self.session_validator.validate(session_token).await?;

        let allowed = self
            .scope_authority
            .allowed_scopes(&subject, audience)
            .await?;

        let unauthorized = requested.difference(&allowed);
        if !unauthorized.is_empty() {
            let err = AuthError::UnauthorizedScopes(unauthorized);
            self.record_audit(AuditEvent::denied(
                Some(subject),
                audience,
                requested.to_vec(),
                ACTION_CONSENT,
                err.reason(),
            ))
            .await;
            return Err(err);
        }

        let code = self.code_grants.issue(&subject, audience, requested.clone())?;

        self.record_audit(AuditEvent::granted(
            subject,
            audience,
            &requested,
            ACTION_CONSENT,
        ))
        .await;

        Ok(code)
    }

    async fn record_audit(&self, event: AuditEvent) {
        if let Err(err) = self.audit_sink.record(event).await {
            tracing::warn!(error = %err, "audit sink failed to record consent event");
        }
    }
}
