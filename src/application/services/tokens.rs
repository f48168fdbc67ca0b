// src/application/services/tokens.rs
use crate::application::{
    AuthResult,
    dto::{AuditEvent, TokenResponseDto},
    ports::{audit::AuditSink, security::TokenSigner, time::Clock},
    services::{CodeGrantService, TokenTtls, ttl_seconds},
};
use crate::domain::grant::{AccessClaims, Audience, RefreshClaims, ScopeSet, Subject, TokenKind};
use std::sync::Arc;

const BEARER_TOKEN_TYPE: &str = "Bearer";
const ACTION_TOKEN_EXCHANGE: &str = "token_exchange";

/// Mints access/refresh tokens and runs the authorization-code exchange.
pub struct TokenService {
    code_grants: Arc<CodeGrantService>,
    signer: Arc<dyn TokenSigner>,
    audit_sink: Arc<dyn AuditSink>,
    clock: Arc<dyn Clock>,
    ttls: TokenTtls,
}

impl TokenService {
    pub fn new(
        code_grants: Arc<CodeGrantService>,
        signer: Arc<dyn TokenSigner>,
        audit_sink: Arc<dyn AuditSink>,
        clock: Arc<dyn Clock>,
        ttls: TokenTtls,
    ) -> Self {
        Self {
            code_grants,
            signer,
            audit_sink,
            clock,
            ttls,
        }
    }

    /// Sign a bearer access token. Pure: no network or storage side effects.
    pub fn mint_access_token(
        &self,
        subject: &str,
        audience: &str,
        scopes: ScopeSet,
    ) -> AuthResult<String> {
        let subject = Subject::new(subject)?;
        let audience = Audience::new(audience)?;

        let issued_at = self.clock.now().timestamp();
        let claims = AccessClaims {
            subject: subject.into(),
            audience: audience.into(),
            scopes,
            issued_at,
            expires_at: issued_at + ttl_seconds(self.ttls.access),
            token_kind: TokenKind::AccessToken,
        };

        self.signer.sign_access(&claims)
    }

    /// Sign a refresh token. Carries no scopes; those are re-derived from
    /// the scope authority when the token is presented.
    pub fn mint_refresh_token(&self, subject: &str, audience: &str) -> AuthResult<String> {
        let subject = Subject::new(subject)?;
        let audience = Audience::new(audience)?;

        let issued_at = self.clock.now().timestamp();
        let claims = RefreshClaims {
            subject: subject.into(),
            audience: audience.into(),
            issued_at,
            expires_at: issued_at + ttl_seconds(self.ttls.refresh),
            token_kind: TokenKind::RefreshToken,
        };

        self.signer.sign_refresh(&claims)
    }

    /// Exchange a verified authorization code for an access/refresh token
    /// pair. Verification failures propagate unchanged; the one-time-use
    /// guarantee comes from `CodeGrantService::verify`, whose replay mark is
    /// atomic even under concurrent exchanges of the same code.
    pub async fn exchange_code_for_tokens(
        &self,
        code: &str,
        audience: &str,
    ) -> AuthResult<TokenResponseDto> {
        let claims = match self.code_grants.verify(code, audience).await {
            Ok(claims) => claims,
            Err(err) => {
                self.record_audit(AuditEvent::denied(
                    None,
                    audience,
                    Vec::new(),
                    ACTION_TOKEN_EXCHANGE,
                    err.reason(),
                ))
                .await;
                return Err(err);
            }
        };

        let access_token =
            self.mint_access_token(&claims.subject, &claims.audience, claims.scopes.clone())?;
        let refresh_token = self.mint_refresh_token(&claims.subject, &claims.audience)?;

        self.record_audit(AuditEvent::granted(
            claims.subject.clone(),
            claims.audience.clone(),
            &claims.scopes,
            ACTION_TOKEN_EXCHANGE,
        ))
        .await;

        Ok(TokenResponseDto {
            access_token,
            refresh_token,
            token_type: BEARER_TOKEN_TYPE.into(),
            expires_in: ttl_seconds(self.ttls.access),
            scope: claims.scopes.join(),
        })
    }

    async fn record_audit(&self, event: AuditEvent) {
        if let Err(err) = self.audit_sink.record(event).await {
            tracing::warn!(error = %err, "audit sink failed to record token exchange event");
        }
    }
}
