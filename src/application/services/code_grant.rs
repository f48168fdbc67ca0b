// src/application/services/code_grant.rs
use crate::application::{
    AuthResult,
    error::AuthError,
    ports::{replay::ReplayGuard, security::TokenSigner, time::Clock},
    services::ttl_seconds,
};
use crate::domain::grant::{Audience, CodeClaims, ScopeSet, Subject, TokenKind};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Issues and verifies signed, time-boxed, audience-bound, single-use
/// authorization codes.
pub struct CodeGrantService {
    signer: Arc<dyn TokenSigner>,
    replay_guard: Arc<dyn ReplayGuard>,
    clock: Arc<dyn Clock>,
    code_ttl: Duration,
}

fn consumed_nonce_key(nonce: &str) -> String {
    format!("used_code_nonce:{nonce}")
}

impl CodeGrantService {
    pub fn new(
        signer: Arc<dyn TokenSigner>,
        replay_guard: Arc<dyn ReplayGuard>,
        clock: Arc<dyn Clock>,
        code_ttl: Duration,
    ) -> Self {
        Self {
            signer,
            replay_guard,
            clock,
            code_ttl,
        }
    }

    pub fn code_ttl(&self) -> Duration {
        self.code_ttl
    }

    /// Create a signed authorization code for the given consent grant.
    ///
    /// The nonce is not touched here: a code counts as consumed only on its
    /// first successful verification, so an issued-but-never-presented code
    /// simply ages out of validity with its `expires_at`.
    pub fn issue(&self, subject: &str, audience: &str, scopes: ScopeSet) -> AuthResult<String> {
        let subject = Subject::new(subject)?;
        let audience = Audience::new(audience)?;

        let issued_at = self.clock.now().timestamp();
        let expires_at = issued_at + ttl_seconds(self.code_ttl);

        let claims = CodeClaims {
            subject: subject.into(),
            audience: audience.into(),
            scopes,
            issued_at,
            expires_at,
            token_kind: TokenKind::AuthorizationCode,
            nonce: Uuid::new_v4().simple().to_string(),
        };

        self.signer.sign_code(&claims)
    }

    /// Validate a presented code against the expected audience and mark it
    /// consumed.
    ///
    /// Check order matters: the replay guard is only written after every
    /// other check has passed, so a code rejected for a bad audience or a
    /// lapsed expiry stays unconsumed. The mark itself is an atomic
    /// set-if-absent, which serializes concurrent presentations of the same
    /// code: exactly one caller sees the nonce as fresh.
    pub async fn verify(&self, code: &str, expected_audience: &str) -> AuthResult<CodeClaims> {
        let claims = self.signer.decode_code(code)?;

        if self.clock.now().timestamp() > claims.expires_at {
            return Err(AuthError::Expired);
        }

        if claims.audience != expected_audience {
            return Err(AuthError::AudienceMismatch);
        }

        let fresh = self
            .replay_guard
            .set_if_absent(&consumed_nonce_key(&claims.nonce), self.code_ttl)
            .await?;
        if !fresh {
            return Err(AuthError::Replayed);
        }

        Ok(claims)
    }
}
