// src/application/services/mod.rs
pub mod code_grant;
pub mod consent;
pub mod tokens;

pub use code_grant::CodeGrantService;
pub use consent::ConsentService;
pub use tokens::TokenService;

use crate::application::ports::{
    audit::AuditSink, replay::ReplayGuard, scopes::ScopeAuthority, security::TokenSigner,
    session::SessionValidator, time::Clock,
};
use std::sync::Arc;
use std::time::Duration;

/// Lifetimes of the three token families, resolved once from configuration.
#[derive(Debug, Clone, Copy)]
pub struct TokenTtls {
    pub code: Duration,
    pub access: Duration,
    pub refresh: Duration,
}

impl Default for TokenTtls {
    fn default() -> Self {
        Self {
            code: Duration::from_secs(120),
            access: Duration::from_secs(3600),
            refresh: Duration::from_secs(30 * 24 * 3600),
        }
    }
}

/// TTL in whole seconds as embedded in signed claims and token responses.
/// A duration past `i64::MAX` seconds saturates instead of wrapping.
pub(crate) fn ttl_seconds(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)
}

/// Aggregate of the wired application services. Constructed once at startup
/// from explicitly injected collaborators; nothing here reads ambient state.
pub struct AuthorityServices {
    pub code_grants: Arc<CodeGrantService>,
    pub tokens: Arc<TokenService>,
    pub consent: Arc<ConsentService>,
}

impl AuthorityServices {
    pub fn new(
        signer: Arc<dyn TokenSigner>,
        replay_guard: Arc<dyn ReplayGuard>,
        session_validator: Arc<dyn SessionValidator>,
        scope_authority: Arc<dyn ScopeAuthority>,
        audit_sink: Arc<dyn AuditSink>,
        clock: Arc<dyn Clock>,
        ttls: TokenTtls,
    ) -> Self {
        let code_grants = Arc::new(CodeGrantService::new(
            Arc::clone(&signer),
            Arc::clone(&replay_guard),
            Arc::clone(&clock),
            ttls.code,
        ));

        let tokens = Arc::new(TokenService::new(
            Arc::clone(&code_grants),
            Arc::clone(&signer),
            Arc::clone(&audit_sink),
            Arc::clone(&clock),
            ttls,
        ));

        let consent = Arc::new(ConsentService::new(
            Arc::clone(&code_grants),
            session_validator,
            scope_authority,
            audit_sink,
        ));

        Self {
            code_grants,
            tokens,
            consent,
        }
    }
}
