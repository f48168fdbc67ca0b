// tests/support/helpers.rs
use super::mocks;
use chrono::{DateTime, Utc};
use codegate_core::application::{
    ports::{audit::AuditSink, scopes::ScopeAuthority, session::SessionValidator, time::Clock},
    services::{AuthorityServices, TokenTtls},
};
use codegate_core::infrastructure::security::{
    hmac::HmacTokenSigner, memory_replay_guard::InMemoryReplayGuard,
};
use codegate_core::presentation::http::{routes::build_router, state::HttpState};
use std::sync::Arc;

pub const CODE_SECRET: &str = "code-secret-code-secret-code-secret!";
pub const ACCESS_SECRET: &str = "access-secret-access-secret-access!!";
pub const REFRESH_SECRET: &str = "refresh-secret-refresh-secret-refre!";

pub fn test_signer() -> HmacTokenSigner {
    HmacTokenSigner::new(CODE_SECRET, ACCESS_SECRET, REFRESH_SECRET)
}

pub struct ServicesBuilder {
    pub clock: Arc<dyn Clock>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub scope_authority: Arc<dyn ScopeAuthority>,
    pub audit_sink: Arc<dyn AuditSink>,
    pub ttls: TokenTtls,
}

impl Default for ServicesBuilder {
    fn default() -> Self {
        Self {
            clock: Arc::new(mocks::FixedClock::default()),
            session_validator: Arc::new(mocks::MapSessionValidator::with_default_user()),
            scope_authority: Arc::new(mocks::StaticScopeAuthority::allowing([
                "invoices.read",
                "payments.read",
            ])),
            audit_sink: Arc::new(mocks::RecordingAuditSink::default()),
            ttls: TokenTtls::default(),
        }
    }
}

impl ServicesBuilder {
    pub fn with_clock(mut self, now: DateTime<Utc>) -> Self {
        self.clock = Arc::new(mocks::FixedClock(now));
        self
    }

    pub fn with_session_validator(mut self, validator: Arc<dyn SessionValidator>) -> Self {
        self.session_validator = validator;
        self
    }

    pub fn with_scope_authority(mut self, authority: Arc<dyn ScopeAuthority>) -> Self {
        self.scope_authority = authority;
        self
    }

    pub fn with_audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit_sink = sink;
        self
    }

    pub fn build(self) -> Arc<AuthorityServices> {
        Arc::new(AuthorityServices::new(
            Arc::new(test_signer()),
            Arc::new(InMemoryReplayGuard::new()),
            self.session_validator,
            self.scope_authority,
            self.audit_sink,
            self.clock,
            self.ttls,
        ))
    }
}

pub fn build_services() -> Arc<AuthorityServices> {
    ServicesBuilder::default().build()
}

pub fn make_test_router() -> axum::Router {
    let services = build_services();
    build_router(HttpState { services })
}

pub fn make_test_router_with(services: Arc<AuthorityServices>) -> axum::Router {
    build_router(HttpState { services })
}
