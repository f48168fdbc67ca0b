// tests/support/mocks.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use codegate_core::application::{
    AuthResult,
    dto::AuditEvent,
    error::AuthError,
    ports::{audit::AuditSink, scopes::ScopeAuthority, session::SessionValidator, time::Clock},
};
use codegate_core::domain::grant::ScopeSet;
use std::collections::HashMap;
use std::sync::Mutex;

/// Session tokens the mock identity provider accepts.
pub const TEST_SESSION_TOKEN: &str = "session-token";
pub const TEST_SUBJECT: &str = "user-123";
pub const TEST_AUDIENCE: &str = "client-abc";

pub fn fixed_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
}

/* -------------------------------- Clock -------------------------------- */

#[derive(Clone, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(fixed_now())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/* --------------------------- SessionValidator --------------------------- */

/// Maps known session tokens to subjects; everything else is rejected.
#[derive(Debug, Default)]
pub struct MapSessionValidator {
    subjects: HashMap<String, String>,
}

impl MapSessionValidator {
    pub fn with_default_user() -> Self {
        let mut subjects = HashMap::new();
        subjects.insert(TEST_SESSION_TOKEN.to_string(), TEST_SUBJECT.to_string());
        Self { subjects }
    }
}

#[async_trait]
impl SessionValidator for MapSessionValidator {
    async fn validate(&self, session_token: &str) -> AuthResult<String> {
        self.subjects
            .get(session_token)
            .cloned()
            .ok_or_else(|| AuthError::unauthenticated("invalid session token"))
    }
}

/// Simulates an identity provider that cannot be reached.
#[derive(Debug, Default)]
pub struct UnreachableSessionValidator;

#[async_trait]
impl SessionValidator for UnreachableSessionValidator {
    async fn validate(&self, _session_token: &str) -> AuthResult<String> {
        Err(AuthError::upstream("identity provider timed out"))
    }
}

/* ---------------------------- ScopeAuthority ---------------------------- */

/// Fixed allow-list, independent of subject/audience.
#[derive(Debug, Default)]
pub struct StaticScopeAuthority {
    allowed: ScopeSet,
}

impl StaticScopeAuthority {
    pub fn allowing<'a>(scopes: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            allowed: scopes.into_iter().collect(),
        }
    }
}

#[async_trait]
impl ScopeAuthority for StaticScopeAuthority {
    async fn allowed_scopes(&self, _subject: &str, _audience: &str) -> AuthResult<ScopeSet> {
        Ok(self.allowed.clone())
    }
}

/* ------------------------------- AuditSink ------------------------------ */

/// Records every event for later assertions.
#[derive(Debug, Default)]
pub struct RecordingAuditSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl RecordingAuditSink {
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditSink for RecordingAuditSink {
    async fn record(&self, event: AuditEvent) -> AuthResult<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// Always fails; used to check that audit outages never block the flow.
#[derive(Debug, Default)]
pub struct FailingAuditSink;

#[async_trait]
impl AuditSink for FailingAuditSink {
    async fn record(&self, _event: AuditEvent) -> AuthResult<()> {
        Err(AuthError::upstream("audit sink unreachable"))
    }
}
