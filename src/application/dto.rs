// src/application/dto.rs
use crate::domain::grant::ScopeSet;
use serde::Serialize;

/// Body of a successful `POST /oauth/token` exchange.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponseDto {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub scope: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditStatus {
    Granted,
    Denied,
}

impl AuditStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
        }
    }
}

/// Structured event handed to the audit sink. Recorded for granted and
/// denied attempts alike; `subject` is absent when the failure happened
/// before the caller could be identified (e.g. a forged code).
#[derive(Debug, Clone)]
pub struct AuditEvent {
    pub subject: Option<String>,
    pub audience: String,
    pub scopes: Vec<String>,
    pub action: String,
    pub status: AuditStatus,
    pub reason: Option<String>,
}

impl AuditEvent {
    pub fn granted(
        subject: impl Into<String>,
        audience: impl Into<String>,
        scopes: &ScopeSet,
        action: impl Into<String>,
    ) -> Self {
        Self {
            subject: Some(subject.into()),
            audience: audience.into(),
            scopes: scopes.to_vec(),
            action: action.into(),
            status: AuditStatus::Granted,
            reason: None,
        }
    }

    pub fn denied(
        subject: Option<String>,
        audience: impl Into<String>,
        scopes: Vec<String>,
        action: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            subject,
            audience: audience.into(),
            scopes,
            action: action.into(),
            status: AuditStatus::Denied,
            reason: Some(reason.into()),
        }
    }
}
