// src/application/error.rs
use crate::domain::errors::DomainError;
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

/// Per-request error taxonomy. Transport status codes are assigned only at
/// the presentation boundary; the core never raises HTTP concepts.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid or malformed token signature")]
    InvalidSignature,

    #[error("authorization code expired")]
    Expired,

    #[error("token audience does not match the requesting client")]
    AudienceMismatch,

    #[error("authorization code already used")]
    Replayed,

    #[error("scopes not authorized for this client: {}", .0.join(" "))]
    UnauthorizedScopes(Vec<String>),

    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("upstream service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl AuthError {
    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::UpstreamUnavailable(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }

    /// Stable snake_case label recorded as the denial reason in audit events.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidSignature => "invalid_signature",
            Self::Expired => "expired",
            Self::AudienceMismatch => "audience_mismatch",
            Self::Replayed => "replayed",
            Self::UnauthorizedScopes(_) => "unauthorized_scopes",
            Self::Unauthenticated(_) => "unauthenticated",
            Self::UpstreamUnavailable(_) => "upstream_unavailable",
            Self::Domain(_) => "validation",
            Self::Infrastructure(_) => "infrastructure",
        }
    }
}
