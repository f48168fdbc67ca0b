// src/domain/grant/claims.rs
use crate::domain::grant::value_objects::ScopeSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminates the three token families. Each family is signed with its
/// own key and a decoded payload is only accepted when the embedded kind
/// matches the key it was verified with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    AuthorizationCode,
    AccessToken,
    RefreshToken,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AuthorizationCode => "authorization_code",
            Self::AccessToken => "access_token",
            Self::RefreshToken => "refresh_token",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a signed authorization code. Timestamps are unix seconds so
/// the signed encoding is stable across serde versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeClaims {
    pub subject: String,
    pub audience: String,
    pub scopes: ScopeSet,
    pub issued_at: i64,
    pub expires_at: i64,
    pub token_kind: TokenKind,
    pub nonce: String,
}

/// Payload of a signed bearer access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub subject: String,
    pub audience: String,
    pub scopes: ScopeSet,
    pub issued_at: i64,
    pub expires_at: i64,
    pub token_kind: TokenKind,
}

/// Payload of a signed refresh token. Carries no scopes; the allowed set is
/// re-derived from the scope authority at refresh time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub subject: String,
    pub audience: String,
    pub issued_at: i64,
    pub expires_at: i64,
    pub token_kind: TokenKind,
}
