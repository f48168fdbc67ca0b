// src/application/ports/security.rs
use crate::application::AuthResult;
use crate::domain::grant::{AccessClaims, CodeClaims, RefreshClaims};

/// Signing and verification of the three token families. Implementations
/// hold three independent keys; a payload signed with one key never decodes
/// under another. Signing is pure and fails only on misconfiguration, so no
/// async or storage access is involved.
pub trait TokenSigner: Send + Sync {
    fn sign_code(&self, claims: &CodeClaims) -> AuthResult<String>;

    /// Verify the signature and decode the payload, additionally rejecting
    /// payloads whose `token_kind` is not `authorization_code`. Expiry and
    /// audience are the caller's responsibility.
    fn decode_code(&self, token: &str) -> AuthResult<CodeClaims>;

    fn sign_access(&self, claims: &AccessClaims) -> AuthResult<String>;

    fn sign_refresh(&self, claims: &RefreshClaims) -> AuthResult<String>;
}
