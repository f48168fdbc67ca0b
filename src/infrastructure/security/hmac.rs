// src/infrastructure/security/hmac.rs
use crate::application::{
    AuthResult,
    error::AuthError,
    ports::security::TokenSigner,
};
use crate::domain::grant::{AccessClaims, CodeClaims, RefreshClaims, TokenKind};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use serde::{Serialize, de::DeserializeOwned};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// One HMAC-SHA256 signing key and its compact token codec.
///
/// Encoding: `base64url(json(claims)) . base64url(hmac(payload_b64))`, no
/// padding. The tag covers the encoded payload, so every claim field is
/// under the signature and any tampering invalidates it.
#[derive(Clone)]
pub struct HmacKey {
    secret: Vec<u8>,
}

impl HmacKey {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    fn mac(&self) -> AuthResult<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|err| AuthError::infrastructure(format!("invalid hmac key: {err}")))
    }

    pub fn sign<T: Serialize>(&self, claims: &T) -> AuthResult<String> {
        let payload = serde_json::to_vec(claims)
            .map_err(|err| AuthError::infrastructure(format!("claims serialization: {err}")))?;
        let body = URL_SAFE_NO_PAD.encode(payload);

        let mut mac = self.mac()?;
        mac.update(body.as_bytes());
        let tag = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{body}.{tag}"))
    }

    /// Constant-time signature check, then payload decode. Every malformed
    /// input collapses into `InvalidSignature`; no structural detail leaks
    /// to the caller.
    pub fn verify<T: DeserializeOwned>(&self, token: &str) -> AuthResult<T> {
        let (body, tag) = token.split_once('.').ok_or(AuthError::InvalidSignature)?;

        let tag_bytes = URL_SAFE_NO_PAD
            .decode(tag)
            .map_err(|_| AuthError::InvalidSignature)?;

        let mut mac = self.mac()?;
        mac.update(body.as_bytes());
        mac.verify_slice(&tag_bytes)
            .map_err(|_| AuthError::InvalidSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(body)
            .map_err(|_| AuthError::InvalidSignature)?;
        serde_json::from_slice(&payload).map_err(|_| AuthError::InvalidSignature)
    }
}

/// Three-key token signer: authorization codes, access tokens, and refresh
/// tokens are each signed with their own key (key separation), so a token
/// from one family never validates as another.
#[derive(Clone)]
pub struct HmacTokenSigner {
    code: HmacKey,
    access: HmacKey,
    refresh: HmacKey,
}

impl HmacTokenSigner {
    pub fn new(
        code_secret: impl AsRef<[u8]>,
        access_secret: impl AsRef<[u8]>,
        refresh_secret: impl AsRef<[u8]>,
    ) -> Self {
        Self {
            code: HmacKey::new(code_secret),
            access: HmacKey::new(access_secret),
            refresh: HmacKey::new(refresh_secret),
        }
    }

    pub fn decode_access(&self, token: &str) -> AuthResult<AccessClaims> {
        let claims: AccessClaims = self.access.verify(token)?;
        if claims.token_kind != TokenKind::AccessToken {
            return Err(AuthError::InvalidSignature);
        }
        Ok(claims)
    }

    pub fn decode_refresh(&self, token: &str) -> AuthResult<RefreshClaims> {
        let claims: RefreshClaims = self.refresh.verify(token)?;
        if claims.token_kind != TokenKind::RefreshToken {
            return Err(AuthError::InvalidSignature);
        }
        Ok(claims)
    }
}

impl TokenSigner for HmacTokenSigner {
    fn sign_code(&self, claims: &CodeClaims) -> AuthResult<String> {
        self.code.sign(claims)
    }

    fn decode_code(&self, token: &str) -> AuthResult<CodeClaims> {
        let claims: CodeClaims = self.code.verify(token)?;
        if claims.token_kind != TokenKind::AuthorizationCode {
            return Err(AuthError::InvalidSignature);
        }
        Ok(claims)
    }

    fn sign_access(&self, claims: &AccessClaims) -> AuthResult<String> {
        self.access.sign(claims)
    }

    fn sign_refresh(&self, claims: &RefreshClaims) -> AuthResult<String> {
        self.refresh.sign(claims)
    }
}
