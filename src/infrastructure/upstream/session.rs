// src/infrastructure/upstream/session.rs
use crate::application::{AuthResult, error::AuthError, ports::session::SessionValidator};
use crate::infrastructure::upstream::transport_error;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Identity-provider client. The provider exposes a `GET /auth/v1/user`
/// endpoint that echoes the profile of the session the bearer token belongs
/// to, or rejects the token with a 4xx.
#[derive(Clone)]
pub struct HttpSessionValidator {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionProfile {
    id: String,
}

impl HttpSessionValidator {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AuthError::infrastructure(err.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl SessionValidator for HttpSessionValidator {
    async fn validate(&self, session_token: &str) -> AuthResult<String> {
        let mut request = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .bearer_auth(session_token);

        if let Some(api_key) = &self.api_key {
            request = request.header("apikey", api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|err| transport_error("session validator", &err))?;

        if !response.status().is_success() {
            return Err(AuthError::unauthenticated(
                "identity provider rejected the session token",
            ));
        }

        let profile: SessionProfile = response
            .json()
            .await
            .map_err(|err| transport_error("session validator body", &err))?;

        Ok(profile.id)
    }
}
