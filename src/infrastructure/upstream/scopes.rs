// src/infrastructure/upstream/scopes.rs
use crate::application::{AuthResult, error::AuthError, ports::scopes::ScopeAuthority};
use crate::domain::grant::ScopeSet;
use crate::infrastructure::upstream::transport_error;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Scope-authority client. Fetches the allow-list for a (subject, audience)
/// pair from the consent backend.
#[derive(Clone)]
pub struct HttpScopeAuthority {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct AllowedScopes {
    scopes: Vec<String>,
}

impl HttpScopeAuthority {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AuthError::infrastructure(err.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ScopeAuthority for HttpScopeAuthority {
    async fn allowed_scopes(&self, subject: &str, audience: &str) -> AuthResult<ScopeSet> {
        let response = self
            .client
            .get(format!("{}/scopes", self.base_url))
            .query(&[("subject", subject), ("audience", audience)])
            .send()
            .await
            .map_err(|err| transport_error("scope authority", &err))?;

        if !response.status().is_success() {
            return Err(AuthError::upstream(format!(
                "scope authority answered {}",
                response.status()
            )));
        }

        let allowed: AllowedScopes = response
            .json()
            .await
            .map_err(|err| transport_error("scope authority body", &err))?;

        Ok(allowed.scopes.into_iter().collect())
    }
}
