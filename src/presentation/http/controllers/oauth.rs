// src/presentation/http/controllers/oauth.rs
use crate::application::{dto::TokenResponseDto, error::AuthError};
use crate::domain::grant::ScopeSet;
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Form, Json,
    extract::Query,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use serde::Deserialize;

const GRANT_TYPE_AUTHORIZATION_CODE: &str = "authorization_code";

#[derive(Debug, Deserialize)]
pub struct ConsentParams {
    pub client_id: String,
    pub redirect_uri: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub code: String,
    pub client_id: String,
    pub grant_type: String,
}

fn redirect_with(redirect_uri: &str, params: &[(&str, &str)]) -> Response {
    // serde_urlencoded handles the escaping of state/code values.
    let query = serde_urlencoded::to_string(params).unwrap_or_default();
    Redirect::to(&format!("{redirect_uri}?{query}")).into_response()
}

/// `GET /oauth/consent` — authenticates the end-user session, runs the
/// consent/scope check, and redirects back to the client with a fresh
/// authorization code. An absent or rejected session redirects with
/// `error=login_required` so the client can restart its login flow.
pub async fn consent(
    Extension(state): Extension<HttpState>,
    Query(params): Query<ConsentParams>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    if params.client_id.trim().is_empty() || params.redirect_uri.trim().is_empty() {
        return Err(HttpError::bad_request(
            "client_id and redirect_uri are required",
        ));
    }

    let Some(bearer) = headers.typed_get::<Authorization<Bearer>>() else {
        return Ok(redirect_with(
            &params.redirect_uri,
            &[("error", "login_required"), ("state", &params.state)],
        ));
    };

    let requested = ScopeSet::parse(&params.scope);
    let result = state
        .services
        .consent
        .authorize(bearer.token(), &params.client_id, requested)
        .await;

    match result {
        Ok(code) => Ok(redirect_with(
            &params.redirect_uri,
            &[("code", &code), ("state", &params.state)],
        )),
        Err(AuthError::Unauthenticated(_)) => Ok(redirect_with(
            &params.redirect_uri,
            &[("error", "login_required"), ("state", &params.state)],
        )),
        Err(err) => Err(HttpError::from_error(err)),
    }
}

/// `POST /oauth/token` — exchanges an authorization code for bearer tokens.
/// Only the `authorization_code` grant is supported.
pub async fn token(
    Extension(state): Extension<HttpState>,
    Form(payload): Form<TokenRequest>,
) -> HttpResult<Json<TokenResponseDto>> {
    if payload.grant_type != GRANT_TYPE_AUTHORIZATION_CODE {
        return Err(HttpError::bad_request(format!(
            "unsupported grant_type: {}",
            payload.grant_type
        )));
    }

    state
        .services
        .tokens
        .exchange_code_for_tokens(&payload.code, &payload.client_id)
        .await
        .into_http()
        .map(Json)
}
