// src/presentation/http/error.rs
use crate::application::{AuthResult, error::AuthError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Transport translation of the core error taxonomy. Status codes are
/// assigned here and nowhere else: code/grant problems are 400, session
/// failures 401, scope denials 403, upstream outages 503.
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    pub fn from_error(err: AuthError) -> Self {
        let status = match &err {
            AuthError::InvalidSignature
            | AuthError::Expired
            | AuthError::AudienceMismatch
            | AuthError::Replayed
            | AuthError::Domain(_) => StatusCode::BAD_REQUEST,
            AuthError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AuthError::UnauthorizedScopes(_) => StatusCode::FORBIDDEN,
            AuthError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message.into())
    }

    fn new(status: StatusCode, message: String) -> Self {
        Self { status, message }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let payload = ErrorBody {
            error: self
                .status
                .canonical_reason()
                .unwrap_or("error")
                .to_string(),
            message: self.message,
        };
        (self.status, Json(payload)).into_response()
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

pub type HttpResult<T> = Result<T, HttpError>;

pub trait IntoHttpResult<T> {
    fn into_http(self) -> HttpResult<T>;
}

impl<T> IntoHttpResult<T> for AuthResult<T> {
    fn into_http(self) -> HttpResult<T> {
        self.map_err(HttpError::from_error)
    }
}
