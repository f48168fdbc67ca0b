// src/infrastructure/upstream/mod.rs
pub mod scopes;
pub mod session;

use crate::application::error::AuthError;

/// Collapse reqwest transport failures (timeouts, refused connections, TLS
/// problems) into `UpstreamUnavailable` so they are never mistaken for an
/// authorization failure.
pub(crate) fn transport_error(context: &str, err: &reqwest::Error) -> AuthError {
    if err.is_timeout() {
        AuthError::upstream(format!("{context}: request timed out"))
    } else {
        AuthError::upstream(format!("{context}: {err}"))
    }
}
