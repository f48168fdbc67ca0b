// src/presentation/http/state.rs
use crate::application::services::AuthorityServices;
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<AuthorityServices>,
}
