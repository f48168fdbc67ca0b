//! Single-authority OAuth 2.0 authorization-code issuer.
//!
//! The core lifecycle — signed, time-boxed, audience-bound, single-use
//! authorization codes exchanged for access/refresh tokens — lives in
//! [`application::services`]. External collaborators (replay store,
//! identity provider, scope authority, audit sink) sit behind the traits in
//! [`application::ports`], with production adapters in [`infrastructure`].

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
