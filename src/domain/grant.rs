// src/domain/grant.rs
pub mod claims;
pub mod value_objects;

pub use claims::{AccessClaims, CodeClaims, RefreshClaims, TokenKind};
pub use value_objects::{Audience, ScopeSet, Subject};
