// src/application/ports/mod.rs
pub mod audit;
pub mod replay;
pub mod scopes;
pub mod security;
pub mod session;
pub mod time;

// Type aliases to make port injection sites more descriptive and reduce `dyn` noise
pub type ReplayGuardPort = dyn replay::ReplayGuard;
pub type TokenSignerPort = dyn security::TokenSigner;
pub type SessionValidatorPort = dyn session::SessionValidator;
pub type ScopeAuthorityPort = dyn scopes::ScopeAuthority;
pub type AuditSinkPort = dyn audit::AuditSink;
pub type ClockPort = dyn time::Clock;
