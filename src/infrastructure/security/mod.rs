// src/infrastructure/security/mod.rs
pub mod hmac;
pub mod memory_replay_guard;
pub mod redis_replay_guard;
