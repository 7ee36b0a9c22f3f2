//! Shared configuration, errors, and token handling for InfoTrack.
//!
//! This crate provides common pieces used by the API and server crates:
//! - Configuration management
//! - Application-wide error types
//! - JWT claims and bearer token service
//! - Anti-forgery nonces bound to an action and session

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod nonce;

#[cfg(test)]
mod config_tests;

pub use auth::Claims;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
pub use nonce::{NonceConfig, NonceError, NonceService};
