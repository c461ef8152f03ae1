//! Shared utilities and common types for the profile service
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response envelope
//! - Utility functions (phone and password rules)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig, LoggingConfig,
    PasswordConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::{password, phone};
