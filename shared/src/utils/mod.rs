//! Common utility functions

pub mod password;
pub mod phone;

// Re-export commonly used utilities
pub use password::*;
pub use phone::*;
