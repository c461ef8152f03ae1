//! Value objects representing immutable domain concepts.

pub mod profile_summary;

// Re-export commonly used types
pub use profile_summary::ProfileSummary;
