//! Profile service module
//!
//! Registration, login, profile retrieval and profile update. Check-then-write
//! sequences run inside a single store transaction.

mod service;

#[cfg(test)]
mod tests;

pub use service::ProfileService;
