//! Request and response bodies

pub mod profile;

pub use profile::*;
