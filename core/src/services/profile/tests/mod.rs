//! Tests for the profile service

#[cfg(test)]
mod service_tests;
