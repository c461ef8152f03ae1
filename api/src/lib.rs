//! HTTP boundary for the profile service
//!
//! Exposes registration, login and profile management over actix-web and
//! translates domain outcomes into JSON responses.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, AppState};
