//! Application state and factory
//!
//! This module holds the shared application state and builds the
//! Actix-web application with its middleware and routes.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::{Condition, Logger},
    web, App, HttpResponse,
};
use ps_core::repositories::ProfileRepository;
use ps_core::services::{CredentialHelper, ProfileService};
use ps_shared::config::AppConfig;
use ps_shared::errors::{error_codes, ErrorResponse};

use crate::handlers::error::ApiError;
use crate::middleware::{auth::JwtAuth, cors::create_cors, security::SecurityHeaders};
use crate::routes::profile::{get_profile, login, register, update_profile};

/// Application state that holds shared services
pub struct AppState<R>
where
    R: ProfileRepository,
{
    pub profile_service: Arc<ProfileService<R, dyn CredentialHelper>>,
}

impl<R> AppState<R>
where
    R: ProfileRepository,
{
    pub fn new(profile_service: Arc<ProfileService<R, dyn CredentialHelper>>) -> Self {
        Self { profile_service }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<R>(
    app_state: web::Data<AppState<R>>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    R: ProfileRepository + 'static,
{
    let credentials = app_state.profile_service.credentials();

    // Malformed or oversized JSON bodies answer with the standard error body
    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(|err, _req| ApiError::InvalidRequest(err.to_string()).into());

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // Last wrapped runs first: logging, then CORS, then security headers
        .wrap(SecurityHeaders::for_environment(config.environment))
        .wrap(create_cors(&config.cors))
        .wrap(Condition::new(config.logging.access_log, Logger::default()))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1/profile")
                .route("/register", web::post().to(register::<R>))
                .route("/login", web::post().to(login::<R>))
                .service(
                    web::resource("")
                        .wrap(JwtAuth::new(credentials))
                        .route(web::get().to(get_profile::<R>))
                        .route(web::put().to(update_profile::<R>)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "profile-service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
