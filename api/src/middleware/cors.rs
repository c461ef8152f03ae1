//! CORS middleware configuration for cross-origin requests.
//!
//! Origins, methods and headers come from [`CorsConfig`]; an origin list
//! containing `"*"` accepts any origin, which is what development uses.

use actix_cors::Cors;
use actix_web::http::{header::HeaderName, Method};
use ps_shared::config::CorsConfig;

/// Creates a CORS middleware instance from configuration.
///
/// Entries that are not valid methods or header names are skipped with a
/// warning instead of failing start-up.
pub fn create_cors(config: &CorsConfig) -> Cors {
    if !config.enabled {
        log::info!("CORS disabled, cross-origin requests will be rejected");
        return Cors::default();
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| match m.parse::<Method>() {
            Ok(method) => Some(method),
            Err(_) => {
                log::warn!("Ignoring invalid CORS method: {}", m);
                None
            }
        })
        .collect();

    let headers: Vec<HeaderName> = config
        .allowed_headers
        .iter()
        .filter_map(|h| match HeaderName::try_from(h.as_str()) {
            Ok(header) => Some(header),
            Err(_) => {
                log::warn!("Ignoring invalid CORS header: {}", h);
                None
            }
        })
        .collect();

    let mut cors = Cors::default()
        .allowed_methods(methods)
        .allowed_headers(headers)
        .max_age(config.max_age);

    if config.allows_any_origin() {
        cors = cors.allow_any_origin();
    } else {
        for origin in config.allowed_origins.iter().map(|s| s.trim()) {
            if !origin.is_empty() {
                log::info!("Adding allowed origin: {}", origin);
                cors = cors.allowed_origin(origin);
            }
        }
    }

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::header, test as actix_test, web, App, HttpResponse};

    async fn preflight(config: CorsConfig, origin: &str) -> actix_web::http::StatusCode {
        let app = actix_test::init_service(
            App::new()
                .wrap(create_cors(&config))
                .route("/ping", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = actix_test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/ping")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
            .to_request();
        actix_test::call_service(&app, req).await.status()
    }

    #[actix_web::test]
    async fn test_development_cors_accepts_any_origin() {
        let status = preflight(CorsConfig::permissive(), "https://anywhere.example").await;
        assert!(status.is_success());
    }

    #[actix_web::test]
    async fn test_listed_origin_only() {
        let config = CorsConfig {
            allowed_origins: vec!["https://app.example".to_string()],
            ..CorsConfig::default()
        };

        assert!(preflight(config.clone(), "https://app.example")
            .await
            .is_success());
        assert!(!preflight(config, "https://evil.example").await.is_success());
    }

    #[test]
    fn test_invalid_entries_are_skipped() {
        let config = CorsConfig {
            allowed_methods: vec!["GET".to_string(), "NOT A METHOD".to_string()],
            allowed_headers: vec!["content-type".to_string(), "bad header".to_string()],
            ..CorsConfig::permissive()
        };
        let _cors = create_cors(&config);
    }
}
