//! Integration tests for JWT authentication middleware

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App, HttpResponse};
use jsonwebtoken::{encode, EncodingKey, Header};
use ps_api::middleware::auth::{AuthContext, JwtAuth};
use ps_core::services::{CredentialConfig, CredentialHelper, CredentialService};

const SECRET: &str = "middleware-test-secret";
const TEST_BCRYPT_COST: u32 = 4;

fn credentials() -> Arc<dyn CredentialHelper> {
    Arc::new(CredentialService::new(CredentialConfig {
        jwt_secret: SECRET.to_string(),
        token_expiry_seconds: 3600,
        bcrypt_cost: TEST_BCRYPT_COST,
    }))
}

async fn whoami(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().body(auth.profile_id)
}

#[actix_web::test]
async fn test_middleware_requires_auth_header() {
    let app = test::init_service(
        App::new()
            .wrap(JwtAuth::new(credentials()))
            .route("/protected", web::get().to(whoami)),
    )
    .await;

    let req = test::TestRequest::get().uri("/protected").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", "Token abc"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_middleware_rejects_invalid_token() {
    let app = test::init_service(
        App::new()
            .wrap(JwtAuth::new(credentials()))
            .route("/protected", web::get().to(whoami)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", "Bearer invalid-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_middleware_rejects_token_signed_with_other_key() {
    let app = test::init_service(
        App::new()
            .wrap(JwtAuth::new(credentials()))
            .route("/protected", web::get().to(whoami)),
    )
    .await;

    let claims = serde_json::json!({
        "profile_id": "profile-id-1",
        "iat": chrono::Utc::now().timestamp(),
        "exp": chrono::Utc::now().timestamp() + 600,
    });
    let forged = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"someone-else"),
    )
    .unwrap();

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", format!("Bearer {}", forged)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_valid_token_injects_context() {
    let credentials = credentials();
    let token = credentials.generate_token("profile-id-7").unwrap();

    let app = test::init_service(
        App::new()
            .wrap(JwtAuth::new(credentials))
            .route("/protected", web::get().to(whoami)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "profile-id-7");
}

#[actix_web::test]
async fn test_auth_context_extractor_without_middleware() {
    let app = test::init_service(App::new().route("/protected", web::get().to(whoami))).await;

    let req = test::TestRequest::get().uri("/protected").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
