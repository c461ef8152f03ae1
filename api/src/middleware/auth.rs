//! Bearer-token authentication for protected profile endpoints.
//!
//! The middleware reads the `Authorization` header, verifies the token with
//! the shared [`CredentialHelper`] and stores an [`AuthContext`] in the
//! request extensions. Requests without a bearer token are answered with
//! `NotAuthenticated` (403); tokens that fail verification with
//! `InvalidToken` (400).

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use ps_core::errors::AuthError;
use ps_core::services::CredentialHelper;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use crate::handlers::error::ApiError;

/// Identity of the caller, injected by [`JwtAuth`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub profile_id: String,
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    credentials: Arc<dyn CredentialHelper>,
}

impl JwtAuth {
    pub fn new(credentials: Arc<dyn CredentialHelper>) -> Self {
        Self { credentials }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            credentials: Arc::clone(&self.credentials),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    credentials: Arc<dyn CredentialHelper>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        let verified = match extract_bearer_token(&req) {
            None => Err(AuthError::NotAuthenticated),
            Some(token) => self.credentials.verify_token(&token),
        };

        Box::pin(async move {
            match verified {
                Ok(profile_id) => {
                    req.extensions_mut().insert(AuthContext { profile_id });
                    let response = service.call(req).await?;
                    Ok(response.map_into_left_body())
                }
                Err(error) => {
                    log::debug!(
                        "Rejected {} {}: {}",
                        req.method(),
                        req.path(),
                        error
                    );
                    let response = ApiError::from(error).error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Extractor for handlers behind [`JwtAuth`]
impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| AuthError::NotAuthenticated.into());

        ready(result)
    }
}
