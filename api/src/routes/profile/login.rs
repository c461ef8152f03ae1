use actix_web::{web, HttpResponse};
use ps_core::repositories::ProfileRepository;
use ps_shared::utils::phone::mask_phone_number;
use validator::Validate;

use crate::app::AppState;
use crate::dto::profile::{LoginRequest, LoginResponse};
use crate::handlers::error::ApiError;

/// Handler for POST /api/v1/profile/login
///
/// Returns `{ "token": "..." }` on success. Unknown phone numbers and wrong
/// passwords both answer 400 `INVALID_CREDENTIALS`.
pub async fn login<R>(
    state: web::Data<AppState<R>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    R: ProfileRepository + 'static,
{
    let request = request.into_inner();
    log::info!(
        "Processing login request for phone: {}",
        mask_phone_number(&request.phone_number)
    );
    request.validate()?;

    let token = state
        .profile_service
        .login(&request.phone_number, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}
