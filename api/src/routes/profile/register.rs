use actix_web::{web, HttpResponse};
use ps_core::repositories::ProfileRepository;
use ps_shared::utils::phone::mask_phone_number;
use validator::Validate;

use crate::app::AppState;
use crate::dto::profile::{RegisterRequest, RegisterResponse};
use crate::handlers::error::ApiError;

/// Handler for POST /api/v1/profile/register
///
/// # Request Body
///
/// ```json
/// {
///     "full_name": "jonathan",
///     "phone_number": "+62345",
///     "password": "12345A!"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "profile_id": "6a2f41a3-c54c-fce8-32d2-0324e1c32e22" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: validation failure or malformed body
/// - 409 Conflict: phone number already registered
/// - 500 Internal Server Error: registration failed
pub async fn register<R>(
    state: web::Data<AppState<R>>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError>
where
    R: ProfileRepository + 'static,
{
    let request = request.into_inner();
    log::info!(
        "Processing register request for phone: {}",
        mask_phone_number(&request.phone_number)
    );
    request.validate()?;

    let profile_id = state
        .profile_service
        .register(&request.full_name, &request.phone_number, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(RegisterResponse { profile_id }))
}
