use actix_web::{web, HttpResponse};
use ps_core::repositories::ProfileRepository;
use validator::Validate;

use crate::app::AppState;
use crate::dto::profile::{MessageResponse, UpdateProfileRequest};
use crate::handlers::error::ApiError;
use crate::middleware::auth::AuthContext;

/// Handler for PUT /api/v1/profile
///
/// Replaces name and phone number of the authenticated profile.
///
/// ## Errors
/// - 400 Bad Request: validation failure or malformed body
/// - 404 Not Found: the token names a profile that no longer exists
/// - 409 Conflict: the phone number is already registered
/// - 500 Internal Server Error: update failed
pub async fn update_profile<R>(
    state: web::Data<AppState<R>>,
    auth: AuthContext,
    request: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, ApiError>
where
    R: ProfileRepository + 'static,
{
    let request = request.into_inner();
    request.validate()?;

    state
        .profile_service
        .update_profile(&auth.profile_id, &request.full_name, &request.phone_number)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Success update profile")))
}
