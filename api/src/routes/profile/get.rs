use actix_web::{web, HttpResponse};
use ps_core::repositories::ProfileRepository;

use crate::app::AppState;
use crate::dto::profile::ProfileResponse;
use crate::handlers::error::ApiError;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/profile
///
/// Requires `Authorization: Bearer {token}`; answers with the caller's
/// `full_name` and `phone_number`.
pub async fn get_profile<R>(
    state: web::Data<AppState<R>>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    R: ProfileRepository + 'static,
{
    let summary = state.profile_service.get_profile(&auth.profile_id).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        full_name: summary.full_name,
        phone_number: summary.phone_number,
    }))
}
