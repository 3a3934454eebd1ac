//! Registration endpoints

use axum::{extract::State, http::StatusCode, Json};
use facnet_common::models::Center;

use crate::error::ApiResult;
use crate::services::registration::{registration_options, RegistrationOptions};
use crate::services::{submit_registration, RegistrationForm};
use crate::AppState;

/// GET /api/registration/options
pub async fn get_options() -> Json<RegistrationOptions> {
    Json(registration_options())
}

/// POST /api/registration
///
/// Returns the stored center, always pending approval.
pub async fn register_center(
    State(state): State<AppState>,
    Json(form): Json<RegistrationForm>,
) -> ApiResult<(StatusCode, Json<Center>)> {
    let center = submit_registration(state.store.as_ref(), form).await?;
    Ok((StatusCode::CREATED, Json(center)))
}
