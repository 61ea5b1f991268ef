//! User profile API routes

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use adafit_shared::{profile_completeness, ProfileSection, UserProfile};
use axum::{
    extract::{Path, State},
    routing::{get, patch, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

/// Create profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile).put(replace_profile))
        .route("/:section", patch(update_section))
        .route("/complete-wizard", post(complete_wizard))
        .route("/reset", post(reset_profile))
        .route("/completeness", get(get_completeness))
}

/// Completeness score response
#[derive(Debug, Serialize)]
pub struct CompletenessResponse {
    pub score: u32,
}

/// GET /api/profile
async fn get_profile(State(state): State<AppState>) -> Json<UserProfile> {
    Json(state.profiles.lock().await.profile().clone())
}

/// PUT /api/profile - top-level merge
async fn replace_profile(
    State(state): State<AppState>,
    Json(partial): Json<Value>,
) -> ApiResult<Json<UserProfile>> {
    let mut profiles = state.profiles.lock().await;
    Ok(Json(profiles.replace(partial)?.clone()))
}

/// PATCH /api/profile/:section - shallow merge into one section
async fn update_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
    Json(patch): Json<Value>,
) -> ApiResult<Json<UserProfile>> {
    let section: ProfileSection = section.parse().map_err(ApiError::NotFound)?;
    let mut profiles = state.profiles.lock().await;
    Ok(Json(profiles.update_section(section, patch)?.clone()))
}

/// POST /api/profile/complete-wizard
async fn complete_wizard(State(state): State<AppState>) -> ApiResult<Json<UserProfile>> {
    let mut profiles = state.profiles.lock().await;
    Ok(Json(profiles.complete_wizard()?.clone()))
}

/// POST /api/profile/reset
async fn reset_profile(State(state): State<AppState>) -> ApiResult<Json<UserProfile>> {
    let mut profiles = state.profiles.lock().await;
    Ok(Json(profiles.reset()?.clone()))
}

/// GET /api/profile/completeness
async fn get_completeness(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Json<CompletenessResponse> {
    let profiles = state.profiles.lock().await;
    Json(CompletenessResponse {
        score: profile_completeness(profiles.profile(), Some(&auth.user)),
    })
}
