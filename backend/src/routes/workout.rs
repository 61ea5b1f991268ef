//! Workout plan and workout builder routes

use crate::error::ApiResult;
use crate::services::RecommendationService;
use crate::state::AppState;
use adafit_shared::{
    BuilderWorkout, RecommendationBundle, WorkoutBuilderRequest, WorkoutPlanRequest,
};
use axum::{extract::State, routing::post, Json, Router};

/// Merged at the API root
pub fn workout_routes() -> Router<AppState> {
    Router::new()
        .route("/workout-plan", post(create_workout_plan))
        .route("/workout-builder", post(build_workout))
}

/// POST /api/workout-plan
async fn create_workout_plan(
    State(state): State<AppState>,
    Json(req): Json<WorkoutPlanRequest>,
) -> ApiResult<Json<RecommendationBundle>> {
    let bundle = RecommendationService::generate(&state, req).await?;
    Ok(Json(bundle))
}

/// POST /api/workout-builder
async fn build_workout(
    State(state): State<AppState>,
    Json(req): Json<WorkoutBuilderRequest>,
) -> Json<BuilderWorkout> {
    Json(RecommendationService::build_workout(&state, req).await)
}
