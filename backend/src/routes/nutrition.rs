//! Nutrition API routes

use crate::error::ApiResult;
use crate::services::NutritionService;
use crate::state::AppState;
use adafit_shared::{
    normalize, CalorieTargetRequest, MacroGrams, MacroRatios, MacrosRequest, NutritionPlan,
    RatiosQuery,
};
use axum::{
    extract::{Query, State},
    routing::{get, post, put},
    Json, Router,
};

/// Create nutrition routes
pub fn nutrition_routes() -> Router<AppState> {
    Router::new()
        .route("/plan", get(get_plan))
        .route("/macros", post(compute_macros))
        .route("/normalize", post(normalize_ratios))
        .route("/calories", put(set_calorie_target))
}

/// GET /api/nutrition/plan?p=&c=&f=
async fn get_plan(
    State(state): State<AppState>,
    Query(query): Query<RatiosQuery>,
) -> Json<NutritionPlan> {
    Json(NutritionService::plan(&state, query.ratios()).await)
}

/// POST /api/nutrition/macros
async fn compute_macros(Json(req): Json<MacrosRequest>) -> ApiResult<Json<MacroGrams>> {
    Ok(Json(NutritionService::macros(req.calorie_target, req.ratios)?))
}

/// POST /api/nutrition/normalize
async fn normalize_ratios(Json(ratios): Json<MacroRatios>) -> Json<MacroRatios> {
    Json(normalize(ratios))
}

/// PUT /api/nutrition/calories
async fn set_calorie_target(
    State(state): State<AppState>,
    Json(req): Json<CalorieTargetRequest>,
) -> ApiResult<Json<NutritionPlan>> {
    Ok(Json(
        NutritionService::set_calorie_target(&state, req.calorie_target).await?,
    ))
}
