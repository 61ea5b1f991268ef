//! Coach chat routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::ChatService;
use crate::state::AppState;
use adafit_shared::chat::GREETING;
use adafit_shared::{ChatRequest, ChatResponse};
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

/// Merged at the API root; the trailing-slash path is the one clients use
pub fn today_routes() -> Router<AppState> {
    Router::new()
        .route("/today/", get(greeting).post(chat))
        .route("/today", get(greeting).post(chat))
}

/// GET /api/today/ - opening message
async fn greeting() -> Json<Value> {
    Json(json!({ "reply": GREETING }))
}

/// POST /api/today/
async fn chat(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let response = ChatService::handle(&state, &auth.user, &req.message).await?;
    Ok(Json(response))
}
