//! Session routes
//!
//! Login takes a name and email and starts a local session; there are no
//! passwords.

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use adafit_shared::validation::{validate_email, validate_name};
use adafit_shared::{LoginRequest, Session, User, UserUpdate};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(get_session))
        .route("/user", patch(update_user))
}

/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<User>> {
    validate_name(&req.name).map_err(|msg| ApiError::validation("name", msg))?;
    validate_email(&req.email).map_err(|msg| ApiError::validation("email", msg))?;

    let user = state.sessions.lock().await.login(&req.name, &req.email)?;
    Ok(Json(user))
}

/// POST /api/auth/logout
async fn logout(State(state): State<AppState>) -> ApiResult<StatusCode> {
    state.sessions.lock().await.logout()?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/auth/session - current session, authenticated or not
async fn get_session(State(state): State<AppState>) -> Json<Session> {
    Json(state.sessions.lock().await.session().clone())
}

/// PATCH /api/auth/user (requires a session)
async fn update_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(update): Json<UserUpdate>,
) -> ApiResult<Json<User>> {
    if let Some(name) = &update.name {
        validate_name(name).map_err(|msg| ApiError::validation("name", msg))?;
    }
    if let Some(email) = &update.email {
        validate_email(email).map_err(|msg| ApiError::validation("email", msg))?;
    }

    let mut sessions = state.sessions.lock().await;
    let user = sessions
        .update_user(update)?
        .cloned()
        .ok_or_else(ApiError::login_required)?;
    Ok(Json(user))
}
