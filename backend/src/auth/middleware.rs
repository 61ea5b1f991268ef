//! Session guard
//!
//! Provides the [`AuthUser`] extractor and a middleware that rejects
//! requests while nobody is logged in.

use crate::error::ApiError;
use crate::state::AppState;
use adafit_shared::User;
use axum::{
    extract::{FromRef, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

/// User of the current session
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let sessions = app_state.sessions.lock().await;
        let user = sessions
            .session()
            .user()
            .cloned()
            .ok_or_else(ApiError::login_required)?;
        Ok(AuthUser { user })
    }
}

/// Middleware for route groups that need a logged-in user
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.sessions.lock().await.session().is_authenticated() {
        return Err(ApiError::login_required());
    }
    Ok(next.run(request).await)
}
