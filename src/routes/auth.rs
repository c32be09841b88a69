// Placeholder auth and dashboard endpoints. Sign-in itself happens at the
// hosted identity provider; these only hand the client what it needs to get there.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    session::{CurrentUser, SessionUser},
    AppState,
};

#[derive(Deserialize, Debug, Default)]
pub struct AuthPageQuery {
    message: Option<String>,
    next: Option<String>,
    error: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthPageResponse {
    page: &'static str,
    provider_url: Option<String>,
    message: Option<String>,
    error: Option<String>,
    next: String,
}

#[derive(Serialize)]
struct DashboardResponse {
    user: SessionUser,
}

fn auth_page(page: &'static str, app_state: &AppState, query: AuthPageQuery) -> AuthPageResponse {
    AuthPageResponse {
        page,
        provider_url: app_state
            .settings
            .supabase_url
            .as_ref()
            .map(|url| format!("{}/auth/v1", url.trim_end_matches('/'))),
        message: query.message,
        error: query.error,
        // Only same-site paths are honoured as post-login targets
        next: query
            .next
            .filter(|next| next.starts_with('/') && !next.starts_with("//"))
            .unwrap_or_else(|| "/".to_string()),
    }
}

pub async fn signin_page(
    State(app_state): State<AppState>,
    Query(query): Query<AuthPageQuery>,
) -> impl IntoResponse {
    tracing::info!("[HANDLER] /auth/signin - Request received.");
    Json(auth_page("signin", &app_state, query))
}

pub async fn signup_page(
    State(app_state): State<AppState>,
    Query(query): Query<AuthPageQuery>,
) -> impl IntoResponse {
    tracing::info!("[HANDLER] /auth/signup - Request received.");
    Json(auth_page("signup", &app_state, query))
}

pub async fn dashboard(CurrentUser(user): CurrentUser) -> Result<impl IntoResponse, AppError> {
    // The route gate redirects anonymous visitors before they get here
    let user = user.ok_or_else(|| AppError::Unauthorized("Please sign in to access this page.".into()))?;
    tracing::info!("[HANDLER] /dashboard - Request received for user: {}", user.id);
    Ok(Json(DashboardResponse { user }))
}
