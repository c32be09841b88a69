use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    RequestPartsExt,
};
use axum_extra::{extract::CookieJar, TypedHeader};
use headers::{authorization::Bearer, Authorization};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tracing::{debug, warn};

use crate::{config::Settings, AppState};

// Audience the hosted identity provider stamps on signed-in user tokens.
const SESSION_AUDIENCE: &str = "authenticated";
const SIGN_IN_PATH: &str = "/auth/signin";
const SIGN_UP_PATH: &str = "/auth/signup";
const SIGNED_IN_HOME: &str = "/dashboard";

// --- Claims ---

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (User ID)
    pub aud: String,
    pub exp: usize, // Expiration time (seconds since epoch)
    pub email: Option<String>,
    pub role: Option<String>,
}

/// The signed-in user, if any, for the current request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub id: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

// --- Token Verification ---

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[SESSION_AUDIENCE]);

    let decoded = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)?;
    Ok(decoded.claims)
}

/// Resolves the session from the bearer header or the session cookie.
/// Anything missing or invalid yields an anonymous session.
fn resolve_session(bearer: Option<&str>, jar: &CookieJar, settings: &Settings) -> Option<SessionUser> {
    let Some(secret) = settings.supabase_jwt_secret.as_deref() else {
        debug!("No JWT secret configured, treating request as anonymous");
        return None;
    };

    let token = bearer
        .map(str::to_string)
        .or_else(|| jar.get(&settings.session_cookie).map(|c| c.value().to_string()))?;

    match verify_token(&token, secret) {
        Ok(claims) => {
            debug!("Session resolved for user: {}", claims.sub);
            Some(SessionUser {
                id: claims.sub,
                email: claims.email,
                role: claims.role,
            })
        }
        Err(e) => {
            warn!("Session token rejected: {}", e);
            None
        }
    }
}

// --- Axum Extractor ---

/// Handler-facing session context. Never rejects; anonymous requests carry `None`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<SessionUser>);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // The gate middleware may already have resolved it
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let app_state = AppState::from_ref(state);
        let bearer = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .ok()
            .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string());
        let jar = CookieJar::from_headers(&parts.headers);

        Ok(CurrentUser(resolve_session(bearer.as_deref(), &jar, &app_state.settings)))
    }
}

// --- Route Gate ---

/// Sends anonymous visitors of protected routes to sign-in, and signed-in
/// users away from the sign-in/sign-up pages.
pub async fn route_gate(State(app_state): State<AppState>, request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();
    let Ok(user) = CurrentUser::from_request_parts(&mut parts, &app_state).await;
    let path = parts.uri.path().to_string();

    if let Some(target) = gate_redirect(&path, user.0.as_ref(), &app_state.settings.protected_routes) {
        debug!("[GATE] {} -> {}", path, target);
        return Redirect::to(&target).into_response();
    }

    parts.extensions.insert(user);
    next.run(Request::from_parts(parts, body)).await
}

pub fn gate_redirect(path: &str, user: Option<&SessionUser>, protected_routes: &[String]) -> Option<String> {
    match user {
        None if protected_routes.iter().any(|route| path.starts_with(route.as_str())) => {
            let mut query = vec![("message", "Please sign in to access this page.")];
            if path != "/" {
                query.push(("next", path));
            }
            match serde_urlencoded::to_string(&query) {
                Ok(encoded) => Some(format!("{}?{}", SIGN_IN_PATH, encoded)),
                Err(e) => {
                    warn!("Failed to encode sign-in redirect for {}: {}", path, e);
                    Some(SIGN_IN_PATH.to_string())
                }
            }
        }
        Some(_) if path.starts_with(SIGN_IN_PATH) || path.starts_with(SIGN_UP_PATH) => {
            Some(SIGNED_IN_HOME.to_string())
        }
        _ => None,
    }
}
