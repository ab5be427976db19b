use axum::{
    extract::{FromRequestParts, FromRef},
    http::{header, request::Parts, Method},
};
use crate::state::AppState;
use crate::domain::services::auth_service::AuthService;
use crate::domain::models::user::User;
use crate::error::AppError;
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::Span;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// The authenticated principal, loaded fresh from storage on every request.
pub struct AuthUser(pub User);

enum TokenSource {
    Bearer(String),
    Cookie(String),
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts.headers.get(header::AUTHORIZATION)?
        .to_str().ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
}

fn token_source(parts: &Parts) -> Option<TokenSource> {
    if let Some(token) = bearer_token(parts) {
        return Some(TokenSource::Bearer(token));
    }
    parts.extensions.get::<Cookies>()
        .and_then(|cookies| cookies.get(ACCESS_TOKEN_COOKIE))
        .map(|cookie| TokenSource::Cookie(cookie.value().to_string()))
}

fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let source = token_source(parts).ok_or(AppError::Unauthorized)?;
        let (token, via_cookie) = match source {
            TokenSource::Bearer(t) => (t, false),
            TokenSource::Cookie(t) => (t, true),
        };

        let claims = app_state.auth_service.verify(&token)?;

        // Cookies ride along automatically, so unsafe methods must echo the CSRF claim.
        if via_cookie && !is_safe_method(&parts.method) {
            let sent = parts.headers.get(CSRF_HEADER)
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| AppError::Forbidden("CSRF token missing".into()))?;

            if claims.csrf.as_deref() != Some(sent) {
                return Err(AppError::Forbidden("CSRF token mismatch".into()));
            }
        }

        let user_id = AuthService::user_id(&claims)?;
        let user = app_state.user_repo.find_by_id(user_id).await?
            .filter(|u| u.is_active)
            .ok_or(AppError::Unauthorized)?;

        Span::current().record("user_id", user.id);

        Ok(AuthUser(user))
    }
}
