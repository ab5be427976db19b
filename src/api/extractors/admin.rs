use axum::{
    extract::{FromRequestParts, FromRef},
    http::request::Parts,
};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::user::User;
use crate::error::AppError;
use std::sync::Arc;

/// An authenticated superuser. Anyone else is turned away with 403.
pub struct AdminUser(pub User);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_superuser {
            return Err(AppError::Forbidden("You do not have permission to perform this action".into()));
        }
        Ok(AdminUser(user))
    }
}
