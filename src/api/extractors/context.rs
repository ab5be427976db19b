use axum::{
    extract::{FromRequestParts, FromRef},
    http::request::Parts,
};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::{tenant::TenantScope, user::User};
use crate::domain::services::tenant_resolver::{resolve_tenant, OVERRIDE_HEADER};
use crate::error::AppError;
use std::sync::Arc;
use tracing::Span;

/// Everything a tenant-scoped handler needs: who is calling and whose data they operate on.
pub struct RequestContext {
    pub user: User,
    pub tenant: TenantScope,
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let override_header = parts.headers.get(OVERRIDE_HEADER)
            .and_then(|v| v.to_str().ok());

        let tenant = resolve_tenant(app_state.tenant_repo.as_ref(), &user, override_header).await?;

        Span::current().record("tenant_id", tenant.id());

        Ok(RequestContext { user, tenant })
    }
}
