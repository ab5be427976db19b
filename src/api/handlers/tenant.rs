use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::admin::AdminUser;
use crate::error::AppError;
use std::sync::Arc;

pub async fn list_tenants(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let tenants = state.tenant_repo.list().await?;
    Ok(Json(tenants))
}

pub async fn get_tenant(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(tenant_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = state.tenant_repo.find_by_id(tenant_id).await?
        .ok_or(AppError::NotFound("Tenant"))?;
    Ok(Json(tenant))
}
