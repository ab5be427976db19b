use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::context::RequestContext;
use crate::api::dtos::requests::{CategoryRequest, PatchCategoryRequest};
use crate::domain::models::category::CategoryFields;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> Result<impl IntoResponse, AppError> {
    let categories = state.category_repo.list(ctx.tenant).await?;
    Ok(Json(categories))
}

pub async fn create_category(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Json(payload): Json<CategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let fields = payload.into_fields();
    fields.validate()?;

    let created = state.category_repo.create(ctx.tenant, &fields).await?;
    info!(user_id = ctx.user.id, "Created category {} for tenant {}", created.id, ctx.tenant.id());
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_category(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(category_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let category = state.category_repo.find_by_id(ctx.tenant, category_id).await?
        .ok_or(AppError::NotFound("Category"))?;
    Ok(Json(category))
}

pub async fn update_category(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(category_id): Path<i64>,
    Json(payload): Json<CategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let fields = payload.into_fields();
    fields.validate()?;

    let updated = state.category_repo.update(ctx.tenant, category_id, &fields).await?;
    info!("Updated category {}", updated.id);
    Ok(Json(updated))
}

pub async fn patch_category(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(category_id): Path<i64>,
    Json(payload): Json<PatchCategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let existing = state.category_repo.find_by_id(ctx.tenant, category_id).await?
        .ok_or(AppError::NotFound("Category"))?;

    let mut fields = CategoryFields::from(&existing);
    payload.apply(&mut fields)?;
    fields.validate()?;

    let updated = state.category_repo.update(ctx.tenant, category_id, &fields).await?;
    info!("Patched category {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(category_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.category_repo.delete(ctx.tenant, category_id).await?;
    info!("Deleted category {}", category_id);
    Ok(StatusCode::NO_CONTENT)
}
