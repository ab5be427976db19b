use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use crate::state::AppState;
use crate::api::extractors::context::RequestContext;
use crate::api::dtos::{
    requests::{PaymentListQuery, PaymentRequest, PatchPaymentRequest},
    responses::PaymentResponse,
};
use crate::domain::models::{payment::PaymentFields, tenant::TenantScope};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

/// A payment may only point at a category of its own tenant.
async fn check_fields(state: &AppState, scope: TenantScope, fields: &PaymentFields) -> Result<(), AppError> {
    fields.validate()?;

    if let Some(category_id) = fields.category_id
        && state.category_repo.find_by_id(scope, category_id).await?.is_none() {
        return Err(AppError::Validation(format!(
            "categoria: invalid pk \"{}\" - object does not exist", category_id
        )));
    }
    Ok(())
}

pub async fn list_payments(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    query: Result<Query<PaymentListQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query?;
    let today = state.config.today();
    let filter = query.into_filter(today)?;

    let payments = state.payment_repo.list(ctx.tenant, &filter).await?;
    let body: Vec<PaymentResponse> = payments.into_iter()
        .map(|p| PaymentResponse::new(p, today))
        .collect();

    Ok(Json(body))
}

pub async fn create_payment(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Json(payload): Json<PaymentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let fields = payload.into_fields()?;
    check_fields(&state, ctx.tenant, &fields).await?;

    let created = state.payment_repo.create(ctx.tenant, &fields).await?;
    info!(user_id = ctx.user.id, "Created payment {} for tenant {}", created.id, ctx.tenant.id());
    Ok((StatusCode::CREATED, Json(PaymentResponse::new(created, state.config.today()))))
}

pub async fn get_payment(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(payment_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let payment = state.payment_repo.find_by_id(ctx.tenant, payment_id).await?
        .ok_or(AppError::NotFound("Payment"))?;
    Ok(Json(PaymentResponse::new(payment, state.config.today())))
}

pub async fn update_payment(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(payment_id): Path<i64>,
    Json(payload): Json<PaymentRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.payment_repo.find_by_id(ctx.tenant, payment_id).await?
        .ok_or(AppError::NotFound("Payment"))?;

    let fields = payload.into_fields()?;
    check_fields(&state, ctx.tenant, &fields).await?;

    let updated = state.payment_repo.update(ctx.tenant, payment_id, &fields).await?;
    info!("Updated payment {}", updated.id);
    Ok(Json(PaymentResponse::new(updated, state.config.today())))
}

pub async fn patch_payment(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(payment_id): Path<i64>,
    Json(payload): Json<PatchPaymentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let existing = state.payment_repo.find_by_id(ctx.tenant, payment_id).await?
        .ok_or(AppError::NotFound("Payment"))?;

    let mut fields = PaymentFields::from(&existing);
    payload.apply(&mut fields)?;
    check_fields(&state, ctx.tenant, &fields).await?;

    let updated = state.payment_repo.update(ctx.tenant, payment_id, &fields).await?;
    info!("Patched payment {}", updated.id);
    Ok(Json(PaymentResponse::new(updated, state.config.today())))
}

pub async fn delete_payment(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(payment_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.payment_repo.delete(ctx.tenant, payment_id).await?;
    info!("Deleted payment {}", payment_id);
    Ok(StatusCode::NO_CONTENT)
}
