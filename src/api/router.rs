use axum::{
    body::Body,
    extract::Request,
    http::Response,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{category, health, payment, profile, tenant};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{debug, error, info, info_span, Span};
use uuid::Uuid;

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Payments
        .route("/pagamentos/", get(payment::list_payments).post(payment::create_payment))
        .route(
            "/pagamentos/{id}/",
            get(payment::get_payment)
                .put(payment::update_payment)
                .patch(payment::patch_payment)
                .delete(payment::delete_payment),
        )

        // Categories
        .route("/categorias/", get(category::list_categories).post(category::create_category))
        .route(
            "/categorias/{id}/",
            get(category::get_category)
                .put(category::update_category)
                .patch(category::patch_category)
                .delete(category::delete_category),
        )

        // Administration
        .route("/admin/clientes/", get(tenant::list_tenants))
        .route("/admin/clientes/{id}/", get(tenant::get_tenant))

        // Profile
        .route("/profile/", get(profile::get_profile))
}

/// Root span for a request. `tenant_id` and `user_id` are filled in by the extractors.
fn request_span(request: &Request<Body>) -> Span {
    info_span!(
        "http_request",
        request_id = %Uuid::new_v4(),
        method = %request.method(),
        path = %request.uri().path(),
        tenant_id = tracing::field::Empty,
        user_id = tracing::field::Empty,
    )
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(request_span)
        .on_request(|_request: &Request<Body>, _span: &Span| {
            debug!("request received");
        })
        .on_response(|response: &Response<Body>, latency: Duration, _span: &Span| {
            info!(
                status = response.status().as_u16(),
                latency_ms = latency.as_millis(),
                "request completed"
            );
        })
        .on_failure(|failure: ServerErrorsFailureClass, latency: Duration, _span: &Span| {
            error!(latency_ms = latency.as_millis(), "request failed: {}", failure);
        });

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
        .layer(trace)
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
