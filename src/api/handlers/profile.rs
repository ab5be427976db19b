use axum::{response::IntoResponse, Json};
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::responses::ProfileResponse;

pub async fn get_profile(AuthUser(user): AuthUser) -> impl IntoResponse {
    Json(ProfileResponse::from(user))
}
