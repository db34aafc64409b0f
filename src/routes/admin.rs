use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::products::{ProductStatusRequest, ProductStatusResult},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/products/status", post(set_product_status))
}

#[utoipa::path(
    post,
    path = "/api/admin/products/status",
    request_body = ProductStatusRequest,
    responses(
        (status = 200, description = "List or delist products", body = ApiResponse<ProductStatusResult>),
        (status = 400, description = "Bad request"),
        (status = 403, description = "Admin only"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn set_product_status(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ProductStatusRequest>,
) -> AppResult<Json<ApiResponse<ProductStatusResult>>> {
    let resp = product_service::set_product_status(&state, &user, payload).await?;
    Ok(Json(resp))
}
