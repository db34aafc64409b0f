use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Serialize, ToSchema)]
pub struct HealthData {
    pub status: String,
    pub database: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "OK", body = ApiResponse<HealthData>),
    ),
        tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthData>> {
    let data = match state.orm.ping().await {
        Ok(()) => HealthData {
            status: "ok".to_string(),
            database: "up".to_string(),
        },
        Err(err) => {
            tracing::warn!(error = %err, "database ping failed");
            HealthData {
                status: "degraded".to_string(),
                database: "down".to_string(),
            }
        }
    };

    Json(ApiResponse::success(
        "Health check",
        data,
        Some(Meta::none()),
    ))
}
