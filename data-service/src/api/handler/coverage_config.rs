use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use shared::{responses::ApiResponse, types::CoverageConfig};
use uuid::Uuid;

use crate::{api::state::DataServiceAppState, error::DataServiceError};

#[utoipa::path(
    get,
    path = "/api/v1/farmacies/{farmacy_id}/coverage-config",
    tag = "CoverageConfig",
    operation_id = "get_coverage_config",
    params(
        ("farmacy_id" = Uuid, Path, description = "Farmacy ID")
    ),
    responses(
        (status = 200, description = "Coverage config for a farmacy", body = ApiResponse<CoverageConfig>),
        (status = 404, description = "No coverage config set for this farmacy")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<DataServiceAppState>>,
    Path(farmacy_id): Path<Uuid>,
) -> Result<Json<ApiResponse<CoverageConfig>>, DataServiceError> {
    let output = state.coverage_config_repo.get(farmacy_id).await?;

    match output {
        Some(row) => Ok(Json(ApiResponse::ok(row.config.0))),
        None => Err(DataServiceError::NotFound(
            "Coverage config not set for this farmacy".to_string(),
        )),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/farmacies/{farmacy_id}/coverage-config",
    tag = "CoverageConfig",
    operation_id = "upsert_coverage_config",
    params(
        ("farmacy_id" = Uuid, Path, description = "Farmacy ID")
    ),
    request_body = CoverageConfig,
    responses(
        (status = 200, description = "Coverage config upserted", body = ApiResponse<CoverageConfig>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn upsert(
    State(state): State<Arc<DataServiceAppState>>,
    Path(farmacy_id): Path<Uuid>,
    Json(config): Json<CoverageConfig>,
) -> Result<Json<ApiResponse<CoverageConfig>>, DataServiceError> {
    let output = state.coverage_config_repo.upsert(farmacy_id, config).await?;

    Ok(Json(ApiResponse::ok(output.config.0)))
}
