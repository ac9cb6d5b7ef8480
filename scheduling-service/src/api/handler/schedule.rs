use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use shared::responses::ApiResponse;
use shared::types::PinnedAssignment;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{api::state::SchedulingAppState, error::SchedulingServiceError};

#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateScheduleRequest {
    pub farmacy_id: Uuid,
    /// "YYYY-MM".
    pub month: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdjustScheduleRequest {
    pub farmacy_id: Uuid,
    pub month: String,
    #[serde(default)]
    pub pins: Vec<PinnedAssignment>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ValidateConfigurationRequest {
    pub farmacy_id: Uuid,
    pub month: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/schedules/generate",
    tag = "Schedules",
    request_body = GenerateScheduleRequest,
    responses(
        (status = 202, description = "Schedule job submitted", body = ApiResponse<shared::types::ScheduleJob>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn generate(
    State(state): State<Arc<SchedulingAppState>>,
    Json(req): Json<GenerateScheduleRequest>,
) -> Result<impl IntoResponse, SchedulingServiceError> {
    let job = state
        .scheduling_service
        .submit_generate(req.farmacy_id, req.month)
        .await?;

    Ok((StatusCode::ACCEPTED, Json(ApiResponse::ok(job))))
}

#[utoipa::path(
    post,
    path = "/api/v1/schedules/adjust",
    tag = "Schedules",
    request_body = AdjustScheduleRequest,
    responses(
        (status = 202, description = "Adjustment job submitted", body = ApiResponse<shared::types::ScheduleJob>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn adjust(
    State(state): State<Arc<SchedulingAppState>>,
    Json(req): Json<AdjustScheduleRequest>,
) -> Result<impl IntoResponse, SchedulingServiceError> {
    let job = state
        .scheduling_service
        .submit_adjust(req.farmacy_id, req.month, req.pins)
        .await?;

    Ok((StatusCode::ACCEPTED, Json(ApiResponse::ok(job))))
}

#[utoipa::path(
    get,
    path = "/api/v1/schedules/{schedule_id}/status",
    tag = "Schedules",
    params(
        ("schedule_id" = Uuid, Path, description = "Schedule job ID")
    ),
    responses(
        (status = 200, description = "Schedule job status", body = ApiResponse<shared::types::ScheduleJob>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_status(
    State(state): State<Arc<SchedulingAppState>>,
    Path(schedule_id): Path<Uuid>,
) -> Result<Json<ApiResponse<shared::types::ScheduleJob>>, SchedulingServiceError> {
    let job = state.scheduling_service.get_status(schedule_id).await?;

    Ok(Json(ApiResponse::ok(job)))
}

#[utoipa::path(
    get,
    path = "/api/v1/schedules/{schedule_id}/result",
    tag = "Schedules",
    params(
        ("schedule_id" = Uuid, Path, description = "Schedule job ID")
    ),
    responses(
        (status = 200, description = "Schedule result with shift assignments", body = ApiResponse<shared::types::ScheduleResult>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_result(
    State(state): State<Arc<SchedulingAppState>>,
    Path(schedule_id): Path<Uuid>,
) -> Result<Json<ApiResponse<shared::types::ScheduleResult>>, SchedulingServiceError> {
    let output = state.scheduling_service.get_result(schedule_id).await?;

    Ok(Json(ApiResponse::ok(output)))
}

#[utoipa::path(
    post,
    path = "/api/v1/schedules/validate",
    tag = "Schedules",
    request_body = ValidateConfigurationRequest,
    responses(
        (status = 200, description = "Advisory feasibility report", body = ApiResponse<shared::types::ValidationReport>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn validate(
    State(state): State<Arc<SchedulingAppState>>,
    Json(req): Json<ValidateConfigurationRequest>,
) -> Result<Json<ApiResponse<shared::types::ValidationReport>>, SchedulingServiceError> {
    let report = state
        .scheduling_service
        .validate(req.farmacy_id, req.month)
        .await?;

    Ok(Json(ApiResponse::ok(report)))
}
