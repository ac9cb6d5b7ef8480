use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use shared::{
    responses::{ApiResponse, EmptyApiResponse},
    types::ShiftTemplate,
};
use uuid::Uuid;

use crate::{
    api::state::DataServiceAppState,
    domain::shift_template::{CreateShiftTemplate, UpdateShiftTemplate},
    error::DataServiceError,
};

#[utoipa::path(
    get,
    path = "/api/v1/farmacies/{farmacy_id}/shift-templates",
    tag = "ShiftTemplates",
    operation_id = "list_shift_templates",
    params(
        ("farmacy_id" = Uuid, Path, description = "Farmacy ID")
    ),
    responses(
        (status = 200, description = "List a farmacy's shift templates", body = ApiResponse<Vec<ShiftTemplate>>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn find_by_farmacy(
    State(state): State<Arc<DataServiceAppState>>,
    Path(farmacy_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ShiftTemplate>>>, DataServiceError> {
    let output = state.shift_template_repo.find_by_farmacy(farmacy_id).await?;

    Ok(Json(ApiResponse::ok(output)))
}

#[utoipa::path(
    get,
    path = "/api/v1/farmacies/{farmacy_id}/shift-templates/{id}",
    tag = "ShiftTemplates",
    operation_id = "get_shift_template",
    params(
        ("farmacy_id" = Uuid, Path, description = "Farmacy ID"),
        ("id" = String, Path, description = "Shift template ID")
    ),
    responses(
        (status = 200, description = "Shift template found", body = ApiResponse<ShiftTemplate>),
        (status = 404, description = "Shift template not found")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn find_by_id(
    State(state): State<Arc<DataServiceAppState>>,
    Path((farmacy_id, id)): Path<(Uuid, String)>,
) -> Result<Json<ApiResponse<ShiftTemplate>>, DataServiceError> {
    let output = state
        .shift_template_repo
        .find_by_id(farmacy_id, &id)
        .await?;

    match output {
        Some(t) => Ok(Json(ApiResponse::ok(t))),
        None => Err(DataServiceError::NotFound(
            "Shift template not found".to_string(),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/farmacies/{farmacy_id}/shift-templates",
    tag = "ShiftTemplates",
    operation_id = "create_shift_template",
    params(
        ("farmacy_id" = Uuid, Path, description = "Farmacy ID")
    ),
    request_body = CreateShiftTemplate,
    responses(
        (status = 200, description = "Shift template created", body = ApiResponse<ShiftTemplate>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn create(
    State(state): State<Arc<DataServiceAppState>>,
    Path(farmacy_id): Path<Uuid>,
    Json(template): Json<CreateShiftTemplate>,
) -> Result<Json<ApiResponse<ShiftTemplate>>, DataServiceError> {
    let output = state
        .shift_template_repo
        .create(farmacy_id, template)
        .await?;

    Ok(Json(ApiResponse::ok(output)))
}

#[utoipa::path(
    put,
    path = "/api/v1/farmacies/{farmacy_id}/shift-templates/{id}",
    tag = "ShiftTemplates",
    operation_id = "update_shift_template",
    params(
        ("farmacy_id" = Uuid, Path, description = "Farmacy ID"),
        ("id" = String, Path, description = "Shift template ID")
    ),
    request_body = UpdateShiftTemplate,
    responses(
        (status = 200, description = "Shift template updated", body = ApiResponse<ShiftTemplate>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn update(
    State(state): State<Arc<DataServiceAppState>>,
    Path((farmacy_id, id)): Path<(Uuid, String)>,
    Json(template): Json<UpdateShiftTemplate>,
) -> Result<Json<ApiResponse<ShiftTemplate>>, DataServiceError> {
    let output = state
        .shift_template_repo
        .update(farmacy_id, &id, template)
        .await?;

    Ok(Json(ApiResponse::ok(output)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/farmacies/{farmacy_id}/shift-templates/{id}",
    tag = "ShiftTemplates",
    operation_id = "delete_shift_template",
    params(
        ("farmacy_id" = Uuid, Path, description = "Farmacy ID"),
        ("id" = String, Path, description = "Shift template ID")
    ),
    responses(
        (status = 200, description = "Shift template deleted", body = EmptyApiResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<DataServiceAppState>>,
    Path((farmacy_id, id)): Path<(Uuid, String)>,
) -> Result<Json<ApiResponse<()>>, DataServiceError> {
    state.shift_template_repo.delete(farmacy_id, &id).await?;

    Ok(Json(ApiResponse::ok(())))
}
