use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use shared::{
    responses::{ApiResponse, EmptyApiResponse},
    types::Farmacy,
};
use uuid::Uuid;

use crate::{
    api::state::DataServiceAppState,
    domain::farmacy::{CreateFarmacy, UpdateFarmacy},
    error::DataServiceError,
};

#[utoipa::path(
    get,
    path = "/api/v1/farmacies",
    tag = "Farmacies",
    operation_id = "list_farmacies",
    responses(
        (status = 200, description = "List all farmacies", body = ApiResponse<Vec<Farmacy>>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn find_all(
    State(state): State<Arc<DataServiceAppState>>,
) -> Result<Json<ApiResponse<Vec<Farmacy>>>, DataServiceError> {
    let output = state.farmacy_repo.find_all().await?;

    Ok(Json(ApiResponse::ok(output)))
}

#[utoipa::path(
    get,
    path = "/api/v1/farmacies/{id}",
    tag = "Farmacies",
    operation_id = "get_farmacy",
    params(
        ("id" = Uuid, Path, description = "Farmacy ID")
    ),
    responses(
        (status = 200, description = "Farmacy found", body = ApiResponse<Farmacy>),
        (status = 404, description = "Farmacy not found")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn find_by_id(
    State(state): State<Arc<DataServiceAppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Farmacy>>, DataServiceError> {
    let output = state.farmacy_repo.find_by_id(id).await?;

    match output {
        Some(f) => Ok(Json(ApiResponse::ok(f))),
        None => Err(DataServiceError::NotFound("Farmacy not found".to_string())),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/farmacies",
    tag = "Farmacies",
    operation_id = "create_farmacy",
    request_body = CreateFarmacy,
    responses(
        (status = 200, description = "Farmacy created", body = ApiResponse<Farmacy>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn create(
    State(state): State<Arc<DataServiceAppState>>,
    Json(farmacy): Json<CreateFarmacy>,
) -> Result<Json<ApiResponse<Farmacy>>, DataServiceError> {
    if farmacy.name.trim().is_empty() {
        return Err(DataServiceError::BadRequest(
            "Name must not be empty".into(),
        ));
    }
    let output = state.farmacy_repo.create(farmacy).await?;

    Ok(Json(ApiResponse::ok(output)))
}

#[utoipa::path(
    post,
    path = "/api/v1/farmacies/batch",
    tag = "Farmacies",
    operation_id = "batch_create_farmacies",
    request_body = Vec<CreateFarmacy>,
    responses(
        (status = 200, description = "Farmacies batch created", body = ApiResponse<Vec<Farmacy>>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn batch_create(
    State(state): State<Arc<DataServiceAppState>>,
    Json(farmacies): Json<Vec<CreateFarmacy>>,
) -> Result<Json<ApiResponse<Vec<Farmacy>>>, DataServiceError> {
    let output = state.farmacy_repo.batch_create(farmacies).await?;

    Ok(Json(ApiResponse::ok(output)))
}

#[utoipa::path(
    put,
    path = "/api/v1/farmacies/{id}",
    tag = "Farmacies",
    operation_id = "update_farmacy",
    params(
        ("id" = Uuid, Path, description = "Farmacy ID")
    ),
    request_body = UpdateFarmacy,
    responses(
        (status = 200, description = "Farmacy updated", body = ApiResponse<Farmacy>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn update(
    State(state): State<Arc<DataServiceAppState>>,
    Path(id): Path<Uuid>,
    Json(farmacy): Json<UpdateFarmacy>,
) -> Result<Json<ApiResponse<Farmacy>>, DataServiceError> {
    let output = state.farmacy_repo.update(id, farmacy).await?;

    Ok(Json(ApiResponse::ok(output)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/farmacies/{id}",
    tag = "Farmacies",
    operation_id = "delete_farmacy",
    params(
        ("id" = Uuid, Path, description = "Farmacy ID")
    ),
    responses(
        (status = 200, description = "Farmacy deleted", body = EmptyApiResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<DataServiceAppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, DataServiceError> {
    state.farmacy_repo.delete(id).await?;

    Ok(Json(ApiResponse::ok(())))
}
