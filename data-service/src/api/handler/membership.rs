use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::{
    responses::ApiResponse,
    types::{Employee, Farmacy},
};
use uuid::Uuid;

use crate::{
    api::state::DataServiceAppState, domain::membership::AddMembership,
    error::DataServiceError,
};

#[derive(Deserialize)]
pub struct AddMemberRequest {
    pub employee_id: Uuid,
}

pub async fn add_member(
    State(state): State<Arc<DataServiceAppState>>,
    Path(farmacy_id): Path<Uuid>,
    Json(employee): Json<AddMemberRequest>,
) -> Result<Json<ApiResponse<()>>, DataServiceError> {
    state
        .membership_repo
        .add_employee_to_farmacy(farmacy_id, employee.employee_id)
        .await?;

    Ok(Json(ApiResponse::ok(())))
}

pub async fn remove_member(
    State(state): State<Arc<DataServiceAppState>>,
    Path((farmacy_id, employee_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<()>>, DataServiceError> {
    state
        .membership_repo
        .remove_employee_from_farmacy(farmacy_id, employee_id)
        .await?;

    Ok(Json(ApiResponse::ok(())))
}

pub async fn get_farmacy_employees(
    State(state): State<Arc<DataServiceAppState>>,
    Path(farmacy_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Employee>>>, DataServiceError> {
    let output = state
        .membership_repo
        .get_farmacy_employees(farmacy_id)
        .await?;

    Ok(Json(ApiResponse::ok(output)))
}

pub async fn get_employee_farmacies(
    State(state): State<Arc<DataServiceAppState>>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Farmacy>>>, DataServiceError> {
    let output = state
        .membership_repo
        .get_employee_farmacies(employee_id)
        .await?;

    Ok(Json(ApiResponse::ok(output)))
}

pub async fn batch_add_members(
    State(state): State<Arc<DataServiceAppState>>,
    Json(memberships): Json<Vec<AddMembership>>,
) -> Result<Json<ApiResponse<()>>, DataServiceError> {
    state.membership_repo.batch_add_members(memberships).await?;

    Ok(Json(ApiResponse::ok(())))
}
