use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use shared::{
    responses::{ApiResponse, EmptyApiResponse},
    types::Employee,
};
use uuid::Uuid;

use crate::{
    api::state::DataServiceAppState,
    domain::employee::{CreateEmployee, UpdateEmployee},
    error::DataServiceError,
};

#[utoipa::path(
    get,
    path = "/api/v1/employees",
    tag = "Employees",
    operation_id = "list_employees",
    responses(
        (status = 200, description = "List all employees", body = ApiResponse<Vec<Employee>>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn find_all(
    State(state): State<Arc<DataServiceAppState>>,
) -> Result<Json<ApiResponse<Vec<Employee>>>, DataServiceError> {
    let output = state.employee_repo.find_all().await?;
    Ok(Json(ApiResponse::ok(output)))
}

#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    tag = "Employees",
    operation_id = "get_employee",
    params(
        ("id" = Uuid, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = ApiResponse<Employee>),
        (status = 404, description = "Employee not found")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn find_by_id(
    State(state): State<Arc<DataServiceAppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Employee>>, DataServiceError> {
    let output = state.employee_repo.find_by_id(id).await?;

    match output {
        Some(e) => Ok(Json(ApiResponse::ok(e))),
        None => Err(DataServiceError::NotFound("Employee not found".to_string())),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/employees",
    tag = "Employees",
    operation_id = "create_employee",
    request_body = CreateEmployee,
    responses(
        (status = 200, description = "Employee created", body = ApiResponse<Employee>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn create(
    State(state): State<Arc<DataServiceAppState>>,
    Json(employee): Json<CreateEmployee>,
) -> Result<Json<ApiResponse<Employee>>, DataServiceError> {
    validate_create_caps(&employee)?;
    let output = state.employee_repo.create(employee).await?;

    Ok(Json(ApiResponse::ok(output)))
}

#[utoipa::path(
    post,
    path = "/api/v1/employees/batch",
    tag = "Employees",
    operation_id = "batch_create_employees",
    request_body = Vec<CreateEmployee>,
    responses(
        (status = 200, description = "Employees batch created", body = ApiResponse<Vec<Employee>>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn batch_create(
    State(state): State<Arc<DataServiceAppState>>,
    Json(employees): Json<Vec<CreateEmployee>>,
) -> Result<Json<ApiResponse<Vec<Employee>>>, DataServiceError> {
    for employee in &employees {
        validate_create_caps(employee)?;
    }
    let output = state.employee_repo.batch_create(employees).await?;

    Ok(Json(ApiResponse::ok(output)))
}

#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    tag = "Employees",
    operation_id = "update_employee",
    params(
        ("id" = Uuid, Path, description = "Employee ID")
    ),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = ApiResponse<Employee>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn update(
    State(state): State<Arc<DataServiceAppState>>,
    Path(id): Path<Uuid>,
    Json(employee): Json<UpdateEmployee>,
) -> Result<Json<ApiResponse<Employee>>, DataServiceError> {
    validate_update_caps(&employee)?;
    let output = state.employee_repo.update(id, employee).await?;

    Ok(Json(ApiResponse::ok(output)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/employees/{id}/deactivate",
    tag = "Employees",
    operation_id = "deactivate_employee",
    params(
        ("id" = Uuid, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee deactivated", body = EmptyApiResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn deactivate(
    State(state): State<Arc<DataServiceAppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, DataServiceError> {
    state.employee_repo.deactivate(id).await?;

    Ok(Json(ApiResponse::ok(())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    tag = "Employees",
    operation_id = "delete_employee",
    params(
        ("id" = Uuid, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee deleted", body = EmptyApiResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<DataServiceAppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, DataServiceError> {
    state.employee_repo.delete(id).await?;

    Ok(Json(ApiResponse::ok(())))
}

/// spec.md §7: negative caps are an Input error, rejected before the
/// repository is ever touched.
fn validate_create_caps(employee: &CreateEmployee) -> Result<(), DataServiceError> {
    validate_caps(
        employee.max_daily_hours,
        employee.max_weekly_hours,
        employee.max_monthly_hours,
    )
}

fn validate_update_caps(employee: &UpdateEmployee) -> Result<(), DataServiceError> {
    validate_caps(
        employee.max_daily_hours.unwrap_or(0),
        employee.max_weekly_hours.unwrap_or(0),
        employee.max_monthly_hours.unwrap_or(0),
    )
}

fn validate_caps(max_daily: i32, max_weekly: i32, max_monthly: i32) -> Result<(), DataServiceError> {
    if max_daily < 0 || max_weekly < 0 || max_monthly < 0 {
        return Err(DataServiceError::BadRequest(
            "Daily/weekly/monthly hour caps must be non-negative".into(),
        ));
    }
    Ok(())
}
