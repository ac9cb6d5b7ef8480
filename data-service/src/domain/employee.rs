use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use shared::types::{Employee, EmployeeStatus};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::DataServiceError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEmployee {
    pub name: String,
    pub email: String,
    pub max_daily_hours: i32,
    pub max_weekly_hours: i32,
    pub max_monthly_hours: i32,
    #[serde(default)]
    pub personal_holidays: Vec<NaiveDate>,
    #[serde(default)]
    pub favorite_shifts: Vec<String>,
    #[serde(default)]
    pub preferred_days_off: Vec<i16>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub email: Option<String>,
    pub status: Option<EmployeeStatus>,
    pub max_daily_hours: Option<i32>,
    pub max_weekly_hours: Option<i32>,
    pub max_monthly_hours: Option<i32>,
    pub personal_holidays: Option<Vec<NaiveDate>>,
    pub favorite_shifts: Option<Vec<String>>,
    pub preferred_days_off: Option<Vec<i16>>,
}

#[cfg_attr(feature = "test-support", mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, DataServiceError>;
    async fn find_all(&self) -> Result<Vec<Employee>, DataServiceError>;
    async fn create(&self, employee: CreateEmployee) -> Result<Employee, DataServiceError>;
    async fn batch_create(
        &self,
        employees: Vec<CreateEmployee>,
    ) -> Result<Vec<Employee>, DataServiceError>;
    async fn update(&self, id: Uuid, employee: UpdateEmployee)
    -> Result<Employee, DataServiceError>;
    async fn deactivate(&self, id: Uuid) -> Result<(), DataServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), DataServiceError>;
}
