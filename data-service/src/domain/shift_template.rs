use async_trait::async_trait;
use serde::Deserialize;
use shared::types::{ShiftKind, ShiftTemplate, ShiftValidity};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::DataServiceError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateShiftTemplate {
    pub id: String,
    pub name: String,
    pub start_minute: i32,
    pub end_minute: i32,
    pub duration_hours: f64,
    pub kind: ShiftKind,
    pub validity: ShiftValidity,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateShiftTemplate {
    pub name: Option<String>,
    pub start_minute: Option<i32>,
    pub end_minute: Option<i32>,
    pub duration_hours: Option<f64>,
    pub kind: Option<ShiftKind>,
    pub validity: Option<ShiftValidity>,
}

#[cfg_attr(feature = "test-support", mockall::automock)]
#[async_trait]
pub trait ShiftTemplateRepository: Send + Sync {
    async fn find_by_id(
        &self,
        farmacy_id: Uuid,
        id: &str,
    ) -> Result<Option<ShiftTemplate>, DataServiceError>;
    async fn find_by_farmacy(&self, farmacy_id: Uuid) -> Result<Vec<ShiftTemplate>, DataServiceError>;
    async fn create(
        &self,
        farmacy_id: Uuid,
        template: CreateShiftTemplate,
    ) -> Result<ShiftTemplate, DataServiceError>;
    async fn update(
        &self,
        farmacy_id: Uuid,
        id: &str,
        template: UpdateShiftTemplate,
    ) -> Result<ShiftTemplate, DataServiceError>;
    async fn delete(&self, farmacy_id: Uuid, id: &str) -> Result<(), DataServiceError>;
}
