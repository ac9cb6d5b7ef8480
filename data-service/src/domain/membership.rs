use async_trait::async_trait;
use serde::Deserialize;
use shared::types::{Employee, Farmacy};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::DataServiceError;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddMembership {
    pub employee_id: Uuid,
    pub farmacy_id: Uuid,
}

#[cfg_attr(feature = "test-support", mockall::automock)]
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    async fn add_employee_to_farmacy(
        &self,
        farmacy_id: Uuid,
        employee_id: Uuid,
    ) -> Result<(), DataServiceError>;
    async fn remove_employee_from_farmacy(
        &self,
        farmacy_id: Uuid,
        employee_id: Uuid,
    ) -> Result<(), DataServiceError>;
    async fn get_farmacy_employees(&self, farmacy_id: Uuid) -> Result<Vec<Employee>, DataServiceError>;
    async fn get_employee_farmacies(&self, employee_id: Uuid) -> Result<Vec<Farmacy>, DataServiceError>;
    async fn batch_add_members(
        &self,
        memberships: Vec<AddMembership>,
    ) -> Result<(), DataServiceError>;
}
