use async_trait::async_trait;
use serde::Deserialize;
use shared::types::Farmacy;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::DataServiceError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFarmacy {
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateFarmacy {
    pub name: Option<String>,
}

#[cfg_attr(feature = "test-support", mockall::automock)]
#[async_trait]
pub trait FarmacyRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Farmacy>, DataServiceError>;
    async fn find_all(&self) -> Result<Vec<Farmacy>, DataServiceError>;
    async fn create(&self, farmacy: CreateFarmacy) -> Result<Farmacy, DataServiceError>;
    async fn batch_create(
        &self,
        farmacies: Vec<CreateFarmacy>,
    ) -> Result<Vec<Farmacy>, DataServiceError>;
    async fn update(&self, id: Uuid, farmacy: UpdateFarmacy) -> Result<Farmacy, DataServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), DataServiceError>;
}
