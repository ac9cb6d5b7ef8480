use async_trait::async_trait;
use shared::types::{CoverageConfig, CoverageConfigRow};
use uuid::Uuid;

use crate::error::DataServiceError;

#[cfg_attr(feature = "test-support", mockall::automock)]
#[async_trait]
pub trait CoverageConfigRepository: Send + Sync {
    async fn get(&self, farmacy_id: Uuid) -> Result<Option<CoverageConfigRow>, DataServiceError>;
    async fn upsert(
        &self,
        farmacy_id: Uuid,
        config: CoverageConfig,
    ) -> Result<CoverageConfigRow, DataServiceError>;
}
