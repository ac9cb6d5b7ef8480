use async_trait::async_trait;
use shared::types::{CoverageConfig, Employee, ShiftTemplate};
use uuid::Uuid;

use crate::error::SchedulingServiceError;

/// The scheduling service's read-only view onto the data service: the three
/// inputs the model builder needs for a (farmacy, month) request.
#[cfg_attr(feature = "test-support", mockall::automock)]
#[async_trait]
pub trait DataServiceClient: Send + Sync {
    async fn get_employees(
        &self,
        farmacy_id: Uuid,
    ) -> Result<Vec<Employee>, SchedulingServiceError>;

    async fn get_shift_catalog(
        &self,
        farmacy_id: Uuid,
    ) -> Result<Vec<ShiftTemplate>, SchedulingServiceError>;

    async fn get_coverage_config(
        &self,
        farmacy_id: Uuid,
    ) -> Result<CoverageConfig, SchedulingServiceError>;
}
