use std::sync::Arc;

use crate::domain::{
    coverage_config::CoverageConfigRepository, employee::EmployeeRepository,
    farmacy::FarmacyRepository, membership::MembershipRepository,
    shift_template::ShiftTemplateRepository,
};

pub struct DataServiceAppState {
    pub employee_repo: Arc<dyn EmployeeRepository>,
    pub farmacy_repo: Arc<dyn FarmacyRepository>,
    pub membership_repo: Arc<dyn MembershipRepository>,
    pub shift_template_repo: Arc<dyn ShiftTemplateRepository>,
    pub coverage_config_repo: Arc<dyn CoverageConfigRepository>,
}
