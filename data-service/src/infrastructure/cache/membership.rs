use std::sync::Arc;

use async_trait::async_trait;
use shared::types::{Employee, Farmacy};
use uuid::Uuid;

use super::client::RedisCache;
use crate::domain::membership::{AddMembership, MembershipRepository};
use crate::error::DataServiceError;

const TTL: u64 = 300;

fn key_farmacy_employees(farmacy_id: Uuid) -> String {
    format!("data-service:membership:farmacy:{farmacy_id}:employees")
}

fn key_employee_farmacies(employee_id: Uuid) -> String {
    format!("data-service:membership:employee:{employee_id}:farmacies")
}

pub struct CachedMembershipRepository {
    inner: Arc<dyn MembershipRepository>,
    cache: RedisCache,
}

impl CachedMembershipRepository {
    pub fn new(inner: Arc<dyn MembershipRepository>, cache: RedisCache) -> Self {
        Self { inner, cache }
    }

    async fn invalidate_membership(&self, farmacy_id: Uuid, employee_id: Uuid) {
        self.cache
            .delete(&[
                &key_farmacy_employees(farmacy_id),
                &key_employee_farmacies(employee_id),
            ])
            .await;
    }
}

#[async_trait]
impl MembershipRepository for CachedMembershipRepository {
    async fn get_farmacy_employees(&self, farmacy_id: Uuid) -> Result<Vec<Employee>, DataServiceError> {
        let key = key_farmacy_employees(farmacy_id);
        if let Some(cached) = self.cache.get::<Vec<Employee>>(&key).await {
            return Ok(cached);
        }
        let output = self.inner.get_farmacy_employees(farmacy_id).await?;
        self.cache.set(&key, &output, TTL).await;

        Ok(output)
    }

    async fn get_employee_farmacies(&self, employee_id: Uuid) -> Result<Vec<Farmacy>, DataServiceError> {
        let key = key_employee_farmacies(employee_id);
        if let Some(cached) = self.cache.get::<Vec<Farmacy>>(&key).await {
            return Ok(cached);
        }
        let output = self.inner.get_employee_farmacies(employee_id).await?;
        self.cache.set(&key, &output, TTL).await;

        Ok(output)
    }

    async fn add_employee_to_farmacy(
        &self,
        farmacy_id: Uuid,
        employee_id: Uuid,
    ) -> Result<(), DataServiceError> {
        self.inner
            .add_employee_to_farmacy(farmacy_id, employee_id)
            .await?;
        self.invalidate_membership(farmacy_id, employee_id).await;

        Ok(())
    }

    async fn remove_employee_from_farmacy(
        &self,
        farmacy_id: Uuid,
        employee_id: Uuid,
    ) -> Result<(), DataServiceError> {
        self.inner
            .remove_employee_from_farmacy(farmacy_id, employee_id)
            .await?;
        self.invalidate_membership(farmacy_id, employee_id).await;

        Ok(())
    }

    async fn batch_add_members(
        &self,
        memberships: Vec<AddMembership>,
    ) -> Result<(), DataServiceError> {
        self.inner.batch_add_members(memberships.clone()).await?;
        for m in memberships {
            self.invalidate_membership(m.farmacy_id, m.employee_id).await;
        }

        Ok(())
    }
}
