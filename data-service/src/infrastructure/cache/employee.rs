use std::sync::Arc;

use async_trait::async_trait;
use shared::types::Employee;
use uuid::Uuid;

use super::client::RedisCache;
use crate::domain::employee::{CreateEmployee, EmployeeRepository, UpdateEmployee};
use crate::error::DataServiceError;

/// Cache key for the full employee list.
const KEY_ALL: &str = "data-service:employee:all";
/// TTL in seconds for the full employee list cache entry.
const TTL_ALL: u64 = 300;
/// TTL in seconds for individual employee-by-id cache entries.
const TTL_BY_ID: u64 = 600;

fn key_by_id(id: Uuid) -> String {
    format!("data-service:employee:id:{id}")
}

/// Cache-aside decorator around an [`EmployeeRepository`].
///
/// Reads check Redis first; writes delegate to the inner repository and
/// invalidate relevant cache keys.
pub struct CachedEmployeeRepository {
    inner: Arc<dyn EmployeeRepository>,
    cache: RedisCache,
}

impl CachedEmployeeRepository {
    pub fn new(inner: Arc<dyn EmployeeRepository>, cache: RedisCache) -> Self {
        Self { inner, cache }
    }

    async fn invalidate_lists(&self) {
        self.cache.delete(&[KEY_ALL]).await;
    }

    async fn invalidate_all(&self, id: Uuid) {
        self.cache.delete(&[KEY_ALL, &key_by_id(id)]).await;
        self.cache
            .delete_by_pattern("data-service:membership:*")
            .await;
    }
}

#[async_trait]
impl EmployeeRepository for CachedEmployeeRepository {
    async fn find_all(&self) -> Result<Vec<Employee>, DataServiceError> {
        if let Some(cached) = self.cache.get::<Vec<Employee>>(KEY_ALL).await {
            return Ok(cached);
        }
        let output = self.inner.find_all().await?;
        self.cache.set(KEY_ALL, &output, TTL_ALL).await;

        Ok(output)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, DataServiceError> {
        let key = key_by_id(id);
        if let Some(cached) = self.cache.get::<Option<Employee>>(&key).await {
            return Ok(cached);
        }
        let output = self.inner.find_by_id(id).await?;
        self.cache.set(&key, &output, TTL_BY_ID).await;

        Ok(output)
    }

    async fn create(&self, employee: CreateEmployee) -> Result<Employee, DataServiceError> {
        let output = self.inner.create(employee).await?;
        self.invalidate_lists().await;

        Ok(output)
    }

    async fn batch_create(
        &self,
        employees: Vec<CreateEmployee>,
    ) -> Result<Vec<Employee>, DataServiceError> {
        let output = self.inner.batch_create(employees).await?;
        self.invalidate_lists().await;

        Ok(output)
    }

    async fn update(&self, id: Uuid, employee: UpdateEmployee) -> Result<Employee, DataServiceError> {
        let output = self.inner.update(id, employee).await?;
        self.invalidate_all(id).await;

        Ok(output)
    }

    async fn deactivate(&self, id: Uuid) -> Result<(), DataServiceError> {
        self.inner.deactivate(id).await?;
        self.invalidate_all(id).await;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DataServiceError> {
        self.inner.delete(id).await?;
        self.invalidate_all(id).await;

        Ok(())
    }
}
