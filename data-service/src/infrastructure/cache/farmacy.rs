use std::sync::Arc;

use async_trait::async_trait;
use shared::types::Farmacy;
use uuid::Uuid;

use super::client::RedisCache;
use crate::domain::farmacy::{CreateFarmacy, FarmacyRepository, UpdateFarmacy};
use crate::error::DataServiceError;

/// Cache key for the full farmacy list.
const KEY_ALL: &str = "data-service:farmacies:all";
/// TTL in seconds for the full farmacy list cache entry.
const TTL_ALL: u64 = 300;
/// TTL in seconds for individual farmacy-by-id cache entries.
const TTL_BY_ID: u64 = 600;

fn key_by_id(id: Uuid) -> String {
    format!("data-service:farmacies:id:{id}")
}

/// Cache-aside decorator around a [`FarmacyRepository`].
///
/// Reads check Redis first; writes delegate to the inner repository and
/// invalidate relevant cache keys.
pub struct CachedFarmacyRepository {
    inner: Arc<dyn FarmacyRepository>,
    cache: RedisCache,
}

impl CachedFarmacyRepository {
    pub fn new(inner: Arc<dyn FarmacyRepository>, cache: RedisCache) -> Self {
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
impl FarmacyRepository for CachedFarmacyRepository {
    async fn find_all(&self) -> Result<Vec<Farmacy>, DataServiceError> {
        if let Some(cached) = self.cache.get::<Vec<Farmacy>>(KEY_ALL).await {
            return Ok(cached);
        }
        let output = self.inner.find_all().await?;
        self.cache.set(KEY_ALL, &output, TTL_ALL).await;

        Ok(output)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Farmacy>, DataServiceError> {
        let key = key_by_id(id);
        if let Some(cached) = self.cache.get::<Option<Farmacy>>(&key).await {
            return Ok(cached);
        }
        let output = self.inner.find_by_id(id).await?;
        self.cache.set(&key, &output, TTL_BY_ID).await;

        Ok(output)
    }

    async fn create(&self, farmacy: CreateFarmacy) -> Result<Farmacy, DataServiceError> {
        let output = self.inner.create(farmacy).await?;
        self.invalidate_lists().await;

        Ok(output)
    }

    async fn batch_create(
        &self,
        farmacies: Vec<CreateFarmacy>,
    ) -> Result<Vec<Farmacy>, DataServiceError> {
        let output = self.inner.batch_create(farmacies).await?;
        self.invalidate_lists().await;

        Ok(output)
    }

    async fn update(&self, id: Uuid, farmacy: UpdateFarmacy) -> Result<Farmacy, DataServiceError> {
        let output = self.inner.update(id, farmacy).await?;
        self.invalidate_all(id).await;

        Ok(output)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DataServiceError> {
        self.inner.delete(id).await?;
        self.invalidate_all(id).await;

        Ok(())
    }
}
