use async_trait::async_trait;
use opentelemetry::global;
use opentelemetry::propagation::Injector;
use reqwest::{Client, header};
use shared::{
    responses::ApiResponse,
    types::{CoverageConfig, Employee, ShiftTemplate},
};
use tracing_opentelemetry::OpenTelemetrySpanExt;
use uuid::Uuid;

use crate::{domain::client::DataServiceClient, error::SchedulingServiceError};

pub struct HttpDataServiceClient {
    client: Client,
    base_url: String,
}

impl HttpDataServiceClient {
    pub fn new(base_url: String) -> Self {
        let client = Client::new();
        Self { client, base_url }
    }

    fn propagated_headers(&self) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        let cx = tracing::Span::current().context();
        global::get_text_map_propagator(|propagator| {
            propagator.inject_context(&cx, &mut HeaderMapInjector(&mut headers));
        });
        headers
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
    ) -> Result<T, SchedulingServiceError> {
        tracing::debug!(%url, "Requesting from data service");

        let res = self
            .client
            .get(&url)
            .headers(self.propagated_headers())
            .send()
            .await
            .map_err(|e| {
                SchedulingServiceError::DataService(format!("Failed to reach Data Service:{e}"))
            })?;

        tracing::debug!(status = %res.status(), "Data service responded");

        if !res.status().is_success() {
            return Err(SchedulingServiceError::DataService(format!(
                "Data Service returned status {}",
                res.status()
            )));
        }

        let api_response = res.json::<ApiResponse<T>>().await.map_err(|e| {
            SchedulingServiceError::DataService(format!("Failed to deserialize response: {e}"))
        })?;

        api_response
            .data
            .ok_or_else(|| SchedulingServiceError::DataService("No data in response".to_string()))
    }
}

struct HeaderMapInjector<'a>(&'a mut header::HeaderMap);

impl Injector for HeaderMapInjector<'_> {
    fn set(&mut self, key: &str, value: String) {
        if let Ok(name) = header::HeaderName::from_bytes(key.as_bytes())
            && let Ok(val) = header::HeaderValue::from_str(&value)
        {
            self.0.insert(name, val);
        }
    }
}

#[async_trait]
impl DataServiceClient for HttpDataServiceClient {
    #[tracing::instrument(skip(self))]
    async fn get_employees(
        &self,
        farmacy_id: Uuid,
    ) -> Result<Vec<Employee>, SchedulingServiceError> {
        self.get_json(format!("{}/api/v1/farmacies/{farmacy_id}/employees", self.base_url))
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn get_shift_catalog(
        &self,
        farmacy_id: Uuid,
    ) -> Result<Vec<ShiftTemplate>, SchedulingServiceError> {
        self.get_json(format!(
            "{}/api/v1/farmacies/{farmacy_id}/shift-templates",
            self.base_url
        ))
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn get_coverage_config(
        &self,
        farmacy_id: Uuid,
    ) -> Result<CoverageConfig, SchedulingServiceError> {
        self.get_json(format!(
            "{}/api/v1/farmacies/{farmacy_id}/coverage-config",
            self.base_url
        ))
        .await
    }
}
