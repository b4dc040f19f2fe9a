use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use caseboard_core::config::ApiConfig;
use caseboard_core::record::{CaseRecord, CoefficientMap};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::RecordSource;

const CASES_PATH: &str = "api/casos";
const COEFFICIENTS_PATH: &str = "api/modelo/coeficientes";
const PREDICT_PATH: &str = "api/predizer";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not build HTTP client: {0}")]
    Build(reqwest::Error),
    #[error("request to `{url}` failed: {source}")]
    Http { url: String, source: reqwest::Error },
    #[error("`{url}` answered with status {status}")]
    Status { url: String, status: StatusCode },
    #[error("could not decode response from `{url}`: {source}")]
    Decode { url: String, source: reqwest::Error },
}

/// Input to the case-type prediction endpoint.
#[derive(Clone, Debug, Serialize)]
pub struct PredictionRequest {
    pub age: u32,
    pub ethnicity: String,
    pub location: String,
}

/// The predicted case type with the per-class probability breakdown.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Prediction {
    pub predicted_class: String,
    pub probabilities: HashMap<String, f64>,
}

/// HTTP client for the case API. All endpoints are read-only except the
/// prediction call, which sends a feature payload and stores nothing.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.endpoint(path);
        tracing::debug!(url = %url, "fetching");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Http { url: url.clone(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status { url, status });
        }

        response.json::<T>().await.map_err(|source| ClientError::Decode { url, source })
    }

    /// Ask the model to classify a hypothetical case.
    pub async fn predict(&self, request: &PredictionRequest) -> Result<Prediction, ClientError> {
        let url = self.endpoint(PREDICT_PATH);
        tracing::debug!(url = %url, age = request.age, "requesting prediction");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|source| ClientError::Http { url: url.clone(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status { url, status });
        }

        response.json::<Prediction>().await.map_err(|source| ClientError::Decode { url, source })
    }
}

#[async_trait]
impl RecordSource for ApiClient {
    async fn fetch_cases(&self) -> Result<Vec<CaseRecord>, ClientError> {
        self.get_json(CASES_PATH).await
    }

    async fn fetch_coefficients(&self) -> Result<CoefficientMap, ClientError> {
        self.get_json(COEFFICIENTS_PATH).await
    }
}
