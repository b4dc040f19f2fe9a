//! Record Source boundary: where case records and model coefficients come
//! from. The HTTP client and the offline fixture roster are
//! interchangeable behind [`RecordSource`].

pub mod api;
pub mod fixtures;

use async_trait::async_trait;
use caseboard_core::record::{CaseRecord, CoefficientMap};
use caseboard_core::session::SessionContext;

pub use api::{ApiClient, ClientError, Prediction, PredictionRequest};
pub use fixtures::FixtureSource;

#[async_trait]
pub trait RecordSource {
    async fn fetch_cases(&self) -> Result<Vec<CaseRecord>, ClientError>;
    async fn fetch_coefficients(&self) -> Result<CoefficientMap, ClientError>;
}

/// Load one dashboard session. The two fetches are independent and run
/// concurrently; if either fails nothing is installed, so a failed load
/// never leaves a partial roster behind.
pub async fn load_session<S>(source: &S) -> Result<SessionContext, ClientError>
where
    S: RecordSource + Sync,
{
    let (records, coefficients) =
        tokio::try_join!(source.fetch_cases(), source.fetch_coefficients())?;

    tracing::info!(
        cases = records.len(),
        coefficients = coefficients.len(),
        "dashboard session loaded"
    );

    Ok(SessionContext::new(records, coefficients))
}
