use crate::filter::query::Query;
use crate::incident::IncidentRecord;

/// Failure surfaced by a fetch attempt. Never fatal: the controller keeps
/// the last-good marker set on any variant.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Issues canonical queries against the incident query endpoint.
pub struct IncidentFetcher {
    client: reqwest::Client,
    endpoint: String,
}

impl IncidentFetcher {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Single GET with the query attached; no retry. Transport errors and
    /// non-success statuses map to [`FetchError::Network`], unparsable
    /// bodies to [`FetchError::Decode`].
    pub async fn fetch(&self, query: &Query) -> Result<Vec<IncidentRecord>, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&query.pairs())
            .send()
            .await
            .map_err(|err| FetchError::Network(err.to_string()))?
            .error_for_status()
            .map_err(|err| FetchError::Network(err.to_string()))?;

        response
            .json::<Vec<IncidentRecord>>()
            .await
            .map_err(|err| FetchError::Decode(err.to_string()))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
