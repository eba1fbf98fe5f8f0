use thiserror::Error;

/// A listing or detail request that failed or came back non-2xx.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },
}

/// Failure scoped to a single candidate; the run carries on without it.
#[derive(Debug, Error)]
pub enum CandidateError {
    #[error(transparent)]
    Transport(#[from] FetchError),
    #[error("detail fragment for {external_id} is not parseable markup")]
    MalformedFragment { external_id: String },
}

/// Failure that ends the whole run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("member listing could not be fetched: {0}")]
    Listing(#[source] FetchError),
}
