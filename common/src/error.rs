use thiserror::Error;

/// Failures produced by the pure page-behavior logic.
///
/// None of these are fatal for the page: the frontend logs them and keeps the
/// affected routine in its default state.
#[derive(Error, Debug)]
pub enum Error {
    #[error("stored filters are not valid JSON: {0}")]
    InvalidFilterJson(#[source] serde_json::Error),

    #[error("stored filters must be a JSON object")]
    FilterNotObject,

    #[error("could not encode filters: {0}")]
    EncodeFilters(#[source] serde_json::Error),

    #[error("invalid page configuration: {0}")]
    InvalidConfig(#[source] serde_json::Error),
}
