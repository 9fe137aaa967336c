use thiserror::Error;

use crate::reservation::ApiFault;

#[derive(Debug, Error)]
pub enum GetError {
    #[error("the request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("the request failed with status code {0}: {1}")]
    ResponseError(u16, String),
    #[error("the response body could not be read: {0}")]
    ResponseBodyError(#[source] reqwest::Error),
    #[error("unable to parse the response body: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("the API rejected the request: {0}")]
    ApiError(ApiFault),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read the booking profile {0}: {1}")]
    ReadError(String, #[source] std::io::Error),
    #[error("the booking profile {0} is not valid: {1}")]
    ParseError(String, #[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("unable to create the transcript directory {0}: {1}")]
    CreateDirError(String, #[source] std::io::Error),
    #[error("unable to write the transcript {0}: {1}")]
    WriteError(String, #[source] std::io::Error),
}
