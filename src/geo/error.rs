use hyper::http::uri::InvalidUri;
use hyper::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoError {
    #[error(transparent)]
    Hyper(#[from] hyper::Error),
    #[error(transparent)]
    Http(#[from] hyper::http::Error),
    #[error("Lookup URI is invalid: {0}")]
    InvalidUri(#[from] InvalidUri),
    #[error("Non-success status code: {0}")]
    NonSuccess(StatusCode),
    #[error("Malformed provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<StatusCode> for GeoError {
    fn from(status_code: StatusCode) -> Self {
        GeoError::NonSuccess(status_code)
    }
}
