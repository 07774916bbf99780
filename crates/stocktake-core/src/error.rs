use thiserror::Error;

use crate::api::ApiError;

/// Outcome of a failed `InventoryClient` operation.
///
/// `Validation` and `AuthRequired` are raised before any request is sent.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),

    #[error("Please login first")]
    AuthRequired,

    #[error("Resource already exists")]
    Conflict,

    #[error("Request rejected: {0}")]
    Rejected(#[source] ApiError),

    #[error("Connection error: {0}")]
    Network(#[source] ApiError),
}

impl ClientError {
    /// True for failures detected locally, before any network call
    pub fn is_local(&self) -> bool {
        matches!(self, ClientError::Validation(_) | ClientError::AuthRequired)
    }

    /// Classify an API failure as either a rejection or a network error.
    /// Conflicts are only singled out by registration, through `From`.
    pub fn from_api(err: ApiError) -> Self {
        if err.is_network() {
            ClientError::Network(err)
        } else {
            ClientError::Rejected(err)
        }
    }
}

impl From<ApiError> for ClientError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Conflict(_) => ClientError::Conflict,
            other => ClientError::from_api(other),
        }
    }
}
