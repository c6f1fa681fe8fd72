//! Error types for the pet API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use zoo_engine::EngineError;
use zoo_store::StoreError;

/// Errors that can occur in the pet API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The action is not part of the vocabulary. Nothing was changed.
    #[error("{0}")]
    InvalidAction(String),

    /// The request was malformed or not allowed for this pet.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The state store could not be read or written.
    #[error("state store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),

    /// An internal error occurred, such as a stored snapshot that no longer
    /// decodes.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidAction(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidAction { .. } => Self::InvalidAction(err.to_string()),
            EngineError::ResetUnsupported { .. } => Self::BadRequest(err.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Serialization(e) => Self::Internal(format!("corrupt pet snapshot: {e}")),
            other => Self::StoreUnavailable(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use zoo_types::Species;

    use super::*;

    #[test]
    fn engine_errors_are_client_errors() {
        let invalid: ApiError = EngineError::InvalidAction {
            action: String::from("dance"),
        }
        .into();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.to_string(), "unknown action: dance");

        let reset: ApiError = EngineError::ResetUnsupported {
            species: Species::Dragon,
        }
        .into();
        assert_eq!(reset.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_errors_are_unavailable() {
        let err: ApiError = StoreError::Config(String::from("bad url")).into();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn corrupt_snapshots_are_internal_errors() {
        let decode = serde_json::from_str::<u8>("not a pet").unwrap_err();
        let err: ApiError = StoreError::Serialization(decode).into();
        assert!(matches!(err, ApiError::Internal(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("internal error: corrupt pet snapshot"));
    }
}
