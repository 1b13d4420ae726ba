// HTTP response utilities - error mapping to JSON bodies
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::domain::error::{IngestError, LookupError, PreconditionError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Ingest(IngestError::EmptyFile) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Ingest(IngestError::UnsupportedFormat(_)) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Ingest(IngestError::ParseFailure(_)) => StatusCode::BAD_REQUEST,
            ApiError::Lookup(_) => StatusCode::NOT_FOUND,
            ApiError::Precondition(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_client_error() {
            tracing::debug!("Request failed with {}: {}", status, self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(IngestError::EmptyFile).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(IngestError::UnsupportedFormat("txt".to_string())).status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            ApiError::from(LookupError::ChartNotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(PreconditionError::NoActiveDataset).status(),
            StatusCode::CONFLICT
        );
    }
}
