use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::envelope::ErrorResponse;

/// Failure taxonomy of the API surface. Every route collapses into one of
/// these; the body is always the `{success: false, error}` envelope.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing/invalid request parameter or field
    #[error("{0}")]
    BadRequest(String),
    /// Worksheet, column, part or PR could not be located
    #[error("{0}")]
    NotFound(String),
    /// Remote spreadsheet access failure (network, auth, range)
    #[error("{0}")]
    Storage(#[from] anyhow::Error),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
            ApiError::Storage(e) => {
                tracing::error!("Spreadsheet access failed: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", e))
            }
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let response = ApiError::bad_request("x").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let response = ApiError::not_found("x").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = ApiError::Storage(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
