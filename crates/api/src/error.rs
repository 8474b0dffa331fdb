use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use taskmarket_core::MarketError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("marketplace error: {0}")]
    Market(#[from] MarketError),

    #[error("validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("malformed request body: {0}")]
    JsonBody(#[from] JsonRejection),

    #[error("malformed query string: {0}")]
    QueryString(#[from] QueryRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Market(err @ MarketError::InvalidId(_)) => {
                tracing::warn!(error = %err, "request with malformed identifier");
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "message": err.user_message() }),
                )
            }
            ApiError::Market(err @ MarketError::TaskNotFound { .. }) => {
                tracing::warn!(error = %err, "task not found");
                (StatusCode::NOT_FOUND, json!({ "message": err.user_message() }))
            }
            ApiError::Market(MarketError::Validation(msg)) => {
                tracing::warn!(error = %msg, "domain validation failed");
                (StatusCode::BAD_REQUEST, json!({ "message": msg }))
            }
            ApiError::Market(err) => {
                // Database and configuration failures. The underlying error
                // string is echoed; stack traces are not.
                tracing::error!(error = %err, "store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": err.user_message(), "error": err.to_string() }),
                )
            }
            ApiError::Validation(errors) => {
                let details: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .map(|(field, errors)| {
                        let messages: Vec<String> = errors
                            .iter()
                            .map(|e| {
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| "invalid value".to_string())
                            })
                            .collect();
                        format!("{}: {}", field, messages.join(", "))
                    })
                    .collect();
                let message = details.join("; ");
                tracing::warn!(error = %message, "request validation failed");
                (StatusCode::BAD_REQUEST, json!({ "message": message }))
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "bad request");
                (StatusCode::BAD_REQUEST, json!({ "message": msg }))
            }
            ApiError::JsonBody(rejection) => {
                let message = rejection.body_text();
                tracing::warn!(error = %message, "rejected request body");
                (StatusCode::BAD_REQUEST, json!({ "message": message }))
            }
            ApiError::QueryString(rejection) => {
                let message = rejection.body_text();
                tracing::warn!(error = %message, "rejected query string");
                (StatusCode::BAD_REQUEST, json!({ "message": message }))
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_id_maps_to_bad_request() {
        let error = ApiError::Market(MarketError::invalid_id("abc"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_task_not_found_maps_to_not_found() {
        let error = ApiError::Market(MarketError::task_not_found("665f0000aa11bb22cc33dd44"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bad_request_maps_to_bad_request() {
        let error = ApiError::BadRequest("A valid taskId is required".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validation_errors_map_to_bad_request() {
        let mut errors = validator::ValidationErrors::new();
        let mut error = validator::ValidationError::new("length");
        error.message = Some("title must be at least 3 characters".into());
        errors.add("title", error);

        let api_error: ApiError = errors.into();
        let response = api_error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_domain_validation_maps_to_bad_request() {
        let error = ApiError::Market(MarketError::validation_error("budget must be at least 1"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
