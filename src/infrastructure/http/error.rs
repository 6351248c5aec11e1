//! HTTP Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const INTERNAL_ERROR: i32 = 500;
    pub const NO_SEED_AVAILABLE: i32 = 503;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
    NoSeedAvailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let response = match &self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(errno = errno::BAD_REQUEST, error = %msg, "Bad request");
                ErrorResponse::new(errno::BAD_REQUEST, msg.clone())
            }
            ApiError::Internal(msg) => {
                tracing::error!(errno = errno::INTERNAL_ERROR, error = %msg, "Internal server error");
                ErrorResponse::new(errno::INTERNAL_ERROR, msg.clone())
            }
            ApiError::NoSeedAvailable(msg) => {
                tracing::error!(errno = errno::NO_SEED_AVAILABLE, error = %msg, "No seed available");
                ErrorResponse::new(errno::NO_SEED_AVAILABLE, msg.clone())
            }
        };

        // 业务错误统一返回 200，由 errno 区分
        (StatusCode::OK, Json(response)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::NoSeedAvailable => {
                ApiError::NoSeedAvailable("No seed available".to_string())
            }
            ApplicationError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn envelope(err: ApplicationError) -> (StatusCode, serde_json::Value) {
        let response = ApiError::from(err).into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_application_errors_map_to_errno() {
        let cases = [
            (ApplicationError::validation("gender is required"), errno::BAD_REQUEST),
            (ApplicationError::NoSeedAvailable, errno::NO_SEED_AVAILABLE),
            (ApplicationError::internal("catalog unreadable"), errno::INTERNAL_ERROR),
        ];

        for (err, expected) in cases {
            let (status, body) = envelope(err).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["errno"], expected);
            assert!(body["data"].is_null());
        }
    }
}
