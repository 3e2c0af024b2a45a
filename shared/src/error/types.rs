//! Boundary error and response envelope

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Error handed to the host
///
/// Carries a stable [`ErrorCode`], a message for the operator and optional
/// structured details (offending row, cell coordinates, occupant id).
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self::with_message(code, code.message())
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach one detail entry; later entries overwrite earlier ones
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }
}

/// JSON envelope for hosts that relay editor results to a web client
///
/// `code` is 0 on success. `details` is only present on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: Some(ErrorCode::Success.code()),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.code, Some(0) | None)
    }
}

impl ApiResponse<()> {
    pub fn ok() -> Self {
        Self {
            code: Some(ErrorCode::Success.code()),
            message: "OK".to_string(),
            data: None,
            details: None,
        }
    }

    pub fn error(err: &AppError) -> Self {
        err.clone().into()
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message,
            data: None,
            details: err.details,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_message() {
        let err = AppError::new(ErrorCode::TableNotFound);
        assert_eq!(err.code, ErrorCode::TableNotFound);
        assert_eq!(err.message, ErrorCode::TableNotFound.message());
        assert!(err.details.is_none());
    }

    #[test]
    fn test_details_accumulate() {
        let err = AppError::new(ErrorCode::TableCellOccupied)
            .with_detail("x", 2)
            .with_detail("y", 3)
            .with_detail("x", 4);

        let details = err.details.unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details.get("x").unwrap(), 4);
        assert_eq!(details.get("y").unwrap(), 3);
    }

    #[test]
    fn test_status_follows_code() {
        assert_eq!(
            AppError::new(ErrorCode::TableNotFound).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::permission_denied("tables:manage").http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::validation("capacity must be positive").http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_display_is_message() {
        let err = AppError::with_message(ErrorCode::TableNotFound, "Table 7 not found");
        assert_eq!(err.to_string(), "Table 7 not found");
    }

    #[test]
    fn test_response_envelopes() {
        let response = ApiResponse::success(42);
        assert_eq!(response.code, Some(0));
        assert_eq!(response.data, Some(42));
        assert!(response.is_success());
        assert!(ApiResponse::ok().is_success());

        let err = AppError::new(ErrorCode::TableCellOccupied).with_detail("x", 1);
        let response = ApiResponse::<()>::error(&err);
        assert_eq!(response.code, Some(7005));
        assert!(!response.is_success());
        assert!(response.details.is_some());
    }

    #[test]
    fn test_success_envelope_omits_details() {
        let json = serde_json::to_string(&ApiResponse::success("T1")).unwrap();
        assert!(json.contains("\"code\":0"));
        assert!(json.contains("\"data\":\"T1\""));
        assert!(!json.contains("details"));
    }
}
