//! API response types
//!
//! Error envelope preserved from the service's published contract: every
//! failure body is `{"message": <string>, "status_code": <int>}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Standard error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub status_code: u16,
}

impl ErrorBody {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: status.as_u16(),
        }
    }
}

/// Build an error response with the standard envelope
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(status, message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_shape() {
        let body = ErrorBody::new(StatusCode::GONE, "bad payload");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["message"], "bad payload");
        assert_eq!(json["status_code"], 410);
    }

    #[test]
    fn test_not_found_status_code() {
        let body = ErrorBody::new(StatusCode::NOT_FOUND, "Product with id 7 not found");
        assert_eq!(body.status_code, 404);
        assert!(body.message.contains('7'));
    }
}
