//! API Response Envelope
//!
//! Every successful response is wrapped in the same JSON envelope:
//! `{"statusCode": 200, "data": ..., "message": "...", "success": true}`.
//! Failures render the identical shape with `data: null` and
//! `success: false` (see `error::conversions`), so clients parse one
//! structure for both outcomes.

use serde::Serialize;

/// Success envelope wrapping a payload of type `T`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub data: T,
    pub message: String,
    /// Always `status_code < 400`
    pub success: bool,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload with an explicit status code
    pub fn new(status_code: u16, data: T, message: impl Into<String>) -> Self {
        Self {
            status_code,
            data,
            message: message.into(),
            success: status_code < 400,
        }
    }

    /// 200 OK envelope
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::new(200, data, message)
    }

    /// 201 Created envelope
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::new(201, data, message)
    }
}

#[cfg(feature = "axum")]
impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (status, axum::Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope() {
        let resp = ApiResponse::ok(serde_json::json!({"id": 1}), "fetched");
        assert_eq!(resp.status_code, 200);
        assert!(resp.success);

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "fetched");
        assert_eq!(json["data"]["id"], 1);
    }

    #[test]
    fn test_created_envelope() {
        let resp = ApiResponse::created((), "registered");
        assert_eq!(resp.status_code, 201);
        assert!(resp.success);
    }
}
