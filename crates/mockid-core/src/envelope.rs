//! # Request / Response Envelopes
//!
//! Every identity endpoint exchanges envelopes rather than bare payloads:
//!
//! ```text
//! request:  {"requestTime": "2026-01-15T12:00:00.000Z", "request": {...}}
//! response: {"responseTime": "...", "response": {...}, "errors": []}
//! failure:  {"responseTime": "...", "errors": [{"errorCode": "...", "errorMessage": "..."}]}
//! ```
//!
//! A response carries either a payload or a non-empty error list, never
//! both. The constructors on [`ResponseWrapper`] are the only way this crate
//! builds one.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ErrorCode;
use crate::temporal::Timestamp;

/// Inbound envelope.
///
/// `requestTime` is kept as the raw string so that a malformed value is
/// reported as a validation error rather than a parse failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestWrapper<T> {
    #[schema(example = "2026-01-15T12:00:00.000Z")]
    pub request_time: Option<String>,
    pub request: Option<T>,
}

impl<T> RequestWrapper<T> {
    /// Wrap `request`, stamped with the current time.
    pub fn now(request: T) -> Self {
        Self {
            request_time: Some(Timestamp::now().to_envelope_string()),
            request: Some(request),
        }
    }
}

/// One entry of the `errors` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceError {
    pub error_code: ErrorCode,
    pub error_message: String,
}

impl ServiceError {
    pub fn new(error_code: ErrorCode, error_message: impl Into<String>) -> Self {
        Self {
            error_code,
            error_message: error_message.into(),
        }
    }
}

/// Outbound envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseWrapper<T> {
    #[schema(value_type = String, example = "2026-01-15T12:00:00.000Z")]
    pub response_time: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<T>,
    #[serde(default)]
    pub errors: Vec<ServiceError>,
}

impl<T> ResponseWrapper<T> {
    /// A success envelope carrying `response` and no errors.
    pub fn success(response: T) -> Self {
        Self {
            response_time: Timestamp::now(),
            response: Some(response),
            errors: Vec::new(),
        }
    }

    /// A failure envelope carrying `errors` and no payload.
    ///
    /// An empty list is replaced by a single `INTERNAL_ERROR` entry so the
    /// envelope never ends up with neither payload nor errors.
    pub fn failure(errors: Vec<ServiceError>) -> Self {
        let errors = if errors.is_empty() {
            vec![ServiceError::new(
                ErrorCode::InternalError,
                "request failed without a reported cause",
            )]
        } else {
            errors
        };
        Self {
            response_time: Timestamp::now(),
            response: None,
            errors,
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty() && self.response.is_some()
    }

    /// Error codes in the order they were reported.
    pub fn error_codes(&self) -> Vec<ErrorCode> {
        self.errors.iter().map(|e| e.error_code).collect()
    }
}

/// Payload of the write endpoints: a human-readable status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}
