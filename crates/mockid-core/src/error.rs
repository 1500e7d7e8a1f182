//! # Error Types
//!
//! [`ErrorCode`] is the machine-readable code carried by every error entry of
//! a response envelope. [`CoreError`] is the error returned by the validating
//! constructors in this crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Machine-readable error code reported in `errors[*].errorCode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A required field or envelope element is missing or malformed.
    InvalidRequest,
    /// The individual identifier is null or blank.
    InvalidIndividualId,
    /// No identity is stored under the requested individual identifier.
    NotFound,
    /// Unexpected failure inside the service. Details are only logged.
    InternalError,
}

impl ErrorCode {
    /// The wire representation of this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::InvalidIndividualId => "INVALID_INDIVIDUAL_ID",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by validating constructors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A timestamp did not match `yyyy-MM-dd'T'HH:mm:ss.SSS'Z'`.
    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An individual identifier was empty or whitespace only.
    #[error("individual id must not be blank")]
    BlankIndividualId,
}

impl CoreError {
    /// The envelope error code this error is reported under.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidTimestamp { .. } => ErrorCode::InvalidRequest,
            Self::BlankIndividualId => ErrorCode::InvalidIndividualId,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&ErrorCode::InvalidIndividualId).unwrap();
        assert_eq!(json, "\"INVALID_INDIVIDUAL_ID\"");
        let parsed: ErrorCode = serde_json::from_str("\"INVALID_REQUEST\"").unwrap();
        assert_eq!(parsed, ErrorCode::InvalidRequest);
    }

    #[test]
    fn as_str_matches_serde_representation() {
        for code in [
            ErrorCode::InvalidRequest,
            ErrorCode::InvalidIndividualId,
            ErrorCode::NotFound,
            ErrorCode::InternalError,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn core_error_maps_to_codes() {
        assert_eq!(
            CoreError::BlankIndividualId.code(),
            ErrorCode::InvalidIndividualId
        );
        let err = CoreError::InvalidTimestamp {
            value: "yesterday".into(),
            reason: "bad".into(),
        };
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert!(err.to_string().contains("yesterday"));
    }
}
