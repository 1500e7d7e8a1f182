//! # API Error Types
//!
//! [`AppError`] renders every failure as a response envelope with an
//! `errors` list. The HTTP status is always 200: clients tell success from
//! failure by the envelope contents, not the status line.
//!
//! Internal fault details are logged and never returned to the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mockid_core::{ErrorCode, ResponseWrapper, ServiceError};
use thiserror::Error;

use crate::store::StoreError;

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Field validation failed; carries every violation.
    #[error("validation failed with {} error(s)", .0.len())]
    Validation(Vec<ServiceError>),

    /// The body could not be parsed as the expected envelope.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// No identity under the requested id.
    #[error("not found: {0}")]
    NotFound(String),

    /// Unexpected failure. Message is logged but not returned to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Machine-readable code of the first reported error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(errors) => errors
                .first()
                .map(|e| e.error_code)
                .unwrap_or(ErrorCode::InvalidRequest),
            Self::BadRequest(_) => ErrorCode::InvalidRequest,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// The entries reported in the envelope's `errors` list.
    pub fn into_errors(self) -> Vec<ServiceError> {
        let code = self.code();
        match self {
            Self::Validation(errors) => errors,
            Self::BadRequest(msg) => vec![ServiceError::new(code, msg)],
            Self::NotFound(id) => vec![ServiceError::new(
                code,
                format!("no identity found for individualId {id}"),
            )],
            Self::Internal(_) => vec![ServiceError::new(code, "An internal error occurred")],
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::BadRequest(_) => tracing::debug!(error = %self, "unparseable request"),
            Self::Validation(errors) => {
                tracing::debug!(violations = errors.len(), "request failed validation")
            }
            Self::NotFound(_) => {}
        }

        let body: ResponseWrapper<()> = ResponseWrapper::failure(self.into_errors());
        (StatusCode::OK, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::InvalidKey(core) => Self::Validation(vec![ServiceError::new(
                core.code(),
                core.to_string(),
            )]),
            StoreError::Backend(msg) => Self::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use mockid_core::CoreError;

    async fn response_parts(err: AppError) -> (StatusCode, ResponseWrapper<()>) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ResponseWrapper<()> = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[test]
    fn codes_per_variant() {
        assert_eq!(AppError::BadRequest("x".into()).code(), ErrorCode::InvalidRequest);
        assert_eq!(AppError::NotFound("x".into()).code(), ErrorCode::NotFound);
        assert_eq!(AppError::Internal("x".into()).code(), ErrorCode::InternalError);
        let validation = AppError::Validation(vec![ServiceError::new(
            ErrorCode::InvalidIndividualId,
            "blank",
        )]);
        assert_eq!(validation.code(), ErrorCode::InvalidIndividualId);
    }

    #[tokio::test]
    async fn validation_keeps_every_error_and_status_200() {
        let (status, body) = response_parts(AppError::Validation(vec![
            ServiceError::new(ErrorCode::InvalidRequest, "individualId is required"),
            ServiceError::new(ErrorCode::InvalidIndividualId, "individualId must not be blank"),
        ]))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.response.is_none());
        assert_eq!(
            body.error_codes(),
            vec![ErrorCode::InvalidRequest, ErrorCode::InvalidIndividualId]
        );
    }

    #[tokio::test]
    async fn not_found_names_the_id() {
        let (status, body) = response_parts(AppError::NotFound("987".into())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.errors[0].error_code, ErrorCode::NotFound);
        assert!(body.errors[0].error_message.contains("987"));
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let (status, body) =
            response_parts(AppError::Internal("mutex poisoned at store.rs:42".into())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.errors[0].error_code, ErrorCode::InternalError);
        assert!(
            !body.errors[0].error_message.contains("mutex"),
            "internal error details must not leak: {}",
            body.errors[0].error_message
        );
    }

    #[test]
    fn store_errors_convert() {
        assert!(matches!(
            AppError::from(StoreError::NotFound("1".into())),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::Backend("disk".into())),
            AppError::Internal(_)
        ));
        match AppError::from(StoreError::InvalidKey(CoreError::BlankIndividualId)) {
            AppError::Validation(errors) => {
                assert_eq!(errors[0].error_code, ErrorCode::InvalidIndividualId)
            }
            other => panic!("expected Validation, got: {other:?}"),
        }
    }
}
