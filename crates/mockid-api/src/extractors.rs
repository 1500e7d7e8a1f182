//! # Envelope Extraction & Validation
//!
//! Handlers take their body as `Result<Json<RequestWrapper<T>>, JsonRejection>`
//! so that malformed JSON is reported in-band as an `INVALID_REQUEST` error
//! envelope instead of Axum's default rejection response. Path parameters
//! get the same treatment through [`extract_path`].

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::Json;
use mockid_core::{RequestWrapper, Timestamp, Validate};

use crate::error::AppError;
use crate::state::AppState;

/// Unwrap a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Unwrap a path parameter, mapping undecodable segments to [`AppError::BadRequest`].
pub fn extract_path<T>(result: Result<Path<T>, PathRejection>) -> Result<T, AppError> {
    result
        .map(|Path(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Unwrap an envelope and validate it together with its payload.
///
/// Returns the payload only when neither the envelope nor the payload
/// violates a rule. Otherwise every violation is returned at once.
pub fn extract_validated_envelope<T: Validate>(
    state: &AppState,
    result: Result<Json<RequestWrapper<T>>, JsonRejection>,
) -> Result<T, AppError> {
    let envelope = extract_json(result)?;
    state
        .config
        .envelope_rules()
        .check(envelope, Timestamp::now())
        .map_err(AppError::Validation)
}
