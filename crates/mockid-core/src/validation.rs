//! # Request Validation
//!
//! Validation never stops at the first problem: every violation found in the
//! envelope and its payload is collected into [`Violations`] and reported
//! together. Callers must treat the resulting error codes as a set.
//!
//! | Input | Condition | Code |
//! |-------|-----------|------|
//! | envelope | `requestTime` missing, malformed, or outside the tolerance | `INVALID_REQUEST` |
//! | envelope | `request` missing | `INVALID_REQUEST` |
//! | identity | `individualId` null | `INVALID_REQUEST` + `INVALID_INDIVIDUAL_ID` |
//! | identity | `individualId` blank | `INVALID_INDIVIDUAL_ID` |
//! | verified claim | `individualId` null or blank | `INVALID_REQUEST` |
//! | verified claim | `verificationDetail` null or empty | `INVALID_REQUEST` |

use crate::claims::VerifiedClaimRequest;
use crate::envelope::{RequestWrapper, ServiceError};
use crate::error::ErrorCode;
use crate::identity::IdentityData;
use crate::temporal::Timestamp;

/// Accumulator for validation failures.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Violations(Vec<ServiceError>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, code: ErrorCode, message: impl Into<String>) {
        self.0.push(ServiceError::new(code, message));
    }

    /// `Ok(())` when nothing was recorded, otherwise every recorded error.
    pub fn into_result(self) -> Result<(), Vec<ServiceError>> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self.0)
        }
    }

    pub fn into_errors(self) -> Vec<ServiceError> {
        self.0
    }
}

/// Payload types that check their own field rules.
pub trait Validate {
    /// Record every violated rule into `violations`.
    fn collect_violations(&self, violations: &mut Violations);

    /// Validate in isolation.
    fn validate(&self) -> Result<(), Vec<ServiceError>> {
        let mut violations = Violations::new();
        self.collect_violations(&mut violations);
        violations.into_result()
    }
}

impl Validate for IdentityData {
    fn collect_violations(&self, violations: &mut Violations) {
        match self.individual_id.as_deref() {
            None => {
                violations.push(ErrorCode::InvalidRequest, "individualId is required");
                violations.push(
                    ErrorCode::InvalidIndividualId,
                    "individualId must not be blank",
                );
            }
            Some(id) if id.trim().is_empty() => {
                violations.push(
                    ErrorCode::InvalidIndividualId,
                    "individualId must not be blank",
                );
            }
            Some(_) => {}
        }
    }
}

impl Validate for VerifiedClaimRequest {
    fn collect_violations(&self, violations: &mut Violations) {
        let has_id = self
            .individual_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty());
        if !has_id {
            violations.push(ErrorCode::InvalidRequest, "individualId is required");
        }
        let has_claims = self
            .verification_detail
            .as_ref()
            .is_some_and(|detail| !detail.is_empty());
        if !has_claims {
            violations.push(
                ErrorCode::InvalidRequest,
                "verificationDetail must contain at least one claim",
            );
        }
    }
}

/// Envelope-level rules, fixed per deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvelopeRules {
    /// Maximum distance between `requestTime` and the server clock.
    /// `None` accepts any well-formed time.
    pub request_time_tolerance: Option<chrono::Duration>,
}

impl EnvelopeRules {
    /// Validate `envelope` and its payload against `now`, returning the
    /// payload when no rule is violated.
    ///
    /// # Errors
    ///
    /// Every envelope and payload violation, in discovery order.
    pub fn check<T: Validate>(
        &self,
        envelope: RequestWrapper<T>,
        now: Timestamp,
    ) -> Result<T, Vec<ServiceError>> {
        let mut violations = Violations::new();

        match envelope.request_time.as_deref() {
            None => violations.push(ErrorCode::InvalidRequest, "requestTime is required"),
            Some(raw) => match Timestamp::parse(raw) {
                Ok(request_time) => {
                    if let Some(tolerance) = self.request_time_tolerance {
                        if !request_time.is_within(&now, tolerance) {
                            violations.push(
                                ErrorCode::InvalidRequest,
                                format!(
                                    "requestTime {raw} is outside the allowed window of {}s",
                                    tolerance.num_seconds()
                                ),
                            );
                        }
                    }
                }
                Err(e) => violations.push(ErrorCode::InvalidRequest, e.to_string()),
            },
        }

        match envelope.request {
            None => {
                violations.push(ErrorCode::InvalidRequest, "request is required");
                Err(violations.into_errors())
            }
            Some(payload) => {
                payload.collect_violations(&mut violations);
                violations.into_result().map(|()| payload)
            }
        }
    }
}
