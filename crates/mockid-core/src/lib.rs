//! # mockid-core — Domain Types for the Mock Identity System
//!
//! The mock identity system stands in for a real identity provider during
//! authentication and eSignet integration testing. This crate holds the
//! wire-level domain model shared by the HTTP service and its tests. It has
//! no HTTP or storage dependencies.
//!
//! ## Modules
//!
//! - [`identity`] — `IdentityData`, its localized `LanguageValue` fields,
//!   and the validated `IndividualId` key.
//! - [`claims`] — verified-claim requests and the tagged `ClaimValue` type.
//! - [`envelope`] — `RequestWrapper` / `ResponseWrapper` and `ServiceError`.
//! - [`validation`] — the `Validate` trait and envelope checks. Every
//!   violation is collected, not just the first.
//! - [`temporal`] — UTC millisecond timestamps used by the envelopes.
//! - [`error`] — error codes and the crate error type.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.
//! - Wire types use camelCase JSON field names.

pub mod claims;
pub mod envelope;
pub mod error;
pub mod identity;
pub mod temporal;
pub mod validation;

pub use claims::{ClaimValue, VerifiedClaim, VerifiedClaimRequest};
pub use envelope::{RequestWrapper, ResponseWrapper, ServiceError, StatusResponse};
pub use error::{CoreError, ErrorCode};
pub use identity::{IdentityData, IndividualId, LanguageValue};
pub use temporal::Timestamp;
pub use validation::{EnvelopeRules, Validate, Violations};
