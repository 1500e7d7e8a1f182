//! # Identity Routes
//!
//! Routes:
//! - POST   /identity — create (or overwrite) an identity record
//! - GET    /identity/{individualId} — read an identity record
//! - PUT    /identity — replace an existing identity record
//! - POST   /identity/add-verified-claim — attach verified claims
//! - GET    /identity/{individualId}/verified-claims — read verified claims
//!
//! Every write validates the envelope and payload before the store is
//! touched, so a rejected request never changes state. All outcomes are
//! reported with HTTP 200; see [`crate::error::AppError`].

use std::collections::BTreeMap;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use mockid_core::{
    IdentityData, RequestWrapper, ResponseWrapper, StatusResponse, VerifiedClaim,
    VerifiedClaimRequest,
};
use crate::error::AppError;
use crate::extractors::{extract_path, extract_validated_envelope};
use crate::state::AppState;
use crate::store::ClaimSet;

pub const IDENTITY_CREATED: &str = "mock identity data created successfully";
pub const IDENTITY_UPDATED: &str = "mock Identity data updated successfully";
pub const VERIFIED_CLAIM_ADDED: &str = "Verified Claim added successfully";

/// Build the identity router. Paths are relative to the configured
/// context path.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/identity", post(create_identity).put(update_identity))
        .route("/identity/add-verified-claim", post(add_verified_claim))
        .route("/identity/{individual_id}", get(get_identity))
        .route(
            "/identity/{individual_id}/verified-claims",
            get(get_verified_claims),
        )
}

/// POST /identity — Create an identity record.
///
/// An existing record with the same `individualId` is overwritten.
#[utoipa::path(
    post,
    path = "/identity",
    request_body = RequestWrapper<IdentityData>,
    responses(
        (status = 200, description = "Status envelope, or an error envelope on validation failure", body = ResponseWrapper<StatusResponse>),
    ),
    tag = "identity"
)]
pub async fn create_identity(
    State(state): State<AppState>,
    body: Result<Json<RequestWrapper<IdentityData>>, JsonRejection>,
) -> Result<Json<ResponseWrapper<StatusResponse>>, AppError> {
    let identity = extract_validated_envelope(&state, body)?;
    state.store.add_identity(identity)?;
    Ok(Json(ResponseWrapper::success(StatusResponse::new(
        IDENTITY_CREATED,
    ))))
}

/// GET /identity/{individualId} — Read an identity record.
#[utoipa::path(
    get,
    path = "/identity/{individualId}",
    params(("individualId" = String, Path, description = "Individual identifier")),
    responses(
        (status = 200, description = "Identity envelope, or NOT_FOUND error envelope", body = ResponseWrapper<IdentityData>),
    ),
    tag = "identity"
)]
pub async fn get_identity(
    State(state): State<AppState>,
    individual_id: Result<Path<String>, PathRejection>,
) -> Result<Json<ResponseWrapper<IdentityData>>, AppError> {
    let individual_id = extract_path(individual_id)?;
    let identity = state.store.get_identity(&individual_id)?;
    Ok(Json(ResponseWrapper::success(identity)))
}

/// PUT /identity — Replace an existing identity record.
///
/// Same validation rules as create. The whole record is replaced; fields
/// left out of the request are cleared.
#[utoipa::path(
    put,
    path = "/identity",
    request_body = RequestWrapper<IdentityData>,
    responses(
        (status = 200, description = "Status envelope, or an error envelope", body = ResponseWrapper<StatusResponse>),
    ),
    tag = "identity"
)]
pub async fn update_identity(
    State(state): State<AppState>,
    body: Result<Json<RequestWrapper<IdentityData>>, JsonRejection>,
) -> Result<Json<ResponseWrapper<StatusResponse>>, AppError> {
    let identity = extract_validated_envelope(&state, body)?;
    state.store.update_identity(identity)?;
    Ok(Json(ResponseWrapper::success(StatusResponse::new(
        IDENTITY_UPDATED,
    ))))
}

/// POST /identity/add-verified-claim — Attach verified claims to an identity.
#[utoipa::path(
    post,
    path = "/identity/add-verified-claim",
    request_body = RequestWrapper<VerifiedClaimRequest>,
    responses(
        (status = 200, description = "Status envelope, or an error envelope", body = ResponseWrapper<StatusResponse>),
    ),
    tag = "identity"
)]
pub async fn add_verified_claim(
    State(state): State<AppState>,
    body: Result<Json<RequestWrapper<VerifiedClaimRequest>>, JsonRejection>,
) -> Result<Json<ResponseWrapper<StatusResponse>>, AppError> {
    let request = extract_validated_envelope(&state, body)?;
    state.store.add_verified_claim(request)?;
    Ok(Json(ResponseWrapper::success(StatusResponse::new(
        VERIFIED_CLAIM_ADDED,
    ))))
}

/// GET /identity/{individualId}/verified-claims — Read recorded claims,
/// keyed by claim name.
#[utoipa::path(
    get,
    path = "/identity/{individualId}/verified-claims",
    params(("individualId" = String, Path, description = "Individual identifier")),
    responses(
        (status = 200, description = "Claims envelope, or NOT_FOUND error envelope", body = ResponseWrapper<BTreeMap<String, VerifiedClaim>>),
    ),
    tag = "identity"
)]
pub async fn get_verified_claims(
    State(state): State<AppState>,
    individual_id: Result<Path<String>, PathRejection>,
) -> Result<Json<ResponseWrapper<ClaimSet>>, AppError> {
    let individual_id = extract_path(individual_id)?;
    let claims = state.store.get_verified_claims(&individual_id)?;
    Ok(Json(ResponseWrapper::success(claims)))
}
