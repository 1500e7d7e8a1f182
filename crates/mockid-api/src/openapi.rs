//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented identity routes into a single OpenAPI
//! document served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use mockid_core::{
    ErrorCode, IdentityData, LanguageValue, ServiceError, StatusResponse, VerifiedClaim,
    VerifiedClaimRequest,
};
use utoipa::OpenApi;

use crate::state::AppState;

/// OpenAPI document for the mock identity system.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mock Identity System",
        description = "In-memory identity backend for authentication and eSignet integration testing.\n\nEvery identity endpoint answers HTTP 200. Failures are reported in the envelope's `errors` list.",
        license(name = "MPL-2.0")
    ),
    servers(
        (url = "http://localhost:8082", description = "Local development server"),
    ),
    paths(
        crate::routes::identity::create_identity,
        crate::routes::identity::get_identity,
        crate::routes::identity::update_identity,
        crate::routes::identity::add_verified_claim,
        crate::routes::identity::get_verified_claims,
    ),
    components(schemas(
        IdentityData,
        LanguageValue,
        VerifiedClaimRequest,
        VerifiedClaim,
        StatusResponse,
        ServiceError,
        ErrorCode,
    )),
    tags(
        (name = "identity", description = "Identity records and verified claims"),
    )
)]
pub struct ApiDoc;

/// Router serving `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_identity_path() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/identity",
            "/identity/{individualId}",
            "/identity/add-verified-claim",
            "/identity/{individualId}/verified-claims",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {expected}, got {paths:?}"
            );
        }
    }

    #[test]
    fn document_serializes_to_json() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        assert_eq!(json["info"]["title"], "Mock Identity System");
        assert!(json["components"]["schemas"]["IdentityData"].is_object());
    }
}
