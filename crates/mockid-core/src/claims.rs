//! # Verified Claims
//!
//! A verified claim annotates an identity with structured verification
//! metadata, e.g. `{"email": {"trust_framework": "eidas", "time": "..."}}`.
//! The metadata shape is claim-specific, so each value is held as a
//! [`ClaimValue`]: a tagged JSON value with an explicit variant per kind.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::temporal::Timestamp;

/// Structured verification metadata for one claim.
///
/// Serializes exactly like the equivalent JSON value. Object keys are kept
/// in sorted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(Vec<ClaimValue>),
    Object(BTreeMap<String, ClaimValue>),
}

impl ClaimValue {
    /// Look up a field when this value is an object.
    pub fn get(&self, key: &str) -> Option<&ClaimValue> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Value> for ClaimValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<ClaimValue> for Value {
    fn from(value: ClaimValue) -> Self {
        match value {
            ClaimValue::Null => Value::Null,
            ClaimValue::Bool(b) => Value::Bool(b),
            ClaimValue::Number(n) => Value::Number(n),
            ClaimValue::String(s) => Value::String(s),
            ClaimValue::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            ClaimValue::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Payload of `POST /identity/add-verified-claim`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedClaimRequest {
    /// Identity the claims are attached to. Required.
    pub individual_id: Option<String>,
    /// Whether the verification is currently in force.
    #[serde(default)]
    pub active: bool,
    /// Claim name to verification metadata. Must hold at least one entry.
    #[schema(value_type = Object)]
    pub verification_detail: Option<BTreeMap<String, ClaimValue>>,
}

impl VerifiedClaimRequest {
    pub fn new(individual_id: impl Into<String>, active: bool) -> Self {
        Self {
            individual_id: Some(individual_id.into()),
            active,
            verification_detail: Some(BTreeMap::new()),
        }
    }

    /// Add one claim to the verification detail.
    pub fn with_claim(mut self, name: impl Into<String>, detail: impl Into<ClaimValue>) -> Self {
        self.verification_detail
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), detail.into());
        self
    }
}

/// A claim as recorded against an identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedClaim {
    pub active: bool,
    #[schema(value_type = Object)]
    pub detail: ClaimValue,
    /// When this claim was last written.
    #[schema(value_type = String, example = "2026-01-15T12:00:00.000Z")]
    pub updated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn claim_value_deserializes_every_json_kind() {
        let raw = json!({
            "trust_framework": "eidas",
            "assurance_level": 2,
            "score": 0.5,
            "verified": true,
            "evidence": [{"type": "document"}, null]
        });
        let value: ClaimValue = serde_json::from_value(raw).unwrap();
        assert_eq!(
            value.get("trust_framework").and_then(ClaimValue::as_str),
            Some("eidas")
        );
        assert!(matches!(value.get("assurance_level"), Some(ClaimValue::Number(_))));
        assert!(matches!(value.get("verified"), Some(ClaimValue::Bool(true))));
        match value.get("evidence") {
            Some(ClaimValue::Array(items)) => {
                assert!(matches!(items[0], ClaimValue::Object(_)));
                assert_eq!(items[1], ClaimValue::Null);
            }
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn claim_value_serializes_like_json() {
        let raw = json!({"b": [1, "two", false, null], "a": {"nested": -3}});
        let value = ClaimValue::from(raw.clone());
        assert_eq!(serde_json::to_value(&value).unwrap(), raw);
        assert_eq!(Value::from(value), raw);
    }

    #[test]
    fn request_accepts_wire_shape() {
        let request: VerifiedClaimRequest = serde_json::from_value(json!({
            "individualId": "123456789",
            "active": true,
            "verificationDetail": {"testClaim": {"trust_framework": "testTrustFramework"}}
        }))
        .unwrap();
        assert_eq!(request.individual_id.as_deref(), Some("123456789"));
        assert!(request.active);
        let detail = request.verification_detail.unwrap();
        assert_eq!(
            detail["testClaim"].get("trust_framework").and_then(ClaimValue::as_str),
            Some("testTrustFramework")
        );
    }

    #[test]
    fn missing_active_defaults_to_false() {
        let request: VerifiedClaimRequest =
            serde_json::from_value(json!({"individualId": "1", "verificationDetail": {}}))
                .unwrap();
        assert!(!request.active);
        assert_eq!(request.verification_detail, Some(BTreeMap::new()));
    }

    #[test]
    fn with_claim_builds_detail() {
        let request = VerifiedClaimRequest::new("1", true)
            .with_claim("email", json!({"trust_framework": "pwd"}))
            .with_claim("phone", json!({"trust_framework": "otp"}));
        let detail = request.verification_detail.unwrap();
        assert_eq!(detail.len(), 2);
        assert!(detail.contains_key("email"));
    }
}
