//! # Identity Records
//!
//! [`IdentityData`] is the demographic record the mock system stores per
//! individual. Localized attributes (names, gender, address parts) are
//! ordered lists of [`LanguageValue`] pairs. They are never collapsed into a
//! map: the same language tag may legitimately appear more than once.
//!
//! Wire fields are all optional so that a request with a missing
//! `individualId` still deserializes and can be reported through the
//! validation error list instead of a parse failure.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::CoreError;

/// A single localized value, e.g. `{"language": "eng", "value": "Jane"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LanguageValue {
    /// Language tag (ISO 639-3 in practice, not enforced).
    pub language: String,
    /// Value in that language.
    pub value: String,
}

impl LanguageValue {
    pub fn new(language: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            value: value.into(),
        }
    }
}

/// The key of an identity record. Never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct IndividualId(String);

impl IndividualId {
    /// Create an identifier, rejecting empty or whitespace-only input.
    pub fn new(raw: impl Into<String>) -> Result<Self, CoreError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(CoreError::BlankIndividualId);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for IndividualId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl Borrow<str> for IndividualId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IndividualId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Demographic record of one individual.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdentityData {
    /// Unique key of the record. Required and non-blank.
    pub individual_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
    /// Opaque photo blob, stored as received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded_photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<Vec<LanguageValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<Vec<LanguageValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<Vec<LanguageValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Vec<LanguageValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<Vec<LanguageValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<Vec<LanguageValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<Vec<LanguageValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<Vec<LanguageValue>>,
}

impl IdentityData {
    /// An otherwise empty record keyed by `individual_id`.
    pub fn new(individual_id: impl Into<String>) -> Self {
        Self {
            individual_id: Some(individual_id.into()),
            ..Self::default()
        }
    }

    /// The validated store key of this record.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::BlankIndividualId`] when the id is absent or blank.
    pub fn key(&self) -> Result<IndividualId, CoreError> {
        match &self.individual_id {
            Some(id) => IndividualId::new(id.clone()),
            None => Err(CoreError::BlankIndividualId),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn individual_id_rejects_blank() {
        assert_eq!(IndividualId::new(""), Err(CoreError::BlankIndividualId));
        assert_eq!(IndividualId::new("  \t"), Err(CoreError::BlankIndividualId));
        assert_eq!(IndividualId::new("123456789").unwrap().as_str(), "123456789");
    }

    #[test]
    fn individual_id_deserialize_validates() {
        assert!(serde_json::from_str::<IndividualId>("\"\"").is_err());
        let id: IndividualId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn key_requires_present_non_blank_id() {
        assert!(IdentityData::default().key().is_err());
        assert!(IdentityData::new(" ").key().is_err());
        assert_eq!(IdentityData::new("777").key().unwrap().as_str(), "777");
    }

    #[test]
    fn wire_format_is_camel_case() {
        let mut identity = IdentityData::new("123456789");
        identity.date_of_birth = Some("20021990".into());
        identity.street_address = Some(vec![LanguageValue::new("eng", "1 Main St")]);
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["individualId"], "123456789");
        assert_eq!(json["dateOfBirth"], "20021990");
        assert_eq!(json["streetAddress"][0]["language"], "eng");
        assert!(json.get("email").is_none());
    }

    #[test]
    fn null_individual_id_deserializes_to_none() {
        let identity: IdentityData =
            serde_json::from_str(r#"{"individualId": null, "email": "a@b.c"}"#).unwrap();
        assert_eq!(identity.individual_id, None);
        assert_eq!(identity.email.as_deref(), Some("a@b.c"));
    }

    #[test]
    fn localized_values_keep_order_and_duplicates() {
        let json = r#"{
            "individualId": "1",
            "fullName": [
                {"language": "eng", "value": "Jane Doe"},
                {"language": "fra", "value": "Jeanne Doe"},
                {"language": "eng", "value": "J. Doe"}
            ]
        }"#;
        let identity: IdentityData = serde_json::from_str(json).unwrap();
        let names = identity.full_name.unwrap();
        assert_eq!(names.len(), 3);
        assert_eq!(names[0].value, "Jane Doe");
        assert_eq!(names[2], LanguageValue::new("eng", "J. Doe"));
    }
}
