//! The pet record document and the coercion of raw request bodies into it.
//!
//! # Design
//! Handlers forward request bodies untouched as `RecordInput`, whose fields
//! are raw JSON values. The store owns the schema: it coerces the values into
//! `PetFields` and decides whether the required names are present. This keeps
//! the HTTP layer free of validation, matching the pass-through contract.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use uuid::Uuid;

use crate::store::StoreError;

pub const PET_NAME: &str = "petName";
pub const OWNER_NAME: &str = "ownerName";
pub const PET_BREED: &str = "petBreed";
pub const PET_AGE: &str = "petAge";
pub const SPECIAL_NOTES: &str = "specialNotes";

/// Store-assigned identifier of a pet record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Cast a path segment to an id. A segment that is not an id is a
    /// validation failure on `_id`, not a missing record.
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        raw.parse()
            .map_err(|_| StoreError::ValidationFailed(vec!["_id".to_string()]))
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A stored pet record. Absent fields are omitted from the JSON document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetRecord {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_age: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_notes: Option<String>,
}

impl PetRecord {
    pub fn from_fields(id: RecordId, fields: PetFields) -> Self {
        Self {
            id,
            pet_name: fields.pet_name,
            owner_name: fields.owner_name,
            pet_breed: fields.pet_breed,
            pet_age: fields.pet_age,
            special_notes: fields.special_notes,
        }
    }
}

/// Request body of create and update, taken verbatim. JSON `null` and a
/// missing key both deserialize to `None`; unknown keys are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordInput {
    pub pet_name: Option<Value>,
    pub owner_name: Option<Value>,
    pub pet_breed: Option<Value>,
    pub pet_age: Option<Value>,
    pub special_notes: Option<Value>,
}

/// The five mutable fields after type coercion.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PetFields {
    pub pet_name: Option<String>,
    pub owner_name: Option<String>,
    pub pet_breed: Option<String>,
    pub pet_age: Option<Number>,
    pub special_notes: Option<String>,
}

impl RecordInput {
    /// Coerce for an insert: names must be present and non-empty.
    pub fn into_new_fields(self) -> Result<PetFields, StoreError> {
        self.coerce(true)
    }

    /// Coerce for a replacement. Required-field checks do not run on update.
    pub fn into_replacement_fields(self) -> Result<PetFields, StoreError> {
        self.coerce(false)
    }

    fn coerce(self, require_names: bool) -> Result<PetFields, StoreError> {
        let mut invalid = Vec::new();

        let pet_name = coerce_text(PET_NAME, self.pet_name, &mut invalid);
        let owner_name = coerce_text(OWNER_NAME, self.owner_name, &mut invalid);
        let pet_breed = coerce_text(PET_BREED, self.pet_breed, &mut invalid);
        let pet_age = coerce_number(PET_AGE, self.pet_age, &mut invalid);
        let special_notes = coerce_text(SPECIAL_NOTES, self.special_notes, &mut invalid);

        if require_names {
            for (field, value) in [(PET_NAME, &pet_name), (OWNER_NAME, &owner_name)] {
                let missing = value.as_deref().map_or(true, str::is_empty);
                if missing && !invalid.iter().any(|f| f == field) {
                    invalid.push(field.to_string());
                }
            }
        }

        if !invalid.is_empty() {
            return Err(StoreError::ValidationFailed(invalid));
        }

        Ok(PetFields {
            pet_name,
            owner_name,
            pet_breed,
            pet_age,
            special_notes,
        })
    }
}

fn coerce_text(field: &str, value: Option<Value>, invalid: &mut Vec<String>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => None,
        Value::Array(_) | Value::Object(_) => {
            invalid.push(field.to_string());
            None
        }
    }
}

fn coerce_number(field: &str, value: Option<Value>, invalid: &mut Vec<String>) -> Option<Number> {
    match value? {
        Value::Number(n) => Some(n),
        Value::Null => None,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            let parsed = parse_number(trimmed);
            if parsed.is_none() {
                invalid.push(field.to_string());
            }
            parsed
        }
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
            invalid.push(field.to_string());
            None
        }
    }
}

fn parse_number(s: &str) -> Option<Number> {
    if let Ok(n) = s.parse::<i64>() {
        return Some(n.into());
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: Value) -> RecordInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn record_serializes_with_document_id_and_omits_absent_fields() {
        let record = PetRecord {
            id: "00000000-0000-0000-0000-000000000001".parse().unwrap(),
            pet_name: Some("Rex".to_string()),
            owner_name: Some("Alice".to_string()),
            pet_breed: None,
            pet_age: Some(3.into()),
            special_notes: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            json!({
                "_id": "00000000-0000-0000-0000-000000000001",
                "petName": "Rex",
                "ownerName": "Alice",
                "petAge": 3
            })
        );
    }

    #[test]
    fn new_fields_keep_values_verbatim() {
        let fields = input(json!({
            "petName": "  Rex ",
            "ownerName": "Alice",
            "petBreed": "Lab",
            "petAge": 3,
            "specialNotes": "none"
        }))
        .into_new_fields()
        .unwrap();
        assert_eq!(fields.pet_name.as_deref(), Some("  Rex "));
        assert_eq!(fields.pet_age, Some(3.into()));
        assert_eq!(fields.special_notes.as_deref(), Some("none"));
    }

    #[test]
    fn numeric_string_age_is_coerced() {
        let fields = input(json!({"petName": "Rex", "ownerName": "Alice", "petAge": " 7 "}))
            .into_new_fields()
            .unwrap();
        assert_eq!(fields.pet_age, Some(7.into()));

        let fields = input(json!({"petName": "Rex", "ownerName": "Alice", "petAge": "2.5"}))
            .into_new_fields()
            .unwrap();
        assert_eq!(fields.pet_age, Number::from_f64(2.5));
    }

    #[test]
    fn empty_age_string_is_absent() {
        let fields = input(json!({"petName": "Rex", "ownerName": "Alice", "petAge": ""}))
            .into_new_fields()
            .unwrap();
        assert!(fields.pet_age.is_none());
    }

    #[test]
    fn non_numeric_age_fails() {
        let err = input(json!({"petName": "Rex", "ownerName": "Alice", "petAge": "abc"}))
            .into_new_fields()
            .unwrap_err();
        assert!(matches!(err, StoreError::ValidationFailed(ref f) if f == &["petAge"]));
    }

    #[test]
    fn numbers_are_coerced_to_text() {
        let fields = input(json!({"petName": 42, "ownerName": true}))
            .into_new_fields()
            .unwrap();
        assert_eq!(fields.pet_name.as_deref(), Some("42"));
        assert_eq!(fields.owner_name.as_deref(), Some("true"));
    }

    #[test]
    fn missing_and_empty_names_are_reported_together() {
        let err = input(json!({"ownerName": "", "petBreed": "Lab"}))
            .into_new_fields()
            .unwrap_err();
        match err {
            StoreError::ValidationFailed(fields) => {
                assert_eq!(fields, vec!["petName".to_string(), "ownerName".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn object_name_is_reported_once() {
        let err = input(json!({"petName": {"first": "Rex"}, "ownerName": "Alice"}))
            .into_new_fields()
            .unwrap_err();
        assert!(matches!(err, StoreError::ValidationFailed(ref f) if f == &["petName"]));
    }

    #[test]
    fn replacement_allows_absent_names() {
        let fields = input(json!({"petBreed": "Lab", "petName": null}))
            .into_replacement_fields()
            .unwrap();
        assert!(fields.pet_name.is_none());
        assert!(fields.owner_name.is_none());
        assert_eq!(fields.pet_breed.as_deref(), Some("Lab"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let fields = input(json!({"petName": "Rex", "ownerName": "Alice", "_id": "x", "vet": "Bob"}))
            .into_new_fields()
            .unwrap();
        assert_eq!(fields.pet_name.as_deref(), Some("Rex"));
    }

    #[test]
    fn malformed_id_is_a_validation_failure() {
        let err = RecordId::parse("not-an-id").unwrap_err();
        assert!(matches!(err, StoreError::ValidationFailed(ref f) if f == &["_id"]));
    }
}
