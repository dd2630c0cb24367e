//! Wire DTOs for the pet record API.
//!
//! # Design
//! These mirror the server's document shape but are defined independently so
//! the client does not link the server. Integration tests catch schema drift.
//! The id is kept as an opaque string: the client never interprets it.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A pet record as returned by list and get. Any field but the id may be
/// absent, since an update can clear even the names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PetRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
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

/// Request payload for create and update: the five form fields as typed.
///
/// Every field is sent, empty or not. `pet_age` stays text; the store does
/// the numeric coercion.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecordForm {
    pub pet_name: String,
    pub owner_name: String,
    pub pet_breed: String,
    pub pet_age: String,
    pub special_notes: String,
}

impl RecordForm {
    /// Populate a form from a stored record; absent fields become empty.
    pub fn from_record(record: &PetRecord) -> Self {
        Self {
            pet_name: record.pet_name.clone().unwrap_or_default(),
            owner_name: record.owner_name.clone().unwrap_or_default(),
            pet_breed: record.pet_breed.clone().unwrap_or_default(),
            pet_age: record
                .pet_age
                .as_ref()
                .map(Number::to_string)
                .unwrap_or_default(),
            special_notes: record.special_notes.clone().unwrap_or_default(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// `{message}` body of a successful create, update, or delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Confirmation {
    pub message: String,
}

/// `{message, error}` body of a failed request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default)]
    pub error: Option<String>,
}
