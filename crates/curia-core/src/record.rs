//! Schema-agnostic record and patch types.
//!
//! This module provides [`Record`], a validated JSON object representing one
//! domain entity, and [`Patch`], a validated set of field changes. Both are
//! opaque beyond the fields a page is configured to touch; interpretation is
//! left to the backend.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::types::{FieldPath, RecordKey};

/// One domain entity returned by the backend.
///
/// This type guarantees the value is a JSON object. Beyond that it is
/// schema-agnostic: a user, an event, a service, a sale, a boost, and a
/// dating pair all flow through the same shape.
///
/// # Example
///
/// ```
/// use curia_core::Record;
/// use serde_json::json;
///
/// let record = Record::new(json!({
///     "_id": "u7",
///     "firstname": "Ada",
/// })).unwrap();
///
/// assert_eq!(record.key("_id").unwrap().as_str(), "u7");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record(Value);

impl Record {
    /// Create a new `Record` from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns a precondition error if the value is not a JSON object.
    pub fn new(value: Value) -> Result<Self, Error> {
        if !value.is_object() {
            return Err(Error::precondition(format!(
                "record must be a JSON object, got {value}"
            )));
        }
        Ok(Self(value))
    }

    fn fields(&self) -> &Map<String, Value> {
        // Safe: validated at construction
        self.0.as_object().unwrap()
    }

    /// Extract the identifier stored under `id_field`.
    ///
    /// # Errors
    ///
    /// A missing field, or one holding anything but a string or number, is a
    /// precondition error.
    pub fn key(&self, id_field: &str) -> Result<RecordKey, Error> {
        let value = self.fields().get(id_field).ok_or_else(|| {
            Error::precondition(format!("record has no identifier field '{id_field}'"))
        })?;
        RecordKey::from_value(value)
    }

    /// Get a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields().get(key)
    }

    /// Resolve a field path and coerce the leaf to text.
    pub fn text(&self, path: &FieldPath) -> String {
        path.text(&self.0)
    }

    /// Merge a patch into this record, replacing the named top-level fields.
    pub fn merge(&mut self, patch: &Patch) {
        // Safe: validated at construction
        let fields = self.0.as_object_mut().unwrap();
        for (field, value) in patch.iter() {
            fields.insert(field.clone(), value.clone());
        }
    }

    /// View the record as a JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume and return the inner JSON value.
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Record::new(value).map_err(serde::de::Error::custom)
    }
}

/// A validated set of field changes for an update.
///
/// Construction rejects anything but a JSON object, so a patch can always be
/// merged field-by-field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch(Map<String, Value>);

impl Patch {
    /// Create a patch from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns a precondition error if the value is not a JSON object.
    pub fn new(value: Value) -> Result<Self, Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(Error::precondition(format!(
                "patch must be a JSON object, got {other}"
            ))),
        }
    }

    /// Add or replace one field change.
    pub fn set(mut self, field: impl Into<String>, value: Value) -> Self {
        self.0.insert(field.into(), value);
        self
    }

    /// Returns true when the patch names the given field.
    pub fn touches(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// View the patch as a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Record> for Patch {
    /// A server-returned record used as the authoritative set of changes.
    fn from(record: Record) -> Self {
        match record.into_value() {
            Value::Object(map) => Self(map),
            _ => unreachable!("records are always objects"),
        }
    }
}

impl Serialize for Patch {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_must_be_an_object() {
        assert!(Record::new(json!([1, 2, 3])).is_err());
        assert!(Record::new(json!("plain string")).is_err());
        assert!(Record::new(json!(null)).is_err());
        assert!(Record::new(json!({ "_id": "x" })).is_ok());
    }

    #[test]
    fn key_extraction() {
        let record = Record::new(json!({ "_id": "u7", "name": "Ada" })).unwrap();
        assert_eq!(record.key("_id").unwrap(), RecordKey::new("u7"));
    }

    #[test]
    fn key_missing_field_fails() {
        let record = Record::new(json!({ "name": "Ada" })).unwrap();
        assert!(matches!(record.key("_id"), Err(Error::Precondition { .. })));
    }

    #[test]
    fn merge_replaces_named_fields_only() {
        let mut record = Record::new(json!({
            "_id": "u7",
            "status": "inactive",
            "email": "ada@example.com"
        }))
        .unwrap();

        let patch = Patch::default().set("status", json!("active"));
        record.merge(&patch);

        assert_eq!(record.get("status").unwrap(), "active");
        assert_eq!(record.get("email").unwrap(), "ada@example.com");
    }

    #[test]
    fn patch_must_be_an_object() {
        assert!(Patch::new(json!("nope")).is_err());
        assert!(Patch::new(json!({ "status": "active" })).is_ok());
    }

    #[test]
    fn deserialize_rejects_non_objects() {
        let result: Result<Record, _> = serde_json::from_str("[1, 2]");
        assert!(result.is_err());

        let record: Record = serde_json::from_str(r#"{ "_id": "u1" }"#).unwrap();
        assert_eq!(record.key("_id").unwrap().as_str(), "u1");
    }
}
