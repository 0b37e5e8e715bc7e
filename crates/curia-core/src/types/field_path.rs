//! Field path type for record traversal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::Error;

/// A dot-separated path into a record, e.g. `"category.name"`.
///
/// Paths traverse nested JSON objects only; an absent intermediate object,
/// an array, or a missing leaf all resolve to nothing.
///
/// # Example
///
/// ```
/// use curia_core::FieldPath;
/// use serde_json::json;
///
/// let path = FieldPath::new("category.name").unwrap();
/// let value = json!({ "category": { "name": "Garden" } });
/// assert_eq!(path.text(&value), "Garden");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dotted path, validating that no segment is empty.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        if s.is_empty() {
            return Err(Error::precondition("field path must not be empty"));
        }

        let segments: Vec<String> = s.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(Error::precondition(format!(
                "field path '{s}' contains an empty segment"
            )));
        }

        Ok(Self { segments })
    }

    /// Resolve the path against a JSON value, traversing nested objects.
    pub fn resolve<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        let mut current = value;
        for segment in &self.segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Resolve the path and coerce the leaf into its text form.
    ///
    /// Strings are returned as-is, numbers and booleans via their display
    /// form; null, missing fields, arrays, and objects coerce to the empty
    /// string so they never match a search query.
    pub fn text(&self, value: &Value) -> String {
        match self.resolve(value) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl FromStr for FieldPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for FieldPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FieldPath::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn top_level_field() {
        let path = FieldPath::new("email").unwrap();
        let value = json!({ "email": "a@b.com" });
        assert_eq!(path.text(&value), "a@b.com");
    }

    #[test]
    fn nested_field() {
        let path = FieldPath::new("category.name").unwrap();
        let value = json!({ "category": { "name": "Garden" } });
        assert_eq!(path.text(&value), "Garden");
    }

    #[test]
    fn missing_intermediate_is_empty() {
        let path = FieldPath::new("category.name").unwrap();
        let value = json!({ "title": "no category here" });
        assert_eq!(path.text(&value), "");
    }

    #[test]
    fn number_coerces_to_text() {
        let path = FieldPath::new("phone").unwrap();
        let value = json!({ "phone": 5551234 });
        assert_eq!(path.text(&value), "5551234");
    }

    #[test]
    fn null_and_containers_are_empty() {
        let value = json!({ "a": null, "b": [1, 2], "c": { "d": 1 } });
        for field in ["a", "b", "c"] {
            assert_eq!(FieldPath::new(field).unwrap().text(&value), "");
        }
    }

    #[test]
    fn array_blocks_traversal() {
        let path = FieldPath::new("avatar.url").unwrap();
        let value = json!({ "avatar": [{ "url": "https://cdn/x.png" }] });
        assert_eq!(path.text(&value), "");
    }

    #[test]
    fn empty_segment_rejected() {
        assert!(FieldPath::new("").is_err());
        assert!(FieldPath::new("a..b").is_err());
        assert!(FieldPath::new(".a").is_err());
    }
}
