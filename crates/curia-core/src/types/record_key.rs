//! Record identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;

use serde_json::Value;

use crate::error::Error;

/// The normalized identifier of a record.
///
/// Identifiers arrive from the backend as JSON strings or numbers; both
/// normalize to their text form so matching is always by value equality,
/// never by reference or list position.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordKey(String);

impl RecordKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Build a key from a JSON identifier value.
    ///
    /// # Errors
    ///
    /// Any JSON type other than string or number is a precondition error.
    pub fn from_value(value: &Value) -> Result<Self, Error> {
        match value {
            Value::String(s) => Ok(Self(s.clone())),
            Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(Error::precondition(format!(
                "identifier must be a string or number, got {other}"
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
