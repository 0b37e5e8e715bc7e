//! Search filtering over a fetched collection.
//!
//! Pure functions: the filtered view is always derivable from the full
//! collection, the configured field paths, and the query alone.

use crate::record::Record;
use crate::types::FieldPath;

/// Normalize a raw query: trimmed and lowercased.
pub fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Substring match over any of the configured fields.
///
/// `query` must already be normalized. The empty query matches everything.
pub fn matches(record: &Record, fields: &[FieldPath], query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| record.text(field).to_lowercase().contains(query))
}

/// Derive the filtered view, preserving the order of `records`.
pub fn derive(records: &[Record], fields: &[FieldPath], query: &str) -> Vec<Record> {
    records
        .iter()
        .filter(|record| matches(record, fields, query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::new(value).unwrap()
    }

    fn fields(paths: &[&str]) -> Vec<FieldPath> {
        paths.iter().map(|p| FieldPath::new(p).unwrap()).collect()
    }

    #[test]
    fn empty_query_matches_everything() {
        let r = record(json!({ "name": "Ada" }));
        assert!(matches(&r, &fields(&["name"]), ""));
        assert!(matches(&r, &[], ""));
    }

    #[test]
    fn match_is_case_insensitive() {
        let r = record(json!({ "name": "Harborview Picnic" }));
        assert!(matches(&r, &fields(&["name"]), "harbor"));
        assert!(matches(&r, &fields(&["name"]), "PICNIC".to_lowercase().as_str()));
    }

    #[test]
    fn any_field_may_match() {
        let r = record(json!({ "name": "Ada", "zipcode": "90210" }));
        let f = fields(&["name", "zipcode"]);
        assert!(matches(&r, &f, "902"));
        assert!(!matches(&r, &f, "555"));
    }

    #[test]
    fn numeric_fields_match_as_text() {
        let r = record(json!({ "phone": 5551234 }));
        assert!(matches(&r, &fields(&["phone"]), "555"));
    }

    #[test]
    fn derive_preserves_order() {
        let records: Vec<Record> = ["Carol", "Alice", "Carl", "Bob"]
            .iter()
            .map(|n| record(json!({ "name": n })))
            .collect();

        let derived = derive(&records, &fields(&["name"]), "car");
        let names: Vec<String> = derived
            .iter()
            .map(|r| r.get("name").unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["Carol", "Carl"]);
    }

    #[test]
    fn derive_with_empty_query_is_identity() {
        let records: Vec<Record> = (0..5)
            .map(|i| record(json!({ "_id": format!("u{i}") })))
            .collect();
        let derived = derive(&records, &fields(&["_id"]), "");
        assert_eq!(derived, records);
    }

    #[test]
    fn missing_field_never_matches() {
        let r = record(json!({ "name": "Ada" }));
        assert!(!matches(&r, &fields(&["nickname"]), "ada"));
    }
}
