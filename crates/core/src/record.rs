use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding the ISO date a case was registered under.
pub const DATE_FIELD: &str = "case_date";
/// Default grouping field for the category breakdown.
pub const DEFAULT_GROUP_FIELD: &str = "case_type";
/// Nested field holding the victim age used by the histogram.
pub const AGE_FIELD: &str = "victim.age";

/// Mapping from coefficient name to a numeric (or numeric-string) weight,
/// in the order the model API reported them.
pub type CoefficientMap = Map<String, Value>;

/// A single case as served by the API: an open-ended mapping of named
/// fields. The aggregation core only ever reads fields; records are never
/// mutated after load.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseRecord(pub Map<String, Value>);

impl CaseRecord {
    /// Resolve a field path against this record. Absent fields, non-object
    /// intermediates, and `null` leaves all resolve to `None`.
    pub fn resolve(&self, path: &KeyPath) -> Option<&Value> {
        let mut segments = path.segments();
        let mut current = self.0.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        (!current.is_null()).then_some(current)
    }

    /// The record's case date, if present and ISO-parseable.
    pub fn case_date(&self) -> Option<NaiveDate> {
        let raw = self.0.get(DATE_FIELD)?.as_str()?;
        raw.parse::<NaiveDate>().ok()
    }
}

impl From<Map<String, Value>> for CaseRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// A dotted field-path specifier, e.g. `case_type` or `victim.age`.
///
/// Resolution is total: a path that does not exist in a record is an
/// ordinary absent value, never an error.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyPath(String);

impl KeyPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

impl From<&str> for KeyPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl std::fmt::Display for KeyPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Coerce a resolved value to the stable string key used for tallying.
/// `null` is treated as absent; composite values use their compact JSON
/// encoding so distinct shapes stay distinct keys.
pub fn value_key(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{value_key, CaseRecord, KeyPath};

    fn record(value: serde_json::Value) -> CaseRecord {
        match value {
            serde_json::Value::Object(fields) => CaseRecord(fields),
            other => panic!("test record must be an object, got {other}"),
        }
    }

    #[test]
    fn resolves_top_level_and_nested_paths() {
        let case = record(json!({
            "case_type": "Robbery",
            "victim": { "age": 34 }
        }));

        assert_eq!(
            case.resolve(&KeyPath::from("case_type")),
            Some(&json!("Robbery"))
        );
        assert_eq!(case.resolve(&KeyPath::from("victim.age")), Some(&json!(34)));
    }

    #[test]
    fn missing_intermediate_resolves_to_absent() {
        let case = record(json!({ "victim": {} }));
        assert_eq!(case.resolve(&KeyPath::from("victim.age")), None);
        assert_eq!(case.resolve(&KeyPath::from("witness.age")), None);
    }

    #[test]
    fn scalar_intermediate_resolves_to_absent() {
        let case = record(json!({ "victim": "unknown" }));
        assert_eq!(case.resolve(&KeyPath::from("victim.age")), None);
    }

    #[test]
    fn null_leaf_is_absent() {
        let case = record(json!({ "case_type": null }));
        assert_eq!(case.resolve(&KeyPath::from("case_type")), None);
    }

    #[test]
    fn case_date_requires_iso_format() {
        let valid = record(json!({ "case_date": "2024-03-15" }));
        let invalid = record(json!({ "case_date": "15/03/2024" }));
        let missing = record(json!({}));

        assert!(valid.case_date().is_some());
        assert!(invalid.case_date().is_none());
        assert!(missing.case_date().is_none());
    }

    #[test]
    fn value_keys_are_stable_strings() {
        assert_eq!(value_key(&json!("Theft")), Some("Theft".to_string()));
        assert_eq!(value_key(&json!(42)), Some("42".to_string()));
        assert_eq!(value_key(&json!(true)), Some("true".to_string()));
        assert_eq!(value_key(&json!(null)), None);
    }
}
