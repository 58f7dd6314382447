//! Schema-less access to records returned by the remote APIs.
//!
//! A record is whatever JSON object the API sent. Renderers read it through
//! [`Record`], which funnels every optional-field check through one presence
//! predicate, [`is_present`].

use itertools::Itertools;
use serde_json::{Map, Value};

/// Maximum number of entries shown when previewing a nested collection.
pub const PREVIEW_CAP: usize = 10;

/// A field counts as present when it exists and is not null, an empty string,
/// an empty array or object, or numeric zero.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::Bool(_) => true,
    }
}

/// Render a scalar for display: strings without quotes, everything else as JSON.
pub fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Borrowed read-only view over one record.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> Record<'a> {
    /// Wrap a JSON value. Non-object values behave as an empty record.
    pub fn new(value: &'a Value) -> Self {
        Self {
            fields: value.as_object(),
        }
    }

    /// Raw field access, including null values.
    pub fn raw(&self, key: &str) -> Option<&'a Value> {
        self.fields.and_then(|f| f.get(key))
    }

    /// Field value if it passes [`is_present`].
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.raw(key).filter(|v| is_present(v))
    }

    /// Field exists and is not null. Used for booleans, where `false` is data.
    pub fn defined(&self, key: &str) -> Option<&'a Value> {
        self.raw(key).filter(|v| !v.is_null())
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Present field rendered for display.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(display)
    }

    /// Present field rendered for display, or the fallback.
    pub fn text_or(&self, key: &str, fallback: &str) -> String {
        self.text(key).unwrap_or_else(|| fallback.to_string())
    }

    /// First present field among `keys`.
    pub fn first_text(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|k| self.text(k))
    }

    /// Nested object under `key`, as a record.
    pub fn nested(&self, key: &str) -> Option<Record<'a>> {
        self.get(key).filter(|v| v.is_object()).map(Record::new)
    }

    /// Non-empty array under `key`.
    pub fn list(&self, key: &str) -> Option<&'a Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }
}

/// Comma-joined preview of at most [`PREVIEW_CAP`] labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub shown: String,
    pub total: usize,
    pub hidden: usize,
}

impl Preview {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let total = labels.len();
        let shown = labels.iter().take(PREVIEW_CAP).join(", ");
        Self {
            shown,
            total,
            hidden: total.saturating_sub(PREVIEW_CAP),
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.hidden > 0
    }

    /// `...and N more` suffix, if entries were dropped.
    pub fn more_suffix(&self) -> Option<String> {
        self.is_truncated()
            .then(|| format!("...and {} more", self.hidden))
    }
}

/// Format a number with comma thousands separators, keeping any fraction.
pub fn group_thousands(value: &Value) -> String {
    let raw = display(value);
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    if !int_part.chars().all(|c| c.is_ascii_digit()) {
        return raw;
    }

    let grouped = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .join(",");

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_presence_predicate() {
        assert!(!is_present(&json!(null)));
        assert!(!is_present(&json!("")));
        assert!(!is_present(&json!([])));
        assert!(!is_present(&json!({})));
        assert!(!is_present(&json!(0)));
        assert!(!is_present(&json!(0.0)));
        assert!(is_present(&json!(false)));
        assert!(is_present(&json!("x")));
        assert!(is_present(&json!(3.5)));
        assert!(is_present(&json!(["a"])));
    }

    #[test]
    fn test_record_access() {
        let value = json!({
            "name": "Mars",
            "description": null,
            "isPlanet": false,
            "mass": { "massValue": 6.4171, "massExponent": 23 },
            "moons": [],
        });
        let record = Record::new(&value);

        assert_eq!(record.text("name").as_deref(), Some("Mars"));
        assert!(record.get("description").is_none());
        assert!(record.get("missing").is_none());
        assert_eq!(record.defined("isPlanet"), Some(&json!(false)));
        assert!(record.list("moons").is_none());
        assert_eq!(
            record.nested("mass").and_then(|m| m.text("massExponent")),
            Some("23".to_string())
        );
        assert_eq!(record.text_or("id", "N/A"), "N/A");
    }

    #[test]
    fn test_non_object_is_empty_record() {
        let value = json!([1, 2, 3]);
        let record = Record::new(&value);
        assert!(record.get("anything").is_none());
    }

    #[test]
    fn test_preview_caps_at_ten() {
        let preview = Preview::new((1..=13).map(|i| format!("m{}", i)));
        assert_eq!(preview.total, 13);
        assert_eq!(preview.hidden, 3);
        assert_eq!(preview.shown.split(", ").count(), 10);
        assert_eq!(preview.more_suffix().as_deref(), Some("...and 3 more"));

        let short = Preview::new(["a", "b"]);
        assert_eq!(short.shown, "a, b");
        assert!(short.more_suffix().is_none());
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(&json!(149598023)), "149,598,023");
        assert_eq!(group_thousands(&json!(999)), "999");
        assert_eq!(group_thousands(&json!(1234567.5)), "1,234,567.5");
        assert_eq!(group_thousands(&json!(-4500)), "-4,500");
        assert_eq!(group_thousands(&json!("n/a")), "n/a");
    }
}
