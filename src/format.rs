//! Output format selection for tool responses.

use serde::Serialize;

/// Output format for tool responses.
///
/// Parsing is permissive: anything other than exactly `markdown` selects JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    #[default]
    Json,
    Markdown,
}

impl ResponseFormat {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("markdown") => ResponseFormat::Markdown,
            _ => ResponseFormat::Json,
        }
    }

    pub fn is_markdown(&self) -> bool {
        matches!(self, ResponseFormat::Markdown)
    }
}

impl From<Option<String>> for ResponseFormat {
    fn from(value: Option<String>) -> Self {
        ResponseFormat::parse(value.as_deref())
    }
}

/// Pretty-print a value with two-space indentation.
///
/// Serialization of the crate's own types and `serde_json::Value` cannot fail,
/// but the fallback keeps the tool boundary string-only.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("Error: SerializationError: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_markdown() {
        assert_eq!(ResponseFormat::parse(Some("markdown")), ResponseFormat::Markdown);
    }

    #[test]
    fn test_parse_is_exact() {
        assert_eq!(ResponseFormat::parse(Some(" markdown ")), ResponseFormat::Json);
        assert_eq!(ResponseFormat::parse(Some("Markdown")), ResponseFormat::Json);
        assert_eq!(ResponseFormat::parse(Some("MARKDOWN")), ResponseFormat::Json);
    }

    #[test]
    fn test_unrecognized_falls_back_to_json() {
        assert_eq!(ResponseFormat::parse(Some("json")), ResponseFormat::Json);
        assert_eq!(ResponseFormat::parse(Some("yaml")), ResponseFormat::Json);
        assert_eq!(ResponseFormat::parse(Some("")), ResponseFormat::Json);
        assert_eq!(ResponseFormat::parse(None), ResponseFormat::Json);
    }
}
