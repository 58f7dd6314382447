//! Argument normalization applied before any network I/O.
//!
//! Numeric bounds clamp silently. Coordinates and free-text queries are
//! validated instead; a violation yields a ready-to-return error string.

use itertools::Itertools;

pub const MIN_LIMIT: i64 = 1;
pub const MAX_LIMIT: i64 = 100;
pub const DEFAULT_LIMIT: i64 = 20;

/// Clamp a page size to `[1, 100]`.
pub fn clamp_limit(limit: i64) -> u32 {
    limit.clamp(MIN_LIMIT, MAX_LIMIT) as u32
}

/// Clamp an offset to `>= 0`.
pub fn clamp_offset(offset: i64) -> u32 {
    offset.clamp(0, u32::MAX as i64) as u32
}

/// Clamp a 1-based page number to `>= 1`.
pub fn clamp_page(page: i64) -> u32 {
    page.clamp(1, u32::MAX as i64) as u32
}

/// Trimmed, non-empty search text.
pub fn search_query(query: &str) -> Result<&str, String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err("Error: Search query cannot be empty.".to_string());
    }
    Ok(trimmed)
}

/// Optional text argument, treating blank input as absent.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Identifier destined for a URL path segment. Blank ids and the dot
/// segments `.`/`..` are refused so they never address another resource.
pub fn resource_id<'a>(value: &'a str, label: &str) -> Result<&'a str, String> {
    match value.trim() {
        "" => Err(format!("Error: {} cannot be empty.", label)),
        id @ ("." | "..") => Err(format!("Error: Invalid {} '{}'.", label, id)),
        id => Ok(id),
    }
}

/// Split a comma-separated tag list, dropping blank entries.
pub fn split_tags(tags: Option<&str>) -> Vec<String> {
    tags.map(|t| {
        t.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

/// Observer location for position calculations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub timezone_offset: i32,
}

impl Observer {
    /// Check coordinate ranges. NaN fails every range.
    pub fn validate(self) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err("Error: Latitude must be between -90 and +90 degrees.".to_string());
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err("Error: Longitude must be between -180 and +180 degrees.".to_string());
        }
        if !(-12..=14).contains(&self.timezone_offset) {
            return Err("Error: Timezone offset must be between -12 and +14.".to_string());
        }
        Ok(self)
    }
}

/// Capitalize the first letter of each word, lowercasing the rest.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .join(" ")
}
