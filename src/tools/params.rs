//! Parameter structs for all MCP tools.
//!
//! Numeric paging arguments are signed so out-of-range values reach the
//! normalizer and get clamped instead of failing deserialization.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::normalize::DEFAULT_LIMIT;

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

fn default_page() -> i64 {
    1
}

fn default_order_by() -> String {
    "id".to_string()
}

fn default_item_type() -> String {
    "document".to_string()
}

// ── catalog_list_items ──

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListItemsParams {
    #[schemars(description = "Maximum items to return (1-100, default 20)")]
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[schemars(description = "Items to skip for pagination (default 0)")]
    #[serde(default)]
    pub offset: i64,
    #[schemars(description = "Filter by type ('document', 'image', 'video', 'other')")]
    pub item_type: Option<String>,
    #[schemars(description = "'json' for structured data or 'markdown' for human-readable")]
    pub response_format: Option<String>,
}

// ── catalog_get_item ──

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetItemParams {
    #[schemars(description = "The unique identifier of the item")]
    pub item_id: String,
    #[schemars(description = "'json' for structured data or 'markdown' for human-readable")]
    pub response_format: Option<String>,
}

// ── catalog_search_items ──

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchItemsParams {
    #[schemars(description = "Search string (case-insensitive, matches name and description)")]
    pub query: String,
    #[schemars(description = "Maximum results (1-100, default 20)")]
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[schemars(description = "'json' for structured data or 'markdown' for human-readable")]
    pub response_format: Option<String>,
}

// ── catalog_create_item ──

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateItemParams {
    #[schemars(description = "Item name (required)")]
    pub name: String,
    #[schemars(description = "Type of item ('document', 'image', 'video', 'other')")]
    #[serde(default = "default_item_type")]
    pub item_type: String,
    #[schemars(description = "Optional description")]
    pub description: Option<String>,
    #[schemars(description = "Optional comma-separated tags (e.g., 'important,urgent')")]
    pub tags: Option<String>,
}

// ── catalog_get_stats / solar_list_known_counts / solar_get_planets / solar_get_dwarf_planets ──

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct FormatParams {
    #[schemars(description = "'json' for structured data or 'markdown' for human-readable")]
    pub response_format: Option<String>,
}

// ── solar_list_bodies ──

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListBodiesParams {
    #[schemars(description = "Max bodies to return per page (1-100, default 20)")]
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[schemars(description = "Page number (default 1)")]
    #[serde(default = "default_page")]
    pub page: i64,
    #[schemars(
        description = "Filter by body type (e.g., 'Planet', 'Moon', 'Asteroid', 'Comet', 'Dwarf Planet')"
    )]
    pub body_type: Option<String>,
    #[schemars(description = "Filter to only planets (true) or non-planets (false)")]
    pub is_planet: Option<bool>,
    #[schemars(
        description = "Field to sort by (e.g., 'id', 'name', 'density', 'gravity', 'meanRadius')"
    )]
    #[serde(default = "default_order_by")]
    pub order_by: String,
    #[schemars(description = "Sort descending if true (default false)")]
    #[serde(default)]
    pub order_desc: bool,
    #[schemars(description = "'json' for structured data or 'markdown' for human-readable")]
    pub response_format: Option<String>,
}

impl Default for ListBodiesParams {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            page: default_page(),
            body_type: None,
            is_planet: None,
            order_by: default_order_by(),
            order_desc: false,
            response_format: None,
        }
    }
}

// ── solar_get_body ──

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetBodyParams {
    #[schemars(
        description = "The ID of the celestial body (e.g., 'terre' for Earth, 'lune' for Moon, 'mars')"
    )]
    pub body_id: String,
    #[schemars(description = "'json' for structured data or 'markdown' for human-readable")]
    pub response_format: Option<String>,
}

// ── solar_search_bodies ──

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchBodiesParams {
    #[schemars(description = "Search string to match against body names (case-insensitive)")]
    pub query: String,
    #[schemars(description = "Maximum results (1-100, default 20)")]
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[schemars(description = "'json' for structured data or 'markdown' for human-readable")]
    pub response_format: Option<String>,
}

// ── solar_filter_bodies ──

#[derive(Debug, Deserialize, JsonSchema)]
pub struct FilterBodiesParams {
    #[schemars(description = "Minimum mean radius in km")]
    pub min_radius: Option<f64>,
    #[schemars(description = "Maximum mean radius in km")]
    pub max_radius: Option<f64>,
    #[schemars(description = "Minimum surface gravity in m/s²")]
    pub min_gravity: Option<f64>,
    #[schemars(description = "Maximum surface gravity in m/s²")]
    pub max_gravity: Option<f64>,
    #[schemars(description = "Minimum density in g/cm³")]
    pub min_density: Option<f64>,
    #[schemars(description = "Maximum density in g/cm³")]
    pub max_density: Option<f64>,
    #[schemars(description = "Filter to bodies with moons (true) or without (false)")]
    pub has_moons: Option<bool>,
    #[schemars(description = "Maximum results (1-100, default 20)")]
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[schemars(description = "'json' for structured data or 'markdown' for human-readable")]
    pub response_format: Option<String>,
}

impl Default for FilterBodiesParams {
    fn default() -> Self {
        Self {
            min_radius: None,
            max_radius: None,
            min_gravity: None,
            max_gravity: None,
            min_density: None,
            max_density: None,
            has_moons: None,
            limit: default_limit(),
            response_format: None,
        }
    }
}

// ── solar_get_moons ──

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetMoonsParams {
    #[schemars(description = "The ID of the planet (e.g., 'jupiter', 'saturne', 'terre')")]
    pub planet_id: String,
    #[schemars(description = "'json' for structured data or 'markdown' for human-readable")]
    pub response_format: Option<String>,
}

// ── solar_get_known_count ──

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetKnownCountParams {
    #[schemars(description = "The category ID (e.g., 'asteroids', 'comets', 'kupierbeltobjects')")]
    pub category_id: String,
    #[schemars(description = "'json' for structured data or 'markdown' for human-readable")]
    pub response_format: Option<String>,
}

// ── solar_calculate_positions ──

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CalculatePositionsParams {
    #[schemars(description = "Observer latitude (-90 to +90)")]
    pub latitude: f64,
    #[schemars(description = "Observer longitude (-180 to +180)")]
    pub longitude: f64,
    #[schemars(description = "Observer altitude in meters (default 0)")]
    #[serde(default)]
    pub elevation: f64,
    #[schemars(
        description = "Date/time in ISO 8601 UTC format (yyyy-MM-ddThh:mm:ss). Leave empty for current time."
    )]
    #[serde(default)]
    pub datetime_utc: String,
    #[schemars(description = "Timezone offset from UTC (-12 to +14, default 0)")]
    #[serde(default)]
    pub timezone_offset: i32,
    #[schemars(description = "'json' for structured data or 'markdown' for human-readable")]
    pub response_format: Option<String>,
}
