//! MCP server handler exposing the catalog and astronomy tools.
//!
//! **Catalog**
//! - `catalog_list_items` — Page through items, optionally by type
//! - `catalog_get_item` — One item by id
//! - `catalog_search_items` — Case-insensitive name/description search
//! - `catalog_create_item` — Validate and fabricate a new item locally
//! - `catalog_get_stats` — Item count and type distribution
//!
//! **Astronomy**
//! - `solar_list_bodies` — Page through celestial bodies with type/planet filters and sorting
//! - `solar_get_body` — One body by id
//! - `solar_search_bodies` — Search bodies by English name
//! - `solar_filter_bodies` — Filter by radius, gravity and density ranges, and by moons
//! - `solar_get_moons` — Moons orbiting a planet
//! - `solar_list_known_counts` — Known object counts per category
//! - `solar_get_known_count` — Known object count for one category
//! - `solar_calculate_positions` — Object positions for an observer location and time
//! - `solar_get_planets` — The planets, ordered by distance from the Sun
//! - `solar_get_dwarf_planets` — The dwarf planets, ordered by distance from the Sun

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{Implementation, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ServerHandler};

use crate::client::{Fetch, FetchError};
use crate::config::Config;
use crate::provider::CatalogSource;
use crate::tools::*;

#[derive(Clone)]
pub struct RestToolServer {
    tool_router: ToolRouter<Self>,
    catalog: CatalogTools,
    solar: SolarTools,
}

impl std::fmt::Debug for RestToolServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestToolServer").finish_non_exhaustive()
    }
}

impl RestToolServer {
    pub fn new(catalog: Arc<dyn CatalogSource>, solar: Arc<dyn Fetch>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            catalog: CatalogTools::new(catalog),
            solar: SolarTools::new(solar),
        }
    }

    /// Wire both tool families from process configuration.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Ok(Self::new(config.catalog_source()?, config.solar_client()?))
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for RestToolServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(
                "Query a record catalog (catalog_* tools) and the Solar System OpenData API \
                 (solar_* tools). Every tool returns a single string: JSON by default, or \
                 markdown when response_format is 'markdown'. Failures start with 'Error:'.\n\
                 Catalog: catalog_list_items pages with limit/offset and reports next_offset; \
                 catalog_search_items and catalog_get_item find records.\n\
                 Astronomy: solar_list_bodies pages with page/limit; body ids are French \
                 (terre, lune, saturne)."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}

#[tool_router(router = tool_router)]
impl RestToolServer {
    // ── Catalog ──

    #[tool(
        name = "catalog_list_items",
        description = "List items with optional type filter and offset pagination. Returns total, count, offset, has_more and next_offset alongside the items."
    )]
    pub async fn catalog_list_items(&self, Parameters(params): Parameters<ListItemsParams>) -> String {
        self.catalog.list_items(params).await
    }

    #[tool(
        name = "catalog_get_item",
        description = "Get a specific item by ID."
    )]
    pub async fn catalog_get_item(&self, Parameters(params): Parameters<GetItemParams>) -> String {
        self.catalog.get_item(params).await
    }

    #[tool(
        name = "catalog_search_items",
        description = "Search for items by name or description (case-insensitive)."
    )]
    pub async fn catalog_search_items(
        &self,
        Parameters(params): Parameters<SearchItemsParams>,
    ) -> String {
        self.catalog.search_items(params).await
    }

    #[tool(
        name = "catalog_create_item",
        description = "Create a new item. Validates the name and item_type and splits comma-separated tags. Returns the created item."
    )]
    pub async fn catalog_create_item(
        &self,
        Parameters(params): Parameters<CreateItemParams>,
    ) -> String {
        self.catalog.create_item(params).await
    }

    #[tool(
        name = "catalog_get_stats",
        description = "Get statistics about the item collection: total items and distribution by type."
    )]
    pub async fn catalog_get_stats(&self, Parameters(params): Parameters<FormatParams>) -> String {
        self.catalog.get_stats(params).await
    }

    // ── Astronomy ──

    #[tool(
        name = "solar_list_bodies",
        description = "List celestial bodies in the solar system with optional filtering, sorting and page-based pagination."
    )]
    pub async fn solar_list_bodies(
        &self,
        Parameters(params): Parameters<ListBodiesParams>,
    ) -> String {
        self.solar.list_bodies(params).await
    }

    #[tool(
        name = "solar_get_body",
        description = "Get detailed information about a specific celestial body."
    )]
    pub async fn solar_get_body(&self, Parameters(params): Parameters<GetBodyParams>) -> String {
        self.solar.get_body(params).await
    }

    #[tool(
        name = "solar_search_bodies",
        description = "Search for celestial bodies by English name."
    )]
    pub async fn solar_search_bodies(
        &self,
        Parameters(params): Parameters<SearchBodiesParams>,
    ) -> String {
        self.solar.search_bodies(params).await
    }

    #[tool(
        name = "solar_filter_bodies",
        description = "Filter celestial bodies by physical characteristics: mean radius, surface gravity, density and whether they have moons. Largest bodies first."
    )]
    pub async fn solar_filter_bodies(
        &self,
        Parameters(params): Parameters<FilterBodiesParams>,
    ) -> String {
        self.solar.filter_bodies(params).await
    }

    #[tool(
        name = "solar_get_moons",
        description = "Get all moons of a specific planet, largest first."
    )]
    pub async fn solar_get_moons(&self, Parameters(params): Parameters<GetMoonsParams>) -> String {
        self.solar.get_moons(params).await
    }

    #[tool(
        name = "solar_list_known_counts",
        description = "Get counts of known celestial objects by category."
    )]
    pub async fn solar_list_known_counts(
        &self,
        Parameters(params): Parameters<FormatParams>,
    ) -> String {
        self.solar.list_known_counts(params).await
    }

    #[tool(
        name = "solar_get_known_count",
        description = "Get the count of known objects for a specific category."
    )]
    pub async fn solar_get_known_count(
        &self,
        Parameters(params): Parameters<GetKnownCountParams>,
    ) -> String {
        self.solar.get_known_count(params).await
    }

    #[tool(
        name = "solar_calculate_positions",
        description = "Calculate positions of solar system objects (right ascension, declination, azimuth, altitude) from an observer location at a given UTC time."
    )]
    pub async fn solar_calculate_positions(
        &self,
        Parameters(params): Parameters<CalculatePositionsParams>,
    ) -> String {
        self.solar.calculate_positions(params).await
    }

    #[tool(
        name = "solar_get_planets",
        description = "Get all planets in the solar system, ordered by distance from the Sun."
    )]
    pub async fn solar_get_planets(&self, Parameters(params): Parameters<FormatParams>) -> String {
        self.solar.get_planets(params).await
    }

    #[tool(
        name = "solar_get_dwarf_planets",
        description = "Get all dwarf planets in the solar system, ordered by distance from the Sun."
    )]
    pub async fn solar_get_dwarf_planets(
        &self,
        Parameters(params): Parameters<FormatParams>,
    ) -> String {
        self.solar.get_dwarf_planets(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::FixtureCatalog;
    use crate::query::Query;
    use async_trait::async_trait;
    use serde_json::Value;

    struct Offline;

    #[async_trait]
    impl Fetch for Offline {
        async fn get(&self, _path: &[&str], _query: &Query) -> Result<Value, FetchError> {
            Err(FetchError::Connect("offline".into()))
        }
    }

    fn server() -> RestToolServer {
        RestToolServer::new(Arc::new(FixtureCatalog::sample()), Arc::new(Offline))
    }

    #[test]
    fn test_registers_every_tool() {
        let names: Vec<String> = server()
            .tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        assert_eq!(names.len(), 15);
        for expected in [
            "catalog_list_items",
            "catalog_get_stats",
            "solar_calculate_positions",
            "solar_get_dwarf_planets",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_info_enables_tools() {
        let info = server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert_eq!(info.server_info.name, "restmcp");
        assert!(info.instructions.is_some());
    }

    #[tokio::test]
    async fn test_tool_methods_delegate() {
        let server = server();
        let text = server
            .catalog_get_item(Parameters(GetItemParams {
                item_id: "item-003".into(),
                response_format: Some("markdown".into()),
            }))
            .await;
        assert!(text.starts_with("## Product Demo (ID: item-003)"));

        let text = server
            .solar_get_planets(Parameters(FormatParams::default()))
            .await;
        assert_eq!(
            text,
            "Error: Could not connect to API. Check network and SOLAR_API_BASE_URL."
        );
    }
}
