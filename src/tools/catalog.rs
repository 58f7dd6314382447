//! Catalog tools: list, get, search, create and statistics over a [`CatalogSource`].

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use serde_with::skip_serializing_none;
use tracing::info;

use crate::client::FetchError;
use crate::error::ErrorCatalog;
use crate::format::{to_json, ResponseFormat};
use crate::normalize::{
    clamp_limit, clamp_offset, non_blank, resource_id, search_query, split_tags, MAX_LIMIT,
};
use crate::provider::{CatalogSource, ItemPage};
use crate::record::Record;
use crate::render::catalog::item_block;
use crate::render::{Document, Envelope, OffsetWindow};
use crate::tools::params::{
    CreateItemParams, FormatParams, GetItemParams, ListItemsParams, SearchItemsParams,
};

/// Item types accepted by `catalog_create_item`.
pub const ITEM_TYPES: [&str; 4] = ["document", "image", "video", "other"];

/// Creation date stamped on locally fabricated items.
const PLACEHOLDER_CREATED_AT: &str = "2024-01-01";

#[skip_serializing_none]
#[derive(Debug, Serialize)]
struct NewItem {
    id: String,
    name: String,
    #[serde(rename = "type")]
    item_type: String,
    description: Option<String>,
    tags: Vec<String>,
    created_at: &'static str,
}

#[derive(Debug, Serialize)]
struct Created {
    success: bool,
    message: String,
    item: NewItem,
}

#[derive(Debug, Serialize)]
struct Stats {
    total_items: usize,
    type_distribution: BTreeMap<String, usize>,
}

#[derive(Clone)]
pub struct CatalogTools {
    source: Arc<dyn CatalogSource>,
}

impl CatalogTools {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self { source }
    }

    fn fault(tool: &str, error: &FetchError) -> String {
        ErrorCatalog::CATALOG.report(tool, error)
    }

    pub async fn list_items(&self, params: ListItemsParams) -> String {
        let limit = clamp_limit(params.limit);
        let offset = clamp_offset(params.offset);
        let item_type = non_blank(params.item_type.as_deref());
        let format = ResponseFormat::from(params.response_format);
        info!(tool = "catalog_list_items", limit, offset, ?item_type, "tool call");

        let page = match self.source.list(limit, offset, item_type).await {
            Ok(page) => page,
            Err(e) => return Self::fault("catalog_list_items", &e),
        };

        let window = OffsetWindow {
            total: page.total,
            offset: offset as usize,
            count: page.items.len(),
        };
        let Some(envelope) = Envelope::new("items", page.items) else {
            return "No items found matching the criteria.".to_string();
        };

        if !format.is_markdown() {
            return to_json(&envelope.window(&window));
        }

        Document::titled("Items")
            .paragraph(format!(
                "Showing {} of {} items (offset: {})",
                envelope.count(),
                window.total,
                offset
            ))
            .blocks(envelope.items().map(item_block))
            .footer(window.next_offset().map(|next| {
                format!(
                    "{} more items available. Use offset={} for next page.",
                    window.remaining(),
                    next
                )
            }))
            .finish()
    }

    pub async fn get_item(&self, params: GetItemParams) -> String {
        let item_id = match resource_id(&params.item_id, "Item ID") {
            Ok(id) => id,
            Err(msg) => return msg,
        };
        let format = ResponseFormat::from(params.response_format);
        info!(tool = "catalog_get_item", item_id, "tool call");

        match self.source.get(item_id).await {
            Ok(Some(item)) if format.is_markdown() => item_block(&item),
            Ok(Some(item)) => to_json(&item),
            Ok(None) => format!(
                "Error: Item not found with ID '{}'. Use catalog_list_items to see available items.",
                item_id
            ),
            Err(e) => Self::fault("catalog_get_item", &e),
        }
    }

    pub async fn search_items(&self, params: SearchItemsParams) -> String {
        let needle = match search_query(&params.query) {
            Ok(q) => q,
            Err(msg) => return msg,
        };
        let limit = clamp_limit(params.limit);
        let format = ResponseFormat::from(params.response_format);
        info!(tool = "catalog_search_items", query = needle, limit, "tool call");

        let hits = match self.source.search(needle, limit).await {
            Ok(hits) => hits,
            Err(e) => return Self::fault("catalog_search_items", &e),
        };
        let Some(envelope) = Envelope::new("items", hits) else {
            return format!("No items found matching '{}'.", params.query);
        };

        if !format.is_markdown() {
            return to_json(&envelope.lead("query", params.query));
        }

        Document::titled(format!("Search Results: '{}'", params.query))
            .paragraph(format!("Found {} item(s)", envelope.count()))
            .blocks(envelope.items().map(item_block))
            .finish()
    }

    /// Validate and fabricate a new item. Nothing is sent to the remote API.
    pub async fn create_item(&self, params: CreateItemParams) -> String {
        let Some(name) = non_blank(Some(&params.name)) else {
            return "Error: Item name cannot be empty.".to_string();
        };
        if !ITEM_TYPES.contains(&params.item_type.as_str()) {
            return format!(
                "Error: Invalid item_type '{}'. Must be one of: {}",
                params.item_type,
                ITEM_TYPES.join(", ")
            );
        }
        info!(tool = "catalog_create_item", item_name = name, item_type = %params.item_type, "tool call");

        let created = Created {
            success: true,
            message: format!("Item '{}' created successfully", name),
            item: NewItem {
                id: self.source.next_id(),
                name: name.to_string(),
                item_type: params.item_type.clone(),
                description: non_blank(params.description.as_deref()).map(String::from),
                tags: split_tags(params.tags.as_deref()),
                created_at: PLACEHOLDER_CREATED_AT,
            },
        };
        to_json(&created)
    }

    /// Every item in the source, fetched in pages of [`MAX_LIMIT`].
    ///
    /// Stops at the reported total or at the first empty page, whichever
    /// comes first.
    async fn list_all(&self) -> Result<ItemPage, FetchError> {
        let mut items = Vec::new();
        loop {
            let offset = u32::try_from(items.len()).unwrap_or(u32::MAX);
            let page = self.source.list(MAX_LIMIT as u32, offset, None).await?;
            let exhausted = page.items.is_empty() || items.len() + page.items.len() >= page.total;
            items.extend(page.items);
            if exhausted {
                return Ok(ItemPage {
                    items,
                    total: page.total,
                });
            }
        }
    }

    pub async fn get_stats(&self, params: FormatParams) -> String {
        let format = ResponseFormat::from(params.response_format);
        info!(tool = "catalog_get_stats", "tool call");

        let page = match self.list_all().await {
            Ok(page) => page,
            Err(e) => return Self::fault("catalog_get_stats", &e),
        };

        let stats = Stats {
            total_items: page.total,
            type_distribution: type_distribution(&page.items),
        };

        if !format.is_markdown() {
            return to_json(&stats);
        }

        let mut by_count: Vec<(&String, &usize)> = stats.type_distribution.iter().collect();
        by_count.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        by_count
            .into_iter()
            .fold(
                Document::titled("Collection Statistics")
                    .paragraph(format!("**Total Items**: {}", stats.total_items))
                    .section("Items by Type"),
                |doc, (item_type, count)| doc.line(format!("- {}: {}", item_type, count)),
            )
            .finish()
    }
}

fn type_distribution(items: &[Value]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for item in items {
        *counts
            .entry(Record::new(item).text_or("type", "unknown"))
            .or_insert(0) += 1;
    }
    counts
}
