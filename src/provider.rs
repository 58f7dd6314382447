//! Data providers backing the catalog tools.
//!
//! The catalog tools only see [`CatalogSource`]. [`FixtureCatalog`] serves an
//! in-memory record set; [`RemoteCatalog`] serves the same operations from a
//! REST API through any [`Fetch`] implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::client::{Fetch, FetchError};
use crate::query::{Filter, FilterOp, Pagination, Query};
use crate::record::Record;

/// One page of catalog items plus the size of the whole (filtered) collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPage {
    pub items: Vec<Value>,
    pub total: usize,
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Page through items, optionally restricted to one type.
    async fn list(
        &self,
        limit: u32,
        offset: u32,
        item_type: Option<&str>,
    ) -> Result<ItemPage, FetchError>;

    /// Fetch one item; `Ok(None)` when the id is unknown.
    async fn get(&self, id: &str) -> Result<Option<Value>, FetchError>;

    /// Case-insensitive match on name or description.
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<Value>, FetchError>;

    /// Identifier for a locally fabricated item.
    fn next_id(&self) -> String;
}

/// In-memory catalog.
#[derive(Debug, Clone)]
pub struct FixtureCatalog {
    items: Vec<Value>,
}

impl FixtureCatalog {
    pub fn new(items: Vec<Value>) -> Self {
        Self { items }
    }

    /// The three-item demonstration catalog.
    pub fn sample() -> Self {
        Self::new(vec![
            json!({
                "id": "item-001",
                "name": "Project Proposal",
                "type": "document",
                "description": "Q1 project proposal document",
                "created_at": "2024-01-15",
                "tags": ["important", "q1"],
            }),
            json!({
                "id": "item-002",
                "name": "Team Photo",
                "type": "image",
                "description": "Annual team photo 2024",
                "created_at": "2024-02-01",
                "tags": ["team", "photo"],
            }),
            json!({
                "id": "item-003",
                "name": "Product Demo",
                "type": "video",
                "description": "Product demonstration video",
                "created_at": "2024-03-10",
                "tags": ["demo", "product"],
            }),
        ])
    }
}

fn field_contains(record: &Record<'_>, key: &str, needle: &str) -> bool {
    record
        .text(key)
        .map(|v| v.to_lowercase().contains(needle))
        .unwrap_or(false)
}

#[async_trait]
impl CatalogSource for FixtureCatalog {
    async fn list(
        &self,
        limit: u32,
        offset: u32,
        item_type: Option<&str>,
    ) -> Result<ItemPage, FetchError> {
        let matching: Vec<&Value> = self
            .items
            .iter()
            .filter(|item| match item_type {
                Some(t) => Record::new(item).text("type").as_deref() == Some(t),
                None => true,
            })
            .collect();

        let total = matching.len();
        let items = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect();

        Ok(ItemPage { items, total })
    }

    async fn get(&self, id: &str) -> Result<Option<Value>, FetchError> {
        Ok(self
            .items
            .iter()
            .find(|item| Record::new(item).text("id").as_deref() == Some(id))
            .cloned())
    }

    async fn search(&self, query: &str, limit: u32) -> Result<Vec<Value>, FetchError> {
        let needle = query.to_lowercase();
        Ok(self
            .items
            .iter()
            .filter(|item| {
                let record = Record::new(item);
                field_contains(&record, "name", &needle)
                    || field_contains(&record, "description", &needle)
            })
            .take(limit as usize)
            .cloned()
            .collect())
    }

    fn next_id(&self) -> String {
        format!("item-{:03}", self.items.len() + 1)
    }
}

/// Catalog served by a REST API.
///
/// Expects `GET items` to return `{"items": [...], "total": N}` and
/// `GET items/{id}` to return the record, with 404 for unknown ids.
#[derive(Clone)]
pub struct RemoteCatalog {
    fetch: Arc<dyn Fetch>,
}

impl RemoteCatalog {
    pub fn new(fetch: Arc<dyn Fetch>) -> Self {
        Self { fetch }
    }

    fn items_of(body: &Value) -> Vec<Value> {
        body.get("items")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl CatalogSource for RemoteCatalog {
    async fn list(
        &self,
        limit: u32,
        offset: u32,
        item_type: Option<&str>,
    ) -> Result<ItemPage, FetchError> {
        let query = Query::new()
            .paginate(Pagination::Offset { limit, offset })
            .filter_opt(item_type.map(|t| Filter::new("type", FilterOp::Eq, t)));

        let body = self.fetch.get(&["items"], &query).await?;
        let items = Self::items_of(&body);
        // Without a reported total the page is assumed to be the last one.
        let total = body
            .get("total")
            .and_then(Value::as_u64)
            .map(|t| t as usize)
            .unwrap_or(offset as usize + items.len());

        Ok(ItemPage { items, total })
    }

    async fn get(&self, id: &str) -> Result<Option<Value>, FetchError> {
        match self.fetch.get(&["items", id], &Query::new()).await {
            Ok(item) => Ok(Some(item)),
            Err(e) if e.status() == Some(404) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn search(&self, text: &str, limit: u32) -> Result<Vec<Value>, FetchError> {
        let query = Query::new()
            .paginate(Pagination::Offset { limit, offset: 0 })
            .filter(Filter::new("name", FilterOp::Cs, text));

        let body = self.fetch.get(&["items"], &query).await?;
        Ok(Self::items_of(&body))
    }

    fn next_id(&self) -> String {
        format!("item-{}", uuid::Uuid::new_v4().simple())
    }
}
