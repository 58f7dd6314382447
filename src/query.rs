//! Query-string encoding for the remote APIs.
//!
//! Both APIs share a filter and ordering grammar:
//!
//! - ordering is one `order={field},{asc|desc}` pair
//! - every filter is its own `filter[]={field},{op},{value}` pair, ANDed by
//!   the server in the order they were added
//!
//! Pagination differs per family. The astronomy API takes a combined
//! `page={page},{limit}` token; the catalog API takes separate `limit` and
//! `offset` integers. [`Pagination`] keeps the two idioms apart.

use std::fmt;

/// Comparison operator understood by the remote filter grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ge,
    Le,
    /// Substring contains.
    Cs,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Ge => "ge",
            FilterOp::Le => "le",
            FilterOp::Cs => "cs",
        }
    }
}

/// One `{field},{op},{value}` filter entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: String,
}

impl Filter {
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl ToString) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.field, self.op.as_str(), self.value)
    }
}

/// Sort order encoded as a single `{field},{direction}` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub descending: bool,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = if self.descending { "desc" } else { "asc" };
        write!(f, "{},{}", self.field, dir)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// Combined `page={page},{limit}` token, 1-based page.
    Page { page: u32, limit: u32 },
    /// Separate `limit` and `offset` integers.
    Offset { limit: u32, offset: u32 },
}

/// A normalized request, ready to be encoded as query pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filters: Vec<Filter>,
    sort: Option<Sort>,
    pagination: Option<Pagination>,
    extra: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter. Filters keep their insertion order on the wire.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn filter_opt(self, filter: Option<Filter>) -> Self {
        match filter {
            Some(f) => self.filter(f),
            None => self,
        }
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Plain `key=value` parameter outside the filter grammar.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.extra.push((key.into(), value.to_string()));
        self
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
            && self.sort.is_none()
            && self.pagination.is_none()
            && self.extra.is_empty()
    }

    /// Encode as ordered query pairs: ordering, pagination, filters, then extras.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(sort) = &self.sort {
            pairs.push(("order".to_string(), sort.to_string()));
        }

        match self.pagination {
            Some(Pagination::Page { page, limit }) => {
                pairs.push(("page".to_string(), format!("{},{}", page, limit)));
            }
            Some(Pagination::Offset { limit, offset }) => {
                pairs.push(("limit".to_string(), limit.to_string()));
                pairs.push(("offset".to_string(), offset.to_string()));
            }
            None => {}
        }

        for filter in &self.filters {
            pairs.push(("filter[]".to_string(), filter.to_string()));
        }

        pairs.extend(self.extra.iter().cloned());
        pairs
    }
}
