//! Structured result envelopes for the JSON output form.

use nonempty::NonEmpty;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// A page of records plus metadata.
///
/// `count` is never stored; it is always the length of `items`. Envelopes
/// cannot be empty: callers short-circuit to a "no results" message instead.
#[derive(Debug, Clone)]
pub struct Envelope {
    lead: Vec<(&'static str, Value)>,
    trail: Vec<(&'static str, Value)>,
    key: &'static str,
    items: NonEmpty<Value>,
}

impl Envelope {
    /// Wrap `items` under `key`. Returns `None` for an empty sequence.
    pub fn new(key: &'static str, items: Vec<Value>) -> Option<Self> {
        NonEmpty::from_vec(items).map(|items| Self {
            lead: Vec::new(),
            trail: Vec::new(),
            key,
            items,
        })
    }

    /// Metadata field serialized before `count`.
    pub fn lead(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        self.lead.push((name, value.into()));
        self
    }

    /// Metadata field serialized after `count`, before the items.
    pub fn trail(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        self.trail.push((name, value.into()));
        self
    }

    /// Offset-window metadata: `total` leads, `offset`/`has_more`/`next_offset` trail.
    pub fn window(self, window: &OffsetWindow) -> Self {
        self.lead("total", window.total)
            .trail("offset", window.offset)
            .trail("has_more", window.has_more())
            .trail("next_offset", window.next_offset())
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.lead.len() + self.trail.len() + 2))?;
        for (name, value) in &self.lead {
            map.serialize_entry(name, value)?;
        }
        map.serialize_entry("count", &self.count())?;
        for (name, value) in &self.trail {
            map.serialize_entry(name, value)?;
        }
        let items: Vec<&Value> = self.items.iter().collect();
        map.serialize_entry(self.key, &items)?;
        map.end()
    }
}

/// Position of a fetched page inside a collection of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetWindow {
    pub total: usize,
    pub offset: usize,
    pub count: usize,
}

impl OffsetWindow {
    pub fn has_more(&self) -> bool {
        self.total > self.offset + self.count
    }

    pub fn next_offset(&self) -> Option<usize> {
        self.has_more().then_some(self.offset + self.count)
    }

    /// Records after this page.
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.offset + self.count)
    }
}
