// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Case-insensitive substring matching over item properties
//!
//! An item matches when at least one of the configured properties contains
//! the search text as a substring, both sides lowered. Candidate order is
//! preserved; there is no relevance ranking.

use std::sync::Arc;

use crate::item::SearchItem;

/// Caller-supplied predicate applied after the substring step. Every filter
/// must pass for an item to be retained.
pub type SearchFilter = Arc<dyn Fn(&str, &SearchItem) -> bool + Send + Sync>;

/// Substring matcher over a named set of item properties.
pub struct Matcher {
    properties: Vec<String>,
    filters: Vec<SearchFilter>,
}

impl Matcher {
    pub fn new(properties: Vec<String>) -> Self {
        Self {
            properties,
            filters: Vec::new(),
        }
    }

    pub fn with_filters(mut self, filters: Vec<SearchFilter>) -> Self {
        self.filters = filters;
        self
    }

    /// True when any configured property of `item` contains `search_text`.
    ///
    /// Empty search text matches nothing; the caller is responsible for
    /// gating searches, and "matches everything" would be a footgun here.
    /// Properties the item does not carry are skipped.
    pub fn matches(&self, search_text: &str, item: &SearchItem) -> bool {
        if search_text.is_empty() {
            return false;
        }
        let needle = search_text.to_lowercase();
        self.properties.iter().any(|property| {
            item.property_text(property)
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        })
    }

    /// The ordered subset of `items` matching `search_text`, after filters.
    pub fn filter(&self, search_text: &str, items: &[SearchItem]) -> Vec<SearchItem> {
        items
            .iter()
            .filter(|item| self.matches(search_text, item))
            .filter(|item| self.filters.iter().all(|pass| pass(search_text, item)))
            .cloned()
            .collect()
    }
}
