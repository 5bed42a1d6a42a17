// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Pluggable asynchronous search capability
//!
//! The widget layer never calls a matcher directly; it goes through the
//! `SearchProvider` seam so callers can substitute remote or computed
//! sources. The built-in matcher is served through the same contract by
//! `StaticSearchProvider`, which keeps the controller's pipeline uniform.

use async_trait::async_trait;

use crate::error::SearchError;
use crate::item::SearchItem;
use crate::matcher::Matcher;

/// Asynchronous search over caller-defined items.
///
/// Receives the raw search text and produces the ordered item list. A
/// returned error is treated by the controller as an empty result set for
/// that request; it is never retried automatically.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, search_text: &str) -> Result<Vec<SearchItem>, SearchError>;
}

/// Serves a fixed candidate list through the async provider contract.
pub struct StaticSearchProvider {
    items: Vec<SearchItem>,
    matcher: Matcher,
}

impl StaticSearchProvider {
    pub fn new(items: Vec<SearchItem>, matcher: Matcher) -> Self {
        Self { items, matcher }
    }
}

#[async_trait]
impl SearchProvider for StaticSearchProvider {
    async fn search(&self, search_text: &str) -> Result<Vec<SearchItem>, SearchError> {
        Ok(self.matcher.filter(search_text, &self.items))
    }
}
