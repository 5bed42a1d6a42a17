// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Configuration surface for the typeahead widgets

use std::fmt;
use std::time::Duration;

use typeahead_core::SearchFilter;

pub const DEFAULT_NO_RESULTS_MESSAGE: &str = "No matching items found";

/// Recognized options for the autocomplete and lookup widgets.
///
/// Defaults follow the widget contract: no debounce delay (searches still
/// run on the next scheduler tick, never synchronously), descriptor
/// property `"name"`, minimum one character, unlimited results.
#[derive(Clone)]
pub struct AutocompleteConfig {
    pub debounce_time: Duration,
    pub descriptor_property: String,
    /// Properties inspected by the built-in matcher. `None` means "just the
    /// descriptor property".
    pub properties_to_search: Option<Vec<String>>,
    pub search_text_minimum_characters: usize,
    /// Accepted result sets are truncated to this many entries when set.
    pub search_results_limit: Option<usize>,
    /// Predicates applied by the built-in matcher after the substring step.
    pub search_filters: Vec<SearchFilter>,
    pub no_results_message: String,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            debounce_time: Duration::ZERO,
            descriptor_property: "name".to_string(),
            properties_to_search: None,
            search_text_minimum_characters: 1,
            search_results_limit: None,
            search_filters: Vec::new(),
            no_results_message: DEFAULT_NO_RESULTS_MESSAGE.to_string(),
        }
    }
}

impl AutocompleteConfig {
    pub fn effective_search_properties(&self) -> Vec<String> {
        self.properties_to_search
            .clone()
            .unwrap_or_else(|| vec![self.descriptor_property.clone()])
    }
}

impl fmt::Debug for AutocompleteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutocompleteConfig")
            .field("debounce_time", &self.debounce_time)
            .field("descriptor_property", &self.descriptor_property)
            .field("properties_to_search", &self.properties_to_search)
            .field(
                "search_text_minimum_characters",
                &self.search_text_minimum_characters,
            )
            .field("search_results_limit", &self.search_results_limit)
            .field("search_filters", &self.search_filters.len())
            .field("no_results_message", &self.no_results_message)
            .finish()
    }
}
