// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Matching, highlighting, and search-provider contracts for the typeahead widgets
//!
//! This crate holds the framework-agnostic half of the typeahead pipeline:
//! dynamic-shape search items, the case-insensitive substring matcher, the
//! highlight span computation, and the async `SearchProvider` seam that the
//! widget layer calls through. Nothing here knows about debouncing, keyboard
//! focus, or rendering.

pub mod error;
pub mod highlight;
pub mod item;
pub mod matcher;
pub mod provider;

pub use error::SearchError;
pub use highlight::{compute_spans, HighlightSpan};
pub use item::SearchItem;
pub use matcher::{Matcher, SearchFilter};
pub use provider::{SearchProvider, StaticSearchProvider};
