// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for the search layer

use thiserror::Error;

/// Errors surfaced by search providers.
///
/// A failing provider call is not fatal to the widget: the controller
/// catches it and applies an empty result set for that request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("search provider failed: {0}")]
    Provider(String),
}
