// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Widget wiring errors

use thiserror::Error;

/// Missing required wiring, detected while building a widget.
///
/// The widget cannot function without these collaborators, so construction
/// fails fast instead of degrading silently at runtime.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("a search source is required; provide candidate items or a search provider")]
    MissingSearchSource,
    #[error("an event sink is required; provide an outbound event channel")]
    MissingEventSink,
}
