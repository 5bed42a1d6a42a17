// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Typeahead ("autocomplete") and token-picker ("lookup") view models
//!
//! This crate drives the interactive half of the typeahead pipeline:
//! debounced keystrokes, race resolution of overlapping searches, the
//! keyboard/pointer selection state machine, and the multi-value token
//! collection with focus arbitration. Rendering, layout, and accessibility
//! wiring are left to the host; the view models only consume key events and
//! pre-hit-tested pointer targets, and publish state plus outbound events.

pub mod config;
pub mod error;
pub mod event;
pub mod view_model;

pub use config::AutocompleteConfig;
pub use error::SetupError;
pub use event::{PointerEvent, PointerKind, PointerTarget, WidgetEvent};
pub use view_model::autocomplete::{AutocompleteBuilder, AutocompleteViewModel};
pub use view_model::lookup::{LookupBuilder, LookupViewModel};
pub use view_model::navigator::{NavAction, NavigatorState, SelectionNavigator};
pub use view_model::search::{SearchController, SearchPhase, SearchRequest, SearchResult};
pub use view_model::tokens::{FocusTarget, Token, TokenCollection, TokenMsg};
