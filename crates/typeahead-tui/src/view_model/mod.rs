// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! View models for the typeahead widgets
//!
//! Each submodule owns one piece of the state machine; `autocomplete` and
//! `lookup` compose them into the single- and multi-select widgets.

pub mod autocomplete;
pub mod lookup;
pub mod navigator;
pub mod search;
pub mod tokens;
