// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Outbound widget events and pointer routing types

use typeahead_core::SearchItem;

use crate::view_model::tokens::Token;

/// Notifications published by the widgets over their event channel.
///
/// `ValueChanged` and `Touched` together form the host form contract: the
/// host supplies the channel, the widget never assumes a particular UI
/// framework beyond it.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// A result was committed, or the committed value was cleared.
    SelectionChanged { selected_item: Option<SearchItem> },
    /// The authoritative single-select value changed (host `on_change`).
    ValueChanged(Option<SearchItem>),
    /// The widget lost focus (host `on_touched`).
    Touched,
    /// The lookup's token list changed.
    TokensChanged(Option<Vec<Token>>),
}

/// Where a pointer event landed. The host performs hit-testing against its
/// rendered layout and hands the view model the resolved target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Input,
    /// A rendered search result row, by result index.
    ResultRow(usize),
    /// A rendered token, by token index.
    Token(usize),
    /// Inside the host boundary but on none of the above.
    Host,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Press, not release: commits survive the blur that follows.
    Down,
    Up,
    FocusIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub target: PointerTarget,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, target: PointerTarget) -> Self {
        Self { kind, target }
    }
}
