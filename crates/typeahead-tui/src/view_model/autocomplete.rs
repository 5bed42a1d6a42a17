// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Single-select autocomplete view model
//!
//! Composes the search controller and the selection navigator, owns the
//! committed value, and publishes change/touch notifications through the
//! host's event channel.

use std::fmt;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use typeahead_core::{Matcher, SearchItem, SearchProvider, StaticSearchProvider};

use crate::config::AutocompleteConfig;
use crate::error::SetupError;
use crate::event::{PointerEvent, PointerKind, PointerTarget, WidgetEvent};
use crate::view_model::navigator::{NavAction, SelectionNavigator};
use crate::view_model::search::{SearchController, SearchPhase, SearchResult};

/// Builder for [`AutocompleteViewModel`]. Requires an event sink and a
/// search source (candidate items or a provider); missing wiring is a
/// configuration error surfaced at build time.
pub struct AutocompleteBuilder {
    config: AutocompleteConfig,
    items: Option<Vec<SearchItem>>,
    provider: Option<Arc<dyn SearchProvider>>,
    events: Option<UnboundedSender<WidgetEvent>>,
    disabled: bool,
}

impl AutocompleteBuilder {
    pub fn new(config: AutocompleteConfig) -> Self {
        Self {
            config,
            items: None,
            provider: None,
            events: None,
            disabled: false,
        }
    }

    /// Candidate items served through the built-in matcher.
    pub fn items(mut self, items: Vec<SearchItem>) -> Self {
        self.items = Some(items);
        self
    }

    /// Caller-supplied search capability. Takes precedence over `items`;
    /// the configured search filters only apply to the built-in matcher.
    pub fn provider(mut self, provider: Arc<dyn SearchProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn events(mut self, events: UnboundedSender<WidgetEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn build(self) -> Result<AutocompleteViewModel, SetupError> {
        let events = self.events.ok_or(SetupError::MissingEventSink)?;
        let provider = match (self.provider, self.items) {
            (Some(provider), _) => provider,
            (None, Some(items)) => {
                let matcher = Matcher::new(self.config.effective_search_properties())
                    .with_filters(self.config.search_filters.clone());
                Arc::new(StaticSearchProvider::new(items, matcher)) as Arc<dyn SearchProvider>
            }
            (None, None) => return Err(SetupError::MissingSearchSource),
        };

        let mut vm = AutocompleteViewModel {
            controller: SearchController::new(self.config, provider),
            navigator: SelectionNavigator::new(),
            selected: None,
            disabled: self.disabled,
            listening: false,
            events,
        };
        if !vm.disabled {
            vm.attach();
        }
        Ok(vm)
    }
}

/// The typeahead search input: debounced search, dropdown selection, and a
/// single committed value.
pub struct AutocompleteViewModel {
    controller: SearchController,
    navigator: SelectionNavigator,
    selected: Option<SearchItem>,
    disabled: bool,
    /// Whether event handlers are armed. Released exactly once on disable
    /// or teardown, re-armed on enable.
    listening: bool,
    events: UnboundedSender<WidgetEvent>,
}

impl AutocompleteViewModel {
    pub fn builder(config: AutocompleteConfig) -> AutocompleteBuilder {
        AutocompleteBuilder::new(config)
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn selected(&self) -> Option<&SearchItem> {
        self.selected.as_ref()
    }

    pub fn search_text(&self) -> &str {
        self.controller.search_text()
    }

    pub fn results(&self) -> &[SearchResult] {
        self.controller.results()
    }

    pub fn highlight_text(&self) -> &str {
        self.controller.highlight_text()
    }

    pub fn phase(&self) -> SearchPhase {
        self.controller.phase()
    }

    pub fn is_open(&self) -> bool {
        self.navigator.is_open()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.navigator.active_index()
    }

    pub fn shows_no_results(&self) -> bool {
        self.controller.shows_no_results()
    }

    pub fn no_results_message(&self) -> &str {
        self.controller.no_results_message()
    }

    fn attach(&mut self) {
        self.listening = true;
    }

    fn detach(&mut self) {
        self.listening = false;
    }

    /// Enable or disable the widget, releasing and re-arming its event
    /// handling; both directions are idempotent.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.detach();
        if !disabled {
            self.attach();
        }
        self.disabled = disabled;
    }

    /// Tear down: release event handling so late timer or provider
    /// completions cannot mutate state.
    pub fn shutdown(&mut self) {
        self.detach();
    }

    /// Host-initiated value write. Sets the committed value and mirrors its
    /// descriptor into the visible text without emitting notifications.
    pub fn write_value(&mut self, value: Option<SearchItem>) {
        if self.disabled {
            return;
        }
        let text = value
            .as_ref()
            .map(|item| item.descriptor_text(&self.controller.config().descriptor_property))
            .unwrap_or_default();
        self.selected = value;
        self.controller.set_text_silently(&text);
    }

    /// Route a text change into the search pipeline. Clearing the text
    /// while a value is committed clears the value and notifies.
    pub fn handle_text_change(&mut self, text: &str) {
        if !self.listening {
            return;
        }
        let had_value = self.selected.is_some();
        self.controller.handle_text_change(text);
        if matches!(self.controller.phase(), SearchPhase::Idle) {
            self.navigator.close();
        }
        if text.is_empty() && had_value {
            self.set_selection(None);
        }
    }

    /// Route a key event. Returns true when the key was consumed and the
    /// host should not apply its default behavior.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !self.listening {
            return false;
        }
        match self.navigator.handle_key(key, self.controller.results().len()) {
            NavAction::Ignored => {
                // The dropdown can be visible with only the "no results"
                // message; Escape still dismisses it.
                if key.code == KeyCode::Esc && self.controller.shows_no_results() {
                    self.controller.reset_results();
                    return true;
                }
                false
            }
            NavAction::Moved => true,
            NavAction::Dismissed => {
                self.controller.reset_results();
                true
            }
            NavAction::Commit {
                index,
                advance_focus,
            } => {
                self.commit_index(index);
                !advance_focus
            }
        }
    }

    /// Route a pre-hit-tested pointer event. A press on a result row
    /// commits it exactly like Enter.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        if !self.listening {
            return false;
        }
        match (event.kind, event.target) {
            (PointerKind::Down, PointerTarget::ResultRow(index))
                if index < self.controller.results().len() =>
            {
                self.commit_index(index);
                true
            }
            _ => false,
        }
    }

    /// The input lost focus. Reconcile the visible text with the committed
    /// value and notify the host that the control was touched.
    pub fn handle_blur(&mut self) {
        if !self.listening {
            return;
        }
        if self.controller.search_text().is_empty() {
            if self.selected.is_some() {
                self.set_selection(None);
            }
        } else if let Some(selected) = &self.selected {
            let descriptor =
                selected.descriptor_text(&self.controller.config().descriptor_property);
            if self.controller.search_text() != descriptor {
                self.controller.set_text_silently(&descriptor);
            }
        }
        self.navigator.close();
        self.controller.reset_results();
        let _ = self.events.send(WidgetEvent::Touched);
    }

    /// Clear the visible text, the committed value, and any open results,
    /// without emitting notifications. Used by the lookup after a token
    /// commit.
    pub fn clear_search_text(&mut self) {
        self.controller.set_text_silently("");
        self.controller.reset_results();
        self.navigator.close();
        self.selected = None;
    }

    /// Apply any completed debounce or provider messages, then reconcile
    /// the dropdown. Returns true when new results were applied.
    pub fn poll(&mut self) -> bool {
        if !self.listening {
            return false;
        }
        let applied = self.controller.try_pump();
        if applied {
            self.reconcile_dropdown();
        }
        applied
    }

    /// Await the next internal message and apply it. Intended for hosts
    /// that drive the widget from a select loop.
    pub async fn process_next(&mut self) -> bool {
        if !self.listening {
            return false;
        }
        let applied = self.controller.process_next().await;
        if applied {
            self.reconcile_dropdown();
        }
        applied
    }

    fn reconcile_dropdown(&mut self) {
        if self.controller.has_open_results() {
            // Every fresh result set re-opens with the first result active.
            self.navigator.open(self.controller.results().len());
        } else {
            self.navigator.close();
        }
    }

    fn commit_index(&mut self, index: usize) {
        let Some(result) = self.controller.results().get(index) else {
            return;
        };
        let item = result.item.clone();
        let descriptor = result.descriptor.clone();
        debug!(index, descriptor = %descriptor, "committing search result");
        self.controller.set_text_silently(&descriptor);
        self.controller.reset_results();
        self.navigator.close();
        self.set_selection(Some(item));
    }

    fn set_selection(&mut self, item: Option<SearchItem>) {
        self.selected = item.clone();
        let _ = self.events.send(WidgetEvent::SelectionChanged {
            selected_item: item.clone(),
        });
        let _ = self.events.send(WidgetEvent::ValueChanged(item));
    }
}

impl fmt::Debug for AutocompleteViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutocompleteViewModel")
            .field("phase", &self.controller.phase())
            .field("search_text", &self.controller.search_text())
            .field("results", &self.controller.results().len())
            .field("selected", &self.selected)
            .field("disabled", &self.disabled)
            .field("listening", &self.listening)
            .finish()
    }
}
