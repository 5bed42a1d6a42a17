// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Multi-select lookup view model
//!
//! Layers a token collection over the autocomplete: committed results
//! become tokens, the search text clears, and keyboard focus is arbitrated
//! between the free-text input and the token list. The inner autocomplete
//! publishes into a private channel; the lookup intercepts its selections
//! and republishes the events the host cares about.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use typeahead_core::{SearchItem, SearchProvider};

use crate::config::AutocompleteConfig;
use crate::error::SetupError;
use crate::event::{PointerEvent, PointerKind, PointerTarget, WidgetEvent};
use crate::view_model::autocomplete::{AutocompleteBuilder, AutocompleteViewModel};
use crate::view_model::search::SearchResult;
use crate::view_model::tokens::{FocusTarget, Token, TokenCollection, TokenMsg};

/// Builder for [`LookupViewModel`]; wiring requirements match the
/// autocomplete's.
pub struct LookupBuilder {
    config: AutocompleteConfig,
    items: Option<Vec<SearchItem>>,
    provider: Option<Arc<dyn SearchProvider>>,
    events: Option<UnboundedSender<WidgetEvent>>,
    disabled: bool,
}

impl LookupBuilder {
    pub fn new(config: AutocompleteConfig) -> Self {
        Self {
            config,
            items: None,
            provider: None,
            events: None,
            disabled: false,
        }
    }

    pub fn items(mut self, items: Vec<SearchItem>) -> Self {
        self.items = Some(items);
        self
    }

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

    pub fn build(self) -> Result<LookupViewModel, SetupError> {
        let events = self.events.ok_or(SetupError::MissingEventSink)?;

        let (inner_tx, inner_rx) = mpsc::unbounded_channel();
        let mut builder = AutocompleteBuilder::new(self.config)
            .events(inner_tx)
            .disabled(self.disabled);
        if let Some(provider) = self.provider {
            builder = builder.provider(provider);
        }
        if let Some(items) = self.items {
            builder = builder.items(items);
        }
        let autocomplete = builder.build()?;

        Ok(LookupViewModel {
            autocomplete,
            tokens: TokenCollection::new(),
            events,
            inner_rx,
            disabled: self.disabled,
            listening: !self.disabled,
            token_focus_armed: false,
        })
    }
}

/// The token picker: an autocomplete plus an ordered collection of selected
/// values.
pub struct LookupViewModel {
    autocomplete: AutocompleteViewModel,
    tokens: TokenCollection,
    events: UnboundedSender<WidgetEvent>,
    inner_rx: UnboundedReceiver<WidgetEvent>,
    disabled: bool,
    listening: bool,
    /// Armed on key-down when Backspace/Left lands on an already-empty
    /// input; honored only by the matching key-up. Scoped to a single
    /// key-down/key-up pair, reset on every key-down.
    token_focus_armed: bool,
}

impl LookupViewModel {
    pub fn builder(config: AutocompleteConfig) -> LookupBuilder {
        LookupBuilder::new(config)
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn tokens(&self) -> &[Token] {
        self.tokens.tokens()
    }

    /// The committed value of the lookup: the ordered selected values.
    pub fn value(&self) -> Vec<SearchItem> {
        self.tokens.values()
    }

    pub fn focus(&self) -> FocusTarget {
        self.tokens.focus()
    }

    pub fn search_text(&self) -> &str {
        self.autocomplete.search_text()
    }

    pub fn results(&self) -> &[SearchResult] {
        self.autocomplete.results()
    }

    pub fn is_open(&self) -> bool {
        self.autocomplete.is_open()
    }

    pub fn active_result_index(&self) -> Option<usize> {
        self.autocomplete.active_index()
    }

    /// Enable or disable the widget; idempotent in both directions.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.listening = !disabled;
        self.disabled = disabled;
        self.autocomplete.set_disabled(disabled);
    }

    /// Tear down both layers; late messages are dropped, not applied.
    pub fn shutdown(&mut self) {
        self.listening = false;
        self.autocomplete.shutdown();
    }

    /// Host-initiated write of the whole value list. Each raw value is
    /// copied before wrapping, so later token bookkeeping cannot touch
    /// caller-owned data.
    pub fn write_value(&mut self, values: &[SearchItem]) {
        if self.disabled {
            return;
        }
        self.tokens.set_tokens(values.to_vec());
        self.emit_tokens_changed();
    }

    pub fn handle_text_change(&mut self, text: &str) {
        if !self.listening {
            return;
        }
        self.autocomplete.handle_text_change(text);
        self.drain_inner();
    }

    /// Key-down on the text input. Captures the focus-last-token intent
    /// before the key's default action can alter the text.
    pub fn handle_input_key_down(&mut self, key: &KeyEvent) -> bool {
        if !self.listening {
            return false;
        }
        self.token_focus_armed = false;
        match key.code {
            KeyCode::Backspace | KeyCode::Left => {
                if self.autocomplete.search_text().is_empty() {
                    self.token_focus_armed = true;
                }
                false
            }
            _ => {
                let consumed = self.autocomplete.handle_key(key);
                self.drain_inner();
                consumed
            }
        }
    }

    /// Key-up on the text input: completes an armed focus-last-token
    /// intent. Returns true when default navigation must be prevented.
    pub fn handle_input_key_up(&mut self, key: &KeyEvent) -> bool {
        if !self.listening {
            return false;
        }
        match key.code {
            KeyCode::Backspace | KeyCode::Left if self.token_focus_armed => {
                self.token_focus_armed = false;
                self.tokens.send(TokenMsg::FocusLastToken);
                self.pump_tokens();
                true
            }
            _ => false,
        }
    }

    /// Key-up while a token is focused: Backspace removes and walks to the
    /// previous token; Delete removes and refocuses the slot on the next
    /// scheduler tick so chained deletion keeps working.
    pub fn handle_token_key_up(&mut self, key: &KeyEvent) -> bool {
        if !self.listening {
            return false;
        }
        match key.code {
            KeyCode::Backspace => {
                self.tokens.send(TokenMsg::RemoveActiveToken);
                self.tokens.send(TokenMsg::FocusPreviousToken);
                self.pump_tokens();
                true
            }
            KeyCode::Delete => {
                self.tokens.send(TokenMsg::RemoveActiveToken);
                self.tokens.send_deferred(TokenMsg::FocusActiveToken);
                self.pump_tokens();
                true
            }
            _ => false,
        }
    }

    /// Pointer routing across the host boundary. Presses inside the host
    /// that do not land on a token focus the input; a release on the host
    /// leaves an actively focused token alone.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        if !self.listening {
            return false;
        }
        let consumed = self.autocomplete.handle_pointer(event);
        self.drain_inner();

        match (event.kind, event.target) {
            (PointerKind::Down | PointerKind::FocusIn, PointerTarget::Outside) => {
                self.tokens.focus_none();
            }
            (PointerKind::Down | PointerKind::FocusIn, PointerTarget::Token(index)) => {
                self.tokens.focus_token(index);
            }
            (PointerKind::Down | PointerKind::FocusIn, _inside_host) => {
                self.tokens.focus_input();
            }
            (PointerKind::Up, PointerTarget::Host) => {
                if !matches!(self.tokens.focus(), FocusTarget::Token(_)) {
                    self.tokens.focus_input();
                }
            }
            _ => {}
        }
        consumed
    }

    pub fn handle_blur(&mut self) {
        if !self.listening {
            return;
        }
        self.autocomplete.handle_blur();
        self.drain_inner();
    }

    /// Apply any completed search messages and queued token messages.
    /// Returns true when observable state changed.
    pub fn poll(&mut self) -> bool {
        if !self.listening {
            return false;
        }
        let mut changed = self.autocomplete.poll();
        self.drain_inner();
        changed |= self.pump_tokens();
        changed
    }

    fn drain_inner(&mut self) {
        while let Ok(event) = self.inner_rx.try_recv() {
            match event {
                WidgetEvent::SelectionChanged {
                    selected_item: Some(item),
                } => self.add_to_selected(item),
                WidgetEvent::SelectionChanged {
                    selected_item: None,
                } => {
                    let _ = self.events.send(WidgetEvent::SelectionChanged {
                        selected_item: None,
                    });
                }
                // The lookup's host value is the token list, not the inner
                // single-select value.
                WidgetEvent::ValueChanged(_) => {}
                other => {
                    let _ = self.events.send(other);
                }
            }
        }
    }

    fn add_to_selected(&mut self, item: SearchItem) {
        debug!(token_count = self.tokens.len() + 1, "appending committed result as token");
        let _ = self.events.send(WidgetEvent::SelectionChanged {
            selected_item: Some(item.clone()),
        });
        self.tokens.add(item);
        self.autocomplete.clear_search_text();
        self.tokens.focus_input();
        self.emit_tokens_changed();
    }

    fn pump_tokens(&mut self) -> bool {
        let outcome = self.tokens.pump();
        if outcome.tokens_changed {
            if self.tokens.is_empty() {
                self.tokens.focus_input();
            }
            self.emit_tokens_changed();
        }
        outcome.tokens_changed || outcome.focus_changed
    }

    fn emit_tokens_changed(&mut self) {
        let _ = self
            .events
            .send(WidgetEvent::TokensChanged(Some(self.tokens.tokens().to_vec())));
        let _ = self.events.send(WidgetEvent::Touched);
    }
}
