// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Token collection and focus arbitration for the lookup widget
//!
//! The collection owns the ordered list of selected values and the single
//! authoritative focus target. Mutations arrive either directly or as
//! [`TokenMsg`]s over an internal channel; deferred messages are how
//! "refocus on the next scheduler tick" is expressed without wall-clock
//! delays.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use typeahead_core::SearchItem;

/// A selected value wrapped for the token list. The value is shared with
/// the host form value and never mutated by the token itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub value: SearchItem,
}

/// Exactly one of these is authoritative at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    #[default]
    Input,
    Token(usize),
    None,
}

/// Focus and mutation commands routed through the collection's channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMsg {
    FocusLastToken,
    FocusPreviousToken,
    FocusActiveToken,
    RemoveActiveToken,
}

/// What one pump pass changed, so the owner knows which notifications to
/// publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenPumpOutcome {
    pub tokens_changed: bool,
    pub focus_changed: bool,
}

/// Ordered list of selected values plus the input/token focus arbiter.
pub struct TokenCollection {
    tokens: Vec<Token>,
    focus: FocusTarget,
    msg_tx: UnboundedSender<TokenMsg>,
    msg_rx: UnboundedReceiver<TokenMsg>,
}

impl TokenCollection {
    pub fn new() -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            tokens: Vec::new(),
            focus: FocusTarget::Input,
            msg_tx,
            msg_rx,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn values(&self) -> Vec<SearchItem> {
        self.tokens.iter().map(|token| token.value.clone()).collect()
    }

    pub fn focus(&self) -> FocusTarget {
        self.focus
    }

    pub fn active_index(&self) -> Option<usize> {
        match self.focus {
            FocusTarget::Token(index) => Some(index),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Replace the whole token list from externally supplied values.
    pub fn set_tokens(&mut self, values: Vec<SearchItem>) {
        self.tokens = values.into_iter().map(|value| Token { value }).collect();
        if self.tokens.is_empty() {
            self.focus = FocusTarget::Input;
        } else if let FocusTarget::Token(index) = self.focus {
            self.focus = FocusTarget::Token(index.min(self.tokens.len() - 1));
        }
    }

    pub fn add(&mut self, item: SearchItem) {
        self.tokens.push(Token { value: item });
    }

    /// Remove the token at `index`. An emptied collection hands focus back
    /// to the input.
    ///
    /// A focused index at or past `index` is left dangling on purpose: the
    /// follow-up focus message decides where focus lands (previous token
    /// for Backspace, same slot for Delete), exactly one message later.
    pub fn remove(&mut self, index: usize) -> Option<Token> {
        if index >= self.tokens.len() {
            return None;
        }
        let removed = self.tokens.remove(index);
        if self.tokens.is_empty() {
            self.focus = FocusTarget::Input;
        }
        Some(removed)
    }

    pub fn focus_input(&mut self) {
        self.focus = FocusTarget::Input;
    }

    pub fn focus_none(&mut self) {
        self.focus = FocusTarget::None;
    }

    /// Focus the token at `index`. An index past either end of the list
    /// hands focus back to the input.
    pub fn focus_token(&mut self, index: usize) {
        self.focus = if index < self.tokens.len() {
            FocusTarget::Token(index)
        } else {
            FocusTarget::Input
        };
    }

    pub fn send(&self, msg: TokenMsg) {
        let _ = self.msg_tx.send(msg);
    }

    /// Queue a message for the next scheduler tick: the task yields once so
    /// the message lands only after the current mutation fully applied.
    pub fn send_deferred(&self, msg: TokenMsg) {
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            let _ = tx.send(msg);
        });
    }

    /// Apply all queued messages.
    pub fn pump(&mut self) -> TokenPumpOutcome {
        let mut outcome = TokenPumpOutcome::default();
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.apply(msg, &mut outcome);
        }
        outcome
    }

    fn apply(&mut self, msg: TokenMsg, outcome: &mut TokenPumpOutcome) {
        let focus_before = self.focus;
        let len_before = self.tokens.len();

        match msg {
            TokenMsg::FocusLastToken => {
                if !self.tokens.is_empty() {
                    self.focus = FocusTarget::Token(self.tokens.len() - 1);
                }
            }
            TokenMsg::FocusPreviousToken => match self.focus {
                FocusTarget::Token(index) if index > 0 => self.focus_token(index - 1),
                // Walked past the front of the list: focus returns to the
                // input.
                FocusTarget::Token(_) => self.focus = FocusTarget::Input,
                _ => {}
            },
            TokenMsg::FocusActiveToken => {
                if let FocusTarget::Token(index) = self.focus {
                    self.focus_token(index);
                }
            }
            TokenMsg::RemoveActiveToken => {
                if let FocusTarget::Token(index) = self.focus {
                    self.remove(index);
                }
            }
        }

        outcome.tokens_changed |= self.tokens.len() != len_before;
        outcome.focus_changed |= self.focus != focus_before;
    }
}

impl Default for TokenCollection {
    fn default() -> Self {
        Self::new()
    }
}
