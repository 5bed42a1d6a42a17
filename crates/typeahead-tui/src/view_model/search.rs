// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Debounce timing and race resolution for typeahead searches
//!
//! The controller owns the debounce window, the sequence numbering of
//! issued requests, and the staleness checks that make overlapping
//! asynchronous responses safe. Timers and provider calls run in spawned
//! tasks that talk back exclusively through an internal channel; the
//! controller applies their messages in event order, so no locking is
//! needed, only ordering discipline.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use typeahead_core::{compute_spans, HighlightSpan, SearchError, SearchItem, SearchProvider};

use crate::config::AutocompleteConfig;

/// Lifecycle of the most recent search interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Nothing pending and nothing applied.
    Idle,
    /// A keystroke arrived; the debounce timer is running.
    Debouncing,
    /// The debounce elapsed and a provider call is in flight.
    Searching,
    /// A response for the newest request has been applied.
    Applied,
    /// The newest request's provider call failed; rendered as "no results".
    Failed,
}

/// Identity of one issued search, used solely to detect staleness.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub seq: u64,
    pub text: String,
    pub issued_at: Instant,
}

/// One row of an applied result set. Recomputed per search, never mutated
/// once published.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub item: SearchItem,
    pub descriptor: String,
    pub spans: Vec<HighlightSpan>,
}

#[derive(Debug)]
enum SearchMsg {
    DebounceElapsed {
        timer_gen: u64,
    },
    Response {
        seq: u64,
        text: String,
        outcome: Result<Vec<SearchItem>, SearchError>,
    },
}

/// Debounced, race-resolved search pipeline over one provider.
pub struct SearchController {
    config: AutocompleteConfig,
    provider: Arc<dyn SearchProvider>,
    phase: SearchPhase,
    text: String,
    /// Bumped on every keystroke; a timer firing with an older generation
    /// lost the debounce window and is ignored.
    timer_gen: u64,
    /// Sequence number of the newest issued request. A response is applied
    /// only when its sequence number equals this value.
    latest_seq: u64,
    last_request: Option<SearchRequest>,
    results: Vec<SearchResult>,
    highlight_text: String,
    msg_tx: UnboundedSender<SearchMsg>,
    msg_rx: UnboundedReceiver<SearchMsg>,
}

impl SearchController {
    pub fn new(config: AutocompleteConfig, provider: Arc<dyn SearchProvider>) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            config,
            provider,
            phase: SearchPhase::Idle,
            text: String::new(),
            timer_gen: 0,
            latest_seq: 0,
            last_request: None,
            results: Vec::new(),
            highlight_text: String::new(),
            msg_tx,
            msg_rx,
        }
    }

    pub fn config(&self) -> &AutocompleteConfig {
        &self.config
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn search_text(&self) -> &str {
        &self.text
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// The text the current result set was matched against.
    pub fn highlight_text(&self) -> &str {
        &self.highlight_text
    }

    pub fn last_request(&self) -> Option<&SearchRequest> {
        self.last_request.as_ref()
    }

    /// True when an applied, non-empty result set should be shown open.
    pub fn has_open_results(&self) -> bool {
        self.phase == SearchPhase::Applied && !self.results.is_empty()
    }

    /// True when the dropdown should show the "no results" message.
    pub fn shows_no_results(&self) -> bool {
        matches!(self.phase, SearchPhase::Applied | SearchPhase::Failed)
            && self.results.is_empty()
    }

    pub fn no_results_message(&self) -> &str {
        &self.config.no_results_message
    }

    /// Record a text change and start (or restart) the debounce window.
    ///
    /// Text below the minimum character gate clears results and returns to
    /// idle without invoking any search; the gate inspects the trimmed
    /// text, the search itself receives the raw text.
    pub fn handle_text_change(&mut self, text: &str) {
        self.text = text.to_string();

        let trimmed = text.trim();
        if trimmed.is_empty()
            || trimmed.chars().count() < self.config.search_text_minimum_characters
        {
            self.reset_results();
            return;
        }

        self.phase = SearchPhase::Debouncing;
        self.timer_gen += 1;
        let timer_gen = self.timer_gen;
        let debounce = self.config.debounce_time;
        // The window starts at the keystroke, not at the timer task's first
        // poll.
        let deadline = Instant::now() + debounce;
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            if debounce.is_zero() {
                // Zero debounce means "next tick", never synchronous.
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep_until(deadline).await;
            }
            let _ = tx.send(SearchMsg::DebounceElapsed { timer_gen });
        });
    }

    /// Update the visible text without triggering a search, e.g. when blur
    /// resets it to the committed value's descriptor.
    pub fn set_text_silently(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Clear results and return to idle, orphaning any pending debounce
    /// timer or in-flight provider call. The visible text is untouched.
    pub fn reset_results(&mut self) {
        self.phase = SearchPhase::Idle;
        self.results.clear();
        self.highlight_text.clear();
        self.last_request = None;
        self.timer_gen += 1;
        self.latest_seq += 1;
    }

    /// Apply all completed internal messages. Returns true when a result
    /// set was applied.
    pub fn try_pump(&mut self) -> bool {
        let mut applied = false;
        while let Ok(msg) = self.msg_rx.try_recv() {
            applied |= self.apply_msg(msg);
        }
        applied
    }

    /// Await and apply the next internal message. Returns true when a
    /// result set was applied.
    pub async fn process_next(&mut self) -> bool {
        match self.msg_rx.recv().await {
            Some(msg) => self.apply_msg(msg),
            None => false,
        }
    }

    fn apply_msg(&mut self, msg: SearchMsg) -> bool {
        match msg {
            SearchMsg::DebounceElapsed { timer_gen } => {
                if timer_gen != self.timer_gen {
                    trace!(timer_gen, "debounce timer superseded by a newer keystroke");
                    return false;
                }
                self.issue_request();
                false
            }
            SearchMsg::Response { seq, text, outcome } => self.apply_response(seq, text, outcome),
        }
    }

    /// The debounce window closed on the newest keystroke: stamp a fresh
    /// sequence number and invoke the provider.
    fn issue_request(&mut self) {
        self.latest_seq += 1;
        let request = SearchRequest {
            seq: self.latest_seq,
            text: self.text.clone(),
            issued_at: Instant::now(),
        };
        debug!(seq = request.seq, text = %request.text, "issuing search request");
        self.phase = SearchPhase::Searching;

        let provider = Arc::clone(&self.provider);
        let tx = self.msg_tx.clone();
        let seq = request.seq;
        let text = request.text.clone();
        self.last_request = Some(request);
        tokio::spawn(async move {
            let outcome = provider.search(&text).await;
            let _ = tx.send(SearchMsg::Response { seq, text, outcome });
        });
    }

    fn apply_response(
        &mut self,
        seq: u64,
        text: String,
        outcome: Result<Vec<SearchItem>, SearchError>,
    ) -> bool {
        if seq != self.latest_seq {
            // Expected steady-state behavior under overlapping searches,
            // not a failure.
            trace!(seq, latest = self.latest_seq, "discarding superseded search response");
            return false;
        }

        let (mut items, failed) = match outcome {
            Ok(items) => (items, false),
            Err(error) => {
                warn!(%error, seq, "search provider failed; applying empty result set");
                (Vec::new(), true)
            }
        };

        if let Some(limit) = self.config.search_results_limit {
            items.truncate(limit);
        }

        let descriptor_property = self.config.descriptor_property.clone();
        self.results = items
            .into_iter()
            .map(|item| {
                let descriptor = item.descriptor_text(&descriptor_property);
                let spans = compute_spans(&descriptor, &text);
                SearchResult {
                    item,
                    descriptor,
                    spans,
                }
            })
            .collect();
        self.highlight_text = text;
        self.phase = if failed {
            SearchPhase::Failed
        } else {
            SearchPhase::Applied
        };
        debug!(
            seq,
            results = self.results.len(),
            phase = ?self.phase,
            "applied search response"
        );
        true
    }
}
