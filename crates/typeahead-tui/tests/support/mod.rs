// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Shared fixtures for the view model integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::UnboundedReceiver;

use typeahead_core::{Matcher, SearchError, SearchItem, SearchProvider};
use typeahead_tui::WidgetEvent;

/// Opt-in log output while debugging a failing test: `RUST_LOG=trace`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn item(name: &str) -> SearchItem {
    SearchItem::from_value(serde_json::json!({ "name": name })).expect("object literal")
}

/// The stock candidate list: six of these contain an "r".
pub fn color_items() -> Vec<SearchItem> {
    [
        "Red",
        "Blue",
        "Green",
        "Orange",
        "Pink",
        "Purple",
        "Turquoise",
        "Yellow",
        "Brown",
        "Black",
    ]
    .iter()
    .map(|name| item(name))
    .collect()
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn drain_events(rx: &mut UnboundedReceiver<WidgetEvent>) -> Vec<WidgetEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Let spawned debounce/provider tasks run without advancing the clock.
pub async fn tick() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

/// Alternate between letting tasks run and pumping the view model until the
/// pipeline settles. `poll` is the model's poll method.
pub async fn settle(mut poll: impl FnMut() -> bool) {
    for _ in 0..4 {
        tick().await;
        poll();
    }
}

/// A provider that records every search text it receives and can be
/// scripted with per-text delays and failures. Unscripted texts resolve
/// through the standard matcher over the fixture items.
pub struct RecordingProvider {
    matcher: Matcher,
    items: Vec<SearchItem>,
    calls: Mutex<Vec<String>>,
    delays: HashMap<String, Duration>,
    failing: HashSet<String>,
}

impl RecordingProvider {
    pub fn new(items: Vec<SearchItem>) -> Self {
        Self {
            matcher: Matcher::new(vec!["name".to_string()]),
            items,
            calls: Mutex::new(Vec::new()),
            delays: HashMap::new(),
            failing: HashSet::new(),
        }
    }

    pub fn with_delay(mut self, text: &str, delay: Duration) -> Self {
        self.delays.insert(text.to_string(), delay);
        self
    }

    pub fn failing_on(mut self, text: &str) -> Self {
        self.failing.insert(text.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for RecordingProvider {
    async fn search(&self, search_text: &str) -> Result<Vec<SearchItem>, SearchError> {
        self.calls.lock().unwrap().push(search_text.to_string());
        if let Some(delay) = self.delays.get(search_text) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(search_text) {
            return Err(SearchError::Provider(format!(
                "scripted failure for {search_text:?}"
            )));
        }
        Ok(self.matcher.filter(search_text, &self.items))
    }
}
