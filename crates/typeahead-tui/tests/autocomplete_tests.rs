// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! End-to-end behavior of the single-select autocomplete view model:
//! dropdown lifecycle, commits, blur reconciliation, and the host event
//! contract.

mod support;

use std::sync::Arc;

use crossterm::event::KeyCode;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use typeahead_tui::{
    AutocompleteConfig, AutocompleteViewModel, PointerEvent, PointerKind, PointerTarget,
    SetupError, WidgetEvent,
};

use support::{color_items, drain_events, init_tracing, item, key, settle, RecordingProvider};

fn build_default() -> (AutocompleteViewModel, UnboundedReceiver<WidgetEvent>) {
    build_with(AutocompleteConfig::default())
}

fn build_with(config: AutocompleteConfig) -> (AutocompleteViewModel, UnboundedReceiver<WidgetEvent>) {
    init_tracing();
    let (tx, rx) = mpsc::unbounded_channel();
    let vm = AutocompleteViewModel::builder(config)
        .items(color_items())
        .events(tx)
        .build()
        .expect("builder wiring is complete");
    (vm, rx)
}

async fn type_and_settle(vm: &mut AutocompleteViewModel, text: &str) {
    vm.handle_text_change(text);
    settle(|| vm.poll()).await;
}

fn descriptors(vm: &AutocompleteViewModel) -> Vec<String> {
    vm.results()
        .iter()
        .map(|result| result.descriptor.clone())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn searching_opens_the_dropdown_with_the_first_result_active() {
    let (mut vm, _rx) = build_default();

    type_and_settle(&mut vm, "r").await;

    assert!(vm.is_open());
    assert_eq!(vm.active_index(), Some(0));
    assert_eq!(
        descriptors(&vm),
        ["Red", "Green", "Orange", "Purple", "Turquoise", "Brown"]
    );
    assert_eq!(vm.highlight_text(), "r");
}

#[tokio::test(start_paused = true)]
async fn arrow_navigation_wraps_at_both_ends() {
    let (mut vm, _rx) = build_default();
    type_and_settle(&mut vm, "re").await;
    assert_eq!(descriptors(&vm), ["Red", "Green"]);

    assert!(vm.handle_key(&key(KeyCode::Up)));
    assert_eq!(vm.active_index(), Some(1), "Up from the first result wraps to the last");
    assert!(vm.handle_key(&key(KeyCode::Down)));
    assert_eq!(vm.active_index(), Some(0), "Down from the last result wraps to the first");
}

#[tokio::test(start_paused = true)]
async fn enter_commits_the_active_result() {
    let (mut vm, mut rx) = build_default();
    type_and_settle(&mut vm, "re").await;
    drain_events(&mut rx);

    vm.handle_key(&key(KeyCode::Down));
    assert!(vm.handle_key(&key(KeyCode::Enter)), "Enter is consumed by the commit");

    assert_eq!(vm.selected(), Some(&item("Green")));
    assert_eq!(vm.search_text(), "Green");
    assert!(!vm.is_open());
    assert_eq!(
        drain_events(&mut rx),
        [
            WidgetEvent::SelectionChanged {
                selected_item: Some(item("Green"))
            },
            WidgetEvent::ValueChanged(Some(item("Green"))),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn tab_commits_without_blocking_the_focus_advance() {
    let (mut vm, _rx) = build_default();
    type_and_settle(&mut vm, "re").await;

    assert!(
        !vm.handle_key(&key(KeyCode::Tab)),
        "Tab commits but the host must still move focus"
    );
    assert_eq!(vm.selected(), Some(&item("Red")));
    assert_eq!(vm.search_text(), "Red");
}

#[tokio::test(start_paused = true)]
async fn escape_dismisses_without_touching_the_committed_value() {
    let (mut vm, mut rx) = build_default();
    type_and_settle(&mut vm, "re").await;
    vm.handle_key(&key(KeyCode::Enter));
    drain_events(&mut rx);

    type_and_settle(&mut vm, "bl").await;
    assert!(vm.is_open());
    assert!(vm.handle_key(&key(KeyCode::Esc)));

    assert!(!vm.is_open());
    assert!(vm.results().is_empty());
    assert_eq!(vm.selected(), Some(&item("Red")), "Escape leaves the value alone");
    assert!(drain_events(&mut rx).is_empty());
}

#[tokio::test(start_paused = true)]
async fn a_press_on_a_result_row_commits_it() {
    let (mut vm, mut rx) = build_default();
    type_and_settle(&mut vm, "re").await;
    drain_events(&mut rx);

    let press = PointerEvent::new(PointerKind::Down, PointerTarget::ResultRow(1));
    assert!(vm.handle_pointer(press));
    assert_eq!(vm.selected(), Some(&item("Green")));
    assert!(!vm.is_open());

    // A press outside the result rows is not the widget's business.
    let press = PointerEvent::new(PointerKind::Down, PointerTarget::ResultRow(7));
    assert!(!vm.handle_pointer(press));
}

#[tokio::test(start_paused = true)]
async fn blur_restores_the_descriptor_over_edited_text() {
    let (mut vm, mut rx) = build_default();
    type_and_settle(&mut vm, "re").await;
    vm.handle_key(&key(KeyCode::Enter));
    drain_events(&mut rx);

    type_and_settle(&mut vm, "Re").await;
    vm.handle_blur();

    assert_eq!(vm.search_text(), "Red", "abandoned edits snap back to the value");
    assert_eq!(vm.selected(), Some(&item("Red")));
    assert!(!vm.is_open());
    assert_eq!(drain_events(&mut rx), [WidgetEvent::Touched]);
}

#[tokio::test(start_paused = true)]
async fn blur_with_cleared_text_clears_the_value() {
    let (mut vm, mut rx) = build_default();
    type_and_settle(&mut vm, "re").await;
    vm.handle_key(&key(KeyCode::Enter));
    drain_events(&mut rx);

    vm.handle_text_change("");
    vm.handle_blur();

    assert_eq!(vm.selected(), None);
    assert_eq!(
        drain_events(&mut rx),
        [
            WidgetEvent::SelectionChanged {
                selected_item: None
            },
            WidgetEvent::ValueChanged(None),
            WidgetEvent::Touched,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn blur_without_a_value_leaves_the_text_alone() {
    let (mut vm, mut rx) = build_default();
    type_and_settle(&mut vm, "zz").await;
    vm.handle_blur();

    assert_eq!(vm.search_text(), "zz");
    assert_eq!(vm.selected(), None);
    assert_eq!(drain_events(&mut rx), [WidgetEvent::Touched]);
}

#[tokio::test(start_paused = true)]
async fn clearing_the_text_clears_a_committed_value() {
    let (mut vm, mut rx) = build_default();
    type_and_settle(&mut vm, "re").await;
    vm.handle_key(&key(KeyCode::Enter));
    drain_events(&mut rx);

    vm.handle_text_change("");

    assert_eq!(vm.selected(), None);
    assert_eq!(
        drain_events(&mut rx),
        [
            WidgetEvent::SelectionChanged {
                selected_item: None
            },
            WidgetEvent::ValueChanged(None),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn a_disabled_widget_ignores_interaction() {
    let (mut vm, mut rx) = build_default();
    vm.set_disabled(true);

    vm.handle_text_change("re");
    settle(|| vm.poll()).await;
    assert!(vm.results().is_empty());
    assert!(!vm.handle_key(&key(KeyCode::Down)));
    vm.handle_blur();
    assert!(drain_events(&mut rx).is_empty());

    vm.write_value(Some(item("Red")));
    assert_eq!(vm.selected(), None, "value writes are ignored while disabled");

    vm.set_disabled(false);
    type_and_settle(&mut vm, "re").await;
    assert!(vm.is_open(), "re-enabling re-arms event handling");
}

#[tokio::test(start_paused = true)]
async fn a_disabled_widget_does_not_apply_pending_messages() {
    let (mut vm, _rx) = build_default();

    // Disable with the debounce message already in flight; the select-loop
    // path must not apply it either.
    vm.handle_text_change("re");
    vm.set_disabled(true);

    assert!(!vm.process_next().await);
    assert!(vm.results().is_empty());
    assert!(!vm.is_open());
}

#[tokio::test(start_paused = true)]
async fn write_value_mirrors_the_descriptor_silently() {
    let (mut vm, mut rx) = build_default();

    vm.write_value(Some(item("Turquoise")));
    assert_eq!(vm.selected(), Some(&item("Turquoise")));
    assert_eq!(vm.search_text(), "Turquoise");

    vm.write_value(None);
    assert_eq!(vm.selected(), None);
    assert_eq!(vm.search_text(), "");
    assert!(
        drain_events(&mut rx).is_empty(),
        "host-initiated writes must not echo change events"
    );
}

#[tokio::test(start_paused = true)]
async fn a_custom_provider_receives_the_raw_search_text() {
    let provider = Arc::new(RecordingProvider::new(color_items()));
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut vm = AutocompleteViewModel::builder(AutocompleteConfig::default())
        .provider(provider.clone())
        .events(tx)
        .build()
        .expect("builder wiring is complete");

    vm.handle_text_change("Re ");
    settle(|| vm.poll()).await;

    assert_eq!(
        provider.calls(),
        ["Re "],
        "trimming applies to the length gate, not the provider input"
    );
}

#[tokio::test(start_paused = true)]
async fn an_empty_result_set_shows_the_no_results_message() {
    let (mut vm, _rx) = build_default();
    type_and_settle(&mut vm, "zzz").await;

    assert!(!vm.is_open());
    assert!(vm.shows_no_results());
    assert_eq!(vm.no_results_message(), "No matching items found");

    assert!(vm.handle_key(&key(KeyCode::Esc)), "Escape dismisses the message");
    assert!(!vm.shows_no_results());

    let config = AutocompleteConfig {
        no_results_message: "Nothing here".to_string(),
        ..AutocompleteConfig::default()
    };
    let (mut vm, _rx) = build_with(config);
    type_and_settle(&mut vm, "zzz").await;
    assert_eq!(vm.no_results_message(), "Nothing here");
}

#[tokio::test(start_paused = true)]
async fn the_builder_rejects_incomplete_wiring() {
    let err = AutocompleteViewModel::builder(AutocompleteConfig::default())
        .items(color_items())
        .build()
        .expect_err("an event sink is mandatory");
    assert_eq!(err, SetupError::MissingEventSink);

    let (tx, _rx) = mpsc::unbounded_channel();
    let err = AutocompleteViewModel::builder(AutocompleteConfig::default())
        .events(tx)
        .build()
        .expect_err("a search source is mandatory");
    assert_eq!(err, SetupError::MissingSearchSource);
}
