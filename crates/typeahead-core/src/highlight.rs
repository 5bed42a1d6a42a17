// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Highlight span computation
//!
//! The renderer emphasizes the parts of each result's display text that
//! matched the search. Only the span computation lives here; how spans are
//! painted is the renderer's concern.

use serde::Serialize;

/// One emphasized run of the display text, in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    pub start: usize,
    pub len: usize,
}

/// Every case-insensitive, non-overlapping occurrence of `search_text` in
/// `display_text`, left to right. The scan always advances past the end of
/// a found occurrence, so overlapping candidates collapse into one span.
/// Empty search text yields no spans.
pub fn compute_spans(display_text: &str, search_text: &str) -> Vec<HighlightSpan> {
    if search_text.is_empty() {
        return Vec::new();
    }

    let haystack: Vec<char> = display_text.chars().collect();
    let needle: Vec<char> = search_text.chars().collect();

    let mut spans = Vec::new();
    let mut at = 0;
    while at + needle.len() <= haystack.len() {
        let found = haystack[at..at + needle.len()]
            .iter()
            .zip(&needle)
            .all(|(a, b)| chars_eq_ignore_case(*a, *b));
        if found {
            spans.push(HighlightSpan {
                start: at,
                len: needle.len(),
            });
            at += needle.len();
        } else {
            at += 1;
        }
    }
    spans
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
