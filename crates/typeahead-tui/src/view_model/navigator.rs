// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Keyboard selection state machine for the results dropdown

use crossterm::event::{KeyCode, KeyEvent};

/// Dropdown selection state: closed, or open with one active result.
///
/// While open, `active_index` is always in bounds for the current result
/// set; navigation wraps modulo the result count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigatorState {
    #[default]
    Closed,
    Open {
        active_index: usize,
    },
}

/// What the owning widget must do after a key passed through the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Not a navigation key, or the dropdown is closed.
    Ignored,
    /// The active index moved; no further action needed.
    Moved,
    /// Commit the result at `index`. `advance_focus` is set for Tab, which
    /// must not intercept the host's default focus advance.
    Commit { index: usize, advance_focus: bool },
    /// Close the dropdown and clear the published results, leaving the
    /// committed value untouched.
    Dismissed,
}

#[derive(Debug, Default)]
pub struct SelectionNavigator {
    state: NavigatorState,
}

impl SelectionNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> NavigatorState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, NavigatorState::Open { .. })
    }

    pub fn active_index(&self) -> Option<usize> {
        match self.state {
            NavigatorState::Open { active_index } => Some(active_index),
            NavigatorState::Closed => None,
        }
    }

    /// Open over a fresh result set; the first result becomes active.
    /// Opening over an empty set stays closed.
    pub fn open(&mut self, result_count: usize) {
        self.state = if result_count > 0 {
            NavigatorState::Open { active_index: 0 }
        } else {
            NavigatorState::Closed
        };
    }

    pub fn close(&mut self) {
        self.state = NavigatorState::Closed;
    }

    /// Advance the active result, wrapping past the end.
    pub fn select_next(&mut self, result_count: usize) {
        if let NavigatorState::Open { active_index } = self.state {
            if result_count > 0 {
                self.state = NavigatorState::Open {
                    active_index: (active_index + 1) % result_count,
                };
            }
        }
    }

    /// Move the active result backward, wrapping past the start.
    pub fn select_previous(&mut self, result_count: usize) {
        if let NavigatorState::Open { active_index } = self.state {
            if result_count > 0 {
                self.state = NavigatorState::Open {
                    active_index: (active_index + result_count - 1) % result_count,
                };
            }
        }
    }

    /// Route one key event. `result_count` is the size of the currently
    /// published result set.
    pub fn handle_key(&mut self, key: &KeyEvent, result_count: usize) -> NavAction {
        let NavigatorState::Open { active_index } = self.state else {
            return NavAction::Ignored;
        };

        match key.code {
            KeyCode::Down => {
                self.select_next(result_count);
                NavAction::Moved
            }
            KeyCode::Up => {
                self.select_previous(result_count);
                NavAction::Moved
            }
            KeyCode::Enter => {
                self.close();
                NavAction::Commit {
                    index: active_index,
                    advance_focus: false,
                }
            }
            KeyCode::Tab => {
                self.close();
                NavAction::Commit {
                    index: active_index,
                    advance_focus: true,
                }
            }
            KeyCode::Esc => {
                self.close();
                NavAction::Dismissed
            }
            _ => NavAction::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn opening_activates_the_first_result() {
        let mut nav = SelectionNavigator::new();
        nav.open(3);
        assert_eq!(nav.active_index(), Some(0));

        nav.close();
        nav.open(0);
        assert!(!nav.is_open(), "opening over an empty set stays closed");
    }

    #[test]
    fn navigation_wraps_at_both_ends() {
        let mut nav = SelectionNavigator::new();
        nav.open(3);

        assert_eq!(nav.handle_key(&key(KeyCode::Up), 3), NavAction::Moved);
        assert_eq!(nav.active_index(), Some(2), "Up from 0 wraps to the last index");

        assert_eq!(nav.handle_key(&key(KeyCode::Down), 3), NavAction::Moved);
        assert_eq!(nav.active_index(), Some(0), "Down from the last index wraps to 0");
    }

    #[test]
    fn enter_commits_and_closes() {
        let mut nav = SelectionNavigator::new();
        nav.open(3);
        nav.select_next(3);

        let action = nav.handle_key(&key(KeyCode::Enter), 3);
        assert_eq!(
            action,
            NavAction::Commit {
                index: 1,
                advance_focus: false
            }
        );
        assert!(!nav.is_open());
    }

    #[test]
    fn tab_commits_but_lets_focus_advance() {
        let mut nav = SelectionNavigator::new();
        nav.open(2);

        let action = nav.handle_key(&key(KeyCode::Tab), 2);
        assert_eq!(
            action,
            NavAction::Commit {
                index: 0,
                advance_focus: true
            }
        );
    }

    #[test]
    fn escape_dismisses_without_committing() {
        let mut nav = SelectionNavigator::new();
        nav.open(2);
        assert_eq!(nav.handle_key(&key(KeyCode::Esc), 2), NavAction::Dismissed);
        assert!(!nav.is_open());
    }

    #[test]
    fn keys_are_ignored_while_closed() {
        let mut nav = SelectionNavigator::new();
        assert_eq!(nav.handle_key(&key(KeyCode::Down), 3), NavAction::Ignored);
        assert_eq!(nav.handle_key(&key(KeyCode::Enter), 3), NavAction::Ignored);
    }
}
