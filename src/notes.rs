use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::persistence;
use crate::state::{State, AUTOSAVE_DELAY_MS};

pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn char_label(text: &str) -> String {
    format!("{} characters", char_count(text))
}

pub fn word_label(text: &str) -> String {
    format!("{} words", word_count(text))
}

/// Bookkeeping for the single pending autosave timer. Arming returns the
/// superseded handle so the caller can clear it; no two timers are ever
/// pending at once.
pub struct AutosaveTimer {
    pending: Option<i32>,
}

impl AutosaveTimer {
    pub const fn new() -> Self {
        Self { pending: None }
    }

    pub fn arm(&mut self, handle: i32) -> Option<i32> {
        self.pending.replace(handle)
    }

    pub fn cancel(&mut self) -> Option<i32> {
        self.pending.take()
    }

    pub fn fired(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Trailing debounce: each edit cancels the previous timer and starts a
/// fresh one, so the store sees one write per quiet window.
pub fn schedule_autosave(window: &Window, state: &Rc<RefCell<State>>) {
    let mut guard = state.borrow_mut();
    if let Some(handle) = guard.autosave.cancel() {
        window.clear_timeout_with_handle(handle);
    }
    let fire_state = state.clone();
    let onfire = Closure::<dyn FnMut()>::new(move || {
        let mut state = fire_state.borrow_mut();
        if !state.autosave.fired() {
            return;
        }
        let text = state.notes.value();
        drop(state);
        persistence::save_notes(&text);
    });
    match window.set_timeout_with_callback_and_timeout_and_arguments_0(
        onfire.as_ref().unchecked_ref(),
        AUTOSAVE_DELAY_MS,
    ) {
        Ok(handle) => {
            let _ = guard.autosave.arm(handle);
            guard.autosave_onfire = Some(onfire);
        }
        Err(_) => drop(onfire),
    }
}

pub fn cancel_autosave(window: &Window, state: &mut State) {
    if let Some(handle) = state.autosave.cancel() {
        window.clear_timeout_with_handle(handle);
        state.autosave_onfire = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_ignores_surrounding_whitespace() {
        assert_eq!(word_count("  a b  "), 2);
        assert_eq!(word_count("a\tb\nc"), 3);
        assert_eq!(word_count("one"), 1);
    }

    #[test]
    fn empty_buffers_have_zero_words() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t  "), 0);
    }

    #[test]
    fn char_count_is_scalar_values_not_bytes() {
        assert_eq!(char_count("héllo"), 5);
        assert_eq!(char_count(""), 0);
        assert_eq!(char_count("  a b  "), 7);
    }

    #[test]
    fn labels_read_as_counters() {
        assert_eq!(char_label("abc"), "3 characters");
        assert_eq!(word_label(""), "0 words");
    }

    #[test]
    fn rearming_supersedes_the_pending_timer() {
        let mut timer = AutosaveTimer::new();
        assert_eq!(timer.arm(1), None);
        // A burst of edits: every rearm hands back the old handle, leaving
        // exactly one timer pending for the whole burst.
        assert_eq!(timer.arm(2), Some(1));
        assert_eq!(timer.arm(3), Some(2));
        assert!(timer.is_pending());
        assert!(timer.fired());
        assert!(!timer.is_pending());
    }

    #[test]
    fn cancelled_timers_do_not_fire() {
        let mut timer = AutosaveTimer::new();
        let _ = timer.arm(7);
        assert_eq!(timer.cancel(), Some(7));
        assert!(!timer.fired());
        assert_eq!(timer.cancel(), None);
    }
}
