//! Typing lifecycle: the `Idle → Typing → Settled` cycle that gates
//! when autocomplete matching runs.
//!
//! The settle timer is a plain deadline owned by the controller. Each
//! qualifying input event replaces the deadline (debounce, not
//! throttle); the host drives the clock by passing `Instant`s into
//! [`record_input`](TypingLifecycle::record_input) and
//! [`poll`](TypingLifecycle::poll). Dropping the engine drops the
//! deadline with it, so no callback can fire after teardown.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Default quiet period after the last input event before settling.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Lifecycle states. The machine cycles for the component's lifetime;
/// there is no terminal state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypingState {
    #[default]
    Idle,
    Typing,
    Settled,
}

/// Control handle carried by the `done-typing` event.
///
/// Subscribers may call [`pause`](SettleControl::pause) during delivery
/// to suppress the automatic match that would otherwise follow, or
/// [`resume`](SettleControl::resume) to re-arm it (optionally replacing
/// the candidate list). Shares state with the controller through `Rc`,
/// which also keeps the engine single-threaded by construction.
#[derive(Clone, Debug)]
pub struct SettleControl {
    ready: Rc<Cell<bool>>,
    replacement: Rc<RefCell<Option<Vec<String>>>>,
}

impl SettleControl {
    /// Suppress the upcoming automatic autocomplete match.
    ///
    /// Readiness stays off until [`resume`](SettleControl::resume) or
    /// the engine's `show_autocomplete` turns it back on.
    pub fn pause(&self) {
        self.ready.set(false);
    }

    /// Re-arm autocomplete, optionally replacing the candidate list.
    ///
    /// Takes effect when the engine regains control after event
    /// delivery; callers holding the handle across an asynchronous
    /// candidate fetch use the engine's `show_autocomplete` instead.
    pub fn resume(&self, candidates: Option<Vec<String>>) {
        self.ready.set(true);
        if let Some(candidates) = candidates {
            *self.replacement.borrow_mut() = Some(candidates);
        }
    }
}

/// The typing lifecycle controller.
#[derive(Debug)]
pub struct TypingLifecycle {
    state: TypingState,
    live_input: String,
    ready: Rc<Cell<bool>>,
    replacement: Rc<RefCell<Option<Vec<String>>>>,
    deadline: Option<Instant>,
    debounce: Duration,
}

impl TypingLifecycle {
    pub fn new(debounce: Duration) -> Self {
        Self {
            state: TypingState::Idle,
            live_input: String::new(),
            ready: Rc::new(Cell::new(true)),
            replacement: Rc::new(RefCell::new(None)),
            deadline: None,
            debounce,
        }
    }

    pub fn state(&self) -> TypingState {
        self.state
    }

    /// The current live (uncommitted) input text.
    pub fn live_input(&self) -> &str {
        &self.live_input
    }

    pub fn ready_for_autocomplete(&self) -> bool {
        self.ready.get()
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready.set(ready);
    }

    /// A control handle sharing this controller's readiness state.
    pub fn control(&self) -> SettleControl {
        SettleControl {
            ready: Rc::clone(&self.ready),
            replacement: Rc::clone(&self.replacement),
        }
    }

    /// Record a raw input event at `now`.
    ///
    /// Resets the settle deadline and returns `true` when the machine
    /// just entered `Typing` (the caller emits `typing` exactly once
    /// per entry, not per keystroke).
    pub fn record_input(&mut self, text: &str, now: Instant) -> bool {
        self.live_input.clear();
        self.live_input.push_str(text);
        self.deadline = Some(now + self.debounce);
        if self.state == TypingState::Typing {
            false
        } else {
            log::trace!(target: "tag.lifecycle", "enter typing");
            self.state = TypingState::Typing;
            true
        }
    }

    /// Advance the clock to `now`.
    ///
    /// Returns `true` when the quiet period elapsed with no intervening
    /// input and the machine moved `Typing → Settled`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.state != TypingState::Typing {
            return false;
        }
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }
        log::trace!(target: "tag.lifecycle", "settled");
        self.state = TypingState::Settled;
        self.deadline = None;
        true
    }

    /// Take the candidate list a [`SettleControl::resume`] call left
    /// behind, if any.
    pub fn take_replacement(&mut self) -> Option<Vec<String>> {
        self.replacement.borrow_mut().take()
    }

    /// Clear the live input and cancel any pending settle.
    ///
    /// Used after a commit: the machine returns to `Idle` and the old
    /// deadline can no longer fire.
    pub fn cancel(&mut self) {
        self.live_input.clear();
        self.deadline = None;
        self.state = TypingState::Idle;
    }
}
