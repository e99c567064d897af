//! Typed event channel.
//!
//! Every state transition in the engine is described by a [`TagEvent`]
//! delivered to an explicit subscriber list. Events are emitted after
//! the mutation they describe has fully completed, so a subscriber
//! never observes partial state; a panicking subscriber is isolated and
//! does not stop delivery to the others.

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::lifecycle::SettleControl;
use crate::value::TagValue;

/// Notification of one engine state transition.
#[derive(Clone, Debug)]
pub enum TagEvent {
    /// A tag was appended to the collection.
    Added { value: TagValue },
    /// A tag was removed from the collection.
    Removed { value: TagValue },
    /// The collection changed; fires once after every mutating
    /// operation with a snapshot of the full collection.
    Changed { values: Vec<TagValue> },
    /// A candidate was rejected because an equal tag already exists.
    Duplicate { tag: String },
    /// A candidate was rejected by the pipeline, or an error was
    /// injected programmatically.
    Error { message: String },
    /// Raw multi-value text arrived (paste or bulk set).
    Paste { raw: String },
    /// The live input text changed.
    Input { text: String },
    /// The lifecycle entered `Typing`; emitted once per entry.
    Typing,
    /// The quiet period elapsed; autocomplete runs next unless the
    /// handle pauses it.
    DoneTyping {
        autocomplete_enabled: bool,
        live_input: String,
        control: SettleControl,
    },
}

impl TagEvent {
    /// Stable event name, mirroring the external notification contract.
    pub fn name(&self) -> &'static str {
        match self {
            TagEvent::Added { .. } => "added",
            TagEvent::Removed { .. } => "removed",
            TagEvent::Changed { .. } => "changed",
            TagEvent::Duplicate { .. } => "duplicate",
            TagEvent::Error { .. } => "error",
            TagEvent::Paste { .. } => "paste",
            TagEvent::Input { .. } => "input",
            TagEvent::Typing => "typing",
            TagEvent::DoneTyping { .. } => "done-typing",
        }
    }
}

/// Handle returned by [`EventChannel::subscribe`]; pass it back to
/// [`EventChannel::unsubscribe`] to stop receiving events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriberId(u64);

type Subscriber = Box<dyn FnMut(&TagEvent)>;

/// Dispatch point for [`TagEvent`]s.
///
/// Subscribers may be added or removed at any time. Delivery is in
/// subscription order.
#[derive(Default)]
pub struct EventChannel {
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_id: u64,
}

impl EventChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&TagEvent) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns `true` if the subscriber existed and was removed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Deliver `event` to every subscriber.
    ///
    /// A panic inside one subscriber is caught and logged; the
    /// remaining subscribers still receive the event and engine state
    /// is unaffected (the mutation already completed before emission).
    pub fn emit(&mut self, event: &TagEvent) {
        log::trace!(target: "tag.events", "emit {}", event.name());
        for (id, subscriber) in &mut self.subscribers {
            if catch_unwind(AssertUnwindSafe(|| subscriber(event))).is_err() {
                log::warn!(
                    target: "tag.events",
                    "subscriber {id:?} panicked during {} delivery",
                    event.name()
                );
            }
        }
    }
}
