//! Test helpers for the tag-input engine.
//!
//! Provides a [`RecordingAdapter`] that captures every render intent
//! the engine issues, plus event-collection helpers, so integration
//! tests can assert on the exact adapter/event traffic.

use std::cell::RefCell;
use std::rc::Rc;

use tag_core::{MatchResult, PresentationAdapter, TagEvent, TagInput, TagValue};

/// One captured render intent, in issue order.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderIntent {
    Tags(Vec<TagValue>),
    FormValue(String),
    Placeholder(String),
    Error(String),
    ClearError,
    Suggestions(Vec<MatchResult>),
    ClearSuggestions,
}

/// Presentation adapter that records everything it is asked to render.
#[derive(Debug, Default)]
pub struct RecordingAdapter {
    id: String,
    pub intents: Vec<RenderIntent>,
}

impl RecordingAdapter {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            intents: Vec::new(),
        }
    }

    /// The most recent collection snapshot rendered, if any.
    pub fn last_tags(&self) -> Option<&[TagValue]> {
        self.intents.iter().rev().find_map(|intent| match intent {
            RenderIntent::Tags(values) => Some(values.as_slice()),
            _ => None,
        })
    }

    /// The most recent form value rendered, if any.
    pub fn last_form_value(&self) -> Option<&str> {
        self.intents.iter().rev().find_map(|intent| match intent {
            RenderIntent::FormValue(value) => Some(value.as_str()),
            _ => None,
        })
    }

    /// The most recent suggestion render: `Some(items)` for a list,
    /// `Some(&[])` after a clear, `None` if never touched.
    pub fn last_suggestions(&self) -> Option<&[MatchResult]> {
        self.intents.iter().rev().find_map(|intent| match intent {
            RenderIntent::Suggestions(items) => Some(items.as_slice()),
            RenderIntent::ClearSuggestions => Some(&[][..]),
            _ => None,
        })
    }

    /// The most recent error display: `Some(message)` while shown,
    /// `Some("")` after a clear, `None` if never touched.
    pub fn last_error(&self) -> Option<&str> {
        self.intents.iter().rev().find_map(|intent| match intent {
            RenderIntent::Error(message) => Some(message.as_str()),
            RenderIntent::ClearError => Some(""),
            _ => None,
        })
    }
}

impl PresentationAdapter for RecordingAdapter {
    fn instance_id(&self) -> &str {
        &self.id
    }

    fn render_tags(&mut self, values: &[TagValue]) {
        self.intents.push(RenderIntent::Tags(values.to_vec()));
    }

    fn render_form_value(&mut self, serialized: &str) {
        self.intents
            .push(RenderIntent::FormValue(serialized.to_string()));
    }

    fn set_placeholder(&mut self, text: &str) {
        self.intents
            .push(RenderIntent::Placeholder(text.to_string()));
    }

    fn render_error(&mut self, message: &str) {
        self.intents.push(RenderIntent::Error(message.to_string()));
    }

    fn clear_error(&mut self) {
        self.intents.push(RenderIntent::ClearError);
    }

    fn render_suggestions(&mut self, items: &[MatchResult]) {
        self.intents
            .push(RenderIntent::Suggestions(items.to_vec()));
    }

    fn clear_suggestions(&mut self) {
        self.intents.push(RenderIntent::ClearSuggestions);
    }
}

/// Subscribe a collector to `input` and return the shared event log.
pub fn record_events<A: PresentationAdapter>(
    input: &mut TagInput<A>,
) -> Rc<RefCell<Vec<TagEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    input.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    log
}

/// Event names in emission order, for compact ordering assertions.
pub fn event_names(events: &[TagEvent]) -> Vec<&'static str> {
    events.iter().map(TagEvent::name).collect()
}
