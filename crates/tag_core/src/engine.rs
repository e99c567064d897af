//! The engine facade tying pipeline, store, matcher, lifecycle and
//! event channel together behind the public widget surface.

use std::time::Instant;

use crate::adapter::PresentationAdapter;
use crate::config::{ConfigError, DEFAULT_PLACEHOLDER, WidgetConfig};
use crate::events::{EventChannel, SubscriberId, TagEvent};
use crate::id::TagId;
use crate::lifecycle::{TypingLifecycle, TypingState};
use crate::matcher::match_candidates;
use crate::normalize::Normalizer;
use crate::store::{InsertOutcome, TagStore};
use crate::value::TagValue;

/// One tag-input widget instance.
///
/// All operations run to completion on the calling thread; the only
/// asynchronous element is the settle deadline, which the host drives
/// through [`tick`](TagInput::tick). Public operations are not
/// reentrant-safe against concurrent mutation; a multi-threaded host
/// must serialize access externally.
pub struct TagInput<A: PresentationAdapter> {
    adapter: A,
    config: WidgetConfig,
    normalizer: Normalizer,
    store: TagStore,
    candidates: Vec<String>,
    lifecycle: TypingLifecycle,
    events: EventChannel,
}

impl<A: PresentationAdapter> TagInput<A> {
    /// Construct the engine for `adapter` with `config`.
    ///
    /// Fails with [`ConfigError::MissingIdentifier`] when the adapter
    /// exposes no stable identifier. The initial `config.value` is
    /// seeded through the normalization pipeline (rejected segments are
    /// dropped and logged; no events fire, as no subscriber can exist
    /// yet).
    pub fn new(adapter: A, mut config: WidgetConfig) -> Result<Self, ConfigError> {
        if adapter.instance_id().trim().is_empty() {
            return Err(ConfigError::MissingIdentifier);
        }

        let normalizer = Normalizer::new(config.item_case, config.tag_validation.take());
        let lifecycle = TypingLifecycle::new(config.debounce);
        let candidates = std::mem::take(&mut config.autocomplete_items);

        let mut engine = Self {
            adapter,
            config,
            normalizer,
            store: TagStore::new(),
            candidates,
            lifecycle,
            events: EventChannel::new(),
        };

        let placeholder = engine
            .config
            .placeholder
            .clone()
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string());
        engine.adapter.set_placeholder(&placeholder);

        if let Some(raw) = engine.config.value.clone() {
            engine.seed_initial(&raw);
        }
        engine.rerender();

        log::debug!(
            target: "tag.engine",
            "constructed for {:?} with {} initial tags",
            engine.adapter.instance_id(),
            engine.store.len()
        );
        Ok(engine)
    }

    fn seed_initial(&mut self, raw: &str) {
        let batch = self.normalizer.split_batch(raw);
        for reason in &batch.rejected {
            log::debug!(target: "tag.engine", "initial value segment rejected: {reason}");
        }
        for tag in batch.accepted {
            self.store.insert(tag);
        }
    }

    // --- Event channel ---

    pub fn subscribe(&mut self, subscriber: impl FnMut(&TagEvent) + 'static) -> SubscriberId {
        self.events.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.events.unsubscribe(id)
    }

    // --- Collection surface ---

    /// Full records, in insertion order.
    pub fn values(&self) -> Vec<TagValue> {
        self.store.to_record_list()
    }

    /// Tag texts only, in insertion order.
    pub fn tags(&self) -> Vec<String> {
        self.store.to_tag_list()
    }

    /// JSON encoding of the collection: full records, or tag texts only
    /// when `tags_only`.
    pub fn serialized_values(&self, tags_only: bool) -> String {
        self.store.to_json(tags_only)
    }

    /// Tags joined by `,`.
    pub fn raw_values(&self) -> String {
        self.store.to_csv()
    }

    /// The value a surrounding form would submit, per `sendAsJSON`.
    pub fn form_value(&self) -> String {
        self.store.form_value(self.config.send_as_json)
    }

    /// Replace the collection wholesale with caller-owned records.
    ///
    /// Assumes the records are already deduplicated; no events fire.
    pub fn set_values(&mut self, values: Vec<TagValue>) {
        self.store.set_all(values);
        self.rerender();
    }

    /// Split raw text on `,`, pipeline each segment and insert the
    /// survivors.
    ///
    /// Emits one `added` per inserted item and per-item `duplicate`s,
    /// followed by a single trailing `changed` when anything was
    /// inserted.
    pub fn add_from_raw_text(&mut self, text: &str) {
        self.process_batch(text);
    }

    /// Remove the entry with this id; unknown ids are a silent no-op.
    pub fn remove_by_id(&mut self, id: &TagId) {
        match self.store.remove(id) {
            Some(value) => self.finish_removal(value),
            None => log::trace!(target: "tag.engine", "remove_by_id: unknown id {id}"),
        }
    }

    /// Remove the most recently added tag (backspace on empty input).
    pub fn remove_last(&mut self) {
        if let Some(value) = self.store.remove_last() {
            self.finish_removal(value);
        }
    }

    fn finish_removal(&mut self, value: TagValue) {
        self.rerender();
        self.events.emit(&TagEvent::Removed { value });
        self.emit_changed();
    }

    // --- Error surface ---

    /// Inject an error programmatically; routed through the same
    /// `error` event and adapter error slot as pipeline rejections.
    pub fn set_error(&mut self, message: &str) {
        self.report_error(message);
    }

    pub fn clear_error(&mut self) {
        self.adapter.clear_error();
    }

    fn report_error(&mut self, message: &str) {
        if self.config.display_error {
            self.adapter.render_error(message);
        }
        self.events.emit(&TagEvent::Error {
            message: message.to_string(),
        });
    }

    // --- Input surface ---

    /// Forward a raw input event (live text after the keystroke).
    ///
    /// Clears any displayed error, emits `input`, and emits `typing`
    /// once on entry into the typing state.
    pub fn handle_input(&mut self, text: &str, now: Instant) {
        self.adapter.clear_error();
        self.events.emit(&TagEvent::Input {
            text: text.to_string(),
        });
        if self.lifecycle.record_input(text, now) {
            self.events.emit(&TagEvent::Typing);
        }
    }

    /// Forward pasted multi-value text.
    pub fn handle_paste(&mut self, raw: &str) {
        self.events.emit(&TagEvent::Paste {
            raw: raw.to_string(),
        });
        self.process_batch(raw);
    }

    /// Commit the live input as tag text (Enter or `,` pressed).
    ///
    /// Cancels any pending settle and clears the suggestion list; the
    /// adapter is responsible for clearing its input element.
    pub fn commit_live_input(&mut self) {
        let text = self.lifecycle.live_input().to_string();
        self.lifecycle.cancel();
        self.adapter.clear_suggestions();
        if text.trim().is_empty() {
            return;
        }
        self.process_batch(&text);
    }

    /// Advance the settle clock to `now`.
    ///
    /// When the quiet period has elapsed, emits `done-typing` (whose
    /// control handle may pause or re-arm the match) and then runs the
    /// autocomplete matcher unless readiness was switched off.
    pub fn tick(&mut self, now: Instant) {
        if !self.lifecycle.poll(now) {
            return;
        }

        let live_input = self.lifecycle.live_input().to_string();
        self.events.emit(&TagEvent::DoneTyping {
            autocomplete_enabled: self.config.autocomplete,
            live_input: live_input.clone(),
            control: self.lifecycle.control(),
        });

        if let Some(candidates) = self.lifecycle.take_replacement() {
            self.candidates = candidates;
        }
        if self.config.autocomplete && self.lifecycle.ready_for_autocomplete() {
            self.run_autocomplete(&live_input);
        }
    }

    // --- Autocomplete surface ---

    /// Re-arm autocomplete and match immediately against the live
    /// input, optionally replacing the candidate list first. This is
    /// the resumption path for hosts that paused to fetch candidates.
    pub fn show_autocomplete(&mut self, candidates: Option<Vec<String>>) {
        self.lifecycle.set_ready(true);
        if let Some(candidates) = candidates {
            self.candidates = candidates;
        }
        let live_input = self.lifecycle.live_input().to_string();
        self.run_autocomplete(&live_input);
    }

    /// Suppress automatic matching until re-armed.
    pub fn pause_autocomplete(&mut self) {
        self.lifecycle.set_ready(false);
    }

    fn run_autocomplete(&mut self, search: &str) {
        if search.is_empty() {
            self.adapter.clear_suggestions();
            return;
        }
        // Candidates already present in the collection (compared by
        // display form) are not worth suggesting.
        let open: Vec<String> = self
            .candidates
            .iter()
            .filter(|c| !self.store.contains_tag(&self.normalizer.display_form(c)))
            .cloned()
            .collect();
        let results = match_candidates(&open, search);
        if results.is_empty() {
            self.adapter.clear_suggestions();
        } else {
            self.adapter.render_suggestions(&results);
        }
    }

    // --- Accessors ---

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn typing_state(&self) -> TypingState {
        self.lifecycle.state()
    }

    pub fn live_input(&self) -> &str {
        self.lifecycle.live_input()
    }

    // --- Internals ---

    fn process_batch(&mut self, raw: &str) {
        let batch = self.normalizer.split_batch(raw);
        for reason in batch.rejected {
            self.report_error(reason);
        }

        let mut outcomes = Vec::new();
        for tag in batch.accepted {
            match self.store.insert(tag) {
                InsertOutcome::Inserted(value) => outcomes.push(TagEvent::Added { value }),
                InsertOutcome::Duplicate(tag) => outcomes.push(TagEvent::Duplicate { tag }),
            }
        }

        let mutated = outcomes
            .iter()
            .any(|event| matches!(event, TagEvent::Added { .. }));
        if mutated {
            self.rerender();
        }
        for event in &outcomes {
            self.events.emit(event);
        }
        if mutated {
            self.emit_changed();
        }
    }

    fn emit_changed(&mut self) {
        self.events.emit(&TagEvent::Changed {
            values: self.store.to_record_list(),
        });
    }

    fn rerender(&mut self) {
        self.adapter.render_tags(self.store.snapshot());
        let form_value = self.store.form_value(self.config.send_as_json);
        self.adapter.render_form_value(&form_value);
    }
}
