//! # tag_core
//!
//! UI-agnostic tag value engine for an embeddable tag-input widget.
//!
//! This crate turns raw keystrokes and pasted text into a deduplicated,
//! normalized, ordered collection of tag values, drives autocomplete
//! matching against a candidate list, and manages the debounced
//! "typing → settled" lifecycle that gates when matching runs. Every
//! state transition is published as a typed [`TagEvent`].
//!
//! ## Design Principles
//!
//! The engine is intentionally UI-agnostic and does not depend on any
//! UI toolkit. Rendering goes through the narrow
//! [`PresentationAdapter`] trait (create/update elements, show errors,
//! show suggestions); the adapter forwards raw input events back into
//! the engine. Everything runs synchronously on the calling thread;
//! the only asynchronous element is the settle deadline, which the
//! host drives by passing `Instant`s into
//! [`TagInput::handle_input`] and [`TagInput::tick`].
//!
//! ## Example
//!
//! ```ignore
//! use tag_core::{TagInput, WidgetConfig};
//!
//! let config = WidgetConfig {
//!     autocomplete: true,
//!     autocomplete_items: vec!["Red".into(), "Green".into()],
//!     ..WidgetConfig::default()
//! };
//! let mut input = TagInput::new(my_adapter, config)?;
//! input.add_from_raw_text("red, green");
//! assert_eq!(input.raw_values(), "Red,Green");
//! ```

mod adapter;
mod config;
mod engine;
mod events;
mod id;
mod lifecycle;
mod matcher;
mod normalize;
mod store;
mod value;

pub use adapter::PresentationAdapter;
pub use config::{ConfigError, DEFAULT_PLACEHOLDER, PresentationOptions, WidgetConfig};
pub use engine::TagInput;
pub use events::{EventChannel, SubscriberId, TagEvent};
pub use id::{TagId, TagIdGenerator};
pub use lifecycle::{
    DEFAULT_DEBOUNCE, SettleControl, TypingLifecycle, TypingState,
};
pub use matcher::{HighlightSpan, MatchResult, match_candidates};
pub use normalize::{
    Batch, CaseMode, Normalizer, REJECT_NOT_ALPHANUMERIC, REJECT_PREDICATE, TagPredicate,
};
pub use store::{InsertOutcome, TagStore};
pub use value::TagValue;
