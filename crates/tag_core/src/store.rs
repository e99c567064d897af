//! Ordered, duplicate-free collection of committed tags.
//!
//! The store is the single source of truth for current values. It knows
//! nothing about normalization or events: the engine runs candidates
//! through the pipeline first and translates the typed outcomes returned
//! here into event emissions, so mutation and notification stay atomic
//! from the caller's perspective.

use crate::id::{TagId, TagIdGenerator};
use crate::value::TagValue;

/// Result of attempting to insert one canonical tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A fresh record was appended.
    Inserted(TagValue),
    /// An entry with the same canonical text already exists; the
    /// rejected candidate is returned, the collection is untouched.
    Duplicate(String),
}

/// Insertion-ordered set of [`TagValue`]s.
///
/// Invariant: no two entries share the same `tag` text (compared
/// exactly, post-normalization). Insertion order is display order is
/// serialization order.
#[derive(Debug, Default)]
pub struct TagStore {
    values: Vec<TagValue>,
    ids: TagIdGenerator,
}

impl TagStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read-only snapshot of the current collection.
    pub fn snapshot(&self) -> &[TagValue] {
        &self.values
    }

    /// Returns `true` if an entry with exactly this canonical text exists.
    pub fn contains_tag(&self, tag: &str) -> bool {
        self.values.iter().any(|v| v.tag == tag)
    }

    /// Replace the collection wholesale.
    ///
    /// Assumes the caller-provided values are already deduplicated; no
    /// dedup is performed and no outcome is reported.
    pub fn set_all(&mut self, values: Vec<TagValue>) {
        log::trace!(target: "tag.store", "set_all: {} values", values.len());
        self.values = values;
    }

    /// Append a canonical tag, minting a fresh id.
    ///
    /// The text must already be normalized; the store only enforces
    /// uniqueness.
    pub fn insert(&mut self, tag: String) -> InsertOutcome {
        if self.contains_tag(&tag) {
            log::trace!(target: "tag.store", "duplicate rejected: {tag:?}");
            return InsertOutcome::Duplicate(tag);
        }
        let value = TagValue::new(self.ids.next_id(), tag);
        self.values.push(value.clone());
        InsertOutcome::Inserted(value)
    }

    /// Remove the entry with this id, if present.
    ///
    /// Returns the removed record, or `None` for an unknown id (no-op).
    pub fn remove(&mut self, id: &TagId) -> Option<TagValue> {
        let index = self.values.iter().position(|v| &v.id == id)?;
        Some(self.values.remove(index))
    }

    /// Remove and return the most recently added entry, if any.
    pub fn remove_last(&mut self) -> Option<TagValue> {
        self.values.pop()
    }

    /// Tag texts only, in order.
    pub fn to_tag_list(&self) -> Vec<String> {
        self.values.iter().map(|v| v.tag.clone()).collect()
    }

    /// Full records, in order.
    pub fn to_record_list(&self) -> Vec<TagValue> {
        self.values.clone()
    }

    /// Tags joined by `,`.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&value.tag);
        }
        out
    }

    /// JSON encoding: full records, or tag texts only when `just_tags`.
    pub fn to_json(&self, just_tags: bool) -> String {
        let encoded = if just_tags {
            let tags: Vec<&str> = self.values.iter().map(|v| v.tag.as_str()).collect();
            serde_json::to_string(&tags)
        } else {
            serde_json::to_string(&self.values)
        };
        match encoded {
            Ok(json) => json,
            Err(err) => {
                log::error!(target: "tag.store", "JSON encoding failed: {err}");
                String::from("[]")
            }
        }
    }

    /// The value a host form would submit: CSV by default, a JSON array
    /// of full records when `send_as_json` is configured.
    pub fn form_value(&self, send_as_json: bool) -> String {
        if send_as_json {
            self.to_json(false)
        } else {
            self.to_csv()
        }
    }
}
