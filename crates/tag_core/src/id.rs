//! Opaque identifiers for committed tag values.
//!
//! Identifiers are generated once when a tag is created and are never
//! reused, even after the tag is removed. Host applications treat them
//! as opaque strings; the actual content has no semantic meaning.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for a [`TagValue`](crate::TagValue) within a tag collection.
///
/// This is a lightweight handle that uniquely identifies a committed tag.
/// Hosts use it to remove tags (e.g. when a delete button is clicked) and
/// to correlate `added`/`removed` events with rendered elements.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(String);

impl TagId {
    /// Create a `TagId` from an externally supplied string.
    ///
    /// Used by callers that replace the collection wholesale with
    /// records they already own; ids minted by the engine come from
    /// [`TagIdGenerator`] instead.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The underlying string form.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TagId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Mints unique [`TagId`]s for one engine instance.
///
/// The counter only ever increments, so an id is never handed out twice
/// for the lifetime of the generator, including after removals.
#[derive(Clone, Debug, Default)]
pub struct TagIdGenerator {
    next: u64,
}

impl TagIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint the next unique id.
    pub fn next_id(&mut self) -> TagId {
        let id = TagId(format!("tag-{}", self.next));
        self.next = self.next.wrapping_add(1);
        id
    }
}
