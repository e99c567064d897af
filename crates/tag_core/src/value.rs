//! The tag value record.

use serde::{Deserialize, Serialize};

use crate::id::TagId;

/// A single committed tag.
///
/// `tag` is the canonical, post-normalization text. Records are never
/// mutated in place: if a tag's text must change, the record is removed
/// and a new one (with a fresh id) is added.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagValue {
    /// Opaque unique identifier, generated once on creation.
    pub id: TagId,
    /// Canonical tag text.
    pub tag: String,
}

impl TagValue {
    pub fn new(id: TagId, tag: impl Into<String>) -> Self {
        Self {
            id,
            tag: tag.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_id_and_tag_record() {
        let value = TagValue::new(TagId::new("tag-0"), "Red");
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"id":"tag-0","tag":"Red"}"#);
    }

    #[test]
    fn deserializes_back_to_the_same_record() {
        let value = TagValue::new(TagId::new("tag-3"), "Blue");
        let json = serde_json::to_string(&value).unwrap();
        let back: TagValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
