//! Normalization and validation pipeline.
//!
//! Raw text becomes zero-or-one canonical tag string: trim, case
//! transform, then a validation gate (caller-supplied predicate or the
//! built-in alphanumeric-and-space check). Multi-value input (paste,
//! bulk set) is split on `,` and each segment passes through the same
//! pipeline exactly once.

use std::collections::HashSet;
use std::fmt;

/// Rejection message for text that fails the built-in character check.
pub const REJECT_NOT_ALPHANUMERIC: &str = "Only alphanumeric and space are allowed";

/// Rejection message for text refused by a caller-supplied predicate.
pub const REJECT_PREDICATE: &str = "Tag failed validation";

/// Case transform applied to every candidate tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CaseMode {
    /// Uppercase the first letter of each whitespace-delimited word,
    /// leaving the rest of the word untouched.
    #[default]
    Capitalize,
    Uppercase,
    Lowercase,
}

impl CaseMode {
    pub fn apply(self, text: &str) -> String {
        match self {
            CaseMode::Capitalize => capitalize_words(text),
            CaseMode::Uppercase => text.to_uppercase(),
            CaseMode::Lowercase => text.to_lowercase(),
        }
    }
}

fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.push(ch);
        }
    }
    out
}

fn is_alphanumeric_space(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ')
}

/// External validation predicate: receives the transformed text,
/// returns whether it may become a tag.
pub type TagPredicate = Box<dyn Fn(&str) -> bool>;

/// Outcome of splitting a raw multi-value string.
///
/// `accepted` holds canonical tags in input order with duplicates
/// within the batch already collapsed; `rejected` holds one message per
/// segment that failed the pipeline.
#[derive(Debug, Default)]
pub struct Batch {
    pub accepted: Vec<String>,
    pub rejected: Vec<&'static str>,
}

/// The normalization pipeline: trim, case transform, validation gate.
pub struct Normalizer {
    case: CaseMode,
    predicate: Option<TagPredicate>,
}

impl Normalizer {
    pub fn new(case: CaseMode, predicate: Option<TagPredicate>) -> Self {
        Self { case, predicate }
    }

    /// Run one candidate through the full pipeline.
    ///
    /// Returns the canonical text, or the rejection message. Validation
    /// runs exactly once per call; callers must not re-validate.
    pub fn normalize(&self, raw: &str) -> Result<String, &'static str> {
        let transformed = self.case.apply(raw.trim());
        if transformed.is_empty() {
            // No candidate text; the predicate is not consulted.
            return Err(REJECT_NOT_ALPHANUMERIC);
        }
        match &self.predicate {
            Some(predicate) => {
                if predicate(&transformed) {
                    Ok(transformed)
                } else {
                    Err(REJECT_PREDICATE)
                }
            }
            None => {
                if is_alphanumeric_space(&transformed) {
                    Ok(transformed)
                } else {
                    Err(REJECT_NOT_ALPHANUMERIC)
                }
            }
        }
    }

    /// Trim and case-transform only, skipping the validation gate.
    ///
    /// Used to compare an already-stored value's display form (e.g. for
    /// autocomplete exclusion), never to admit new tags unchecked.
    pub fn display_form(&self, raw: &str) -> String {
        self.case.apply(raw.trim())
    }

    /// Split raw multi-value input on `,` and pipeline each segment.
    ///
    /// Duplicates within the same batch are collapsed silently; rejected
    /// segments are reported so the caller can surface them.
    pub fn split_batch(&self, raw: &str) -> Batch {
        let mut batch = Batch::default();
        let mut seen = HashSet::new();
        for segment in raw.split(',') {
            if segment.trim().is_empty() {
                // Empty segments carry no candidate; drop without error.
                continue;
            }
            match self.normalize(segment) {
                Ok(tag) => {
                    if seen.insert(tag.clone()) {
                        batch.accepted.push(tag);
                    }
                }
                Err(reason) => batch.rejected.push(reason),
            }
        }
        batch
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("case", &self.case)
            .field("predicate", &self.predicate.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
