//! Autocomplete matching over a caller-supplied candidate list.
//!
//! Matching is a case-insensitive regex search of the query within each
//! candidate. Candidates are ephemeral per search; the matcher holds no
//! state and imposes no ranking beyond input order.

use regex::RegexBuilder;

/// Byte range of the matched span within a candidate.
///
/// Offsets fall on UTF-8 character boundaries as produced by the regex
/// engine, so renderers can slice the candidate directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HighlightSpan {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

/// One autocomplete suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchResult {
    /// The candidate exactly as supplied.
    pub candidate: String,
    /// First matched span within `candidate`.
    pub span: HighlightSpan,
    /// The candidate with the first matched span wrapped in `<em>`
    /// markup; the surrounding literal text is preserved exactly.
    pub highlighted: String,
}

/// Filter `candidates` to those matching `search`, preserving order.
///
/// An empty search yields no results (no blanket listing). A search
/// that does not compile as a regex yields no results either: a span
/// that cannot be computed excludes the candidate rather than raising
/// an error.
pub fn match_candidates(candidates: &[String], search: &str) -> Vec<MatchResult> {
    if search.is_empty() {
        return Vec::new();
    }

    let pattern = match RegexBuilder::new(search).case_insensitive(true).build() {
        Ok(pattern) => pattern,
        Err(err) => {
            log::debug!(target: "tag.matcher", "search {search:?} is not a valid pattern: {err}");
            return Vec::new();
        }
    };

    candidates
        .iter()
        .filter_map(|candidate| {
            let found = pattern.find(candidate)?;
            let span = HighlightSpan {
                start: found.start(),
                end: found.end(),
            };
            Some(MatchResult {
                highlighted: highlight(candidate, span),
                candidate: candidate.clone(),
                span,
            })
        })
        .collect()
}

fn highlight(candidate: &str, span: HighlightSpan) -> String {
    format!(
        "{}<em>{}</em>{}",
        &candidate[..span.start],
        &candidate[span.start..span.end],
        &candidate[span.end..]
    )
}
