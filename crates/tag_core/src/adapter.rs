//! Presentation adapter boundary.
//!
//! The engine issues render intents through this trait and never
//! references a concrete UI toolkit. Element creation, styling and
//! layout live entirely on the adapter side; the adapter forwards raw
//! input events back into the engine (`handle_input`, `handle_paste`,
//! `commit_live_input`, `remove_by_id`, ...).

use crate::matcher::MatchResult;
use crate::value::TagValue;

/// Rendering surface for one widget instance.
pub trait PresentationAdapter {
    /// Stable identifier of the host element this widget is attached
    /// to. Construction fails when this is empty.
    fn instance_id(&self) -> &str;

    /// Render the full collection snapshot (preview items).
    fn render_tags(&mut self, values: &[TagValue]);

    /// Mirror the serialized collection into the host form value.
    fn render_form_value(&mut self, serialized: &str);

    /// Apply the input placeholder text.
    fn set_placeholder(&mut self, text: &str);

    /// Display a rejection or injected error message.
    fn render_error(&mut self, message: &str);

    /// Remove any displayed error message.
    fn clear_error(&mut self);

    /// Render the suggestion list with highlight spans.
    fn render_suggestions(&mut self, items: &[MatchResult]);

    /// Remove the suggestion list.
    fn clear_suggestions(&mut self);
}
