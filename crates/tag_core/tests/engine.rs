//! End-to-end tests of the engine surface: event contract, dedup and
//! ordering invariants, debounce behavior and the autocomplete
//! pause/resume cycle.

use std::time::{Duration, Instant};

use tag_core::{
    CaseMode, ConfigError, TagEvent, TagId, TagInput, TagValue, TypingState, WidgetConfig,
};
use tag_test_support::{RecordingAdapter, RenderIntent, event_names, record_events};

const DEBOUNCE: Duration = Duration::from_millis(300);

fn engine(config: WidgetConfig) -> TagInput<RecordingAdapter> {
    TagInput::new(RecordingAdapter::new("tags"), config).unwrap()
}

fn autocomplete_config(items: &[&str]) -> WidgetConfig {
    WidgetConfig {
        autocomplete: true,
        autocomplete_items: items.iter().map(|s| s.to_string()).collect(),
        ..WidgetConfig::default()
    }
}

#[test]
fn construction_requires_a_stable_identifier() {
    for id in ["", "   "] {
        let result = TagInput::new(RecordingAdapter::new(id), WidgetConfig::default());
        assert!(matches!(result, Err(ConfigError::MissingIdentifier)));
    }
}

#[test]
fn initial_value_is_seeded_through_the_pipeline() {
    let input = engine(WidgetConfig {
        value: Some("red, green, red".to_string()),
        ..WidgetConfig::default()
    });

    assert_eq!(input.tags(), vec!["Red", "Green"]);
    assert_eq!(input.adapter().last_form_value(), Some("Red,Green"));
}

#[test]
fn add_from_raw_text_collapses_batch_duplicates() {
    let mut input = engine(WidgetConfig::default());
    input.add_from_raw_text("a, a, b");
    assert_eq!(input.tags(), vec!["A", "B"]);
}

#[test]
fn no_two_entries_share_normalized_text_across_adds() {
    let mut input = engine(WidgetConfig::default());
    for raw in ["red", "Red", " RED car", "red", "blue"] {
        input.add_from_raw_text(raw);
    }

    let tags = input.tags();
    for (i, tag) in tags.iter().enumerate() {
        assert!(!tags[i + 1..].contains(tag), "duplicate entry {tag:?}");
    }
    assert_eq!(tags, vec!["Red", "RED Car", "Blue"]);
}

#[test]
fn add_emits_added_then_changed() {
    let mut input = engine(WidgetConfig::default());
    let log = record_events(&mut input);

    input.add_from_raw_text("red");
    assert_eq!(event_names(&log.borrow()), vec!["added", "changed"]);

    let events = log.borrow();
    let TagEvent::Changed { values } = &events[1] else {
        panic!("expected changed payload");
    };
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].tag, "Red");
}

#[test]
fn duplicate_add_emits_duplicate_without_changed() {
    let mut input = engine(WidgetConfig::default());
    input.add_from_raw_text("red");

    let log = record_events(&mut input);
    input.add_from_raw_text("red");

    assert_eq!(event_names(&log.borrow()), vec!["duplicate"]);
    assert_eq!(input.tags(), vec!["Red"]);
}

#[test]
fn batch_add_emits_per_item_added_and_single_trailing_changed() {
    let mut input = engine(WidgetConfig::default());
    input.add_from_raw_text("a");

    let log = record_events(&mut input);
    input.add_from_raw_text("b, a, c");

    assert_eq!(
        event_names(&log.borrow()),
        vec!["added", "duplicate", "added", "changed"]
    );
}

#[test]
fn rejected_tag_emits_error_and_leaves_state_untouched() {
    let mut input = engine(WidgetConfig::default());
    let log = record_events(&mut input);

    input.add_from_raw_text("no!");

    assert_eq!(event_names(&log.borrow()), vec!["error"]);
    assert!(input.tags().is_empty());
    assert_eq!(
        input.adapter().last_error(),
        Some("Only alphanumeric and space are allowed")
    );
}

#[test]
fn display_error_false_suppresses_rendering_but_not_the_event() {
    let mut input = engine(WidgetConfig {
        display_error: false,
        ..WidgetConfig::default()
    });
    let log = record_events(&mut input);

    input.set_error("boom");

    assert_eq!(event_names(&log.borrow()), vec!["error"]);
    assert!(
        !input
            .adapter()
            .intents
            .iter()
            .any(|intent| matches!(intent, RenderIntent::Error(_)))
    );
}

#[test]
fn external_predicate_gates_admission() {
    let mut input = engine(WidgetConfig {
        tag_validation: Some(Box::new(|tag: &str| tag.len() <= 4)),
        ..WidgetConfig::default()
    });
    let log = record_events(&mut input);

    input.add_from_raw_text("ok, toolong");

    assert_eq!(input.tags(), vec!["Ok"]);
    assert_eq!(event_names(&log.borrow()), vec!["error", "added", "changed"]);
}

#[test]
fn remove_by_id_emits_removed_then_changed() {
    let mut input = engine(WidgetConfig::default());
    input.add_from_raw_text("a, b");
    let id = input.values()[0].id.clone();

    let log = record_events(&mut input);
    input.remove_by_id(&id);

    assert_eq!(event_names(&log.borrow()), vec!["removed", "changed"]);
    assert_eq!(input.tags(), vec!["B"]);
}

#[test]
fn removing_unknown_id_is_a_silent_no_op() {
    let mut input = engine(WidgetConfig::default());
    input.add_from_raw_text("a");

    let log = record_events(&mut input);
    input.remove_by_id(&TagId::new("missing"));

    assert!(log.borrow().is_empty());
    assert_eq!(input.tags(), vec!["A"]);
}

#[test]
fn remove_last_pops_the_newest_tag() {
    let mut input = engine(WidgetConfig::default());
    input.add_from_raw_text("a, b");

    input.remove_last();
    assert_eq!(input.tags(), vec!["A"]);

    input.remove_last();
    assert!(input.tags().is_empty());

    // Nothing left: silent no-op.
    let log = record_events(&mut input);
    input.remove_last();
    assert!(log.borrow().is_empty());
}

#[test]
fn raw_values_joins_caller_supplied_records() {
    let mut input = engine(WidgetConfig::default());
    input.set_values(vec![
        TagValue::new(TagId::new("1"), "X"),
        TagValue::new(TagId::new("2"), "Y"),
    ]);
    assert_eq!(input.raw_values(), "X,Y");
}

#[test]
fn values_snapshot_is_idempotent() {
    let mut input = engine(WidgetConfig::default());
    input.add_from_raw_text("a, b");
    assert_eq!(input.values(), input.values());
}

#[test]
fn serialization_modes_cover_csv_and_json() {
    let mut input = engine(WidgetConfig {
        send_as_json: true,
        item_case: CaseMode::Uppercase,
        ..WidgetConfig::default()
    });
    input.add_from_raw_text("x");

    assert_eq!(input.serialized_values(true), r#"["X"]"#);
    assert!(input.serialized_values(false).contains(r#""tag":"X""#));
    // sendAsJSON routes the form value through JSON encoding.
    assert_eq!(input.form_value(), input.serialized_values(false));
    assert_eq!(input.adapter().last_form_value(), Some(input.form_value().as_str()));
}

#[test]
fn paste_emits_paste_before_mutation_events() {
    let mut input = engine(WidgetConfig::default());
    let log = record_events(&mut input);

    input.handle_paste("x, y");

    assert_eq!(
        event_names(&log.borrow()),
        vec!["paste", "added", "added", "changed"]
    );
}

#[test]
fn typing_fires_once_per_entry_into_typing() {
    let mut input = engine(WidgetConfig::default());
    let log = record_events(&mut input);
    let start = Instant::now();

    input.handle_input("r", start);
    input.handle_input("re", start + Duration::from_millis(50));
    input.handle_input("red", start + Duration::from_millis(100));

    assert_eq!(
        event_names(&log.borrow()),
        vec!["input", "typing", "input", "input"]
    );
}

#[test]
fn debounce_settles_once_after_quiet_period_from_last_input() {
    let mut input = engine(WidgetConfig::default());
    let log = record_events(&mut input);
    let start = Instant::now();

    input.handle_input("r", start);
    input.handle_input("re", start + Duration::from_millis(100));
    input.handle_input("red", start + Duration::from_millis(200));

    // Quiet period counts from the last event.
    input.tick(start + Duration::from_millis(450));
    assert!(!event_names(&log.borrow()).contains(&"done-typing"));

    input.tick(start + Duration::from_millis(200) + DEBOUNCE);
    input.tick(start + Duration::from_millis(1000));

    let names = event_names(&log.borrow());
    assert_eq!(
        names.iter().filter(|n| **n == "done-typing").count(),
        1,
        "expected exactly one done-typing, got {names:?}"
    );
    assert_eq!(input.typing_state(), TypingState::Settled);
}

#[test]
fn settle_runs_autocomplete_and_excludes_existing_tags() {
    let mut input = engine(autocomplete_config(&["Red", "Green", "Blue"]));
    input.add_from_raw_text("red");

    let start = Instant::now();
    input.handle_input("r", start);
    input.tick(start + DEBOUNCE);

    let suggestions = input.adapter().last_suggestions().unwrap();
    let names: Vec<&str> = suggestions.iter().map(|m| m.candidate.as_str()).collect();
    assert_eq!(names, vec!["Green"]);
    assert_eq!(suggestions[0].highlighted, "G<em>r</em>een");
}

#[test]
fn empty_live_input_clears_suggestions_on_settle() {
    let mut input = engine(autocomplete_config(&["Red"]));
    let start = Instant::now();

    input.handle_input("", start);
    input.tick(start + DEBOUNCE);

    assert_eq!(input.adapter().last_suggestions(), Some(&[][..]));
}

#[test]
fn pause_inside_done_typing_suppresses_the_automatic_match() {
    let mut input = engine(autocomplete_config(&["Red"]));
    input.subscribe(|event| {
        if let TagEvent::DoneTyping { control, .. } = event {
            control.pause();
        }
    });

    let start = Instant::now();
    input.handle_input("r", start);
    input.tick(start + DEBOUNCE);

    assert_eq!(input.adapter().last_suggestions(), None);

    // The caller fetched fresh candidates and resumes explicitly.
    input.show_autocomplete(Some(vec!["X ray".to_string()]));
    let suggestions = input.adapter().last_suggestions().unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].candidate, "X ray");
}

#[test]
fn resume_inside_done_typing_replaces_candidates_for_the_match() {
    let mut input = engine(autocomplete_config(&["Red"]));
    input.subscribe(|event| {
        if let TagEvent::DoneTyping { control, .. } = event {
            control.pause();
            control.resume(Some(vec!["Rocket".to_string()]));
        }
    });

    let start = Instant::now();
    input.handle_input("r", start);
    input.tick(start + DEBOUNCE);

    let suggestions = input.adapter().last_suggestions().unwrap();
    let names: Vec<&str> = suggestions.iter().map(|m| m.candidate.as_str()).collect();
    assert_eq!(names, vec!["Rocket"]);
}

#[test]
fn pause_persists_across_cycles_until_resumed() {
    let mut input = engine(autocomplete_config(&["Red"]));
    input.pause_autocomplete();

    let start = Instant::now();
    input.handle_input("r", start);
    input.tick(start + DEBOUNCE);
    assert_eq!(input.adapter().last_suggestions(), None);

    input.handle_input("re", start + DEBOUNCE);
    input.tick(start + DEBOUNCE + DEBOUNCE);
    assert_eq!(input.adapter().last_suggestions(), None);

    input.show_autocomplete(None);
    let suggestions = input.adapter().last_suggestions().unwrap();
    assert_eq!(suggestions[0].candidate, "Red");
}

#[test]
fn autocomplete_disabled_never_renders_suggestions() {
    let mut input = engine(WidgetConfig {
        autocomplete: false,
        autocomplete_items: vec!["Red".to_string()],
        ..WidgetConfig::default()
    });
    let log = record_events(&mut input);

    let start = Instant::now();
    input.handle_input("r", start);
    input.tick(start + DEBOUNCE);

    let names = event_names(&log.borrow());
    assert!(names.contains(&"done-typing"));
    assert_eq!(input.adapter().last_suggestions(), None);

    let done = log
        .borrow()
        .iter()
        .find_map(|event| match event {
            TagEvent::DoneTyping {
                autocomplete_enabled,
                ..
            } => Some(*autocomplete_enabled),
            _ => None,
        })
        .unwrap();
    assert!(!done);
}

#[test]
fn commit_live_input_runs_the_full_pipeline() {
    let mut input = engine(WidgetConfig::default());
    let log = record_events(&mut input);
    let start = Instant::now();

    input.handle_input("red car", start);
    input.commit_live_input();

    assert_eq!(input.tags(), vec!["Red Car"]);
    assert_eq!(
        event_names(&log.borrow()),
        vec!["input", "typing", "added", "changed"]
    );
    assert_eq!(input.typing_state(), TypingState::Idle);
    assert_eq!(input.live_input(), "");

    // The cancelled deadline can no longer fire.
    input.tick(start + DEBOUNCE + DEBOUNCE);
    assert!(!event_names(&log.borrow()).contains(&"done-typing"));
}

#[test]
fn commit_of_empty_input_does_nothing() {
    let mut input = engine(WidgetConfig::default());
    let log = record_events(&mut input);

    input.commit_live_input();

    assert!(log.borrow().is_empty());
    assert!(input.tags().is_empty());
}

#[test]
fn handle_input_clears_a_displayed_error() {
    let mut input = engine(WidgetConfig::default());
    input.add_from_raw_text("no!");
    assert_eq!(
        input.adapter().last_error(),
        Some("Only alphanumeric and space are allowed")
    );

    input.handle_input("n", Instant::now());
    assert_eq!(input.adapter().last_error(), Some(""));
}

#[test]
fn unsubscribed_listener_stops_receiving_events() {
    let mut input = engine(WidgetConfig::default());
    let log = record_events(&mut input);

    // record_events registered the first subscriber; register and
    // remove a second one.
    let id = input.subscribe(|_| {});
    assert!(input.unsubscribe(id));
    assert!(!input.unsubscribe(id));

    input.add_from_raw_text("a");
    assert_eq!(event_names(&log.borrow()), vec!["added", "changed"]);
}
