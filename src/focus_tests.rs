//! Tests for the focus state machine

use super::*;
use crate::render::PlainRenderer;
use crate::suggestion::{Section, Suggestion};
use proptest::prelude::*;

fn suburbs() -> Arc<SuggestionsCollection> {
    Arc::new(SuggestionsCollection::Flat(vec![
        "Mill Park".into(),
        "Mordialloc".into(),
    ]))
}

fn shown(text: &str) -> FocusController {
    let mut focus = FocusController::new("");
    focus.text_changed(text);
    focus.show(suburbs());
    focus
}

#[test]
fn test_new_is_hidden_with_initial_text() {
    let focus = FocusController::new("my value");
    assert_eq!(focus.visibility(), Visibility::Hidden);
    assert_eq!(focus.raw_text(), "my value");
    assert_eq!(focus.typed_text(), "my value");
}

#[test]
fn test_show_is_unfocused() {
    let focus = shown("m");
    assert_eq!(focus.visibility(), Visibility::ShownUnfocused);
    assert!(focus.cursor().is_none());
}

#[test]
fn test_show_empty_collection_hides() {
    let mut focus = shown("m");
    focus.show(Arc::new(SuggestionsCollection::Flat(vec![])));
    assert_eq!(focus.visibility(), Visibility::Hidden);
}

#[test]
fn test_arrow_down_previews_into_input() {
    let mut focus = shown("m");

    focus.arrow_down(&PlainRenderer);
    assert_eq!(focus.cursor(), Some(Address::new(0, 0)));
    assert_eq!(focus.raw_text(), "Mill Park");
    assert_eq!(focus.typed_text(), "m");

    focus.arrow_down(&PlainRenderer);
    assert_eq!(focus.raw_text(), "Mordialloc");

    focus.arrow_down(&PlainRenderer);
    assert_eq!(focus.visibility(), Visibility::ShownUnfocused);
    assert_eq!(focus.raw_text(), "m");
}

#[test]
fn test_arrow_up_starts_from_last() {
    let mut focus = shown("m");

    focus.arrow_up(&PlainRenderer);
    assert_eq!(focus.raw_text(), "Mordialloc");
    focus.arrow_up(&PlainRenderer);
    assert_eq!(focus.raw_text(), "Mill Park");
    focus.arrow_up(&PlainRenderer);
    assert!(focus.cursor().is_none());
    assert_eq!(focus.raw_text(), "m");
}

#[test]
fn test_arrows_ignored_while_hidden() {
    let mut focus = FocusController::new("m");
    focus.arrow_down(&PlainRenderer);
    focus.arrow_up(&PlainRenderer);
    assert_eq!(focus.visibility(), Visibility::Hidden);
    assert_eq!(focus.raw_text(), "m");
}

#[test]
fn test_escape_after_focus_restores_typed_text() {
    let mut focus = shown("m");
    focus.arrow_down(&PlainRenderer);

    focus.escape();
    assert_eq!(focus.visibility(), Visibility::Hidden);
    assert_eq!(focus.raw_text(), "m");

    focus.escape();
    assert_eq!(focus.raw_text(), "");
    assert_eq!(focus.typed_text(), "");
}

#[test]
fn test_hover_does_not_touch_input() {
    let mut focus = shown("m");
    focus.hover_enter(Address::new(0, 0));

    assert_eq!(focus.visibility(), Visibility::ShownFocused);
    assert_eq!(focus.raw_text(), "m");

    let state = focus.snapshot(&PlainRenderer);
    assert_eq!(state.preview.as_deref(), Some("Mill Park"));
    assert_eq!(state.focus_source, Some(FocusSource::Pointer));
}

#[test]
fn test_hover_leave_unfocuses() {
    let mut focus = shown("m");
    focus.hover_enter(Address::new(0, 0));
    focus.hover_leave();
    assert_eq!(focus.visibility(), Visibility::ShownUnfocused);
}

#[test]
fn test_hover_leave_keeps_keyboard_preview_text() {
    let mut focus = shown("m");
    focus.arrow_down(&PlainRenderer);
    focus.hover_leave();
    assert!(focus.cursor().is_none());
    assert_eq!(focus.raw_text(), "Mill Park");
}

#[test]
fn test_keyboard_continues_from_hovered_suggestion() {
    let mut focus = shown("m");
    focus.hover_enter(Address::new(0, 0));
    focus.arrow_down(&PlainRenderer);
    assert_eq!(focus.cursor(), Some(Address::new(0, 1)));
    assert_eq!(focus.raw_text(), "Mordialloc");
}

#[test]
fn test_hover_outside_list_is_ignored() {
    let mut focus = shown("m");
    focus.hover_enter(Address::new(0, 7));
    focus.hover_enter(Address::new(3, 0));
    assert!(focus.cursor().is_none());
}

#[test]
fn test_hover_while_hidden_is_ignored() {
    let mut focus = FocusController::new("m");
    focus.hover_enter(Address::new(0, 0));
    assert_eq!(focus.visibility(), Visibility::Hidden);
}

#[test]
fn test_commit_sets_text_and_hides() {
    let mut focus = shown("m");
    let committed = focus.commit(Address::new(0, 1), &PlainRenderer).unwrap();

    assert_eq!(committed.text, "Mordialloc");
    assert_eq!(committed.suggestion, Suggestion::from("Mordialloc"));
    assert_eq!(committed.address, Address::new(0, 1));
    assert_eq!(focus.visibility(), Visibility::Hidden);
    assert_eq!(focus.raw_text(), "Mordialloc");
    assert_eq!(focus.typed_text(), "Mordialloc");
}

#[test]
fn test_commit_while_hidden_does_nothing() {
    let mut focus = FocusController::new("m");
    assert!(focus.commit(Address::new(0, 0), &PlainRenderer).is_none());
    assert_eq!(focus.raw_text(), "m");
}

#[test]
fn test_commit_outside_list_does_nothing() {
    let mut focus = shown("m");
    assert!(focus.commit(Address::new(0, 2), &PlainRenderer).is_none());
    assert_eq!(focus.visibility(), Visibility::ShownUnfocused);
}

#[test]
fn test_text_changed_keeps_list_but_drops_focus() {
    let mut focus = shown("m");
    focus.arrow_down(&PlainRenderer);
    focus.text_changed("mi");

    assert_eq!(focus.visibility(), Visibility::ShownUnfocused);
    assert_eq!(focus.raw_text(), "mi");
}

#[test]
fn test_fail_hides_and_records_error() {
    let mut focus = shown("m");
    focus.fail("backend down".to_string());

    let state = focus.snapshot(&PlainRenderer);
    assert_eq!(state.visibility(), Visibility::Hidden);
    assert_eq!(state.fetch_error.as_deref(), Some("backend down"));

    focus.text_changed("mi");
    assert!(focus.snapshot(&PlainRenderer).fetch_error.is_none());
}

#[test]
fn test_snapshot_renders_sections_and_skips_empty_ones() {
    let mut focus = FocusController::new("");
    focus.text_changed("f");
    focus.show(Arc::new(SuggestionsCollection::Sectioned(vec![
        Section::new(Some("Empty"), vec![]),
        Section::new(None, vec!["Forest Hill".into()]),
        Section::new(Some("Second section"), vec!["Frankston".into()]),
    ])));
    focus.arrow_up(&PlainRenderer);

    let state = focus.snapshot(&PlainRenderer);
    let names: Vec<Option<&str>> = state.sections.iter().map(|s| s.name.as_deref()).collect();
    assert_eq!(names, vec![None, Some("Second section")]);

    let focused: Vec<Address> = state.items().filter(|i| i.focused).map(|i| i.address).collect();
    assert_eq!(focused, vec![Address::new(2, 0)]);
}

#[test]
fn test_hidden_snapshot_has_no_sections() {
    let focus = FocusController::new("m");
    assert!(focus.snapshot(&PlainRenderer).sections.is_empty());
}

#[derive(Debug, Clone)]
enum Event {
    Down,
    Up,
    Escape,
    Hover(usize),
    Leave,
    Commit(usize),
    Type,
}

fn event_strategy() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::Down),
        Just(Event::Up),
        Just(Event::Escape),
        (0usize..3).prop_map(Event::Hover),
        Just(Event::Leave),
        (0usize..3).prop_map(Event::Commit),
        Just(Event::Type),
    ]
}

proptest! {
    // Invariants hold after any sequence of events
    #[test]
    fn prop_invariants_hold(events in prop::collection::vec(event_strategy(), 0..40)) {
        let mut focus = shown("m");

        for event in events {
            match event {
                Event::Down => focus.arrow_down(&PlainRenderer),
                Event::Up => focus.arrow_up(&PlainRenderer),
                Event::Escape => focus.escape(),
                Event::Hover(i) => focus.hover_enter(Address::new(0, i)),
                Event::Leave => focus.hover_leave(),
                Event::Commit(i) => {
                    focus.commit(Address::new(0, i), &PlainRenderer);
                }
                Event::Type => {
                    focus.text_changed("m");
                    focus.show(suburbs());
                }
            }

            let state = focus.snapshot(&PlainRenderer);
            if state.cursor.is_some() {
                prop_assert!(state.visible);
                prop_assert!(state.preview.is_some());
            } else {
                prop_assert!(state.preview.is_none());
                prop_assert!(state.focus_source.is_none());
            }
            if state.focus_source == Some(FocusSource::Keyboard) {
                prop_assert_eq!(Some(state.raw_text.as_str()), state.preview.as_deref());
            }
            if !state.visible {
                prop_assert!(state.sections.is_empty());
            }
        }
    }
}

#[test]
fn test_escape_marks_dismissed_until_next_edit() {
    let mut focus = shown("m");
    focus.escape();
    assert!(focus.is_dismissed());

    focus.text_changed("mi");
    assert!(!focus.is_dismissed());
}

#[test]
fn test_show_replacing_list_drops_keyboard_preview() {
    let mut focus = shown("m");
    focus.arrow_down(&PlainRenderer);
    assert_eq!(focus.raw_text(), "Mill Park");

    focus.show(Arc::new(SuggestionsCollection::Flat(vec!["Mitcham".into()])));
    assert_eq!(focus.visibility(), Visibility::ShownUnfocused);
    assert_eq!(focus.raw_text(), "m");
}

#[test]
fn test_show_keeps_input_after_pointer_focus() {
    let mut focus = shown("m");
    focus.hover_enter(Address::new(0, 1));
    focus.show(suburbs());
    assert_eq!(focus.raw_text(), "m");
}
