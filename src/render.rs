//! Suggestion rendering contract
//!
//! A renderer turns one suggestion into a styled line for the list and
//! decides the text that goes into the input when the suggestion is focused
//! by keyboard or committed.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::suggestion::Suggestion;

pub trait SuggestionRenderer {
    /// Styled list entry for `suggestion`, given the current input text
    fn render(&self, suggestion: &Suggestion, input: &str) -> Line<'static>;

    /// Text placed in the input for `suggestion`
    fn text(&self, suggestion: &Suggestion) -> String {
        suggestion.text()
    }
}

impl<F> SuggestionRenderer for F
where
    F: Fn(&Suggestion, &str) -> Line<'static>,
{
    fn render(&self, suggestion: &Suggestion, input: &str) -> Line<'static> {
        self(suggestion, input)
    }
}

/// Shows the suggestion text unstyled
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl SuggestionRenderer for PlainRenderer {
    fn render(&self, suggestion: &Suggestion, _input: &str) -> Line<'static> {
        Line::from(suggestion.text())
    }
}

/// Bolds as many leading characters as the user has typed
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixHighlighter;

impl SuggestionRenderer for PrefixHighlighter {
    fn render(&self, suggestion: &Suggestion, input: &str) -> Line<'static> {
        let text = suggestion.text();
        let split = text
            .char_indices()
            .nth(input.chars().count())
            .map_or(text.len(), |(idx, _)| idx);
        let (head, tail) = text.split_at(split);

        let mut spans = Vec::with_capacity(2);
        if !head.is_empty() {
            spans.push(Span::styled(
                head.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        }
        if !tail.is_empty() {
            spans.push(Span::raw(tail.to_string()));
        }
        Line::from(spans)
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
