//! Snapshots handed to the view layer
//!
//! Every user-visible event produces a fresh [`InteractionState`]; nothing in
//! a snapshot changes after it is built.

use std::fmt;
use std::sync::Arc;

use ratatui::text::Line;

use crate::suggestion::{Address, Suggestion, SuggestionsCollection};

/// Which input device moved focus onto the current suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusSource {
    Keyboard,
    Pointer,
}

/// Coarse state of the suggestion list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    ShownUnfocused,
    ShownFocused,
}

/// One rendered list entry
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    pub address: Address,
    pub line: Line<'static>,
    pub focused: bool,
}

/// One rendered section; flat collections produce a single unnamed section
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySection {
    pub name: Option<String>,
    pub items: Vec<DisplayItem>,
}

/// Terminal event: the user picked a suggestion
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionCommitted {
    /// The suggestion exactly as the provider returned it
    pub suggestion: Suggestion,
    /// Text written into the input
    pub text: String,
    pub address: Address,
}

#[derive(Debug, Clone)]
pub struct InteractionState {
    /// Editable text currently in the input
    pub raw_text: String,
    /// Text as typed before the current focus chain; Escape restores it
    pub typed_text: String,
    pub collection: Arc<SuggestionsCollection>,
    pub cursor: Option<Address>,
    pub focus_source: Option<FocusSource>,
    /// Text of the focused suggestion
    pub preview: Option<String>,
    pub visible: bool,
    /// Set when the last fetch for the current text failed
    pub fetch_error: Option<String>,
    /// Rendered list, empty while hidden
    pub sections: Vec<DisplaySection>,
}

impl InteractionState {
    pub fn visibility(&self) -> Visibility {
        match (self.visible, self.cursor) {
            (false, _) => Visibility::Hidden,
            (true, None) => Visibility::ShownUnfocused,
            (true, Some(_)) => Visibility::ShownFocused,
        }
    }

    /// Text of the focused suggestion, else the input text
    pub fn displayed_text(&self) -> &str {
        self.preview.as_deref().unwrap_or(&self.raw_text)
    }

    pub fn focused_suggestion(&self) -> Option<&Suggestion> {
        self.cursor.and_then(|address| self.collection.get(address))
    }

    /// Visible items in order, across sections
    pub fn items(&self) -> impl Iterator<Item = &DisplayItem> {
        self.sections.iter().flat_map(|section| section.items.iter())
    }
}

/// Outline used in debug logs:
///
/// ```text
/// input: Mill Park
/// [x] Mill Park
/// [ ] Mordialloc
/// ```
impl fmt::Display for InteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "input: {}", self.raw_text)?;
        if let Some(error) = &self.fetch_error {
            write!(f, "\nerror: {}", error)?;
        }
        for section in &self.sections {
            if let Some(name) = &section.name {
                write!(f, "\n# {}", name)?;
            }
            for item in &section.items {
                let mark = if item.focused { "[x]" } else { "[ ]" };
                write!(f, "\n{} {}", mark, item.line)?;
            }
        }
        Ok(())
    }
}
