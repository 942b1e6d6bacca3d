//! Focus state machine
//!
//! Tracks which suggestion (if any) is focused and keeps the input text in
//! step with it. Keyboard focus writes the focused suggestion into the input
//! so further typing continues from it; pointer focus only moves the
//! highlight. Escape and walking off either end of the list restore the text
//! as typed.

use std::sync::Arc;

use crate::iterator::SectionIterator;
use crate::render::SuggestionRenderer;
use crate::state::{
    DisplayItem, DisplaySection, FocusSource, InteractionState, SelectionCommitted, Visibility,
};
use crate::suggestion::{Address, SuggestionsCollection};

#[derive(Debug, Clone)]
pub struct FocusController {
    raw_text: String,
    typed_text: String,
    collection: Arc<SuggestionsCollection>,
    cursor: Option<Address>,
    focus_source: Option<FocusSource>,
    visible: bool,
    dismissed: bool,
    fetch_error: Option<String>,
}

impl Default for FocusController {
    fn default() -> Self {
        Self::new("")
    }
}

impl FocusController {
    pub fn new(initial_text: &str) -> Self {
        Self {
            raw_text: initial_text.to_string(),
            typed_text: initial_text.to_string(),
            collection: Arc::default(),
            cursor: None,
            focus_source: None,
            visible: false,
            dismissed: false,
            fetch_error: None,
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn typed_text(&self) -> &str {
        &self.typed_text
    }

    pub fn cursor(&self) -> Option<Address> {
        self.cursor
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Escape closed the list since the last edit
    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    pub fn visibility(&self) -> Visibility {
        match (self.visible, self.cursor) {
            (false, _) => Visibility::Hidden,
            (true, None) => Visibility::ShownUnfocused,
            (true, Some(_)) => Visibility::ShownFocused,
        }
    }

    /// The user edited the input
    ///
    /// Focus is dropped; the list itself stays until the new suggestions
    /// arrive, so a slow fetch does not make it flicker.
    pub fn text_changed(&mut self, text: &str) {
        self.raw_text = text.to_string();
        self.typed_text = text.to_string();
        self.clear_focus();
        self.dismissed = false;
        self.fetch_error = None;
    }

    /// Replace the list with `collection`, unfocused; hides when it is empty
    ///
    /// A keyboard preview came from the list being replaced, so the input
    /// goes back to the typed text.
    pub fn show(&mut self, collection: Arc<SuggestionsCollection>) {
        if self.focus_source == Some(FocusSource::Keyboard) {
            self.raw_text = self.typed_text.clone();
        }
        if !collection.has_suggestions() {
            self.hide();
            return;
        }
        self.collection = collection;
        self.clear_focus();
        self.visible = true;
        self.dismissed = false;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.clear_focus();
        self.collection = Arc::default();
    }

    /// Hide after a failed fetch, remembering why
    pub fn fail(&mut self, message: String) {
        self.hide();
        self.fetch_error = Some(message);
    }

    pub fn arrow_down(&mut self, renderer: &dyn SuggestionRenderer) {
        if !self.visible {
            return;
        }
        let next = SectionIterator::new(&self.collection).next(self.cursor);
        self.focus_by_keyboard(next, renderer);
    }

    pub fn arrow_up(&mut self, renderer: &dyn SuggestionRenderer) {
        if !self.visible {
            return;
        }
        let prev = SectionIterator::new(&self.collection).prev(self.cursor);
        self.focus_by_keyboard(prev, renderer);
    }

    fn focus_by_keyboard(&mut self, cursor: Option<Address>, renderer: &dyn SuggestionRenderer) {
        self.cursor = cursor;
        match cursor {
            Some(address) => {
                let suggestion = SectionIterator::new(&self.collection).item_at(address);
                self.raw_text = renderer.text(suggestion);
                self.focus_source = Some(FocusSource::Keyboard);
            }
            None => {
                self.raw_text = self.typed_text.clone();
                self.focus_source = None;
            }
        }
    }

    /// Shown: hide and restore the typed text. Hidden: clear the input.
    pub fn escape(&mut self) {
        self.dismissed = true;
        if self.visible {
            self.raw_text = self.typed_text.clone();
            self.hide();
        } else {
            self.raw_text.clear();
            self.typed_text.clear();
            self.fetch_error = None;
        }
    }

    pub fn hover_enter(&mut self, address: Address) {
        if !self.visible {
            return;
        }
        if !SectionIterator::new(&self.collection).contains(address) {
            log::debug!("Ignoring hover on {} outside the current list", address);
            return;
        }
        self.cursor = Some(address);
        self.focus_source = Some(FocusSource::Pointer);
    }

    pub fn hover_leave(&mut self) {
        self.clear_focus();
    }

    /// Pick the suggestion at `address`, writing its text into the input
    pub fn commit(
        &mut self,
        address: Address,
        renderer: &dyn SuggestionRenderer,
    ) -> Option<SelectionCommitted> {
        if !self.visible {
            return None;
        }
        let Some(suggestion) = self.collection.get(address).cloned() else {
            log::debug!("Ignoring commit on {} outside the current list", address);
            return None;
        };

        let text = renderer.text(&suggestion);
        self.raw_text = text.clone();
        self.typed_text = text.clone();
        self.hide();

        Some(SelectionCommitted {
            suggestion,
            text,
            address,
        })
    }

    fn clear_focus(&mut self) {
        self.cursor = None;
        self.focus_source = None;
    }

    /// Immutable view of the current state, with the list rendered
    pub fn snapshot(&self, renderer: &dyn SuggestionRenderer) -> InteractionState {
        let iter = SectionIterator::new(&self.collection);
        let preview = self
            .cursor
            .map(|address| renderer.text(iter.item_at(address)));

        let sections = if self.visible {
            self.render_sections(renderer)
        } else {
            Vec::new()
        };

        InteractionState {
            raw_text: self.raw_text.clone(),
            typed_text: self.typed_text.clone(),
            collection: Arc::clone(&self.collection),
            cursor: self.cursor,
            focus_source: self.focus_source,
            preview,
            visible: self.visible,
            fetch_error: self.fetch_error.clone(),
            sections,
        }
    }

    fn render_sections(&self, renderer: &dyn SuggestionRenderer) -> Vec<DisplaySection> {
        (0..self.collection.section_count())
            .filter(|&section| !self.collection.section_items(section).is_empty())
            .map(|section| DisplaySection {
                name: self.collection.section_name(section).map(str::to_string),
                items: self
                    .collection
                    .section_items(section)
                    .iter()
                    .enumerate()
                    .map(|(item, suggestion)| {
                        let address = Address::new(section, item);
                        DisplayItem {
                            address,
                            line: renderer.render(suggestion, &self.typed_text),
                            focused: self.cursor == Some(address),
                        }
                    })
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "focus_tests.rs"]
mod focus_tests;
