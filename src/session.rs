//! Interaction session
//!
//! Owns the engine and focus controller for one input box and turns user
//! events into [`InteractionState`] snapshots. Every handler returns the new
//! snapshot and also hands it to the display sink, if one is set.

use crate::config::Config;
use crate::engine::{Resolution, SuggestionEngine, Update};
use crate::error::Result;
use crate::focus::FocusController;
use crate::provider::SuggestionProvider;
use crate::render::{PlainRenderer, PrefixHighlighter, SuggestionRenderer};
use crate::state::{InteractionState, SelectionCommitted};
use crate::suggestion::Address;

type DisplaySink = Box<dyn FnMut(&InteractionState)>;
type SelectionSink = Box<dyn FnMut(&SelectionCommitted)>;

/// Result of handling one event
#[derive(Debug, Clone)]
pub struct SessionOutput {
    pub state: InteractionState,
    /// Set only by a commit
    pub committed: Option<SelectionCommitted>,
}

pub struct InteractionSession {
    engine: SuggestionEngine,
    focus: FocusController,
    renderer: Box<dyn SuggestionRenderer>,
    config: Config,
    display_sink: Option<DisplaySink>,
    selection_sink: Option<SelectionSink>,
}

impl InteractionSession {
    /// Session starting from `config.input.initial_value`, list hidden
    ///
    /// Without [`with_renderer`](Self::with_renderer) only plain suggestions
    /// are accepted; they are drawn with [`PrefixHighlighter`] when
    /// `suggestions.highlight_match` is set, else unstyled.
    pub fn new(provider: impl SuggestionProvider + 'static, config: Config) -> Self {
        let renderer: Box<dyn SuggestionRenderer> = if config.suggestions.highlight_match {
            Box::new(PrefixHighlighter)
        } else {
            Box::new(PlainRenderer)
        };

        Self {
            engine: SuggestionEngine::new(Box::new(provider), false),
            focus: FocusController::new(&config.input.initial_value),
            renderer,
            config,
            display_sink: None,
            selection_sink: None,
        }
    }

    /// Render suggestions with `renderer`; required for structured ones
    pub fn with_renderer(mut self, renderer: impl SuggestionRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self.engine.set_renderer_available(true);
        self
    }

    pub fn with_display_sink(mut self, sink: impl FnMut(&InteractionState) + 'static) -> Self {
        self.display_sink = Some(Box::new(sink));
        self
    }

    pub fn with_selection_sink(
        mut self,
        sink: impl FnMut(&SelectionCommitted) + 'static,
    ) -> Self {
        self.selection_sink = Some(Box::new(sink));
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn engine(&self) -> &SuggestionEngine {
        &self.engine
    }

    /// Current snapshot, without notifying the display sink
    pub fn state(&self) -> InteractionState {
        self.focus.snapshot(self.renderer.as_ref())
    }

    /// The user edited the input
    ///
    /// On error (structured suggestions with no renderer) the previous state
    /// is left as it was.
    pub fn on_text_changed(&mut self, text: &str) -> Result<SessionOutput> {
        let resolution = self.engine.request(text)?;

        self.focus.text_changed(text);
        match resolution {
            Resolution::Ready(collection) => self.focus.show(collection),
            Resolution::Pending => {}
            Resolution::Failed(message) => self.focus.fail(message),
            Resolution::Empty => self.focus.hide(),
        }

        Ok(self.emit(None))
    }

    pub fn on_arrow_down(&mut self) -> SessionOutput {
        if !self.reveal_cached() {
            self.focus.arrow_down(self.renderer.as_ref());
        }
        self.emit(None)
    }

    pub fn on_arrow_up(&mut self) -> SessionOutput {
        if !self.reveal_cached() {
            self.focus.arrow_up(self.renderer.as_ref());
        }
        self.emit(None)
    }

    /// Show the cached list for the typed text if it is hidden; returns
    /// whether the arrow key was consumed by doing so
    fn reveal_cached(&mut self) -> bool {
        if self.focus.is_visible() {
            return false;
        }
        if let Some(collection) = self.engine.cached(self.focus.typed_text())
            && collection.has_suggestions()
        {
            log::debug!("Revealing cached suggestions for {:?}", self.focus.typed_text());
            self.focus.show(collection);
        }
        true
    }

    pub fn on_escape(&mut self) -> SessionOutput {
        self.focus.escape();
        self.emit(None)
    }

    pub fn on_hover_enter(&mut self, address: Address) -> SessionOutput {
        self.focus.hover_enter(address);
        self.emit(None)
    }

    pub fn on_hover_leave(&mut self) -> SessionOutput {
        self.focus.hover_leave();
        self.emit(None)
    }

    pub fn on_commit(&mut self, address: Address) -> SessionOutput {
        let committed = self.focus.commit(address, self.renderer.as_ref());
        if let Some(selection) = &committed {
            log::debug!("Committed {} at {}", selection.text, selection.address);
            if let Some(sink) = self.selection_sink.as_mut() {
                sink(selection);
            }
        }
        self.emit(committed)
    }

    /// Pick up provider answers that arrived since the last event
    ///
    /// Returns a snapshot only when an answer for the current text changed
    /// the state. An answer arriving after Escape is cached but does not
    /// reopen the list.
    pub fn poll(&mut self) -> Result<Option<SessionOutput>> {
        let current = self.focus.typed_text().to_string();

        match self.engine.poll(&current)? {
            Some(_) if self.focus.is_dismissed() => {
                log::debug!("List dismissed; keeping late suggestions for {:?} cached", current);
                Ok(None)
            }
            Some(Update::Ready(collection)) => {
                self.focus.show(collection);
                Ok(Some(self.emit(None)))
            }
            Some(Update::Failed(message)) => {
                self.focus.fail(message);
                Ok(Some(self.emit(None)))
            }
            None => Ok(None),
        }
    }

    fn emit(&mut self, committed: Option<SelectionCommitted>) -> SessionOutput {
        let state = self.focus.snapshot(self.renderer.as_ref());
        if let Some(sink) = self.display_sink.as_mut() {
            sink(&state);
        }
        SessionOutput { state, committed }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
