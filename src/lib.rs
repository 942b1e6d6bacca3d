//! Suggestion navigation for text inputs
//!
//! Fetches suggestions for what the user types (flat or grouped into
//! sections), caches them per input text, ignores answers that arrive for
//! text the user has already moved past, and keeps the input text in step
//! with keyboard and pointer focus.
//!
//! [`InteractionSession`] is the entry point: feed it input events and it
//! returns an [`InteractionState`] snapshot for each one.

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod focus;
pub mod iterator;
pub mod normalize;
pub mod provider;
pub mod render;
pub mod session;
pub mod state;
pub mod suggestion;
pub mod view;


pub use config::Config;
pub use engine::{Resolution, SuggestionEngine, Update};
pub use error::{AutosuggestError, Result};
pub use focus::FocusController;
pub use iterator::SectionIterator;
pub use provider::{
    AsyncProvider, FetchReply, FetchResult, ProviderError, StaticProvider, SuggestionProvider,
    ThreadedProvider,
};
pub use render::{PlainRenderer, PrefixHighlighter, SuggestionRenderer};
pub use session::{InteractionSession, SessionOutput};
pub use state::{FocusSource, InteractionState, SelectionCommitted, Visibility};
pub use suggestion::{Address, Section, Suggestion, SuggestionsCollection};
