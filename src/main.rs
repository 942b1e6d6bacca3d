use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

use autosuggest::config::{self, Config, MatchMode};
use autosuggest::view::{self, ListLayout};
use autosuggest::{
    FocusSource, InteractionSession, InteractionState, StaticProvider, Suggestion,
    SuggestionRenderer, ThreadedProvider,
};
use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use ratatui::text::Line;

/// How long to wait for input before checking for provider answers
const TICK: Duration = Duration::from_millis(50);

const BUILTIN_SUGGESTIONS: &str = r#"[
    {"name": "North", "items": ["Mill Park", "Mernda", "Epping", "Bundoora", "Thomastown"]},
    {"name": "South", "items": ["Mordialloc", "Mentone", "Frankston", "Moorabbin", "Cheltenham"]},
    {"name": "East", "items": ["Nunawading", "Mitcham", "Box Hill", "Blackburn", "Ringwood"]},
    {"name": "West", "items": ["Werribee", "Melton", "Footscray", "Sunshine", "Altona"]}
]"#;

#[derive(Parser, Debug)]
#[command(
    name = "autosuggest-demo",
    version,
    about = "Type to get suggestions; arrows or the mouse to pick one"
)]
struct Args {
    /// JSON file of suggestions: an array of strings or records, or of
    /// sections with "name" and "items"
    #[arg(long = "suggestions", value_name = "FILE")]
    suggestions: Option<PathBuf>,

    /// Config file (defaults to the user config directory)
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Answer from a worker thread after this many milliseconds
    #[arg(long = "latency-ms", value_name = "N")]
    latency_ms: Option<u64>,

    /// Fuzzy matching instead of prefix matching
    #[arg(long)]
    fuzzy: bool,
}

/// Draws records as their string fields joined, and fills the input with the
/// first one
struct RecordRenderer;

impl SuggestionRenderer for RecordRenderer {
    fn render(&self, suggestion: &Suggestion, _input: &str) -> Line<'static> {
        match suggestion.value().as_object() {
            Some(record) => Line::from(
                record
                    .values()
                    .filter_map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(" · "),
            ),
            None => Line::from(suggestion.text()),
        }
    }

    fn text(&self, suggestion: &Suggestion) -> String {
        suggestion
            .value()
            .as_object()
            .and_then(|record| record.values().find_map(|v| v.as_str()))
            .map_or_else(|| suggestion.text(), str::to_string)
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    #[cfg(debug_assertions)]
    init_logger();

    let args = Args::parse();

    // Everything that can fail on bad input happens before the terminal
    // switches to raw mode
    let config = load_config(&args)?;
    let mut session = build_session(&args, config)?;

    let mut terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal, &mut session);

    // Restore even when the loop failed
    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();

    let text = result?;
    println!("{}", text);
    Ok(())
}

#[cfg(debug_assertions)]
fn init_logger() {
    use std::io::Write;

    let path = std::env::temp_dir().join("autosuggest-demo.log");
    let Ok(file) = std::fs::File::create(&path) else {
        return;
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => config::load_config_from_path(path)
            .wrap_err_with(|| format!("Failed to load config from {}", path.display()))?,
        None => config::load_config()?,
    };
    if args.fuzzy {
        config.suggestions.match_mode = MatchMode::Fuzzy;
    }
    Ok(config)
}

fn build_session(args: &Args, config: Config) -> Result<InteractionSession> {
    let contents = match &args.suggestions {
        Some(path) => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read suggestions from {}", path.display()))?,
        None => BUILTIN_SUGGESTIONS.to_string(),
    };
    let dataset = StaticProvider::from_json_str(&contents)
        .wrap_err("Invalid suggestions file")?
        .with_match_mode(config.suggestions.match_mode);
    let needs_renderer = dataset.has_structured();

    let session = match args.latency_ms {
        Some(ms) => {
            log::debug!("Serving suggestions from a worker with {}ms latency", ms);
            let provider = ThreadedProvider::spawn_with_latency(
                move |text: &str| Ok(dataset.lookup(text)),
                Duration::from_millis(ms),
            );
            InteractionSession::new(provider, config)
        }
        None => InteractionSession::new(dataset, config),
    };

    Ok(if needs_renderer {
        session.with_renderer(RecordRenderer)
    } else {
        session
    })
}

/// Run until the user quits; returns the final input text
fn run(terminal: &mut DefaultTerminal, session: &mut InteractionSession) -> Result<String> {
    let mut state = session.state();
    let mut layout = ListLayout::default();

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            view::render(frame, area, &state, &mut layout);
        })?;

        if event::poll(TICK)? {
            let next = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match handle_key(session, &state, key)? {
                        KeyOutcome::Quit => return Ok(state.raw_text),
                        KeyOutcome::State(next) => next,
                    }
                }
                Event::Mouse(mouse) => handle_mouse(session, &state, &layout, mouse),
                _ => None,
            };
            if let Some(next) = next {
                state = next;
            }
        }

        if let Some(output) = session.poll()? {
            state = output.state;
        }
    }
}

enum KeyOutcome {
    Quit,
    State(Option<InteractionState>),
}

fn handle_key(
    session: &mut InteractionSession,
    state: &InteractionState,
    key: KeyEvent,
) -> Result<KeyOutcome> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let output = match key.code {
        KeyCode::Char('c') if ctrl => return Ok(KeyOutcome::Quit),
        KeyCode::Enter => match state.cursor {
            Some(address) => session.on_commit(address),
            None => return Ok(KeyOutcome::Quit),
        },
        KeyCode::Esc => session.on_escape(),
        KeyCode::Down => session.on_arrow_down(),
        KeyCode::Up => session.on_arrow_up(),
        KeyCode::Backspace => {
            let mut text = state.raw_text.clone();
            text.pop();
            session.on_text_changed(&text)?
        }
        KeyCode::Char(c) if !ctrl => {
            let mut text = state.raw_text.clone();
            text.push(c);
            session.on_text_changed(&text)?
        }
        _ => return Ok(KeyOutcome::State(None)),
    };

    Ok(KeyOutcome::State(Some(output.state)))
}

fn handle_mouse(
    session: &mut InteractionSession,
    state: &InteractionState,
    layout: &ListLayout,
    mouse: MouseEvent,
) -> Option<InteractionState> {
    let target = layout.address_at(mouse.column, mouse.row);
    let pointer_focus = state.focus_source == Some(FocusSource::Pointer);

    // Headers and borders keep the hovered row; leaving the list clears it
    let output = match mouse.kind {
        MouseEventKind::Moved => match target {
            Some(address) if state.cursor != Some(address) => session.on_hover_enter(address),
            None if pointer_focus && !layout.contains(mouse.column, mouse.row) => {
                session.on_hover_leave()
            }
            _ => return None,
        },
        MouseEventKind::Down(MouseButton::Left) => session.on_commit(target?),
        _ => return None,
    };

    Some(output.state)
}
