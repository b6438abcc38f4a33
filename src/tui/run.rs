//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui,
//! and runs the effects transitions ask for (loading a source).

use std::io;

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::info;
use rand::Rng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::bank::QuestionProvider;
use crate::error::QuizError;
use crate::types::Catalog;

use super::state::{Action, Effect, Session, Transition};
use super::update::{apply_load, update};
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Enter => Some(Action::Enter),
        KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),

        // Answering
        KeyCode::Char(' ') => Some(Action::Choose),
        KeyCode::Char(c @ '1'..='9') => Some(Action::NumberKey(c as u8 - b'0')),
        KeyCode::Char('r') => Some(Action::Again),

        // Session
        KeyCode::Char('h') => Some(Action::Home),
        KeyCode::Char('q') => Some(Action::Quit),

        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Apply one action, running any effect it requests.
///
/// Returns None when the user quits.
pub fn dispatch<R: Rng + ?Sized>(
    session: Session,
    action: &Action,
    catalog: &Catalog,
    provider: &dyn QuestionProvider,
    rng: &mut R,
) -> Option<Session> {
    match update(session, action, catalog, rng) {
        Transition::Session(next) => Some(next),
        Transition::Quit => None,
        Transition::Effect(next, effect) => Some(handle_effect(effect, next, catalog, provider)),
    }
}

/// Execute a side effect requested by a pure transition.
fn handle_effect(
    effect: Effect,
    session: Session,
    catalog: &Catalog,
    provider: &dyn QuestionProvider,
) -> Session {
    match effect {
        Effect::LoadSource { source } => {
            let result = match catalog.sources.get(source) {
                Some(spec) => provider.load(spec),
                None => Err(QuizError::Config(format!("no source at index {}", source))),
            };
            apply_load(session, source, result, catalog)
        }
    }
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the quiz TUI until the user quits.
///
/// Sets up the terminal, loops render → read key → dispatch, and restores
/// the terminal on the way out.
pub fn run(catalog: &Catalog, provider: &dyn QuestionProvider) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let result = event_loop(&mut terminal, catalog, provider);

    restore_terminal()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    catalog: &Catalog,
    provider: &dyn QuestionProvider,
) -> io::Result<()> {
    let mut session = Session::new();
    let mut rng = rand::thread_rng();
    info!("session started with {} sources", catalog.sources.len());

    loop {
        terminal.draw(|frame| render(&session, catalog, frame))?;

        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => map_key(key),
            _ => None, // ignore releases, mouse, resize (redrawn next pass)
        };
        let Some(action) = action else {
            continue;
        };

        match dispatch(std::mem::take(&mut session), &action, catalog, provider, &mut rng) {
            Some(next) => session = next,
            None => break,
        }
    }

    info!("session ended");
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
