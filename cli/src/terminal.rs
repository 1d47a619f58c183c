//! Interactive event loop: owns the terminal while a presentation runs.

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::presentation::Presentation;
use crate::ui;

/// Poll timeout of the event loop.
const TICK_RATE: Duration = Duration::from_millis(50);
/// How often the presentation file is checked for changes.
const WATCH_INTERVAL: Duration = Duration::from_secs(1);

/// Run the presentation until the operator quits, restoring the terminal
/// on exit and on panic.
pub fn run(mut presentation: Presentation) -> Result<()> {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = crossterm::execute!(io::stderr(), LeaveAlternateScreen, crossterm::cursor::Show);
        original_hook(info);
    }));

    enable_raw_mode()?;
    let mut terminal = setup_or_restore(setup, || {
        let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    })?;

    let result = event_loop(&mut terminal, &mut presentation);

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Run `setup`, calling `restore` if it fails partway.
fn setup_or_restore<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    setup().inspect_err(|_| restore())
}

fn setup() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    presentation: &mut Presentation,
) -> Result<()> {
    let mut last_watch = Instant::now();

    while !presentation.should_quit() {
        terminal.draw(|f| ui::draw(f, presentation))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if let Some(name) = key_name(&key) {
                    presentation.handle_key(&name);
                }
            }
        }

        if last_watch.elapsed() >= WATCH_INTERVAL {
            presentation.tick();
            last_watch = Instant::now();
        }
    }

    Ok(())
}

/// Name a key press the way the controller expects it: `"l"`, `"G"`,
/// `"ctrl+e"`, `"enter"`, `"pgdown"`, ...
pub fn key_name(key: &KeyEvent) -> Option<String> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let name = match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            format!("ctrl+{}", c.to_ascii_lowercase())
        }
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::PageUp => "pgup".to_string(),
        KeyCode::PageDown => "pgdown".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        _ => return None,
    };
    Some(name)
}
