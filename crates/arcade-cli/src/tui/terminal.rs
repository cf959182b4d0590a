//! Terminal setup and the drawing seam used by every screen

use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use tracing::warn;

/// Anything a frame can be drawn to
pub trait Screen {
    fn render(&mut self, draw: &mut dyn FnMut(&mut Frame)) -> Result<()>;
}

impl<B: Backend> Screen for Terminal<B> {
    fn render(&mut self, draw: &mut dyn FnMut(&mut Frame)) -> Result<()> {
        self.draw(|frame| draw(frame))?;
        Ok(())
    }
}

/// Raw mode + alternate screen for as long as the guard lives
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        let mut stdout = io::stdout();
        stdout
            .execute(EnterAlternateScreen)
            .context("entering alternate screen")?;
        stdout.execute(cursor::Hide)?;

        install_panic_hook();

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = restore() {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}

fn restore() -> io::Result<()> {
    terminal::disable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(LeaveAlternateScreen)?;
    stdout.execute(cursor::Show)?;
    Ok(())
}

/// Put the terminal back before the default hook prints the panic
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore();
        default_hook(info);
    }));
}
