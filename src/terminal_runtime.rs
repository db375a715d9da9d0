use std::io;
use std::panic;
use std::sync::Once;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::Theme;
use crate::renderer;
use crate::snapshot::Snapshot;

type SnakeTerminal = Terminal<CrosstermBackend<io::Stdout>>;

static PANIC_HOOK: Once = Once::new();

/// Raw-mode, alternate-screen terminal that the game draws snapshots into.
///
/// The previous terminal state comes back when the session is dropped or
/// when the process panics while it is open.
pub struct TerminalSession {
    terminal: SnakeTerminal,
    theme: &'static Theme,
}

impl TerminalSession {
    pub fn enter(theme: &'static Theme) -> io::Result<Self> {
        PANIC_HOOK.call_once(chain_restore_into_panic_hook);

        enable_raw_mode()?;
        let terminal = execute!(io::stdout(), EnterAlternateScreen, Hide)
            .and_then(|()| Terminal::new(CrosstermBackend::new(io::stdout())));

        match terminal {
            Ok(terminal) => Ok(Self { terminal, theme }),
            Err(error) => {
                restore_terminal();
                Err(error)
            }
        }
    }

    /// Draws one full frame for `snapshot`.
    pub fn draw(&mut self, snapshot: &Snapshot, paused: bool) -> io::Result<()> {
        let theme = self.theme;
        self.terminal
            .draw(|frame| renderer::render(frame, snapshot, paused, theme))?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn chain_restore_into_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore_terminal();
        previous(info);
    }));
}

fn restore_terminal() {
    if let Err(error) = disable_raw_mode() {
        tracing::error!(?error, "failed to disable raw mode");
    }
    if let Err(error) = execute!(io::stdout(), Show, LeaveAlternateScreen) {
        tracing::error!(?error, "failed to leave alternate screen");
    }
}
