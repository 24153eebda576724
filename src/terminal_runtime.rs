use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::warn;

use crate::config::{CELL_HEIGHT, CELL_WIDTH, HUD_HEIGHT};
use crate::error::ConfigError;
use crate::grid::Grid;

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Rows and columns taken by the play-area border.
const BORDER_CELLS: u16 = 2;

/// What the game loop should do after the terminal changes size.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ResizeAction {
    /// Start a fresh session on this grid.
    Restart(Grid),
    /// The terminal cannot hold a single cell; keep the session and wait.
    Suspend,
}

/// Owns raw mode and the alternate screen for the lifetime of the game.
///
/// Dropping it restores the terminal best-effort, including on early `?`
/// returns from the game loop.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Enters raw mode, switches to alternate screen, and creates a ratatui terminal.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                let _ = restore_terminal();
                Err(error)
            }
        }
    }

    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }

    /// Resize decision for the current terminal size.
    pub fn current_resize_action(&self) -> io::Result<ResizeAction> {
        let size = self.terminal.size()?;
        Ok(resize_action(size.width, size.height))
    }

    /// Grid that fits the current terminal size.
    pub fn viewport_grid(&self) -> io::Result<Grid> {
        let size = self.terminal.size()?;
        grid_for_terminal(size.width, size.height)
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

/// Derives the play grid from a terminal of `width` x `height` cells, after
/// the border and HUD rows are taken out.
pub fn grid_for_terminal(width: u16, height: u16) -> Result<Grid, ConfigError> {
    Grid::from_viewport(
        width.saturating_sub(BORDER_CELLS),
        height.saturating_sub(BORDER_CELLS + HUD_HEIGHT),
        CELL_WIDTH,
        CELL_HEIGHT,
    )
}

/// Decides between restarting on a new grid and suspending play for a
/// terminal of `width` x `height` cells.
#[must_use]
pub fn resize_action(width: u16, height: u16) -> ResizeAction {
    match grid_for_terminal(width, height) {
        Ok(grid) => ResizeAction::Restart(grid),
        Err(error) => {
            warn!(width, height, %error, "terminal too small, play suspended");
            ResizeAction::Suspend
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}

#[cfg(test)]
mod tests {
    use crate::grid::Grid;

    use super::{ResizeAction, grid_for_terminal, resize_action};

    #[test]
    fn standard_terminal_yields_square_looking_grid() {
        let grid = grid_for_terminal(80, 24).expect("80x24 should fit a grid");

        assert_eq!(grid.cols(), 39);
        assert_eq!(grid.rows(), 20);
    }

    #[test]
    fn tiny_terminal_is_rejected() {
        assert!(grid_for_terminal(3, 4).is_err());
    }

    #[test]
    fn shrinking_below_one_cell_suspends_instead_of_failing() {
        assert_eq!(resize_action(3, 8), ResizeAction::Suspend);
        assert_eq!(resize_action(40, 4), ResizeAction::Suspend);
    }

    #[test]
    fn growing_back_restarts_on_the_fitted_grid() {
        let expected = Grid::new(20, 39).expect("grid should be valid");

        assert_eq!(resize_action(80, 24), ResizeAction::Restart(expected));
        assert_eq!(resize_action(4, 5), ResizeAction::Restart(Grid::new(1, 1).expect("1x1")));
    }
}
