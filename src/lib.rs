// Window-manager core: records, stacking order, the seven operations
pub mod state;

// Static application table
pub mod registry;

// TOML config incl. the per-app placement policy
pub mod config;

// JSON blob persistence for apps that outlive the session
pub mod storage;

// Civil date/time math for the clock, calendar and terminal
pub mod clock;

// Application views mounted inside window panes
pub mod apps;

// Presentation layer: event loop, chrome, dock, menu bar
pub mod shell;

use std::io;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};

pub use config::Config;
pub use shell::{Shell, ShellError};
pub use state::{WindowError, WindowManager};
pub use storage::Storage;

/// Bring up the terminal, run the desktop until the user quits, and
/// restore the terminal even when the shell errors out.
pub fn run(config: Config, storage: Storage) -> Result<(), ShellError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut shell = Shell::new(config, storage);
    let result = shell.run(&mut terminal);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
