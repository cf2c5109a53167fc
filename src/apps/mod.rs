use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::registry::AppKind;
use crate::shell::theme::Theme;
use crate::storage::Storage;

pub mod calculator;
pub mod calendar;
pub mod finder;
pub mod notes;
pub mod settings;
pub mod snake;
pub mod statics;
pub mod terminal;

/// Shared facilities handed to every app view. The shell owns one of
/// these for the whole session.
pub struct AppContext {
    pub dark_mode: bool,
    pub storage: Storage,
}

impl AppContext {
    pub fn theme(&self) -> Theme {
        Theme::current(self.dark_mode)
    }
}

/// Arbitrary content mounted inside a window pane. The window manager
/// never sees this trait; the shell routes events into it and hands it
/// the pane's inner area to draw on.
pub trait AppView {
    fn on_key(&mut self, _key: KeyEvent, _ctx: &mut AppContext) {}
    /// Called once per event-loop pass, whether or not an event arrived.
    fn on_tick(&mut self, _ctx: &mut AppContext) {}
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &AppContext);
}

/// Mount a fresh view for `kind`. Views live as long as their window
/// record: closing the window drops the instance and its session state.
pub fn create(kind: AppKind, ctx: &AppContext) -> Box<dyn AppView> {
    match kind {
        AppKind::Finder => Box::new(finder::FinderApp::new()),
        AppKind::About => Box::new(statics::StaticApp::about()),
        AppKind::TechStack => Box::new(statics::StaticApp::tech_stack()),
        AppKind::Resume => Box::new(statics::StaticApp::resume()),
        AppKind::Calculator => Box::new(calculator::CalculatorApp::new()),
        AppKind::Notes => Box::new(notes::NotesApp::load(&ctx.storage)),
        AppKind::Calendar => Box::new(calendar::CalendarApp::new()),
        AppKind::Terminal => Box::new(terminal::TerminalApp::new()),
        AppKind::Snake => Box::new(snake::SnakeApp::load(&ctx.storage)),
        AppKind::Settings => Box::new(settings::SettingsApp::new()),
        AppKind::Trash => Box::new(statics::StaticApp::trash()),
    }
}
