use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use super::{AppContext, AppView};

/// The one live setting: the shell-wide appearance. Everything else in
/// the pane is decoration.
pub struct SettingsApp;

impl SettingsApp {
    pub fn new() -> Self {
        Self
    }
}

impl AppView for SettingsApp {
    fn on_key(&mut self, key: KeyEvent, ctx: &mut AppContext) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
            ctx.dark_mode = !ctx.dark_mode;
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let theme = ctx.theme();
        let appearance = if ctx.dark_mode { "Dark" } else { "Light" };
        let lines = vec![
            Line::raw(""),
            Line::styled(
                "Appearance",
                Style::default().fg(theme.window_fg).add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
            Line::styled(
                format!("●  {appearance} mode"),
                Style::default().fg(theme.accent),
            ),
            Line::raw(""),
            Line::styled(
                "enter toggles dark / light",
                Style::default().fg(theme.muted),
            ),
            Line::raw(""),
            Line::raw(""),
            Line::styled("Wallpaper", Style::default().fg(theme.window_fg).add_modifier(Modifier::BOLD)),
            Line::raw(""),
            Line::styled("Sonoma (static)", Style::default().fg(theme.muted)),
        ];
        let widget = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.window_fg).bg(theme.window_bg));
        frame.render_widget(widget, area);
    }
}
