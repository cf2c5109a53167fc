use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::clock::CivilDateTime;
use super::theme::Theme;

const MENUS: [&str; 5] = ["File", "Edit", "View", "Window", "Help"];

/// The bar across the top row: active app name on the left, the clock on
/// the right. The menu titles are decorative.
pub fn render(frame: &mut Frame, area: Rect, active_app: Option<&str>, theme: &Theme) {
    let now = CivilDateTime::now();

    let mut left = vec![
        Span::raw(" "),
        Span::styled("", Style::default().fg(theme.bar_fg)),
        Span::raw("  "),
        Span::styled(
            active_app.unwrap_or("Portfolio").to_string(),
            Style::default().fg(theme.bar_fg).add_modifier(Modifier::BOLD),
        ),
    ];
    for menu in MENUS {
        left.push(Span::raw("  "));
        left.push(Span::styled(menu, Style::default().fg(theme.muted)));
    }

    let right = format!("{}  {} ", now.short_date(), now.short_time());
    let pad = (area.width as usize)
        .saturating_sub(Line::from(left.clone()).width())
        .saturating_sub(right.chars().count());
    left.push(Span::raw(" ".repeat(pad)));
    left.push(Span::styled(right, Style::default().fg(theme.bar_fg)));

    frame.render_widget(
        Paragraph::new(Line::from(left)).style(Style::default().bg(theme.bar_bg)),
        area,
    );
}
