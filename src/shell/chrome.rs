use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use super::theme::Theme;

// macOS traffic-light colors, same in both themes.
const CLOSE_RED: Color = Color::Rgb(255, 95, 86);
const MIN_YELLOW: Color = Color::Rgb(255, 189, 46);
const MAX_GREEN: Color = Color::Rgb(39, 201, 63);

/// What a pointer press on a window pane means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitRegion {
    Close,
    Minimize,
    Maximize,
    TitleBar,
    ResizeCorner,
    Content,
}

fn contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Resolve a click against a window's on-screen rect. The three buttons
/// sit on the title row at fixed offsets, matching how they are drawn.
pub fn hit_test(rect: Rect, col: u16, row: u16) -> Option<HitRegion> {
    if !contains(rect, col, row) {
        return None;
    }
    if row == rect.y {
        return Some(match col.saturating_sub(rect.x) {
            1 => HitRegion::Close,
            3 => HitRegion::Minimize,
            5 => HitRegion::Maximize,
            _ => HitRegion::TitleBar,
        });
    }
    if row == rect.y + rect.height - 1 && col >= (rect.x + rect.width).saturating_sub(2) {
        return Some(HitRegion::ResizeCorner);
    }
    Some(HitRegion::Content)
}

/// The pane area an app view draws on, below the title row.
pub fn content_rect(rect: Rect) -> Rect {
    Rect {
        x: rect.x,
        y: rect.y + 1,
        width: rect.width,
        height: rect.height.saturating_sub(1),
    }
}

/// Paint the chrome: clear whatever is underneath, fill the pane, draw
/// the title row and the resize handle. The app content goes on top of
/// the fill, inside `content_rect`.
pub fn render_window(frame: &mut Frame, rect: Rect, title: &str, focused: bool, theme: &Theme) {
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.window_bg)),
        rect,
    );

    let bar_bg = if focused {
        theme.titlebar_focused
    } else {
        theme.titlebar_blurred
    };
    let mut spans = vec![
        Span::raw(" "),
        Span::styled("●", Style::default().fg(CLOSE_RED)),
        Span::raw(" "),
        Span::styled("●", Style::default().fg(MIN_YELLOW)),
        Span::raw(" "),
        Span::styled("●", Style::default().fg(MAX_GREEN)),
        Span::raw("  "),
    ];
    let title_style = if focused {
        Style::default().fg(theme.window_fg).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.muted)
    };
    spans.push(Span::styled(truncate_title(title, rect.width), title_style));

    let title_row = Rect { x: rect.x, y: rect.y, width: rect.width, height: 1 };
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bar_bg)),
        title_row,
    );

    if rect.height > 1 {
        let handle = Rect {
            x: (rect.x + rect.width).saturating_sub(2),
            y: rect.y + rect.height - 1,
            width: 2,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Line::styled("◢ ", Style::default().fg(theme.muted)))
                .style(Style::default().bg(theme.window_bg)),
            handle,
        );
    }
}

fn truncate_title(title: &str, width: u16) -> String {
    let budget = width.saturating_sub(10) as usize;
    if title.chars().count() <= budget {
        title.to_string()
    } else {
        title.chars().take(budget.saturating_sub(1)).collect::<String>() + "…"
    }
}
