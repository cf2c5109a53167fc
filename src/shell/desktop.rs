use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Paragraph},
    Frame,
};

use super::theme::Theme;

/// Desktop shortcuts in the top-right corner: "My Projects" and
/// "Resume.pdf".
const SHORTCUTS: &[(&str, &str, &str)] = &[
    ("finder", "📁", "My Projects"),
    ("resume", "📄", "Resume.pdf"),
];

const SHORTCUT_WIDTH: u16 = 14;

pub struct DesktopLayout {
    icons: Vec<(Rect, &'static str)>,
}

impl DesktopLayout {
    pub fn new(area: Rect) -> Self {
        let x = area.x + area.width.saturating_sub(SHORTCUT_WIDTH + 2);
        let icons = SHORTCUTS
            .iter()
            .enumerate()
            .map(|(i, (id, _, _))| {
                let rect = Rect {
                    x,
                    y: area.y + 2 + i as u16 * 3,
                    width: SHORTCUT_WIDTH,
                    height: 2,
                };
                (rect, *id)
            })
            .collect();
        Self { icons }
    }

    pub fn hit(&self, col: u16, row: u16) -> Option<&'static str> {
        self.icons
            .iter()
            .find(|(rect, _)| {
                col >= rect.x
                    && col < rect.x + rect.width
                    && row >= rect.y
                    && row < rect.y + rect.height
            })
            .map(|(_, id)| *id)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        // wallpaper
        frame.render_widget(
            Block::default().style(Style::default().bg(theme.desktop_bg)),
            area,
        );

        for ((rect, _), (_, icon, label)) in self.icons.iter().zip(SHORTCUTS) {
            let lines = vec![
                Line::raw(format!("     {icon}")),
                Line::raw(format!(" {label}")),
            ];
            frame.render_widget(
                Paragraph::new(lines).style(Style::default().fg(theme.desktop_fg)),
                *rect,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcuts_open_their_apps() {
        let layout = DesktopLayout::new(Rect::new(0, 0, 120, 40));
        let (rect, id) = layout.icons[0];
        assert_eq!(id, "finder");
        assert_eq!(layout.hit(rect.x + 3, rect.y), Some("finder"));

        let (rect, id) = layout.icons[1];
        assert_eq!(id, "resume");
        assert_eq!(layout.hit(rect.x, rect.y + 1), Some("resume"));

        assert_eq!(layout.hit(0, 0), None);
    }
}
