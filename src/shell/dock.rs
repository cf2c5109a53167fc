use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::WindowManager;
use super::theme::Theme;

/// Cells each dock icon occupies, hit region included.
const SLOT_WIDTH: u16 = 5;

/// Computed once per frame; pairs every dock slot with its app id so a
/// click resolves without re-measuring anything.
pub struct DockLayout {
    slots: Vec<(Rect, &'static str)>,
    bar: Rect,
}

impl DockLayout {
    pub fn new(area: Rect, manager: &WindowManager) -> Self {
        let count = manager.registry().len() as u16;
        let width = count * SLOT_WIDTH + 2;
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(1);
        let bar = Rect { x, y, width: width.min(area.width), height: 1 };

        let slots = manager
            .registry()
            .iter()
            .enumerate()
            .map(|(i, app)| {
                let slot = Rect {
                    x: x + 1 + i as u16 * SLOT_WIDTH,
                    y,
                    width: SLOT_WIDTH,
                    height: 1,
                };
                (slot, app.id)
            })
            .collect();
        Self { slots, bar }
    }

    /// The app id under a click, if any.
    pub fn hit(&self, col: u16, row: u16) -> Option<&'static str> {
        self.slots
            .iter()
            .find(|(slot, _)| {
                row == slot.y && col >= slot.x && col < slot.x + slot.width
            })
            .map(|(_, id)| *id)
    }

    pub fn render(&self, frame: &mut Frame, manager: &WindowManager, theme: &Theme) {
        frame.render_widget(
            Paragraph::new("").style(Style::default().bg(theme.bar_bg)),
            self.bar,
        );
        for (slot, id) in &self.slots {
            let Some(app) = manager.registry().get(id) else { continue };
            let running = manager.is_open(id);
            let style = if running {
                // stand-in for the little dot under a running app
                Style::default().bg(theme.bar_bg).add_modifier(Modifier::UNDERLINED)
            } else {
                Style::default().bg(theme.bar_bg)
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(format!(" {} ", app.icon), style)))
                    .style(Style::default().bg(theme.bar_bg)),
                *slot,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlacementPolicy;
    use crate::registry::AppRegistry;
    use crate::shell::geometry::DESKTOP_SIZE;

    fn manager() -> WindowManager {
        WindowManager::new(AppRegistry::builtin(), PlacementPolicy::empty(), DESKTOP_SIZE)
    }

    #[test]
    fn every_registered_app_gets_a_slot() {
        let manager = manager();
        let layout = DockLayout::new(Rect::new(0, 0, 120, 40), &manager);
        assert_eq!(layout.slots.len(), manager.registry().len());
    }

    #[test]
    fn clicks_resolve_to_the_app_under_them() {
        let manager = manager();
        let layout = DockLayout::new(Rect::new(0, 0, 120, 40), &manager);

        let (first_slot, first_id) = layout.slots[0];
        assert_eq!(layout.hit(first_slot.x + 2, first_slot.y), Some(first_id));
        assert_eq!(layout.hit(first_slot.x + 2, first_slot.y.saturating_sub(1)), None);
    }

    #[test]
    fn the_bar_is_centered_on_the_bottom_row() {
        let manager = manager();
        let area = Rect::new(0, 0, 120, 40);
        let layout = DockLayout::new(area, &manager);
        assert_eq!(layout.bar.y, 39);
        let left = layout.bar.x;
        let right = area.width - (layout.bar.x + layout.bar.width);
        assert!(left.abs_diff(right) <= 1);
    }
}
