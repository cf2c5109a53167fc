use ratatui::layout::Rect;

use crate::state::window::{Position, Size};

/// The fixed desktop the window manager works in. Descriptor defaults,
/// placement math and the maximize margins all live in this space; only
/// the shell knows about terminal cells.
pub const DESKTOP_WIDTH: f64 = 1440.0;
pub const DESKTOP_HEIGHT: f64 = 900.0;

pub const DESKTOP_SIZE: Size = Size { width: DESKTOP_WIDTH, height: DESKTOP_HEIGHT };

/// Desktop units reserved for the menu bar; windows are not dragged above it.
pub const MENUBAR_UNITS: f64 = 28.0;

/// Maps desktop units onto the terminal cell grid. Rebuilt every frame
/// from the current frame area, which also covers terminal resizes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
    cols: u16,
    rows: u16,
}

impl Projector {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    /// Window geometry to a clamped on-screen rect. The title bar needs a
    /// row and the chrome needs a handful of columns, hence the minimums.
    pub fn cell_rect(&self, position: Position, size: Size) -> Rect {
        let x = (position.x / DESKTOP_WIDTH * self.cols as f64).round() as i32;
        let y = (position.y / DESKTOP_HEIGHT * self.rows as f64).round() as i32;
        let width = (size.width / DESKTOP_WIDTH * self.cols as f64).round() as i32;
        let height = (size.height / DESKTOP_HEIGHT * self.rows as f64).round() as i32;

        let x = x.clamp(0, self.cols.saturating_sub(1) as i32);
        let y = y.clamp(1, self.rows.saturating_sub(1) as i32);
        let width = width.clamp(12, (self.cols as i32 - x).max(12));
        let height = height.clamp(3, (self.rows as i32 - y).max(3));

        Rect {
            x: x as u16,
            y: y as u16,
            width: width.min(self.cols as i32 - x).max(1) as u16,
            height: height.min(self.rows as i32 - y).max(1) as u16,
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// The desktop-unit point under a terminal cell.
    pub fn units_at(&self, col: u16, row: u16) -> (f64, f64) {
        (
            col as f64 / self.cols as f64 * DESKTOP_WIDTH,
            row as f64 / self.rows as f64 * DESKTOP_HEIGHT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_scales_into_the_grid() {
        let projector = Projector::new(144, 45);
        let rect = projector.cell_rect(
            Position { x: 150.0, y: 100.0 },
            Size { width: 600.0, height: 500.0 },
        );
        assert_eq!(rect, Rect { x: 15, y: 5, width: 60, height: 25 });
    }

    #[test]
    fn rects_never_leave_the_screen() {
        let projector = Projector::new(80, 24);
        let rect = projector.cell_rect(
            Position { x: 1400.0, y: 880.0 },
            Size { width: 900.0, height: 600.0 },
        );
        assert!(rect.x < 80);
        assert!(rect.y >= 1);
        assert!(rect.x + rect.width <= 80);
        assert!(rect.y + rect.height <= 24);
    }

    #[test]
    fn units_round_trip_close_enough() {
        let projector = Projector::new(144, 45);
        let (x, y) = projector.units_at(72, 22);
        assert!((x - 720.0).abs() < f64::EPSILON);
        assert!((y - 440.0).abs() < f64::EPSILON);
    }
}
