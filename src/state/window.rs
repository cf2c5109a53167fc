use serde::{Serialize, Deserialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub enum Visibility {
    /// Window is shown at its current geometry
    Normal,
    /// Window keeps its record and geometry but is not rendered
    Minimized,
    /// Window fills the viewport minus the fixed maximize margins
    Maximized,
}

/// Top-left corner of a window, in desktop units.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct WindowRecord {
    pub id: String,              // Same as the owning AppDescriptor's id
    pub title: String,           // Window title
    pub icon: String,            // Dock / title-bar glyph
    pub visibility: Visibility,  // Normal, Minimized, Maximized
    pub position: Position,      // Current geometry, desktop units
    pub size: Size,
    pub previous_position: Option<Position>, // Maximize-restore snapshot.
    pub previous_size: Option<Size>,         // Present exactly while the snapshot is live.
    pub z_index: u32,            // Stacking order; higher paints on top
}

impl WindowRecord {
    /// Whether the pane is rendered on the desktop at all.
    pub fn is_visible(&self) -> bool {
        self.visibility != Visibility::Minimized
    }

    /// The maximize-restore snapshot outlives a minimize, so a window
    /// minimized while maximized still reports true here.
    pub fn has_restore_snapshot(&self) -> bool {
        self.previous_position.is_some() || self.previous_size.is_some()
    }
}
