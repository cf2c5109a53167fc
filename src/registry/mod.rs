use serde::Serialize;

use crate::state::window::{Position, Size};

/// Which view is mounted inside the pane. The window manager never looks
/// at this; only the shell does, when it instantiates the app.
#[derive(Clone, Copy, Serialize, Debug, PartialEq, Eq)]
pub enum AppKind {
    Finder,
    About,
    TechStack,
    Resume,
    Calculator,
    Notes,
    Calendar,
    Terminal,
    Snake,
    Settings,
    Trash,
}

/// Immutable template for one application: identity, glyph, and the
/// default geometry a fresh window is cloned from.
#[derive(Clone, Copy, Serialize, Debug)]
pub struct AppDescriptor {
    pub id: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub kind: AppKind,
    pub position: Position,
    pub size: Size,
}

const fn desc(
    id: &'static str,
    title: &'static str,
    icon: &'static str,
    kind: AppKind,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> AppDescriptor {
    AppDescriptor {
        id,
        title,
        icon,
        kind,
        position: Position { x, y },
        size: Size { width, height },
    }
}

// Registry order doubles as dock order.
const APPS: &[AppDescriptor] = &[
    desc("about", "About Me", "👤", AppKind::About, 150.0, 100.0, 600.0, 500.0),
    desc("finder", "Projects", "📁", AppKind::Finder, 100.0, 80.0, 900.0, 600.0),
    desc("terminal", "Terminal", "⌨", AppKind::Terminal, 170.0, 110.0, 800.0, 550.0),
    desc("techstack", "Tech Stack", "💻", AppKind::TechStack, 200.0, 120.0, 700.0, 550.0),
    desc("resume", "Resume", "📄", AppKind::Resume, 120.0, 90.0, 800.0, 650.0),
    desc("calculator", "Calculator", "🔢", AppKind::Calculator, 300.0, 150.0, 400.0, 550.0),
    desc("notes", "Notes", "📝", AppKind::Notes, 180.0, 120.0, 750.0, 500.0),
    desc("calendar", "Calendar", "📅", AppKind::Calendar, 220.0, 110.0, 650.0, 600.0),
    desc("snake", "Snake", "🎮", AppKind::Snake, 260.0, 120.0, 600.0, 600.0),
    desc("settings", "Settings", "⚙", AppKind::Settings, 160.0, 100.0, 700.0, 600.0),
    desc("trash", "Trash", "🗑", AppKind::Trash, 280.0, 140.0, 650.0, 500.0),
];

/// Read-only table of every known application, fixed for the process
/// lifetime.
#[derive(Clone, Debug)]
pub struct AppRegistry {
    apps: &'static [AppDescriptor],
}

impl AppRegistry {
    pub fn builtin() -> Self {
        Self { apps: APPS }
    }

    pub fn get(&self, id: &str) -> Option<&AppDescriptor> {
        self.apps.iter().find(|a| a.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AppDescriptor> {
        self.apps.iter()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}
