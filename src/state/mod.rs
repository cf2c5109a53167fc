use log::{debug, info};
use thiserror::Error;

use crate::config::PlacementPolicy;
use crate::registry::AppRegistry;
use self::window::{Position, Size, Visibility, WindowRecord};

pub mod window;

/// Horizontal slack left around a maximized window.
pub const MAXIMIZE_MARGIN_X: f64 = 40.0;
/// Vertical slack left around a maximized window (menu bar plus dock).
pub const MAXIMIZE_MARGIN_Y: f64 = 100.0;
/// Where a maximized window is pinned.
pub const MAXIMIZE_OFFSET: Position = Position { x: 20.0, y: 40.0 };

#[derive(Error, Debug, PartialEq)]
pub enum WindowError {
    #[error("unknown application id: {0}")]
    UnknownApp(String),
    #[error("no window with id: {0}")]
    WindowNotFound(String),
}

/// Owns every mutable window record and the process-wide stacking counter.
///
/// All operations are synchronous and total over the in-memory collection;
/// the only failure case is an unknown target id. Window state is never
/// persisted, so a restart forgets every pane.
pub struct WindowManager {
    registry: AppRegistry,
    placement: PlacementPolicy,
    viewport: Size,
    windows: Vec<WindowRecord>,
    highest_z: u32,
}

impl WindowManager {
    pub fn new(registry: AppRegistry, placement: PlacementPolicy, viewport: Size) -> Self {
        Self {
            registry,
            placement,
            viewport,
            windows: Vec::new(),
            highest_z: 1,
        }
    }

    /// Open (or re-open) the window for `app_id` and raise it to the top.
    ///
    /// A first open clones the descriptor defaults into a fresh record. A
    /// re-open leaves a minimized window, restoring the maximized state if
    /// its snapshot is still live. Ids with a configured placement strategy
    /// are repositioned on every open, overwriting any dragged position.
    pub fn open(&mut self, app_id: &str) -> Result<(), WindowError> {
        let desc = *self
            .registry
            .get(app_id)
            .ok_or_else(|| WindowError::UnknownApp(app_id.to_string()))?;
        let override_pos = self
            .placement
            .strategy_for(app_id)
            .map(|s| s.place(desc.position, desc.size, self.viewport));

        self.highest_z += 1;
        let z = self.highest_z;

        if let Some(win) = self.windows.iter_mut().find(|w| w.id == app_id) {
            win.visibility = match win.visibility {
                Visibility::Minimized if win.has_restore_snapshot() => Visibility::Maximized,
                Visibility::Minimized => Visibility::Normal,
                unchanged => unchanged,
            };
            win.z_index = z;
            if let Some(pos) = override_pos {
                win.position = pos;
            }
            debug!("re-opened window {app_id} at z {z}");
            return Ok(());
        }

        self.windows.push(WindowRecord {
            id: desc.id.to_string(),
            title: desc.title.to_string(),
            icon: desc.icon.to_string(),
            visibility: Visibility::Normal,
            position: override_pos.unwrap_or(desc.position),
            size: desc.size,
            previous_position: None,
            previous_size: None,
            z_index: z,
        });
        info!("opened window {app_id} at z {z}");
        Ok(())
    }

    /// Remove the record entirely. Geometry and maximize state are lost; a
    /// later open recreates the window from descriptor defaults.
    pub fn close(&mut self, id: &str) -> Result<(), WindowError> {
        let index = self.index_of(id)?;
        self.windows.remove(index);
        info!("closed window {id}");
        Ok(())
    }

    /// Hide the window. Stacking order and geometry are untouched.
    pub fn minimize(&mut self, id: &str) -> Result<(), WindowError> {
        let index = self.index_of(id)?;
        self.windows[index].visibility = Visibility::Minimized;
        debug!("minimized window {id}");
        Ok(())
    }

    /// Maximize, or restore the pre-maximize geometry if the snapshot is
    /// live. Restoring falls back to the current geometry if the snapshot
    /// is somehow absent.
    pub fn toggle_maximize(&mut self, id: &str) -> Result<(), WindowError> {
        let viewport = self.viewport;
        let index = self.index_of(id)?;
        let win = &mut self.windows[index];

        let restoring =
            win.visibility == Visibility::Maximized || win.has_restore_snapshot();
        if restoring {
            win.size = win.previous_size.take().unwrap_or(win.size);
            win.position = win.previous_position.take().unwrap_or(win.position);
            win.visibility = Visibility::Normal;
            debug!("restored window {id}");
        } else {
            win.previous_size = Some(win.size);
            win.previous_position = Some(win.position);
            win.size = Size {
                width: viewport.width - MAXIMIZE_MARGIN_X,
                height: viewport.height - MAXIMIZE_MARGIN_Y,
            };
            win.position = MAXIMIZE_OFFSET;
            win.visibility = Visibility::Maximized;
            debug!("maximized window {id}");
        }
        Ok(())
    }

    /// Raise the window to the top of the stacking order.
    pub fn focus(&mut self, id: &str) -> Result<(), WindowError> {
        let index = self.index_of(id)?;
        self.highest_z += 1;
        self.windows[index].z_index = self.highest_z;
        Ok(())
    }

    /// Overwrite the position, at whatever granularity the caller drags.
    /// The manager does not clamp against viewport edges.
    pub fn set_position(&mut self, id: &str, position: Position) -> Result<(), WindowError> {
        let index = self.index_of(id)?;
        self.windows[index].position = position;
        Ok(())
    }

    /// Overwrite the size. Minimum sizes are the presentation layer's call.
    pub fn set_size(&mut self, id: &str, size: Size) -> Result<(), WindowError> {
        let index = self.index_of(id)?;
        self.windows[index].size = size;
        Ok(())
    }

    pub fn registry(&self) -> &AppRegistry {
        &self.registry
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Every live record, in insertion order.
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn get(&self, id: &str) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// The visible window with the highest stacking order, if any.
    pub fn focused(&self) -> Option<&WindowRecord> {
        self.windows
            .iter()
            .filter(|w| w.is_visible())
            .max_by_key(|w| w.z_index)
    }

    /// Visible records sorted bottom-most first, ready to paint.
    pub fn render_order(&self) -> Vec<&WindowRecord> {
        let mut visible: Vec<&WindowRecord> =
            self.windows.iter().filter(|w| w.is_visible()).collect();
        visible.sort_by_key(|w| w.z_index);
        visible
    }

    fn index_of(&self, id: &str) -> Result<usize, WindowError> {
        self.windows
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| WindowError::WindowNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, PlacementStrategy};

    const VIEWPORT: Size = Size { width: 1440.0, height: 900.0 };

    fn manager() -> WindowManager {
        // No placement overrides: every app opens at its descriptor default.
        WindowManager::new(AppRegistry::builtin(), PlacementPolicy::empty(), VIEWPORT)
    }

    fn manager_with_default_overrides() -> WindowManager {
        let placement = Config::default().placement_policy();
        WindowManager::new(AppRegistry::builtin(), placement, VIEWPORT)
    }

    #[test]
    fn first_open_clones_descriptor_defaults() {
        let mut wm = manager();
        wm.open("about").unwrap();

        let win = wm.get("about").expect("record exists");
        assert_eq!(win.visibility, Visibility::Normal);
        assert_eq!(win.position, Position { x: 150.0, y: 100.0 });
        assert_eq!(win.size, Size { width: 600.0, height: 500.0 });
        assert_eq!(win.previous_position, None);
        assert_eq!(win.previous_size, None);
    }

    #[test]
    fn open_twice_keeps_a_single_record() {
        let mut wm = manager();
        wm.open("notes").unwrap();
        wm.open("notes").unwrap();

        assert_eq!(wm.windows().iter().filter(|w| w.id == "notes").count(), 1);
    }

    #[test]
    fn close_then_open_resets_dragged_geometry() {
        let mut wm = manager();
        wm.open("about").unwrap();
        wm.set_position("about", Position { x: 640.0, y: 300.0 }).unwrap();
        wm.set_size("about", Size { width: 450.0, height: 320.0 }).unwrap();

        wm.close("about").unwrap();
        assert!(!wm.is_open("about"));

        wm.open("about").unwrap();
        let win = wm.get("about").unwrap();
        assert_eq!(win.position, Position { x: 150.0, y: 100.0 });
        assert_eq!(win.size, Size { width: 600.0, height: 500.0 });
    }

    #[test]
    fn focus_orders_z_by_recency() {
        let mut wm = manager();
        wm.open("about").unwrap();
        wm.open("finder").unwrap();

        wm.focus("about").unwrap();
        wm.focus("finder").unwrap();
        assert!(wm.get("finder").unwrap().z_index > wm.get("about").unwrap().z_index);

        wm.focus("about").unwrap();
        assert!(wm.get("about").unwrap().z_index > wm.get("finder").unwrap().z_index);
        assert_eq!(wm.focused().unwrap().id, "about");
    }

    #[test]
    fn stacking_counter_scenario() {
        // Counter starts at 1, so the first assignment is 2.
        let mut wm = manager();
        wm.open("about").unwrap();
        assert_eq!(wm.get("about").unwrap().z_index, 2);

        wm.open("resume").unwrap();
        assert_eq!(wm.get("resume").unwrap().z_index, 3);

        wm.focus("about").unwrap();
        assert_eq!(wm.get("about").unwrap().z_index, 4);
        assert_eq!(wm.focused().unwrap().id, "about");
    }

    #[test]
    fn maximize_then_restore_is_exact() {
        let mut wm = manager();
        wm.open("calculator").unwrap();
        let before = wm.get("calculator").unwrap().clone();

        wm.toggle_maximize("calculator").unwrap();
        let maxed = wm.get("calculator").unwrap();
        assert_eq!(maxed.visibility, Visibility::Maximized);
        assert_eq!(maxed.position, MAXIMIZE_OFFSET);
        assert_eq!(
            maxed.size,
            Size {
                width: VIEWPORT.width - MAXIMIZE_MARGIN_X,
                height: VIEWPORT.height - MAXIMIZE_MARGIN_Y,
            }
        );

        wm.toggle_maximize("calculator").unwrap();
        let restored = wm.get("calculator").unwrap();
        assert_eq!(restored.visibility, Visibility::Normal);
        assert_eq!(restored.position, before.position);
        assert_eq!(restored.size, before.size);
        assert!(!restored.has_restore_snapshot());
    }

    #[test]
    fn maximize_restores_the_dragged_position_not_the_default() {
        let mut wm = manager();
        wm.open("finder").unwrap();
        wm.set_position("finder", Position { x: 500.0, y: 40.0 }).unwrap();

        wm.toggle_maximize("finder").unwrap();
        wm.toggle_maximize("finder").unwrap();

        assert_eq!(wm.get("finder").unwrap().position, Position { x: 500.0, y: 40.0 });
    }

    #[test]
    fn minimize_touches_neither_z_nor_geometry() {
        let mut wm = manager();
        wm.open("terminal").unwrap();
        let before = wm.get("terminal").unwrap().clone();

        wm.minimize("terminal").unwrap();
        let win = wm.get("terminal").unwrap();
        assert_eq!(win.visibility, Visibility::Minimized);
        assert_eq!(win.z_index, before.z_index);
        assert_eq!(win.position, before.position);
        assert_eq!(win.size, before.size);
    }

    #[test]
    fn minimized_window_is_not_focusable() {
        let mut wm = manager();
        wm.open("about").unwrap();
        wm.open("notes").unwrap();
        wm.focus("notes").unwrap();

        wm.minimize("notes").unwrap();
        assert_eq!(wm.focused().unwrap().id, "about");
    }

    #[test]
    fn reopening_a_minimized_window_restores_it() {
        let mut wm = manager();
        wm.open("notes").unwrap();
        wm.minimize("notes").unwrap();

        wm.open("notes").unwrap();
        assert_eq!(wm.get("notes").unwrap().visibility, Visibility::Normal);
        assert_eq!(wm.focused().unwrap().id, "notes");
    }

    #[test]
    fn minimized_maximized_window_reopens_maximized() {
        let mut wm = manager();
        wm.open("calendar").unwrap();
        wm.toggle_maximize("calendar").unwrap();
        wm.minimize("calendar").unwrap();

        wm.open("calendar").unwrap();
        let win = wm.get("calendar").unwrap();
        assert_eq!(win.visibility, Visibility::Maximized);
        assert!(win.has_restore_snapshot());
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut wm = manager();
        assert_eq!(
            wm.open("daw"),
            Err(WindowError::UnknownApp("daw".to_string()))
        );
        for result in [
            wm.close("daw"),
            wm.minimize("daw"),
            wm.toggle_maximize("daw"),
            wm.focus("daw"),
            wm.set_position("daw", Position { x: 0.0, y: 0.0 }),
            wm.set_size("daw", Size { width: 1.0, height: 1.0 }),
        ] {
            assert_eq!(result, Err(WindowError::WindowNotFound("daw".to_string())));
        }
    }

    #[test]
    fn failed_operations_do_not_burn_z_indices() {
        let mut wm = manager();
        let _ = wm.open("daw");
        let _ = wm.focus("daw");

        wm.open("about").unwrap();
        assert_eq!(wm.get("about").unwrap().z_index, 2);
    }

    #[test]
    fn placement_overrides_apply_on_every_open() {
        let mut wm = manager_with_default_overrides();
        wm.open("terminal").unwrap();

        // fixed top-left slot, independent of the descriptor default
        let opened = wm.get("terminal").unwrap().position;
        assert_eq!(opened, PlacementStrategy::TopLeft.place(
            Position { x: 170.0, y: 110.0 },
            Size { width: 800.0, height: 550.0 },
            VIEWPORT,
        ));

        // a dragged position is overwritten by the next open
        wm.set_position("terminal", Position { x: 900.0, y: 500.0 }).unwrap();
        wm.open("terminal").unwrap();
        assert_eq!(wm.get("terminal").unwrap().position, opened);
    }

    #[test]
    fn apps_without_overrides_keep_their_dragged_position_on_reopen() {
        let mut wm = manager_with_default_overrides();
        wm.open("about").unwrap();
        wm.set_position("about", Position { x: 700.0, y: 333.0 }).unwrap();

        wm.open("about").unwrap();
        assert_eq!(wm.get("about").unwrap().position, Position { x: 700.0, y: 333.0 });
    }

    #[test]
    fn render_order_is_bottom_most_first_and_skips_minimized() {
        let mut wm = manager();
        wm.open("about").unwrap();
        wm.open("notes").unwrap();
        wm.open("finder").unwrap();
        wm.minimize("notes").unwrap();
        wm.focus("about").unwrap();

        let order: Vec<&str> = wm.render_order().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(order, ["finder", "about"]);
    }
}
