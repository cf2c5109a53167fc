use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use log::{info, warn};
use ratatui::{backend::Backend, layout::Rect, Frame, Terminal};
use thiserror::Error;

use crate::apps::{self, AppContext, AppView};
use crate::config::Config;
use crate::registry::AppRegistry;
use crate::state::window::{Position, Size};
use crate::state::{WindowError, WindowManager};
use crate::storage::Storage;

pub mod chrome;
pub mod desktop;
pub mod dock;
pub mod geometry;
pub mod menubar;
pub mod theme;

use chrome::HitRegion;
use desktop::DesktopLayout;
use dock::DockLayout;
use geometry::{Projector, DESKTOP_HEIGHT, DESKTOP_SIZE, DESKTOP_WIDTH, MENUBAR_UNITS};

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("terminal io error: {0}")]
    Io(#[from] io::Error),
}

const TICK: Duration = Duration::from_millis(50);
const MIN_WINDOW_WIDTH: f64 = 180.0;
const MIN_WINDOW_HEIGHT: f64 = 120.0;

struct DragState {
    id: String,
    // pointer offset from the window origin, desktop units
    grab_x: f64,
    grab_y: f64,
}

struct ResizeState {
    id: String,
}

/// The presentation layer: one event loop that projects window records
/// onto the cell grid and turns pointer and key events into manager
/// operations. The manager itself never sees a terminal cell.
pub struct Shell {
    manager: WindowManager,
    views: HashMap<String, Box<dyn AppView>>,
    ctx: AppContext,
    projector: Projector,
    drag: Option<DragState>,
    resize: Option<ResizeState>,
    should_quit: bool,
}

impl Shell {
    pub fn new(config: Config, storage: Storage) -> Self {
        let manager = WindowManager::new(
            AppRegistry::builtin(),
            config.placement_policy(),
            DESKTOP_SIZE,
        );
        let mut shell = Self {
            manager,
            views: HashMap::new(),
            ctx: AppContext { dark_mode: config.dark_mode, storage },
            projector: Projector::new(80, 24),
            drag: None,
            resize: None,
            should_quit: false,
        };
        // greet with a terminal and the resume already open
        shell.open_app("terminal");
        shell.open_app("resume");
        shell
    }

    pub fn manager(&self) -> &WindowManager {
        &self.manager
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), ShellError> {
        info!("shell started");
        while !self.should_quit {
            for view in self.views.values_mut() {
                view.on_tick(&mut self.ctx);
            }
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(TICK)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    // the projector is rebuilt from the frame area anyway
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }
        info!("shell quit");
        Ok(())
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.projector = Projector::new(area.width, area.height);
        let theme = self.ctx.theme();

        let desktop = DesktopLayout::new(area);
        desktop.render(frame, area, &theme);

        let focused_title = self.manager.focused().map(|w| w.title.clone());
        menubar::render(
            frame,
            Rect { x: area.x, y: area.y, width: area.width, height: 1 },
            focused_title.as_deref(),
            &theme,
        );

        let focused_id = self.manager.focused().map(|w| w.id.clone());
        let panes: Vec<(String, String, Rect)> = self
            .manager
            .render_order()
            .iter()
            .map(|w| {
                (
                    w.id.clone(),
                    format!("{} {}", w.icon, w.title),
                    self.projector.cell_rect(w.position, w.size),
                )
            })
            .collect();
        for (id, title, rect) in &panes {
            let focused = focused_id.as_deref() == Some(id.as_str());
            chrome::render_window(frame, *rect, title, focused, &theme);
            let content = chrome::content_rect(*rect);
            if content.height > 0 {
                if let Some(view) = self.views.get_mut(id) {
                    view.render(frame, content, &self.ctx);
                }
            }
        }

        let dock = DockLayout::new(area, &self.manager);
        dock.render(frame, &self.manager, &theme);
    }

    fn screen_area(&self) -> Rect {
        Rect::new(0, 0, self.projector.cols(), self.projector.rows())
    }

    fn open_app(&mut self, id: &str) {
        if let Err(e) = self.manager.open(id) {
            warn!("open {id}: {e}");
            return;
        }
        if !self.views.contains_key(id) {
            if let Some(kind) = self.manager.registry().get(id).map(|d| d.kind) {
                self.views.insert(id.to_string(), apps::create(kind, &self.ctx));
            }
        }
    }

    fn close_app(&mut self, id: &str) {
        report(self.manager.close(id));
        self.views.remove(id);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            let focused = self.manager.focused().map(|w| w.id.clone());
            match key.code {
                KeyCode::Char('w') => {
                    if let Some(id) = focused {
                        self.close_app(&id);
                    }
                }
                KeyCode::Char('m') => {
                    if let Some(id) = focused {
                        report(self.manager.minimize(&id));
                    }
                }
                KeyCode::Enter => {
                    if let Some(id) = focused {
                        report(self.manager.toggle_maximize(&id));
                    }
                }
                KeyCode::Tab => self.cycle_focus(),
                KeyCode::Char(c @ '1'..='9') => {
                    let index = c as usize - '1' as usize;
                    let app_id = self.manager.registry().iter().nth(index).map(|a| a.id);
                    if let Some(id) = app_id {
                        self.open_app(id);
                    }
                }
                _ => {}
            }
            return;
        }

        if let Some(id) = self.manager.focused().map(|w| w.id.clone()) {
            if let Some(view) = self.views.get_mut(&id) {
                view.on_key(key, &mut self.ctx);
            }
        }
    }

    /// Raise the bottom-most visible window, so repeated presses rotate
    /// through the stack.
    fn cycle_focus(&mut self) {
        let (bottom, count) = {
            let order = self.manager.render_order();
            (order.first().map(|w| w.id.clone()), order.len())
        };
        if count > 1 {
            if let Some(id) = bottom {
                report(self.manager.focus(&id));
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_press(mouse.column, mouse.row),
            MouseEventKind::Drag(MouseButton::Left) => self.handle_pointer_move(mouse.column, mouse.row),
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag = None;
                self.resize = None;
            }
            _ => {}
        }
    }

    fn handle_press(&mut self, col: u16, row: u16) {
        let area = self.screen_area();

        // the dock paints over everything
        if let Some(id) = DockLayout::new(area, &self.manager).hit(col, row) {
            self.open_app(id);
            return;
        }

        // then windows, topmost first
        let panes: Vec<(String, Rect)> = self
            .manager
            .render_order()
            .iter()
            .rev()
            .map(|w| (w.id.clone(), self.projector.cell_rect(w.position, w.size)))
            .collect();
        for (id, rect) in panes {
            let Some(region) = chrome::hit_test(rect, col, row) else { continue };
            match region {
                HitRegion::Close => self.close_app(&id),
                HitRegion::Minimize => report(self.manager.minimize(&id)),
                HitRegion::Maximize => report(self.manager.toggle_maximize(&id)),
                HitRegion::TitleBar => {
                    report(self.manager.focus(&id));
                    if let Some(win) = self.manager.get(&id) {
                        let (ux, uy) = self.projector.units_at(col, row);
                        self.drag = Some(DragState {
                            id: id.clone(),
                            grab_x: ux - win.position.x,
                            grab_y: uy - win.position.y,
                        });
                    }
                }
                HitRegion::ResizeCorner => {
                    report(self.manager.focus(&id));
                    self.resize = Some(ResizeState { id });
                }
                HitRegion::Content => report(self.manager.focus(&id)),
            }
            return;
        }

        // desktop shortcuts sit under the windows
        if let Some(id) = DesktopLayout::new(area).hit(col, row) {
            self.open_app(id);
        }
    }

    fn handle_pointer_move(&mut self, col: u16, row: u16) {
        let (ux, uy) = self.projector.units_at(col, row);
        if let Some(drag) = &self.drag {
            // keep at least a sliver of the title bar reachable
            let position = Position {
                x: (ux - drag.grab_x).clamp(-60.0, DESKTOP_WIDTH - 60.0),
                y: (uy - drag.grab_y).clamp(MENUBAR_UNITS, DESKTOP_HEIGHT - 40.0),
            };
            let id = drag.id.clone();
            report(self.manager.set_position(&id, position));
        } else if let Some(resize) = &self.resize {
            let id = resize.id.clone();
            if let Some(win) = self.manager.get(&id) {
                let size = Size {
                    width: (ux - win.position.x).max(MIN_WINDOW_WIDTH),
                    height: (uy - win.position.y).max(MIN_WINDOW_HEIGHT),
                };
                report(self.manager.set_size(&id, size));
            }
        }
    }
}

/// Operations issued from hit regions target records that were just
/// looked up, so a failure here is a bug worth hearing about, not worth
/// crashing over.
fn report(result: Result<(), WindowError>) {
    if let Err(e) = result {
        warn!("window operation failed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use ratatui::backend::TestBackend;
    use std::env;
    use uuid::Uuid;

    fn test_shell() -> Shell {
        let root = env::temp_dir().join(format!("deskfolio-shell-{}", Uuid::new_v4()));
        Shell::new(Config::default(), Storage::at(root).unwrap())
    }

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn startup_opens_terminal_and_resume() {
        let shell = test_shell();
        assert!(shell.manager().is_open("terminal"));
        assert!(shell.manager().is_open("resume"));
        assert!(shell.views.contains_key("terminal"));
        assert_eq!(shell.manager().focused().unwrap().id, "resume");
    }

    #[test]
    fn a_frame_renders_without_panicking() {
        let mut shell = test_shell();
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| shell.render(frame)).unwrap();
        // a second frame after a state change re-renders cleanly
        shell.open_app("snake");
        terminal.draw(|frame| shell.render(frame)).unwrap();
    }

    #[test]
    fn dock_clicks_open_windows() {
        let mut shell = test_shell();
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| shell.render(frame)).unwrap();

        let area = shell.screen_area();
        let dock = DockLayout::new(area, &shell.manager);
        let col = area.width / 2; // middle of the centered dock
        let id = dock.hit(col, area.height - 1).expect("a dock slot");

        shell.handle_press(col, area.height - 1);
        assert!(shell.manager().is_open(id));
        assert_eq!(shell.manager().focused().unwrap().id, id);
    }

    #[test]
    fn alt_w_closes_the_focused_window() {
        let mut shell = test_shell();
        shell.handle_key(press(KeyCode::Char('w'), KeyModifiers::ALT));
        assert!(!shell.manager().is_open("resume"));
        assert!(!shell.views.contains_key("resume"));
        assert_eq!(shell.manager().focused().unwrap().id, "terminal");
    }

    #[test]
    fn plain_keys_reach_the_focused_app() {
        let mut shell = test_shell();
        // resume is focused; scroll it without crashing, then type into
        // the terminal after cycling focus
        shell.handle_key(press(KeyCode::Down, KeyModifiers::NONE));
        shell.handle_key(press(KeyCode::Tab, KeyModifiers::ALT));
        assert_eq!(shell.manager().focused().unwrap().id, "terminal");
        shell.handle_key(press(KeyCode::Char('l'), KeyModifiers::NONE));
        shell.handle_key(press(KeyCode::Char('s'), KeyModifiers::NONE));
        shell.handle_key(press(KeyCode::Enter, KeyModifiers::NONE));
    }

    #[test]
    fn ctrl_q_quits() {
        let mut shell = test_shell();
        shell.handle_key(press(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(shell.should_quit);
    }

    #[test]
    fn title_bar_press_starts_a_drag_that_moves_the_window() {
        let mut shell = test_shell();
        let backend = TestBackend::new(144, 45);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| shell.render(frame)).unwrap();

        let win = shell.manager().focused().unwrap();
        let id = win.id.clone();
        let rect = shell.projector.cell_rect(win.position, win.size);

        // grab the middle of the title bar and pull it 10 cells right
        let grab_col = rect.x + rect.width / 2;
        shell.handle_press(grab_col, rect.y);
        assert!(shell.drag.is_some());

        let before = shell.manager().get(&id).unwrap().position;
        shell.handle_pointer_move(grab_col + 10, rect.y + 2);
        let after = shell.manager().get(&id).unwrap().position;
        assert!(after.x > before.x);
        assert!(after.y > before.y);

        shell.handle_mouse(MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: grab_col + 10,
            row: rect.y + 2,
            modifiers: KeyModifiers::NONE,
        });
        assert!(shell.drag.is_none());
    }
}
