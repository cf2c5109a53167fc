use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::warn;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::CivilDateTime;
use crate::storage::Storage;
use super::{AppContext, AppView};

pub const NOTES_BLOB: &str = "notes";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub date: String, // ISO date of the last save
}

fn welcome_note() -> Note {
    Note {
        id: "welcome".to_string(),
        title: "Welcome Note".to_string(),
        content: "This is a simple notes app. Press ctrl-n to create a new note!".to_string(),
        date: CivilDateTime::now().iso_date(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Focus {
    List,
    Title,
    Body,
}

pub struct NotesApp {
    notes: Vec<Note>,
    selected: usize,
    title_draft: String,
    content_draft: String,
    focus: Focus,
    dirty: bool,
}

impl NotesApp {
    /// Notes survive the session; a missing or corrupt blob falls back to
    /// the seeded welcome note.
    pub fn load(storage: &Storage) -> Self {
        let notes = match storage.load_blob::<Vec<Note>>(NOTES_BLOB) {
            Ok(Some(notes)) if !notes.is_empty() => notes,
            Ok(_) => vec![welcome_note()],
            Err(e) => {
                warn!("failed to load notes, starting fresh: {e}");
                vec![welcome_note()]
            }
        };
        let mut app = Self {
            notes,
            selected: 0,
            title_draft: String::new(),
            content_draft: String::new(),
            focus: Focus::List,
            dirty: false,
        };
        app.sync_drafts();
        app
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.notes.get(self.selected)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn sync_drafts(&mut self) {
        if let Some(note) = self.notes.get(self.selected) {
            self.title_draft = note.title.clone();
            self.content_draft = note.content.clone();
        } else {
            self.title_draft.clear();
            self.content_draft.clear();
        }
        self.dirty = false;
    }

    fn refresh_dirty(&mut self) {
        self.dirty = match self.notes.get(self.selected) {
            Some(note) => note.title != self.title_draft || note.content != self.content_draft,
            None => false,
        };
    }

    pub fn new_note(&mut self, storage: &Storage) {
        let note = Note {
            id: Uuid::new_v4().to_string(),
            title: "Untitled Note".to_string(),
            content: String::new(),
            date: CivilDateTime::now().iso_date(),
        };
        self.notes.insert(0, note);
        self.selected = 0;
        self.sync_drafts();
        self.focus = Focus::Title;
        self.persist(storage);
    }

    pub fn save(&mut self, storage: &Storage) {
        let (title, content) = (self.title_draft.clone(), self.content_draft.clone());
        if let Some(note) = self.notes.get_mut(self.selected) {
            note.title = title;
            note.content = content;
            note.date = CivilDateTime::now().iso_date();
            self.dirty = false;
            self.persist(storage);
        }
    }

    pub fn delete(&mut self, storage: &Storage) {
        if self.selected < self.notes.len() {
            self.notes.remove(self.selected);
            self.selected = 0;
            self.sync_drafts();
            self.persist(storage);
        }
    }

    fn persist(&self, storage: &Storage) {
        if let Err(e) = storage.save_blob(NOTES_BLOB, &self.notes) {
            warn!("failed to persist notes: {e}");
        }
    }

    fn select(&mut self, index: usize) {
        if index < self.notes.len() {
            self.selected = index;
            self.sync_drafts();
        }
    }
}

impl AppView for NotesApp {
    fn on_key(&mut self, key: KeyEvent, ctx: &mut AppContext) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('n') => self.new_note(&ctx.storage),
                KeyCode::Char('s') => self.save(&ctx.storage),
                KeyCode::Char('d') => self.delete(&ctx.storage),
                _ => {}
            }
            return;
        }

        match (self.focus, key.code) {
            (_, KeyCode::Tab) => {
                self.focus = match self.focus {
                    Focus::List => Focus::Title,
                    Focus::Title => Focus::Body,
                    Focus::Body => Focus::List,
                };
            }
            (Focus::List, KeyCode::Up) => self.select(self.selected.saturating_sub(1)),
            (Focus::List, KeyCode::Down) => self.select(self.selected + 1),
            (Focus::Title, KeyCode::Enter) => self.focus = Focus::Body,
            (Focus::Title, KeyCode::Char(c)) => {
                self.title_draft.push(c);
                self.refresh_dirty();
            }
            (Focus::Title, KeyCode::Backspace) => {
                self.title_draft.pop();
                self.refresh_dirty();
            }
            (Focus::Body, KeyCode::Enter) => {
                self.content_draft.push('\n');
                self.refresh_dirty();
            }
            (Focus::Body, KeyCode::Char(c)) => {
                self.content_draft.push(c);
                self.refresh_dirty();
            }
            (Focus::Body, KeyCode::Backspace) => {
                self.content_draft.pop();
                self.refresh_dirty();
            }
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let theme = ctx.theme();
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(10)])
            .split(area);

        let mut sidebar: Vec<Line> = Vec::new();
        for (i, note) in self.notes.iter().enumerate() {
            let style = if i == self.selected {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.window_fg)
            };
            sidebar.push(Line::styled(
                format!(" {}", truncated(&note.title, 20)),
                style,
            ));
            sidebar.push(Line::styled(
                format!("   {}", note.date),
                Style::default().fg(theme.muted),
            ));
        }
        let list_block = Block::default()
            .borders(Borders::RIGHT)
            .title(if self.focus == Focus::List { "Notes*" } else { "Notes" });
        frame.render_widget(
            Paragraph::new(sidebar)
                .block(list_block)
                .style(Style::default().fg(theme.window_fg).bg(theme.window_bg)),
            columns[0],
        );

        let editor = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(2),
                Constraint::Length(1),
            ])
            .split(columns[1]);

        let title_style = if self.focus == Focus::Title {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.window_fg).add_modifier(Modifier::BOLD)
        };
        frame.render_widget(
            Paragraph::new(Line::styled(format!(" {}", self.title_draft), title_style))
                .style(Style::default().bg(theme.window_bg)),
            editor[0],
        );
        frame.render_widget(
            Paragraph::new(self.content_draft.clone())
                .wrap(Wrap { trim: false })
                .style(Style::default().fg(theme.window_fg).bg(theme.window_bg)),
            editor[1],
        );

        let mut status = vec![Span::styled(
            " ctrl-n new  ctrl-s save  ctrl-d delete  tab focus",
            Style::default().fg(theme.muted),
        )];
        if self.dirty {
            status.push(Span::styled(
                "  • unsaved changes",
                Style::default().fg(theme.warning),
            ));
        }
        frame.render_widget(
            Paragraph::new(Line::from(status)).style(Style::default().bg(theme.window_bg)),
            editor[2],
        );
    }
}

fn truncated(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}
