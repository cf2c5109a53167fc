use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{AppContext, AppView};

/// One portfolio entry shown in the Projects browser.
#[derive(Clone, Copy, Debug)]
pub struct Project {
    pub name: &'static str,
    pub description: &'static str,
    pub tech: &'static [&'static str],
    pub category: &'static str,
}

const PROJECTS: &[Project] = &[
    Project {
        name: "deskfolio",
        description: "This site: a portfolio dressed up as a desktop OS, windows and all.",
        tech: &["rust", "ratatui", "crossterm"],
        category: "Systems",
    },
    Project {
        name: "ledgerline",
        description: "Double-entry bookkeeping API with immutable journals and daily rollups.",
        tech: &["rust", "axum", "postgresql"],
        category: "Backend",
    },
    Project {
        name: "relaymesh",
        description: "Self-healing MQTT relay mesh for a fleet of greenhouse sensors.",
        tech: &["rust", "tokio", "mqtt"],
        category: "IoT",
    },
    Project {
        name: "tidepool",
        description: "Surf forecast dashboard that blends three swell models into one score.",
        tech: &["typescript", "react", "d3"],
        category: "Frontend",
    },
    Project {
        name: "shelfware",
        description: "Barcode-scanning inventory app for a volunteer-run library.",
        tech: &["react-native", "sqlite"],
        category: "Mobile",
    },
    Project {
        name: "chorus",
        description: "Room-aware standup bot that threads updates by project, not by person.",
        tech: &["python", "slack-api"],
        category: "Tooling",
    },
];

pub struct FinderApp {
    selected: usize,
}

impl FinderApp {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    pub fn projects(&self) -> &'static [Project] {
        PROJECTS
    }

    pub fn selected(&self) -> &'static Project {
        &PROJECTS[self.selected]
    }

    fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn select_next(&mut self) {
        self.selected = (self.selected + 1).min(PROJECTS.len() - 1);
    }
}

impl AppView for FinderApp {
    fn on_key(&mut self, key: KeyEvent, _ctx: &mut AppContext) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let theme = ctx.theme();
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(22), Constraint::Min(10)])
            .split(area);

        let mut rows: Vec<Line> = Vec::new();
        for (i, project) in PROJECTS.iter().enumerate() {
            let style = if i == self.selected {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.window_fg)
            };
            rows.push(Line::styled(format!(" {}", project.name), style));
        }
        frame.render_widget(
            Paragraph::new(rows)
                .block(Block::default().borders(Borders::RIGHT).title("Projects"))
                .style(Style::default().fg(theme.window_fg).bg(theme.window_bg)),
            columns[0],
        );

        let project = self.selected();
        let detail = vec![
            Line::raw(""),
            Line::styled(
                format!(" {}", project.name),
                Style::default().fg(theme.window_fg).add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                format!(" {}", project.category),
                Style::default().fg(theme.muted),
            ),
            Line::raw(""),
            Line::raw(format!(" {}", project.description)),
            Line::raw(""),
            Line::styled(
                format!(" {}", project.tech.join(" · ")),
                Style::default().fg(theme.accent),
            ),
        ];
        frame.render_widget(
            Paragraph::new(detail)
                .wrap(Wrap { trim: false })
                .style(Style::default().fg(theme.window_fg).bg(theme.window_bg)),
            columns[1],
        );
    }
}
