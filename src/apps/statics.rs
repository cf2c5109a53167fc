use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{AppContext, AppView};

/// Fixed-content panes: About Me, Tech Stack, Resume and Trash are all the
/// same view over different text, scrollable with the arrow keys.
pub struct StaticApp {
    content: &'static str,
    scroll: u16,
}

impl StaticApp {
    fn new(content: &'static str) -> Self {
        Self { content, scroll: 0 }
    }

    pub fn about() -> Self {
        Self::new(
            "\n  About Me\n\
             \n\
             \x20 Full-stack developer who likes the systems end of the stack a\n\
             \x20 little too much. I build web and mobile products by day and\n\
             \x20 terminal toys by night; this desktop is both.\n\
             \n\
             \x20 Currently: senior engineer on a data-ingest platform, wrangling\n\
             \x20 backpressure and on-call rotations.\n\
             \n\
             \x20 Elsewhere: hello@deskfolio.dev · github.com/deskfolio",
        )
    }

    pub fn tech_stack() -> Self {
        Self::new(
            "\n  Tech Stack\n\
             \n\
             \x20 Daily drivers\n\
             \x20   Rust · TypeScript · PostgreSQL\n\
             \n\
             \x20 Backend\n\
             \x20   Axum · tokio · Redis · RabbitMQ\n\
             \n\
             \x20 Frontend\n\
             \x20   React · Tailwind · Vite\n\
             \n\
             \x20 Keeps the lights on\n\
             \x20   Docker · GitHub Actions · Grafana · Terraform",
        )
    }

    pub fn resume() -> Self {
        Self::new(
            "\n  Resume\n\
             \n\
             \x20 Experience\n\
             \x20   2023-now   Senior Engineer — ingest pipelines, 40k events/s\n\
             \x20   2020-2023  Full-stack Engineer — fintech dashboards\n\
             \x20   2018-2020  Freelance — web and mobile\n\
             \n\
             \x20 Education\n\
             \x20   BSc Computer Science\n\
             \n\
             \x20 Selected talks\n\
             \x20   \"Your terminal is a compositor\" — local Rust meetup\n\
             \n\
             \x20 References on request. PDF available from the menu bar of the\n\
             \x20 real site.",
        )
    }

    pub fn trash() -> Self {
        Self::new(
            "\n  Trash\n\
             \n\
             \x20 (empty)\n\
             \n\
             \x20 Deleted ideas end up here: a blockchain todo list, a social\n\
             \x20 network for houseplants, and one brave attempt at writing CSS\n\
             \x20 by hand.",
        )
    }
}

impl AppView for StaticApp {
    fn on_key(&mut self, key: KeyEvent, _ctx: &mut AppContext) {
        match key.code {
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Home => self.scroll = 0,
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let theme = ctx.theme();
        let line_count = self.content.lines().count() as u16;
        self.scroll = self.scroll.min(line_count.saturating_sub(1));

        let widget = Paragraph::new(self.content)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .style(Style::default().fg(theme.window_fg).bg(theme.window_bg));
        frame.render_widget(widget, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_static_pane_has_content() {
        for app in [
            StaticApp::about(),
            StaticApp::tech_stack(),
            StaticApp::resume(),
            StaticApp::trash(),
        ] {
            assert!(app.content.lines().count() > 3);
        }
    }

    #[test]
    fn scroll_clamps_to_the_content() {
        let mut app = StaticApp::trash();
        let lines = app.content.lines().count() as u16;
        app.scroll = 500;
        app.scroll = app.scroll.min(lines.saturating_sub(1));
        assert!(app.scroll < lines);
    }
}
