use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::clock::CivilDateTime;
use super::{AppContext, AppView};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Prompt,
    Output,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub kind: EntryKind,
    pub text: String,
}

impl HistoryEntry {
    fn prompt(text: impl Into<String>) -> Self {
        Self { kind: EntryKind::Prompt, text: text.into() }
    }

    fn output(text: impl Into<String>) -> Self {
        Self { kind: EntryKind::Output, text: text.into() }
    }

    fn error(text: impl Into<String>) -> Self {
        Self { kind: EntryKind::Error, text: text.into() }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// `clear` wipes the scrollback instead of appending to it.
    Clear,
    Entries(Vec<HistoryEntry>),
}

const HELP: &[&str] = &[
    "Available commands:",
    "help",
    "about",
    "skills",
    "projects",
    "contact",
    "experience",
    "education",
    "clear",
    "whoami",
    "date",
    "echo [text]",
    "ls",
    "",
];

/// The whole command table is a pure function: no process is spawned and
/// nothing escapes the pane.
pub fn run_command(line: &str, now: &CivilDateTime) -> CommandOutcome {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return CommandOutcome::Entries(vec![HistoryEntry::prompt(line)]);
    }

    let mut parts = trimmed.split_whitespace();
    let cmd = parts.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = parts.collect();

    if cmd == "clear" {
        return CommandOutcome::Clear;
    }

    let mut entries = vec![HistoryEntry::prompt(trimmed)];
    match cmd.as_str() {
        "help" => entries.push(HistoryEntry::output(HELP.join("\n"))),
        "echo" => entries.push(HistoryEntry::output(args.join(" "))),
        "whoami" => entries.push(HistoryEntry::output("guest")),
        "date" => entries.push(HistoryEntry::output(now.long_format())),
        "about" => entries.push(HistoryEntry::output(
            "Full-stack developer building web, mobile and systems software.\n\
             This whole desktop is one of the projects.",
        )),
        "skills" => entries.push(HistoryEntry::output(
            "Languages: Rust, TypeScript, Python, SQL\n\
             Backend:   Axum, Node.js, PostgreSQL, Redis\n\
             Frontend:  React, Tailwind, ratatui (yes, really)\n\
             Tooling:   Docker, GitHub Actions, Grafana",
        )),
        "projects" => entries.push(HistoryEntry::output(
            "Open the Projects window from the dock for the full list,\n\
             or start with: deskfolio, ledgerline, relaymesh, tidepool",
        )),
        "contact" => entries.push(HistoryEntry::output(
            "mail:   hello@deskfolio.dev\n\
             github: github.com/deskfolio",
        )),
        "experience" => entries.push(HistoryEntry::output(
            "2023-now  Senior engineer, distributed ingest pipelines\n\
             2020-2023 Full-stack engineer, fintech dashboards\n\
             2018-2020 Freelance web and mobile work",
        )),
        "education" => entries.push(HistoryEntry::output(
            "BSc Computer Science\n\
             Far too many conference talks watched at 2x speed",
        )),
        "ls" => entries.push(HistoryEntry::output("Projects  Resume.pdf  notes.txt")),
        _ => entries.push(HistoryEntry::error(format!("zsh: command not found: {cmd}"))),
    }
    CommandOutcome::Entries(entries)
}

pub struct TerminalApp {
    history: Vec<HistoryEntry>,
    input: String,
}

impl TerminalApp {
    pub fn new() -> Self {
        let now = CivilDateTime::now();
        Self {
            history: vec![
                HistoryEntry::output(format!(
                    "Last login: {} on ttys000",
                    now.long_format()
                )),
                HistoryEntry::output("Welcome to the Portfolio Terminal"),
                HistoryEntry::output("Type \"help\" to see available commands\n"),
            ],
            input: String::new(),
        }
    }

    fn submit(&mut self) {
        let line = std::mem::take(&mut self.input);
        match run_command(&line, &CivilDateTime::now()) {
            CommandOutcome::Clear => self.history.clear(),
            CommandOutcome::Entries(entries) => self.history.extend(entries),
        }
    }

    fn prompt_spans(theme: &crate::shell::theme::Theme, tail: &str) -> Line<'static> {
        Line::from(vec![
            Span::styled("guest@deskfolio", Style::default().fg(theme.success)),
            Span::styled(" ~", Style::default().fg(theme.accent)),
            Span::styled(" $ ", Style::default().fg(theme.warning)),
            Span::raw(tail.to_string()),
        ])
    }
}

impl AppView for TerminalApp {
    fn on_key(&mut self, key: KeyEvent, _ctx: &mut AppContext) {
        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let theme = ctx.theme();
        let mut lines: Vec<Line> = Vec::new();
        for entry in &self.history {
            match entry.kind {
                EntryKind::Prompt => lines.push(Self::prompt_spans(&theme, &entry.text)),
                EntryKind::Output => {
                    for part in entry.text.split('\n') {
                        lines.push(Line::raw(part.to_string()));
                    }
                }
                EntryKind::Error => lines.push(Line::styled(
                    entry.text.clone(),
                    Style::default().fg(theme.error),
                )),
            }
        }
        lines.push(Self::prompt_spans(&theme, &format!("{}█", self.input)));

        // stick to the bottom, like a real scrollback
        let overflow = (lines.len() as u16).saturating_sub(area.height);
        let widget = Paragraph::new(lines)
            .style(Style::default().fg(theme.window_fg).bg(theme.window_bg))
            .wrap(Wrap { trim: false })
            .scroll((overflow, 0));
        frame.render_widget(widget, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> CivilDateTime {
        CivilDateTime::from_unix_seconds(1_786_113_005)
    }

    fn entries(outcome: CommandOutcome) -> Vec<HistoryEntry> {
        match outcome {
            CommandOutcome::Entries(entries) => entries,
            CommandOutcome::Clear => panic!("expected entries"),
        }
    }

    #[test]
    fn known_command_echoes_the_prompt_then_answers() {
        let out = entries(run_command("whoami", &fixed_now()));
        assert_eq!(out[0], HistoryEntry::prompt("whoami"));
        assert_eq!(out[1], HistoryEntry::output("guest"));
    }

    #[test]
    fn commands_are_case_insensitive() {
        let out = entries(run_command("  WHOAMI  ", &fixed_now()));
        assert_eq!(out[1], HistoryEntry::output("guest"));
    }

    #[test]
    fn echo_joins_its_arguments() {
        let out = entries(run_command("echo hello desktop world", &fixed_now()));
        assert_eq!(out[1], HistoryEntry::output("hello desktop world"));
    }

    #[test]
    fn date_uses_the_supplied_clock() {
        let out = entries(run_command("date", &fixed_now()));
        assert_eq!(out[1], HistoryEntry::output("Fri Aug 7 14:30:05 UTC 2026"));
    }

    #[test]
    fn unknown_commands_report_like_zsh() {
        let out = entries(run_command("brew install happiness", &fixed_now()));
        assert_eq!(out[0], HistoryEntry::prompt("brew install happiness"));
        assert_eq!(out[1], HistoryEntry::error("zsh: command not found: brew"));
    }

    #[test]
    fn empty_input_only_repeats_the_prompt() {
        let out = entries(run_command("   ", &fixed_now()));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, EntryKind::Prompt);
    }

    #[test]
    fn clear_wipes_the_scrollback() {
        assert_eq!(run_command("clear", &fixed_now()), CommandOutcome::Clear);

        let mut app = TerminalApp::new();
        assert!(!app.history.is_empty());
        app.input = "clear".to_string();
        app.submit();
        assert!(app.history.is_empty());
    }

    #[test]
    fn help_lists_every_command() {
        let out = entries(run_command("help", &fixed_now()));
        let text = &out[1].text;
        for cmd in ["about", "skills", "projects", "clear", "whoami", "date", "ls"] {
            assert!(text.contains(cmd), "help is missing {cmd}");
        }
    }
}
