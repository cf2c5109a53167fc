use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::clock::{self, CivilDateTime, MONTH_NAMES};
use super::{AppContext, AppView};

/// Weeks of a month, Sunday-first, padded with `None` outside the month.
pub fn month_grid(year: i64, month: u32) -> Vec<[Option<u32>; 7]> {
    let lead = clock::first_weekday_of_month(year, month) as usize;
    let days = clock::days_in_month(year, month);

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut slot = lead;
    for day in 1..=days {
        week[slot] = Some(day);
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [None; 7];
            slot = 0;
        }
    }
    if slot > 0 {
        weeks.push(week);
    }
    weeks
}

pub struct CalendarApp {
    year: i64,
    month: u32,
    today: CivilDateTime,
}

impl CalendarApp {
    pub fn new() -> Self {
        let today = CivilDateTime::now();
        Self { year: today.year, month: today.month, today }
    }

    fn previous_month(&mut self) {
        if self.month == 1 {
            self.month = 12;
            self.year -= 1;
        } else {
            self.month -= 1;
        }
    }

    fn next_month(&mut self) {
        if self.month == 12 {
            self.month = 1;
            self.year += 1;
        } else {
            self.month += 1;
        }
    }
}

impl AppView for CalendarApp {
    fn on_key(&mut self, key: KeyEvent, _ctx: &mut AppContext) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.previous_month(),
            KeyCode::Right | KeyCode::Char('l') => self.next_month(),
            KeyCode::Char('t') => {
                self.year = self.today.year;
                self.month = self.today.month;
            }
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let theme = ctx.theme();
        let mut lines = vec![
            Line::raw(""),
            Line::styled(
                format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year),
                Style::default().fg(theme.window_fg).add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
            Line::styled(
                " Su  Mo  Tu  We  Th  Fr  Sa",
                Style::default().fg(theme.muted),
            ),
        ];

        for week in month_grid(self.year, self.month) {
            let mut spans = Vec::with_capacity(7);
            for day in week {
                match day {
                    Some(d) => {
                        let is_today = self.year == self.today.year
                            && self.month == self.today.month
                            && d == self.today.day;
                        let style = if is_today {
                            Style::default().fg(theme.accent).add_modifier(Modifier::REVERSED)
                        } else {
                            Style::default().fg(theme.window_fg)
                        };
                        spans.push(Span::styled(format!("{d:>3} "), style));
                    }
                    None => spans.push(Span::raw("    ")),
                }
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "← previous · → next · t today",
            Style::default().fg(theme.muted),
        ));

        let widget = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.window_fg).bg(theme.window_bg));
        frame.render_widget(widget, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn august_2026_lines_up() {
        let weeks = month_grid(2026, 8);
        // starts on a Saturday, so the first week is empty until slot 6
        assert_eq!(weeks[0], [None, None, None, None, None, None, Some(1)]);
        assert_eq!(weeks[1][0], Some(2));
        assert_eq!(weeks.last().unwrap()[1], Some(31));
        let total: u32 = weeks.iter().flatten().flatten().count() as u32;
        assert_eq!(total, 31);
    }

    #[test]
    fn leap_february_has_29_slots() {
        let weeks = month_grid(2024, 2);
        let days: Vec<u32> = weeks.iter().flatten().flatten().copied().collect();
        assert_eq!(days.len(), 29);
        assert_eq!(days.first(), Some(&1));
        assert_eq!(days.last(), Some(&29));
    }

    #[test]
    fn month_navigation_wraps_the_year() {
        let mut app = CalendarApp::new();
        app.year = 2026;
        app.month = 1;
        app.previous_month();
        assert_eq!((app.year, app.month), (2025, 12));

        app.next_month();
        assert_eq!((app.year, app.month), (2026, 1));

        app.month = 12;
        app.next_month();
        assert_eq!((app.year, app.month), (2027, 1));
    }
}
