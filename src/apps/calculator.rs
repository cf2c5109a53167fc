use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{AppContext, AppView};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Op {
    fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            Op::Add => a + b,
            Op::Subtract => a - b,
            Op::Multiply => a * b,
            Op::Divide => a / b,
        }
    }

    fn glyph(&self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Subtract => "−",
            Op::Multiply => "×",
            Op::Divide => "÷",
        }
    }
}

/// Four-function chain calculator. Pressing an operator evaluates the
/// pending one first, so `2 + 3 × 4` reads left to right like the desk
/// calculators it imitates, not like algebra.
pub struct CalculatorApp {
    display: String,
    previous: Option<f64>,
    operation: Option<Op>,
    new_number: bool,
}

impl CalculatorApp {
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            previous: None,
            operation: None,
            new_number: true,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    fn current(&self) -> f64 {
        self.display.parse().unwrap_or(0.0)
    }

    pub fn press_digit(&mut self, digit: char) {
        if self.new_number {
            self.display = digit.to_string();
            self.new_number = false;
        } else if self.display == "0" {
            self.display = digit.to_string();
        } else {
            self.display.push(digit);
        }
    }

    pub fn press_dot(&mut self) {
        if self.new_number {
            self.display = "0.".to_string();
            self.new_number = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    pub fn press_op(&mut self, op: Op) {
        let current = self.current();
        match (self.previous, self.operation) {
            (Some(prev), Some(pending)) if !self.new_number => {
                let result = pending.apply(prev, current);
                self.display = format_number(result);
                self.previous = Some(result);
            }
            (None, _) => self.previous = Some(current),
            _ => {}
        }
        self.operation = Some(op);
        self.new_number = true;
    }

    pub fn press_equals(&mut self) {
        if let (Some(prev), Some(op)) = (self.previous, self.operation) {
            let result = op.apply(prev, self.current());
            self.display = format_number(result);
            self.previous = None;
            self.operation = None;
            self.new_number = true;
        }
    }

    pub fn press_clear(&mut self) {
        *self = Self::new();
    }

    pub fn press_sign(&mut self) {
        let negated = -self.current();
        self.display = format_number(negated);
    }

    pub fn press_percent(&mut self) {
        let scaled = self.current() / 100.0;
        self.display = format_number(scaled);
    }
}

fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "Error".to_string();
    }
    if value == value.trunc() && value.abs() < 1e12 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

const KEYPAD: &[&str] = &[
    "AC   ±   %   ÷",
    "7    8   9   ×",
    "4    5   6   −",
    "1    2   3   +",
    "0        .   =",
];

impl AppView for CalculatorApp {
    fn on_key(&mut self, key: KeyEvent, _ctx: &mut AppContext) {
        match key.code {
            KeyCode::Char(c @ '0'..='9') => self.press_digit(c),
            KeyCode::Char('.') => self.press_dot(),
            KeyCode::Char('+') => self.press_op(Op::Add),
            KeyCode::Char('-') => self.press_op(Op::Subtract),
            KeyCode::Char('*' | 'x') => self.press_op(Op::Multiply),
            KeyCode::Char('/') => self.press_op(Op::Divide),
            KeyCode::Char('=') | KeyCode::Enter => self.press_equals(),
            KeyCode::Char('%') => self.press_percent(),
            KeyCode::Char('n') => self.press_sign(),
            KeyCode::Char('c' | 'C') | KeyCode::Esc => self.press_clear(),
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let theme = ctx.theme();
        let pending = match (self.previous, self.operation) {
            (Some(prev), Some(op)) => format!("{} {}", format_number(prev), op.glyph()),
            _ => String::new(),
        };

        let mut lines = vec![
            Line::raw(""),
            Line::styled(pending, Style::default().fg(theme.muted)),
            Line::styled(
                self.display.clone(),
                Style::default().fg(theme.window_fg).add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
        ];
        for row in KEYPAD {
            lines.push(Line::styled(row.to_string(), Style::default().fg(theme.muted)));
            lines.push(Line::raw(""));
        }
        lines.push(Line::from(Span::styled(
            "type digits and + - * / = , c clears",
            Style::default().fg(theme.muted),
        )));

        let widget = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.window_fg).bg(theme.window_bg));
        frame.render_widget(widget, area);
    }
}
