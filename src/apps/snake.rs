use std::collections::VecDeque;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::event::{KeyCode, KeyEvent};
use log::warn;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::storage::Storage;
use super::{AppContext, AppView};

pub const HIGH_SCORE_BLOB: &str = "snake-highscore";

const GRID_SIZE: i32 = 20;
const INITIAL_SPEED: Duration = Duration::from_millis(150);
const SPEED_INCREMENT: Duration = Duration::from_millis(2);
const MIN_SPEED: Duration = Duration::from_millis(50);

/// Xorshift PRNG, seeded from the wall clock. Food placement does not
/// need anything stronger.
struct XorShift {
    state: u64,
}

impl XorShift {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn seeded() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5eed);
        Self::new(nanos)
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn range(&mut self, bound: i32) -> i32 {
        (self.next_u64() % bound as u64) as i32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Idle,
    Playing,
    Paused,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Ate,
    Died,
}

pub struct SnakeApp {
    snake: VecDeque<Cell>,
    food: Cell,
    direction: Direction,
    pending: Direction, // applied on the next step; blocks 180° turns
    status: Status,
    score: u32,
    high_score: u32,
    speed: Duration,
    last_step: Instant,
    rng: XorShift,
}

impl SnakeApp {
    pub fn load(storage: &Storage) -> Self {
        let high_score = match storage.load_blob::<u32>(HIGH_SCORE_BLOB) {
            Ok(Some(score)) => score,
            Ok(None) => 0,
            Err(e) => {
                warn!("failed to load snake high score: {e}");
                0
            }
        };
        Self::with_rng(XorShift::seeded(), high_score)
    }

    fn with_rng(rng: XorShift, high_score: u32) -> Self {
        Self {
            snake: VecDeque::from([Cell { x: 10, y: 10 }]),
            food: Cell { x: 15, y: 10 },
            direction: Direction::Right,
            pending: Direction::Right,
            status: Status::Idle,
            score: 0,
            high_score,
            speed: INITIAL_SPEED,
            last_step: Instant::now(),
            rng,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    fn reset(&mut self) {
        let high_score = self.high_score;
        let rng = XorShift::new(self.rng.next_u64());
        *self = Self::with_rng(rng, high_score);
    }

    fn steer(&mut self, dir: Direction) {
        if dir != self.direction.opposite() {
            self.pending = dir;
        }
    }

    fn spawn_food(&mut self) {
        loop {
            let candidate = Cell {
                x: self.rng.range(GRID_SIZE),
                y: self.rng.range(GRID_SIZE),
            };
            if !self.snake.contains(&candidate) {
                self.food = candidate;
                return;
            }
        }
    }

    /// Advance one tick of the game. The tail cell is still fatal even
    /// though it is about to vacate, matching the usual arcade rule.
    pub fn step(&mut self) -> StepOutcome {
        self.direction = self.pending;
        let (dx, dy) = self.direction.delta();
        let head = self.snake[0];
        let new_head = Cell { x: head.x + dx, y: head.y + dy };

        let hits_wall = new_head.x < 0
            || new_head.x >= GRID_SIZE
            || new_head.y < 0
            || new_head.y >= GRID_SIZE;
        if hits_wall || self.snake.contains(&new_head) {
            self.status = Status::GameOver;
            return StepOutcome::Died;
        }

        self.snake.push_front(new_head);
        if new_head == self.food {
            self.score += 1;
            self.speed = self.speed.saturating_sub(SPEED_INCREMENT).max(MIN_SPEED);
            self.spawn_food();
            StepOutcome::Ate
        } else {
            self.snake.pop_back();
            StepOutcome::Moved
        }
    }

    fn persist_high_score(&mut self, storage: &Storage) {
        if self.score > self.high_score {
            self.high_score = self.score;
            if let Err(e) = storage.save_blob(HIGH_SCORE_BLOB, &self.high_score) {
                warn!("failed to persist snake high score: {e}");
            }
        }
    }
}

impl AppView for SnakeApp {
    fn on_key(&mut self, key: KeyEvent, _ctx: &mut AppContext) {
        match key.code {
            KeyCode::Up | KeyCode::Char('w') => self.steer(Direction::Up),
            KeyCode::Down | KeyCode::Char('s') => self.steer(Direction::Down),
            KeyCode::Left | KeyCode::Char('a') => self.steer(Direction::Left),
            KeyCode::Right | KeyCode::Char('d') => self.steer(Direction::Right),
            KeyCode::Char(' ') => {
                self.status = match self.status {
                    Status::Idle => {
                        self.last_step = Instant::now();
                        Status::Playing
                    }
                    Status::Playing => Status::Paused,
                    Status::Paused => Status::Playing,
                    Status::GameOver => Status::GameOver,
                };
            }
            KeyCode::Char('r') => self.reset(),
            _ => {}
        }
    }

    fn on_tick(&mut self, ctx: &mut AppContext) {
        if self.status != Status::Playing {
            return;
        }
        if self.last_step.elapsed() < self.speed {
            return;
        }
        self.last_step = Instant::now();
        if self.step() == StepOutcome::Died {
            self.persist_high_score(&ctx.storage);
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let theme = ctx.theme();
        let header = match self.status {
            Status::Idle => "space to start".to_string(),
            Status::Playing => format!("score {}", self.score),
            Status::Paused => format!("score {}  (paused)", self.score),
            Status::GameOver => format!("game over — score {}  (r to retry)", self.score),
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled(header, Style::default().fg(theme.window_fg).add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("   best {}", self.high_score),
                    Style::default().fg(theme.muted),
                ),
            ]),
            Line::raw(""),
        ];

        for y in 0..GRID_SIZE {
            let mut spans = Vec::with_capacity(GRID_SIZE as usize);
            for x in 0..GRID_SIZE {
                let cell = Cell { x, y };
                if self.snake.front() == Some(&cell) {
                    spans.push(Span::styled("██", Style::default().fg(theme.accent)));
                } else if self.snake.contains(&cell) {
                    spans.push(Span::styled("██", Style::default().fg(theme.success)));
                } else if cell == self.food {
                    spans.push(Span::styled("<>", Style::default().fg(theme.error)));
                } else {
                    spans.push(Span::styled("· ", Style::default().fg(theme.muted)));
                }
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "arrows steer · space pauses · r resets",
            Style::default().fg(theme.muted),
        ));

        let widget = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.window_fg).bg(theme.window_bg));
        frame.render_widget(widget, area);
    }
}
