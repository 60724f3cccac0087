//! Grid snake
//!
//! The simpler sibling of the runner: a snake on a 30×20 board stepping on a
//! millisecond accumulator. Same store trait for the high score, same
//! seeded RNG for food placement.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use thiserror::Error;

use crate::persistence::{self, HighScoreStore};

pub const COLS: i32 = 30;
pub const ROWS: i32 = 20;
/// Cell size in pixels when rendered
pub const CELL: f32 = 20.0;
pub const BASE_DELAY_MS: u64 = 120;
pub const MIN_DELAY_MS: u64 = 50;
/// Points between speed-ups
pub const SPEED_UP_EVERY: u64 = 3;
/// Longest backlog `advance` will catch up on
const MAX_CATCH_UP_STEPS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn in_bounds(self) -> bool {
        (0..COLS).contains(&self.x) && (0..ROWS).contains(&self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridPhase {
    /// Waiting for the first direction key
    Ready,
    Running,
    Paused,
    GameOver,
    /// Board filled
    Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridInput {
    Turn(Direction),
    PauseToggle,
    Restart,
}

impl GridInput {
    /// Arrow keys / WASD, P, R
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(GridInput::Turn(Direction::Up)),
            "ArrowDown" | "s" | "S" => Some(GridInput::Turn(Direction::Down)),
            "ArrowLeft" | "a" | "A" => Some(GridInput::Turn(Direction::Left)),
            "ArrowRight" | "d" | "D" => Some(GridInput::Turn(Direction::Right)),
            "p" | "P" => Some(GridInput::PauseToggle),
            "r" | "R" => Some(GridInput::Restart),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridFault {
    #[error("no free cell left for food ({len} snake cells)")]
    NoFreeCell { len: usize },
}

/// What one step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Ate,
    Crashed,
}

pub struct SnakeGame {
    /// Head first
    snake: VecDeque<Cell>,
    direction: Direction,
    /// At most one buffered turn, applied on the next step
    pending: Option<Direction>,
    food: Cell,
    pub phase: GridPhase,
    pub score: u64,
    pub high_score: u64,
    delay_ms: u64,
    accumulator_ms: u64,
    steps: u64,
    rng: Pcg32,
    store: Box<dyn HighScoreStore>,
}

impl SnakeGame {
    pub fn new(seed: u64, store: Box<dyn HighScoreStore>) -> Self {
        let high_score = persistence::load_or_zero(store.as_ref());
        let mut game = Self {
            snake: VecDeque::new(),
            direction: Direction::Right,
            pending: None,
            food: Cell::new(0, 0),
            phase: GridPhase::Ready,
            score: 0,
            high_score,
            delay_ms: BASE_DELAY_MS,
            accumulator_ms: 0,
            steps: 0,
            rng: Pcg32::seed_from_u64(seed),
            store,
        };
        game.reset();
        game
    }

    /// Two cells at the centre heading right, fresh food
    pub fn reset(&mut self) {
        let mid = Cell::new(COLS / 2, ROWS / 2);
        self.snake = VecDeque::from([mid, Cell::new(mid.x - 1, mid.y)]);
        self.direction = Direction::Right;
        self.pending = None;
        self.score = 0;
        self.delay_ms = BASE_DELAY_MS;
        self.accumulator_ms = 0;
        self.steps = 0;
        self.phase = GridPhase::Ready;
        // Two cells on a 600-cell board always leave room
        self.food = self.random_free_cell().unwrap_or(Cell::new(0, 0));
    }

    pub fn snake(&self) -> impl Iterator<Item = Cell> + '_ {
        self.snake.iter().copied()
    }

    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn handle_input(&mut self, input: GridInput) {
        match input {
            GridInput::Turn(dir) => self.queue_direction(dir),
            GridInput::PauseToggle => match self.phase {
                GridPhase::Running => self.phase = GridPhase::Paused,
                GridPhase::Paused => self.phase = GridPhase::Running,
                _ => {}
            },
            GridInput::Restart => {
                self.reset();
                self.phase = GridPhase::Running;
                log::info!("Snake restarted");
            }
        }
    }

    /// Buffer a turn for the next step.
    ///
    /// Reversals are judged against the direction actually applied, so two
    /// quick turns can never fold the head back into the neck. A newer valid
    /// turn overwrites the buffered one.
    pub fn queue_direction(&mut self, dir: Direction) {
        if self.phase == GridPhase::Ready {
            self.phase = GridPhase::Running;
            log::info!("Snake started");
        }
        if self.phase != GridPhase::Running {
            return;
        }
        if dir == self.direction.opposite() {
            return;
        }
        self.pending = Some(dir);
    }

    /// Feed elapsed milliseconds; steps whenever a full delay has passed
    pub fn advance(&mut self, dt_ms: u64) {
        if self.phase != GridPhase::Running {
            return;
        }
        self.accumulator_ms = (self.accumulator_ms + dt_ms)
            .min(self.delay_ms * MAX_CATCH_UP_STEPS as u64);
        while self.phase == GridPhase::Running && self.accumulator_ms >= self.delay_ms {
            self.accumulator_ms -= self.delay_ms;
            match self.step() {
                Ok(StepOutcome::Crashed) => self.finish(GridPhase::GameOver),
                Ok(_) => {}
                Err(fault) => {
                    log::info!("Board full: {}", fault);
                    self.finish(GridPhase::Won);
                }
            }
        }
    }

    /// Move one cell. Errors only when food has nowhere left to go.
    pub fn step(&mut self) -> Result<StepOutcome, GridFault> {
        if let Some(dir) = self.pending.take() {
            self.direction = dir;
        }
        self.steps += 1;
        let next = self.head().step(self.direction);
        // The tail still counts: it has not moved yet
        if !next.in_bounds() || self.snake.contains(&next) {
            return Ok(StepOutcome::Crashed);
        }
        self.snake.push_front(next);
        if next == self.food {
            self.score += 1;
            self.maybe_speed_up();
            log::debug!("Snake ate, score {}", self.score);
            self.food = self.random_free_cell()?;
            Ok(StepOutcome::Ate)
        } else {
            self.snake.pop_back();
            Ok(StepOutcome::Moved)
        }
    }

    fn maybe_speed_up(&mut self) {
        if self.score % SPEED_UP_EVERY == 0 && self.delay_ms > MIN_DELAY_MS {
            self.delay_ms = (self.delay_ms * 9 / 10).max(MIN_DELAY_MS);
        }
    }

    fn finish(&mut self, phase: GridPhase) {
        self.phase = phase;
        self.pending = None;
        log::info!("Snake over ({:?}): score {}", phase, self.score);
        if self.score > self.high_score {
            self.high_score = self.score;
            persistence::save_or_warn(self.store.as_mut(), self.score);
        }
    }

    fn random_free_cell(&mut self) -> Result<Cell, GridFault> {
        let free: Vec<Cell> = (0..ROWS)
            .flat_map(|y| (0..COLS).map(move |x| Cell::new(x, y)))
            .filter(|c| !self.snake.contains(c))
            .collect();
        if free.is_empty() {
            return Err(GridFault::NoFreeCell {
                len: self.snake.len(),
            });
        }
        Ok(free[self.rng.random_range(0..free.len())])
    }
}
