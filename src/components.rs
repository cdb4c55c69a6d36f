#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board and shape dimensions are always tiny
    clippy::cast_possible_truncation,
    // Allow potential wrapping when casting between types as coordinates are within reasonable ranges
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::VecDeque;
use std::time::Duration;

use crate::config::SimulationConfig;
use crate::game::{PIECE_TYPE_COUNT, SHAPE_SIZE, SPAWN_ANCHOR_COL, SPAWN_ANCHOR_ROW};

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Cell {
    #[default]
    Empty,
    /// A block fixed by a lock, carrying its colour index (0..7)
    Locked(u8),
    Wall,
    SpawnMarker,
}

impl Cell {
    /// Cells that stop a falling piece. Spawn markers are deliberately transparent.
    #[must_use]
    pub fn is_occupied(self) -> bool {
        matches!(self, Cell::Locked(_) | Cell::Wall)
    }

    #[must_use]
    pub fn is_locked(self) -> bool {
        matches!(self, Cell::Locked(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceType {
    O,
    I,
    S,
    Z,
    T,
    L,
    J,
}

impl PieceType {
    pub const ALL: [PieceType; PIECE_TYPE_COUNT] = [
        PieceType::O,
        PieceType::I,
        PieceType::S,
        PieceType::Z,
        PieceType::T,
        PieceType::L,
        PieceType::J,
    ];

    /// Catalog index of this type.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Uniform draw over the seven types.
    #[must_use]
    pub fn random_with(rng: &mut fastrand::Rng) -> Self {
        Self::ALL[rng.usize(..PIECE_TYPE_COUNT)]
    }

    #[must_use]
    pub fn color(self) -> u8 {
        match self {
            PieceType::I => 0,
            PieceType::T => 1,
            PieceType::J => 2,
            PieceType::L => 3,
            PieceType::O => 4,
            PieceType::S => 5,
            PieceType::Z => 6,
        }
    }

    /// The square is symmetric under rotation, so rotate requests on it are ignored outright.
    #[must_use]
    pub fn rotates(self) -> bool {
        self != PieceType::O
    }

    /// Read-only view of this type's template. Copy before mutating.
    #[must_use]
    pub fn template(self) -> &'static PieceShape {
        &CATALOG[self.index()]
    }
}

const TEMPLATE_PATTERNS: [[&str; SHAPE_SIZE]; PIECE_TYPE_COUNT] = [
    // O
    [".....", ".....", "..##.", "..##.", "....."],
    // I
    [".....", "..#..", "..#..", "..#..", "..#.."],
    // S
    [".....", ".....", "..##.", ".##..", "....."],
    // Z
    [".....", ".....", ".##..", "..##.", "....."],
    // T
    [".....", "..#..", ".###.", ".....", "....."],
    // L
    [".....", ".##..", "..#..", "..#..", "....."],
    // J
    [".....", "..##.", "..#..", "..#..", "....."],
];

static CATALOG: Lazy<[PieceShape; PIECE_TYPE_COUNT]> = Lazy::new(|| {
    PieceType::ALL.map(|piece_type| {
        PieceShape::from_pattern(&TEMPLATE_PATTERNS[piece_type.index()], piece_type.color())
    })
});

/// A 5x5 grid of piece cells; `None` is empty, `Some(color)` is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceShape {
    cells: [[Option<u8>; SHAPE_SIZE]; SHAPE_SIZE],
}

impl PieceShape {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cells: [[None; SHAPE_SIZE]; SHAPE_SIZE],
        }
    }

    /// Builds a shape from `#`/`.` rows, filling every `#` with `color`.
    #[must_use]
    pub fn from_pattern(rows: &[&str; SHAPE_SIZE], color: u8) -> Self {
        let mut shape = Self::empty();
        for (i, row) in rows.iter().enumerate() {
            for (j, ch) in row.chars().take(SHAPE_SIZE).enumerate() {
                if ch == '#' {
                    shape.cells[i][j] = Some(color);
                }
            }
        }
        shape
    }

    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<u8> {
        self.cells[i][j]
    }

    /// Quarter turn about the grid centre: `out[i][j] = in[j][4 - i]`.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let mut out = Self::empty();
        for i in 0..SHAPE_SIZE {
            for j in 0..SHAPE_SIZE {
                out.cells[i][j] = self.cells[j][SHAPE_SIZE - 1 - i];
            }
        }
        out
    }

    /// Filled cells as `(row, col, color)` within the 5x5 grid.
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells.iter().enumerate().flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(j, cell)| cell.map(|color| (i, j, color)))
        })
    }
}

/// The falling piece. `row`/`col` is the board coordinate of the shape's top-left corner.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub piece_type: PieceType,
    pub shape: PieceShape,
    pub row: i32,
    pub col: i32,
}

impl ActivePiece {
    #[must_use]
    pub fn spawn(piece_type: PieceType) -> Self {
        Self {
            piece_type,
            shape: *piece_type.template(),
            row: SPAWN_ANCHOR_ROW,
            col: SPAWN_ANCHOR_COL,
        }
    }

    #[must_use]
    pub fn shifted(self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
            ..self
        }
    }

    #[must_use]
    pub fn with_shape(self, shape: PieceShape) -> Self {
        Self { shape, ..self }
    }

    /// Board coordinates `(row, col, color)` of the filled cells.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, u8)> + '_ {
        self.shape
            .filled()
            .map(|(i, j, color)| (self.row + i as i32, self.col + j as i32, color))
    }
}

/// Discrete player commands, edge-triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDropStep,
    Rotate,
    HardDrop,
}

impl Command {
    pub const ALL: [Command; 5] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDropStep,
        Command::Rotate,
        Command::HardDrop,
    ];
}

/// Commands waiting for the next tick, applied in arrival order.
#[derive(Resource, Debug, Clone, Default)]
pub struct PendingCommands {
    queue: VecDeque<Command>,
}

impl PendingCommands {
    pub fn push(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    pub fn pop(&mut self) -> Option<Command> {
        self.queue.pop_front()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Spawning,
    Falling,
    Locking,
    GameOver,
}

#[derive(Debug, Resource, Clone)]
pub struct GameState {
    pub phase: Phase,
    pub score: u32,
    pub lines_cleared: u32,
    pub pieces_locked: u32,
    pub current_type: PieceType,
    pub next_type: PieceType,
    pub active_piece: Option<Entity>,
    pub gravity_timer: Duration,
    pub gravity_interval: Duration,
    pub points_per_line: u32,
    rng: fastrand::Rng,
}

impl GameState {
    /// Fresh session state with a random type pair.
    #[must_use]
    pub fn new(rules: &SimulationConfig) -> Self {
        let mut rng = match rules.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let current_type = PieceType::random_with(&mut rng);
        let next_type = PieceType::random_with(&mut rng);
        Self::with_queue(rules, rng, current_type, next_type)
    }

    /// Session state with a fixed starting pair; later draws come from `rng`.
    #[must_use]
    pub fn with_queue(
        rules: &SimulationConfig,
        rng: fastrand::Rng,
        current_type: PieceType,
        next_type: PieceType,
    ) -> Self {
        Self::from_parts(
            rules.gravity_interval(),
            rules.points_per_line,
            rng,
            current_type,
            next_type,
        )
    }

    fn from_parts(
        gravity_interval: Duration,
        points_per_line: u32,
        rng: fastrand::Rng,
        current_type: PieceType,
        next_type: PieceType,
    ) -> Self {
        Self {
            phase: Phase::Spawning,
            score: 0,
            lines_cleared: 0,
            pieces_locked: 0,
            current_type,
            next_type,
            active_piece: None,
            gravity_timer: Duration::ZERO,
            gravity_interval,
            points_per_line,
            rng,
        }
    }

    /// Zeroed state for a new session with the same rules. The random stream continues
    /// from this one, so seeded sessions stay reproducible across resets.
    #[must_use]
    pub fn restarted(&mut self) -> Self {
        let mut rng = fastrand::Rng::with_seed(self.rng.u64(..));
        let current_type = PieceType::random_with(&mut rng);
        let next_type = PieceType::random_with(&mut rng);
        Self::from_parts(
            self.gravity_interval,
            self.points_per_line,
            rng,
            current_type,
            next_type,
        )
    }

    /// Takes the current type and shifts the single-slot lookahead.
    pub fn advance_queue(&mut self) -> PieceType {
        let spawned = self.current_type;
        self.current_type = self.next_type;
        self.next_type = PieceType::random_with(&mut self.rng);
        spawned
    }

    pub fn award_lines(&mut self, rows: usize) {
        let rows = u32::try_from(rows).unwrap_or(u32::MAX);
        self.lines_cleared = self.lines_cleared.saturating_add(rows);
        self.score = self
            .score
            .saturating_add(rows.saturating_mul(self.points_per_line));
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}
