#![warn(clippy::all, clippy::pedantic)]

use std::time::Duration;

// Board dimensions, walls included
pub const BOARD_WIDTH: usize = 11;
pub const BOARD_HEIGHT: usize = 22;

// Row reserved for the spawn markers; a locked block here ends the session
pub const SPAWN_ROW: usize = 1;

// Side length of every piece template
pub const SHAPE_SIZE: usize = 5;

// Anchor (top-left of the 5x5 shape) used for every new piece
pub const SPAWN_ANCHOR_ROW: i32 = -1;
pub const SPAWN_ANCHOR_COL: i32 = (BOARD_WIDTH / 2) as i32 - 2;

// Number of distinct piece types and colour indices
pub const PIECE_TYPE_COUNT: usize = 7;

// Gravity and scoring defaults
pub const GRAVITY_INTERVAL: Duration = Duration::from_secs(1);
pub const POINTS_PER_LINE: u32 = 10;

// Interior (playable) column range, walls excluded
#[must_use]
pub fn interior_columns() -> std::ops::Range<usize> {
    1..BOARD_WIDTH - 1
}
