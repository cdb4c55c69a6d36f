#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow sign loss when going from signed to unsigned types since we check for negatives before casting
    clippy::cast_sign_loss,
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow potential wrapping when casting between types as board coordinates are within reasonable ranges
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::{Cell, PieceShape};
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, SHAPE_SIZE, SPAWN_ROW, interior_columns};

/// The playfield: `BOARD_HEIGHT` rows by `BOARD_WIDTH` columns, walls and spawn markers included.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self {
            cells: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
        };
        board.reset();
        board
    }

    /// Walls on both sides and the floor, markers across the spawn row, everything else empty.
    pub fn reset(&mut self) {
        for (row, cells) in self.cells.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = if row == SPAWN_ROW && col > 0 && col < BOARD_WIDTH - 1 {
                    Cell::SpawnMarker
                } else if row == BOARD_HEIGHT - 1 || col == 0 || col == BOARD_WIDTH - 1 {
                    Cell::Wall
                } else {
                    Cell::Empty
                };
            }
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    #[must_use]
    pub fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the board. Callers are expected to stay in bounds.
    #[must_use]
    pub fn cell_at(&self, row: usize, col: usize) -> Cell {
        assert!(
            row < BOARD_HEIGHT && col < BOARD_WIDTH,
            "board access out of range: ({row}, {col})"
        );
        self.cells[row][col]
    }

    /// Signed lookup; `None` off the board.
    #[must_use]
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        if row < 0 || col < 0 || row >= BOARD_HEIGHT as i32 || col >= BOARD_WIDTH as i32 {
            return None;
        }
        Some(self.cells[row as usize][col as usize])
    }

    /// Whether `shape` anchored at `(row, col)` overlaps a locked block or a wall.
    ///
    /// Shape cells falling outside the board are skipped rather than treated as a hit,
    /// which is what lets a fresh piece hang partially above row 0.
    #[must_use]
    pub fn collides(&self, shape: &PieceShape, row: i32, col: i32) -> bool {
        shape.filled().any(|(i, j, _)| {
            self.get(row + i as i32, col + j as i32)
                .is_some_and(Cell::is_occupied)
        })
    }

    /// Writes every filled shape cell as `Locked`. This is the only way a spawn marker
    /// becomes a block. Cells above the board are dropped.
    pub fn merge(&mut self, shape: &PieceShape, row: i32, col: i32) {
        for (i, j, color) in shape.filled() {
            let (r, c) = (row + i as i32, col + j as i32);
            if r < 0 {
                debug!("Dropping piece cell above the board at ({r}, {c})");
                continue;
            }
            let (r, c) = (r as usize, c as usize);
            assert!(
                r < BOARD_HEIGHT && c < BOARD_WIDTH,
                "merge out of range: ({r}, {c})"
            );
            self.cells[r][c] = Cell::Locked(color);
        }
    }

    /// A row is full when every interior cell is locked. Markers, walls and empties all break it.
    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        row < BOARD_HEIGHT && interior_columns().all(|col| self.cells[row][col].is_locked())
    }

    /// Clears the full rows among the five starting at `top_row`, scanning top to bottom,
    /// and returns how many were removed.
    pub fn clear_full_rows(&mut self, top_row: i32) -> usize {
        let mut cleared = 0;

        for offset in 0..SHAPE_SIZE as i32 {
            let row = top_row + offset;
            if row < 0 || row >= BOARD_HEIGHT as i32 {
                continue;
            }
            let row = row as usize;
            if self.is_row_full(row) {
                self.remove_row(row);
                cleared += 1;
            }
        }

        self.restore_spawn_row();

        if cleared > 0 {
            info!("Cleared {cleared} rows below row {top_row}");
        }
        cleared
    }

    /// Drops every interior row above `row` by one and empties row 0.
    fn remove_row(&mut self, row: usize) {
        for r in (1..=row).rev() {
            for col in interior_columns() {
                self.cells[r][col] = self.cells[r - 1][col];
            }
        }
        for col in interior_columns() {
            self.cells[0][col] = Cell::Empty;
        }
        self.restore_spawn_row();
    }

    // Markers shifted below the spawn row vanish; gaps left in the spawn row get a marker back.
    fn restore_spawn_row(&mut self) {
        for col in interior_columns() {
            if self.cells[SPAWN_ROW + 1][col] == Cell::SpawnMarker {
                self.cells[SPAWN_ROW + 1][col] = Cell::Empty;
            }
            if self.cells[SPAWN_ROW][col] == Cell::Empty {
                self.cells[SPAWN_ROW][col] = Cell::SpawnMarker;
            }
        }
    }

    /// True once any interior spawn-row cell is no longer a marker.
    #[must_use]
    pub fn is_over(&self) -> bool {
        interior_columns().any(|col| self.cells[SPAWN_ROW][col] != Cell::SpawnMarker)
    }

    /// Every locked cell as `(row, col, color)`, top to bottom.
    pub fn locked_cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| match cell {
                Cell::Locked(color) => Some((row, col, *color)),
                _ => None,
            })
        })
    }

    /// Coordinates of the spawn markers still standing.
    pub fn spawn_markers(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        interior_columns()
            .filter(|&col| self.cells[SPAWN_ROW][col] == Cell::SpawnMarker)
            .map(|col| (SPAWN_ROW, col))
    }

    /// Overwrites a single cell, for building fixtures in tests.
    #[cfg(test)]
    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row][col] = cell;
    }

    /// Locks every interior cell of `row` with `color`.
    #[cfg(test)]
    pub(crate) fn fill_row(&mut self, row: usize, color: u8) {
        for col in interior_columns() {
            self.cells[row][col] = Cell::Locked(color);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
