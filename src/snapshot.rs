#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow sign loss when going from signed to unsigned types since negative rows are filtered first
    clippy::cast_sign_loss
)]

use serde::Serialize;

use crate::board::Board;
use crate::components::{ActivePiece, GameState, Phase, PieceType};

/// One coloured cell for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellSample {
    pub row: usize,
    pub col: usize,
    pub color: u8,
}

/// Committed state between ticks, everything a renderer needs and nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub score: u32,
    pub lines_cleared: u32,
    pub is_game_over: bool,
    pub phase: Phase,
    pub next_type: PieceType,
    /// Locked blocks, top to bottom
    pub cells: Vec<CellSample>,
    /// Filled cells of the falling piece that are on the board
    pub active_piece: Vec<CellSample>,
    pub spawn_markers: Vec<(usize, usize)>,
}

impl Snapshot {
    #[must_use]
    pub fn capture(board: &Board, game_state: &GameState, piece: Option<&ActivePiece>) -> Self {
        let cells = board
            .locked_cells()
            .map(|(row, col, color)| CellSample { row, col, color })
            .collect();

        let active_piece = piece
            .into_iter()
            .flat_map(|piece| piece.cells())
            .filter(|&(row, col, _)| row >= 0 && col >= 0)
            .map(|(row, col, color)| CellSample {
                row: row as usize,
                col: col as usize,
                color,
            })
            .collect();

        Self {
            score: game_state.score,
            lines_cleared: game_state.lines_cleared,
            is_game_over: game_state.is_game_over(),
            phase: game_state.phase,
            // The queue already advanced at spawn, so `current_type` is the upcoming piece
            next_type: game_state.current_type,
            cells,
            active_piece,
            spawn_markers: board.spawn_markers().collect(),
        }
    }
}
