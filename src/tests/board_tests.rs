#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::components::{Cell, PieceType};
    use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, SPAWN_ROW};

    #[test]
    fn test_reset_layout() {
        let board = Board::new();

        // Side walls on every row, floor along the bottom
        for row in 0..BOARD_HEIGHT {
            assert_eq!(board.cell_at(row, 0), Cell::Wall);
            assert_eq!(board.cell_at(row, BOARD_WIDTH - 1), Cell::Wall);
        }
        for col in 0..BOARD_WIDTH {
            assert_eq!(board.cell_at(BOARD_HEIGHT - 1, col), Cell::Wall);
        }

        // Markers across the interior of the spawn row, row 0 empty
        for col in 1..BOARD_WIDTH - 1 {
            assert_eq!(board.cell_at(SPAWN_ROW, col), Cell::SpawnMarker);
            assert_eq!(board.cell_at(0, col), Cell::Empty);
            assert_eq!(board.cell_at(10, col), Cell::Empty);
        }

        assert!(!board.is_over());
        assert_eq!(board.locked_cells().count(), 0);
        assert_eq!(board.spawn_markers().count(), BOARD_WIDTH - 2);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_cell_at_out_of_range_panics() {
        let board = Board::new();
        let _ = board.cell_at(BOARD_HEIGHT, 3);
    }

    #[test]
    fn test_signed_get_is_bounds_checked() {
        let board = Board::new();
        assert_eq!(board.get(-1, 3), None);
        assert_eq!(board.get(3, -1), None);
        assert_eq!(board.get(3, BOARD_WIDTH as i32), None);
        assert_eq!(board.get(0, 0), Some(Cell::Wall));
    }

    #[test]
    fn test_reset_restores_layout() {
        let mut board = Board::new();
        board.fill_row(20, 3);
        board.set(SPAWN_ROW, 4, Cell::Locked(1));

        board.reset();

        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_merge_overwrites_markers() {
        let mut board = Board::new();
        let square = PieceType::O.template();

        // Square cells sit at shape rows 2..=3, cols 2..=3; anchor row -1 puts them on rows 1..=2
        board.merge(square, -1, 3);

        assert_eq!(board.cell_at(1, 5), Cell::Locked(4));
        assert_eq!(board.cell_at(1, 6), Cell::Locked(4));
        assert_eq!(board.cell_at(2, 5), Cell::Locked(4));
        assert_eq!(board.cell_at(2, 6), Cell::Locked(4));
        assert_eq!(board.cell_at(1, 4), Cell::SpawnMarker);
        assert!(board.is_over());
    }

    #[test]
    fn test_merge_drops_cells_above_board() {
        let mut board = Board::new();
        // Twice-rotated I occupies shape rows 0..=3 in column 2
        let shape = PieceType::I.template().rotated().rotated();

        board.merge(&shape, -1, 3);

        assert_eq!(board.locked_cells().count(), 3);
        assert_eq!(board.cell_at(0, 5), Cell::Locked(0));
        assert_eq!(board.cell_at(2, 5), Cell::Locked(0));
    }

    #[test]
    fn test_collision_ignores_markers_and_empties() {
        let board = Board::new();

        // Fresh I at the spawn anchor crosses the marker row without colliding
        assert!(!board.collides(PieceType::I.template(), -1, 3));
        // Square over the spawn row
        assert!(!board.collides(PieceType::O.template(), -1, 3));
    }

    #[test]
    fn test_collision_with_walls_and_floor() {
        let board = Board::new();
        let bar = PieceType::I.template();

        // Column 2 of the shape on column 0 of the board
        assert!(board.collides(bar, 5, -2));
        // Column 2 of the shape on the right wall
        assert!(board.collides(bar, 5, BOARD_WIDTH as i32 - 3));
        // Bottom cell on the floor row
        assert!(board.collides(bar, BOARD_HEIGHT as i32 - 5, 3));
        // One row higher it rests on the floor
        assert!(!board.collides(bar, BOARD_HEIGHT as i32 - 6, 3));
    }

    #[test]
    fn test_collision_with_locked_cells() {
        let mut board = Board::new();
        board.set(12, 5, Cell::Locked(2));

        let bar = PieceType::I.template();
        // Bar spans rows anchor+1..=anchor+4 in column anchor+2
        assert!(board.collides(bar, 8, 3));
        assert!(board.collides(bar, 11, 3));
        assert!(!board.collides(bar, 7, 3));
        assert!(!board.collides(bar, 8, 4));
    }

    #[test]
    fn test_collision_skips_cells_off_the_board() {
        let board = Board::new();
        let bar = PieceType::I.template();

        // Entirely above the field
        assert!(!board.collides(bar, -6, 3));
        // Partially above: rows -2..=1
        assert!(!board.collides(bar, -3, 3));
    }

    #[test]
    fn test_row_full_only_with_locked_interior() {
        let mut board = Board::new();
        assert!(!board.is_row_full(BOARD_HEIGHT - 1));

        board.fill_row(15, 2);
        assert!(board.is_row_full(15));

        board.set(15, 9, Cell::Empty);
        assert!(!board.is_row_full(15));

        // A locked spawn row still counts as full
        board.fill_row(SPAWN_ROW, 1);
        assert!(board.is_row_full(SPAWN_ROW));
        board.set(SPAWN_ROW, 3, Cell::SpawnMarker);
        assert!(!board.is_row_full(SPAWN_ROW));
    }

    #[test]
    fn test_clear_two_of_five_rows() {
        let mut board = Board::new();
        board.fill_row(5, 1);
        board.fill_row(6, 2);
        board.set(7, 1, Cell::Locked(3));
        board.set(4, 8, Cell::Locked(5));

        let cleared = board.clear_full_rows(5);

        assert_eq!(cleared, 2);
        // Row 7 is untouched, the lone block from row 4 dropped two rows
        assert_eq!(board.cell_at(7, 1), Cell::Locked(3));
        assert_eq!(board.cell_at(6, 8), Cell::Locked(5));
        assert_eq!(board.cell_at(4, 8), Cell::Empty);
        assert!(!board.is_row_full(5));
        assert!(!board.is_row_full(6));
        assert_eq!(board.locked_cells().count(), 2);
    }

    #[test]
    fn test_clear_ignores_rows_outside_window() {
        let mut board = Board::new();
        board.fill_row(12, 1);

        // Window 5..=9 does not include row 12
        assert_eq!(board.clear_full_rows(5), 0);
        assert!(board.is_row_full(12));

        // Window hanging below the floor is clipped
        board.fill_row(20, 1);
        assert_eq!(board.clear_full_rows(18), 1);
        // Row 12 dropped one row
        assert!(board.is_row_full(13));
    }

    #[test]
    fn test_clear_keeps_walls() {
        let mut board = Board::new();
        board.fill_row(20, 6);
        board.clear_full_rows(16);

        for row in 0..BOARD_HEIGHT {
            assert_eq!(board.cell_at(row, 0), Cell::Wall);
            assert_eq!(board.cell_at(row, BOARD_WIDTH - 1), Cell::Wall);
        }
        for col in 0..BOARD_WIDTH {
            assert_eq!(board.cell_at(BOARD_HEIGHT - 1, col), Cell::Wall);
        }
    }

    #[test]
    fn test_spawn_markers_restored_after_clear() {
        let mut board = Board::new();
        board.fill_row(10, 4);

        assert_eq!(board.clear_full_rows(8), 1);

        for col in 1..BOARD_WIDTH - 1 {
            assert_eq!(board.cell_at(SPAWN_ROW, col), Cell::SpawnMarker);
            assert_eq!(board.cell_at(SPAWN_ROW + 1, col), Cell::Empty);
            assert_eq!(board.cell_at(0, col), Cell::Empty);
        }
        assert!(!board.is_over());
    }

    #[test]
    fn test_spawn_row_block_moves_down_on_clear() {
        let mut board = Board::new();
        board.set(SPAWN_ROW, 4, Cell::Locked(3));
        board.fill_row(12, 2);
        assert!(board.is_over());

        assert_eq!(board.clear_full_rows(10), 1);

        // The block fell into row 2 and the spawn row is whole again
        assert_eq!(board.cell_at(SPAWN_ROW + 1, 4), Cell::Locked(3));
        assert_eq!(board.cell_at(SPAWN_ROW + 1, 5), Cell::Empty);
        assert_eq!(board.spawn_markers().count(), BOARD_WIDTH - 2);
        assert!(!board.is_over());
    }

    #[test]
    fn test_spawn_markers_survive_multiple_clears() {
        let mut board = Board::new();
        board.fill_row(17, 1);
        board.fill_row(18, 2);
        board.fill_row(20, 3);

        assert_eq!(board.clear_full_rows(16), 3);

        for col in 1..BOARD_WIDTH - 1 {
            assert_eq!(board.cell_at(SPAWN_ROW, col), Cell::SpawnMarker);
            assert_eq!(board.cell_at(SPAWN_ROW + 1, col), Cell::Empty);
        }
        assert_eq!(board.locked_cells().count(), 0);
    }

    #[test]
    fn test_game_over_detection() {
        let mut board = Board::new();
        assert!(!board.is_over());

        board.set(SPAWN_ROW, 9, Cell::Locked(0));
        assert!(board.is_over());
    }
}
