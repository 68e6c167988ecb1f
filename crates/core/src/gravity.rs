//! Gravity - post-clear compaction
//!
//! After a word clear, every column is repacked independently: the letters that
//! remain slide down to the bottom rows keeping their top-to-bottom order, and the
//! vacated rows at the top of the column become empty.

use crate::board::Board;
use crate::types::{GRID_HEIGHT, GRID_WIDTH};

/// Compact one column in place. Returns how many letters moved.
///
/// Uses the same two-pointer walk as a line clear: scan from the bottom,
/// copy each letter down to the write position, then blank what is left above.
pub fn compact_column(board: &mut Board, x: i8) -> u32 {
    let mut write_y = GRID_HEIGHT as i8;
    let mut moved = 0;

    for read_y in (0..GRID_HEIGHT as i8).rev() {
        let Some(Some(letter)) = board.get(x, read_y) else {
            continue;
        };
        write_y -= 1;
        if write_y != read_y {
            board.set(x, write_y, Some(letter));
            board.set(x, read_y, None);
            moved += 1;
        }
    }

    for y in 0..write_y {
        board.set(x, y, None);
    }

    moved
}

/// Compact every column. Returns how many letters moved in total.
pub fn apply(board: &mut Board) -> u32 {
    (0..GRID_WIDTH as i8).map(|x| compact_column(board, x)).sum()
}

/// Whether any letter has an empty cell directly beneath it
pub fn has_gaps(board: &Board) -> bool {
    (0..GRID_WIDTH as i8).any(|x| {
        (0..GRID_HEIGHT as i8 - 1).any(|y| board.is_occupied(x, y) && board.is_valid(x, y + 1))
    })
}
