//! Big-glyph overlays for the start countdown
//!
//! Views draw these over the empty board while the game counts down. Digits
//! are 5x5, "GO" (countdown value 0) is 9x5; every glyph is centred on the
//! board.

use crate::board::CellMask;
use crate::types::{GRID_HEIGHT, GRID_WIDTH};

const THREE: [&str; 5] = [".###.", "....#", "..##.", "....#", ".###."];
const TWO: [&str; 5] = [".###.", "....#", ".###.", ".#...", ".####"];
const ONE: [&str; 5] = ["..#..", ".##..", "..#..", "..#..", ".###."];
const GO: [&str; 5] = [
    ".##...##.",
    "#....#..#",
    "#.##.#..#",
    "#..#.#..#",
    ".###..##.",
];

/// Glyph rows for a countdown value, `None` when no glyph exists
pub fn pattern(value: u8) -> Option<&'static [&'static str]> {
    match value {
        3 => Some(&THREE),
        2 => Some(&TWO),
        1 => Some(&ONE),
        0 => Some(&GO),
        _ => None,
    }
}

/// Board cells lit for `value`, centred on the board
pub fn countdown_mask(value: u8) -> Option<CellMask> {
    let rows = pattern(value)?;
    let height = rows.len() as i8;
    let width = rows.first().map_or(0, |r| r.len()) as i8;
    let start_x = (GRID_WIDTH as i8 - width) / 2;
    let start_y = (GRID_HEIGHT as i8 - height) / 2;

    let mut mask = CellMask::empty();
    for (dy, row) in rows.iter().enumerate() {
        for (dx, byte) in row.bytes().enumerate() {
            if byte == b'#' {
                mask.insert(start_x + dx as i8, start_y + dy as i8);
            }
        }
    }
    Some(mask)
}
