//! Word resolver - finds, deduplicates and scores words on the board
//!
//! Resolution runs after every lock:
//!
//! 1. Every row and column is split into runs of occupied cells.
//! 2. Every substring of at least [`MIN_WORD_LEN`] letters inside a run is read
//!    forward and backward; readings found in the dictionary become candidates.
//! 3. Candidates are sorted longest first and a candidate is dropped when its
//!    span lies inside a span that was already kept on the same line, so `CART`
//!    never scores alongside the `CARTS` that contains it.
//! 4. The kept spans form the clear-set and feed the score formula.
//!
//! Horizontal and vertical words are independent: one placement can complete
//! both and both are scored.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::board::{Board, CellMask};
use crate::dictionary::Dictionary;
use crate::scoring::calculate_score;
use crate::types::{Cell, GRID_HEIGHT, GRID_WIDTH, MIN_WORD_LEN};

const LINE_MAX: usize = if GRID_WIDTH > GRID_HEIGHT {
    GRID_WIDTH as usize
} else {
    GRID_HEIGHT as usize
};

/// Upper bound on runs in one line (letters separated by single gaps)
const MAX_RUNS: usize = LINE_MAX.div_ceil(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A dictionary word found on the board
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WordMatch {
    /// The word as the dictionary spells it, uppercase
    pub word: String,
    pub orientation: Orientation,
    /// Row for horizontal words, column for vertical ones
    pub line: u8,
    /// Leftmost (or topmost) cell of the span
    pub start: u8,
    pub len: u8,
    /// The board spells the word right-to-left (or bottom-to-top)
    pub reversed: bool,
}

impl WordMatch {
    /// Board cells covered by the word
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (self.start..self.start + self.len).map(move |i| match self.orientation {
            Orientation::Horizontal => (i as i8, self.line as i8),
            Orientation::Vertical => (self.line as i8, i as i8),
        })
    }

    /// Whether this span lies entirely inside `other`'s span.
    ///
    /// Only spans on the same line nest; the same word spelled on another
    /// row or column is kept and scored again.
    pub fn is_within(&self, other: &WordMatch) -> bool {
        self.orientation == other.orientation
            && self.line == other.line
            && other.start <= self.start
            && self.start + self.len <= other.start + other.len
    }
}

/// Outcome of resolving one lock
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Kept words, longest first
    pub words: Vec<WordMatch>,
    /// Union of the kept spans
    pub cleared: CellMask,
    pub points: u32,
    pub combo: u32,
    pub score_delta: u32,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Maximal runs of occupied cells as `(start, len)`
fn runs(line: &[Cell]) -> ArrayVec<(usize, usize), MAX_RUNS> {
    let mut out = ArrayVec::new();
    let mut start = None;
    for (i, cell) in line.iter().enumerate() {
        match (cell.is_some(), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                out.push((s, i - s));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push((s, line.len() - s));
    }
    out
}

fn scan_line(
    line: &[Cell],
    orientation: Orientation,
    index: u8,
    dict: &dyn Dictionary,
    out: &mut Vec<WordMatch>,
) {
    for (run_start, run_len) in runs(line) {
        if run_len < MIN_WORD_LEN {
            continue;
        }
        let run_end = run_start + run_len;
        for start in run_start..run_end {
            for end in (start + MIN_WORD_LEN)..=run_end {
                let forward: String = line[start..end]
                    .iter()
                    .flatten()
                    .map(|letter| letter.to_lowercase())
                    .collect();

                let reading = if dict.contains(&forward) {
                    Some((forward, false))
                } else {
                    let backward: String = forward.chars().rev().collect();
                    dict.contains(&backward).then_some((backward, true))
                };

                if let Some((text, reversed)) = reading {
                    out.push(WordMatch {
                        word: text.to_uppercase(),
                        orientation,
                        line: index,
                        start: start as u8,
                        len: (end - start) as u8,
                        reversed,
                    });
                }
            }
        }
    }
}

/// Every dictionary reading on the board, before deduplication.
///
/// Rows are scanned top to bottom, then columns left to right.
pub fn find_candidates(board: &Board, dict: &dyn Dictionary) -> Vec<WordMatch> {
    let mut out = Vec::new();
    if dict.is_empty() {
        return out;
    }
    for y in 0..GRID_HEIGHT {
        scan_line(&board.row(y), Orientation::Horizontal, y, dict, &mut out);
    }
    for x in 0..GRID_WIDTH {
        scan_line(&board.column(x), Orientation::Vertical, x, dict, &mut out);
    }
    out
}

/// Keep the longest candidates, dropping any nested inside a kept one.
///
/// The sort is stable, so equal-length candidates keep scan order.
pub fn dedup(mut candidates: Vec<WordMatch>) -> Vec<WordMatch> {
    candidates.sort_by(|a, b| b.len.cmp(&a.len));
    let mut kept: Vec<WordMatch> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !kept.iter().any(|k| candidate.is_within(k)) {
            kept.push(candidate);
        }
    }
    kept
}

/// Deduplicated words on the board
pub fn find_words(board: &Board, dict: &dyn Dictionary) -> Vec<WordMatch> {
    dedup(find_candidates(board, dict))
}

/// Find words, build the clear-set and score them against `combo_before`
pub fn resolve(board: &Board, dict: &dyn Dictionary, combo_before: u32) -> Resolution {
    let words = find_words(board, dict);
    let cleared = words
        .iter()
        .flat_map(|w| w.cells())
        .collect::<CellMask>();
    let score = calculate_score(words.iter().map(|w| w.len as usize), combo_before);

    Resolution {
        words,
        cleared,
        points: score.points,
        combo: score.combo,
        score_delta: score.total,
    }
}
