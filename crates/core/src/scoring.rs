//! Scoring module - word points and the combo multiplier
//!
//! Rules:
//! - Each kept word is worth `len * LETTER_POINTS`.
//! - A lock that clears words raises the combo by the number of kept words,
//!   then the summed points are multiplied by the new combo value.
//! - A lock that clears nothing resets the combo to zero and scores nothing.

use crate::types::LETTER_POINTS;

/// Score calculation result for one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Letter points before the combo multiplier
    pub points: u32,
    /// Combo counter after this lock
    pub combo: u32,
    /// Amount added to the score
    pub total: u32,
}

/// Points for a single word of `len` letters
pub fn word_points(len: usize) -> u32 {
    (len as u32).saturating_mul(LETTER_POINTS)
}

/// Calculate the score for one lock.
///
/// `word_lens`: lengths of the words kept after deduplication.
/// `combo_before`: combo counter before this lock.
pub fn calculate_score<I>(word_lens: I, combo_before: u32) -> ScoreResult
where
    I: IntoIterator<Item = usize>,
{
    let mut words = 0u32;
    let mut points = 0u32;
    for len in word_lens {
        words += 1;
        points = points.saturating_add(word_points(len));
    }

    if words == 0 {
        return ScoreResult::default();
    }

    let combo = combo_before.saturating_add(words);
    ScoreResult {
        points,
        combo,
        total: points.saturating_mul(combo),
    }
}
