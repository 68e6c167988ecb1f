//! RNG module - frequency-weighted letter generation
//!
//! Letters are drawn with English letter frequencies. To avoid repetitive runs,
//! the generator remembers the last two letters it produced and scales their
//! weight by 0.3 per occurrence before sampling.
//!
//! Also provides a simple LCG so a seed fully determines the letter sequence.

use arrayvec::ArrayVec;

use crate::types::{Letter, MAX_QUEUE_LEN, RECENT_PENALTY, RECENT_WINDOW};

/// English letter frequencies (percent), most common first.
///
/// The order doubles as the cumulative sampling order.
pub const LETTER_FREQUENCIES: [(char, f64); 26] = [
    ('E', 12.02),
    ('T', 9.10),
    ('A', 8.12),
    ('O', 7.68),
    ('I', 7.31),
    ('N', 6.95),
    ('S', 6.28),
    ('R', 6.02),
    ('H', 5.92),
    ('D', 4.32),
    ('L', 3.98),
    ('U', 2.88),
    ('C', 2.71),
    ('M', 2.61),
    ('F', 2.30),
    ('Y', 2.11),
    ('W', 2.09),
    ('G', 2.03),
    ('P', 1.82),
    ('B', 1.49),
    ('V', 1.11),
    ('K', 0.69),
    ('X', 0.17),
    ('Q', 0.11),
    ('J', 0.10),
    ('Z', 0.07),
];

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform value in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Frequency-weighted letter source with a short anti-repeat memory
#[derive(Debug, Clone)]
pub struct LetterGenerator {
    rng: SimpleRng,
    /// Most recent first
    recent: ArrayVec<Letter, RECENT_WINDOW>,
}

impl LetterGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            recent: ArrayVec::new(),
        }
    }

    /// Sampling weights after applying the recent-letter penalty, in
    /// [`LETTER_FREQUENCIES`] order.
    pub fn weights(&self) -> [(Letter, f64); 26] {
        let mut out = [(Letter::E, 0.0); 26];
        for (slot, &(ch, freq)) in out.iter_mut().zip(LETTER_FREQUENCIES.iter()) {
            let letter = Letter::from_char(ch).unwrap_or(Letter::E);
            let hits = self.recent.iter().filter(|&&r| r == letter).count() as i32;
            *slot = (letter, freq * RECENT_PENALTY.powi(hits));
        }
        out
    }

    /// Draw the next letter
    pub fn next(&mut self) -> Letter {
        let weights = self.weights();
        let total: f64 = weights.iter().map(|(_, w)| w).sum();

        let mut remaining = self.rng.next_f64() * total;
        // Rounding can leave the cumulative walk short; fall back to the most common letter.
        let mut selected = Letter::E;
        for (letter, weight) in weights {
            remaining -= weight;
            if remaining <= 0.0 {
                selected = letter;
                break;
            }
        }

        if self.recent.is_full() {
            self.recent.pop();
        }
        self.recent.insert(0, selected);
        selected
    }

    /// Letters currently down-weighted, most recent first
    pub fn recent(&self) -> &[Letter] {
        &self.recent
    }

    /// Current RNG state (seeding a new game from it continues the sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

/// Fixed-length queue of upcoming letters
///
/// Consuming the head appends one freshly generated letter, so the length
/// never changes.
#[derive(Debug, Clone)]
pub struct LetterQueue {
    letters: ArrayVec<Letter, MAX_QUEUE_LEN>,
    generator: LetterGenerator,
}

impl LetterQueue {
    /// Create a queue of `len` letters (clamped to 1..=MAX_QUEUE_LEN)
    pub fn new(seed: u32, len: usize) -> Self {
        let mut queue = Self {
            letters: ArrayVec::new(),
            generator: LetterGenerator::new(seed),
        };
        queue.refill(len);
        queue
    }

    fn refill(&mut self, len: usize) {
        let len = len.clamp(1, MAX_QUEUE_LEN);
        self.letters.clear();
        while self.letters.len() < len {
            let letter = self.generator.next();
            self.letters.push(letter);
        }
    }

    /// All upcoming letters, next first
    pub fn upcoming(&self) -> &[Letter] {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Take the head and replenish the tail
    pub fn draw(&mut self) -> Letter {
        let head = self.letters.remove(0);
        let letter = self.generator.next();
        self.letters.push(letter);
        head
    }

    pub fn generator(&self) -> &LetterGenerator {
        &self.generator
    }

    pub fn seed(&self) -> u32 {
        self.generator.seed()
    }
}

impl Default for LetterQueue {
    fn default() -> Self {
        Self::new(1, crate::types::QUEUE_LEN)
    }
}
