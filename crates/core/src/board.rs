//! Board module - manages the letter grid
//!
//! The board is a 9x9 grid where each cell is either empty or holds one letter.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..8 (left to right), y ranges 0..8 (top to bottom).
//! New tiles spawn at (4, 0).

use serde::{Serialize, Serializer};

use crate::types::{Cell, Letter, GRID_HEIGHT, GRID_WIDTH, SPAWN_X, SPAWN_Y};

/// Total number of cells on the board
pub const BOARD_SIZE: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

/// The game board - 9 columns x 9 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Build a board from text rows, top row first.
    ///
    /// Letters fill cells, `.` or space leaves them empty. Missing rows are
    /// padded at the top so short fixtures sit on the floor; rows shorter than
    /// the board are padded on the right.
    ///
    /// ```
    /// use fallter_core::Board;
    ///
    /// let board = Board::from_rows(&["CARTS"]);
    /// assert!(board.is_occupied(0, 8));
    /// assert!(!board.is_occupied(5, 8));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let height = GRID_HEIGHT as usize;
        let offset = height.saturating_sub(rows.len());
        for (i, row) in rows.iter().take(height).enumerate() {
            let y = (offset + i) as i8;
            for (x, ch) in row.chars().take(GRID_WIDTH as usize).enumerate() {
                board.set(x as i8, y, Letter::from_char(ch));
            }
        }
        board
    }

    /// Render rows as text (`.` for empty), top row first
    pub fn to_rows(&self) -> Vec<String> {
        (0..GRID_HEIGHT as i8)
            .map(|y| {
                (0..GRID_WIDTH as i8)
                    .map(|x| match self.get(x, y).flatten() {
                        Some(letter) => letter.as_char(),
                        None => '.',
                    })
                    .collect()
            })
            .collect()
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (GRID_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid for a tile (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Lowest row a tile at (x, y) can fall to in its column.
    ///
    /// Returns `y` itself when the cell below is blocked.
    pub fn drop_target(&self, x: i8, y: i8) -> i8 {
        let mut target = y;
        while self.is_valid(x, target + 1) {
            target += 1;
        }
        target
    }

    /// Write a letter into an empty cell.
    /// Returns false if the cell is out of bounds or already occupied.
    pub fn lock_letter(&mut self, x: i8, y: i8, letter: Letter) -> bool {
        if !self.is_valid(x, y) {
            return false;
        }
        self.set(x, y, Some(letter))
    }

    /// Empty every cell in `mask`, returning how many letters were removed
    pub fn clear_cells(&mut self, mask: &CellMask) -> u32 {
        let mut removed = 0;
        for (x, y) in mask.iter() {
            if self.is_occupied(x, y) {
                self.set(x, y, None);
                removed += 1;
            }
        }
        removed
    }

    /// Check if the spawn cell is blocked (game over condition)
    pub fn is_spawn_blocked(&self) -> bool {
        !self.is_valid(SPAWN_X as i8, SPAWN_Y as i8)
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: u8) -> [Cell; GRID_WIDTH as usize] {
        let mut out = [None; GRID_WIDTH as usize];
        for (x, cell) in out.iter_mut().enumerate() {
            *cell = self.get(x as i8, y as i8).flatten();
        }
        out
    }

    /// Cells of column `x`, top to bottom
    pub fn column(&self, x: u8) -> [Cell; GRID_HEIGHT as usize] {
        let mut out = [None; GRID_HEIGHT as usize];
        for (y, cell) in out.iter_mut().enumerate() {
            *cell = self.get(x as i8, y as i8).flatten();
        }
        out
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the board into a row-major 2D grid (for snapshots)
    pub fn write_grid(&self, out: &mut [[Cell; GRID_WIDTH as usize]; GRID_HEIGHT as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            let start = y * GRID_WIDTH as usize;
            row.copy_from_slice(&self.cells[start..start + GRID_WIDTH as usize]);
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// A set of board coordinates, one bit per cell.
///
/// 81 cells fit in a `u128`, so the set is `Copy` and never allocates.
/// Serialized as a list of `[x, y]` pairs in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellMask(u128);

impl CellMask {
    pub const fn empty() -> Self {
        Self(0)
    }

    fn bit(x: i8, y: i8) -> Option<u128> {
        Board::index(x, y).map(|idx| 1u128 << idx)
    }

    /// Add a cell. Out-of-range coordinates are ignored and return false.
    pub fn insert(&mut self, x: i8, y: i8) -> bool {
        match Self::bit(x, y) {
            Some(bit) => {
                self.0 |= bit;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, x: i8, y: i8) -> bool {
        Self::bit(x, y).is_some_and(|bit| self.0 & bit != 0)
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let width = GRID_WIDTH as usize;
        (0..BOARD_SIZE)
            .filter(move |idx| self.0 & (1u128 << idx) != 0)
            .map(move |idx| ((idx % width) as i8, (idx / width) as i8))
    }
}

impl Serialize for CellMask {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl FromIterator<(i8, i8)> for CellMask {
    fn from_iter<T: IntoIterator<Item = (i8, i8)>>(iter: T) -> Self {
        let mut mask = CellMask::empty();
        for (x, y) in iter {
            mask.insert(x, y);
        }
        mask
    }
}
