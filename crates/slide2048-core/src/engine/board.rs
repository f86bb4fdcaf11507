use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Board edge length. The game is fixed at 4x4.
pub const SIZE: usize = 4;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions, in a fixed order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

/// 4x4 grid of tile values, row-major. A cell is 0 (empty) or a power of
/// two >= 2.
///
/// `Board` is a plain value: operations return a new board instead of
/// mutating in place, and equality is cell-by-cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board([[u32; SIZE]; SIZE]);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board([[0; SIZE]; SIZE]);

    /// Construct a `Board` from explicit rows.
    #[inline]
    pub fn from_rows(rows: [[u32; SIZE]; SIZE]) -> Self {
        Board(rows)
    }

    /// Borrow the rows of this board.
    #[inline]
    pub fn rows(&self) -> &[[u32; SIZE]; SIZE] {
        &self.0
    }

    /// Value of the cell at (row, col); 0 means empty.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.0[row][col]
    }

    /// Return the board resulting from sliding/merging tiles in `dir`
    /// (no random insert).
    ///
    /// ```
    /// use slide2048_core::{Board, Move};
    /// let b = Board::from_rows([[2, 2, 2, 0], [0; 4], [0; 4], [0; 4]]);
    /// assert_eq!(b.shift(Move::Left).rows()[0], [4, 2, 0, 0]);
    /// ```
    pub fn shift(self, dir: Move) -> Self {
        match dir {
            Move::Left => self.map_rows(collapse_line),
            Move::Right => self.map_rows(|line| reversed(collapse_line(reversed(line)))),
            // Columns are rows of the transpose.
            Move::Up => self.transposed().shift(Move::Left).transposed(),
            Move::Down => self.transposed().shift(Move::Right).transposed(),
        }
    }

    /// True if shifting in `dir` would change the board.
    ///
    /// Derived from `shift` rather than maintained as a separate adjacency
    /// scan, so the predicate and the move can never disagree.
    #[inline]
    pub fn can_move(self, dir: Move) -> bool {
        self.shift(dir) != self
    }

    /// True if at least one direction can move.
    #[inline]
    pub fn has_moves(self) -> bool {
        Move::ALL.iter().any(|&dir| self.can_move(dir))
    }

    /// Return the largest tile value on the board (0 if empty).
    ///
    /// Display-only: the renderer sizes cells by this value's digit count.
    pub fn max_tile(self) -> u32 {
        self.0.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Count the number of empty cells.
    pub fn count_empty(self) -> usize {
        self.0.iter().flatten().filter(|&&v| v == 0).count()
    }

    /// All empty cell positions as (row, col), row-major.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for (i, row) in self.0.iter().enumerate() {
            for (j, &val) in row.iter().enumerate() {
                if val == 0 {
                    cells.push((i, j));
                }
            }
        }
        cells
    }

    /// Insert a random 2 (8/10) or 4 (2/10) tile into a uniformly chosen
    /// empty cell, using the provided RNG. Returns `None` when the board is
    /// full; callers treat that as "board full", not an error.
    ///
    /// Deterministic example using a seeded RNG:
    /// ```
    /// use slide2048_core::Board;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let b = Board::EMPTY.with_random_tile(&mut rng).unwrap();
    /// assert_eq!(b.count_empty(), 15);
    /// ```
    pub fn with_random_tile<R: Rng + ?Sized>(self, rng: &mut R) -> Option<Self> {
        // Value is drawn before the position.
        let value = generate_random_tile(rng);
        let empty = self.empty_cells();
        if empty.is_empty() {
            return None;
        }
        let (row, col) = empty[rng.gen_range(0..empty.len())];
        let mut next = self;
        next.0[row][col] = value;
        Some(next)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.0 {
            for &val in row {
                write!(f, "{:>6}", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Board {
    fn map_rows(self, f: impl Fn([u32; SIZE]) -> [u32; SIZE]) -> Self {
        let mut out = self;
        for row in out.0.iter_mut() {
            *row = f(*row);
        }
        out
    }

    fn transposed(self) -> Self {
        let mut out = Board::EMPTY;
        for i in 0..SIZE {
            for j in 0..SIZE {
                out.0[j][i] = self.0[i][j];
            }
        }
        out
    }
}

/// Slide-and-merge one line toward index 0.
///
/// Write-cursor pass: non-zero values are compacted in travel order; a value
/// merges into the previously written cell only when equal and that cell has
/// not already absorbed a merge this pass. Nearest-to-edge tiles merge
/// first, so `[2,2,2,0]` becomes `[4,2,0,0]`.
fn collapse_line(line: [u32; SIZE]) -> [u32; SIZE] {
    let mut out = [0u32; SIZE];
    let mut write = 0;
    let mut just_merged = false;
    for val in line.into_iter().filter(|&v| v != 0) {
        if write > 0 && !just_merged && out[write - 1] == val {
            out[write - 1] *= 2;
            just_merged = true;
        } else {
            out[write] = val;
            write += 1;
            just_merged = false;
        }
    }
    out
}

fn reversed(mut line: [u32; SIZE]) -> [u32; SIZE] {
    line.reverse();
    line
}

fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    if rng.gen_range(0..10) < 2 {
        4
    } else {
        2
    }
}
