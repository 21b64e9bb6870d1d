use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};
use std::{fmt, ops::Index, str::FromStr};
use thiserror::Error;

use crate::solvability;

/// Direction the blank slides in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Right,
    Left,
}

impl Move {
    /// Order in which successors are generated. Depth-first tie-breaking
    /// depends on it, so it never changes between runs.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Right, Move::Left];

    /// `(row, col)` offset applied to the blank.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Right => (0, 1),
            Move::Left => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Right => "Right",
            Move::Left => "Left",
        };
        write!(f, "{}", s)
    }
}

/// Reasons a tile arrangement is rejected before any search starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("board has no tiles")]
    EmptyBoard,
    #[error("row {row} has {found} tiles, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("expected {expected} tiles, found {found}")]
    WrongTileCount { expected: usize, found: usize },
    #[error("tile {value} is out of range, expected 0..={max}")]
    TileOutOfRange { value: u32, max: u32 },
    #[error("tile {0} appears more than once")]
    DuplicateTile(u32),
    #[error("a {0}x{0} board does not fit the tile range")]
    TooLarge(usize),
    #[error("cannot parse board: {0}")]
    Parse(String),
}

/// Collision-free key for a tile arrangement of a fixed size.
///
/// Each tile is packed into the smallest bit width that holds `N² - 1`, so a
/// 3x3 or 4x4 board fits in a single word.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(Box<[u64]>);

impl Fingerprint {
    fn pack(tiles: &[u32]) -> Self {
        let bits = bits_per_tile(tiles.len());
        let per_word = (u64::BITS / bits) as usize;
        let words = tiles
            .chunks(per_word)
            .map(|chunk| {
                chunk
                    .iter()
                    .fold(0u64, |word, &tile| (word << bits) | u64::from(tile))
            })
            .collect();
        Fingerprint(words)
    }
}

fn bits_per_tile(cells: usize) -> u32 {
    (usize::BITS - cells.saturating_sub(1).leading_zeros()).max(1)
}

/// An N×N arrangement of the tiles `0..N²`, with `0` as the blank.
///
/// Every `Board` that exists has passed validation, so the blank is always
/// present and every value appears exactly once.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    tiles: Vec<u32>,
    blank: usize,
}

impl Board {
    /// The goal arrangement: tile `v` at row-major index `v`, blank first.
    pub fn solved(size: usize) -> Result<Self, PuzzleError> {
        let cells = cell_count(size)?;
        Self::from_flat(size, (0..cells as u32).collect())
    }

    /// Builds a board from row-major tiles, rejecting anything that is not a
    /// permutation of `0..size²`.
    pub fn from_flat(size: usize, tiles: Vec<u32>) -> Result<Self, PuzzleError> {
        let cells = cell_count(size)?;
        if tiles.len() != cells {
            return Err(PuzzleError::WrongTileCount {
                expected: cells,
                found: tiles.len(),
            });
        }

        let max = (cells - 1) as u32;
        let mut seen = vec![false; cells];
        for &value in &tiles {
            if value > max {
                return Err(PuzzleError::TileOutOfRange { value, max });
            }
            if std::mem::replace(&mut seen[value as usize], true) {
                return Err(PuzzleError::DuplicateTile(value));
            }
        }

        // A permutation of 0..cells always contains the blank.
        let blank = tiles.iter().position(|&t| t == 0).unwrap_or_default();
        Ok(Self { size, tiles, blank })
    }

    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self, PuzzleError> {
        let size = rows.len();
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != size)
        {
            return Err(PuzzleError::NotSquare {
                row,
                expected: size,
                found,
            });
        }
        Self::from_flat(size, rows.into_iter().flatten().collect())
    }

    /// A uniformly random solvable board, rerolling unsolvable shuffles.
    pub fn shuffled<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self, PuzzleError> {
        let mut board = Self::solved(size)?;
        loop {
            board.tiles.shuffle(rng);
            board.blank = board.tiles.iter().position(|&t| t == 0).unwrap_or_default();
            if board.is_solvable() {
                return Ok(board);
            }
        }
    }

    /// Walks the blank `steps` random moves away from the goal, never undoing
    /// the previous move. The result is solvable in at most `steps` moves.
    pub fn scrambled<R: Rng + ?Sized>(
        size: usize,
        steps: usize,
        rng: &mut R,
    ) -> Result<Self, PuzzleError> {
        let mut board = Self::solved(size)?;
        let mut last: Option<Move> = None;
        for _ in 0..steps {
            let candidates = Move::ALL
                .iter()
                .copied()
                .filter(|&mv| last != Some(mv.opposite()))
                .filter_map(|mv| board.apply_move(mv).map(|next| (mv, next)))
                .collect_vec();
            match candidates.choose(rng) {
                Some((mv, next)) => {
                    last = Some(*mv);
                    board = next.clone();
                }
                None => break,
            }
        }
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major tiles.
    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> + '_ {
        self.tiles.chunks(self.size)
    }

    /// `(row, col)` of the blank.
    pub fn blank(&self) -> (usize, usize) {
        (self.blank / self.size, self.blank % self.size)
    }

    /// `(row, col)` of `value`, or `None` if it is not a tile of this board.
    pub fn locate(&self, value: u32) -> Option<(usize, usize)> {
        self.tiles
            .iter()
            .position(|&t| t == value)
            .map(|index| (index / self.size, index % self.size))
    }

    /// Sum of Manhattan distances of every non-blank tile from its goal cell.
    pub fn heuristic(&self) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value != 0)
            .map(|(index, &value)| {
                let target = value as usize;
                (index / self.size).abs_diff(target / self.size)
                    + (index % self.size).abs_diff(target % self.size)
            })
            .sum()
    }

    pub fn is_goal(&self) -> bool {
        self.tiles
            .iter()
            .enumerate()
            .all(|(index, &value)| value as usize == index)
    }

    pub fn is_solvable(&self) -> bool {
        solvability::is_solvable(&self.tiles, self.size)
    }

    /// Slides the blank one cell, returning the new board, or `None` if the
    /// blank already sits on that edge.
    pub fn apply_move(&self, movement: Move) -> Option<Board> {
        let (dr, dc) = movement.as_offset();
        let (row, col) = self.blank();

        let new_row = row as isize + dr;
        let new_col = col as isize + dc;
        let bound = self.size as isize;
        if new_row < 0 || new_row >= bound || new_col < 0 || new_col >= bound {
            return None;
        }

        let target = new_row as usize * self.size + new_col as usize;
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);
        Some(Board {
            size: self.size,
            tiles,
            blank: target,
        })
    }

    /// Applies `moves` in order; `None` if any of them leaves the grid.
    pub fn replay<'a, I>(&self, moves: I) -> Option<Board>
    where
        I: IntoIterator<Item = &'a Move>,
    {
        moves
            .into_iter()
            .try_fold(self.clone(), |board, &mv| board.apply_move(mv))
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::pack(&self.tiles)
    }
}

fn cell_count(size: usize) -> Result<usize, PuzzleError> {
    if size == 0 {
        return Err(PuzzleError::EmptyBoard);
    }
    size.checked_mul(size)
        .filter(|&cells| cells - 1 <= u32::MAX as usize)
        .ok_or(PuzzleError::TooLarge(size))
}

impl Index<(usize, usize)> for Board {
    type Output = u32;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.tiles[row * self.size + col]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.tiles.len() - 1).to_string().len();
        for row in self.rows() {
            for &val in row {
                write!(f, "{:width$} ", val, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses rows separated by `;` or newlines, with tiles separated by commas
/// or whitespace, e.g. `"3,4,0; 1,7,6; 5,2,8"`.
impl FromStr for Board {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .split(|c: char| c == ';' || c == '\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|token| !token.is_empty())
                    .map(|token| {
                        token
                            .parse::<u32>()
                            .map_err(|e| PuzzleError::Parse(format!("{token:?}: {e}")))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(rows)
    }
}
