//! Board configurations and move generation.
//!
//! A [`Board`] is a validated arrangement of the tiles 0-8 (0 is the blank).
//! Boards are plain values: applying a move returns a new board and never
//! mutates the original.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::grid::{format_board, format_tiles, idx_to_pos, pos_to_idx, Position, CELLS, DIM};

/// A direction the blank tile can slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All moves in canonical successor order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// The `(row, col)` offset of this move.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub const fn opposite(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// Where a blank at `(row, col)` lands after this move.
    ///
    /// Returns `None` if that cell is off the board.
    #[inline]
    pub fn target(self, (row, col): Position) -> Option<Position> {
        let (row_offset, col_offset) = self.offset();
        let new_row = row.checked_add_signed(row_offset)?;
        let new_col = col.checked_add_signed(col_offset)?;
        (new_row < DIM && new_col < DIM).then_some((new_row, new_col))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", name)
    }
}

/// Moves that keep the blank on the board when it sits at `blank`.
///
/// Yields in canonical order. Corners have 2, edges 3 and the center 4.
pub fn legal_moves(blank: Position) -> impl Iterator<Item = Move> {
    Move::ALL
        .into_iter()
        .filter(move |mv| mv.target(blank).is_some())
}

/// One arrangement of the 3x3 puzzle.
///
/// Equality and hashing are by tile values, so boards can key the
/// search's visited map directly.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Tiles in column-major order.
    tiles: [u8; CELLS],
    /// Flat index of the blank, cached at construction.
    blank: u8,
}

impl Board {
    /// The solved arrangement: 1-8 read across rows, blank bottom-right.
    pub const GOAL: Board = Board {
        tiles: [1, 4, 7, 2, 5, 8, 3, 6, 0],
        blank: 8,
    };

    /// Validates tiles and builds a board.
    ///
    /// Every tile must be in 0-8, the blank must be present and no tile may
    /// repeat.
    pub fn new(tiles: [u8; CELLS]) -> Result<Self> {
        for (position, &tile) in tiles.iter().enumerate() {
            if tile as usize >= CELLS {
                return Err(Error::TileOutOfRange {
                    tile: tile.into(),
                    position,
                });
            }
        }

        let blank = tiles
            .iter()
            .position(|&tile| tile == 0)
            .ok_or(Error::MissingBlank)?;

        let mut seen = [false; CELLS];
        for &tile in &tiles {
            if seen[tile as usize] {
                return Err(Error::DuplicateTile { tile });
            }
            seen[tile as usize] = true;
        }

        Ok(Self {
            tiles,
            blank: blank as u8,
        })
    }

    /// Like [`Board::new`], but also checks the length.
    pub fn from_slice(tiles: &[u8]) -> Result<Self> {
        let tiles: [u8; CELLS] = tiles.try_into().map_err(|_| Error::WrongLength {
            expected: CELLS,
            got: tiles.len(),
        })?;
        Self::new(tiles)
    }

    /// Tiles in column-major order.
    #[inline]
    pub fn tiles(&self) -> &[u8; CELLS] {
        &self.tiles
    }

    #[inline]
    pub fn tile_at(&self, pos: Position) -> u8 {
        self.tiles[pos_to_idx(pos)]
    }

    /// Position of the blank tile.
    #[inline]
    pub fn locate_blank(&self) -> Position {
        idx_to_pos(self.blank as usize)
    }

    /// Moves available from this board, in canonical order.
    pub fn legal_moves(&self) -> impl Iterator<Item = Move> {
        legal_moves(self.locate_blank())
    }

    /// Slides the blank one cell in direction `mv`.
    ///
    /// Returns `None` if the move would leave the board.
    pub fn apply_move(&self, mv: Move) -> Option<Board> {
        let target = pos_to_idx(mv.target(self.locate_blank())?);
        let mut tiles = self.tiles;
        tiles.swap(self.blank as usize, target);
        Some(Board {
            tiles,
            blank: target as u8,
        })
    }

    /// Every board one move away, paired with the move that reaches it.
    pub fn successors_with_moves(&self) -> impl Iterator<Item = (Move, Board)> + '_ {
        self.legal_moves()
            .filter_map(move |mv| self.apply_move(mv).map(|next| (mv, next)))
    }

    /// Every board one move away, in canonical move order.
    pub fn successors(&self) -> impl Iterator<Item = Board> + '_ {
        self.successors_with_moves().map(|(_, next)| next)
    }

    /// The tiles as a space-separated line.
    pub fn to_line(&self) -> String {
        format_tiles(&self.tiles)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_line())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_board(&self.tiles))
    }
}

impl TryFrom<&[u8]> for Board {
    type Error = Error;

    fn try_from(tiles: &[u8]) -> Result<Self> {
        Board::from_slice(tiles)
    }
}

/// Parses tiles separated by whitespace and/or commas, e.g. `"1 4 7 0 2 8 3 5 6"`.
impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut tiles = Vec::with_capacity(CELLS);

        for (position, token) in s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .enumerate()
        {
            let value: u32 = token.parse().map_err(|_| Error::InvalidToken {
                token: token.to_string(),
            })?;
            let tile = u8::try_from(value)
                .ok()
                .filter(|&tile| (tile as usize) < CELLS)
                .ok_or(Error::TileOutOfRange {
                    tile: value,
                    position,
                })?;
            tiles.push(tile);
        }

        Board::from_slice(&tiles)
    }
}
