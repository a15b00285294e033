//! Board module - the tile grid for one round
//!
//! Tiles are stored in a flat vector in row-major order (`row * cols + col`).
//! A board is a value: every operation that changes tiles returns a new board
//! and leaves the receiver untouched, so callers (and the bot's hypothetical
//! search) can hold on to earlier snapshots freely.
//!
//! Adjacency is 4-directional. Neighbour lists are produced in a fixed order
//! (up, down, left, right) so that everything built on top of them, such as
//! sequence enumeration order, is deterministic.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Move, Tile};

/// Up to four orthogonal neighbours of a cell
pub type Neighbors = ArrayVec<usize, 4>;

/// Reasons a move cannot be applied to a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("tile index {0} is outside the board")]
    OutOfRange(usize),
    #[error("tile {0} is an obstacle")]
    Obstacle(usize),
    #[error("tile {0} is already revealed")]
    AlreadyRevealed(usize),
    #[error("cannot swap tile {0} with itself")]
    SameTile(usize),
}

impl MoveError {
    pub fn code(self) -> &'static str {
        match self {
            MoveError::OutOfRange(_) => "out_of_range",
            MoveError::Obstacle(_) | MoveError::AlreadyRevealed(_) | MoveError::SameTile(_) => {
                "invalid_move"
            }
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            MoveError::OutOfRange(_) => "tile index is outside the board",
            MoveError::Obstacle(_) => "obstacles cannot be flipped",
            MoveError::AlreadyRevealed(_) => "tile has already been revealed",
            MoveError::SameTile(_) => "a tile cannot be swapped with itself",
        }
    }
}

/// The tile grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<Tile>,
    rows: usize,
    cols: usize,
}

impl Board {
    /// Build a board from tiles in row-major order
    ///
    /// Returns `None` when `tiles.len() != rows * cols`.
    pub fn from_tiles(tiles: Vec<Tile>, rows: usize, cols: usize) -> Option<Self> {
        if tiles.len() != rows * cols {
            return None;
        }
        Some(Self { tiles, rows, cols })
    }

    /// Callers guarantee `tiles.len() == rows * cols`
    pub(crate) fn from_parts(tiles: Vec<Tile>, rows: usize, cols: usize) -> Self {
        debug_assert_eq!(tiles.len(), rows * cols);
        Self { tiles, rows, cols }
    }

    /// Build a fully revealed board from a value grid, `0` marking an obstacle
    ///
    /// Handy for setting up positions by hand.
    pub fn from_values(values: &[i8], rows: usize, cols: usize) -> Option<Self> {
        let tiles = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                if v == 0 {
                    Tile::obstacle(i as u32)
                } else {
                    Tile::revealed(i as u32, v)
                }
            })
            .collect();
        Self::from_tiles(tiles, rows, cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile at `idx`, or `None` when out of range
    pub fn get(&self, idx: usize) -> Option<&Tile> {
        self.tiles.get(idx)
    }

    /// Tile at `(row, col)`, or `None` when out of range
    pub fn at(&self, row: usize, col: usize) -> Option<&Tile> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.tiles.get(row * self.cols + col)
    }

    /// Orthogonal neighbours of `idx` in up, down, left, right order
    pub fn neighbors(&self, idx: usize) -> Neighbors {
        neighbors(idx, self.rows, self.cols)
    }

    /// Indices of hidden, non-obstacle tiles in index order
    pub fn unrevealed_indices(&self) -> Vec<usize> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_playable())
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of revealed, non-obstacle tiles in index order
    pub fn revealed_indices(&self) -> Vec<usize> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_live())
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of obstacle cells
    pub fn obstacle_indices(&self) -> Vec<usize> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_obstacle)
            .map(|(i, _)| i)
            .collect()
    }

    /// True once no hidden tile is left (the round is over)
    pub fn is_fully_revealed(&self) -> bool {
        self.tiles.iter().all(|t| t.is_revealed)
    }

    fn check_playable(&self, idx: usize) -> Result<(), MoveError> {
        match self.tiles.get(idx) {
            None => Err(MoveError::OutOfRange(idx)),
            Some(t) if t.is_obstacle => Err(MoveError::Obstacle(idx)),
            Some(t) if t.is_revealed => Err(MoveError::AlreadyRevealed(idx)),
            Some(_) => Ok(()),
        }
    }

    /// New board with `idx` revealed
    pub fn reveal(&self, idx: usize) -> Result<Board, MoveError> {
        self.check_playable(idx)?;
        let mut next = self.clone();
        next.tiles[idx].is_revealed = true;
        Ok(next)
    }

    /// New board with the tiles at `first` and `second` exchanged and both revealed
    ///
    /// The tile identity travels with the value, as a physical tile would.
    pub fn swap_reveal(&self, first: usize, second: usize) -> Result<Board, MoveError> {
        if first == second {
            return Err(MoveError::SameTile(first));
        }
        self.check_playable(first)?;
        self.check_playable(second)?;

        let mut next = self.clone();
        let a = self.tiles[first];
        let b = self.tiles[second];
        next.tiles[first] = Tile {
            id: b.id,
            value: b.value,
            is_revealed: true,
            is_obstacle: false,
        };
        next.tiles[second] = Tile {
            id: a.id,
            value: a.value,
            is_revealed: true,
            is_obstacle: false,
        };
        Ok(next)
    }

    /// New board with `mv` applied
    pub fn apply_move(&self, mv: Move) -> Result<Board, MoveError> {
        match mv {
            Move::Keep { first } => self.reveal(first),
            Move::Swap { first, second } => self.swap_reveal(first, second),
        }
    }
}

/// Indices revealed by `mv`, i.e. the scoring pivots for that move
pub fn revealed_by(mv: Move) -> ArrayVec<usize, 2> {
    let mut out = ArrayVec::new();
    out.push(mv.first());
    if let Some(second) = mv.second() {
        out.push(second);
    }
    out
}

/// Orthogonal neighbours of `idx` on a `rows x cols` grid
#[inline]
pub fn neighbors(idx: usize, rows: usize, cols: usize) -> Neighbors {
    let mut out = Neighbors::new();
    if cols == 0 || idx >= rows * cols {
        return out;
    }
    let r = idx / cols;
    let c = idx % cols;
    if r > 0 {
        out.push(idx - cols);
    }
    if r + 1 < rows {
        out.push(idx + cols);
    }
    if c > 0 {
        out.push(idx - 1);
    }
    if c + 1 < cols {
        out.push(idx + 1);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hidden_board(values: &[i8], rows: usize, cols: usize) -> Board {
        let tiles = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Tile::hidden(i as u32, v))
            .collect();
        Board::from_tiles(tiles, rows, cols).unwrap()
    }

    #[test]
    fn test_neighbors_corner_edge_center() {
        // 3x4 grid
        assert_eq!(neighbors(0, 3, 4).as_slice(), &[4, 1]);
        assert_eq!(neighbors(3, 3, 4).as_slice(), &[7, 2]);
        assert_eq!(neighbors(5, 3, 4).as_slice(), &[1, 9, 4, 6]);
        assert_eq!(neighbors(11, 3, 4).as_slice(), &[7, 10]);
        assert!(neighbors(12, 3, 4).is_empty());
    }

    #[test]
    fn test_from_tiles_rejects_wrong_length() {
        assert!(Board::from_tiles(vec![Tile::hidden(0, 1)], 2, 2).is_none());
    }

    #[test]
    fn test_from_values_marks_obstacles() {
        let board = Board::from_values(&[1, 0, 3, 4], 2, 2).unwrap();
        assert!(board.get(1).unwrap().is_obstacle);
        assert!(board.get(0).unwrap().is_live());
        assert_eq!(board.obstacle_indices(), vec![1]);
        assert_eq!(board.at(1, 1).unwrap().value, 4);
        assert!(board.at(2, 0).is_none());
    }

    #[test]
    fn test_reveal_returns_new_board() {
        let board = hidden_board(&[1, 2, 3, 4], 2, 2);
        let next = board.reveal(2).unwrap();

        assert!(next.get(2).unwrap().is_revealed);
        assert!(!board.get(2).unwrap().is_revealed);
        assert_eq!(next.unrevealed_indices(), vec![0, 1, 3]);
        assert_eq!(next.revealed_indices(), vec![2]);
    }

    #[test]
    fn test_reveal_rejects_illegal_targets() {
        let board = Board::from_values(&[1, 0, 3, 4], 2, 2).unwrap();
        assert_eq!(board.reveal(9), Err(MoveError::OutOfRange(9)));
        assert_eq!(board.reveal(1), Err(MoveError::Obstacle(1)));
        assert_eq!(board.reveal(0), Err(MoveError::AlreadyRevealed(0)));
    }

    #[test]
    fn test_swap_exchanges_values_and_ids() {
        let board = hidden_board(&[1, 2, 3, 4], 2, 2);
        let next = board.swap_reveal(0, 3).unwrap();

        assert_eq!(next.get(0).unwrap().value, 4);
        assert_eq!(next.get(0).unwrap().id, 3);
        assert_eq!(next.get(3).unwrap().value, 1);
        assert_eq!(next.get(3).unwrap().id, 0);
        assert!(next.get(0).unwrap().is_revealed);
        assert!(next.get(3).unwrap().is_revealed);
        assert_eq!(board.get(0).unwrap().value, 1);
    }

    #[test]
    fn test_swap_with_itself_rejected() {
        let board = hidden_board(&[1, 2, 3, 4], 2, 2);
        let err = board.swap_reveal(1, 1).unwrap_err();
        assert_eq!(err, MoveError::SameTile(1));
        assert_eq!(err.code(), "invalid_move");
    }

    #[test]
    fn test_apply_move_and_revealed_by() {
        let board = hidden_board(&[1, 2, 3, 4], 2, 2);
        let keep = Move::Keep { first: 1 };
        let swap = Move::Swap { first: 0, second: 2 };

        assert_eq!(revealed_by(keep).as_slice(), &[1]);
        assert_eq!(revealed_by(swap).as_slice(), &[0, 2]);

        let after = board.apply_move(keep).unwrap().apply_move(swap).unwrap();
        assert_eq!(after.unrevealed_indices(), vec![3]);
        assert!(!after.is_fully_revealed());
        assert!(after.reveal(3).unwrap().is_fully_revealed());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(MoveError::OutOfRange(1).code(), "out_of_range");
        assert_eq!(MoveError::Obstacle(1).code(), "invalid_move");
        assert!(!MoveError::AlreadyRevealed(1).message().is_empty());
    }
}
