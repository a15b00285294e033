//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with serde derives only, so they can be used by
//! the core rules, the match runner, and anything that serialises a report.
//!
//! # Grid Dimensions
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRID_COLS` | 14 | Columns in every layout |
//! | `BOARD_ROWS` | 7 | Rows in the plain layout |
//! | `MAP_ROWS` | 8 | Rows in the obstacle layout |
//! | `MAP_OBSTACLES` | 14 | Obstacle cells in the obstacle layout |
//!
//! Cells are addressed row-major: `index = row * GRID_COLS + col`.
//!
//! # Rules Constants
//!
//! - `MAX_VALUE`: tile values cycle through `1..=7`
//! - `SUM_TARGET`: two adjacent tiles summing to 8 form a pair
//! - `MIN_SEQUENCE_LEN`: a run needs at least 3 tiles to score
//!
//! # Examples
//!
//! ```
//! use tile_seq_types::{Difficulty, LayoutMode, Move, GRID_COLS};
//!
//! let mode = LayoutMode::from_str("map").unwrap();
//! assert_eq!(mode.rows(), 8);
//! assert_eq!(mode.obstacles(), 14);
//! assert_eq!(GRID_COLS, 14);
//!
//! let level = Difficulty::from_str("HARD").unwrap();
//! assert_eq!(level.as_str(), "hard");
//!
//! let mv = Move::Swap { first: 3, second: 17 };
//! assert_eq!(mv.second(), Some(17));
//! ```

use serde::{Deserialize, Serialize};

/// Columns per row, shared by every layout
pub const GRID_COLS: usize = 14;

/// Rows in the plain layout
pub const BOARD_ROWS: usize = 7;

/// Rows in the obstacle layout
pub const MAP_ROWS: usize = 8;

/// Obstacle cells placed in the obstacle layout
pub const MAP_OBSTACLES: usize = 14;

/// Highest tile value; values cycle `1..=MAX_VALUE`
pub const MAX_VALUE: i8 = 7;

/// Adjacent values summing to this form a pair
pub const SUM_TARGET: i8 = 8;

/// Shortest run of consecutive values that scores
pub const MIN_SEQUENCE_LEN: usize = 3;

/// Value carried by obstacle cells
pub const OBSTACLE_VALUE: i8 = -1;

/// Obstacle layouts sampled before accepting a disconnected one
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_ruleset_constants() {
        assert_eq!(GRID_COLS, 14);
        assert_eq!(BOARD_ROWS, 7);
        assert_eq!(MAP_ROWS, 8);
        assert_eq!(MAP_OBSTACLES, 14);
        assert_eq!(MAX_VALUE, 7);
        assert_eq!(SUM_TARGET, 8);

        // Both layouts hold 14 copies of each value.
        assert_eq!(BOARD_ROWS * GRID_COLS / MAX_VALUE as usize, 14);
        assert_eq!(
            (MAP_ROWS * GRID_COLS - MAP_OBSTACLES) / MAX_VALUE as usize,
            14
        );
    }

    #[test]
    fn cyclic_successor_wraps() {
        assert_eq!(next_value(7), 1);
        assert_eq!(next_value(3), 4);
        assert_eq!(prev_value(1), 7);
        assert_eq!(prev_value(5), 4);
    }

    #[test]
    fn move_serialises_with_kind_tag() {
        let json = serde_json::to_string(&Move::Keep { first: 4 }).unwrap();
        assert_eq!(json, r#"{"kind":"keep","first":4}"#);

        let back: Move = serde_json::from_str(r#"{"kind":"swap","first":1,"second":2}"#).unwrap();
        assert_eq!(back, Move::Swap { first: 1, second: 2 });
    }
}

/// Value that follows `v` in the cycle (`MAX_VALUE` wraps to 1)
pub fn next_value(v: i8) -> i8 {
    if v == MAX_VALUE {
        1
    } else {
        v + 1
    }
}

/// Value that precedes `v` in the cycle (1 wraps to `MAX_VALUE`)
pub fn prev_value(v: i8) -> i8 {
    if v == 1 {
        MAX_VALUE
    } else {
        v - 1
    }
}

/// One grid cell
///
/// - `id`: stable identity of the physical tile (follows the value on a swap)
/// - `value`: `1..=MAX_VALUE`, or `OBSTACLE_VALUE` for obstacles
/// - `is_revealed`: one-way flag, never reset within a round
/// - `is_obstacle`: permanently inert cell, always revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: u32,
    pub value: i8,
    pub is_revealed: bool,
    pub is_obstacle: bool,
}

impl Tile {
    /// A hidden playable tile
    pub fn hidden(id: u32, value: i8) -> Self {
        Self {
            id,
            value,
            is_revealed: false,
            is_obstacle: false,
        }
    }

    /// A revealed playable tile
    pub fn revealed(id: u32, value: i8) -> Self {
        Self {
            id,
            value,
            is_revealed: true,
            is_obstacle: false,
        }
    }

    /// An obstacle cell
    pub fn obstacle(id: u32) -> Self {
        Self {
            id,
            value: OBSTACLE_VALUE,
            is_revealed: true,
            is_obstacle: true,
        }
    }

    /// Revealed and not an obstacle, i.e. able to take part in a match
    pub fn is_live(&self) -> bool {
        self.is_revealed && !self.is_obstacle
    }

    /// Hidden and not an obstacle, i.e. a legal target for a move
    pub fn is_playable(&self) -> bool {
        !self.is_revealed && !self.is_obstacle
    }
}

/// Board layout modes
///
/// - **Board**: plain 7x14 grid, no obstacles
/// - **Map**: 8x14 grid with 14 obstacle cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Board,
    Map,
}

impl LayoutMode {
    /// Parse layout mode from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_seq_types::LayoutMode;
    ///
    /// assert_eq!(LayoutMode::from_str("board"), Some(LayoutMode::Board));
    /// assert_eq!(LayoutMode::from_str("MAP"), Some(LayoutMode::Map));
    /// assert_eq!(LayoutMode::from_str("maze"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "board" => Some(LayoutMode::Board),
            "map" => Some(LayoutMode::Map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Board => "board",
            LayoutMode::Map => "map",
        }
    }

    pub fn rows(&self) -> usize {
        match self {
            LayoutMode::Board => BOARD_ROWS,
            LayoutMode::Map => MAP_ROWS,
        }
    }

    pub fn cols(&self) -> usize {
        GRID_COLS
    }

    pub fn obstacles(&self) -> usize {
        match self {
            LayoutMode::Board => 0,
            LayoutMode::Map => MAP_OBSTACLES,
        }
    }
}

/// Computer opponent behaviour tiers
///
/// - **Easy**: frequent random moves, shallow sampled search on immediate points
/// - **Medium**: full search, random pick among the best 30%
/// - **Hard**: full search, always the single best move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse difficulty from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Keep the first flipped tile where it is, or swap it with a second hidden tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    Keep,
    Swap,
}

/// A complete turn: which tile to flip, and whether to swap it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Move {
    Keep { first: usize },
    Swap { first: usize, second: usize },
}

impl Move {
    pub fn kind(&self) -> MoveKind {
        match self {
            Move::Keep { .. } => MoveKind::Keep,
            Move::Swap { .. } => MoveKind::Swap,
        }
    }

    /// Index of the tile flipped first
    pub fn first(&self) -> usize {
        match *self {
            Move::Keep { first } | Move::Swap { first, .. } => first,
        }
    }

    /// Swap partner, if any
    pub fn second(&self) -> Option<usize> {
        match *self {
            Move::Keep { .. } => None,
            Move::Swap { second, .. } => Some(second),
        }
    }
}
