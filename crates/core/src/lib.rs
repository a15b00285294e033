//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the tile-matching game: board generation,
//! match scoring, and the computer opponent. It has no dependencies on UI,
//! timing, or I/O:
//!
//! - **Deterministic**: the same text seed produces the same board
//! - **Pure**: boards are values; applying a move returns a new board
//! - **Injectable randomness**: every random choice draws from a caller-supplied `rand::Rng`
//!
//! # Module Structure
//!
//! - [`rng`]: string-seeded generator and Fisher-Yates shuffling
//! - [`board`]: the tile grid, neighbours, and move application
//! - [`generator`]: layouts with value balance and connected obstacles
//! - [`scoring`]: pairs, twins and cyclic sequences through newly revealed tiles
//! - [`ledger`]: per-round record that stops a match being awarded twice
//! - [`bot`]: move enumeration, evaluation, and the three difficulty tiers
//!
//! # Game Rules
//!
//! - Values `1..=7` cycle: 7 is followed by 1
//! - **Pair**: adjacent revealed tiles summing to 8 (1 point)
//! - **Twin**: adjacent revealed tiles with equal values (1 point)
//! - **Sequence**: 3+ adjacent revealed tiles stepping by one (1 point per tile)
//! - A turn flips a hidden tile and either keeps it or swaps it with another hidden tile,
//!   revealing both
//!
//! # Example
//!
//! ```
//! use tile_seq_core::{choose_bot_move, compute_scores, generate_board, revealed_by, SeededRng};
//! use tile_seq_core::types::{Difficulty, LayoutMode};
//!
//! let board = generate_board(LayoutMode::Board, "demo");
//! let mut rng = SeededRng::new("bot");
//!
//! let mv = choose_bot_move(&board, Difficulty::Hard, &mut rng).unwrap();
//! let next = board.apply_move(mv).unwrap();
//! let result = compute_scores(&next, &revealed_by(mv));
//!
//! assert!(next.unrevealed_indices().len() < board.unrevealed_indices().len());
//! assert_eq!(result.total_points, result.items().map(|(_, m)| m.points).sum::<u32>());
//! ```

pub mod board;
pub mod bot;
pub mod generator;
pub mod ledger;
pub mod rng;
pub mod scoring;

pub use tile_seq_types as types;

// Re-export commonly used types for convenience
pub use board::{revealed_by, Board, MoveError};
pub use bot::{choose_bot_move, Bot, BotError, Candidate, MovePolicy};
pub use generator::{generate_board, ConfigError, Generation, Generator, GeneratorConfig};
pub use ledger::ScoreLedger;
pub use rng::{shuffle, shuffled, SeededRng};
pub use scoring::{compute_scores, Match, MatchKind, ScoringResult};
