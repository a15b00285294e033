//! Match orchestration on top of the core rules
//!
//! - [`config`]: seats, rounds and seed, with environment overrides
//! - [`turn`]: applying one move and scoring it against the round's ledger
//! - [`game`]: rounds, handicaps, round wins and tie-breakers
//!
//! # Example
//!
//! ```
//! use tile_seq_engine::{Match, MatchConfig, SeatConfig};
//! use tile_seq_engine::types::{Difficulty, LayoutMode};
//! use tile_seq_engine::core::SeededRng;
//!
//! let config = MatchConfig {
//!     mode: LayoutMode::Board,
//!     seed: "doc".to_string(),
//!     seats: vec![SeatConfig::new("Solo", Difficulty::Easy)],
//!     rounds: 1,
//! };
//! let mut game = Match::new(config, SeededRng::new("doc")).unwrap();
//! let report = game.play_to_end().unwrap();
//! assert_eq!(report.winners, vec![0]);
//! ```

pub mod config;
pub mod game;
pub mod turn;

pub use tile_seq_core as core;
pub use tile_seq_types as types;

pub use config::{parse_seats, MatchConfig, SeatConfig, DEFAULT_ROUNDS, MAX_TIE_BREAKERS};
pub use game::{Match, MatchError, MatchReport, MatchStatus, Player, RoundSummary, TurnRecord};
pub use turn::{apply_turn, PendingTurn, TurnError, TurnOutcome};
