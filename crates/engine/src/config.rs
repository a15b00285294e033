//! Match configuration
//!
//! Defaults can be overridden from the environment:
//!
//! - `TILESEQ_MODE`: `board` or `map` (default `board`)
//! - `TILESEQ_SEED`: layout seed (default: random)
//! - `TILESEQ_PLAYERS`: comma-separated seats, each `difficulty` or `name:difficulty`
//!   (default `hard,easy`)
//! - `TILESEQ_ROUNDS`: regular rounds before tie-breakers (default 3)
//!
//! Invalid values fall back to the defaults.

use serde::{Deserialize, Serialize};
use tracing::warn;

use tile_seq_core::rng::entropy_seed;

use crate::types::{Difficulty, LayoutMode};

/// Regular rounds in a match
pub const DEFAULT_ROUNDS: u32 = 3;

/// Tie-breaker rounds played before a match is declared shared
pub const MAX_TIE_BREAKERS: u32 = 10;

/// One seat at the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    pub name: String,
    pub difficulty: Difficulty,
}

impl SeatConfig {
    pub fn new(name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            name: name.into(),
            difficulty,
        }
    }

    /// Parse `difficulty` or `name:difficulty`; unnamed seats are called `Bot <n>`
    pub fn parse(entry: &str, seat_number: usize) -> Option<Self> {
        let entry = entry.trim();
        match entry.split_once(':') {
            Some((name, level)) => {
                let difficulty = Difficulty::from_str(level)?;
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                Some(Self::new(name, difficulty))
            }
            None => {
                let difficulty = Difficulty::from_str(entry)?;
                Some(Self::new(format!("Bot {}", seat_number), difficulty))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub mode: LayoutMode,
    /// Base seed; round `n` uses the seed with `n` appended
    pub seed: String,
    pub seats: Vec<SeatConfig>,
    pub rounds: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            mode: LayoutMode::Board,
            seed: entropy_seed(),
            seats: default_seats(),
            rounds: DEFAULT_ROUNDS,
        }
    }
}

impl MatchConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Create from a variable lookup, falling back to defaults per field
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mode = lookup("TILESEQ_MODE")
            .and_then(|s| LayoutMode::from_str(&s))
            .unwrap_or_default();

        let seed = lookup("TILESEQ_SEED")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(entropy_seed);

        let seats = lookup("TILESEQ_PLAYERS")
            .map(|s| parse_seats(&s))
            .filter(|seats| !seats.is_empty())
            .unwrap_or_else(default_seats);

        let rounds = lookup("TILESEQ_ROUNDS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&r: &u32| r > 0)
            .unwrap_or(DEFAULT_ROUNDS);

        Self {
            mode,
            seed,
            seats,
            rounds,
        }
    }

    /// Board seed for a 1-based round number
    pub fn round_seed(&self, round: u32) -> String {
        format!("{}{}", self.seed, round)
    }
}

/// Parse a comma-separated seat list, skipping entries that do not parse
pub fn parse_seats(list: &str) -> Vec<SeatConfig> {
    list.split(',')
        .filter(|e| !e.trim().is_empty())
        .enumerate()
        .filter_map(|(i, entry)| {
            let seat = SeatConfig::parse(entry, i + 1);
            if seat.is_none() {
                warn!(entry = entry.trim(), "ignoring unrecognised seat");
            }
            seat
        })
        .collect()
}

fn default_seats() -> Vec<SeatConfig> {
    vec![
        SeatConfig::new("Bot 1", Difficulty::Hard),
        SeatConfig::new("Bot 2", Difficulty::Easy),
    ]
}
