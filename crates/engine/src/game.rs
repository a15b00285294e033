//! Match module - rounds, turns, handicaps and tie-breakers
//!
//! A match is a fixed number of rounds on fresh boards. Each round:
//!
//! 1. A starting seat is drawn at random and every seat gets a head start of
//!    `n - 1 - order` points, where `order` counts seats from the starter in
//!    turn order. The starter begins with `n - 1`, the last seat with 0.
//! 2. Seats take turns until every tile is revealed.
//! 3. Every seat sharing the highest round score wins the round.
//!
//! After the regular rounds, if more than one seat shares the most round wins
//! a tie-breaker round is played, up to [`MAX_TIE_BREAKERS`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use tile_seq_core::rng::index;
use tile_seq_core::{generate_board, Board, Bot, BotError, MovePolicy, ScoreLedger, ScoringResult};

use crate::config::{MatchConfig, MAX_TIE_BREAKERS};
use crate::turn::{apply_turn, TurnError};
use crate::types::{Difficulty, LayoutMode, Move};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("a match needs at least one seat")]
    NoSeats,
    #[error("a match needs at least one round")]
    NoRounds,
    #[error("match is over")]
    MatchOver,
    #[error("round is over, start the next one")]
    RoundOver,
    #[error(transparent)]
    Bot(#[from] BotError),
    #[error(transparent)]
    Turn(#[from] TurnError),
}

/// Where the match is between calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Playing,
    RoundOver,
    GameOver,
}

/// Per-seat standing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub difficulty: Difficulty,
    /// Points this round, including the handicap
    pub round_score: u32,
    pub round_wins: u32,
    pub handicap: u32,
}

/// One completed turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub seat: usize,
    pub mv: Move,
    pub result: ScoringResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u32,
    pub tie_breaker: bool,
    pub board_seed: String,
    pub starting_seat: usize,
    pub handicaps: Vec<u32>,
    /// Final round scores per seat, handicap included
    pub scores: Vec<u32>,
    /// Seats sharing the highest score
    pub winners: Vec<usize>,
    pub turns: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub mode: LayoutMode,
    pub seed: String,
    pub rounds: Vec<RoundSummary>,
    pub players: Vec<Player>,
    /// Seats with the most round wins; more than one means a shared result
    pub winners: Vec<usize>,
}

struct Seat {
    player: Player,
    policy: Box<dyn MovePolicy>,
}

/// A match between computer seats
pub struct Match<R> {
    config: MatchConfig,
    seats: Vec<Seat>,
    rng: R,
    round: u32,
    board: Board,
    ledger: ScoreLedger,
    current: usize,
    starting_seat: usize,
    turns: u32,
    status: MatchStatus,
    tie_breaker: bool,
    summaries: Vec<RoundSummary>,
}

impl<R: Rng> Match<R> {
    /// Set up a match and deal the first round
    ///
    /// Each seat's bot gets its own generator seeded from `rng`.
    pub fn new(config: MatchConfig, mut rng: R) -> Result<Self, MatchError> {
        if config.seats.is_empty() {
            return Err(MatchError::NoSeats);
        }
        if config.rounds == 0 {
            return Err(MatchError::NoRounds);
        }

        let seats = config
            .seats
            .iter()
            .map(|s| Seat {
                player: Player {
                    name: s.name.clone(),
                    difficulty: s.difficulty,
                    round_score: 0,
                    round_wins: 0,
                    handicap: 0,
                },
                policy: Box::new(Bot::new(s.difficulty, StdRng::seed_from_u64(rng.gen())))
                    as Box<dyn MovePolicy>,
            })
            .collect();

        let board = generate_board(config.mode, &config.round_seed(1));
        let mut game = Self {
            config,
            seats,
            rng,
            round: 0,
            board,
            ledger: ScoreLedger::new(),
            current: 0,
            starting_seat: 0,
            turns: 0,
            status: MatchStatus::Playing,
            tie_breaker: false,
            summaries: Vec::new(),
        };
        game.start_round(1);
        Ok(game)
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn is_tie_breaker(&self) -> bool {
        self.tie_breaker
    }

    /// Seat whose turn it is
    pub fn current_seat(&self) -> usize {
        self.current
    }

    pub fn players(&self) -> Vec<&Player> {
        self.seats.iter().map(|s| &s.player).collect()
    }

    pub fn summaries(&self) -> &[RoundSummary] {
        &self.summaries
    }

    fn start_round(&mut self, round: u32) {
        let n = self.seats.len();
        let start = index(&mut self.rng, n);

        for (i, seat) in self.seats.iter_mut().enumerate() {
            let order = (i + n - start) % n;
            let handicap = (n - 1 - order) as u32;
            seat.player.handicap = handicap;
            seat.player.round_score = handicap;
        }

        let board_seed = self.config.round_seed(round);
        if round > 1 {
            self.board = generate_board(self.config.mode, &board_seed);
        }
        self.ledger.clear();
        self.round = round;
        self.current = start;
        self.starting_seat = start;
        self.turns = 0;
        self.status = MatchStatus::Playing;

        info!(
            round,
            tie_breaker = self.tie_breaker,
            seed = %board_seed,
            starting_seat = start,
            "round started"
        );
    }

    /// Let the current seat's bot choose a move and play it
    pub fn play_turn(&mut self) -> Result<TurnRecord, MatchError> {
        self.ensure_playing()?;
        let mv = self.seats[self.current].policy.choose_move(&self.board)?;
        self.apply_move(mv)
    }

    /// Play `mv` for the current seat
    pub fn apply_move(&mut self, mv: Move) -> Result<TurnRecord, MatchError> {
        self.ensure_playing()?;

        let outcome = apply_turn(&self.board, &mut self.ledger, mv)?;
        let seat = self.current;
        self.seats[seat].player.round_score += outcome.result.total_points;
        self.board = outcome.board;
        self.turns += 1;

        debug!(
            seat,
            ?mv,
            points = outcome.result.total_points,
            "turn played"
        );

        if self.board.is_fully_revealed() {
            self.finish_round();
        } else {
            self.current = (self.current + 1) % self.seats.len();
        }

        Ok(TurnRecord {
            seat,
            mv,
            result: outcome.result,
        })
    }

    /// Play turns until the current round ends
    pub fn play_round(&mut self) -> Result<RoundSummary, MatchError> {
        while self.status == MatchStatus::Playing {
            self.play_turn()?;
        }
        self.summaries
            .last()
            .cloned()
            .ok_or(MatchError::RoundOver)
    }

    /// Deal the next round after a finished one
    pub fn next_round(&mut self) -> Result<(), MatchError> {
        match self.status {
            MatchStatus::RoundOver => {
                self.start_round(self.round + 1);
                Ok(())
            }
            MatchStatus::GameOver => Err(MatchError::MatchOver),
            MatchStatus::Playing => Err(MatchError::RoundOver),
        }
    }

    /// Play every remaining round and report
    pub fn play_to_end(&mut self) -> Result<MatchReport, MatchError> {
        loop {
            match self.status {
                MatchStatus::Playing => {
                    self.play_round()?;
                }
                MatchStatus::RoundOver => self.next_round()?,
                MatchStatus::GameOver => return Ok(self.report()),
            }
        }
    }

    pub fn report(&self) -> MatchReport {
        MatchReport {
            mode: self.config.mode,
            seed: self.config.seed.clone(),
            rounds: self.summaries.clone(),
            players: self.seats.iter().map(|s| s.player.clone()).collect(),
            winners: leaders(self.seats.iter().map(|s| s.player.round_wins)),
        }
    }

    fn ensure_playing(&self) -> Result<(), MatchError> {
        match self.status {
            MatchStatus::Playing => Ok(()),
            MatchStatus::RoundOver => Err(MatchError::RoundOver),
            MatchStatus::GameOver => Err(MatchError::MatchOver),
        }
    }

    fn finish_round(&mut self) {
        let winners = leaders(self.seats.iter().map(|s| s.player.round_score));
        for &w in &winners {
            self.seats[w].player.round_wins += 1;
        }

        self.summaries.push(RoundSummary {
            round: self.round,
            tie_breaker: self.tie_breaker,
            board_seed: self.config.round_seed(self.round),
            starting_seat: self.starting_seat,
            handicaps: self.seats.iter().map(|s| s.player.handicap).collect(),
            scores: self.seats.iter().map(|s| s.player.round_score).collect(),
            winners: winners.clone(),
            turns: self.turns,
        });

        let regular = self.round < self.config.rounds;
        let match_leaders = leaders(self.seats.iter().map(|s| s.player.round_wins));
        let out_of_tie_breakers = self.round >= self.config.rounds + MAX_TIE_BREAKERS;

        self.status = if regular {
            self.tie_breaker = false;
            MatchStatus::RoundOver
        } else if match_leaders.len() > 1 && !out_of_tie_breakers {
            self.tie_breaker = true;
            MatchStatus::RoundOver
        } else {
            MatchStatus::GameOver
        };

        info!(
            round = self.round,
            ?winners,
            status = ?self.status,
            "round finished"
        );
    }
}

/// Indices sharing the maximum value
fn leaders(values: impl Iterator<Item = u32>) -> Vec<usize> {
    let values: Vec<u32> = values.collect();
    let Some(&max) = values.iter().max() else {
        return Vec::new();
    };
    values
        .iter()
        .enumerate()
        .filter(|(_, &v)| v == max)
        .map(|(i, _)| i)
        .collect()
}
