//! Bot module - computer opponent move search
//!
//! A turn is "flip a hidden tile, then keep it or swap it with another hidden
//! tile". The move space for a board with `U` hidden tiles is therefore `U`
//! keeps plus `U * (U - 1)` ordered swaps. Each candidate is applied to a
//! copy of the board and scored with [`compute_scores`].
//!
//! # Evaluation
//!
//! `evaluation = points * 10`, and for medium and hard a look-ahead bonus:
//! every revealed tile adds `POTENTIAL_PAIR + POTENTIAL_TWIN` (each doubled)
//! per hidden neighbour, and sequence points count double again. The weights
//! are tuning constants, not probabilities.
//!
//! # Tiers
//!
//! | Tier | Search | Pick |
//! |------|--------|------|
//! | hard | every move | best, first one on ties |
//! | medium | every move | uniform among the top 30% |
//! | easy | 40%: none; otherwise first 5 tiles x first 3 partners | random move, or uniform among the top 50% |
//!
//! Randomness is always drawn from the caller's generator.

use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::board::{revealed_by, Board};
use crate::rng::{index, unit};
use crate::scoring::{compute_scores, ScoringResult};
use crate::types::{Difficulty, Move};

/// Weight of a hidden neighbour as a future pair
pub const POTENTIAL_PAIR: f64 = 0.3;

/// Weight of a hidden neighbour as a future twin
pub const POTENTIAL_TWIN: f64 = 0.2;

/// Multiplier from points to evaluation
const POINTS_WEIGHT: f64 = 10.0;

/// Multiplier on potential and sequence bonuses
const BONUS_WEIGHT: f64 = 2.0;

const MEDIUM_TOP_FRACTION: f64 = 0.3;
const EASY_TOP_FRACTION: f64 = 0.5;
const EASY_RANDOM_CHANCE: f64 = 0.4;
const EASY_KEEP_CHANCE: f64 = 0.5;
const EASY_FIRST_SAMPLE: usize = 5;
const EASY_SECOND_SAMPLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BotError {
    #[error("no hidden tile left to play")]
    NoLegalMove,
}

impl BotError {
    pub fn code(self) -> &'static str {
        match self {
            BotError::NoLegalMove => "no_legal_move",
        }
    }
}

/// A scored candidate move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub mv: Move,
    /// Immediate points the move scores
    pub points: u32,
    pub evaluation: f64,
}

/// Chooses a move for the current board
///
/// Object-safe so match seats can hold `Box<dyn MovePolicy>`.
pub trait MovePolicy {
    fn choose_move(&mut self, board: &Board) -> Result<Move, BotError>;
}

/// Difficulty-tiered computer opponent owning its random source
#[derive(Debug, Clone)]
pub struct Bot<R> {
    difficulty: Difficulty,
    rng: R,
}

impl<R: Rng> Bot<R> {
    pub fn new(difficulty: Difficulty, rng: R) -> Self {
        Self { difficulty, rng }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

impl<R: Rng> MovePolicy for Bot<R> {
    fn choose_move(&mut self, board: &Board) -> Result<Move, BotError> {
        choose_bot_move(board, self.difficulty, &mut self.rng)
    }
}

/// Pick a move for `board` under `difficulty`
///
/// Fails with [`BotError::NoLegalMove`] when no hidden, non-obstacle tile is left.
pub fn choose_bot_move<R: Rng + ?Sized>(
    board: &Board,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Move, BotError> {
    let unrevealed = board.unrevealed_indices();
    if unrevealed.is_empty() {
        return Err(BotError::NoLegalMove);
    }

    let mv = match difficulty {
        Difficulty::Easy => easy_move(board, &unrevealed, rng),
        Difficulty::Medium => {
            let mut candidates = enumerate_candidates(board, difficulty);
            pick_from_top(&mut candidates, MEDIUM_TOP_FRACTION, rng)
        }
        Difficulty::Hard => best_candidate(&enumerate_candidates(board, difficulty)).map(|c| c.mv),
    };

    // Only reachable if every enumerated move failed to apply.
    let mv = mv.unwrap_or(Move::Keep {
        first: unrevealed[0],
    });
    debug!(difficulty = difficulty.as_str(), ?mv, "bot move chosen");
    Ok(mv)
}

/// Every legal move in enumeration order, evaluated for `difficulty`
///
/// Order: for each hidden tile in index order, its keep, then its swaps with
/// every other hidden tile in index order.
pub fn enumerate_candidates(board: &Board, difficulty: Difficulty) -> Vec<Candidate> {
    let unrevealed = board.unrevealed_indices();
    let mut out = Vec::with_capacity(unrevealed.len() * unrevealed.len());

    for &first in &unrevealed {
        out.extend(evaluate_move(board, Move::Keep { first }, difficulty));
        for &second in &unrevealed {
            if second == first {
                continue;
            }
            out.extend(evaluate_move(board, Move::Swap { first, second }, difficulty));
        }
    }

    out
}

/// Apply `mv` to a copy of `board` and evaluate it; `None` if the move is illegal
pub fn evaluate_move(board: &Board, mv: Move, difficulty: Difficulty) -> Option<Candidate> {
    let next = board.apply_move(mv).ok()?;
    let result = compute_scores(&next, &revealed_by(mv));
    Some(Candidate {
        mv,
        points: result.total_points,
        evaluation: evaluate_position(&next, &result, difficulty),
    })
}

/// Evaluation of the board reached by a move, given that move's scoring
pub fn evaluate_position(board: &Board, result: &ScoringResult, difficulty: Difficulty) -> f64 {
    let mut evaluation = result.total_points as f64 * POINTS_WEIGHT;
    if difficulty == Difficulty::Easy {
        return evaluation;
    }

    let tiles = board.tiles();
    let mut potential_pairs = 0.0;
    let mut potential_twins = 0.0;
    for idx in board.revealed_indices() {
        for n in board.neighbors(idx) {
            if tiles[n].is_playable() {
                potential_pairs += POTENTIAL_PAIR;
                potential_twins += POTENTIAL_TWIN;
            }
        }
    }

    evaluation += potential_pairs * BONUS_WEIGHT;
    evaluation += potential_twins * BONUS_WEIGHT;
    evaluation += result.sequence_points() as f64 * BONUS_WEIGHT;
    evaluation
}

/// Highest evaluation, earliest candidate on ties
pub fn best_candidate(candidates: &[Candidate]) -> Option<&Candidate> {
    let mut best: Option<&Candidate> = None;
    for c in candidates {
        if best.map_or(true, |b| c.evaluation > b.evaluation) {
            best = Some(c);
        }
    }
    best
}

/// Stable sort by evaluation, then a uniform pick among the top `fraction` (at least one)
fn pick_from_top<R: Rng + ?Sized>(
    candidates: &mut [Candidate],
    fraction: f64,
    rng: &mut R,
) -> Option<Move> {
    if candidates.is_empty() {
        return None;
    }
    candidates.sort_by(|a, b| b.evaluation.total_cmp(&a.evaluation));
    let top = top_count(candidates.len(), fraction);
    Some(candidates[index(rng, top)].mv)
}

/// `max(1, ceil(len * fraction))`, capped at `len`
fn top_count(len: usize, fraction: f64) -> usize {
    ((len as f64 * fraction).ceil() as usize).clamp(1, len.max(1))
}

fn easy_move<R: Rng + ?Sized>(board: &Board, unrevealed: &[usize], rng: &mut R) -> Option<Move> {
    if unit(rng) < EASY_RANDOM_CHANCE {
        let first = unrevealed[index(rng, unrevealed.len())];
        if unit(rng) < EASY_KEEP_CHANCE {
            return Some(Move::Keep { first });
        }
        let others: Vec<usize> = unrevealed.iter().copied().filter(|&i| i != first).collect();
        if others.is_empty() {
            return Some(Move::Keep { first });
        }
        let second = others[index(rng, others.len())];
        return Some(Move::Swap { first, second });
    }

    let mut candidates = Vec::new();
    for &first in unrevealed.iter().take(EASY_FIRST_SAMPLE) {
        candidates.extend(evaluate_move(board, Move::Keep { first }, Difficulty::Easy));

        let partners = unrevealed
            .iter()
            .copied()
            .filter(|&i| i != first)
            .take(EASY_SECOND_SAMPLE);
        for second in partners {
            candidates.extend(evaluate_move(
                board,
                Move::Swap { first, second },
                Difficulty::Easy,
            ));
        }
    }

    pick_from_top(&mut candidates, EASY_TOP_FRACTION, rng)
}
