//! Per-round record of awarded matches
//!
//! [`compute_scores`] is stateless: it scores whatever passes through the
//! pivots it is given. A [`ScoreLedger`] sits on top of it for the length of a
//! round and drops any match that was already awarded earlier in that round,
//! so handing the same tiles in again can never pay out twice.
//!
//! A longer run that grows out of an awarded one has a different cell set
//! and is awarded in full.

use std::collections::HashSet;

use crate::board::Board;
use crate::scoring::{compute_scores, edge_key, path_key, MatchKind, ScoringResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreLedger {
    pairs: HashSet<(usize, usize)>,
    twins: HashSet<(usize, usize)>,
    sequences: HashSet<Vec<usize>>,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score `newly_affected`, keeping only matches not yet awarded this round
    pub fn score(&mut self, board: &Board, newly_affected: &[usize]) -> ScoringResult {
        let fresh = compute_scores(board, newly_affected);
        let mut kept = ScoringResult::default();

        for (kind, m) in fresh.items() {
            let is_new = match kind {
                MatchKind::Pair => self.pairs.insert(edge_key(m.coords[0], m.coords[1])),
                MatchKind::Twin => self.twins.insert(edge_key(m.coords[0], m.coords[1])),
                MatchKind::Sequence => self.sequences.insert(path_key(&m.coords)),
            };
            if is_new {
                kept.push(kind, m.clone());
            }
        }

        kept
    }

    /// Number of matches awarded so far
    pub fn awarded(&self) -> usize {
        self.pairs.len() + self.twins.len() + self.sequences.len()
    }

    /// Forget everything (start of a new round)
    pub fn clear(&mut self) {
        self.pairs.clear();
        self.twins.clear();
        self.sequences.clear();
    }
}
