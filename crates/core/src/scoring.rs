//! Scoring module - pairs, twins and cyclic sequences
//!
//! Scoring runs after every reveal and only looks at matches that pass
//! through one of the newly revealed tiles (the *pivots*). Matches made
//! entirely of tiles revealed on earlier turns are never looked at again.
//!
//! - **Pair**: pivot and a revealed neighbour sum to `SUM_TARGET` (1 point)
//! - **Twin**: pivot and a revealed neighbour have equal values (1 point)
//! - **Sequence**: a non-repeating orthogonal path of at least
//!   `MIN_SEQUENCE_LEN` revealed tiles whose values step by one, wrapping
//!   `MAX_VALUE -> 1` (1 point per tile)
//!
//! Pairs and twins are deduplicated per edge, so two adjacent pivots do not
//! score the same edge twice; a `4-4` edge is both a pair and a twin.
//! Sequences are deduplicated by their set of cells.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::{next_value, prev_value, MIN_SEQUENCE_LEN, SUM_TARGET};

/// Category of a scored match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Pair,
    Twin,
    Sequence,
}

/// One scored match: the cells involved, in path order, and its points
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    pub coords: Vec<usize>,
    pub points: u32,
}

impl Match {
    fn new(coords: Vec<usize>) -> Self {
        let points = coords.len() as u32;
        Self { coords, points }
    }

    fn edge(a: usize, b: usize) -> Self {
        Self {
            coords: vec![a, b],
            points: 1,
        }
    }
}

/// Score calculation result
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoringResult {
    pub pairs: Vec<Match>,
    pub twins: Vec<Match>,
    pub sequences: Vec<Match>,
    pub total_points: u32,
}

impl ScoringResult {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.twins.is_empty() && self.sequences.is_empty()
    }

    /// Points from sequences alone
    pub fn sequence_points(&self) -> u32 {
        self.sequences.iter().map(|m| m.points).sum()
    }

    /// All matches in presentation order: pairs, then twins, then sequences
    pub fn items(&self) -> impl Iterator<Item = (MatchKind, &Match)> + '_ {
        self.pairs
            .iter()
            .map(|m| (MatchKind::Pair, m))
            .chain(self.twins.iter().map(|m| (MatchKind::Twin, m)))
            .chain(self.sequences.iter().map(|m| (MatchKind::Sequence, m)))
    }

    pub(crate) fn push(&mut self, kind: MatchKind, m: Match) {
        self.total_points += m.points;
        match kind {
            MatchKind::Pair => self.pairs.push(m),
            MatchKind::Twin => self.twins.push(m),
            MatchKind::Sequence => self.sequences.push(m),
        }
    }
}

/// Unordered edge key
#[inline]
pub(crate) fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Sorted cell set identifying a sequence regardless of direction or pivot
pub(crate) fn path_key(coords: &[usize]) -> Vec<usize> {
    let mut key = coords.to_vec();
    key.sort_unstable();
    key
}

/// Score every match passing through `newly_affected`
///
/// Pure: the board is not modified. Indices that are out of range, hidden,
/// or obstacles are ignored as pivots.
pub fn compute_scores(board: &Board, newly_affected: &[usize]) -> ScoringResult {
    let mut result = ScoringResult::default();
    let tiles = board.tiles();

    let pivots: Vec<usize> = newly_affected
        .iter()
        .copied()
        .filter(|&i| tiles.get(i).map_or(false, |t| t.is_live()))
        .collect();

    let mut pair_keys = HashSet::new();
    let mut twin_keys = HashSet::new();

    for &idx in &pivots {
        let value = tiles[idx].value;
        for n in board.neighbors(idx) {
            let neighbor = &tiles[n];
            if !neighbor.is_live() {
                continue;
            }
            if value + neighbor.value == SUM_TARGET && pair_keys.insert(edge_key(idx, n)) {
                result.push(MatchKind::Pair, Match::edge(idx, n));
            }
            if value == neighbor.value && twin_keys.insert(edge_key(idx, n)) {
                result.push(MatchKind::Twin, Match::edge(idx, n));
            }
        }
    }

    let mut seen_paths = HashSet::new();
    for &start in &pivots {
        let ups = monotone_paths(board, start, next_value);
        let downs = monotone_paths(board, start, prev_value);

        for up in &ups {
            for down in &downs {
                // Both branches may wander onto the same cell on a cyclic grid.
                if down.iter().any(|d| up.contains(d)) {
                    continue;
                }
                let len = down.len() + 1 + up.len();
                if len < MIN_SEQUENCE_LEN {
                    continue;
                }

                let mut coords = Vec::with_capacity(len);
                coords.extend(down.iter().rev());
                coords.push(start);
                coords.extend(up.iter());

                if seen_paths.insert(path_key(&coords)) {
                    result.push(MatchKind::Sequence, Match::new(coords));
                }
            }
        }
    }

    result
}

/// Maximal branches leaving `start` where each step goes to `step(value)`
///
/// Each branch excludes `start`; a start with no extension yields a single
/// empty branch. Branches come out in depth-first order following the
/// neighbour order, using an explicit stack instead of recursion.
fn monotone_paths(board: &Board, start: usize, step: fn(i8) -> i8) -> Vec<Vec<usize>> {
    let tiles = board.tiles();
    let mut branches = Vec::new();
    let mut stack = vec![vec![start]];

    while let Some(path) = stack.pop() {
        let Some(&curr) = path.last() else {
            continue;
        };
        let want = step(tiles[curr].value);

        let mut extensions = board.neighbors(curr);
        extensions.retain(|n| {
            let t = &tiles[*n];
            t.is_live() && t.value == want && !path.contains(n)
        });

        if extensions.is_empty() {
            branches.push(path[1..].to_vec());
            continue;
        }

        // Reverse push so the first neighbour is explored first.
        for &n in extensions.iter().rev() {
            let mut next = Vec::with_capacity(path.len() + 1);
            next.extend_from_slice(&path);
            next.push(n);
            stack.push(next);
        }
    }

    branches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tile;

    /// Board where `0` is an obstacle, negative values are hidden tiles
    fn board(values: &[i8], rows: usize, cols: usize) -> Board {
        let tiles = values
            .iter()
            .enumerate()
            .map(|(i, &v)| match v {
                0 => Tile::obstacle(i as u32),
                v if v < 0 => Tile::hidden(i as u32, -v),
                v => Tile::revealed(i as u32, v),
            })
            .collect();
        Board::from_tiles(tiles, rows, cols).unwrap()
    }

    #[test]
    fn test_single_pair() {
        let b = board(&[3, 5, -1, -1], 1, 4);
        let r = compute_scores(&b, &[1]);
        assert_eq!(r.pairs, vec![Match::edge(1, 0)]);
        assert!(r.twins.is_empty());
        assert!(r.sequences.is_empty());
        assert_eq!(r.total_points, 1);
    }

    #[test]
    fn test_pair_and_twin_overlap() {
        let b = board(&[4, 4], 1, 2);
        let r = compute_scores(&b, &[0]);
        assert_eq!(r.pairs.len(), 1);
        assert_eq!(r.twins.len(), 1);
        assert_eq!(r.total_points, 2);
    }

    #[test]
    fn test_adjacent_pivots_share_edge_once() {
        let b = board(&[2, 6], 1, 2);
        let r = compute_scores(&b, &[0, 1]);
        assert_eq!(r.pairs.len(), 1);
        assert_eq!(r.total_points, 1);
    }

    #[test]
    fn test_hidden_and_obstacle_neighbors_ignored() {
        // Hidden 4 next to revealed 4, obstacle beside it.
        let b = board(&[4, -4, 0, 4], 2, 2);
        let r = compute_scores(&b, &[0]);
        // 0's neighbours: 2 (obstacle), 1 (hidden).
        assert!(r.is_empty());
        assert_eq!(r.total_points, 0);
    }

    #[test]
    fn test_invalid_pivots_ignored() {
        let b = board(&[4, 4, -4, 0], 2, 2);
        assert!(compute_scores(&b, &[2]).is_empty());
        assert!(compute_scores(&b, &[3]).is_empty());
        assert!(compute_scores(&b, &[99]).is_empty());
        assert!(compute_scores(&b, &[]).is_empty());
    }

    #[test]
    fn test_cyclic_sequence_wraps() {
        let b = board(&[6, 7, 1, 2], 1, 4);
        let r = compute_scores(&b, &[2]);
        assert_eq!(r.sequences.len(), 1);
        assert_eq!(r.sequences[0].coords, vec![0, 1, 2, 3]);
        assert_eq!(r.sequences[0].points, 4);
        assert_eq!(r.total_points, 4);
    }

    #[test]
    fn test_sequence_same_from_any_pivot() {
        let b = board(&[1, 2, 3], 1, 3);
        for pivot in 0..3 {
            let r = compute_scores(&b, &[pivot]);
            assert_eq!(r.sequences.len(), 1, "pivot {}", pivot);
            assert_eq!(r.sequences[0].coords, vec![0, 1, 2]);
        }
        // Several pivots on the same run still award it once.
        let r = compute_scores(&b, &[0, 1, 2]);
        assert_eq!(r.sequences.len(), 1);
        assert_eq!(r.total_points, 3);
    }

    #[test]
    fn test_descending_only_run() {
        // Pivot at the top of the run: only the descending branch extends.
        let b = board(&[5, 4, 3], 1, 3);
        let r = compute_scores(&b, &[0]);
        assert_eq!(r.sequences[0].coords, vec![2, 1, 0]);
        assert_eq!(r.sequences[0].points, 3);
    }

    #[test]
    fn test_two_short_runs_do_not_score() {
        let b = board(&[1, 2, -5], 1, 3);
        let r = compute_scores(&b, &[1]);
        assert!(r.sequences.is_empty());
    }

    #[test]
    fn test_branching_sequences() {
        // 2x3:
        //   1 2 3
        //   . 3 .
        // From pivot 1 (value 2): ascending branches 3 (below) and 3 (right).
        let b = board(&[1, 2, 3, -6, 3, -6], 2, 3);
        let r = compute_scores(&b, &[1]);
        let coords: Vec<_> = r.sequences.iter().map(|m| m.coords.clone()).collect();
        assert_eq!(coords, vec![vec![0, 1, 4], vec![0, 1, 2]]);
        assert_eq!(r.total_points, 6);
    }

    #[test]
    fn test_sequence_and_pair_together() {
        // 2x3:
        //   3 4 5
        //   . 4 .
        // The run 3-4-5 plus a 4-4 edge that is both pair and twin.
        let b = board(&[3, 4, 5, -1, 4, -1], 2, 3);
        let r = compute_scores(&b, &[1]);
        assert_eq!(r.pairs.len(), 1);
        assert_eq!(r.twins.len(), 1);
        assert_eq!(r.sequences.len(), 1);
        assert_eq!(r.total_points, 1 + 1 + 3);

        let kinds: Vec<_> = r.items().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![MatchKind::Pair, MatchKind::Twin, MatchKind::Sequence]);
        assert_eq!(r.sequence_points(), 3);
    }

    #[test]
    fn test_sequence_longer_than_cycle() {
        // 1..7 then 1 again in a single row: 8 tiles.
        let b = board(&[1, 2, 3, 4, 5, 6, 7, 1], 1, 8);
        let r = compute_scores(&b, &[7]);
        assert_eq!(r.sequences.len(), 1);
        assert_eq!(r.sequences[0].points, 8);
    }

    /// 2x7 grid whose step edges form one 14-cell loop:
    ///   1 2 3 4 5 6 7
    ///   7 6 5 4 3 2 1
    /// Columns 0 and 6 close the loop (1-7 and 7-1); the other columns are
    /// not steps. `hole` marks one cell as hidden.
    fn ring(hole: Option<usize>) -> Board {
        let mut values = [1, 2, 3, 4, 5, 6, 7, 7, 6, 5, 4, 3, 2, 1];
        if let Some(h) = hole {
            values[h] = -values[h];
        }
        board(&values, 2, 7)
    }

    #[test]
    fn test_closed_ring_branches_meet_and_do_not_score() {
        // Ascending and descending from 0 both run the whole loop and reuse
        // each other's cells, so no repeat-free chain is formed.
        let r = compute_scores(&ring(None), &[0]);
        assert!(r.sequences.is_empty());
        // Only the 1-7 edge below the pivot.
        assert_eq!(r.pairs.len(), 1);
        assert_eq!(r.twins.len(), 0);
        assert_eq!(r.total_points, 1);
    }

    #[test]
    fn test_broken_ring_scores_the_open_chain() {
        // Hiding the 4 at index 10 opens the loop into a 13-cell chain.
        let r = compute_scores(&ring(Some(10)), &[0]);
        assert_eq!(r.sequences.len(), 1);
        let chain = &r.sequences[0];
        assert_eq!(chain.points, 13);
        assert_eq!(
            chain.coords,
            vec![9, 8, 7, 0, 1, 2, 3, 4, 5, 6, 13, 12, 11]
        );
        assert_eq!(r.total_points, 1 + 13);
    }

    #[test]
    fn test_scoring_does_not_mutate_board() {
        let b = board(&[4, 4, 5], 1, 3);
        let before = b.clone();
        let _ = compute_scores(&b, &[0, 1, 2]);
        assert_eq!(b, before);
    }

    #[test]
    fn test_result_is_fresh_each_call() {
        let b = board(&[4, 4], 1, 2);
        let first = compute_scores(&b, &[0]);
        let second = compute_scores(&b, &[0]);
        assert_eq!(first, second);
    }
}
