use thiserror::Error;

use tile_seq_core::{revealed_by, Board, MoveError, ScoreLedger, ScoringResult};

use crate::types::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("round is over")]
    RoundOver,
    #[error(transparent)]
    Move(#[from] MoveError),
}

impl TurnError {
    pub fn code(self) -> &'static str {
        match self {
            TurnError::RoundOver => "round_over",
            TurnError::Move(e) => e.code(),
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            TurnError::RoundOver => "every tile is already revealed",
            TurnError::Move(e) => e.message(),
        }
    }
}

/// Board and points after one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub board: Board,
    pub result: ScoringResult,
}

/// Apply `mv` and score it against the round's ledger
pub fn apply_turn(
    board: &Board,
    ledger: &mut ScoreLedger,
    mv: Move,
) -> Result<TurnOutcome, TurnError> {
    if board.is_fully_revealed() {
        return Err(TurnError::RoundOver);
    }

    let next = board.apply_move(mv)?;
    let result = ledger.score(&next, &revealed_by(mv));
    Ok(TurnOutcome {
        board: next,
        result,
    })
}

/// A turn whose first tile has been flipped but not yet committed
///
/// Mirrors how a person plays: flip a tile, look at it, then keep it or pick
/// a second hidden tile to swap with.
#[derive(Debug, Clone)]
pub struct PendingTurn {
    first: usize,
    before: Board,
    flipped: Board,
}

impl PendingTurn {
    pub fn begin(board: &Board, first: usize) -> Result<Self, TurnError> {
        if board.is_fully_revealed() {
            return Err(TurnError::RoundOver);
        }
        let flipped = board.reveal(first)?;
        Ok(Self {
            first,
            before: board.clone(),
            flipped,
        })
    }

    pub fn first(&self) -> usize {
        self.first
    }

    /// Board with only the first tile revealed, for display
    pub fn flipped(&self) -> &Board {
        &self.flipped
    }

    pub fn keep(self) -> Move {
        Move::Keep { first: self.first }
    }

    /// Commit a swap; `second` must be another hidden tile
    pub fn swap(self, second: usize) -> Result<Move, TurnError> {
        let mv = Move::Swap {
            first: self.first,
            second,
        };
        self.before.apply_move(mv)?;
        Ok(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tile;

    fn hidden_board(values: &[i8], rows: usize, cols: usize) -> Board {
        let tiles = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Tile::hidden(i as u32, v))
            .collect();
        Board::from_tiles(tiles, rows, cols).unwrap()
    }

    #[test]
    fn turn_scores_new_matches() {
        let board = hidden_board(&[4, 4, 1], 1, 3);
        let mut ledger = ScoreLedger::new();

        let first = apply_turn(&board, &mut ledger, Move::Keep { first: 0 }).unwrap();
        assert_eq!(first.result.total_points, 0);

        let second = apply_turn(&first.board, &mut ledger, Move::Keep { first: 1 }).unwrap();
        assert_eq!(second.result.total_points, 2);
        assert!(!second.board.is_fully_revealed());
    }

    #[test]
    fn turn_rejected_when_round_over() {
        let board = Board::from_values(&[1, 2], 1, 2).unwrap();
        let mut ledger = ScoreLedger::new();
        let err = apply_turn(&board, &mut ledger, Move::Keep { first: 0 }).unwrap_err();
        assert_eq!(err, TurnError::RoundOver);
        assert_eq!(err.code(), "round_over");
    }

    #[test]
    fn turn_rejected_for_revealed_tile() {
        let board = hidden_board(&[1, 2, 3], 1, 3).reveal(1).unwrap();
        let mut ledger = ScoreLedger::new();
        let err = apply_turn(&board, &mut ledger, Move::Keep { first: 1 }).unwrap_err();
        assert!(matches!(err, TurnError::Move(MoveError::AlreadyRevealed(1))));
        assert_eq!(err.code(), "invalid_move");
    }

    #[test]
    fn pending_turn_keep_and_swap() {
        let board = hidden_board(&[1, 2, 3], 1, 3);

        let pending = PendingTurn::begin(&board, 0).unwrap();
        assert!(pending.flipped().get(0).unwrap().is_revealed);
        assert!(!board.get(0).unwrap().is_revealed);
        assert_eq!(pending.clone().keep(), Move::Keep { first: 0 });
        assert_eq!(pending.swap(2).unwrap(), Move::Swap { first: 0, second: 2 });
    }

    #[test]
    fn pending_turn_rejects_bad_partner() {
        let board = hidden_board(&[1, 2, 3], 1, 3).reveal(2).unwrap();
        let pending = PendingTurn::begin(&board, 0).unwrap();
        assert_eq!(pending.first(), 0);
        assert!(pending.clone().swap(0).is_err());
        assert!(pending.swap(2).is_err());
        assert!(PendingTurn::begin(&board, 2).is_err());
    }
}
