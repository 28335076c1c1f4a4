//! Contains the [`TrueCandidatesResult`] enum.

use crate::prelude::*;

/// The result of a true-candidates computation.
///
/// On success the carried board's candidate masks are exactly the union of
/// each cell's values over all solutions. In counting mode the per-candidate
/// solution counts are included, saturated at the requested cap.
#[derive(Clone)]
pub enum TrueCandidatesResult {
    /// The puzzle has no solution.
    None,
    /// The puzzle has a unique solution, which the board holds.
    Solved(Box<Board>),
    /// The board holds the true candidates of a puzzle with multiple
    /// possibilities; the vector holds one solution count per candidate
    /// index when counting was requested.
    Candidates(Box<Board>, Option<Vec<usize>>),
    /// The cancellation token fired before the computation finished.
    Cancelled,
    /// There was an error while solving.
    Error(String),
}

impl TrueCandidatesResult {
    pub fn is_none(&self) -> bool {
        matches!(self, TrueCandidatesResult::None)
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, TrueCandidatesResult::Solved(_))
    }

    pub fn is_candidates(&self) -> bool {
        matches!(self, TrueCandidatesResult::Candidates(_, _))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, TrueCandidatesResult::Cancelled)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, TrueCandidatesResult::Error(_))
    }

    pub fn board(&self) -> Option<Box<Board>> {
        match self {
            TrueCandidatesResult::Solved(board) => Some(board.clone()),
            TrueCandidatesResult::Candidates(board, _) => Some(board.clone()),
            _ => None,
        }
    }

    pub fn candidate_counts(&self) -> Option<&Vec<usize>> {
        match self {
            TrueCandidatesResult::Candidates(_, counts) => counts.as_ref(),
            _ => None,
        }
    }
}
