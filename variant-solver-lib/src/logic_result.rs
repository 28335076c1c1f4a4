//! Contains the [`LogicResult`] enum for representing the result of a logic
//! operation.

/// The outcome of a board mutation or a round of logic.
///
/// * `None`: no change to the board.
/// * `Changed`: the board changed.
/// * `Invalid`: a contradiction was found; do not continue on this board.
/// * `Solved`: every cell of the board is a given.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogicResult {
    None,
    Changed,
    Invalid,
    Solved,
}

impl LogicResult {
    pub fn is_none(&self) -> bool {
        matches!(self, LogicResult::None)
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, LogicResult::Changed)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, LogicResult::Invalid)
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, LogicResult::Solved)
    }

    /// Folds another result into this one: invalid and solved win, otherwise
    /// any change is kept.
    #[must_use]
    pub fn combine(self, other: LogicResult) -> LogicResult {
        match (self, other) {
            (LogicResult::Invalid, _) | (_, LogicResult::Invalid) => LogicResult::Invalid,
            (LogicResult::Solved, _) | (_, LogicResult::Solved) => LogicResult::Solved,
            (LogicResult::Changed, _) | (_, LogicResult::Changed) => LogicResult::Changed,
            _ => LogicResult::None,
        }
    }
}
