//! Contains [`LogicalSolveResult`] for the outcome of running logical steps
//! to a fixed point.

use crate::prelude::*;

/// The result of running logical steps until none applies.
#[derive(Debug, Clone)]
pub enum LogicalSolveResult {
    /// No logical step changed the board.
    None,
    /// The board changed but remains unsolved.
    Changed(LogicalStepDescList),
    /// The board was solved.
    Solved(LogicalStepDescList),
    /// A contradiction was found.
    Invalid(LogicalStepDescList),
}

impl LogicalSolveResult {
    pub fn is_none(&self) -> bool {
        matches!(self, LogicalSolveResult::None)
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, LogicalSolveResult::Changed(_))
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, LogicalSolveResult::Solved(_))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, LogicalSolveResult::Invalid(_))
    }

    pub fn description(&self) -> Option<&LogicalStepDescList> {
        match self {
            LogicalSolveResult::None => None,
            LogicalSolveResult::Changed(desc)
            | LogicalSolveResult::Solved(desc)
            | LogicalSolveResult::Invalid(desc) => Some(desc),
        }
    }
}

impl std::fmt::Display for LogicalSolveResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(desc) = self.description() {
            write!(f, "{}", desc)
        } else {
            write!(f, "No Description")
        }
    }
}
