//! Contains [`LogicalStepResult`], the outcome of running one logical step.

use crate::prelude::*;

/// The outcome of a logical step, carrying a description when one was
/// requested.
#[derive(Clone, Debug)]
pub enum LogicalStepResult {
    /// The step found nothing to do.
    None,
    /// The step changed the board.
    Changed(Option<LogicalStepDesc>),
    /// The step found the board to be invalid.
    Invalid(Option<LogicalStepDesc>),
}

impl LogicalStepResult {
    pub fn is_none(&self) -> bool {
        matches!(self, LogicalStepResult::None)
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, LogicalStepResult::Changed(_))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, LogicalStepResult::Invalid(_))
    }

    pub fn description(&self) -> Option<&LogicalStepDesc> {
        match self {
            LogicalStepResult::None => None,
            LogicalStepResult::Changed(desc) => desc.as_ref(),
            LogicalStepResult::Invalid(desc) => desc.as_ref(),
        }
    }
}

impl std::fmt::Display for LogicalStepResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(desc) = self.description() {
            write!(f, "{desc}")
        } else {
            write!(f, "No Description")
        }
    }
}
