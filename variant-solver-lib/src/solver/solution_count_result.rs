//! Contains the [`SolutionCountResult`] enum.

/// The result of counting solutions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SolutionCountResult {
    /// No solution is possible.
    None,
    /// The search space was exhausted; the count is exact.
    ExactCount(usize),
    /// The requested maximum was reached; at least this many solutions exist.
    AtLeastCount(usize),
    /// The cancellation token fired; at least this many solutions exist.
    Cancelled(usize),
    /// There was an error while counting.
    Error(String),
}

impl SolutionCountResult {
    pub fn is_none(&self) -> bool {
        matches!(self, SolutionCountResult::None)
    }

    pub fn is_exact_count(&self) -> bool {
        matches!(self, SolutionCountResult::ExactCount(_))
    }

    pub fn is_at_least_count(&self) -> bool {
        matches!(self, SolutionCountResult::AtLeastCount(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, SolutionCountResult::Cancelled(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SolutionCountResult::Error(_))
    }

    pub fn has_count(&self) -> bool {
        self.count().is_some()
    }

    pub fn count(&self) -> Option<usize> {
        match self {
            SolutionCountResult::ExactCount(count)
            | SolutionCountResult::AtLeastCount(count)
            | SolutionCountResult::Cancelled(count) => Some(*count),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<String> {
        match self {
            SolutionCountResult::Error(err) => Some(err.clone()),
            _ => None,
        }
    }
}
