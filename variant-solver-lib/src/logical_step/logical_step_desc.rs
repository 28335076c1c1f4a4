//! Contains [`LogicalStepDesc`] and [`LogicalStepDescList`] for the
//! human-readable descriptions of performed deductions.

use itertools::Itertools;

/// The description of one performed deduction, e.g.
/// `"Hidden Single in Row 1: R1C4 = 5."`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicalStepDesc {
    step: String,
}

impl LogicalStepDesc {
    /// Creates a new instance where the description is prefixed with the
    /// provided string.
    #[must_use]
    pub fn with_prefix(&self, prefix: &str) -> Self {
        Self {
            step: format!("{}{}", prefix, self.step),
        }
    }
}

impl From<&str> for LogicalStepDesc {
    fn from(step: &str) -> Self {
        Self {
            step: step.to_owned(),
        }
    }
}

impl From<String> for LogicalStepDesc {
    fn from(step: String) -> Self {
        Self { step }
    }
}

impl std::fmt::Display for LogicalStepDesc {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.step)
    }
}

/// An ordered list of deduction descriptions, one per line.
#[derive(Clone, Debug, Default)]
pub struct LogicalStepDescList {
    steps: Vec<LogicalStepDesc>,
}

impl LogicalStepDescList {
    pub fn new() -> LogicalStepDescList {
        LogicalStepDescList { steps: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn push(&mut self, step: LogicalStepDesc) {
        self.steps.push(step);
    }

    pub fn extend(&mut self, other: LogicalStepDescList) {
        self.steps.extend(other.steps);
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogicalStepDesc> {
        self.steps.iter()
    }

    /// A copy of the list with every line prefixed.
    #[must_use]
    pub fn with_prefix(&self, prefix: &str) -> LogicalStepDescList {
        LogicalStepDescList {
            steps: self.steps.iter().map(|step| step.with_prefix(prefix)).collect(),
        }
    }
}

impl std::fmt::Display for LogicalStepDescList {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.steps.iter().join("\n"))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_desc_list() {
        let mut list = LogicalStepDescList::new();
        assert!(list.is_empty());

        list.push("Naked Single: R1C1 = 5.".into());
        list.push("Hidden Single in Row 2: R2C4 = 3.".into());
        assert_eq!(list.len(), 2);
        assert_eq!(
            list.to_string(),
            "Naked Single: R1C1 = 5.\nHidden Single in Row 2: R2C4 = 3."
        );

        let prefixed = list.with_prefix("[Cage]: ");
        assert_eq!(
            prefixed.to_string(),
            "[Cage]: Naked Single: R1C1 = 5.\n[Cage]: Hidden Single in Row 2: R2C4 = 3."
        );
    }
}
