//! Contains [`EliminationList`] for collecting and describing eliminated
//! candidates.

use crate::prelude::*;
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

/// A set of candidates to eliminate.
///
/// Logical steps collect their eliminations here, render them through the
/// [`Display`] implementation, and apply them with
/// [`EliminationList::execute`].
#[derive(Clone, Default)]
pub struct EliminationList {
    candidates: BTreeSet<CandidateIndex>,
}

impl EliminationList {
    /// Creates a new empty elimination list.
    pub fn new() -> EliminationList {
        EliminationList {
            candidates: BTreeSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn contains(&self, candidate: CandidateIndex) -> bool {
        self.candidates.contains(&candidate)
    }

    pub fn iter(&self) -> impl Iterator<Item = CandidateIndex> + '_ {
        self.candidates.iter().copied()
    }

    /// Adds a candidate to the list.
    pub fn add(&mut self, candidate: CandidateIndex) {
        self.candidates.insert(candidate);
    }

    /// Adds a candidate by cell and value.
    pub fn add_cell_value(&mut self, cell: CellIndex, value: usize) {
        self.add(cell.candidate(value));
    }

    /// Executes the eliminations on a board.
    ///
    /// # Example
    /// ```
    /// # use variant_solver_lib::prelude::*;
    /// let mut board = Board::default();
    /// let cu = board.cell_utility();
    ///
    /// let mut elims = EliminationList::new();
    /// elims.add(cu.cell(0, 0).candidate(1));
    /// elims.add(cu.cell(3, 4).candidate(3));
    ///
    /// assert!(elims.execute(&mut board).is_changed());
    /// assert!(!board.has_candidate(cu.cell(0, 0).candidate(1)));
    /// assert!(!board.has_candidate(cu.cell(3, 4).candidate(3)));
    /// ```
    pub fn execute(&self, board: &mut Board) -> LogicResult {
        let mut result = LogicResult::None;
        for candidate in self.iter() {
            if board.has_candidate(candidate) {
                match board.clear_candidate(candidate) {
                    LogicResult::Invalid => return LogicResult::Invalid,
                    _ => result = LogicResult::Changed,
                }
            }
        }

        result
    }
}

impl FromIterator<CandidateIndex> for EliminationList {
    fn from_iter<I>(iter: I) -> EliminationList
    where
        I: IntoIterator<Item = CandidateIndex>,
    {
        EliminationList {
            candidates: iter.into_iter().collect(),
        }
    }
}

impl Display for EliminationList {
    /// Describes the eliminations.
    ///
    /// Eliminations within a single cell collapse into one mask:
    /// `-12r1c1`. Otherwise the candidates group by value, each group naming
    /// its cells compactly, joined with semicolons: `-1r1c123;-2r12c1`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.candidates.is_empty() {
            return write!(f, "No eliminations");
        }

        let size = self
            .candidates
            .iter()
            .next()
            .map(|candidate| candidate.size())
            .unwrap_or_default();
        let cu = CellUtility::new(size);

        let mut by_cell: BTreeMap<CellIndex, u32> = BTreeMap::new();
        for candidate in self.iter() {
            let (cell, value) = candidate.cell_index_and_value();
            *by_cell.entry(cell).or_insert(0) |= value_mask(value);
        }

        if by_cell.len() == 1 {
            let (cell, mask) = by_cell.iter().next().expect("list is non-empty");
            return write!(f, "-{}{}", mask_to_string(*mask, size), cell);
        }

        let mut by_value: Vec<Vec<CellIndex>> = vec![vec![]; size];
        for candidate in self.iter() {
            let (cell, value) = candidate.cell_index_and_value();
            by_value[value - 1].push(cell);
        }

        let desc = (1..=size)
            .filter(|&value| !by_value[value - 1].is_empty())
            .map(|value| format!("-{}{}", value, cu.compact_name(&by_value[value - 1])))
            .join(";");
        write!(f, "{}", desc)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_single_cell_collapses() {
        let cu = CellUtility::new(9);
        let mut elims = EliminationList::new();
        elims.add_cell_value(cu.cell(0, 0), 1);
        elims.add_cell_value(cu.cell(0, 0), 2);
        assert_eq!(elims.to_string(), "-12r1c1");
    }

    #[test]
    fn test_groups_by_value() {
        let cu = CellUtility::new(9);
        let mut elims = EliminationList::new();
        elims.add_cell_value(cu.cell(0, 0), 1);
        elims.add_cell_value(cu.cell(0, 1), 1);
        elims.add_cell_value(cu.cell(0, 2), 1);
        elims.add_cell_value(cu.cell(1, 0), 2);
        assert_eq!(elims.to_string(), "-1r1c123;-2r2c1");
    }

    #[test]
    fn test_empty() {
        let elims = EliminationList::new();
        assert!(elims.is_empty());
        assert_eq!(elims.to_string(), "No eliminations");
    }
}
