//! Contains the [`CloneConstraint`] struct for pairs of cells that must hold
//! equal values.

use variant_solver_lib::prelude::*;

/// A [`Constraint`] implementation forcing paired cells to be equal.
///
/// Equality is expressed as cross-value weak links: each value of one cell
/// excludes every other value of its partner, so either cell collapsing
/// immediately collapses the other.
#[derive(Debug)]
pub struct CloneConstraint {
    specific_name: String,
    pairs: Vec<(CellIndex, CellIndex)>,
}

impl CloneConstraint {
    pub fn new(specific_name: &str, pairs: Vec<(CellIndex, CellIndex)>) -> Self {
        Self {
            specific_name: specific_name.to_owned(),
            pairs,
        }
    }
}

impl Constraint for CloneConstraint {
    fn name(&self) -> String {
        "Clone".to_owned()
    }

    fn specific_name(&self) -> String {
        self.specific_name.clone()
    }

    fn init(&self, board: &mut Board, is_repeat: bool) -> LogicResult {
        if is_repeat {
            return LogicResult::None;
        }

        let size = board.size();
        for &(cell, clone) in &self.pairs {
            if cell == clone {
                continue;
            }
            for value in 1..=size {
                for other_value in 1..=size {
                    if value != other_value {
                        board.add_weak_link(cell.candidate(value), clone.candidate(other_value));
                    }
                }
            }
        }
        LogicResult::Changed
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_clone_collapses_partner() {
        let cu = CellUtility::new(9);
        let solver = SolverBuilder::new(9)
            .with_constraint(Arc::new(CloneConstraint::new(
                "Clone at r1c1",
                vec![(cu.cell(0, 0), cu.cell(4, 4))],
            )))
            .build()
            .unwrap();

        let mut board = solver.board().clone();
        assert!(board.set_as_given(cu.cell(0, 0), 7));
        assert_eq!(board.candidates(cu.cell(4, 4)), value_mask(7));
    }

    #[test]
    fn test_clone_restriction_propagates() {
        let cu = CellUtility::new(9);
        let solver = SolverBuilder::new(9)
            .with_constraint(Arc::new(CloneConstraint::new(
                "Clone at r1c1",
                vec![(cu.cell(0, 0), cu.cell(4, 4))],
            )))
            .build()
            .unwrap();

        // Restricting the clone source and running cell forcing prunes the
        // partner to the same values.
        let mut board = solver.board().clone();
        assert!(board
            .keep_cell_mask(cu.cell(0, 0), values_mask(&[1, 2]))
            .is_changed());
        let cell_forcing = CellForcing;
        let mut changed = false;
        while cell_forcing.run(&mut board, false).is_changed() {
            changed = true;
        }
        assert!(changed);
        assert_eq!(board.candidates(cu.cell(4, 4)), values_mask(&[1, 2]));
    }
}
