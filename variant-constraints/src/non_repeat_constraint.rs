//! Contains the [`NonRepeatConstraint`] struct for groups of cells which
//! cannot repeat values.

use variant_solver_lib::prelude::*;

/// A [`Constraint`] implementation for a group of cells which cannot repeat
/// values.
///
/// The group may not exceed the size of the grid. A group of exactly grid
/// size registers as a full house, so hidden singles, tuples, and pointing
/// reason over it.
#[derive(Debug)]
pub struct NonRepeatConstraint {
    specific_name: String,
    cells: Vec<CellIndex>,
}

impl NonRepeatConstraint {
    pub fn new(specific_name: &str, cells: Vec<CellIndex>) -> Self {
        Self {
            specific_name: specific_name.to_owned(),
            cells,
        }
    }

    /// The positive diagonal, from bottom-left to top-right.
    pub fn from_diagonalp(size: usize) -> Self {
        let cu = CellUtility::new(size);
        let cells = (0..size).map(|i| cu.cell(size - i - 1, i)).collect();
        Self::new("Diagonal+", cells)
    }

    /// The negative diagonal, from top-left to bottom-right.
    pub fn from_diagonaln(size: usize) -> Self {
        let cu = CellUtility::new(size);
        let cells = (0..size).map(|i| cu.cell(i, i)).collect();
        Self::new("Diagonal-", cells)
    }
}

impl Constraint for NonRepeatConstraint {
    fn name(&self) -> String {
        "Non-Repeat Group".to_owned()
    }

    fn specific_name(&self) -> String {
        self.specific_name.clone()
    }

    fn init(&self, board: &mut Board, is_repeat: bool) -> LogicResult {
        if is_repeat {
            return LogicResult::None;
        }
        if self.cells.len() > board.size() {
            return LogicResult::Invalid;
        }

        board.add_region(
            &self.specific_name,
            &self.cells,
            RegionKind::Custom("nonrepeat".to_owned()),
            Some(self.specific_name.clone()),
            true,
        );
        LogicResult::Changed
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_diagonal_regions() {
        let solver = SolverBuilder::new(9)
            .with_constraint(Arc::new(NonRepeatConstraint::from_diagonalp(9)))
            .with_constraint(Arc::new(NonRepeatConstraint::from_diagonaln(9)))
            .build()
            .unwrap();
        assert_eq!(solver.board().regions().len(), 29);

        // A given on the negative diagonal clears its value along it
        let cu = solver.cell_utility();
        let mut board = solver.board().clone();
        assert!(board.set_as_given(cu.cell(0, 0), 7));
        assert!(!has_value(board.candidates(cu.cell(4, 4)), 7));
        assert!(!has_value(board.candidates(cu.cell(8, 8)), 7));
        assert!(has_value(board.candidates(cu.cell(8, 0)), 7));
    }

    #[test]
    fn test_sudoku_x_counts() {
        let solver = SolverBuilder::new(4)
            .with_constraint(Arc::new(NonRepeatConstraint::from_diagonalp(4)))
            .with_constraint(Arc::new(NonRepeatConstraint::from_diagonaln(4)))
            .build()
            .unwrap();
        // 4x4 Sudoku X has 48 solutions
        let count = solver.find_solution_count(0, None, &Cancellation::default());
        assert_eq!(count, SolutionCountResult::ExactCount(48));
    }

    #[test]
    fn test_oversized_group_is_invalid() {
        let cu = CellUtility::new(4);
        let cells: Vec<CellIndex> = (0..5).map(|i| cu.cell_index(i)).collect();
        let result = SolverBuilder::new(4)
            .with_constraint(Arc::new(NonRepeatConstraint::new("Too big", cells)))
            .build();
        assert!(result.is_err());
    }
}
