//! Contains the [`ChessConstraint`] struct for chess-move anti-constraints.

use variant_solver_lib::prelude::*;

/// A [`Constraint`] implementation forbidding equal values a chess move
/// apart.
///
/// The whole rule is expressible as same-value weak links, added once during
/// initialization; enforcement and forcing logic then come for free.
#[derive(Debug)]
pub struct ChessConstraint {
    specific_name: String,
    offsets: Vec<(isize, isize)>,
}

impl ChessConstraint {
    /// Creates a new [`ChessConstraint`] with arbitrary offsets.
    pub fn new(specific_name: &str, offsets: Vec<(isize, isize)>) -> Self {
        Self {
            specific_name: specific_name.to_owned(),
            offsets,
        }
    }

    /// Creates a new [`ChessConstraint`] from one offset and all its
    /// reflections.
    pub fn from_symmetric_offset(specific_name: &str, offset: (isize, isize)) -> Self {
        let mut offsets = vec![offset, (offset.1, offset.0)];
        if offset.0 != 0 {
            offsets.push((-offset.0, offset.1));
            offsets.push((offset.1, -offset.0));
        }
        if offset.1 != 0 {
            offsets.push((offset.0, -offset.1));
            offsets.push((-offset.1, offset.0));
        }
        if offset.0 != 0 && offset.1 != 0 {
            offsets.push((-offset.0, -offset.1));
            offsets.push((-offset.1, -offset.0));
        }
        Self::new(specific_name, offsets)
    }

    /// The standard anti-king constraint.
    pub fn anti_king() -> Self {
        Self::from_symmetric_offset("Anti-King", (1, 1))
    }

    /// The standard anti-knight constraint.
    pub fn anti_knight() -> Self {
        Self::from_symmetric_offset("Anti-Knight", (1, 2))
    }
}

impl Constraint for ChessConstraint {
    fn name(&self) -> String {
        "Chess Moves".to_owned()
    }

    fn specific_name(&self) -> String {
        self.specific_name.clone()
    }

    fn init(&self, board: &mut Board, is_repeat: bool) -> LogicResult {
        if is_repeat {
            return LogicResult::None;
        }

        let size = board.size();
        let cu = board.cell_utility();
        for cell in cu.all_cells() {
            for &(row_offset, col_offset) in &self.offsets {
                if let Some(other) = cell.offset(row_offset, col_offset) {
                    for value in 1..=size {
                        board.add_weak_link(cell.candidate(value), other.candidate(value));
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
    fn test_anti_knight_links() {
        let solver = SolverBuilder::new(9)
            .with_constraint(Arc::new(ChessConstraint::anti_knight()))
            .build()
            .unwrap();
        let cu = solver.cell_utility();

        let mut board = solver.board().clone();
        assert!(board.set_as_given(cu.cell(4, 4), 3));
        for (row, col) in [(2, 3), (2, 5), (3, 2), (3, 6), (5, 2), (5, 6), (6, 3), (6, 5)] {
            assert!(
                !has_value(board.candidates(cu.cell(row, col)), 3),
                "r{}c{} should have lost 3",
                row + 1,
                col + 1
            );
        }
    }

    #[test]
    fn test_anti_king_anti_knight_count() {
        let solver = SolverBuilder::new(9)
            .with_constraint(Arc::new(ChessConstraint::anti_king()))
            .with_constraint(Arc::new(ChessConstraint::anti_knight()))
            .with_givens_string(
                "123456789000000000000000000000000000000000000000000000000000000000000000000000000",
            )
            .build()
            .unwrap();

        let count = solver.find_solution_count(10000, None, &Cancellation::default());
        assert_eq!(count, SolutionCountResult::ExactCount(4));
    }
}
