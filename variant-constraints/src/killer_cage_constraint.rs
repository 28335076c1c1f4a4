//! Contains the [`KillerCageConstraint`] struct for cages with an optional
//! sum.

use itertools::Itertools;
use std::cell::OnceCell;
use std::sync::Arc;
use variant_solver_lib::prelude::*;

/// A [`Constraint`] implementation for killer cages: a group of cells which
/// cannot repeat values and, when a sum is present, must add up to it.
///
/// The no-repeat part registers as a region. The sum is enforced two ways:
/// cheaply on every given via a running total kept in board state, and
/// through `logic_step`, which prunes candidates to the values appearing in
/// some still-possible sum combination. Combination sets are memoized on the
/// board per (cell count, remaining sum).
#[derive(Debug)]
pub struct KillerCageConstraint {
    specific_name: String,
    cells: Vec<CellIndex>,
    sum: Option<usize>,
    state_key: OnceCell<StateKey>,
}

/// Running totals of the cage's given cells.
#[derive(Clone, Default)]
struct CageState {
    given_sum: usize,
    given_count: usize,
    given_mask: u32,
}

impl KillerCageConstraint {
    pub fn new(cells: Vec<CellIndex>, sum: Option<usize>) -> Self {
        let mut cells = cells;
        cells.sort();
        let specific_name = match cells.first() {
            Some(cell) => format!("Killer Cage at {}", cell.name()),
            None => "Killer Cage".to_owned(),
        };
        Self {
            specific_name,
            cells,
            sum,
            state_key: OnceCell::new(),
        }
    }

    /// The masks of all k-value combinations summing to `need`, memoized on
    /// the board.
    fn sum_combinations(&self, board: &Board, k: usize, need: usize) -> Arc<Vec<u32>> {
        let size = board.size();
        let key = format!("killer-combos:{}:{}:{}", size, k, need);
        if let Some(memo) = board.memo(&key) {
            if let Ok(combos) = memo.downcast::<Vec<u32>>() {
                return combos;
            }
        }

        let combos: Vec<u32> = (1..=size)
            .combinations(k)
            .filter(|combo| combo.iter().sum::<usize>() == need)
            .map(|combo| values_mask(&combo))
            .collect();
        let combos = Arc::new(combos);
        board.store_memo(&key, combos.clone());
        combos
    }
}

impl Constraint for KillerCageConstraint {
    fn name(&self) -> String {
        "Killer Cage".to_owned()
    }

    fn specific_name(&self) -> String {
        self.specific_name.clone()
    }

    fn init(&self, board: &mut Board, is_repeat: bool) -> LogicResult {
        if is_repeat {
            return LogicResult::None;
        }
        if self.cells.len() > board.size() || self.cells.is_empty() {
            return LogicResult::Invalid;
        }

        let key = board.register_state(Box::new(CageState::default()));
        let _ = self.state_key.set(key);

        board.add_region(
            &self.specific_name,
            &self.cells,
            RegionKind::Custom("cage".to_owned()),
            Some(self.specific_name.clone()),
            true,
        );
        LogicResult::Changed
    }

    fn finalize(&self, board: &Board) -> LogicResult {
        let Some(target) = self.sum else {
            return LogicResult::None;
        };

        let size = board.size();
        let count = self.cells.len();
        let min_sum: usize = (1..=count).sum();
        let max_sum: usize = (size - count + 1..=size).sum();
        if target < min_sum || target > max_sum {
            return LogicResult::Invalid;
        }
        LogicResult::None
    }

    fn enforce(&self, board: &mut Board, cell: CellIndex, value: usize) -> bool {
        if !self.cells.contains(&cell) {
            return true;
        }
        let Some(&key) = self.state_key.get() else {
            return true;
        };

        let state = board.state_mut::<CageState>(key);
        state.given_sum += value;
        state.given_count += 1;
        state.given_mask |= value_mask(value);
        let given_sum = state.given_sum;
        let given_count = state.given_count;

        if let Some(target) = self.sum {
            if given_sum > target {
                return false;
            }
            if given_count == self.cells.len() && given_sum != target {
                return false;
            }
        }
        true
    }

    fn logic_step(
        &self,
        board: &mut Board,
        desc: Option<&mut LogicalStepDescList>,
    ) -> LogicResult {
        let Some(target) = self.sum else {
            return LogicResult::None;
        };
        let Some(&key) = self.state_key.get() else {
            return LogicResult::None;
        };

        let (given_sum, given_mask) = {
            let state = board.state::<CageState>(key);
            (state.given_sum, state.given_mask)
        };

        let remaining: Vec<CellIndex> = self
            .cells
            .iter()
            .copied()
            .filter(|&cell| !board.is_given(cell))
            .collect();
        if remaining.is_empty() {
            return if given_sum == target {
                LogicResult::None
            } else {
                LogicResult::Invalid
            };
        }
        if given_sum >= target {
            return LogicResult::Invalid;
        }

        let need = target - given_sum;
        let union = remaining
            .iter()
            .fold(0u32, |acc, &cell| acc | board.candidates(cell));

        let mut keep = 0u32;
        for &combo in self.sum_combinations(board, remaining.len(), need).iter() {
            if combo & given_mask != 0 || combo & !union != 0 {
                continue;
            }
            if remaining
                .iter()
                .any(|&cell| board.candidates(cell) & combo == 0)
            {
                continue;
            }
            keep |= combo;
        }

        if keep == 0 {
            if let Some(desc) = desc {
                desc.push(format!("No way for the cells to sum to {}.", need).into());
            }
            return LogicResult::Invalid;
        }

        let mut elims = EliminationList::new();
        for &cell in &remaining {
            for value in values_from_mask(board.candidates(cell) & !keep) {
                elims.add_cell_value(cell, value);
            }
        }
        if elims.is_empty() {
            return LogicResult::None;
        }

        if let Some(desc) = desc {
            desc.push(format!("Cells must sum to {} => {}.", need, elims).into());
        }
        elims.execute(board)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn cage_solver(size: usize, cells: &[(usize, usize)], sum: usize) -> Solver {
        let cu = CellUtility::new(size);
        let cells: Vec<CellIndex> = cells.iter().map(|&(row, col)| cu.cell(row, col)).collect();
        SolverBuilder::new(size)
            .with_constraint(Arc::new(KillerCageConstraint::new(cells, Some(sum))))
            .build()
            .unwrap()
    }

    #[test]
    fn test_sum_pruning() {
        let mut solver = cage_solver(9, &[(0, 0), (0, 1)], 3);
        let cu = solver.cell_utility();

        let result = solver.run_single_logical_step();
        assert!(result.is_changed());
        let desc = result.to_string();
        assert!(
            desc.starts_with("[Killer Cage at R1C1]: Cells must sum to 3 => "),
            "unexpected description: {desc}"
        );
        assert_eq!(
            solver.board().candidates(cu.cell(0, 0)),
            values_mask(&[1, 2])
        );
        assert_eq!(
            solver.board().candidates(cu.cell(0, 1)),
            values_mask(&[1, 2])
        );
    }

    #[test]
    fn test_enforce_rejects_wrong_sum() {
        let solver = cage_solver(9, &[(0, 0), (0, 1)], 10);
        let cu = solver.cell_utility();

        let mut board = solver.board().clone();
        assert!(board.set_as_given(cu.cell(0, 0), 1));
        assert!(!board.set_as_given(cu.cell(0, 1), 2));

        let mut board = solver.board().clone();
        assert!(board.set_as_given(cu.cell(0, 0), 1));
        assert!(board.set_as_given(cu.cell(0, 1), 9));
    }

    #[test]
    fn test_infeasible_sum_fails_to_build() {
        let cu = CellUtility::new(9);
        let cells = vec![cu.cell(0, 0), cu.cell(0, 1)];
        let result = SolverBuilder::new(9)
            .with_constraint(Arc::new(KillerCageConstraint::new(cells, Some(18))))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_count_with_cage() {
        // In a 4x4, a two-cell cage summing to 3 pins {1,2} onto those
        // cells; 48 of the 288 fillings qualify.
        let solver = cage_solver(4, &[(0, 0), (0, 1)], 3);
        let count = solver.find_solution_count(0, None, &Cancellation::default());
        assert_eq!(count, SolutionCountResult::ExactCount(48));
    }

    #[test]
    fn test_true_candidates_with_cage() {
        let solver = cage_solver(4, &[(0, 0), (0, 1)], 3);
        let result = solver.find_true_candidates(&Cancellation::default());
        assert!(result.is_candidates());
        let board = result.board().unwrap();
        let cu = board.cell_utility();
        assert_eq!(board.candidates(cu.cell(0, 0)), values_mask(&[1, 2]));
        assert_eq!(board.candidates(cu.cell(0, 1)), values_mask(&[1, 2]));
        assert_eq!(board.candidates(cu.cell(3, 3)), all_values_mask(4));
    }
}
