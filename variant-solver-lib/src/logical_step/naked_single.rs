//! Naked single steps: promoting cells that are down to one candidate.

use crate::prelude::*;

/// A "Naked Single" is a cell reduced to a single candidate.
///
/// The board queues such cells as its mutations discover them; this step
/// promotes the first queued cell to a given. It is required for the solver
/// to function.
#[derive(Debug)]
pub struct NakedSingle;

impl LogicalStep for NakedSingle {
    fn name(&self) -> &'static str {
        "Naked Single"
    }

    fn run(&self, board: &mut Board, generate_description: bool) -> LogicalStepResult {
        while let Some(cell) = board.take_pending_single() {
            if board.is_given(cell) {
                continue;
            }

            let mask = board.candidates(cell);
            if mask == 0 {
                let desc = generate_description
                    .then(|| format!("Naked Single: {} has no candidates.", cell.name()).into());
                return LogicalStepResult::Invalid(desc);
            }

            let value = min_value(mask);
            if board.set_as_given(cell, value) {
                let desc = generate_description
                    .then(|| format!("Naked Single: {} = {}.", cell.name(), value).into());
                return LogicalStepResult::Changed(desc);
            } else {
                let desc = generate_description.then(|| {
                    format!("Naked Single: {} cannot be set to {}.", cell.name(), value).into()
                });
                return LogicalStepResult::Invalid(desc);
            }
        }

        LogicalStepResult::None
    }
}

/// Promotes naked singles until none are queued or the board is invalid.
///
/// Used during brute force only, where per-single descriptions are useless
/// overhead.
#[derive(Debug)]
pub struct AllNakedSingles;

impl LogicalStep for AllNakedSingles {
    fn name(&self) -> &'static str {
        "All Naked Singles"
    }

    fn is_active_during_logical_solves(&self) -> bool {
        false
    }

    fn is_active_during_brute_force_solves(&self) -> bool {
        true
    }

    fn run(&self, board: &mut Board, generate_description: bool) -> LogicalStepResult {
        assert!(
            !generate_description,
            "AllNakedSingles should not be used during logical solves"
        );

        let mut result = LogicalStepResult::None;
        while let Some(cell) = board.take_pending_single() {
            if board.is_given(cell) {
                continue;
            }

            let mask = board.candidates(cell);
            if mask == 0 || !board.set_as_given(cell, min_value(mask)) {
                return LogicalStepResult::Invalid(None);
            }
            result = LogicalStepResult::Changed(None);
        }

        result
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_naked_single() {
        let mut board = Board::default();
        let cu = board.cell_utility();
        let naked_single = NakedSingle;

        // There should be no naked singles on the initial board
        assert!(naked_single.run(&mut board, true).is_none());

        // Clear all candidates except 9 from r1c1
        let cell = cu.cell(0, 0);
        assert!(board.keep_cell_mask(cell, value_mask(9)).is_changed());

        // There should be a naked single in r1c1
        let result = naked_single.run(&mut board, true);
        assert!(result.is_changed());
        assert_eq!(result.to_string(), "Naked Single: R1C1 = 9.");
        assert!(board.is_given(cell));
    }

    #[test]
    fn test_naked_single_contradiction() {
        let mut board = Board::default();
        let cu = board.cell_utility();
        let naked_single = NakedSingle;

        // Restrict two cells of the same column to the same single value
        assert!(board.keep_cell_mask(cu.cell(0, 4), value_mask(5)).is_changed());
        assert!(board.keep_cell_mask(cu.cell(4, 4), value_mask(5)).is_changed());

        // The first single promotes fine, the second is a contradiction
        assert!(naked_single.run(&mut board, true).is_invalid());
    }

    #[test]
    fn test_all_naked_singles() {
        let mut board = Board::default();
        let cu = board.cell_utility();
        let all_naked_singles = AllNakedSingles;

        assert!(all_naked_singles.run(&mut board, false).is_none());

        // Set up a board which solves entirely with naked singles
        let board_str =
            "5.6....29.9....13..4...376.........232.5......5..186.32..64.38..1.37529....821.7.";
        board_str.chars().enumerate().for_each(|(i, c)| {
            if let Some(value) = c.to_digit(10) {
                assert!(board.set_as_given(cu.cell_index(i), value as usize));
            }
        });

        assert!(all_naked_singles.run(&mut board, false).is_changed());
        assert!(board.is_solved());
        assert_eq!(
            board.to_string(),
            "536187429897462135142953768681734952324596817759218643275649381418375296963821574"
        );
    }
}
