//! Hidden single step: a value with only one home in a region.

use crate::prelude::*;

/// A "Hidden Single" is a value that can appear in only one cell of a region
/// of full size.
///
/// The same scan also proves a board invalid when some value has no home in
/// a region at all.
#[derive(Debug)]
pub struct HiddenSingle;

impl LogicalStep for HiddenSingle {
    fn name(&self) -> &'static str {
        "Hidden Single"
    }

    fn is_active_during_brute_force_solves(&self) -> bool {
        true
    }

    fn run(&self, board: &mut Board, generate_description: bool) -> LogicalStepResult {
        let size = board.size();
        let all_values = board.all_values_mask();
        let regions = board.regions().to_vec();

        for region in regions.iter().filter(|region| region.cells().len() == size) {
            let mut at_least_once = 0u32;
            let mut more_than_once = 0u32;
            let mut given_mask = 0u32;
            for &cell in region.cells() {
                let mask = board.candidates(cell);
                if board.is_given(cell) {
                    given_mask |= mask;
                } else {
                    more_than_once |= at_least_once & mask;
                    at_least_once |= mask;
                }
            }

            let all_seen = at_least_once | given_mask;
            if all_seen != all_values {
                let missing = all_values & !all_seen;
                let desc = generate_description.then(|| {
                    format!(
                        "{} has nowhere to place {}.",
                        region.name(),
                        mask_to_string(missing, size)
                    )
                    .into()
                });
                return LogicalStepResult::Invalid(desc);
            }

            let exactly_once = at_least_once & !more_than_once;
            if exactly_once == 0 {
                continue;
            }

            let value = min_value(exactly_once);
            for &cell in region.cells() {
                if board.is_given(cell) || !has_value(board.candidates(cell), value) {
                    continue;
                }

                if board.set_as_given(cell, value) {
                    let desc = generate_description.then(|| {
                        format!(
                            "Hidden Single in {}: {} = {}.",
                            region.name(),
                            cell.name(),
                            value
                        )
                        .into()
                    });
                    return LogicalStepResult::Changed(desc);
                } else {
                    let desc = generate_description.then(|| {
                        format!(
                            "Hidden Single in {}: {} cannot be set to {}.",
                            region.name(),
                            cell.name(),
                            value
                        )
                        .into()
                    });
                    return LogicalStepResult::Invalid(desc);
                }
            }
        }

        LogicalStepResult::None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_hidden_single() {
        let mut board = Board::default();
        let cu = board.cell_utility();
        let hidden_single = HiddenSingle;

        // There should be no hidden singles on the initial board
        assert!(hidden_single.run(&mut board, true).is_none());

        // Clear 9 from all cells in row 1 except r1c1
        for col in 1..=8 {
            assert!(board.clear_value(cu.cell(0, col), 9).is_changed());
        }

        // There should be a hidden single 9 in r1c1
        let result = hidden_single.run(&mut board, true);
        assert!(result.is_changed());
        assert_eq!(result.to_string(), "Hidden Single in Row 1: R1C1 = 9.");
        assert!(board.is_given(cu.cell(0, 0)));
        assert_eq!(board.value(cu.cell(0, 0)), 9);
    }

    #[test]
    fn test_value_with_no_home() {
        let mut board = Board::default();
        let cu = board.cell_utility();
        let hidden_single = HiddenSingle;

        // Clear 9 from every cell of row 1
        for col in 0..9 {
            assert!(!board
                .clear_value(cu.cell(0, col), 9)
                .is_invalid());
        }

        let result = hidden_single.run(&mut board, true);
        assert!(result.is_invalid());
        assert_eq!(result.to_string(), "Row 1 has nowhere to place 9.");
    }
}
