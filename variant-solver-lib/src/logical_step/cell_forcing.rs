//! Cell forcing step: eliminations common to every candidate of a cell.

use crate::prelude::*;

/// "Cell Forcing" fires when all remaining candidates of a cell share a weak
/// link to the same candidate elsewhere: whichever value the cell takes,
/// that candidate dies, so it can be eliminated now.
#[derive(Debug)]
pub struct CellForcing;

impl LogicalStep for CellForcing {
    fn name(&self) -> &'static str {
        "Cell Forcing"
    }

    fn run(&self, board: &mut Board, generate_description: bool) -> LogicalStepResult {
        let size = board.size();
        let cu = board.cell_utility();

        for cell in board.all_cells() {
            if board.is_given(cell) {
                continue;
            }

            let mask = board.candidates(cell);
            if value_count(mask) < 2 {
                continue;
            }

            let mut common = CandidateLinks::new(size);
            let mut is_first = true;
            for value in values_from_mask(mask) {
                let links = board.weak_links().links_for(cu.candidate(cell, value));
                if is_first {
                    common.union(links);
                    is_first = false;
                } else {
                    common.intersect(links);
                }
            }

            if common.is_empty() {
                continue;
            }

            let elims: EliminationList = common
                .links()
                .filter(|&candidate| board.has_candidate(candidate))
                .collect();
            if elims.is_empty() {
                continue;
            }

            let desc = generate_description.then(|| {
                format!(
                    "Cell Forcing: {}{} => {}.",
                    mask_to_string(mask, size),
                    cell,
                    elims
                )
                .into()
            });

            return match elims.execute(board) {
                LogicResult::Invalid => LogicalStepResult::Invalid(desc),
                _ => LogicalStepResult::Changed(desc),
            };
        }

        LogicalStepResult::None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Arc;

    /// Links every candidate of r1c1 except 9 to the 1 in r1c2.
    #[derive(Debug)]
    struct ExtraWeakLinksConstraint;

    impl Constraint for ExtraWeakLinksConstraint {
        fn name(&self) -> String {
            "Test Extra Weak Links".to_owned()
        }

        fn init(&self, board: &mut Board, is_repeat: bool) -> LogicResult {
            if is_repeat {
                return LogicResult::None;
            }

            let cu = board.cell_utility();
            let target = cu.cell(0, 1).candidate(1);
            for value in 2..=8 {
                board.add_weak_link(cu.cell(0, 0).candidate(value), target);
            }
            LogicResult::Changed
        }
    }

    #[test]
    fn test_cell_forcing() {
        let mut board = Board::new(9, &[], vec![Arc::new(ExtraWeakLinksConstraint)]);
        board.finalize_constraints().unwrap();
        let cu = board.cell_utility();
        let cell_forcing = CellForcing;

        // No forcing is possible while r1c1 can still be 9
        assert!(cell_forcing.run(&mut board, true).is_none());

        // Remove 9 as a candidate from r1c1; now every candidate of r1c1
        // kills the 1 in r1c2 (values 2..8 via the test links, 1 via the row)
        assert!(board.clear_value(cu.cell(0, 0), 9).is_changed());

        let result = cell_forcing.run(&mut board, true);
        assert!(result.is_changed());
        assert!(!board.has_candidate(cu.cell(0, 1).candidate(1)));
        assert_eq!(
            result.to_string(),
            "Cell Forcing: 12345678r1c1 => -1r1c2."
        );
    }
}
