//! Naked tuple and pointing steps, scanned together by tuple size.

use crate::prelude::*;
use itertools::Itertools;
use std::sync::Arc;

/// Scans for naked tuples and pointing, growing the tuple size from 2 up to
/// one below the board size and stopping at the first deduction found.
///
/// A "Naked Tuple" is k cells of a region whose candidates together span
/// exactly k values: those values are locked into the tuple, so anything
/// every placement of a value within the tuple sees can be eliminated. The
/// same scan detects the contradiction of more than k cells sharing the k
/// values.
///
/// "Pointing" is a value confined to k cells of a full-size region:
/// candidates seen by all k placements can be eliminated.
#[derive(Debug)]
pub struct NakedTupleAndPointing;

impl NakedTupleAndPointing {
    fn naked_tuples(
        &self,
        board: &mut Board,
        region: &Region,
        k: usize,
        generate_description: bool,
    ) -> LogicalStepResult {
        let size = board.size();
        let cu = board.cell_utility();

        let tuple_cells: Vec<CellIndex> = region
            .cells()
            .iter()
            .copied()
            .filter(|&cell| !board.is_given(cell) && value_count(board.candidates(cell)) <= k)
            .collect();
        if tuple_cells.len() < k {
            return LogicalStepResult::None;
        }

        for combination in tuple_cells.iter().copied().combinations(k) {
            let union = combination
                .iter()
                .fold(0u32, |acc, &cell| acc | board.candidates(cell));
            if value_count(union) != k {
                continue;
            }

            // A third cell stuck inside the same k values is a contradiction
            for &other in region.cells() {
                if board.is_given(other) || combination.contains(&other) {
                    continue;
                }
                if board.candidates(other) & !union == 0 {
                    let desc = generate_description.then(|| {
                        format!(
                            "Naked Tuple {} in {}: too many cells share these values.",
                            mask_to_string(union, size),
                            region.name()
                        )
                        .into()
                    });
                    return LogicalStepResult::Invalid(desc);
                }
            }

            let mut elims = EliminationList::new();
            for value in values_from_mask(union) {
                let holders: Vec<CellIndex> = combination
                    .iter()
                    .copied()
                    .filter(|&cell| has_value(board.candidates(cell), value))
                    .collect();

                let mut common = CandidateLinks::new(size);
                common.union(board.weak_links().links_for(cu.candidate(holders[0], value)));
                for &cell in &holders[1..] {
                    common.intersect(board.weak_links().links_for(cu.candidate(cell, value)));
                }

                for candidate in common.links() {
                    if board.has_candidate(candidate) {
                        elims.add(candidate);
                    }
                }
            }

            if !elims.is_empty() {
                let desc = generate_description.then(|| {
                    format!(
                        "Naked Tuple {} in {} => {}.",
                        mask_to_string(union, size),
                        region.name(),
                        elims
                    )
                    .into()
                });
                return match elims.execute(board) {
                    LogicResult::Invalid => LogicalStepResult::Invalid(desc),
                    _ => LogicalStepResult::Changed(desc),
                };
            }
        }

        LogicalStepResult::None
    }

    fn pointing(
        &self,
        board: &mut Board,
        region: &Region,
        k: usize,
        generate_description: bool,
    ) -> LogicalStepResult {
        let size = board.size();
        let cu = board.cell_utility();

        for value in 1..=size {
            let cells: Vec<CellIndex> = region
                .cells()
                .iter()
                .copied()
                .filter(|&cell| {
                    !board.is_given(cell) && has_value(board.candidates(cell), value)
                })
                .collect();
            if cells.len() != k {
                continue;
            }

            let mut common = CandidateLinks::new(size);
            common.union(board.weak_links().links_for(cu.candidate(cells[0], value)));
            for &cell in &cells[1..] {
                common.intersect(board.weak_links().links_for(cu.candidate(cell, value)));
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
                    "Pointing {}{} in {} => {}.",
                    value,
                    cu.compact_name(&cells),
                    region.name(),
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

impl LogicalStep for NakedTupleAndPointing {
    fn name(&self) -> &'static str {
        "Naked Tuple and Pointing"
    }

    fn run(&self, board: &mut Board, generate_description: bool) -> LogicalStepResult {
        let size = board.size();
        let regions: Vec<Arc<Region>> = board.regions().to_vec();

        for k in 2..size {
            for region in regions.iter() {
                let result = self.naked_tuples(board, region, k, generate_description);
                if !result.is_none() {
                    return result;
                }
            }

            for region in regions.iter().filter(|region| region.cells().len() == size) {
                let result = self.pointing(board, region, k, generate_description);
                if !result.is_none() {
                    return result;
                }
            }
        }

        LogicalStepResult::None
    }
}
