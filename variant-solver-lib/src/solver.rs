//! Contains the [`Solver`] struct which is the main entry point for running
//! queries against a puzzle.

pub mod cancellation;
pub mod logical_solve_result;
pub mod single_solution_result;
pub mod solution_count_result;
pub mod solution_receiver;
pub mod solver_builder;
pub mod true_candidates_result;

use crate::prelude::*;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Runs queries against a puzzle board.
///
/// Construct through [`SolverBuilder`], which assembles the board, runs
/// constraint initialization, and applies the givens. The solver itself is
/// immutable apart from [`Solver::run_logical_solve`] and
/// [`Solver::run_single_logical_step`], which advance its board; the search
/// queries work on clones and leave the solver's board untouched.
///
/// Every potentially long-running query takes a [`Cancellation`] and polls it
/// often enough to react within roughly 100 milliseconds.
#[derive(Clone)]
pub struct Solver {
    board: Board,
    logical_steps: Vec<Arc<dyn LogicalStep>>,
    brute_force_steps: Vec<Arc<dyn LogicalStep>>,
    custom_info: HashMap<String, String>,
}

impl Solver {
    pub(crate) fn from_parts(board: Board, custom_info: HashMap<String, String>) -> Solver {
        let all_steps = Self::standard_logic();
        let logical_steps = all_steps
            .iter()
            .filter(|step| step.is_active_during_logical_solves())
            .cloned()
            .collect();
        let brute_force_steps = all_steps
            .iter()
            .filter(|step| step.is_active_during_brute_force_solves())
            .cloned()
            .collect();

        Solver {
            board,
            logical_steps,
            brute_force_steps,
            custom_info,
        }
    }

    /// The fixed deduction pipeline, in order. The logical and brute-force
    /// pipelines are the active subsets of this list.
    fn standard_logic() -> Vec<Arc<dyn LogicalStep>> {
        vec![
            Arc::new(AllNakedSingles),
            Arc::new(NakedSingle),
            Arc::new(HiddenSingle),
            Arc::new(ConstraintLogic),
            Arc::new(CellForcing),
            Arc::new(NakedTupleAndPointing),
        ]
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn cell_utility(&self) -> CellUtility {
        self.board.cell_utility()
    }

    pub fn get_custom_info(&self, key: &str) -> Option<&str> {
        self.custom_info.get(key).map(|value| value.as_str())
    }

    /// Runs the first logical step that does anything and returns its
    /// result, with description. This mutates the solver's board.
    pub fn run_single_logical_step(&mut self) -> LogicalStepResult {
        for step in self.logical_steps.clone() {
            let step_result = step.run(&mut self.board, true);
            if !step_result.is_none() {
                return step_result;
            }
        }

        LogicalStepResult::None
    }

    /// Runs logical steps until none applies, the board solves, or a
    /// contradiction is found. This mutates the solver's board.
    pub fn run_logical_solve(&mut self) -> LogicalSolveResult {
        let mut desc_list = LogicalStepDescList::new();
        let mut changed = false;
        loop {
            if self.board.is_solved() {
                desc_list.push("Solved!".into());
                return LogicalSolveResult::Solved(desc_list);
            }

            let step_result = self.run_single_logical_step();
            if step_result.is_none() {
                break;
            }

            changed = true;

            if let Some(desc) = step_result.description() {
                desc_list.push(desc.clone());
            }

            if step_result.is_invalid() {
                return LogicalSolveResult::Invalid(desc_list);
            }
        }

        if changed {
            LogicalSolveResult::Changed(desc_list)
        } else {
            LogicalSolveResult::None
        }
    }

    /// Runs the cheap deduction loop the search uses to prune branches:
    /// naked single draining alternated with hidden single scans and
    /// constraint logic, until a pass through the pipeline changes nothing.
    pub fn run_brute_force_logic(&self, board: &mut Board) -> LogicResult {
        let mut changed = false;
        loop {
            if board.is_solved() {
                return LogicResult::Solved;
            }

            let mut step_changed = false;
            for step in self.brute_force_steps.iter() {
                let result = step.run(board, false);
                if result.is_invalid() {
                    return LogicResult::Invalid;
                }
                if result.is_changed() {
                    step_changed = true;
                    break;
                }
            }

            if !step_changed {
                break;
            }
            changed = true;
        }

        if changed {
            LogicResult::Changed
        } else {
            LogicResult::None
        }
    }

    /// Chooses the non-given cell with the fewest (but at least two)
    /// candidates, ties broken by cell order.
    ///
    /// When `ignore` is provided, cells whose remaining candidates all lie
    /// inside their ignore mask are skipped.
    fn find_unassigned_cell(&self, board: &Board, ignore: Option<&[u32]>) -> Option<CellIndex> {
        let mut best: Option<(CellIndex, usize)> = None;
        for cell in board.all_cells() {
            if board.is_given(cell) {
                continue;
            }

            let mask = board.candidates(cell);
            if let Some(ignore) = ignore {
                if mask & !ignore[cell.index()] == 0 {
                    continue;
                }
            }

            let count = value_count(mask);
            if count < 2 {
                continue;
            }
            if best.map_or(true, |(_, best_count)| count < best_count) {
                best = Some((cell, count));
                if count == 2 {
                    break;
                }
            }
        }

        best.map(|(cell, _)| cell)
    }

    /// Finds the deterministic first solution: branch values are tried in
    /// ascending order.
    pub fn find_first_solution(&self, cancellation: &Cancellation) -> SingleSolutionResult {
        self.find_solution_from::<StdRng>(&self.board, None, cancellation)
    }

    /// Finds a solution with branch values drawn from the given generator.
    /// Seeding the generator makes the result reproducible.
    pub fn find_random_solution<R: Rng>(
        &self,
        rng: &mut R,
        cancellation: &Cancellation,
    ) -> SingleSolutionResult {
        self.find_solution_from(&self.board, Some(rng), cancellation)
    }

    fn find_solution_from<R: Rng>(
        &self,
        start: &Board,
        mut rng: Option<&mut R>,
        cancellation: &Cancellation,
    ) -> SingleSolutionResult {
        let mut stack: Vec<Box<Board>> = vec![Box::new(start.clone())];

        while let Some(mut board) = stack.pop() {
            if cancellation.check() {
                return SingleSolutionResult::Cancelled;
            }

            match self.run_brute_force_logic(&mut board) {
                LogicResult::Invalid => continue,
                LogicResult::Solved => return SingleSolutionResult::Solved(board),
                _ => {}
            }

            let Some(cell) = self.find_unassigned_cell(&board, None) else {
                return SingleSolutionResult::Solved(board);
            };

            let mask = board.candidates(cell);
            let value = match rng.as_mut() {
                Some(rng) => random_value(mask, &mut **rng),
                None => min_value(mask),
            };

            // LIFO: push the refutation branch first so the chosen value is
            // explored first.
            let mut without = board.clone();
            if !without.clear_value(cell, value).is_invalid() {
                stack.push(without);
            }
            if board.set_as_given(cell, value) {
                stack.push(board);
            }
        }

        SingleSolutionResult::None
    }

    /// Counts the solutions of the puzzle.
    ///
    /// A `max_solutions` of zero counts without bound. Each solution is
    /// offered to the receiver, if one is given, which may stop the count
    /// early; the receiver also gets occasional progress pings.
    pub fn find_solution_count(
        &self,
        max_solutions: usize,
        receiver: Option<&mut dyn SolutionReceiver>,
        cancellation: &Cancellation,
    ) -> SolutionCountResult {
        self.count_solutions_from(
            &self.board,
            max_solutions,
            cancellation,
            None,
            receiver,
            None,
        )
    }

    fn count_solutions_from(
        &self,
        start: &Board,
        max_solutions: usize,
        cancellation: &Cancellation,
        mut seen: Option<&mut HashSet<Vec<usize>>>,
        mut receiver: Option<&mut dyn SolutionReceiver>,
        mut on_solution: Option<&mut dyn FnMut(&Board)>,
    ) -> SolutionCountResult {
        let mut stack: Vec<Box<Board>> = vec![Box::new(start.clone())];
        let mut count = 0usize;
        let mut progress = 0usize;

        while let Some(mut board) = stack.pop() {
            if cancellation.check() {
                return SolutionCountResult::Cancelled(count);
            }

            progress += 1;
            if progress % 1024 == 0 {
                if let Some(receiver) = receiver.as_mut() {
                    receiver.progress_ping(progress);
                }
            }

            match self.run_brute_force_logic(&mut board) {
                LogicResult::Invalid => continue,
                LogicResult::Solved => {
                    let solution: Vec<usize> =
                        board.all_cells().map(|cell| board.value(cell)).collect();
                    let fresh = match seen.as_mut() {
                        Some(seen) => seen.insert(solution),
                        None => true,
                    };
                    if !fresh {
                        continue;
                    }

                    count += 1;
                    if let Some(on_solution) = on_solution.as_mut() {
                        on_solution(&board);
                    }
                    if let Some(receiver) = receiver.as_mut() {
                        if !receiver.receive(board) {
                            return SolutionCountResult::AtLeastCount(count);
                        }
                    }
                    if max_solutions > 0 && count >= max_solutions {
                        return SolutionCountResult::AtLeastCount(count);
                    }
                    continue;
                }
                _ => {}
            }

            let Some(cell) = self.find_unassigned_cell(&board, None) else {
                continue;
            };

            let mask = board.candidates(cell);
            let value = min_value(mask);

            let mut without = board.clone();
            if !without.clear_value(cell, value).is_invalid() {
                stack.push(without);
            }
            if board.set_as_given(cell, value) {
                stack.push(board);
            }
        }

        if count == 0 {
            SolutionCountResult::None
        } else {
            SolutionCountResult::ExactCount(count)
        }
    }

    /// Computes the true candidates of the puzzle: for every cell, the set
    /// of values that appear in at least one solution.
    pub fn find_true_candidates(&self, cancellation: &Cancellation) -> TrueCandidatesResult {
        self.true_candidates_internal(None, cancellation)
    }

    /// Computes the true candidates along with a per-candidate solution
    /// count, exact up to `max_solutions_per_candidate` and saturating there.
    pub fn find_true_candidates_with_count(
        &self,
        max_solutions_per_candidate: usize,
        cancellation: &Cancellation,
    ) -> TrueCandidatesResult {
        self.true_candidates_internal(Some(max_solutions_per_candidate.max(1)), cancellation)
    }

    fn true_candidates_internal(
        &self,
        max_per_candidate: Option<usize>,
        cancellation: &Cancellation,
    ) -> TrueCandidatesResult {
        let cu = self.cell_utility();
        let mut board = self.board.clone();
        match self.run_brute_force_logic(&mut board) {
            LogicResult::Invalid => return TrueCandidatesResult::None,
            LogicResult::Solved => return TrueCandidatesResult::Solved(Box::new(board)),
            _ => {}
        }

        // Per cell, the candidates already certified by a witnessed solution
        // or refuted and removed.
        let mut attempted: Vec<u32> = vec![0; board.num_cells()];
        let mut counts: Option<Vec<usize>> =
            max_per_candidate.map(|_| vec![0; board.num_candidates()]);
        let mut seen: HashSet<Vec<usize>> = HashSet::new();

        loop {
            if cancellation.check() {
                return TrueCandidatesResult::Cancelled;
            }

            let Some(cell) = self.find_unassigned_cell(&board, Some(&attempted)) else {
                break;
            };

            let mut removed_any = false;
            let untried = board.candidates(cell) & !attempted[cell.index()];
            for value in values_from_mask(untried) {
                if cancellation.check() {
                    return TrueCandidatesResult::Cancelled;
                }

                // An earlier enumeration may have certified or capped this
                // value in the meantime.
                if attempted[cell.index()] & value_mask(value) != 0 {
                    continue;
                }
                attempted[cell.index()] |= value_mask(value);
                if !has_value(board.candidates(cell), value) {
                    continue;
                }

                let mut seed = board.clone();
                if !seed.set_as_given(cell, value) {
                    if board.clear_value(cell, value).is_invalid() {
                        return TrueCandidatesResult::None;
                    }
                    removed_any = true;
                    continue;
                }

                match (max_per_candidate, counts.as_mut()) {
                    (Some(cap), Some(counts)) => {
                        let candidate = cu.candidate(cell, value).index();
                        let budget = cap - counts[candidate];
                        let attempted = &mut attempted;
                        let mut record = |solved: &Board| {
                            for solved_cell in solved.all_cells() {
                                let solved_value = solved.value(solved_cell);
                                let index = cu.candidate(solved_cell, solved_value).index();
                                if counts[index] < cap {
                                    counts[index] += 1;
                                    if counts[index] >= cap {
                                        attempted[solved_cell.index()] |=
                                            value_mask(solved_value);
                                    }
                                }
                            }
                        };
                        let result = self.count_solutions_from(
                            &seed,
                            budget,
                            cancellation,
                            Some(&mut seen),
                            None,
                            Some(&mut record),
                        );
                        match result {
                            SolutionCountResult::Cancelled(_) => {
                                return TrueCandidatesResult::Cancelled
                            }
                            SolutionCountResult::Error(err) => {
                                return TrueCandidatesResult::Error(err)
                            }
                            _ => {}
                        }
                        if counts[candidate] == 0 {
                            if board.clear_value(cell, value).is_invalid() {
                                return TrueCandidatesResult::None;
                            }
                            removed_any = true;
                        }
                    }
                    _ => match self.find_solution_from::<StdRng>(&seed, None, cancellation) {
                        SingleSolutionResult::None => {
                            if board.clear_value(cell, value).is_invalid() {
                                return TrueCandidatesResult::None;
                            }
                            removed_any = true;
                        }
                        SingleSolutionResult::Solved(solution) => {
                            // Every value of the witnessed solution is a true
                            // candidate; skip certifying those again.
                            for solved_cell in solution.all_cells() {
                                attempted[solved_cell.index()] |=
                                    value_mask(solution.value(solved_cell));
                            }
                        }
                        SingleSolutionResult::Cancelled => {
                            return TrueCandidatesResult::Cancelled
                        }
                        SingleSolutionResult::Error(err) => {
                            return TrueCandidatesResult::Error(err)
                        }
                    },
                }
            }

            if removed_any {
                match self.run_brute_force_logic(&mut board) {
                    LogicResult::Invalid => return TrueCandidatesResult::None,
                    LogicResult::Solved => {
                        return TrueCandidatesResult::Solved(Box::new(board))
                    }
                    _ => {}
                }
            }
        }

        if board.is_solved() {
            TrueCandidatesResult::Solved(Box::new(board))
        } else {
            TrueCandidatesResult::Candidates(Box::new(board), counts)
        }
    }
}
