//! Convenience re-exports of the most commonly used types.

pub use crate::board::{Board, BoardData, StateKey};
pub use crate::candidate_index::CandidateIndex;
pub use crate::candidate_links::CandidateLinks;
pub use crate::cell_index::CellIndex;
pub use crate::cell_utility::CellUtility;
pub use crate::constraint::{Constraint, ConstraintState};
pub use crate::elimination_list::EliminationList;
pub use crate::logic_result::LogicResult;
pub use crate::logical_step::cell_forcing::CellForcing;
pub use crate::logical_step::constraint_logic::ConstraintLogic;
pub use crate::logical_step::hidden_single::HiddenSingle;
pub use crate::logical_step::naked_single::{AllNakedSingles, NakedSingle};
pub use crate::logical_step::naked_tuple_and_pointing::NakedTupleAndPointing;
pub use crate::logical_step::{
    LogicalStep, LogicalStepDesc, LogicalStepDescList, LogicalStepResult,
};
pub use crate::region::{Region, RegionKind};
pub use crate::solve_utility::*;
pub use crate::solver::cancellation::Cancellation;
pub use crate::solver::logical_solve_result::LogicalSolveResult;
pub use crate::solver::single_solution_result::SingleSolutionResult;
pub use crate::solver::solution_count_result::SolutionCountResult;
pub use crate::solver::solution_receiver::{
    CountSolutionReceiver, SolutionReceiver, VecSolutionReceiver,
};
pub use crate::solver::solver_builder::SolverBuilder;
pub use crate::solver::true_candidates_result::TrueCandidatesResult;
pub use crate::solver::Solver;
pub use crate::weak_links::WeakLinks;
