//! Contains the [`Constraint`] trait for defining the behavior of variant
//! rules, and the [`ConstraintState`] trait for their backtrackable state.

use std::any::Any;

use crate::board::Board;
use crate::cell_index::CellIndex;
use crate::logic_result::LogicResult;
use crate::logical_step::LogicalStepDescList;

/// Constraints define extra rules beyond row, column, and box uniqueness.
///
/// A constraint instance is immutable once registered: the same instance is
/// shared by reference between a board and every clone the search makes of
/// it. Anything the constraint needs to track per board (a running cage sum,
/// say) must live in the board's state table, registered during
/// [`Constraint::init`] via [`Board::register_state`] and accessed with
/// [`Board::state`] / [`Board::state_mut`]. State slots are cloned lazily on
/// first write per search branch, so constraints pay for state copies only
/// when they actually mutate them.
///
/// All methods other than [`Constraint::name`] are optional; a constraint
/// expressible purely as weak links (added during `init`) needs nothing else.
pub trait Constraint {
    /// A generic name for the constraint which is independent of how it was
    /// initialized, such as "Killer Cage".
    fn name(&self) -> String;

    /// A name for this specific instance, such as "Killer Cage at R1C1".
    /// Used to prefix the constraint's logical step messages.
    fn specific_name(&self) -> String {
        self.name()
    }

    /// Called during board construction so the constraint can set itself up:
    /// add weak links, register regions or state, tighten cell masks, or add
    /// sub-constraints.
    ///
    /// Initialization runs to a fixed point: every constraint is called again
    /// as long as any of them reports [`LogicResult::Changed`], so they can
    /// react to each other. `is_repeat` is false only on the very first call
    /// for this constraint; one-shot setup belongs behind `!is_repeat`.
    ///
    /// Return [`LogicResult::None`] if the board is unchanged,
    /// [`LogicResult::Changed`] if it changed, or [`LogicResult::Invalid`]
    /// if the puzzle is already impossible.
    fn init(&self, _board: &mut Board, _is_repeat: bool) -> LogicResult {
        LogicResult::None
    }

    /// Called exactly once after initialization reaches its fixed point.
    ///
    /// This is the place for final feasibility checks. The board must not be
    /// changed from here; returning [`LogicResult::Changed`] is treated as a
    /// bug in the constraint. Return [`LogicResult::Invalid`] to reject the
    /// puzzle, [`LogicResult::None`] otherwise.
    fn finalize(&self, _board: &Board) -> LogicResult {
        LogicResult::None
    }

    /// Called when a cell has just been set as a given.
    ///
    /// The constraint must propagate any eliminations its rule implies and
    /// may update its registered state. All weak links of the set candidate
    /// have already been applied when this is called.
    ///
    /// Return false to signal that the rule is violated.
    fn enforce(&self, _board: &mut Board, _cell: CellIndex, _value: usize) -> bool {
        true
    }

    /// Called when `value` has just been removed as a candidate from a
    /// non-given cell. Same contract as [`Constraint::enforce`].
    ///
    /// Eliminations performed from here recurse through the board's normal
    /// enforcement, so avoid unbounded cascades.
    fn enforce_candidate_elim(&self, _board: &mut Board, _cell: CellIndex, _value: usize) -> bool {
        true
    }

    /// Performs one round of constraint-specific deductions during logical
    /// solving.
    ///
    /// If `desc` is provided, append one human-readable line per deduction
    /// made; the pipeline prefixes each line with this constraint's specific
    /// name. Track the result yourself and return an accurate
    /// [`LogicResult`]: `None` for no change, `Changed` after any
    /// elimination, `Invalid` when the rule can no longer be satisfied.
    fn logic_step(
        &self,
        _board: &mut Board,
        _desc: Option<&mut LogicalStepDescList>,
    ) -> LogicResult {
        LogicResult::None
    }
}

/// Backtrackable constraint state stored in the board's state table.
///
/// Implemented automatically for any `Clone + 'static` type.
pub trait ConstraintState: Any {
    fn clone_state(&self) -> Box<dyn ConstraintState>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any + Clone> ConstraintState for T {
    fn clone_state(&self) -> Box<dyn ConstraintState> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
