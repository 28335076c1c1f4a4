//! Constraint logic step: delegates one deduction round to the registered
//! constraints.

use crate::prelude::*;

/// Runs each constraint's `logic_step` in registration order, stopping at the
/// first one that changes the board or finds it invalid.
///
/// Every line a constraint emits is prefixed with the constraint's specific
/// name in brackets.
#[derive(Debug)]
pub struct ConstraintLogic;

impl LogicalStep for ConstraintLogic {
    fn name(&self) -> &'static str {
        "Constraint Logic"
    }

    fn is_active_during_brute_force_solves(&self) -> bool {
        true
    }

    fn run(&self, board: &mut Board, generate_description: bool) -> LogicalStepResult {
        let constraints = board.constraints().to_vec();
        for constraint in constraints {
            let mut desc_list = LogicalStepDescList::new();
            let result = if generate_description {
                constraint.logic_step(board, Some(&mut desc_list))
            } else {
                constraint.logic_step(board, None)
            };

            if result.is_none() {
                continue;
            }

            let desc = generate_description.then(|| {
                let prefix = format!("[{}]: ", constraint.specific_name());
                desc_list.with_prefix(&prefix).to_string().into()
            });
            return if result.is_invalid() {
                LogicalStepResult::Invalid(desc)
            } else {
                LogicalStepResult::Changed(desc)
            };
        }

        LogicalStepResult::None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Arc;

    #[derive(Debug)]
    struct RemoveCandidateConstraint {
        specific_name: String,
        candidate: CandidateIndex,
    }

    impl RemoveCandidateConstraint {
        fn new(candidate: CandidateIndex) -> Self {
            Self {
                specific_name: format!("Remove {}", candidate),
                candidate,
            }
        }
    }

    impl Constraint for RemoveCandidateConstraint {
        fn name(&self) -> String {
            "Remover".to_owned()
        }

        fn specific_name(&self) -> String {
            self.specific_name.clone()
        }

        fn logic_step(
            &self,
            board: &mut Board,
            desc: Option<&mut LogicalStepDescList>,
        ) -> LogicResult {
            if !board.has_candidate(self.candidate) {
                return LogicResult::None;
            }

            let result = board.clear_candidate(self.candidate);
            if let Some(desc) = desc {
                desc.push(format!("{} removed.", self.candidate).into());
            }
            result
        }
    }

    #[test]
    fn test_constraint_logic() {
        let cu = CellUtility::new(9);
        let candidate1 = cu.cell(0, 0).candidate(1);
        let candidate2 = cu.cell(0, 1).candidate(1);
        let mut board = Board::new(
            9,
            &[],
            vec![
                Arc::new(RemoveCandidateConstraint::new(candidate1)),
                Arc::new(RemoveCandidateConstraint::new(candidate2)),
            ],
        );
        board.finalize_constraints().unwrap();
        let step = ConstraintLogic;

        // Stepping the logic removes just the first candidate
        let result = step.run(&mut board, true);
        assert!(result.is_changed());
        assert_eq!(result.to_string(), "[Remove 1r1c1]: 1r1c1 removed.");
        assert!(!board.has_candidate(candidate1));
        assert!(board.has_candidate(candidate2));

        // Then just the second
        let result = step.run(&mut board, true);
        assert!(result.is_changed());
        assert_eq!(result.to_string(), "[Remove 1r1c2]: 1r1c2 removed.");
        assert!(!board.has_candidate(candidate2));

        // Then nothing
        assert!(step.run(&mut board, true).is_none());
    }
}
