//! Convenience re-exports of the most commonly used types.

pub use crate::board_data::{BoardData, CageData, CellParser, CellsData, CloneData, GridCell};
pub use crate::chess_constraint::ChessConstraint;
pub use crate::clone_constraint::CloneConstraint;
pub use crate::constraint_builder::ConstraintBuilder;
pub use crate::killer_cage_constraint::KillerCageConstraint;
pub use crate::message_handler::{MessageHandler, SendResult};
pub use crate::non_repeat_constraint::NonRepeatConstraint;
pub use crate::puzzle_parser::PuzzleParser;
