//! Standard variant constraints and the query layer for the variant solver.
//!
//! This crate provides [`crate::constraint_builder::ConstraintBuilder`], a
//! registry mapping puzzle-format keys to constraint factories, a catalogue
//! of common constraints (no-repeat groups, chess moves, killer cages,
//! clones), the [`crate::board_data::BoardData`] JSON input format with its
//! [`crate::puzzle_parser::PuzzleParser`], and a
//! [`crate::message_handler::MessageHandler`] that executes queries and
//! streams results to a message sink.

pub mod board_data;
pub mod chess_constraint;
pub mod clone_constraint;
pub mod constraint_builder;
pub mod killer_cage_constraint;
pub mod message_handler;
pub mod non_repeat_constraint;
pub mod prelude;
pub mod puzzle_parser;
