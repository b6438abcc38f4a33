//! TUI module for the interactive quiz.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (Session, Screen, Action, Transition)
//! - `update`: Pure transitions (Session, Action) → Transition
//! - `view`: Pure rendering Session → Frame
//! - `theme`: Color and style constants
//! - `run`: Effects (terminal, key events, source loading)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
