//! medprep: terminal quiz for medical exam preparation.

pub mod bank;
pub mod catalog;
pub mod error;
pub mod grouping;
pub mod outline;
pub mod tui;
pub mod types;
