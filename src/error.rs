//! Error taxonomy.
//!
//! None of these are fatal inside the navigator: they surface as a notice
//! and the user picks another route.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    /// Source file missing or unreadable.
    #[error("could not load questions from {}: {reason}", path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    /// Source file readable but not a valid question bank.
    #[error("invalid question data in {}: {reason}", path.display())]
    InvalidData { path: PathBuf, reason: String },

    /// A selection matched zero questions.
    #[error("no questions found for {0}")]
    EmptySelection(String),

    /// Submit pressed without picking an option.
    #[error("choose an answer first")]
    NoChoiceSelected,

    /// Catalog file is malformed or inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, QuizError>;
