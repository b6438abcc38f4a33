//! Grouping and question-set assembly.
//!
//! Pure functions, no I/O. The only impurity is the caller-supplied RNG
//! used by the random mix.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{QuizError, Result};
use crate::types::{GroupKey, Question, QuestionSet};

/// Separator used when a navigation path is shown as one string.
const PATH_SEPARATOR: &str = " / ";

/// Questions whose groups match `path`, level by level.
///
/// `path[i]` is compared with the question's group at `levels[i]`;
/// a path shorter than `levels` matches everything below it.
pub fn filter_path<'a>(
    questions: &'a [Question],
    levels: &[GroupKey],
    path: &[String],
) -> Vec<&'a Question> {
    questions
        .iter()
        .filter(|q| {
            levels
                .iter()
                .zip(path)
                .all(|(&key, selected)| q.group(key) == selected.as_str())
        })
        .collect()
}

/// Distinct group names at the level below `path`, sorted ascending.
///
/// Returns an empty list when `path` already covers every level.
pub fn group_names(questions: &[Question], levels: &[GroupKey], path: &[String]) -> Vec<String> {
    let Some(&key) = levels.get(path.len()) else {
        return Vec::new();
    };

    let names: BTreeSet<&str> = filter_path(questions, levels, path)
        .into_iter()
        .map(|q| q.group(key))
        .collect();

    names.into_iter().map(str::to_string).collect()
}

/// Build the question set for `path`, preserving source order.
///
/// # Errors
/// `EmptySelection` if nothing matches.
pub fn build_set(questions: &[Question], levels: &[GroupKey], path: &[String]) -> Result<QuestionSet> {
    let selected: Vec<Question> = filter_path(questions, levels, path)
        .into_iter()
        .cloned()
        .collect();

    if selected.is_empty() {
        return Err(QuizError::EmptySelection(describe_path(path)));
    }
    Ok(QuestionSet::new(selected))
}

/// Build a shuffled set of every question under `path`.
///
/// Shuffles a copy; `questions` is never reordered.
///
/// # Errors
/// `EmptySelection` if nothing matches.
pub fn random_mix<R: Rng + ?Sized>(
    questions: &[Question],
    levels: &[GroupKey],
    path: &[String],
    rng: &mut R,
) -> Result<QuestionSet> {
    let mut selected: Vec<Question> = filter_path(questions, levels, path)
        .into_iter()
        .cloned()
        .collect();

    if selected.is_empty() {
        return Err(QuizError::EmptySelection(describe_path(path)));
    }
    selected.shuffle(rng);
    Ok(QuestionSet::new(selected))
}

/// "Cardio / Valves", or "all questions" for the empty path.
pub fn describe_path(path: &[String]) -> String {
    if path.is_empty() {
        "all questions".to_string()
    } else {
        path.join(PATH_SEPARATOR)
    }
}

// ============================================================================
// TESTS
// ============================================================================
