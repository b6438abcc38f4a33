//! TUI state algebra: the quiz session as plain data.
//!
//! `Session` is the whole per-user state. It is passed into and returned
//! from every transition in `update`; nothing here is global.
//!
//! Design principle: Screen variants carry only per-screen transient state
//! (cursor positions). Loaded data and the running quiz live in Session.
//! List contents are derived from the bank on demand, not stored.

use crate::error::QuizError;
use crate::grouping::{describe_path, filter_path, group_names};
use crate::types::{Bank, Catalog, Grading, GroupKey, QuestionSet, SourceSpec};

// ============================================================================
// SESSION
// ============================================================================

/// Top-level quiz model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    /// Current screen, carrying per-screen cursor state.
    pub screen: Screen,
    /// Index into `Catalog::sources` once a source has loaded.
    pub source: Option<usize>,
    /// Questions of the selected source.
    pub bank: Option<Bank>,
    /// One group name per level chosen so far.
    pub path: Vec<String>,
    /// Active quiz run, present on InQuiz and Finished.
    pub quiz: Option<Quiz>,
    /// Message from the last action, cleared by the next one.
    pub notice: Option<Notice>,
}

impl Session {
    /// Fresh session on the source screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected source's spec, if any.
    pub fn current_source<'a>(&self, catalog: &'a Catalog) -> Option<&'a SourceSpec> {
        self.source.and_then(|i| catalog.sources.get(i))
    }

    /// Entries offered on a `Selecting` screen at `level`.
    ///
    /// Random mix comes first on the last level of sources that offer it;
    /// groups follow, deduplicated and sorted.
    pub fn choices(&self, catalog: &Catalog, level: usize) -> Vec<Choice> {
        let (Some(source), Some(bank)) = (self.current_source(catalog), &self.bank) else {
            return Vec::new();
        };
        let path = &self.path[..level.min(self.path.len())];

        let mut choices = Vec::new();
        if source.random_mix && level + 1 == source.levels.len() {
            choices.push(Choice::RandomMix);
        }
        choices.extend(
            group_names(&bank.questions, &source.levels, path)
                .into_iter()
                .map(Choice::Group),
        );
        choices
    }

    /// Number of questions under the current path extended by `choice`.
    pub fn count_for(&self, catalog: &Catalog, choice: &Choice) -> usize {
        let (Some(source), Some(bank)) = (self.current_source(catalog), &self.bank) else {
            return 0;
        };
        match choice {
            Choice::RandomMix => filter_path(&bank.questions, &source.levels, &self.path).len(),
            Choice::Group(name) => {
                let mut path = self.path.clone();
                path.push(name.clone());
                filter_path(&bank.questions, &source.levels, &path).len()
            }
        }
    }

    /// The grouping level shown on a `Selecting` screen.
    pub fn level_key(&self, catalog: &Catalog, level: usize) -> Option<GroupKey> {
        self.current_source(catalog)
            .and_then(|s| s.levels.get(level).copied())
    }

    /// Human-readable breadcrumb of the current path.
    pub fn breadcrumb(&self) -> String {
        describe_path(&self.path)
    }
}

// ============================================================================
// SCREENS
// ============================================================================

/// The current screen.
///
/// Each variant is a state in the navigation state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Pick a question bank.
    SelectingSource { cursor: usize },
    /// Pick a group at `level` of the source's levels.
    Selecting { level: usize, cursor: usize },
    /// Answering the quiz's current question. `cursor` is the focused option.
    InQuiz { cursor: usize },
    /// Every question answered; score shown.
    Finished,
}

/// Default screen is the source picker (used as placeholder during transitions).
impl Default for Screen {
    fn default() -> Self {
        Screen::SelectingSource { cursor: 0 }
    }
}

/// One entry on a `Selecting` screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Shuffle everything under the current path.
    RandomMix,
    /// A specific group at this level.
    Group(String),
}

// ============================================================================
// QUIZ
// ============================================================================

/// Fixed rows around the question on the answered view.
const ANSWER_CHROME_ROWS: usize = 12;

/// One quiz run over a fixed question set.
#[derive(Debug, Clone, PartialEq)]
pub struct Quiz {
    pub set: QuestionSet,
    /// What was chosen to build the set, for the caption.
    pub label: String,
    pub position: usize,
    pub score: usize,
    /// The current question has been submitted.
    pub answered: bool,
    /// Option picked but not yet submitted.
    pub selected: Option<usize>,
    /// Option submitted for the current question.
    pub last_choice: Option<usize>,
    pub finished: bool,
    pub grading: Grading,
    /// Rows scrolled down while reviewing an answer.
    pub scroll: usize,
}

impl Quiz {
    /// Start at the first question with a zero score.
    pub fn new(set: QuestionSet, label: impl Into<String>, grading: Grading) -> Self {
        Self {
            set,
            label: label.into(),
            position: 0,
            score: 0,
            answered: false,
            selected: None,
            last_choice: None,
            finished: false,
            grading,
            scroll: 0,
        }
    }

    /// Submit `choice` for the current question.
    ///
    /// Submitting an already answered question is a no-op.
    ///
    /// # Errors
    /// `NoChoiceSelected` when `choice` is None, paired with the
    /// unchanged quiz.
    pub fn submit(mut self, choice: Option<usize>) -> Result<Self, (Self, QuizError)> {
        if self.answered || self.finished {
            return Ok(self);
        }
        let Some(choice) = choice else {
            return Err((self, QuizError::NoChoiceSelected));
        };
        let correct = self
            .set
            .get(self.position)
            .is_some_and(|q| q.is_correct(choice, self.grading));
        if correct {
            self.score += 1;
        }
        self.answered = true;
        self.last_choice = Some(choice);
        Ok(self)
    }

    /// Move past an answered question, finishing after the last one.
    pub fn advance(mut self) -> Self {
        if !self.answered || self.finished {
            return self;
        }
        if self.position + 1 < self.set.len() {
            self.position += 1;
            self.answered = false;
            self.last_choice = None;
            self.selected = None;
            self.scroll = 0;
        } else {
            self.finished = true;
        }
        self
    }

    /// Replay the same set in the same order.
    pub fn restart(self) -> Self {
        Quiz::new(self.set, self.label, self.grading)
    }

    /// Whether the submitted answer was right. None before submitting.
    pub fn last_was_correct(&self) -> Option<bool> {
        let choice = self.last_choice?;
        let question = self.set.get(self.position)?;
        Some(question.is_correct(choice, self.grading))
    }

    /// Upper bound on useful scroll for the current question.
    ///
    /// No wrapped rendering has more rows than characters plus line
    /// breaks, whatever the terminal width.
    pub fn scroll_limit(&self) -> usize {
        self.set.get(self.position).map_or(0, |q| {
            let text = q.text.len()
                + q.explanation.len()
                + q.options.iter().map(String::len).sum::<usize>()
                + q.source.as_ref().map_or(0, String::len);
            text + q.options.len() + q.explanation.lines().count() + ANSWER_CHROME_ROWS
        })
    }

    /// "1 / 2"
    pub fn score_line(&self) -> String {
        format!("{} / {}", self.score, self.set.len())
    }
}

// ============================================================================
// NOTICES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Error,
    Warning,
}

/// A message surfaced to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

impl From<&QuizError> for Notice {
    fn from(err: &QuizError) -> Self {
        match err {
            QuizError::NoChoiceSelected => Notice::warning(err.to_string()),
            _ => Notice::error(err.to_string()),
        }
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move cursor up in a list.
    MoveUp,
    /// Move cursor down in a list.
    MoveDown,
    /// Pick the focused answer option without submitting.
    Choose,
    /// Pick entry N (1-based) directly.
    NumberKey(u8),
    /// Choose / submit / advance, depending on the screen.
    Enter,
    /// Practice the same set again.
    Again,
    /// Go up one level.
    Back,
    /// Return to the source screen, discarding everything.
    Home,
    /// Quit the application.
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Continue with this session.
    Session(Session),
    /// Quit the application.
    Quit,
    /// Run a side effect, then continue with the session it returns.
    Effect(Session, Effect),
}

/// Side effect requested by a pure transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Load `Catalog::sources[source]` through the question provider.
    LoadSource { source: usize },
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Question;

    fn question(text: &str, options: &[&str], correct_index: usize) -> Question {
        Question {
            text: text.into(),
            options: options.iter().map(|s| s.to_string()).collect(),
            correct_index,
            explanation: String::new(),
            system: Some("Cardio".into()),
            sub_system: None,
            source: None,
            cluster: None,
            drawer: None,
            topic: None,
        }
    }

    fn two_question_quiz() -> Quiz {
        let set = QuestionSet::new(vec![
            question("first", &["A", "B"], 0),
            question("second", &["A", "B"], 1),
        ]);
        Quiz::new(set, "Cardio", Grading::Text)
    }

    #[test]
    fn new_session_starts_on_source_screen() {
        let session = Session::new();
        assert_eq!(session.screen, Screen::SelectingSource { cursor: 0 });
        assert!(session.bank.is_none());
        assert!(session.quiz.is_none());
        assert!(session.path.is_empty());
    }

    #[test]
    fn correct_submit_adds_exactly_one() {
        let quiz = two_question_quiz().submit(Some(0)).unwrap();
        assert_eq!(quiz.score, 1);
        assert!(quiz.answered);
        assert_eq!(quiz.last_choice, Some(0));
        assert_eq!(quiz.last_was_correct(), Some(true));
    }

    #[test]
    fn wrong_submit_keeps_score() {
        let quiz = two_question_quiz().submit(Some(1)).unwrap();
        assert_eq!(quiz.score, 0);
        assert!(quiz.answered);
        assert_eq!(quiz.last_was_correct(), Some(false));
    }

    #[test]
    fn submit_without_choice_is_rejected_unchanged() {
        let before = two_question_quiz();
        let (after, err) = before.clone().submit(None).unwrap_err();
        assert_eq!(after, before);
        assert!(matches!(err, QuizError::NoChoiceSelected));
    }

    #[test]
    fn second_submit_does_not_score_twice() {
        let quiz = two_question_quiz()
            .submit(Some(0))
            .unwrap()
            .submit(Some(0))
            .unwrap();
        assert_eq!(quiz.score, 1);
    }

    #[test]
    fn advance_moves_by_one_and_clears_answer() {
        let quiz = two_question_quiz().submit(Some(1)).unwrap().advance();
        assert_eq!(quiz.position, 1);
        assert!(!quiz.answered);
        assert_eq!(quiz.last_choice, None);
        assert!(!quiz.finished);
    }

    #[test]
    fn advance_resets_scroll() {
        let mut quiz = two_question_quiz().submit(Some(0)).unwrap();
        quiz.scroll = 4;
        assert_eq!(quiz.advance().scroll, 0);
    }

    #[test]
    fn scroll_limit_grows_with_explanation() {
        let quiz = two_question_quiz();
        let short = quiz.scroll_limit();
        let mut long = quiz.clone();
        let mut questions = long.set.questions().to_vec();
        questions[0].explanation = "x".repeat(500);
        long.set = QuestionSet::new(questions);
        assert!(long.scroll_limit() >= short + 500);
    }

    #[test]
    fn advance_requires_an_answer() {
        let quiz = two_question_quiz().advance();
        assert_eq!(quiz.position, 0);
    }

    #[test]
    fn advance_from_last_question_finishes() {
        let quiz = two_question_quiz()
            .submit(Some(1))
            .unwrap()
            .advance()
            .submit(Some(1))
            .unwrap()
            .advance();
        assert!(quiz.finished);
        assert_eq!(quiz.position, 1);
        assert_eq!(quiz.score_line(), "1 / 2");
    }

    #[test]
    fn restart_resets_counters_and_keeps_order() {
        let quiz = two_question_quiz()
            .submit(Some(0))
            .unwrap()
            .advance()
            .submit(Some(1))
            .unwrap()
            .advance();
        let order_before = quiz.set.clone();

        let replay = quiz.restart();
        assert_eq!(replay.position, 0);
        assert_eq!(replay.score, 0);
        assert!(!replay.answered);
        assert!(!replay.finished);
        assert_eq!(replay.set, order_before);
    }

    #[test]
    fn no_choice_notice_is_a_warning() {
        let notice = Notice::from(&QuizError::NoChoiceSelected);
        assert_eq!(notice.level, NoticeLevel::Warning);

        let notice = Notice::from(&QuizError::EmptySelection("x".into()));
        assert_eq!(notice.level, NoticeLevel::Error);
    }

    #[test]
    fn screen_default_is_source_picker() {
        assert_eq!(Screen::default(), Screen::SelectingSource { cursor: 0 });
    }
}
