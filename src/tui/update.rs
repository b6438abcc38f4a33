//! Pure state transitions: (Session, Action) → Transition.
//!
//! This is the core logic of the quiz. Fully testable without a terminal.
//! Each screen defines which actions it accepts. Unhandled actions
//! return the session unchanged (no-op).

use log::{debug, info, warn};
use rand::Rng;

use crate::error::{QuizError, Result};
use crate::grouping::{build_set, describe_path, filter_path, random_mix};
use crate::types::{Bank, Catalog, QuestionSet, SourceSpec};

use super::state::{Action, Choice, Effect, Notice, Quiz, Screen, Session, Transition};

/// Pure state transition function.
///
/// Given the session, an action, the catalog and a random source (used
/// only by the random mix), produces the next transition. The notice from
/// the previous action is cleared first.
pub fn update<R: Rng + ?Sized>(
    mut session: Session,
    action: &Action,
    catalog: &Catalog,
    rng: &mut R,
) -> Transition {
    session.notice = None;

    match action {
        Action::Quit => return Transition::Quit,
        Action::Home => {
            debug!("home: session reset");
            return Transition::Session(Session::new());
        }
        _ => {}
    }

    let screen = session.screen.clone();
    match screen {
        Screen::SelectingSource { cursor } => update_source(session, cursor, action, catalog),
        Screen::Selecting { level, cursor } => {
            update_selecting(session, level, cursor, action, catalog, rng)
        }
        Screen::InQuiz { cursor } => update_quiz(session, cursor, action, catalog),
        Screen::Finished => update_finished(session, action, catalog),
    }
}

/// Fold the outcome of `Effect::LoadSource` back into the session.
///
/// Success enters the first level with an empty path. A missing file or
/// an empty bank leaves the user on the source screen with a notice.
pub fn apply_load(mut session: Session, source: usize, result: Result<Bank>, catalog: &Catalog) -> Session {
    let label = catalog
        .sources
        .get(source)
        .map(|s| s.label.clone())
        .unwrap_or_default();

    let error = match result {
        Ok(bank) if !bank.questions.is_empty() => {
            debug!("source {}: entering level 0", label);
            session.source = Some(source);
            session.bank = Some(bank);
            session.path.clear();
            session.quiz = None;
            session.screen = Screen::Selecting { level: 0, cursor: 0 };
            return session;
        }
        Ok(_) => QuizError::EmptySelection(label),
        Err(e) => e,
    };

    warn!("source load failed: {}", error);
    session.notice = Some(Notice::from(&error));
    session.source = None;
    session.bank = None;
    session.path.clear();
    session.quiz = None;
    session.screen = Screen::SelectingSource { cursor: source };
    session
}

// ============================================================================
// PER-SCREEN HANDLERS
// ============================================================================

/// SelectingSource: cursor movement and choosing a bank to load.
fn update_source(mut session: Session, cursor: usize, action: &Action, catalog: &Catalog) -> Transition {
    let len = catalog.sources.len();

    match action {
        Action::MoveUp => {
            session.screen = Screen::SelectingSource {
                cursor: cursor.saturating_sub(1),
            };
            Transition::Session(session)
        }
        Action::MoveDown => {
            session.screen = Screen::SelectingSource {
                cursor: clamp_down(cursor, len),
            };
            Transition::Session(session)
        }
        Action::Enter => choose_source(session, cursor, len),
        Action::NumberKey(n) => match number_index(*n) {
            Some(index) => choose_source(session, index, len),
            None => Transition::Session(session),
        },
        _ => Transition::Session(session),
    }
}

fn choose_source(mut session: Session, index: usize, len: usize) -> Transition {
    if index >= len {
        return Transition::Session(session);
    }
    session.screen = Screen::SelectingSource { cursor: index };
    Transition::Effect(session, Effect::LoadSource { source: index })
}

/// Selecting: cursor movement, descending a level, starting a quiz, going up.
fn update_selecting<R: Rng + ?Sized>(
    mut session: Session,
    level: usize,
    cursor: usize,
    action: &Action,
    catalog: &Catalog,
    rng: &mut R,
) -> Transition {
    let Some(source) = session.current_source(catalog).cloned() else {
        return Transition::Session(Session::new());
    };
    let choices = session.choices(catalog, level);

    match action {
        Action::MoveUp => {
            session.screen = Screen::Selecting {
                level,
                cursor: cursor.saturating_sub(1),
            };
            Transition::Session(session)
        }
        Action::MoveDown => {
            session.screen = Screen::Selecting {
                level,
                cursor: clamp_down(cursor, choices.len()),
            };
            Transition::Session(session)
        }
        Action::Enter => match choices.get(cursor) {
            Some(choice) => select(session, &source, level, choice, catalog, rng),
            None => Transition::Session(session),
        },
        Action::NumberKey(n) => match number_index(*n).and_then(|i| choices.get(i)) {
            Some(choice) => select(session, &source, level, choice, catalog, rng),
            None => Transition::Session(session),
        },
        Action::Back => Transition::Session(go_up(session, level)),
        _ => Transition::Session(session),
    }
}

/// Apply a choice on a Selecting screen.
fn select<R: Rng + ?Sized>(
    mut session: Session,
    source: &SourceSpec,
    level: usize,
    choice: &Choice,
    catalog: &Catalog,
    rng: &mut R,
) -> Transition {
    let Some(bank) = &session.bank else {
        return Transition::Session(Session::new());
    };
    let last_level = level + 1 >= source.levels.len();

    match choice {
        Choice::RandomMix => {
            let label = match session.path.is_empty() {
                true => "Random mix".to_string(),
                false => format!("{} / Random mix", describe_path(&session.path)),
            };
            match random_mix(&bank.questions, &source.levels, &session.path, rng) {
                Ok(set) => start_quiz(session, set, label, catalog),
                Err(e) => reject(session, e),
            }
        }
        Choice::Group(name) => {
            let mut path = session.path.clone();
            path.push(name.clone());

            if last_level {
                match build_set(&bank.questions, &source.levels, &path) {
                    Ok(set) => {
                        let label = describe_path(&path);
                        session.path = path;
                        start_quiz(session, set, label, catalog)
                    }
                    Err(e) => reject(session, e),
                }
            } else if filter_path(&bank.questions, &source.levels, &path).is_empty() {
                reject(session, QuizError::EmptySelection(describe_path(&path)))
            } else {
                debug!("descending to level {}: {}", level + 1, describe_path(&path));
                session.path = path;
                session.screen = Screen::Selecting {
                    level: level + 1,
                    cursor: 0,
                };
                Transition::Session(session)
            }
        }
    }
}

/// InQuiz: pick an option, submit, advance, or leave the quiz.
fn update_quiz(mut session: Session, cursor: usize, action: &Action, catalog: &Catalog) -> Transition {
    let Some(mut quiz) = session.quiz.take() else {
        return Transition::Session(Session::new());
    };
    let option_count = quiz
        .set
        .get(quiz.position)
        .map(|q| q.options.len())
        .unwrap_or(0);
    let mut cursor = cursor;

    match action {
        Action::MoveUp if !quiz.answered => cursor = cursor.saturating_sub(1),
        Action::MoveDown if !quiz.answered => cursor = clamp_down(cursor, option_count),
        Action::MoveUp => quiz.scroll = quiz.scroll.saturating_sub(1),
        Action::MoveDown => quiz.scroll = (quiz.scroll + 1).min(quiz.scroll_limit()),
        Action::Choose if !quiz.answered && cursor < option_count => {
            quiz.selected = Some(cursor);
        }
        Action::NumberKey(n) if !quiz.answered => {
            if let Some(index) = number_index(*n).filter(|&i| i < option_count) {
                quiz.selected = Some(index);
                cursor = index;
            }
        }
        Action::Enter if !quiz.answered => {
            let selected = quiz.selected;
            quiz = match quiz.submit(selected) {
                Ok(quiz) => quiz,
                Err((quiz, e)) => {
                    warn!("submit rejected: {}", e);
                    session.notice = Some(Notice::from(&e));
                    quiz
                }
            };
        }
        Action::Enter => {
            quiz = quiz.advance();
            cursor = 0;
            if quiz.finished {
                info!("quiz finished: {} scored {}", quiz.label, quiz.score_line());
                session.quiz = Some(quiz);
                session.screen = Screen::Finished;
                return Transition::Session(session);
            }
        }
        Action::Back => {
            session.quiz = Some(quiz);
            return Transition::Session(exit_quiz(session, catalog));
        }
        _ => {}
    }

    session.quiz = Some(quiz);
    session.screen = Screen::InQuiz { cursor };
    Transition::Session(session)
}

/// Finished: replay the same set, or go back to the last selection level.
fn update_finished(mut session: Session, action: &Action, catalog: &Catalog) -> Transition {
    match action {
        Action::Again => {
            if let Some(quiz) = session.quiz.take() {
                debug!("replaying {}", quiz.label);
                session.quiz = Some(quiz.restart());
                session.screen = Screen::InQuiz { cursor: 0 };
            }
            Transition::Session(session)
        }
        Action::Back => Transition::Session(exit_quiz(session, catalog)),
        _ => Transition::Session(session),
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn start_quiz(mut session: Session, set: QuestionSet, label: String, catalog: &Catalog) -> Transition {
    info!("quiz started: {} ({} questions)", label, set.len());
    session.quiz = Some(Quiz::new(set, label, catalog.grading));
    session.screen = Screen::InQuiz { cursor: 0 };
    Transition::Session(session)
}

/// Stay on the current screen, surfacing `err`.
fn reject(mut session: Session, err: QuizError) -> Transition {
    warn!("selection rejected: {}", err);
    session.notice = Some(Notice::from(&err));
    Transition::Session(session)
}

/// Leave a quiz for the last selection level of the current source.
fn exit_quiz(mut session: Session, catalog: &Catalog) -> Session {
    session.quiz = None;
    let Some(last) = session
        .current_source(catalog)
        .map(|s| s.levels.len().saturating_sub(1))
    else {
        return Session::new();
    };
    session.path.truncate(last);
    session.screen = Screen::Selecting {
        level: last,
        cursor: 0,
    };
    session
}

/// Go up one selection level; from level 0 back to the source screen.
fn go_up(mut session: Session, level: usize) -> Session {
    if level == 0 {
        let cursor = session.source.unwrap_or(0);
        session.source = None;
        session.bank = None;
        session.path.clear();
        session.screen = Screen::SelectingSource { cursor };
    } else {
        session.path.truncate(level - 1);
        session.screen = Screen::Selecting {
            level: level - 1,
            cursor: 0,
        };
    }
    session
}

fn clamp_down(cursor: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (cursor + 1).min(len - 1) }
}

/// 1-based number key → 0-based index.
fn number_index(n: u8) -> Option<usize> {
    usize::from(n).checked_sub(1)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;
    use crate::tui::state::NoticeLevel;
    use crate::types::{Catalog, Grading, GroupKey, Layout, Question};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::path::PathBuf;

    fn q(text: &str, system: &str, sub_system: Option<&str>, correct_index: usize) -> Question {
        Question {
            text: text.into(),
            options: vec!["A".into(), "B".into()],
            correct_index,
            explanation: format!("because {}", text),
            system: Some(system.into()),
            sub_system: sub_system.map(String::from),
            source: None,
            cluster: None,
            drawer: None,
            topic: None,
        }
    }

    /// 2 Cardio (keys 0 and 1), 1 Renal.
    fn scenario_bank() -> Bank {
        Bank {
            questions: vec![
                q("c1", "Cardio", Some("Valves"), 0),
                q("r1", "Renal", None, 0),
                q("c2", "Cardio", None, 1),
            ],
            ..Default::default()
        }
    }

    fn catalog(levels: Vec<GroupKey>, random_mix: bool) -> Catalog {
        Catalog {
            grading: Grading::Text,
            sources: vec![SourceSpec {
                id: "test".into(),
                label: "Test Bank".into(),
                file: PathBuf::from("test.json"),
                layout: Layout::Flat,
                levels,
                random_mix,
            }],
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(3)
    }

    fn step(session: Session, action: Action, catalog: &Catalog) -> Session {
        match update(session, &action, catalog, &mut rng()) {
            Transition::Session(s) => s,
            other => panic!("Expected Session, got {:?}", other),
        }
    }

    fn loaded(catalog: &Catalog) -> Session {
        apply_load(Session::new(), 0, Ok(scenario_bank()), catalog)
    }

    // -- SelectingSource --

    #[test]
    fn quit_from_any_screen() {
        let catalog = catalog(vec![GroupKey::System], false);
        let result = update(loaded(&catalog), &Action::Quit, &catalog, &mut rng());
        assert_eq!(result, Transition::Quit);
    }

    #[test]
    fn choosing_a_source_requests_a_load() {
        let catalog = builtin_catalog();
        let result = update(
            Session::new(),
            &Action::NumberKey(2),
            &catalog,
            &mut rng(),
        );
        match result {
            Transition::Effect(session, Effect::LoadSource { source }) => {
                assert_eq!(source, 1);
                assert_eq!(session.screen, Screen::SelectingSource { cursor: 1 });
            }
            other => panic!("Expected LoadSource effect, got {:?}", other),
        }
    }

    #[test]
    fn number_key_past_the_list_is_noop() {
        let catalog = builtin_catalog();
        let session = step(Session::new(), Action::NumberKey(9), &catalog);
        assert_eq!(session, Session::new());
    }

    #[test]
    fn source_cursor_clamps() {
        let catalog = builtin_catalog();
        let mut session = Session::new();
        for _ in 0..5 {
            session = step(session, Action::MoveDown, &catalog);
        }
        assert_eq!(session.screen, Screen::SelectingSource { cursor: 2 });
        let session = step(session, Action::MoveUp, &catalog);
        assert_eq!(session.screen, Screen::SelectingSource { cursor: 1 });
    }

    #[test]
    fn failed_load_stays_on_source_screen() {
        let catalog = catalog(vec![GroupKey::System], false);
        let err = QuizError::DataUnavailable {
            path: PathBuf::from("test.json"),
            reason: "No such file or directory".into(),
        };
        let session = apply_load(Session::new(), 0, Err(err), &catalog);

        assert_eq!(session.screen, Screen::SelectingSource { cursor: 0 });
        assert!(session.bank.is_none());
        let notice = session.notice.unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.contains("test.json"));
    }

    #[test]
    fn empty_bank_is_empty_selection() {
        let catalog = catalog(vec![GroupKey::System], false);
        let session = apply_load(Session::new(), 0, Ok(Bank::default()), &catalog);
        assert_eq!(session.screen, Screen::SelectingSource { cursor: 0 });
        assert!(session.notice.unwrap().message.contains("Test Bank"));
    }

    #[test]
    fn successful_load_enters_first_level() {
        let catalog = catalog(vec![GroupKey::System], false);
        let session = loaded(&catalog);
        assert_eq!(session.screen, Screen::Selecting { level: 0, cursor: 0 });
        assert_eq!(session.source, Some(0));
        assert_eq!(
            session.choices(&catalog, 0),
            vec![Choice::Group("Cardio".into()), Choice::Group("Renal".into())]
        );
    }

    // -- Selecting --

    #[test]
    fn single_level_choice_starts_quiz() {
        let catalog = catalog(vec![GroupKey::System], false);
        let session = step(loaded(&catalog), Action::Enter, &catalog);

        assert_eq!(session.screen, Screen::InQuiz { cursor: 0 });
        let quiz = session.quiz.unwrap();
        assert_eq!(quiz.set.len(), 2);
        assert_eq!(quiz.label, "Cardio");
        assert_eq!((quiz.position, quiz.score, quiz.answered), (0, 0, false));
        assert_eq!(session.path, vec!["Cardio".to_string()]);
    }

    #[test]
    fn two_level_choice_descends() {
        let catalog = catalog(vec![GroupKey::System, GroupKey::SubSystem], true);
        let session = step(loaded(&catalog), Action::Enter, &catalog);

        assert_eq!(session.screen, Screen::Selecting { level: 1, cursor: 0 });
        assert_eq!(session.path, vec!["Cardio".to_string()]);
        assert_eq!(
            session.choices(&catalog, 1),
            vec![
                Choice::RandomMix,
                Choice::Group("General Topics".into()),
                Choice::Group("Valves".into()),
            ]
        );
    }

    #[test]
    fn sub_topic_choice_filters() {
        let catalog = catalog(vec![GroupKey::System, GroupKey::SubSystem], true);
        let session = step(loaded(&catalog), Action::Enter, &catalog);
        let session = step(session, Action::NumberKey(3), &catalog);

        let quiz = session.quiz.unwrap();
        assert_eq!(quiz.set.len(), 1);
        assert_eq!(quiz.set.questions()[0].text, "c1");
        assert_eq!(quiz.label, "Cardio / Valves");
    }

    #[test]
    fn random_mix_spans_the_topic() {
        let catalog = catalog(vec![GroupKey::System, GroupKey::SubSystem], true);
        let session = step(loaded(&catalog), Action::Enter, &catalog);
        let session = step(session, Action::Enter, &catalog);

        let quiz = session.quiz.unwrap();
        let mut texts: Vec<&str> = quiz.set.questions().iter().map(|q| q.text.as_str()).collect();
        texts.sort();
        assert_eq!(texts, vec!["c1", "c2"]);
        assert_eq!(quiz.label, "Cardio / Random mix");
        assert_eq!(session.path, vec!["Cardio".to_string()]);
    }

    #[test]
    fn back_from_first_level_returns_to_sources() {
        let catalog = catalog(vec![GroupKey::System], false);
        let session = step(loaded(&catalog), Action::Back, &catalog);
        assert_eq!(session.screen, Screen::SelectingSource { cursor: 0 });
        assert!(session.bank.is_none());
        assert!(session.source.is_none());
    }

    #[test]
    fn back_from_sub_level_pops_path() {
        let catalog = catalog(vec![GroupKey::System, GroupKey::SubSystem], true);
        let session = step(loaded(&catalog), Action::Enter, &catalog);
        let session = step(session, Action::Back, &catalog);
        assert_eq!(session.screen, Screen::Selecting { level: 0, cursor: 0 });
        assert!(session.path.is_empty());
        assert!(session.bank.is_some());
    }

    // -- InQuiz --

    fn in_cardio_quiz(catalog: &Catalog) -> Session {
        step(loaded(catalog), Action::Enter, catalog)
    }

    #[test]
    fn submit_without_choice_warns_and_keeps_state() {
        let catalog = catalog(vec![GroupKey::System], false);
        let before = in_cardio_quiz(&catalog);
        let after = step(before.clone(), Action::Enter, &catalog);

        assert_eq!(after.quiz, before.quiz);
        assert_eq!(after.screen, before.screen);
        assert_eq!(after.notice.unwrap().level, NoticeLevel::Warning);
    }

    #[test]
    fn choose_then_enter_submits_focused_option() {
        let catalog = catalog(vec![GroupKey::System], false);
        let session = in_cardio_quiz(&catalog);
        let session = step(session, Action::Choose, &catalog);
        let session = step(session, Action::Enter, &catalog);

        let quiz = session.quiz.unwrap();
        assert!(quiz.answered);
        assert_eq!(quiz.score, 1);
        assert_eq!(quiz.last_choice, Some(0));
    }

    #[test]
    fn cursor_is_frozen_after_answering() {
        let catalog = catalog(vec![GroupKey::System], false);
        let session = in_cardio_quiz(&catalog);
        let session = step(session, Action::NumberKey(2), &catalog);
        let session = step(session, Action::Enter, &catalog);
        let session = step(session, Action::MoveUp, &catalog);
        assert_eq!(session.screen, Screen::InQuiz { cursor: 1 });
    }

    #[test]
    fn movement_scrolls_the_answered_view() {
        let catalog = catalog(vec![GroupKey::System], false);
        let session = in_cardio_quiz(&catalog);
        let session = step(session, Action::NumberKey(1), &catalog);
        let session = step(session, Action::Enter, &catalog);

        let session = step(session, Action::MoveDown, &catalog);
        let session = step(session, Action::MoveDown, &catalog);
        assert_eq!(session.quiz.as_ref().unwrap().scroll, 2);

        let session = step(session, Action::MoveUp, &catalog);
        assert_eq!(session.quiz.as_ref().unwrap().scroll, 1);

        let session = step(session, Action::Enter, &catalog);
        assert_eq!(session.quiz.unwrap().scroll, 0);
    }

    #[test]
    fn scroll_stops_at_the_limit() {
        let catalog = catalog(vec![GroupKey::System], false);
        let session = in_cardio_quiz(&catalog);
        let session = step(session, Action::NumberKey(1), &catalog);
        let mut session = step(session, Action::Enter, &catalog);
        let limit = session.quiz.as_ref().unwrap().scroll_limit();
        for _ in 0..limit + 5 {
            session = step(session, Action::MoveDown, &catalog);
        }
        assert_eq!(session.quiz.unwrap().scroll, limit);
    }

    #[test]
    fn notice_clears_on_next_action() {
        let catalog = catalog(vec![GroupKey::System], false);
        let session = step(in_cardio_quiz(&catalog), Action::Enter, &catalog);
        assert!(session.notice.is_some());
        let session = step(session, Action::MoveDown, &catalog);
        assert!(session.notice.is_none());
    }

    #[test]
    fn cardio_scenario_ends_one_of_two() {
        let catalog = catalog(vec![GroupKey::System], false);
        let session = in_cardio_quiz(&catalog);

        // First question: key is A, answer B.
        let session = step(session, Action::NumberKey(2), &catalog);
        let session = step(session, Action::Enter, &catalog);
        {
            let quiz = session.quiz.as_ref().unwrap();
            assert_eq!(quiz.score, 0);
            assert!(quiz.answered);
        }

        // Advance, then answer B correctly.
        let session = step(session, Action::Enter, &catalog);
        assert_eq!(session.quiz.as_ref().unwrap().position, 1);
        let session = step(session, Action::NumberKey(2), &catalog);
        let session = step(session, Action::Enter, &catalog);
        let session = step(session, Action::Enter, &catalog);

        assert_eq!(session.screen, Screen::Finished);
        let quiz = session.quiz.unwrap();
        assert!(quiz.finished);
        assert_eq!(quiz.score_line(), "1 / 2");
    }

    #[test]
    fn back_during_quiz_returns_to_topics() {
        let catalog = catalog(vec![GroupKey::System], false);
        let session = step(in_cardio_quiz(&catalog), Action::Back, &catalog);
        assert_eq!(session.screen, Screen::Selecting { level: 0, cursor: 0 });
        assert!(session.quiz.is_none());
        assert!(session.path.is_empty());
    }

    // -- Finished --

    fn finished(catalog: &Catalog) -> Session {
        let mut session = in_cardio_quiz(catalog);
        for action in [
            Action::NumberKey(1),
            Action::Enter,
            Action::Enter,
            Action::NumberKey(2),
            Action::Enter,
            Action::Enter,
        ] {
            session = step(session, action, catalog);
        }
        assert_eq!(session.screen, Screen::Finished);
        session
    }

    #[test]
    fn practice_again_replays_same_order() {
        let catalog = catalog(vec![GroupKey::System], false);
        let done = finished(&catalog);
        let set_before = done.quiz.as_ref().unwrap().set.clone();

        let session = step(done, Action::Again, &catalog);
        assert_eq!(session.screen, Screen::InQuiz { cursor: 0 });
        let quiz = session.quiz.unwrap();
        assert_eq!((quiz.position, quiz.score), (0, 0));
        assert!(!quiz.answered && !quiz.finished);
        assert_eq!(quiz.set, set_before);
    }

    #[test]
    fn enter_on_finished_keeps_the_score() {
        let catalog = catalog(vec![GroupKey::System], false);
        let done = finished(&catalog);
        let before = done.quiz.clone();

        let session = step(done, Action::Enter, &catalog);
        assert_eq!(session.screen, Screen::Finished);
        assert_eq!(session.quiz, before);
    }

    #[test]
    fn back_from_finished_clears_quiz() {
        let catalog = catalog(vec![GroupKey::System, GroupKey::SubSystem], true);
        let session = step(loaded(&catalog), Action::Enter, &catalog);
        let mut session = step(session, Action::NumberKey(3), &catalog);
        for action in [Action::NumberKey(1), Action::Enter, Action::Enter] {
            session = step(session, action, &catalog);
        }
        assert_eq!(session.screen, Screen::Finished);

        let session = step(session, Action::Back, &catalog);
        assert_eq!(session.screen, Screen::Selecting { level: 1, cursor: 0 });
        assert_eq!(session.path, vec!["Cardio".to_string()]);
        assert!(session.quiz.is_none());
    }

    #[test]
    fn home_resets_everything() {
        let catalog = catalog(vec![GroupKey::System], false);
        let session = step(finished(&catalog), Action::Home, &catalog);
        assert_eq!(session, Session::new());
    }

    #[test]
    fn index_grading_from_catalog_applies() {
        let mut catalog = catalog(vec![GroupKey::System], false);
        catalog.grading = Grading::Index;
        let session = in_cardio_quiz(&catalog);
        assert_eq!(session.quiz.unwrap().grading, Grading::Index);
    }
}
