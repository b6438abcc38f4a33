//! Pure rendering: map Session state to ratatui widget trees.
//!
//! Each screen has a dedicated render function. The main `render()`
//! dispatches based on the current Screen variant. Widget-building
//! functions are pure (state in, widgets out); the only effect is
//! Frame::render_widget() which writes to the terminal buffer.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::types::{Catalog, GroupKey};

use super::state::{Choice, NoticeLevel, Quiz, Screen, Session};
use super::theme;

/// App name shown in the title bar.
const APP_TITLE: &str = "🩺 MedSchool Master";

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current screen to the terminal frame.
pub fn render(session: &Session, catalog: &Catalog, frame: &mut Frame) {
    let area = frame.area();

    // Common layout: title, content, notice, help
    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(1), // notice
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_title(session, catalog), chunks[0]);
    frame.render_widget(render_notice(session), chunks[2]);
    frame.render_widget(render_help(session), chunks[3]);

    let content_area = chunks[1];

    match &session.screen {
        Screen::SelectingSource { cursor } => {
            render_sources(catalog, *cursor, frame, content_area);
        }
        Screen::Selecting { level, cursor } => {
            render_selecting(session, catalog, *level, *cursor, frame, content_area);
        }
        Screen::InQuiz { cursor } => {
            if let Some(quiz) = &session.quiz {
                render_quiz(quiz, *cursor, frame, content_area);
            }
        }
        Screen::Finished => {
            if let Some(quiz) = &session.quiz {
                render_finished(quiz, frame, content_area);
            }
        }
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

/// Title bar: app name plus where the user is.
fn render_title(session: &Session, catalog: &Catalog) -> Paragraph<'static> {
    let mut spans = vec![Span::styled(APP_TITLE, theme::STYLE_TITLE)];

    if let Some(source) = session.current_source(catalog) {
        spans.push(Span::styled(
            format!("  {}", source.label),
            theme::STYLE_DIM,
        ));
        if !session.path.is_empty() {
            spans.push(Span::styled(
                format!(" › {}", session.breadcrumb()),
                theme::STYLE_DIM,
            ));
        }
    }

    Paragraph::new(Line::from(spans))
}

/// Help line showing available keybindings for the current screen.
fn render_help(session: &Session) -> Paragraph<'static> {
    let help_text = match &session.screen {
        Screen::SelectingSource { .. } => "[j/k] move  [Enter/1-9] choose  [q] quit",
        Screen::Selecting { .. } => "[j/k] move  [Enter/1-9] choose  [Esc] back  [h] home  [q] quit",
        Screen::InQuiz { .. } => match &session.quiz {
            Some(quiz) if quiz.answered => "[j/k] scroll  [Enter] next  [Esc] back to topics  [h] home",
            _ => "[j/k] move  [Space/1-9] pick  [Enter] check answer  [Esc] back to topics",
        },
        Screen::Finished => "[r] practice again  [Esc] back to topics  [h] home  [q] quit",
    };

    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

/// Notice line: the error or warning left by the last action.
fn render_notice(session: &Session) -> Paragraph<'static> {
    match &session.notice {
        Some(notice) => {
            let (prefix, style) = match notice.level {
                NoticeLevel::Error => ("✗ ", theme::STYLE_DANGER),
                NoticeLevel::Warning => ("⚠ ", theme::STYLE_WARNING),
            };
            Paragraph::new(Span::styled(format!("{}{}", prefix, notice.message), style))
        }
        None => Paragraph::new(""),
    }
}

/// Numbered list rows with a cursor marker.
fn list_lines(items: Vec<Line<'static>>, cursor: usize) -> Vec<Line<'static>> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let marker = if i == cursor { "  > " } else { "    " };
            let number = if i < 9 {
                format!("{}. ", i + 1)
            } else {
                "   ".to_string()
            };
            let mut spans = vec![
                Span::raw(marker),
                Span::styled(number, theme::STYLE_INTERACTIVE),
            ];
            spans.extend(item.spans);
            let line = Line::from(spans);
            if i == cursor {
                line.style(theme::STYLE_CURSOR)
            } else {
                line
            }
        })
        .collect()
}

/// Scroll so the cursor row stays visible.
fn scroll_offset(cursor: usize, header_rows: usize, area: Rect) -> u16 {
    let visible_height = area.height as usize;
    let row = cursor + header_rows;
    if row >= visible_height {
        (row - visible_height + 1) as u16
    } else {
        0
    }
}

// ============================================================================
// SCREEN: SOURCES
// ============================================================================

fn render_sources(catalog: &Catalog, cursor: usize, frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Choose Your Learning Source:",
            theme::STYLE_IMPORTANT,
        )),
        Line::from(""),
    ];
    let header_rows = lines.len();

    let items = catalog
        .sources
        .iter()
        .map(|source| {
            Line::from(vec![
                Span::styled(format!("📘 {}", source.label), theme::STYLE_IMPORTANT),
                Span::styled(format!("  ({})", source.file.display()), theme::STYLE_DIM),
            ])
        })
        .collect();
    lines.extend(list_lines(items, cursor));

    let paragraph = Paragraph::new(lines).scroll((scroll_offset(cursor, header_rows, area), 0));
    frame.render_widget(paragraph, area);
}

// ============================================================================
// SCREEN: SELECTING
// ============================================================================

fn render_selecting(
    session: &Session,
    catalog: &Catalog,
    level: usize,
    cursor: usize,
    frame: &mut Frame,
    area: Rect,
) {
    let key = session.level_key(catalog, level);
    let heading = key.map(GroupKey::heading).unwrap_or("Select");

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}:", heading), theme::STYLE_IMPORTANT)),
        Line::from(""),
    ];
    let header_rows = lines.len();

    let levels = session
        .current_source(catalog)
        .map(|s| s.levels.as_slice())
        .unwrap_or_default();
    let parent = &session.path[..level.min(session.path.len())];
    let items = session
        .choices(catalog, level)
        .into_iter()
        .map(|choice| {
            let count = session.count_for(catalog, &choice);
            let mut spans = match &choice {
                Choice::RandomMix => vec![Span::styled("🎲 Random mix", theme::STYLE_INTERACTIVE)],
                Choice::Group(name) => vec![Span::styled(format!("🔬 {}", name), theme::STYLE_IMPORTANT)],
            };
            spans.push(Span::styled(
                format!("  {} question{}", count, if count == 1 { "" } else { "s" }),
                theme::STYLE_DIM,
            ));
            if let (Some(GroupKey::Drawer), Choice::Group(name), Some(bank)) =
                (key, &choice, &session.bank)
            {
                let mut path = parent.to_vec();
                path.push(name.clone());
                if let Some(description) = bank.drawer_description(levels, &path) {
                    spans.push(Span::styled(format!("  · {}", description), theme::STYLE_DIM));
                }
            }
            Line::from(spans)
        })
        .collect();
    lines.extend(list_lines(items, cursor));

    let paragraph = Paragraph::new(lines).scroll((scroll_offset(cursor, header_rows, area), 0));
    frame.render_widget(paragraph, area);
}

// ============================================================================
// SCREEN: QUIZ
// ============================================================================

fn render_quiz(quiz: &Quiz, cursor: usize, frame: &mut Frame, area: Rect) {
    let Some(question) = quiz.set.get(quiz.position) else {
        let err = Paragraph::new("Question not found").style(theme::STYLE_DANGER);
        frame.render_widget(err, area);
        return;
    };

    let total = quiz.set.len();
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", progress_bar(quiz.position, total)),
            theme::STYLE_PROGRESS,
        )),
        Line::from(Span::styled(
            format!(
                "  Topic: {} | Question {}/{} | Score {}",
                quiz.label,
                quiz.position + 1,
                total,
                quiz.score
            ),
            theme::STYLE_DIM,
        )),
        Line::from(""),
        Line::from(Span::styled(format!("  {}", question.text), theme::STYLE_TITLE)),
        Line::from(""),
    ];
    let options_row = lines.len();

    for (i, option) in question.options.iter().enumerate() {
        let radio = if quiz.selected == Some(i) || quiz.last_choice == Some(i) {
            Span::styled("(•) ", theme::STYLE_CHECKED)
        } else {
            Span::styled("( ) ", theme::STYLE_UNCHECKED)
        };
        let mut line = Line::from(vec![
            Span::raw(if !quiz.answered && i == cursor { "  > " } else { "    " }),
            Span::styled(format!("{}. ", i + 1), theme::STYLE_INTERACTIVE),
            radio,
            Span::raw(option.clone()),
        ]);
        if quiz.answered && i == question.correct_index {
            line = line.style(theme::STYLE_SAFE);
        } else if !quiz.answered && i == cursor {
            line = line.style(theme::STYLE_CURSOR);
        }
        lines.push(line);
    }

    if quiz.answered {
        lines.push(Line::from(""));
        if quiz.last_was_correct() == Some(true) {
            lines.push(Line::from(Span::styled("  ✅ Correct!", theme::STYLE_SAFE)));
        } else {
            let verdict = match question.correct_answer() {
                Some(answer) => format!("  ❌ Incorrect. Answer: {}", answer),
                None => "  ❌ Incorrect.".to_string(),
            };
            lines.push(Line::from(Span::styled(verdict, theme::STYLE_DANGER)));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("  Explanation:", theme::STYLE_IMPORTANT)));
        lines.push(Line::from(format!("  {}", question.explanation)));
        if let Some(source) = &question.source {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("  📖 Source: {}", source),
                theme::STYLE_DIM,
            )));
        }
    }

    let offset = if quiz.answered {
        quiz.scroll.min(max_wrapped_scroll(&lines, area))
    } else {
        usize::from(scroll_offset(cursor, options_row, area))
    };
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0));
    frame.render_widget(paragraph, area);
}

/// Largest useful scroll for wrapped `lines` in `area`.
///
/// Word wrapping leaves rows partly empty, so wrapped lines are counted
/// against three quarters of the width. Over-counting keeps the last row
/// reachable.
fn max_wrapped_scroll(lines: &[Line], area: Rect) -> usize {
    let width = usize::from(area.width.max(1));
    let packed = (width * 3 / 4).max(1);
    let rows: usize = lines
        .iter()
        .map(|line| {
            let w = line.width();
            if w <= width { 1 } else { w.div_ceil(packed) }
        })
        .sum();
    rows.saturating_sub(usize::from(area.height))
}

/// Text progress bar of questions already passed.
fn progress_bar(done: usize, total: usize) -> String {
    let bar_width = 30;
    let filled = if total > 0 { (done * bar_width) / total } else { 0 };
    let pct = if total > 0 { (done * 100) / total } else { 0 };
    format!(
        "[{}{}] {}%",
        "█".repeat(filled),
        "░".repeat(bar_width - filled),
        pct
    )
}

// ============================================================================
// SCREEN: FINISHED
// ============================================================================

fn render_finished(quiz: &Quiz, frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  🎉 Topic Finished! Score: {}", quiz.score_line()),
            theme::STYLE_SAFE,
        )),
        Line::from(""),
        Line::from(Span::styled(format!("  {}", quiz.label), theme::STYLE_DIM)),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [r] ", theme::STYLE_INTERACTIVE),
            Span::raw("Practice Again 🔄"),
        ]),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// TESTS
// ============================================================================
