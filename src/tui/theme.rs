//! TUI color semantics and style constants.
//!
//! Pure data, consumed by the rendering layer for visual consistency.
//!
//! Color semantics:
//! - Green: correct answer, final score
//! - Yellow: warnings (submitting without a choice)
//! - Red: wrong answer, load errors
//! - Cyan: interactive elements (numbers, keybinding hints)
//! - Dim: de-emphasized (counts, citations, breadcrumbs)
//! - Bold: important (labels, group names)

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Correct / success: green.
pub const STYLE_SAFE: Style = Style::new().fg(Color::Green);

/// Warning / attention needed: yellow.
pub const STYLE_WARNING: Style = Style::new().fg(Color::Yellow);

/// Wrong answer / error: red.
pub const STYLE_DANGER: Style = Style::new().fg(Color::Red);

/// Interactive element / keybinding hint: cyan.
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// De-emphasized metadata: dark gray.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Important text: bold.
pub const STYLE_IMPORTANT: Style = Style::new().add_modifier(Modifier::BOLD);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar and question text.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Cursor row in a list.
pub const STYLE_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Radio button: picked.
pub const STYLE_CHECKED: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Radio button: not picked.
pub const STYLE_UNCHECKED: Style = Style::new().fg(Color::DarkGray);

/// Quiz progress bar.
pub const STYLE_PROGRESS: Style = Style::new().fg(Color::Cyan);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_feedback_colors() {
        assert_eq!(STYLE_SAFE.fg, Some(Color::Green));
        assert_eq!(STYLE_DANGER.fg, Some(Color::Red));
        assert_eq!(STYLE_WARNING.fg, Some(Color::Yellow));
    }

    #[test]
    fn cursor_style_is_reversed() {
        assert!(STYLE_CURSOR.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn picked_radio_is_bold() {
        assert!(STYLE_CHECKED.add_modifier.contains(Modifier::BOLD));
    }
}
