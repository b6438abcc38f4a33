//! Outline formatting for a loaded source.
//!
//! Pure functions: (SourceSpec, Bank, OutputFormat) → String.
//! No I/O, no side effects.

use serde::Serialize;

use crate::grouping::{filter_path, group_names};
use crate::types::{Bank, OutputFormat, SourceSpec};

/// One group in the outline, with the questions beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineNode {
    pub name: String,
    pub questions: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutlineNode>,
}

/// The whole tree for one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outline {
    pub source: String,
    pub label: String,
    pub levels: Vec<String>,
    pub questions: usize,
    pub groups: Vec<OutlineNode>,
}

/// Build the sorted group tree for `bank` along the source's levels.
pub fn build_outline(spec: &SourceSpec, bank: &Bank) -> Outline {
    Outline {
        source: spec.id.clone(),
        label: spec.label.clone(),
        levels: spec.levels.iter().map(ToString::to_string).collect(),
        questions: bank.questions.len(),
        groups: children(spec, bank, &[]),
    }
}

fn children(spec: &SourceSpec, bank: &Bank, path: &[String]) -> Vec<OutlineNode> {
    group_names(&bank.questions, &spec.levels, path)
        .into_iter()
        .map(|name| {
            let mut next = path.to_vec();
            next.push(name.clone());
            OutlineNode {
                questions: filter_path(&bank.questions, &spec.levels, &next).len(),
                children: children(spec, bank, &next),
                name,
            }
        })
        .collect()
}

/// Format the outline of a source.
///
/// Pure function: takes data, returns formatted string.
pub fn format_outline(spec: &SourceSpec, bank: &Bank, format: OutputFormat) -> String {
    let outline = build_outline(spec, bank);
    match format {
        OutputFormat::Human => format_human(&outline, spec, bank),
        OutputFormat::Json => format_json(&outline),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(outline: &Outline, spec: &SourceSpec, bank: &Bank) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ({}) ===\n", outline.label, outline.source));
    out.push_str(&format!("Levels: {}\n\n", outline.levels.join(" > ")));

    let mut path = Vec::new();
    for node in &outline.groups {
        push_node(&mut out, node, &mut path, spec, bank);
    }
    if !outline.groups.is_empty() {
        out.push('\n');
    }

    out.push_str("=== Summary ===\n");
    out.push_str(&format!("Top-level groups: {}\n", outline.groups.len()));
    out.push_str(&format!("Total questions:  {}\n", outline.questions));

    out
}

/// `path` holds the names of the nodes above `node`.
fn push_node(
    out: &mut String,
    node: &OutlineNode,
    path: &mut Vec<String>,
    spec: &SourceSpec,
    bank: &Bank,
) {
    let depth = path.len();
    let indent = "  ".repeat(depth);
    let marker = if depth == 0 { "" } else { "└─ " };
    out.push_str(&format!(
        "{}{}{} ({})\n",
        indent, marker, node.name, node.questions
    ));

    path.push(node.name.clone());
    if let Some(description) = bank.drawer_description(&spec.levels, path) {
        out.push_str(&format!("{}   {}\n", indent, description));
    }
    for child in &node.children {
        push_node(out, child, path, spec, bank);
    }
    path.pop();
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json(outline: &Outline) -> String {
    // Only strings, counts and vectors; serialization cannot fail
    serde_json::to_string_pretty(outline).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

// ============================================================================
// TESTS
// ============================================================================
