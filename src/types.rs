//! Domain types for medprep.
//!
//! Questions, question sets, grouping levels and the source catalog.
//! Loading lives in `bank` and `catalog`; these are plain data.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ============================================================================
// SENTINELS
// ============================================================================

/// Group name used when a question carries no `system`.
pub const DEFAULT_SYSTEM: &str = "General";

/// Group name used when a question carries no `sub_system` (or topic).
pub const GENERAL_TOPICS: &str = "General Topics";

/// Group name used when a question sits outside any cluster or drawer.
pub const DEFAULT_GROUP: &str = "General";

// ============================================================================
// GROUPING LEVELS
// ============================================================================

/// One level of the browse hierarchy.
///
/// A source lists the levels it walks through, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Cluster,
    System,
    Drawer,
    Topic,
    SubSystem,
}

impl GroupKey {
    /// Heading shown above the list of groups at this level.
    pub fn heading(self) -> &'static str {
        match self {
            GroupKey::Cluster => "Select a Cluster",
            GroupKey::System => "Select a Topic",
            GroupKey::Drawer => "Select a Drawer",
            GroupKey::Topic => "Select a Subject",
            GroupKey::SubSystem => "Select a Sub-Topic",
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GroupKey::Cluster => "cluster",
            GroupKey::System => "system",
            GroupKey::Drawer => "drawer",
            GroupKey::Topic => "topic",
            GroupKey::SubSystem => "sub_system",
        };
        f.write_str(name)
    }
}

// ============================================================================
// QUESTIONS
// ============================================================================

/// A single multiple-choice question.
///
/// Invariant: `options.len() >= 2` and `correct_index < options.len()`.
/// Enforced at deserialization; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
    pub system: Option<String>,
    pub sub_system: Option<String>,
    /// Citation (page, chapter) shown after answering.
    pub source: Option<String>,
    pub cluster: Option<String>,
    pub drawer: Option<String>,
    pub topic: Option<String>,
}

impl Question {
    /// The question's group name at `key`, falling back to the sentinels.
    pub fn group(&self, key: GroupKey) -> &str {
        match key {
            GroupKey::Cluster => self.cluster.as_deref().unwrap_or(DEFAULT_GROUP),
            GroupKey::System => self.system.as_deref().unwrap_or(DEFAULT_SYSTEM),
            GroupKey::Drawer => self.drawer.as_deref().unwrap_or(DEFAULT_GROUP),
            GroupKey::Topic => self.topic.as_deref().unwrap_or(GENERAL_TOPICS),
            GroupKey::SubSystem => self.sub_system.as_deref().unwrap_or(GENERAL_TOPICS),
        }
    }

    /// Text of the correct option.
    ///
    /// None when `correct_index` is out of range, which only a question
    /// built by hand (not deserialized) can be.
    pub fn correct_answer(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(String::as_str)
    }

    /// Grade a choice (an index into `options`).
    ///
    /// Out-of-range choices are never correct.
    pub fn is_correct(&self, choice: usize, grading: Grading) -> bool {
        let Some(answer) = self.correct_answer() else {
            return false;
        };
        match grading {
            Grading::Index => choice == self.correct_index,
            Grading::Text => self.options.get(choice).is_some_and(|text| text == answer),
        }
    }
}

/// Wire shape of a question record.
#[derive(Deserialize)]
struct RawQuestion {
    #[serde(alias = "text")]
    question: String,
    options: Vec<String>,
    correct_index: usize,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    system: Option<String>,
    #[serde(default)]
    sub_system: Option<String>,
    #[serde(default, alias = "source_page")]
    source: Option<String>,
}

impl<'de> Deserialize<'de> for Question {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawQuestion::deserialize(deserializer)?;
        if raw.options.len() < 2 {
            return Err(serde::de::Error::custom(format!(
                "question {:?} has {} option(s), need at least 2",
                raw.question,
                raw.options.len()
            )));
        }
        if raw.correct_index >= raw.options.len() {
            return Err(serde::de::Error::custom(format!(
                "question {:?}: correct_index {} out of range for {} options",
                raw.question,
                raw.correct_index,
                raw.options.len()
            )));
        }
        Ok(Question {
            text: raw.question,
            options: raw.options,
            correct_index: raw.correct_index,
            explanation: raw.explanation,
            system: raw.system,
            sub_system: raw.sub_system,
            source: raw.source,
            cluster: None,
            drawer: None,
            topic: None,
        })
    }
}

/// Position of a drawer in the nested layout.
///
/// Drawer names repeat across clusters and systems, so the name alone
/// does not identify one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DrawerKey {
    pub cluster: String,
    pub system: String,
    pub drawer: String,
}

impl DrawerKey {
    pub fn new(
        cluster: impl Into<String>,
        system: impl Into<String>,
        drawer: impl Into<String>,
    ) -> Self {
        Self {
            cluster: cluster.into(),
            system: system.into(),
            drawer: drawer.into(),
        }
    }

    /// The drawer a navigation path ends on.
    ///
    /// None unless `path` stops exactly at the drawer level. Levels the
    /// source does not walk take their sentinel.
    pub fn from_path(levels: &[GroupKey], path: &[String]) -> Option<Self> {
        let drawer_level = levels.iter().position(|&k| k == GroupKey::Drawer)?;
        if path.len() != drawer_level + 1 {
            return None;
        }
        let above = &levels[..drawer_level];
        let value = |key: GroupKey, fallback: &str| {
            above
                .iter()
                .position(|&k| k == key)
                .map_or_else(|| fallback.to_string(), |i| path[i].clone())
        };
        Some(Self {
            cluster: value(GroupKey::Cluster, DEFAULT_GROUP),
            system: value(GroupKey::System, DEFAULT_SYSTEM),
            drawer: path[drawer_level].clone(),
        })
    }
}

/// The normalized contents of one source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bank {
    /// All questions, in file order (flat) or key order (nested).
    pub questions: Vec<Question>,
    /// Drawer descriptions (nested layout only).
    pub descriptions: BTreeMap<DrawerKey, String>,
}

impl Bank {
    /// Description of the drawer `path` ends on, if any.
    pub fn drawer_description(&self, levels: &[GroupKey], path: &[String]) -> Option<&str> {
        let key = DrawerKey::from_path(levels, path)?;
        self.descriptions.get(&key).map(String::as_str)
    }
}

/// Ordered questions assembled for one quiz run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// On-disk shape of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// JSON array of question records.
    #[default]
    Flat,
    /// cluster → systems → drawers → content → topic → subtopic → [questions].
    Nested,
}

/// How a submitted choice is compared to the answer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grading {
    /// Compare the chosen option's text with the correct option's text.
    /// Identical option texts within a question are all graded correct.
    #[default]
    Text,
    /// Compare the chosen index with `correct_index`.
    Index,
}

/// One selectable question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Short identifier used on the command line.
    pub id: String,
    /// Display name on the source screen.
    pub label: String,
    /// JSON file, relative to the data directory unless absolute.
    pub file: PathBuf,
    #[serde(default)]
    pub layout: Layout,
    /// Browse levels, outermost first. Never empty.
    pub levels: Vec<GroupKey>,
    /// Offer a "random mix" entry on the last level.
    #[serde(default)]
    pub random_mix: bool,
}

/// All configured sources plus session-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub grading: Grading,
    #[serde(rename = "source")]
    pub sources: Vec<SourceSpec>,
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable pretty output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

// ============================================================================
// TESTS
// ============================================================================
