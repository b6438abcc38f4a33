//! Question provider: load a source file into a normalized [`Bank`].
//!
//! Structure:
//! - Trait: `QuestionProvider`, the seam the navigator's effect layer calls
//! - Pure functions: parse either JSON layout from a string
//! - Effect functions: `FileProvider` reads from a data directory

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;

use crate::error::{QuizError, Result};
use crate::types::{Bank, DrawerKey, Layout, Question, SourceSpec};

/// Anything that can turn a source description into questions.
pub trait QuestionProvider {
    /// Load and normalize every question of `source`.
    ///
    /// # Errors
    /// `DataUnavailable` if the file cannot be read, `InvalidData` if it
    /// does not parse.
    fn load(&self, source: &SourceSpec) -> Result<Bank>;
}

// ============================================================================
// FILE PROVIDER
// ============================================================================

/// Reads source files relative to a data directory.
#[derive(Debug, Clone)]
pub struct FileProvider {
    data_dir: PathBuf,
}

impl FileProvider {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Absolute or data-dir-relative location of a source's file.
    pub fn resolve(&self, source: &SourceSpec) -> PathBuf {
        if source.file.is_absolute() {
            source.file.clone()
        } else {
            self.data_dir.join(&source.file)
        }
    }
}

impl QuestionProvider for FileProvider {
    fn load(&self, source: &SourceSpec) -> Result<Bank> {
        let path = self.resolve(source);
        let contents = fs::read_to_string(&path).map_err(|e| {
            warn!("source {}: cannot read {}: {}", source.id, path.display(), e);
            QuizError::DataUnavailable {
                path: path.clone(),
                reason: e.to_string(),
            }
        })?;

        let bank = parse_bank(&contents, source.layout, &path)?;
        info!(
            "source {}: loaded {} questions from {}",
            source.id,
            bank.questions.len(),
            path.display()
        );
        Ok(bank)
    }
}

/// Provider backed by banks already in memory, keyed by source id.
///
/// Unknown ids report `DataUnavailable`, as a missing file would.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    banks: BTreeMap<String, Bank>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bank(mut self, source_id: impl Into<String>, bank: Bank) -> Self {
        self.banks.insert(source_id.into(), bank);
        self
    }
}

impl QuestionProvider for MemoryProvider {
    fn load(&self, source: &SourceSpec) -> Result<Bank> {
        self.banks
            .get(&source.id)
            .cloned()
            .ok_or_else(|| QuizError::DataUnavailable {
                path: source.file.clone(),
                reason: "not loaded".to_string(),
            })
    }
}

// ============================================================================
// PARSING (pure)
// ============================================================================

/// Parse a source file's contents according to its layout.
///
/// `origin` is only used in error messages.
pub fn parse_bank(contents: &str, layout: Layout, origin: &Path) -> Result<Bank> {
    let invalid = |e: serde_json::Error| QuizError::InvalidData {
        path: origin.to_path_buf(),
        reason: e.to_string(),
    };

    match layout {
        Layout::Flat => {
            let questions: Vec<Question> = serde_json::from_str(contents).map_err(invalid)?;
            Ok(Bank {
                questions,
                descriptions: BTreeMap::new(),
            })
        }
        Layout::Nested => {
            let root: BTreeMap<String, NestedCluster> =
                serde_json::from_str(contents).map_err(invalid)?;
            Ok(flatten_nested(root))
        }
    }
}

#[derive(Deserialize)]
struct NestedCluster {
    #[serde(default)]
    systems: BTreeMap<String, NestedSystem>,
}

#[derive(Deserialize)]
struct NestedSystem {
    #[serde(default)]
    drawers: BTreeMap<String, NestedDrawer>,
}

#[derive(Deserialize)]
struct NestedDrawer {
    #[serde(default)]
    description: String,
    /// topic → subtopic → questions
    #[serde(default)]
    content: BTreeMap<String, BTreeMap<String, Vec<Question>>>,
}

/// Flatten the nested layout, stamping each question with its enclosing keys.
fn flatten_nested(root: BTreeMap<String, NestedCluster>) -> Bank {
    let mut bank = Bank::default();

    for (cluster_name, cluster) in root {
        for (system_key, system) in cluster.systems {
            for (drawer_name, drawer) in system.drawers {
                if !drawer.description.is_empty() {
                    let key = DrawerKey::new(&cluster_name, &system_key, &drawer_name);
                    bank.descriptions.insert(key, drawer.description.clone());
                }
                for (topic, subtopics) in drawer.content {
                    for (subtopic, questions) in subtopics {
                        bank.questions.extend(questions.into_iter().map(|mut q| {
                            q.cluster = Some(cluster_name.clone());
                            q.system = Some(system_key.clone());
                            q.drawer = Some(drawer_name.clone());
                            q.topic = Some(topic.clone());
                            q.sub_system = Some(subtopic.clone());
                            q
                        }));
                    }
                }
            }
        }
    }

    bank
}

// ============================================================================
// TESTS
// ============================================================================
