//! Source catalog: which question banks exist and how to browse them.
//!
//! Encodes the three shipped banks as the built-in default and lets a
//! `catalog.toml` replace them.
//!
//! Structure:
//! - Constants: well-known file names
//! - Pure functions: built-in catalog, TOML parsing, validation
//! - Effect functions: catalog lookup on disk

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{QuizError, Result};
use crate::types::{Catalog, Grading, GroupKey, Layout, SourceSpec};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Application directory name under the platform config dir.
pub const APP_DIR: &str = "medprep";

/// Catalog file name looked up in the data and config directories.
pub const CATALOG_FILENAME: &str = "catalog.toml";

/// Log file written while the quiz owns the terminal.
pub const LOG_FILENAME: &str = "medprep.log";

/// Textbook-based flat bank.
pub const HARRISON_FILE: &str = "harrison_questions.json";

/// Personal-summary flat bank with sub-topics.
pub const SUMMARY_FILE: &str = "summary_questions.json";

/// Nested cluster/drawer bank.
pub const INTEGRATIVE_FILE: &str = "integrative_questions.json";

// ============================================================================
// PURE FUNCTIONS
// ============================================================================

/// The catalog used when no `catalog.toml` is found.
pub fn builtin_catalog() -> Catalog {
    Catalog {
        grading: Grading::default(),
        sources: vec![
            SourceSpec {
                id: "harrison".into(),
                label: "Harrison's Principles".into(),
                file: PathBuf::from(HARRISON_FILE),
                layout: Layout::Flat,
                levels: vec![GroupKey::System],
                random_mix: false,
            },
            SourceSpec {
                id: "summary".into(),
                label: "My Personal Summary".into(),
                file: PathBuf::from(SUMMARY_FILE),
                layout: Layout::Flat,
                levels: vec![GroupKey::System, GroupKey::SubSystem],
                random_mix: true,
            },
            SourceSpec {
                id: "integrative".into(),
                label: "Integrative Review".into(),
                file: PathBuf::from(INTEGRATIVE_FILE),
                layout: Layout::Nested,
                levels: vec![
                    GroupKey::Cluster,
                    GroupKey::System,
                    GroupKey::Drawer,
                    GroupKey::Topic,
                    GroupKey::SubSystem,
                ],
                random_mix: true,
            },
        ],
    }
}

/// Parse and validate a catalog from TOML text.
pub fn parse_catalog(contents: &str) -> Result<Catalog> {
    let catalog: Catalog =
        toml::from_str(contents).map_err(|e| QuizError::Config(e.to_string()))?;
    validate(&catalog)?;
    Ok(catalog)
}

/// Check catalog invariants: at least one source, unique ids, non-empty levels.
pub fn validate(catalog: &Catalog) -> Result<()> {
    if catalog.sources.is_empty() {
        return Err(QuizError::Config("catalog defines no sources".into()));
    }

    let mut seen = BTreeSet::new();
    for source in &catalog.sources {
        if !seen.insert(source.id.as_str()) {
            return Err(QuizError::Config(format!(
                "duplicate source id: {}",
                source.id
            )));
        }
        if source.levels.is_empty() {
            return Err(QuizError::Config(format!(
                "source {} has no levels",
                source.id
            )));
        }
    }
    Ok(())
}

impl Catalog {
    /// Look up a source by id.
    pub fn find(&self, id: &str) -> Option<&SourceSpec> {
        self.sources.iter().find(|s| s.id == id)
    }
}

/// Candidate catalog locations, most specific first.
pub fn catalog_candidates(explicit: Option<&Path>, data_dir: &Path) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(path) = explicit {
        candidates.push(path.to_path_buf());
    }
    candidates.push(data_dir.join(CATALOG_FILENAME));
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join(APP_DIR).join(CATALOG_FILENAME));
    }
    candidates
}

/// Where the quiz writes its log: the cache dir, else the temp dir.
pub fn log_file_path(cache_dir: Option<PathBuf>) -> PathBuf {
    cache_dir
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join(LOG_FILENAME)
}

// ============================================================================
// EFFECT FUNCTIONS
// ============================================================================

/// Open the quiz log for appending, creating its directory.
pub fn open_log_file() -> Result<fs::File> {
    let path = log_file_path(dirs::cache_dir());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;
    Ok(file)
}

/// Resolve the data directory: the explicit one, else the working directory.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Load the catalog from the first existing candidate, or the built-in one.
///
/// An explicitly named catalog that does not exist is an error; the
/// implicit locations are optional.
pub fn load_catalog(explicit: Option<&Path>, data_dir: &Path) -> Result<Catalog> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(QuizError::Config(format!(
                "catalog not found: {}",
                path.display()
            )));
        }
    }

    for candidate in catalog_candidates(explicit, data_dir) {
        if candidate.is_file() {
            let contents = fs::read_to_string(&candidate)?;
            let catalog = parse_catalog(&contents).map_err(|e| match e {
                QuizError::Config(msg) => {
                    QuizError::Config(format!("{}: {}", candidate.display(), msg))
                }
                other => other,
            })?;
            info!(
                "catalog: {} sources from {}",
                catalog.sources.len(),
                candidate.display()
            );
            return Ok(catalog);
        }
        debug!("catalog: no file at {}", candidate.display());
    }

    Ok(builtin_catalog())
}

// ============================================================================
// TESTS
// ============================================================================
