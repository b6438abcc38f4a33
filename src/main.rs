//! medprep CLI
//!
//! Terminal quiz for medical exam preparation.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use medprep::bank::{FileProvider, QuestionProvider};
use medprep::catalog::{load_catalog, open_log_file, resolve_data_dir};
use medprep::outline::format_outline;
use medprep::types::{Catalog, Grading, OutputFormat};

#[derive(Parser)]
#[command(name = "medprep")]
#[command(about = "Multiple-choice quiz for medical exam preparation")]
#[command(version)]
#[command(after_help = "Set RUST_LOG (e.g. RUST_LOG=info) for diagnostics. \
The quiz writes them to medprep/medprep.log in the user cache directory; \
other commands print them to stderr.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory holding the question files (default: current directory)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Source catalog (default: <data-dir>/catalog.toml, then the config dir)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive quiz (default)
    Quiz {
        /// How answers are graded (overrides the catalog)
        #[arg(long, value_enum)]
        grading: Option<GradingArg>,
    },

    /// List configured sources and whether their files load
    Sources,

    /// Print the topic outline of one source
    Topics {
        /// Source id, as shown by `sources`
        source: String,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum GradingArg {
    /// Compare the chosen option's text with the correct option's text
    Text,
    /// Compare the chosen position with the correct index
    Index,
}

impl From<GradingArg> for Grading {
    fn from(arg: GradingArg) -> Self {
        match arg {
            GradingArg::Text => Grading::Text,
            GradingArg::Index => Grading::Index,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let data_dir = resolve_data_dir(cli.data_dir);
    let catalog_path = cli.catalog.as_deref();

    let command = cli.command.unwrap_or(Commands::Quiz { grading: None });
    init_logging(matches!(command, Commands::Quiz { .. }));
    let result = match command {
        Commands::Quiz { grading } => cmd_quiz(&data_dir, catalog_path, grading.map(Grading::from)),
        Commands::Sources => cmd_sources(&data_dir, catalog_path),
        Commands::Topics { source, format } => {
            cmd_topics(&data_dir, catalog_path, &source, format.into())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// SETUP
// ============================================================================

/// Configure logging from `RUST_LOG`.
///
/// The TUI owns the terminal, so the quiz logs to a file. If the
/// file cannot be opened, quiz logging is off.
fn init_logging(for_tui: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    if for_tui {
        match open_log_file() {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(_) => {
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }

    let _ = builder.try_init();
}

fn open_catalog(data_dir: &Path, catalog_path: Option<&Path>) -> Result<Catalog, String> {
    load_catalog(catalog_path, data_dir).map_err(|e| e.to_string())
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_quiz(
    data_dir: &Path,
    catalog_path: Option<&Path>,
    grading: Option<Grading>,
) -> Result<(), String> {
    let mut catalog = open_catalog(data_dir, catalog_path)?;
    if let Some(grading) = grading {
        catalog.grading = grading;
    }

    let provider = FileProvider::new(data_dir);
    medprep::tui::run::run(&catalog, &provider).map_err(|e| format!("terminal error: {}", e))
}

fn cmd_sources(data_dir: &Path, catalog_path: Option<&Path>) -> Result<(), String> {
    let catalog = open_catalog(data_dir, catalog_path)?;
    let provider = FileProvider::new(data_dir);

    println!("Data directory: {}", data_dir.display());
    println!();

    for spec in &catalog.sources {
        let status = match provider.load(spec) {
            Ok(bank) => format!("{} questions", bank.questions.len()),
            Err(e) => format!("unavailable: {}", e),
        };
        println!("  [{}] {}", spec.id, spec.label);
        println!("      {} ({})", provider.resolve(spec).display(), status);
    }

    Ok(())
}

fn cmd_topics(
    data_dir: &Path,
    catalog_path: Option<&Path>,
    source: &str,
    format: OutputFormat,
) -> Result<(), String> {
    let catalog = open_catalog(data_dir, catalog_path)?;
    let spec = catalog.find(source).ok_or_else(|| {
        let known: Vec<&str> = catalog.sources.iter().map(|s| s.id.as_str()).collect();
        format!("Unknown source: {} (available: {})", source, known.join(", "))
    })?;

    let provider = FileProvider::new(data_dir);
    let bank = provider.load(spec).map_err(|e| e.to_string())?;

    print!("{}", format_outline(spec, &bank, format));
    Ok(())
}
