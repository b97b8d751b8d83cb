pub mod report;

use crate::types::{DuplicatePolicy, ExtractionOptions, DEFAULT_MAX_MODIFIER_DISTANCE};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Command-line arguments for tbiextract
#[derive(Parser, Debug)]
#[command(name = "tbiextract")]
#[command(about = "Extract traumatic brain injury findings from head CT reports")]
#[command(version)]
pub struct Cli {
    /// Report files (.txt) or directories containing them
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Keep the literal target phrases in the output
    #[arg(long)]
    pub save_target_phrases: bool,

    /// Keep the literal modifier phrases in the output
    #[arg(long)]
    pub save_modifier_phrases: bool,

    /// Only report these concepts, in this order (comma-separated ids)
    #[arg(long, value_delimiter = ',')]
    pub include_targets: Option<Vec<String>>,

    /// Report every concept except these (comma-separated ids)
    #[arg(long, value_delimiter = ',')]
    pub exclude_targets: Option<Vec<String>>,

    /// Maximum number of words between a modifier and its target
    #[arg(long, default_value_t = DEFAULT_MAX_MODIFIER_DISTANCE)]
    pub max_distance: usize,

    /// How conflicting mentions of one concept are resolved
    #[arg(long, default_value = "precedence")]
    pub duplicates: DuplicatePolicyArg,

    /// List the driving constituents as the phrase of derived concepts
    #[arg(long)]
    pub synthesize_derived: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Builds extraction options from the parsed flags
    pub fn options(&self) -> ExtractionOptions {
        ExtractionOptions {
            include_targets: self.include_targets.clone(),
            exclude_targets: self.exclude_targets.clone(),
            save_target_phrases: self.save_target_phrases,
            save_modifier_phrases: self.save_modifier_phrases,
            max_modifier_distance: self.max_distance,
            duplicate_policy: self.duplicates.clone().into(),
            synthesize_derived_phrases: self.synthesize_derived,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// Tab-separated rows, one per report and concept
    Tsv,
    /// JSON format
    Json,
}

/// Duplicate resolution strategy
#[derive(Debug, Clone, ValueEnum)]
pub enum DuplicatePolicyArg {
    /// Fixed clinical precedence per concept
    Precedence,
    /// Most frequent value, precedence breaks ties
    MajorityVote,
}

impl From<DuplicatePolicyArg> for DuplicatePolicy {
    fn from(arg: DuplicatePolicyArg) -> Self {
        match arg {
            DuplicatePolicyArg::Precedence => DuplicatePolicy::Precedence,
            DuplicatePolicyArg::MajorityVote => DuplicatePolicy::MajorityVote,
        }
    }
}

/// Expands the given paths into report files
///
/// Files are taken as given. Directories contribute their `.txt` files
/// (not recursive), sorted by name.
pub fn collect_report_files(paths: &[PathBuf]) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            for entry in std::fs::read_dir(path)? {
                let entry = entry?;
                let candidate = entry.path();
                let is_txt = candidate
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("txt"))
                    .unwrap_or(false);
                if candidate.is_file() && is_txt {
                    found.push(candidate);
                }
            }
            found.sort();
            files.extend(found);
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            ));
        }
    }

    Ok(files)
}

/// Report identifier derived from a file name
pub fn report_id(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
