//! Command-line interface for batch pattern generation from JSON requests

use crate::generation::assembler::{GenerationConfig, PatternAssembler};
use crate::io::configuration::{DEFAULT_SEED, OUTPUT_SUFFIX};
use crate::io::error::{Result, file_system_error, invalid_input};
use crate::io::progress::ProgressManager;
use crate::io::render::{TemplateRenderer, render_pattern};
use crate::io::request::PatternRequest;
use crate::yarn::estimator::EstimatorConfig;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "knitgen")]
#[command(
    author,
    version,
    about = "Generate row-by-row knitting patterns from garment analysis and measurements"
)]
/// Command-line arguments for the pattern generation tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Request JSON file or directory of request files
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Seed for pattern identifiers
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Language tag overriding the one in each request
    #[arg(short, long)]
    pub language: Option<String>,

    /// Also write a rendered plain-text pattern
    #[arg(short, long)]
    pub text: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process requests even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Yarn consumption in meters per square centimeter at reference gauge
    #[arg(short, long)]
    pub meters_per_cm2: Option<f64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Generation settings with command-line overrides applied
    pub fn generation_config(&self) -> GenerationConfig {
        let mut config = GenerationConfig::default();
        if let Some(meters_per_cm2) = self.meters_per_cm2 {
            config.estimator = EstimatorConfig { meters_per_cm2 };
        }
        config
    }
}

/// Orchestrates batch processing of request files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    assembler: PatternAssembler,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);
        let assembler = PatternAssembler::new(cli.generation_config(), cli.seed);

        Self {
            cli,
            assembler,
            progress_manager,
        }
    }

    /// Process requests according to CLI arguments
    ///
    /// Returns the paths of the pattern files written.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is invalid or a request cannot be
    /// read, generated or written
    pub fn process(&mut self) -> Result<Vec<PathBuf>> {
        let files = self.collect_files()?;

        if files.is_empty() {
            info!("no requests to process");
            return Ok(Vec::new());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut written = Vec::with_capacity(files.len());
        for (index, file) in files.iter().enumerate() {
            written.push(self.process_file(file, index)?);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(written)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !Self::is_request(target) {
                return Err(invalid_input(
                    "target",
                    &target.display(),
                    &"must be a .json request file",
                ));
            }
            Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                vec![]
            })
        } else if target.is_dir() {
            let mut files = Vec::new();
            let entries = std::fs::read_dir(target)
                .map_err(|source| file_system_error(target, "read directory", source))?;
            for entry in entries {
                let path = entry
                    .map_err(|source| file_system_error(target, "read directory", source))?
                    .path();
                if Self::is_request(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_input(
                "target",
                &target.display(),
                &"must be a request file or directory",
            ))
        }
    }

    /// JSON files that are not themselves generated patterns
    fn is_request(path: &Path) -> bool {
        path.extension().and_then(|s| s.to_str()) == Some("json")
            && !path
                .file_stem()
                .and_then(|s| s.to_str())
                .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path, "json");
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<PathBuf> {
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path);
        }

        let mut request = PatternRequest::from_path(input_path)?;
        if let Some(language) = &self.cli.language {
            request.language.clone_from(language);
        }
        self.advance(index, 1);

        let pattern = request.generate(&mut self.assembler)?;
        debug!(path = %input_path.display(), id = %pattern.id, "pattern ready");
        self.advance(index, 2);

        let output_path = Self::get_output_path(input_path, "json");
        let json = serde_json::to_string_pretty(&pattern)?;
        std::fs::write(&output_path, json)
            .map_err(|source| file_system_error(&output_path, "write pattern", source))?;

        if self.cli.text {
            let renderer = TemplateRenderer::for_language(&pattern.language);
            let text_path = Self::get_output_path(input_path, "txt");
            std::fs::write(&text_path, render_pattern(&pattern, &renderer))
                .map_err(|source| file_system_error(&text_path, "write text", source))?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }

        Ok(output_path)
    }

    fn advance(&mut self, index: usize, stage: usize) {
        if let Some(ref mut pm) = self.progress_manager {
            pm.advance(index, stage);
        }
    }

    /// Output path next to the request: `<stem>_pattern.<extension>`
    pub fn get_output_path(input_path: &Path, extension: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{}.{}", stem.to_string_lossy(), OUTPUT_SUFFIX, extension);

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}
