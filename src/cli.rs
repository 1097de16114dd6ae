//! CLI argument parsing and command handling

use anyhow::Result;
use clap::Parser;
use std::io::Write;

use crate::batch::process_files;
use crate::config::Config;
use crate::input::expand_patterns;
use crate::output;
use crate::writer::{OutputFormat, print_summary, write_summary_file};

/// Extract and alphabetize baby names from popularity report HTML files
#[derive(Parser, Debug)]
#[command(
    name = "babynames",
    version,
    about = "Extracts and alphabetizes baby names from html",
    long_about = "Scans baby name popularity reports (babyXXXX.html) and prints, for each \
                  file, the report year followed by every name with its best rank, sorted \
                  by name.\n\n\
                  Examples:\n  \
                  babynames baby1990.html\n  \
                  babynames --summaryfile 'baby*.html'"
)]
pub struct Cli {
    /// Filename(s) to parse; glob patterns are expanded if the shell did not
    #[arg(value_name = "FILES", required = true, num_args = 1..)]
    pub files: Vec<String>,

    /// Write each result to <file>.summary instead of printing it
    #[arg(long)]
    pub summaryfile: bool,

    /// Print results as JSON (one object per file)
    #[arg(long)]
    pub json: bool,

    /// Pretty-print JSON output (only with --json)
    #[arg(long)]
    pub pretty: bool,

    /// Number of files to process in parallel (default: 1, or `jobs` from config)
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,

    /// Suffix for summary files (default: .summary)
    #[arg(long, value_name = "SUFFIX")]
    pub suffix: Option<String>,

    /// Enable verbose logging (can be repeated for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Effective settings after merging config file and flags
#[derive(Debug, Clone)]
struct RunSettings {
    summary_file: bool,
    format: OutputFormat,
    jobs: usize,
    suffix: String,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .init();

        let config = Config::load()?;
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run(&config, &mut out)
    }

    fn settings(&self, config: &Config) -> RunSettings {
        let format = if self.json {
            OutputFormat::Json {
                pretty: self.pretty || config.pretty,
            }
        } else {
            OutputFormat::Text
        };

        RunSettings {
            summary_file: self.summaryfile,
            format,
            jobs: self.jobs.map(usize::from).unwrap_or(config.jobs),
            suffix: self
                .suffix
                .clone()
                .unwrap_or_else(|| config.summary_suffix.clone()),
        }
    }

    /// Process every file argument, writing console output to `out`
    ///
    /// Per-file failures, including patterns that match nothing, are reported
    /// as they are found and the remaining files are still processed.
    /// Returns an error if anything failed.
    pub fn run<W: Write>(&self, config: &Config, out: &mut W) -> Result<()> {
        let settings = self.settings(config);
        log::debug!("Run settings: {:?}", settings);

        let expanded = expand_patterns(&self.files);
        let mut failed = expanded.failures.len();
        for e in &expanded.failures {
            output::error(&format!("Error: {:#}", e));
        }
        log::info!("Extracting {} file(s)", expanded.paths.len());

        let outcomes = process_files(&expanded.paths, settings.jobs)?;
        let total = outcomes.len() + expanded.failures.len();

        for outcome in outcomes {
            let summary = match outcome.result {
                Ok(summary) => summary,
                Err(e) => {
                    failed += 1;
                    output::error(&format!("Error: {:#}", e));
                    continue;
                }
            };

            if summary.is_empty() {
                output::warn(&format!(
                    "No year heading or name rows found in {}",
                    outcome.path.display()
                ));
            } else if summary.names.is_empty() {
                output::warn(&format!("No name rows found in {}", outcome.path.display()));
            }

            let emitted = if settings.summary_file {
                write_summary_file(&outcome.path, &summary, &settings.suffix).map(|_| ())
            } else {
                print_summary(out, &outcome.path, &summary, settings.format)
            };

            if let Err(e) = emitted {
                failed += 1;
                output::error(&format!("Error: {:#}", e));
            }
        }

        if failed > 0 {
            anyhow::bail!("{} of {} file(s) could not be processed", failed, total);
        }
        Ok(())
    }
}
