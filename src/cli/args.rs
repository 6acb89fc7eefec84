//! CLI argument definitions using clap derive

use crate::core::WorkStrategy;
use crate::error::{JsfuzzError, Result};
use clap::Parser;
use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "jsfuzz",
    version = "1.0.0",
    about = "Turn jsluice endpoint output into FUZZ-marked URL seeds",
    long_about = None,
    after_help = "EXAMPLE:\n   jsfuzz --input app.js --output seeds.txt --concurrent 4 --shard"
)]
pub struct Cli {
    /// File handed to jsluice for URL extraction
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output file for fuzzed URLs (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Number of concurrent workers
    #[arg(
        short,
        long,
        default_value = "10",
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub concurrent: u32,

    /// Extractor program to run
    #[arg(long, default_value = "jsluice", value_name = "PATH")]
    pub jsluice: PathBuf,

    /// Base URL jsluice resolves relative URLs against
    #[arg(short = 'R', long, value_name = "URL")]
    pub resolve: Option<String>,

    /// Split records across workers instead of giving every worker the full list
    #[arg(long)]
    pub shard: bool,

    /// Suppress progress bar and summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose output (debug logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable progress bar
    #[arg(short = 'z', long)]
    pub no_progress: bool,

    /// No color output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    pub fn workers(&self) -> usize {
        self.concurrent as usize
    }

    pub fn driver_strategy(&self) -> WorkStrategy {
        if self.shard {
            WorkStrategy::Shard
        } else {
            WorkStrategy::Replicate
        }
    }

    /// Parse `--resolve`, which jsluice only accepts as an absolute URL
    pub fn resolve_url(&self) -> Result<Option<Url>> {
        self.resolve
            .as_deref()
            .map(|raw| {
                Url::parse(raw).map_err(|e| {
                    JsfuzzError::ConfigError(format!("Invalid --resolve URL '{}': {}", raw, e))
                })
            })
            .transpose()
    }

    /// Default tracing filter when RUST_LOG is unset
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }

    pub fn hide_progress(&self) -> bool {
        self.quiet || self.no_progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["jsfuzz", "--input", "app.js"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("app.js"));
        assert_eq!(cli.output, None);
        assert_eq!(cli.workers(), 10);
        assert_eq!(cli.jsluice, PathBuf::from("jsluice"));
        assert_eq!(cli.driver_strategy(), WorkStrategy::Replicate);
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn missing_input_is_an_error() {
        let err = Cli::try_parse_from(["jsfuzz", "--output", "out.txt"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn zero_workers_rejected() {
        let err = Cli::try_parse_from(["jsfuzz", "-i", "a.js", "-c", "0"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn shard_and_flags() {
        let cli = Cli::try_parse_from([
            "jsfuzz", "-i", "a.js", "-o", "out.txt", "-c", "3", "--shard", "-v",
        ])
        .unwrap();
        assert_eq!(cli.workers(), 3);
        assert_eq!(cli.output, Some(PathBuf::from("out.txt")));
        assert_eq!(cli.driver_strategy(), WorkStrategy::Shard);
        assert_eq!(cli.log_level(), "debug");
    }

    #[test]
    fn resolve_must_be_absolute() {
        let cli = Cli::try_parse_from(["jsfuzz", "-i", "a.js", "-R", "/relative"]).unwrap();
        assert!(matches!(
            cli.resolve_url(),
            Err(JsfuzzError::ConfigError(_))
        ));

        let cli =
            Cli::try_parse_from(["jsfuzz", "-i", "a.js", "-R", "https://site.test/"]).unwrap();
        let url = cli.resolve_url().unwrap().unwrap();
        assert_eq!(url.as_str(), "https://site.test/");
    }
}
