//! Clap CLI definitions for the `tips` command.

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser};
use tips_core::datefmt::TimestampFormat;

/// tips -- latest commit per branch.
///
/// Fetches all remotes, then lists the tip commit of every remote-tracking
/// branch and of every local branch that no remote publishes, newest first.
#[derive(Parser, Debug)]
#[command(
    name = "tips",
    about = "Show the latest commit on every remote branch and every local-only branch",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(flatten)]
    pub report: ReportArgs,
}

/// Where to run and how to talk to the user.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Run as if started in this directory.
    #[arg(short = 'C', long = "repo", value_name = "PATH")]
    pub repo: Option<PathBuf>,

    /// Config file (default: $TIPS_CONFIG, then .tips.yaml at the repo root).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output in JSON format.
    #[arg(long)]
    pub json: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose/debug output on stderr.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// What the report shows.
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Format for timestamps: readable (default) or iso.
    #[arg(long, value_name = "FORMAT", value_parser = TimestampFormat::NAMES)]
    pub timestamp_format: Option<String>,

    /// Output width in columns (default: terminal width).
    #[arg(long, value_name = "COLS")]
    pub width: Option<usize>,

    /// Number of commit hash characters to show (default: 12).
    #[arg(long, value_name = "N", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub hash_length: Option<usize>,

    /// Skip fetching remotes; report on the refs as they are.
    #[arg(long)]
    pub no_fetch: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_leave_everything_unset() {
        let cli = Cli::try_parse_from(["tips"]).unwrap();
        assert!(cli.report.timestamp_format.is_none());
        assert!(cli.report.width.is_none());
        assert!(!cli.report.no_fetch);
        assert!(!cli.global.json);
    }

    #[test]
    fn parses_timestamp_format() {
        let cli = Cli::try_parse_from(["tips", "--timestamp-format", "iso"]).unwrap();
        assert_eq!(cli.report.timestamp_format.as_deref(), Some("iso"));
    }

    #[test]
    fn rejects_unknown_timestamp_format() {
        assert!(Cli::try_parse_from(["tips", "--timestamp-format", "epoch"]).is_err());
    }

    #[test]
    fn rejects_zero_hash_length() {
        assert!(Cli::try_parse_from(["tips", "--hash-length", "0"]).is_err());
    }

    #[test]
    fn parses_repo_flag() {
        let cli = Cli::try_parse_from(["tips", "-C", "/tmp/repo", "--no-fetch"]).unwrap();
        assert_eq!(cli.global.repo, Some(PathBuf::from("/tmp/repo")));
        assert!(cli.report.no_fetch);
    }
}
