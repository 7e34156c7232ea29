//! Runtime context for a report run.
//!
//! [`RuntimeContext`] holds every setting the report needs, resolved once
//! from CLI flags, the config file, and the terminal. Nothing downstream
//! reads the environment or re-queries the terminal.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use tips_config::config::{TipsConfig, load_config};
use tips_core::datefmt::TimestampFormat;
use tips_git::gitdir::get_git_root_via_command;
use tips_ui::terminal::{supports_color, terminal_width};

use crate::cli::Cli;

/// Settings for one report run.
#[derive(Debug, Clone)]
pub struct RuntimeContext {
    /// Directory git is run in.
    pub repo_dir: PathBuf,

    /// Name shown in the report title.
    pub repo_name: String,

    pub timestamp_format: TimestampFormat,

    /// Line width budget in columns.
    pub width: usize,

    pub hash_length: usize,

    /// Fetch all remotes before reading refs.
    pub fetch: bool,

    /// Emit ANSI colors.
    pub color: bool,

    /// Produce JSON instead of text.
    pub json: bool,
}

impl RuntimeContext {
    /// Build the context from parsed arguments.
    ///
    /// Priority for every setting: CLI flag > config file > default.
    /// Terminal width and color support are only queried when neither a
    /// flag nor the config decides them.
    ///
    /// # Errors
    ///
    /// Fails if the working directory cannot be determined or the config
    /// file cannot be loaded.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let repo_dir = match &cli.global.repo {
            Some(path) => path.clone(),
            None => env::current_dir().context("cannot determine the current directory")?,
        };

        let repo_root = get_git_root_via_command(&repo_dir);
        let config = load_config(cli.global.config.as_deref(), repo_root.as_deref())
            .context("loading configuration")?;
        debug!(?config, "configuration loaded");

        let timestamp_format = match &cli.report.timestamp_format {
            Some(name) => name.parse::<TimestampFormat>()?,
            None => config.timestamp_format,
        };

        Ok(Self::resolve(cli, &config, repo_dir, timestamp_format))
    }

    fn resolve(
        cli: &Cli,
        config: &TipsConfig,
        repo_dir: PathBuf,
        timestamp_format: TimestampFormat,
    ) -> Self {
        let width = cli
            .report
            .width
            .or(config.width)
            .unwrap_or_else(terminal_width);
        let color = !cli.global.no_color && !cli.global.json && config.color && supports_color();

        Self {
            repo_name: dir_name(&repo_dir),
            repo_dir,
            timestamp_format,
            width,
            hash_length: cli.report.hash_length.unwrap_or(config.hash_length),
            fetch: !cli.report.no_fetch && config.fetch,
            color,
            json: cli.global.json,
        }
    }
}

/// Last component of `dir` after resolving `.`/`..` and symlinks, falling
/// back to the path as given.
fn dir_name(dir: &Path) -> String {
    let resolved = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| resolved.display().to_string())
}
