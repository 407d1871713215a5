//! Configuration for `webui.toml` and command-line overrides.
//!
//! The config file is optional. Values are layered:
//!
//! 1. built-in defaults
//! 2. `[embed]` section of the config file (searched upward from cwd)
//! 3. command-line arguments
//!
//! # Example
//!
//! ```toml
//! [embed]
//! input = "ui/dist/index.html"
//! output = "lib/web_ui.h"
//! guard = "LUXIGRID_WEB_UI_GUARD"
//! level = 9
//! ```
//!
//! Relative paths in the file are resolved against the file's directory;
//! paths given on the command line are used as-is (relative to cwd).

mod error;
mod util;

pub use error::ConfigError;
use util::{find_config_file, is_c_identifier};

use crate::asset::{DEFAULT_GUARD, DEFAULT_LEVEL};
use crate::cli::Cli;
use crate::pipeline::Options;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default input document, relative to the project root.
pub const DEFAULT_INPUT: &str = "dist/index.html";

/// Default generated header, relative to the project root.
pub const DEFAULT_OUTPUT: &str = "dist/html.h";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing webui.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmbedConfig {
    /// Config file that was loaded, if any (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Embed settings
    #[serde(default)]
    pub embed: EmbedSection,
}

/// `[embed]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmbedSection {
    /// Built single-page HTML document.
    pub input: PathBuf,
    /// Generated header.
    pub output: PathBuf,
    /// Include guard token.
    pub guard: String,
    /// Remove unreferenced CSS custom properties.
    pub prune: bool,
    /// gzip level, 0-9.
    pub level: u32,
    /// Prune style blocks in parallel.
    pub parallel: bool,
    /// Check the payload decompresses to the pruned document.
    pub verify: bool,
}

impl Default for EmbedSection {
    fn default() -> Self {
        Self {
            input: DEFAULT_INPUT.into(),
            output: DEFAULT_OUTPUT.into(),
            guard: DEFAULT_GUARD.into(),
            prune: true,
            level: DEFAULT_LEVEL,
            parallel: true,
            verify: true,
        }
    }
}

impl EmbedConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file; a missing file just
    /// means defaults.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config, &cwd) {
            Some(path) => Self::from_path(&path)?,
            None => Self::default(),
        };

        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file, resolving its relative paths against
    /// the file's directory.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;

        let root = path.parent().unwrap_or(Path::new(""));
        config.embed.input = root.join(&config.embed.input);
        config.embed.output = root.join(&config.embed.output);
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply command-line overrides.
    fn apply_cli(&mut self, cli: &Cli) {
        let embed = &mut self.embed;
        if let Some(input) = &cli.input {
            embed.input = input.clone();
        }
        if let Some(output) = &cli.output {
            embed.output = output.clone();
        }
        if let Some(level) = cli.level {
            embed.level = level;
        }
        embed.prune &= !cli.no_prune;
        embed.parallel &= !cli.sequential;
        embed.verify &= !cli.no_verify;
    }

    /// Validate the merged configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let embed = &self.embed;
        if embed.level > 9 {
            return Err(ConfigError::Validation(format!(
                "`embed.level` must be between 0 and 9, got {}",
                embed.level
            )));
        }
        if !is_c_identifier(&embed.guard) {
            return Err(ConfigError::Validation(format!(
                "`embed.guard` must be a C identifier, got `{}`",
                embed.guard
            )));
        }
        if embed.input == embed.output {
            return Err(ConfigError::Validation(format!(
                "`embed.output` would overwrite the input `{}`",
                embed.input.display()
            )));
        }
        Ok(())
    }

    /// Pipeline options for this configuration.
    pub fn options(&self) -> Options {
        Options {
            guard: self.embed.guard.clone(),
            prune: self.embed.prune,
            level: self.embed.level,
            parallel: self.embed.parallel,
            verify: self.embed.verify,
        }
    }
}

// ============================================================================
// tests
// ============================================================================
