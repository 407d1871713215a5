//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Prune, gzip and embed a built web UI page as a C header
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Built single-page HTML document [default: dist/index.html]
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Generated header path [default: dist/html.h]
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Config file path (searched upward from cwd, optional)
    #[arg(short = 'C', long, default_value = "webui.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Keep every CSS custom property declaration
    #[arg(long)]
    pub no_prune: bool,

    /// gzip compression level
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=9))]
    pub level: Option<u32>,

    /// Prune style blocks one after another instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Skip the decompress-and-compare check
    #[arg(long)]
    pub no_verify: bool,

    /// Run every stage but do not write the header
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["webui-embed"]);
        assert!(cli.input.is_none());
        assert!(cli.output.is_none());
        assert_eq!(cli.config, PathBuf::from("webui.toml"));
        assert!(!cli.dry_run);
        assert!(cli.level.is_none());
    }

    #[test]
    fn test_cli_level_range() {
        assert!(Cli::try_parse_from(["webui-embed", "-l", "9"]).is_ok());
        assert!(Cli::try_parse_from(["webui-embed", "-l", "10"]).is_err());
    }
}
