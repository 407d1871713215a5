//! The embed command: load config, run the pipeline, report.

use anyhow::{Context, Result};

use crate::{
    asset::WriteOutcome,
    config::EmbedConfig,
    debug, log, logger,
    pipeline::{self, Report},
};

use super::Cli;

/// Run one embed from parsed arguments.
pub fn run_embed(cli: &Cli) -> Result<()> {
    let config = EmbedConfig::load(cli)?;
    if let Some(path) = &config.config_path {
        debug!("config"; "loaded {}", path.display());
    }

    let embed = &config.embed;
    let options = config.options();
    debug!("config"; "level={} prune={} parallel={} verify={} guard={}",
        options.level, options.prune, options.parallel, options.verify, options.guard);

    let outcome = pipeline::run(&embed.input, &embed.output, &options, cli.dry_run)
        .with_context(|| format!("failed to embed `{}`", embed.input.display()))?;

    log_report(&outcome.report, options.prune);

    match outcome.write {
        Some(WriteOutcome::Written) => logger::status_success(&format!(
            "file processed, compressed, and stringified - see {}",
            embed.output.display()
        )),
        Some(WriteOutcome::Unchanged) => {
            log!("emit"; "{} is up to date", embed.output.display());
        }
        None => {
            log!("emit"; "dry run, {} not written", embed.output.display());
        }
    }
    Ok(())
}

fn log_report(report: &Report, prune: bool) {
    if prune {
        log!("prune"; "removed {} from {}",
            plural_count(report.removed.len(), "declaration"),
            plural_count(report.blocks, "style block"));
        for removed in &report.removed {
            debug!("prune"; "block {}: {}", removed.block, removed.name);
        }
    } else {
        log!("prune"; "disabled");
    }

    log!("pack"; "{} -> {} bytes ({:.1}%)",
        report.pruned_len,
        report.compressed_len,
        percent(report.compressed_len, report.pruned_len));
}

/// Format count with noun, handling pluralization
///
/// - `plural_count(1, "file")` -> `"1 file"`
/// - `plural_count(5, "file")` -> `"5 files"`
fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" })
}

#[allow(clippy::cast_precision_loss)] // Sizes are far below 2^52
fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}
