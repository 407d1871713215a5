//! Embed pipeline: HTML document in, C header out.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐   ┌─────────────────────┐   ┌──────────┐   ┌──────────┐
//! │   Load   │ → │ Analyze + Prune     │ → │ Compress │ → │   Emit   │
//! │ (read)   │   │ (per <style> block) │   │ (gzip)   │   │ (header) │
//! └──────────┘   └─────────────────────┘   └──────────┘   └──────────┘
//! ```
//!
//! - [`build_artifact`]: pure text-to-text core, no I/O
//! - [`run`]: reads the input, runs the core, writes the output atomically
//!
//! Any stage error aborts the run. Nothing is retried.

mod error;

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use crate::asset::{self, DEFAULT_GUARD, DEFAULT_LEVEL, WriteOutcome};
use crate::html::{RemovedProperty, prune_document};

pub use error::EmbedError;

// =============================================================================
// Types
// =============================================================================

/// Knobs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Include guard token.
    pub guard: String,
    /// Remove unreferenced custom properties.
    pub prune: bool,
    /// gzip level (0-9).
    pub level: u32,
    /// Prune style blocks on the rayon pool.
    pub parallel: bool,
    /// Decompress the payload and compare before emitting.
    pub verify: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            guard: DEFAULT_GUARD.into(),
            prune: true,
            level: DEFAULT_LEVEL,
            parallel: true,
            verify: true,
        }
    }
}

/// What a run did, for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// `<style>` elements seen (0 when pruning is off).
    pub blocks: usize,
    pub removed: Vec<RemovedProperty>,
    /// Input document size in bytes.
    pub original_len: usize,
    /// Document size after pruning.
    pub pruned_len: usize,
    /// gzip payload size, equal to `updatePageLength`.
    pub compressed_len: usize,
}

/// Rendered header plus its report.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub header: String,
    pub report: Report,
}

/// Result of [`run`].
#[derive(Debug)]
pub struct RunOutcome {
    pub report: Report,
    /// `None` on a dry run.
    pub write: Option<WriteOutcome>,
}

// =============================================================================
// Pipeline
// =============================================================================

/// Turn document text into header text.
///
/// Deterministic: the same document and options always give the same header.
pub fn build_artifact(document: &str, options: &Options) -> Result<Artifact, EmbedError> {
    let (pruned, blocks, removed) = if options.prune {
        let doc = prune_document(document, options.parallel)
            .map_err(|e| EmbedError::parse(document, e))?;
        (doc.html, doc.blocks, doc.removed)
    } else {
        (Cow::Borrowed(document), 0, Vec::new())
    };

    let compressed = asset::pack(&pruned, options.level).map_err(EmbedError::Compression)?;
    if compressed.len() > usize::from(u16::MAX) {
        return Err(EmbedError::PayloadTooLarge {
            len: compressed.len(),
        });
    }

    if options.verify {
        let unpacked = asset::unpack(compressed.as_bytes()).map_err(EmbedError::Compression)?;
        if unpacked != pruned {
            return Err(EmbedError::RoundTrip);
        }
    }

    let header = asset::render_header(compressed.as_bytes(), &options.guard);

    Ok(Artifact {
        header,
        report: Report {
            blocks,
            removed,
            original_len: document.len(),
            pruned_len: pruned.len(),
            compressed_len: compressed.len(),
        },
    })
}

/// Read `input`, build the header and write it to `output`.
///
/// With `dry_run` every stage runs but nothing is written.
pub fn run(
    input: &Path,
    output: &Path,
    options: &Options,
    dry_run: bool,
) -> Result<RunOutcome, EmbedError> {
    let document = fs::read_to_string(input).map_err(|e| EmbedError::io(input, e))?;
    let artifact = build_artifact(&document, options)?;

    let write = if dry_run {
        None
    } else {
        let outcome = asset::write_atomic(output, artifact.header.as_bytes())
            .map_err(|e| EmbedError::io(output, e))?;
        Some(outcome)
    };

    Ok(RunOutcome {
        report: artifact.report,
        write,
    })
}
