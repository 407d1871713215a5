//! Prune every style block of a document and splice the results back.

use std::borrow::Cow;

use rayon::prelude::*;

use super::style::{StyleBlock, find_style_blocks};
use crate::css::{ParseError, PrunedBlock, prune_block};

/// A custom property removed from the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedProperty {
    /// Index of the style block it was declared in.
    pub block: usize,
    pub name: String,
}

/// Result of [`prune_document`].
#[derive(Debug)]
pub struct PrunedDocument<'a> {
    /// Document text. Borrowed when no block changed.
    pub html: Cow<'a, str>,
    /// Number of `<style>` elements found.
    pub blocks: usize,
    pub removed: Vec<RemovedProperty>,
}

/// Remove dead custom properties from every `<style>` block of `html`.
///
/// Blocks are independent, so with `parallel` they are pruned on the rayon
/// pool. Results are merged in document order either way and the first
/// failing block (in document order) is the one reported, so the outcome is
/// identical to a sequential run. Error offsets are document-relative.
pub fn prune_document(html: &str, parallel: bool) -> Result<PrunedDocument<'_>, ParseError> {
    let blocks = find_style_blocks(html)?;

    let prune_one = |block: &StyleBlock| {
        prune_block(&html[block.content.clone()]).map_err(|e| e.shifted(block.content.start))
    };
    let results: Vec<Result<PrunedBlock<'_>, ParseError>> = if parallel {
        blocks.par_iter().map(prune_one).collect()
    } else {
        blocks.iter().map(prune_one).collect()
    };
    let pruned = results.into_iter().collect::<Result<Vec<_>, _>>()?;

    let removed: Vec<RemovedProperty> = blocks
        .iter()
        .zip(&pruned)
        .flat_map(|(block, result)| {
            result.removed.iter().map(|name| RemovedProperty {
                block: block.index,
                name: name.clone(),
            })
        })
        .collect();

    if removed.is_empty() {
        return Ok(PrunedDocument {
            html: Cow::Borrowed(html),
            blocks: blocks.len(),
            removed,
        });
    }

    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;
    for (block, result) in blocks.iter().zip(&pruned) {
        out.push_str(&html[cursor..block.content.start]);
        out.push_str(&result.css);
        cursor = block.content.end;
    }
    out.push_str(&html[cursor..]);

    Ok(PrunedDocument {
        html: Cow::Owned(out),
        blocks: blocks.len(),
        removed,
    })
}
