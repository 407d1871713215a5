//! Dead custom property removal.

use std::borrow::Cow;

use super::error::ParseError;
use super::scan::{Declaration, scan_declarations};
use super::usage::UsageIndex;

/// A style block after pruning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrunedBlock<'a> {
    /// Block text. Borrowed when nothing was removed.
    pub css: Cow<'a, str>,
    /// Names of removed custom properties, in source order.
    pub removed: Vec<String>,
}

/// Scan one style block and remove its unreferenced custom properties.
pub fn prune_block(css: &str) -> Result<PrunedBlock<'_>, ParseError> {
    let decls = scan_declarations(css)?;
    let index = UsageIndex::build(&decls);
    Ok(prune(css, &decls, &index))
}

/// Remove every custom property declaration of `decls` missing from `index`.
///
/// Everything outside the removed spans is copied byte for byte. `decls` must
/// come from scanning `css`.
pub fn prune<'a>(css: &'a str, decls: &[Declaration<'_>], index: &UsageIndex) -> PrunedBlock<'a> {
    let dead: Vec<&Declaration<'_>> = decls
        .iter()
        .filter(|decl| decl.is_custom() && !index.contains(decl.property))
        .collect();

    if dead.is_empty() {
        return PrunedBlock {
            css: Cow::Borrowed(css),
            removed: Vec::new(),
        };
    }

    let mut out = String::with_capacity(css.len());
    let mut cursor = 0;
    for decl in &dead {
        out.push_str(&css[cursor..decl.span.start]);
        cursor = decl.span.end;
    }
    out.push_str(&css[cursor..]);

    PrunedBlock {
        css: Cow::Owned(out),
        removed: dead.iter().map(|decl| decl.property.to_owned()).collect(),
    }
}
