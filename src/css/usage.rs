//! Custom property usage analysis.

use rustc_hash::FxHashSet;

use super::scan::Declaration;

/// Custom properties of one style block that are referenced somewhere in it.
///
/// A declared `--name` counts as used when the text `--name` occurs anywhere
/// in the value of any declaration of the same block, including other custom
/// property declarations and its own. This is plain substring matching:
///
/// - `--a` is "used" by `var(--ab)`
/// - a name inside a string or comment in a value still counts
/// - a property referenced only by an unused property is still kept
///
/// The check errs on the side of keeping declarations.
#[derive(Debug, Default, Clone)]
pub struct UsageIndex {
    used: FxHashSet<String>,
}

impl UsageIndex {
    /// Build the index from all declarations of one block.
    pub fn build(decls: &[Declaration<'_>]) -> Self {
        let used = decls
            .iter()
            .filter(|decl| decl.is_custom())
            .map(|decl| decl.property)
            .filter(|name| decls.iter().any(|decl| decl.value.contains(*name)))
            .map(str::to_owned)
            .collect();
        Self { used }
    }

    /// Whether the custom property `name` is referenced in the block.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.used.contains(name)
    }
}
