//! Dead CSS custom property elimination for inline style blocks.
//!
//! # Module Structure
//!
//! - `scan` - declaration scanner (comments, strings, parens, brace depth)
//! - `usage` - which custom properties a block references
//! - `prune` - removes the unreferenced ones, byte-preserving everything else
//! - `error` - `ParseError` for malformed blocks
//!
//! Each block is analyzed on its own: a property declared in one `<style>`
//! and referenced only from another is treated as dead.

mod error;
mod prune;
mod scan;
mod usage;

pub use error::{ParseError, ParseErrorKind};
pub use prune::{PrunedBlock, prune_block};
