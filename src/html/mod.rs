//! HTML document handling: inline style discovery and rewriting.
//!
//! Only the contents of `<style>` elements are ever changed; all other
//! markup is copied through byte for byte.

mod rewrite;
mod style;

pub use rewrite::{RemovedProperty, prune_document};
