//! Binary packing and header emission for the embedded page.
//!
//! - `pack` - gzip the final document
//! - `header` - render the payload as a C header
//! - `write` - atomic temp-file-then-rename output

mod header;
mod pack;
mod write;

pub use header::{DEFAULT_GUARD, render_header};
pub use pack::{DEFAULT_LEVEL, pack, unpack};
pub use write::{WriteOutcome, write_atomic};

#[cfg(test)]
pub(crate) use header::{BANNER, tests::parse_header};
