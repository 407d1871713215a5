//! Command-line interface module.

mod args;
pub mod embed;

pub use args::Cli;
