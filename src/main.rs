//! webui-embed - prune, compress and embed a built web UI as a C header.
//!
//! Takes the single-page HTML produced by the UI bundler, drops CSS custom
//! properties nothing references, gzips the page and writes it out as a
//! `const uint8_t` array the firmware serves straight from flash.

#![allow(dead_code)]

mod asset;
mod cli;
mod config;
mod css;
mod html;
mod logger;
mod pipeline;

use clap::{ColorChoice, Parser};
use cli::{Cli, embed::run_embed};

fn main() {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    if let Err(e) = run_embed(&cli) {
        log!("error"; "{e:#}");
        std::process::exit(1);
    }
}
