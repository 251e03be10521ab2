//! Demo binary: add two 1024-element f32 arrays on the GPU and print the
//! first ten sums.
//!
//! Diagnostics go to stderr via the logger; stdout carries only the
//! result line. Exits 0 on success, 1 on any pipeline failure.

use std::process;

use vecadd::config::DispatchConfig;
use vecadd::{logging, runner};

fn main() {
    logging::init_from_env();

    let cfg = DispatchConfig::default();
    match runner::run(&cfg) {
        Ok(results) => {
            println!("{}", runner::format_preview(&results, cfg.preview_len));
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
