//! `duplex [OPTIONS.toml]`: open a window with the animated helix.
//!
//! The optional argument is an options preset; any section it leaves out
//! keeps its default. Logging follows `RUST_LOG`.

use std::{path::Path, process::ExitCode};

use duplex::{Options, Viewer};

fn load_options() -> Result<Options, duplex::DuplexError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading options from {path}");
            Options::load(Path::new(&path))
        }
        None => Ok(Options::default()),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let options = match load_options() {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            log::error!("Usage: duplex [OPTIONS.toml]");
            return ExitCode::FAILURE;
        }
    };

    match Viewer::builder().with_options(options).build().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
