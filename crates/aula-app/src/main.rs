#![forbid(unsafe_code)]

//! Terminal dashboard for a school: user directory with incremental
//! search and tag filters, plus an attendance panel.
//!
//! Environment:
//! - `AULA_LOG`: path of a log file; logging is off without it (stdout
//!   belongs to the terminal UI). `RUST_LOG` filters as usual.
//! - `AULA_CACHE`: path of the preference cache file; defaults to a
//!   file in the system temp directory.

mod app;
mod fixtures;
mod palette;
mod screens;

use std::env;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use aula_model::FileCache;
use aula_tui::program;

use crate::app::AppModel;

fn init_logging() -> io::Result<()> {
    let Ok(path) = env::var("AULA_LOG") else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn cache_path() -> PathBuf {
    env::var_os("AULA_CACHE")
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join("aula-prefs.json"))
}

fn main() -> io::Result<()> {
    init_logging()?;

    let cache = Box::new(FileCache::new(cache_path()));
    let (width, height) = crossterm::terminal::size()?;
    let mut model = AppModel::new(fixtures::demo_roster(), cache, width, height);

    tracing::info!(width, height, "dashboard starting");
    program::run(&mut model)
}
