//! CLI argument parsing.

use std::path::PathBuf;

use clap::Parser;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name of the log written to the temp dir when `--log-file` is absent
pub const DEFAULT_LOG_FILE: &str = "material-card.log";

/// Interactive Material card demo for the terminal.
///
/// Click cells to see ripples; the bottom bar lists the editing keys.
#[derive(Parser, Debug)]
#[command(name = "material-card", version = VERSION)]
pub struct Args {
    /// Card config (JSON); defaults to ./material-card.json, then the
    /// global config, then built-in values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Where to write logs (the terminal belongs to the UI)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Card width in terminal columns
    #[arg(short, long, default_value_t = 40, value_parser = clap::value_parser!(u16).range(10..))]
    pub width: u16,
}

impl Args {
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILE))
    }
}
