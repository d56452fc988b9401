//! Command line arguments for the card demo.

mod args;

pub use args::{Args, DEFAULT_LOG_FILE, VERSION};
