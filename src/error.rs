//! Errors of the command-line surroundings.
//!
//! Parsing, layout, rendering and editing never fail; only reading files,
//! loading configuration, reading event scripts and writing output can.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse TOML configuration: {0}")]
    Config(String),

    #[error("missing configuration file: {}", .0.display())]
    MissingConfig(PathBuf),

    #[error("event script line {line}: {message}")]
    Script { line: usize, message: String },
}
