//! Where rendered lines go.

use crate::traits::LineSink;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Error from writing a line.
#[derive(Debug, thiserror::Error)]
#[error("cannot write line to {target}: {source}")]
pub struct OutputError {
    target: String,
    #[source]
    source: std::io::Error,
}

/// Writes each line to standard output and flushes.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl LineSink for StdoutSink {
    type Error = OutputError;

    fn write_line(&mut self, line: &str) -> Result<(), OutputError> {
        let mut out = std::io::stdout().lock();
        out.write_all(line.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|source| OutputError {
                target: "stdout".into(),
                source,
            })
    }
}

/// Overwrites a file with the latest line.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl LineSink for FileSink {
    type Error = OutputError;

    fn write_line(&mut self, line: &str) -> Result<(), OutputError> {
        std::fs::write(&self.path, line).map_err(|source| OutputError {
            target: self.path.display().to_string(),
            source,
        })
    }
}

/// Either of the two sinks, picked from the configuration.
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutSink),
    File(FileSink),
}

impl Output {
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(p) => Output::File(FileSink::new(p)),
            None => Output::Stdout(StdoutSink),
        }
    }
}

impl LineSink for Output {
    type Error = OutputError;

    fn write_line(&mut self, line: &str) -> Result<(), OutputError> {
        match self {
            Output::Stdout(s) => s.write_line(line),
            Output::File(f) => f.write_line(line),
        }
    }
}
