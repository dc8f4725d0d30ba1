//! Persists normalized listings as pretty-printed JSON.
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::model::NormalizedJob;

const INDENT: &[u8] = b"    ";

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to write {path}: {error}")]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
    #[error("failed to serialize jobs for {path}: {error}")]
    Serialize {
        path: PathBuf,
        #[source]
        error: serde_json::Error,
    },
}

/// Render `jobs` as a JSON array indented by four spaces. Non-ASCII text is
/// written as UTF-8, never `\u` escaped.
pub fn to_pretty_json(jobs: &[NormalizedJob]) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    jobs.serialize(&mut ser)?;
    Ok(buf)
}

/// Write `jobs` to `path`, replacing whatever was there.
pub fn write_jobs(path: &Path, jobs: &[NormalizedJob]) -> Result<(), WriteError> {
    let body = to_pretty_json(jobs).map_err(|error| WriteError::Serialize {
        path: path.to_path_buf(),
        error,
    })?;
    let io = |error| WriteError::Io {
        path: path.to_path_buf(),
        error,
    };

    let file = File::create(path).map_err(io)?;
    let mut out = BufWriter::new(file);
    out.write_all(&body).map_err(io)?;
    out.flush().map_err(io)?;
    Ok(())
}
