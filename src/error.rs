// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Library error type.

use std::path::{Path, PathBuf};

/// Everything the library can report to a caller.
///
/// Per-document and per-fetch failures inside the builders and the crawler are
/// logged and skipped instead; these variants surface only at call boundaries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("query path {} is a directory", .0.display())]
    QueryPathIsDirectory(PathBuf),

    #[error("invalid seed URL {seed:?}: {source}")]
    InvalidSeed {
        seed: String,
        #[source]
        source: url::ParseError,
    },

    #[error("seed URL {seed:?} is not http or https")]
    UnsupportedSeed { seed: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    pub(crate) fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
