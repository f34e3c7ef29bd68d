// src/error.rs
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

/// Everything that can abort a run. There is no partial-result mode:
/// any of these drops the store being built.
#[derive(Debug, thiserror::Error)]
pub enum AipError {
    /// A value marker with no parameter sibling.
    #[error("SD marker {value:?} has no sdParams sibling")]
    MissingParams { value: String },

    /// Parameter payload with fewer than three `;`-separated fields.
    #[error("sdParams {params:?} is not TABLE;COLUMN;ROWID")]
    MalformedParams { params: String },

    #[error("sdParams {params:?} has a non-integer row id")]
    InvalidRowId {
        params: String,
        #[source]
        source: ParseIntError,
    },

    #[error("section {path} not found in {document}")]
    MissingSection { document: String, path: String },

    /// Sub-entities showed up before any parent entity of `table`.
    #[error("row in {section} has sub-entities but no preceding {table} row")]
    MissingContext { section: String, table: String },

    /// A fixed landmark of a publication page (frame, listing row) is absent.
    #[error("{what} not found in {document}")]
    MissingElement { document: String, what: String },

    #[error("navigation menu has no entry {0}")]
    MissingMenuItem(String),

    #[error("menu link {href:?} does not resolve to a local file")]
    BadLink { href: String },

    #[error("no page given for section {0}")]
    NoSource(String),

    #[error("invalid selector {0:?}")]
    Selector(String),

    /// Observation log not drained by normalization.
    #[error("{remaining} relation observations left unclassified: {pairs:?}")]
    UnresolvedRelations { remaining: usize, pairs: Vec<String> },

    #[error("dataset is finalized; no further rows can be loaded")]
    Finalized,

    #[error("run cancelled")]
    Cancelled,

    #[error("page loader for {0} exited without a result")]
    WorkerLost(String),

    #[error("{}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl AipError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        AipError::Io { path: path.as_ref().to_path_buf(), source }
    }
}

pub type Result<T> = std::result::Result<T, AipError>;
