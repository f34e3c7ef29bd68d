// src/engine/types.rs
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::consts::SD_PARAMS_SEP;
use crate::error::{AipError, Result};

/// One value marker as found in a row: its display text and the text of
/// its parameter sibling, if the markup had one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawMarker {
    pub value: String,
    pub params: Option<String>,
}

impl RawMarker {
    pub fn new(value: impl Into<String>, params: impl Into<String>) -> Self {
        Self { value: value.into(), params: Some(params.into()) }
    }

    /// A marker whose parameter sibling is missing.
    pub fn bare(value: impl Into<String>) -> Self {
        Self { value: value.into(), params: None }
    }
}

/// A row-scoped piece of markup, as handed over by the navigation layer.
pub trait RowFragment {
    /// Every value marker in document order.
    fn markers(&self) -> Vec<RawMarker>;

    /// The row's class tag (`sigpoint`, …), if any.
    fn class(&self) -> Option<&str>;
}

/// Decoded `TABLE;COLUMN;ROWID` payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SdParams {
    pub table: String,
    pub column: String,
    pub row_id: i64,
}

impl SdParams {
    /// Split into at most three fields. Everything after the second
    /// separator is the id field, which must then parse as a base-10
    /// integer; a stray separator there is an `InvalidRowId`.
    pub fn parse(params: &str) -> Result<Self> {
        let mut parts = params.splitn(3, SD_PARAMS_SEP);
        let (Some(table), Some(column), Some(id)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(AipError::MalformedParams { params: s!(params) });
        };
        let row_id = id
            .trim()
            .parse::<i64>()
            .map_err(|source| AipError::InvalidRowId { params: s!(params), source })?;
        Ok(Self { table: s!(table), column: s!(column), row_id })
    }
}

/// Whether `load_row` records the default all-pairs co-occurrence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoadMode {
    #[default]
    Related,
    /// Caller links the entities itself.
    Detached,
}

/// Shared abort flag, checked between rows and between pages.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() { Err(AipError::Cancelled) } else { Ok(()) }
    }
}
