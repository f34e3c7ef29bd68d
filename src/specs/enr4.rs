// src/specs/enr4.rs
//! ENR 4: radio navigation aids and significant points.

use crate::config::consts::SIGPOINT_CLASS;
use crate::core::{TableRow, XhtmlDocument};
use crate::engine::extract::load_rows;
use crate::engine::topology::link_clusters;
use crate::engine::types::{CancelToken, RowFragment};
use crate::error::Result;
use crate::store::DataSet;

const ENR_4_1: &[&str] = &["ENR-4.1"];
const ENR_4_4_1: &[&str] = &["ENR-4.4", "ENR-4.4.1"];
const ENR_4_4_2: &[&str] = &["ENR-4.4", "ENR-4.4.2"];

/// ENR 4.1: one navaid per row. Returns entity references loaded.
pub fn load_enr_4_1(ds: &mut DataSet, doc: &XhtmlDocument, cancel: &CancelToken) -> Result<usize> {
    let rows = doc.section_rows(ENR_4_1)?;
    let n = load_rows(ds, &rows, cancel)?;
    logd!("ENR 4.1: {} rows, {} entity refs", rows.len(), n);
    Ok(n)
}

/// ENR 4.4: plain name-code table (4.4.1) and the reporting points table
/// (4.4.2). In 4.4.2 a `sigpoint` row introduces a point; the rows under
/// it (usage, remarks, …) belong to that point.
pub fn load_enr_4_4(ds: &mut DataSet, doc: &XhtmlDocument, cancel: &CancelToken) -> Result<usize> {
    let plain = doc.section_rows(ENR_4_4_1)?;
    let mut total = load_rows(ds, &plain, cancel)?;

    let rows = doc.section_rows(ENR_4_4_2)?;
    let stats = link_clusters(ds, &rows, is_sigpoint, cancel)?;
    total += stats.entities;

    logd!("ENR 4.4: {} sigpoints over {} rows", stats.clusters, rows.len());
    Ok(total)
}

fn is_sigpoint(row: &TableRow<'_>) -> bool {
    row.class() == Some(SIGPOINT_CLASS)
}
