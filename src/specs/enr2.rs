// src/specs/enr2.rs
//! ENR 2: ATS airspace.
//!
//! ENR 2.1 and most ENR 2.2 sub-sections list one airspace per group of
//! rows: a `TAIRSPACE` row followed by its vertices, volumes and layer
//! classes. Those go through the airspace rules. ENR 2.2.3.2 and 2.2.4 are
//! ordinary tables.

use crate::core::XhtmlDocument;
use crate::engine::extract::load_rows;
use crate::engine::topology::load_airspace_rows;
use crate::engine::types::CancelToken;
use crate::error::Result;
use crate::store::DataSet;

const ENR_2_1: &[&str] = &["ENR-2.1"];

const ENR_2_2_AIRSPACES: &[&[&str]] = &[
    &["ENR-2.2", "ENR-2.2.1"],
    &["ENR-2.2", "ENR-2.2.2"],
    &["ENR-2.2", "ENR-2.2.3"],
    &["ENR-2.2", "ENR-2.2.5"],
    &["ENR-2.2", "ENR-2.2.6"],
];

const ENR_2_2_REGULAR: &[&[&str]] = &[
    &["ENR-2.2", "ENR-2.2.3", "ENR-2.2.3.2"],
    &["ENR-2.2", "ENR-2.2.4"],
];

/// ENR 2.1 FIR, UIR, TMA and CTA. Returns entity references loaded.
pub fn load_enr_2_1(ds: &mut DataSet, doc: &XhtmlDocument, cancel: &CancelToken) -> Result<usize> {
    let rows = doc.section_rows(ENR_2_1)?;
    let stats = load_airspace_rows(ds, &rows, &ENR_2_1.join("/"), cancel)?;
    Ok(stats.entities)
}

/// ENR 2.2 other regulated airspace. Returns entity references loaded.
pub fn load_enr_2_2(ds: &mut DataSet, doc: &XhtmlDocument, cancel: &CancelToken) -> Result<usize> {
    let mut total = 0usize;

    for path in ENR_2_2_AIRSPACES {
        let rows = doc.section_rows(path)?;
        total += load_airspace_rows(ds, &rows, &path.join("/"), cancel)?.entities;
    }

    for path in ENR_2_2_REGULAR {
        let rows = doc.section_rows(path)?;
        total += load_rows(ds, &rows, cancel)?;
    }

    Ok(total)
}
