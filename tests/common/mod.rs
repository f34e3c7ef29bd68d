// tests/common/mod.rs
//
// Hand-built row fragments for driving the engine without markup.
//
#![allow(dead_code)]

use aip_scrape::engine::{RawMarker, RowFragment};

pub struct FakeRow {
    pub class: Option<String>,
    pub markers: Vec<RawMarker>,
}

impl RowFragment for FakeRow {
    fn markers(&self) -> Vec<RawMarker> {
        self.markers.clone()
    }

    fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }
}

/// Row of `(value, "TABLE;COLUMN;ID")` cells.
pub fn row(cells: &[(&str, &str)]) -> FakeRow {
    FakeRow {
        class: None,
        markers: cells.iter().map(|(v, p)| RawMarker::new(*v, *p)).collect(),
    }
}

pub fn classed(class: &str, cells: &[(&str, &str)]) -> FakeRow {
    FakeRow { class: Some(class.to_string()), ..row(cells) }
}
