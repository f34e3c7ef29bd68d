// src/specs/mod.rs
//! # Page “specs” module
//!
//! This module hosts the **section-specific reading rules** for the
//! publication. Each spec focuses on one section page and encodes *which
//! tables carry structured data* and *which engine rule applies to them*.
//!
//! ## What lives here
//! - **Section paths**: the nested `div id` chains that locate each table.
//! - **Rule choice**: plain row loading, airspace topology, or sigpoint
//!   clustering.
//! - The **navigation menu** reader, which maps section ids to page files.
//! - The **publication index** walk: listing → index frameset → menu.
//!
//! ## What does **not** live here
//! - Marker decoding, relation bookkeeping, normalization: `engine`.
//! - Page loading and ordering: `scrape`; export: `file`.
//!
//! ## Typical call chain
//! ```text
//! runner → scrape::load_pages → specs::<section>::load_*(ds, doc)
//!                                 ↘ engine::{extract, topology}
//!        → engine::normalize → file::write_export
//! ```
//!
//! ## Conventions & invariants
//! - A section path that is not in the page is an error: pages follow a
//!   fixed layout, and a miss means the layout changed.
//! - Rows are handed to the engine in document order.
//! - Every loader returns the number of entity references it loaded.
use crate::config::options::Section;
use crate::core::XhtmlDocument;
use crate::engine::types::CancelToken;
use crate::error::Result;
use crate::store::DataSet;

pub mod enr2;
pub mod enr4;
pub mod index;
pub mod menu;

/// Run the loader for `section` over its page.
pub fn load_section(ds: &mut DataSet, section: Section, doc: &XhtmlDocument, cancel: &CancelToken) -> Result<usize> {
    match section {
        Section::Enr2Dot1 => enr2::load_enr_2_1(ds, doc, cancel),
        Section::Enr2Dot2 => enr2::load_enr_2_2(ds, doc, cancel),
        Section::Enr4Dot1 => enr4::load_enr_4_1(ds, doc, cancel),
        Section::Enr4Dot4 => enr4::load_enr_4_4(ds, doc, cancel),
    }
}
