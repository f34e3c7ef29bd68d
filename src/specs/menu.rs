// src/specs/menu.rs
//! Navigation menu of a saved publication.
//!
//! Every section page is linked from the menu frame as
//! `<div><a id="ENR-2.1" title="…" href="…">`. Tab headers
//! (`div class="tab"`) and expander anchors (`a class="Plus"`) are not
//! section links.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use url::Url;

use crate::config::options::{PageSource, Section};
use crate::core::XhtmlDocument;
use crate::error::{AipError, Result};

const MENU_ANCHORS: &str = r#"body div:not([class="tab"]) > a:not([class="Plus"])"#;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub href: String,
}

/// Menu items keyed by upper-cased id; later duplicates win.
pub fn parse_menu(doc: &XhtmlDocument) -> Result<BTreeMap<String, MenuItem>> {
    let mut items = BTreeMap::new();
    for a in doc.select(MENU_ANCHORS)? {
        let el = a.value();
        let (Some(id), Some(href)) = (el.attr("id"), el.attr("href")) else {
            continue;
        };
        let item = MenuItem {
            id: s!(id),
            title: s!(el.attr("title").unwrap_or_default()),
            href: s!(href),
        };
        items.insert(id.to_ascii_uppercase(), item);
    }
    logd!("Menu: {} items in {}", items.len(), doc.name());
    Ok(items)
}

pub fn find<'a>(items: &'a BTreeMap<String, MenuItem>, id: &str) -> Option<&'a MenuItem> {
    items.get(&id.to_ascii_uppercase())
}

/// Resolve `href` against the menu file's location. The fragment is
/// dropped and percent-escapes decoded (`EN-ENR%202.1-en-GB.html`).
pub fn resolve_href(menu_path: &Path, href: &str) -> Result<PathBuf> {
    let bad = || AipError::BadLink { href: s!(href) };
    let absolute = std::path::absolute(menu_path).map_err(|e| AipError::io(menu_path, e))?;
    let base = Url::from_file_path(&absolute).map_err(|_| bad())?;
    let mut target = base.join(href).map_err(|_| bad())?;
    target.set_fragment(None);
    target.set_query(None);
    target.to_file_path().map_err(|_| bad())
}

/// Page paths for `sections`, looked up in the menu.
pub fn resolve_sections(
    menu_path: &Path,
    items: &BTreeMap<String, MenuItem>,
    sections: &[Section],
) -> Result<Vec<PageSource>> {
    sections
        .iter()
        .map(|&section| {
            let item = find(items, section.id()).ok_or_else(|| AipError::MissingMenuItem(s!(section.id())))?;
            let path = resolve_href(menu_path, &item.href)?;
            Ok(PageSource { section, path })
        })
        .collect()
}
