// src/specs/index.rs
//! Publication listing and index frameset of a saved publication.
//!
//! The listing page has one table row per issue: the effective date
//! (linking to `index-<culture>.html`), the publication date and the
//! reason for change. The first row is the current issue.
//!
//! The index is a frameset. Its `eAISNavigationBase` frame is a second
//! frameset whose `eAISNavigation` frame is the menu; `eAISContent` is the
//! cover page. Every `src` resolves against the file that names it.

use std::path::{Path, PathBuf};

use scraper::ElementRef;

use crate::config::consts::{CONTENT_FRAME, INDEX_FILE_PREFIX, NAV_BASE_FRAME, NAV_FRAME};
use crate::core::XhtmlDocument;
use crate::error::{AipError, Result};

use super::menu::resolve_href;

const LISTING_ROWS: &str = "body table > tbody > tr";

/// One issue from the publication listing. Dates are kept as published.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Publication {
    pub effective_date: String,
    pub publication_date: String,
    pub reason: Option<String>,
    pub index_href: String,
    /// `en-GB` for `index-en-GB.html`.
    pub culture_tag: Option<String>,
}

/// Pages named by an index frameset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexPages {
    pub menu: PathBuf,
    pub cover: PathBuf,
}

fn missing(doc: &XhtmlDocument, what: String) -> AipError {
    AipError::MissingElement { document: s!(doc.name()), what }
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// The current issue: first row of the listing table.
pub fn parse_publication(doc: &XhtmlDocument) -> Result<Publication> {
    let row = doc
        .select(LISTING_ROWS)?
        .into_iter()
        .next()
        .ok_or_else(|| missing(doc, s!("publication row")))?;
    let cells: Vec<ElementRef<'_>> = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "td")
        .collect();

    let link = cells
        .first()
        .and_then(|td| td.children().filter_map(ElementRef::wrap).find(|el| el.value().name() == "a"))
        .ok_or_else(|| missing(doc, s!("effective-date link")))?;
    let index_href = link
        .value()
        .attr("href")
        .ok_or_else(|| missing(doc, s!("effective-date href")))?;
    let publication_date = cells
        .get(1)
        .map(|td| text_of(*td))
        .ok_or_else(|| missing(doc, s!("publication date")))?;
    let reason = cells.get(2).map(|td| text_of(*td)).filter(|r| !r.is_empty());

    Ok(Publication {
        effective_date: text_of(link),
        publication_date,
        reason,
        index_href: s!(index_href),
        culture_tag: culture_tag(index_href),
    })
}

/// Culture tag from an index file name, matched case-insensitively:
/// `…/index-nb-NO.html` gives `nb-NO`.
pub fn culture_tag(href: &str) -> Option<String> {
    let path = href.split(['#', '?']).next().unwrap_or_default();
    let name = path.rsplit('/').next().unwrap_or_default();
    let lower = name.to_ascii_lowercase();
    if !lower.starts_with(INDEX_FILE_PREFIX) || !lower.ends_with(".html") {
        return None;
    }
    let tag = &name[INDEX_FILE_PREFIX.len()..name.len() - ".html".len()];
    (!tag.is_empty()).then(|| s!(tag))
}

/// `src` of the frame called `name`.
pub fn frame_src(doc: &XhtmlDocument, name: &str) -> Result<String> {
    let css = join!("frameset > ", &attr_sel!("frame", "name", name));
    doc.select(&css)?
        .into_iter()
        .find_map(|el| el.value().attr("src").map(|src| s!(src)))
        .ok_or_else(|| missing(doc, format!("frame {name}")))
}

/// Follow the index frameset at `index_path` down to the menu file.
pub fn resolve_index(index_path: &Path) -> Result<IndexPages> {
    let index = XhtmlDocument::load(index_path)?;
    let nav_path = resolve_href(index_path, &frame_src(&index, NAV_BASE_FRAME)?)?;
    let cover = resolve_href(index_path, &frame_src(&index, CONTENT_FRAME)?)?;

    let nav = XhtmlDocument::load(&nav_path)?;
    let menu = resolve_href(&nav_path, &frame_src(&nav, NAV_FRAME)?)?;
    logd!("Index: {} → menu {}", index_path.display(), menu.display());
    Ok(IndexPages { menu, cover })
}

/// Read the listing at `listing_path` and follow its current issue to the
/// index file.
pub fn resolve_publication(listing_path: &Path) -> Result<(Publication, PathBuf)> {
    let listing = XhtmlDocument::load(listing_path)?;
    let publication = parse_publication(&listing)?;
    let index = resolve_href(listing_path, &publication.index_href)?;
    Ok((publication, index))
}
