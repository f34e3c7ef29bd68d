// src/core/html.rs
//! Markup navigation over saved publication pages.
//!
//! Pages are XHTML but parsed with the tolerant HTML parser; `tbody` is
//! implied when missing. Sections are `div`s keyed by `id`, and a section's
//! rows are the body rows of the table directly inside it.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::config::consts::{SD_CLASS, SD_PARAMS_CLASS};
use crate::engine::types::{RawMarker, RowFragment};
use crate::error::{AipError, Result};

static SD_SPAN: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(&attr_sel!("span", "class", SD_CLASS)).expect("static SD selector")
});

pub struct XhtmlDocument {
    name: String,
    dom: Html,
}

impl XhtmlDocument {
    /// `name` is only used in diagnostics (file path, URL).
    pub fn parse(name: impl Into<String>, text: &str) -> Self {
        Self { name: name.into(), dom: Html::parse_document(text) }
    }

    /// Read and parse a saved page. Text that is not valid UTF-8 is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| AipError::io(path, e))?;
        Ok(Self::parse(path.display().to_string(), &text))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rows of the section at `path`: the first id anywhere under `body`,
    /// each following id a direct child `div` of the previous one.
    /// A missing section is an error; a section with an empty table is not.
    pub fn section_rows(&self, path: &[&str]) -> Result<Vec<TableRow<'_>>> {
        let section_css = section_selector(path);
        let section = parse_selector(&section_css)?;
        if self.dom.select(&section).next().is_none() {
            return Err(AipError::MissingSection {
                document: self.name.clone(),
                path: path.join(" / "),
            });
        }

        let rows = parse_selector(&format!("{section_css} > table > tbody > tr"))?;
        Ok(self.dom.select(&rows).map(TableRow::new).collect())
    }

    pub fn select(&self, css: &str) -> Result<Vec<ElementRef<'_>>> {
        let sel = parse_selector(css)?;
        Ok(self.dom.select(&sel).collect())
    }
}

fn section_selector(path: &[&str]) -> String {
    let mut css = s!("body");
    for (i, id) in path.iter().enumerate() {
        css.push_str(if i == 0 { " " } else { " > " });
        css.push_str(&attr_sel!("div", "id", id));
    }
    css
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| AipError::Selector(format!("{css}: {e}")))
}

/// One `tr` of a section table.
#[derive(Clone, Copy, Debug)]
pub struct TableRow<'a> {
    el: ElementRef<'a>,
}

impl<'a> TableRow<'a> {
    pub fn new(el: ElementRef<'a>) -> Self {
        Self { el }
    }
}

impl RowFragment for TableRow<'_> {
    fn markers(&self) -> Vec<RawMarker> {
        self.el
            .select(&SD_SPAN)
            .map(|sd| RawMarker {
                value: sd.text().collect(),
                params: params_sibling(sd),
            })
            .collect()
    }

    fn class(&self) -> Option<&str> {
        self.el.value().attr("class")
    }
}

/// Text of the first following `span class="sdParams"` sibling.
fn params_sibling(sd: ElementRef<'_>) -> Option<String> {
    sd.next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "span" && el.value().attr("class") == Some(SD_PARAMS_CLASS))
        .map(|el| el.text().collect())
}
