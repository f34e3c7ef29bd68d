// src/config/options.rs
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::consts::*;

/// Publication sections this tool knows how to read.
/// Declaration order is the canonical processing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Enr2Dot1,
    Enr2Dot2,
    Enr4Dot1,
    Enr4Dot4,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Enr2Dot1,
        Section::Enr2Dot2,
        Section::Enr4Dot1,
        Section::Enr4Dot4,
    ];

    /// Menu/anchor id, e.g. `ENR-2.1`.
    pub fn id(&self) -> &'static str {
        match self {
            Section::Enr2Dot1 => "ENR-2.1",
            Section::Enr2Dot2 => "ENR-2.2",
            Section::Enr4Dot1 => "ENR-4.1",
            Section::Enr4Dot4 => "ENR-4.4",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = String;

    /// Accepts `ENR-2.1`, `enr-2.1`, `ENR2.1` and `enr21`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        match key.as_str() {
            "ENR21" => Ok(Section::Enr2Dot1),
            "ENR22" => Ok(Section::Enr2Dot2),
            "ENR41" => Ok(Section::Enr4Dot1),
            "ENR44" => Ok(Section::Enr4Dot4),
            _ => Err(format!("Unknown section: {s} (expected one of ENR-2.1, ENR-2.2, ENR-4.1, ENR-4.4)")),
        }
    }
}

/// One page to load for one section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSource {
    pub section: Section,
    pub path: PathBuf,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Saved navigation menu; section pages are resolved from its links.
    pub menu: Option<PathBuf>,
    /// Saved index frameset (`index-<culture>.html`) leading to the menu.
    pub index: Option<PathBuf>,
    /// Saved publication listing; its current issue leads to the index.
    pub publications: Option<PathBuf>,
    /// Explicit section pages. These win over the menu.
    pub sections: BTreeMap<Section, PathBuf>,
    /// Restrict the run to these sections. Empty means every section.
    pub only: Vec<Section>,
    pub export: ExportOptions,
}

impl RunOptions {
    pub fn wants(&self, section: Section) -> bool {
        self.only.is_empty() || self.only.contains(&section)
    }

    /// A menu is given directly or can be reached from an index or listing.
    pub fn has_menu_source(&self) -> bool {
        self.menu.is_some() || self.index.is_some() || self.publications.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    /// Field separator for the delimited formats.
    pub fn delim(&self) -> Option<char> {
        match self {
            ExportFormat::Csv => Some(','),
            ExportFormat::Tsv => Some('\t'),
            ExportFormat::Json => None,
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("Unknown format: {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    out_path: Option<PathBuf>,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_path: None,
            include_headers: true,
        }
    }
}

impl ExportOptions {
    pub fn new(format: ExportFormat, out_path: Option<PathBuf>, include_headers: bool) -> Self {
        Self { format, out_path, include_headers }
    }

    /// Delimited formats write a directory of per-table files; JSON writes one file.
    /// A JSON target that names a directory gets the default file name inside it.
    pub fn out_path(&self) -> PathBuf {
        match (self.format, &self.out_path) {
            (ExportFormat::Json, Some(p)) if p.is_dir() || looks_like_dir_hint(p) => {
                p.join(join!(DEFAULT_JSON_FILE, ".", self.format.ext()))
            }
            (_, Some(p)) => p.clone(),
            (ExportFormat::Json, None) => {
                PathBuf::from(DEFAULT_OUT_DIR).join(join!(DEFAULT_JSON_FILE, ".", self.format.ext()))
            }
            (_, None) => PathBuf::from(DEFAULT_OUT_DIR),
        }
    }

    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        self.out_path = if s.is_empty() { None } else { Some(PathBuf::from(s)) };
    }
}

/// Trailing separator means "this is a directory" even if it does not exist yet.
pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.as_os_str().to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}
