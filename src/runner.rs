// src/runner.rs
use std::path::PathBuf;

use crate::{
    config::options::{PageSource, RunOptions, Section},
    core::XhtmlDocument,
    engine::{normalize, CancelToken, NormalizeReport},
    error::{AipError, Result},
    file::write_export,
    progress::Progress,
    scrape::load_pages,
    specs::{self, index, menu},
    store::DataSet,
};

/// Summary of what was produced.
#[derive(Debug)]
pub struct RunSummary {
    pub tables: usize,
    pub entities: usize,
    pub junctions: usize,
    pub report: NormalizeReport,
    pub files_written: Vec<PathBuf>,
}

/// Sections this run covers, in canonical order. `--only` narrows;
/// otherwise a menu source means every known section, and without one only
/// the explicitly given pages run.
fn planned_sections(opts: &RunOptions) -> Vec<Section> {
    Section::ALL
        .into_iter()
        .filter(|s| opts.wants(*s))
        .filter(|s| !opts.only.is_empty() || opts.has_menu_source() || opts.sections.contains_key(s))
        .collect()
}

/// Menu file for this run: given directly, or reached from the index
/// frameset, or from the publication listing through its current issue.
pub fn locate_menu(opts: &RunOptions) -> Result<Option<PathBuf>> {
    if let Some(menu) = &opts.menu {
        return Ok(Some(menu.clone()));
    }
    let index_path = match (&opts.index, &opts.publications) {
        (Some(index), _) => index.clone(),
        (None, Some(listing)) => {
            let (publication, index_path) = index::resolve_publication(listing)?;
            logf!(
                "Publication: effective {}, published {}, culture {}{}",
                publication.effective_date,
                publication.publication_date,
                publication.culture_tag.as_deref().unwrap_or("-"),
                publication.reason.as_deref().map(|r| join!(", ", r)).unwrap_or_default()
            );
            index_path
        }
        (None, None) => return Ok(None),
    };
    let pages = index::resolve_index(&index_path)?;
    logd!("Index: cover page {}", pages.cover.display());
    Ok(Some(pages.menu))
}

/// Page file for every planned section. Explicit pages win over menu links.
pub fn plan_sources(opts: &RunOptions) -> Result<Vec<PageSource>> {
    let sections = planned_sections(opts);
    let from_menu: Vec<Section> = sections
        .iter()
        .copied()
        .filter(|s| !opts.sections.contains_key(s))
        .collect();

    let mut linked = Vec::new();
    if !from_menu.is_empty() {
        if let Some(menu_path) = locate_menu(opts)? {
            let doc = XhtmlDocument::load(&menu_path)?;
            let items = menu::parse_menu(&doc)?;
            linked = menu::resolve_sections(&menu_path, &items, &from_menu)?;
        }
    }

    sections
        .into_iter()
        .map(|section| {
            if let Some(path) = opts.sections.get(&section) {
                return Ok(PageSource { section, path: path.clone() });
            }
            linked
                .iter()
                .find(|p| p.section == section)
                .cloned()
                .ok_or_else(|| AipError::NoSource(s!(section.id())))
        })
        .collect()
}

/// Load, extract and normalize every planned section. Nothing is written.
pub fn collect(
    opts: &RunOptions,
    cancel: &CancelToken,
    mut progress: Option<&mut dyn Progress>,
) -> Result<(DataSet, NormalizeReport)> {
    let sources = plan_sources(opts)?;
    if sources.is_empty() {
        logw!("Run: no sections to process");
        if let Some(p) = progress.as_deref_mut() {
            p.log("No sections to process.");
        }
    }

    let pages = load_pages(&sources, cancel, progress.as_mut().map(|p| &mut **p as &mut dyn Progress))?;

    let mut ds = DataSet::new();
    for page in &pages {
        cancel.check()?;
        let doc = XhtmlDocument::parse(page.source.path.display().to_string(), &page.text);
        let loaded = specs::load_section(&mut ds, page.source.section, &doc, cancel)?;
        logf!("{}: {} entity refs", page.source.section, loaded);
        if let Some(p) = progress.as_deref_mut() {
            p.section_done(page.source.section, loaded);
        }
    }

    cancel.check()?;
    let report = normalize(&mut ds)?;
    Ok((ds, report))
}

/// Top-level runner: collect, normalize, export.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(
    opts: &RunOptions,
    cancel: &CancelToken,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let (ds, report) = collect(opts, cancel, progress.as_mut().map(|p| &mut **p as &mut dyn Progress))?;
    let files_written = write_export(&ds, &opts.export)?;
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Wrote {} file(s)", files_written.len()));
    }

    Ok(RunSummary {
        tables: ds.tables().count(),
        entities: ds.entity_count(),
        junctions: ds.junctions().count(),
        report,
        files_written,
    })
}
