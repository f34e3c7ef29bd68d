// tests/pages.rs
//
// End-to-end tests over saved section pages in tests/fixtures: menu
// resolution, per-section loaders and the collect step of the runner.
//
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use aip_scrape::config::options::{ExportFormat, ExportOptions, RunOptions, Section};
use aip_scrape::core::XhtmlDocument;
use aip_scrape::engine::{normalize, CancelToken};
use aip_scrape::progress::{NullProgress, Progress};
use aip_scrape::runner::{collect, locate_menu, plan_sources, run};
use aip_scrape::specs::{self, index, menu};
use aip_scrape::store::{DataSet, RowRef};
use aip_scrape::AipError;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn doc(name: &str) -> XhtmlDocument {
    let path = fixtures().join(name);
    let text = fs::read_to_string(&path).unwrap();
    XhtmlDocument::parse(path.display().to_string(), &text)
}

fn menu_options() -> RunOptions {
    RunOptions { menu: Some(fixtures().join("menu.html")), ..Default::default() }
}

fn check_fixture_dataset(ds: &DataSet) {
    let a = |t: &str, id: i64| RowRef::new(t, id);

    assert_eq!(ds.entity_count(), 25);
    assert_eq!(ds.junctions().count(), 0);
    assert!(ds.pending().is_empty());

    // airspace rings, one per airspace row
    let next = "NEXT_TAIRSPACE_VERTEX";
    assert_eq!(ds.get(&a("TAIRSPACE_VERTEX", 1001), next), Some("1002"));
    assert_eq!(ds.get(&a("TAIRSPACE_VERTEX", 1003), next), Some("1001"));
    assert_eq!(ds.get(&a("TAIRSPACE_VERTEX", 1101), next), Some("1101"));

    // polygons in load order, ENR 2.1 first
    assert_eq!(ds.get(&a("TAIRSPACE_VERTEX", 1002), "TAIRSPACE_POLYGON"), Some("-1"));
    assert_eq!(ds.get(&a("TAIRSPACE_VOLUME", 2101), "TAIRSPACE_POLYGON"), Some("-2"));
    assert_eq!(ds.get(&a("TAIRSPACE_VERTEX", 1101), "TAIRSPACE"), Some("200"));
    assert_eq!(ds.get(&a("TUNIT", 400), "TAIRSPACE"), Some("100"));
    assert_eq!(ds.table("TAIRSPACE_POLYGON").unwrap().len(), 2);

    // ordinary tables get default co-occurrence
    assert_eq!(ds.get(&a("TAREA", 5), "TTIMETABLE"), Some("6"));
    assert_eq!(ds.get(&a("TNAVAID", 501), "TFREQUENCY"), Some("601"));
    assert_eq!(ds.get(&a("TAERODROME", 7), "CODE_ID"), Some("ENFR"));

    // sigpoint clusters
    assert_eq!(ds.get(&a("TUSAGE", 802), "TDESIGNATED_POINT"), Some("701"));
    assert_eq!(ds.get(&a("TUSAGE", 803), "TDESIGNATED_POINT"), Some("702"));
    assert!(ds.contains(&a("TDESIGNATED_POINT", 700)));
}

#[test]
fn menu_items_skip_tabs_and_expanders() {
    let items = menu::parse_menu(&doc("menu.html")).unwrap();
    let ids: Vec<_> = items.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["ENR-2.1", "ENR-2.2", "ENR-4.1", "ENR-4.4", "ENR-5.1"]);

    let item = menu::find(&items, "enr-2.1").unwrap();
    assert_eq!(item.title, "ENR 2.1 FIR, UIR, TMA AND CTA");
    assert_eq!(item.href, "enr-2.1.html#ENR-2.1");
}

#[test]
fn missing_menu_item_is_reported() {
    let items = BTreeMap::new();
    let err = menu::resolve_sections(&fixtures().join("menu.html"), &items, &[Section::Enr4Dot1]).unwrap_err();
    assert!(matches!(err, AipError::MissingMenuItem(ref id) if id == "ENR-4.1"));
}

#[test]
fn sections_load_in_canonical_order() {
    let cancel = CancelToken::new();
    let mut ds = DataSet::new();
    for (section, file) in [
        (Section::Enr2Dot1, "enr-2.1.html"),
        (Section::Enr2Dot2, "enr-2.2.html"),
        (Section::Enr4Dot1, "enr-4.1.html"),
        (Section::Enr4Dot4, "enr-4.4.html"),
    ] {
        specs::load_section(&mut ds, section, &doc(file), &cancel).unwrap();
    }
    let report = normalize(&mut ds).unwrap();
    assert!(report.junctions.is_empty());
    check_fixture_dataset(&ds);
}

#[test]
fn plan_resolves_menu_links() {
    let sources = plan_sources(&menu_options()).unwrap();
    let got: Vec<_> = sources
        .iter()
        .map(|p| (p.section, p.path.file_name().unwrap().to_string_lossy().into_owned()))
        .collect();
    assert_eq!(
        got,
        vec![
            (Section::Enr2Dot1, "enr-2.1.html".to_string()),
            (Section::Enr2Dot2, "enr-2.2.html".to_string()),
            (Section::Enr4Dot1, "enr-4.1.html".to_string()),
            (Section::Enr4Dot4, "enr-4.4.html".to_string()),
        ]
    );
}

#[test]
fn explicit_sections_win_and_only_narrows() {
    let mut opts = menu_options();
    opts.sections.insert(Section::Enr4Dot4, PathBuf::from("elsewhere.html"));
    opts.only = vec![Section::Enr4Dot4, Section::Enr2Dot1];

    let sources = plan_sources(&opts).unwrap();
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0].section, Section::Enr2Dot1);
    assert_eq!(sources[1].path, PathBuf::from("elsewhere.html"));
}

#[test]
fn wanted_section_without_page_is_an_error() {
    let opts = RunOptions { only: vec![Section::Enr4Dot1], ..Default::default() };
    assert!(matches!(plan_sources(&opts), Err(AipError::NoSource(ref id)) if id == "ENR-4.1"));
}

#[derive(Default)]
struct Recorder {
    total: usize,
    done: Vec<String>,
    sections: Vec<Section>,
    logs: Vec<String>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        self.logs.push(msg.to_string());
    }
    fn item_done(&mut self, label: &str) {
        self.done.push(label.to_string());
    }
    fn section_done(&mut self, section: Section, _refs: usize) {
        self.sections.push(section);
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}

#[test]
fn collect_from_menu_matches_direct_load() {
    let mut rec = Recorder::default();
    let (ds, report) = collect(&menu_options(), &CancelToken::new(), Some(&mut rec as &mut dyn Progress)).unwrap();
    assert!(ds.is_finalized());
    assert!(report.observations > 0);
    check_fixture_dataset(&ds);

    assert_eq!(rec.total, 4);
    assert_eq!(rec.done.len(), 4);
    assert!(rec.finished);
}

#[test]
fn cancelled_run_yields_nothing() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let err = collect(&menu_options(), &cancel, None).unwrap_err();
    assert!(matches!(err, AipError::Cancelled));
}

#[test]
fn unreadable_page_aborts() {
    let mut opts = RunOptions::default();
    opts.sections.insert(Section::Enr4Dot1, fixtures().join("no-such-page.html"));
    assert!(matches!(collect(&opts, &CancelToken::new(), None), Err(AipError::Io { .. })));
}

#[test]
fn page_missing_a_subsection_is_fatal() {
    let html = r#"<html><body><div id="ENR-4.4"><div id="ENR-4.4.1"><table><tbody></tbody></table></div></div></body></html>"#;
    let page = XhtmlDocument::parse("partial.html", html);
    let mut ds = DataSet::new();
    let err = specs::load_section(&mut ds, Section::Enr4Dot4, &page, &CancelToken::new()).unwrap_err();
    assert!(matches!(err, AipError::MissingSection { ref path, .. } if path == "ENR-4.4 / ENR-4.4.2"));
}

#[test]
fn run_reports_each_section_then_the_export() {
    let dir = tempfile::tempdir().unwrap();
    let mut opts = menu_options();
    opts.export = ExportOptions::new(ExportFormat::Json, Some(dir.path().to_path_buf()), true);

    let mut rec = Recorder::default();
    let summary = run(&opts, &CancelToken::new(), Some(&mut rec as &mut dyn Progress)).unwrap();
    assert_eq!(summary.entities, 25);
    assert_eq!(rec.sections, Section::ALL.to_vec());
    assert_eq!(rec.logs.last().map(String::as_str), Some("Wrote 1 file(s)"));
}

#[test]
fn page_with_invalid_utf8_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let page = dir.path().join("enr-4.1.html");
    fs::write(&page, b"<html><body><div id=\"ENR-4.1\"><span class=\"SD\">BOD\xD8</span></div></body></html>").unwrap();

    let mut opts = RunOptions::default();
    opts.sections.insert(Section::Enr4Dot1, page.clone());
    let err = collect(&opts, &CancelToken::new(), Some(&mut NullProgress as &mut dyn Progress)).unwrap_err();
    match err {
        AipError::Io { path, source } => {
            assert_eq!(path, page);
            assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
        }
        other => panic!("expected an Io error, got {other:?}"),
    }
}

#[test]
fn publication_listing_gives_current_issue() {
    let p = index::parse_publication(&doc("publications.html")).unwrap();
    assert_eq!(p.effective_date, "16 MAY 2024");
    assert_eq!(p.publication_date, "04 APR 2024");
    assert_eq!(p.reason.as_deref(), Some("AIRAC AMDT 5/2024"));
    assert_eq!(p.index_href, "index-en-GB.html");
    assert_eq!(p.culture_tag.as_deref(), Some("en-GB"));
}

#[test]
fn index_frames_lead_to_menu_and_cover() {
    let pages = index::resolve_index(&fixtures().join("index-en-GB.html")).unwrap();
    assert_eq!(pages.menu.file_name().unwrap(), "menu.html");
    assert_eq!(pages.menu.parent().unwrap().file_name().unwrap(), "fixtures");
    assert_eq!(pages.cover.file_name().unwrap(), "cover.html");
}

#[test]
fn frameset_without_navigation_frame_is_an_error() {
    let page = XhtmlDocument::parse(
        "index.html",
        r#"<html><head></head><frameset><frame name="eAISContent" src="cover.html"/></frameset></html>"#,
    );
    let err = index::frame_src(&page, "eAISNavigationBase").unwrap_err();
    assert!(matches!(err, AipError::MissingElement { ref what, .. } if what == "frame eAISNavigationBase"));
}

#[test]
fn menu_is_found_from_listing_or_index() {
    let by_index = RunOptions { index: Some(fixtures().join("index-en-GB.html")), ..Default::default() };
    let by_listing = RunOptions { publications: Some(fixtures().join("publications.html")), ..Default::default() };
    let a = locate_menu(&by_index).unwrap().unwrap();
    let b = locate_menu(&by_listing).unwrap().unwrap();
    assert_eq!(a, b);
    assert_eq!(a.file_name().unwrap(), "menu.html");
    assert_eq!(locate_menu(&RunOptions::default()).unwrap(), None);
}

#[test]
fn collect_from_listing_matches_direct_load() {
    let opts = RunOptions { publications: Some(fixtures().join("publications.html")), ..Default::default() };
    let (ds, _) = collect(&opts, &CancelToken::new(), None).unwrap();
    check_fixture_dataset(&ds);
}
