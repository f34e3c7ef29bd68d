// benches/normalize.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use aip_scrape::{
    config::options::Section,
    core::XhtmlDocument,
    engine::{normalize, CancelToken},
    specs,
    store::DataSet,
};

/// ENR 4.4 page with `points` sigpoints, each followed by three member rows.
fn synthetic_enr44(points: usize) -> String {
    let mut html = String::from(
        r#"<html><body><div id="ENR-4.4"><div id="ENR-4.4.1"><table><tbody></tbody></table></div><div id="ENR-4.4.2"><table><tbody>"#,
    );
    for p in 0..points {
        html.push_str(&format!(
            r#"<tr class="sigpoint"><td><span class="SD">P{p:05}</span><span class="sdParams">TDESIGNATED_POINT;CODE_ID;{p}</span></td><td><span class="SD">{p}N</span><span class="sdParams">TDESIGNATED_POINT;GEO_LAT;{p}</span></td></tr>"#
        ));
        for m in 0..3 {
            let id = p * 3 + m;
            html.push_str(&format!(
                r#"<tr><td><span class="SD">use {id}</span><span class="sdParams">TUSAGE;TXT;{id}</span></td><td><span class="SD">FL{m}</span><span class="sdParams">TLEVEL;VAL;{m}</span></td></tr>"#
            ));
        }
    }
    html.push_str("</tbody></table></div></div></body></html>");
    html
}

fn bench_normalize(c: &mut Criterion) {
    let text = synthetic_enr44(500);
    let doc = XhtmlDocument::parse("synthetic.html", &text);
    let cancel = CancelToken::new();

    c.bench_function("enr44_extract", |b| {
        b.iter(|| {
            let mut ds = DataSet::new();
            let n = specs::load_section(&mut ds, Section::Enr4Dot4, black_box(&doc), &cancel).unwrap();
            black_box(n)
        })
    });

    c.bench_function("enr44_extract_normalize", |b| {
        b.iter(|| {
            let mut ds = DataSet::new();
            specs::load_section(&mut ds, Section::Enr4Dot4, black_box(&doc), &cancel).unwrap();
            let report = normalize(&mut ds).unwrap();
            black_box(report.foreign_keys.len())
        })
    });
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
