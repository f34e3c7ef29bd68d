// src/scrape.rs
//! Page loading. Files are read by a small worker pool; results arrive
//! out of order and are put back in request order before anything is
//! parsed, because vertex rings and clusters depend on document order.

use std::{
    fs, thread,
    sync::{mpsc, Arc, atomic::{AtomicUsize, Ordering}},
};

use crate::{
    config::consts::WORKERS,
    config::options::PageSource,
    engine::types::CancelToken,
    error::{AipError, Result},
    progress::Progress,
};

/// Raw text of one section page.
#[derive(Clone, Debug)]
pub struct LoadedPage {
    pub source: PageSource,
    pub text: String,
}

fn read_page(source: &PageSource) -> Result<String> {
    // Invalid UTF-8 is an error (InvalidData), never replaced.
    fs::read_to_string(&source.path).map_err(|e| AipError::io(&source.path, e))
}

/// Read every page, returning them in the order of `sources`. The first
/// failure aborts the load.
pub fn load_pages(
    sources: &[PageSource],
    cancel: &CancelToken,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<LoadedPage>> {
    if sources.is_empty() {
        return Ok(Vec::new());
    }
    if let Some(p) = progress.as_deref_mut() {
        p.begin(sources.len());
    }

    type Loaded = (usize, Result<String>);

    let jobs = Arc::new(sources.to_vec());
    let counter = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<Loaded>();

    let workers = WORKERS.min(jobs.len()).max(1);
    for _ in 0..workers {
        let jobs = Arc::clone(&jobs);
        let idx = Arc::clone(&counter);
        let tx = res_tx.clone();
        let cancel = cancel.clone();

        thread::spawn(move || {
            loop {
                let i = idx.fetch_add(1, Ordering::Relaxed);
                if i >= jobs.len() || cancel.is_cancelled() {
                    break;
                }
                let result = read_page(&jobs[i]);
                if tx.send((i, result)).is_err() {
                    break; // receiver gone
                }
            }
        });
    }
    drop(res_tx); // main thread is sole receiver now

    // Re-sequence
    let mut slots: Vec<Option<String>> = vec![None; jobs.len()];
    for _ in 0..jobs.len() {
        cancel.check()?;
        let Ok((i, result)) = res_rx.recv() else {
            break; // workers ended early
        };
        let text = result.inspect_err(|e| loge!("Load: {}: {}", jobs[i].section, e))?;
        logd!("Load: {} ({} bytes) from {}", jobs[i].section, text.len(), jobs[i].path.display());
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(jobs[i].section.id());
        }
        slots[i] = Some(text);
    }
    cancel.check()?;

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    jobs.iter()
        .zip(slots)
        .map(|(source, slot)| {
            let text = slot.ok_or_else(|| AipError::WorkerLost(s!(source.section.id())))?;
            Ok(LoadedPage { source: source.clone(), text })
        })
        .collect()
}
