// src/progress.rs
use crate::config::options::Section;

/// Status reporting for a run. Every method has a no-op default, so a
/// frontend overrides only what it shows.
pub trait Progress {
    /// Number of pages about to be loaded.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One page was read; `label` is its section id.
    fn item_done(&mut self, _label: &str) {}

    /// One section went through its loader.
    fn section_done(&mut self, _section: Section, _refs: usize) {}

    /// All pages are in.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
