// src/cli.rs
use std::path::PathBuf;

use clap::Parser;

use crate::config::options::{ExportFormat, ExportOptions, RunOptions, Section};
use crate::engine::CancelToken;
use crate::error::Result;
use crate::progress::Progress;
use crate::runner::{self, RunSummary};

/// Extract structured data from saved AIP (eAIP) pages into related tables.
#[derive(Parser, Debug)]
#[command(name = "aip_scrape", version)]
pub struct Args {
    /// Saved navigation menu; section pages are found through its links
    #[arg(long, value_name = "FILE")]
    pub menu: Option<PathBuf>,

    /// Saved index frameset (index-<culture>.html); its frames lead to the menu
    #[arg(long, value_name = "FILE")]
    pub index: Option<PathBuf>,

    /// Saved publication listing; the current issue leads to the index
    #[arg(long, value_name = "FILE")]
    pub publications: Option<PathBuf>,

    /// Page for one section, e.g. ENR-2.1=pages/enr21.html (repeatable, wins over --menu)
    #[arg(long = "section", value_name = "ID=PATH", value_parser = parse_section_path)]
    pub sections: Vec<(Section, PathBuf)>,

    /// Process only these sections (repeatable)
    #[arg(long, value_name = "ID")]
    pub only: Vec<Section>,

    /// Output directory (csv/tsv) or file (json)
    #[arg(short = 'o', long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// csv | tsv | json
    #[arg(long, default_value = "csv")]
    pub format: ExportFormat,

    /// Omit header rows in delimited output
    #[arg(long)]
    pub no_headers: bool,

    /// Append log lines to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_section_path(s: &str) -> std::result::Result<(Section, PathBuf), String> {
    let (id, path) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid ID=PATH: no `=` found in `{s}`"))?;
    if path.trim().is_empty() {
        return Err(format!("missing path for section {id}"));
    }
    Ok((id.parse()?, PathBuf::from(path.trim())))
}

impl Args {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            menu: self.menu.clone(),
            index: self.index.clone(),
            publications: self.publications.clone(),
            sections: self.sections.iter().cloned().collect(),
            only: self.only.clone(),
            export: ExportOptions::new(self.format, self.out.clone(), !self.no_headers),
        }
    }
}

/// Status lines on stderr.
#[derive(Default)]
pub struct CliProgress {
    total: usize,
    done: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, label: &str) {
        self.done += 1;
        eprintln!("[{}/{}] loaded {}", self.done, self.total, label);
    }

    fn section_done(&mut self, section: Section, refs: usize) {
        eprintln!("{section}: {refs} entity refs");
    }
}

pub fn run(args: &Args) -> Result<RunSummary> {
    let opts = args.run_options();
    let mut progress = CliProgress::default();
    runner::run(&opts, &CancelToken::new(), Some(&mut progress as &mut dyn Progress))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_path_pairs() {
        let (s, p) = parse_section_path("enr-4.4=pages/enr44.html").unwrap();
        assert_eq!(s, Section::Enr4Dot4);
        assert_eq!(p, PathBuf::from("pages/enr44.html"));
        assert!(parse_section_path("ENR-4.4").is_err());
        assert!(parse_section_path("ENR-9.9=x.html").is_err());
    }

    #[test]
    fn args_to_options() {
        let args = Args::parse_from([
            "aip_scrape", "--menu", "menu.html", "--section", "ENR-2.1=a.html", "--only", "ENR-2.1",
            "--format", "json", "--no-headers",
        ]);
        let opts = args.run_options();
        assert_eq!(opts.menu, Some(PathBuf::from("menu.html")));
        assert_eq!(opts.index, None);
        assert_eq!(opts.sections.get(&Section::Enr2Dot1), Some(&PathBuf::from("a.html")));
        assert_eq!(opts.only, vec![Section::Enr2Dot1]);
        assert_eq!(opts.export.format, ExportFormat::Json);
        assert!(!opts.export.include_headers);
    }

    #[test]
    fn index_and_listing_are_menu_sources() {
        let opts = Args::parse_from(["aip_scrape", "--index", "aip/index-en-GB.html"]).run_options();
        assert_eq!(opts.index, Some(PathBuf::from("aip/index-en-GB.html")));
        assert!(opts.has_menu_source());

        let opts = Args::parse_from(["aip_scrape", "--publications", "AIP.html"]).run_options();
        assert!(opts.has_menu_source());
        assert!(!Args::parse_from(["aip_scrape"]).run_options().has_menu_source());
    }
}
