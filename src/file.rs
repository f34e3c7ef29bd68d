// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::options::ExportOptions;
use crate::csv::{junction_header, junction_rows, table_header, table_rows, write_row};
use crate::error::{AipError, Result};
use crate::json::to_json_string;
use crate::store::DataSet;

/// Write the finalized store as `export` describes. Delimited formats
/// produce one `<table>.<ext>` per entity and junction table inside the
/// output directory; JSON produces a single document.
/// Returns the paths written, in write order.
pub fn write_export(ds: &DataSet, export: &ExportOptions) -> Result<Vec<PathBuf>> {
    let path = export.out_path();
    let Some(sep) = export.format.delim() else {
        write_json(ds, &path)?;
        return Ok(vec![path]);
    };

    ensure_directory(&path)?;
    let ext = export.format.ext();
    let mut written = Vec::new();

    for table in ds.tables() {
        let file = path.join(join!(table.name(), ".", ext));
        let header = export.include_headers.then(|| table_header(table));
        write_rows(&file, header.as_deref(), &table_rows(table), sep)?;
        written.push(file);
    }
    for junction in ds.junctions() {
        let file = path.join(join!(junction.name(), ".", ext));
        let header = export.include_headers.then(|| junction_header(junction));
        write_rows(&file, header.as_deref(), &junction_rows(junction), sep)?;
        written.push(file);
    }

    logf!("Export: {} file(s) in {}", written.len(), path.display());
    Ok(written)
}

fn write_json(ds: &DataSet, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let text = to_json_string(ds)?;
    fs::write(path, text).map_err(|e| AipError::io(path, e))?;
    logf!("Export: {}", path.display());
    Ok(())
}

/// Create/truncate `path`, write the optional header then all rows.
pub fn write_rows(path: &Path, header: Option<&[String]>, rows: &[Vec<String>], sep: char) -> Result<()> {
    ensure_parent(path)?;
    let io_err = |e| AipError::io(path, e);
    let file = File::create(path).map_err(io_err)?; // truncate/overwrite
    let mut out = BufWriter::new(file);
    if let Some(h) = header {
        write_row(&mut out, h, sep).map_err(io_err)?;
    }
    for row in rows {
        write_row(&mut out, row, sep).map_err(io_err)?;
    }
    out.flush().map_err(io_err)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(AipError::io(
            dir,
            std::io::Error::other(format!("Path exists but is not a directory: {}", dir.display())),
        ));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| AipError::io(dir, e))?;
    }
    Ok(())
}
