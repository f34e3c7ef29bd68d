// src/csv.rs
use std::io::{self, Write};

use crate::config::consts::ROWID;
use crate::store::{JunctionTable, Table};

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// `ROWID` followed by the table's columns in first-use order.
pub fn table_header(table: &Table) -> Vec<String> {
    std::iter::once(s!(ROWID)).chain(table.columns().iter().cloned()).collect()
}

/// Rows in insertion order; empty cells are written as empty fields.
pub fn table_rows(table: &Table) -> Vec<Vec<String>> {
    let width = table.columns().len();
    table
        .rows()
        .iter()
        .map(|row| {
            std::iter::once(row.id().to_string())
                .chain((0..width).map(|ix| s!(row.cell(ix).unwrap_or_default())))
                .collect()
        })
        .collect()
}

pub fn junction_header(junction: &JunctionTable) -> Vec<String> {
    junction.columns().iter().map(|c| s!(*c)).collect()
}

pub fn junction_rows(junction: &JunctionTable) -> Vec<Vec<String>> {
    junction
        .pairs()
        .iter()
        .map(|(l, r)| vec![l.to_string(), r.to_string()])
        .collect()
}
