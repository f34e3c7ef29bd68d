// src/json.rs
//! Whole-store JSON document.
//!
//! ```text
//! { "tables":    { "TAIRSPACE": { "caption", "columns", "rows": [{ "ROWID": 1, ... }] } },
//!   "junctions": { "M2MTA_TB": { "columns": ["TA", "TB"], "rows": [[1, 2]] } },
//!   "relations": [{ "name", "kind", "parent", "child", "column" }] }
//! ```
//! Empty cells are `null`.

use serde_json::{json, Map, Value};

use crate::config::consts::ROWID;
use crate::store::{DataSet, JunctionTable, Table};

pub fn to_value(ds: &DataSet) -> Value {
    let tables: Map<String, Value> = ds.tables().map(|t| (s!(t.name()), table_value(t))).collect();
    let junctions: Map<String, Value> = ds.junctions().map(|j| (s!(j.name()), junction_value(j))).collect();
    let relations: Vec<Value> = ds
        .relations()
        .iter()
        .map(|r| {
            json!({
                "name": r.name,
                "kind": r.kind.as_str(),
                "parent": r.parent_table,
                "child": r.child_table,
                "column": r.child_column,
            })
        })
        .collect();

    json!({ "tables": tables, "junctions": junctions, "relations": relations })
}

fn table_value(table: &Table) -> Value {
    let rows: Vec<Value> = table
        .rows()
        .iter()
        .map(|row| {
            let mut obj = Map::new();
            obj.insert(s!(ROWID), json!(row.id()));
            for (ix, col) in table.columns().iter().enumerate() {
                obj.insert(col.clone(), row.cell(ix).map_or(Value::Null, |v| json!(v)));
            }
            Value::Object(obj)
        })
        .collect();

    json!({ "caption": table.caption(), "columns": table.columns(), "rows": rows })
}

fn junction_value(junction: &JunctionTable) -> Value {
    let rows: Vec<Value> = junction.pairs().iter().map(|(l, r)| json!([l, r])).collect();
    json!({ "columns": junction.columns(), "rows": rows })
}

pub fn to_json_string(ds: &DataSet) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&to_value(ds))
}
