// src/store.rs
//! In-memory relational store with a schema discovered at load time.
//!
//! Tables, columns and rows come into existence the first time a marker
//! names them. Every entity table has a single `ROWID` identity column
//! holding the source-assigned id; lookup by id goes through a per-table
//! index. Values are text. Consumers that want numbers or dates parse them.
//!
//! The pending relation log lives next to the tables but is not one of
//! them. Normalization drains it and then finalizes the store.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use crate::config::consts::ROWID;
use crate::engine::observe::RelationLog;

/// Identity of one entity: (table, id).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowRef {
    pub table: String,
    pub id: i64,
}

impl RowRef {
    pub fn new(table: impl Into<String>, id: i64) -> Self {
        Self { table: table.into(), id }
    }
}

impl fmt::Display for RowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.table, self.id)
    }
}

/// One entity. Cells are positional against the owning table's columns;
/// a missing trailing cell means "empty", so adding a column never
/// touches existing rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    id: i64,
    cells: Vec<Option<String>>,
}

impl Row {
    fn new(id: i64) -> Self {
        Self { id, cells: Vec::new() }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// Value at column ordinal `ix`.
    pub fn cell(&self, ix: usize) -> Option<&str> {
        self.cells.get(ix).and_then(|c| c.as_deref())
    }

    fn set_cell(&mut self, ix: usize, value: String) {
        if self.cells.len() <= ix {
            self.cells.resize(ix + 1, None);
        }
        self.cells[ix] = Some(value);
    }
}

#[derive(Clone, Debug)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    col_index: HashMap<String, usize>,
    rows: Vec<Row>,
    index: HashMap<i64, usize>,
    next_synthetic: i64,
}

impl Table {
    fn new(name: &str) -> Self {
        Self {
            name: s!(name),
            columns: Vec::new(),
            col_index: HashMap::new(),
            rows: Vec::new(),
            index: HashMap::new(),
            next_synthetic: -1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display caption: the name without its one-letter type prefix.
    pub fn caption(&self) -> &str {
        let mut chars = self.name.chars();
        chars.next();
        chars.as_str()
    }

    /// Attribute columns in first-use order. `ROWID` is implicit.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.col_index.get(name).copied()
    }

    pub fn has_column(&self, name: &str) -> bool {
        name == ROWID || self.col_index.contains_key(name)
    }

    pub fn get_or_create_column(&mut self, name: &str) -> usize {
        if let Some(&ix) = self.col_index.get(name) {
            return ix;
        }
        let ix = self.columns.len();
        self.columns.push(s!(name));
        self.col_index.insert(s!(name), ix);
        ix
    }

    /// Idempotent by id.
    pub fn get_or_create_row(&mut self, id: i64) -> &mut Row {
        let ix = match self.index.get(&id) {
            Some(&ix) => ix,
            None => {
                let ix = self.rows.len();
                self.rows.push(Row::new(id));
                self.index.insert(id, ix);
                ix
            }
        };
        &mut self.rows[ix]
    }

    /// New row with the next synthetic id (-1, -2, …). Synthetic ids
    /// never collide with source ids, which are non-negative.
    pub fn create_synthetic_row(&mut self) -> i64 {
        let mut id = self.next_synthetic;
        while self.index.contains_key(&id) {
            id -= 1;
        }
        self.next_synthetic = id - 1;
        self.get_or_create_row(id);
        id
    }

    pub fn row(&self, id: i64) -> Option<&Row> {
        self.index.get(&id).map(|&ix| &self.rows[ix])
    }

    pub fn contains(&self, id: i64) -> bool {
        self.index.contains_key(&id)
    }

    /// Rows in creation order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: i64, column: &str) -> Option<&str> {
        let ix = self.column_index(column)?;
        self.row(id)?.cell(ix)
    }

    /// Last write per column wins.
    pub fn set(&mut self, id: i64, column: &str, value: impl Into<String>) {
        let ix = self.get_or_create_column(column);
        self.get_or_create_row(id).set_cell(ix, value.into());
    }
}

/// Pair table for a many-to-many relation. Columns are named after the
/// two entity tables; the id pair is the key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JunctionTable {
    name: String,
    left: String,
    right: String,
    pairs: BTreeSet<(i64, i64)>,
}

impl JunctionTable {
    fn new(name: &str, left: &str, right: &str) -> Self {
        Self { name: s!(name), left: s!(left), right: s!(right), pairs: BTreeSet::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column (= entity table) names, left then right.
    pub fn columns(&self) -> [&str; 2] {
        [&self.left, &self.right]
    }

    /// Insert a link given ids keyed by table name. Returns false when
    /// the pair was already present.
    pub fn insert(&mut self, table_a: &str, id_a: i64, id_b: i64) -> bool {
        if table_a == self.left {
            self.pairs.insert((id_a, id_b))
        } else {
            self.pairs.insert((id_b, id_a))
        }
    }

    pub fn pairs(&self) -> &BTreeSet<(i64, i64)> {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelationKind {
    /// Child column holds the parent's id (1:N).
    ForeignKey,
    /// Junction column holds one side's id (M:N).
    Junction,
    /// Same-table successor link (vertex rings).
    Successor,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::ForeignKey => "foreign_key",
            RelationKind::Junction => "junction",
            RelationKind::Successor => "successor",
        }
    }
}

/// Declared link from `child_table.child_column` to `parent_table.ROWID`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relation {
    pub name: String,
    pub kind: RelationKind,
    pub parent_table: String,
    pub child_table: String,
    pub child_column: String,
}

#[derive(Debug, Default)]
pub struct DataSet {
    tables: BTreeMap<String, Table>,
    junctions: BTreeMap<String, JunctionTable>,
    relations: Vec<Relation>,
    pending: RelationLog,
    finalized: bool,
}

impl DataSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create_table(&mut self, name: &str) -> &mut Table {
        self.tables.entry(s!(name)).or_insert_with(|| {
            logd!("Store: new table {}", name);
            Table::new(name)
        })
    }

    pub fn get_or_create_column(&mut self, table: &str, column: &str) -> usize {
        self.get_or_create_table(table).get_or_create_column(column)
    }

    pub fn get_or_create_row(&mut self, table: &str, id: i64) -> RowRef {
        self.get_or_create_table(table).get_or_create_row(id);
        RowRef::new(table, id)
    }

    pub fn set_attribute(&mut self, row: &RowRef, column: &str, value: impl Into<String>) {
        self.get_or_create_table(&row.table).set(row.id, column, value);
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Entity tables by name.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn get(&self, row: &RowRef, column: &str) -> Option<&str> {
        self.tables.get(&row.table)?.get(row.id, column)
    }

    pub fn contains(&self, row: &RowRef) -> bool {
        self.tables.get(&row.table).is_some_and(|t| t.contains(row.id))
    }

    /// Total entity count across tables.
    pub fn entity_count(&self) -> usize {
        self.tables.values().map(Table::len).sum()
    }

    pub fn junction(&self, name: &str) -> Option<&JunctionTable> {
        self.junctions.get(name)
    }

    pub fn junctions(&self) -> impl Iterator<Item = &JunctionTable> {
        self.junctions.values()
    }

    /// Existing junction under either naming order, or a fresh one named
    /// `preferred` with columns `left`, `right`.
    pub fn get_or_create_junction(
        &mut self,
        preferred: &str,
        alternate: &str,
        left: &str,
        right: &str,
    ) -> &mut JunctionTable {
        let key = if !self.junctions.contains_key(preferred) && self.junctions.contains_key(alternate) {
            alternate
        } else {
            preferred
        };
        self.junctions.entry(s!(key)).or_insert_with(|| {
            logd!("Store: new junction {} ({}, {})", preferred, left, right);
            JunctionTable::new(preferred, left, right)
        })
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Register a relation once by name.
    pub fn add_relation(&mut self, relation: Relation) {
        if !self.relations.iter().any(|r| r.name == relation.name) {
            self.relations.push(relation);
        }
    }

    pub fn pending(&self) -> &RelationLog {
        &self.pending
    }

    pub fn pending_mut(&mut self) -> &mut RelationLog {
        &mut self.pending
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub(crate) fn finalize(&mut self) {
        self.finalized = true;
    }
}
