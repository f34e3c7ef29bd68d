// src/engine/topology.rs
//! Structure beyond plain co-occurrence.
//!
//! - **Airspace rows**: sub-entities of one row are grouped by table. The
//!   vertex group becomes a closed successor ring in `NEXT_<table>`.
//!   Vertex, volume and layer-class members share one synthetic polygon
//!   entity per row. Everything in the row is related to the current
//!   airspace, the most recent `TAIRSPACE` entity seen in the section.
//! - **Clusters**: an owner row starts a cluster; entities of the rows
//!   after it, up to the next owner, are related to the owner's entities.

use crate::config::consts::*;
use crate::engine::extract::load_row;
use crate::engine::observe::observe_between;
use crate::engine::types::{CancelToken, LoadMode, RowFragment};
use crate::error::{AipError, Result};
use crate::store::{DataSet, Relation, RelationKind, RowRef};

/// Totals for one airspace section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AirspaceStats {
    pub rows: usize,
    pub entities: usize,
    pub polygons: usize,
}

/// Load airspace rows in document order with the airspace rules applied
/// instead of default co-occurrence.
pub fn load_airspace_rows<R: RowFragment>(
    ds: &mut DataSet,
    rows: &[R],
    section: &str,
    cancel: &CancelToken,
) -> Result<AirspaceStats> {
    let mut stats = AirspaceStats::default();
    let mut airspace: Option<RowRef> = None;

    for row in rows {
        cancel.check()?;
        let subs = load_row(ds, row, LoadMode::Detached)?;
        stats.rows += 1;
        stats.entities += subs.len();

        if let Some(found) = subs.iter().find(|r| r.table == T_AIRSPACE) {
            airspace = Some(found.clone());
        }
        if subs.is_empty() {
            continue;
        }
        let parent = airspace.as_ref().ok_or_else(|| AipError::MissingContext {
            section: s!(section),
            table: s!(T_AIRSPACE),
        })?;
        if link_airspace_row(ds, parent, &subs).is_some() {
            stats.polygons += 1;
        }
    }

    logd!("Topology: {}: {} rows, {} entities, {} polygons", section, stats.rows, stats.entities, stats.polygons);
    Ok(stats)
}

/// Apply the airspace rules to the entities of one row. Returns the
/// polygon allocated for the row, if any.
pub fn link_airspace_row(ds: &mut DataSet, parent: &RowRef, subs: &[RowRef]) -> Option<RowRef> {
    let mut polygon: Option<RowRef> = None;

    for (table, group) in group_by_table(subs) {
        if table == T_AIRSPACE_VERTEX {
            chain_vertices(ds, &group);
        }
        if is_polygon_member(table) {
            if polygon.is_none() {
                polygon = Some(create_polygon(ds, parent));
            }
            if let Some(poly) = &polygon {
                for member in &group {
                    ds.pending_mut().observe(member, poly);
                }
            }
        }
    }

    for sub in subs {
        ds.pending_mut().observe(sub, parent);
    }
    polygon
}

fn is_polygon_member(table: &str) -> bool {
    matches!(table, T_AIRSPACE_VERTEX | T_AIRSPACE_VOLUME | T_AIRSPACE_LAYER_CLASS)
}

/// New polygon entity, related both ways to `parent`.
fn create_polygon(ds: &mut DataSet, parent: &RowRef) -> RowRef {
    let id = ds.get_or_create_table(T_AIRSPACE_POLYGON).create_synthetic_row();
    let polygon = RowRef::new(T_AIRSPACE_POLYGON, id);
    ds.pending_mut().observe(&polygon, parent);
    polygon
}

/// Close a ring over same-table `vertices` in source order: each row's
/// `NEXT_<table>` holds its successor's id, the last points at the first.
/// A single vertex points at itself. An empty slice is a no-op.
pub fn chain_vertices(ds: &mut DataSet, vertices: &[RowRef]) {
    let (Some(first), Some(last)) = (vertices.first(), vertices.last()) else {
        return;
    };
    let table = first.table.clone();
    let column = join!(NEXT_PREFIX, &table);

    ds.get_or_create_column(&table, &column);
    ds.add_relation(Relation {
        name: join!(&table, FK_INFIX, &column),
        kind: RelationKind::Successor,
        parent_table: table.clone(),
        child_table: table.clone(),
        child_column: column.clone(),
    });

    for pair in vertices.windows(2) {
        ds.set_attribute(&pair[0], &column, pair[1].id.to_string());
    }
    ds.set_attribute(last, &column, first.id.to_string());
}

/// Split entities by table. Groups come in order of each table's first
/// appearance; members keep their order.
pub fn group_by_table(rows: &[RowRef]) -> Vec<(&str, Vec<RowRef>)> {
    let mut groups: Vec<(&str, Vec<RowRef>)> = Vec::new();
    for row in rows {
        match groups.iter_mut().find(|(t, _)| *t == row.table) {
            Some((_, members)) => members.push(row.clone()),
            None => groups.push((row.table.as_str(), vec![row.clone()])),
        }
    }
    groups
}

/// Totals for one clustered section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClusterStats {
    pub clusters: usize,
    /// Rows before the first owner.
    pub skipped: usize,
    pub entities: usize,
}

/// Scan `rows` in document order. A row for which `is_owner` holds starts
/// a cluster; each following row up to the next owner is related to every
/// entity of the owner row. Rows before the first owner are skipped.
/// All loaded rows also get default co-occurrence.
pub fn link_clusters<R, F>(ds: &mut DataSet, rows: &[R], is_owner: F, cancel: &CancelToken) -> Result<ClusterStats>
where
    R: RowFragment,
    F: Fn(&R) -> bool,
{
    let mut owners: Option<Vec<RowRef>> = None;
    let mut stats = ClusterStats::default();

    for row in rows {
        cancel.check()?;
        if is_owner(row) {
            let loaded = load_row(ds, row, LoadMode::Related)?;
            stats.clusters += 1;
            stats.entities += loaded.len();
            owners = Some(loaded);
            continue;
        }
        let Some(current) = owners.as_deref() else {
            stats.skipped += 1;
            continue;
        };
        let members = load_row(ds, row, LoadMode::Related)?;
        stats.entities += members.len();
        observe_between(ds.pending_mut(), current, &members);
    }

    if stats.skipped > 0 {
        logd!("Topology: skipped {} rows before the first cluster owner", stats.skipped);
    }
    Ok(stats)
}
