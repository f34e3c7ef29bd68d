// src/engine/normalize.rs
//! Fold the pending co-occurrence log into schema.
//!
//! Observations are grouped by ordered (source table, related table).
//! For each group the "multi-mapping" set holds the source ids that are
//! related to more than one id of the other table. Groups are processed
//! in lexicographic table-pair order:
//!
//! 1. same table on both sides: dropped;
//! 2. empty multi-mapping set: foreign-key column on the source table,
//!    named after the related table;
//! 3. non-empty, and no reverse group with a non-empty set: dropped, the
//!    reverse group already carries the relation as a foreign key;
//! 4. otherwise: rows in junction table `M2M<source>_<related>` (or the
//!    one already created under the reverse name).
//!
//! Case 3 looks only at the reverse group's statistics, never at whether
//! that group has been processed yet.
//!
//! Every observation is removed from the log as its group is handled;
//! anything left afterwards is an error.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::consts::{FK_INFIX, M2M_PREFIX};
use crate::engine::observe::{Observation, RelationLog};
use crate::error::{AipError, Result};
use crate::store::{DataSet, Relation, RelationKind};

/// What normalization did, for logging and tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Observations in the log when normalization started.
    pub observations: usize,
    pub self_pairs: usize,
    pub mirrors: usize,
    /// Names of the foreign-key relations created.
    pub foreign_keys: Vec<String>,
    /// Names of the junction tables filled.
    pub junctions: Vec<String>,
}

/// All observations for one ordered table pair.
#[derive(Clone, Debug)]
pub struct PairGroup {
    pub source: String,
    pub related: String,
    pub observations: Vec<Observation>,
    /// Source ids related to more than one id of `related`.
    pub multi: BTreeSet<i64>,
}

impl PairGroup {
    fn is_self(&self) -> bool {
        self.source == self.related
    }

    fn is_many(&self) -> bool {
        !self.multi.is_empty()
    }
}

/// Group the log by (source, related) table pair, sorted by the pair.
pub fn group_pairs(log: &RelationLog) -> Vec<PairGroup> {
    let mut by_pair: BTreeMap<(&str, &str), Vec<Observation>> = BTreeMap::new();
    for o in log.iter() {
        by_pair
            .entry((o.source_table.as_str(), o.related_table.as_str()))
            .or_default()
            .push(o.clone());
    }

    by_pair
        .into_iter()
        .map(|((source, related), observations)| {
            let mut per_source: BTreeMap<i64, usize> = BTreeMap::new();
            for o in &observations {
                *per_source.entry(o.source_id).or_default() += 1;
            }
            let multi = per_source
                .into_iter()
                .filter(|&(_, n)| n > 1)
                .map(|(id, _)| id)
                .collect();
            PairGroup { source: s!(source), related: s!(related), observations, multi }
        })
        .collect()
}

/// Drain the log into foreign keys and junction tables, then finalize
/// the store. Runs once per dataset.
pub fn normalize(ds: &mut DataSet) -> Result<NormalizeReport> {
    if ds.is_finalized() {
        return Err(AipError::Finalized);
    }

    let groups = group_pairs(ds.pending());
    let mut report = NormalizeReport { observations: ds.pending().len(), ..Default::default() };

    for group in &groups {
        if group.is_self() {
            report.self_pairs += 1;
        } else if !group.is_many() {
            report.foreign_keys.push(attach_foreign_key(ds, group));
        } else if !has_many_reverse(&groups, group) {
            logd!("Normalize: {} -> {} mirrors a foreign key, dropped", group.source, group.related);
            report.mirrors += 1;
        } else {
            let name = fill_junction(ds, group);
            if !report.junctions.contains(&name) {
                report.junctions.push(name);
            }
        }

        let log = ds.pending_mut();
        for o in &group.observations {
            log.remove(o);
        }
    }

    if !ds.pending().is_empty() {
        let pairs = ds
            .pending()
            .table_pairs()
            .into_iter()
            .map(|(a, b)| format!("{a} -> {b}"))
            .collect();
        return Err(AipError::UnresolvedRelations { remaining: ds.pending().len(), pairs });
    }

    ds.finalize();
    logf!(
        "Normalize: {} observations -> {} foreign keys, {} junctions ({} self pairs, {} mirrors dropped)",
        report.observations,
        report.foreign_keys.len(),
        report.junctions.len(),
        report.self_pairs,
        report.mirrors
    );
    Ok(report)
}

fn has_many_reverse(groups: &[PairGroup], group: &PairGroup) -> bool {
    groups
        .iter()
        .any(|g| g.source == group.related && g.related == group.source && g.is_many())
}

/// Column `<related>` on the source table holding the related id.
fn attach_foreign_key(ds: &mut DataSet, group: &PairGroup) -> String {
    let column = group.related.as_str();
    let table = ds.get_or_create_table(&group.source);
    table.get_or_create_column(column);
    for o in &group.observations {
        table.set(o.source_id, column, o.related_id.to_string());
    }

    let name = join!(&group.source, FK_INFIX, &group.related);
    ds.add_relation(Relation {
        name: name.clone(),
        kind: RelationKind::ForeignKey,
        parent_table: group.related.clone(),
        child_table: group.source.clone(),
        child_column: s!(column),
    });
    name
}

fn fill_junction(ds: &mut DataSet, group: &PairGroup) -> String {
    let preferred = join!(M2M_PREFIX, &group.source, "_", &group.related);
    let alternate = join!(M2M_PREFIX, &group.related, "_", &group.source);

    let junction = ds.get_or_create_junction(&preferred, &alternate, &group.source, &group.related);
    for o in &group.observations {
        junction.insert(&group.source, o.source_id, o.related_id);
    }
    let name = s!(junction.name());

    for side in [&group.source, &group.related] {
        ds.add_relation(Relation {
            name: join!(&name, FK_INFIX, side),
            kind: RelationKind::Junction,
            parent_table: side.clone(),
            child_table: name.clone(),
            child_column: side.clone(),
        });
    }
    name
}
