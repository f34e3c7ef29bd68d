// src/engine/observe.rs
use std::collections::BTreeSet;

use crate::store::RowRef;

/// One directed co-occurrence record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Observation {
    pub source_table: String,
    pub source_id: i64,
    pub related_table: String,
    pub related_id: i64,
}

impl Observation {
    pub fn new(source: &RowRef, related: &RowRef) -> Self {
        Self {
            source_table: source.table.clone(),
            source_id: source.id,
            related_table: related.table.clone(),
            related_id: related.id,
        }
    }

    pub fn source(&self) -> RowRef {
        RowRef::new(self.source_table.as_str(), self.source_id)
    }

    pub fn related(&self) -> RowRef {
        RowRef::new(self.related_table.as_str(), self.related_id)
    }
}

/// Pending co-occurrence log. Keys are unique, so observing the same
/// pair again changes nothing.
#[derive(Clone, Debug, Default)]
pub struct RelationLog {
    entries: BTreeSet<Observation>,
}

impl RelationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `a` and `b` as related, in both directions.
    pub fn observe(&mut self, a: &RowRef, b: &RowRef) {
        self.record(a, b);
        self.record(b, a);
    }

    /// One direction only. Returns false if the record already existed.
    pub fn record(&mut self, source: &RowRef, related: &RowRef) -> bool {
        self.entries.insert(Observation::new(source, related))
    }

    pub fn contains(&self, source: &RowRef, related: &RowRef) -> bool {
        self.entries.contains(&Observation::new(source, related))
    }

    pub fn remove(&mut self, observation: &Observation) -> bool {
        self.entries.remove(observation)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct (source table, related table) pairs still present.
    pub fn table_pairs(&self) -> BTreeSet<(String, String)> {
        self.entries
            .iter()
            .map(|o| (o.source_table.clone(), o.related_table.clone()))
            .collect()
    }
}

/// Every entity of one row related to every other one.
pub fn observe_row(log: &mut RelationLog, entities: &[RowRef]) {
    for (i, a) in entities.iter().enumerate() {
        for b in &entities[i + 1..] {
            log.observe(a, b);
        }
    }
}

/// Every entity of `members` related to every entity of `owners`.
pub fn observe_between(log: &mut RelationLog, owners: &[RowRef], members: &[RowRef]) {
    for owner in owners {
        for member in members {
            log.observe(owner, member);
        }
    }
}
