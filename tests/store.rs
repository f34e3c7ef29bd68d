// tests/store.rs
//
// Tests for the dynamic-schema store: lazy tables/columns/rows, identity,
// last-write-wins, synthetic ids and junction orientation.
//
use aip_scrape::store::{DataSet, Relation, RelationKind, RowRef};

#[test]
fn rows_are_idempotent_by_id() {
    let mut ds = DataSet::new();
    let a = ds.get_or_create_row("TNAVAID", 7);
    let b = ds.get_or_create_row("TNAVAID", 7);
    assert_eq!(a, b);
    assert_eq!(ds.table("TNAVAID").unwrap().len(), 1);
    assert_eq!(ds.entity_count(), 1);
}

#[test]
fn attribute_writes_merge_and_last_wins() {
    let mut ds = DataSet::new();
    let r = RowRef::new("TNAVAID", 1);
    ds.set_attribute(&r, "TXT_NAME", "OSLO");
    ds.set_attribute(&r, "CODE_ID", "OSL");
    ds.set_attribute(&r, "TXT_NAME", "GARDERMOEN");

    assert_eq!(ds.get(&r, "TXT_NAME"), Some("GARDERMOEN"));
    assert_eq!(ds.get(&r, "CODE_ID"), Some("OSL"));
    assert_eq!(ds.table("TNAVAID").unwrap().len(), 1);
}

#[test]
fn columns_keep_first_use_order_and_default_empty() {
    let mut ds = DataSet::new();
    let r1 = RowRef::new("TDESIGNATED_POINT", 1);
    let r2 = RowRef::new("TDESIGNATED_POINT", 2);
    ds.set_attribute(&r1, "CODE_ID", "ADOPI");
    ds.set_attribute(&r2, "GEO_LAT", "600000N");

    let t = ds.table("TDESIGNATED_POINT").unwrap();
    assert_eq!(t.columns(), ["CODE_ID", "GEO_LAT"]);
    assert_eq!(t.get(1, "GEO_LAT"), None);
    assert_eq!(t.get(2, "CODE_ID"), None);
    assert!(t.has_column("ROWID"));
    assert_eq!(t.caption(), "DESIGNATED_POINT");
}

#[test]
fn synthetic_ids_are_negative_and_skip_taken() {
    let mut ds = DataSet::new();
    ds.get_or_create_row("TAIRSPACE_POLYGON", -1);
    let t = ds.get_or_create_table("TAIRSPACE_POLYGON");
    assert_eq!(t.create_synthetic_row(), -2);
    assert_eq!(t.create_synthetic_row(), -3);
    assert_eq!(t.len(), 3);
}

#[test]
fn junction_reused_under_either_name() {
    let mut ds = DataSet::new();
    let j = ds.get_or_create_junction("M2MTA_TB", "M2MTB_TA", "TA", "TB");
    assert!(j.insert("TA", 1, 2));
    assert!(!j.insert("TA", 1, 2));

    // reverse orientation finds the same table and keys by table name
    let j = ds.get_or_create_junction("M2MTB_TA", "M2MTA_TB", "TB", "TA");
    assert_eq!(j.name(), "M2MTA_TB");
    assert!(j.insert("TB", 5, 6));
    assert_eq!(j.pairs().iter().copied().collect::<Vec<_>>(), vec![(1, 2), (6, 5)]);
    assert_eq!(ds.junctions().count(), 1);
}

#[test]
fn relations_are_registered_once() {
    let mut ds = DataSet::new();
    let rel = Relation {
        name: "TA_FK_TB".into(),
        kind: RelationKind::ForeignKey,
        parent_table: "TB".into(),
        child_table: "TA".into(),
        child_column: "TB".into(),
    };
    ds.add_relation(rel.clone());
    ds.add_relation(rel);
    assert_eq!(ds.relations().len(), 1);
}
