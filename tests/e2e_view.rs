//! End-to-end tests for materialized incidence views.
//!
//! Uses a small hypergraph of 8 edges over nodes A..G (18 incidences) and
//! checks the dense table against hand-built expectations.

use hypergraph_props::model::props;
use hypergraph_props::{
    HypergraphView, IncidenceStore, Key, Level, PropertyMap, PropertyRecord, PropertyStore,
    PropertyTable, Value, WEIGHT,
};
use hypergraph_props::storage::shared;
use pretty_assertions::assert_eq;
use std::sync::Arc;

// ============================================================================
// Helper: the 8-edge incidence list.
// ============================================================================

fn incidences() -> Vec<(i64, &'static str)> {
    let node_groups: [&[&str]; 8] = [
        &["A", "B"],
        &["A", "C"],
        &["A", "B", "C"],
        &["A", "D", "E", "F"],
        &["D", "F"],
        &["E", "F"],
        &["B"],
        &["G", "B"],
    ];
    node_groups
        .iter()
        .enumerate()
        .flat_map(|(edge, nodes)| nodes.iter().map(move |node| (edge as i64, *node)))
        .collect()
}

fn incidence_view(store: PropertyStore) -> HypergraphView {
    HypergraphView::new(
        Arc::new(IncidenceStore::new(incidences())),
        Level::Incidences,
        shared(store),
    )
}

/// Every incidence with default properties, optionally overridden.
fn expected_table(overrides: &[(Key, PropertyRecord)]) -> Vec<(Key, PropertyRecord)> {
    let mut rows: Vec<(Key, PropertyRecord)> = incidences()
        .into_iter()
        .map(|(e, n)| (Key::pair(e, n), PropertyRecord::default()))
        .collect();
    for (key, record) in overrides {
        if let Some(row) = rows.iter_mut().find(|(k, _)| k == key) {
            row.1 = record.clone();
        }
    }
    rows.sort_by(|a, b| a.0.cmp(&b.0));
    rows
}

fn sorted_rows(mut table: PropertyTable) -> Vec<(Key, PropertyRecord)> {
    table.sort();
    table.rows().iter().map(|row| (row.key.clone(), row.record.clone())).collect()
}

// ============================================================================
// 1. No user-defined properties
// ============================================================================

#[test]
fn test_materialize_with_no_user_defined_properties() {
    let view = incidence_view(PropertyStore::new());

    let table = view.materialize();

    assert_eq!(table.len(), 18);
    assert_eq!(table.len(), incidences().len());
    assert_eq!(sorted_rows(table), expected_table(&[]));

    // Nothing was set explicitly.
    assert_eq!(view.explicit_properties().len(), 0);
}

// ============================================================================
// 2. One user-defined property
// ============================================================================

#[test]
fn test_materialize_with_user_defined_properties() {
    let store = PropertyStore::from_rows(vec![(
        Key::pair(0, "A"),
        props([(WEIGHT, Value::from(42)), ("misc_properties", Value::Map(PropertyMap::new()))]),
    )])
    .unwrap();
    let view = incidence_view(store);

    let table = view.materialize();

    assert_eq!(table.len(), 18);
    assert_eq!(
        sorted_rows(table),
        expected_table(&[(Key::pair(0, "A"), PropertyRecord::default().with_weight(42.0))])
    );
    assert_eq!(view.explicit_properties().len(), 1);
}

#[test]
fn test_set_after_construction() {
    let view = incidence_view(PropertyStore::new());
    view.property_store().write().set(Key::pair(0, "A"), WEIGHT, 42).unwrap();

    let table = view.materialize();

    assert_eq!(table.len(), 18);
    assert_eq!(table.get(&Key::pair(0, "A")).unwrap().weight, 42.0);
    let unchanged = table
        .rows()
        .iter()
        .filter(|row| row.key != Key::pair(0, "A"))
        .filter(|row| row.record == PropertyRecord::default())
        .count();
    assert_eq!(unchanged, 17);

    let explicit = view.explicit_properties();
    assert_eq!(explicit.len(), 1);
    assert!(explicit.contains(&Key::pair(0, "A")));
}

// ============================================================================
// 3. Other levels over the same relation
// ============================================================================

#[test]
fn test_node_and_edge_universes() {
    let incidences = Arc::new(IncidenceStore::new(incidences()));
    let nodes = HypergraphView::new(incidences.clone(), Level::Nodes, shared(PropertyStore::new()));
    let edges = HypergraphView::new(incidences, Level::Edges, shared(PropertyStore::new()));

    assert_eq!(nodes.materialize().len(), 7);
    assert_eq!(edges.materialize().len(), 8);
    assert!(nodes.contains(&Key::scalar("G")));
    assert!(edges.contains(&Key::scalar(7)));
}

// ============================================================================
// 4. Duplicate incidences collapse
// ============================================================================

#[test]
fn test_duplicate_pairs_collapse() {
    let mut raw = incidences();
    raw.extend(incidences().into_iter().take(5));
    let view = HypergraphView::new(
        Arc::new(IncidenceStore::new(raw)),
        Level::Incidences,
        shared(PropertyStore::new()),
    );

    assert_eq!(view.materialize().len(), 18);
}

// ============================================================================
// 5. Idempotence
// ============================================================================

#[test]
fn test_materialize_twice_is_equal() {
    let view = incidence_view(PropertyStore::new());
    view.property_store().write().set(Key::pair(3, "E"), "role", "chair").unwrap();

    assert_eq!(view.materialize(), view.materialize());
}

// ============================================================================
// 6. Defaults are not aliased between rows
// ============================================================================

#[test]
fn test_default_misc_properties_are_independent() {
    let view = incidence_view(PropertyStore::new());
    view.property_store()
        .write()
        .set(Key::pair(0, "A"), "misc_properties", props([("note", "x")]))
        .unwrap();

    let table = view.materialize();
    let with_notes = table
        .rows()
        .iter()
        .filter(|row| !row.record.misc_properties.is_empty())
        .count();
    assert_eq!(with_notes, 1);
    assert_eq!(
        table.get(&Key::pair(0, "A")).unwrap().misc_properties.get("note"),
        Some(&Value::from("x"))
    );
}
