//! Property-based checks of the view invariants over generated relations.

use hypergraph_props::{Hypergraph, Key, Level, PropertyRecord, WEIGHT};
use proptest::prelude::*;

const NODE_NAMES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

fn arb_pairs() -> impl Strategy<Value = Vec<(i64, &'static str)>> {
    prop::collection::vec((0i64..8, prop::sample::select(NODE_NAMES.to_vec())), 0..40)
}

fn arb_level() -> impl Strategy<Value = Level> {
    prop::sample::select(Level::ALL.to_vec())
}

/// Weight overrides on keys drawn from a superset of the universe, so some
/// land outside it.
fn arb_overrides() -> impl Strategy<Value = Vec<(i64, &'static str, i64)>> {
    prop::collection::vec(
        (0i64..10, prop::sample::select(vec!["A", "B", "C", "G", "H"]), 2i64..100),
        0..20,
    )
}

fn key_for(level: Level, edge: i64, node: &str) -> Key {
    match level {
        Level::Nodes => Key::scalar(node),
        Level::Edges => Key::scalar(edge),
        Level::Incidences => Key::pair(edge, node),
    }
}

proptest! {
    #[test]
    fn universe_completeness(pairs in arb_pairs(), level in arb_level()) {
        let hg = Hypergraph::from_pairs(pairs);
        let view = hg.view(level);
        let table = view.materialize();

        prop_assert_eq!(table.len(), hg.incidences().key_universe(level).len());
        for key in hg.incidences().key_universe(level) {
            prop_assert!(table.contains(&key));
        }
        prop_assert!(view.explicit_properties().is_empty());
    }

    #[test]
    fn defaults_and_overrides(
        pairs in arb_pairs(),
        level in arb_level(),
        overrides in arb_overrides(),
    ) {
        let hg = Hypergraph::from_pairs(pairs);
        let mut expected_weights = std::collections::HashMap::new();
        for (edge, node, weight) in &overrides {
            let key = key_for(level, *edge, node);
            hg.set_property(level, key.clone(), WEIGHT, *weight).unwrap();
            expected_weights.insert(key, *weight as f64);
        }

        let view = hg.view(level);
        let table = view.materialize();
        prop_assert_eq!(table.len(), view.len());

        let mut in_universe = 0usize;
        for (key, weight) in &expected_weights {
            if view.contains(key) {
                in_universe += 1;
                prop_assert_eq!(table.get(key).unwrap().weight, *weight);
            } else {
                prop_assert!(!table.contains(key));
            }
        }
        for row in table.rows() {
            if !expected_weights.contains_key(&row.key) {
                prop_assert_eq!(&row.record, &PropertyRecord::default());
            }
        }
        prop_assert_eq!(view.explicit_properties().len(), in_universe);
    }

    #[test]
    fn materialize_is_idempotent(pairs in arb_pairs(), overrides in arb_overrides()) {
        let hg = Hypergraph::from_pairs(pairs);
        for (edge, node, weight) in overrides {
            hg.set_property(Level::Incidences, Key::pair(edge, node), WEIGHT, weight).unwrap();
        }
        let view = hg.view(Level::Incidences);
        prop_assert_eq!(view.materialize(), view.materialize());
    }
}
