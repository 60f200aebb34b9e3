//! Incidence store: the structural relation of a hypergraph.
//!
//! Holds the distinct `(edge, node)` membership pairs and answers which keys
//! exist at each level. The store is immutable once built; views share it
//! through an `Arc`.

use std::collections::{BTreeMap, BTreeSet};

use hashbrown::HashSet;

use crate::config::RelationLabels;
use crate::model::*;
use crate::{Error, Result};

/// Ground-truth set of `(edge, node)` pairs.
#[derive(Debug, Clone, Default)]
pub struct IncidenceStore {
    labels: RelationLabels,
    /// Distinct pairs in first-seen order.
    pairs: Vec<(Uid, Uid)>,
    /// Incidence keys of `pairs`, for lookups by borrowed `Key`.
    pair_index: HashSet<Key>,
    /// edge → member nodes
    elements: BTreeMap<Uid, BTreeSet<Uid>>,
    /// node → containing edges
    memberships: BTreeMap<Uid, BTreeSet<Uid>>,
    edge_order: Vec<Uid>,
    node_order: Vec<Uid>,
}

impl IncidenceStore {
    /// Build from `(edge, node)` pairs. Duplicate pairs collapse to one.
    pub fn new<E, N>(pairs: impl IntoIterator<Item = (E, N)>) -> Self
    where
        E: Into<Uid>,
        N: Into<Uid>,
    {
        Self::with_labels(pairs, RelationLabels::default())
    }

    pub fn with_labels<E, N>(pairs: impl IntoIterator<Item = (E, N)>, labels: RelationLabels) -> Self
    where
        E: Into<Uid>,
        N: Into<Uid>,
    {
        let mut store = Self { labels, ..Self::default() };
        let mut seen = 0usize;
        for (edge, node) in pairs {
            seen += 1;
            store.insert(edge.into(), node.into());
        }
        tracing::debug!(
            rows = seen,
            incidences = store.pairs.len(),
            collapsed = seen - store.pairs.len(),
            edges = store.edge_order.len(),
            nodes = store.node_order.len(),
            "built incidence store"
        );
        store
    }

    /// Build from two parallel columns of edge and node identities.
    pub fn from_columns(edges: &[Value], nodes: &[Value]) -> Result<Self> {
        if edges.len() != nodes.len() {
            return Err(Error::MalformedRelation(format!(
                "edge column has {} rows but node column has {}",
                edges.len(),
                nodes.len()
            )));
        }
        let labels = RelationLabels::default();
        let mut pairs = Vec::with_capacity(edges.len());
        for (row, (edge, node)) in edges.iter().zip(nodes).enumerate() {
            let edge = required_uid(Some(edge), row, &labels.edges)?;
            let node = required_uid(Some(node), row, &labels.nodes)?;
            pairs.push((edge, node));
        }
        Ok(Self::with_labels(pairs, labels))
    }

    /// Build from table rows, reading identities from the labelled columns.
    pub fn from_rows(rows: &[PropertyMap], labels: &RelationLabels) -> Result<Self> {
        let mut pairs = Vec::with_capacity(rows.len());
        for (row, cells) in rows.iter().enumerate() {
            let edge = required_uid(cells.get(&labels.edges), row, &labels.edges)?;
            let node = required_uid(cells.get(&labels.nodes), row, &labels.nodes)?;
            pairs.push((edge, node));
        }
        Ok(Self::with_labels(pairs, labels.clone()))
    }

    fn insert(&mut self, edge: Uid, node: Uid) {
        if !self.pair_index.insert(Key::Pair(edge.clone(), node.clone())) {
            return;
        }
        if !self.elements.contains_key(&edge) {
            self.edge_order.push(edge.clone());
        }
        if !self.memberships.contains_key(&node) {
            self.node_order.push(node.clone());
        }
        self.elements.entry(edge.clone()).or_default().insert(node.clone());
        self.memberships.entry(node.clone()).or_default().insert(edge.clone());
        self.pairs.push((edge, node));
    }

    // ========================================================================
    // Key universe
    // ========================================================================

    /// Every valid key at `level`. Order is not part of the contract.
    pub fn key_universe(&self, level: Level) -> Vec<Key> {
        match level {
            Level::Nodes => self.node_order.iter().cloned().map(Key::Scalar).collect(),
            Level::Edges => self.edge_order.iter().cloned().map(Key::Scalar).collect(),
            Level::Incidences => self
                .pairs
                .iter()
                .map(|(e, n)| Key::Pair(e.clone(), n.clone()))
                .collect(),
        }
    }

    /// Number of keys at `level`.
    pub fn universe_len(&self, level: Level) -> usize {
        match level {
            Level::Nodes => self.node_order.len(),
            Level::Edges => self.edge_order.len(),
            Level::Incidences => self.pairs.len(),
        }
    }

    pub fn contains(&self, level: Level, key: &Key) -> bool {
        match (level, key) {
            (Level::Nodes, Key::Scalar(uid)) => self.memberships.contains_key(uid),
            (Level::Edges, Key::Scalar(uid)) => self.elements.contains_key(uid),
            (Level::Incidences, pair @ Key::Pair(..)) => self.pair_index.contains(pair),
            _ => false,
        }
    }

    // ========================================================================
    // Structure
    // ========================================================================

    /// Number of distinct incidences.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn labels(&self) -> &RelationLabels {
        &self.labels
    }

    pub fn edges(&self) -> &[Uid] {
        &self.edge_order
    }

    pub fn nodes(&self) -> &[Uid] {
        &self.node_order
    }

    /// `(number of edges, number of nodes)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.edge_order.len(), self.node_order.len())
    }

    /// edge → member nodes
    pub fn elements(&self) -> &BTreeMap<Uid, BTreeSet<Uid>> {
        &self.elements
    }

    /// node → containing edges
    pub fn memberships(&self) -> &BTreeMap<Uid, BTreeSet<Uid>> {
        &self.memberships
    }

    pub fn pairs(&self) -> impl Iterator<Item = &(Uid, Uid)> {
        self.pairs.iter()
    }

    /// Sub-relation keeping only incidences selected by `keys` at `level`.
    ///
    /// At the node level a pair survives when its node is listed, at the
    /// edge level when its edge is, and at the incidence level when the pair
    /// itself is. Keys of the wrong shape select nothing.
    pub fn restrict_to(&self, level: Level, keys: &[Key]) -> IncidenceStore {
        let wanted: HashSet<&Key> = keys.iter().collect();
        let kept = self.pairs.iter().filter(|(e, n)| {
            let probe = match level {
                Level::Nodes => Key::Scalar(n.clone()),
                Level::Edges => Key::Scalar(e.clone()),
                Level::Incidences => Key::Pair(e.clone(), n.clone()),
            };
            wanted.contains(&probe)
        });
        Self::with_labels(kept.cloned(), self.labels.clone())
    }
}

fn required_uid(cell: Option<&Value>, row: usize, column: &str) -> Result<Uid> {
    let uid = match cell {
        Some(value) => Uid::from_value(value)
            .map_err(|e| Error::MalformedRelation(format!("row {row}, column `{column}`: {e}")))?,
        None => None,
    };
    uid.ok_or_else(|| {
        Error::MalformedRelation(format!("row {row} is missing an identity in column `{column}`"))
    })
}
