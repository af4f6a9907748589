//! In-memory property graph for testing and development.
//!
//! Interprets `Traversal` specifications directly with the same semantics the
//! rendered Cypher has: a missing anchor or an unmatched hop yields an empty
//! set, targets are ordered ascending by the chosen hop's `order` property
//! (missing values last) and ties keep edge insertion order.

use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;

use super::traits::{BaseGraphStore, BaseReadTransaction, ResultSet, StoreError, StoreResult};
use super::traversal::{Direction, Traversal};

#[derive(Debug, Clone)]
struct Edge {
    from: String,
    to: String,
    relationship: String,
    order: Option<i64>,
}

#[derive(Default, Clone)]
struct Graph {
    nodes: HashMap<String, BTreeSet<String>>,
    edges: Vec<Edge>,
}

/// In-memory graph store.
///
/// Not suitable for production: data lives only as long as the value.
#[derive(Default)]
pub struct MemoryGraph {
    graph: RwLock<Graph>,
    signal_no_results: bool,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report empty traversals as `StoreError::NoResults` instead of an empty
    /// set, the way some drivers do.
    pub fn signalling_no_results(mut self) -> Self {
        self.signal_no_results = true;
        self
    }

    /// Add a node, or add labels to an existing one.
    pub fn with_node(self, uuid: &str, labels: &[&str]) -> Self {
        {
            let mut graph = self.graph.write().unwrap_or_else(|e| e.into_inner());
            let entry = graph.nodes.entry(uuid.to_string()).or_default();
            entry.extend(labels.iter().map(|l| l.to_string()));
        }
        self
    }

    /// Add a relationship without an `order` property.
    pub fn with_edge(self, from: &str, relationship: &str, to: &str) -> Self {
        self.push_edge(from, relationship, to, None)
    }

    /// Add a relationship carrying an `order` property.
    pub fn with_ordered_edge(self, from: &str, relationship: &str, to: &str, order: i64) -> Self {
        self.push_edge(from, relationship, to, Some(order))
    }

    fn push_edge(self, from: &str, relationship: &str, to: &str, order: Option<i64>) -> Self {
        {
            let mut graph = self.graph.write().unwrap_or_else(|e| e.into_inner());
            graph.edges.push(Edge {
                from: from.to_string(),
                to: to.to_string(),
                relationship: relationship.to_string(),
                order,
            });
        }
        self
    }

    pub fn node_count(&self) -> usize {
        self.graph.read().unwrap_or_else(|e| e.into_inner()).nodes.len()
    }
}

impl Graph {
    fn has_label(&self, uuid: &str, label: &str) -> bool {
        self.nodes.get(uuid).is_some_and(|labels| labels.contains(label))
    }

    fn evaluate(&self, traversal: &Traversal) -> ResultSet {
        if !self.has_label(&traversal.uuid, traversal.anchor_label) {
            return Vec::new();
        }

        // Each path is (current node, order key captured from the sort hop,
        // edges already used). Edges may not repeat within a path.
        let mut paths: Vec<(String, Option<i64>, Vec<usize>)> =
            vec![(traversal.uuid.clone(), None, Vec::new())];

        for (hop_index, hop) in traversal.hops.iter().enumerate() {
            let mut next = Vec::new();
            for (node, key, used) in &paths {
                for (edge_index, edge) in self.edges.iter().enumerate() {
                    if edge.relationship != hop.relationship || used.contains(&edge_index) {
                        continue;
                    }
                    let neighbour = match hop.direction {
                        Direction::Outgoing if &edge.from == node => &edge.to,
                        Direction::Incoming if &edge.to == node => &edge.from,
                        _ => continue,
                    };
                    if !self.has_label(neighbour, hop.label) {
                        continue;
                    }

                    let key = if traversal.order_by == Some(hop_index) {
                        edge.order
                    } else {
                        *key
                    };
                    let mut used = used.clone();
                    used.push(edge_index);
                    next.push((neighbour.clone(), key, used));
                }
            }
            paths = next;
        }

        if traversal.order_by.is_some() {
            // Stable: ties keep insertion order. Missing keys sort last.
            paths.sort_by_key(|(_, key, _)| (key.is_none(), *key));
        }
        paths.into_iter().map(|(node, _, _)| node).collect()
    }
}

#[async_trait]
impl BaseGraphStore for MemoryGraph {
    async fn begin_read(&self) -> StoreResult<Box<dyn BaseReadTransaction>> {
        let graph = self.graph.read().unwrap_or_else(|e| e.into_inner()).clone();
        Ok(Box::new(SnapshotTransaction {
            graph,
            signal_no_results: self.signal_no_results,
        }))
    }

    async fn verify_connectivity(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Read unit over a copy of the graph taken when it was opened.
struct SnapshotTransaction {
    graph: Graph,
    signal_no_results: bool,
}

#[async_trait]
impl BaseReadTransaction for SnapshotTransaction {
    async fn run(&mut self, traversal: &Traversal) -> StoreResult<ResultSet> {
        let uuids = self.graph.evaluate(traversal);
        if uuids.is_empty() && self.signal_no_results {
            return Err(StoreError::NoResults);
        }
        Ok(uuids)
    }

    async fn close(self: Box<Self>) -> StoreResult<()> {
        Ok(())
    }
}
