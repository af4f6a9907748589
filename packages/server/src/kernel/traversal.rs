//! Graph traversal specifications.
//!
//! A `Traversal` describes a path walk from one anchored node to a target
//! node set, independent of any store. Stores either interpret it directly
//! (`MemoryGraph`) or render it to Cypher (`Neo4jGraphStore`).
//!
//! Every rendered statement is an optional chain that aggregates with
//! `collect`, so a traversal whose first hop matches nothing still yields
//! exactly one row holding an empty list.

use std::fmt;

use serde_json::{Map, Value};

/// Name of the statement parameter carrying the anchor UUID.
pub const UUID_PARAM: &str = "uuid";

/// Name of the single column every rendered statement returns.
pub const RESULT_COLUMN: &str = "uuids";

/// The traversals the relations API knows how to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalKind {
    /// Content <- IS_CURATED_FOR <- Curation -> SELECTS -> Content
    CuratedRelatedContent,
    /// ContentPackage -> CONTAINS -> ContentCollection -> CONTAINS -> Content
    PackageContains,
    /// Content <- CONTAINS <- ContentCollection <- CONTAINS <- ContentPackage
    PackageContainedIn,
    /// ContentCollection <- CONTAINS <- ContentPackage
    CollectionContainedIn,
    /// ContentCollection -> CONTAINS -> Content
    CollectionContains,
}

impl TraversalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraversalKind::CuratedRelatedContent => "curated_related_content",
            TraversalKind::PackageContains => "package_contains",
            TraversalKind::PackageContainedIn => "package_contained_in",
            TraversalKind::CollectionContainedIn => "collection_contained_in",
            TraversalKind::CollectionContains => "collection_contains",
        }
    }
}

impl fmt::Display for TraversalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Outgoing,
    Incoming,
}

/// One relationship step followed by the node it lands on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    pub direction: Direction,
    pub relationship: &'static str,
    pub label: &'static str,
}

impl Hop {
    pub fn outgoing(relationship: &'static str, label: &'static str) -> Self {
        Self {
            direction: Direction::Outgoing,
            relationship,
            label,
        }
    }

    pub fn incoming(relationship: &'static str, label: &'static str) -> Self {
        Self {
            direction: Direction::Incoming,
            relationship,
            label,
        }
    }
}

/// A parameterized walk from an anchor node identified by UUID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    pub kind: TraversalKind,
    pub anchor_label: &'static str,
    pub uuid: String,
    pub hops: Vec<Hop>,
    /// Index into `hops` whose relationship `order` property sorts the
    /// targets ascending. `None` leaves store order.
    pub order_by: Option<usize>,
}

impl Traversal {
    pub fn starting_at(kind: TraversalKind, anchor_label: &'static str, uuid: impl Into<String>) -> Self {
        Self {
            kind,
            anchor_label,
            uuid: uuid.into(),
            hops: Vec::new(),
            order_by: None,
        }
    }

    pub fn then(mut self, hop: Hop) -> Self {
        self.hops.push(hop);
        self
    }

    /// Order targets by the `order` property of the hop at `hop_index`.
    pub fn ordered_by(mut self, hop_index: usize) -> Self {
        debug_assert!(hop_index < self.hops.len(), "order_by must name an existing hop");
        self.order_by = Some(hop_index);
        self
    }

    pub fn target_label(&self) -> &'static str {
        self.hops.last().map_or(self.anchor_label, |h| h.label)
    }

    /// Render as a single optional-chain Cypher statement returning one row
    /// with the ordered target UUIDs collected under `RESULT_COLUMN`.
    pub fn to_cypher(&self) -> String {
        let mut pattern = format!("(n0:{} {{uuid: ${}}})", self.anchor_label, UUID_PARAM);
        for (i, hop) in self.hops.iter().enumerate() {
            let rel = format!("[r{}:{}]", i, hop.relationship);
            match hop.direction {
                Direction::Outgoing => pattern.push_str(&format!("-{}->", rel)),
                Direction::Incoming => pattern.push_str(&format!("<-{}-", rel)),
            }
            pattern.push_str(&format!("(n{}:{})", i + 1, hop.label));
        }

        let target = format!("n{}", self.hops.len());
        match self.order_by {
            Some(i) => format!(
                "OPTIONAL MATCH {pattern}\nWITH {target}, r{i}\nORDER BY r{i}.order\nRETURN collect({target}.uuid) AS {col}",
                col = RESULT_COLUMN
            ),
            None => format!(
                "OPTIONAL MATCH {pattern}\nRETURN collect({target}.uuid) AS {col}",
                col = RESULT_COLUMN
            ),
        }
    }

    pub fn parameters(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert(UUID_PARAM.to_string(), Value::String(self.uuid.clone()));
        params
    }
}
