//! Traversals needed to answer one relations request.

use crate::kernel::{Hop, Traversal, TraversalKind};

pub const CONTENT: &str = "Content";
pub const CURATION: &str = "Curation";
pub const CONTENT_COLLECTION: &str = "ContentCollection";
pub const CONTENT_PACKAGE: &str = "ContentPackage";

pub const IS_CURATED_FOR: &str = "IS_CURATED_FOR";
pub const SELECTS: &str = "SELECTS";
pub const CONTAINS: &str = "CONTAINS";

/// Traversals for `GET /content/{uuid}/relations`.
pub fn content_relation_traversals(uuid: &str) -> Vec<Traversal> {
    vec![
        Traversal::starting_at(TraversalKind::CuratedRelatedContent, CONTENT, uuid)
            .then(Hop::incoming(IS_CURATED_FOR, CURATION))
            .then(Hop::outgoing(SELECTS, CONTENT))
            .ordered_by(1),
        Traversal::starting_at(TraversalKind::PackageContains, CONTENT_PACKAGE, uuid)
            .then(Hop::outgoing(CONTAINS, CONTENT_COLLECTION))
            .then(Hop::outgoing(CONTAINS, CONTENT))
            .ordered_by(1),
        Traversal::starting_at(TraversalKind::PackageContainedIn, CONTENT, uuid)
            .then(Hop::incoming(CONTAINS, CONTENT_COLLECTION))
            .then(Hop::incoming(CONTAINS, CONTENT_PACKAGE))
            .ordered_by(1),
    ]
}

/// Traversals for `GET /contentcollection/{uuid}/relations`.
///
/// The parent traversal is unordered: a collection is expected to sit in at
/// most one package.
pub fn collection_relation_traversals(uuid: &str) -> Vec<Traversal> {
    vec![
        Traversal::starting_at(TraversalKind::CollectionContainedIn, CONTENT_COLLECTION, uuid)
            .then(Hop::incoming(CONTAINS, CONTENT_PACKAGE)),
        Traversal::starting_at(TraversalKind::CollectionContains, CONTENT_COLLECTION, uuid)
            .then(Hop::outgoing(CONTAINS, CONTENT))
            .ordered_by(0),
    ]
}
