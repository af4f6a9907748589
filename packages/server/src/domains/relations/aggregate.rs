//! Folding batch results into response shapes.

use tracing::warn;

use super::executor::BatchResults;
use super::identity::IdentityMapper;
use super::models::{CollectionRelations, ContentRelations, Resolved};
use crate::kernel::TraversalKind;

/// Content is found when any of its three relation sets is non-empty.
pub fn content_relations(
    mut results: BatchResults,
    mapper: &IdentityMapper,
) -> Resolved<ContentRelations> {
    let curated = results.take(TraversalKind::CuratedRelatedContent);
    let contains = results.take(TraversalKind::PackageContains);
    let contained_in = results.take(TraversalKind::PackageContainedIn);

    let found = !(curated.is_empty() && contains.is_empty() && contained_in.is_empty());

    Resolved {
        relations: ContentRelations {
            curated_related_contents: mapper.related_contents(&curated),
            contains: mapper.related_contents(&contains),
            contained_in: mapper.related_contents(&contained_in),
        },
        found,
    }
}

/// A collection is found only when it has a parent package. Children alone
/// are not enough.
pub fn collection_relations(uuid: &str, mut results: BatchResults) -> Resolved<CollectionRelations> {
    let parents = results.take(TraversalKind::CollectionContainedIn);
    let contains = results.take(TraversalKind::CollectionContains);

    if parents.len() > 1 {
        warn!(
            uuid = %uuid,
            parents = ?parents,
            "Content collection has more than one parent package, using the first"
        );
    }

    Resolved {
        found: !parents.is_empty(),
        relations: CollectionRelations {
            contained_in: parents.into_iter().next().unwrap_or_default(),
            contains,
        },
    }
}
