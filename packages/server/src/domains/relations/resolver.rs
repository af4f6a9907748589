use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use super::aggregate;
use super::error::RelationsError;
use super::executor::BatchReadExecutor;
use super::identity::IdentityMapper;
use super::models::{CollectionRelations, ContentRelations, Resolved};
use super::queries::{collection_relation_traversals, content_relation_traversals};

/// Answers relation lookups for content and content collections.
pub struct RelationsResolver {
    executor: BatchReadExecutor,
    mapper: IdentityMapper,
}

impl RelationsResolver {
    pub fn new(executor: BatchReadExecutor, mapper: IdentityMapper) -> Self {
        Self { executor, mapper }
    }

    #[instrument(skip(self, cancel))]
    pub async fn content_relations(
        &self,
        uuid: &str,
        cancel: &CancellationToken,
    ) -> Result<Resolved<ContentRelations>, RelationsError> {
        let batch = content_relation_traversals(uuid);
        let results = self.executor.execute(uuid, &batch, cancel).await?;
        let resolved = aggregate::content_relations(results, &self.mapper);

        debug!(
            found = resolved.found,
            curated = resolved.relations.curated_related_contents.len(),
            contains = resolved.relations.contains.len(),
            contained_in = resolved.relations.contained_in.len(),
            "Resolved content relations"
        );
        Ok(resolved)
    }

    #[instrument(skip(self, cancel))]
    pub async fn collection_relations(
        &self,
        uuid: &str,
        cancel: &CancellationToken,
    ) -> Result<Resolved<CollectionRelations>, RelationsError> {
        let batch = collection_relation_traversals(uuid);
        let results = self.executor.execute(uuid, &batch, cancel).await?;
        let resolved = aggregate::collection_relations(uuid, results);

        debug!(
            found = resolved.found,
            contains = resolved.relations.contains.len(),
            "Resolved content collection relations"
        );
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domains::relations::queries::{
        CONTAINS, CONTENT, CONTENT_COLLECTION, CONTENT_PACKAGE, CURATION, IS_CURATED_FOR, SELECTS,
    };
    use crate::kernel::{MemoryGraph, ScriptedGraphStore, TraversalKind};

    fn resolver(graph: MemoryGraph) -> RelationsResolver {
        RelationsResolver::new(
            BatchReadExecutor::new(Arc::new(graph)),
            IdentityMapper::new("http://api.ft.com"),
        )
    }

    /// X is curated by P, which selects Y then Z.
    fn curated_graph() -> MemoryGraph {
        MemoryGraph::new()
            .with_node("x", &[CONTENT])
            .with_node("y", &[CONTENT])
            .with_node("z", &[CONTENT])
            .with_node("p", &[CURATION])
            .with_edge("p", IS_CURATED_FOR, "x")
            .with_ordered_edge("p", SELECTS, "z", 1)
            .with_ordered_edge("p", SELECTS, "y", 0)
    }

    /// Package K contains collection C, which contains A then B.
    fn package_graph() -> MemoryGraph {
        MemoryGraph::new()
            .with_node("k", &[CONTENT, CONTENT_PACKAGE])
            .with_node("c", &[CONTENT_COLLECTION])
            .with_node("a", &[CONTENT])
            .with_node("b", &[CONTENT])
            .with_edge("k", CONTAINS, "c")
            .with_ordered_edge("c", CONTAINS, "b", 2)
            .with_ordered_edge("c", CONTAINS, "a", 1)
    }

    #[tokio::test]
    async fn test_curated_related_content_in_selection_order() {
        let resolver = resolver(curated_graph());

        let resolved = resolver
            .content_relations("x", &CancellationToken::new())
            .await
            .unwrap();

        assert!(resolved.found);
        let curated = &resolved.relations.curated_related_contents;
        assert_eq!(curated.len(), 2);
        assert_eq!(curated[0].id, "http://api.ft.com/things/y");
        assert_eq!(curated[0].api_url, "http://api.ft.com/content/y");
        assert_eq!(curated[1].id, "http://api.ft.com/things/z");
        assert!(resolved.relations.contains.is_empty());
        assert!(resolved.relations.contained_in.is_empty());
    }

    #[tokio::test]
    async fn test_package_contains_and_contained_in() {
        let resolver = resolver(package_graph());
        let cancel = CancellationToken::new();

        let package = resolver.content_relations("k", &cancel).await.unwrap();
        let urls: Vec<_> = package
            .relations
            .contains
            .iter()
            .map(|rc| rc.api_url.clone())
            .collect();
        assert_eq!(
            urls,
            vec!["http://api.ft.com/content/a", "http://api.ft.com/content/b"]
        );

        let child = resolver.content_relations("b", &cancel).await.unwrap();
        assert!(child.found);
        assert_eq!(child.relations.contained_in.len(), 1);
        assert_eq!(child.relations.contained_in[0].api_url, "http://api.ft.com/content/k");
    }

    #[tokio::test]
    async fn test_unknown_content_is_not_found() {
        let resolver = resolver(curated_graph());

        let resolved = resolver
            .content_relations("nope", &CancellationToken::new())
            .await
            .unwrap();

        assert!(!resolved.found);
    }

    #[tokio::test]
    async fn test_collection_relations() {
        let resolver = resolver(package_graph());

        let resolved = resolver
            .collection_relations("c", &CancellationToken::new())
            .await
            .unwrap();

        assert!(resolved.found);
        assert_eq!(resolved.relations.contained_in, "k");
        assert_eq!(resolved.relations.contains, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_repeat_lookups_serialize_identically() {
        let resolver = resolver(curated_graph().signalling_no_results());
        let cancel = CancellationToken::new();

        let first = resolver.content_relations("x", &cancel).await.unwrap();
        let second = resolver.content_relations("x", &cancel).await.unwrap();

        assert_eq!(
            serde_json::to_vec(&first.relations).unwrap(),
            serde_json::to_vec(&second.relations).unwrap()
        );
    }

    #[tokio::test]
    async fn test_resolver_runs_collection_batch_against_store() {
        let store = Arc::new(
            ScriptedGraphStore::new()
                .with_rows(TraversalKind::CollectionContainedIn, &["k"])
                .with_no_results(TraversalKind::CollectionContains),
        );
        let resolver = RelationsResolver::new(
            BatchReadExecutor::new(store.clone()),
            IdentityMapper::new("http://api.ft.com"),
        );

        let resolved = resolver
            .collection_relations("c", &CancellationToken::new())
            .await
            .unwrap();

        assert!(resolved.found);
        assert!(resolved.relations.contains.is_empty());
        assert!(store.calls().iter().all(|c| c.uuid == "c"));
        assert_eq!(store.transactions_begun(), 1);
    }
}
