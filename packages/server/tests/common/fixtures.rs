//! Graph fixtures shared by the HTTP and executor tests.
//!
//! The sample graph:
//! - content X is curated by P, which selects Y (order 0) then Z (order 1)
//! - package K contains collection C, which contains B (order 0) then A (order 1)
//! - collection ORPHAN contains A but sits in no package
//! - collection TWIN_PARENTS sits in both K and K2

use relations_api::domains::relations::queries::{
    CONTAINS, CONTENT, CONTENT_COLLECTION, CONTENT_PACKAGE, CURATION, IS_CURATED_FOR, SELECTS,
};
use relations_api::kernel::MemoryGraph;

pub const API_URL: &str = "http://api.ft.com";

pub const X: &str = "6b2f3a4e-7d6c-4a3f-9d8b-1c2d3e4f5a6b";
pub const Y: &str = "0e1b2c3d-4e5f-4a6b-8c7d-9e0f1a2b3c4d";
pub const Z: &str = "a1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d";
pub const P: &str = "f0e1d2c3-b4a5-4968-8776-655443322110";

pub const K: &str = "b3f2e1d0-c9b8-4a76-9544-332211009988";
pub const K2: &str = "c4a3b2e1-d0f9-4e87-a655-443322110099";
pub const C: &str = "d5c4b3a2-e1f0-4d98-b766-554433221100";
pub const A: &str = "e6d5c4b3-a2f1-4e09-8877-665544332211";
pub const B: &str = "f7e6d5c4-b3a2-4f10-9988-776655443322";

pub const ORPHAN: &str = "17f6e5d4-c3b2-4a11-8099-887766554433";
pub const TWIN_PARENTS: &str = "28a7f6e5-d4c3-4b22-9100-998877665544";

pub fn api_url(uuid: &str) -> String {
    format!("{}/content/{}", API_URL, uuid)
}

pub fn thing_url(uuid: &str) -> String {
    format!("{}/things/{}", API_URL, uuid)
}

pub fn sample_graph() -> MemoryGraph {
    MemoryGraph::new()
        // Curation
        .with_node(X, &[CONTENT])
        .with_node(Y, &[CONTENT])
        .with_node(Z, &[CONTENT])
        .with_node(P, &[CURATION])
        .with_edge(P, IS_CURATED_FOR, X)
        .with_ordered_edge(P, SELECTS, Z, 1)
        .with_ordered_edge(P, SELECTS, Y, 0)
        // Packages
        .with_node(K, &[CONTENT, CONTENT_PACKAGE])
        .with_node(K2, &[CONTENT, CONTENT_PACKAGE])
        .with_node(C, &[CONTENT_COLLECTION])
        .with_node(A, &[CONTENT])
        .with_node(B, &[CONTENT])
        .with_edge(K, CONTAINS, C)
        .with_ordered_edge(C, CONTAINS, A, 1)
        .with_ordered_edge(C, CONTAINS, B, 0)
        // Collections with unusual parentage
        .with_node(ORPHAN, &[CONTENT_COLLECTION])
        .with_ordered_edge(ORPHAN, CONTAINS, A, 0)
        .with_node(TWIN_PARENTS, &[CONTENT_COLLECTION])
        .with_edge(K, CONTAINS, TWIN_PARENTS)
        .with_edge(K2, CONTAINS, TWIN_PARENTS)
}
