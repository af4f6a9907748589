//! Kernel module - graph store infrastructure.

pub mod memory_store;
pub mod neo4j_store;
pub mod test_dependencies;
pub mod traits;
pub mod traversal;

pub use memory_store::MemoryGraph;
pub use neo4j_store::Neo4jGraphStore;
pub use test_dependencies::{RunCall, ScriptedGraphStore, ScriptedResponse};
pub use traits::*;
pub use traversal::{Direction, Hop, Traversal, TraversalKind};
