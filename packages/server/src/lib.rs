// Relations API - Core
//
// Read-only HTTP API answering which content is related to a piece of content
// or a content collection, resolved from the content graph in Neo4j.
//
// Graph access sits behind the kernel traits; relation logic is in domains/relations.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
