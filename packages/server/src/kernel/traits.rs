// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Relation resolution lives in domains/relations and is written against these.
//
// Naming convention: Base* for trait names (e.g., BaseGraphStore)

use async_trait::async_trait;
use thiserror::Error;

use super::traversal::Traversal;

/// Ordered target UUIDs produced by one traversal.
pub type ResultSet = Vec<String>;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised by a graph store.
///
/// `NoResults` is a signal, not a failure: some backends report a statement
/// that matched nothing this way instead of returning an empty set.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no results found")]
    NoResults,

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("query failed [{code}]: {message}")]
    Query { code: String, message: String },

    #[error("store request timed out")]
    Timeout,

    #[error("unexpected store response: {0}")]
    Protocol(String),
}

impl StoreError {
    pub fn is_no_results(&self) -> bool {
        matches!(self, StoreError::NoResults)
    }
}

// =============================================================================
// Graph Store Trait (Infrastructure - read access to the property graph)
// =============================================================================

#[async_trait]
pub trait BaseGraphStore: Send + Sync {
    /// Open a read unit. Every traversal run through it sees the same snapshot
    /// and nothing is ever written.
    async fn begin_read(&self) -> StoreResult<Box<dyn BaseReadTransaction>>;

    /// Prove the store is reachable. Used by health checks.
    async fn verify_connectivity(&self) -> StoreResult<()>;
}

#[async_trait]
pub trait BaseReadTransaction: Send {
    /// Run one traversal and return its ordered targets.
    async fn run(&mut self, traversal: &Traversal) -> StoreResult<ResultSet>;

    /// Release the read unit. Nothing is committed.
    async fn close(self: Box<Self>) -> StoreResult<()>;
}
