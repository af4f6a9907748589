// TestDependencies - mock implementations for testing
//
// Provides a scripted graph store that returns canned per-traversal outcomes
// without a live database, and records what was asked of it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::traits::{BaseGraphStore, BaseReadTransaction, ResultSet, StoreError, StoreResult};
use super::traversal::{Traversal, TraversalKind};

// =============================================================================
// Scripted Graph Store
// =============================================================================

/// Canned outcome for one traversal kind.
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    Rows(Vec<String>),
    NoResults,
    QueryFailure { code: String, message: String },
    ConnectionFailure(String),
}

impl ScriptedResponse {
    fn into_result(self) -> StoreResult<ResultSet> {
        match self {
            ScriptedResponse::Rows(rows) => Ok(rows),
            ScriptedResponse::NoResults => Err(StoreError::NoResults),
            ScriptedResponse::QueryFailure { code, message } => {
                Err(StoreError::Query { code, message })
            }
            ScriptedResponse::ConnectionFailure(message) => Err(StoreError::Connection(message)),
        }
    }
}

/// Arguments captured from a traversal run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCall {
    pub kind: TraversalKind,
    pub uuid: String,
}

#[derive(Default)]
struct Shared {
    responses: Mutex<HashMap<TraversalKind, ScriptedResponse>>,
    calls: Mutex<Vec<RunCall>>,
    begun: Mutex<usize>,
    closed: Mutex<usize>,
}

/// Graph store double. Traversal kinds without a scripted response return an
/// empty set.
#[derive(Default)]
pub struct ScriptedGraphStore {
    shared: Arc<Shared>,
    delay: Option<Duration>,
    begin_failure: Option<String>,
    connectivity_failure: Option<String>,
}

impl ScriptedGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, kind: TraversalKind, response: ScriptedResponse) -> Self {
        self.shared
            .responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(kind, response);
        self
    }

    pub fn with_rows(self, kind: TraversalKind, rows: &[&str]) -> Self {
        let rows = rows.iter().map(|r| r.to_string()).collect();
        self.with_response(kind, ScriptedResponse::Rows(rows))
    }

    pub fn with_no_results(self, kind: TraversalKind) -> Self {
        self.with_response(kind, ScriptedResponse::NoResults)
    }

    pub fn with_query_failure(self, kind: TraversalKind, code: &str, message: &str) -> Self {
        self.with_response(
            kind,
            ScriptedResponse::QueryFailure {
                code: code.to_string(),
                message: message.to_string(),
            },
        )
    }

    /// Sleep before answering every traversal.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make `begin_read` fail with a connection error.
    pub fn failing_to_begin(mut self, message: &str) -> Self {
        self.begin_failure = Some(message.to_string());
        self
    }

    /// Make `verify_connectivity` fail with a connection error.
    pub fn unreachable(mut self, message: &str) -> Self {
        self.connectivity_failure = Some(message.to_string());
        self
    }

    /// Every traversal run so far, in order.
    pub fn calls(&self) -> Vec<RunCall> {
        self.shared.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn called_kinds(&self) -> Vec<TraversalKind> {
        self.calls().into_iter().map(|c| c.kind).collect()
    }

    pub fn transactions_begun(&self) -> usize {
        *self.shared.begun.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn transactions_closed(&self) -> usize {
        *self.shared.closed.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl BaseGraphStore for ScriptedGraphStore {
    async fn begin_read(&self) -> StoreResult<Box<dyn BaseReadTransaction>> {
        if let Some(message) = &self.begin_failure {
            return Err(StoreError::Connection(message.clone()));
        }
        *self.shared.begun.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(Box::new(ScriptedTransaction {
            shared: self.shared.clone(),
            delay: self.delay,
        }))
    }

    async fn verify_connectivity(&self) -> StoreResult<()> {
        match &self.connectivity_failure {
            Some(message) => Err(StoreError::Connection(message.clone())),
            None => Ok(()),
        }
    }
}

struct ScriptedTransaction {
    shared: Arc<Shared>,
    delay: Option<Duration>,
}

#[async_trait]
impl BaseReadTransaction for ScriptedTransaction {
    async fn run(&mut self, traversal: &Traversal) -> StoreResult<ResultSet> {
        self.shared
            .calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RunCall {
                kind: traversal.kind,
                uuid: traversal.uuid.clone(),
            });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let response = self
            .shared
            .responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&traversal.kind)
            .cloned();
        match response {
            Some(response) => response.into_result(),
            None => Ok(Vec::new()),
        }
    }

    async fn close(self: Box<Self>) -> StoreResult<()> {
        *self.shared.closed.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}
