//! Neo4j-backed graph store over the transactional HTTP API.
//!
//! A read unit is one explicit Neo4j transaction. Each traversal is sent as
//! its own statement request inside it, so an empty statement can never hide
//! the statements after it. The transaction is always rolled back on close.

use async_trait::async_trait;
use neo4j_client::{Neo4jClient, Neo4jError, Statement, StatementResult, Transaction};
use serde_json::Value;

use super::traits::{BaseGraphStore, BaseReadTransaction, ResultSet, StoreError, StoreResult};
use super::traversal::{Traversal, RESULT_COLUMN};

pub struct Neo4jGraphStore {
    client: Neo4jClient,
}

impl Neo4jGraphStore {
    pub fn new(client: Neo4jClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BaseGraphStore for Neo4jGraphStore {
    async fn begin_read(&self) -> StoreResult<Box<dyn BaseReadTransaction>> {
        let tx = self.client.begin().await?;
        Ok(Box::new(Neo4jReadTransaction { tx }))
    }

    async fn verify_connectivity(&self) -> StoreResult<()> {
        self.client.ping().await?;
        Ok(())
    }
}

struct Neo4jReadTransaction {
    tx: Transaction,
}

#[async_trait]
impl BaseReadTransaction for Neo4jReadTransaction {
    async fn run(&mut self, traversal: &Traversal) -> StoreResult<ResultSet> {
        let mut statement = Statement::new(traversal.to_cypher());
        statement.parameters = traversal.parameters();

        let result = self.tx.run(statement).await?;
        tracing::trace!(
            traversal = %traversal.kind,
            tx = %self.tx.url(),
            rows = result.data.len(),
            "Neo4j statement returned"
        );

        if result.is_empty() {
            return Err(StoreError::NoResults);
        }
        collect_uuids(&result)
    }

    async fn close(self: Box<Self>) -> StoreResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}

/// Flatten the result column into UUIDs, accepting both collected lists and
/// one-UUID-per-row shapes. Nulls are skipped.
fn collect_uuids(result: &StatementResult) -> StoreResult<ResultSet> {
    if !result.columns.iter().any(|c| c == RESULT_COLUMN) {
        return Err(StoreError::Protocol(format!(
            "missing column '{}' in {:?}",
            RESULT_COLUMN, result.columns
        )));
    }

    let mut uuids = Vec::new();
    for value in result.column(RESULT_COLUMN) {
        match value {
            Value::Array(items) => {
                for item in items {
                    push_uuid(item, &mut uuids)?;
                }
            }
            other => push_uuid(other, &mut uuids)?,
        }
    }
    Ok(uuids)
}

fn push_uuid(value: &Value, uuids: &mut ResultSet) -> StoreResult<()> {
    match value {
        Value::String(s) => uuids.push(s.clone()),
        Value::Null => {}
        other => {
            return Err(StoreError::Protocol(format!(
                "expected UUID string, got {}",
                other
            )))
        }
    }
    Ok(())
}

impl From<Neo4jError> for StoreError {
    fn from(err: Neo4jError) -> Self {
        if err.is_timeout() {
            return StoreError::Timeout;
        }
        if err.is_connect() {
            return StoreError::Connection(err.to_string());
        }
        match err {
            Neo4jError::Database { code, message } => StoreError::Query { code, message },
            Neo4jError::Http(e) => StoreError::Connection(e.to_string()),
            Neo4jError::Api { status, message } if status == 401 || status == 403 => {
                StoreError::Connection(format!("authentication rejected ({}): {}", status, message))
            }
            other => StoreError::Protocol(other.to_string()),
        }
    }
}
