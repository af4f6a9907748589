//! Runs a batch of traversals as one read unit.
//!
//! Every traversal in the batch is run and reported, in order, whether or
//! not an earlier one came back empty. A store's "no results" signal is an
//! empty set. Any other store error discards the whole batch.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use super::error::RelationsError;
use crate::kernel::{BaseGraphStore, BaseReadTransaction, ResultSet, Traversal, TraversalKind};

/// Result sets of one batch, keyed by traversal kind.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchResults {
    sets: HashMap<TraversalKind, ResultSet>,
}

impl BatchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: TraversalKind, set: ResultSet) {
        self.sets.insert(kind, set);
    }

    pub fn get(&self, kind: TraversalKind) -> Option<&ResultSet> {
        self.sets.get(&kind)
    }

    /// Remove and return the set for `kind`; empty if it was not in the batch.
    pub fn take(&mut self, kind: TraversalKind) -> ResultSet {
        self.sets.remove(&kind).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

pub struct BatchReadExecutor {
    store: Arc<dyn BaseGraphStore>,
    timeout: Option<Duration>,
}

impl BatchReadExecutor {
    pub fn new(store: Arc<dyn BaseGraphStore>) -> Self {
        Self {
            store,
            timeout: None,
        }
    }

    /// Abandon reads that take longer than `timeout` in total.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Run `batch` for `uuid` and collect every traversal's result set.
    ///
    /// Returns `Cancelled` or `TimedOut` instead of partial results when
    /// interrupted; the read unit is then released in the background.
    pub async fn execute(
        &self,
        uuid: &str,
        batch: &[Traversal],
        cancel: &CancellationToken,
    ) -> Result<BatchResults, RelationsError> {
        let deadline = self.timeout.map(|t| Instant::now() + t);

        let mut tx = self
            .interruptible(uuid, cancel, deadline, self.store.begin_read())
            .await?
            .map_err(|source| {
                error!(uuid = %uuid, error = %source, "Failed to open graph read");
                RelationsError::Query {
                    uuid: uuid.to_string(),
                    source,
                }
            })?;

        let outcome = self
            .interruptible(uuid, cancel, deadline, run_all(uuid, tx.as_mut(), batch))
            .await;

        match outcome {
            Ok(result) => {
                if let Err(e) = tx.close().await {
                    warn!(uuid = %uuid, error = %e, "Failed to release graph read");
                }
                result
            }
            Err(interrupted) => {
                release_in_background(tx, uuid.to_string());
                Err(interrupted)
            }
        }
    }

    /// Race `work` against cancellation and the deadline.
    async fn interruptible<T>(
        &self,
        uuid: &str,
        cancel: &CancellationToken,
        deadline: Option<Instant>,
        work: impl Future<Output = T>,
    ) -> Result<T, RelationsError> {
        let expiry = async move {
            match deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!(uuid = %uuid, "Graph read cancelled");
                Err(RelationsError::Cancelled { uuid: uuid.to_string() })
            }
            _ = expiry => {
                let after = self.timeout.unwrap_or_default();
                warn!(uuid = %uuid, timeout_ms = after.as_millis() as u64, "Graph read timed out");
                Err(RelationsError::TimedOut { uuid: uuid.to_string(), after })
            }
            value = work => Ok(value),
        }
    }
}

async fn run_all(
    uuid: &str,
    tx: &mut dyn BaseReadTransaction,
    batch: &[Traversal],
) -> Result<BatchResults, RelationsError> {
    let mut results = BatchResults::new();

    for traversal in batch {
        let set = match tx.run(traversal).await {
            Ok(set) => set,
            Err(e) if e.is_no_results() => Vec::new(),
            Err(source) => {
                error!(
                    uuid = %uuid,
                    traversal = %traversal.kind,
                    error = %source,
                    "Graph traversal failed"
                );
                return Err(RelationsError::Query {
                    uuid: uuid.to_string(),
                    source,
                });
            }
        };
        debug!(uuid = %uuid, traversal = %traversal.kind, rows = set.len(), "Traversal complete");
        results.insert(traversal.kind, set);
    }

    Ok(results)
}

fn release_in_background(tx: Box<dyn BaseReadTransaction>, uuid: String) {
    tokio::spawn(async move {
        if let Err(e) = tx.close().await {
            warn!(uuid = %uuid, error = %e, "Failed to release abandoned graph read");
        }
    });
}
