use std::time::Duration;

use thiserror::Error;

use crate::kernel::StoreError;

/// Errors escaping relation resolution.
///
/// "Not found" is not an error: it is reported through `Resolved::found`.
#[derive(Debug, Error)]
pub enum RelationsError {
    /// Backend failure while reading; the whole batch is discarded.
    #[error("error querying graph for uuid={uuid}: {source}")]
    Query {
        uuid: String,
        #[source]
        source: StoreError,
    },

    /// The caller cancelled the request before the read finished.
    #[error("read for uuid={uuid} was cancelled")]
    Cancelled { uuid: String },

    /// The read did not finish within the configured timeout.
    #[error("read for uuid={uuid} timed out after {after:?}")]
    TimedOut { uuid: String, after: Duration },
}

impl RelationsError {
    /// Identifier the failed request was resolving.
    pub fn uuid(&self) -> &str {
        match self {
            RelationsError::Query { uuid, .. }
            | RelationsError::Cancelled { uuid }
            | RelationsError::TimedOut { uuid, .. } => uuid,
        }
    }
}
