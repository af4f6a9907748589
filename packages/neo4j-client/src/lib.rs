//! Pure Neo4j transactional HTTP API client.
//!
//! A minimal client for the `/db/{database}/tx` endpoints. Supports explicit
//! transactions (begin, run, rollback) and single-request auto-commit batches.
//!
//! # Example
//!
//! ```rust,ignore
//! use neo4j_client::{Neo4jClient, Statement};
//!
//! let client = Neo4jClient::new("http://localhost:7474", "neo4j");
//!
//! let mut tx = client.begin().await?;
//! let result = tx
//!     .run(Statement::new("MATCH (c:Content {uuid: $uuid}) RETURN c.uuid AS uuid").param("uuid", id))
//!     .await?;
//! tx.rollback().await?;
//! ```

pub mod error;
pub mod types;

use std::time::Duration;

use reqwest::header::{ACCEPT, LOCATION};
use reqwest::{Method, RequestBuilder};

pub use error::{Neo4jError, Result};
pub use types::{ErrorDetail, Row, Statement, StatementResult};

use types::{TxRequest, TxResponse};

#[derive(Clone)]
struct Credentials {
    user: String,
    password: String,
}

/// HTTP plumbing shared by the client and its open transactions.
#[derive(Clone)]
struct Connection {
    http: reqwest::Client,
    credentials: Option<Credentials>,
}

impl Connection {
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json;charset=UTF-8");
        match &self.credentials {
            Some(c) => builder.basic_auth(&c.user, Some(&c.password)),
            None => builder,
        }
    }

    /// Send a request and decode the transactional response envelope.
    ///
    /// Returns the `Location` header alongside the body; it is only set when
    /// a transaction is opened.
    async fn send(&self, builder: RequestBuilder) -> Result<(Option<String>, TxResponse)> {
        let resp = builder.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Neo4jError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let location = resp
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body: TxResponse = resp.json().await?;
        if let Some(err) = body.errors.first() {
            return Err(Neo4jError::Database {
                code: err.code.clone(),
                message: err.message.clone(),
            });
        }

        Ok((location, body))
    }

    async fn post(&self, url: &str, statements: &[Statement]) -> Result<(Option<String>, TxResponse)> {
        self.send(self.request(Method::POST, url).json(&TxRequest { statements }))
            .await
    }
}

/// Client for one database on a Neo4j HTTP endpoint.
#[derive(Clone)]
pub struct Neo4jClient {
    conn: Connection,
    base_url: String,
    database: String,
}

impl Neo4jClient {
    pub fn new(base_url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            conn: Connection {
                http: reqwest::Client::new(),
                credentials: None,
            },
            base_url: base_url.into().trim_end_matches('/').to_string(),
            database: database.into(),
        }
    }

    /// Authenticate every request with HTTP basic auth.
    pub fn with_basic_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.conn.credentials = Some(Credentials {
            user: user.into(),
            password: password.into(),
        });
        self
    }

    /// Apply a per-request timeout covering connect, send and body read.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.conn.http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    fn tx_endpoint(&self) -> String {
        format!("{}/db/{}/tx", self.base_url, self.database)
    }

    /// Open an explicit transaction.
    pub async fn begin(&self) -> Result<Transaction> {
        let (location, body) = self.conn.post(&self.tx_endpoint(), &[]).await?;

        let url = transaction_url(location, body.commit.as_deref())
            .ok_or(Neo4jError::MissingTransaction)?;

        tracing::debug!(tx = %url, "Opened Neo4j transaction");

        Ok(Transaction {
            conn: self.conn.clone(),
            url,
        })
    }

    /// Run statements in a single auto-commit request.
    ///
    /// The whole batch is rolled back by the server if any statement fails.
    pub async fn execute(&self, statements: &[Statement]) -> Result<Vec<StatementResult>> {
        let url = format!("{}/commit", self.tx_endpoint());
        let (_, body) = self.conn.post(&url, statements).await?;

        if body.results.len() != statements.len() {
            return Err(Neo4jError::UnexpectedResults {
                expected: statements.len(),
                actual: body.results.len(),
            });
        }
        Ok(body.results)
    }

    /// Round-trip a trivial statement to prove the database is reachable.
    pub async fn ping(&self) -> Result<()> {
        self.execute(&[Statement::new("RETURN 1")]).await?;
        Ok(())
    }
}

/// Transaction URL from the `Location` header, else from the commit link.
fn transaction_url(location: Option<String>, commit: Option<&str>) -> Option<String> {
    location.or_else(|| {
        commit
            .and_then(|c| c.strip_suffix("/commit"))
            .map(str::to_string)
    })
}

/// An open explicit transaction.
///
/// Owns its connection handle so it can outlive the borrow of the client and
/// be moved into background tasks.
pub struct Transaction {
    conn: Connection,
    url: String,
}

impl Transaction {
    /// Transaction URL as issued by the server.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Run one statement inside the transaction.
    ///
    /// A database error rolls the transaction back server-side.
    pub async fn run(&mut self, statement: Statement) -> Result<StatementResult> {
        let (_, body) = self
            .conn
            .post(&self.url, std::slice::from_ref(&statement))
            .await?;

        let actual = body.results.len();
        body.results
            .into_iter()
            .next()
            .filter(|_| actual == 1)
            .ok_or(Neo4jError::UnexpectedResults { expected: 1, actual })
    }

    pub async fn rollback(self) -> Result<()> {
        self.conn
            .send(self.conn.request(Method::DELETE, &self.url))
            .await?;
        tracing::debug!(tx = %self.url, "Rolled back Neo4j transaction");
        Ok(())
    }
}
