use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single parameterized Cypher statement.
#[derive(Debug, Clone, Serialize)]
pub struct Statement {
    pub statement: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
    #[serde(rename = "resultDataContents")]
    pub result_data_contents: Vec<&'static str>,
}

impl Statement {
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            parameters: Map::new(),
            result_data_contents: vec!["row"],
        }
    }

    /// Bind a statement parameter, referenced in Cypher as `$name`.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }
}

/// Request body for every transactional endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TxRequest<'a> {
    pub statements: &'a [Statement],
}

/// Response body for every transactional endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TxResponse {
    #[serde(default)]
    pub results: Vec<StatementResult>,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
    /// Commit URL, present while a transaction is open.
    pub commit: Option<String>,
}

/// Result set for one statement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatementResult {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub data: Vec<Row>,
}

impl StatementResult {
    /// True if the statement produced no rows at all.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Values of the named column, one per row.
    pub fn column<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Value> + 'a {
        let index = self.columns.iter().position(|c| c == name);
        self.data
            .iter()
            .filter_map(move |row| index.and_then(|i| row.row.get(i)))
    }
}

/// One row of a statement result.
#[derive(Debug, Clone, Deserialize)]
pub struct Row {
    pub row: Vec<Value>,
}

/// Database error entry in a response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
