//! Select request handed to the storage driver.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Execution options attached to a [`QueryRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    /// Query timeout.
    pub timeout: Option<Duration>,
    /// Maximum number of rows the query may read.
    pub input_row_limit: Option<u64>,
    /// Maximum number of rows the query may return.
    pub output_row_limit: Option<u64>,
    /// Fail instead of returning a truncated result when a row limit is hit.
    pub fail_on_incomplete_result: bool,
    /// Allow joins that are not backed by the joined table's key prefix.
    pub allow_join_without_index: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            input_row_limit: None,
            output_row_limit: None,
            fail_on_incomplete_result: true,
            allow_join_without_index: false,
        }
    }
}

impl QueryOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set query timeout.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn input_row_limit(mut self, rows: u64) -> Self {
        self.input_row_limit = Some(rows);
        self
    }

    pub fn output_row_limit(mut self, rows: u64) -> Self {
        self.output_row_limit = Some(rows);
        self
    }

    pub fn fail_on_incomplete_result(mut self, fail: bool) -> Self {
        self.fail_on_incomplete_result = fail;
        self
    }

    pub fn allow_join_without_index(mut self, allow: bool) -> Self {
        self.allow_join_without_index = allow;
        self
    }
}

/// A rendered select query together with its target table and options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    query: String,
    table: String,
    #[serde(default)]
    options: QueryOptions,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>, table: impl Into<String>, options: QueryOptions) -> Self {
        Self {
            query: query.into(),
            table: table.into(),
            options,
        }
    }

    /// Query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Path of the main table.
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    pub fn into_query(self) -> String {
        self.query
    }
}

impl fmt::Display for QueryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query)
    }
}
