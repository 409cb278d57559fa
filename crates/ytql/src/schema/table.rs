//! Table handles and table schemas.

use crate::error::{QueryError, QueryResult};
use crate::schema::{ColumnRef, ColumnSchema};
use crate::value::TypeTag;
use serde::{Deserialize, Serialize};

/// Ordered column list of a dynamic table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    columns: Vec<ColumnSchema>,
    /// Reject columns that are not declared.
    #[serde(default = "default_strict")]
    strict: bool,
    /// Key columns identify at most one row.
    #[serde(default)]
    unique_keys: bool,
}

fn default_strict() -> bool {
    true
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            strict: true,
            unique_keys: false,
        }
    }
}

impl TableSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a data column.
    pub fn with_column(self, name: impl Into<String>, ty: TypeTag) -> Self {
        self.add(ColumnSchema::new(name, ty))
    }

    /// Append an ascending key column.
    pub fn with_key_column(self, name: impl Into<String>, ty: TypeTag) -> Self {
        self.add(ColumnSchema::key(name, ty))
    }

    /// Append a column. A column with the same name replaces the earlier one.
    pub fn add(mut self, column: ColumnSchema) -> Self {
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn unique_keys(mut self, unique: bool) -> Self {
        self.unique_keys = unique;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn has_unique_keys(&self) -> bool {
        self.unique_keys
    }

    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Key columns in declaration order.
    pub fn key_columns(&self) -> impl Iterator<Item = &ColumnSchema> {
        self.columns.iter().filter(|c| c.is_key())
    }

    /// Whether the column exists and is not `Optional`.
    pub fn is_required(&self, name: &str) -> bool {
        self.column(name).is_some_and(ColumnSchema::is_required)
    }

    /// Copy of this schema without the given columns.
    pub fn without_columns(&self, names: &[&str]) -> Self {
        Self {
            columns: self
                .columns
                .iter()
                .filter(|c| !names.contains(&c.name.as_str()))
                .cloned()
                .collect(),
            strict: self.strict,
            unique_keys: self.unique_keys,
        }
    }
}

/// A dynamic table: storage path plus schema.
///
/// The short name (last path segment) is used as the table alias in joins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    path: String,
    name: String,
    schema: TableSchema,
}

impl Table {
    /// Create a table handle. The path must have a non-empty last segment.
    pub fn new(path: impl Into<String>, schema: TableSchema) -> QueryResult<Self> {
        let path = path.into();
        let name = match path.rsplit('/').next() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(QueryError::InvalidTable(path)),
        };
        Ok(Self { path, name, schema })
    }

    /// Full storage path, rendered as `[path]`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Short name used as alias.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Names of the key columns.
    pub fn keys(&self) -> Vec<&str> {
        self.schema.key_columns().map(|c| c.name.as_str()).collect()
    }

    /// Reference to a set of columns. `*` among the names selects every column.
    pub fn columns(&self, names: &[&str]) -> ColumnRef<'_> {
        ColumnRef::new(self, names.iter().copied())
    }

    /// Reference to a single column.
    pub fn column(&self, name: &str) -> ColumnRef<'_> {
        ColumnRef::new(self, [name])
    }

    /// Reference to every column.
    pub fn all_columns(&self) -> ColumnRef<'_> {
        ColumnRef::new(self, ["*"])
    }

    /// `alias.column`
    pub fn qualify(&self, column: &str) -> String {
        format!("{}.{}", self.name, column)
    }

    /// Schema without the given columns, e.g. for writes that skip computed columns.
    pub fn schema_without_columns(&self, names: &[&str]) -> TableSchema {
        self.schema.without_columns(names)
    }
}
