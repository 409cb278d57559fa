//! Row modification requests.
//!
//! ```ignore
//! let mapper = SerdeMapper::<Receipt>::new();
//! let request = ModifyRowsRequest::new(&receipts)
//!     .insert(&mapper, &[first, second])?
//!     .delete_keys([vec![json!("r-1")]])?;
//! ```

use crate::error::{QueryError, QueryResult};
use crate::row::{Fields, RowMapper};
use crate::schema::{ColumnSchema, Table, TableSchema};
use serde::{Deserialize, Serialize};

/// Kind of a row modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowModification {
    /// Write the full row; absent optional columns are written as null.
    Insert,
    /// Write only the given columns of an existing row.
    Update,
    /// Remove the row with the given key.
    Delete,
}

impl RowModification {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowModification::Insert => "insert",
            RowModification::Update => "update",
            RowModification::Delete => "delete",
        }
    }
}

/// One modified row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyRow {
    pub kind: RowModification,
    pub fields: Fields,
}

/// A batch of row modifications for one table.
///
/// Rows are validated against the table's write schema as they are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyRowsRequest {
    path: String,
    schema: TableSchema,
    rows: Vec<ModifyRow>,
}

impl ModifyRowsRequest {
    pub fn new(table: &Table) -> Self {
        Self {
            path: table.path().to_string(),
            schema: table.schema().clone(),
            rows: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn rows(&self) -> &[ModifyRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Add inserts. Every required column must be present and non-null.
    pub fn insert<T, M>(mut self, mapper: &M, entities: &[T]) -> QueryResult<Self>
    where
        M: RowMapper<T>,
    {
        for entity in entities {
            let mut fields = mapper.to_fields(entity)?;
            self.check_columns(&fields)?;
            self.check_required(&fields, self.schema.columns().iter())?;
            for column in self.schema.columns() {
                fields
                    .entry(column.name.clone())
                    .or_insert(serde_json::Value::Null);
            }
            self.push(RowModification::Insert, fields);
        }
        self.trace(RowModification::Insert, entities.len());
        Ok(self)
    }

    /// Add updates. Every required column must be present and non-null; columns the
    /// mapper leaves out are not touched.
    pub fn update<T, M>(mut self, mapper: &M, entities: &[T]) -> QueryResult<Self>
    where
        M: RowMapper<T>,
    {
        for entity in entities {
            let fields = mapper.to_fields(entity)?;
            self.check_columns(&fields)?;
            self.check_required(&fields, self.schema.columns().iter())?;
            self.push(RowModification::Update, fields);
        }
        self.trace(RowModification::Update, entities.len());
        Ok(self)
    }

    /// Add a delete for the entity's key.
    pub fn delete<T, M>(mut self, mapper: &M, entity: &T) -> QueryResult<Self>
    where
        M: RowMapper<T>,
    {
        let fields = mapper.to_fields(entity)?;
        self.check_required(&fields, self.schema.key_columns())?;
        let key = self
            .schema
            .key_columns()
            .filter_map(|column| {
                fields
                    .get(&column.name)
                    .map(|value| (column.name.clone(), value.clone()))
            })
            .collect();
        self.push(RowModification::Delete, key);
        self.trace(RowModification::Delete, 1);
        Ok(self)
    }

    /// Add deletes for key tuples given in key column order.
    pub fn delete_keys<I>(mut self, keys: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = Vec<serde_json::Value>>,
    {
        let names: Vec<String> = self
            .schema
            .key_columns()
            .map(|column| column.name.clone())
            .collect();
        if names.is_empty() {
            return Err(QueryError::validation(format!(
                "table '{}' has no key columns",
                self.path
            )));
        }

        let mut count = 0;
        for key in keys {
            if key.len() != names.len() {
                return Err(QueryError::validation(format!(
                    "key for '{}' must have {} values, got {}",
                    self.path,
                    names.len(),
                    key.len()
                )));
            }
            let fields: Fields = names.iter().cloned().zip(key).collect();
            self.check_required(&fields, self.schema.key_columns())?;
            self.push(RowModification::Delete, fields);
            count += 1;
        }
        self.trace(RowModification::Delete, count);
        Ok(self)
    }

    fn push(&mut self, kind: RowModification, fields: Fields) {
        self.rows.push(ModifyRow { kind, fields });
    }

    fn check_columns(&self, fields: &Fields) -> QueryResult<()> {
        if !self.schema.is_strict() {
            return Ok(());
        }
        match fields.keys().find(|name| !self.schema.has_column(name)) {
            Some(name) => Err(QueryError::UnknownColumn {
                table: self.path.clone(),
                column: name.clone(),
            }),
            None => Ok(()),
        }
    }

    fn check_required<'s>(
        &self,
        fields: &Fields,
        columns: impl Iterator<Item = &'s ColumnSchema>,
    ) -> QueryResult<()> {
        for column in columns.filter(|c| c.is_required()) {
            match fields.get(&column.name) {
                None | Some(serde_json::Value::Null) => {
                    return Err(QueryError::MissingRequiredColumn {
                        table: self.path.clone(),
                        column: column.name.clone(),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    #[allow(unused_variables)]
    fn trace(&self, kind: RowModification, rows: usize) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "ytql.modify",
            table = %self.path,
            kind = kind.as_str(),
            rows,
            "added row modifications"
        );
    }
}
