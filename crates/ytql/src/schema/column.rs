//! Column metadata and column references.

use crate::error::{QueryError, QueryResult};
use crate::join::JoinCondition;
use crate::schema::Table;
use crate::value::TypeTag;
use serde::{Deserialize, Serialize};

/// Sort order of a key column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Column information in a table schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub ty: TypeTag,
    /// Set for key columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

impl ColumnSchema {
    /// A data (non-key) column.
    pub fn new(name: impl Into<String>, ty: TypeTag) -> Self {
        Self {
            name: name.into(),
            ty,
            sort_order: None,
        }
    }

    /// An ascending key column.
    pub fn key(name: impl Into<String>, ty: TypeTag) -> Self {
        Self::new(name, ty).sort_order(SortOrder::Ascending)
    }

    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = Some(order);
        self
    }

    pub fn is_key(&self) -> bool {
        self.sort_order.is_some()
    }

    /// A column is required unless its type is `Optional`.
    pub fn is_required(&self) -> bool {
        !self.ty.is_optional()
    }
}

/// A set of columns of one table, used in multi-table queries.
///
/// Obtained from [`Table::columns`], [`Table::column`] or [`Table::all_columns`].
/// Names are qualified with the table's short name when rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef<'a> {
    table: &'a Table,
    columns: Vec<String>,
    select_all: bool,
}

impl<'a> ColumnRef<'a> {
    pub(crate) fn new<I, S>(table: &'a Table, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut columns: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !columns.contains(&name) {
                columns.push(name);
            }
        }
        let select_all = columns.iter().any(|c| c == "*");
        Self {
            table,
            columns,
            select_all,
        }
    }

    pub fn table(&self) -> &'a Table {
        self.table
    }

    /// Column names as given (unqualified).
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Whether the reference stands for every column of the table.
    pub fn is_select_all(&self) -> bool {
        self.select_all
    }

    /// Qualified names (`alias.column`). A select-all reference expands to every
    /// column declared in the table schema.
    pub fn qualified_names(&self) -> Vec<String> {
        if self.select_all {
            self.table
                .schema()
                .column_names()
                .map(|name| self.table.qualify(name))
                .collect()
        } else {
            self.columns.iter().map(|c| self.table.qualify(c)).collect()
        }
    }

    /// The qualified name of the single column this reference names.
    pub fn qualified_name(&self) -> QueryResult<String> {
        match self.columns.as_slice() {
            [single] if !self.select_all => Ok(self.table.qualify(single)),
            columns => Err(QueryError::AmbiguousColumn {
                table: self.table.path().to_string(),
                columns: columns.join(", "),
            }),
        }
    }

    /// Equality join condition between this and another column set, pairwise in order.
    pub fn equals(&self, other: &ColumnRef<'_>) -> JoinCondition {
        JoinCondition::new(self.qualified_names(), other.qualified_names())
    }

    pub(crate) fn write_qualified(&self, out: &mut String) {
        for (i, name) in self.qualified_names().iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(name);
        }
    }
}
