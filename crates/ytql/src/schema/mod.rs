//! Table handles, schemas and column references.

mod column;
mod table;

pub use column::{ColumnRef, ColumnSchema, SortOrder};
pub use table::{Table, TableSchema};
