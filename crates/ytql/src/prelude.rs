//! Convenient imports for typical `ytql` usage.
//!
//! ```ignore
//! use ytql::prelude::*;
//! ```

pub use crate::qb::{self, OrderDirection, typed};
pub use crate::{
    ColumnRef, Fields, ModifyRowsRequest, QueryError, QueryOptions, QueryRequest, QueryResult,
    RowMapper, SerdeMapper, Table, TableSchema, TypeTag, Value,
};
