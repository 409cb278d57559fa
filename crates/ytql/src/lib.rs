//! # ytql
//!
//! A typed SELECT query builder for YTsaurus dynamic tables.
//!
//! ## Features
//!
//! - **Typed conditions**: values are tagged at the call site; instants are encoded
//!   by their declared column type (`timestamp` as microseconds, `datetime` as seconds)
//! - **Fail fast**: empty IN lists, untyped instants and ambiguous column references
//!   are rejected by the call that introduced them
//! - **Deterministic output**: the same builder always renders the same text
//! - **Joins**: qualified column references, `ON` / `USING` conditions
//! - **Row modification**: insert / update / delete batches validated against the schema
//!
//! ## Query Builder (qb)
//!
//! ```ignore
//! use ytql::prelude::*;
//!
//! let documents = Table::new(
//!     "//home/docs/document",
//!     TableSchema::new()
//!         .with_key_column("document_id", TypeTag::String)
//!         .with_column("created_on", TypeTag::Timestamp)
//!         .with_column("status", TypeTag::String),
//! )?;
//!
//! let request = qb::select(&documents)
//!     .where_eq("status", "NEW")?
//!     .where_greater("created_on", typed(since, TypeTag::Timestamp))?
//!     .order_by(&[("created_on", OrderDirection::Desc)])
//!     .limit(10)
//!     .build();
//!
//! assert_eq!(
//!     request.query(),
//!     "* FROM [//home/docs/document] WHERE status = \"NEW\" AND created_on > 1717778719746657 \
//!      ORDER BY created_on DESC LIMIT 10"
//! );
//! ```

pub mod condition;
pub mod error;
pub mod join;
pub mod literal;
pub mod modify;
pub mod prelude;
pub mod qb;
pub mod request;
pub mod row;
pub mod schema;
pub mod value;

pub use condition::{Condition, ListCondition, NotNullCondition, Operator, OrCondition};
pub use error::{QueryError, QueryResult};
pub use join::{Join, JoinCondition, JoinKind};
pub use modify::{ModifyRow, ModifyRowsRequest, RowModification};
pub use request::{QueryOptions, QueryRequest};
pub use row::{Fields, FieldsExt, NoMapper, RowMapper, SerdeMapper};
pub use schema::{ColumnRef, ColumnSchema, SortOrder, Table, TableSchema};
pub use value::{TypeTag, Value};

// Re-export qb entry points for easy access
pub use qb::{
    GroupedQueryBuilder, IntoParam, JoinQueryBuilder, OrderDirection, Param, QueryBuilder,
    select, select_join, typed,
};
