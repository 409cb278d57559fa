//! Query builders.
//!
//! ```ignore
//! use ytql::qb::{self, OrderDirection, typed};
//! use ytql::TypeTag;
//!
//! let request = qb::select(&documents)
//!     .where_eq("document_id", "abc")?
//!     .where_not("index", 3)?
//!     .where_greater("created_on", typed(since, TypeTag::Timestamp))?
//!     .order_by(&[("document_id", OrderDirection::Asc)])
//!     .limit(10)
//!     .build();
//!
//! // SELECT ... GROUP BY ... HAVING
//! let request = qb::select(&documents)
//!     .select([qb::count("status_count"), qb::column(&["status"])])
//!     .group_by(&["status"])?
//!     .having_in("status", ["CREATED", "IN_PROCESSING"])?
//!     .build();
//!
//! // JOIN
//! let request = qb::select_join(&documents)
//!     .left_join(&codes)
//!     .using(&["code"])?
//!     .build();
//! ```

#[macro_use]
mod cond_macros;

mod base;
mod conditions;
mod join;
mod order;
mod param;
mod select;
mod selector;


pub use conditions::ConditionSet;
pub use join::{JoinBuilder, JoinQueryBuilder, OrderedJoinQueryBuilder};
pub use order::OrderDirection;
pub use param::{IntoParam, Param, typed};
pub use select::{GroupedQueryBuilder, OrderedQueryBuilder, QueryBuilder};
pub use selector::{Selector, avg, column, count, max, min, sum};

use crate::error::QueryResult;
use crate::schema::{ColumnRef, Table};

/// Create a SELECT builder for one table.
pub fn select(table: &Table) -> QueryBuilder<'_> {
    QueryBuilder::new(table)
}

/// Create a SELECT builder that can join other tables to `table`.
pub fn select_join(table: &Table) -> JoinQueryBuilder<'_> {
    JoinQueryBuilder::new(table)
}

pub(crate) fn plain_column(name: &str) -> QueryResult<String> {
    Ok(name.to_string())
}

pub(crate) fn qualified_column(column: &ColumnRef<'_>) -> QueryResult<String> {
    column.qualified_name()
}
