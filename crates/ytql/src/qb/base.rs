//! State and rendering shared by all select builders.

use crate::join::Join;
use crate::qb::conditions::ConditionSet;
use crate::qb::order::OrderBy;
use crate::request::{QueryOptions, QueryRequest};
use crate::schema::Table;

/// Everything a select query is made of.
///
/// Clause order: projection, FROM, joins, WHERE, GROUP BY, HAVING, ORDER BY, LIMIT.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SelectCore<'a> {
    pub(crate) table: &'a Table,
    /// Render `FROM [path] AS name` and qualify the default projection.
    pub(crate) aliased: bool,
    pub(crate) projection: Option<String>,
    pub(crate) joins: Vec<Join<'a>>,
    pub(crate) where_set: ConditionSet,
    pub(crate) group_by: Vec<String>,
    pub(crate) having: ConditionSet,
    pub(crate) order_by: OrderBy,
    pub(crate) limit: Option<u64>,
    pub(crate) options: QueryOptions,
}

impl<'a> SelectCore<'a> {
    pub(crate) fn new(table: &'a Table, aliased: bool) -> Self {
        Self {
            table,
            aliased,
            projection: None,
            joins: Vec::new(),
            where_set: ConditionSet::new(),
            group_by: Vec::new(),
            having: ConditionSet::new(),
            order_by: OrderBy::default(),
            limit: None,
            options: QueryOptions::default(),
        }
    }

    fn write_projection(&self, out: &mut String) {
        match &self.projection {
            Some(projection) => out.push_str(projection),
            None if self.aliased => self.table.all_columns().write_qualified(out),
            None => out.push('*'),
        }
    }

    pub(crate) fn to_ytql(&self) -> String {
        let mut out = String::new();
        self.write_projection(&mut out);

        out.push_str(" FROM [");
        out.push_str(self.table.path());
        out.push(']');
        if self.aliased {
            out.push_str(" AS ");
            out.push_str(self.table.name());
        }

        for join in &self.joins {
            join.write_sql(&mut out);
        }

        self.where_set.write_clause("WHERE", &mut out);

        if !self.group_by.is_empty() {
            out.push_str(" GROUP BY ");
            out.push_str(&self.group_by.join(", "));
            self.having.write_clause("HAVING", &mut out);
        }

        self.order_by.write_sql(&mut out);

        if let Some(limit) = self.limit {
            out.push_str(" LIMIT ");
            out.push_str(&limit.to_string());
        }

        out
    }

    pub(crate) fn build(&self) -> QueryRequest {
        let query = self.to_ytql();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "ytql.query",
            table = %self.table.path(),
            joins = self.joins.len(),
            query = %query,
            "built select query"
        );

        QueryRequest::new(query, self.table.path(), self.options.clone())
    }
}
