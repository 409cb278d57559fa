//! Single-table select builder with GROUP BY / HAVING support.

use crate::error::{QueryError, QueryResult};
use crate::qb::base::SelectCore;
use crate::qb::order::{OrderBy, OrderDirection};
use crate::qb::selector::Selector;
use crate::qb::{ConditionSet, plain_column};
use crate::request::{QueryOptions, QueryRequest};
use crate::schema::Table;

/// SELECT builder over one table.
///
/// Every condition method validates its input and returns `QueryResult<Self>`, so a
/// chain reads `qb::select(&t).where_eq("a", 1)?.where_in("b", [1, 2])?.build()`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryBuilder<'a> {
    core: SelectCore<'a>,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self {
            core: SelectCore::new(table, false),
        }
    }

    pub fn table(&self) -> &'a Table {
        self.core.table
    }

    // ==================== Projection ====================

    /// Select every column (`*`).
    pub fn select_all(mut self) -> Self {
        self.core.projection = Some("*".to_string());
        self
    }

    /// Select the given columns and aggregates, in order. Empty selectors are skipped.
    pub fn select(mut self, selectors: impl IntoIterator<Item = Selector>) -> Self {
        let parts: Vec<String> = selectors
            .into_iter()
            .filter(|s| !s.as_str().is_empty())
            .map(|s| s.to_string())
            .collect();
        self.core.projection = if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        };
        self
    }

    /// Select plain columns by name.
    pub fn select_columns(self, columns: &[&str]) -> Self {
        self.select([crate::qb::column(columns)])
    }

    // ==================== WHERE ====================

    impl_condition_methods! {
        self, clause "WHERE", set core.where_set,
        column &str => plain_column,
        eq where_eq, not where_not,
        less where_less, less_or_equal where_less_or_equal,
        greater where_greater, greater_or_equal where_greater_or_equal,
        not_null where_not_null, in_list where_in, or where_or,
    }

    /// WHERE conditions added so far.
    pub fn where_conditions(&self) -> &ConditionSet {
        &self.core.where_set
    }

    // ==================== Grouping, ordering, limit ====================

    /// Set GROUP BY columns and switch to the grouped builder.
    ///
    /// Fails on an empty column list.
    pub fn group_by(mut self, columns: &[&str]) -> QueryResult<GroupedQueryBuilder<'a>> {
        if columns.is_empty() {
            return Err(QueryError::validation("GROUP BY needs at least one column"));
        }
        self.core.group_by = columns.iter().map(|c| c.to_string()).collect();
        Ok(GroupedQueryBuilder { core: self.core })
    }

    /// Set ORDER BY. The order must be finalized with [`OrderedQueryBuilder::limit`].
    pub fn order_by(self, items: &[(&str, OrderDirection)]) -> OrderedQueryBuilder<'a> {
        OrderedQueryBuilder::new(self.core, items)
    }

    /// Set LIMIT.
    pub fn limit(mut self, n: u64) -> Self {
        self.core.limit = Some(n);
        self
    }

    /// Set execution options for the built request.
    pub fn with_options(mut self, options: QueryOptions) -> Self {
        self.core.options = options;
        self
    }

    // ==================== Build ====================

    /// Render the query text.
    pub fn to_ytql(&self) -> String {
        self.core.to_ytql()
    }

    /// Render the query into a request. Can be called repeatedly.
    pub fn build(&self) -> QueryRequest {
        self.core.build()
    }
}

/// Builder state after `group_by`: WHERE and HAVING conditions, order, limit.
///
/// `where_*` calls keep writing to the same WHERE clause as before `group_by`.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedQueryBuilder<'a> {
    core: SelectCore<'a>,
}

impl<'a> GroupedQueryBuilder<'a> {
    impl_condition_methods! {
        self, clause "WHERE", set core.where_set,
        column &str => plain_column,
        eq where_eq, not where_not,
        less where_less, less_or_equal where_less_or_equal,
        greater where_greater, greater_or_equal where_greater_or_equal,
        not_null where_not_null, in_list where_in, or where_or,
    }

    impl_condition_methods! {
        self, clause "HAVING", set core.having,
        column &str => plain_column,
        eq having_eq, not having_not,
        less having_less, less_or_equal having_less_or_equal,
        greater having_greater, greater_or_equal having_greater_or_equal,
        not_null having_not_null, in_list having_in, or having_or,
    }

    pub fn group_by_columns(&self) -> &[String] {
        &self.core.group_by
    }

    /// HAVING conditions added so far.
    pub fn having_conditions(&self) -> &ConditionSet {
        &self.core.having
    }

    /// Set ORDER BY. The order must be finalized with [`OrderedQueryBuilder::limit`].
    pub fn order_by(self, items: &[(&str, OrderDirection)]) -> OrderedQueryBuilder<'a> {
        OrderedQueryBuilder::new(self.core, items)
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.core.limit = Some(n);
        self
    }

    pub fn with_options(mut self, options: QueryOptions) -> Self {
        self.core.options = options;
        self
    }

    pub fn to_ytql(&self) -> String {
        self.core.to_ytql()
    }

    pub fn build(&self) -> QueryRequest {
        self.core.build()
    }
}

/// Builder state after `order_by`; the only way forward is `limit`.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "ORDER BY is only applied once `limit` is called"]
pub struct OrderedQueryBuilder<'a> {
    core: SelectCore<'a>,
    order: OrderBy,
}

impl<'a> OrderedQueryBuilder<'a> {
    fn new(core: SelectCore<'a>, items: &[(&str, OrderDirection)]) -> Self {
        let order = OrderBy::new(items.iter().map(|(c, d)| (c.to_string(), *d)));
        Self { core, order }
    }

    /// Apply the order and set LIMIT.
    pub fn limit(self, n: u64) -> QueryBuilder<'a> {
        let mut core = self.core;
        core.order_by = self.order;
        core.limit = Some(n);
        QueryBuilder { core }
    }
}
