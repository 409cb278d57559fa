//! Multi-table select builder.

use crate::error::QueryResult;
use crate::join::{Join, JoinCondition, JoinKind};
use crate::qb::base::SelectCore;
use crate::qb::order::{OrderBy, OrderDirection};
use crate::qb::{ConditionSet, qualified_column};
use crate::request::{QueryOptions, QueryRequest};
use crate::schema::{ColumnRef, Table};

/// SELECT builder over a main table and any number of joined tables.
///
/// Columns are always referenced through [`ColumnRef`]s and rendered qualified with
/// the owning table's short name; the main table is aliased in the FROM clause.
///
/// ```ignore
/// let q = qb::select_join(&docs)
///     .select(&[docs.all_columns(), codes.column("kind")])
///     .left_join(&codes)
///     .using(&["code"])?
///     .where_eq(&docs.column("status"), "NEW")?
///     .build();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JoinQueryBuilder<'a> {
    core: SelectCore<'a>,
}

impl<'a> JoinQueryBuilder<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self {
            core: SelectCore::new(table, true),
        }
    }

    /// The main table.
    pub fn table(&self) -> &'a Table {
        self.core.table
    }

    /// Select columns of the main and joined tables.
    ///
    /// A select-all reference expands to every schema column of its table; references
    /// that expand to nothing are skipped.
    pub fn select(mut self, columns: &[ColumnRef<'_>]) -> Self {
        let mut projection = String::new();
        for column in columns {
            if column.qualified_names().is_empty() {
                continue;
            }
            if !projection.is_empty() {
                projection.push_str(", ");
            }
            column.write_qualified(&mut projection);
        }
        self.core.projection = (!projection.is_empty()).then_some(projection);
        self
    }

    /// Start an inner join.
    pub fn inner_join(self, table: &'a Table) -> JoinBuilder<'a> {
        JoinBuilder {
            parent: self,
            kind: JoinKind::Inner,
            table,
        }
    }

    /// Start a left join.
    pub fn left_join(self, table: &'a Table) -> JoinBuilder<'a> {
        JoinBuilder {
            parent: self,
            kind: JoinKind::Left,
            table,
        }
    }

    /// Joins added so far, in declaration order.
    pub fn joins(&self) -> &[Join<'a>] {
        &self.core.joins
    }

    fn push_join(mut self, join: Join<'a>) -> QueryResult<Self> {
        join.condition.validate()?;
        if !self.core.joins.contains(&join) {
            self.core.joins.push(join);
        }
        Ok(self)
    }

    impl_condition_methods! {
        self, clause "WHERE", set core.where_set,
        column &ColumnRef<'_> => qualified_column,
        eq where_eq, not where_not,
        less where_less, less_or_equal where_less_or_equal,
        greater where_greater, greater_or_equal where_greater_or_equal,
        not_null where_not_null, in_list where_in, or where_or,
    }

    pub fn where_conditions(&self) -> &ConditionSet {
        &self.core.where_set
    }

    /// Set ORDER BY over single-column references.
    ///
    /// The order must be finalized with [`OrderedJoinQueryBuilder::limit`].
    pub fn order_by(
        self,
        items: &[(ColumnRef<'_>, OrderDirection)],
    ) -> QueryResult<OrderedJoinQueryBuilder<'a>> {
        let items = items
            .iter()
            .map(|(column, direction)| Ok((column.qualified_name()?, *direction)))
            .collect::<QueryResult<Vec<_>>>()?;
        Ok(OrderedJoinQueryBuilder {
            core: self.core,
            order: OrderBy::new(items),
        })
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

    /// Render the query into a request. Without an explicit projection every column
    /// of the main table is selected.
    pub fn build(&self) -> QueryRequest {
        self.core.build()
    }
}

/// A pending join; finished by [`on`](JoinBuilder::on) or [`using`](JoinBuilder::using).
#[derive(Debug, Clone)]
#[must_use = "the join is only added once `on` or `using` is called"]
pub struct JoinBuilder<'a> {
    parent: JoinQueryBuilder<'a>,
    kind: JoinKind,
    table: &'a Table,
}

impl<'a> JoinBuilder<'a> {
    /// Join on an explicit condition.
    ///
    /// Fails if the condition does not pair columns one to one.
    pub fn on(self, condition: JoinCondition) -> QueryResult<JoinQueryBuilder<'a>> {
        self.parent.push_join(Join {
            kind: self.kind,
            table: self.table,
            condition,
        })
    }

    /// Join on equality of same-named columns of the main and the joined table.
    pub fn using(self, columns: &[&str]) -> QueryResult<JoinQueryBuilder<'a>> {
        let main = self.parent.table();
        let condition = main.columns(columns).equals(&self.table.columns(columns));
        self.on(condition)
    }
}

/// Builder state after `order_by`; the only way forward is `limit`.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "ORDER BY is only applied once `limit` is called"]
pub struct OrderedJoinQueryBuilder<'a> {
    core: SelectCore<'a>,
    order: OrderBy,
}

impl<'a> OrderedJoinQueryBuilder<'a> {
    /// Apply the order and set LIMIT.
    pub fn limit(self, n: u64) -> JoinQueryBuilder<'a> {
        let mut core = self.core;
        core.order_by = self.order;
        core.limit = Some(n);
        JoinQueryBuilder { core }
    }
}
