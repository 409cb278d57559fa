//! Join model for multi-table queries.

use crate::error::{QueryError, QueryResult};
use crate::schema::Table;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Join type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
}

impl JoinKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            JoinKind::Inner => "JOIN",
            JoinKind::Left => "LEFT JOIN",
        }
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Equality between two ordered column tuples: `(l1, l2) = (r1, r2)`.
///
/// Built from [`ColumnRef::equals`](crate::schema::ColumnRef::equals) and combined
/// with [`and`](JoinCondition::and). Columns are paired by position; a repeated
/// `(left, right)` pair is kept once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinCondition {
    left: Vec<String>,
    right: Vec<String>,
    /// Sides of different length were given; such a condition never validates.
    mismatched: bool,
}

impl JoinCondition {
    pub fn new(
        left: impl IntoIterator<Item = String>,
        right: impl IntoIterator<Item = String>,
    ) -> Self {
        let left: Vec<String> = left.into_iter().collect();
        let right: Vec<String> = right.into_iter().collect();
        if left.len() != right.len() {
            return Self {
                left,
                right,
                mismatched: true,
            };
        }
        let mut condition = Self::default();
        for pair in left.into_iter().zip(right) {
            condition.push_pair(pair);
        }
        condition
    }

    /// Merge another condition into this one, pair by pair.
    pub fn and(mut self, other: JoinCondition) -> Self {
        if self.mismatched || other.mismatched {
            self.left.extend(other.left);
            self.right.extend(other.right);
            self.mismatched = true;
            return self;
        }
        for pair in other.left.into_iter().zip(other.right) {
            self.push_pair(pair);
        }
        self
    }

    fn push_pair(&mut self, (left, right): (String, String)) {
        let exists = self
            .left
            .iter()
            .zip(&self.right)
            .any(|(l, r)| *l == left && *r == right);
        if !exists {
            self.left.push(left);
            self.right.push(right);
        }
    }

    pub fn left(&self) -> &[String] {
        &self.left
    }

    pub fn right(&self) -> &[String] {
        &self.right
    }

    /// Both sides must be non-empty and pair up one to one.
    pub(crate) fn validate(&self) -> QueryResult<()> {
        if self.mismatched || self.left.is_empty() || self.left.len() != self.right.len() {
            return Err(QueryError::validation(format!(
                "join condition must pair columns one to one, got ({}) = ({})",
                self.left.join(", "),
                self.right.join(", ")
            )));
        }
        Ok(())
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        out.push('(');
        out.push_str(&self.left.join(", "));
        out.push_str(") = (");
        out.push_str(&self.right.join(", "));
        out.push(')');
    }
}

/// One joined table.
#[derive(Debug, Clone, PartialEq)]
pub struct Join<'a> {
    pub kind: JoinKind,
    pub table: &'a Table,
    pub condition: JoinCondition,
}

impl Join<'_> {
    /// ` JOIN [path] AS name ON (l) = (r)`
    pub(crate) fn write_sql(&self, out: &mut String) {
        out.push(' ');
        out.push_str(self.kind.keyword());
        out.push_str(" [");
        out.push_str(self.table.path());
        out.push_str("] AS ");
        out.push_str(self.table.name());
        out.push_str(" ON ");
        self.condition.write_sql(out);
    }
}
