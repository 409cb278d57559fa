//! Condition primitives for WHERE and HAVING clauses.
//!
//! A [`Condition`] is one `column <op> literal` comparison, a [`ListCondition`] is a
//! `column IN (...)` membership test, an [`OrCondition`] is a parenthesized pair of
//! comparisons joined by `OR` and a [`NotNullCondition`] is `column IS NOT NULL`.
//!
//! Values are checked and temporal values encoded when the condition is created.

use crate::error::{QueryError, QueryResult};
use crate::literal::{resolve, write_literal};
use crate::qb::Param;
use crate::value::{TypeTag, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Equals,
    NotEquals,
    In,
    IsNotNull,
}

impl Operator {
    /// Literal rendering of the operator.
    pub const fn as_str(self) -> &'static str {
        match self {
            Operator::Less => "<",
            Operator::LessOrEqual => "<=",
            Operator::Greater => ">",
            Operator::GreaterOrEqual => ">=",
            Operator::Equals => "=",
            Operator::NotEquals => "!=",
            Operator::In => "IN",
            Operator::IsNotNull => "IS NOT NULL",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single comparison: `column <op> literal`.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    column: String,
    operator: Operator,
    value: Value,
    declared: Option<TypeTag>,
}

impl Condition {
    /// Create a comparison condition.
    ///
    /// Fails when the value is temporal and no usable declared type is given, or
    /// when the value does not fit the declared type.
    pub fn new(column: impl Into<String>, operator: Operator, param: Param) -> QueryResult<Self> {
        let column = column.into();
        let Param { value, declared } = param;
        let value = resolve(&column, operator, value, declared.as_ref())?;
        Ok(Self {
            column,
            operator,
            value,
            declared,
        })
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The value after temporal encoding.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn declared_type(&self) -> Option<&TypeTag> {
        self.declared.as_ref()
    }

    pub(crate) fn is_temporal(&self) -> bool {
        self.declared.as_ref().is_some_and(TypeTag::is_temporal)
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        out.push_str(&self.column);
        out.push(' ');
        out.push_str(self.operator.as_str());
        out.push(' ');
        write_literal(out, &self.value, self.declared.as_ref());
    }

    /// Render the condition.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }
}

/// Set membership: `column IN (a, b, ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListCondition(Condition);

impl ListCondition {
    /// Create an IN condition. The value must be a non-empty collection.
    pub fn new(column: impl Into<String>, param: Param) -> QueryResult<Self> {
        let column = column.into();
        match &param.value {
            Value::List(items) if items.is_empty() => {
                return Err(QueryError::EmptyInList { column });
            }
            Value::List(_) => {}
            other => {
                return Err(QueryError::type_mismatch(
                    column,
                    format!("IN expects a collection, got {}", other.kind()),
                ));
            }
        }
        Condition::new(column, Operator::In, param).map(ListCondition)
    }

    pub fn column(&self) -> &str {
        self.0.column()
    }

    pub fn values(&self) -> &[Value] {
        match self.0.value() {
            Value::List(items) => items,
            _ => &[],
        }
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        self.0.write_sql(out);
    }

    pub fn to_sql(&self) -> String {
        self.0.to_sql()
    }
}

/// Disjunction of two comparisons: `(a = 1 OR b = 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrCondition {
    first: Condition,
    second: Condition,
}

impl OrCondition {
    /// Create a disjunction of two equality comparisons.
    ///
    /// When either value is temporal both sides must carry a declared type.
    pub fn new(
        first: (impl Into<String>, Param),
        second: (impl Into<String>, Param),
    ) -> QueryResult<Self> {
        let (first_column, first_param) = (first.0.into(), first.1);
        let (second_column, second_param) = (second.0.into(), second.1);

        let temporal = first_param.value.is_temporal() || second_param.value.is_temporal();
        if temporal && (first_param.declared.is_none() || second_param.declared.is_none()) {
            return Err(QueryError::DisjunctionTypeMismatch {
                left: first_column,
                right: second_column,
            });
        }

        Ok(Self {
            first: Condition::new(first_column, Operator::Equals, first_param)?,
            second: Condition::new(second_column, Operator::Equals, second_param)?,
        })
    }

    pub fn first(&self) -> &Condition {
        &self.first
    }

    pub fn second(&self) -> &Condition {
        &self.second
    }

    /// Whether both sides were declared with temporal types.
    pub fn is_temporal(&self) -> bool {
        self.first.is_temporal() && self.second.is_temporal()
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        out.push('(');
        self.first.write_sql(out);
        out.push_str(" OR ");
        self.second.write_sql(out);
        out.push(')');
    }

    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }
}

/// `column IS NOT NULL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotNullCondition {
    column: String,
}

impl NotNullCondition {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        out.push_str(&self.column);
        out.push(' ');
        out.push_str(Operator::IsNotNull.as_str());
    }

    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qb::typed;
    use chrono::Utc;

    #[test]
    fn operators_render_literally() {
        let rendered: Vec<_> = [
            Operator::Less,
            Operator::LessOrEqual,
            Operator::Greater,
            Operator::GreaterOrEqual,
            Operator::Equals,
            Operator::NotEquals,
            Operator::In,
            Operator::IsNotNull,
        ]
        .iter()
        .map(|op| op.to_string())
        .collect();
        assert_eq!(rendered, ["<", "<=", ">", ">=", "=", "!=", "IN", "IS NOT NULL"]);
    }

    #[test]
    fn comparison_renders_column_operator_literal() {
        let c = Condition::new("document_id", Operator::Equals, Param::new("abc")).unwrap();
        assert_eq!(c.to_sql(), "document_id = \"abc\"");

        let c = Condition::new("index", Operator::NotEquals, Param::new(3)).unwrap();
        assert_eq!(c.to_sql(), "index != 3");
    }

    #[test]
    fn list_condition_requires_items() {
        let err = ListCondition::new("status", Param::new(Vec::<i32>::new())).unwrap_err();
        assert!(err.is_empty_in_list());

        let err = ListCondition::new("status", Param::new(1)).unwrap_err();
        assert!(matches!(err, QueryError::TypeMismatch { .. }));

        let c = ListCondition::new("status", Param::new(vec![1, 2, 3])).unwrap();
        assert_eq!(c.to_sql(), "status IN (1, 2, 3)");
        assert_eq!(c.values().len(), 3);
    }

    #[test]
    fn or_condition_renders_parenthesized() {
        let c = OrCondition::new(
            ("seller_tin", Param::new("123")),
            ("buyer_tin", Param::new("123")),
        )
        .unwrap();
        assert_eq!(c.to_sql(), "(seller_tin = \"123\" OR buyer_tin = \"123\")");
        assert!(!c.is_temporal());
    }

    #[test]
    fn or_condition_requires_types_on_both_temporal_sides() {
        let now = Utc::now();
        let err = OrCondition::new(
            ("created_on", typed(now, TypeTag::Timestamp)),
            ("receipt_date", Param::new(now)),
        )
        .unwrap_err();
        assert!(matches!(err, QueryError::DisjunctionTypeMismatch { .. }));

        let ok = OrCondition::new(
            ("created_on", typed(now, TypeTag::Timestamp)),
            ("receipt_date", typed(now, TypeTag::Datetime)),
        )
        .unwrap();
        assert!(ok.is_temporal());
    }

    #[test]
    fn structurally_equal_conditions_compare_equal() {
        let a = Condition::new("a", Operator::Less, Param::new(1)).unwrap();
        let b = Condition::new("a", Operator::Less, Param::new(1)).unwrap();
        assert_eq!(a, b);
        assert_eq!(NotNullCondition::new("x"), NotNullCondition::new("x"));
    }
}
