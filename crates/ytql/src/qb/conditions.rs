//! Condition accumulator shared by WHERE and HAVING clauses.

use crate::condition::{Condition, ListCondition, NotNullCondition, OrCondition};

/// Ordered, duplicate-free set of conditions.
///
/// Conditions are kept in four groups and always rendered in the same order:
/// comparisons, disjunctions, not-null checks, IN lists. Inside a group the first
/// insertion wins and structurally equal conditions collapse to one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionSet {
    plain: Vec<Condition>,
    or: Vec<OrCondition>,
    not_null: Vec<NotNullCondition>,
    list: Vec<ListCondition>,
}

fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

impl ConditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.plain.is_empty()
            && self.or.is_empty()
            && self.not_null.is_empty()
            && self.list.is_empty()
    }

    /// Total number of distinct conditions.
    pub fn len(&self) -> usize {
        self.plain.len() + self.or.len() + self.not_null.len() + self.list.len()
    }

    pub fn add(&mut self, condition: Condition) {
        push_unique(&mut self.plain, condition);
    }

    pub fn add_or(&mut self, condition: OrCondition) {
        push_unique(&mut self.or, condition);
    }

    pub fn add_not_null(&mut self, condition: NotNullCondition) {
        push_unique(&mut self.not_null, condition);
    }

    pub fn add_in(&mut self, condition: ListCondition) {
        push_unique(&mut self.list, condition);
    }

    /// Write the clause body (without keyword). Writes nothing when empty.
    pub(crate) fn write_sql(&self, out: &mut String) {
        let mut first = true;
        let mut sep = |out: &mut String| {
            if !first {
                out.push_str(" AND ");
            }
            first = false;
        };

        for c in &self.plain {
            sep(out);
            c.write_sql(out);
        }
        for c in &self.or {
            sep(out);
            c.write_sql(out);
        }
        for c in &self.not_null {
            sep(out);
            c.write_sql(out);
        }
        for c in &self.list {
            sep(out);
            c.write_sql(out);
        }
    }

    /// Write ` <keyword> <body>` if there is anything to write.
    pub(crate) fn write_clause(&self, keyword: &str, out: &mut String) {
        if self.is_empty() {
            return;
        }
        out.push(' ');
        out.push_str(keyword);
        out.push(' ');
        self.write_sql(out);
    }

    /// Render the clause body.
    pub fn build(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }
}
