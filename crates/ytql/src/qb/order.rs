//! ORDER BY items.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ORDER BY list. A column appears at most once; the first direction given for it wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct OrderBy {
    items: Vec<(String, OrderDirection)>,
}

impl OrderBy {
    pub(crate) fn new(items: impl IntoIterator<Item = (String, OrderDirection)>) -> Self {
        let mut order = Self::default();
        for (column, direction) in items {
            if !order.items.iter().any(|(c, _)| *c == column) {
                order.items.push((column, direction));
            }
        }
        order
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Write ` ORDER BY a ASC, b DESC` if not empty.
    pub(crate) fn write_sql(&self, out: &mut String) {
        if self.is_empty() {
            return;
        }
        out.push_str(" ORDER BY ");
        for (i, (column, direction)) in self.items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(column);
            out.push(' ');
            out.push_str(direction.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(order: &OrderBy) -> String {
        let mut out = String::new();
        order.write_sql(&mut out);
        out
    }

    #[test]
    fn repeated_columns_keep_first_occurrence() {
        let order = OrderBy::new([
            ("a".to_string(), OrderDirection::Desc),
            ("b".to_string(), OrderDirection::Asc),
            ("a".to_string(), OrderDirection::Asc),
        ]);
        assert_eq!(render(&order), " ORDER BY a DESC, b ASC");
    }

    #[test]
    fn empty_order_renders_nothing() {
        let order = OrderBy::new(Vec::new());
        assert!(order.is_empty());
        assert_eq!(render(&order), "");
    }
}
