//! Projection items for single-table queries.
//!
//! ```ignore
//! use ytql::qb::{self, column, count, sum};
//!
//! qb::select(&table)
//!     .select([count("total"), sum(&[("amount", "amount_sum")]), column(&["status"])])
//!     .group_by(&["status"])?
//!     .build();
//! // SUM(1) AS total, SUM(amount) AS amount_sum, status FROM [...] GROUP BY status
//! ```

use std::fmt;

/// A rendered projection fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector(String);

impl Selector {
    /// Raw projection text, e.g. an expression not covered by the helpers.
    pub fn raw(text: impl Into<String>) -> Self {
        Selector(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn aggregate(function: &str, pairs: &[(&str, &str)]) -> Selector {
    Selector(
        pairs
            .iter()
            .map(|(column, alias)| format!("{function}({column}) AS {alias}"))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// Plain columns: `a, b`.
pub fn column(names: &[&str]) -> Selector {
    Selector(names.join(", "))
}

/// Row count: `SUM(1) AS alias`.
pub fn count(alias: &str) -> Selector {
    Selector(format!("SUM(1) AS {alias}"))
}

/// `SUM(column) AS alias` for each pair.
pub fn sum(pairs: &[(&str, &str)]) -> Selector {
    aggregate("SUM", pairs)
}

/// `MIN(column) AS alias` for each pair.
pub fn min(pairs: &[(&str, &str)]) -> Selector {
    aggregate("MIN", pairs)
}

/// `MAX(column) AS alias` for each pair.
pub fn max(pairs: &[(&str, &str)]) -> Selector {
    aggregate("MAX", pairs)
}

/// `AVG(column) AS alias` for each pair.
pub fn avg(pairs: &[(&str, &str)]) -> Selector {
    aggregate("AVG", pairs)
}
