/// Generate the condition methods of a clause for a builder type.
///
/// `set` is the path from `self` to the [`ConditionSet`](crate::qb::ConditionSet)
/// the methods write to; `column` is the column argument type and the function turning
/// it into the rendered column name.
///
/// Usage:
/// ```ignore
/// impl_condition_methods! {
///     self, clause "WHERE", set core.where_set,
///     column &str => plain_column,
///     eq where_eq, not where_not,
///     less where_less, less_or_equal where_less_or_equal,
///     greater where_greater, greater_or_equal where_greater_or_equal,
///     not_null where_not_null, in_list where_in, or where_or,
/// }
/// ```
macro_rules! impl_condition_methods {
    (
        $this:ident, clause $clause:literal, set $($field:ident).+,
        column $col:ty => $resolve:path,
        eq $eq:ident, not $not:ident,
        less $less:ident, less_or_equal $less_eq:ident,
        greater $greater:ident, greater_or_equal $greater_eq:ident,
        not_null $not_null:ident, in_list $in_list:ident, or $or:ident $(,)?
    ) => {
        impl_condition_methods!(@compare $this, $clause, $($field).+, $col, $resolve,
            $eq, Equals, "=");
        impl_condition_methods!(@compare $this, $clause, $($field).+, $col, $resolve,
            $not, NotEquals, "!=");
        impl_condition_methods!(@compare $this, $clause, $($field).+, $col, $resolve,
            $less, Less, "<");
        impl_condition_methods!(@compare $this, $clause, $($field).+, $col, $resolve,
            $less_eq, LessOrEqual, "<=");
        impl_condition_methods!(@compare $this, $clause, $($field).+, $col, $resolve,
            $greater, Greater, ">");
        impl_condition_methods!(@compare $this, $clause, $($field).+, $col, $resolve,
            $greater_eq, GreaterOrEqual, ">=");

        #[doc = concat!("Add ", $clause, ": `column IS NOT NULL`.")]
        pub fn $not_null(mut $this, column: $col) -> $crate::error::QueryResult<Self> {
            let condition = $crate::condition::NotNullCondition::new($resolve(column)?);
            $this.$($field).+.add_not_null(condition);
            Ok($this)
        }

        #[doc = concat!("Add ", $clause, ": `column IN (values...)`.")]
        ///
        /// Fails on an empty collection or a non-collection value.
        pub fn $in_list(
            mut $this,
            column: $col,
            values: impl $crate::qb::IntoParam,
        ) -> $crate::error::QueryResult<Self> {
            let condition = $crate::condition::ListCondition::new(
                $resolve(column)?,
                $crate::qb::IntoParam::into_param(values),
            )?;
            $this.$($field).+.add_in(condition);
            Ok($this)
        }

        #[doc = concat!("Add ", $clause, ": `(first = a OR second = b)`.")]
        ///
        /// When either value is an instant both must be [`typed`](crate::qb::typed).
        pub fn $or(
            mut $this,
            first: ($col, impl $crate::qb::IntoParam),
            second: ($col, impl $crate::qb::IntoParam),
        ) -> $crate::error::QueryResult<Self> {
            let condition = $crate::condition::OrCondition::new(
                ($resolve(first.0)?, $crate::qb::IntoParam::into_param(first.1)),
                ($resolve(second.0)?, $crate::qb::IntoParam::into_param(second.1)),
            )?;
            $this.$($field).+.add_or(condition);
            Ok($this)
        }
    };

    (@compare $this:ident, $clause:literal, $($field:ident).+, $col:ty, $resolve:path,
        $name:ident, $op:ident, $sym:literal) => {
        #[doc = concat!("Add ", $clause, ": `column ", $sym, " value`.")]
        pub fn $name(
            mut $this,
            column: $col,
            value: impl $crate::qb::IntoParam,
        ) -> $crate::error::QueryResult<Self> {
            let condition = $crate::condition::Condition::new(
                $resolve(column)?,
                $crate::condition::Operator::$op,
                $crate::qb::IntoParam::into_param(value),
            )?;
            $this.$($field).+.add(condition);
            Ok($this)
        }
    };
}
