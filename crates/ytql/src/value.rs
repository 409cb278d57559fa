//! Typed values and declared column types.
//!
//! [`Value`] is the tagged value every condition carries. It is built at the call
//! boundary (through `From` conversions), so rendering never has to inspect runtime
//! types. [`TypeTag`] mirrors the storage engine's column types and is used both in
//! table schemas and as the optional *declared type* of a condition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::SystemTime;

/// Column type as declared in a table schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float,
    Double,
    Bool,
    String,
    Utf8,
    Json,
    Yson,
    Uuid,
    Date,
    /// Seconds since the unix epoch.
    Datetime,
    /// Microseconds since the unix epoch.
    Timestamp,
    Interval,
    /// Nullable wrapper around another type.
    Optional(Box<TypeTag>),
}

impl TypeTag {
    /// Wrap a type into `Optional`.
    pub fn optional(inner: TypeTag) -> Self {
        TypeTag::Optional(Box::new(inner))
    }

    /// The type with any `Optional` wrappers removed.
    pub fn base(&self) -> &TypeTag {
        match self {
            TypeTag::Optional(inner) => inner.base(),
            other => other,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, TypeTag::Optional(_))
    }

    /// Whether literals of this type are rendered double-quoted.
    pub fn is_string(&self) -> bool {
        matches!(self.base(), TypeTag::String | TypeTag::Utf8)
    }

    /// Whether this is a date/time type.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self.base(),
            TypeTag::Date | TypeTag::Datetime | TypeTag::Timestamp | TypeTag::Interval
        )
    }

    /// Whether a (non-instant, non-list) value can be compared against this type.
    pub(crate) fn accepts(&self, value: &Value) -> bool {
        match (self.base(), value) {
            (_, Value::Other(_)) => true,
            (_, Value::List(_)) => false,
            (
                TypeTag::String | TypeTag::Utf8 | TypeTag::Json | TypeTag::Yson | TypeTag::Uuid,
                v,
            ) => !matches!(v, Value::Instant(_)),
            (
                TypeTag::Int8
                | TypeTag::Int16
                | TypeTag::Int32
                | TypeTag::Int64
                | TypeTag::Uint8
                | TypeTag::Uint16
                | TypeTag::Uint32
                | TypeTag::Uint64,
                v,
            ) => matches!(v, Value::Int(_) | Value::UInt(_)),
            (TypeTag::Float | TypeTag::Double, v) => {
                matches!(v, Value::Int(_) | Value::UInt(_) | Value::Float(_))
            }
            (TypeTag::Bool, v) => matches!(v, Value::Bool(_)),
            (TypeTag::Date | TypeTag::Datetime | TypeTag::Timestamp | TypeTag::Interval, v) => {
                matches!(v, Value::Int(_) | Value::UInt(_) | Value::Instant(_))
            }
            (TypeTag::Optional(inner), v) => inner.accepts(v),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeTag::Int8 => "int8",
            TypeTag::Int16 => "int16",
            TypeTag::Int32 => "int32",
            TypeTag::Int64 => "int64",
            TypeTag::Uint8 => "uint8",
            TypeTag::Uint16 => "uint16",
            TypeTag::Uint32 => "uint32",
            TypeTag::Uint64 => "uint64",
            TypeTag::Float => "float",
            TypeTag::Double => "double",
            TypeTag::Bool => "bool",
            TypeTag::String => "string",
            TypeTag::Utf8 => "utf8",
            TypeTag::Json => "json",
            TypeTag::Yson => "yson",
            TypeTag::Uuid => "uuid",
            TypeTag::Date => "date",
            TypeTag::Datetime => "datetime",
            TypeTag::Timestamp => "timestamp",
            TypeTag::Interval => "interval",
            TypeTag::Optional(inner) => return write!(f, "optional<{inner}>"),
        };
        f.write_str(name)
    }
}

/// A value in a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// String, always rendered quoted
    String(String),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Floating point number
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Point in time; needs a declared type to be rendered
    Instant(DateTime<Utc>),
    /// Collection of values (IN lists)
    List(Vec<Value>),
    /// Anything else, rendered verbatim in its textual form
    Other(String),
}

impl Value {
    /// Build a list value from any iterator of convertible items.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Wrap any displayable value that has no dedicated variant.
    pub fn other(value: impl fmt::Display) -> Self {
        Value::Other(value.to_string())
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// True for instants and for lists containing at least one instant.
    pub fn is_temporal(&self) -> bool {
        match self {
            Value::Instant(_) => true,
            Value::List(items) => items.iter().any(Value::is_temporal),
            _ => false,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Instant(_) => "instant",
            Value::List(_) => "list",
            Value::Other(_) => "other",
        }
    }
}

/// Default textual form: strings unquoted, floats always with a fractional part.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{n}"),
            Value::UInt(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n:?}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Instant(at) => write!(f, "{}", at.to_rfc3339()),
            Value::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Value::Other(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

macro_rules! impl_from_int {
    ($variant:ident => $($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::$variant(n.into())
                }
            }
        )+
    };
}

impl_from_int!(Int => i8, i16, i32, i64);
impl_from_int!(UInt => u8, u16, u32, u64);

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(at: DateTime<Utc>) -> Self {
        Value::Instant(at)
    }
}

impl From<SystemTime> for Value {
    fn from(at: SystemTime) -> Self {
        Value::Instant(at.into())
    }
}

impl From<uuid::Uuid> for Value {
    fn from(id: uuid::Uuid) -> Self {
        Value::Other(id.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::list(items)
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Value {
    fn from(items: &[T]) -> Self {
        Value::list(items.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_is_transparent_for_kind_checks() {
        let ty = TypeTag::optional(TypeTag::String);
        assert!(ty.is_optional());
        assert!(ty.is_string());
        assert_eq!(ty.base(), &TypeTag::String);
        assert!(TypeTag::optional(TypeTag::Timestamp).is_temporal());
    }

    #[test]
    fn type_tag_display() {
        assert_eq!(TypeTag::Timestamp.to_string(), "timestamp");
        assert_eq!(TypeTag::optional(TypeTag::Int32).to_string(), "optional<int32>");
    }

    #[test]
    fn conversions_pick_the_right_variant() {
        assert_eq!(Value::from("a"), Value::String("a".into()));
        assert_eq!(Value::from(3i32), Value::Int(3));
        assert_eq!(Value::from(3u32), Value::UInt(3));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(
            Value::from(vec![1, 2]),
            Value::List(vec![Value::Int(1), Value::Int(2)])
        );
        let id = uuid::Uuid::new_v4();
        assert_eq!(Value::from(id), Value::Other(id.to_string()));
    }

    #[test]
    fn default_text_form() {
        assert_eq!(Value::Float(1.0).to_string(), "1.0");
        assert_eq!(Value::Float(0.25).to_string(), "0.25");
        assert_eq!(Value::from(["a", "b"]).to_string(), "(a, b)");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }

    #[test]
    fn temporal_detection_looks_into_lists() {
        let now = Utc::now();
        assert!(Value::from(now).is_temporal());
        assert!(Value::List(vec![Value::Int(1), Value::Instant(now)]).is_temporal());
        assert!(!Value::from(vec![1, 2]).is_temporal());
    }

    #[test]
    fn accepts_rejects_incompatible_scalars() {
        assert!(TypeTag::Int32.accepts(&Value::Int(1)));
        assert!(!TypeTag::Int32.accepts(&Value::String("1".into())));
        assert!(TypeTag::String.accepts(&Value::Other("x".into())));
        assert!(TypeTag::Timestamp.accepts(&Value::Int(1_717_778_719_746_657)));
        assert!(!TypeTag::Timestamp.accepts(&Value::String("now".into())));
        assert!(!TypeTag::Bool.accepts(&Value::Int(1)));
    }
}
