//! Condition parameters: a value plus an optional declared type.

use crate::value::{TypeTag, Value};
use chrono::{DateTime, Utc};
use std::time::SystemTime;

/// A condition value together with the type it is compared as.
///
/// Most callers never build one directly: anything implementing [`IntoParam`] can be
/// passed to the `where_*`/`having_*` methods. Use [`typed`] when the literal form
/// depends on the column type, e.g. for instants:
///
/// ```ignore
/// qb.where_greater("created_on", typed(Utc::now(), TypeTag::Timestamp))?
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub(crate) value: Value,
    pub(crate) declared: Option<TypeTag>,
}

impl Param {
    /// An untyped parameter.
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            declared: None,
        }
    }

    /// A parameter with a declared type.
    pub fn typed(value: impl Into<Value>, declared: TypeTag) -> Self {
        Self {
            value: value.into(),
            declared: Some(declared),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn declared_type(&self) -> Option<&TypeTag> {
        self.declared.as_ref()
    }
}

/// Shorthand for [`Param::typed`].
pub fn typed(value: impl Into<Value>, declared: TypeTag) -> Param {
    Param::typed(value, declared)
}

/// Conversion into a condition parameter.
pub trait IntoParam {
    fn into_param(self) -> Param;
}

impl IntoParam for Param {
    fn into_param(self) -> Param {
        self
    }
}

impl IntoParam for Value {
    fn into_param(self) -> Param {
        Param::new(self)
    }
}

macro_rules! impl_into_param {
    ($($t:ty),+ $(,)?) => {
        $(
            impl IntoParam for $t {
                fn into_param(self) -> Param {
                    Param::new(self)
                }
            }
        )+
    };
}

impl_into_param!(
    &str,
    String,
    &String,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    bool,
    DateTime<Utc>,
    SystemTime,
    uuid::Uuid,
);

impl<T: Into<Value>> IntoParam for Vec<T> {
    fn into_param(self) -> Param {
        Param::new(self)
    }
}

impl<T: Into<Value>, const N: usize> IntoParam for [T; N] {
    fn into_param(self) -> Param {
        Param::new(self)
    }
}

impl<T: Into<Value> + Clone> IntoParam for &[T] {
    fn into_param(self) -> Param {
        Param::new(self)
    }
}
