//! Row mapping traits and utilities

use crate::error::{QueryError, QueryResult};
use crate::literal::{instant_from_micros, instant_from_seconds};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// A row as a map from column name to value.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// Converts entities to and from rows.
///
/// Used by [`ModifyRowsRequest`](crate::modify::ModifyRowsRequest) to turn entities
/// into rows, and by callers to decode rows returned for a query.
pub trait RowMapper<T> {
    /// Entity to row. Absent optional columns may be left out.
    fn to_fields(&self, entity: &T) -> QueryResult<Fields>;

    /// Row to entity.
    fn from_fields(&self, fields: Fields) -> QueryResult<T>;

    /// Decode a batch of rows.
    fn map_rows<I>(&self, rows: I) -> QueryResult<Vec<T>>
    where
        I: IntoIterator<Item = Fields>,
    {
        rows.into_iter().map(|row| self.from_fields(row)).collect()
    }
}

/// Mapper backed by the entity's `Serialize`/`Deserialize` impls.
///
/// The entity must serialize to a JSON object. Temporal columns are stored as
/// integers, so instants need an integer representation, e.g.
/// `#[serde(with = "chrono::serde::ts_microseconds")]` for `timestamp` columns.
#[derive(Debug)]
pub struct SerdeMapper<T> {
    _entity: PhantomData<fn() -> T>,
}

impl<T> SerdeMapper<T> {
    pub fn new() -> Self {
        Self {
            _entity: PhantomData,
        }
    }
}

impl<T> Default for SerdeMapper<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SerdeMapper<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> Copy for SerdeMapper<T> {}

impl<T> RowMapper<T> for SerdeMapper<T>
where
    T: Serialize + DeserializeOwned,
{
    fn to_fields(&self, entity: &T) -> QueryResult<Fields> {
        match serde_json::to_value(entity)? {
            serde_json::Value::Object(fields) => Ok(fields),
            other => Err(QueryError::Serialization(format!(
                "entity must serialize to an object, got {other}"
            ))),
        }
    }

    fn from_fields(&self, fields: Fields) -> QueryResult<T> {
        Ok(serde_json::from_value(serde_json::Value::Object(fields))?)
    }
}

/// Mapper for tables whose rows are never turned into entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMapper;

impl RowMapper<()> for NoMapper {
    fn to_fields(&self, _entity: &()) -> QueryResult<Fields> {
        Ok(Fields::new())
    }

    fn from_fields(&self, _fields: Fields) -> QueryResult<()> {
        Ok(())
    }
}

/// Typed accessors for row fields.
pub trait FieldsExt {
    /// Read a `timestamp` column (microseconds). `None` when absent or null.
    fn instant_micros(&self, column: &str) -> QueryResult<Option<DateTime<Utc>>>;

    /// Read a `datetime` column (seconds). `None` when absent or null.
    fn instant_seconds(&self, column: &str) -> QueryResult<Option<DateTime<Utc>>>;
}

impl FieldsExt for Fields {
    fn instant_micros(&self, column: &str) -> QueryResult<Option<DateTime<Utc>>> {
        integer_field(self, column)?
            .map(instant_from_micros)
            .transpose()
    }

    fn instant_seconds(&self, column: &str) -> QueryResult<Option<DateTime<Utc>>> {
        integer_field(self, column)?
            .map(instant_from_seconds)
            .transpose()
    }
}

fn integer_field(fields: &Fields, column: &str) -> QueryResult<Option<i64>> {
    match fields.get(column) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => value.as_i64().map(Some).ok_or_else(|| {
            QueryError::type_mismatch(column, format!("expected integer, got {value}"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::to_epoch_micros;
    use chrono::TimeZone;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Consumer {
        queue_path: String,
        partition_index: i64,
        offset: Option<i64>,
        #[serde(with = "chrono::serde::ts_microseconds")]
        updated_on: DateTime<Utc>,
    }

    fn consumer() -> Consumer {
        Consumer {
            queue_path: "//home/queue".into(),
            partition_index: 3,
            offset: None,
            updated_on: Utc.timestamp_opt(1_717_778_719, 746_657_000).unwrap(),
        }
    }

    #[test]
    fn serde_mapper_round_trip() {
        let mapper = SerdeMapper::<Consumer>::new();
        let fields = mapper.to_fields(&consumer()).unwrap();
        assert_eq!(fields["queue_path"], json!("//home/queue"));
        assert_eq!(fields["offset"], serde_json::Value::Null);
        assert_eq!(fields["updated_on"], json!(1_717_778_719_746_657i64));

        let back = mapper.from_fields(fields).unwrap();
        assert_eq!(back, consumer());
    }

    #[test]
    fn serde_mapper_rejects_non_objects() {
        let mapper = SerdeMapper::<i64>::new();
        let err = mapper.to_fields(&5).unwrap_err();
        assert!(matches!(err, QueryError::Serialization(_)));
    }

    #[test]
    fn map_rows_stops_on_first_bad_row() {
        let mapper = SerdeMapper::<Consumer>::new();
        let good = mapper.to_fields(&consumer()).unwrap();
        let mut bad = good.clone();
        bad.remove("queue_path");

        assert_eq!(mapper.map_rows(vec![good.clone(), good.clone()]).unwrap().len(), 2);
        assert!(mapper.map_rows(vec![good, bad]).is_err());
    }

    #[test]
    fn no_mapper_is_empty() {
        assert!(NoMapper.to_fields(&()).unwrap().is_empty());
        NoMapper.from_fields(Fields::new()).unwrap();
    }

    #[test]
    fn instant_accessors() {
        let at = Utc.timestamp_opt(1_717_778_719, 0).unwrap();
        let mut row = Fields::new();
        row.insert("created_on".into(), json!(to_epoch_micros(&at)));
        row.insert("receipt_date".into(), json!(1_717_778_719));
        row.insert("closed_on".into(), serde_json::Value::Null);
        row.insert("status".into(), json!("NEW"));

        assert_eq!(row.instant_micros("created_on").unwrap(), Some(at));
        assert_eq!(row.instant_seconds("receipt_date").unwrap(), Some(at));
        assert_eq!(row.instant_micros("closed_on").unwrap(), None);
        assert_eq!(row.instant_micros("missing").unwrap(), None);
        assert!(row.instant_micros("status").is_err());
    }
}
