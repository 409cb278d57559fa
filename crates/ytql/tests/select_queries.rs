use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use ytql::prelude::*;
use ytql::{FieldsExt, RowModification};

fn documents() -> Table {
    Table::new(
        "//home/docs/document",
        TableSchema::new()
            .unique_keys(true)
            .with_key_column("document_id", TypeTag::String)
            .with_column("index", TypeTag::Int32)
            .with_column("property_name", TypeTag::String)
            .with_column("created_on", TypeTag::Timestamp)
            .with_column("signed_at", TypeTag::optional(TypeTag::Datetime))
            .with_column("code", TypeTag::optional(TypeTag::String))
            .with_column("status", TypeTag::String),
    )
    .unwrap()
}

fn codes() -> Table {
    Table::new(
        "//home/codes/code",
        TableSchema::new()
            .with_key_column("code", TypeTag::String)
            .with_column("kind", TypeTag::String),
    )
    .unwrap()
}

fn since() -> DateTime<Utc> {
    Utc.timestamp_opt(1_717_778_719, 746_657_999).unwrap()
}

#[test]
fn single_table_query_renders_every_clause_in_order() -> QueryResult<()> {
    let t = documents();
    let request = qb::select(&t)
        .where_eq("document_id", "abc")?
        .where_not("index", 3)?
        .where_greater("created_on", typed(since(), TypeTag::Timestamp))?
        .where_less_or_equal("signed_at", typed(since(), TypeTag::optional(TypeTag::Datetime)))?
        .where_in("property_name", ["pg", "pid", "rid"])?
        .where_not_null("code")?
        .order_by(&[("document_id", OrderDirection::Asc)])
        .limit(10)
        .build();

    assert_eq!(
        request.query(),
        "* FROM [//home/docs/document] WHERE document_id = \"abc\" AND index != 3 \
         AND created_on > 1717778719746657 AND signed_at <= 1717778719 \
         AND code IS NOT NULL AND property_name IN (\"pg\", \"pid\", \"rid\") \
         ORDER BY document_id ASC LIMIT 10"
    );
    assert_eq!(request.table(), "//home/docs/document");
    Ok(())
}

#[test]
fn grouped_query_with_having() -> QueryResult<()> {
    let t = documents();
    let request = qb::select(&t)
        .select([qb::count("status_count"), qb::column(&["status"])])
        .where_greater_or_equal("index", 0)?
        .group_by(&["status"])?
        .having_in("status", ["CREATED", "IN_PROCESSING"])?
        .build();

    assert_eq!(
        request.query(),
        "SUM(1) AS status_count, status FROM [//home/docs/document] WHERE index >= 0 \
         GROUP BY status HAVING status IN (\"CREATED\", \"IN_PROCESSING\")"
    );
    Ok(())
}

#[test]
fn join_query_qualifies_columns() -> QueryResult<()> {
    let docs = documents();
    let codes = codes();
    let request = qb::select_join(&docs)
        .select(&[docs.columns(&["document_id", "status"]), codes.column("kind")])
        .left_join(&codes)
        .using(&["code"])?
        .where_eq(&codes.column("kind"), "KM")?
        .order_by(&[(docs.column("document_id"), OrderDirection::Desc)])?
        .limit(20)
        .build();

    assert_eq!(
        request.query(),
        "document.document_id, document.status, code.kind FROM [//home/docs/document] AS document \
         LEFT JOIN [//home/codes/code] AS code ON (document.code) = (code.code) \
         WHERE code.kind = \"KM\" ORDER BY document.document_id DESC LIMIT 20"
    );
    Ok(())
}

#[test]
fn contract_violations_fail_at_the_offending_call() {
    let t = documents();

    let err = qb::select(&t).where_in("status", Vec::<&str>::new()).unwrap_err();
    assert_eq!(err.to_string(), "Empty IN list for column 'status'");

    let err = qb::select(&t).where_eq("created_on", since()).unwrap_err();
    assert!(err.is_missing_type());

    assert!(Table::new("//home/docs/", TableSchema::new()).is_err());
}

#[test]
fn options_travel_with_the_request() -> QueryResult<()> {
    let t = documents();
    let options = QueryOptions::new()
        .timeout(Duration::from_secs(10))
        .output_row_limit(1_000)
        .allow_join_without_index(true);
    let request = qb::select(&t)
        .select_columns(&["document_id"])
        .with_options(options.clone())
        .build();

    assert_eq!(request.options(), &options);
    assert!(request.options().fail_on_incomplete_result);

    let json = serde_json::to_string(&request)?;
    let back: QueryRequest = serde_json::from_str(&json)?;
    assert_eq!(back, request);
    assert_eq!(back.to_string(), "document_id FROM [//home/docs/document]");
    Ok(())
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Document {
    document_id: String,
    index: i32,
    property_name: String,
    #[serde(with = "chrono::serde::ts_microseconds")]
    created_on: DateTime<Utc>,
    status: String,
}

#[test]
fn entities_round_trip_through_modify_requests() -> QueryResult<()> {
    let t = documents();
    let mapper = SerdeMapper::<Document>::new();
    let doc = Document {
        document_id: "abc".into(),
        index: 1,
        property_name: "pg".into(),
        created_on: Utc.timestamp_opt(1_717_778_719, 0).unwrap(),
        status: "NEW".into(),
    };

    let request = ModifyRowsRequest::new(&t)
        .insert(&mapper, std::slice::from_ref(&doc))?
        .delete_keys([vec![serde_json::json!("old")]])?;

    assert_eq!(request.len(), 2);
    let inserted = &request.rows()[0];
    assert_eq!(inserted.kind, RowModification::Insert);
    assert_eq!(inserted.fields["signed_at"], serde_json::Value::Null);
    assert_eq!(
        inserted.fields.instant_micros("created_on")?,
        Some(doc.created_on)
    );

    let mut row = inserted.fields.clone();
    row.remove("signed_at");
    row.remove("code");
    assert_eq!(mapper.from_fields(row)?, doc);
    Ok(())
}
