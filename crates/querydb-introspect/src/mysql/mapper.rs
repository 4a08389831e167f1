use sqlx::mysql::{MySqlRow, MySqlTypeInfo};
use sqlx::types::chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::types::{BigDecimal, JsonValue};
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

use querydb_core::{Row, Value};

/// Decode every column of `row`, keeping result-set order.
pub fn map_row(row: &MySqlRow) -> Row {
    row.columns()
        .iter()
        .map(|column| {
            let value = map_value(row, column.ordinal(), column.type_info());
            (column.name().to_string(), value)
        })
        .collect()
}

fn map_value(row: &MySqlRow, index: usize, type_info: &MySqlTypeInfo) -> Value {
    match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(_) => {}
        Err(_) => return Value::Unsupported(type_info.name().to_string()),
    }

    let name = type_info.name();
    let decoded = match name {
        "BOOLEAN" => row.try_get::<bool, _>(index).map(Value::Bool),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
            row.try_get::<i64, _>(index).map(Value::Int)
        }
        _ if name.ends_with(" UNSIGNED") || name == "BIT" => {
            row.try_get::<u64, _>(index).map(Value::UInt)
        }
        "FLOAT" => row.try_get::<f32, _>(index).map(|v| Value::Float(v.into())),
        "DOUBLE" => row.try_get::<f64, _>(index).map(Value::Float),
        "DECIMAL" => row
            .try_get::<BigDecimal, _>(index)
            .map(|v| Value::Numeric(v.to_string())),
        "CHAR" | "VARCHAR" | "TINYTEXT" | "TEXT" | "MEDIUMTEXT" | "LONGTEXT" | "ENUM" | "SET" => {
            row.try_get::<String, _>(index).map(Value::Text)
        }
        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
            row.try_get::<Vec<u8>, _>(index).map(Value::Bytes)
        }
        "DATE" => row.try_get::<NaiveDate, _>(index).map(|v| Value::Text(v.to_string())),
        "TIME" => row.try_get::<NaiveTime, _>(index).map(|v| Value::Text(v.to_string())),
        "DATETIME" => row
            .try_get::<NaiveDateTime, _>(index)
            .map(|v| Value::Text(v.to_string())),
        "TIMESTAMP" => row
            .try_get::<DateTime<Utc>, _>(index)
            .map(|v| Value::Text(v.to_rfc3339())),
        "JSON" => row.try_get::<JsonValue, _>(index).map(Value::Json),
        _ => return map_fallback(row, index, name),
    };

    decoded.unwrap_or_else(|_| Value::Unsupported(name.to_string()))
}

// Types without a dedicated arm (YEAR, GEOMETRY, ...) get the most common
// representations tried in turn.
fn map_fallback(row: &MySqlRow, index: usize, name: &str) -> Value {
    if let Ok(v) = row.try_get::<String, _>(index) {
        return Value::Text(v);
    }
    if let Ok(v) = row.try_get::<i64, _>(index) {
        return Value::Int(v);
    }
    if let Ok(v) = row.try_get::<u64, _>(index) {
        return Value::UInt(v);
    }
    if let Ok(v) = row.try_get::<f64, _>(index) {
        return Value::Float(v);
    }
    Value::Unsupported(name.to_string())
}
