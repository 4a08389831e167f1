use sqlx::postgres::types::{Oid, PgInterval, PgTimeTz};
use sqlx::postgres::{PgRow, PgTypeInfo, PgTypeKind, PgValueFormat};
use sqlx::types::chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::types::{BigDecimal, JsonValue, Uuid};
use sqlx::{Column, Decode, Postgres, Row as _, Type, TypeInfo, ValueRef};

use querydb_core::{Row, Value};

/// Decode every column of `row`, keeping result-set order.
pub fn map_row(row: &PgRow) -> Row {
    row.columns()
        .iter()
        .map(|column| {
            let value = map_value(row, column.ordinal(), column.type_info());
            (column.name().to_string(), value)
        })
        .collect()
}

fn map_value(row: &PgRow, index: usize, type_info: &PgTypeInfo) -> Value {
    match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(_) => {}
        Err(_) => return Value::Unsupported(type_info.name().to_string()),
    }

    let decoded = match type_info.name() {
        "BOOL" => row.try_get::<bool, _>(index).map(Value::Bool),
        "INT2" => row.try_get::<i16, _>(index).map(|v| Value::Int(v.into())),
        "INT4" => row.try_get::<i32, _>(index).map(|v| Value::Int(v.into())),
        "INT8" => row.try_get::<i64, _>(index).map(Value::Int),
        "\"CHAR\"" => row.try_get::<i8, _>(index).map(|v| Value::Int(v.into())),
        "OID" => row.try_get::<Oid, _>(index).map(|v| Value::UInt(v.0.into())),
        "FLOAT4" => row.try_get::<f32, _>(index).map(|v| Value::Float(v.into())),
        "FLOAT8" => row.try_get::<f64, _>(index).map(Value::Float),
        "NUMERIC" => row
            .try_get::<BigDecimal, _>(index)
            .map(|v| Value::Numeric(v.to_string()))
            .or_else(|err| numeric_special(row, index).map(Value::Numeric).ok_or(err)),
        "TEXT" | "VARCHAR" | "CHAR" | "BPCHAR" | "NAME" | "CITEXT" | "UNKNOWN" => {
            row.try_get::<String, _>(index).map(Value::Text)
        }
        "BYTEA" => row.try_get::<Vec<u8>, _>(index).map(Value::Bytes),
        "UUID" => row.try_get::<Uuid, _>(index).map(|v| Value::Text(v.to_string())),
        "JSON" | "JSONB" => row.try_get::<JsonValue, _>(index).map(Value::Json),
        "DATE" => row.try_get::<NaiveDate, _>(index).map(|v| Value::Text(v.to_string())),
        "TIME" => row.try_get::<NaiveTime, _>(index).map(|v| Value::Text(v.to_string())),
        "TIMETZ" => row
            .try_get::<PgTimeTz<NaiveTime, FixedOffset>, _>(index)
            .map(|v| Value::Text(format_timetz(&v))),
        "TIMESTAMP" => row
            .try_get::<NaiveDateTime, _>(index)
            .map(|v| Value::Text(v.to_string())),
        "TIMESTAMPTZ" => row
            .try_get::<DateTime<Utc>, _>(index)
            .map(|v| Value::Text(v.to_rfc3339())),
        "INTERVAL" => row
            .try_get::<PgInterval, _>(index)
            .map(|v| Value::Text(format_interval(&v))),
        "BOOL[]" => array(row, index, Value::Bool),
        "INT2[]" => array(row, index, |v: i16| Value::Int(v.into())),
        "INT4[]" => array(row, index, |v: i32| Value::Int(v.into())),
        "INT8[]" => array(row, index, Value::Int),
        "FLOAT4[]" => array(row, index, |v: f32| Value::Float(v.into())),
        "FLOAT8[]" => array(row, index, Value::Float),
        "NUMERIC[]" => array(row, index, |v: BigDecimal| Value::Numeric(v.to_string())),
        "TEXT[]" | "VARCHAR[]" | "CHAR[]" | "NAME[]" => array(row, index, Value::Text),
        "UUID[]" => array(row, index, |v: Uuid| Value::Text(v.to_string())),
        "DATE[]" => array(row, index, |v: NaiveDate| Value::Text(v.to_string())),
        "TIMESTAMP[]" => array(row, index, |v: NaiveDateTime| Value::Text(v.to_string())),
        "TIMESTAMPTZ[]" => array(row, index, |v: DateTime<Utc>| Value::Text(v.to_rfc3339())),
        "JSON[]" | "JSONB[]" => array(row, index, Value::Json),
        // Enum labels travel as utf-8 text in both wire formats.
        _ if matches!(type_info.kind(), PgTypeKind::Enum(_)) => {
            row.try_get_unchecked::<String, _>(index).map(Value::Text)
        }
        other => return Value::Unsupported(other.to_string()),
    };

    decoded.unwrap_or_else(|_| Value::Unsupported(type_info.name().to_string()))
}

fn array<T>(row: &PgRow, index: usize, element: impl Fn(T) -> Value) -> Result<Value, sqlx::Error>
where
    Vec<Option<T>>: for<'r> Decode<'r, Postgres> + Type<Postgres>,
{
    let items = row.try_get::<Vec<Option<T>>, _>(index)?;
    Ok(Value::Array(
        items
            .into_iter()
            .map(|item| item.map_or(Value::Null, &element))
            .collect(),
    ))
}

// Binary numeric header: ndigits, weight, sign, dscale. The special values
// live in the sign word and have no `BigDecimal` form.
fn numeric_special(row: &PgRow, index: usize) -> Option<String> {
    let raw = row.try_get_raw(index).ok()?;
    if !matches!(raw.format(), PgValueFormat::Binary) {
        return None;
    }
    let bytes = raw.as_bytes().ok()?;
    let sign = u16::from_be_bytes([*bytes.get(4)?, *bytes.get(5)?]);
    let text = match sign {
        0xC000 => "NaN",
        0xD000 => "Infinity",
        0xF000 => "-Infinity",
        _ => return None,
    };
    Some(text.to_string())
}

/// Server-style interval text: `1 year 2 mons 3 days 04:05:06.5`.
fn format_interval(interval: &PgInterval) -> String {
    let mut parts = Vec::new();
    let years = interval.months / 12;
    let months = interval.months % 12;
    for (amount, unit) in [(years, "year"), (months, "mon"), (interval.days, "day")] {
        match amount {
            0 => {}
            1 => parts.push(format!("{amount} {unit}")),
            _ => parts.push(format!("{amount} {unit}s")),
        }
    }
    if interval.microseconds != 0 || parts.is_empty() {
        parts.push(format_clock(interval.microseconds));
    }
    parts.join(" ")
}

fn format_clock(microseconds: i64) -> String {
    let sign = if microseconds < 0 { "-" } else { "" };
    let total = microseconds.unsigned_abs();
    let seconds = total / 1_000_000;
    let fraction = total % 1_000_000;
    let mut clock = format!(
        "{sign}{:02}:{:02}:{:02}",
        seconds / 3600,
        seconds / 60 % 60,
        seconds % 60
    );
    if fraction != 0 {
        let digits = format!("{fraction:06}");
        clock.push('.');
        clock.push_str(digits.trim_end_matches('0'));
    }
    clock
}

/// Server-style `timetz` text: the offset drops `:00` minutes (`04:05:06+02`).
fn format_timetz(value: &PgTimeTz<NaiveTime, FixedOffset>) -> String {
    let offset = value.offset.local_minus_utc();
    let sign = if offset < 0 { '-' } else { '+' };
    let offset = offset.unsigned_abs();
    let (hours, minutes) = (offset / 3600, offset / 60 % 60);
    let mut text = format!("{}{sign}{hours:02}", value.time);
    if minutes != 0 {
        text.push_str(&format!(":{minutes:02}"));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(months: i32, days: i32, microseconds: i64) -> PgInterval {
        PgInterval {
            months,
            days,
            microseconds,
        }
    }

    #[test]
    fn formats_intervals_like_the_server() {
        assert_eq!(
            format_interval(&interval(14, 3, 14_706_000_000)),
            "1 year 2 mons 3 days 04:05:06"
        );
        assert_eq!(format_interval(&interval(1, 1, 0)), "1 mon 1 day");
        assert_eq!(format_interval(&interval(-12, 0, 0)), "-1 years");
        assert_eq!(format_interval(&interval(0, 0, 0)), "00:00:00");
        assert_eq!(format_interval(&interval(0, 0, 90_500_000)), "00:01:30.5");
        assert_eq!(format_interval(&interval(0, -2, -3_600_000_000)), "-2 days -01:00:00");
        assert_eq!(format_interval(&interval(0, 0, 100 * 3_600_000_000)), "100:00:00");
    }

    #[test]
    fn formats_timetz_offsets() {
        let time = NaiveTime::from_hms_opt(4, 5, 6).unwrap();
        let plus_two = PgTimeTz {
            time,
            offset: FixedOffset::east_opt(2 * 3600).unwrap(),
        };
        assert_eq!(format_timetz(&plus_two), "04:05:06+02");

        let india = PgTimeTz {
            time,
            offset: FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap(),
        };
        assert_eq!(format_timetz(&india), "04:05:06+05:30");

        let west = PgTimeTz {
            time,
            offset: FixedOffset::west_opt(3 * 3600).unwrap(),
        };
        assert_eq!(format_timetz(&west), "04:05:06-03");
    }
}
