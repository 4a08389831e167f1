use sqlx::mysql::MySqlRow;
use sqlx::MySqlExecutor;

use querydb_core::PREVIEW_LIMIT;

use crate::options::IntrospectOptions;

// information_schema columns may come back with a binary collation; the cast
// keeps them decodable as text.
const LIST_TABLES: &str = r#"
    select cast(table_name as char)
    from information_schema.tables
    where table_schema = coalesce(?, database())
      and (table_type = 'BASE TABLE' or (? and table_type = 'VIEW'))
    order by create_time, table_name
"#;

pub async fn set_read_only<'e, E>(executor: E) -> Result<(), sqlx::Error>
where
    E: MySqlExecutor<'e>,
{
    sqlx::query("set session transaction read only")
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn list_tables<'e, E>(
    executor: E,
    opts: &IntrospectOptions,
) -> Result<Vec<String>, sqlx::Error>
where
    E: MySqlExecutor<'e>,
{
    sqlx::query_scalar::<_, String>(LIST_TABLES)
        .bind(opts.schema.as_deref())
        .bind(opts.include_views)
        .fetch_all(executor)
        .await
}

/// `target` must already be a quoted identifier.
pub async fn fetch_preview<'e, E>(executor: E, target: &str) -> Result<Vec<MySqlRow>, sqlx::Error>
where
    E: MySqlExecutor<'e>,
{
    let sql = format!("select * from {target} limit ?");
    sqlx::query(&sql)
        .bind(PREVIEW_LIMIT)
        .fetch_all(executor)
        .await
}
