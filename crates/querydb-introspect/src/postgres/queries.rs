use sqlx::postgres::PgRow;
use sqlx::PgExecutor;

use querydb_core::PREVIEW_LIMIT;

use crate::options::IntrospectOptions;

// Ordinary and partitioned tables, plus views and materialized views on
// request. Object id order approximates creation order.
const LIST_TABLES: &str = r#"
    select c.relname
    from pg_class c
    join pg_namespace n on n.oid = c.relnamespace
    where n.nspname = coalesce($1::text, current_schema())
      and (c.relkind in ('r', 'p') or ($2 and c.relkind in ('v', 'm')))
    order by c.oid
"#;

pub async fn list_tables<'e, E>(
    executor: E,
    opts: &IntrospectOptions,
) -> Result<Vec<String>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, String>(LIST_TABLES)
        .bind(opts.schema.as_deref())
        .bind(opts.include_views)
        .fetch_all(executor)
        .await
}

/// The schema `LIST_TABLES` falls back to; `None` when the search path is
/// empty.
pub async fn current_schema<'e, E>(executor: E) -> Result<Option<String>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, Option<String>>("select current_schema()::text")
        .fetch_one(executor)
        .await
}

/// `target` must already be a quoted identifier.
pub async fn fetch_preview<'e, E>(executor: E, target: &str) -> Result<Vec<PgRow>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let sql = format!("select * from {target} limit $1");
    sqlx::query(&sql)
        .bind(PREVIEW_LIMIT)
        .fetch_all(executor)
        .await
}
