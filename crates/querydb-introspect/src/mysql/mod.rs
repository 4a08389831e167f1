use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlPool, MySqlPoolOptions};
use sqlx::Connection;

use querydb_core::{
    qualified_name, ConnectionConfig, Dialect, Error, Result, TablePreview,
};

use crate::adapter::Adapter;
use crate::options::IntrospectOptions;
use crate::preview::ensure_known_table;

mod mapper;
mod queries;

/// Adapter for MySQL and MariaDB databases.
#[derive(Debug, Clone)]
pub struct MySqlAdapter {
    pool: MySqlPool,
    connect_options: MySqlConnectOptions,
    opts: IntrospectOptions,
}

impl MySqlAdapter {
    /// Open the shared handle: a single-connection pool whose session is
    /// switched to read-only transactions on connect.
    pub async fn connect(config: &ConnectionConfig, opts: IntrospectOptions) -> Result<Self> {
        let connect_options = connect_options(config);
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(opts.connect_timeout)
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    queries::set_read_only(conn).await?;
                    Ok(())
                })
            })
            .connect_with(connect_options.clone())
            .await
            .map_err(|err| Error::Connection(err.to_string()))?;

        Ok(Self::new(pool, connect_options, opts))
    }

    /// Wrap a pre-configured pool; previews open sessions from `connect_options`.
    pub fn new(
        pool: MySqlPool,
        connect_options: MySqlConnectOptions,
        opts: IntrospectOptions,
    ) -> Self {
        Self {
            pool,
            connect_options,
            opts,
        }
    }
}

pub fn connect_options(config: &ConnectionConfig) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.database)
}

#[async_trait::async_trait]
impl Adapter for MySqlAdapter {
    fn dialect(&self) -> Dialect {
        Dialect::MySql
    }

    async fn list_tables(&self) -> Result<Vec<String>> {
        let tables = queries::list_tables(&self.pool, &self.opts)
            .await
            .map_err(|err| Error::Introspection(err.to_string()))?;
        tracing::info!(event = "tables_listed", count = tables.len());
        Ok(tables)
    }

    async fn preview(&self, table: &str) -> Result<TablePreview> {
        tracing::info!(event = "preview_started", table = %table);

        let connecting = MySqlConnection::connect_with(&self.connect_options);
        let mut conn = tokio::time::timeout(self.opts.connect_timeout, connecting)
            .await
            .map_err(|_| {
                Error::query(
                    table,
                    format!("timed out after {:?} opening a connection", self.opts.connect_timeout),
                )
            })?
            .map_err(|err| Error::query(table, err))?;

        let outcome = preview_on(&mut conn, table, &self.opts).await;

        match conn.close().await {
            Ok(()) => tracing::debug!(event = "connection_closed", table = %table),
            Err(err) => tracing::warn!(event = "connection_close_failed", error = %err),
        }

        if let Ok(preview) = &outcome {
            tracing::info!(event = "preview_finished", table = %table, rows = preview.rows.len());
        }
        outcome
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

async fn preview_on(
    conn: &mut MySqlConnection,
    table: &str,
    opts: &IntrospectOptions,
) -> Result<TablePreview> {
    queries::set_read_only(&mut *conn)
        .await
        .map_err(|err| Error::query(table, err))?;

    let tables = queries::list_tables(&mut *conn, opts)
        .await
        .map_err(|err| Error::query(table, err))?;
    ensure_known_table(&tables, table)?;

    let target = qualified_name(Dialect::MySql, opts.schema.as_deref(), table)?;
    let rows = queries::fetch_preview(&mut *conn, &target)
        .await
        .map_err(|err| Error::query(table, err))?;

    Ok(TablePreview {
        table: table.to_string(),
        rows: rows.iter().map(mapper::map_row).collect(),
    })
}
