use async_trait::async_trait;

use querydb_core::{ConnectionConfig, Dialect, Result, TablePreview};

use crate::mysql::MySqlAdapter;
use crate::options::IntrospectOptions;
use crate::postgres::PostgresAdapter;

/// An open handle to one database, shared by the listing and preview
/// operations.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Dialect of the connected server, as reported in logs.
    fn dialect(&self) -> Dialect;

    /// Names of the tables in the inspected schema, in catalog order.
    ///
    /// Failures are [`querydb_core::Error::Introspection`].
    async fn list_tables(&self) -> Result<Vec<String>>;

    /// Fetch at most [`querydb_core::PREVIEW_LIMIT`] rows of `table` over a
    /// dedicated connection that is closed before returning.
    ///
    /// Failures are [`querydb_core::Error::Query`].
    async fn preview(&self, table: &str) -> Result<TablePreview>;

    /// Close the shared handle.
    async fn close(&self);
}

/// Open the shared handle for `config`. Any failure is
/// [`querydb_core::Error::Connection`].
pub async fn connect(
    config: &ConnectionConfig,
    opts: IntrospectOptions,
) -> Result<Box<dyn Adapter>> {
    let adapter: Box<dyn Adapter> = match config.dialect {
        Dialect::Postgres => Box::new(PostgresAdapter::connect(config, opts).await?),
        Dialect::MySql => Box::new(MySqlAdapter::connect(config, opts).await?),
    };

    tracing::info!(
        event = "connected",
        dialect = %adapter.dialect(),
        url = %config.redacted_url()
    );

    Ok(adapter)
}
