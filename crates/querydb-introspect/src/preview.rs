//! Print-or-recover drivers over an [`Adapter`].

use std::io::Write;

use querydb_core::report::{write_preview, write_query_error, write_tables};
use querydb_core::{Error, Result, TablePreview};

use crate::adapter::Adapter;

/// Reject `table` unless introspection returned it. Only names that pass are
/// ever spliced into preview SQL.
pub fn ensure_known_table(tables: &[String], table: &str) -> Result<()> {
    if tables.iter().any(|known| known == table) {
        Ok(())
    } else {
        Err(Error::query(table, "table does not exist in the inspected schema"))
    }
}

/// List the tables and print them. Errors propagate.
pub async fn show_tables<W: Write>(adapter: &dyn Adapter, out: &mut W) -> Result<Vec<String>> {
    let tables = adapter.list_tables().await?;
    write_tables(out, &tables)?;
    Ok(tables)
}

/// Preview `table` and print the rows.
///
/// A query failure is printed as a single line and yields `Ok(None)`; every
/// other error kind propagates.
pub async fn show_preview<W: Write>(
    adapter: &dyn Adapter,
    table: &str,
    out: &mut W,
) -> Result<Option<TablePreview>> {
    match adapter.preview(table).await {
        Ok(preview) => {
            write_preview(out, &preview)?;
            Ok(Some(preview))
        }
        Err(err) if err.is_recoverable() => {
            tracing::warn!(
                event = "preview_failed",
                dialect = %adapter.dialect(),
                table = %table,
                error = %err
            );
            write_query_error(out, &err)?;
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
