//! Plain-text rendering of table listings and previews.

use std::io::Write;

use crate::error::{Error, Result};
use crate::row::TablePreview;

pub const TABLES_HEADER: &str = "Tables in the database:";

/// Write the table listing: a header, then one `- name` line per table.
pub fn write_tables<W: Write>(out: &mut W, tables: &[String]) -> Result<()> {
    writeln!(out, "{TABLES_HEADER}")?;
    for table in tables {
        writeln!(out, "- {table}")?;
    }
    Ok(())
}

/// Write a preview: a blank line, a header naming the table, then one
/// mapping per row.
pub fn write_preview<W: Write>(out: &mut W, preview: &TablePreview) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Content of table '{}':", preview.table)?;
    for row in &preview.rows {
        writeln!(out, "{row}")?;
    }
    Ok(())
}

/// Write a recovered preview failure as a single line.
pub fn write_query_error<W: Write>(out: &mut W, err: &Error) -> Result<()> {
    writeln!(out, "{err}")?;
    Ok(())
}
