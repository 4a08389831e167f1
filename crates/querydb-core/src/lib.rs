//! Core contracts and helpers for querydb.
//!
//! This crate defines the connection configuration, the error taxonomy, the
//! row model returned by previews and the plain-text report format shared by
//! the adapters and the CLI.

pub mod config;
pub mod error;
pub mod ident;
pub mod redaction;
pub mod report;
pub mod row;

pub use config::{ConfigOverrides, ConnectionConfig, Dialect};
pub use error::{Error, Result};
pub use ident::{qualified_name, quote_identifier};
pub use redaction::redact_connection_string;
pub use row::{Row, TablePreview, Value};

/// Maximum number of rows fetched by a table preview.
pub const PREVIEW_LIMIT: i64 = 10;

/// Table previewed when none is given on the command line.
pub const DEFAULT_PREVIEW_TABLE: &str = "usuario";
