//! Database connectors plus the table listing and row preview operations.

pub mod adapter;
pub mod mysql;
pub mod options;
pub mod postgres;
pub mod preview;

pub use adapter::{connect, Adapter};
pub use mysql::MySqlAdapter;
pub use options::IntrospectOptions;
pub use postgres::PostgresAdapter;
pub use preview::{ensure_known_table, show_preview, show_tables};
