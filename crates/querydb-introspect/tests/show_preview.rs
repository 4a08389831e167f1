use anyhow::Result;
use async_trait::async_trait;
use querydb_core::{Dialect, Error, Row, TablePreview, Value, PREVIEW_LIMIT};
use querydb_introspect::{ensure_known_table, show_preview, show_tables, Adapter};

/// In-memory stand-in for a database. Connection release is covered by the
/// live-database tests.
struct FakeAdapter {
    tables: Vec<(String, Vec<Row>)>,
    fail_listing: bool,
}

impl FakeAdapter {
    fn new(tables: Vec<(&str, Vec<Row>)>) -> Self {
        Self {
            tables: tables
                .into_iter()
                .map(|(name, rows)| (name.to_string(), rows))
                .collect(),
            fail_listing: false,
        }
    }

    fn names(&self) -> Vec<String> {
        self.tables.iter().map(|(name, _)| name.clone()).collect()
    }
}

#[async_trait]
impl Adapter for FakeAdapter {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    async fn list_tables(&self) -> querydb_core::Result<Vec<String>> {
        if self.fail_listing {
            return Err(Error::Introspection("permission denied for pg_class".to_string()));
        }
        Ok(self.names())
    }

    async fn preview(&self, table: &str) -> querydb_core::Result<TablePreview> {
        ensure_known_table(&self.names(), table).map(|()| {
            let rows: Vec<Row> = self
                .tables
                .iter()
                .find(|(name, _)| name == table)
                .map(|(_, rows)| rows.iter().take(PREVIEW_LIMIT as usize).cloned().collect())
                .unwrap_or_default();
            TablePreview {
                table: table.to_string(),
                rows,
            }
        })
    }

    async fn close(&self) {}
}

fn person(id: i64, name: &str) -> Row {
    let mut row = Row::new();
    row.push("id", Value::Int(id));
    row.push("name", Value::Text(name.to_string()));
    row
}

fn numbered(count: i64) -> Vec<Row> {
    (1..=count)
        .map(|id| {
            let mut row = Row::new();
            row.push("id", Value::Int(id));
            row
        })
        .collect()
}

fn scenario() -> FakeAdapter {
    FakeAdapter::new(vec![
        ("usuario", vec![person(1, "Ana"), person(2, "Luis")]),
        ("pedido", Vec::new()),
    ])
}

#[tokio::test]
async fn prints_listing_and_preview() -> Result<()> {
    let adapter = scenario();
    let mut out = Vec::new();

    let tables = show_tables(&adapter, &mut out).await?;
    let preview = show_preview(&adapter, "usuario", &mut out).await?;

    assert_eq!(tables, vec!["usuario", "pedido"]);
    assert_eq!(preview.map(|p| p.rows.len()), Some(2));
    assert_eq!(
        String::from_utf8(out)?,
        "Tables in the database:\n\
         - usuario\n\
         - pedido\n\
         \n\
         Content of table 'usuario':\n\
         {'id': 1, 'name': 'Ana'}\n\
         {'id': 2, 'name': 'Luis'}\n"
    );
    Ok(())
}

#[tokio::test]
async fn unknown_table_is_reported_not_raised() -> Result<()> {
    let adapter = scenario();
    let mut out = Vec::new();

    let preview = show_preview(&adapter, "does_not_exist", &mut out).await?;

    assert!(preview.is_none());
    let text = String::from_utf8(out)?;
    assert!(text.starts_with("Error querying table 'does_not_exist': "));
    assert_eq!(text.lines().count(), 1);
    Ok(())
}

#[tokio::test]
async fn empty_table_prints_only_header() -> Result<()> {
    let adapter = scenario();
    let mut out = Vec::new();

    let preview = show_preview(&adapter, "pedido", &mut out).await?;

    assert_eq!(preview.map(|p| p.rows.len()), Some(0));
    assert_eq!(String::from_utf8(out)?, "\nContent of table 'pedido':\n");
    Ok(())
}

#[tokio::test]
async fn preview_is_bounded() -> Result<()> {
    let adapter = FakeAdapter::new(vec![("many", numbered(25)), ("few", numbered(3))]);
    let mut out = Vec::new();

    let many = show_preview(&adapter, "many", &mut out).await?;
    let few = show_preview(&adapter, "few", &mut out).await?;

    assert_eq!(many.map(|p| p.rows.len()), Some(10));
    assert_eq!(few.map(|p| p.rows.len()), Some(3));
    Ok(())
}

#[tokio::test]
async fn listing_failure_propagates() {
    let mut adapter = scenario();
    adapter.fail_listing = true;
    let mut out = Vec::new();

    let err = show_tables(&adapter, &mut out).await.unwrap_err();

    assert!(matches!(err, Error::Introspection(_)));
    assert!(out.is_empty());
}
