use crate::config::Dialect;
use crate::error::{Error, Result};

/// Quote `name` as a single SQL identifier for `dialect`.
///
/// PostgreSQL uses double quotes and MySQL backticks; an embedded quote
/// character is doubled. Empty names and names containing NUL are rejected.
pub fn quote_identifier(dialect: Dialect, name: &str) -> Result<String> {
    if name.is_empty() {
        return Err(Error::query(name, "table name is empty"));
    }
    if name.contains('\0') {
        return Err(Error::query(name, "table name contains a NUL character"));
    }

    let quote = match dialect {
        Dialect::Postgres => '"',
        Dialect::MySql => '`',
    };

    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push(quote);
    for ch in name.chars() {
        if ch == quote {
            quoted.push(quote);
        }
        quoted.push(ch);
    }
    quoted.push(quote);
    Ok(quoted)
}

/// Quote `table`, qualified by `schema` when one is given.
pub fn qualified_name(dialect: Dialect, schema: Option<&str>, table: &str) -> Result<String> {
    let table_ident = quote_identifier(dialect, table)?;
    match schema {
        Some(schema) => {
            let schema_ident =
                quote_identifier(dialect, schema).map_err(|_| Error::query(table, "invalid schema name"))?;
            Ok(format!("{schema_ident}.{table_ident}"))
        }
        None => Ok(table_ident),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_postgres_identifiers() {
        assert_eq!(quote_identifier(Dialect::Postgres, "usuario").unwrap(), "\"usuario\"");
        assert_eq!(
            quote_identifier(Dialect::Postgres, "we\"ird").unwrap(),
            "\"we\"\"ird\""
        );
    }

    #[test]
    fn quotes_mysql_identifiers() {
        assert_eq!(quote_identifier(Dialect::MySql, "pedido").unwrap(), "`pedido`");
        assert_eq!(quote_identifier(Dialect::MySql, "a`b").unwrap(), "`a``b`");
    }

    #[test]
    fn injection_attempt_stays_one_identifier() {
        let quoted =
            quote_identifier(Dialect::Postgres, "usuario; drop table pedido; --").unwrap();
        assert_eq!(quoted, "\"usuario; drop table pedido; --\"");
    }

    #[test]
    fn rejects_empty_and_nul() {
        assert!(quote_identifier(Dialect::Postgres, "").is_err());
        assert!(quote_identifier(Dialect::MySql, "a\0b").is_err());
    }

    #[test]
    fn qualifies_with_schema() {
        assert_eq!(
            qualified_name(Dialect::Postgres, Some("app"), "users").unwrap(),
            "\"app\".\"users\""
        );
        assert_eq!(
            qualified_name(Dialect::MySql, Some("shop"), "orders").unwrap(),
            "`shop`.`orders`"
        );
        assert_eq!(qualified_name(Dialect::MySql, None, "orders").unwrap(), "`orders`");
    }
}
