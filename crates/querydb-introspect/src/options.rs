use std::time::Duration;

/// Options that control how tables are discovered and sessions opened.
#[derive(Debug, Clone)]
pub struct IntrospectOptions {
    /// Schema (MySQL: database) to inspect. `None` means the session's
    /// current schema.
    pub schema: Option<String>,
    pub include_views: bool,
    /// How long to wait for the shared handle's first connection and for
    /// each preview connection.
    pub connect_timeout: Duration,
}

impl Default for IntrospectOptions {
    fn default() -> Self {
        Self {
            schema: None,
            include_views: false,
            connect_timeout: Duration::from_secs(10),
        }
    }
}
