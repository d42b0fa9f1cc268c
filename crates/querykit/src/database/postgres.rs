use super::Database;
use crate::config::DatabaseConfig;
use crate::error::{QueryKitError, QueryKitResult};
use crate::sql::{StatementKind, rewrite_placeholders, truncate_sql};
use tokio::sync::RwLock;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, NoTls, Row};

/// A [`Database`] backed by a single `tokio-postgres` connection.
///
/// `?` placeholders in the statement text are rewritten to `$1, $2, ...`
/// before the driver sees them; numbered placeholders pass through unchanged.
///
/// # Example
///
/// ```ignore
/// let db = PgDatabase::new(DatabaseConfig::from_env()?);
/// db.connect().await?;
/// let rows = db.execute_query("SELECT * FROM users WHERE id = ?", &[&1_i64]).await?;
/// db.disconnect().await?;
/// ```
pub struct PgDatabase {
    config: DatabaseConfig,
    client: RwLock<Option<Client>>,
}

impl PgDatabase {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            client: RwLock::new(None),
        }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self::new(DatabaseConfig::new(url))
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    fn log_lifecycle(&self, message: &str) {
        if self.config.verbose {
            tracing::info!(target: "querykit.db", "{}", message);
        } else {
            tracing::debug!(target: "querykit.db", "{}", message);
        }
    }
}

impl std::fmt::Debug for PgDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The url may carry a password.
        f.debug_struct("PgDatabase")
            .field("verbose", &self.config.verbose)
            .finish_non_exhaustive()
    }
}

impl Database for PgDatabase {
    type Row = Row;

    async fn connect(&self) -> QueryKitResult<()> {
        let mut guard = self.client.write().await;
        if guard.is_some() {
            return Ok(());
        }

        let (client, connection) = tokio_postgres::connect(&self.config.url, NoTls)
            .await
            .map_err(|e| QueryKitError::connection(e.to_string()))?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::warn!(target: "querykit.db", error = %e, "postgres connection closed with error");
            }
        });

        *guard = Some(client);
        self.log_lifecycle("connected to postgres");
        Ok(())
    }

    async fn execute_query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> QueryKitResult<Option<Vec<Row>>> {
        let guard = self.client.read().await;
        let client = guard
            .as_ref()
            .ok_or_else(|| QueryKitError::connection("database connection not established"))?;

        let (sql, placeholders) = rewrite_placeholders(sql);
        let kind = StatementKind::from_sql(&sql);
        tracing::trace!(
            target: "querykit.db",
            kind = %kind,
            placeholders,
            param_count = params.len(),
            sql = %truncate_sql(&sql, self.config.max_sql_log_length),
        );

        if kind.is_read() {
            let rows = client.query(sql.as_str(), params).await?;
            Ok(Some(rows))
        } else {
            client.execute(sql.as_str(), params).await?;
            Ok(None)
        }
    }

    async fn disconnect(&self) -> QueryKitResult<()> {
        // Dropping the client ends the spawned connection task.
        if self.client.write().await.take().is_some() {
            self.log_lifecycle("disconnected from postgres");
        }
        Ok(())
    }

    async fn is_connected(&self) -> bool {
        self.client.read().await.is_some()
    }
}
