use super::{ExecutionStrategy, log_sql};
use crate::config::DEFAULT_MAX_SQL_LOG_LENGTH;
use crate::database::Database;
use crate::error::QueryKitResult;
use crate::statement::Statement;
use tokio_postgres::types::ToSql;

/// Dispatches to a database that the caller has already connected.
///
/// Connection lifecycle stays with the caller; use [`ScopedDbExecution`] to
/// open and close a connection around each statement.
#[derive(Debug, Clone)]
pub struct DbExecution<D> {
    database: D,
    max_sql_log_length: Option<usize>,
}

impl<D: Database> DbExecution<D> {
    pub fn new(database: D) -> Self {
        Self {
            database,
            max_sql_log_length: Some(DEFAULT_MAX_SQL_LOG_LENGTH),
        }
    }

    /// Truncate logged SQL to `len` bytes.
    pub fn max_sql_log_length(mut self, len: usize) -> Self {
        self.max_sql_log_length = Some(len);
        self
    }

    pub fn database(&self) -> &D {
        &self.database
    }

    pub fn into_database(self) -> D {
        self.database
    }
}

impl<D: Database> ExecutionStrategy for DbExecution<D> {
    type Output = Option<Vec<D::Row>>;

    async fn execute(
        &self,
        statement: &Statement,
        params: &[&(dyn ToSql + Sync)],
    ) -> QueryKitResult<Self::Output> {
        let sql = statement.render()?;
        log_sql(statement, &sql, params.len(), self.max_sql_log_length);
        self.database.execute_query(&sql, params).await
    }
}

/// Connects, executes and disconnects, on success and on failure.
///
/// Rendering happens before connecting, so an invalid statement never opens
/// a connection. If both the statement and the disconnect fail, the statement
/// error is returned and the disconnect error is logged.
///
/// Only a connection opened by this strategy is closed: when
/// [`Database::is_connected`] reports an open connection beforehand, the
/// statement runs on it and the connection is left open for the caller.
#[derive(Debug, Clone)]
pub struct ScopedDbExecution<D> {
    database: D,
    max_sql_log_length: Option<usize>,
}

impl<D: Database> ScopedDbExecution<D> {
    pub fn new(database: D) -> Self {
        Self {
            database,
            max_sql_log_length: Some(DEFAULT_MAX_SQL_LOG_LENGTH),
        }
    }

    pub fn max_sql_log_length(mut self, len: usize) -> Self {
        self.max_sql_log_length = Some(len);
        self
    }

    pub fn database(&self) -> &D {
        &self.database
    }
}

impl<D: Database> ExecutionStrategy for ScopedDbExecution<D> {
    type Output = Option<Vec<D::Row>>;

    async fn execute(
        &self,
        statement: &Statement,
        params: &[&(dyn ToSql + Sync)],
    ) -> QueryKitResult<Self::Output> {
        let sql = statement.render()?;
        log_sql(statement, &sql, params.len(), self.max_sql_log_length);

        if self.database.is_connected().await {
            return self.database.execute_query(&sql, params).await;
        }

        self.database.connect().await?;
        let result = self.database.execute_query(&sql, params).await;
        let closed = self.database.disconnect().await;

        match (result, closed) {
            (Ok(rows), Ok(())) => Ok(rows),
            (Ok(_), Err(close_err)) => Err(close_err),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(close_err)) => {
                tracing::warn!(target: "querykit.db", error = %close_err, "disconnect failed after execution error");
                Err(err)
            }
        }
    }
}
