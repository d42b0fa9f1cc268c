//! Execution strategies: what happens to a statement once it renders.
//!
//! Every strategy renders (and therefore validates) before doing anything
//! else, so an invalid statement never reaches a database.
//!
//! ```ignore
//! use querykit::execution::{DbExecution, ExecutionStrategy};
//!
//! let db = PgDatabase::new(DatabaseConfig::from_env()?);
//! db.connect().await?;
//!
//! let stmt = querykit::builder::select(["*"]).from_table("users").where_("id = ?").build()?;
//! let rows = DbExecution::new(&db).execute(&stmt, &[&1_i64]).await?;
//! ```

mod db;

pub use db::{DbExecution, ScopedDbExecution};

use crate::config::DEFAULT_MAX_SQL_LOG_LENGTH;
use crate::error::QueryKitResult;
use crate::sql::truncate_sql;
use crate::statement::Statement;
use serde::Serialize;
use tokio_postgres::types::ToSql;

/// A way of executing a rendered statement.
pub trait ExecutionStrategy: Send + Sync {
    type Output;

    fn execute(
        &self,
        statement: &Statement,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = QueryKitResult<Self::Output>> + Send;
}

/// Renders and prints the statement to stdout. Returns the rendered text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintExecution;

impl ExecutionStrategy for PrintExecution {
    type Output = String;

    async fn execute(
        &self,
        statement: &Statement,
        params: &[&(dyn ToSql + Sync)],
    ) -> QueryKitResult<String> {
        let sql = statement.render()?;
        log_sql(statement, &sql, params.len(), Some(DEFAULT_MAX_SQL_LOG_LENGTH));
        println!("{}", sql);
        Ok(sql)
    }
}

/// Outcome reported by [`MockExecution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Success,
}

/// Structured acknowledgment of a simulated execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Acknowledgment {
    pub status: ExecutionStatus,
    pub query: String,
    pub param_count: usize,
}

impl Acknowledgment {
    /// JSON form, e.g. `{"status":"success","query":"...","param_count":0}`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "status": self.status,
            "query": self.query,
            "param_count": self.param_count,
        })
    }
}

/// Renders the statement and acknowledges it without touching any database.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockExecution;

impl ExecutionStrategy for MockExecution {
    type Output = Acknowledgment;

    async fn execute(
        &self,
        statement: &Statement,
        params: &[&(dyn ToSql + Sync)],
    ) -> QueryKitResult<Acknowledgment> {
        let sql = statement.render()?;
        log_sql(statement, &sql, params.len(), Some(DEFAULT_MAX_SQL_LOG_LENGTH));
        Ok(Acknowledgment {
            status: ExecutionStatus::Success,
            query: sql,
            param_count: params.len(),
        })
    }
}

pub(crate) fn log_sql(statement: &Statement, sql: &str, param_count: usize, max_len: Option<usize>) {
    tracing::debug!(
        target: "querykit.sql",
        kind = %statement.kind(),
        param_count,
        sql = %truncate_sql(sql, max_len),
    );
}
