//! The database collaborator contract.
//!
//! The core never talks to a driver directly: execution strategies hand a
//! rendered statement and its positional parameters to a [`Database`], which
//! owns the connection and translates everything driver-specific.

mod postgres;

pub use postgres::PgDatabase;

use crate::error::QueryKitResult;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// A database that can run rendered statements.
///
/// Implementations must report connection problems as
/// [`QueryKitError::Connection`](crate::QueryKitError::Connection) and every
/// failure while running a statement as
/// [`QueryKitError::Execution`](crate::QueryKitError::Execution).
pub trait Database: Send + Sync {
    /// One result row as produced by the driver.
    type Row: Send;

    /// Open the connection.
    fn connect(&self) -> impl std::future::Future<Output = QueryKitResult<()>> + Send;

    /// Run `sql` with positional `params`.
    ///
    /// Returns `Some(rows)` for statements that read (SELECT) and `None` for
    /// everything else.
    fn execute_query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = QueryKitResult<Option<Vec<Self::Row>>>> + Send;

    /// Close the connection. Closing an unopened connection is a no-op.
    fn disconnect(&self) -> impl std::future::Future<Output = QueryKitResult<()>> + Send;

    /// Whether a connection is currently open.
    ///
    /// Implementations that cannot tell report `false`.
    fn is_connected(&self) -> impl std::future::Future<Output = bool> + Send {
        async { false }
    }
}

impl<D: Database> Database for &D {
    type Row = D::Row;

    fn connect(&self) -> impl std::future::Future<Output = QueryKitResult<()>> + Send {
        (**self).connect()
    }

    fn execute_query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = QueryKitResult<Option<Vec<Self::Row>>>> + Send {
        (**self).execute_query(sql, params)
    }

    fn disconnect(&self) -> impl std::future::Future<Output = QueryKitResult<()>> + Send {
        (**self).disconnect()
    }

    fn is_connected(&self) -> impl std::future::Future<Output = bool> + Send {
        (**self).is_connected()
    }
}

impl<D: Database> Database for Arc<D> {
    type Row = D::Row;

    fn connect(&self) -> impl std::future::Future<Output = QueryKitResult<()>> + Send {
        self.as_ref().connect()
    }

    fn execute_query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = QueryKitResult<Option<Vec<Self::Row>>>> + Send {
        self.as_ref().execute_query(sql, params)
    }

    fn disconnect(&self) -> impl std::future::Future<Output = QueryKitResult<()>> + Send {
        self.as_ref().disconnect()
    }

    fn is_connected(&self) -> impl std::future::Future<Output = bool> + Send {
        self.as_ref().is_connected()
    }
}
