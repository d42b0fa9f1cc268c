//! # querykit
//!
//! A component-based SQL statement constructor.
//!
//! ## Features
//!
//! - **Clause components**: each SQL clause (SELECT, FROM, WHERE, JOIN, ...) renders itself
//! - **Pluggable rendering**: a [`RenderStrategy`] decides how clauses are joined
//! - **Structural validation**: SELECT requires FROM, UPDATE requires SET, DELETE forbids FROM
//! - **Subqueries**: nested statements validate recursively and render parenthesized
//! - **Pluggable execution**: print, mock, or dispatch to a [`Database`]
//!
//! ## Example
//!
//! ```ignore
//! use querykit::builder;
//! use querykit::execution::{ExecutionStrategy, MockExecution};
//!
//! let inner = builder::select(["*"]).from_table("users").build()?;
//! let stmt = builder::select(["name", "age"])
//!     .from_with_subquery(&inner, "sub_alias")
//!     .build()?;
//!
//! assert_eq!(
//!     stmt.render()?,
//!     "SELECT name, age FROM (SELECT * FROM users) AS sub_alias"
//! );
//!
//! let ack = MockExecution.execute(&stmt, &[]).await?;
//! ```
//!
//! The clause contents (column names, conditions, values) are emitted
//! verbatim. querykit checks statement structure, not SQL syntax, and does
//! not escape anything; bind untrusted input through parameters.

pub mod builder;
pub mod component;
pub mod config;
pub mod database;
pub mod error;
pub mod execution;
pub mod param;
pub mod render;
pub mod sql;
pub mod statement;

pub use builder::StatementBuilder;
pub use component::{Component, SortOrder};
pub use config::DatabaseConfig;
pub use database::{Database, PgDatabase};
pub use error::{QueryKitError, QueryKitResult, ValidationError};
pub use execution::{
    Acknowledgment, DbExecution, ExecutionStatus, ExecutionStrategy, MockExecution,
    PrintExecution, ScopedDbExecution,
};
pub use param::{Param, ParamList};
pub use render::{RenderStrategy, SeparatorStrategy, StandardStrategy};
pub use sql::{StatementKind, rewrite_placeholders};
pub use statement::Statement;
