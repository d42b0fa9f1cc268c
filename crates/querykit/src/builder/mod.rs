//! Fluent statement builder.
//!
//! Every method mutates the wrapped [`Statement`] and hands the same builder
//! back, so calls chain:
//!
//! ```ignore
//! use querykit::builder;
//!
//! let stmt = builder::select(["name", "age"])
//!     .from_table("users")
//!     .where_("age > 30")
//!     .order_by_desc(["age"])
//!     .limit(10)
//!     .build()?;
//!
//! assert_eq!(
//!     stmt.render()?,
//!     "SELECT name, age FROM users WHERE age > 30 ORDER BY age DESC LIMIT 10"
//! );
//! ```
//!
//! # Subqueries
//!
//! [`StatementBuilder::subquery`] moves a statement into the parent as a
//! [`Component::Subquery`]; it is re-validated and re-rendered whenever the
//! parent renders.
//!
//! [`StatementBuilder::select_with_subquery`] and
//! [`StatementBuilder::from_with_subquery`] instead render the inner statement
//! at call time and embed a text snapshot. Changes made to the inner statement
//! afterwards are not reflected in the parent.

use crate::component::{Component, SortOrder};
use crate::error::{QueryKitError, QueryKitResult};
use crate::render::RenderStrategy;
use crate::statement::Statement;

/// Single-use fluent facade over a [`Statement`].
#[derive(Clone, Debug, Default)]
pub struct StatementBuilder {
    statement: Statement,
    /// First error captured while building; returned from `build()`.
    build_error: Option<QueryKitError>,
}

impl StatementBuilder {
    /// Create a builder over an empty statement with the standard strategy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder over an empty statement with a specific strategy.
    pub fn with_strategy(strategy: impl RenderStrategy + 'static) -> Self {
        Self {
            statement: Statement::with_strategy(strategy),
            build_error: None,
        }
    }

    // ==================== SELECT / FROM ====================

    /// Set the SELECT column list.
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.statement.set_select(columns);
        self
    }

    /// Set the FROM table (or any pre-formatted FROM expression).
    pub fn from_table(mut self, table: impl Into<String>) -> Self {
        self.statement.set_from(table);
        self
    }

    /// Render `inner` now and append `(<inner>) AS <alias>` as a SELECT column.
    ///
    /// If `inner` is invalid the builder is left unchanged and the error is
    /// returned from [`StatementBuilder::build`].
    pub fn select_with_subquery(mut self, inner: &Statement, alias: &str) -> Self {
        if let Some(column) = self.snapshot(inner, alias) {
            self.statement.add_select_column(column);
        }
        self
    }

    /// Render `inner` now and install `(<inner>) AS <alias>` as the FROM clause.
    ///
    /// If `inner` is invalid the builder is left unchanged and the error is
    /// returned from [`StatementBuilder::build`].
    pub fn from_with_subquery(mut self, inner: &Statement, alias: &str) -> Self {
        if let Some(from) = self.snapshot(inner, alias) {
            self.statement.set_from(from);
        }
        self
    }

    // ==================== Filtering / shaping ====================

    /// Add a WHERE clause. The condition is emitted verbatim.
    pub fn where_(mut self, condition: impl Into<String>) -> Self {
        self.statement.add_component(Component::where_(condition));
        self
    }

    /// Add `JOIN <table> ON <condition>`.
    pub fn join(mut self, table: impl Into<String>, condition: impl Into<String>) -> Self {
        self.statement
            .add_component(Component::join(table, condition));
        self
    }

    pub fn group_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.statement.add_component(Component::group_by(columns));
        self
    }

    pub fn order_by<I, S>(mut self, columns: I, order: SortOrder) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.statement
            .add_component(Component::order_by(columns, order));
        self
    }

    pub fn order_by_asc<I, S>(self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order_by(columns, SortOrder::Asc)
    }

    pub fn order_by_desc<I, S>(self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order_by(columns, SortOrder::Desc)
    }

    /// ORDER BY with the direction given as text (`"ASC"` / `"DESC"`).
    ///
    /// An unknown direction is captured as a build error and no clause is added.
    pub fn order_by_dir<I, S>(mut self, columns: I, order: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match order.parse::<SortOrder>() {
            Ok(order) => self.order_by(columns, order),
            Err(err) => {
                self.record_error(err.into());
                self
            }
        }
    }

    pub fn limit(mut self, count: u64) -> Self {
        self.statement.add_component(Component::limit(count, None));
        self
    }

    pub fn limit_offset(mut self, count: u64, offset: u64) -> Self {
        self.statement
            .add_component(Component::limit(count, Some(offset)));
        self
    }

    // ==================== Mutations ====================

    /// Add `UPDATE <table>`; a SET clause is required before rendering.
    pub fn update(mut self, table: impl Into<String>) -> Self {
        self.statement.add_component(Component::update(table));
        self
    }

    pub fn set<I, S>(mut self, assignments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.statement.add_component(Component::set(assignments));
        self
    }

    /// Add `DELETE FROM <table>`; the statement must not also have a FROM.
    pub fn delete(mut self, table: impl Into<String>) -> Self {
        self.statement.add_component(Component::delete(table));
        self
    }

    /// Add `INSERT INTO <table> (<columns>) VALUES (<values>)`.
    ///
    /// Every value is quoted as a text literal with no escaping. Prefer `?`
    /// placeholders in a WHERE/SET clause plus bind parameters for untrusted
    /// input.
    pub fn insert<C, V, S, T>(mut self, table: impl Into<String>, columns: C, values: V) -> Self
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
        V: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.statement
            .add_component(Component::insert(table, columns, values));
        self
    }

    // ==================== Composition ====================

    /// Move `inner` into this statement as a live subquery component.
    pub fn subquery(mut self, inner: Statement) -> Self {
        self.statement.add_component(Component::subquery(inner));
        self
    }

    /// Append any prebuilt component.
    pub fn component(mut self, component: Component) -> Self {
        self.statement.add_component(component);
        self
    }

    pub fn strategy(mut self, strategy: impl RenderStrategy + 'static) -> Self {
        self.statement.set_strategy(strategy);
        self
    }

    // ==================== Output ====================

    /// Get any captured build error.
    pub fn build_error(&self) -> Option<&QueryKitError> {
        self.build_error.as_ref()
    }

    /// Render without consuming the builder.
    pub fn to_sql(&self) -> QueryKitResult<String> {
        if let Some(err) = &self.build_error {
            return Err(err.clone());
        }
        self.statement.render()
    }

    /// Finish building and hand back the statement.
    pub fn build(self) -> QueryKitResult<Statement> {
        match self.build_error {
            Some(err) => Err(err),
            None => Ok(self.statement),
        }
    }

    fn snapshot(&mut self, inner: &Statement, alias: &str) -> Option<String> {
        match inner.render() {
            Ok(sql) => Some(format!("({}) AS {}", sql, alias)),
            Err(err) => {
                self.record_error(err);
                None
            }
        }
    }

    fn record_error(&mut self, err: QueryKitError) {
        if self.build_error.is_none() {
            self.build_error = Some(err);
        }
    }
}

/// Start a SELECT with the given columns.
///
/// # Example
/// ```ignore
/// let stmt = querykit::builder::select(["*"]).from_table("users").build()?;
/// ```
pub fn select<I, S>(columns: I) -> StatementBuilder
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    StatementBuilder::new().select(columns)
}

/// Start an UPDATE of the given table.
pub fn update(table: impl Into<String>) -> StatementBuilder {
    StatementBuilder::new().update(table)
}

/// Start a DELETE from the given table.
pub fn delete(table: impl Into<String>) -> StatementBuilder {
    StatementBuilder::new().delete(table)
}

/// Start an INSERT into the given table.
pub fn insert_into<C, V, S, T>(table: impl Into<String>, columns: C, values: V) -> StatementBuilder
where
    C: IntoIterator<Item = S>,
    S: Into<String>,
    V: IntoIterator<Item = T>,
    T: Into<String>,
{
    StatementBuilder::new().insert(table, columns, values)
}
