//! The mutable statement context: clause storage, validation and rendering.

use crate::component::Component;
use crate::error::{QueryKitResult, ValidationError};
use crate::render::{RenderStrategy, StandardStrategy};
use crate::sql::StatementKind;
use std::fmt;
use std::sync::Arc;

/// An in-progress SQL statement.
///
/// Clauses render in a fixed order regardless of insertion order: SELECT,
/// FROM, then every other component in the order it was added.
#[derive(Clone)]
pub struct Statement {
    select: Option<Component>,
    from: Option<Component>,
    components: Vec<Component>,
    strategy: Arc<dyn RenderStrategy>,
}

impl Statement {
    /// Create an empty statement using [`StandardStrategy`].
    pub fn new() -> Self {
        Self::with_strategy(StandardStrategy)
    }

    /// Create an empty statement with a specific render strategy.
    pub fn with_strategy(strategy: impl RenderStrategy + 'static) -> Self {
        Self {
            select: None,
            from: None,
            components: Vec::new(),
            strategy: Arc::new(strategy),
        }
    }

    /// Set (or replace) the SELECT column list.
    pub fn set_select<I, S>(&mut self, columns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = Some(Component::select(columns));
    }

    /// Append one SELECT column, creating the SELECT clause if absent.
    pub fn add_select_column(&mut self, column: impl Into<String>) {
        match &mut self.select {
            Some(Component::Select { columns }) => columns.push(column.into()),
            _ => self.select = Some(Component::select([column.into()])),
        }
    }

    /// Set (or replace) the FROM clause.
    ///
    /// `table` is stored verbatim, so a pre-rendered `(<subquery>) AS alias`
    /// is accepted the same as a plain table name.
    pub fn set_from(&mut self, table: impl Into<String>) {
        self.from = Some(Component::from_table(table));
    }

    /// Append a clause after SELECT/FROM.
    ///
    /// SELECT and FROM components replace the statement's own SELECT/FROM
    /// slots instead of being appended, so they keep their fixed position and
    /// stay subject to validation.
    pub fn add_component(&mut self, component: Component) {
        match component {
            Component::Select { .. } => self.select = Some(component),
            Component::From { .. } => self.from = Some(component),
            _ => self.components.push(component),
        }
    }

    /// Replace the render strategy.
    pub fn set_strategy(&mut self, strategy: impl RenderStrategy + 'static) {
        self.strategy = Arc::new(strategy);
    }

    /// Replace the render strategy with a shared instance.
    pub fn set_shared_strategy(&mut self, strategy: Arc<dyn RenderStrategy>) {
        self.strategy = strategy;
    }

    pub fn select(&self) -> Option<&Component> {
        self.select.as_ref()
    }

    pub fn from(&self) -> Option<&Component> {
        self.from.as_ref()
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Check every structural invariant, descending into subqueries.
    pub fn validate(&self) -> QueryKitResult<()> {
        if self.select.is_some() && self.from.is_none() {
            return Err(ValidationError::SelectWithoutFrom.into());
        }
        if self.components.iter().any(Component::is_update)
            && !self.components.iter().any(Component::is_set)
        {
            return Err(ValidationError::UpdateWithoutSet.into());
        }
        if self.components.iter().any(Component::is_delete) && self.from.is_some() {
            return Err(ValidationError::DeleteWithFrom.into());
        }

        for component in &self.components {
            if let Component::Subquery(inner) = component {
                inner.validate()?;
            }
        }
        Ok(())
    }

    /// Validate and render the full statement.
    pub fn render(&self) -> QueryKitResult<String> {
        self.validate()?;
        let ordered: Vec<&Component> = self
            .select
            .iter()
            .chain(self.from.iter())
            .chain(self.components.iter())
            .collect();
        self.strategy.build(&ordered)
    }

    /// Kind of statement, judged by its leading clause.
    pub fn kind(&self) -> StatementKind {
        if self.select.is_some() {
            return StatementKind::Select;
        }
        match self.components.first() {
            Some(Component::Insert { .. }) => StatementKind::Insert,
            Some(Component::Update { .. }) => StatementKind::Update,
            Some(Component::Delete { .. }) => StatementKind::Delete,
            _ => StatementKind::Other,
        }
    }
}

impl Default for Statement {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Statement")
            .field("select", &self.select)
            .field("from", &self.from)
            .field("components", &self.components)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
