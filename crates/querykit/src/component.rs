//! Clause components.
//!
//! Each [`Component`] is one SQL clause and knows how to render its own
//! fragment. Rendering does no content validation: column lists may be empty
//! and conditions are emitted verbatim.

use crate::error::{QueryKitResult, ValidationError};
use crate::statement::Statement;
use std::fmt;
use std::str::FromStr;

/// Sort direction for `ORDER BY`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("ASC") {
            Ok(SortOrder::Asc)
        } else if trimmed.eq_ignore_ascii_case("DESC") {
            Ok(SortOrder::Desc)
        } else {
            Err(ValidationError::InvalidSortOrder(s.to_string()))
        }
    }
}

/// A single renderable SQL clause.
#[derive(Debug, Clone)]
pub enum Component {
    Select { columns: Vec<String> },
    From { table: String },
    Where { condition: String },
    Join { table: String, condition: String },
    GroupBy { columns: Vec<String> },
    OrderBy { columns: Vec<String>, order: SortOrder },
    Update { table: String },
    Set { assignments: Vec<String> },
    Delete { table: String },
    Limit { count: u64, offset: Option<u64> },
    Insert { table: String, columns: Vec<String>, values: Vec<String> },
    /// A nested statement, validated and rendered each time its parent renders.
    Subquery(Box<Statement>),
}

impl Component {
    pub fn select<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Component::Select { columns: collect_strings(columns) }
    }

    pub fn from_table(table: impl Into<String>) -> Self {
        Component::From { table: table.into() }
    }

    pub fn where_(condition: impl Into<String>) -> Self {
        Component::Where { condition: condition.into() }
    }

    pub fn join(table: impl Into<String>, condition: impl Into<String>) -> Self {
        Component::Join {
            table: table.into(),
            condition: condition.into(),
        }
    }

    pub fn group_by<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Component::GroupBy { columns: collect_strings(columns) }
    }

    pub fn order_by<I, S>(columns: I, order: SortOrder) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Component::OrderBy {
            columns: collect_strings(columns),
            order,
        }
    }

    pub fn update(table: impl Into<String>) -> Self {
        Component::Update { table: table.into() }
    }

    pub fn set<I, S>(assignments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Component::Set { assignments: collect_strings(assignments) }
    }

    pub fn delete(table: impl Into<String>) -> Self {
        Component::Delete { table: table.into() }
    }

    pub fn limit(count: u64, offset: Option<u64>) -> Self {
        Component::Limit { count, offset }
    }

    pub fn insert<C, V, S, T>(table: impl Into<String>, columns: C, values: V) -> Self
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
        V: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Component::Insert {
            table: table.into(),
            columns: collect_strings(columns),
            values: collect_strings(values),
        }
    }

    /// Wrap a complete statement. The component takes ownership, so the
    /// embedded statement can only change through [`Component::subquery_mut`].
    pub fn subquery(inner: Statement) -> Self {
        Component::Subquery(Box::new(inner))
    }

    /// Mutable access to a wrapped statement; `None` for every other clause.
    pub fn subquery_mut(&mut self) -> Option<&mut Statement> {
        match self {
            Component::Subquery(inner) => Some(inner),
            _ => None,
        }
    }

    /// Render this clause to its SQL fragment.
    ///
    /// Only [`Component::Subquery`] can fail: the inner statement is validated
    /// first and its error is returned unchanged.
    pub fn render(&self) -> QueryKitResult<String> {
        let sql = match self {
            Component::Select { columns } => format!("SELECT {}", columns.join(", ")),
            Component::From { table } => format!("FROM {}", table),
            Component::Where { condition } => format!("WHERE {}", condition),
            Component::Join { table, condition } => format!("JOIN {} ON {}", table, condition),
            Component::GroupBy { columns } => format!("GROUP BY {}", columns.join(", ")),
            Component::OrderBy { columns, order } => {
                format!("ORDER BY {} {}", columns.join(", "), order)
            }
            Component::Update { table } => format!("UPDATE {}", table),
            Component::Set { assignments } => format!("SET {}", assignments.join(", ")),
            Component::Delete { table } => format!("DELETE FROM {}", table),
            Component::Limit { count, offset: Some(offset) } => {
                format!("LIMIT {} OFFSET {}", count, offset)
            }
            Component::Limit { count, offset: None } => format!("LIMIT {}", count),
            Component::Insert { table, columns, values } => {
                // Values are quoted as text literals without escaping.
                let quoted: Vec<String> = values.iter().map(|v| format!("'{}'", v)).collect();
                format!(
                    "INSERT INTO {} ({}) VALUES ({})",
                    table,
                    columns.join(", "),
                    quoted.join(", ")
                )
            }
            Component::Subquery(inner) => format!("({})", inner.render()?),
        };
        Ok(sql)
    }

    pub(crate) fn is_update(&self) -> bool {
        matches!(self, Component::Update { .. })
    }

    pub(crate) fn is_set(&self) -> bool {
        matches!(self, Component::Set { .. })
    }

    pub(crate) fn is_delete(&self) -> bool {
        matches!(self, Component::Delete { .. })
    }
}

fn collect_strings<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}
