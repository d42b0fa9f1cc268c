//! Render strategies: how an ordered list of clauses becomes one statement string.

use crate::component::Component;
use crate::error::QueryKitResult;

/// Joins rendered clause fragments into a statement.
///
/// Implementations receive the clauses already in final order and must not
/// reorder them.
pub trait RenderStrategy: Send + Sync {
    fn build(&self, components: &[&Component]) -> QueryKitResult<String>;
}

/// Joins each clause with a single space.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardStrategy;

impl RenderStrategy for StandardStrategy {
    fn build(&self, components: &[&Component]) -> QueryKitResult<String> {
        SeparatorStrategy::new(" ").build(components)
    }
}

/// Joins each clause with a caller-chosen separator.
///
/// ```ignore
/// stmt.set_strategy(SeparatorStrategy::new("\n"));
/// ```
#[derive(Debug, Clone)]
pub struct SeparatorStrategy {
    separator: String,
}

impl SeparatorStrategy {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// One clause per line.
    pub fn multiline() -> Self {
        Self::new("\n")
    }
}

impl RenderStrategy for SeparatorStrategy {
    fn build(&self, components: &[&Component]) -> QueryKitResult<String> {
        let mut sql = String::new();
        for (i, component) in components.iter().enumerate() {
            if i > 0 {
                sql.push_str(&self.separator);
            }
            sql.push_str(&component.render()?);
        }
        Ok(sql)
    }
}
