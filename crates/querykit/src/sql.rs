//! Small text helpers over rendered SQL: kind detection, placeholder
//! rewriting and log truncation.

use std::fmt;

/// The kind of SQL statement, by leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    /// DDL, pragmas, anything else
    Other,
}

impl StatementKind {
    /// Detect the statement kind from SQL text.
    ///
    /// Leading whitespace, comments and opening parentheses are skipped, so a
    /// parenthesized subquery still counts as a SELECT.
    pub fn from_sql(sql: &str) -> Self {
        let trimmed = strip_sql_prefix(sql);
        if starts_with_keyword(trimmed, "SELECT") {
            StatementKind::Select
        } else if starts_with_keyword(trimmed, "INSERT") {
            StatementKind::Insert
        } else if starts_with_keyword(trimmed, "UPDATE") {
            StatementKind::Update
        } else if starts_with_keyword(trimmed, "DELETE") {
            StatementKind::Delete
        } else {
            StatementKind::Other
        }
    }

    /// Whether the statement yields rows.
    pub fn is_read(&self) -> bool {
        matches!(self, StatementKind::Select)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
            StatementKind::Other => "OTHER",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Skip leading whitespace, `--`/`/* */` comments and `(`.
pub(crate) fn strip_sql_prefix(sql: &str) -> &str {
    let mut s = sql;
    loop {
        let before = s;
        s = s.trim_start();
        if s.starts_with("--") {
            match s.find('\n') {
                Some(pos) => {
                    s = &s[pos + 1..];
                    continue;
                }
                None => return "",
            }
        }
        if s.starts_with("/*") {
            match s.find("*/") {
                Some(pos) => {
                    s = &s[pos + 2..];
                    continue;
                }
                None => return "",
            }
        }
        if let Some(rest) = s.strip_prefix('(') {
            s = rest;
            continue;
        }
        if s == before {
            return s;
        }
    }
}

/// Case-insensitive keyword match that does not accept a longer identifier
/// (`SELECTED` is not `SELECT`).
pub(crate) fn starts_with_keyword(s: &str, keyword: &str) -> bool {
    let Some(prefix) = s.get(0..keyword.len()) else {
        return false;
    };
    if !prefix.eq_ignore_ascii_case(keyword) {
        return false;
    }
    match s[keyword.len()..].chars().next() {
        Some(c) => !(c.is_ascii_alphanumeric() || c == '_'),
        None => true,
    }
}

/// Rewrite `?` placeholders to Postgres-style `$1, $2, ...`.
///
/// Question marks inside single-quoted literals or double-quoted identifiers
/// are left alone. Returns the rewritten text and the number of placeholders.
///
/// # Limitations
///
/// Only quotes are tracked. A `?` inside a `--` or `/* */` comment, inside a
/// dollar-quoted `$$ ... $$` body, or used as the JSONB `?`, `?|` and `?&`
/// operators is rewritten as well. Write such statements with numbered `$n`
/// placeholders, which pass through unchanged.
pub fn rewrite_placeholders(sql: &str) -> (String, usize) {
    let mut out = String::with_capacity(sql.len() + 8);
    let mut count = 0;
    let mut in_single = false;
    let mut in_double = false;

    for c in sql.chars() {
        match c {
            '\'' if !in_double => {
                in_single = !in_single;
                out.push(c);
            }
            '"' if !in_single => {
                in_double = !in_double;
                out.push(c);
            }
            '?' if !in_single && !in_double => {
                count += 1;
                out.push('$');
                out.push_str(&count.to_string());
            }
            _ => out.push(c),
        }
    }

    (out, count)
}

/// Truncate SQL for log output without splitting a UTF-8 character.
pub(crate) fn truncate_sql(sql: &str, max_bytes: Option<usize>) -> String {
    match max_bytes {
        Some(max) if sql.len() > max => {
            let mut end = max;
            while end > 0 && !sql.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}...", &sql[..end])
        }
        _ => sql.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_detection() {
        assert_eq!(StatementKind::from_sql("SELECT 1"), StatementKind::Select);
        assert_eq!(StatementKind::from_sql("  select * from t"), StatementKind::Select);
        assert_eq!(
            StatementKind::from_sql("(SELECT * FROM users) UNION (SELECT * FROM admins)"),
            StatementKind::Select
        );
        assert_eq!(
            StatementKind::from_sql("-- note\n/* c */ DELETE FROM users"),
            StatementKind::Delete
        );
        assert_eq!(
            StatementKind::from_sql("INSERT INTO t (a) VALUES ('b')"),
            StatementKind::Insert
        );
        assert_eq!(StatementKind::from_sql("update t set a = 1"), StatementKind::Update);
        assert_eq!(StatementKind::from_sql("CREATE TABLE t ()"), StatementKind::Other);
        assert_eq!(StatementKind::from_sql("SELECTED"), StatementKind::Other);
        assert_eq!(StatementKind::from_sql(""), StatementKind::Other);
        assert_eq!(StatementKind::from_sql("-- only a comment"), StatementKind::Other);
    }

    #[test]
    fn test_rewrite_placeholders() {
        let (sql, n) = rewrite_placeholders("SELECT * FROM users WHERE id = ? AND name = ?");
        assert_eq!(sql, "SELECT * FROM users WHERE id = $1 AND name = $2");
        assert_eq!(n, 2);
    }

    #[test]
    fn test_rewrite_placeholders_skips_literals() {
        let (sql, n) =
            rewrite_placeholders("SELECT '?', \"odd?col\" FROM t WHERE a = ? AND b = 'it''s?'");
        assert_eq!(sql, "SELECT '?', \"odd?col\" FROM t WHERE a = $1 AND b = 'it''s?'");
        assert_eq!(n, 1);
    }

    #[test]
    fn test_rewrite_placeholders_leaves_numbered_params() {
        let (sql, n) = rewrite_placeholders("SELECT * FROM t WHERE id = $1");
        assert_eq!(sql, "SELECT * FROM t WHERE id = $1");
        assert_eq!(n, 0);
    }

    #[test]
    fn test_rewrite_placeholders_does_not_track_comments_or_operators() {
        // Known limitation: only quotes are tracked.
        let (sql, n) = rewrite_placeholders("SELECT data ? 'k' FROM t -- why?");
        assert_eq!(sql, "SELECT data $1 'k' FROM t -- why$2");
        assert_eq!(n, 2);
    }

    #[test]
    fn test_truncate_sql() {
        assert_eq!(truncate_sql("SELECT 1", None), "SELECT 1");
        assert_eq!(truncate_sql("SELECT 1", Some(100)), "SELECT 1");
        assert_eq!(truncate_sql("SELECT 1", Some(6)), "SELECT...");
        // 'é' is two bytes; a cut inside it backs off to the boundary
        assert_eq!(truncate_sql("éé", Some(3)), "é...");
    }
}
