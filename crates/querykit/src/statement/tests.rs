use super::*;
use crate::component::SortOrder;
use crate::error::QueryKitError;
use crate::render::SeparatorStrategy;

fn users_select() -> Statement {
    let mut stmt = Statement::new();
    stmt.set_select(["*"]);
    stmt.set_from("users");
    stmt
}

fn validation_of(err: QueryKitError) -> ValidationError {
    err.as_validation().cloned().expect("expected a validation error")
}

#[test]
fn test_select_without_from_fails() {
    let mut stmt = Statement::new();
    stmt.set_select(["name"]);
    stmt.add_component(Component::where_("age > 30"));

    assert_eq!(
        validation_of(stmt.validate().unwrap_err()),
        ValidationError::SelectWithoutFrom
    );
    assert_eq!(
        validation_of(stmt.render().unwrap_err()),
        ValidationError::SelectWithoutFrom
    );
}

#[test]
fn test_update_without_set_fails() {
    let mut stmt = Statement::new();
    stmt.add_component(Component::update("users"));
    stmt.add_component(Component::where_("id = 1"));

    assert_eq!(
        validation_of(stmt.render().unwrap_err()),
        ValidationError::UpdateWithoutSet
    );
}

#[test]
fn test_delete_with_from_fails() {
    let mut stmt = Statement::new();
    stmt.set_from("users");
    stmt.add_component(Component::delete("users"));

    assert_eq!(
        validation_of(stmt.render().unwrap_err()),
        ValidationError::DeleteWithFrom
    );
}

#[test]
fn test_validate_does_not_mutate() {
    let mut stmt = Statement::new();
    stmt.set_select(["id"]);
    assert!(stmt.validate().is_err());
    assert!(stmt.validate().is_err());
    stmt.set_from("users");
    assert_eq!(stmt.render().unwrap(), "SELECT id FROM users");
}

#[test]
fn test_render_is_idempotent() {
    let mut stmt = users_select();
    stmt.add_component(Component::where_("age > 30"));
    stmt.add_component(Component::order_by(["age"], SortOrder::Desc));

    let first = stmt.render().unwrap();
    let second = stmt.render().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_clause_order_is_fixed() {
    let mut stmt = Statement::new();
    stmt.add_component(Component::where_("age > 30"));
    stmt.add_component(Component::limit(5, None));
    stmt.set_from("users");
    stmt.set_select(["name"]);

    assert_eq!(
        stmt.render().unwrap(),
        "SELECT name FROM users WHERE age > 30 LIMIT 5"
    );
}

#[test]
fn test_components_keep_append_order() {
    let mut stmt = users_select();
    stmt.add_component(Component::join("orders", "users.id = orders.user_id"));
    stmt.add_component(Component::where_("orders.total > 100"));
    stmt.add_component(Component::group_by(["users.id"]));

    assert_eq!(
        stmt.render().unwrap(),
        "SELECT * FROM users JOIN orders ON users.id = orders.user_id \
         WHERE orders.total > 100 GROUP BY users.id"
    );
}

#[test]
fn test_update_statement() {
    let mut stmt = Statement::new();
    stmt.add_component(Component::update("users"));
    stmt.add_component(Component::set(["name = 'John'", "age = 25"]));
    stmt.add_component(Component::where_("id = 1"));

    assert_eq!(
        stmt.render().unwrap(),
        "UPDATE users SET name = 'John', age = 25 WHERE id = 1"
    );
}

#[test]
fn test_insert_statement() {
    let mut stmt = Statement::new();
    stmt.add_component(Component::insert("users", ["name", "age"], ["Bob", "41"]));
    assert_eq!(
        stmt.render().unwrap(),
        "INSERT INTO users (name, age) VALUES ('Bob', '41')"
    );
}

#[test]
fn test_empty_statement_renders_empty_string() {
    assert_eq!(Statement::new().render().unwrap(), "");
}

#[test]
fn test_subquery_component_renders_parenthesized() {
    let inner = users_select();
    let expected_inner = inner.render().unwrap();

    let mut outer = Statement::new();
    outer.set_select(["name"]);
    outer.set_from("accounts");
    outer.add_component(Component::where_("user_id IN"));
    outer.add_component(Component::subquery(inner));

    assert_eq!(
        outer.render().unwrap(),
        format!("SELECT name FROM accounts WHERE user_id IN ({expected_inner})")
    );
}

#[test]
fn test_two_level_subquery_nesting() {
    let mut innermost = Statement::new();
    innermost.set_select(["user_id"]);
    innermost.set_from("bans");

    let mut middle = Statement::new();
    middle.set_select(["id"]);
    middle.set_from("users");
    middle.add_component(Component::where_("id NOT IN"));
    middle.add_component(Component::subquery(innermost));

    let mut outer = Statement::new();
    outer.set_select(["*"]);
    outer.set_from("orders");
    outer.add_component(Component::where_("user_id IN"));
    outer.add_component(Component::subquery(middle));

    assert_eq!(
        outer.render().unwrap(),
        "SELECT * FROM orders WHERE user_id IN \
         (SELECT id FROM users WHERE id NOT IN (SELECT user_id FROM bans))"
    );
}

#[test]
fn test_invalid_nested_subquery_fails_outer() {
    let mut innermost = Statement::new();
    innermost.add_component(Component::update("users"));

    let mut middle = users_select();
    middle.add_component(Component::subquery(innermost));

    let mut outer = users_select();
    outer.add_component(Component::subquery(middle));

    assert_eq!(
        validation_of(outer.validate().unwrap_err()),
        ValidationError::UpdateWithoutSet
    );
}

#[test]
fn test_add_select_column_creates_or_extends() {
    let mut stmt = Statement::new();
    stmt.set_from("users");
    stmt.add_select_column("id");
    stmt.add_select_column("name");
    assert_eq!(stmt.render().unwrap(), "SELECT id, name FROM users");
}

#[test]
fn test_set_strategy_changes_output_only() {
    let mut stmt = users_select();
    stmt.add_component(Component::limit(1, None));
    stmt.set_strategy(SeparatorStrategy::multiline());
    assert_eq!(stmt.render().unwrap(), "SELECT *\nFROM users\nLIMIT 1");
}

#[test]
fn test_kind_follows_leading_clause() {
    assert_eq!(users_select().kind(), StatementKind::Select);

    let mut delete = Statement::new();
    delete.add_component(Component::delete("users"));
    assert_eq!(delete.kind(), StatementKind::Delete);

    let mut insert = Statement::new();
    insert.add_component(Component::insert("users", ["a"], ["b"]));
    assert_eq!(insert.kind(), StatementKind::Insert);

    assert_eq!(Statement::new().kind(), StatementKind::Other);
}

#[test]
fn test_select_component_without_from_fails() {
    let mut stmt = Statement::new();
    stmt.add_component(Component::select(["id"]));

    assert_eq!(
        validation_of(stmt.render().unwrap_err()),
        ValidationError::SelectWithoutFrom
    );
}

#[test]
fn test_from_component_with_delete_fails() {
    let mut stmt = Statement::new();
    stmt.add_component(Component::delete("users"));
    stmt.add_component(Component::from_table("users"));

    assert_eq!(
        validation_of(stmt.render().unwrap_err()),
        ValidationError::DeleteWithFrom
    );
}

#[test]
fn test_select_and_from_components_keep_fixed_position() {
    let mut stmt = Statement::new();
    stmt.add_component(Component::where_("age > 30"));
    stmt.add_component(Component::from_table("users"));
    stmt.add_component(Component::select(["name"]));

    assert_eq!(stmt.components().len(), 1);
    assert_eq!(stmt.render().unwrap(), "SELECT name FROM users WHERE age > 30");
}
