//! WHERE clause compilation through SELECT.

mod common;

use common::{assert_balanced, select, select_sql};
use oxide_surql_core::{Param, QueryDescriptor, Value, WhereClause};

fn filtered(clause: WhereClause) -> QueryDescriptor {
    QueryDescriptor::table("t").where_clause(clause)
}

#[test]
fn test_empty_in_is_always_false() {
    let statement = select(&filtered(WhereClause::in_list::<i64>("id", vec![])));
    assert_eq!(statement.sql(), "SELECT * FROM `t` WHERE 0 = 1");
    assert_eq!(statement.placeholder_count(), 0);
    assert!(statement.bindings().is_empty());
}

#[test]
fn test_empty_not_in_is_always_true() {
    let statement = select(&filtered(WhereClause::not_in_list::<i64>("id", vec![])));
    assert_eq!(statement.sql(), "SELECT * FROM `t` WHERE 1 = 1");
    assert_eq!(statement.placeholder_count(), 0);
    assert!(statement.bindings().is_empty());
}

#[test]
fn test_operator_aliases() {
    let cases = [
        ("IS", "="),
        ("is not", "!="),
        ("CONTAINSALL", "⊇"),
        ("containsany", "⊃"),
        ("INSIDE", "∈"),
        ("NOTINSIDE", "∉"),
        ("~", "~"),
        ("INTERSECTS", "INTERSECTS"),
    ];
    for (alias, emitted) in cases {
        assert_eq!(
            select_sql(&filtered(WhereClause::basic("a", alias, 1_i64))),
            format!("SELECT * FROM `t` WHERE `a` {emitted} $?"),
            "alias {alias}"
        );
    }
}

#[test]
fn test_raw_values_are_not_bound() {
    let statement = select(&filtered(WhereClause::basic(
        "created",
        "<",
        Param::raw("time::now()"),
    )));
    assert_eq!(statement.sql(), "SELECT * FROM `t` WHERE `created` < time::now()");
    assert!(statement.bindings().is_empty());
}

#[test]
fn test_deeply_nested_groups() {
    let query = QueryDescriptor::table("t")
        .where_clause(WhereClause::eq("a", 1_i64))
        .where_clause(WhereClause::nested(vec![
            WhereClause::eq("b", 2_i64),
            WhereClause::nested(vec![
                WhereClause::eq("c", 3_i64),
                WhereClause::eq("d", 4_i64).or(),
            ])
            .or(),
        ]));
    let statement = select(&query);
    assert_eq!(
        statement.sql(),
        "SELECT * FROM `t` WHERE `a` = $? AND (`b` = $? OR (`c` = $? OR `d` = $?))"
    );
    assert_eq!(
        statement.bindings().iter().map(|b| b.value.clone()).collect::<Vec<_>>(),
        vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]
    );
}

#[test]
fn test_empty_group_is_skipped() {
    let query = QueryDescriptor::table("t")
        .where_clause(WhereClause::nested(vec![]))
        .or_where(WhereClause::eq("a", 1_i64));
    assert_eq!(select_sql(&query), "SELECT * FROM `t` WHERE `a` = $?");
}

#[test]
fn test_exists_bindings_stay_in_position() {
    let inner = QueryDescriptor::table("pet")
        .where_clause(WhereClause::columns("owner", "=", "$parent.id"))
        .where_clause(WhereClause::eq("kind", "cat"));
    let query = QueryDescriptor::table("person")
        .where_clause(WhereClause::eq("age", 30_i64))
        .where_clause(WhereClause::exists(inner))
        .where_clause(WhereClause::eq("name", "Ana"));
    let statement = select(&query);
    assert_eq!(
        statement.sql(),
        "SELECT * FROM `person` WHERE `age` = $? AND true = <bool> count((SELECT * FROM `pet` \
         WHERE `owner` = $parent.id AND `kind` = $?)) AND `name` = $?"
    );
    assert_eq!(
        statement.bindings().iter().map(|b| b.value.clone()).collect::<Vec<_>>(),
        vec![
            Value::Int(30),
            Value::Text(String::from("cat")),
            Value::Text(String::from("Ana")),
        ]
    );
    assert_balanced(&statement);
}

#[test]
fn test_between_bindings() {
    let statement = select(&filtered(WhereClause::between("age", 18_i64, 65_i64).or()));
    assert_eq!(statement.sql(), "SELECT * FROM `t` WHERE `age` INSIDE $? AND $?");
    assert_balanced(&statement);
}
