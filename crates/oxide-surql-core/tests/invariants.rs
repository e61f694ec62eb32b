//! Purity and placeholder/binding balance across descriptor shapes.

mod common;

use std::sync::Arc;
use std::thread;

use common::{assert_balanced, assert_pure, select};
use oxide_surql_core::query::DateUnit;
use oxide_surql_core::{
    Column, Direction, EmbeddedFunction, Grammar, Param, QueryDescriptor, Rows, Value, ValuesMap,
    WhereClause,
};

fn descriptors() -> Vec<QueryDescriptor> {
    vec![
        QueryDescriptor::table("foo:bar").limit(1),
        QueryDescriptor::table("person")
            .column(EmbeddedFunction::new("string::join($?, first, last)").bind(" "))
            .where_clause(WhereClause::in_list("role", vec!["a", "b"]))
            .where_clause(WhereClause::in_list::<i64>("x", vec![]))
            .or_where(WhereClause::between("age", 1_i64, 9_i64)),
        QueryDescriptor::table("person")
            .where_clause(WhereClause::nested(vec![
                WhereClause::date(DateUnit::Year, "born", "<", 2000_i64),
                WhereClause::basic(
                    "score",
                    ">",
                    EmbeddedFunction::new("math::mean([$?, $?])").bind(1_i64).bind(2_i64),
                )
                .or(),
            ]))
            .where_clause(WhereClause::exists(
                QueryDescriptor::table("pet").where_clause(WhereClause::eq("kind", "dog")),
            ))
            .where_clause(WhereClause::raw("age > $? AND age < $?", vec![Value::Int(1), Value::Int(2)]))
            .order_by("name", Direction::Asc),
        QueryDescriptor::table("person")
            .aggregate("count", [Column::from("*")])
            .where_clause(WhereClause::not_in_list("id", vec![Param::raw("person:1"), Param::from(3_i64)])),
    ]
}

#[test]
fn test_select_is_pure() {
    for query in descriptors() {
        assert_pure(&query);
    }
}

#[test]
fn test_select_bindings_match_placeholders() {
    for query in descriptors() {
        assert_balanced(&select(&query));
    }
}

#[test]
fn test_writes_bindings_match_placeholders() {
    let grammar = Grammar::new();
    let values = ValuesMap::new()
        .set("name", "Ana")
        .set("slug", EmbeddedFunction::new("string::slug($?)").bind("Ana"))
        .set("at", Param::raw("time::now()"));
    let query = QueryDescriptor::table("person").where_clause(WhereClause::eq("id", "person:1"));

    let statements = [
        grammar.compile_insert(&query, &Rows::from(vec![values.clone(), values.clone()])),
        grammar.compile_create(&query, &values),
        grammar.compile_update(&query, &values),
        grammar.compile_delete(&query),
        grammar.compile_exists(&query),
        grammar.compile_relate(&QueryDescriptor::table("person:1"), "knows", "person:2", &values),
    ];
    for statement in statements {
        assert_balanced(&statement.unwrap());
    }
}

#[test]
fn test_concurrent_compilation_agrees() {
    let grammar = Arc::new(Grammar::new());
    let expected: Vec<_> = descriptors().iter().map(select).collect();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let grammar = Arc::clone(&grammar);
            thread::spawn(move || {
                descriptors()
                    .iter()
                    .map(|query| grammar.compile_select(query).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
