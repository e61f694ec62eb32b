#![allow(dead_code)]

use oxide_surql_core::{CompileError, CompiledStatement, Grammar, QueryDescriptor, Value};

pub fn select(query: &QueryDescriptor) -> CompiledStatement {
    Grammar::new()
        .compile_select(query)
        .unwrap_or_else(|e| panic!("Failed to compile: {query:?}\nError: {e}"))
}

pub fn select_err(query: &QueryDescriptor) -> CompileError {
    Grammar::new()
        .compile_select(query)
        .expect_err(&format!("Expected compile error for: {query:?}"))
}

pub fn select_sql(query: &QueryDescriptor) -> String {
    select(query).sql().to_string()
}

pub fn values(statement: &CompiledStatement) -> Vec<Value> {
    statement
        .bindings()
        .iter()
        .map(|binding| binding.value.clone())
        .collect()
}

/// Asserts that every `$?` in the text has exactly one binding.
pub fn assert_balanced(statement: &CompiledStatement) {
    assert_eq!(
        statement.placeholder_count(),
        statement.bindings().len(),
        "Unbalanced bindings for: {}",
        statement.sql()
    );
}

/// Compiles twice and checks both runs agree byte for byte.
pub fn assert_pure(query: &QueryDescriptor) {
    let first = select(query);
    let second = select(query);
    assert_eq!(first, second, "Compilation is not deterministic for {query:?}");
}
