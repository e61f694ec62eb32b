//! JSON compile requests.

use serde::{Deserialize, Serialize};

use oxide_surql_core::{
    CompiledStatement, Grammar, QueryDescriptor, Result, Rows, StatementKind, UpsertUpdate, Value,
    ValuesMap,
};

/// A statement to compile, tagged by `"statement"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "statement", rename_all = "snake_case")]
pub enum Request {
    Select {
        query: QueryDescriptor,
    },
    Exists {
        query: QueryDescriptor,
    },
    Insert {
        query: QueryDescriptor,
        #[serde(default)]
        values: Rows,
    },
    InsertOrIgnore {
        query: QueryDescriptor,
        #[serde(default)]
        values: Rows,
    },
    Create {
        query: QueryDescriptor,
        #[serde(default)]
        values: ValuesMap,
    },
    Update {
        query: QueryDescriptor,
        #[serde(default)]
        values: ValuesMap,
    },
    Upsert {
        query: QueryDescriptor,
        values: Rows,
        unique_by: Vec<String>,
        update: UpsertUpdate,
    },
    Delete {
        query: QueryDescriptor,
    },
    Relate {
        query: QueryDescriptor,
        edge: String,
        to: String,
        #[serde(default)]
        values: ValuesMap,
    },
}

impl Request {
    /// Compiles the request with `grammar`.
    ///
    /// # Errors
    ///
    /// Returns the grammar's [`oxide_surql_core::CompileError`].
    pub fn compile(&self, grammar: &Grammar) -> Result<CompiledStatement> {
        match self {
            Self::Select { query } => grammar.compile_select(query),
            Self::Exists { query } => grammar.compile_exists(query),
            Self::Insert { query, values } => grammar.compile_insert(query, values),
            Self::InsertOrIgnore { query, values } => {
                grammar.compile_insert_or_ignore(query, values)
            }
            Self::Create { query, values } => grammar.compile_create(query, values),
            Self::Update { query, values } => grammar.compile_update(query, values),
            Self::Upsert {
                query,
                values,
                unique_by,
                update,
            } => grammar.compile_upsert(query, values, unique_by.as_slice(), update),
            Self::Delete { query } => grammar.compile_delete(query),
            Self::Relate {
                query,
                edge,
                to,
                values,
            } => grammar.compile_relate(query, edge, to, values),
        }
    }
}

/// The compiled statement as printed by the CLI.
#[derive(Debug, Serialize)]
pub struct Output<'a> {
    pub kind: StatementKind,
    pub sql: &'a str,
    pub bindings: Vec<&'a Value>,
    pub functions: Vec<&'a Value>,
}

impl<'a> From<&'a CompiledStatement> for Output<'a> {
    fn from(statement: &'a CompiledStatement) -> Self {
        Self {
            kind: statement.kind(),
            sql: statement.sql(),
            bindings: statement.query_bindings().collect(),
            functions: statement.function_bindings().collect(),
        }
    }
}
