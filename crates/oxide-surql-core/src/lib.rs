//! # oxide-surql-core
//!
//! A `SurrealQL` statement compiler for relational-style query descriptions.
//!
//! This crate provides:
//! - A plain-data [`QueryDescriptor`] describing columns, predicates,
//!   grouping, ordering, pagination and write values
//! - A [`Grammar`] compiling descriptors into `SurrealQL` text plus the ordered
//!   bindings of its `$?` placeholders
//! - Eager rejection of relational features `SurrealQL` cannot express
//!
//! ## Compiling a query
//!
//! ```rust
//! use oxide_surql_core::{Grammar, QueryDescriptor, WhereClause};
//!
//! let grammar = Grammar::new();
//! let statement = grammar
//!     .compile_select(&QueryDescriptor::find("person:ana").unwrap())
//!     .unwrap();
//!
//! assert_eq!(statement.sql(), "SELECT * FROM `person` WHERE `id` = $? LIMIT 1");
//! assert_eq!(statement.placeholder_count(), statement.bindings().len());
//! ```
//!
//! ## Unsupported features
//!
//! Joins, unions, HAVING, DISTINCT, bitwise predicates, TRUNCATE, row locks,
//! savepoints and transaction control fail before any text is produced:
//!
//! ```rust
//! use oxide_surql_core::{CompileError, Feature, Grammar, QueryDescriptor};
//!
//! let err = Grammar::new()
//!     .compile_select(&QueryDescriptor::table("person").distinct())
//!     .unwrap_err();
//!
//! assert_eq!(err, CompileError::Unsupported(Feature::Distinct));
//! assert_eq!(
//!     err.to_string(),
//!     "SurrealDB does not support DISTINCT operations. Use GROUP BY instead."
//! );
//! ```

pub mod error;
pub mod grammar;
pub mod operator;
pub mod query;
pub mod record;
pub mod statement;
pub mod value;

pub use error::{CompileError, Feature, Result};
pub use grammar::{Grammar, GrammarConfig, TransactionOp};
pub use query::{
    Column, Direction, OrderClause, QueryDescriptor, Return, Rows, UpsertUpdate, ValuesMap,
    WhereClause,
};
pub use record::RecordId;
pub use statement::{CompiledStatement, StatementKind};
pub use value::{Binding, Channel, EmbeddedFunction, Expression, Param, ToValue, Value};
