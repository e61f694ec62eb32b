//! `SurrealQL` grammar.
//!
//! The [`Grammar`] compiles [`QueryDescriptor`](crate::query::QueryDescriptor)s
//! into [`CompiledStatement`](crate::CompiledStatement)s. Each clause compiles
//! to a [`Fragment`]: a piece of text and the bindings its placeholders need.
//! Fragments are composed by value, so nested compilation (sub-selects,
//! embedded functions) never shares a binding list with its caller.
//!
//! # Example
//!
//! ```rust
//! use oxide_surql_core::Grammar;
//! use oxide_surql_core::query::{QueryDescriptor, WhereClause};
//!
//! let grammar = Grammar::new();
//! let statement = grammar
//!     .compile_select(
//!         &QueryDescriptor::table("foo")
//!             .where_clause(WhereClause::eq("id", "foo:bar"))
//!             .limit(1),
//!     )
//!     .unwrap();
//!
//! assert_eq!(statement.sql(), "SELECT * FROM `foo` WHERE `id` = $? LIMIT 1");
//! assert_eq!(statement.bindings().len(), 1);
//! ```

mod assemble;
mod clauses;
mod guard;
mod interval;
mod statements;
mod wheres;
mod wrap;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use guard::TransactionOp;
pub use interval::format_interval;

use crate::statement::{CompiledStatement, StatementKind};
use crate::value::{Binding, EmbeddedFunction, Value};

/// Placeholder emitted for every bound value.
pub const PLACEHOLDER: &str = "$?";

/// Grammar configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    /// Prefix prepended to every table name.
    pub table_prefix: String,
}

/// Compiles query descriptors into `SurrealQL`.
///
/// The grammar holds only its configuration; compiling is pure and the same
/// grammar can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    config: GrammarConfig,
}

impl Grammar {
    /// Creates a grammar with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a grammar from a configuration.
    #[must_use]
    pub const fn with_config(config: GrammarConfig) -> Self {
        Self { config }
    }

    /// Creates a grammar prefixing every table name.
    #[must_use]
    pub fn with_table_prefix(prefix: impl Into<String>) -> Self {
        Self::with_config(GrammarConfig {
            table_prefix: prefix.into(),
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &GrammarConfig {
        &self.config
    }

    fn finish(kind: StatementKind, fragment: Fragment) -> CompiledStatement {
        debug!(
            statement = %kind,
            sql = %fragment.sql,
            bindings = fragment.bindings.len(),
            "Compiled statement"
        );
        CompiledStatement::new(kind, fragment.sql, fragment.bindings)
    }
}

/// A compiled piece of text and the bindings of its placeholders, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Fragment {
    pub(crate) sql: String,
    pub(crate) bindings: Vec<Binding>,
}

impl Fragment {
    /// Text without bindings.
    pub(crate) fn raw(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            bindings: vec![],
        }
    }

    /// A single placeholder bound to `value`.
    pub(crate) fn placeholder(value: Value) -> Self {
        Self {
            sql: String::from(PLACEHOLDER),
            bindings: vec![Binding::query(value)],
        }
    }

    /// Text with primary bindings.
    pub(crate) fn bound(sql: impl Into<String>, values: &[Value]) -> Self {
        Self {
            sql: sql.into(),
            bindings: values.iter().cloned().map(Binding::query).collect(),
        }
    }

    /// A spliced embedded function; its bindings go to the function channel.
    pub(crate) fn function(function: &EmbeddedFunction) -> Self {
        Self {
            sql: function.expression.clone(),
            bindings: function
                .bindings
                .iter()
                .cloned()
                .map(Binding::function)
                .collect(),
        }
    }

    /// Appends `other` directly after this fragment.
    pub(crate) fn append(&mut self, other: Self) {
        self.sql.push_str(&other.sql);
        self.bindings.extend(other.bindings);
    }

    /// Appends text without bindings.
    pub(crate) fn push_str(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Appends `other` separated by a single space, skipping empty fragments.
    pub(crate) fn push(&mut self, other: Self) {
        if other.sql.is_empty() {
            return;
        }
        if !self.sql.is_empty() {
            self.sql.push(' ');
        }
        self.append(other);
    }

    /// Joins fragments with `separator`, keeping binding order.
    pub(crate) fn join(parts: impl IntoIterator<Item = Self>, separator: &str) -> Self {
        let mut joined = Self::default();
        for (index, part) in parts.into_iter().enumerate() {
            if index > 0 {
                joined.push_str(separator);
            }
            joined.append(part);
        }
        joined
    }

    /// Surrounds the fragment with `open` and `close`.
    pub(crate) fn wrapped(self, open: &str, close: &str) -> Self {
        Self {
            sql: format!("{open}{}{close}", self.sql),
            bindings: self.bindings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_join_keeps_binding_order() {
        let joined = Fragment::join(
            vec![
                Fragment::placeholder(Value::Int(1)),
                Fragment::raw("x"),
                Fragment::function(&EmbeddedFunction::new("f($?)").bind(2_i64)),
            ],
            ", ",
        );
        assert_eq!(joined.sql, "$?, x, f($?)");
        assert_eq!(
            joined.bindings,
            vec![
                Binding::query(Value::Int(1)),
                Binding::function(Value::Int(2)),
            ]
        );
    }

    #[test]
    fn test_fragment_push_skips_empty() {
        let mut fragment = Fragment::raw("SELECT *");
        fragment.push(Fragment::default());
        fragment.push(Fragment::raw("FROM `a`"));
        assert_eq!(fragment.sql, "SELECT * FROM `a`");
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: GrammarConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GrammarConfig::default());
        let config: GrammarConfig = serde_json::from_str(r#"{"table_prefix": "app_"}"#).unwrap();
        assert_eq!(Grammar::with_config(config).config().table_prefix, "app_");
    }
}
