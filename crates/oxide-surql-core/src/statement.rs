//! Compiled statements.

use std::fmt;

use serde::Serialize;

use crate::grammar::PLACEHOLDER;
use crate::value::{Binding, Channel, Value};

/// `SurrealQL` statement keywords the compiler produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatementKind {
    /// SELECT
    Select,
    /// INSERT
    Insert,
    /// CREATE
    Create,
    /// UPDATE
    Update,
    /// RELATE
    Relate,
    /// DELETE
    Delete,
}

impl StatementKind {
    /// Returns the leading keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Relate => "RELATE",
            Self::Delete => "DELETE",
        }
    }

    /// Returns true if the statement writes data.
    #[must_use]
    pub const fn is_write(self) -> bool {
        !matches!(self, Self::Select)
    }

    /// Classifies statement text by its leading keyword.
    #[must_use]
    pub fn detect(sql: &str) -> Option<Self> {
        let keyword = sql.split_whitespace().next()?;
        [
            Self::Select,
            Self::Insert,
            Self::Create,
            Self::Update,
            Self::Relate,
            Self::Delete,
        ]
        .into_iter()
        .find(|kind| kind.keyword().eq_ignore_ascii_case(keyword))
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Statement text plus its ordered bindings.
///
/// The Nth `$?` placeholder in the text corresponds to the Nth binding,
/// whichever channel the binding belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledStatement {
    kind: StatementKind,
    sql: String,
    bindings: Vec<Binding>,
}

impl CompiledStatement {
    pub(crate) const fn new(kind: StatementKind, sql: String, bindings: Vec<Binding>) -> Self {
        Self {
            kind,
            sql,
            bindings,
        }
    }

    /// Returns the statement kind.
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        self.kind
    }

    /// Returns the statement text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns every binding in placeholder order.
    #[must_use]
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Returns the values of the primary channel, in order.
    pub fn query_bindings(&self) -> impl Iterator<Item = &Value> {
        self.channel(Channel::Query)
    }

    /// Returns the values contributed by embedded functions, in order.
    pub fn function_bindings(&self) -> impl Iterator<Item = &Value> {
        self.channel(Channel::Function)
    }

    fn channel(&self, channel: Channel) -> impl Iterator<Item = &Value> {
        self.bindings
            .iter()
            .filter(move |binding| binding.channel == channel)
            .map(|binding| &binding.value)
    }

    /// Counts the placeholders in the text.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches(PLACEHOLDER).count()
    }

    /// Consumes the statement and returns text and bindings.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<Binding>) {
        (self.sql, self.bindings)
    }
}

impl fmt::Display for CompiledStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(StatementKind::detect("select * from foo"), Some(StatementKind::Select));
        assert_eq!(StatementKind::detect("  RELATE a:1->b->c:2"), Some(StatementKind::Relate));
        assert_eq!(StatementKind::detect("DEFINE TABLE foo"), None);
        assert_eq!(StatementKind::detect(""), None);
    }

    #[test]
    fn test_is_write() {
        assert!(!StatementKind::Select.is_write());
        assert!(StatementKind::Insert.is_write());
        assert!(StatementKind::Relate.is_write());
    }

    #[test]
    fn test_channels_split_in_order() {
        let statement = CompiledStatement::new(
            StatementKind::Create,
            String::from("CREATE `a` CONTENT { \"x\": $?, \"y\": f($?), \"z\": $? }"),
            vec![
                Binding::query(Value::Int(1)),
                Binding::function(Value::Int(2)),
                Binding::query(Value::Int(3)),
            ],
        );
        assert_eq!(statement.placeholder_count(), 3);
        assert_eq!(
            statement.query_bindings().collect::<Vec<_>>(),
            vec![&Value::Int(1), &Value::Int(3)]
        );
        assert_eq!(
            statement.function_bindings().collect::<Vec<_>>(),
            vec![&Value::Int(2)]
        );
    }
}
