//! Column references.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::value::{EmbeddedFunction, Expression};

/// A column, alias, path or computed expression in a clause.
///
/// In JSON a string is a name; an object names its kind with a single
/// `name`, `raw` or `function` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", remote = "Self")]
pub enum Column {
    /// A name, optionally aliased (`name AS n`) or a dotted path.
    Name(String),
    /// A raw expression emitted verbatim.
    Raw(Expression),
    /// A computed expression with its own bindings.
    Function(EmbeddedFunction),
}

impl Serialize for Column {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Name(name) => serializer.serialize_str(name),
            _ => Self::serialize(self, serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Column {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(name) => Ok(Self::Name(name)),
            tagged => Self::deserialize(tagged).map_err(D::Error::custom),
        }
    }
}

impl Column {
    /// Creates a raw column expression.
    #[must_use]
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw(Expression::new(sql))
    }

    /// Returns true if this is the plain name `name`.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        matches!(self, Self::Name(n) if n == name)
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Self::Name(String::from(name))
    }
}

impl From<String> for Column {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<EmbeddedFunction> for Column {
    fn from(function: EmbeddedFunction) -> Self {
        Self::Function(function)
    }
}

impl From<Expression> for Column {
    fn from(expression: Expression) -> Self {
        Self::Raw(expression)
    }
}
