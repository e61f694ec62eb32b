//! ORDER BY entries.

use serde::{Deserialize, Serialize};

use super::Column;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl Direction {
    /// Returns the direction keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A single ORDER BY entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderClause {
    /// A verbatim fragment.
    Raw { sql: String },
    /// A column with an optional ordering type (`COLLATE`, `NUMERIC`).
    Column {
        column: Column,
        #[serde(default)]
        kind: Option<String>,
        #[serde(default)]
        direction: Direction,
    },
    /// Random order.
    Random,
}

impl OrderClause {
    /// Orders by a column.
    #[must_use]
    pub fn column(column: impl Into<Column>, direction: Direction) -> Self {
        Self::Column {
            column: column.into(),
            kind: None,
            direction,
        }
    }

    /// Orders by a column using an ordering type such as `numeric`.
    #[must_use]
    pub fn typed(column: impl Into<Column>, kind: &str, direction: Direction) -> Self {
        Self::Column {
            column: column.into(),
            kind: Some(String::from(kind)),
            direction,
        }
    }

    /// A verbatim ORDER BY fragment.
    #[must_use]
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw { sql: sql.into() }
    }
}
