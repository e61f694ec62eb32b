//! WHERE clause nodes.

use serde::{Deserialize, Serialize};

use super::{Column, QueryDescriptor};
use crate::value::{Param, Value};

/// Connector joining a predicate to the one before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boolean {
    /// AND connector.
    #[default]
    And,
    /// OR connector.
    Or,
}

impl Boolean {
    /// Returns the connector keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// Unit a date-based predicate truncates its column to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateUnit {
    /// Calendar year.
    Year,
    /// Calendar month.
    Month,
    /// Week.
    Week,
    /// Day.
    Day,
    /// Hour.
    Hour,
    /// Minute.
    Minute,
    /// Second.
    Second,
}

impl DateUnit {
    /// Returns the unit name understood by `time::group`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
        }
    }
}

/// The predicate of a WHERE clause node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Predicate {
    /// `column operator value`
    Basic {
        column: Column,
        operator: String,
        value: Param,
    },
    /// Column contains any of the values.
    In { column: Column, values: Vec<Param> },
    /// Column contains none of the values.
    NotIn { column: Column, values: Vec<Param> },
    /// Like `In`, with integers inlined instead of bound.
    InRaw { column: Column, values: Vec<i64> },
    /// Like `NotIn`, with integers inlined instead of bound.
    NotInRaw { column: Column, values: Vec<i64> },
    /// Column is null.
    Null { column: Column },
    /// Column is not null.
    NotNull { column: Column },
    /// Column lies between two values.
    Between {
        column: Column,
        low: Param,
        high: Param,
        #[serde(default)]
        negated: bool,
    },
    /// Column lies between two other columns.
    BetweenColumns {
        column: Column,
        low: Column,
        high: Column,
        #[serde(default)]
        negated: bool,
    },
    /// `first operator second`, both columns.
    Column {
        first: Column,
        operator: String,
        second: Column,
    },
    /// A parenthesised group of clauses.
    Nested { wheres: Vec<WhereClause> },
    /// A sub-select yields at least one row.
    Exists {
        query: Box<QueryDescriptor>,
        #[serde(default)]
        negated: bool,
    },
    /// A column truncated to a date unit compared against a value.
    Date {
        unit: DateUnit,
        column: Column,
        operator: String,
        value: Param,
    },
    /// Bitwise operator predicate; never compiles.
    Bitwise {
        column: Column,
        operator: String,
        value: Param,
    },
    /// Verbatim predicate text with its own positional bindings.
    Raw {
        sql: String,
        #[serde(default)]
        bindings: Vec<Value>,
    },
}

/// A WHERE clause node: a predicate and its connector to the previous node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhereClause {
    /// Connector to the previous node; ignored on the first one.
    #[serde(default)]
    pub boolean: Boolean,
    /// The predicate.
    #[serde(flatten)]
    pub predicate: Predicate,
}

impl WhereClause {
    /// Creates an AND-connected clause from a predicate.
    #[must_use]
    pub const fn new(predicate: Predicate) -> Self {
        Self {
            boolean: Boolean::And,
            predicate,
        }
    }

    /// Switches the connector to OR.
    #[must_use]
    pub fn or(mut self) -> Self {
        self.boolean = Boolean::Or;
        self
    }

    /// `column operator value`
    #[must_use]
    pub fn basic(column: impl Into<Column>, operator: &str, value: impl Into<Param>) -> Self {
        Self::new(Predicate::Basic {
            column: column.into(),
            operator: String::from(operator),
            value: value.into(),
        })
    }

    /// `column = value`
    #[must_use]
    pub fn eq(column: impl Into<Column>, value: impl Into<Param>) -> Self {
        Self::basic(column, "=", value)
    }

    /// Column contains any of the values.
    #[must_use]
    pub fn in_list<T: Into<Param>>(column: impl Into<Column>, values: Vec<T>) -> Self {
        Self::new(Predicate::In {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// Column contains none of the values.
    #[must_use]
    pub fn not_in_list<T: Into<Param>>(column: impl Into<Column>, values: Vec<T>) -> Self {
        Self::new(Predicate::NotIn {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// Column contains any of the integers, inlined.
    #[must_use]
    pub fn in_raw(column: impl Into<Column>, values: Vec<i64>) -> Self {
        Self::new(Predicate::InRaw {
            column: column.into(),
            values,
        })
    }

    /// Column contains none of the integers, inlined.
    #[must_use]
    pub fn not_in_raw(column: impl Into<Column>, values: Vec<i64>) -> Self {
        Self::new(Predicate::NotInRaw {
            column: column.into(),
            values,
        })
    }

    /// Column is null.
    #[must_use]
    pub fn null(column: impl Into<Column>) -> Self {
        Self::new(Predicate::Null {
            column: column.into(),
        })
    }

    /// Column is not null.
    #[must_use]
    pub fn not_null(column: impl Into<Column>) -> Self {
        Self::new(Predicate::NotNull {
            column: column.into(),
        })
    }

    /// Column lies between `low` and `high`.
    #[must_use]
    pub fn between(
        column: impl Into<Column>,
        low: impl Into<Param>,
        high: impl Into<Param>,
    ) -> Self {
        Self::new(Predicate::Between {
            column: column.into(),
            low: low.into(),
            high: high.into(),
            negated: false,
        })
    }

    /// Column lies outside `low` and `high`.
    #[must_use]
    pub fn not_between(
        column: impl Into<Column>,
        low: impl Into<Param>,
        high: impl Into<Param>,
    ) -> Self {
        Self::new(Predicate::Between {
            column: column.into(),
            low: low.into(),
            high: high.into(),
            negated: true,
        })
    }

    /// Column lies between two other columns.
    #[must_use]
    pub fn between_columns(
        column: impl Into<Column>,
        low: impl Into<Column>,
        high: impl Into<Column>,
        negated: bool,
    ) -> Self {
        Self::new(Predicate::BetweenColumns {
            column: column.into(),
            low: low.into(),
            high: high.into(),
            negated,
        })
    }

    /// Compares two columns.
    #[must_use]
    pub fn columns(first: impl Into<Column>, operator: &str, second: impl Into<Column>) -> Self {
        Self::new(Predicate::Column {
            first: first.into(),
            operator: String::from(operator),
            second: second.into(),
        })
    }

    /// A parenthesised group.
    #[must_use]
    pub fn nested(wheres: Vec<Self>) -> Self {
        Self::new(Predicate::Nested { wheres })
    }

    /// The sub-select yields at least one row.
    #[must_use]
    pub fn exists(query: QueryDescriptor) -> Self {
        Self::new(Predicate::Exists {
            query: Box::new(query),
            negated: false,
        })
    }

    /// The sub-select yields no rows.
    #[must_use]
    pub fn not_exists(query: QueryDescriptor) -> Self {
        Self::new(Predicate::Exists {
            query: Box::new(query),
            negated: true,
        })
    }

    /// Column truncated to `unit` compared against a value.
    #[must_use]
    pub fn date(
        unit: DateUnit,
        column: impl Into<Column>,
        operator: &str,
        value: impl Into<Param>,
    ) -> Self {
        Self::new(Predicate::Date {
            unit,
            column: column.into(),
            operator: String::from(operator),
            value: value.into(),
        })
    }

    /// Bitwise predicate. Compiling it always fails.
    #[must_use]
    pub fn bitwise(column: impl Into<Column>, operator: &str, value: impl Into<Param>) -> Self {
        Self::new(Predicate::Bitwise {
            column: column.into(),
            operator: String::from(operator),
            value: value.into(),
        })
    }

    /// Verbatim predicate text.
    ///
    /// **Warning**: Only use this for text that doesn't contain user input.
    #[must_use]
    pub fn raw(sql: impl Into<String>, bindings: Vec<Value>) -> Self {
        Self::new(Predicate::Raw {
            sql: sql.into(),
            bindings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_switches_connector() {
        let clause = WhereClause::eq("a", 1_i64);
        assert_eq!(clause.boolean, Boolean::And);
        assert_eq!(clause.or().boolean, Boolean::Or);
    }

    #[test]
    fn test_deserializes_tagged_predicate() {
        let clause: WhereClause = serde_json::from_str(
            r#"{"type": "between", "boolean": "or", "column": "age", "low": 18, "high": 65}"#,
        )
        .unwrap();
        assert_eq!(clause.boolean, Boolean::Or);
        assert_eq!(clause, WhereClause::between("age", 18_i64, 65_i64).or());
    }
}
