//! Record identifiers.
//!
//! A record id addresses exactly one record as `table:key`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CompileError, Result};

/// Separator between the table and the key of a record id.
pub const RECORD_SEPARATOR: char = ':';

/// A validated `table:key` record reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId {
    table: String,
    key: String,
}

impl RecordId {
    /// Creates a record id from its table and key.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::InvalidIdentifier`] when the combined id does
    /// not contain exactly one separator.
    pub fn new(table: &str, key: &str) -> Result<Self> {
        Self::parse(&format!("{table}{RECORD_SEPARATOR}{key}"))
    }

    /// Parses a `table:key` string.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::InvalidIdentifier`] unless the input holds
    /// exactly one separator with a non-empty table and key on either side.
    pub fn parse(value: &str) -> Result<Self> {
        let mut parts = value.split(RECORD_SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(table), Some(key), None) if !table.is_empty() && !key.is_empty() => Ok(Self {
                table: String::from(table),
                key: String::from(key),
            }),
            _ => Err(CompileError::InvalidIdentifier(String::from(value))),
        }
    }

    /// Returns true if the reference looks like a record id rather than a table.
    #[must_use]
    pub fn is_record(reference: &str) -> bool {
        reference.contains(RECORD_SEPARATOR)
    }

    /// Returns the table name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{RECORD_SEPARATOR}{}", self.table, self.key)
    }
}

impl FromStr for RecordId {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RecordId {
    type Error = CompileError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_id() {
        let id = RecordId::parse("foo:bar").unwrap();
        assert_eq!(id.table(), "foo");
        assert_eq!(id.to_string(), "foo:bar");
    }

    #[test]
    fn test_new_matches_parse() {
        assert_eq!(
            RecordId::new("foo", "bar").unwrap(),
            RecordId::parse("foo:bar").unwrap()
        );
    }

    #[test]
    fn test_rejects_missing_separator() {
        let err = RecordId::parse("foo").unwrap_err();
        assert_eq!(
            err.to_string(),
            "The [foo] is not a valid SurrealDB record ID. Should be [table:id]"
        );
    }

    #[test]
    fn test_rejects_extra_separator() {
        let err = RecordId::parse("foo:bar:quz").unwrap_err();
        assert_eq!(err, CompileError::InvalidIdentifier(String::from("foo:bar:quz")));
        assert!(RecordId::new("foo", "bar:quz").is_err());
    }

    #[test]
    fn test_rejects_empty_sides() {
        assert!(RecordId::parse(":bar").is_err());
        assert!(RecordId::parse("foo:").is_err());
    }

    #[test]
    fn test_serde_round_trip_through_string() {
        let id: RecordId = serde_json::from_str("\"user:tobie\"").unwrap();
        assert_eq!(id.table(), "user");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"user:tobie\"");
        assert!(serde_json::from_str::<RecordId>("\"user\"").is_err());
    }
}
