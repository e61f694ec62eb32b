//! Error types for statement compilation.
//!
//! Every error is raised while the statement is being built, so no text is
//! ever handed to a transport for a descriptor that cannot be expressed.

use std::fmt;

/// A relational feature with no `SurrealQL` equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Any kind of JOIN.
    Join,
    /// UNION / UNION ALL.
    Union,
    /// HAVING clauses.
    Having,
    /// DISTINCT, on plain selects and on aggregates.
    Distinct,
    /// Bitwise operator predicates.
    Bitwise,
    /// TRUNCATE TABLE.
    Truncate,
    /// Row-level lock hints (`FOR UPDATE`, `LOCK IN SHARE MODE`).
    Lock,
    /// Savepoints.
    Savepoint,
    /// BEGIN / COMMIT / CANCEL issued through the compiler.
    Transaction,
}

impl Feature {
    /// Returns an alternative the caller can use, if there is one.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::Join | Self::Union => Some("Use FETCH or <-/-> instead."),
            Self::Distinct => Some("Use GROUP BY instead."),
            _ => None,
        }
    }

    fn hint_suffix(self) -> String {
        self.hint()
            .map_or_else(String::new, |hint| format!(" {hint}"))
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Join => "JOIN operations",
            Self::Union => "UNION operations",
            Self::Having => "HAVING operations",
            Self::Distinct => "DISTINCT operations",
            Self::Bitwise => "bitwise operators",
            Self::Truncate => "TRUNCATE operations",
            Self::Lock => "row locks",
            Self::Savepoint => "savepoints",
            Self::Transaction => "transactions",
        };
        f.write_str(name)
    }
}

/// Errors raised while compiling a statement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// The descriptor uses a feature `SurrealQL` cannot express.
    #[error("SurrealDB does not support {}.{}", .0, .0.hint_suffix())]
    Unsupported(Feature),

    /// A record reference without exactly one `table:id` separator.
    #[error("The [{0}] is not a valid SurrealDB record ID. Should be [table:id]")]
    InvalidIdentifier(String),

    /// A write request the target cannot honour (e.g. UPSERT keys).
    #[error("{0}")]
    ConstraintViolation(String),
}

/// Result type for compilation.
pub type Result<T> = std::result::Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_message_with_hint() {
        let err = CompileError::Unsupported(Feature::Distinct);
        assert_eq!(
            err.to_string(),
            "SurrealDB does not support DISTINCT operations. Use GROUP BY instead."
        );
    }

    #[test]
    fn test_unsupported_message_without_hint() {
        let err = CompileError::Unsupported(Feature::Truncate);
        assert_eq!(err.to_string(), "SurrealDB does not support TRUNCATE operations.");
    }

    #[test]
    fn test_invalid_identifier_message() {
        let err = CompileError::InvalidIdentifier(String::from("foo"));
        assert_eq!(
            err.to_string(),
            "The [foo] is not a valid SurrealDB record ID. Should be [table:id]"
        );
    }
}
