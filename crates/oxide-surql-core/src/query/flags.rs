//! Statement flags: RETURN, TIMEOUT and PARALLEL.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What a write statement returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Return {
    /// Nothing.
    None,
    /// Records as they were before the change.
    Before,
    /// Records as they are after the change.
    After,
    /// The change set.
    Diff,
}

impl Return {
    /// Returns the RETURN keyword argument.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Before => "BEFORE",
            Self::After => "AFTER",
            Self::Diff => "DIFF",
        }
    }
}

/// Flags appended after the clauses of a statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryFlags {
    /// `RETURN ...`, only emitted on write statements.
    pub returning: Option<Return>,
    /// `TIMEOUT ...`
    pub timeout: Option<Duration>,
    /// `PARALLEL`
    pub parallel: bool,
}
