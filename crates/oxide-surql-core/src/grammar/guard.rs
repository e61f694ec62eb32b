//! Rejection of relational features `SurrealQL` cannot express.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Grammar;
use crate::error::{CompileError, Feature, Result};
use crate::query::{Predicate, QueryDescriptor, WhereClause};

/// Transaction control statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionOp {
    /// BEGIN
    Begin,
    /// COMMIT
    Commit,
    /// CANCEL
    Cancel,
}

fn reject<T>(feature: Feature) -> Result<T> {
    debug!(feature = %feature, "Rejected unsupported feature");
    Err(CompileError::Unsupported(feature))
}

#[allow(clippy::unused_self)]
impl Grammar {
    /// Checks a descriptor for unsupported features before anything compiles.
    ///
    /// Joins are checked first, then unions, HAVING, DISTINCT, locks, and
    /// finally bitwise predicates, including inside nested groups and EXISTS
    /// sub-selects.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::Unsupported`] naming the first feature found.
    pub fn guard(&self, query: &QueryDescriptor) -> Result<()> {
        if !query.joins.is_empty() {
            return reject(Feature::Join);
        }
        if !query.unions.is_empty() {
            return reject(Feature::Union);
        }
        if !query.havings.is_empty() {
            return reject(Feature::Having);
        }
        if query.distinct {
            return reject(Feature::Distinct);
        }
        if query.lock.is_some() {
            return reject(Feature::Lock);
        }
        self.guard_wheres(&query.wheres)
    }

    fn guard_wheres(&self, wheres: &[WhereClause]) -> Result<()> {
        for clause in wheres {
            match &clause.predicate {
                Predicate::Bitwise { .. } => return reject(Feature::Bitwise),
                Predicate::Nested { wheres } => self.guard_wheres(wheres)?,
                Predicate::Exists { query, .. } => self.guard(query)?,
                _ => {}
            }
        }
        Ok(())
    }

    /// Always fails: `SurrealQL` has no TRUNCATE.
    ///
    /// # Errors
    ///
    /// Always returns [`CompileError::Unsupported`].
    pub fn compile_truncate(&self, query: &QueryDescriptor) -> Result<()> {
        debug!(table = %query.from, "Truncate requested");
        reject(Feature::Truncate)
    }

    /// Always fails: savepoints are not supported.
    ///
    /// # Errors
    ///
    /// Always returns [`CompileError::Unsupported`].
    pub fn compile_savepoint(&self, name: &str) -> Result<()> {
        debug!(savepoint = name, "Savepoint requested");
        reject(Feature::Savepoint)
    }

    /// Always fails: the compiler does not issue transaction control.
    ///
    /// # Errors
    ///
    /// Always returns [`CompileError::Unsupported`].
    pub fn compile_transaction(&self, op: TransactionOp) -> Result<()> {
        debug!(op = ?op, "Transaction control requested");
        reject(Feature::Transaction)
    }

    /// Returns whether savepoints can be compiled.
    #[must_use]
    pub const fn supports_savepoints(&self) -> bool {
        false
    }
}
