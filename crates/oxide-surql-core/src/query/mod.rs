//! Query descriptors.
//!
//! A [`QueryDescriptor`] is the caller's description of a statement: table,
//! columns, predicates, grouping, ordering, pagination and flags. It is plain
//! data; the [`Grammar`](crate::Grammar) turns it into `SurrealQL` text.
//!
//! # Example
//!
//! ```rust
//! use oxide_surql_core::query::{Direction, QueryDescriptor, WhereClause};
//!
//! let query = QueryDescriptor::table("person")
//!     .columns(["name", "age"])
//!     .where_clause(WhereClause::basic("age", ">=", 18_i64))
//!     .order_by("name", Direction::Asc)
//!     .limit(10);
//!
//! assert_eq!(query.wheres.len(), 1);
//! ```

mod column;
mod flags;
mod order;
mod values;
mod where_clause;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use column::Column;
pub use flags::{QueryFlags, Return};
pub use order::{Direction, OrderClause};
pub use values::{Rows, UpsertUpdate, ValuesMap};
pub use where_clause::{Boolean, DateUnit, Predicate, WhereClause};

use crate::error::Result;
use crate::record::RecordId;

/// An aggregate call replacing the column list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    /// Function name, e.g. `count` or `math::sum`.
    pub function: String,
    /// Function arguments.
    pub columns: Vec<Column>,
}

/// Row lock requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockMode {
    /// `LOCK IN SHARE MODE`
    Shared,
    /// `FOR UPDATE`
    Update,
}

/// A structured description of one statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryDescriptor {
    /// Table name or `table:id` record reference.
    pub from: String,
    /// Requested columns; `None` selects everything.
    pub columns: Option<Vec<Column>>,
    /// WHERE nodes in order.
    pub wheres: Vec<WhereClause>,
    /// GROUP BY columns.
    pub groups: Vec<Column>,
    /// ORDER BY entries.
    pub orders: Vec<OrderClause>,
    /// Maximum rows.
    pub limit: Option<u64>,
    /// Rows to skip.
    pub offset: Option<u64>,
    /// Aggregate replacing the column list.
    pub aggregate: Option<Aggregate>,
    /// Pre-rendered graph-edge projections appended to the column list.
    pub graph_edges: Vec<String>,
    /// Record links to fetch.
    pub fetch: Vec<String>,
    /// Fields to split results on.
    pub split: Vec<String>,
    /// RETURN / TIMEOUT / PARALLEL.
    pub flags: QueryFlags,
    /// Requested joins; never compiles.
    pub joins: Vec<String>,
    /// Requested unions; never compiles.
    pub unions: Vec<QueryDescriptor>,
    /// Requested HAVING fragments; never compiles.
    pub havings: Vec<String>,
    /// Requested row lock; never compiles.
    pub lock: Option<LockMode>,
    /// DISTINCT requested; never compiles.
    pub distinct: bool,
}

impl QueryDescriptor {
    /// Creates a descriptor over a table.
    #[must_use]
    pub fn table(name: &str) -> Self {
        Self {
            from: String::from(name),
            ..Self::default()
        }
    }

    /// Creates a descriptor addressing a single record.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::InvalidIdentifier`](crate::CompileError) if `id`
    /// is not a `table:key` reference.
    pub fn record(id: &str) -> Result<Self> {
        let id = RecordId::parse(id)?;
        Ok(Self::table(&id.to_string()))
    }

    /// Creates a descriptor finding a record through its table's `id` field.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::InvalidIdentifier`](crate::CompileError) if `id`
    /// is not a `table:key` reference.
    pub fn find(id: &str) -> Result<Self> {
        let id = RecordId::parse(id)?;
        Ok(Self::table(id.table())
            .where_clause(WhereClause::eq("id", id))
            .limit(1))
    }

    /// Sets the requested columns.
    #[must_use]
    pub fn columns<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a requested column.
    #[must_use]
    pub fn column(mut self, column: impl Into<Column>) -> Self {
        self.columns.get_or_insert_with(Vec::new).push(column.into());
        self
    }

    /// Adds a WHERE node.
    #[must_use]
    pub fn where_clause(mut self, clause: WhereClause) -> Self {
        self.wheres.push(clause);
        self
    }

    /// Adds an OR-connected WHERE node.
    #[must_use]
    pub fn or_where(mut self, clause: WhereClause) -> Self {
        self.wheres.push(clause.or());
        self
    }

    /// Adds GROUP BY columns.
    #[must_use]
    pub fn group_by<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        self.groups.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Adds an ORDER BY column.
    #[must_use]
    pub fn order_by(mut self, column: impl Into<Column>, direction: Direction) -> Self {
        self.orders.push(OrderClause::column(column, direction));
        self
    }

    /// Adds an ORDER BY entry.
    #[must_use]
    pub fn order(mut self, order: OrderClause) -> Self {
        self.orders.push(order);
        self
    }

    /// Orders results randomly.
    #[must_use]
    pub fn in_random_order(mut self) -> Self {
        self.orders.push(OrderClause::Random);
        self
    }

    /// Sets LIMIT.
    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Sets the number of rows to skip.
    #[must_use]
    pub const fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Replaces the column list with an aggregate call.
    #[must_use]
    pub fn aggregate<I, C>(mut self, function: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        self.aggregate = Some(Aggregate {
            function: String::from(function),
            columns: columns.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Appends a pre-rendered graph-edge projection such as `->likes->post AS liked`.
    #[must_use]
    pub fn graph_edge(mut self, projection: impl Into<String>) -> Self {
        self.graph_edges.push(projection.into());
        self
    }

    /// Fetches a record link.
    #[must_use]
    pub fn fetch(mut self, field: impl Into<String>) -> Self {
        self.fetch.push(field.into());
        self
    }

    /// Splits results on a field.
    #[must_use]
    pub fn split(mut self, field: impl Into<String>) -> Self {
        self.split.push(field.into());
        self
    }

    /// Sets what write statements return.
    #[must_use]
    pub const fn returning(mut self, returning: Return) -> Self {
        self.flags.returning = Some(returning);
        self
    }

    /// Sets TIMEOUT.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.flags.timeout = Some(timeout);
        self
    }

    /// Sets PARALLEL.
    #[must_use]
    pub const fn parallel(mut self) -> Self {
        self.flags.parallel = true;
        self
    }

    /// Requests a join.
    #[must_use]
    pub fn join(mut self, table: impl Into<String>) -> Self {
        self.joins.push(table.into());
        self
    }

    /// Requests a union.
    #[must_use]
    pub fn union(mut self, query: Self) -> Self {
        self.unions.push(query);
        self
    }

    /// Requests a HAVING fragment.
    #[must_use]
    pub fn having(mut self, sql: impl Into<String>) -> Self {
        self.havings.push(sql.into());
        self
    }

    /// Requests a row lock.
    #[must_use]
    pub const fn lock(mut self, mode: LockMode) -> Self {
        self.lock = Some(mode);
        self
    }

    /// Requests DISTINCT.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Param, Value};

    #[test]
    fn test_record_validates() {
        assert_eq!(QueryDescriptor::record("foo:bar").unwrap().from, "foo:bar");
        assert!(QueryDescriptor::record("foo").is_err());
        assert!(QueryDescriptor::record("foo:bar:quz").is_err());
    }

    #[test]
    fn test_find_targets_table_id() {
        let query = QueryDescriptor::find("foo:bar").unwrap();
        assert_eq!(query.from, "foo");
        assert_eq!(query.limit, Some(1));
        assert_eq!(
            query.wheres,
            vec![WhereClause::basic(
                "id",
                "=",
                Param::Value(Value::Text(String::from("foo:bar")))
            )]
        );
    }

    #[test]
    fn test_deserializes_with_defaults() {
        let query: QueryDescriptor = serde_json::from_str(
            r#"{"from": "person", "wheres": [{"type": "null", "column": "email"}], "limit": 5}"#,
        )
        .unwrap();
        assert_eq!(query.from, "person");
        assert!(query.columns.is_none());
        assert_eq!(query.limit, Some(5));
        assert_eq!(query.wheres, vec![WhereClause::null("email")]);
    }
}
