//! Clause compilers shared by the statement compilers.

use super::interval::format_interval;
use super::{Fragment, Grammar};
use crate::error::{CompileError, Feature, Result};
use crate::query::{Aggregate, Column, OrderClause, QueryDescriptor, QueryFlags};

impl Grammar {
    /// `SELECT fn(columns) AS aggregate`, with the alias quoted.
    pub(crate) fn compile_aggregate(
        &self,
        query: &QueryDescriptor,
        aggregate: &Aggregate,
    ) -> Result<Fragment> {
        if query.distinct {
            return Err(CompileError::Unsupported(Feature::Distinct));
        }
        let columns = if aggregate.columns.is_empty() {
            Fragment::default()
        } else {
            self.columnize(&aggregate.columns)
        };
        Ok(columns.wrapped(
            &format!("SELECT {}(", aggregate.function),
            &format!(") AS {}", Self::wrap_value("aggregate")),
        ))
    }

    /// `SELECT columns[, graph edges]`
    pub(crate) fn compile_columns(
        &self,
        query: &QueryDescriptor,
        columns: &[Column],
    ) -> Result<Fragment> {
        if query.distinct {
            return Err(CompileError::Unsupported(Feature::Distinct));
        }
        let mut fragment = self.columnize(columns).wrapped("SELECT ", "");
        if !query.graph_edges.is_empty() {
            fragment.push_str(", ");
            fragment.push_str(&query.graph_edges.join(", "));
        }
        Ok(fragment)
    }

    /// `FROM table`
    pub(crate) fn compile_from(&self, table: &str) -> Result<Fragment> {
        Ok(Fragment::raw(format!("FROM {}", self.wrap_table(table)?)))
    }

    /// `GROUP BY columns`
    pub(crate) fn compile_groups(&self, groups: &[Column]) -> Option<Fragment> {
        (!groups.is_empty()).then(|| self.columnize(groups).wrapped("GROUP BY ", ""))
    }

    /// `ORDER BY entries`
    pub(crate) fn compile_orders(&self, orders: &[OrderClause]) -> Option<Fragment> {
        if orders.is_empty() {
            return None;
        }
        let entries = orders.iter().map(|order| match order {
            OrderClause::Raw { sql } => Fragment::raw(sql.clone()),
            OrderClause::Random => Fragment::raw("RAND()"),
            OrderClause::Column {
                column,
                kind,
                direction,
            } => {
                let mut entry = self.wrap(column);
                if let Some(kind) = kind {
                    entry.push_str(&format!(" {}", kind.to_uppercase()));
                }
                entry.push_str(&format!(" {}", direction.keyword()));
                entry
            }
        });
        Some(Fragment::join(entries, ", ").wrapped("ORDER BY ", ""))
    }

    pub(crate) fn compile_limit(limit: Option<u64>) -> Option<Fragment> {
        limit.map(|n| Fragment::raw(format!("LIMIT {n}")))
    }

    pub(crate) fn compile_offset(offset: Option<u64>) -> Option<Fragment> {
        offset.map(|n| Fragment::raw(format!("START {n}")))
    }

    pub(crate) fn compile_fetch(fields: &[String]) -> Option<Fragment> {
        (!fields.is_empty()).then(|| Fragment::raw(format!("FETCH {}", fields.join(", "))))
    }

    pub(crate) fn compile_split(fields: &[String]) -> Option<Fragment> {
        (!fields.is_empty()).then(|| Fragment::raw(format!("SPLIT {}", fields.join(", "))))
    }

    /// `RETURN mode TIMEOUT interval PARALLEL`, for write statements.
    pub(crate) fn compile_flags(flags: &QueryFlags) -> Option<Fragment> {
        let returning = flags
            .returning
            .map(|mode| format!("RETURN {}", mode.keyword()));
        Self::flags_fragment(returning, flags)
    }

    /// `TIMEOUT interval PARALLEL`, for SELECT.
    pub(crate) fn compile_flags_without_return(flags: &QueryFlags) -> Option<Fragment> {
        Self::flags_fragment(None, flags)
    }

    fn flags_fragment(returning: Option<String>, flags: &QueryFlags) -> Option<Fragment> {
        let parts: Vec<String> = [
            returning,
            flags
                .timeout
                .map(|timeout| format!("TIMEOUT {}", format_interval(timeout))),
            flags.parallel.then(|| String::from("PARALLEL")),
        ]
        .into_iter()
        .flatten()
        .collect();

        (!parts.is_empty()).then(|| Fragment::raw(parts.join(" ")))
    }
}
