//! WHERE clause compilation.

use super::{Fragment, Grammar};
use crate::error::{CompileError, Feature, Result};
use crate::operator;
use crate::query::{Column, Predicate, WhereClause};
use crate::value::Param;

impl Grammar {
    /// Compiles the WHERE clause, or `None` when there is nothing to filter.
    pub(crate) fn compile_wheres(&self, wheres: &[WhereClause]) -> Result<Option<Fragment>> {
        Ok(self
            .compile_conditions(wheres)?
            .map(|conditions| conditions.wrapped("WHERE ", "")))
    }

    /// Compiles clauses joined by their connectors, dropping the first one.
    fn compile_conditions(&self, wheres: &[WhereClause]) -> Result<Option<Fragment>> {
        let mut conditions = Fragment::default();
        let mut first = true;

        for clause in wheres {
            let Some(predicate) = self.compile_predicate(&clause.predicate)? else {
                continue;
            };
            if !first {
                conditions.push_str(&format!(" {} ", clause.boolean.keyword()));
            }
            conditions.append(predicate);
            first = false;
        }

        Ok((!first).then_some(conditions))
    }

    /// Compiles one predicate; `None` for a group without conditions.
    fn compile_predicate(&self, predicate: &Predicate) -> Result<Option<Fragment>> {
        let fragment = match predicate {
            Predicate::Bitwise { .. } => return Err(CompileError::Unsupported(Feature::Bitwise)),
            Predicate::Basic {
                column,
                operator,
                value,
            } => Self::comparison(self.wrap(column), operator, Self::parameter(value)),
            Predicate::In { column, values } => self.membership(column, "CONTAINS", values, false),
            Predicate::NotIn { column, values } => {
                self.membership(column, "CONTAINSNONE", values, true)
            }
            Predicate::InRaw { column, values } => {
                self.inlined_membership(column, "CONTAINS", values, false)
            }
            Predicate::NotInRaw { column, values } => {
                self.inlined_membership(column, "CONTAINSNONE", values, true)
            }
            Predicate::Null { column } => {
                let mut fragment = self.wrap(column);
                fragment.push_str(" IS null");
                fragment
            }
            Predicate::NotNull { column } => {
                let mut fragment = self.wrap(column);
                fragment.push_str(" IS NOT null");
                fragment
            }
            Predicate::Between {
                column,
                low,
                high,
                negated,
            } => self.range(
                column,
                *negated,
                Self::parameter(low),
                Self::parameter(high),
            ),
            Predicate::BetweenColumns {
                column,
                low,
                high,
                negated,
            } => self.range(column, *negated, self.wrap(low), self.wrap(high)),
            Predicate::Column {
                first,
                operator,
                second,
            } => Self::comparison(self.wrap(first), operator, self.wrap(second)),
            Predicate::Nested { wheres } => match self.compile_conditions(wheres)? {
                Some(conditions) => conditions.wrapped("(", ")"),
                None => return Ok(None),
            },
            Predicate::Exists { query, negated } => {
                let inner = self.select_fragment(query)?;
                let expected = if *negated { "false" } else { "true" };
                inner.wrapped(&format!("{expected} = <bool> count(("), "))")
            }
            Predicate::Date {
                unit,
                column,
                operator,
                value,
            } => {
                let grouped = self
                    .wrap(column)
                    .wrapped("time::group(", &format!(", '{}')", unit.as_str()));
                Self::comparison(grouped, operator, Self::parameter(value))
            }
            Predicate::Raw { sql, bindings } => Fragment::bound(sql.clone(), bindings),
        };
        Ok(Some(fragment))
    }

    fn comparison(left: Fragment, op: &str, right: Fragment) -> Fragment {
        let mut fragment = left;
        fragment.push_str(&format!(" {} ", operator::resolve(op)));
        fragment.append(right);
        fragment
    }

    fn membership(
        &self,
        column: &Column,
        keyword: &str,
        values: &[Param],
        negated: bool,
    ) -> Fragment {
        if values.is_empty() {
            return Fragment::raw(always(negated));
        }
        let mut fragment = self.wrap(column);
        fragment.push_str(&format!(" {keyword} ["));
        fragment.append(Self::parameterize(values));
        fragment.push_str("]");
        fragment
    }

    fn inlined_membership(
        &self,
        column: &Column,
        keyword: &str,
        values: &[i64],
        negated: bool,
    ) -> Fragment {
        if values.is_empty() {
            return Fragment::raw(always(negated));
        }
        let inlined = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let mut fragment = self.wrap(column);
        fragment.push_str(&format!(" {keyword} [{inlined}]"));
        fragment
    }

    fn range(
        &self,
        column: &Column,
        negated: bool,
        low: Fragment,
        high: Fragment,
    ) -> Fragment {
        let keyword = if negated { "NOTINSIDE" } else { "INSIDE" };
        let mut fragment = self.wrap(column);
        fragment.push_str(&format!(" {keyword} "));
        fragment.append(low);
        fragment.push_str(" AND ");
        fragment.append(high);
        fragment
    }
}

/// Literal predicate for an empty membership list.
const fn always(holds: bool) -> &'static str {
    if holds {
        "1 = 1"
    } else {
        "0 = 1"
    }
}
