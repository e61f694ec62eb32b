//! Identifier quoting.

use std::sync::OnceLock;

use regex::Regex;

use super::{Fragment, Grammar};
use crate::error::Result;
use crate::query::Column;
use crate::record::RecordId;

/// Character that marks object/array traversal in a column.
pub const PATH_SEPARATOR: char = '.';

fn alias_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\s+AS\s+").expect("Invalid alias pattern regex"))
}

impl Grammar {
    /// Wraps a table reference.
    ///
    /// Record references (`table:id`) become a JSON string literal; anything
    /// else is quoted as an identifier, with the configured prefix.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::InvalidIdentifier`](crate::CompileError) for a
    /// reference with more than one `:` separator.
    pub fn wrap_table(&self, table: &str) -> Result<String> {
        let prefixed = format!("{}{table}", self.config.table_prefix);
        if RecordId::is_record(table) {
            RecordId::parse(table)?;
            return Ok(serde_json::Value::String(prefixed).to_string());
        }
        Ok(self.wrap_segments(&prefixed, true))
    }

    /// Wraps a column name, alias or path.
    #[must_use]
    pub fn wrap_name(&self, value: &str) -> String {
        self.wrap_segments(value, false)
    }

    /// Wraps a single identifier in backticks, doubling embedded backticks.
    #[must_use]
    pub fn wrap_value(value: &str) -> String {
        if value == "*" {
            return String::from(value);
        }
        format!("`{}`", value.replace('`', "``"))
    }

    /// Wraps a column; embedded functions carry their bindings along.
    pub(crate) fn wrap(&self, column: &Column) -> Fragment {
        match column {
            Column::Name(name) => Fragment::raw(self.wrap_name(name)),
            Column::Raw(expression) => Fragment::raw(expression.raw.clone()),
            Column::Function(function) => Fragment::function(function),
        }
    }

    /// Wraps and comma-joins columns.
    pub(crate) fn columnize(&self, columns: &[Column]) -> Fragment {
        Fragment::join(columns.iter().map(|column| self.wrap(column)), ", ")
    }

    fn wrap_segments(&self, value: &str, prefix_alias: bool) -> String {
        if let Some(found) = alias_pattern().find(value) {
            let alias = &value[found.end()..];
            let alias = if prefix_alias {
                format!("{}{alias}", self.config.table_prefix)
            } else {
                String::from(alias)
            };
            return format!(
                "{} AS {}",
                self.wrap_segments(&value[..found.start()], false),
                Self::wrap_value(&alias)
            );
        }

        // Dotted paths are traversed natively and stay unquoted.
        if value.contains(PATH_SEPARATOR) {
            return String::from(value);
        }

        Self::wrap_value(value)
    }
}
