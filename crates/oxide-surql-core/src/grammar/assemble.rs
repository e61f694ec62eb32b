//! Placeholders, spliced expressions and value lists.

use super::{Fragment, Grammar};
use crate::query::ValuesMap;
use crate::value::Param;

impl Grammar {
    /// Compiles a value slot.
    ///
    /// Literals become a placeholder, raw expressions are emitted verbatim and
    /// embedded functions are spliced with their own bindings.
    pub(crate) fn parameter(param: &Param) -> Fragment {
        match param {
            Param::Value(value) => Fragment::placeholder(value.clone()),
            Param::Raw(expression) => Fragment::raw(expression.raw.clone()),
            Param::Function(function) => Fragment::function(function),
        }
    }

    /// Compiles a comma-separated list of value slots.
    pub(crate) fn parameterize<'a>(params: impl IntoIterator<Item = &'a Param>) -> Fragment {
        Fragment::join(params.into_iter().map(Self::parameter), ", ")
    }

    /// Compiles values into a `CONTENT { ... }` object, keys in map order.
    pub(crate) fn compile_content(values: &ValuesMap) -> Option<Fragment> {
        if values.is_empty() {
            return None;
        }

        let attributes = Fragment::join(
            values.iter().map(|(key, value)| {
                let mut attribute = Fragment::raw(format!("{} : ", json_key(key)));
                attribute.append(Self::parameter(value));
                attribute
            }),
            ", ",
        );
        Some(attributes.wrapped("CONTENT { ", " }"))
    }

    /// Compiles values into `key = $?` assignments, keys quoted.
    pub(crate) fn compile_assignments(&self, values: &ValuesMap) -> Fragment {
        Fragment::join(
            values.iter().map(|(key, value)| {
                let mut assignment = Fragment::raw(format!("{} = ", self.wrap_name(key)));
                assignment.append(Self::parameter(value));
                assignment
            }),
            ", ",
        )
    }
}

fn json_key(key: &str) -> String {
    serde_json::Value::String(String::from(key)).to_string()
}
