//! Values, parameters and bindings.
//!
//! Literal values never appear in compiled text: they travel as bindings next
//! to a `$?` placeholder. Whether a parameter is a literal or a computed
//! expression is decided when the descriptor is built, through [`Param`].

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::record::RecordId;

/// A value bound to a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// NULL / NONE.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value (record ids travel as text too).
    Text(String),
    /// Array value.
    Array(Vec<Value>),
    /// Object value.
    Object(BTreeMap<String, Value>),
}

/// Trait for types that can be converted to bound values.
pub trait ToValue {
    /// Converts the value to a `Value`.
    fn to_value(self) -> Value;
}

impl ToValue for Value {
    fn to_value(self) -> Value {
        self
    }
}

impl ToValue for bool {
    fn to_value(self) -> Value {
        Value::Bool(self)
    }
}

impl ToValue for i64 {
    fn to_value(self) -> Value {
        Value::Int(self)
    }
}

impl ToValue for i32 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for u32 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for f64 {
    fn to_value(self) -> Value {
        Value::Float(self)
    }
}

impl ToValue for String {
    fn to_value(self) -> Value {
        Value::Text(self)
    }
}

impl ToValue for &str {
    fn to_value(self) -> Value {
        Value::Text(String::from(self))
    }
}

impl ToValue for RecordId {
    fn to_value(self) -> Value {
        Value::Text(self.to_string())
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(self) -> Value {
        Value::Array(self.into_iter().map(ToValue::to_value).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or(f64::NAN)), Self::Int),
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

/// A raw `SurrealQL` expression emitted verbatim, with no bindings.
///
/// **Warning**: Only use this for text that doesn't contain user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Expression {
    /// The expression text.
    pub raw: String,
}

impl Expression {
    /// Creates a raw expression.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}

/// A `SurrealQL` expression carrying its own ordered bindings.
///
/// The expression marks each of its parameters with `$?`; when spliced into a
/// statement its bindings land in the [`Channel::Function`] channel, in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmbeddedFunction {
    /// The expression text, e.g. `string::concat($?, name)`.
    pub expression: String,
    /// Values for the expression's placeholders, in order.
    #[serde(default)]
    pub bindings: Vec<Value>,
}

impl EmbeddedFunction {
    /// Creates an embedded function with no bindings.
    #[must_use]
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            bindings: vec![],
        }
    }

    /// Appends a binding for the next placeholder of the expression.
    #[must_use]
    pub fn bind<T: ToValue>(mut self, value: T) -> Self {
        self.bindings.push(value.to_value());
        self
    }
}

/// A value slot in a predicate or a values map.
///
/// In JSON a scalar or an array is a literal. An object must name its kind
/// with exactly one key: `{"value": ...}`, `{"raw": "..."}` or
/// `{"function": {"expression": "...", "bindings": [...]}}`. Object literals
/// therefore always go through `value` and can never be read as raw text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", remote = "Self")]
pub enum Param {
    /// A literal value, compiled to a placeholder.
    Value(Value),
    /// A raw expression emitted verbatim.
    Raw(Expression),
    /// A computed expression with its own bindings.
    Function(EmbeddedFunction),
}

impl Serialize for Param {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Self::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Param {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            tagged @ serde_json::Value::Object(_) => {
                Self::deserialize(tagged).map_err(D::Error::custom)
            }
            literal => Ok(Self::Value(Value::from(literal))),
        }
    }
}

impl Param {
    /// Creates a raw expression parameter.
    #[must_use]
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw(Expression::new(sql))
    }
}

impl From<EmbeddedFunction> for Param {
    fn from(function: EmbeddedFunction) -> Self {
        Self::Function(function)
    }
}

impl From<Expression> for Param {
    fn from(expression: Expression) -> Self {
        Self::Raw(expression)
    }
}

macro_rules! param_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Param {
                fn from(value: $ty) -> Self {
                    Self::Value(value.to_value())
                }
            }
        )*
    };
}

param_from_value!(Value, bool, i64, i32, u32, f64, String, &str, RecordId);

/// The channel a binding is delivered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Primary positional bindings of the statement.
    Query,
    /// Bindings contributed by spliced [`EmbeddedFunction`]s.
    Function,
}

/// A value paired with the channel it is bound through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    /// The bound value.
    pub value: Value,
    /// The binding channel.
    pub channel: Channel,
}

impl Binding {
    /// Creates a primary binding.
    #[must_use]
    pub const fn query(value: Value) -> Self {
        Self {
            value,
            channel: Channel::Query,
        }
    }

    /// Creates a function binding.
    #[must_use]
    pub const fn function(value: Value) -> Self {
        Self {
            value,
            channel: Channel::Function,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_value_conversions() {
        assert_eq!(true.to_value(), Value::Bool(true));
        assert_eq!(42_i32.to_value(), Value::Int(42));
        assert_eq!(2.5_f64.to_value(), Value::Float(2.5));
        assert_eq!("hello".to_value(), Value::Text(String::from("hello")));
        assert_eq!(None::<i32>.to_value(), Value::Null);
        assert_eq!(Some(42_i32).to_value(), Value::Int(42));
        assert_eq!(
            vec![1_i64, 2].to_value(),
            Value::Array(vec![Value::Int(1), Value::Int(2)])
        );
    }

    #[test]
    fn test_from_json() {
        let value = Value::from(serde_json::json!({"a": [1, 1.5, "x", null, true]}));
        let Value::Object(map) = value else {
            panic!("expected object");
        };
        assert_eq!(
            map["a"],
            Value::Array(vec![
                Value::Int(1),
                Value::Float(1.5),
                Value::Text(String::from("x")),
                Value::Null,
                Value::Bool(true),
            ])
        );
    }

    #[test]
    fn test_param_from_json() {
        let literal: Param = serde_json::from_str("\"alice\"").unwrap();
        assert_eq!(literal, Param::Value(Value::Text(String::from("alice"))));

        let raw: Param = serde_json::from_str(r#"{"raw": "time::now()"}"#).unwrap();
        assert_eq!(raw, Param::raw("time::now()"));

        let function: Param = serde_json::from_str(
            r#"{"function": {"expression": "math::max([$?, age])", "bindings": [18]}}"#,
        )
        .unwrap();
        assert_eq!(
            function,
            Param::Function(EmbeddedFunction::new("math::max([$?, age])").bind(18_i64))
        );
    }

    #[test]
    fn test_object_literal_stays_a_value() {
        let object: Param =
            serde_json::from_str(r#"{"value": {"raw": "(DELETE person)"}}"#).unwrap();
        let Param::Value(Value::Object(map)) = object else {
            panic!("expected object literal");
        };
        assert_eq!(map["raw"], Value::Text(String::from("(DELETE person)")));
    }

    #[test]
    fn test_untagged_object_is_rejected() {
        assert!(serde_json::from_str::<Param>(r#"{"city": "Lima"}"#).is_err());
        assert!(serde_json::from_str::<Param>(r#"{"expression": "now()"}"#).is_err());
        assert!(serde_json::from_str::<Param>(r#"{"raw": "a", "value": 1}"#).is_err());
    }

    #[test]
    fn test_param_serializes_tagged() {
        let json = serde_json::to_string(&vec![Param::from(1_i64), Param::raw("now()")]).unwrap();
        assert_eq!(json, r#"[{"value":1},{"raw":"now()"}]"#);
        let back: Vec<Param> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Param::from(1_i64), Param::raw("now()")]);
    }

    #[test]
    fn test_value_serializes_plain_json() {
        let json = serde_json::to_string(&Value::Array(vec![
            Value::Null,
            Value::Int(1),
            Value::Text(String::from("a")),
        ]))
        .unwrap();
        assert_eq!(json, r#"[null,1,"a"]"#);
    }
}
