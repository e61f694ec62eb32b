//! Ordered values for INSERT, CREATE, UPDATE, UPSERT and RELATE.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value::Param;

/// Ordered field → value pairs.
///
/// Insertion order is kept: it becomes the key order of the emitted content
/// object and of INSERT column lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValuesMap {
    entries: Vec<(String, Param)>,
}

impl ValuesMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: vec![] }
    }

    /// Sets a field, replacing an earlier value in place.
    #[must_use]
    pub fn set(mut self, key: &str, value: impl Into<Param>) -> Self {
        self.insert(String::from(key), value.into());
        self
    }

    /// Sets a field, replacing an earlier value in place.
    pub fn insert(&mut self, key: String, value: Param) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Returns the field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Returns the value of a field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Param> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns the values in order.
    pub fn values(&self) -> impl Iterator<Item = &Param> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Returns the pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Param>> FromIterator<(K, V)> for ValuesMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key.into(), value.into());
        }
        map
    }
}

impl Serialize for ValuesMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ValuesMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValuesMapVisitor;

        impl<'de> Visitor<'de> for ValuesMapVisitor {
            type Value = ValuesMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ValuesMap, A::Error> {
                let mut values = ValuesMap::new();
                while let Some((key, value)) = access.next_entry::<String, Param>()? {
                    values.insert(key, value);
                }
                Ok(values)
            }
        }

        deserializer.deserialize_map(ValuesMapVisitor)
    }
}

/// Records for a batch INSERT.
///
/// A single record is normalized into a one-element batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RowsRepr")]
pub struct Rows(Vec<ValuesMap>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RowsRepr {
    Many(Vec<ValuesMap>),
    One(ValuesMap),
}

impl From<RowsRepr> for Rows {
    fn from(repr: RowsRepr) -> Self {
        match repr {
            RowsRepr::Many(rows) => Self(rows),
            RowsRepr::One(row) => Self::from(row),
        }
    }
}

impl Rows {
    /// Returns the first record.
    #[must_use]
    pub fn first(&self) -> Option<&ValuesMap> {
        self.0.first()
    }

    /// Returns the records in order.
    pub fn iter(&self) -> impl Iterator<Item = &ValuesMap> {
        self.0.iter()
    }

    /// Returns true if no record carries a field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(ValuesMap::is_empty)
    }
}

impl From<ValuesMap> for Rows {
    fn from(row: ValuesMap) -> Self {
        Self(vec![row])
    }
}

impl From<Vec<ValuesMap>> for Rows {
    fn from(rows: Vec<ValuesMap>) -> Self {
        Self(rows)
    }
}

/// The update part of an UPSERT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpsertUpdate {
    /// Bare column names; rejected, `SurrealQL` needs a value per key.
    Columns(Vec<String>),
    /// Keyed values to set on conflict.
    Values(ValuesMap),
}

impl From<ValuesMap> for UpsertUpdate {
    fn from(values: ValuesMap) -> Self {
        Self::Values(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_keeps_insertion_order() {
        let values = ValuesMap::new().set("b", 1_i64).set("a", 2_i64).set("c", 3_i64);
        assert_eq!(values.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let values = ValuesMap::new().set("a", 1_i64).set("b", 2_i64).set("a", 3_i64);
        assert_eq!(values.len(), 2);
        assert_eq!(
            values.iter().next(),
            Some(("a", &Param::Value(Value::Int(3))))
        );
    }

    #[test]
    fn test_get() {
        let values = ValuesMap::new().set("a", 1_i64);
        assert_eq!(values.get("a"), Some(&Param::Value(Value::Int(1))));
        assert_eq!(values.get("b"), None);
    }

    #[test]
    fn test_deserializes_in_document_order() {
        let values: ValuesMap = serde_json::from_str(r#"{"z": 1, "m": 2, "a": 3}"#).unwrap();
        assert_eq!(values.keys().collect::<Vec<_>>(), vec!["z", "m", "a"]);
    }

    #[test]
    fn test_rows_accept_single_record() {
        let rows: Rows = serde_json::from_str(r#"{"name": "a"}"#).unwrap();
        assert_eq!(rows.iter().count(), 1);

        let rows: Rows = serde_json::from_str(r#"[{"name": "a"}, {"name": "b"}]"#).unwrap();
        assert_eq!(rows.iter().count(), 2);
    }

    #[test]
    fn test_upsert_update_shapes() {
        let columns: UpsertUpdate = serde_json::from_str(r#"["name"]"#).unwrap();
        assert!(matches!(columns, UpsertUpdate::Columns(_)));

        let values: UpsertUpdate = serde_json::from_str(r#"{"name": "a"}"#).unwrap();
        assert!(matches!(values, UpsertUpdate::Values(_)));
    }
}
