//! Style values and partial style maps.
//!
//! A [`StyleMap`] is the unit every cascade layer is stored in. It is
//! *partial*: an absent key means "not set at this layer", so merging a map
//! over another only replaces the properties it actually defines.
//!
//! ```rust
//! use cascade::types::{StyleMap, StyleValue};
//!
//! let mut base = StyleMap::new();
//! base.insert("color", "black");
//! base.insert("fontSize", "1rem");
//!
//! let mut hover = StyleMap::new();
//! hover.insert("color", "red");
//!
//! base.merge(&hover);
//! assert_eq!(base.get("color"), Some(&StyleValue::from("red")));
//! assert_eq!(base.get("fontSize"), Some(&StyleValue::from("1rem")));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single property value: either a bare number (`16`) or a string (`"1rem"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Text(String),
}

impl StyleValue {
    /// Returns the string form if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s),
            StyleValue::Number(_) => None,
        }
    }

    /// Returns the numeric form if this is a number value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            StyleValue::Text(_) => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole numbers print without a trailing ".0"
            StyleValue::Number(n) if n.fract() == 0.0 && n.is_finite() => write!(f, "{n:.0}"),
            StyleValue::Number(n) => write!(f, "{n}"),
            StyleValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Number(f64::from(value))
    }
}

/// A partial mapping from property name to value.
///
/// Keys are kept sorted so that iteration and [`Display`](fmt::Display)
/// output are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleMap(BTreeMap<String, StyleValue>);

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.0.get(property)
    }

    /// Sets a property, returning the value it replaced.
    pub fn insert(
        &mut self,
        property: impl Into<String>,
        value: impl Into<StyleValue>,
    ) -> Option<StyleValue> {
        self.0.insert(property.into(), value.into())
    }

    pub fn remove(&mut self, property: &str) -> Option<StyleValue> {
        self.0.remove(property)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.0.contains_key(property)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Shallow right-biased merge: every property of `other` replaces the
    /// one stored here. Merging the same map twice is the same as once.
    pub fn merge(&mut self, other: &StyleMap) {
        for (property, value) in &other.0 {
            self.0.insert(property.clone(), value.clone());
        }
    }

    /// Builder form of [`merge`](Self::merge).
    pub fn layered(mut self, other: &StyleMap) -> Self {
        self.merge(other);
        self
    }

    /// Merges `other` underneath this map: only properties missing here are
    /// taken from `other`.
    pub fn fill_from(&mut self, other: &StyleMap) {
        for (property, value) in &other.0 {
            self.0
                .entry(property.clone())
                .or_insert_with(|| value.clone());
        }
    }
}

impl<K, V> FromIterator<(K, V)> for StyleMap
where
    K: Into<String>,
    V: Into<StyleValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a StyleMap {
    type Item = (&'a String, &'a StyleValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, StyleValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for StyleMap {
    /// Renders as `key: value; key: value`, sorted by key.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{property}: {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_replaces_only_defined_properties() {
        let mut base: StyleMap = [("color", "black"), ("display", "flex")].into_iter().collect();
        let top: StyleMap = [("color", "red")].into_iter().collect();

        base.merge(&top);

        assert_eq!(base.get("color"), Some(&StyleValue::from("red")));
        assert_eq!(base.get("display"), Some(&StyleValue::from("flex")));
    }

    #[test]
    fn merge_is_idempotent() {
        let base: StyleMap = [("a", 1)].into_iter().collect();
        let edit: StyleMap = [("x", 1)].into_iter().collect();

        let once = base.clone().layered(&edit);
        let twice = base.layered(&edit).layered(&edit);

        assert_eq!(once, twice);
    }

    #[test]
    fn fill_from_keeps_existing_keys() {
        let mut existing: StyleMap = [("fontSize", "3rem")].into_iter().collect();
        let derived: StyleMap = [("fontSize", "2.1rem"), ("flexDirection", "column")]
            .into_iter()
            .collect();

        existing.fill_from(&derived);

        assert_eq!(existing.get("fontSize"), Some(&StyleValue::from("3rem")));
        assert_eq!(existing.get("flexDirection"), Some(&StyleValue::from("column")));
    }

    #[test]
    fn display_is_sorted_and_trims_whole_numbers() {
        let mut map = StyleMap::new();
        map.insert("zIndex", 2);
        map.insert("color", "red");
        map.insert("opacity", 0.5);

        assert_eq!(map.to_string(), "color: red; opacity: 0.5; zIndex: 2");
    }

    #[test]
    fn whole_numbers_beyond_i64_print_in_full() {
        assert_eq!(StyleValue::Number(1e20).to_string(), "100000000000000000000");
        assert_eq!(StyleValue::Number(-3.0).to_string(), "-3");
    }

    #[test]
    fn deserializes_mixed_values() {
        let map: StyleMap = serde_json::from_str(r#"{"width": 120, "color": "red"}"#).unwrap();

        assert_eq!(map.get("width"), Some(&StyleValue::Number(120.0)));
        assert_eq!(map.get("color").and_then(StyleValue::as_str), Some("red"));
    }
}
