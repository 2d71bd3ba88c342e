//! Insertion-ordered class → value map.
//!
//! Serialises as a JSON object whose keys follow vocabulary order, which keeps
//! the published document byte-stable across runs.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub struct ClassMap<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for ClassMap<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T> ClassMap<T> {
    /// Pair each class with the value at the same position.
    pub fn from_values(classes: &[String], values: impl IntoIterator<Item = T>) -> Self {
        Self { entries: classes.iter().cloned().zip(values).collect() }
    }

    /// Every class present, each mapped to `value`.
    pub fn filled(classes: &[String], value: T) -> Self
    where
        T: Clone,
    {
        Self::from_values(classes, std::iter::repeat(value))
    }

    pub fn get(&self, class: &str) -> Option<&T> {
        self.entries.iter().find(|(k, _)| k == class).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ClassMap<f64> {
    /// Area for `class`, 0 when the class is absent.
    pub fn area(&self, class: &str) -> f64 {
        self.get(class).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.values().sum()
    }
}

impl<T: Serialize> Serialize for ClassMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct ClassMapVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for ClassMapVisitor<T> {
    type Value = ClassMap<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object keyed by land-cover class")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((k, v)) = access.next_entry::<String, T>()? {
            entries.push((k, v));
        }
        Ok(ClassMap { entries })
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ClassMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ClassMapVisitor(PhantomData))
    }
}
