use std::collections::BTreeMap;

use crate::convert::{Convertible, Value};

/// Values collected by initializers, shared with commands.
///
/// Keys are usually option ids. Also holds the positional inputs left over
/// after parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    values: BTreeMap<String, Value>,
    inputs: Vec<String>,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a typed value, returning the previous one.
    pub fn insert<T: Convertible>(&mut self, key: impl Into<String>, value: T) -> Option<Value> {
        self.insert_value(key, value.into_value())
    }

    /// Stores a tagged value, returning the previous one.
    pub fn insert_value(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(key.into(), value)
    }

    /// Tagged value under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Typed value under `key`; `None` if missing or of another kind.
    pub fn get_as<T: Convertible>(&self, key: &str) -> Option<T> {
        self.values.get(key).cloned().and_then(T::from_value)
    }

    /// Whether `key` holds a value.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Removes and returns the value under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values are stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Positional inputs from the last dispatch.
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub(super) fn set_inputs(&mut self, inputs: Vec<String>) {
        self.inputs = inputs;
    }
}
