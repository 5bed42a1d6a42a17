// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Dynamic-shape search items
//!
//! Callers bring their own item shapes, so an item is a mapping from
//! property name to JSON value rather than a fixed schema. Matching and
//! highlighting only ever look at items through this mapping.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A candidate item with caller-defined properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchItem(Map<String, Value>);

impl SearchItem {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wrap a JSON value. Returns `None` when the value is not an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// The string form of a property, for matching and display.
    ///
    /// Strings are used verbatim; numbers and booleans via their display
    /// form. Null, arrays, and objects are treated as absent, so items with
    /// odd shapes degrade per property instead of erroring.
    pub fn property_text(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }

    /// Display text for the configured descriptor property, empty when the
    /// item does not carry it.
    pub fn descriptor_text(&self, descriptor_property: &str) -> String {
        self.property_text(descriptor_property).unwrap_or_default()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for SearchItem {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
