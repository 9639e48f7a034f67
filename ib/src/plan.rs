//! The execution plan returned by the synthesis service
//!
//! The plan is opaque beyond its shape: a JSON object whose keys are section
//! names. Key order is the order the service sent them in.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A generated execution plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan(Map<String, Value>);

impl Plan {
    pub fn new(sections: Map<String, Value>) -> Self {
        Self(sections)
    }

    /// Build a plan from an arbitrary JSON value, if it is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Section keys and values in insertion order
    pub fn sections(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}
