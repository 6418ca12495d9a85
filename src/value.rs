//! Values produced by matching, and the objects they are bound onto
//!
//! - [`Value`] - text, an ordered aggregate, or a nested object
//! - [`Target`] - an object mutated by attribute bindings
//! - [`Record`] - a dynamic target used by runtime rule sets

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Reasons a target can give for rejecting an attribute binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AttributeError {
    /// The target has no attribute with this name
    #[error("unknown attribute")]
    Unknown,

    /// The value does not have the shape the attribute needs
    #[error("expected {expected}, found {found}")]
    Mismatch {
        /// What the attribute accepts
        expected: &'static str,
        /// What was produced
        found: &'static str,
    },

    /// The part produced the object being built rather than a value
    #[error("the object cannot be bound to itself")]
    SelfReference,
}

/// Downcasting support for target objects
pub trait AsAny: Any {
    /// Borrow as `Any`
    fn as_any(&self) -> &dyn Any;

    /// Convert a boxed value into a boxed `Any`
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// An object that attribute bindings are written onto
///
/// One instance is created per activation of a grammar-bearing type and is
/// only mutated while its own grammar is being matched.
pub trait Target: fmt::Debug + AsAny {
    /// Name of the object's type, used in diagnostics and output
    fn kind(&self) -> &str;

    /// Bind `value` to the attribute `name`
    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), AttributeError>;

    /// JSON rendering of the object
    fn to_json(&self) -> serde_json::Value;
}

/// Result produced by matching a grammar node
#[derive(Debug)]
pub enum Value {
    /// Text consumed by a terminal
    Text(String),
    /// Ordered aggregate of values
    Sequence(Vec<Value>),
    /// Object built by a nested grammar-bearing type or rule
    Object(Box<dyn Target>),
}

impl Value {
    /// The empty aggregate
    #[must_use]
    pub const fn empty() -> Self {
        Self::Sequence(Vec::new())
    }

    /// Short name of the variant
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Sequence(_) => "sequence",
            Self::Object(_) => "object",
        }
    }

    /// Check if this is an empty aggregate or empty text
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Sequence(items) => items.is_empty(),
            Self::Object(_) => false,
        }
    }

    /// Borrow the text, if this is text
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Borrow the items, if this is an aggregate
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the object, if this is an object
    #[must_use]
    pub fn as_object(&self) -> Option<&dyn Target> {
        match self {
            Self::Object(target) => Some(&**target),
            _ => None,
        }
    }

    /// Borrow the object as a concrete type
    #[must_use]
    pub fn downcast_ref<T: Target>(&self) -> Option<&T> {
        self.as_object().and_then(|target| target.as_any().downcast_ref::<T>())
    }

    /// Take the text out, if this is text
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Take the items out, if this is an aggregate
    #[must_use]
    pub fn into_sequence(self) -> Option<Vec<Self>> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Take the object out as a concrete type
    #[must_use]
    pub fn into_object<T: Target>(self) -> Option<T> {
        match self {
            Self::Object(target) => target.into_any().downcast::<T>().ok().map(|boxed| *boxed),
            _ => None,
        }
    }

    /// Merge this value into an aggregate
    ///
    /// Aggregates are spliced, non-empty text and objects are appended, empty
    /// text is dropped.
    pub fn flatten_into(self, aggregate: &mut Vec<Self>) {
        match self {
            Self::Sequence(items) => aggregate.extend(items),
            Self::Text(text) if text.is_empty() => {},
            other => aggregate.push(other),
        }
    }

    /// JSON rendering of the value
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Text(text) => serde_json::Value::String(text.clone()),
            Self::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(Self::to_json).collect())
            },
            Self::Object(target) => target.to_json(),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::Sequence(items)
    }
}

/// Dynamic target object: a kind plus named attributes
///
/// Binding a name twice keeps the last value.
#[derive(Debug, Default)]
pub struct Record {
    kind: String,
    attributes: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Get an attribute by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Remove an attribute, returning its value
    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.attributes.remove(name)
    }

    /// Iterate attributes in name order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of bound attributes
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Check if no attribute is bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl Target for Record {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), AttributeError> {
        self.attributes.insert(name.to_string(), value);
        Ok(())
    }

    fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert("$kind".to_string(), serde_json::Value::String(self.kind.clone()));
        for (name, value) in &self.attributes {
            map.insert(name.clone(), value.to_json());
        }
        serde_json::Value::Object(map)
    }
}
