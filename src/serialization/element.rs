use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{SerializationError, SerializerValue};

/// Reserved object key holding the value of a node that also has children.
pub const VALUE_KEY: &str = "$value";

/// Node of the ordered, named key/value tree used for persistence and editor exchange.
///
/// A node holds an optional scalar value and any number of named children.
/// Children keep their insertion order, and replacing an existing child keeps
/// its position, so rewriting known keys never reshuffles unknown ones.
/// Array nodes key their children by index.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "ElementRepr", into = "ElementRepr")]
pub struct SerializerElement {
    value: Option<SerializerValue>,
    children: IndexMap<String, SerializerElement>,
    array: bool,
}

/// JSON shape of a node: a bare scalar for leaves, an array for index-keyed
/// array nodes, an object otherwise. A node with both a value and children
/// is an object whose first key is [`VALUE_KEY`].
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ElementRepr {
    Value(SerializerValue),
    Array(Vec<SerializerElement>),
    Children(IndexMap<String, SerializerElement>),
}

impl From<ElementRepr> for SerializerElement {
    fn from(repr: ElementRepr) -> Self {
        match repr {
            ElementRepr::Value(value) => Self::with_value(value),
            ElementRepr::Array(items) => {
                let mut node = Self::new_array();
                for item in items {
                    node.push(item);
                }
                node
            }
            ElementRepr::Children(mut children) => {
                let holds_value = children.len() > 1
                    && children
                        .get(VALUE_KEY)
                        .is_some_and(SerializerElement::is_scalar);
                let value = if holds_value {
                    children
                        .shift_remove(VALUE_KEY)
                        .and_then(|stored| stored.value)
                } else {
                    None
                };
                Self {
                    value,
                    children,
                    array: false,
                }
            }
        }
    }
}

impl From<SerializerElement> for ElementRepr {
    fn from(element: SerializerElement) -> Self {
        let SerializerElement {
            value,
            children,
            array,
        } = element;
        match value {
            Some(value) if children.is_empty() => ElementRepr::Value(value),
            Some(value) => {
                let mut object = IndexMap::with_capacity(children.len() + 1);
                object.insert(VALUE_KEY.to_owned(), SerializerElement::with_value(value));
                object.extend(children);
                ElementRepr::Children(object)
            }
            None if array && is_index_keyed(&children) => {
                ElementRepr::Array(children.into_values().collect())
            }
            None => ElementRepr::Children(children),
        }
    }
}

fn is_index_keyed(children: &IndexMap<String, SerializerElement>) -> bool {
    children
        .keys()
        .enumerate()
        .all(|(index, key)| *key == index.to_string())
}

impl SerializerElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<SerializerValue>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Empty array node; items are appended with [`SerializerElement::push`].
    pub fn new_array() -> Self {
        Self {
            array: true,
            ..Self::default()
        }
    }

    pub fn is_array(&self) -> bool {
        self.array
    }

    /// Appends an item keyed by its index.
    pub fn push(&mut self, item: SerializerElement) {
        let index = self.children.len().to_string();
        self.children.insert(index, item);
    }

    pub fn value(&self) -> Option<&SerializerValue> {
        self.value.as_ref()
    }

    pub fn set_value(&mut self, value: impl Into<SerializerValue>) {
        self.value = Some(value.into());
    }

    pub fn get_double(&self) -> Option<f64> {
        self.value.as_ref().and_then(SerializerValue::as_f64)
    }

    pub fn get_int(&self) -> Option<i64> {
        self.value.as_ref().and_then(SerializerValue::as_i64)
    }

    pub fn get_bool(&self) -> Option<bool> {
        self.value.as_ref().and_then(SerializerValue::as_bool)
    }

    pub fn get_string(&self) -> Option<&str> {
        self.value.as_ref().and_then(SerializerValue::as_str)
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    pub fn child(&self, name: &str) -> Option<&SerializerElement> {
        self.children.get(name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut SerializerElement> {
        self.children.get_mut(name)
    }

    /// Returns the named child, appending an empty one if it does not exist yet.
    pub fn add_child(&mut self, name: &str) -> &mut SerializerElement {
        self.children.entry(name.to_owned()).or_default()
    }

    /// Inserts or replaces a child; an existing child keeps its position.
    pub fn set_child(&mut self, name: &str, child: SerializerElement) {
        self.children.insert(name.to_owned(), child);
    }

    /// Writes a scalar child, replacing whatever was stored under `name`.
    pub fn set_child_value(&mut self, name: &str, value: impl Into<SerializerValue>) {
        self.set_child(name, Self::with_value(value));
    }

    /// Removes a child while preserving the order of the remaining ones.
    pub fn remove_child(&mut self, name: &str) -> Option<SerializerElement> {
        self.children.shift_remove(name)
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &SerializerElement)> {
        self.children
            .iter()
            .map(|(name, child)| (name.as_str(), child))
    }

    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    fn is_scalar(&self) -> bool {
        self.value.is_some() && self.children.is_empty() && !self.array
    }

    /// Overlays every child of `other` onto this node, replacing same-named children.
    pub fn merge_from(&mut self, other: &SerializerElement) {
        if let Some(value) = &other.value {
            self.value = Some(value.clone());
        }
        for (name, child) in &other.children {
            self.children.insert(name.clone(), child.clone());
        }
    }

    pub fn to_json(&self) -> Result<String, SerializationError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SerializationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, SerializationError> {
        Ok(serde_json::from_str(text)?)
    }
}
