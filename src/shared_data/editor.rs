//! Editor-facing property contract, compiled only with the `editor` feature.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use crate::serialization::SerializerElement;

/// Ordered property listing shown by the editor, keyed by property name.
pub type PropertyMap = IndexMap<String, PropertyDescriptor>;

/// Widget hint for a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PropertyType {
    Number,
    Integer,
    Boolean,
    String,
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Number => "Number",
            Self::Integer => "Integer",
            Self::Boolean => "Boolean",
            Self::String => "String",
        };
        f.write_str(name)
    }
}

/// One entry of a property listing: the current value rendered as text plus display metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDescriptor {
    pub value: String,
    pub value_type: PropertyType,
    pub label: String,
    pub description: String,
    pub group: String,
    pub extra_info: Vec<String>,
}

impl PropertyDescriptor {
    pub fn new(value: impl Into<String>, value_type: PropertyType) -> Self {
        Self {
            value: value.into(),
            value_type,
            label: String::new(),
            description: String::new(),
            group: String::new(),
            extra_info: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn with_extra_info(mut self, info: impl Into<String>) -> Self {
        self.extra_info.push(info.into());
        self
    }
}

/// Property reflection over a shared-data content node.
pub trait SharedDataEditor {
    /// Lists every configurable property of `content` without modifying it.
    fn properties(&self, content: &SerializerElement) -> PropertyMap;

    /// Parses `value` into the property `name` and commits it to `content`.
    ///
    /// Returns `false` and leaves `content` untouched when the name is unknown,
    /// the text does not parse, or the value breaks a field invariant.
    fn update_property(&mut self, content: &mut SerializerElement, name: &str, value: &str)
        -> bool;
}
