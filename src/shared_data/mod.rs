//! Capability set implemented by every behavior's per-scene shared data.

#[cfg(feature = "editor")]
pub mod editor;

#[cfg(feature = "editor")]
pub use editor::{PropertyDescriptor, PropertyMap, PropertyType, SharedDataEditor};

use std::any::Any;
use std::fmt;

use crate::serialization::SerializerElement;

/// Data shared by all instances of one behavior type within a scene.
///
/// The host keeps these as `Box<dyn BehaviorSharedData>` keyed by behavior type,
/// next to the content node they were loaded from.
pub trait BehaviorSharedData: Any + fmt::Debug {
    /// Deep copy used when duplicating scenes; never fails.
    fn clone_box(&self) -> Box<dyn BehaviorSharedData>;

    /// Writes the default value of every field into a fresh content node.
    fn initialize_content(&self, content: &mut SerializerElement);

    /// Replaces the typed state with what `content` holds, defaults for anything missing.
    fn unserialize_from(&mut self, content: &SerializerElement);

    /// Writes the typed state into `content`, keeping children it does not own.
    fn serialize_to(&self, content: &mut SerializerElement);

    fn as_any(&self) -> &dyn Any;

    #[cfg(feature = "editor")]
    fn editor(&self) -> Option<&dyn SharedDataEditor> {
        None
    }

    #[cfg(feature = "editor")]
    fn editor_mut(&mut self) -> Option<&mut dyn SharedDataEditor> {
        None
    }
}

impl Clone for Box<dyn BehaviorSharedData> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Shared data of one behavior type in one scene, with the content node backing it.
#[derive(Debug, Clone)]
pub struct SharedDataEntry {
    data: Box<dyn BehaviorSharedData>,
    content: SerializerElement,
}

impl SharedDataEntry {
    /// Builds an entry whose content holds the engine defaults.
    pub fn new(mut data: Box<dyn BehaviorSharedData>) -> Self {
        let mut content = SerializerElement::new();
        data.initialize_content(&mut content);
        data.unserialize_from(&content);
        Self { data, content }
    }

    /// Overlays persisted content on the current one and reloads the typed state.
    pub fn load(&mut self, persisted: &SerializerElement) {
        self.content.merge_from(persisted);
        self.data.unserialize_from(&self.content);
    }

    /// Content to persist, including children this version does not understand.
    pub fn save(&self) -> SerializerElement {
        let mut content = self.content.clone();
        self.data.serialize_to(&mut content);
        content
    }

    pub fn content(&self) -> &SerializerElement {
        &self.content
    }

    pub fn data(&self) -> &dyn BehaviorSharedData {
        self.data.as_ref()
    }

    pub fn downcast_ref<T: BehaviorSharedData>(&self) -> Option<&T> {
        self.data.as_any().downcast_ref::<T>()
    }

    #[cfg(feature = "editor")]
    pub fn properties(&self) -> Option<PropertyMap> {
        self.data
            .editor()
            .map(|editor| editor.properties(&self.content))
    }

    #[cfg(feature = "editor")]
    pub fn update_property(&mut self, name: &str, value: &str) -> bool {
        let Self { data, content } = self;
        data.editor_mut()
            .map(|editor| editor.update_property(content, name, value))
            .unwrap_or(false)
    }
}
