//! Shared physics configuration: gravity, world scale and solver iterations of a scene.

pub mod codec;
pub mod data;
#[cfg(feature = "editor")]
pub mod editor;
pub mod error;
pub mod fields;

pub use data::ScenePhysicsData;
pub use error::PropertyError;
pub use fields::{FieldKind, FieldSpec, FieldValue, PhysicsField, PHYSICS_FIELDS};

use std::any::Any;

use crate::{
    config::PHYSICS_BEHAVIOR_TYPE,
    serialization::SerializerElement,
    shared_data::BehaviorSharedData,
};
#[cfg(feature = "editor")]
use crate::shared_data::SharedDataEditor;

impl ScenePhysicsData {
    /// Behavior type this shared data belongs to.
    pub const BEHAVIOR_TYPE: &'static str = PHYSICS_BEHAVIOR_TYPE;

    pub fn boxed() -> Box<dyn BehaviorSharedData> {
        Box::new(Self::default())
    }
}

impl BehaviorSharedData for ScenePhysicsData {
    fn clone_box(&self) -> Box<dyn BehaviorSharedData> {
        Box::new(*self)
    }

    fn initialize_content(&self, content: &mut SerializerElement) {
        codec::encode_into(&ScenePhysicsData::default(), content);
    }

    fn unserialize_from(&mut self, content: &SerializerElement) {
        *self = codec::decode(content);
    }

    fn serialize_to(&self, content: &mut SerializerElement) {
        codec::encode_into(self, content);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    #[cfg(feature = "editor")]
    fn editor(&self) -> Option<&dyn SharedDataEditor> {
        Some(self)
    }

    #[cfg(feature = "editor")]
    fn editor_mut(&mut self) -> Option<&mut dyn SharedDataEditor> {
        Some(self)
    }
}
