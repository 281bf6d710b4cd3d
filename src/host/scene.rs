use indexmap::{IndexMap, IndexSet};

use super::{
    catalog::{BehaviorCatalog, BehaviorTypeId},
    error::HostError,
};
use crate::{
    config::SHARED_DATA_NODE,
    serialization::SerializerElement,
    shared_data::SharedDataEntry,
    world::WorldBinding,
};

/// Scene-scoped registry holding at most one shared-data entry per behavior type.
#[derive(Debug, Clone, Default)]
pub struct SceneSharedData {
    entries: IndexMap<BehaviorTypeId, SharedDataEntry>,
    /// Persisted content of types not referenced yet, or not known to the catalog.
    pending: IndexMap<BehaviorTypeId, SerializerElement>,
    /// Types present in the persisted content, in their persisted order.
    loaded: IndexSet<BehaviorTypeId>,
}

impl SceneSharedData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the persisted shared-data content of a scene node.
    pub fn from_scene_content(scene: &SerializerElement) -> Self {
        let pending: IndexMap<BehaviorTypeId, SerializerElement> = scene
            .child(SHARED_DATA_NODE)
            .map(|node| {
                node.children()
                    .map(|(name, content)| (BehaviorTypeId::new(name), content.clone()))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            entries: IndexMap::new(),
            loaded: pending.keys().cloned().collect(),
            pending,
        }
    }

    /// Returns the entry of `behavior_type`, creating it on first reference.
    ///
    /// A new entry starts from the engine defaults and is then overlaid with
    /// the persisted content, if the scene had any for that type.
    pub fn get_or_create(
        &mut self,
        behavior_type: &BehaviorTypeId,
        catalog: &BehaviorCatalog,
    ) -> Result<&mut SharedDataEntry, HostError> {
        if !self.entries.contains_key(behavior_type) {
            let data = catalog
                .create(behavior_type)
                .ok_or_else(|| HostError::UnknownBehaviorType(behavior_type.clone()))?;
            let mut entry = SharedDataEntry::new(data);
            if let Some(persisted) = self.pending.shift_remove(behavior_type) {
                entry.load(&persisted);
            }
            log::debug!("created shared data for {behavior_type}");
            self.entries.insert(behavior_type.clone(), entry);
        }
        self.entries
            .get_mut(behavior_type)
            .ok_or_else(|| HostError::UnknownBehaviorType(behavior_type.clone()))
    }

    pub fn get(&self, behavior_type: &BehaviorTypeId) -> Option<&SharedDataEntry> {
        self.entries.get(behavior_type)
    }

    pub fn get_mut(&mut self, behavior_type: &BehaviorTypeId) -> Option<&mut SharedDataEntry> {
        self.entries.get_mut(behavior_type)
    }

    pub fn behavior_types(&self) -> impl Iterator<Item = &BehaviorTypeId> {
        self.entries.keys()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes every persisted type in its persisted order, then types created
    /// since load, under the shared-data node. Other children of `scene` are kept.
    pub fn save_into(&self, scene: &mut SerializerElement) {
        let node = scene.add_child(SHARED_DATA_NODE);
        for behavior_type in &self.loaded {
            let content = match self.entries.get(behavior_type) {
                Some(entry) => entry.save(),
                None => match self.pending.get(behavior_type) {
                    Some(content) => content.clone(),
                    None => continue,
                },
            };
            node.set_child(behavior_type.as_str(), content);
        }
        for (behavior_type, entry) in &self.entries {
            if !self.loaded.contains(behavior_type) {
                node.set_child(behavior_type.as_str(), entry.save());
            }
        }
    }
}

/// A loaded scene as seen by the host.
pub struct Scene {
    pub(crate) name: String,
    pub(crate) shared: SceneSharedData,
    /// Scene node as loaded; saving writes the shared data back into a copy of it.
    pub(crate) content: SerializerElement,
    pub(crate) world: Option<Box<dyn WorldBinding>>,
}

impl Scene {
    pub fn load(name: impl Into<String>, content: &SerializerElement) -> Self {
        Self {
            name: name.into(),
            shared: SceneSharedData::from_scene_content(content),
            content: content.clone(),
            world: None,
        }
    }

    /// Independent deep copy of the scene's content and shared data, without its world.
    pub fn duplicate(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shared: self.shared.clone(),
            content: self.content.clone(),
            world: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shared(&self) -> &SceneSharedData {
        &self.shared
    }

    pub fn world_running(&self) -> bool {
        self.world.is_some()
    }

    /// Scene node with the current shared data written into it.
    pub fn save(&self) -> SerializerElement {
        let mut content = self.content.clone();
        self.shared.save_into(&mut content);
        content
    }

    /// Stops the world first, then drops the shared data it was built from.
    pub(crate) fn teardown(mut self) {
        if let Some(mut world) = self.world.take() {
            log::debug!("stopping world `{}` of scene `{}`", world.name(), self.name);
            world.stop();
            drop(world);
        }
        log::debug!(
            "dropping {} shared data entries of scene `{}`",
            self.shared.len(),
            self.name
        );
        drop(self.shared);
    }
}
