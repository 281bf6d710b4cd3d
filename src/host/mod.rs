//! Behavior host: owns scenes and, per scene, one shared-data entry per behavior type.

pub mod catalog;
pub mod error;
pub mod scene;

pub use catalog::{BehaviorCatalog, BehaviorTypeId, SharedDataFactory};
pub use error::HostError;
pub use scene::{Scene, SceneSharedData};

use crate::{
    physics::ScenePhysicsData,
    serialization::SerializerElement,
    shared_data::SharedDataEntry,
    utils::{
        allocator::{Arena, SceneId},
        logging::ScopedTimer,
    },
    world::WorldBinding,
};
#[cfg(feature = "editor")]
use crate::shared_data::PropertyMap;

/// Central registry orchestrating scene lifetimes, shared data and simulation worlds.
///
/// All access happens from the frame loop thread: editor mutations between
/// frames, world steps during a frame. Nothing here locks or blocks.
pub struct BehaviorHost {
    catalog: BehaviorCatalog,
    scenes: Arena<Scene>,
}

impl Default for BehaviorHost {
    fn default() -> Self {
        Self::new(BehaviorCatalog::with_builtin())
    }
}

impl BehaviorHost {
    pub fn new(catalog: BehaviorCatalog) -> Self {
        Self {
            catalog,
            scenes: Arena::new(),
        }
    }

    pub fn catalog(&self) -> &BehaviorCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut BehaviorCatalog {
        &mut self.catalog
    }

    /// Loads a scene from its persisted node. Shared data is created lazily on first reference.
    pub fn load_scene(&mut self, name: impl Into<String>, content: &SerializerElement) -> SceneId {
        let scene = Scene::load(name, content);
        let name = scene.name.clone();
        let id = self.scenes.insert(scene);
        log::debug!("loaded scene `{name}` as {id}");
        id
    }

    pub fn scene(&self, scene: SceneId) -> Option<&Scene> {
        self.scenes.get(scene)
    }

    pub fn scene_ids(&self) -> impl Iterator<Item = SceneId> + '_ {
        self.scenes.ids()
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Marks `behavior_type` as used in `scene`, creating its shared data if needed.
    ///
    /// Every object carrying the behavior gets the same entry back.
    pub fn reference_behavior(
        &mut self,
        scene: SceneId,
        behavior_type: &BehaviorTypeId,
    ) -> Result<&SharedDataEntry, HostError> {
        let catalog = &self.catalog;
        let scene_data = self
            .scenes
            .get_mut(scene)
            .ok_or(HostError::UnknownScene(scene))?;
        let entry = scene_data.shared.get_or_create(behavior_type, catalog)?;
        Ok(entry)
    }

    pub fn shared_data(
        &self,
        scene: SceneId,
        behavior_type: &BehaviorTypeId,
    ) -> Option<&SharedDataEntry> {
        self.scenes.get(scene)?.shared.get(behavior_type)
    }

    /// Typed physics configuration of a scene, once the physics behavior is referenced.
    pub fn physics_data(&self, scene: SceneId) -> Option<&ScenePhysicsData> {
        self.shared_data(scene, &BehaviorTypeId::physics())?
            .downcast_ref::<ScenePhysicsData>()
    }

    /// Starts a simulation world from the scene's current physics configuration.
    pub fn start_world(
        &mut self,
        scene: SceneId,
        mut world: Box<dyn WorldBinding>,
    ) -> Result<(), HostError> {
        let physics = BehaviorTypeId::physics();
        let catalog = &self.catalog;
        let scene_data = self
            .scenes
            .get_mut(scene)
            .ok_or(HostError::UnknownScene(scene))?;
        if scene_data.world.is_some() {
            return Err(HostError::WorldAlreadyRunning(scene));
        }
        let settings = scene_data
            .shared
            .get_or_create(&physics, catalog)?
            .downcast_ref::<ScenePhysicsData>()
            .ok_or(HostError::UnexpectedSharedDataType(physics))?
            .world_settings();

        log::debug!("starting world `{}` in {scene} with {settings:?}", world.name());
        world.start(&settings);
        scene_data.world = Some(world);
        Ok(())
    }

    /// Steps the scene's world with the configuration as it is now.
    ///
    /// Returns `Ok(false)` when no world is running in the scene.
    pub fn step_scene(&mut self, scene: SceneId, dt: f64) -> Result<bool, HostError> {
        let _timer = ScopedTimer::new("scene::step");
        let scene_data = self
            .scenes
            .get_mut(scene)
            .ok_or(HostError::UnknownScene(scene))?;
        let Some(world) = scene_data.world.as_mut() else {
            return Ok(false);
        };
        let physics = BehaviorTypeId::physics();
        let settings = scene_data
            .shared
            .get(&physics)
            .and_then(SharedDataEntry::downcast_ref::<ScenePhysicsData>)
            .ok_or(HostError::UnexpectedSharedDataType(physics))?
            .world_settings();
        world.step(&settings, dt);
        Ok(true)
    }

    /// Stops and drops the scene's world, keeping the scene loaded.
    pub fn stop_world(&mut self, scene: SceneId) -> Result<bool, HostError> {
        let scene_data = self
            .scenes
            .get_mut(scene)
            .ok_or(HostError::UnknownScene(scene))?;
        match scene_data.world.take() {
            Some(mut world) => {
                world.stop();
                log::debug!("stopped world `{}` in {scene}", world.name());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Serializes the scene node as loaded, with its shared data written back into it.
    pub fn save_scene(&self, scene: SceneId) -> Result<SerializerElement, HostError> {
        self.scenes
            .get(scene)
            .map(Scene::save)
            .ok_or(HostError::UnknownScene(scene))
    }

    /// Loads an independent deep copy of a scene and its shared data as a new scene.
    pub fn duplicate_scene(
        &mut self,
        scene: SceneId,
        name: impl Into<String>,
    ) -> Result<SceneId, HostError> {
        let copy = self
            .scenes
            .get(scene)
            .ok_or(HostError::UnknownScene(scene))?
            .duplicate(name);
        log::debug!("duplicated {scene} as `{}`", copy.name);
        Ok(self.scenes.insert(copy))
    }

    /// Unloads a scene. Its world is stopped before its shared data is destroyed,
    /// and the handle never resolves again.
    pub fn unload_scene(&mut self, scene: SceneId) -> Result<(), HostError> {
        let _timer = ScopedTimer::new("scene::unload");
        let scene_data = self
            .scenes
            .remove(scene)
            .ok_or(HostError::UnknownScene(scene))?;
        scene_data.teardown();
        log::debug!("unloaded {scene}");
        Ok(())
    }

    /// Property listing of a behavior's shared data, creating it on first reference.
    #[cfg(feature = "editor")]
    pub fn properties(
        &mut self,
        scene: SceneId,
        behavior_type: &BehaviorTypeId,
    ) -> Option<PropertyMap> {
        self.reference_behavior(scene, behavior_type)
            .ok()
            .and_then(SharedDataEntry::properties)
    }

    /// Applies an editor edit. Returns `false`, changing nothing, when the scene
    /// or type is unknown or the edit is rejected.
    #[cfg(feature = "editor")]
    pub fn update_property(
        &mut self,
        scene: SceneId,
        behavior_type: &BehaviorTypeId,
        name: &str,
        value: &str,
    ) -> bool {
        let catalog = &self.catalog;
        let Some(scene_data) = self.scenes.get_mut(scene) else {
            log::debug!("ignoring edit of `{name}`: {scene} is not loaded");
            return false;
        };
        match scene_data.shared.get_or_create(behavior_type, catalog) {
            Ok(entry) => entry.update_property(name, value),
            Err(err) => {
                log::debug!("ignoring edit of `{name}`: {err}");
                false
            }
        }
    }
}
