use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    config::PHYSICS_BEHAVIOR_TYPE, physics::ScenePhysicsData, shared_data::BehaviorSharedData,
};

/// Engine identifier of a behavior type, e.g. `PhysicsBehavior::PhysicsBehavior`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BehaviorTypeId(String);

impl BehaviorTypeId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn physics() -> Self {
        Self::new(PHYSICS_BEHAVIOR_TYPE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BehaviorTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BehaviorTypeId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Constructs the default shared data of one behavior type.
pub type SharedDataFactory = fn() -> Box<dyn BehaviorSharedData>;

/// Behavior types known to the host and how to build their shared data.
#[derive(Debug, Clone, Default)]
pub struct BehaviorCatalog {
    factories: IndexMap<BehaviorTypeId, SharedDataFactory>,
}

impl BehaviorCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with every behavior shipped by this crate registered.
    pub fn with_builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register(BehaviorTypeId::physics(), ScenePhysicsData::boxed);
        catalog
    }

    /// Registers or replaces the factory of a behavior type.
    pub fn register(&mut self, behavior_type: BehaviorTypeId, factory: SharedDataFactory) {
        if self.factories.insert(behavior_type.clone(), factory).is_some() {
            log::debug!("replaced shared data factory for {behavior_type}");
        }
    }

    pub fn contains(&self, behavior_type: &BehaviorTypeId) -> bool {
        self.factories.contains_key(behavior_type)
    }

    pub fn create(&self, behavior_type: &BehaviorTypeId) -> Option<Box<dyn BehaviorSharedData>> {
        self.factories.get(behavior_type).map(|factory| factory())
    }

    pub fn behavior_types(&self) -> impl Iterator<Item = &BehaviorTypeId> {
        self.factories.keys()
    }
}
