//! Scene Physics – shared per-scene physics configuration for behavior-driven 2D engines.
//!
//! Every object carrying the physics behavior in a scene reads the same
//! [`ScenePhysicsData`]: gravity, world scale and solver iteration counts.
//! The [`BehaviorHost`] owns one such record per scene, loads it from the
//! ordered [`SerializerElement`] tree, exposes it to the editor through the
//! property contract, and hands a [`WorldSettings`] snapshot to whatever
//! [`WorldBinding`] runs the simulation.

pub mod config;
pub mod host;
pub mod physics;
pub mod serialization;
pub mod shared_data;
pub mod utils;
pub mod world;

pub use glam::DVec2;

pub use host::{BehaviorCatalog, BehaviorHost, BehaviorTypeId, HostError, SceneSharedData};
pub use physics::{PhysicsField, PropertyError, ScenePhysicsData};
pub use serialization::{SerializationError, SerializerElement, SerializerValue};
pub use shared_data::{BehaviorSharedData, SharedDataEntry};
#[cfg(feature = "editor")]
pub use shared_data::{PropertyDescriptor, PropertyMap, PropertyType, SharedDataEditor};
pub use utils::allocator::SceneId;
pub use world::{NoopWorld, WorldBinding, WorldSettings};
