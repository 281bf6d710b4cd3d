//! Global configuration constants for the scene physics shared data.

/// Default gravity applied to a freshly created scene (y-down scene space).
pub const DEFAULT_GRAVITY: [f64; 2] = [0.0, 9.8];

/// Default number of scene pixels per simulation length unit.
pub const DEFAULT_WORLD_SCALE: f64 = 100.0;

/// Number of velocity constraint passes performed per step.
pub const DEFAULT_VELOCITY_ITERATIONS: u32 = 8;

/// Number of position correction passes performed per step.
pub const DEFAULT_POSITION_ITERATIONS: u32 = 3;

/// Engine type identifier of the physics behavior.
pub const PHYSICS_BEHAVIOR_TYPE: &str = "PhysicsBehavior::PhysicsBehavior";

/// Child of a scene node holding every behavior shared-data entry, keyed by type.
pub const SHARED_DATA_NODE: &str = "behaviorsSharedData";

/// Canonical keys of the persisted physics content.
pub mod keys {
    pub const GRAVITY_X: &str = "gravityX";
    pub const GRAVITY_Y: &str = "gravityY";
    pub const SCALE: &str = "scale";
    pub const VELOCITY_ITERATIONS: &str = "velocityIterations";
    pub const POSITION_ITERATIONS: &str = "positionIterations";

    /// Per-axis scale keys written by older projects.
    pub const LEGACY_SCALE_X: &str = "scaleX";
    pub const LEGACY_SCALE_Y: &str = "scaleY";
}
