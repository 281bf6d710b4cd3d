//! Seam between the shared configuration and the externally owned simulation world.

use glam::DVec2;
use serde::Serialize;

/// Read-only snapshot of the parameters a simulation world is built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorldSettings {
    /// Gravity in scene units per second squared.
    pub gravity: DVec2,
    /// Scene pixels per simulation unit, always positive.
    pub world_scale: f64,
    pub velocity_iterations: u32,
    pub position_iterations: u32,
}

impl WorldSettings {
    /// Gravity expressed in simulation units.
    pub fn world_gravity(&self) -> DVec2 {
        self.gravity / self.world_scale
    }
}

/// Trait implemented by simulation worlds driven by a scene's physics configuration.
///
/// The host calls `start` once, `step` every frame with the settings current
/// at that frame, and `stop` before the configuration is dropped. Whether a
/// world reacts to changed settings by re-reading them or by rebuilding
/// itself is up to the implementation.
pub trait WorldBinding {
    fn name(&self) -> &str;

    fn start(&mut self, settings: &WorldSettings);

    fn step(&mut self, _settings: &WorldSettings, _dt: f64) {}

    /// After this returns the world must not read the configuration again.
    fn stop(&mut self) {}
}

/// Default binding that records nothing and simulates nothing.
#[derive(Debug, Default)]
pub struct NoopWorld;

impl NoopWorld {
    pub fn new() -> Self {
        Self
    }
}

impl WorldBinding for NoopWorld {
    fn name(&self) -> &str {
        "noop"
    }

    fn start(&mut self, _settings: &WorldSettings) {}
}
