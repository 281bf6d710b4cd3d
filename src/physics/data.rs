use glam::DVec2;

use super::{
    error::PropertyError,
    fields::{field_by_key, FieldKind, FieldValue, PhysicsField},
};
use crate::{
    config::{
        keys, DEFAULT_GRAVITY, DEFAULT_POSITION_ITERATIONS, DEFAULT_VELOCITY_ITERATIONS,
        DEFAULT_WORLD_SCALE,
    },
    world::WorldSettings,
};

/// Physics parameters shared by every physics object of one scene.
///
/// Fields are private and every setter validates before committing, so a
/// non-positive world scale or a zero iteration count is never observable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenePhysicsData {
    gravity: DVec2,
    world_scale: f64,
    velocity_iterations: u32,
    position_iterations: u32,
}

impl Default for ScenePhysicsData {
    fn default() -> Self {
        Self {
            gravity: DVec2::from_array(DEFAULT_GRAVITY),
            world_scale: DEFAULT_WORLD_SCALE,
            velocity_iterations: DEFAULT_VELOCITY_ITERATIONS,
            position_iterations: DEFAULT_POSITION_ITERATIONS,
        }
    }
}

impl ScenePhysicsData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from explicit values, validating each of them.
    pub fn from_parts(
        gravity: DVec2,
        world_scale: f64,
        velocity_iterations: u32,
        position_iterations: u32,
    ) -> Result<Self, PropertyError> {
        let mut data = Self::default();
        data.set_gravity(gravity)?;
        data.set_world_scale(world_scale)?;
        data.set_velocity_iterations(velocity_iterations)?;
        data.set_position_iterations(position_iterations)?;
        Ok(data)
    }

    pub fn gravity(&self) -> DVec2 {
        self.gravity
    }

    pub fn world_scale(&self) -> f64 {
        self.world_scale
    }

    pub fn velocity_iterations(&self) -> u32 {
        self.velocity_iterations
    }

    pub fn position_iterations(&self) -> u32 {
        self.position_iterations
    }

    pub fn set_gravity(&mut self, gravity: DVec2) -> Result<(), PropertyError> {
        let x = FieldKind::Real.check(keys::GRAVITY_X, FieldValue::Real(gravity.x))?;
        let y = FieldKind::Real.check(keys::GRAVITY_Y, FieldValue::Real(gravity.y))?;
        self.assign(PhysicsField::GravityX, x);
        self.assign(PhysicsField::GravityY, y);
        Ok(())
    }

    pub fn set_world_scale(&mut self, world_scale: f64) -> Result<(), PropertyError> {
        self.set_field(PhysicsField::WorldScale, FieldValue::Real(world_scale))
    }

    pub fn set_velocity_iterations(&mut self, iterations: u32) -> Result<(), PropertyError> {
        self.set_field(
            PhysicsField::VelocityIterations,
            FieldValue::Integer(iterations),
        )
    }

    pub fn set_position_iterations(&mut self, iterations: u32) -> Result<(), PropertyError> {
        self.set_field(
            PhysicsField::PositionIterations,
            FieldValue::Integer(iterations),
        )
    }

    /// Parses `raw` for the field persisted under `name` and commits it if valid.
    pub fn set_property(&mut self, name: &str, raw: &str) -> Result<(), PropertyError> {
        let spec = field_by_key(name)
            .ok_or_else(|| PropertyError::UnknownProperty(name.to_owned()))?;
        let value = spec.kind.parse(spec.key, raw)?;
        self.assign(spec.field, value);
        Ok(())
    }

    /// Validates and commits a typed value.
    pub fn set_field(&mut self, field: PhysicsField, value: FieldValue) -> Result<(), PropertyError> {
        let spec = field.spec();
        let value = spec.kind.check(spec.key, value)?;
        self.assign(field, value);
        Ok(())
    }

    pub fn field(&self, field: PhysicsField) -> FieldValue {
        match field {
            PhysicsField::GravityX => FieldValue::Real(self.gravity.x),
            PhysicsField::GravityY => FieldValue::Real(self.gravity.y),
            PhysicsField::WorldScale => FieldValue::Real(self.world_scale),
            PhysicsField::VelocityIterations => FieldValue::Integer(self.velocity_iterations),
            PhysicsField::PositionIterations => FieldValue::Integer(self.position_iterations),
        }
    }

    /// Converts a length in scene pixels to simulation units.
    pub fn to_world_units(&self, scene_length: f64) -> f64 {
        scene_length / self.world_scale
    }

    /// Converts a length in simulation units to scene pixels.
    pub fn to_scene_units(&self, world_length: f64) -> f64 {
        world_length * self.world_scale
    }

    pub fn to_world_position(&self, scene_position: DVec2) -> DVec2 {
        scene_position / self.world_scale
    }

    pub fn to_scene_position(&self, world_position: DVec2) -> DVec2 {
        world_position * self.world_scale
    }

    /// Gravity expressed in simulation units.
    pub fn world_gravity(&self) -> DVec2 {
        self.gravity / self.world_scale
    }

    /// Read-only snapshot handed to the simulation world.
    pub fn world_settings(&self) -> WorldSettings {
        WorldSettings {
            gravity: self.gravity,
            world_scale: self.world_scale,
            velocity_iterations: self.velocity_iterations,
            position_iterations: self.position_iterations,
        }
    }

    /// Stores an already validated value.
    pub(crate) fn assign(&mut self, field: PhysicsField, value: FieldValue) {
        match (field, value) {
            (PhysicsField::GravityX, FieldValue::Real(value)) => self.gravity.x = value,
            (PhysicsField::GravityY, FieldValue::Real(value)) => self.gravity.y = value,
            (PhysicsField::WorldScale, FieldValue::Real(value)) => self.world_scale = value,
            (PhysicsField::VelocityIterations, FieldValue::Integer(value)) => {
                self.velocity_iterations = value
            }
            (PhysicsField::PositionIterations, FieldValue::Integer(value)) => {
                self.position_iterations = value
            }
            (field, value) => log::warn!("ignoring {value} for {field:?}: kind mismatch"),
        }
    }
}
