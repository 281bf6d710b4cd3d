//! Table of the persisted physics fields.
//!
//! Decoding, encoding, property enumeration and property updates all walk
//! [`PHYSICS_FIELDS`], so adding a field here is enough to expose it everywhere.

use std::fmt;

use super::error::PropertyError;
use crate::config::keys;
use crate::serialization::{SerializerElement, SerializerValue};

/// Semantic type of a field, including the invariant it must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any finite real number.
    Real,
    /// Finite and strictly greater than zero.
    PositiveReal,
    /// Integer in `1..=u32::MAX`.
    PositiveInteger,
}

/// Typed value of a single field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Real(f64),
    Integer(u32),
}

impl FieldValue {
    pub fn to_serializer_value(self) -> SerializerValue {
        match self {
            Self::Real(value) => SerializerValue::Double(value),
            Self::Integer(value) => SerializerValue::from(value),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
        }
    }
}

/// Identifies a field independently of its persisted key.
///
/// Discriminants index [`PHYSICS_FIELDS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicsField {
    GravityX = 0,
    GravityY = 1,
    WorldScale = 2,
    VelocityIterations = 3,
    PositionIterations = 4,
}

impl PhysicsField {
    pub fn spec(self) -> &'static FieldSpec {
        &PHYSICS_FIELDS[self as usize]
    }
}

/// Static description of one persisted field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: PhysicsField,
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub group: &'static str,
    pub unit: &'static str,
    pub kind: FieldKind,
}

pub const PHYSICS_FIELDS: [FieldSpec; 5] = [
    FieldSpec {
        field: PhysicsField::GravityX,
        key: keys::GRAVITY_X,
        label: "Gravity on X axis",
        description: "Horizontal component of the gravity applied to every physics object.",
        group: "Gravity",
        unit: "pixels/s²",
        kind: FieldKind::Real,
    },
    FieldSpec {
        field: PhysicsField::GravityY,
        key: keys::GRAVITY_Y,
        label: "Gravity on Y axis",
        description: "Vertical component of the gravity, positive values pull downwards.",
        group: "Gravity",
        unit: "pixels/s²",
        kind: FieldKind::Real,
    },
    FieldSpec {
        field: PhysicsField::WorldScale,
        key: keys::SCALE,
        label: "World scale",
        description: "Number of scene pixels in one simulation unit.",
        group: "World",
        unit: "pixels/unit",
        kind: FieldKind::PositiveReal,
    },
    FieldSpec {
        field: PhysicsField::VelocityIterations,
        key: keys::VELOCITY_ITERATIONS,
        label: "Velocity iterations",
        description: "Velocity constraint passes per step. Higher is more precise and slower.",
        group: "Solver",
        unit: "",
        kind: FieldKind::PositiveInteger,
    },
    FieldSpec {
        field: PhysicsField::PositionIterations,
        key: keys::POSITION_ITERATIONS,
        label: "Position iterations",
        description: "Position correction passes per step. Higher is more precise and slower.",
        group: "Solver",
        unit: "",
        kind: FieldKind::PositiveInteger,
    },
];

/// Looks up a field by its persisted key.
pub fn field_by_key(key: &str) -> Option<&'static FieldSpec> {
    PHYSICS_FIELDS.iter().find(|spec| spec.key == key)
}

impl FieldKind {
    pub fn constraint(self) -> &'static str {
        match self {
            Self::Real => "must be a finite number",
            Self::PositiveReal => "must be a finite number greater than zero",
            Self::PositiveInteger => "must be a whole number between 1 and 4294967295",
        }
    }

    /// Parses editor text into a value satisfying this kind's invariant.
    pub fn parse(self, name: &str, raw: &str) -> Result<FieldValue, PropertyError> {
        let text = raw.trim();
        let malformed = || PropertyError::MalformedValue {
            name: name.to_owned(),
            value: raw.to_owned(),
        };
        match self {
            Self::Real | Self::PositiveReal => {
                let value: f64 = text.parse().map_err(|_| malformed())?;
                self.check_real(name, value)
            }
            Self::PositiveInteger => {
                let value: i64 = text.parse().map_err(|_| malformed())?;
                self.check_integer(name, value)
            }
        }
    }

    /// Reads a stored node, applying the same invariants as an editor update.
    pub fn read(self, name: &str, stored: &SerializerElement) -> Result<FieldValue, PropertyError> {
        let malformed = || PropertyError::MalformedValue {
            name: name.to_owned(),
            value: stored
                .value()
                .map(ToString::to_string)
                .unwrap_or_default(),
        };
        match self {
            Self::Real | Self::PositiveReal => {
                let value = stored.get_double().ok_or_else(malformed)?;
                self.check_real(name, value)
            }
            Self::PositiveInteger => {
                let value = stored.get_int().ok_or_else(malformed)?;
                self.check_integer(name, value)
            }
        }
    }

    /// Validates an already typed value.
    pub fn check(self, name: &str, value: FieldValue) -> Result<FieldValue, PropertyError> {
        match value {
            FieldValue::Real(value) if self != Self::PositiveInteger => {
                self.check_real(name, value)
            }
            FieldValue::Integer(value) if self == Self::PositiveInteger => {
                self.check_integer(name, i64::from(value))
            }
            other => Err(PropertyError::MalformedValue {
                name: name.to_owned(),
                value: other.to_string(),
            }),
        }
    }

    fn check_real(self, name: &str, value: f64) -> Result<FieldValue, PropertyError> {
        let valid = value.is_finite() && (self != Self::PositiveReal || value > 0.0);
        if valid {
            Ok(FieldValue::Real(value))
        } else {
            Err(self.violation(name, value.to_string()))
        }
    }

    fn check_integer(self, name: &str, value: i64) -> Result<FieldValue, PropertyError> {
        match u32::try_from(value) {
            Ok(value) if value > 0 => Ok(FieldValue::Integer(value)),
            _ => Err(self.violation(name, value.to_string())),
        }
    }

    fn violation(self, name: &str, value: String) -> PropertyError {
        PropertyError::InvariantViolation {
            name: name.to_owned(),
            value,
            constraint: self.constraint(),
        }
    }
}
