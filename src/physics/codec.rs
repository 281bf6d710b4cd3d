//! Conversion between [`ScenePhysicsData`] and its serialization tree.

use super::{
    data::ScenePhysicsData,
    fields::{FieldSpec, PhysicsField, PHYSICS_FIELDS},
};
use crate::{config::keys, serialization::SerializerElement};

/// Decodes a content node on top of the defaults.
///
/// Missing keys keep their default. Present keys that fail to parse or break
/// a field invariant are treated as missing and reported with a warning, so
/// partially written or hand-edited saves still load.
pub fn decode(content: &SerializerElement) -> ScenePhysicsData {
    let mut data = ScenePhysicsData::default();
    for spec in &PHYSICS_FIELDS {
        let Some((key, stored)) = stored_field(spec, content) else {
            continue;
        };
        match spec.kind.read(key, stored) {
            Ok(value) => data.assign(spec.field, value),
            Err(err) => log::warn!("keeping default `{}`: {err}", spec.key),
        }
    }
    data
}

/// Writes every field under its canonical key, leaving other children in place.
pub fn encode_into(data: &ScenePhysicsData, content: &mut SerializerElement) {
    for spec in &PHYSICS_FIELDS {
        encode_field(data, spec.field, content);
    }
}

/// Encodes into a fresh node.
pub fn encode(data: &ScenePhysicsData) -> SerializerElement {
    let mut content = SerializerElement::new();
    encode_into(data, &mut content);
    content
}

/// Writes a single field, touching no other child.
pub fn encode_field(data: &ScenePhysicsData, field: PhysicsField, content: &mut SerializerElement) {
    content.set_child_value(field.spec().key, data.field(field).to_serializer_value());
}

fn stored_field<'a>(
    spec: &FieldSpec,
    content: &'a SerializerElement,
) -> Option<(&'static str, &'a SerializerElement)> {
    if let Some(stored) = content.child(spec.key) {
        return Some((spec.key, stored));
    }
    if spec.field != PhysicsField::WorldScale {
        return None;
    }
    // Older projects stored one scale per axis; both were always equal.
    [keys::LEGACY_SCALE_X, keys::LEGACY_SCALE_Y]
        .into_iter()
        .find_map(|key| content.child(key).map(|stored| (key, stored)))
}
