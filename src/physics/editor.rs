use super::{
    codec,
    data::ScenePhysicsData,
    fields::{field_by_key, FieldKind, PHYSICS_FIELDS},
};
use crate::{
    serialization::SerializerElement,
    shared_data::{PropertyDescriptor, PropertyMap, PropertyType, SharedDataEditor},
};

impl SharedDataEditor for ScenePhysicsData {
    fn properties(&self, content: &SerializerElement) -> PropertyMap {
        let data = codec::decode(content);
        PHYSICS_FIELDS
            .iter()
            .map(|spec| {
                let value_type = match spec.kind {
                    FieldKind::Real | FieldKind::PositiveReal => PropertyType::Number,
                    FieldKind::PositiveInteger => PropertyType::Integer,
                };
                let mut descriptor =
                    PropertyDescriptor::new(data.field(spec.field).to_string(), value_type)
                        .with_label(spec.label)
                        .with_description(spec.description)
                        .with_group(spec.group);
                if !spec.unit.is_empty() {
                    descriptor = descriptor.with_extra_info(spec.unit);
                }
                (spec.key.to_owned(), descriptor)
            })
            .collect()
    }

    fn update_property(
        &mut self,
        content: &mut SerializerElement,
        name: &str,
        value: &str,
    ) -> bool {
        let mut candidate = codec::decode(content);
        if let Err(err) = candidate.set_property(name, value) {
            log::debug!("rejected physics property edit: {err}");
            return false;
        }
        let Some(spec) = field_by_key(name) else {
            return false;
        };
        codec::encode_field(&candidate, spec.field, content);
        *self = candidate;
        log::debug!("physics property `{name}` set to {}", candidate.field(spec.field));
        true
    }
}
