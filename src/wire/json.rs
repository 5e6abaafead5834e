use serde_json::{Map, Value};

use super::{descriptors, from_fields, Entity, Format, Property, Serializable, Service};
use crate::{PostNLError, PostNLResult};

/// A structural rewrite applied to a decoded JSON object before its fields are populated.
///
/// The REST API collapses single-element sequences into objects, wraps string lists in
/// `{"string": [...]}` and uses singular keys for plural fields. Entities list the rules they
/// need in [`Entity::RULES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// Renames `from` to `to` unless `to` is already present.
    Alias {
        /// Key sent by the API.
        from: &'static str,
        /// Key of the entity field.
        to: &'static str,
    },
    /// Wraps a present, non-array value in a one-element array.
    CoerceArray(&'static str),
    /// Replaces `{field: {item: x}}` with `{field: x}` and coerces the result to an array.
    Unwrap {
        /// The container key.
        field: &'static str,
        /// The key of the items inside the container.
        item: &'static str,
    },
    /// Inserts an empty array when the field is absent or `null`.
    EmptyIfAbsent(&'static str),
}

impl Normalization {
    /// Applies the rule in place.
    pub fn apply(&self, object: &mut Map<String, Value>) {
        match *self {
            Normalization::Alias { from, to } => {
                if !object.contains_key(to) {
                    if let Some(value) = object.remove(from) {
                        object.insert(to.to_string(), value);
                    }
                }
            }
            Normalization::CoerceArray(field) => {
                if let Some(value) = object.get_mut(field) {
                    coerce_array(value);
                }
            }
            Normalization::Unwrap { field, item } => {
                if let Some(value) = object.get_mut(field) {
                    if let Value::Object(container) = value {
                        *value = container.remove(item).unwrap_or(Value::Array(Vec::new()));
                    }
                    coerce_array(value);
                }
            }
            Normalization::EmptyIfAbsent(field) => {
                if object.get(field).map_or(true, Value::is_null) {
                    object.insert(field.to_string(), Value::Array(Vec::new()));
                }
            }
        }
    }

    /// Whether the rule also applies to values decoded from XML.
    ///
    /// Container elements already decode to arrays, so only renames and defaults carry over.
    pub fn applies_to_xml(&self) -> bool {
        matches!(
            self,
            Normalization::Alias { .. } | Normalization::EmptyIfAbsent(_)
        )
    }
}

fn coerce_array(value: &mut Value) {
    match value {
        Value::Array(_) | Value::Null => {}
        other => *other = Value::Array(vec![other.take()]),
    }
}

/// Serializes the declared, set properties of `entity` for `service` into a JSON object.
///
/// An entity without descriptors for `service` serializes to an empty object.
pub fn to_wire_json(entity: &dyn Serializable, service: Service) -> Map<String, Value> {
    let mut object = Map::new();
    let Some(fields) = descriptors::fields(entity.entity_name(), service) else {
        tracing::trace!(
            entity = entity.entity_name(),
            %service,
            "no descriptors, serializing an empty object"
        );
        return object;
    };

    let mut properties = entity.properties();
    for field in fields {
        if let Some(position) = properties.iter().position(|(name, _)| *name == field.name) {
            let (_, property) = properties.remove(position);
            object.insert(field.name.to_string(), property_to_json(property, service));
        }
    }
    for (name, _) in properties {
        tracing::trace!(entity = entity.entity_name(), field = name, %service, "omitting undeclared field");
    }
    object
}

fn property_to_json(property: Property<'_>, service: Service) -> Value {
    match property {
        Property::Text(text) => Value::String(text.into_owned()),
        Property::Flag(flag) => Value::Bool(flag),
        Property::FlagText(flag) => Value::String(flag.to_string()),
        Property::Entity(entity) => Value::Object(to_wire_json(entity, service)),
        Property::List(_, items) => Value::Array(
            items
                .into_iter()
                .map(|item| property_to_json(item, service))
                .collect(),
        ),
    }
}

/// Decodes the object stored under the entity's name in `raw`.
pub fn from_wire_json<E: Entity>(raw: &Value) -> PostNLResult<E> {
    let value = raw
        .get(E::NAME)
        .ok_or_else(|| PostNLError::EntityNotFound(E::NAME.to_string()))?;
    from_fields(value.clone(), Format::Json)
}

/// Decodes an unwrapped object of fields into `E`.
pub fn from_json_fields<E: Entity>(value: Value) -> PostNLResult<E> {
    from_fields(value, Format::Json)
}
