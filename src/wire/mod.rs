//! The serialization core shared by every entity.
//!
//! Entities describe themselves through [`Serializable`] (which properties are set) and
//! [`Entity`] (how a decoded wire value is written back into a field). Which of those
//! properties are emitted for a given operation, and under which XML namespace, is decided
//! by the descriptor table in [`descriptors`].

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Map;
pub use serde_json::Value;

use crate::{PostNLError, PostNLResult};

/// Module containing the per-service field descriptor table.
pub mod descriptors;
/// Module containing the JSON side of the serialization core.
pub mod json;
/// Module containing the XML side of the serialization core.
pub mod xml;

pub use descriptors::Field;
pub use json::{from_json_fields, from_wire_json, to_wire_json, Normalization};
pub use xml::{from_wire_xml, parse_document, to_wire_xml, write_document, XmlElement};

/// Date-time format used on the wire.
pub const DATE_TIME_FORMAT: &str = "%d-%m-%Y %H:%M:%S";
/// Date format used on the wire.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// The service context an entity is serialized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Service {
    /// Barcode generation.
    Barcode,
    /// Shipment confirmation.
    Confirming,
    /// Label generation.
    Labelling,
    /// Delivery and sent date calculation.
    DeliveryDate,
    /// Pickup location lookup.
    Location,
    /// Delivery timeframe calculation.
    Timeframe,
    /// Shipment status tracking.
    ShippingStatus,
}

impl Service {
    /// Every service, in declaration order.
    pub const ALL: [Service; 7] = [
        Service::Barcode,
        Service::Confirming,
        Service::Labelling,
        Service::DeliveryDate,
        Service::Location,
        Service::Timeframe,
        Service::ShippingStatus,
    ];

    /// Name of the service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Barcode => "Barcode",
            Service::Confirming => "Confirming",
            Service::Labelling => "Labelling",
            Service::DeliveryDate => "DeliveryDate",
            Service::Location => "Location",
            Service::Timeframe => "Timeframe",
            Service::ShippingStatus => "ShippingStatus",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical XML namespaces. `Services` and `Domain` resolve per adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// SOAP 1.1 envelope.
    Envelope,
    /// WS-Security extension.
    Security,
    /// CIF common types (faults).
    Common,
    /// XML schema instance.
    XmlSchema,
    /// Serialized string arrays.
    Arrays,
    /// The service contract namespace of the active adapter.
    Services,
    /// The domain (data contract) namespace of the active adapter.
    Domain,
}

/// Namespace URIs of one SOAP adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamespaceMap {
    /// URI of [`Namespace::Services`].
    pub services: &'static str,
    /// URI of [`Namespace::Domain`].
    pub domain: &'static str,
}

/// URI of [`Namespace::Common`], shared by every CIF service.
pub const COMMON_URI: &str = "http://postnl.nl/cif/services/common/";

impl NamespaceMap {
    /// Resolves a logical namespace to its URI.
    pub fn uri(&self, namespace: Namespace) -> &'static str {
        match namespace {
            Namespace::Envelope => "http://schemas.xmlsoap.org/soap/envelope/",
            Namespace::Security => {
                "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd"
            }
            Namespace::Common => COMMON_URI,
            Namespace::XmlSchema => "http://www.w3.org/2001/XMLSchema-instance",
            Namespace::Arrays => "http://schemas.microsoft.com/2003/10/Serialization/Arrays",
            Namespace::Services => self.services,
            Namespace::Domain => self.domain,
        }
    }

    /// Prefix declared on the envelope for a logical namespace.
    pub fn prefix(namespace: Namespace) -> &'static str {
        match namespace {
            Namespace::Envelope => "env",
            Namespace::Security => "wsse",
            Namespace::Common => "common",
            Namespace::XmlSchema => "xsi",
            Namespace::Arrays => "arr",
            Namespace::Services => "services",
            Namespace::Domain => "domain",
        }
    }

    /// `(prefix, uri)` pairs for every namespace, as declared on the envelope.
    pub fn declarations(&self) -> Vec<(&'static str, &'static str)> {
        [
            Namespace::Envelope,
            Namespace::Security,
            Namespace::Common,
            Namespace::XmlSchema,
            Namespace::Arrays,
            Namespace::Services,
            Namespace::Domain,
        ]
        .into_iter()
        .map(|namespace| (Self::prefix(namespace), self.uri(namespace)))
        .collect()
    }

    /// Whether a decoded element in `uri` may populate a field declared in `declared`.
    ///
    /// Unqualified elements always match. The CIF contracts place response members in either
    /// the services or the domain namespace, so those two are interchangeable.
    pub fn matches(&self, declared: Option<Namespace>, uri: Option<&str>) -> bool {
        let (declared, uri) = match (declared, uri) {
            (Some(declared), Some(uri)) => (declared, uri),
            _ => return true,
        };
        match declared {
            Namespace::Services | Namespace::Domain => uri == self.services || uri == self.domain,
            other => uri == self.uri(other),
        }
    }
}

/// How a sequence property is laid out in XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sequence {
    /// A container element named after the field, holding one child per item with this tag.
    Wrapped(&'static str),
    /// A container element holding `{Arrays}string` children.
    Strings,
    /// Repeated sibling elements named after the field, without a container.
    Inline,
}

/// A set property of an entity, ready to be serialized.
#[derive(Clone)]
pub enum Property<'a> {
    /// Plain text.
    Text(Cow<'a, str>),
    /// A boolean: native in JSON, `true`/`false` text in XML.
    Flag(bool),
    /// A boolean always rendered as the strings `"true"`/`"false"`.
    FlagText(bool),
    /// A nested entity.
    Entity(&'a dyn Serializable),
    /// An ordered sequence of entities or strings.
    List(Sequence, Vec<Property<'a>>),
}

impl fmt::Debug for Property<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Property::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Property::Flag(flag) => f.debug_tuple("Flag").field(flag).finish(),
            Property::FlagText(flag) => f.debug_tuple("FlagText").field(flag).finish(),
            Property::Entity(entity) => f.debug_tuple("Entity").field(&entity.entity_name()).finish(),
            Property::List(sequence, items) => {
                f.debug_tuple("List").field(sequence).field(items).finish()
            }
        }
    }
}

/// Serialization side of an entity.
pub trait Serializable {
    /// The entity's type name, used as descriptor key and JSON wrapper key.
    fn entity_name(&self) -> &'static str;

    /// Every set property as `(field name, value)`, in declaration order.
    fn properties(&self) -> Vec<(&'static str, Property<'_>)>;

    /// Whether XML serialization must fail when the service context is unresolved.
    fn requires_context(&self) -> bool {
        false
    }
}

/// Deserialization side of an entity.
pub trait Entity: Serializable + Default + Sized {
    /// The entity's type name; see [`Serializable::entity_name`].
    const NAME: &'static str;

    /// JSON normalization rules, applied in order before the fields are populated.
    const RULES: &'static [Normalization] = &[];

    /// Writes a decoded wire value into the field `field`. Unknown fields are ignored.
    fn decode_field(&mut self, field: &str, value: Value, format: Format<'_>) -> PostNLResult<()>;
}

/// Context for decoding XML values.
#[derive(Debug, Clone, Copy)]
pub struct XmlContext {
    /// The service the response belongs to.
    pub service: Service,
    /// Namespace URIs of the adapter that received the response.
    pub namespaces: NamespaceMap,
}

/// The wire format a value tree was decoded from.
#[derive(Debug, Clone, Copy)]
pub enum Format<'a> {
    /// JSON: plain keys, native arrays.
    Json,
    /// XML: `{uri}Local` keys, container elements for sequences.
    Xml(&'a XmlContext),
}

/// Populates an entity from an object of wire fields.
///
/// Keys are resolved against the descriptor table (XML) or normalized with the entity's
/// rules (JSON) before each field is decoded. A `null` value yields the default entity.
pub fn from_fields<E: Entity>(value: Value, format: Format<'_>) -> PostNLResult<E> {
    let mut object = match value {
        Value::Object(object) => object,
        Value::Null => Map::new(),
        other => {
            return Err(PostNLError::response(format!(
                "expected an object for `{}`, found {}",
                E::NAME,
                kind_of(&other)
            )))
        }
    };

    match format {
        Format::Json => {
            for rule in E::RULES {
                rule.apply(&mut object);
            }
        }
        Format::Xml(context) => {
            object = xml::resolve_fields::<E>(object, context);
            for rule in E::RULES.iter().filter(|rule| rule.applies_to_xml()) {
                rule.apply(&mut object);
            }
        }
    }

    let mut entity = E::default();
    for (field, value) in object {
        entity.decode_field(&field, value, format)?;
    }
    Ok(entity)
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decodes a text field. Numbers and booleans are accepted and rendered as text.
pub fn decode_text(value: Value) -> PostNLResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        other => Err(PostNLError::response(format!(
            "expected text, found {}",
            kind_of(&other)
        ))),
    }
}

/// Decodes a boolean field from a native boolean, `true`/`false`/`1`/`0` text or a number.
pub fn decode_flag(value: Value) -> PostNLResult<Option<bool>> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(flag) => Ok(Some(flag)),
        Value::Number(number) => Ok(Some(number.as_i64() == Some(1))),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            "" => Ok(None),
            _ => Err(PostNLError::InvalidArgument(format!(
                "`{text}` is not a boolean"
            ))),
        },
        other => Err(PostNLError::response(format!(
            "expected a boolean, found {}",
            kind_of(&other)
        ))),
    }
}

/// Parses a date-time as sent by the API, in Europe/Amsterdam wall-clock time.
pub fn parse_date_time(text: &str) -> PostNLResult<NaiveDateTime> {
    let text = text.trim();
    if let Ok(date_time) = DateTime::parse_from_rfc3339(text) {
        return Ok(date_time.naive_local());
    }
    for format in [
        DATE_TIME_FORMAT,
        "%d-%m-%Y %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(date_time);
        }
    }
    parse_date(text)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| PostNLError::InvalidArgument(format!("invalid date-time `{text}`")))
}

/// Parses a date as sent by the API.
pub fn parse_date(text: &str) -> PostNLResult<NaiveDate> {
    let text = text.trim();
    for format in [DATE_FORMAT, "%Y-%m-%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Ok(date);
        }
    }
    Err(PostNLError::InvalidArgument(format!("invalid date `{text}`")))
}

/// Decodes a date-time field.
pub fn decode_date_time(value: Value) -> PostNLResult<Option<NaiveDateTime>> {
    match decode_text(value)? {
        Some(text) if !text.trim().is_empty() => parse_date_time(&text).map(Some),
        _ => Ok(None),
    }
}

/// Decodes a date field.
pub fn decode_date(value: Value) -> PostNLResult<Option<NaiveDate>> {
    match decode_text(value)? {
        Some(text) if !text.trim().is_empty() => parse_date(&text).map(Some),
        _ => Ok(None),
    }
}

/// Renders a date-time for the wire.
pub fn format_date_time(date_time: &NaiveDateTime) -> String {
    date_time.format(DATE_TIME_FORMAT).to_string()
}

/// Renders a date for the wire.
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Decodes a nested entity field.
pub fn decode_entity<E: Entity>(value: Value, format: Format<'_>) -> PostNLResult<Option<E>> {
    match value {
        Value::Null => Ok(None),
        value => from_fields(value, format).map(Some),
    }
}

/// Decodes a sequence of nested entities.
pub fn decode_sequence<E: Entity>(
    value: Value,
    format: Format<'_>,
    sequence: Sequence,
) -> PostNLResult<Option<Vec<E>>> {
    match sequence_items(value, format, sequence)? {
        Some(items) => items
            .into_iter()
            .map(|item| from_fields(item, format))
            .collect::<PostNLResult<Vec<E>>>()
            .map(Some),
        None => Ok(None),
    }
}

/// Decodes a sequence of strings.
pub fn decode_strings(
    value: Value,
    format: Format<'_>,
    sequence: Sequence,
) -> PostNLResult<Option<Vec<String>>> {
    match sequence_items(value, format, sequence)? {
        Some(items) => {
            let mut strings = Vec::with_capacity(items.len());
            for item in items {
                if let Some(text) = decode_text(item)? {
                    strings.push(text);
                }
            }
            Ok(Some(strings))
        }
        None => Ok(None),
    }
}

fn sequence_items(
    value: Value,
    format: Format<'_>,
    sequence: Sequence,
) -> PostNLResult<Option<Vec<Value>>> {
    match (format, value) {
        (Format::Xml(_), value) => xml::container_items(value, sequence).map(Some),
        (Format::Json, Value::Null) => Ok(None),
        (Format::Json, Value::Array(items)) => Ok(Some(items)),
        (Format::Json, other) => Err(PostNLError::response(format!(
            "expected an array, found {}",
            kind_of(&other)
        ))),
    }
}
