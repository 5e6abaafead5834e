use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::ResolveResult;
use quick_xml::{NsReader, Writer};
use serde_json::{Map, Value};

use super::{
    descriptors, from_fields, Entity, Format, Namespace, NamespaceMap, Property, Sequence,
    Serializable, Service, XmlContext,
};
use crate::{PostNLError, PostNLResult};

/// A namespace-resolved XML element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Namespace URI, if the element is qualified.
    pub namespace: Option<String>,
    /// Local name.
    pub name: String,
    /// Child elements, in document order.
    pub children: Vec<XmlElement>,
    /// Text content.
    pub text: Option<String>,
}

impl XmlElement {
    /// Creates an empty element.
    pub fn new(namespace: Option<&str>, name: &str) -> Self {
        XmlElement {
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Sets the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Appends a child element.
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    /// Appends child elements.
    pub fn with_children(mut self, children: impl IntoIterator<Item = XmlElement>) -> Self {
        self.children.extend(children);
        self
    }

    /// The first child with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// The first descendant (depth-first, including `self`) with the given local name.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Text of the first child with the given local name.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(|child| child.text.as_deref())
    }

    fn key(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{{{namespace}}}{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Converts the element's content to a JSON value tree.
    ///
    /// Children become `{uri}Local` keys, repeated children become arrays, a text-only
    /// element becomes a string and an empty element becomes `null`.
    pub fn to_value(&self) -> Value {
        if self.children.is_empty() {
            return match &self.text {
                Some(text) => Value::String(text.clone()),
                None => Value::Null,
            };
        }

        let mut object = Map::new();
        for child in &self.children {
            let key = child.key();
            let value = child.to_value();
            match object.get_mut(&key) {
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    object.insert(key, value);
                }
            }
        }
        Value::Object(object)
    }
}

fn xml_error(error: impl std::fmt::Display) -> PostNLError {
    PostNLError::response(format!("invalid XML: {error}"))
}

fn namespace_of(resolved: ResolveResult<'_>) -> Option<String> {
    match resolved {
        ResolveResult::Bound(namespace) => {
            Some(String::from_utf8_lossy(namespace.as_ref()).into_owned())
        }
        _ => None,
    }
}

fn element_of(resolved: ResolveResult<'_>, start: &BytesStart<'_>) -> XmlElement {
    XmlElement {
        namespace: namespace_of(resolved),
        name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
        children: Vec::new(),
        text: None,
    }
}

fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn append_text(stack: &mut [XmlElement], text: &str) {
    if let Some(current) = stack.last_mut() {
        current.text.get_or_insert_with(String::new).push_str(text);
    }
}

/// Parses a document into its namespace-resolved root element.
pub fn parse_document(text: &str) -> PostNLResult<XmlElement> {
    let mut reader = NsReader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root = None;
    loop {
        match reader.read_resolved_event() {
            Ok((resolved, Event::Start(start))) => stack.push(element_of(resolved, &start)),
            Ok((resolved, Event::Empty(start))) => {
                let element = element_of(resolved, &start);
                attach(&mut stack, &mut root, element);
            }
            Ok((_, Event::End(_))) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| xml_error("unexpected closing tag"))?;
                attach(&mut stack, &mut root, element);
            }
            Ok((_, Event::Text(text))) => {
                let text = text.unescape().map_err(xml_error)?;
                append_text(&mut stack, &text);
            }
            Ok((_, Event::CData(data))) => {
                let data = data.into_inner();
                append_text(&mut stack, &String::from_utf8_lossy(&data));
            }
            Ok((_, Event::Eof)) => break,
            Ok(_) => {}
            Err(error) => return Err(xml_error(error)),
        }
    }

    if !stack.is_empty() {
        return Err(xml_error("unexpected end of document"));
    }
    root.ok_or_else(|| xml_error("document has no root element"))
}

/// Renders a document. `declarations` are `(prefix, uri)` pairs declared on the root;
/// elements in other namespaces declare a default namespace.
pub fn write_document(root: &XmlElement, declarations: &[(&str, &str)]) -> PostNLResult<String> {
    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;
    write_element(&mut writer, root, declarations, true)?;
    String::from_utf8(writer.into_inner()).map_err(xml_error)
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    element: &XmlElement,
    declarations: &[(&str, &str)],
    is_root: bool,
) -> PostNLResult<()> {
    let prefix = element.namespace.as_deref().and_then(|uri| {
        declarations
            .iter()
            .find(|(_, declared)| *declared == uri)
            .map(|(prefix, _)| *prefix)
    });
    let tag = match prefix {
        Some(prefix) => format!("{prefix}:{}", element.name),
        None => element.name.clone(),
    };

    let mut start = BytesStart::new(tag.as_str());
    if is_root {
        for (prefix, uri) in declarations {
            start.push_attribute((format!("xmlns:{prefix}").as_str(), *uri));
        }
    }
    if let (None, Some(uri)) = (prefix, &element.namespace) {
        start.push_attribute(("xmlns", uri.as_str()));
    }

    if element.children.is_empty() && element.text.is_none() {
        writer.write_event(Event::Empty(start)).map_err(xml_error)?;
        return Ok(());
    }

    writer.write_event(Event::Start(start)).map_err(xml_error)?;
    if let Some(text) = &element.text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_error)?;
    }
    for child in &element.children {
        write_element(writer, child, declarations, false)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(tag.as_str())))
        .map_err(xml_error)?;
    Ok(())
}

/// Serializes the declared, set properties of `entity` for `service` as child elements.
///
/// An entity without descriptors for `service` yields no elements, unless it requires a
/// resolved context, in which case [`PostNLError::ServiceContextMissing`] is returned.
pub fn to_wire_xml(
    entity: &dyn Serializable,
    service: Service,
    namespaces: &NamespaceMap,
) -> PostNLResult<Vec<XmlElement>> {
    let Some(fields) = descriptors::fields(entity.entity_name(), service) else {
        if entity.requires_context() {
            return Err(PostNLError::ServiceContextMissing(format!(
                "`{}` cannot be serialized for the {service} service",
                entity.entity_name()
            )));
        }
        return Ok(Vec::new());
    };

    let mut properties = entity.properties();
    let mut elements = Vec::new();
    for field in fields {
        let Some(position) = properties.iter().position(|(name, _)| *name == field.name) else {
            continue;
        };
        let (_, property) = properties.remove(position);
        let namespace = field.namespace.map(|namespace| namespaces.uri(namespace));
        match property {
            Property::List(Sequence::Inline, items) => {
                for item in items {
                    elements.push(property_element(namespace, field.name, item, service, namespaces)?);
                }
            }
            property => {
                elements.push(property_element(namespace, field.name, property, service, namespaces)?)
            }
        }
    }
    Ok(elements)
}

fn property_element(
    namespace: Option<&str>,
    name: &str,
    property: Property<'_>,
    service: Service,
    namespaces: &NamespaceMap,
) -> PostNLResult<XmlElement> {
    let mut element = XmlElement::new(namespace, name);
    match property {
        Property::Text(text) => element.text = Some(text.into_owned()),
        Property::Flag(flag) | Property::FlagText(flag) => element.text = Some(flag.to_string()),
        Property::Entity(entity) => element.children = to_wire_xml(entity, service, namespaces)?,
        Property::List(sequence, items) => {
            let (namespace, tag) = match sequence {
                Sequence::Wrapped(tag) => (namespace, tag),
                Sequence::Strings => (Some(namespaces.uri(Namespace::Arrays)), "string"),
                Sequence::Inline => (namespace, name),
            };
            for item in items {
                element
                    .children
                    .push(property_element(namespace, tag, item, service, namespaces)?);
            }
        }
    }
    Ok(element)
}

/// Decodes `element`'s children into `E`.
pub fn from_wire_xml<E: Entity>(element: &XmlElement, context: &XmlContext) -> PostNLResult<E> {
    from_fields(element.to_value(), Format::Xml(context))
}

fn split_key(key: &str) -> (Option<&str>, &str) {
    match key.strip_prefix('{').and_then(|rest| rest.split_once('}')) {
        Some((uri, local)) => (Some(uri), local),
        None => (None, key),
    }
}

/// Maps `{uri}Local` keys to field names, dropping elements not declared for the service.
///
/// Entities without descriptors for the service keep every element under its local name.
pub(crate) fn resolve_fields<E: Entity>(
    object: Map<String, Value>,
    context: &XmlContext,
) -> Map<String, Value> {
    let declared = descriptors::fields(E::NAME, context.service);
    let mut resolved = Map::new();
    for (key, value) in object {
        let (uri, local) = split_key(&key);
        let accepted = match declared {
            None => true,
            Some(fields) => fields.iter().any(|field| {
                field.name == local && context.namespaces.matches(field.namespace, uri)
            }),
        };
        if accepted {
            resolved.insert(local.to_string(), value);
        } else {
            tracing::trace!(entity = E::NAME, element = %key, "ignoring undeclared element");
        }
    }
    resolved
}

/// Extracts the items of a sequence from its decoded XML value.
pub(crate) fn container_items(value: Value, sequence: Sequence) -> PostNLResult<Vec<Value>> {
    match (sequence, value) {
        (_, Value::Null) => Ok(Vec::new()),
        (Sequence::Inline, Value::Array(items)) => Ok(items),
        (Sequence::Inline, item) => Ok(vec![item]),
        (_, Value::Array(containers)) => {
            let mut items = Vec::new();
            for container in containers {
                items.extend(container_items(container, sequence)?);
            }
            Ok(items)
        }
        (_, Value::Object(children)) => Ok(children
            .into_iter()
            .flat_map(|(_, value)| match value {
                Value::Array(items) => items,
                item => vec![item],
            })
            .collect()),
        (_, text @ Value::String(_)) => Ok(vec![text]),
        (_, other) => Err(PostNLError::response(format!(
            "expected a container element, found {}",
            super::kind_of(&other)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ENVELOPE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <Response xmlns="urn:services" xmlns:a="urn:domain">
      <a:Items>
        <a:Item><a:Code>01</a:Code></a:Item>
        <a:Item><a:Code>02</a:Code></a:Item>
      </a:Items>
      <a:Note>Tom &amp; Jerry</a:Note>
      <a:Empty/>
    </Response>
  </s:Body>
</s:Envelope>"#;

    #[test]
    fn namespaces_are_resolved() {
        let root = parse_document(ENVELOPE).unwrap();
        assert_eq!(root.name, "Envelope");
        assert_eq!(
            root.namespace.as_deref(),
            Some("http://schemas.xmlsoap.org/soap/envelope/")
        );

        let response = root.find("Response").unwrap();
        assert_eq!(response.namespace.as_deref(), Some("urn:services"));
        assert_eq!(response.child("Items").unwrap().children.len(), 2);
        assert_eq!(response.child_text("Note"), Some("Tom & Jerry"));
    }

    #[test]
    fn repeated_children_become_arrays() {
        let root = parse_document(ENVELOPE).unwrap();
        let value = root.find("Response").unwrap().to_value();
        assert_eq!(
            value,
            json!({
                "{urn:domain}Items": {
                    "{urn:domain}Item": [
                        {"{urn:domain}Code": "01"},
                        {"{urn:domain}Code": "02"}
                    ]
                },
                "{urn:domain}Note": "Tom & Jerry",
                "{urn:domain}Empty": null
            })
        );
    }

    #[test]
    fn truncated_documents_are_rejected() {
        assert!(parse_document("<a><b></b>").is_err());
        assert!(parse_document("").is_err());
    }

    #[test]
    fn documents_are_written_with_declared_prefixes() {
        let root = XmlElement::new(Some("urn:env"), "Envelope").with_child(
            XmlElement::new(Some("urn:domain"), "Note")
                .with_text("a < b")
                .with_child(XmlElement::new(Some("urn:other"), "Flag").with_text("true")),
        );
        let text = write_document(&root, &[("env", "urn:env"), ("domain", "urn:domain")]).unwrap();

        assert!(text.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(text.contains(r#"<env:Envelope xmlns:env="urn:env" xmlns:domain="urn:domain">"#));
        assert!(text.contains("<domain:Note>a &lt; b"));
        assert!(text.contains(r#"<Flag xmlns="urn:other">true</Flag>"#));

        let parsed = parse_document(&text).unwrap();
        assert_eq!(parsed, root);
    }

    #[test]
    fn containers_yield_their_items() {
        assert_eq!(
            container_items(json!({"{urn:a}string": ["a", "b"]}), Sequence::Strings).unwrap(),
            vec![json!("a"), json!("b")]
        );
        assert_eq!(
            container_items(json!({"{urn:a}Event": {"Code": "01B"}}), Sequence::Wrapped("Event"))
                .unwrap(),
            vec![json!({"Code": "01B"})]
        );
        assert!(container_items(Value::Null, Sequence::Wrapped("Event"))
            .unwrap()
            .is_empty());
        assert_eq!(
            container_items(json!({"Code": "01"}), Sequence::Inline).unwrap(),
            vec![json!({"Code": "01"})]
        );
    }
}
