//! XML parsing of FES documents
//!
//! The reader builds objects with the factory and fills them through
//! `set_feature`, locating each attribute and child element through the
//! registry's XML metadata. A child that is a member of a substitution
//! group is matched by walking its head chain until the class declares a
//! feature for one of the heads; derived views are then redirected to the
//! choice group that stores them.

use indexmap::IndexMap;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use roxmltree::{Document, Node};
use std::path::Path;

use crate::datatypes;
use crate::error::{Error, Result};
use crate::factory::Fes20Factory;
use crate::limits::Limits;
use crate::model::{
    AnyElement, DocumentRoot, Element, ElementType, FesObject, GroupEntry, MixedEntry, ModelObject, Value,
};
use crate::namespaces::{QName, FES_NAMESPACE, OWS_NAMESPACE, XLINK_NAMESPACE, XMLNS_NAMESPACE, XSI_NAMESPACE};
use crate::ows::{DomainType, MetadataType, OwsObject, PossibleValues};
use crate::registry::{
    fes20, ClassDescriptor, ClassifierId, ContentKind, FeatureDescriptor, FeatureId, Registry, TypeRef, XmlKind,
};

/// Parses FES XML into models
#[derive(Debug, Clone)]
pub struct XmlReader<'r> {
    registry: &'r Registry,
    factory: Fes20Factory<'r>,
    limits: Limits,
}

impl XmlReader<'static> {
    /// Reader over the FES 2.0 package with default limits
    pub fn fes20() -> Result<Self> {
        Ok(Self::new(fes20()?))
    }
}

/// Values collected for one feature while reading an element's children
enum Collected {
    Entries(Vec<GroupEntry>),
    Items(Vec<Value>),
}

impl<'r> XmlReader<'r> {
    /// Reader over `registry` with default limits
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            factory: Fes20Factory::new(registry),
            limits: Limits::default(),
        }
    }

    /// Replace the resource limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Current limits
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Read a document from a file
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<DocumentRoot> {
        let text = std::fs::read_to_string(path.as_ref())?;
        self.read_document(&text)
    }

    /// Read a document from text
    pub fn read_document(&self, text: &str) -> Result<DocumentRoot> {
        self.limits.check_document_size(text.len())?;
        let document = Document::parse(text)?;
        let mut root = DocumentRoot::default();

        for node in document.root().children() {
            if node.is_element() {
                for namespace in node.namespaces().filter(|ns| ns.name() != Some("xml")) {
                    root.xmlns_prefix_map
                        .insert(namespace.name().unwrap_or_default().to_string(), namespace.uri().to_string());
                }
                if let Some(locations) = node.attribute((XSI_NAMESPACE, "schemaLocation")) {
                    let tokens: Vec<&str> = locations.split_whitespace().collect();
                    for pair in tokens.chunks(2) {
                        if let [namespace, location] = pair {
                            root.xsi_schema_location
                                .insert(namespace.to_string(), location.to_string());
                        }
                    }
                }
                let entry = self.read_entry(node)?;
                tracing::debug!(root = %entry.element, "read document");
                root.mixed.push(MixedEntry::Element(entry));
            } else if let Some(entry) = non_element_entry(node) {
                root.mixed.push(entry);
            }
        }
        if root.root().is_none() {
            return Err(Error::Decode("document has no FES root element".to_string()));
        }
        Ok(root)
    }

    /// Read a global FES element and its content
    fn read_entry(&self, node: Node<'_, '_>) -> Result<GroupEntry> {
        let element = global_element(node).ok_or_else(|| {
            Error::Decode(format!(
                "{} at {} is not a global FES element",
                expanded_name(node),
                position(node)
            ))
        })?;
        let value = self.element_value(node, element, 0)?;
        GroupEntry::new(element, value)
    }

    fn element_value(&self, node: Node<'_, '_>, element: Element, depth: usize) -> Result<Value> {
        if element.is_abstract() {
            return Err(Error::Decode(format!(
                "abstract element {} at {} cannot appear in a document",
                element,
                position(node)
            )));
        }
        match element.content() {
            ElementType::String => Ok(Value::String(text_content(node))),
            ElementType::Class(class) => self.read_object(node, class, depth).map(Value::object),
            ElementType::AnyObject => Err(Error::Decode(format!(
                "element {} at {} has no concrete type",
                element,
                position(node)
            ))),
        }
    }

    fn read_object(&self, node: Node<'_, '_>, class: ClassifierId, depth: usize) -> Result<FesObject> {
        self.limits.check_depth(depth)?;
        self.limits.check_attributes(node.attributes().count())?;
        self.limits.check_children(node.children().filter(|n| n.is_element()).count())?;

        let descriptor = self.registry.class(class)?;
        let mut object = self.factory.create(class)?;
        tracing::trace!(class = %descriptor.name, at = %position(node), "reading object");

        for attribute in node.attributes() {
            let namespace = attribute.namespace();
            if namespace == Some(XSI_NAMESPACE) || namespace == Some(XMLNS_NAMESPACE) {
                continue;
            }
            let Some(feature) = self
                .registry
                .feature_by_xml_name(class, XmlKind::Attribute, namespace, attribute.name())
            else {
                tracing::warn!(
                    class = %descriptor.name,
                    attribute = attribute.name(),
                    at = %position(node),
                    "skipping unknown attribute"
                );
                continue;
            };
            let value = self.simple_value(feature, attribute.value(), node)?;
            object.set_feature(feature.id, value)?;
        }

        match descriptor.content {
            ContentKind::Simple => {
                if let Some(feature) = descriptor.features().iter().find(|f| f.xml.kind == XmlKind::Simple) {
                    let text = text_content(node);
                    if !text.trim().is_empty() {
                        object.set_feature(feature.id, self.simple_value(feature, &text, node)?)?;
                    }
                }
            }
            ContentKind::Mixed => {
                let feature = descriptor
                    .features()
                    .iter()
                    .find(|f| f.xml.kind == XmlKind::ElementWildcard && !f.is_derived())
                    .ok_or_else(|| {
                        Error::Configuration(format!("mixed class '{}' has no content feature", descriptor.name))
                    })?;
                let entries = self.mixed_content(node, depth)?;
                if !entries.is_empty() {
                    object.set_feature(feature.id, Value::Mixed(entries))?;
                }
            }
            ContentKind::Empty | ContentKind::ElementOnly | ContentKind::Unspecified => {
                self.children(node, descriptor, &mut object, depth)?;
            }
        }
        Ok(object)
    }

    fn children(
        &self,
        node: Node<'_, '_>,
        descriptor: &ClassDescriptor,
        object: &mut FesObject,
        depth: usize,
    ) -> Result<()> {
        let mut collected: IndexMap<FeatureId, Collected> = IndexMap::new();

        for child in node.children().filter(|n| n.is_element()) {
            let Some(located) = locate(descriptor, child) else {
                return Err(Error::Decode(format!(
                    "unexpected element {} in {} at {}",
                    expanded_name(child),
                    descriptor.name,
                    position(child)
                )));
            };
            let storage = storage_feature(descriptor, located).ok_or_else(|| {
                Error::Decode(format!(
                    "element {} at {} maps to read-only feature '{}' of {}",
                    expanded_name(child),
                    position(child),
                    located.name,
                    descriptor.name
                ))
            })?;

            match storage.xml.kind {
                XmlKind::Group => match global_element(child) {
                    Some(element) => {
                        let value = self.element_value(child, element, depth + 1)?;
                        let entry = GroupEntry::new(element, value)?;
                        match collected
                            .entry(storage.id)
                            .or_insert_with(|| Collected::Entries(Vec::new()))
                        {
                            Collected::Entries(entries) => entries.push(entry),
                            Collected::Items(_) => return Err(mixed_group(storage, child)),
                        }
                    }
                    None => {
                        let value = self.feature_value(located, child, depth)?;
                        match collected
                            .entry(storage.id)
                            .or_insert_with(|| Collected::Items(Vec::new()))
                        {
                            Collected::Items(items) => items.push(value),
                            Collected::Entries(_) => return Err(mixed_group(storage, child)),
                        }
                    }
                },
                XmlKind::ElementWildcard => {
                    let value = Value::Any(self.any_element(child, depth + 1)?);
                    self.store(&mut collected, object, storage, value)?;
                }
                _ => {
                    let value = self.feature_value(storage, child, depth)?;
                    self.store(&mut collected, object, storage, value)?;
                }
            }
        }

        for (feature, values) in collected {
            let value = match values {
                Collected::Entries(entries) => Value::Group(entries),
                Collected::Items(items) => Value::List(items),
            };
            object.set_feature(feature, value)?;
        }
        Ok(())
    }

    /// Set a single-valued feature now, or collect an item of a many-valued one
    fn store(
        &self,
        collected: &mut IndexMap<FeatureId, Collected>,
        object: &mut FesObject,
        feature: &FeatureDescriptor,
        value: Value,
    ) -> Result<()> {
        if feature.is_many() {
            if let Collected::Items(items) = collected
                .entry(feature.id)
                .or_insert_with(|| Collected::Items(Vec::new()))
            {
                items.push(value);
            }
            Ok(())
        } else {
            object.set_feature(feature.id, value)
        }
    }

    /// Value of a child element read as `feature`
    fn feature_value(&self, feature: &FeatureDescriptor, node: Node<'_, '_>, depth: usize) -> Result<Value> {
        match &feature.type_ref {
            TypeRef::Classifier(class) if self.registry.class(*class).is_ok() => {
                self.read_object(node, *class, depth + 1).map(Value::object)
            }
            TypeRef::External { name, .. } => read_ows(node, name).map(Value::Ows),
            _ => self.simple_value(feature, &text_content(node), node),
        }
    }

    /// Parse a lexical value of `feature`, resolving QName prefixes against `node`
    fn simple_value(&self, feature: &FeatureDescriptor, lexical: &str, node: Node<'_, '_>) -> Result<Value> {
        let value = if feature.is_many() {
            lexical
                .split_whitespace()
                .map(|token| datatypes::parse_typed(self.registry, &feature.type_ref, token))
                .collect::<Result<Vec<_>>>()
                .map(Value::List)?
        } else {
            datatypes::parse_typed(self.registry, &feature.type_ref, lexical)?
        };
        resolve_qnames(value, node)
    }

    fn mixed_content(&self, node: Node<'_, '_>, depth: usize) -> Result<Vec<MixedEntry>> {
        let mut entries = Vec::new();
        for child in node.children() {
            if child.is_text() {
                if let Some(text) = child.text() {
                    entries.push(MixedEntry::Text(text.to_string()));
                }
            } else if child.is_element() {
                match global_element(child).filter(|e| !e.is_abstract()) {
                    Some(element) => {
                        let value = self.element_value(child, element, depth + 1)?;
                        entries.push(MixedEntry::Element(GroupEntry::new(element, value)?));
                    }
                    None => entries.push(MixedEntry::Any(self.any_element(child, depth + 1)?)),
                }
            } else if let Some(entry) = non_element_entry(child) {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    /// Wildcard element kept as XML text, with the namespaces in scope declared on it
    fn any_element(&self, node: Node<'_, '_>, depth: usize) -> Result<AnyElement> {
        let tag = node.tag_name();
        let mut name = QName::new(tag.namespace(), tag.name());
        if let Some(prefix) = tag.namespace().and_then(|ns| prefix_of(node, ns)) {
            name = name.with_prefix(prefix);
        }
        let mut writer = Writer::new(Vec::new());
        self.write_subtree(&mut writer, node, None, depth)?;
        let xml = String::from_utf8(writer.into_inner()).map_err(|e| Error::Decode(e.to_string()))?;
        Ok(AnyElement::new(name, xml))
    }

    fn write_subtree(
        &self,
        writer: &mut Writer<Vec<u8>>,
        node: Node<'_, '_>,
        parent: Option<Node<'_, '_>>,
        depth: usize,
    ) -> Result<()> {
        self.limits.check_depth(depth)?;
        self.limits.check_attributes(node.attributes().count())?;
        self.limits.check_children(node.children().filter(|n| n.is_element()).count())?;

        let tag = node.tag_name();
        let name = qualified(node, tag.namespace(), tag.name());
        let mut start = BytesStart::new(name.as_str());

        for namespace in node.namespaces() {
            if namespace.name() == Some("xml") {
                continue;
            }
            let inherited = parent.is_some_and(|p| {
                p.namespaces()
                    .any(|ns| ns.name() == namespace.name() && ns.uri() == namespace.uri())
            });
            if !inherited {
                let attribute = match namespace.name() {
                    Some(prefix) => format!("xmlns:{}", prefix),
                    None => "xmlns".to_string(),
                };
                start.push_attribute((attribute.as_str(), namespace.uri()));
            }
        }
        for attribute in node.attributes() {
            let name = qualified(node, attribute.namespace(), attribute.name());
            start.push_attribute((name.as_str(), attribute.value()));
        }

        if !node.has_children() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }
        writer.write_event(Event::Start(start))?;
        for child in node.children() {
            if child.is_element() {
                self.write_subtree(writer, child, Some(node), depth + 1)?;
            } else if child.is_text() {
                writer.write_event(Event::Text(BytesText::new(child.text().unwrap_or_default())))?;
            } else if child.is_comment() {
                writer.write_event(Event::Comment(BytesText::from_escaped(child.text().unwrap_or_default())))?;
            } else if let Some(pi) = child.pi() {
                let content = match pi.value {
                    Some(value) => format!("{} {}", pi.target, value),
                    None => pi.target.to_string(),
                };
                writer.write_event(Event::PI(BytesText::from_escaped(content)))?;
            }
        }
        writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
        Ok(())
    }
}

/// Read a document with the FES 2.0 package and default limits
pub fn read_document(text: &str) -> Result<DocumentRoot> {
    XmlReader::fes20()?.read_document(text)
}

fn mixed_group(feature: &FeatureDescriptor, node: Node<'_, '_>) -> Error {
    Error::Decode(format!(
        "group '{}' mixes global and local elements at {}",
        feature.name,
        position(node)
    ))
}

/// Feature of `descriptor` an element child is read as
fn locate<'d>(descriptor: &'d ClassDescriptor, node: Node<'_, '_>) -> Option<&'d FeatureDescriptor> {
    let namespace = node.tag_name().namespace();
    let local = node.tag_name().name();
    let element_feature = |name: &str, namespace: Option<&str>| {
        descriptor
            .features()
            .iter()
            .find(|f| f.xml.kind == XmlKind::Element && f.xml.name == name && f.xml.namespace.as_deref() == namespace)
    };

    if let Some(feature) = element_feature(local, namespace) {
        return Some(feature);
    }
    if namespace == Some(FES_NAMESPACE) {
        let mut head = Element::from_local_name(local).and_then(Element::head);
        while let Some(element) = head {
            if let Some(feature) = element_feature(element.name(), Some(FES_NAMESPACE)) {
                return Some(feature);
            }
            head = element.head();
        }
        return None;
    }
    descriptor.features().iter().find(|f| {
        f.xml.kind == XmlKind::ElementWildcard && !f.is_derived() && wildcard_allows(f, namespace)
    })
}

fn wildcard_allows(feature: &FeatureDescriptor, namespace: Option<&str>) -> bool {
    feature.xml.wildcards.iter().any(|w| match w.as_str() {
        "##any" => true,
        "##other" => namespace.is_some_and(|ns| ns != FES_NAMESPACE),
        listed => namespace == Some(listed),
    })
}

/// Non-derived feature that stores what `feature` is a view of
fn storage_feature<'d>(descriptor: &'d ClassDescriptor, feature: &'d FeatureDescriptor) -> Option<&'d FeatureDescriptor> {
    let mut current = feature;
    while current.is_derived() {
        let group = current.xml.group.as_deref()?.trim_start_matches('#');
        current = descriptor
            .features()
            .iter()
            .find(|f| f.xml.kind == XmlKind::Group && f.xml.name == group)?;
    }
    Some(current)
}

fn global_element(node: Node<'_, '_>) -> Option<Element> {
    if node.tag_name().namespace() == Some(FES_NAMESPACE) {
        Element::from_local_name(node.tag_name().name())
    } else {
        None
    }
}

fn non_element_entry(node: Node<'_, '_>) -> Option<MixedEntry> {
    if node.is_comment() {
        node.text().map(|text| MixedEntry::Comment(text.to_string()))
    } else if let Some(pi) = node.pi() {
        Some(MixedEntry::ProcessingInstruction {
            target: pi.target.to_string(),
            data: pi.value.unwrap_or_default().to_string(),
        })
    } else {
        None
    }
}

fn text_content(node: Node<'_, '_>) -> String {
    node.children().filter(|n| n.is_text()).filter_map(|n| n.text()).collect()
}

fn expanded_name(node: Node<'_, '_>) -> String {
    let name = node.tag_name();
    QName::new(name.namespace(), name.name()).to_clark()
}

fn position(node: Node<'_, '_>) -> String {
    let pos = node.document().text_pos_at(node.range().start);
    format!("{}:{}", pos.row, pos.col)
}

fn resolve_qnames(value: Value, node: Node<'_, '_>) -> Result<Value> {
    match value {
        Value::QName(qname) => {
            let namespace = node.lookup_namespace_uri(qname.prefix.as_deref());
            match (qname.prefix.as_deref(), namespace) {
                (Some(prefix), None) => Err(Error::Namespace(format!(
                    "prefix '{}' of '{}' is not bound at {}",
                    prefix,
                    qname.to_lexical(),
                    position(node)
                ))),
                (prefix, namespace) => {
                    let mut resolved = QName::new(namespace, qname.local_name);
                    if let Some(prefix) = prefix {
                        resolved = resolved.with_prefix(prefix);
                    }
                    Ok(Value::QName(resolved))
                }
            }
        }
        Value::List(items) => items
            .into_iter()
            .map(|item| resolve_qnames(item, node))
            .collect::<Result<Vec<_>>>()
            .map(Value::List),
        other => Ok(other),
    }
}

fn read_ows(node: Node<'_, '_>, type_name: &str) -> Result<OwsObject> {
    match type_name {
        "MetadataType" => Ok(OwsObject::Metadata(read_metadata(node))),
        "DomainType" => read_domain(node).map(OwsObject::Domain),
        other => Err(Error::Decode(format!(
            "no reader for OWS type '{}' at {}",
            other,
            position(node)
        ))),
    }
}

fn read_metadata(node: Node<'_, '_>) -> MetadataType {
    MetadataType {
        about: node.attribute("about").map(str::to_string),
        href: node.attribute((XLINK_NAMESPACE, "href")).map(str::to_string),
        title: node.attribute((XLINK_NAMESPACE, "title")).map(str::to_string),
    }
}

fn read_domain(node: Node<'_, '_>) -> Result<DomainType> {
    let name = node.attribute("name").ok_or_else(|| {
        Error::Decode(format!("OWS domain at {} has no name attribute", position(node)))
    })?;
    let mut domain = DomainType {
        name: name.to_string(),
        ..DomainType::default()
    };
    for child in node
        .children()
        .filter(|n| n.is_element() && n.tag_name().namespace() == Some(OWS_NAMESPACE))
    {
        match child.tag_name().name() {
            "AllowedValues" => {
                domain.possible_values = PossibleValues::AllowedValues(
                    child
                        .children()
                        .filter(|n| n.is_element() && n.tag_name().name() == "Value")
                        .map(text_content)
                        .collect(),
                );
            }
            "AnyValue" => domain.possible_values = PossibleValues::AnyValue,
            "NoValues" => domain.possible_values = PossibleValues::NoValues,
            "ValuesReference" => {
                domain.possible_values = PossibleValues::ValuesReference {
                    name: text_content(child),
                    reference: child
                        .attribute((OWS_NAMESPACE, "reference"))
                        .unwrap_or_default()
                        .to_string(),
                };
            }
            "DefaultValue" => domain.default_value = Some(text_content(child)),
            "Meaning" => domain.meaning = Some(text_content(child)),
            "Metadata" => domain.metadata.push(read_metadata(child)),
            other => tracing::debug!(element = other, "ignoring OWS domain child"),
        }
    }
    Ok(domain)
}

fn prefix_of<'a>(node: Node<'a, '_>, namespace: &str) -> Option<&'a str> {
    node.namespaces()
        .find(|ns| ns.uri() == namespace)
        .and_then(|ns| ns.name())
}

fn qualified(node: Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|ns| prefix_of(node, ns)) {
        Some(prefix) => format!("{}:{}", prefix, local),
        None => local.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::{EnumValue, SortOrder, VersionAction};
    use crate::model::{
        BinaryComparisonOpType, BinaryLogicOpType, FilterType, Predicate, ResourceIdType, SortByType,
    };
    use crate::registry::ids::binary_logic_op_type;

    const FES: &str = "xmlns:fes=\"http://www.opengis.net/fes/2.0\"";

    fn read(text: &str) -> DocumentRoot {
        read_document(text).unwrap()
    }

    fn root_object(document: &DocumentRoot) -> &FesObject {
        document.root().and_then(GroupEntry::as_object).unwrap()
    }

    #[test]
    fn test_reads_comparison_filter() {
        let document = read(&format!(
            "<fes:Filter {FES}><fes:PropertyIsEqualTo matchCase=\"false\">\
             <fes:ValueReference>name</fes:ValueReference><fes:Literal>Main St</fes:Literal>\
             </fes:PropertyIsEqualTo></fes:Filter>"
        ));
        let filter = FilterType::try_from(root_object(&document).clone()).unwrap();
        let Some(Predicate::Single(entry)) = &filter.predicate else {
            panic!("expected a single predicate");
        };
        assert_eq!(entry.element, Element::PropertyIsEqualTo);
        let op = BinaryComparisonOpType::try_from(entry.as_object().unwrap().clone()).unwrap();
        assert_eq!(op.match_case, Some(false));
        assert_eq!(op.expressions.len(), 2);
        assert_eq!(document.xmlns_prefix_map.get("fes").map(String::as_str), Some(FES_NAMESPACE));
    }

    #[test]
    fn test_binary_logic_keeps_predicate_order() {
        let document = read(&format!(
            "<fes:And {FES}><fes:ResourceId rid=\"r1\"/>\
             <fes:PropertyIsNull><fes:ValueReference>a</fes:ValueReference></fes:PropertyIsNull>\
             <fes:Function name=\"f\"/></fes:And>"
        ));
        let and = BinaryLogicOpType::try_from(root_object(&document).clone()).unwrap();
        let Value::Group(entries) = and.get_feature(binary_logic_op_type::FILTER_PREDICATES, false, true).unwrap()
        else {
            panic!("expected group entries");
        };
        let elements: Vec<Element> = entries.iter().map(|e| e.element).collect();
        assert_eq!(elements, vec![Element::ResourceId, Element::PropertyIsNull, Element::Function]);
    }

    #[test]
    fn test_union_attribute_and_enum_element() {
        let document = read(&format!(
            "<fes:Filter {FES}><fes:ResourceId rid=\"r1\" version=\"LAST\"/></fes:Filter>"
        ));
        let filter = FilterType::try_from(root_object(&document).clone()).unwrap();
        let Some(Predicate::Ids(ids)) = &filter.predicate else {
            panic!("expected resource ids");
        };
        let rid = ResourceIdType::try_from(ids[0].as_object().unwrap().clone()).unwrap();
        assert_eq!(
            rid.get(crate::registry::ids::resource_id_type::VERSION).unwrap(),
            Value::Enum(EnumValue::from(VersionAction::Last))
        );

        let document = read(&format!(
            "<fes:SortBy {FES}><fes:SortProperty><fes:ValueReference>age</fes:ValueReference>\
             <fes:SortOrder>DESC</fes:SortOrder></fes:SortProperty></fes:SortBy>"
        ));
        let sort = SortByType::try_from(root_object(&document).clone()).unwrap();
        assert_eq!(sort.sort_property[0].sort_order(), SortOrder::Desc);
    }

    #[test]
    fn test_wildcard_content_is_kept_as_xml() {
        let document = read(&format!(
            "<fes:Filter {FES} xmlns:gml=\"http://www.opengis.net/gml/3.2\"><fes:BBOX>\
             <fes:ValueReference>geom</fes:ValueReference>\
             <gml:Envelope srsName=\"EPSG:4326\"><gml:lowerCorner>0 0</gml:lowerCorner></gml:Envelope>\
             </fes:BBOX></fes:Filter>"
        ));
        let filter = FilterType::try_from(root_object(&document).clone()).unwrap();
        let Some(Predicate::Single(entry)) = &filter.predicate else {
            panic!("expected a single predicate");
        };
        let bbox = entry.as_object().unwrap();
        let Value::Any(any) = bbox.get(crate::registry::ids::bbox_type::ANY).unwrap() else {
            panic!("expected wildcard content");
        };
        assert_eq!(any.name.local_name, "Envelope");
        assert_eq!(any.name.prefix.as_deref(), Some("gml"));
        assert!(any.xml.starts_with("<gml:Envelope "));
        assert!(any.xml.contains("xmlns:gml=\"http://www.opengis.net/gml/3.2\""));
        assert!(any.xml.contains("srsName=\"EPSG:4326\""));
        assert!(any.xml.ends_with("<gml:lowerCorner>0 0</gml:lowerCorner></gml:Envelope>"));
    }

    #[test]
    fn test_qname_prefixes_are_resolved() {
        let document = read(&format!(
            "<fes:Literal {FES} xmlns:xs=\"http://www.w3.org/2001/XMLSchema\" type=\"xs:int\">5</fes:Literal>"
        ));
        let literal = root_object(&document);
        let Value::QName(qname) = literal.get(crate::registry::ids::literal_type::TYPE).unwrap() else {
            panic!("expected a QName");
        };
        assert_eq!(qname.namespace.as_deref(), Some("http://www.w3.org/2001/XMLSchema"));

        let err = read_document(&format!("<fes:Literal {FES} type=\"nope:int\">5</fes:Literal>")).unwrap_err();
        assert!(matches!(err, Error::Namespace(_)));
    }

    #[test]
    fn test_unknown_attribute_is_skipped() {
        let document = read(&format!("<fes:Filter {FES} colour=\"red\"/>"));
        assert!(root_object(&document).as_model().class_name() == "FilterType");
    }

    #[test]
    fn test_rejects_unexpected_elements() {
        let err = read_document(&format!("<fes:Filter {FES}><fes:SortBy/></fes:Filter>")).unwrap_err();
        assert!(err.to_string().contains("unexpected element"));

        let err = read_document("<Filter/>").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_limits_are_enforced() {
        let reader = XmlReader::fes20()
            .unwrap()
            .with_limits(Limits::default().with_max_depth(1));
        let text = format!(
            "<fes:Filter {FES}><fes:Not><fes:PropertyIsNull><fes:ValueReference>a</fes:ValueReference>\
             </fes:PropertyIsNull></fes:Not></fes:Filter>"
        );
        assert!(matches!(reader.read_document(&text), Err(Error::LimitExceeded(_))));

        let reader = XmlReader::fes20()
            .unwrap()
            .with_limits(Limits::default().with_max_document_size(10));
        assert!(reader.read_document(&text).is_err());
    }

    #[test]
    fn test_comments_and_schema_location_on_root() {
        let document = read(&format!(
            "<!-- query --><fes:Filter {FES} xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
             xsi:schemaLocation=\"http://www.opengis.net/fes/2.0 filter.xsd\"/>"
        ));
        assert_eq!(document.mixed[0], MixedEntry::Comment(" query ".to_string()));
        assert_eq!(
            document.xsi_schema_location.get(FES_NAMESPACE).map(String::as_str),
            Some("filter.xsd")
        );
    }
}
