//! XML serialization of FES documents
//!
//! The writer walks a model through the reflective dispatcher only: the
//! registry says which features are attributes, child elements, choice
//! groups or wildcards, and `get_feature` supplies the values. Events are
//! buffered so the namespace declarations a document needs can be put on
//! its root element once the whole tree has been visited.

use indexmap::IndexMap;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

use crate::datatypes;
use crate::error::{Error, Result};
use crate::model::{AnyElement, DocumentRoot, Element, FesObject, GroupEntry, MixedEntry, ModelObject, Value};
use crate::namespaces::{
    NamespaceContext, QName, FES_NAMESPACE, FES_PREFIX, GML_NAMESPACE, OWS_NAMESPACE, XLINK_NAMESPACE,
    XSI_NAMESPACE,
};
use crate::ows::{DomainType, MetadataType, OwsObject, PossibleValues};
use crate::registry::{fes20, FeatureDescriptor, Registry, XmlKind};

/// Output options of [`XmlWriter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterConfig {
    /// Spaces per nesting level, `None` for compact output
    pub indent: Option<usize>,
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>`
    pub xml_declaration: bool,
    /// Extra prefix bindings declared on the root element
    pub prefixes: IndexMap<String, String>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            indent: Some(2),
            xml_declaration: true,
            prefixes: IndexMap::new(),
        }
    }
}

impl WriterConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Indent nested elements by `spaces`
    pub fn with_indent(mut self, spaces: usize) -> Self {
        self.indent = Some(spaces);
        self
    }

    /// Write everything on one line
    pub fn without_indent(mut self) -> Self {
        self.indent = None;
        self
    }

    /// Toggle the XML declaration
    pub fn with_xml_declaration(mut self, enabled: bool) -> Self {
        self.xml_declaration = enabled;
        self
    }

    /// Bind `prefix` to `namespace` on the root element
    pub fn with_prefix(mut self, prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.prefixes.insert(prefix.into(), namespace.into());
        self
    }
}

/// Serializes FES models to XML text
#[derive(Debug, Clone)]
pub struct XmlWriter<'r> {
    registry: &'r Registry,
    config: WriterConfig,
}

impl XmlWriter<'static> {
    /// Writer over the FES 2.0 package with the default configuration
    pub fn fes20() -> Result<Self> {
        Ok(Self::new(fes20()?))
    }
}

impl<'r> XmlWriter<'r> {
    /// Writer over `registry` with the default configuration
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            config: WriterConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: WriterConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Serialize a whole document
    pub fn write_document(&self, document: &DocumentRoot) -> Result<String> {
        let mut sink = EventSink::new(self.registry);
        for (prefix, namespace) in self.config.prefixes.iter().chain(document.xmlns_prefix_map.iter()) {
            sink.namespaces.declare(prefix, namespace);
        }

        let mut root = None;
        for entry in &document.mixed {
            match entry {
                MixedEntry::Element(element) => {
                    if root.is_none() {
                        root = Some(sink.events.len());
                    }
                    sink.entry(element)?;
                }
                MixedEntry::Any(any) => {
                    if root.is_none() {
                        root = Some(sink.events.len());
                    }
                    sink.raw(any);
                }
                MixedEntry::Text(_) | MixedEntry::CData(_) => {}
                other => sink.mixed(std::slice::from_ref(other))?,
            }
        }
        let root = root.ok_or_else(|| Error::Encode("document has no root element".to_string()))?;

        let mut extra = Vec::new();
        if !document.xsi_schema_location.is_empty() {
            let prefix = sink.namespaces.prefix_for(XSI_NAMESPACE, Some("xsi"));
            let pairs = document
                .xsi_schema_location
                .iter()
                .map(|(namespace, location)| format!("{} {}", namespace, location))
                .collect::<Vec<_>>()
                .join(" ");
            extra.push((format!("{}:schemaLocation", prefix), pairs));
        }
        sink.declare_on(root, extra)?;

        tracing::debug!(
            events = sink.events.len(),
            namespaces = sink.namespaces.declared.len(),
            "serialized document"
        );
        self.render(sink.events)
    }

    /// Serialize one element as a standalone document
    pub fn write_entry(&self, entry: &GroupEntry) -> Result<String> {
        let document = DocumentRoot {
            mixed: vec![MixedEntry::Element(entry.clone())],
            ..DocumentRoot::default()
        };
        self.write_document(&document)
    }

    /// Serialize an object as the given global element
    pub fn write_object(&self, element: Element, object: impl Into<FesObject>) -> Result<String> {
        self.write_entry(&GroupEntry::object(element, object)?)
    }

    fn render(&self, events: Vec<Event<'static>>) -> Result<String> {
        let buffer = Cursor::new(Vec::new());
        let mut writer = match self.config.indent {
            Some(spaces) => Writer::new_with_indent(buffer, b' ', spaces),
            None => Writer::new(buffer),
        };
        if self.config.xml_declaration {
            writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
                .map_err(|e| Error::Encode(e.to_string()))?;
        }
        for event in events {
            writer.write_event(event).map_err(|e| Error::Encode(e.to_string()))?;
        }
        String::from_utf8(writer.into_inner().into_inner()).map_err(|e| Error::Encode(e.to_string()))
    }
}

/// Prefixes bound while writing
#[derive(Debug)]
struct Bindings {
    known: NamespaceContext,
    declared: IndexMap<String, String>,
}

impl Bindings {
    fn new() -> Self {
        let mut known = NamespaceContext::fes();
        known.add_prefix("gml", GML_NAMESPACE);
        let mut declared = IndexMap::new();
        declared.insert(FES_PREFIX.to_string(), FES_NAMESPACE.to_string());
        Self { known, declared }
    }

    fn declare(&mut self, prefix: &str, namespace: &str) {
        if !prefix.is_empty() && !prefix.starts_with("xml") {
            self.declared.insert(prefix.to_string(), namespace.to_string());
        }
    }

    /// Prefix bound to `namespace`, binding one if needed
    fn prefix_for(&mut self, namespace: &str, hint: Option<&str>) -> String {
        if let Some((prefix, _)) = self.declared.iter().find(|(_, ns)| ns.as_str() == namespace) {
            return prefix.clone();
        }
        let free = |p: &&str| !p.is_empty() && !self.declared.contains_key(*p);
        let prefix = match hint.filter(free).or_else(|| self.known.get_prefix(namespace).filter(free)) {
            Some(prefix) => prefix.to_string(),
            None => (1..)
                .map(|n| format!("ns{}", n))
                .find(|p| !self.declared.contains_key(p))
                .unwrap_or_default(),
        };
        self.declared.insert(prefix.clone(), namespace.to_string());
        prefix
    }

    fn qualify(&mut self, namespace: Option<&str>, local: &str) -> String {
        match namespace {
            Some(ns) if !ns.is_empty() => format!("{}:{}", self.prefix_for(ns, None), local),
            _ => local.to_string(),
        }
    }
}

/// Buffered events of one document
struct EventSink<'r> {
    registry: &'r Registry,
    namespaces: Bindings,
    events: Vec<Event<'static>>,
}

impl<'r> EventSink<'r> {
    fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            namespaces: Bindings::new(),
            events: Vec::new(),
        }
    }

    /// Put the namespace declarations on the element starting at `index`
    fn declare_on(&mut self, index: usize, extra: Vec<(String, String)>) -> Result<()> {
        let (start, empty) = match self.events.get(index) {
            Some(Event::Start(start)) => (start, false),
            Some(Event::Empty(start)) => (start, true),
            _ => return Ok(()),
        };
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut declared = BytesStart::new(name);
        for (prefix, namespace) in &self.namespaces.declared {
            declared.push_attribute((format!("xmlns:{}", prefix).as_str(), namespace.as_str()));
        }
        for (name, value) in &extra {
            declared.push_attribute((name.as_str(), value.as_str()));
        }
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| Error::Encode(e.to_string()))?;
            declared.push_attribute(attribute);
        }
        self.events[index] = if empty {
            Event::Empty(declared)
        } else {
            Event::Start(declared)
        };
        Ok(())
    }

    fn entry(&mut self, entry: &GroupEntry) -> Result<()> {
        let name = self.namespaces.qualify(Some(entry.element.namespace()), entry.element.name());
        match &entry.value {
            Value::Object(object) => self.object(name, object.as_model()),
            Value::String(text) => {
                self.text_element(name, text);
                Ok(())
            }
            other => Err(Error::Encode(format!(
                "element '{}' cannot be written from {}",
                entry.element,
                other.kind()
            ))),
        }
    }

    fn object(&mut self, name: String, object: &dyn ModelObject) -> Result<()> {
        let class = self.registry.class(object.class_id())?;
        let mut start = BytesStart::new(name.clone());

        for feature in class.features() {
            if feature.is_derived() || feature.xml.kind != XmlKind::Attribute {
                continue;
            }
            if !object.is_feature_set(feature.id)? {
                continue;
            }
            let value = object.get_feature(feature.id, false, true)?;
            if value.is_null() {
                continue;
            }
            let lexical = self.lexical(feature, &value)?;
            let attribute = self.namespaces.qualify(feature.xml.namespace.as_deref(), &feature.xml.name);
            start.push_attribute((attribute.as_str(), lexical.as_str()));
        }

        let open = self.events.len();
        self.events.push(Event::Start(start));
        for feature in class.features() {
            if feature.is_derived() {
                continue;
            }
            match feature.xml.kind {
                XmlKind::Element => {
                    if object.is_feature_set(feature.id)? {
                        let value = object.get_feature(feature.id, false, true)?;
                        self.element_feature(feature, value)?;
                    }
                }
                XmlKind::Group => {
                    let value = object.get_feature(feature.id, false, true)?;
                    self.group_feature(class.features(), feature, value)?;
                }
                XmlKind::ElementWildcard => match object.get_feature(feature.id, false, true)? {
                    Value::Mixed(entries) => self.mixed(&entries)?,
                    Value::Any(any) => self.raw(&any),
                    Value::List(items) => {
                        for item in items {
                            if let Value::Any(any) = item {
                                self.raw(&any);
                            }
                        }
                    }
                    _ => {}
                },
                XmlKind::Simple => {
                    let value = object.get_feature(feature.id, false, true)?;
                    if !value.is_null() {
                        let text = self.lexical(feature, &value)?;
                        self.events.push(Event::Text(BytesText::new(&text).into_owned()));
                    }
                }
                XmlKind::Attribute | XmlKind::Unspecified => {}
            }
        }
        self.close(open, name);
        Ok(())
    }

    /// End the element opened at `open`, collapsing it when nothing was written
    fn close(&mut self, open: usize, name: String) {
        if self.events.len() == open + 1 {
            if let Some(Event::Start(start)) = self.events.pop() {
                self.events.push(Event::Empty(start));
            }
        } else {
            self.events.push(Event::End(BytesEnd::new(name)));
        }
    }

    fn element_feature(&mut self, feature: &FeatureDescriptor, value: Value) -> Result<()> {
        let items = match value {
            Value::List(items) => items,
            Value::Null => Vec::new(),
            single => vec![single],
        };
        let name = self
            .namespaces
            .qualify(feature.xml.namespace.as_deref(), &feature.xml.name);
        for item in items {
            match item {
                Value::Object(object) => self.object(name.clone(), object.as_model())?,
                Value::Ows(ows) => self.ows(name.clone(), &ows),
                data => {
                    let text = self.lexical(feature, &data)?;
                    self.text_element(name.clone(), &text);
                }
            }
        }
        Ok(())
    }

    fn group_feature(
        &mut self,
        features: &[FeatureDescriptor],
        group: &FeatureDescriptor,
        value: Value,
    ) -> Result<()> {
        match value {
            Value::Group(entries) => {
                for entry in &entries {
                    self.entry(entry)?;
                }
                Ok(())
            }
            Value::List(items) if !items.is_empty() => {
                let member = features
                    .iter()
                    .find(|f| {
                        f.xml.kind == XmlKind::Element
                            && f.xml.group.as_deref().map(|g| g.trim_start_matches('#')) == Some(group.xml.name.as_str())
                    })
                    .ok_or_else(|| {
                        Error::Encode(format!("group '{}' has no element to write its items as", group.name))
                    })?;
                self.element_feature(member, Value::List(items))
            }
            _ => Ok(()),
        }
    }

    fn mixed(&mut self, entries: &[MixedEntry]) -> Result<()> {
        for entry in entries {
            match entry {
                MixedEntry::Text(text) => self.events.push(Event::Text(BytesText::new(text).into_owned())),
                MixedEntry::CData(text) => self.events.push(Event::CData(BytesCData::new(text.clone()))),
                MixedEntry::Comment(text) => self.events.push(Event::Comment(BytesText::from_escaped(text.clone()))),
                MixedEntry::ProcessingInstruction { target, data } => {
                    let content = if data.is_empty() {
                        target.clone()
                    } else {
                        format!("{} {}", target, data)
                    };
                    self.events.push(Event::PI(BytesText::from_escaped(content)));
                }
                MixedEntry::Element(element) => self.entry(element)?,
                MixedEntry::Any(any) => self.raw(any),
            }
        }
        Ok(())
    }

    /// Wildcard content, already serialized
    fn raw(&mut self, any: &AnyElement) {
        self.events.push(Event::Text(BytesText::from_escaped(any.xml.clone())));
    }

    fn text_element(&mut self, name: String, text: &str) {
        self.events.push(Event::Start(BytesStart::new(name.clone())));
        self.events.push(Event::Text(BytesText::new(text).into_owned()));
        self.events.push(Event::End(BytesEnd::new(name)));
    }

    fn ows(&mut self, name: String, object: &OwsObject) {
        match object {
            OwsObject::Metadata(metadata) => self.metadata(name, metadata),
            OwsObject::Domain(domain) => self.domain(name, domain),
        }
    }

    fn metadata(&mut self, name: String, metadata: &MetadataType) {
        let mut start = BytesStart::new(name);
        if let Some(about) = &metadata.about {
            start.push_attribute(("about", about.as_str()));
        }
        for (local, value) in [("href", &metadata.href), ("title", &metadata.title)] {
            if let Some(value) = value {
                let attribute = self.namespaces.qualify(Some(XLINK_NAMESPACE), local);
                start.push_attribute((attribute.as_str(), value.as_str()));
            }
        }
        self.events.push(Event::Empty(start));
    }

    fn domain(&mut self, name: String, domain: &DomainType) {
        let mut start = BytesStart::new(name.clone());
        start.push_attribute(("name", domain.name.as_str()));
        let open = self.events.len();
        self.events.push(Event::Start(start));

        let ows = |bindings: &mut Bindings, local: &str| bindings.qualify(Some(OWS_NAMESPACE), local);
        match &domain.possible_values {
            PossibleValues::AllowedValues(values) => {
                let allowed = ows(&mut self.namespaces, "AllowedValues");
                let value = ows(&mut self.namespaces, "Value");
                self.events.push(Event::Start(BytesStart::new(allowed.clone())));
                for v in values {
                    self.text_element(value.clone(), v);
                }
                self.events.push(Event::End(BytesEnd::new(allowed)));
            }
            PossibleValues::AnyValue => {
                let any = ows(&mut self.namespaces, "AnyValue");
                self.events.push(Event::Empty(BytesStart::new(any)));
            }
            PossibleValues::NoValues => {
                let none = ows(&mut self.namespaces, "NoValues");
                self.events.push(Event::Empty(BytesStart::new(none)));
            }
            PossibleValues::ValuesReference { name, reference } => {
                let element = ows(&mut self.namespaces, "ValuesReference");
                let attribute = ows(&mut self.namespaces, "reference");
                let mut start = BytesStart::new(element.clone());
                start.push_attribute((attribute.as_str(), reference.as_str()));
                self.events.push(Event::Start(start));
                self.events.push(Event::Text(BytesText::new(name).into_owned()));
                self.events.push(Event::End(BytesEnd::new(element)));
            }
        }
        if let Some(default) = &domain.default_value {
            let element = ows(&mut self.namespaces, "DefaultValue");
            self.text_element(element, default);
        }
        if let Some(meaning) = &domain.meaning {
            let element = ows(&mut self.namespaces, "Meaning");
            self.text_element(element, meaning);
        }
        for metadata in &domain.metadata {
            let element = ows(&mut self.namespaces, "Metadata");
            self.metadata(element, metadata);
        }
        self.close(open, name);
    }

    /// Lexical form of a data value, binding the prefixes its QNames need
    fn lexical(&mut self, feature: &FeatureDescriptor, value: &Value) -> Result<String> {
        let value = self.bind_qnames(value);
        match (&value, feature.is_many()) {
            (Value::List(items), true) => Ok(items
                .iter()
                .map(|item| datatypes::to_lexical_typed(self.registry, &feature.type_ref, item))
                .collect::<Result<Vec<_>>>()?
                .join(" ")),
            _ => datatypes::to_lexical_typed(self.registry, &feature.type_ref, &value),
        }
    }

    fn bind_qnames(&mut self, value: &Value) -> Value {
        match value {
            Value::QName(qname) => Value::QName(self.bind_qname(qname)),
            Value::List(items) => Value::List(items.iter().map(|item| self.bind_qnames(item)).collect()),
            other => other.clone(),
        }
    }

    fn bind_qname(&mut self, qname: &QName) -> QName {
        match qname.namespace.as_deref() {
            Some(namespace) if !namespace.is_empty() => {
                let prefix = self.namespaces.prefix_for(namespace, qname.prefix.as_deref());
                qname.clone().with_prefix(prefix)
            }
            _ => qname.clone(),
        }
    }
}
