//! Structural-feature registry
//!
//! A [`Registry`] holds one entry per classifier of a schema package: complex
//! types become [`ClassDescriptor`]s with an ordered feature table, simple
//! types become [`DataTypeDescriptor`]s. Feature ids are indexes into a class's
//! table. A subtype's table is the concatenation of its supertypes' tables
//! followed by its own features, computed while the registry is built.
//!
//! Registries are built once and then frozen; see [`package`] for the FES 2.0
//! package and the process-wide accessor [`fes20`].

pub mod ids;
pub mod package;

pub use ids::{ClassifierId, FeatureId};
pub use package::{fes20, Fes20PackageBuilder};

use crate::datatypes::facets::PatternFacet;
use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;

/// Upper bound of an unbounded many-valued feature
pub const UNBOUNDED: i32 = -1;

/// Upper bound left open by the schema (document-root element slots)
pub const UNSPECIFIED: i32 = -2;

// ============================================================================
// Type references
// ============================================================================

/// Built-in XML Schema simple types referenced by features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum XmlType {
    /// xs:string
    String,
    /// xs:boolean
    Boolean,
    /// xs:double
    Double,
    /// xs:QName
    QName,
    /// xs:dateTime
    DateTime,
    /// xs:anyURI
    AnyUri,
    /// xs:positiveInteger
    PositiveInteger,
    /// xs:NCName
    NcName,
}

impl XmlType {
    /// XML Schema name of the type
    pub fn name(self) -> &'static str {
        match self {
            XmlType::String => "string",
            XmlType::Boolean => "boolean",
            XmlType::Double => "double",
            XmlType::QName => "QName",
            XmlType::DateTime => "dateTime",
            XmlType::AnyUri => "anyURI",
            XmlType::PositiveInteger => "positiveInteger",
            XmlType::NcName => "NCName",
        }
    }
}

/// Structural types of the object-model runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RuntimeType {
    /// Any model object
    Object,
    /// Opaque value
    JavaObject,
    /// Plain string
    String,
    /// Entry of an ordered element/group sequence
    FeatureMapEntry,
    /// Entry of a string-to-string map
    StringToStringMapEntry,
}

/// Type of a feature
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum TypeRef {
    /// Class, enumeration or datatype of the same registry
    Classifier(ClassifierId),
    /// Built-in XML Schema type
    Xml(XmlType),
    /// Runtime structural type
    Runtime(RuntimeType),
    /// Classifier of another schema package
    External {
        /// Namespace of the other package
        namespace: String,
        /// Classifier name
        name: String,
    },
}

// ============================================================================
// Feature descriptors
// ============================================================================

/// Attribute (data valued) or reference (object valued)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeatureKind {
    /// Data-valued slot
    Attribute,
    /// Object-valued slot
    Reference {
        /// Child lifetime is bound to the parent
        containment: bool,
        /// Proxies are resolved on access
        resolve_proxies: bool,
    },
}

/// Structural flags of a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureFlags {
    /// Not persisted
    pub transient: bool,
    /// Computed on every access
    pub volatile: bool,
    /// Writable through the dispatcher
    pub changeable: bool,
    /// Tracks an explicit "set" state separate from the value
    pub unsettable: bool,
    /// Many-valued feature rejects duplicates
    pub unique: bool,
    /// Value is derived from other features
    pub derived: bool,
    /// Many-valued feature keeps insertion order
    pub ordered: bool,
    /// Value identifies the object
    pub id: bool,
}

impl FeatureFlags {
    /// Plain stored feature
    pub const DEFAULT: Self = Self {
        transient: false,
        volatile: false,
        changeable: true,
        unsettable: false,
        unique: true,
        derived: false,
        ordered: true,
        id: false,
    };

    /// Transient, volatile, derived view over a group
    pub const fn derived_view() -> Self {
        Self {
            transient: true,
            volatile: true,
            derived: true,
            ..Self::DEFAULT
        }
    }

    /// Mark the feature unsettable
    pub const fn unsettable(self) -> Self {
        Self {
            unsettable: true,
            ..self
        }
    }

    /// Mark the feature read-only
    pub const fn read_only(self) -> Self {
        Self {
            changeable: false,
            ..self
        }
    }

    /// Allow duplicate values
    pub const fn non_unique(self) -> Self {
        Self {
            unique: false,
            ..self
        }
    }

    /// Mark the feature transient
    pub const fn transient(self) -> Self {
        Self {
            transient: true,
            ..self
        }
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// How a feature appears in XML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum XmlKind {
    /// No XML mapping recorded
    #[default]
    Unspecified,
    /// Child element
    Element,
    /// Attribute
    Attribute,
    /// Substitution or model group backing derived element views
    Group,
    /// Element wildcard (`xs:any`) or mixed content
    ElementWildcard,
    /// Simple content of the enclosing element
    Simple,
}

/// XML mapping of a feature
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct XmlFeature {
    /// Element, attribute or group kind
    pub kind: XmlKind,
    /// XML local name (groups use `head:group`)
    pub name: String,
    /// Namespace of the element; attributes are unqualified
    pub namespace: Option<String>,
    /// Name of the group feature this feature is a view of
    pub group: Option<String>,
    /// Head element this element substitutes for
    pub affiliation: Option<String>,
    /// Namespace constraints of a wildcard (`##other`, `##any`)
    pub wildcards: Vec<String>,
}

impl XmlFeature {
    /// Element in the given namespace
    pub fn element(name: impl Into<String>, namespace: &str) -> Self {
        Self {
            kind: XmlKind::Element,
            name: name.into(),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        }
    }

    /// Unqualified attribute
    pub fn attribute(name: impl Into<String>) -> Self {
        Self {
            kind: XmlKind::Attribute,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Group backing derived element views
    pub fn group(name: impl Into<String>, namespace: Option<&str>) -> Self {
        Self {
            kind: XmlKind::Group,
            name: name.into(),
            namespace: namespace.map(str::to_string),
            ..Default::default()
        }
    }

    /// Element wildcard
    pub fn wildcard(name: impl Into<String>, wildcards: &[&str]) -> Self {
        Self {
            kind: XmlKind::ElementWildcard,
            name: name.into(),
            wildcards: wildcards.iter().map(|w| w.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Simple content
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            kind: XmlKind::Simple,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Record the owning group
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Record the substitution-group head
    pub fn affiliated_to(mut self, head: impl Into<String>) -> Self {
        self.affiliation = Some(head.into());
        self
    }
}

/// One entry of a class's feature table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureDescriptor {
    /// Index in the class's feature table
    pub id: FeatureId,
    /// Feature name
    pub name: String,
    /// Name of the class that declares the feature
    pub owner: String,
    /// Attribute or reference
    pub kind: FeatureKind,
    /// Declared type
    pub type_ref: TypeRef,
    /// Minimum number of values
    pub lower_bound: i32,
    /// Maximum number of values; [`UNBOUNDED`] or [`UNSPECIFIED`]
    pub upper_bound: i32,
    /// Default value literal
    pub default_literal: Option<String>,
    /// Structural flags
    pub flags: FeatureFlags,
    /// XML mapping
    pub xml: XmlFeature,
}

impl FeatureDescriptor {
    /// Feature holds a list of values
    pub fn is_many(&self) -> bool {
        self.upper_bound > 1 || self.upper_bound == UNBOUNDED
    }

    /// At least one value is required
    pub fn is_required(&self) -> bool {
        self.lower_bound > 0
    }

    /// Object-valued feature
    pub fn is_reference(&self) -> bool {
        matches!(self.kind, FeatureKind::Reference { .. })
    }

    /// Containment reference
    pub fn is_containment(&self) -> bool {
        matches!(self.kind, FeatureKind::Reference { containment: true, .. })
    }

    /// Writable through the dispatcher
    pub fn is_changeable(&self) -> bool {
        self.flags.changeable
    }

    /// Derived view over other features
    pub fn is_derived(&self) -> bool {
        self.flags.derived
    }

    /// Tracks an explicit set state
    pub fn is_unsettable(&self) -> bool {
        self.flags.unsettable
    }
}

// ============================================================================
// Classifiers
// ============================================================================

/// Content model of a class in XML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ContentKind {
    /// No content recorded
    #[default]
    Unspecified,
    /// No children, attributes only
    Empty,
    /// Simple (text) content
    Simple,
    /// Interleaved text and elements
    Mixed,
    /// Child elements only
    ElementOnly,
}

/// Registry entry for a complex type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDescriptor {
    /// Classifier id
    pub id: ClassifierId,
    /// Class name
    pub name: String,
    /// Abstract classes cannot be instantiated
    pub is_abstract: bool,
    /// Local supertypes in declaration order
    pub supertypes: Vec<ClassifierId>,
    /// Supertypes from other packages, in Clark notation
    pub external_supertypes: Vec<String>,
    /// XML type name
    pub xml_name: String,
    /// XML content model
    pub content: ContentKind,
    features: Vec<FeatureDescriptor>,
    inherited: usize,
    #[serde(skip)]
    own_started: bool,
    #[serde(skip)]
    sealed: bool,
}

impl ClassDescriptor {
    fn new(id: ClassifierId, name: &str, is_abstract: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            is_abstract,
            supertypes: Vec::new(),
            external_supertypes: Vec::new(),
            xml_name: name.to_string(),
            content: ContentKind::Unspecified,
            features: Vec::new(),
            inherited: 0,
            own_started: false,
            sealed: false,
        }
    }

    /// Complete feature table: inherited features, then own features
    pub fn features(&self) -> &[FeatureDescriptor] {
        &self.features
    }

    /// Features declared by this class
    pub fn own_features(&self) -> &[FeatureDescriptor] {
        &self.features[self.inherited..]
    }

    /// Number of features inherited from supertypes
    pub fn inherited_count(&self) -> usize {
        self.inherited
    }

    /// Feature by id
    pub fn feature(&self, id: FeatureId) -> Option<&FeatureDescriptor> {
        self.features.get(id)
    }

    /// Feature by name
    pub fn feature_by_name(&self, name: &str) -> Option<&FeatureDescriptor> {
        self.features.iter().find(|f| f.name == name)
    }

    /// Feature count
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }
}

/// Structure of a simple type
#[derive(Debug, Clone)]
pub enum DataTypeKind {
    /// Enumeration with `(literal, value)` pairs
    Enumeration {
        /// Literals in declaration order
        literals: Vec<(String, i32)>,
    },
    /// Restriction of a base type by pattern facets
    Restriction {
        /// Base type
        base: TypeRef,
        /// Pattern facets; a value must match one of them
        patterns: Vec<PatternFacet>,
    },
    /// Whitespace separated list
    List {
        /// Item type
        item: TypeRef,
    },
    /// Union resolved by member order
    Union {
        /// Member types in declaration order
        members: Vec<TypeRef>,
    },
}

/// Registry entry for a simple type
#[derive(Debug, Clone)]
pub struct DataTypeDescriptor {
    /// Classifier id
    pub id: ClassifierId,
    /// Datatype name
    pub name: String,
    /// XML type name
    pub xml_name: String,
    /// Structure
    pub kind: DataTypeKind,
    /// Can be converted to and from strings
    pub serializable: bool,
}

impl DataTypeDescriptor {
    /// Enumeration type
    pub fn is_enumeration(&self) -> bool {
        matches!(self.kind, DataTypeKind::Enumeration { .. })
    }
}

/// A registry slot
#[derive(Debug, Clone)]
pub enum Classifier {
    /// Complex type
    Class(ClassDescriptor),
    /// Simple type or enumeration
    DataType(DataTypeDescriptor),
}

impl Classifier {
    /// Classifier name
    pub fn name(&self) -> &str {
        match self {
            Classifier::Class(c) => &c.name,
            Classifier::DataType(d) => &d.name,
        }
    }

    /// Classifier id
    pub fn id(&self) -> ClassifierId {
        match self {
            Classifier::Class(c) => c.id,
            Classifier::DataType(d) => d.id,
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Feature registry of one schema package
#[derive(Debug, Clone)]
pub struct Registry {
    name: String,
    ns_uri: String,
    ns_prefix: String,
    classifiers: Vec<Classifier>,
    by_name: HashMap<String, ClassifierId>,
    frozen: bool,
}

impl Registry {
    /// Create an empty, mutable registry
    pub fn new(name: impl Into<String>, ns_uri: impl Into<String>, ns_prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ns_uri: ns_uri.into(),
            ns_prefix: ns_prefix.into(),
            classifiers: Vec::new(),
            by_name: HashMap::new(),
            frozen: false,
        }
    }

    /// Package name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Package namespace URI
    pub fn ns_uri(&self) -> &str {
        &self.ns_uri
    }

    /// Conventional namespace prefix
    pub fn ns_prefix(&self) -> &str {
        &self.ns_prefix
    }

    /// Registry no longer accepts mutation
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Mark the registry immutable
    pub fn freeze(&mut self) {
        if !self.frozen {
            tracing::debug!(
                package = %self.name,
                classifiers = self.classifiers.len(),
                "freezing registry"
            );
        }
        self.frozen = true;
    }

    fn ensure_mutable(&self) -> Result<()> {
        if self.frozen {
            Err(Error::Configuration(format!("registry '{}' is frozen", self.name)))
        } else {
            Ok(())
        }
    }

    /// Register a complex type.
    ///
    /// Registering the same name again returns the existing id, so a repeated
    /// bootstrap pass is harmless.
    pub fn register_class(&mut self, name: &str, is_abstract: bool) -> Result<ClassifierId> {
        self.ensure_mutable()?;
        if let Some(&id) = self.by_name.get(name) {
            return match &self.classifiers[id] {
                Classifier::Class(c) if c.is_abstract == is_abstract => Ok(id),
                _ => Err(Error::Configuration(format!(
                    "classifier '{}' is already registered with a different shape",
                    name
                ))),
            };
        }
        let id = self.classifiers.len();
        self.classifiers.push(Classifier::Class(ClassDescriptor::new(id, name, is_abstract)));
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    /// Register a simple type or enumeration
    pub fn register_data_type(
        &mut self,
        name: &str,
        xml_name: &str,
        kind: DataTypeKind,
        serializable: bool,
    ) -> Result<ClassifierId> {
        self.ensure_mutable()?;
        if let Some(&id) = self.by_name.get(name) {
            return match &self.classifiers[id] {
                Classifier::DataType(_) => Ok(id),
                Classifier::Class(_) => Err(Error::Configuration(format!(
                    "classifier '{}' is already registered as a class",
                    name
                ))),
            };
        }
        let id = self.classifiers.len();
        self.classifiers.push(Classifier::DataType(DataTypeDescriptor {
            id,
            name: name.to_string(),
            xml_name: xml_name.to_string(),
            kind,
            serializable,
        }));
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    /// Register an enumeration from `(literal, value)` pairs
    pub fn register_enum(&mut self, name: &str, xml_name: &str, literals: &[(&str, i32)]) -> Result<ClassifierId> {
        let literals = literals.iter().map(|(l, v)| (l.to_string(), *v)).collect();
        self.register_data_type(name, xml_name, DataTypeKind::Enumeration { literals }, true)
    }

    /// Record the XML type name and content model of a class
    pub fn set_class_xml(&mut self, class: ClassifierId, xml_name: &str, content: ContentKind) -> Result<()> {
        self.ensure_mutable()?;
        let descriptor = self.class_mut(class)?;
        descriptor.xml_name = xml_name.to_string();
        descriptor.content = content;
        Ok(())
    }

    /// Inherit the complete feature table of `supertype`.
    ///
    /// Must be called before `class` declares its own features. The supertype
    /// is sealed afterwards: adding features to it would shift the ids its
    /// subtypes already use.
    pub fn add_supertype(&mut self, class: ClassifierId, supertype: ClassifierId) -> Result<()> {
        self.ensure_mutable()?;
        if class == supertype || self.is_subtype_of(supertype, class) {
            return Err(Error::Configuration(format!(
                "supertype link {} -> {} would create a cycle",
                self.classifier_name(class),
                self.classifier_name(supertype)
            )));
        }
        let inherited = self.class(supertype)?.features.clone();
        self.class_mut(supertype)?.sealed = true;
        let descriptor = self.class_mut(class)?;
        descriptor.inherit(inherited)?;
        descriptor.supertypes.push(supertype);
        Ok(())
    }

    /// Inherit the feature table of a class registered in another package
    pub fn add_external_supertype(
        &mut self,
        class: ClassifierId,
        other: &Registry,
        supertype: ClassifierId,
    ) -> Result<()> {
        self.ensure_mutable()?;
        let parent = other.class(supertype)?;
        let qualified = format!("{{{}}}{}", other.ns_uri(), parent.name);
        let inherited = parent.features.clone();
        let descriptor = self.class_mut(class)?;
        descriptor.inherit(inherited)?;
        descriptor.external_supertypes.push(qualified);
        Ok(())
    }

    /// Append a data-valued feature; returns its feature id
    #[allow(clippy::too_many_arguments)]
    pub fn add_attribute_feature(
        &mut self,
        class: ClassifierId,
        name: &str,
        type_ref: TypeRef,
        lower_bound: i32,
        upper_bound: i32,
        default_literal: Option<&str>,
        flags: FeatureFlags,
    ) -> Result<FeatureId> {
        self.add_feature(
            class,
            name,
            FeatureKind::Attribute,
            type_ref,
            lower_bound,
            upper_bound,
            default_literal,
            flags,
        )
    }

    /// Append an object-valued feature; returns its feature id
    #[allow(clippy::too_many_arguments)]
    pub fn add_reference_feature(
        &mut self,
        class: ClassifierId,
        name: &str,
        target: TypeRef,
        containment: bool,
        resolve_proxies: bool,
        lower_bound: i32,
        upper_bound: i32,
        flags: FeatureFlags,
    ) -> Result<FeatureId> {
        self.add_feature(
            class,
            name,
            FeatureKind::Reference {
                containment,
                resolve_proxies,
            },
            target,
            lower_bound,
            upper_bound,
            None,
            flags,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn add_feature(
        &mut self,
        class: ClassifierId,
        name: &str,
        kind: FeatureKind,
        type_ref: TypeRef,
        lower_bound: i32,
        upper_bound: i32,
        default_literal: Option<&str>,
        flags: FeatureFlags,
    ) -> Result<FeatureId> {
        self.ensure_mutable()?;
        if let TypeRef::Classifier(target) = type_ref {
            if target >= self.classifiers.len() {
                return Err(Error::Configuration(format!(
                    "feature '{}' refers to unknown classifier {}",
                    name, target
                )));
            }
        }
        if upper_bound != UNBOUNDED && upper_bound != UNSPECIFIED && upper_bound < lower_bound {
            return Err(Error::Configuration(format!(
                "feature '{}' has upper bound {} below lower bound {}",
                name, upper_bound, lower_bound
            )));
        }
        let descriptor = self.class_mut(class)?;
        if descriptor.sealed {
            return Err(Error::Configuration(format!(
                "class '{}' already has subtypes; its feature table is sealed",
                descriptor.name
            )));
        }
        if descriptor.feature_by_name(name).is_some() {
            return Err(Error::Configuration(format!(
                "class '{}' already has a feature named '{}'",
                descriptor.name, name
            )));
        }
        let id = descriptor.features.len();
        descriptor.own_started = true;
        descriptor.features.push(FeatureDescriptor {
            id,
            name: name.to_string(),
            owner: descriptor.name.clone(),
            kind,
            type_ref,
            lower_bound,
            upper_bound,
            default_literal: default_literal.map(str::to_string),
            flags,
            xml: XmlFeature::default(),
        });
        Ok(id)
    }

    /// Attach the XML mapping of a feature declared by `class`
    pub fn set_feature_xml(&mut self, class: ClassifierId, feature: FeatureId, xml: XmlFeature) -> Result<()> {
        self.ensure_mutable()?;
        let descriptor = self.class_mut(class)?;
        let inherited = descriptor.inherited;
        let name = descriptor.name.clone();
        match descriptor.features.get_mut(feature) {
            Some(f) if feature >= inherited => {
                f.xml = xml;
                Ok(())
            }
            Some(f) => Err(Error::Configuration(format!(
                "feature '{}' is inherited by '{}'; annotate it on '{}'",
                f.name, name, f.owner
            ))),
            None => Err(Error::unknown_feature(name, class, feature)),
        }
    }

    // ------------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------------

    /// All classifiers in id order
    pub fn classifiers(&self) -> &[Classifier] {
        &self.classifiers
    }

    /// Classifier by id
    pub fn classifier(&self, id: ClassifierId) -> Option<&Classifier> {
        self.classifiers.get(id)
    }

    /// Classifier by name
    pub fn classifier_by_name(&self, name: &str) -> Option<&Classifier> {
        self.by_name.get(name).and_then(|&id| self.classifiers.get(id))
    }

    /// Name of a classifier, or `#id` when out of range
    pub fn classifier_name(&self, id: ClassifierId) -> String {
        self.classifier(id)
            .map(|c| c.name().to_string())
            .unwrap_or_else(|| format!("#{}", id))
    }

    /// All classes in id order
    pub fn classes(&self) -> impl Iterator<Item = &ClassDescriptor> {
        self.classifiers.iter().filter_map(|c| match c {
            Classifier::Class(class) => Some(class),
            Classifier::DataType(_) => None,
        })
    }

    /// All simple types in id order
    pub fn data_types(&self) -> impl Iterator<Item = &DataTypeDescriptor> {
        self.classifiers.iter().filter_map(|c| match c {
            Classifier::DataType(data_type) => Some(data_type),
            Classifier::Class(_) => None,
        })
    }

    /// Class by id
    pub fn class(&self, id: ClassifierId) -> Result<&ClassDescriptor> {
        match self.classifiers.get(id) {
            Some(Classifier::Class(class)) => Ok(class),
            Some(Classifier::DataType(d)) => Err(Error::UnknownClassifier(format!(
                "The class '{}' is not a valid classifier",
                d.name
            ))),
            None => Err(Error::UnknownClassifier(format!(
                "The class '#{}' is not a valid classifier",
                id
            ))),
        }
    }

    fn class_mut(&mut self, id: ClassifierId) -> Result<&mut ClassDescriptor> {
        let package = self.name.clone();
        match self.classifiers.get_mut(id) {
            Some(Classifier::Class(class)) => Ok(class),
            _ => Err(Error::Configuration(format!(
                "classifier {} of package '{}' is not a class",
                id, package
            ))),
        }
    }

    /// Datatype by id
    pub fn data_type(&self, id: ClassifierId) -> Result<&DataTypeDescriptor> {
        match self.classifiers.get(id) {
            Some(Classifier::DataType(data_type)) => Ok(data_type),
            Some(Classifier::Class(c)) => Err(Error::UnknownClassifier(format!(
                "The datatype '{}' is not a valid classifier",
                c.name
            ))),
            None => Err(Error::UnknownClassifier(format!(
                "The datatype '#{}' is not a valid classifier",
                id
            ))),
        }
    }

    /// Feature descriptor by class and id
    pub fn feature(&self, class: ClassifierId, feature: FeatureId) -> Result<&FeatureDescriptor> {
        let descriptor = self.class(class)?;
        descriptor
            .feature(feature)
            .ok_or_else(|| Error::unknown_feature(descriptor.name.clone(), class, feature))
    }

    /// Feature descriptor by class and feature name
    pub fn feature_by_name(&self, class: ClassifierId, name: &str) -> Option<&FeatureDescriptor> {
        self.class(class).ok().and_then(|c| c.feature_by_name(name))
    }

    /// Element or attribute feature of `class` matching an XML name
    pub fn feature_by_xml_name(
        &self,
        class: ClassifierId,
        kind: XmlKind,
        namespace: Option<&str>,
        local_name: &str,
    ) -> Option<&FeatureDescriptor> {
        self.class(class).ok().and_then(|c| {
            c.features.iter().find(|f| {
                f.xml.kind == kind && f.xml.name == local_name && f.xml.namespace.as_deref() == namespace
            })
        })
    }

    /// True when `class` inherits, directly or not, from `ancestor`
    pub fn is_subtype_of(&self, class: ClassifierId, ancestor: ClassifierId) -> bool {
        let mut pending = match self.class(class) {
            Ok(c) => c.supertypes.clone(),
            Err(_) => return false,
        };
        while let Some(next) = pending.pop() {
            if next == ancestor {
                return true;
            }
            if let Ok(c) = self.class(next) {
                pending.extend(c.supertypes.iter().copied());
            }
        }
        false
    }

    /// Instance of `class` may be stored where `target` is expected
    pub fn conforms_to(&self, class: ClassifierId, target: ClassifierId) -> bool {
        class == target || self.is_subtype_of(class, target)
    }
}

impl ClassDescriptor {
    fn inherit(&mut self, inherited: Vec<FeatureDescriptor>) -> Result<()> {
        if self.own_started {
            return Err(Error::Configuration(format!(
                "class '{}' declares features already; supertypes must be added first",
                self.name
            )));
        }
        for feature in inherited {
            let duplicate = self
                .features
                .iter()
                .any(|f| f.owner == feature.owner && f.name == feature.name);
            if duplicate {
                continue;
            }
            let id = self.features.len();
            self.features.push(FeatureDescriptor { id, ..feature });
        }
        self.inherited = self.features.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Registry {
        let mut registry = Registry::new("sample", "urn:sample", "s");
        let base = registry.register_class("Base", true).unwrap();
        registry
            .add_attribute_feature(base, "handle", TypeRef::Xml(XmlType::String), 0, 1, None, FeatureFlags::DEFAULT)
            .unwrap();
        let derived = registry.register_class("Derived", false).unwrap();
        registry.add_supertype(derived, base).unwrap();
        registry
            .add_attribute_feature(derived, "count", TypeRef::Xml(XmlType::Double), 0, UNBOUNDED, None, FeatureFlags::DEFAULT)
            .unwrap();
        registry
    }

    #[test]
    fn test_feature_ids_continue_after_supertype() {
        let registry = sample();
        let derived = registry.classifier_by_name("Derived").unwrap().id();
        let class = registry.class(derived).unwrap();
        assert_eq!(class.feature_count(), 2);
        assert_eq!(class.feature(0).unwrap().name, "handle");
        assert_eq!(class.feature(0).unwrap().owner, "Base");
        assert_eq!(class.feature(1).unwrap().name, "count");
        assert_eq!(class.inherited_count(), 1);
        assert!(class.feature(1).unwrap().is_many());
    }

    #[test]
    fn test_register_class_is_idempotent() {
        let mut registry = sample();
        let first = registry.classifier_by_name("Base").unwrap().id();
        assert_eq!(registry.register_class("Base", true).unwrap(), first);
        assert!(registry.register_class("Base", false).is_err());
    }

    #[test]
    fn test_frozen_registry_rejects_mutation() {
        let mut registry = sample();
        registry.freeze();
        assert!(registry.is_frozen());
        let err = registry.register_class("Other", false).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(registry
            .add_attribute_feature(0, "x", TypeRef::Xml(XmlType::String), 0, 1, None, FeatureFlags::DEFAULT)
            .is_err());
    }

    #[test]
    fn test_sealed_supertype() {
        let mut registry = sample();
        let base = registry.classifier_by_name("Base").unwrap().id();
        let err = registry
            .add_attribute_feature(base, "late", TypeRef::Xml(XmlType::String), 0, 1, None, FeatureFlags::DEFAULT)
            .unwrap_err();
        assert!(err.to_string().contains("sealed"));
    }

    #[test]
    fn test_supertype_after_own_features_rejected() {
        let mut registry = sample();
        let derived = registry.classifier_by_name("Derived").unwrap().id();
        let other = registry.register_class("Other", true).unwrap();
        assert!(registry.add_supertype(derived, other).is_err());
    }

    #[test]
    fn test_cycle_rejected() {
        let mut registry = sample();
        let base = registry.classifier_by_name("Base").unwrap().id();
        let derived = registry.classifier_by_name("Derived").unwrap().id();
        assert!(registry.add_supertype(base, derived).is_err());
        assert!(registry.is_subtype_of(derived, base));
        assert!(!registry.is_subtype_of(base, derived));
        assert!(registry.conforms_to(derived, derived));
    }

    #[test]
    fn test_unknown_feature_lookup() {
        let registry = sample();
        let err = registry.feature(1, 7).unwrap_err();
        assert!(matches!(err, Error::UnknownFeature { feature: 7, .. }));
    }
}
