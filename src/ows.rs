//! OWS Common 1.1 types referenced by FES 2.0
//!
//! Only the two types FES features point at are modelled: `MetadataType`
//! (function and argument metadata) and `DomainType` (conformance
//! constraints).

use crate::error::{Error, Result};

/// `ows:Metadata`: a reference to metadata about a function or argument
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataType {
    /// `about` attribute
    pub about: Option<String>,
    /// `xlink:href` attribute
    pub href: Option<String>,
    /// `xlink:title` attribute
    pub title: Option<String>,
}

/// Possible values of a domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PossibleValues {
    /// Enumerated values
    AllowedValues(Vec<String>),
    /// Any value
    AnyValue,
    /// No value, the constraint is a flag
    NoValues,
    /// Values listed in an external resource
    ValuesReference {
        /// Name of the value list
        name: String,
        /// `ows:reference` attribute
        reference: String,
    },
}

impl Default for PossibleValues {
    fn default() -> Self {
        PossibleValues::NoValues
    }
}

/// `ows:DomainType`: a named constraint of the filter capabilities
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainType {
    /// `name` attribute
    pub name: String,
    /// Possible values
    pub possible_values: PossibleValues,
    /// `ows:DefaultValue`
    pub default_value: Option<String>,
    /// `ows:Meaning`
    pub meaning: Option<String>,
    /// `ows:Metadata` entries
    pub metadata: Vec<MetadataType>,
}

impl DomainType {
    /// Conformance flag, `<ows:NoValues/>` with a TRUE/FALSE default
    pub fn flag(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            possible_values: PossibleValues::NoValues,
            default_value: Some(if enabled { "TRUE" } else { "FALSE" }.to_string()),
            ..Default::default()
        }
    }

    /// Value of a conformance flag
    pub fn is_enabled(&self) -> bool {
        self.default_value
            .as_deref()
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }
}

/// Any OWS object held by an FES feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwsObject {
    /// `ows:Metadata`
    Metadata(MetadataType),
    /// `ows:DomainType`
    Domain(DomainType),
}

impl OwsObject {
    /// OWS type name
    pub fn class_name(&self) -> &'static str {
        match self {
            OwsObject::Metadata(_) => "MetadataType",
            OwsObject::Domain(_) => "DomainType",
        }
    }
}

impl From<MetadataType> for OwsObject {
    fn from(value: MetadataType) -> Self {
        OwsObject::Metadata(value)
    }
}

impl From<DomainType> for OwsObject {
    fn from(value: DomainType) -> Self {
        OwsObject::Domain(value)
    }
}

impl TryFrom<OwsObject> for MetadataType {
    type Error = Error;

    fn try_from(value: OwsObject) -> Result<Self> {
        match value {
            OwsObject::Metadata(m) => Ok(m),
            other => Err(Error::Type(format!("expected MetadataType, found {}", other.class_name()))),
        }
    }
}

impl TryFrom<OwsObject> for DomainType {
    type Error = Error;

    fn try_from(value: OwsObject) -> Result<Self> {
        match value {
            OwsObject::Domain(d) => Ok(d),
            other => Err(Error::Type(format!("expected DomainType, found {}", other.class_name()))),
        }
    }
}
