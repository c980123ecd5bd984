//! Values exchanged with the dispatcher
//!
//! [`Value`] is the dynamic form of every feature value. Typed model fields
//! convert to it in `get_feature` and back in `set_feature`; a conversion
//! that does not fit the feature fails with [`Error::Type`].

use super::element::{Element, ElementType};
use super::object::{FesObject, ModelObject};
use crate::datatypes::{EnumValue, XmlDateTime};
use crate::error::{Error, Result};
use crate::namespaces::QName;
use crate::ows::OwsObject;
use crate::registry::fes20;
use indexmap::IndexMap;
use std::fmt;

/// Dynamic feature value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent
    #[default]
    Null,
    /// xs:boolean
    Boolean(bool),
    /// xs:double
    Double(f64),
    /// xs:positiveInteger
    Integer(u64),
    /// String-based simple types
    String(String),
    /// xs:QName
    QName(QName),
    /// xs:dateTime
    DateTime(XmlDateTime),
    /// Enumeration literal
    Enum(EnumValue),
    /// Many-valued feature or list type
    List(Vec<Value>),
    /// Contained FES object
    Object(Box<FesObject>),
    /// Contained OWS object
    Ows(OwsObject),
    /// Wildcard content
    Any(AnyElement),
    /// Raw entries of a choice group
    Group(Vec<GroupEntry>),
    /// Mixed content
    Mixed(Vec<MixedEntry>),
    /// String-to-string map
    Map(IndexMap<String, String>),
}

impl Value {
    /// Short name of the value kind, for messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Double(_) => "double",
            Value::Integer(_) => "integer",
            Value::String(_) => "string",
            Value::QName(_) => "QName",
            Value::DateTime(_) => "dateTime",
            Value::Enum(_) => "enumeration literal",
            Value::List(_) => "list",
            Value::Object(_) => "object",
            Value::Ows(_) => "OWS object",
            Value::Any(_) => "wildcard element",
            Value::Group(_) => "group",
            Value::Mixed(_) => "mixed content",
            Value::Map(_) => "map",
        }
    }

    /// True for [`Value::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Wrap a model object
    pub fn object(object: impl Into<FesObject>) -> Self {
        Value::Object(Box::new(object.into()))
    }

    /// `Null` for `None`
    pub fn from_option<T: Into<Value>>(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }

    /// List of converted items
    pub fn list<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Borrow a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow a contained object
    pub fn as_object(&self) -> Option<&FesObject> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    fn mismatch(self, feature: &str, expected: &str) -> Error {
        Error::Type(format!(
            "feature '{}' expects {}, found {}",
            feature,
            expected,
            self.kind()
        ))
    }

    /// Convert to an optional string
    pub fn into_string(self, feature: &str) -> Result<Option<String>> {
        match self {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            other => Err(other.mismatch(feature, "a string")),
        }
    }

    /// Convert to an optional boolean
    pub fn into_bool(self, feature: &str) -> Result<Option<bool>> {
        match self {
            Value::Null => Ok(None),
            Value::Boolean(b) => Ok(Some(b)),
            other => Err(other.mismatch(feature, "a boolean")),
        }
    }

    /// Convert to an optional double
    pub fn into_double(self, feature: &str) -> Result<Option<f64>> {
        match self {
            Value::Null => Ok(None),
            Value::Double(d) => Ok(Some(d)),
            other => Err(other.mismatch(feature, "a double")),
        }
    }

    /// Convert to an optional QName
    pub fn into_qname(self, feature: &str) -> Result<Option<QName>> {
        match self {
            Value::Null => Ok(None),
            Value::QName(q) => Ok(Some(q)),
            other => Err(other.mismatch(feature, "a QName")),
        }
    }

    /// Convert to an optional dateTime
    pub fn into_datetime(self, feature: &str) -> Result<Option<XmlDateTime>> {
        match self {
            Value::Null => Ok(None),
            Value::DateTime(d) => Ok(Some(d)),
            other => Err(other.mismatch(feature, "a dateTime")),
        }
    }

    /// Convert to an optional enumeration literal of type `T`
    pub fn into_enum<T>(self, feature: &str) -> Result<Option<T>>
    where
        T: TryFrom<EnumValue, Error = Error>,
    {
        match self {
            Value::Null => Ok(None),
            Value::Enum(e) => T::try_from(e)
                .map(Some)
                .map_err(|err| Error::Type(format!("feature '{}': {}", feature, err))),
            other => Err(other.mismatch(feature, "an enumeration literal")),
        }
    }

    /// Convert to an optional model object of type `T`
    pub fn into_object<T>(self, feature: &str) -> Result<Option<T>>
    where
        T: TryFrom<FesObject, Error = Error>,
    {
        match self {
            Value::Null => Ok(None),
            Value::Object(o) => T::try_from(*o)
                .map(Some)
                .map_err(|err| Error::Type(format!("feature '{}': {}", feature, err))),
            other => Err(other.mismatch(feature, "an object")),
        }
    }

    /// Convert to an optional OWS object of type `T`
    pub fn into_ows<T>(self, feature: &str) -> Result<Option<T>>
    where
        T: TryFrom<OwsObject, Error = Error>,
    {
        match self {
            Value::Null => Ok(None),
            Value::Ows(o) => T::try_from(o)
                .map(Some)
                .map_err(|err| Error::Type(format!("feature '{}': {}", feature, err))),
            other => Err(other.mismatch(feature, "an OWS object")),
        }
    }

    /// Convert to optional wildcard content
    pub fn into_any(self, feature: &str) -> Result<Option<AnyElement>> {
        match self {
            Value::Null => Ok(None),
            Value::Any(a) => Ok(Some(a)),
            other => Err(other.mismatch(feature, "a wildcard element")),
        }
    }

    /// Convert to list items; `Null` is the empty list
    pub fn into_list(self, feature: &str) -> Result<Vec<Value>> {
        match self {
            Value::Null => Ok(Vec::new()),
            Value::List(items) => Ok(items),
            other => Err(other.mismatch(feature, "a list")),
        }
    }

    /// Convert to list items of one type; null items are rejected
    pub fn into_list_of<T>(self, feature: &str, convert: impl Fn(Value, &str) -> Result<Option<T>>) -> Result<Vec<T>> {
        self.into_list(feature)?
            .into_iter()
            .map(|item| {
                convert(item, feature)?.ok_or_else(|| Error::Type(format!("feature '{}' does not accept null items", feature)))
            })
            .collect()
    }

    /// Convert to group entries; `Null` is the empty group
    pub fn into_group(self, feature: &str) -> Result<Vec<GroupEntry>> {
        match self {
            Value::Null => Ok(Vec::new()),
            Value::Group(entries) => Ok(entries),
            other => Err(other.mismatch(feature, "group entries")),
        }
    }

    /// Convert to mixed content; `Null` is empty content
    pub fn into_mixed(self, feature: &str) -> Result<Vec<MixedEntry>> {
        match self {
            Value::Null => Ok(Vec::new()),
            Value::Mixed(entries) => Ok(entries),
            other => Err(other.mismatch(feature, "mixed content")),
        }
    }

    /// Convert to a string map; `Null` is the empty map
    pub fn into_map(self, feature: &str) -> Result<IndexMap<String, String>> {
        match self {
            Value::Null => Ok(IndexMap::new()),
            Value::Map(map) => Ok(map),
            other => Err(other.mismatch(feature, "a string map")),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Double(d) => f.write_str(&crate::datatypes::builtins::rust_to_double(*d)),
            Value::Integer(i) => write!(f, "{}", i),
            Value::String(s) => f.write_str(s),
            Value::QName(q) => f.write_str(&q.to_lexical()),
            Value::DateTime(d) => write!(f, "{}", d),
            Value::Enum(e) => f.write_str(e.literal()),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                f.write_str(&parts.join(" "))
            }
            Value::Object(o) => write!(f, "<{}>", o.class_name()),
            Value::Ows(o) => write!(f, "<ows:{}>", o.class_name()),
            Value::Any(a) => write!(f, "<{}>", a.name),
            Value::Group(entries) => write!(f, "[{} group entries]", entries.len()),
            Value::Mixed(entries) => write!(f, "[{} mixed entries]", entries.len()),
            Value::Map(map) => write!(f, "{{{} entries}}", map.len()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<QName> for Value {
    fn from(value: QName) -> Self {
        Value::QName(value)
    }
}

impl From<XmlDateTime> for Value {
    fn from(value: XmlDateTime) -> Self {
        Value::DateTime(value)
    }
}

impl From<EnumValue> for Value {
    fn from(value: EnumValue) -> Self {
        Value::Enum(value)
    }
}

impl From<FesObject> for Value {
    fn from(value: FesObject) -> Self {
        Value::Object(Box::new(value))
    }
}

impl From<OwsObject> for Value {
    fn from(value: OwsObject) -> Self {
        Value::Ows(value)
    }
}

impl From<AnyElement> for Value {
    fn from(value: AnyElement) -> Self {
        Value::Any(value)
    }
}

// ============================================================================
// Wildcard content
// ============================================================================

/// Element matched by a wildcard, kept as serialized XML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnyElement {
    /// Qualified name of the element
    pub name: QName,
    /// The element and its subtree as XML text
    pub xml: String,
}

impl AnyElement {
    /// Create a wildcard element
    pub fn new(name: QName, xml: impl Into<String>) -> Self {
        Self { name, xml: xml.into() }
    }
}

// ============================================================================
// Choice groups
// ============================================================================

/// One entry of a choice or substitution group: the element it is written
/// as, and its value
#[derive(Debug, Clone, PartialEq)]
pub struct GroupEntry {
    /// Global element of the entry
    pub element: Element,
    /// Object, or string for `ValueReference`
    pub value: Value,
}

impl GroupEntry {
    /// Create an entry, checking the value against the element's type
    pub fn new(element: Element, value: impl Into<Value>) -> Result<Self> {
        let value = value.into();
        if element.is_abstract() {
            return Err(Error::Type(format!(
                "element '{}' is abstract and cannot hold a value",
                element
            )));
        }
        let fits = match (element.content(), &value) {
            (ElementType::String, Value::String(_)) => true,
            (ElementType::AnyObject, Value::Object(_)) => true,
            (ElementType::Class(expected), Value::Object(o)) => fes20()?.conforms_to(o.class_id(), expected),
            _ => false,
        };
        if !fits {
            return Err(Error::Type(format!(
                "element '{}' cannot hold {} ({})",
                element,
                value.kind(),
                value
            )));
        }
        Ok(Self { element, value })
    }

    /// Entry holding a model object
    pub fn object(element: Element, object: impl Into<FesObject>) -> Result<Self> {
        Self::new(element, Value::object(object))
    }

    /// True when the entry belongs to the group headed by `head`
    pub fn is_in(&self, head: Element) -> bool {
        self.element.substitutes_for(head)
    }

    /// Borrow the object held by the entry
    pub fn as_object(&self) -> Option<&FesObject> {
        self.value.as_object()
    }
}

/// One entry of mixed content
#[derive(Debug, Clone, PartialEq)]
pub enum MixedEntry {
    /// Character data
    Text(String),
    /// CDATA section
    CData(String),
    /// Comment
    Comment(String),
    /// Processing instruction
    ProcessingInstruction {
        /// Target
        target: String,
        /// Data, possibly empty
        data: String,
    },
    /// FES element
    Element(GroupEntry),
    /// Element outside the FES namespace
    Any(AnyElement),
}

impl MixedEntry {
    /// Text content of character entries
    pub fn text(&self) -> Option<&str> {
        match self {
            MixedEntry::Text(t) | MixedEntry::CData(t) => Some(t),
            _ => None,
        }
    }
}
