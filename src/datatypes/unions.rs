//! Typed forms of the FES union types
//!
//! The registry resolves unions member by member and yields a [`Value`]; the
//! types here give model fields a precise Rust shape and convert to and from
//! that value.

use super::builtins::XmlDateTime;
use super::enums::{EnumValue, VersionAction};
use crate::error::{Error, Result};
use crate::model::Value;
use crate::namespaces::QName;
use std::fmt;

/// Operator name: a standard literal or an `extension:` name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorName<E> {
    /// One of the operators named by the standard
    Standard(E),
    /// Vendor operator matching `extension:\w{2,}`
    Extension(String),
}

impl<E> OperatorName<E>
where
    E: Copy + Into<EnumValue> + TryFrom<EnumValue, Error = Error>,
{
    /// Value form used by the dispatcher
    pub fn to_value(&self) -> Value {
        match self {
            OperatorName::Standard(e) => Value::Enum((*e).into()),
            OperatorName::Extension(s) => Value::String(s.clone()),
        }
    }

    /// Typed form of a dispatcher value
    pub fn from_value(value: Value, feature: &str) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Enum(e) => Ok(Some(OperatorName::Standard(E::try_from(e)?))),
            Value::String(s) => Ok(Some(OperatorName::Extension(s))),
            other => Err(Error::Type(format!(
                "feature '{}' expects an operator name, found {}",
                feature,
                other.kind()
            ))),
        }
    }
}

impl<E: fmt::Display> fmt::Display for OperatorName<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorName::Standard(e) => e.fmt(f),
            OperatorName::Extension(s) => f.write_str(s),
        }
    }
}

/// `ResourceId@version`: an action token, a version index or a timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Version {
    /// FIRST, LAST, PREVIOUS, NEXT or ALL
    Action(VersionAction),
    /// Version number, starting at 1
    Index(u64),
    /// Version valid at the given time
    Date(XmlDateTime),
}

impl Version {
    /// Value form used by the dispatcher
    pub fn to_value(&self) -> Value {
        match self {
            Version::Action(a) => Value::Enum((*a).into()),
            Version::Index(i) => Value::Integer(*i),
            Version::Date(d) => Value::DateTime(*d),
        }
    }

    /// Typed form of a dispatcher value
    pub fn from_value(value: Value, feature: &str) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Enum(e) => Ok(Some(Version::Action(VersionAction::try_from(e)?))),
            Value::Integer(i) => Ok(Some(Version::Index(i))),
            Value::DateTime(d) => Ok(Some(Version::Date(d))),
            other => Err(Error::Type(format!(
                "feature '{}' expects a version, found {}",
                feature,
                other.kind()
            ))),
        }
    }
}

/// Entry of `typeNames`: a QName or a `schema-element(...)` expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeName {
    /// `schema-element(QName)`
    SchemaElement(String),
    /// Feature type name
    Name(QName),
}

impl TypeName {
    /// Value form used by the dispatcher
    pub fn to_value(&self) -> Value {
        match self {
            TypeName::SchemaElement(s) => Value::String(s.clone()),
            TypeName::Name(q) => Value::QName(q.clone()),
        }
    }

    /// Typed form of a dispatcher value
    pub fn from_value(value: Value, feature: &str) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(TypeName::SchemaElement(s))),
            Value::QName(q) => Ok(Some(TypeName::Name(q))),
            other => Err(Error::Type(format!(
                "feature '{}' expects a type name, found {}",
                feature,
                other.kind()
            ))),
        }
    }
}
