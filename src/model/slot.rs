//! Typed storage behind plain features
//!
//! A [`FieldValue`] converts one item between its Rust type and [`Value`].
//! [`Slot`] lifts that to the two shapes a plain feature is stored in:
//! `Option<T>` for single-valued features and `Vec<T>` for many-valued
//! ones. Single slots are set when `Some`; list slots when non-empty.

use super::value::{AnyElement, Value};
use crate::datatypes::{
    ComparisonOperatorName, OperatorName, SpatialOperatorName, TemporalOperatorName, TypeName, Version, XmlDateTime,
};
use crate::error::Result;
use crate::namespaces::QName;
use crate::ows::{DomainType, MetadataType};

/// One item of a feature value
pub trait FieldValue: Sized {
    /// Dynamic form of the item
    fn into_value(self) -> Value;

    /// Typed form of a dynamic value; `Null` gives `None`
    fn from_value(value: Value, feature: &str) -> Result<Option<Self>>;
}

impl FieldValue for String {
    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn from_value(value: Value, feature: &str) -> Result<Option<Self>> {
        value.into_string(feature)
    }
}

impl FieldValue for bool {
    fn into_value(self) -> Value {
        Value::Boolean(self)
    }

    fn from_value(value: Value, feature: &str) -> Result<Option<Self>> {
        value.into_bool(feature)
    }
}

impl FieldValue for f64 {
    fn into_value(self) -> Value {
        Value::Double(self)
    }

    fn from_value(value: Value, feature: &str) -> Result<Option<Self>> {
        value.into_double(feature)
    }
}

impl FieldValue for QName {
    fn into_value(self) -> Value {
        Value::QName(self)
    }

    fn from_value(value: Value, feature: &str) -> Result<Option<Self>> {
        value.into_qname(feature)
    }
}

impl FieldValue for XmlDateTime {
    fn into_value(self) -> Value {
        Value::DateTime(self)
    }

    fn from_value(value: Value, feature: &str) -> Result<Option<Self>> {
        value.into_datetime(feature)
    }
}

impl FieldValue for AnyElement {
    fn into_value(self) -> Value {
        Value::Any(self)
    }

    fn from_value(value: Value, feature: &str) -> Result<Option<Self>> {
        value.into_any(feature)
    }
}

impl FieldValue for MetadataType {
    fn into_value(self) -> Value {
        Value::Ows(self.into())
    }

    fn from_value(value: Value, feature: &str) -> Result<Option<Self>> {
        value.into_ows(feature)
    }
}

impl FieldValue for DomainType {
    fn into_value(self) -> Value {
        Value::Ows(self.into())
    }

    fn from_value(value: Value, feature: &str) -> Result<Option<Self>> {
        value.into_ows(feature)
    }
}

impl FieldValue for Version {
    fn into_value(self) -> Value {
        self.to_value()
    }

    fn from_value(value: Value, feature: &str) -> Result<Option<Self>> {
        Version::from_value(value, feature)
    }
}

impl FieldValue for TypeName {
    fn into_value(self) -> Value {
        self.to_value()
    }

    fn from_value(value: Value, feature: &str) -> Result<Option<Self>> {
        TypeName::from_value(value, feature)
    }
}

macro_rules! operator_name_field {
    ($($enum:ty),+) => {
        $(
            impl FieldValue for OperatorName<$enum> {
                fn into_value(self) -> Value {
                    self.to_value()
                }

                fn from_value(value: Value, feature: &str) -> Result<Option<Self>> {
                    OperatorName::<$enum>::from_value(value, feature)
                }
            }
        )+
    };
}

operator_name_field!(ComparisonOperatorName, SpatialOperatorName, TemporalOperatorName);

/// Storage of a plain feature
pub trait Slot {
    /// Current value; `Null` or an empty list when unset
    fn get_value(&self) -> Value;

    /// Replace the value; lists are cleared before the new items are added
    fn set_value(&mut self, value: Value, feature: &str) -> Result<()>;

    /// Back to the unset state
    fn unset_value(&mut self);

    /// True when a value is present
    fn is_value_set(&self) -> bool;
}

impl<T: FieldValue + Clone> Slot for Option<T> {
    fn get_value(&self) -> Value {
        self.clone().map_or(Value::Null, T::into_value)
    }

    fn set_value(&mut self, value: Value, feature: &str) -> Result<()> {
        *self = T::from_value(value, feature)?;
        Ok(())
    }

    fn unset_value(&mut self) {
        *self = None;
    }

    fn is_value_set(&self) -> bool {
        self.is_some()
    }
}

impl<T: FieldValue + Clone> Slot for Vec<T> {
    fn get_value(&self) -> Value {
        Value::List(self.iter().cloned().map(T::into_value).collect())
    }

    fn set_value(&mut self, value: Value, feature: &str) -> Result<()> {
        let items = value.into_list_of(feature, T::from_value)?;
        self.clear();
        self.extend(items);
        Ok(())
    }

    fn unset_value(&mut self) {
        self.clear();
    }

    fn is_value_set(&self) -> bool {
        !self.is_empty()
    }
}
