//! `SortBy` and its properties

use super::object::{plain_model_object, ModelObject};
use super::slot::Slot;
use super::value::Value;
use crate::datatypes::SortOrder;
use crate::error::{Error, Result};
use crate::registry::ids::{classifier, sort_by_type, sort_property_type};
use crate::registry::{ClassifierId, FeatureId};

/// `fes:SortBy`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortByType {
    /// Sort keys, most significant first
    pub sort_property: Vec<SortPropertyType>,
}

impl SortByType {
    /// Append a sort key
    pub fn with_property(mut self, property: SortPropertyType) -> Self {
        self.sort_property.push(property);
        self
    }
}

plain_model_object!(SortByType, classifier::SORT_BY_TYPE, "SortByType" {
    sort_by_type::SORT_PROPERTY => sort_property,
});

/// One sort key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortPropertyType {
    /// Property to sort on
    pub value_reference: Option<String>,
    /// Direction; the first literal, `DESC`, when unset
    pub sort_order: Option<SortOrder>,
}

impl SortPropertyType {
    /// Sort key on a property with the default order
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            value_reference: Some(path.into()),
            sort_order: None,
        }
    }

    /// Set the direction
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.sort_order = Some(order);
        self
    }

    /// Effective direction
    pub fn sort_order(&self) -> SortOrder {
        self.sort_order.unwrap_or(SortOrder::Desc)
    }
}

impl ModelObject for SortPropertyType {
    fn class_id(&self) -> ClassifierId {
        classifier::SORT_PROPERTY_TYPE
    }

    fn class_name(&self) -> &'static str {
        "SortPropertyType"
    }

    fn get_feature(&self, feature: FeatureId, _resolve: bool, _core: bool) -> Result<Value> {
        match feature {
            sort_property_type::VALUE_REFERENCE => Ok(self.value_reference.get_value()),
            sort_property_type::SORT_ORDER => Ok(Value::Enum(self.sort_order().into())),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn set_feature(&mut self, feature: FeatureId, value: Value) -> Result<()> {
        match feature {
            sort_property_type::VALUE_REFERENCE => self.value_reference.set_value(value, "valueReference"),
            sort_property_type::SORT_ORDER => {
                self.sort_order = value.into_enum("sortOrder")?;
                Ok(())
            }
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn unset_feature(&mut self, feature: FeatureId) -> Result<()> {
        match feature {
            sort_property_type::VALUE_REFERENCE => self.value_reference = None,
            sort_property_type::SORT_ORDER => self.sort_order = None,
            _ => return Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
        Ok(())
    }

    fn is_feature_set(&self, feature: FeatureId) -> Result<bool> {
        match feature {
            sort_property_type::VALUE_REFERENCE => Ok(self.value_reference.is_some()),
            sort_property_type::SORT_ORDER => Ok(self.sort_order.is_some()),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_defaults_to_first_literal() {
        let mut key = SortPropertyType::new("name");
        assert_eq!(
            key.get(sort_property_type::SORT_ORDER).unwrap(),
            Value::Enum(SortOrder::Desc.into())
        );
        assert!(!key.is_feature_set(sort_property_type::SORT_ORDER).unwrap());

        key.set_feature(sort_property_type::SORT_ORDER, Value::Enum(SortOrder::Asc.into()))
            .unwrap();
        assert_eq!(key.sort_order(), SortOrder::Asc);
        key.unset_feature(sort_property_type::SORT_ORDER).unwrap();
        assert_eq!(key.sort_order(), SortOrder::Desc);
    }

    #[test]
    fn test_sort_by_replaces_properties() {
        let mut sort_by = SortByType::default().with_property(SortPropertyType::new("a"));
        let replacement = Value::list(vec![Value::object(SortPropertyType::new("b"))]);
        sort_by.set_feature(sort_by_type::SORT_PROPERTY, replacement).unwrap();
        assert_eq!(sort_by.sort_property, vec![SortPropertyType::new("b")]);
        assert!(sort_by
            .set_feature(sort_by_type::SORT_PROPERTY, Value::list(vec![Value::from("c")]))
            .is_err());
    }
}
