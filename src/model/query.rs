//! Abstract query expressions
//!
//! FES declares these classes for other packages to extend; a WFS `Query`
//! is an ad hoc query expression. They are abstract here, so the structs
//! below are the state a subclass embeds. A subclass forwards feature ids
//! below the inherited count to them and handles its own features after.

use super::object::ModelObject;
use super::slot::Slot;
use super::value::Value;
use crate::datatypes::TypeName;
use crate::error::{Error, Result};
use crate::registry::ids::{abstract_adhoc_query_expression_type as adhoc, abstract_query_expression_type, classifier};
use crate::registry::{ClassifierId, FeatureId};

/// State of `AbstractQueryExpressionType`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AbstractQueryExpressionType {
    /// Client-chosen label echoed in responses
    pub handle: Option<String>,
}

impl ModelObject for AbstractQueryExpressionType {
    fn class_id(&self) -> ClassifierId {
        classifier::ABSTRACT_QUERY_EXPRESSION_TYPE
    }

    fn class_name(&self) -> &'static str {
        "AbstractQueryExpressionType"
    }

    fn get_feature(&self, feature: FeatureId, _resolve: bool, _core: bool) -> Result<Value> {
        match feature {
            abstract_query_expression_type::HANDLE => Ok(self.handle.get_value()),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn set_feature(&mut self, feature: FeatureId, value: Value) -> Result<()> {
        match feature {
            abstract_query_expression_type::HANDLE => self.handle.set_value(value, "handle"),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn unset_feature(&mut self, feature: FeatureId) -> Result<()> {
        match feature {
            abstract_query_expression_type::HANDLE => {
                self.handle = None;
                Ok(())
            }
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn is_feature_set(&self, feature: FeatureId) -> Result<bool> {
        match feature {
            abstract_query_expression_type::HANDLE => Ok(self.handle.is_some()),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }
}

/// State of `AbstractAdhocQueryExpressionType`
///
/// The clause slots hold objects of other packages (a WFS property name,
/// an FES filter, a sort specification) and are typed as opaque values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AbstractAdhocQueryExpressionType {
    /// Inherited `handle`
    pub base: AbstractQueryExpressionType,
    /// Projection clauses, in document order
    pub projection_clauses: Vec<Value>,
    /// Selection clause, usually a [`FilterType`](super::FilterType)
    pub selection_clause: Value,
    /// Sorting clause, usually a [`SortByType`](super::SortByType)
    pub sorting_clause: Value,
    /// Aliases of the queried types
    pub aliases: Vec<String>,
    /// Queried feature types
    pub type_names: Vec<TypeName>,
}

impl AbstractAdhocQueryExpressionType {
    /// Query over the given type names
    pub fn new(type_names: impl IntoIterator<Item = TypeName>) -> Self {
        Self {
            type_names: type_names.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl ModelObject for AbstractAdhocQueryExpressionType {
    fn class_id(&self) -> ClassifierId {
        classifier::ABSTRACT_ADHOC_QUERY_EXPRESSION_TYPE
    }

    fn class_name(&self) -> &'static str {
        "AbstractAdhocQueryExpressionType"
    }

    fn get_feature(&self, feature: FeatureId, resolve: bool, core: bool) -> Result<Value> {
        match feature {
            adhoc::HANDLE => self.base.get_feature(feature, resolve, core),
            adhoc::ABSTRACT_PROJECTION_CLAUSE => Ok(Value::List(self.projection_clauses.clone())),
            adhoc::ABSTRACT_SELECTION_CLAUSE => Ok(self.selection_clause.clone()),
            adhoc::ABSTRACT_SORTING_CLAUSE => Ok(self.sorting_clause.clone()),
            adhoc::ALIASES => Ok(self.aliases.get_value()),
            adhoc::TYPE_NAMES => Ok(self.type_names.get_value()),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn set_feature(&mut self, feature: FeatureId, value: Value) -> Result<()> {
        match feature {
            adhoc::HANDLE => self.base.set_feature(feature, value),
            adhoc::ABSTRACT_PROJECTION_CLAUSE => {
                self.projection_clauses = value.into_list("abstractProjectionClause")?;
                Ok(())
            }
            adhoc::ABSTRACT_SELECTION_CLAUSE => {
                self.selection_clause = value;
                Ok(())
            }
            adhoc::ABSTRACT_SORTING_CLAUSE => {
                self.sorting_clause = value;
                Ok(())
            }
            adhoc::ALIASES => self.aliases.set_value(value, "aliases"),
            adhoc::TYPE_NAMES => self.type_names.set_value(value, "typeNames"),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn unset_feature(&mut self, feature: FeatureId) -> Result<()> {
        match feature {
            adhoc::HANDLE => return self.base.unset_feature(feature),
            adhoc::ABSTRACT_PROJECTION_CLAUSE => self.projection_clauses.clear(),
            adhoc::ABSTRACT_SELECTION_CLAUSE => self.selection_clause = Value::Null,
            adhoc::ABSTRACT_SORTING_CLAUSE => self.sorting_clause = Value::Null,
            adhoc::ALIASES => self.aliases.clear(),
            adhoc::TYPE_NAMES => self.type_names.clear(),
            _ => return Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
        Ok(())
    }

    fn is_feature_set(&self, feature: FeatureId) -> Result<bool> {
        match feature {
            adhoc::HANDLE => self.base.is_feature_set(feature),
            adhoc::ABSTRACT_PROJECTION_CLAUSE => Ok(!self.projection_clauses.is_empty()),
            adhoc::ABSTRACT_SELECTION_CLAUSE => Ok(!self.selection_clause.is_null()),
            adhoc::ABSTRACT_SORTING_CLAUSE => Ok(!self.sorting_clause.is_null()),
            adhoc::ALIASES => Ok(!self.aliases.is_empty()),
            adhoc::TYPE_NAMES => Ok(!self.type_names.is_empty()),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterType;
    use crate::namespaces::QName;

    #[test]
    fn test_handle_is_shared_with_base() {
        let mut query = AbstractAdhocQueryExpressionType::default();
        query.set_feature(adhoc::HANDLE, Value::from("q1")).unwrap();
        assert_eq!(query.base.handle.as_deref(), Some("q1"));
        assert!(query.is_feature_set(adhoc::HANDLE).unwrap());
    }

    #[test]
    fn test_clauses_hold_opaque_values() {
        let mut query = AbstractAdhocQueryExpressionType::new([TypeName::Name(QName::local("Road"))]);
        query
            .set_feature(adhoc::ABSTRACT_SELECTION_CLAUSE, Value::object(FilterType::default()))
            .unwrap();
        assert!(query.is_feature_set(adhoc::ABSTRACT_SELECTION_CLAUSE).unwrap());
        assert_eq!(
            query.get(adhoc::TYPE_NAMES).unwrap(),
            Value::List(vec![Value::QName(QName::local("Road"))])
        );
        query.unset_feature(adhoc::ABSTRACT_SELECTION_CLAUSE).unwrap();
        assert!(!query.is_feature_set(adhoc::ABSTRACT_SELECTION_CLAUSE).unwrap());
    }

    #[test]
    fn test_aliases_accept_strings_only() {
        let mut query = AbstractAdhocQueryExpressionType::default();
        query.set_feature(adhoc::ALIASES, Value::list(vec!["a", "b"])).unwrap();
        assert_eq!(query.aliases, vec!["a".to_string(), "b".to_string()]);
        assert!(query.set_feature(adhoc::ALIASES, Value::list(vec![1.0])).is_err());
    }
}
