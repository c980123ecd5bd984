//! Expressions: value references, literals and function calls
//!
//! The FES `expression` substitution group has exactly three members, so
//! it is stored as the [`Expression`] sum type. The helpers at the bottom
//! expose an expression slot through the `expressionGroup` / `expression`
//! feature pair every operator class carries.

use super::element::Element;
use super::object::ModelObject;
use super::slot::Slot;
use super::value::{AnyElement, GroupEntry, MixedEntry, Value};
use crate::error::{Error, Result};
use crate::namespaces::QName;
use crate::registry::ids::{classifier, function_type, literal_type};
use crate::registry::{ClassifierId, FeatureId};

/// Member of the `fes:expression` substitution group
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// `fes:ValueReference`, an XPath to a property
    ValueReference(String),
    /// `fes:Literal`
    Literal(LiteralType),
    /// `fes:Function`
    Function(FunctionType),
}

impl Expression {
    /// Reference to a property path
    pub fn value_reference(path: impl Into<String>) -> Self {
        Expression::ValueReference(path.into())
    }

    /// Literal with text content
    pub fn literal(text: impl Into<String>) -> Self {
        Expression::Literal(LiteralType::new(text))
    }

    /// Global element the expression is written as
    pub fn element(&self) -> Element {
        match self {
            Expression::ValueReference(_) => Element::ValueReference,
            Expression::Literal(_) => Element::Literal,
            Expression::Function(_) => Element::Function,
        }
    }

    /// Dispatcher value: the path string or the contained object
    pub fn to_value(&self) -> Value {
        match self {
            Expression::ValueReference(path) => Value::String(path.clone()),
            Expression::Literal(literal) => Value::object(literal.clone()),
            Expression::Function(function) => Value::object(function.clone()),
        }
    }

    /// Group entry tagged with the expression's element
    pub fn to_entry(&self) -> GroupEntry {
        GroupEntry {
            element: self.element(),
            value: self.to_value(),
        }
    }

    /// Expression held by a group entry of `feature`
    pub fn from_entry(entry: GroupEntry, feature: &str) -> Result<Self> {
        let GroupEntry { element, value } = entry;
        let expression = match element {
            Element::ValueReference => value.into_string(feature)?.map(Expression::ValueReference),
            Element::Literal => value.into_object::<LiteralType>(feature)?.map(Expression::Literal),
            Element::Function => value.into_object::<FunctionType>(feature)?.map(Expression::Function),
            other => {
                return Err(Error::Type(format!(
                    "feature '{}' does not accept element '{}'",
                    feature, other
                )))
            }
        };
        expression.ok_or_else(|| Error::Type(format!("feature '{}' does not accept an empty '{}'", feature, element)))
    }
}

impl From<String> for Expression {
    fn from(path: String) -> Self {
        Expression::ValueReference(path)
    }
}

impl From<LiteralType> for Expression {
    fn from(value: LiteralType) -> Self {
        Expression::Literal(value)
    }
}

impl From<FunctionType> for Expression {
    fn from(value: FunctionType) -> Self {
        Expression::Function(value)
    }
}

// ============================================================================
// Literal
// ============================================================================

/// `fes:Literal`: mixed content with an optional type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiteralType {
    /// Text and element content in document order
    pub mixed: Vec<MixedEntry>,
    /// Declared type of the literal
    pub type_: Option<QName>,
}

impl LiteralType {
    /// Literal with text content
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            mixed: vec![MixedEntry::Text(text.into())],
            type_: None,
        }
    }

    /// Literal wrapping one element, e.g. a GML geometry
    pub fn from_element(element: AnyElement) -> Self {
        Self {
            mixed: vec![MixedEntry::Any(element)],
            type_: None,
        }
    }

    /// Set the declared type
    pub fn with_type(mut self, type_: QName) -> Self {
        self.type_ = Some(type_);
        self
    }

    /// Concatenated character content
    pub fn text(&self) -> String {
        self.mixed.iter().filter_map(MixedEntry::text).collect()
    }

    /// First wildcard element of the content
    pub fn any(&self) -> Option<&AnyElement> {
        self.mixed.iter().find_map(|entry| match entry {
            MixedEntry::Any(any) => Some(any),
            _ => None,
        })
    }

    /// Replace the wildcard element, keeping the text around it
    pub fn set_any(&mut self, any: Option<AnyElement>) {
        self.mixed.retain(|entry| !matches!(entry, MixedEntry::Any(_)));
        if let Some(any) = any {
            self.mixed.push(MixedEntry::Any(any));
        }
    }
}

impl ModelObject for LiteralType {
    fn class_id(&self) -> ClassifierId {
        classifier::LITERAL_TYPE
    }

    fn class_name(&self) -> &'static str {
        "LiteralType"
    }

    fn get_feature(&self, feature: FeatureId, _resolve: bool, _core: bool) -> Result<Value> {
        match feature {
            literal_type::MIXED => Ok(Value::Mixed(self.mixed.clone())),
            literal_type::ANY => Ok(self.any().cloned().map_or(Value::Null, Value::Any)),
            literal_type::TYPE => Ok(self.type_.get_value()),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn set_feature(&mut self, feature: FeatureId, value: Value) -> Result<()> {
        match feature {
            literal_type::MIXED => {
                self.mixed = value.into_mixed("mixed")?;
                Ok(())
            }
            literal_type::ANY => {
                let any = value.into_any("any")?;
                self.set_any(any);
                Ok(())
            }
            literal_type::TYPE => self.type_.set_value(value, "type"),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn unset_feature(&mut self, feature: FeatureId) -> Result<()> {
        match feature {
            literal_type::MIXED => self.mixed.clear(),
            literal_type::ANY => self.set_any(None),
            literal_type::TYPE => self.type_ = None,
            _ => return Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
        Ok(())
    }

    fn is_feature_set(&self, feature: FeatureId) -> Result<bool> {
        match feature {
            literal_type::MIXED => Ok(!self.mixed.is_empty()),
            literal_type::ANY => Ok(self.any().is_some()),
            literal_type::TYPE => Ok(self.type_.is_some()),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }
}

// ============================================================================
// Function
// ============================================================================

/// `fes:Function`: a named function applied to expressions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionType {
    /// Arguments in call order
    pub arguments: Vec<Expression>,
    /// Function name
    pub name: Option<String>,
}

impl FunctionType {
    /// Function call without arguments
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            arguments: Vec::new(),
            name: Some(name.into()),
        }
    }

    /// Append an argument
    pub fn with_argument(mut self, argument: impl Into<Expression>) -> Self {
        self.arguments.push(argument.into());
        self
    }
}

impl ModelObject for FunctionType {
    fn class_id(&self) -> ClassifierId {
        classifier::FUNCTION_TYPE
    }

    fn class_name(&self) -> &'static str {
        "FunctionType"
    }

    fn get_feature(&self, feature: FeatureId, _resolve: bool, core: bool) -> Result<Value> {
        match feature {
            function_type::EXPRESSION_GROUP => Ok(list_group_value(&self.arguments, core)),
            function_type::EXPRESSION => Ok(list_group_value(&self.arguments, false)),
            function_type::NAME => Ok(self.name.get_value()),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn set_feature(&mut self, feature: FeatureId, value: Value) -> Result<()> {
        match feature {
            function_type::EXPRESSION_GROUP => set_list_group(&mut self.arguments, value, "expressionGroup"),
            function_type::EXPRESSION => Err(Error::not_changeable(self.class_name(), "expression")),
            function_type::NAME => self.name.set_value(value, "name"),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn unset_feature(&mut self, feature: FeatureId) -> Result<()> {
        match feature {
            function_type::EXPRESSION_GROUP => self.arguments.clear(),
            function_type::EXPRESSION => return Err(Error::not_changeable(self.class_name(), "expression")),
            function_type::NAME => self.name = None,
            _ => return Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
        Ok(())
    }

    fn is_feature_set(&self, feature: FeatureId) -> Result<bool> {
        match feature {
            function_type::EXPRESSION_GROUP | function_type::EXPRESSION => Ok(!self.arguments.is_empty()),
            function_type::NAME => Ok(self.name.is_some()),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }
}

// ============================================================================
// Expression slots
// ============================================================================

/// Value of a single-valued expression group: entries when `core`, the
/// expression's value otherwise
pub(crate) fn single_group_value(slot: &Option<Expression>, core: bool) -> Value {
    if core {
        Value::Group(slot.iter().map(Expression::to_entry).collect())
    } else {
        slot.as_ref().map_or(Value::Null, Expression::to_value)
    }
}

/// Replace a single-valued expression group
pub(crate) fn set_single_group(slot: &mut Option<Expression>, value: Value, feature: &str) -> Result<()> {
    let mut entries = value.into_group(feature)?;
    if entries.len() > 1 {
        return Err(Error::Value(format!(
            "feature '{}' holds at most one entry, got {}",
            feature,
            entries.len()
        )));
    }
    *slot = entries
        .pop()
        .map(|entry| Expression::from_entry(entry, feature))
        .transpose()?;
    Ok(())
}

/// Value of a many-valued expression group
pub(crate) fn list_group_value(list: &[Expression], core: bool) -> Value {
    if core {
        Value::Group(list.iter().map(Expression::to_entry).collect())
    } else {
        Value::List(list.iter().map(Expression::to_value).collect())
    }
}

/// Replace a many-valued expression group
pub(crate) fn set_list_group(list: &mut Vec<Expression>, value: Value, feature: &str) -> Result<()> {
    let expressions = value
        .into_group(feature)?
        .into_iter()
        .map(|entry| Expression::from_entry(entry, feature))
        .collect::<Result<Vec<_>>>()?;
    *list = expressions;
    Ok(())
}

/// Implement [`ModelObject`] for a class holding only one optional
/// expression
macro_rules! single_expression_object {
    ($ty:ty, $class:path, $name:literal) => {
        impl $crate::model::ModelObject for $ty {
            fn class_id(&self) -> $crate::registry::ClassifierId {
                $class
            }

            fn class_name(&self) -> &'static str {
                $name
            }

            fn get_feature(
                &self,
                feature: $crate::registry::FeatureId,
                _resolve: bool,
                core: bool,
            ) -> $crate::error::Result<$crate::model::Value> {
                use $crate::registry::ids::single_expression_type as f;
                match feature {
                    f::EXPRESSION_GROUP => Ok($crate::model::expression::single_group_value(&self.expression, core)),
                    f::EXPRESSION => Ok($crate::model::expression::single_group_value(&self.expression, false)),
                    _ => Err($crate::error::Error::unknown_feature($name, $class, feature)),
                }
            }

            fn set_feature(
                &mut self,
                feature: $crate::registry::FeatureId,
                value: $crate::model::Value,
            ) -> $crate::error::Result<()> {
                use $crate::registry::ids::single_expression_type as f;
                match feature {
                    f::EXPRESSION_GROUP => {
                        $crate::model::expression::set_single_group(&mut self.expression, value, "expressionGroup")
                    }
                    f::EXPRESSION => Err($crate::error::Error::not_changeable($name, "expression")),
                    _ => Err($crate::error::Error::unknown_feature($name, $class, feature)),
                }
            }

            fn unset_feature(&mut self, feature: $crate::registry::FeatureId) -> $crate::error::Result<()> {
                use $crate::registry::ids::single_expression_type as f;
                match feature {
                    f::EXPRESSION_GROUP => {
                        self.expression = None;
                        Ok(())
                    }
                    f::EXPRESSION => Err($crate::error::Error::not_changeable($name, "expression")),
                    _ => Err($crate::error::Error::unknown_feature($name, $class, feature)),
                }
            }

            fn is_feature_set(&self, feature: $crate::registry::FeatureId) -> $crate::error::Result<bool> {
                use $crate::registry::ids::single_expression_type as f;
                match feature {
                    f::EXPRESSION_GROUP | f::EXPRESSION => Ok(self.expression.is_some()),
                    _ => Err($crate::error::Error::unknown_feature($name, $class, feature)),
                }
            }
        }
    };
}

pub(crate) use single_expression_object;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_entries_carry_their_element() {
        let entry = Expression::value_reference("name").to_entry();
        assert_eq!(entry.element, Element::ValueReference);
        assert_eq!(entry.value, Value::from("name"));

        let entry = Expression::literal("42").to_entry();
        assert_eq!(entry.element, Element::Literal);
        assert_eq!(Expression::from_entry(entry, "expressionGroup").unwrap(), Expression::literal("42"));
    }

    #[test]
    fn test_from_entry_rejects_other_elements() {
        let entry = GroupEntry {
            element: Element::SortBy,
            value: Value::Null,
        };
        let err = Expression::from_entry(entry, "expressionGroup").unwrap_err();
        assert!(err.to_string().contains("does not accept element 'SortBy'"));
    }

    #[test]
    fn test_literal_any_is_a_view_of_mixed() {
        let mut literal = LiteralType::new("before ");
        let point = AnyElement::new(QName::local("Point"), "<Point/>");
        literal
            .set_feature(literal_type::ANY, Value::Any(point.clone()))
            .unwrap();
        assert_eq!(literal.mixed.len(), 2);
        assert_eq!(literal.get(literal_type::ANY).unwrap(), Value::Any(point));
        assert_eq!(literal.text(), "before ");

        literal.unset_feature(literal_type::ANY).unwrap();
        assert!(!literal.is_feature_set(literal_type::ANY).unwrap());
        assert!(literal.is_feature_set(literal_type::MIXED).unwrap());
    }

    #[test]
    fn test_function_arguments_group() {
        let mut function = FunctionType::new("sin").with_argument(Expression::value_reference("angle"));
        let core = function.get_feature(function_type::EXPRESSION_GROUP, true, true).unwrap();
        assert_eq!(core, Value::Group(vec![Expression::value_reference("angle").to_entry()]));
        assert_eq!(
            function.get(function_type::EXPRESSION).unwrap(),
            Value::List(vec![Value::from("angle")])
        );

        let replacement = Value::Group(vec![Expression::literal("1").to_entry()]);
        function.set_feature(function_type::EXPRESSION_GROUP, replacement).unwrap();
        assert_eq!(function.arguments, vec![Expression::literal("1")]);

        assert!(matches!(
            function.set_feature(function_type::EXPRESSION, Value::Null),
            Err(Error::NotChangeable { .. })
        ));
    }

    #[test]
    fn test_single_group_holds_one_entry() {
        let mut slot = None;
        let two = Value::Group(vec![
            Expression::literal("1").to_entry(),
            Expression::literal("2").to_entry(),
        ]);
        assert!(set_single_group(&mut slot, two, "expressionGroup").is_err());
        assert!(slot.is_none());
    }
}
