//! Simple types of FES 2.0
//!
//! Conversion between lexical strings and [`Value`]s is driven by the
//! registry: enumerations, pattern restrictions, whitespace separated lists
//! and unions. A union tries its members in declaration order and accepts
//! the first one that both parses and validates.

pub mod builtins;
pub mod enums;
pub mod facets;
pub mod unions;

pub use builtins::XmlDateTime;
pub use enums::{
    ComparisonOperatorName, EnumValue, MatchAction, SortOrder, SpatialOperatorName, TemporalOperatorName,
    VersionAction,
};
pub use facets::PatternFacet;
pub use unions::{OperatorName, TypeName, Version};

use crate::error::{Error, Result, ValidationError};
use crate::model::Value;
use crate::registry::{ClassifierId, DataTypeDescriptor, DataTypeKind, Registry, RuntimeType, TypeRef};

/// Parse a lexical value of any type a feature or union member can have
pub fn parse_typed(registry: &Registry, type_ref: &TypeRef, lexical: &str) -> Result<Value> {
    match type_ref {
        TypeRef::Xml(xml_type) => builtins::parse(*xml_type, lexical),
        TypeRef::Classifier(id) => parse_data_type(registry, *id, lexical),
        TypeRef::Runtime(RuntimeType::String) => Ok(Value::String(lexical.to_string())),
        other => Err(Error::Type(format!("type {:?} has no lexical form", other))),
    }
}

/// Parse a lexical value of a registered simple type
pub fn parse_data_type(registry: &Registry, id: ClassifierId, lexical: &str) -> Result<Value> {
    let data_type = registry.data_type(id)?;
    match &data_type.kind {
        DataTypeKind::Enumeration { .. } => Ok(Value::Enum(EnumValue::from_literal(id, lexical.trim())?)),
        DataTypeKind::Restriction { base, .. } => parse_typed(registry, base, lexical),
        DataTypeKind::List { item } => lexical
            .split_whitespace()
            .map(|token| parse_typed(registry, item, token))
            .collect::<Result<Vec<_>>>()
            .map(Value::List),
        DataTypeKind::Union { members } => {
            let mut last_failure = None;
            for member in members {
                let attempt = parse_typed(registry, member, lexical).and_then(|value| {
                    validate_typed(registry, member, &value)?;
                    Ok(value)
                });
                match attempt {
                    Ok(value) => return Ok(value),
                    Err(err) => {
                        tracing::trace!(
                            datatype = %data_type.name,
                            member = ?member,
                            literal = lexical,
                            error = %err,
                            "union member rejected literal"
                        );
                        last_failure = Some(err);
                    }
                }
            }
            Err(invalid_value(data_type, lexical, last_failure))
        }
    }
}

fn invalid_value(data_type: &DataTypeDescriptor, lexical: &str, cause: Option<Error>) -> Error {
    let mut err = ValidationError::new(format!(
        "Invalid value: '{}' for datatype :{}",
        lexical, data_type.name
    ))
    .with_component(data_type.name.clone());
    if let Some(cause) = cause {
        err = err.with_reason(cause.to_string());
    }
    Error::Validation(err)
}

/// Check a value against the facets of a feature or member type
pub fn validate_typed(registry: &Registry, type_ref: &TypeRef, value: &Value) -> Result<()> {
    match type_ref {
        TypeRef::Xml(xml_type) => builtins::validate(*xml_type, value),
        TypeRef::Classifier(id) => validate_data_type(registry, *id, value),
        TypeRef::Runtime(RuntimeType::String) => match value {
            Value::String(_) => Ok(()),
            other => Err(Error::Type(format!("expected string, found {}", other.kind()))),
        },
        _ => Ok(()),
    }
}

/// Check a value against a registered simple type
pub fn validate_data_type(registry: &Registry, id: ClassifierId, value: &Value) -> Result<()> {
    let data_type = registry.data_type(id)?;
    match &data_type.kind {
        DataTypeKind::Enumeration { .. } => match value {
            Value::Enum(e) if e.classifier() == id => Ok(()),
            other => Err(Error::Type(format!(
                "expected a literal of '{}', found {}",
                data_type.name,
                other.kind()
            ))),
        },
        DataTypeKind::Restriction { base, patterns } => {
            validate_typed(registry, base, value)?;
            if patterns.is_empty() {
                return Ok(());
            }
            let lexical = to_lexical_typed(registry, base, value)?;
            facets::validate_patterns(patterns, &lexical).map_err(|err| match err {
                Error::Validation(v) => Error::Validation(v.with_component(data_type.name.clone())),
                other => other,
            })
        }
        DataTypeKind::List { item } => match value {
            Value::List(items) => items.iter().try_for_each(|v| validate_typed(registry, item, v)),
            other => Err(Error::Type(format!(
                "expected a list for '{}', found {}",
                data_type.name,
                other.kind()
            ))),
        },
        DataTypeKind::Union { members } => {
            let mut last_failure = None;
            for member in members {
                match validate_typed(registry, member, value) {
                    Ok(()) => return Ok(()),
                    Err(err) => last_failure = Some(err),
                }
            }
            Err(invalid_value(data_type, &value.to_string(), last_failure))
        }
    }
}

/// True when the value has the representation of the type, facets aside
pub fn accepts_typed(registry: &Registry, type_ref: &TypeRef, value: &Value) -> bool {
    match type_ref {
        TypeRef::Xml(xml_type) => builtins::accepts(*xml_type, value),
        TypeRef::Runtime(RuntimeType::String) => matches!(value, Value::String(_)),
        TypeRef::Classifier(id) => match registry.data_type(*id).map(|d| &d.kind) {
            Ok(DataTypeKind::Enumeration { .. }) => matches!(value, Value::Enum(e) if e.classifier() == *id),
            Ok(DataTypeKind::Restriction { base, .. }) => accepts_typed(registry, base, value),
            Ok(DataTypeKind::List { .. }) => matches!(value, Value::List(_)),
            Ok(DataTypeKind::Union { members }) => members.iter().any(|m| accepts_typed(registry, m, value)),
            Err(_) => false,
        },
        _ => false,
    }
}

/// Lexical form of a value of any feature or member type
pub fn to_lexical_typed(registry: &Registry, type_ref: &TypeRef, value: &Value) -> Result<String> {
    match type_ref {
        TypeRef::Xml(xml_type) => builtins::to_lexical(*xml_type, value),
        TypeRef::Classifier(id) => data_type_to_string(registry, *id, value),
        TypeRef::Runtime(RuntimeType::String) => match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(Error::Type(format!("expected string, found {}", other.kind()))),
        },
        other => Err(Error::Type(format!("type {:?} has no lexical form", other))),
    }
}

/// Lexical form of a value of a registered simple type
pub fn data_type_to_string(registry: &Registry, id: ClassifierId, value: &Value) -> Result<String> {
    let data_type = registry.data_type(id)?;
    match &data_type.kind {
        DataTypeKind::Enumeration { .. } => match value {
            Value::Enum(e) if e.classifier() == id => Ok(e.literal().to_string()),
            other => Err(Error::Type(format!(
                "expected a literal of '{}', found {}",
                data_type.name,
                other.kind()
            ))),
        },
        DataTypeKind::Restriction { base, .. } => to_lexical_typed(registry, base, value),
        DataTypeKind::List { item } => match value {
            Value::List(items) => Ok(items
                .iter()
                .map(|v| to_lexical_typed(registry, item, v))
                .collect::<Result<Vec<_>>>()?
                .join(" ")),
            other => Err(Error::Type(format!(
                "expected a list for '{}', found {}",
                data_type.name,
                other.kind()
            ))),
        },
        DataTypeKind::Union { members } => members
            .iter()
            .find(|m| accepts_typed(registry, m, value) && validate_typed(registry, m, value).is_ok())
            .map(|m| to_lexical_typed(registry, m, value))
            .unwrap_or_else(|| Err(invalid_value(data_type, &value.to_string(), None))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{fes20, ids::classifier, XmlType};

    #[test]
    fn test_enum_member_wins_over_extension_string() {
        let registry = fes20().unwrap();
        let value = parse_data_type(registry, classifier::SPATIAL_OPERATOR_NAME_TYPE, "BBOX").unwrap();
        assert_eq!(value, Value::Enum(SpatialOperatorName::Bbox.into()));

        let value = parse_data_type(registry, classifier::SPATIAL_OPERATOR_NAME_TYPE, "extension:Near").unwrap();
        assert_eq!(value, Value::String("extension:Near".into()));
    }

    #[test]
    fn test_union_reports_literal_and_datatype() {
        let registry = fes20().unwrap();
        let err = parse_data_type(registry, classifier::TEMPORAL_OPERATOR_NAME_TYPE, "Whenever").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Invalid value: 'Whenever' for datatype :TemporalOperatorNameType"));
        assert!(msg.contains("Reason:"));
    }

    #[test]
    fn test_list_round_trip_keeps_item_order() {
        let registry = fes20().unwrap();
        let value = parse_data_type(registry, classifier::ALIASES_TYPE, " a  b\tc ").unwrap();
        assert_eq!(
            value,
            Value::List(vec![Value::String("a".into()), Value::String("b".into()), Value::String("c".into())])
        );
        assert_eq!(data_type_to_string(registry, classifier::ALIASES_TYPE, &value).unwrap(), "a b c");
        assert_eq!(
            data_type_to_string(registry, classifier::ALIASES_TYPE, &Value::List(vec![])).unwrap(),
            ""
        );
    }

    #[test]
    fn test_restriction_validates_pattern() {
        let registry = fes20().unwrap();
        let ok = Value::String("extension:Near".into());
        let bad = Value::String("Near".into());
        let member1 = TypeRef::Classifier(classifier::SPATIAL_OPERATOR_NAME_TYPE_MEMBER1);
        assert!(validate_typed(registry, &member1, &ok).is_ok());
        assert!(validate_typed(registry, &member1, &bad).is_err());
        assert!(validate_typed(registry, &TypeRef::Xml(XmlType::String), &bad).is_ok());
    }

    #[test]
    fn test_union_to_string_picks_matching_member() {
        let registry = fes20().unwrap();
        let version = Value::Integer(4);
        assert_eq!(data_type_to_string(registry, classifier::VERSION_TYPE, &version).unwrap(), "4");
        let err = data_type_to_string(registry, classifier::VERSION_TYPE, &Value::Boolean(true)).unwrap_err();
        assert!(err.to_string().contains("Invalid value: 'true' for datatype :VersionType"));
    }
}
