//! Comparison, spatial and temporal operators, and resource ids

use super::expression::{
    list_group_value, set_list_group, set_single_group, single_expression_object, single_group_value, Expression,
};
use super::object::{plain_model_object, ModelObject};
use super::slot::Slot;
use super::value::{AnyElement, Value};
use crate::datatypes::{MatchAction, Version, XmlDateTime};
use crate::error::{Error, Result};
use crate::registry::ids::*;
use crate::registry::{ClassifierId, FeatureId};

// ============================================================================
// Comparison operators
// ============================================================================

/// `PropertyIsEqualTo` and the other binary comparisons
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinaryComparisonOpType {
    /// The two operands
    pub expressions: Vec<Expression>,
    /// How multi-valued properties are matched; `Any` when unset
    pub match_action: Option<MatchAction>,
    /// Case-sensitive string comparison; `true` when unset
    pub match_case: Option<bool>,
}

impl BinaryComparisonOpType {
    /// Comparison of two expressions
    pub fn new(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self {
            expressions: vec![left.into(), right.into()],
            ..Self::default()
        }
    }

    /// Effective match action
    pub fn match_action(&self) -> MatchAction {
        self.match_action.unwrap_or_default()
    }

    /// Effective case sensitivity
    pub fn match_case(&self) -> bool {
        self.match_case.unwrap_or(true)
    }
}

impl ModelObject for BinaryComparisonOpType {
    fn class_id(&self) -> ClassifierId {
        classifier::BINARY_COMPARISON_OP_TYPE
    }

    fn class_name(&self) -> &'static str {
        "BinaryComparisonOpType"
    }

    fn get_feature(&self, feature: FeatureId, _resolve: bool, core: bool) -> Result<Value> {
        use binary_comparison_op_type as f;
        match feature {
            f::EXPRESSION_GROUP => Ok(list_group_value(&self.expressions, core)),
            f::EXPRESSION => Ok(list_group_value(&self.expressions, false)),
            f::MATCH_ACTION => Ok(Value::Enum(self.match_action().into())),
            f::MATCH_CASE => Ok(Value::Boolean(self.match_case())),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn set_feature(&mut self, feature: FeatureId, value: Value) -> Result<()> {
        use binary_comparison_op_type as f;
        match feature {
            f::EXPRESSION_GROUP => set_list_group(&mut self.expressions, value, "expressionGroup"),
            f::EXPRESSION => Err(Error::not_changeable(self.class_name(), "expression")),
            f::MATCH_ACTION => {
                self.match_action = value.into_enum("matchAction")?;
                Ok(())
            }
            f::MATCH_CASE => self.match_case.set_value(value, "matchCase"),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn unset_feature(&mut self, feature: FeatureId) -> Result<()> {
        use binary_comparison_op_type as f;
        match feature {
            f::EXPRESSION_GROUP => self.expressions.clear(),
            f::EXPRESSION => return Err(Error::not_changeable(self.class_name(), "expression")),
            f::MATCH_ACTION => self.match_action = None,
            f::MATCH_CASE => self.match_case = None,
            _ => return Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
        Ok(())
    }

    fn is_feature_set(&self, feature: FeatureId) -> Result<bool> {
        use binary_comparison_op_type as f;
        match feature {
            f::EXPRESSION_GROUP | f::EXPRESSION => Ok(!self.expressions.is_empty()),
            f::MATCH_ACTION => Ok(self.match_action.is_some()),
            f::MATCH_CASE => Ok(self.match_case.is_some()),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }
}

/// `PropertyIsLike`: pattern match of a property against a literal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyIsLikeType {
    /// Property and pattern
    pub expressions: Vec<Expression>,
    /// Escape character of the pattern
    pub escape_char: Option<String>,
    /// Single-character wildcard
    pub single_char: Option<String>,
    /// Multi-character wildcard
    pub wild_card: Option<String>,
}

impl PropertyIsLikeType {
    /// Match `path` against `pattern` with `*`, `#` and `!` as wildcard,
    /// single character and escape
    pub fn new(path: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            expressions: vec![Expression::value_reference(path), Expression::literal(pattern)],
            escape_char: Some("!".to_string()),
            single_char: Some("#".to_string()),
            wild_card: Some("*".to_string()),
        }
    }
}

impl ModelObject for PropertyIsLikeType {
    fn class_id(&self) -> ClassifierId {
        classifier::PROPERTY_IS_LIKE_TYPE
    }

    fn class_name(&self) -> &'static str {
        "PropertyIsLikeType"
    }

    fn get_feature(&self, feature: FeatureId, _resolve: bool, core: bool) -> Result<Value> {
        use property_is_like_type as f;
        match feature {
            f::EXPRESSION_GROUP => Ok(list_group_value(&self.expressions, core)),
            f::EXPRESSION => Ok(list_group_value(&self.expressions, false)),
            f::ESCAPE_CHAR => Ok(self.escape_char.get_value()),
            f::SINGLE_CHAR => Ok(self.single_char.get_value()),
            f::WILD_CARD => Ok(self.wild_card.get_value()),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn set_feature(&mut self, feature: FeatureId, value: Value) -> Result<()> {
        use property_is_like_type as f;
        match feature {
            f::EXPRESSION_GROUP => set_list_group(&mut self.expressions, value, "expressionGroup"),
            f::EXPRESSION => Err(Error::not_changeable(self.class_name(), "expression")),
            f::ESCAPE_CHAR => self.escape_char.set_value(value, "escapeChar"),
            f::SINGLE_CHAR => self.single_char.set_value(value, "singleChar"),
            f::WILD_CARD => self.wild_card.set_value(value, "wildCard"),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn unset_feature(&mut self, feature: FeatureId) -> Result<()> {
        use property_is_like_type as f;
        match feature {
            f::EXPRESSION_GROUP => self.expressions.clear(),
            f::EXPRESSION => return Err(Error::not_changeable(self.class_name(), "expression")),
            f::ESCAPE_CHAR => self.escape_char = None,
            f::SINGLE_CHAR => self.single_char = None,
            f::WILD_CARD => self.wild_card = None,
            _ => return Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
        Ok(())
    }

    fn is_feature_set(&self, feature: FeatureId) -> Result<bool> {
        use property_is_like_type as f;
        match feature {
            f::EXPRESSION_GROUP | f::EXPRESSION => Ok(!self.expressions.is_empty()),
            f::ESCAPE_CHAR => Ok(self.escape_char.is_some()),
            f::SINGLE_CHAR => Ok(self.single_char.is_some()),
            f::WILD_CARD => Ok(self.wild_card.is_some()),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }
}

/// `PropertyIsNil`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyIsNilType {
    /// Tested expression
    pub expression: Option<Expression>,
    /// Required nil reason, if any
    pub nil_reason: Option<String>,
}

impl ModelObject for PropertyIsNilType {
    fn class_id(&self) -> ClassifierId {
        classifier::PROPERTY_IS_NIL_TYPE
    }

    fn class_name(&self) -> &'static str {
        "PropertyIsNilType"
    }

    fn get_feature(&self, feature: FeatureId, _resolve: bool, core: bool) -> Result<Value> {
        use property_is_nil_type as f;
        match feature {
            f::EXPRESSION_GROUP => Ok(single_group_value(&self.expression, core)),
            f::EXPRESSION => Ok(single_group_value(&self.expression, false)),
            f::NIL_REASON => Ok(self.nil_reason.get_value()),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn set_feature(&mut self, feature: FeatureId, value: Value) -> Result<()> {
        use property_is_nil_type as f;
        match feature {
            f::EXPRESSION_GROUP => set_single_group(&mut self.expression, value, "expressionGroup"),
            f::EXPRESSION => Err(Error::not_changeable(self.class_name(), "expression")),
            f::NIL_REASON => self.nil_reason.set_value(value, "nilReason"),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn unset_feature(&mut self, feature: FeatureId) -> Result<()> {
        use property_is_nil_type as f;
        match feature {
            f::EXPRESSION_GROUP => self.expression = None,
            f::EXPRESSION => return Err(Error::not_changeable(self.class_name(), "expression")),
            f::NIL_REASON => self.nil_reason = None,
            _ => return Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
        Ok(())
    }

    fn is_feature_set(&self, feature: FeatureId) -> Result<bool> {
        use property_is_nil_type as f;
        match feature {
            f::EXPRESSION_GROUP | f::EXPRESSION => Ok(self.expression.is_some()),
            f::NIL_REASON => Ok(self.nil_reason.is_some()),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }
}

/// `PropertyIsNull`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyIsNullType {
    /// Tested expression
    pub expression: Option<Expression>,
}

single_expression_object!(PropertyIsNullType, classifier::PROPERTY_IS_NULL_TYPE, "PropertyIsNullType");

/// `LowerBoundary` of `PropertyIsBetween`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LowerBoundaryType {
    /// Boundary value
    pub expression: Option<Expression>,
}

single_expression_object!(LowerBoundaryType, classifier::LOWER_BOUNDARY_TYPE, "LowerBoundaryType");

/// `UpperBoundary` of `PropertyIsBetween`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpperBoundaryType {
    /// Boundary value
    pub expression: Option<Expression>,
}

single_expression_object!(UpperBoundaryType, classifier::UPPER_BOUNDARY_TYPE, "UpperBoundaryType");

/// `PropertyIsBetween`: inclusive range test
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyIsBetweenType {
    /// Tested expression
    pub expression: Option<Expression>,
    /// Lower bound
    pub lower_boundary: Option<LowerBoundaryType>,
    /// Upper bound
    pub upper_boundary: Option<UpperBoundaryType>,
}

impl PropertyIsBetweenType {
    /// Range test of `expression` between two bounds
    pub fn new(expression: impl Into<Expression>, lower: impl Into<Expression>, upper: impl Into<Expression>) -> Self {
        Self {
            expression: Some(expression.into()),
            lower_boundary: Some(LowerBoundaryType {
                expression: Some(lower.into()),
            }),
            upper_boundary: Some(UpperBoundaryType {
                expression: Some(upper.into()),
            }),
        }
    }
}

impl ModelObject for PropertyIsBetweenType {
    fn class_id(&self) -> ClassifierId {
        classifier::PROPERTY_IS_BETWEEN_TYPE
    }

    fn class_name(&self) -> &'static str {
        "PropertyIsBetweenType"
    }

    fn get_feature(&self, feature: FeatureId, _resolve: bool, core: bool) -> Result<Value> {
        use property_is_between_type as f;
        match feature {
            f::EXPRESSION_GROUP => Ok(single_group_value(&self.expression, core)),
            f::EXPRESSION => Ok(single_group_value(&self.expression, false)),
            f::LOWER_BOUNDARY => Ok(self.lower_boundary.get_value()),
            f::UPPER_BOUNDARY => Ok(self.upper_boundary.get_value()),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn set_feature(&mut self, feature: FeatureId, value: Value) -> Result<()> {
        use property_is_between_type as f;
        match feature {
            f::EXPRESSION_GROUP => set_single_group(&mut self.expression, value, "expressionGroup"),
            f::EXPRESSION => Err(Error::not_changeable(self.class_name(), "expression")),
            f::LOWER_BOUNDARY => self.lower_boundary.set_value(value, "lowerBoundary"),
            f::UPPER_BOUNDARY => self.upper_boundary.set_value(value, "upperBoundary"),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn unset_feature(&mut self, feature: FeatureId) -> Result<()> {
        use property_is_between_type as f;
        match feature {
            f::EXPRESSION_GROUP => self.expression = None,
            f::EXPRESSION => return Err(Error::not_changeable(self.class_name(), "expression")),
            f::LOWER_BOUNDARY => self.lower_boundary = None,
            f::UPPER_BOUNDARY => self.upper_boundary = None,
            _ => return Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
        Ok(())
    }

    fn is_feature_set(&self, feature: FeatureId) -> Result<bool> {
        use property_is_between_type as f;
        match feature {
            f::EXPRESSION_GROUP | f::EXPRESSION => Ok(self.expression.is_some()),
            f::LOWER_BOUNDARY => Ok(self.lower_boundary.is_some()),
            f::UPPER_BOUNDARY => Ok(self.upper_boundary.is_some()),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }
}

// ============================================================================
// Spatial operators
// ============================================================================

/// `BBOX`: intersection with an envelope
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BboxType {
    /// Geometry property; the default geometry when absent
    pub expression: Option<Expression>,
    /// The envelope, outside the FES namespace
    pub any: Option<AnyElement>,
}

impl BboxType {
    /// Envelope test on a property
    pub fn new(path: impl Into<String>, envelope: AnyElement) -> Self {
        Self {
            expression: Some(Expression::value_reference(path)),
            any: Some(envelope),
        }
    }
}

impl ModelObject for BboxType {
    fn class_id(&self) -> ClassifierId {
        classifier::BBOX_TYPE
    }

    fn class_name(&self) -> &'static str {
        "BBOXType"
    }

    fn get_feature(&self, feature: FeatureId, _resolve: bool, core: bool) -> Result<Value> {
        use bbox_type as f;
        match feature {
            f::EXPRESSION_GROUP => Ok(single_group_value(&self.expression, core)),
            f::EXPRESSION => Ok(single_group_value(&self.expression, false)),
            f::ANY => Ok(self.any.get_value()),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn set_feature(&mut self, feature: FeatureId, value: Value) -> Result<()> {
        use bbox_type as f;
        match feature {
            f::EXPRESSION_GROUP => set_single_group(&mut self.expression, value, "expressionGroup"),
            f::EXPRESSION => Err(Error::not_changeable(self.class_name(), "expression")),
            f::ANY => self.any.set_value(value, "any"),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn unset_feature(&mut self, feature: FeatureId) -> Result<()> {
        use bbox_type as f;
        match feature {
            f::EXPRESSION_GROUP => self.expression = None,
            f::EXPRESSION => return Err(Error::not_changeable(self.class_name(), "expression")),
            f::ANY => self.any = None,
            _ => return Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
        Ok(())
    }

    fn is_feature_set(&self, feature: FeatureId) -> Result<bool> {
        use bbox_type as f;
        match feature {
            f::EXPRESSION_GROUP | f::EXPRESSION => Ok(self.expression.is_some()),
            f::ANY => Ok(self.any.is_some()),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }
}

/// Operands shared by the binary spatial and temporal operators
macro_rules! binary_operand_op {
    ($(#[$meta:meta])* $ty:ident, $class:path, $name:literal, $other:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $ty {
            /// Property the operator applies to
            pub value_reference: Option<String>,
            /// Operand given as an expression
            pub expression: Option<Expression>,
            #[doc = concat!("Operand given as ", $other, " content")]
            pub any: Option<AnyElement>,
        }

        impl $ty {
            /// Operator applied to a property and a foreign operand
            pub fn new(path: impl Into<String>, operand: AnyElement) -> Self {
                Self {
                    value_reference: Some(path.into()),
                    expression: None,
                    any: Some(operand),
                }
            }
        }

        impl ModelObject for $ty {
            fn class_id(&self) -> ClassifierId {
                $class
            }

            fn class_name(&self) -> &'static str {
                $name
            }

            fn get_feature(&self, feature: FeatureId, _resolve: bool, core: bool) -> Result<Value> {
                use binary_operand_op_type as f;
                match feature {
                    f::VALUE_REFERENCE => Ok(self.value_reference.get_value()),
                    f::EXPRESSION_GROUP => Ok(single_group_value(&self.expression, core)),
                    f::EXPRESSION => Ok(single_group_value(&self.expression, false)),
                    f::ANY => Ok(self.any.get_value()),
                    _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
                }
            }

            fn set_feature(&mut self, feature: FeatureId, value: Value) -> Result<()> {
                use binary_operand_op_type as f;
                match feature {
                    f::VALUE_REFERENCE => self.value_reference.set_value(value, "valueReference"),
                    f::EXPRESSION_GROUP => set_single_group(&mut self.expression, value, "expressionGroup"),
                    f::EXPRESSION => Err(Error::not_changeable(self.class_name(), "expression")),
                    f::ANY => self.any.set_value(value, "any"),
                    _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
                }
            }

            fn unset_feature(&mut self, feature: FeatureId) -> Result<()> {
                use binary_operand_op_type as f;
                match feature {
                    f::VALUE_REFERENCE => self.value_reference = None,
                    f::EXPRESSION_GROUP => self.expression = None,
                    f::EXPRESSION => return Err(Error::not_changeable(self.class_name(), "expression")),
                    f::ANY => self.any = None,
                    _ => return Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
                }
                Ok(())
            }

            fn is_feature_set(&self, feature: FeatureId) -> Result<bool> {
                use binary_operand_op_type as f;
                match feature {
                    f::VALUE_REFERENCE => Ok(self.value_reference.is_some()),
                    f::EXPRESSION_GROUP | f::EXPRESSION => Ok(self.expression.is_some()),
                    f::ANY => Ok(self.any.is_some()),
                    _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
                }
            }
        }
    };
}

binary_operand_op!(
    /// `Intersects`, `Within` and the other binary spatial operators
    BinarySpatialOpType,
    classifier::BINARY_SPATIAL_OP_TYPE,
    "BinarySpatialOpType",
    "geometry"
);

binary_operand_op!(
    /// `After`, `During` and the other binary temporal operators
    BinaryTemporalOpType,
    classifier::BINARY_TEMPORAL_OP_TYPE,
    "BinaryTemporalOpType",
    "temporal"
);

/// `DWithin` and `Beyond`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceBufferType {
    /// Geometry property
    pub expression: Option<Expression>,
    /// Reference geometry
    pub any: Option<AnyElement>,
    /// Buffer distance
    pub distance: Option<MeasureType>,
}

impl DistanceBufferType {
    /// Distance test between a property and a geometry
    pub fn new(path: impl Into<String>, geometry: AnyElement, distance: MeasureType) -> Self {
        Self {
            expression: Some(Expression::value_reference(path)),
            any: Some(geometry),
            distance: Some(distance),
        }
    }
}

impl ModelObject for DistanceBufferType {
    fn class_id(&self) -> ClassifierId {
        classifier::DISTANCE_BUFFER_TYPE
    }

    fn class_name(&self) -> &'static str {
        "DistanceBufferType"
    }

    fn get_feature(&self, feature: FeatureId, _resolve: bool, core: bool) -> Result<Value> {
        use distance_buffer_type as f;
        match feature {
            f::EXPRESSION_GROUP => Ok(single_group_value(&self.expression, core)),
            f::EXPRESSION => Ok(single_group_value(&self.expression, false)),
            f::ANY => Ok(self.any.get_value()),
            f::DISTANCE => Ok(self.distance.get_value()),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn set_feature(&mut self, feature: FeatureId, value: Value) -> Result<()> {
        use distance_buffer_type as f;
        match feature {
            f::EXPRESSION_GROUP => set_single_group(&mut self.expression, value, "expressionGroup"),
            f::EXPRESSION => Err(Error::not_changeable(self.class_name(), "expression")),
            f::ANY => self.any.set_value(value, "any"),
            f::DISTANCE => self.distance.set_value(value, "distance"),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn unset_feature(&mut self, feature: FeatureId) -> Result<()> {
        use distance_buffer_type as f;
        match feature {
            f::EXPRESSION_GROUP => self.expression = None,
            f::EXPRESSION => return Err(Error::not_changeable(self.class_name(), "expression")),
            f::ANY => self.any = None,
            f::DISTANCE => self.distance = None,
            _ => return Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
        Ok(())
    }

    fn is_feature_set(&self, feature: FeatureId) -> Result<bool> {
        use distance_buffer_type as f;
        match feature {
            f::EXPRESSION_GROUP | f::EXPRESSION => Ok(self.expression.is_some()),
            f::ANY => Ok(self.any.is_some()),
            f::DISTANCE => Ok(self.distance.is_some()),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }
}

/// A quantity with its unit of measure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasureType {
    /// Magnitude; 0.0 when unset
    pub value: Option<f64>,
    /// Unit of measure, a symbol or a URI
    pub uom: Option<String>,
}

impl MeasureType {
    /// Measure with a value and a unit
    pub fn new(value: f64, uom: impl Into<String>) -> Self {
        Self {
            value: Some(value),
            uom: Some(uom.into()),
        }
    }
}

impl ModelObject for MeasureType {
    fn class_id(&self) -> ClassifierId {
        classifier::MEASURE_TYPE
    }

    fn class_name(&self) -> &'static str {
        "MeasureType"
    }

    fn get_feature(&self, feature: FeatureId, _resolve: bool, _core: bool) -> Result<Value> {
        match feature {
            measure_type::VALUE => Ok(Value::Double(self.value.unwrap_or(0.0))),
            measure_type::UOM => Ok(self.uom.get_value()),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn set_feature(&mut self, feature: FeatureId, value: Value) -> Result<()> {
        match feature {
            measure_type::VALUE => self.value.set_value(value, "value"),
            measure_type::UOM => self.uom.set_value(value, "uom"),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn unset_feature(&mut self, feature: FeatureId) -> Result<()> {
        match feature {
            measure_type::VALUE => self.value = None,
            measure_type::UOM => self.uom = None,
            _ => return Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
        Ok(())
    }

    fn is_feature_set(&self, feature: FeatureId) -> Result<bool> {
        match feature {
            measure_type::VALUE => Ok(self.value.is_some()),
            measure_type::UOM => Ok(self.uom.is_some()),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }
}

// ============================================================================
// Identifiers
// ============================================================================

/// `ResourceId`: selects one resource, optionally one of its versions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceIdType {
    /// End of the version validity range
    pub end_date: Option<XmlDateTime>,
    /// Identifier of the previous version
    pub previous_rid: Option<String>,
    /// Resource identifier
    pub rid: Option<String>,
    /// Start of the version validity range
    pub start_date: Option<XmlDateTime>,
    /// Requested version
    pub version: Option<Version>,
}

impl ResourceIdType {
    /// Reference to a resource by id
    pub fn new(rid: impl Into<String>) -> Self {
        Self {
            rid: Some(rid.into()),
            ..Self::default()
        }
    }

    /// Select a version
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }
}

plain_model_object!(ResourceIdType, classifier::RESOURCE_ID_TYPE, "ResourceIdType" {
    resource_id_type::END_DATE => end_date,
    resource_id_type::PREVIOUS_RID => previous_rid,
    resource_id_type::RID => rid,
    resource_id_type::START_DATE => start_date,
    resource_id_type::VERSION => version,
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::VersionAction;
    use crate::model::element::Element;
    use crate::namespaces::{QName, GML_NAMESPACE};

    fn point() -> AnyElement {
        AnyElement::new(QName::namespaced(GML_NAMESPACE, "Point"), "<gml:Point/>")
    }

    #[test]
    fn test_match_defaults_are_reported_but_not_set() {
        let mut op = BinaryComparisonOpType::new(Expression::value_reference("name"), Expression::literal("x"));
        use binary_comparison_op_type as f;
        assert_eq!(op.get(f::MATCH_ACTION).unwrap(), Value::Enum(MatchAction::Any.into()));
        assert_eq!(op.get(f::MATCH_CASE).unwrap(), Value::Boolean(true));
        assert!(!op.is_feature_set(f::MATCH_CASE).unwrap());

        op.set_feature(f::MATCH_CASE, Value::Boolean(true)).unwrap();
        assert!(op.is_feature_set(f::MATCH_CASE).unwrap());
        op.set_feature(f::MATCH_ACTION, Value::Enum(MatchAction::All.into())).unwrap();
        assert_eq!(op.match_action(), MatchAction::All);

        op.unset_feature(f::MATCH_ACTION).unwrap();
        assert!(!op.is_feature_set(f::MATCH_ACTION).unwrap());
        assert_eq!(op.match_action(), MatchAction::Any);
    }

    #[test]
    fn test_comparison_operands_as_group_and_list() {
        let op = BinaryComparisonOpType::new(Expression::value_reference("age"), Expression::literal("18"));
        use binary_comparison_op_type as f;
        let Value::Group(entries) = op.get_feature(f::EXPRESSION_GROUP, true, true).unwrap() else {
            panic!("expected group entries");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].element, Element::ValueReference);
        assert_eq!(entries[1].element, Element::Literal);

        let Value::List(items) = op.get(f::EXPRESSION).unwrap() else {
            panic!("expected a list");
        };
        assert_eq!(items[0], Value::from("age"));
    }

    #[test]
    fn test_derived_expression_is_read_only() {
        let mut between = PropertyIsBetweenType::new(
            Expression::value_reference("depth"),
            Expression::literal("100"),
            Expression::literal("200"),
        );
        use property_is_between_type as f;
        assert!(matches!(
            between.unset_feature(f::EXPRESSION),
            Err(Error::NotChangeable { .. })
        ));
        between.unset_feature(f::EXPRESSION_GROUP).unwrap();
        assert!(!between.is_feature_set(f::EXPRESSION).unwrap());
        assert!(between.is_feature_set(f::LOWER_BOUNDARY).unwrap());
    }

    #[test]
    fn test_measure_value_defaults_to_zero() {
        let mut measure = MeasureType::default();
        assert_eq!(measure.get(measure_type::VALUE).unwrap(), Value::Double(0.0));
        assert!(!measure.is_feature_set(measure_type::VALUE).unwrap());
        measure.set_feature(measure_type::VALUE, Value::Double(10.5)).unwrap();
        assert_eq!(measure.value, Some(10.5));
    }

    #[test]
    fn test_binary_spatial_operands() {
        let mut op = BinarySpatialOpType::new("geom", point());
        use binary_spatial_op_type as f;
        assert_eq!(op.get(f::VALUE_REFERENCE).unwrap(), Value::from("geom"));
        assert_eq!(op.get(f::EXPRESSION).unwrap(), Value::Null);
        assert!(op.is_feature_set(f::ANY).unwrap());
        op.unset_feature(f::ANY).unwrap();
        assert!(op.any.is_none());
    }

    #[test]
    fn test_resource_id_version_forms() {
        let mut rid = ResourceIdType::new("road.42");
        use resource_id_type as f;
        rid.set_feature(f::VERSION, Value::Enum(VersionAction::Last.into())).unwrap();
        assert_eq!(rid.version, Some(Version::Action(VersionAction::Last)));
        rid.set_feature(f::VERSION, Value::Integer(3)).unwrap();
        assert_eq!(rid.get(f::VERSION).unwrap(), Value::Integer(3));
        assert!(rid.set_feature(f::VERSION, Value::from("3")).is_err());
    }

    #[test]
    fn test_single_expression_classes_share_ids() {
        let mut null = PropertyIsNullType::default();
        let group = Value::Group(vec![Expression::value_reference("a").to_entry()]);
        null.set_feature(property_is_null_type::EXPRESSION_GROUP, group).unwrap();
        assert_eq!(null.get(property_is_null_type::EXPRESSION).unwrap(), Value::from("a"));
        assert!(matches!(null.get(2), Err(Error::UnknownFeature { .. })));
    }
}
