//! Filter capabilities
//!
//! The `fes:Filter_Capabilities` section a service advertises: conformance
//! constraints, supported identifiers, operators, operands and functions.
//! All classes here hold plain features only.

use super::object::plain_model_object;
use super::value::Value;
use crate::datatypes::{ComparisonOperatorName, OperatorName, SpatialOperatorName, TemporalOperatorName};
use crate::error::{Error, Result};
use crate::model::slot::Slot;
use crate::model::ModelObject;
use crate::namespaces::QName;
use crate::ows::{DomainType, MetadataType};
use crate::registry::ids::*;
use crate::registry::{ClassifierId, FeatureId};

// ============================================================================
// Top level
// ============================================================================

/// `fes:Filter_Capabilities`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCapabilitiesType {
    /// Required conformance section
    pub conformance: Option<ConformanceType>,
    /// `fes:Id_Capabilities`
    pub id_capabilities: Option<IdCapabilitiesType>,
    /// `fes:Scalar_Capabilities`
    pub scalar_capabilities: Option<ScalarCapabilitiesType>,
    /// `fes:Spatial_Capabilities`
    pub spatial_capabilities: Option<SpatialCapabilitiesType>,
    /// `fes:Temporal_Capabilities`
    pub temporal_capabilities: Option<TemporalCapabilitiesType>,
    /// `fes:Functions`
    pub functions: Option<AvailableFunctionsType>,
    /// `fes:Extended_Capabilities`
    pub extended_capabilities: Option<ExtendedCapabilitiesType>,
}

impl FilterCapabilitiesType {
    /// Capabilities with the given conformance section
    pub fn new(conformance: ConformanceType) -> Self {
        Self {
            conformance: Some(conformance),
            ..Default::default()
        }
    }

    /// Set the scalar capabilities
    pub fn with_scalar_capabilities(mut self, scalar: ScalarCapabilitiesType) -> Self {
        self.scalar_capabilities = Some(scalar);
        self
    }

    /// Set the spatial capabilities
    pub fn with_spatial_capabilities(mut self, spatial: SpatialCapabilitiesType) -> Self {
        self.spatial_capabilities = Some(spatial);
        self
    }

    /// Set the temporal capabilities
    pub fn with_temporal_capabilities(mut self, temporal: TemporalCapabilitiesType) -> Self {
        self.temporal_capabilities = Some(temporal);
        self
    }
}

plain_model_object!(FilterCapabilitiesType, classifier::FILTER_CAPABILITIES_TYPE, "FilterCapabilitiesType" {
    filter_capabilities_type::CONFORMANCE => conformance,
    filter_capabilities_type::ID_CAPABILITIES => id_capabilities,
    filter_capabilities_type::SCALAR_CAPABILITIES => scalar_capabilities,
    filter_capabilities_type::SPATIAL_CAPABILITIES => spatial_capabilities,
    filter_capabilities_type::TEMPORAL_CAPABILITIES => temporal_capabilities,
    filter_capabilities_type::FUNCTIONS => functions,
    filter_capabilities_type::EXTENDED_CAPABILITIES => extended_capabilities,
});

/// `fes:Conformance`: one `ows:Constraint` per conformance class
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConformanceType {
    /// Constraints, at least one
    pub constraint: Vec<DomainType>,
}

impl ConformanceType {
    /// Add a TRUE/FALSE conformance flag
    pub fn with_flag(mut self, name: &str, enabled: bool) -> Self {
        self.constraint.push(DomainType::flag(name, enabled));
        self
    }

    /// Value of a conformance flag; `None` when not declared
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.constraint
            .iter()
            .find(|c| c.name == name)
            .map(DomainType::is_enabled)
    }
}

plain_model_object!(ConformanceType, classifier::CONFORMANCE_TYPE, "ConformanceType" {
    conformance_type::CONSTRAINT => constraint,
});

// ============================================================================
// Identifiers
// ============================================================================

/// `fes:Id_Capabilities`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdCapabilitiesType {
    /// Supported identifier kinds
    pub resource_identifier: Vec<ResourceIdentifierType>,
}

plain_model_object!(IdCapabilitiesType, classifier::ID_CAPABILITIES_TYPE, "IdCapabilitiesType" {
    id_capabilities_type::RESOURCE_IDENTIFIER => resource_identifier,
});

/// `fes:ResourceIdentifier`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceIdentifierType {
    /// `ows:Metadata`
    pub metadata: Option<MetadataType>,
    /// Element name of the identifier, e.g. `fes:ResourceId`
    pub name: Option<QName>,
}

plain_model_object!(ResourceIdentifierType, classifier::RESOURCE_IDENTIFIER_TYPE, "ResourceIdentifierType" {
    resource_identifier_type::METADATA => metadata,
    resource_identifier_type::NAME => name,
});

// ============================================================================
// Scalar operators
// ============================================================================

/// `fes:Scalar_Capabilities`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScalarCapabilitiesType {
    /// Presence means And, Or and Not are supported
    pub logical_operators: Option<LogicalOperatorsType>,
    /// Supported comparison operators
    pub comparison_operators: Option<ComparisonOperatorsType>,
}

plain_model_object!(ScalarCapabilitiesType, classifier::SCALAR_CAPABILITIES_TYPE, "ScalarCapabilitiesType" {
    scalar_capabilities_type::LOGICAL_OPERATORS => logical_operators,
    scalar_capabilities_type::COMPARISON_OPERATORS => comparison_operators,
});

/// `fes:LogicalOperators`, an empty marker element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogicalOperatorsType;

plain_model_object!(LogicalOperatorsType, classifier::LOGICAL_OPERATORS_TYPE, "LogicalOperatorsType" {});

/// `fes:ComparisonOperators`.
///
/// The operators form a repeated model group; `group` and
/// `comparisonOperator` are two views of the same list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonOperatorsType {
    /// Operators in document order
    pub comparison_operator: Vec<ComparisonOperatorType>,
}

impl ComparisonOperatorsType {
    /// Operators named by the standard
    pub fn from_names(names: impl IntoIterator<Item = ComparisonOperatorName>) -> Self {
        Self {
            comparison_operator: names.into_iter().map(ComparisonOperatorType::standard).collect(),
        }
    }
}

impl ModelObject for ComparisonOperatorsType {
    fn class_id(&self) -> ClassifierId {
        classifier::COMPARISON_OPERATORS_TYPE
    }

    fn class_name(&self) -> &'static str {
        "ComparisonOperatorsType"
    }

    fn get_feature(&self, feature: FeatureId, _resolve: bool, _core: bool) -> Result<Value> {
        match feature {
            comparison_operators_type::GROUP | comparison_operators_type::COMPARISON_OPERATOR => {
                Ok(self.comparison_operator.get_value())
            }
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn set_feature(&mut self, feature: FeatureId, value: Value) -> Result<()> {
        match feature {
            comparison_operators_type::GROUP => self.comparison_operator.set_value(value, "group"),
            comparison_operators_type::COMPARISON_OPERATOR => {
                self.comparison_operator.set_value(value, "comparisonOperator")
            }
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn unset_feature(&mut self, feature: FeatureId) -> Result<()> {
        match feature {
            comparison_operators_type::GROUP | comparison_operators_type::COMPARISON_OPERATOR => {
                self.comparison_operator.clear();
                Ok(())
            }
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn is_feature_set(&self, feature: FeatureId) -> Result<bool> {
        match feature {
            comparison_operators_type::GROUP | comparison_operators_type::COMPARISON_OPERATOR => {
                Ok(!self.comparison_operator.is_empty())
            }
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }
}

/// `fes:ComparisonOperator`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonOperatorType {
    /// Standard or `extension:` name
    pub name: Option<OperatorName<ComparisonOperatorName>>,
}

impl ComparisonOperatorType {
    /// Operator named by the standard
    pub fn standard(name: ComparisonOperatorName) -> Self {
        Self {
            name: Some(OperatorName::Standard(name)),
        }
    }
}

plain_model_object!(ComparisonOperatorType, classifier::COMPARISON_OPERATOR_TYPE, "ComparisonOperatorType" {
    comparison_operator_type::NAME => name,
});

// ============================================================================
// Spatial operators
// ============================================================================

/// `fes:Spatial_Capabilities`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpatialCapabilitiesType {
    /// Supported geometry types
    pub geometry_operands: Option<GeometryOperandsType>,
    /// Supported spatial operators
    pub spatial_operators: Option<SpatialOperatorsType>,
}

plain_model_object!(SpatialCapabilitiesType, classifier::SPATIAL_CAPABILITIES_TYPE, "SpatialCapabilitiesType" {
    spatial_capabilities_type::GEOMETRY_OPERANDS => geometry_operands,
    spatial_capabilities_type::SPATIAL_OPERATORS => spatial_operators,
});

/// `fes:GeometryOperands`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryOperandsType {
    /// Geometry types, at least one
    pub geometry_operand: Vec<GeometryOperandType>,
}

impl GeometryOperandsType {
    /// Operands from geometry type names
    pub fn from_names(names: impl IntoIterator<Item = QName>) -> Self {
        Self {
            geometry_operand: names
                .into_iter()
                .map(|name| GeometryOperandType { name: Some(name) })
                .collect(),
        }
    }
}

plain_model_object!(GeometryOperandsType, classifier::GEOMETRY_OPERANDS_TYPE, "GeometryOperandsType" {
    geometry_operands_type::GEOMETRY_OPERAND => geometry_operand,
});

/// `fes:GeometryOperand`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryOperandType {
    /// Geometry type, e.g. `gml:Envelope`
    pub name: Option<QName>,
}

plain_model_object!(GeometryOperandType, classifier::GEOMETRY_OPERAND_TYPE, "GeometryOperandType" {
    geometry_operand_type::NAME => name,
});

/// `fes:SpatialOperators`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpatialOperatorsType {
    /// Operators, at least one
    pub spatial_operator: Vec<SpatialOperatorType>,
}

impl SpatialOperatorsType {
    /// Operators named by the standard
    pub fn from_names(names: impl IntoIterator<Item = SpatialOperatorName>) -> Self {
        Self {
            spatial_operator: names
                .into_iter()
                .map(|name| SpatialOperatorType {
                    name: Some(OperatorName::Standard(name)),
                    ..Default::default()
                })
                .collect(),
        }
    }
}

plain_model_object!(SpatialOperatorsType, classifier::SPATIAL_OPERATORS_TYPE, "SpatialOperatorsType" {
    spatial_operators_type::SPATIAL_OPERATOR => spatial_operator,
});

/// `fes:SpatialOperator`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpatialOperatorType {
    /// Operand restriction for this operator
    pub geometry_operands: Option<GeometryOperandsType>,
    /// Standard or `extension:` name
    pub name: Option<OperatorName<SpatialOperatorName>>,
}

plain_model_object!(SpatialOperatorType, classifier::SPATIAL_OPERATOR_TYPE, "SpatialOperatorType" {
    spatial_operator_type::GEOMETRY_OPERANDS => geometry_operands,
    spatial_operator_type::NAME => name,
});

// ============================================================================
// Temporal operators
// ============================================================================

/// `fes:Temporal_Capabilities`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemporalCapabilitiesType {
    /// Supported temporal types
    pub temporal_operands: Option<TemporalOperandsType>,
    /// Supported temporal operators
    pub temporal_operators: Option<TemporalOperatorsType>,
}

plain_model_object!(TemporalCapabilitiesType, classifier::TEMPORAL_CAPABILITIES_TYPE, "TemporalCapabilitiesType" {
    temporal_capabilities_type::TEMPORAL_OPERANDS => temporal_operands,
    temporal_capabilities_type::TEMPORAL_OPERATORS => temporal_operators,
});

/// `fes:TemporalOperands`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemporalOperandsType {
    /// Temporal types, at least one
    pub temporal_operand: Vec<TemporalOperandType>,
}

plain_model_object!(TemporalOperandsType, classifier::TEMPORAL_OPERANDS_TYPE, "TemporalOperandsType" {
    temporal_operands_type::TEMPORAL_OPERAND => temporal_operand,
});

/// `fes:TemporalOperand`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemporalOperandType {
    /// Temporal type, e.g. `gml:TimeInstant`
    pub name: Option<QName>,
}

plain_model_object!(TemporalOperandType, classifier::TEMPORAL_OPERAND_TYPE, "TemporalOperandType" {
    temporal_operand_type::NAME => name,
});

/// `fes:TemporalOperators`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemporalOperatorsType {
    /// Operators, at least one
    pub temporal_operator: Vec<TemporalOperatorType>,
}

impl TemporalOperatorsType {
    /// Operators named by the standard
    pub fn from_names(names: impl IntoIterator<Item = TemporalOperatorName>) -> Self {
        Self {
            temporal_operator: names
                .into_iter()
                .map(|name| TemporalOperatorType {
                    name: Some(OperatorName::Standard(name)),
                    ..Default::default()
                })
                .collect(),
        }
    }
}

plain_model_object!(TemporalOperatorsType, classifier::TEMPORAL_OPERATORS_TYPE, "TemporalOperatorsType" {
    temporal_operators_type::TEMPORAL_OPERATOR => temporal_operator,
});

/// `fes:TemporalOperator`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemporalOperatorType {
    /// Operand restriction for this operator
    pub temporal_operands: Option<TemporalOperandsType>,
    /// Standard or `extension:` name
    pub name: Option<OperatorName<TemporalOperatorName>>,
}

plain_model_object!(TemporalOperatorType, classifier::TEMPORAL_OPERATOR_TYPE, "TemporalOperatorType" {
    temporal_operator_type::TEMPORAL_OPERANDS => temporal_operands,
    temporal_operator_type::NAME => name,
});

// ============================================================================
// Functions
// ============================================================================

/// `fes:Functions`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailableFunctionsType {
    /// Functions, at least one
    pub function: Vec<AvailableFunctionType>,
}

plain_model_object!(AvailableFunctionsType, classifier::AVAILABLE_FUNCTIONS_TYPE, "AvailableFunctionsType" {
    available_functions_type::FUNCTION => function,
});

/// `fes:Function` inside the capabilities
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailableFunctionType {
    /// `ows:Metadata`
    pub metadata: Option<MetadataType>,
    /// Return type
    pub returns: Option<QName>,
    /// Declared arguments
    pub arguments: Option<ArgumentsType>,
    /// Function name
    pub name: Option<String>,
}

impl AvailableFunctionType {
    /// Function with a name and return type
    pub fn new(name: impl Into<String>, returns: QName) -> Self {
        Self {
            name: Some(name.into()),
            returns: Some(returns),
            ..Default::default()
        }
    }

    /// Append an argument
    pub fn with_argument(mut self, name: impl Into<String>, type_: QName) -> Self {
        self.arguments
            .get_or_insert_with(ArgumentsType::default)
            .argument
            .push(ArgumentType {
                metadata: None,
                type_: Some(type_),
                name: Some(name.into()),
            });
        self
    }
}

plain_model_object!(AvailableFunctionType, classifier::AVAILABLE_FUNCTION_TYPE, "AvailableFunctionType" {
    available_function_type::METADATA => metadata,
    available_function_type::RETURNS => returns,
    available_function_type::ARGUMENTS => arguments,
    available_function_type::NAME => name,
});

/// `fes:Arguments`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentsType {
    /// Arguments in call order
    pub argument: Vec<ArgumentType>,
}

plain_model_object!(ArgumentsType, classifier::ARGUMENTS_TYPE, "ArgumentsType" {
    arguments_type::ARGUMENT => argument,
});

/// `fes:Argument`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentType {
    /// `ows:Metadata`
    pub metadata: Option<MetadataType>,
    /// Argument type
    pub type_: Option<QName>,
    /// Argument name
    pub name: Option<String>,
}

plain_model_object!(ArgumentType, classifier::ARGUMENT_TYPE, "ArgumentType" {
    argument_type::METADATA => metadata,
    argument_type::TYPE => type_,
    argument_type::NAME => name,
});

// ============================================================================
// Extensions
// ============================================================================

/// `fes:Extended_Capabilities`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtendedCapabilitiesType {
    /// Vendor operators
    pub additional_operators: Option<AdditionalOperatorsType>,
}

plain_model_object!(ExtendedCapabilitiesType, classifier::EXTENDED_CAPABILITIES_TYPE, "ExtendedCapabilitiesType" {
    extended_capabilities_type::ADDITIONAL_OPERATORS => additional_operators,
});

/// `fes:AdditionalOperators`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdditionalOperatorsType {
    /// Vendor operators
    pub operator: Vec<ExtensionOperatorType>,
}

plain_model_object!(AdditionalOperatorsType, classifier::ADDITIONAL_OPERATORS_TYPE, "AdditionalOperatorsType" {
    additional_operators_type::OPERATOR => operator,
});

/// `fes:Operator`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtensionOperatorType {
    /// Operator element name
    pub name: Option<QName>,
}

plain_model_object!(ExtensionOperatorType, classifier::EXTENSION_OPERATOR_TYPE, "ExtensionOperatorType" {
    extension_operator_type::NAME => name,
});
