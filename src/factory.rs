//! Object factory
//!
//! Creates empty model objects by classifier id and converts simple-type
//! values to and from their lexical form. The class mapping is closed:
//! every concrete class of the package has an arm, and any other id is an
//! error rather than a missing object.

use crate::datatypes;
use crate::error::{Error, Result};
use crate::model::*;
use crate::registry::ids::classifier as c;
use crate::registry::{fes20, ClassifierId, Registry};

/// Factory bound to a registry
#[derive(Debug, Clone, Copy)]
pub struct Fes20Factory<'r> {
    registry: &'r Registry,
}

impl Fes20Factory<'static> {
    /// Factory over the process-wide FES 2.0 package
    pub fn global() -> Result<Self> {
        Ok(Self::new(fes20()?))
    }
}

impl<'r> Fes20Factory<'r> {
    /// Factory over `registry`
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Registry the factory reads
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Fresh, empty instance of a concrete class
    pub fn create(&self, class: ClassifierId) -> Result<FesObject> {
        let descriptor = self.registry.class(class)?;
        if descriptor.is_abstract {
            return Err(Error::UnknownClassifier(format!(
                "The class '{}' is not a valid classifier",
                descriptor.name
            )));
        }
        let object = match class {
            c::ADDITIONAL_OPERATORS_TYPE => AdditionalOperatorsType::default().into(),
            c::ARGUMENTS_TYPE => ArgumentsType::default().into(),
            c::ARGUMENT_TYPE => ArgumentType::default().into(),
            c::AVAILABLE_FUNCTIONS_TYPE => AvailableFunctionsType::default().into(),
            c::AVAILABLE_FUNCTION_TYPE => AvailableFunctionType::default().into(),
            c::BBOX_TYPE => BboxType::default().into(),
            c::BINARY_COMPARISON_OP_TYPE => BinaryComparisonOpType::default().into(),
            c::BINARY_LOGIC_OP_TYPE => BinaryLogicOpType::default().into(),
            c::BINARY_SPATIAL_OP_TYPE => BinarySpatialOpType::default().into(),
            c::BINARY_TEMPORAL_OP_TYPE => BinaryTemporalOpType::default().into(),
            c::COMPARISON_OPERATORS_TYPE => ComparisonOperatorsType::default().into(),
            c::COMPARISON_OPERATOR_TYPE => ComparisonOperatorType::default().into(),
            c::CONFORMANCE_TYPE => ConformanceType::default().into(),
            c::DISTANCE_BUFFER_TYPE => DistanceBufferType::default().into(),
            c::DOCUMENT_ROOT => DocumentRoot::default().into(),
            c::EXTENDED_CAPABILITIES_TYPE => ExtendedCapabilitiesType::default().into(),
            c::EXTENSION_OPERATOR_TYPE => ExtensionOperatorType::default().into(),
            c::FILTER_CAPABILITIES_TYPE => FilterCapabilitiesType::default().into(),
            c::FILTER_TYPE => FilterType::default().into(),
            c::FUNCTION_TYPE => FunctionType::default().into(),
            c::GEOMETRY_OPERANDS_TYPE => GeometryOperandsType::default().into(),
            c::GEOMETRY_OPERAND_TYPE => GeometryOperandType::default().into(),
            c::ID_CAPABILITIES_TYPE => IdCapabilitiesType::default().into(),
            c::LITERAL_TYPE => LiteralType::default().into(),
            c::LOGICAL_OPERATORS_TYPE => LogicalOperatorsType::default().into(),
            c::LOWER_BOUNDARY_TYPE => LowerBoundaryType::default().into(),
            c::MEASURE_TYPE => MeasureType::default().into(),
            c::PROPERTY_IS_BETWEEN_TYPE => PropertyIsBetweenType::default().into(),
            c::PROPERTY_IS_LIKE_TYPE => PropertyIsLikeType::default().into(),
            c::PROPERTY_IS_NIL_TYPE => PropertyIsNilType::default().into(),
            c::PROPERTY_IS_NULL_TYPE => PropertyIsNullType::default().into(),
            c::RESOURCE_IDENTIFIER_TYPE => ResourceIdentifierType::default().into(),
            c::RESOURCE_ID_TYPE => ResourceIdType::default().into(),
            c::SCALAR_CAPABILITIES_TYPE => ScalarCapabilitiesType::default().into(),
            c::SORT_BY_TYPE => SortByType::default().into(),
            c::SORT_PROPERTY_TYPE => SortPropertyType::default().into(),
            c::SPATIAL_CAPABILITIES_TYPE => SpatialCapabilitiesType::default().into(),
            c::SPATIAL_OPERATORS_TYPE => SpatialOperatorsType::default().into(),
            c::SPATIAL_OPERATOR_TYPE => SpatialOperatorType::default().into(),
            c::TEMPORAL_CAPABILITIES_TYPE => TemporalCapabilitiesType::default().into(),
            c::TEMPORAL_OPERANDS_TYPE => TemporalOperandsType::default().into(),
            c::TEMPORAL_OPERAND_TYPE => TemporalOperandType::default().into(),
            c::TEMPORAL_OPERATORS_TYPE => TemporalOperatorsType::default().into(),
            c::TEMPORAL_OPERATOR_TYPE => TemporalOperatorType::default().into(),
            c::UNARY_LOGIC_OP_TYPE => UnaryLogicOpType::default().into(),
            c::UPPER_BOUNDARY_TYPE => UpperBoundaryType::default().into(),
            _ => {
                return Err(Error::Configuration(format!(
                    "class '{}' is registered but has no model type",
                    descriptor.name
                )))
            }
        };
        tracing::trace!(class = %descriptor.name, "created object");
        Ok(object)
    }

    /// Fresh instance of the class with the given name
    pub fn create_by_name(&self, name: &str) -> Result<FesObject> {
        let classifier = self
            .registry
            .classifier_by_name(name)
            .ok_or_else(|| Error::UnknownClassifier(format!("The class '{}' is not a valid classifier", name)))?;
        self.create(classifier.id())
    }

    /// Parse a lexical value of a simple type
    pub fn create_from_string(&self, data_type: ClassifierId, lexical: &str) -> Result<Value> {
        datatypes::parse_data_type(self.registry, data_type, lexical)
    }

    /// Lexical form of a value of a simple type
    pub fn convert_to_string(&self, data_type: ClassifierId, value: &Value) -> Result<String> {
        datatypes::data_type_to_string(self.registry, data_type, value)
    }
}

/// Fresh instance of a concrete FES class
pub fn create(class: ClassifierId) -> Result<FesObject> {
    Fes20Factory::global()?.create(class)
}

/// Parse a lexical value of an FES simple type
pub fn create_from_string(data_type: ClassifierId, lexical: &str) -> Result<Value> {
    Fes20Factory::global()?.create_from_string(data_type, lexical)
}

/// Lexical form of a value of an FES simple type
pub fn convert_to_string(data_type: ClassifierId, value: &Value) -> Result<String> {
    Fes20Factory::global()?.convert_to_string(data_type, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::{EnumValue, SpatialOperatorName, VersionAction};
    use crate::registry::ids::measure_type;

    #[test]
    fn test_every_concrete_class_is_created() {
        let factory = Fes20Factory::global().unwrap();
        let mut created = 0;
        for class in factory.registry().classes() {
            match factory.create(class.id) {
                Ok(object) => {
                    assert!(!class.is_abstract);
                    assert_eq!(object.class_id(), class.id);
                    assert_eq!(object.class_name(), class.name);
                    created += 1;
                }
                Err(err) => {
                    assert!(class.is_abstract, "{} failed: {}", class.name, err);
                    assert_eq!(
                        err.to_string(),
                        format!("The class '{}' is not a valid classifier", class.name)
                    );
                }
            }
        }
        assert_eq!(created, 46);
    }

    #[test]
    fn test_create_rejects_data_types_and_unknown_ids() {
        let err = create(c::ALIASES_TYPE).unwrap_err();
        assert_eq!(err.to_string(), "The class 'AliasesType' is not a valid classifier");
        assert!(matches!(create(c::COUNT + 5), Err(Error::UnknownClassifier(_))));
    }

    #[test]
    fn test_create_by_name() {
        let object = Fes20Factory::global().unwrap().create_by_name("MeasureType").unwrap();
        assert_eq!(object.get(measure_type::UOM).unwrap(), Value::Null);
        assert!(Fes20Factory::global().unwrap().create_by_name("Nope").is_err());
    }

    #[test]
    fn test_union_prefers_first_member() {
        let value = create_from_string(c::SPATIAL_OPERATOR_NAME_TYPE, "Intersects").unwrap();
        assert_eq!(value, Value::Enum(EnumValue::from(SpatialOperatorName::Intersects)));
        assert_eq!(convert_to_string(c::SPATIAL_OPERATOR_NAME_TYPE, &value).unwrap(), "Intersects");

        let value = create_from_string(c::VERSION_TYPE, "LAST").unwrap();
        assert_eq!(value, Value::Enum(EnumValue::from(VersionAction::Last)));
    }

    #[test]
    fn test_data_type_functions_reject_classes() {
        let err = create_from_string(c::FILTER_TYPE, "x").unwrap_err();
        assert_eq!(err.to_string(), "The datatype 'FilterType' is not a valid classifier");
        let err = convert_to_string(c::SORT_BY_TYPE, &Value::Null).unwrap_err();
        assert_eq!(err.to_string(), "The datatype 'SortByType' is not a valid classifier");
    }

    #[test]
    fn test_empty_list_converts_to_empty_string() {
        assert_eq!(convert_to_string(c::ALIASES_TYPE, &Value::List(vec![])).unwrap(), "");
    }
}
