//! The generic dispatcher and the closed set of FES objects
//!
//! Every model class implements [`ModelObject`]: four operations addressed by
//! feature id, so that serializers and validators can walk any tree without
//! knowing concrete types. [`FesObject`] is the sum of all concrete FES
//! classes and is what containment features hold.

use super::capabilities::*;
use super::document_root::DocumentRoot;
use super::expression::{FunctionType, LiteralType};
use super::filter::{BinaryLogicOpType, FilterType, UnaryLogicOpType};
use super::operators::*;
use super::slot::FieldValue;
use super::sorting::{SortByType, SortPropertyType};
use super::value::Value;
use crate::error::{Error, Result};
use crate::registry::{ClassifierId, FeatureId};

/// Reflective access to the features of a model object.
///
/// Feature ids are indexes into the class's feature table in the registry.
/// An id the class does not know is [`Error::UnknownFeature`]: ids are
/// generated together with the classes, so this only happens when the two
/// have drifted apart.
pub trait ModelObject {
    /// Classifier id of the object's class
    fn class_id(&self) -> ClassifierId;

    /// Name of the object's class
    fn class_name(&self) -> &'static str;

    /// Read a feature.
    ///
    /// For choice groups, `core` selects the raw entries
    /// ([`Value::Group`]) over the resolved values. `resolve` is accepted
    /// for symmetry with proxy-resolving runtimes; contained values are
    /// always resolved.
    fn get_feature(&self, feature: FeatureId, resolve: bool, core: bool) -> Result<Value>;

    /// Write a feature; many-valued features are replaced, never merged
    fn set_feature(&mut self, feature: FeatureId, value: Value) -> Result<()>;

    /// Reset a feature to its default
    fn unset_feature(&mut self, feature: FeatureId) -> Result<()>;

    /// True when the feature differs from its default
    fn is_feature_set(&self, feature: FeatureId) -> Result<bool>;

    /// Read a feature with resolved choice groups
    fn get(&self, feature: FeatureId) -> Result<Value> {
        self.get_feature(feature, true, false)
    }
}

/// Implement [`ModelObject`] for a class whose features are all plain
/// [`Slot`](super::slot::Slot)s
macro_rules! plain_model_object {
    (
        $ty:ty, $class:path, $name:literal {
            $( $id:path => $field:ident ),* $(,)?
        }
    ) => {
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
                _core: bool,
            ) -> $crate::error::Result<$crate::model::Value> {
                match feature {
                    $( $id => Ok($crate::model::slot::Slot::get_value(&self.$field)), )*
                    _ => Err($crate::error::Error::unknown_feature($name, $class, feature)),
                }
            }

            fn set_feature(
                &mut self,
                feature: $crate::registry::FeatureId,
                value: $crate::model::Value,
            ) -> $crate::error::Result<()> {
                let _ = &value;
                match feature {
                    $( $id => $crate::model::slot::Slot::set_value(&mut self.$field, value, stringify!($field)), )*
                    _ => Err($crate::error::Error::unknown_feature($name, $class, feature)),
                }
            }

            fn unset_feature(&mut self, feature: $crate::registry::FeatureId) -> $crate::error::Result<()> {
                match feature {
                    $( $id => {
                        $crate::model::slot::Slot::unset_value(&mut self.$field);
                        Ok(())
                    } )*
                    _ => Err($crate::error::Error::unknown_feature($name, $class, feature)),
                }
            }

            fn is_feature_set(&self, feature: $crate::registry::FeatureId) -> $crate::error::Result<bool> {
                match feature {
                    $( $id => Ok($crate::model::slot::Slot::is_value_set(&self.$field)), )*
                    _ => Err($crate::error::Error::unknown_feature($name, $class, feature)),
                }
            }
        }
    };
}

pub(crate) use plain_model_object;

macro_rules! fes_objects {
    ( $( $variant:ident($ty:ty) ),+ $(,)? ) => {
        /// Any concrete FES object
        #[derive(Debug, Clone, PartialEq)]
        #[allow(missing_docs)]
        pub enum FesObject {
            $( $variant($ty) ),+
        }

        impl ModelObject for FesObject {
            fn class_id(&self) -> ClassifierId {
                match self {
                    $( FesObject::$variant(o) => o.class_id(), )+
                }
            }

            fn class_name(&self) -> &'static str {
                match self {
                    $( FesObject::$variant(o) => o.class_name(), )+
                }
            }

            fn get_feature(&self, feature: FeatureId, resolve: bool, core: bool) -> Result<Value> {
                match self {
                    $( FesObject::$variant(o) => o.get_feature(feature, resolve, core), )+
                }
            }

            fn set_feature(&mut self, feature: FeatureId, value: Value) -> Result<()> {
                match self {
                    $( FesObject::$variant(o) => o.set_feature(feature, value), )+
                }
            }

            fn unset_feature(&mut self, feature: FeatureId) -> Result<()> {
                match self {
                    $( FesObject::$variant(o) => o.unset_feature(feature), )+
                }
            }

            fn is_feature_set(&self, feature: FeatureId) -> Result<bool> {
                match self {
                    $( FesObject::$variant(o) => o.is_feature_set(feature), )+
                }
            }
        }

        $(
            impl From<$ty> for FesObject {
                fn from(value: $ty) -> Self {
                    FesObject::$variant(value)
                }
            }

            impl TryFrom<FesObject> for $ty {
                type Error = Error;

                fn try_from(value: FesObject) -> Result<Self> {
                    match value {
                        FesObject::$variant(o) => Ok(o),
                        other => Err(Error::Type(format!(
                            "expected {}, found {}",
                            stringify!($ty),
                            other.class_name()
                        ))),
                    }
                }
            }

            impl FieldValue for $ty {
                fn into_value(self) -> Value {
                    Value::Object(Box::new(FesObject::$variant(self)))
                }

                fn from_value(value: Value, feature: &str) -> Result<Option<Self>> {
                    value.into_object(feature)
                }
            }
        )+
    };
}

fes_objects! {
    AdditionalOperators(AdditionalOperatorsType),
    Arguments(ArgumentsType),
    Argument(ArgumentType),
    AvailableFunctions(AvailableFunctionsType),
    AvailableFunction(AvailableFunctionType),
    Bbox(BboxType),
    BinaryComparisonOp(BinaryComparisonOpType),
    BinaryLogicOp(BinaryLogicOpType),
    BinarySpatialOp(BinarySpatialOpType),
    BinaryTemporalOp(BinaryTemporalOpType),
    ComparisonOperators(ComparisonOperatorsType),
    ComparisonOperator(ComparisonOperatorType),
    Conformance(ConformanceType),
    DistanceBuffer(DistanceBufferType),
    DocumentRoot(DocumentRoot),
    ExtendedCapabilities(ExtendedCapabilitiesType),
    ExtensionOperator(ExtensionOperatorType),
    FilterCapabilities(FilterCapabilitiesType),
    Filter(FilterType),
    Function(FunctionType),
    GeometryOperands(GeometryOperandsType),
    GeometryOperand(GeometryOperandType),
    IdCapabilities(IdCapabilitiesType),
    Literal(LiteralType),
    LogicalOperators(LogicalOperatorsType),
    LowerBoundary(LowerBoundaryType),
    Measure(MeasureType),
    PropertyIsBetween(PropertyIsBetweenType),
    PropertyIsLike(PropertyIsLikeType),
    PropertyIsNil(PropertyIsNilType),
    PropertyIsNull(PropertyIsNullType),
    ResourceIdentifier(ResourceIdentifierType),
    ResourceId(ResourceIdType),
    ScalarCapabilities(ScalarCapabilitiesType),
    SortBy(SortByType),
    SortProperty(SortPropertyType),
    SpatialCapabilities(SpatialCapabilitiesType),
    SpatialOperators(SpatialOperatorsType),
    SpatialOperator(SpatialOperatorType),
    TemporalCapabilities(TemporalCapabilitiesType),
    TemporalOperands(TemporalOperandsType),
    TemporalOperand(TemporalOperandType),
    TemporalOperators(TemporalOperatorsType),
    TemporalOperator(TemporalOperatorType),
    UnaryLogicOp(UnaryLogicOpType),
    UpperBoundary(UpperBoundaryType),
}

impl FesObject {
    /// Borrow as a dispatcher trait object
    pub fn as_model(&self) -> &dyn ModelObject {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ids::{classifier, measure_type};

    #[test]
    fn test_delegates_to_concrete_class() {
        let mut obj = FesObject::from(MeasureType::default());
        assert_eq!(obj.class_id(), classifier::MEASURE_TYPE);
        assert_eq!(obj.class_name(), "MeasureType");
        obj.set_feature(measure_type::UOM, Value::from("m")).unwrap();
        assert_eq!(obj.get(measure_type::UOM).unwrap(), Value::from("m"));
    }

    #[test]
    fn test_try_from_names_both_classes() {
        let obj = FesObject::from(SortByType::default());
        let err = FilterType::try_from(obj).unwrap_err();
        assert_eq!(err.to_string(), "type error: expected FilterType, found SortByType");
    }

    #[test]
    fn test_unknown_feature_is_reported() {
        let obj = FesObject::from(LogicalOperatorsType::default());
        assert!(matches!(obj.get(0), Err(Error::UnknownFeature { .. })));
    }
}
