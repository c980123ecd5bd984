//! The FES 2.0 package
//!
//! [`Fes20PackageBuilder`] fills a [`Registry`] in two phases.
//! `create_contents` registers every classifier in id order and
//! `initialize_contents` wires supertypes, features and XML metadata.
//! Every id the builder receives is compared with the constants in
//! [`ids`](super::ids); a mismatch is a configuration error, never a
//! silently renumbered feature.
//!
//! Most callers only need [`fes20`], the frozen process-wide package.

use super::ids::{self, classifier as c, ClassifierId, FeatureId};
use super::{
    ContentKind, DataTypeKind, FeatureFlags, Registry, RuntimeType, TypeRef, XmlFeature, XmlType, UNBOUNDED,
    UNSPECIFIED,
};
use crate::datatypes::enums::{
    ComparisonOperatorName, MatchAction, SortOrder, SpatialOperatorName, TemporalOperatorName, VersionAction,
};
use crate::datatypes::facets::PatternFacet;
use crate::error::{Error, Result};
use crate::model::element::{Element, ElementType};
use crate::namespaces::{FES_NAMESPACE, FES_PREFIX, OWS_NAMESPACE};
use once_cell::sync::OnceCell;

/// Name of the FES 2.0 package
pub const PACKAGE_NAME: &str = "fes20";

static FES20: OnceCell<Registry> = OnceCell::new();

/// The frozen FES 2.0 package, built on first use
pub fn fes20() -> Result<&'static Registry> {
    FES20.get_or_try_init(|| Fes20PackageBuilder::new().build())
}

/// Complex types in id order
const CLASSES: &[(ClassifierId, &str, bool)] = &[
    (c::ABSTRACT_ADHOC_QUERY_EXPRESSION_TYPE, "AbstractAdhocQueryExpressionType", true),
    (c::ABSTRACT_ID_TYPE, "AbstractIdType", true),
    (c::ABSTRACT_PROJECTION_CLAUSE_TYPE, "AbstractProjectionClauseType", true),
    (c::ABSTRACT_QUERY_EXPRESSION_TYPE, "AbstractQueryExpressionType", true),
    (c::ABSTRACT_SELECTION_CLAUSE_TYPE, "AbstractSelectionClauseType", true),
    (c::ABSTRACT_SORTING_CLAUSE_TYPE, "AbstractSortingClauseType", true),
    (c::ADDITIONAL_OPERATORS_TYPE, "AdditionalOperatorsType", false),
    (c::ARGUMENTS_TYPE, "ArgumentsType", false),
    (c::ARGUMENT_TYPE, "ArgumentType", false),
    (c::AVAILABLE_FUNCTIONS_TYPE, "AvailableFunctionsType", false),
    (c::AVAILABLE_FUNCTION_TYPE, "AvailableFunctionType", false),
    (c::BBOX_TYPE, "BBOXType", false),
    (c::BINARY_COMPARISON_OP_TYPE, "BinaryComparisonOpType", false),
    (c::BINARY_LOGIC_OP_TYPE, "BinaryLogicOpType", false),
    (c::BINARY_SPATIAL_OP_TYPE, "BinarySpatialOpType", false),
    (c::BINARY_TEMPORAL_OP_TYPE, "BinaryTemporalOpType", false),
    (c::COMPARISON_OPERATORS_TYPE, "ComparisonOperatorsType", false),
    (c::COMPARISON_OPERATOR_TYPE, "ComparisonOperatorType", false),
    (c::COMPARISON_OPS_TYPE, "ComparisonOpsType", true),
    (c::CONFORMANCE_TYPE, "ConformanceType", false),
    (c::DISTANCE_BUFFER_TYPE, "DistanceBufferType", false),
    (c::DOCUMENT_ROOT, "DocumentRoot", false),
    (c::EXTENDED_CAPABILITIES_TYPE, "ExtendedCapabilitiesType", false),
    (c::EXTENSION_OPERATOR_TYPE, "ExtensionOperatorType", false),
    (c::EXTENSION_OPS_TYPE, "ExtensionOpsType", true),
    (c::FILTER_CAPABILITIES_TYPE, "FilterCapabilitiesType", false),
    (c::FILTER_TYPE, "FilterType", false),
    (c::FUNCTION_TYPE, "FunctionType", false),
    (c::GEOMETRY_OPERANDS_TYPE, "GeometryOperandsType", false),
    (c::GEOMETRY_OPERAND_TYPE, "GeometryOperandType", false),
    (c::ID_CAPABILITIES_TYPE, "IdCapabilitiesType", false),
    (c::LITERAL_TYPE, "LiteralType", false),
    (c::LOGICAL_OPERATORS_TYPE, "LogicalOperatorsType", false),
    (c::LOGIC_OPS_TYPE, "LogicOpsType", true),
    (c::LOWER_BOUNDARY_TYPE, "LowerBoundaryType", false),
    (c::MEASURE_TYPE, "MeasureType", false),
    (c::PROPERTY_IS_BETWEEN_TYPE, "PropertyIsBetweenType", false),
    (c::PROPERTY_IS_LIKE_TYPE, "PropertyIsLikeType", false),
    (c::PROPERTY_IS_NIL_TYPE, "PropertyIsNilType", false),
    (c::PROPERTY_IS_NULL_TYPE, "PropertyIsNullType", false),
    (c::RESOURCE_IDENTIFIER_TYPE, "ResourceIdentifierType", false),
    (c::RESOURCE_ID_TYPE, "ResourceIdType", false),
    (c::SCALAR_CAPABILITIES_TYPE, "ScalarCapabilitiesType", false),
    (c::SORT_BY_TYPE, "SortByType", false),
    (c::SORT_PROPERTY_TYPE, "SortPropertyType", false),
    (c::SPATIAL_CAPABILITIES_TYPE, "SpatialCapabilitiesType", false),
    (c::SPATIAL_OPERATORS_TYPE, "SpatialOperatorsType", false),
    (c::SPATIAL_OPERATOR_TYPE, "SpatialOperatorType", false),
    (c::SPATIAL_OPS_TYPE, "SpatialOpsType", true),
    (c::TEMPORAL_CAPABILITIES_TYPE, "TemporalCapabilitiesType", false),
    (c::TEMPORAL_OPERANDS_TYPE, "TemporalOperandsType", false),
    (c::TEMPORAL_OPERAND_TYPE, "TemporalOperandType", false),
    (c::TEMPORAL_OPERATORS_TYPE, "TemporalOperatorsType", false),
    (c::TEMPORAL_OPERATOR_TYPE, "TemporalOperatorType", false),
    (c::TEMPORAL_OPS_TYPE, "TemporalOpsType", true),
    (c::UNARY_LOGIC_OP_TYPE, "UnaryLogicOpType", false),
    (c::UPPER_BOUNDARY_TYPE, "UpperBoundaryType", false),
];

const OPERATOR_NAME_PATTERN: &str = r"extension:\w{2,}";

/// Simple type structure before patterns are compiled
enum Shape {
    Object(ClassifierId),
    Pattern(XmlType, &'static str),
    List(TypeRef),
    Union(Vec<TypeRef>),
}

fn data_type_table() -> Vec<(ClassifierId, &'static str, &'static str, Shape)> {
    use Shape::*;
    let dt = TypeRef::Classifier;
    vec![
        (c::ALIASES_TYPE, "AliasesType", "AliasesType", List(TypeRef::Xml(XmlType::NcName))),
        (
            c::COMPARISON_OPERATOR_NAME_TYPE,
            "ComparisonOperatorNameType",
            "ComparisonOperatorNameType",
            Union(vec![
                dt(c::COMPARISON_OPERATOR_NAME_TYPE_MEMBER0),
                dt(c::COMPARISON_OPERATOR_NAME_TYPE_MEMBER1),
            ]),
        ),
        (
            c::COMPARISON_OPERATOR_NAME_TYPE_MEMBER0_OBJECT,
            "ComparisonOperatorNameTypeMember0Object",
            "ComparisonOperatorNameType_._member_._0:Object",
            Object(c::COMPARISON_OPERATOR_NAME_TYPE_MEMBER0),
        ),
        (
            c::COMPARISON_OPERATOR_NAME_TYPE_MEMBER1,
            "ComparisonOperatorNameTypeMember1",
            "ComparisonOperatorNameType_._member_._1",
            Pattern(XmlType::String, OPERATOR_NAME_PATTERN),
        ),
        (
            c::MATCH_ACTION_TYPE_OBJECT,
            "MatchActionTypeObject",
            "MatchActionType:Object",
            Object(c::MATCH_ACTION_TYPE),
        ),
        (
            c::SCHEMA_ELEMENT,
            "SchemaElement",
            "SchemaElement",
            Pattern(XmlType::String, r"schema\-element\(.+\)"),
        ),
        (
            c::SORT_ORDER_TYPE_OBJECT,
            "SortOrderTypeObject",
            "SortOrderType:Object",
            Object(c::SORT_ORDER_TYPE),
        ),
        (
            c::SPATIAL_OPERATOR_NAME_TYPE,
            "SpatialOperatorNameType",
            "SpatialOperatorNameType",
            Union(vec![
                dt(c::SPATIAL_OPERATOR_NAME_TYPE_MEMBER0),
                dt(c::SPATIAL_OPERATOR_NAME_TYPE_MEMBER1),
            ]),
        ),
        (
            c::SPATIAL_OPERATOR_NAME_TYPE_MEMBER0_OBJECT,
            "SpatialOperatorNameTypeMember0Object",
            "SpatialOperatorNameType_._member_._0:Object",
            Object(c::SPATIAL_OPERATOR_NAME_TYPE_MEMBER0),
        ),
        (
            c::SPATIAL_OPERATOR_NAME_TYPE_MEMBER1,
            "SpatialOperatorNameTypeMember1",
            "SpatialOperatorNameType_._member_._1",
            Pattern(XmlType::String, OPERATOR_NAME_PATTERN),
        ),
        (
            c::TEMPORAL_OPERATOR_NAME_TYPE,
            "TemporalOperatorNameType",
            "TemporalOperatorNameType",
            Union(vec![
                dt(c::TEMPORAL_OPERATOR_NAME_TYPE_MEMBER0),
                dt(c::TEMPORAL_OPERATOR_NAME_TYPE_MEMBER1),
            ]),
        ),
        (
            c::TEMPORAL_OPERATOR_NAME_TYPE_MEMBER0_OBJECT,
            "TemporalOperatorNameTypeMember0Object",
            "TemporalOperatorNameType_._member_._0:Object",
            Object(c::TEMPORAL_OPERATOR_NAME_TYPE_MEMBER0),
        ),
        (
            c::TEMPORAL_OPERATOR_NAME_TYPE_MEMBER1,
            "TemporalOperatorNameTypeMember1",
            "TemporalOperatorNameType_._member_._1",
            Pattern(XmlType::String, OPERATOR_NAME_PATTERN),
        ),
        (
            c::TYPE_NAMES_LIST_TYPE,
            "TypeNamesListType",
            "TypeNamesListType",
            List(dt(c::TYPE_NAMES_TYPE)),
        ),
        (
            c::TYPE_NAMES_TYPE,
            "TypeNamesType",
            "TypeNamesType",
            Union(vec![dt(c::SCHEMA_ELEMENT), TypeRef::Xml(XmlType::QName)]),
        ),
        (
            c::UOM_IDENTIFIER,
            "UomIdentifier",
            "UomIdentifier",
            Union(vec![dt(c::UOM_SYMBOL), dt(c::UOM_URI)]),
        ),
        (c::UOM_SYMBOL, "UomSymbol", "UomSymbol", Pattern(XmlType::String, "[^: \n\r\t]+")),
        (
            c::UOM_URI,
            "UomURI",
            "UomURI",
            Pattern(XmlType::AnyUri, r"([a-zA-Z][a-zA-Z0-9\-\+\.]*:|\.\./|\./|#).*"),
        ),
        (
            c::VERSION_ACTION_TOKENS_OBJECT,
            "VersionActionTokensObject",
            "VersionActionTokens:Object",
            Object(c::VERSION_ACTION_TOKENS),
        ),
        (
            c::VERSION_TYPE,
            "VersionType",
            "VersionType",
            Union(vec![
                dt(c::VERSION_ACTION_TOKENS),
                TypeRef::Xml(XmlType::PositiveInteger),
                TypeRef::Xml(XmlType::DateTime),
            ]),
        ),
    ]
}

/// Builds the FES 2.0 [`Registry`]
#[derive(Debug)]
pub struct Fes20PackageBuilder {
    registry: Registry,
    created: bool,
    initialized: bool,
}

impl Default for Fes20PackageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Fes20PackageBuilder {
    /// Builder over an empty registry
    pub fn new() -> Self {
        Self {
            registry: Registry::new(PACKAGE_NAME, FES_NAMESPACE, FES_PREFIX),
            created: false,
            initialized: false,
        }
    }

    /// Registry built so far
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Register every classifier; a second call does nothing
    pub fn create_contents(&mut self) -> Result<&mut Self> {
        if self.created {
            return Ok(self);
        }
        self.created = true;

        for &(expected, name, is_abstract) in CLASSES {
            let id = self.registry.register_class(name, is_abstract)?;
            check_classifier(name, expected, id)?;
        }

        let enums: [(ClassifierId, &str, &str, Vec<(&str, i32)>); 6] = [
            (
                ComparisonOperatorName::CLASSIFIER,
                ComparisonOperatorName::TYPE_NAME,
                ComparisonOperatorName::XML_NAME,
                ComparisonOperatorName::literals(),
            ),
            (MatchAction::CLASSIFIER, MatchAction::TYPE_NAME, MatchAction::XML_NAME, MatchAction::literals()),
            (SortOrder::CLASSIFIER, SortOrder::TYPE_NAME, SortOrder::XML_NAME, SortOrder::literals()),
            (
                SpatialOperatorName::CLASSIFIER,
                SpatialOperatorName::TYPE_NAME,
                SpatialOperatorName::XML_NAME,
                SpatialOperatorName::literals(),
            ),
            (
                TemporalOperatorName::CLASSIFIER,
                TemporalOperatorName::TYPE_NAME,
                TemporalOperatorName::XML_NAME,
                TemporalOperatorName::literals(),
            ),
            (
                VersionAction::CLASSIFIER,
                VersionAction::TYPE_NAME,
                VersionAction::XML_NAME,
                VersionAction::literals(),
            ),
        ];
        for (expected, name, xml_name, literals) in enums {
            let id = self.registry.register_enum(name, xml_name, &literals)?;
            check_classifier(name, expected, id)?;
        }

        for (expected, name, xml_name, shape) in data_type_table() {
            let kind = match shape {
                Shape::Object(base) => DataTypeKind::Restriction {
                    base: TypeRef::Classifier(base),
                    patterns: Vec::new(),
                },
                Shape::Pattern(base, pattern) => DataTypeKind::Restriction {
                    base: TypeRef::Xml(base),
                    patterns: vec![PatternFacet::new(pattern)?],
                },
                Shape::List(item) => DataTypeKind::List { item },
                Shape::Union(members) => DataTypeKind::Union { members },
            };
            let id = self.registry.register_data_type(name, xml_name, kind, true)?;
            check_classifier(name, expected, id)?;
        }

        if self.registry.classifiers().len() != c::COUNT {
            return Err(Error::Configuration(format!(
                "package '{}' has {} classifiers, expected {}",
                PACKAGE_NAME,
                self.registry.classifiers().len(),
                c::COUNT
            )));
        }
        tracing::debug!(classifiers = c::COUNT, "created FES 2.0 package contents");
        Ok(self)
    }

    /// Add supertypes, features and XML metadata; a second call does nothing
    pub fn initialize_contents(&mut self) -> Result<&mut Self> {
        if self.initialized {
            return Ok(self);
        }
        self.create_contents()?;
        self.initialized = true;

        self.query_expressions()?;
        self.capabilities()?;
        self.expressions()?;
        self.comparison_operators()?;
        self.spatial_and_temporal_operators()?;
        self.logic_operators()?;
        self.sorting()?;
        self.document_root()?;
        self.empty_classes()?;

        tracing::debug!(
            features = self.registry.classes().map(|class| class.feature_count()).sum::<usize>(),
            "initialized FES 2.0 package contents"
        );
        Ok(self)
    }

    /// Run both phases and freeze the registry
    pub fn build(mut self) -> Result<Registry> {
        self.initialize_contents()?;
        self.registry.freeze();
        Ok(self.registry)
    }

    fn scope(&mut self, class: ClassifierId) -> ClassScope<'_> {
        ClassScope {
            registry: &mut self.registry,
            class,
            last: None,
        }
    }

    fn query_expressions(&mut self) -> Result<()> {
        use ids::abstract_adhoc_query_expression_type as adhoc;

        self.scope(c::ABSTRACT_QUERY_EXPRESSION_TYPE)
            .content("AbstractQueryExpressionType", ContentKind::Empty)?
            .attribute(ids::abstract_query_expression_type::HANDLE, "handle", xml(XmlType::String), 0, 1)?
            .xml(XmlFeature::attribute("handle"))?
            .finish(ids::abstract_query_expression_type::FEATURE_COUNT)?;

        self.scope(c::ABSTRACT_ADHOC_QUERY_EXPRESSION_TYPE)
            .supertype(c::ABSTRACT_QUERY_EXPRESSION_TYPE)?
            .content("AbstractAdhocQueryExpressionType", ContentKind::ElementOnly)?
            .attribute(adhoc::ABSTRACT_PROJECTION_CLAUSE, "abstractProjectionClause", opaque(), 0, UNBOUNDED)?
            .xml(XmlFeature::element("AbstractProjectionClause", FES_NAMESPACE))?
            .attribute(adhoc::ABSTRACT_SELECTION_CLAUSE, "abstractSelectionClause", opaque(), 0, 1)?
            .xml(XmlFeature::element("AbstractSelectionClause", FES_NAMESPACE))?
            .attribute(adhoc::ABSTRACT_SORTING_CLAUSE, "abstractSortingClause", opaque(), 0, 1)?
            .xml(XmlFeature::element("AbstractSortingClause", FES_NAMESPACE))?
            .attribute(adhoc::ALIASES, "aliases", xml(XmlType::NcName), 0, UNBOUNDED)?
            .xml(XmlFeature::attribute("aliases"))?
            .attribute(adhoc::TYPE_NAMES, "typeNames", TypeRef::Classifier(c::TYPE_NAMES_TYPE), 0, UNBOUNDED)?
            .xml(XmlFeature::attribute("typeNames"))?
            .finish(adhoc::FEATURE_COUNT)
    }

    fn capabilities(&mut self) -> Result<()> {
        use ids::*;

        self.scope(c::FILTER_CAPABILITIES_TYPE)
            .content("Filter_Capabilities_._type", ContentKind::ElementOnly)?
            .child(filter_capabilities_type::CONFORMANCE, "conformance", c::CONFORMANCE_TYPE, 1, 1, "Conformance")?
            .child(filter_capabilities_type::ID_CAPABILITIES, "idCapabilities", c::ID_CAPABILITIES_TYPE, 0, 1, "Id_Capabilities")?
            .child(
                filter_capabilities_type::SCALAR_CAPABILITIES,
                "scalarCapabilities",
                c::SCALAR_CAPABILITIES_TYPE,
                0,
                1,
                "Scalar_Capabilities",
            )?
            .child(
                filter_capabilities_type::SPATIAL_CAPABILITIES,
                "spatialCapabilities",
                c::SPATIAL_CAPABILITIES_TYPE,
                0,
                1,
                "Spatial_Capabilities",
            )?
            .child(
                filter_capabilities_type::TEMPORAL_CAPABILITIES,
                "temporalCapabilities",
                c::TEMPORAL_CAPABILITIES_TYPE,
                0,
                1,
                "Temporal_Capabilities",
            )?
            .child(filter_capabilities_type::FUNCTIONS, "functions", c::AVAILABLE_FUNCTIONS_TYPE, 0, 1, "Functions")?
            .child(
                filter_capabilities_type::EXTENDED_CAPABILITIES,
                "extendedCapabilities",
                c::EXTENDED_CAPABILITIES_TYPE,
                0,
                1,
                "Extended_Capabilities",
            )?
            .finish(filter_capabilities_type::FEATURE_COUNT)?;

        self.scope(c::CONFORMANCE_TYPE)
            .content("ConformanceType", ContentKind::ElementOnly)?
            .reference(conformance_type::CONSTRAINT, "constraint", ows("DomainType"), 1, UNBOUNDED, FeatureFlags::DEFAULT)?
            .xml(XmlFeature::element("Constraint", FES_NAMESPACE))?
            .finish(conformance_type::FEATURE_COUNT)?;

        self.scope(c::ID_CAPABILITIES_TYPE)
            .content("Id_CapabilitiesType", ContentKind::ElementOnly)?
            .child(
                id_capabilities_type::RESOURCE_IDENTIFIER,
                "resourceIdentifier",
                c::RESOURCE_IDENTIFIER_TYPE,
                1,
                UNBOUNDED,
                "ResourceIdentifier",
            )?
            .finish(id_capabilities_type::FEATURE_COUNT)?;

        self.scope(c::RESOURCE_IDENTIFIER_TYPE)
            .content("ResourceIdentifierType", ContentKind::ElementOnly)?
            .metadata(resource_identifier_type::METADATA)?
            .attribute(resource_identifier_type::NAME, "name", xml(XmlType::QName), 1, 1)?
            .xml(XmlFeature::attribute("name"))?
            .finish(resource_identifier_type::FEATURE_COUNT)?;

        self.scope(c::SCALAR_CAPABILITIES_TYPE)
            .content("Scalar_CapabilitiesType", ContentKind::ElementOnly)?
            .child(
                scalar_capabilities_type::LOGICAL_OPERATORS,
                "logicalOperators",
                c::LOGICAL_OPERATORS_TYPE,
                0,
                1,
                "LogicalOperators",
            )?
            .child(
                scalar_capabilities_type::COMPARISON_OPERATORS,
                "comparisonOperators",
                c::COMPARISON_OPERATORS_TYPE,
                0,
                1,
                "ComparisonOperators",
            )?
            .finish(scalar_capabilities_type::FEATURE_COUNT)?;

        self.scope(c::COMPARISON_OPERATORS_TYPE)
            .content("ComparisonOperatorsType", ContentKind::ElementOnly)?
            .attribute_with(
                comparison_operators_type::GROUP,
                "group",
                entries(),
                0,
                UNBOUNDED,
                FeatureFlags::DEFAULT.non_unique(),
            )?
            .xml(XmlFeature::group("group:0", None))?
            .reference(
                comparison_operators_type::COMPARISON_OPERATOR,
                "comparisonOperator",
                TypeRef::Classifier(c::COMPARISON_OPERATOR_TYPE),
                1,
                UNBOUNDED,
                FeatureFlags::derived_view(),
            )?
            .xml(XmlFeature::element("ComparisonOperator", FES_NAMESPACE).in_group("#group:0"))?
            .finish(comparison_operators_type::FEATURE_COUNT)?;

        self.scope(c::COMPARISON_OPERATOR_TYPE)
            .content("ComparisonOperatorType", ContentKind::Empty)?
            .attribute(
                comparison_operator_type::NAME,
                "name",
                TypeRef::Classifier(c::COMPARISON_OPERATOR_NAME_TYPE),
                1,
                1,
            )?
            .xml(XmlFeature::attribute("name"))?
            .finish(comparison_operator_type::FEATURE_COUNT)?;

        self.scope(c::SPATIAL_CAPABILITIES_TYPE)
            .content("Spatial_CapabilitiesType", ContentKind::ElementOnly)?
            .child(
                spatial_capabilities_type::GEOMETRY_OPERANDS,
                "geometryOperands",
                c::GEOMETRY_OPERANDS_TYPE,
                1,
                1,
                "GeometryOperands",
            )?
            .child(
                spatial_capabilities_type::SPATIAL_OPERATORS,
                "spatialOperators",
                c::SPATIAL_OPERATORS_TYPE,
                1,
                1,
                "SpatialOperators",
            )?
            .finish(spatial_capabilities_type::FEATURE_COUNT)?;

        self.scope(c::GEOMETRY_OPERANDS_TYPE)
            .content("GeometryOperandsType", ContentKind::ElementOnly)?
            .child(
                geometry_operands_type::GEOMETRY_OPERAND,
                "geometryOperand",
                c::GEOMETRY_OPERAND_TYPE,
                1,
                UNBOUNDED,
                "GeometryOperand",
            )?
            .finish(geometry_operands_type::FEATURE_COUNT)?;

        self.scope(c::GEOMETRY_OPERAND_TYPE)
            .content("GeometryOperand_._type", ContentKind::Empty)?
            .attribute(named_type::NAME, "name", xml(XmlType::QName), 1, 1)?
            .xml(XmlFeature::attribute("name"))?
            .finish(named_type::FEATURE_COUNT)?;

        self.scope(c::SPATIAL_OPERATORS_TYPE)
            .content("SpatialOperatorsType", ContentKind::ElementOnly)?
            .child(
                spatial_operators_type::SPATIAL_OPERATOR,
                "spatialOperator",
                c::SPATIAL_OPERATOR_TYPE,
                1,
                UNBOUNDED,
                "SpatialOperator",
            )?
            .finish(spatial_operators_type::FEATURE_COUNT)?;

        self.scope(c::SPATIAL_OPERATOR_TYPE)
            .content("SpatialOperatorType", ContentKind::ElementOnly)?
            .child(
                spatial_operator_type::GEOMETRY_OPERANDS,
                "geometryOperands",
                c::GEOMETRY_OPERANDS_TYPE,
                0,
                1,
                "GeometryOperands",
            )?
            .attribute(
                spatial_operator_type::NAME,
                "name",
                TypeRef::Classifier(c::SPATIAL_OPERATOR_NAME_TYPE),
                0,
                1,
            )?
            .xml(XmlFeature::attribute("name"))?
            .finish(spatial_operator_type::FEATURE_COUNT)?;

        self.scope(c::TEMPORAL_CAPABILITIES_TYPE)
            .content("Temporal_CapabilitiesType", ContentKind::ElementOnly)?
            .child(
                temporal_capabilities_type::TEMPORAL_OPERANDS,
                "temporalOperands",
                c::TEMPORAL_OPERANDS_TYPE,
                1,
                1,
                "TemporalOperands",
            )?
            .child(
                temporal_capabilities_type::TEMPORAL_OPERATORS,
                "temporalOperators",
                c::TEMPORAL_OPERATORS_TYPE,
                1,
                1,
                "TemporalOperators",
            )?
            .finish(temporal_capabilities_type::FEATURE_COUNT)?;

        self.scope(c::TEMPORAL_OPERANDS_TYPE)
            .content("TemporalOperandsType", ContentKind::ElementOnly)?
            .child(
                temporal_operands_type::TEMPORAL_OPERAND,
                "temporalOperand",
                c::TEMPORAL_OPERAND_TYPE,
                1,
                UNBOUNDED,
                "TemporalOperand",
            )?
            .finish(temporal_operands_type::FEATURE_COUNT)?;

        self.scope(c::TEMPORAL_OPERAND_TYPE)
            .content("TemporalOperand_._type", ContentKind::Empty)?
            .attribute(named_type::NAME, "name", xml(XmlType::QName), 1, 1)?
            .xml(XmlFeature::attribute("name"))?
            .finish(named_type::FEATURE_COUNT)?;

        self.scope(c::TEMPORAL_OPERATORS_TYPE)
            .content("TemporalOperatorsType", ContentKind::ElementOnly)?
            .child(
                temporal_operators_type::TEMPORAL_OPERATOR,
                "temporalOperator",
                c::TEMPORAL_OPERATOR_TYPE,
                1,
                UNBOUNDED,
                "TemporalOperator",
            )?
            .finish(temporal_operators_type::FEATURE_COUNT)?;

        self.scope(c::TEMPORAL_OPERATOR_TYPE)
            .content("TemporalOperatorType", ContentKind::ElementOnly)?
            .child(
                temporal_operator_type::TEMPORAL_OPERANDS,
                "temporalOperands",
                c::TEMPORAL_OPERANDS_TYPE,
                0,
                1,
                "TemporalOperands",
            )?
            .attribute(
                temporal_operator_type::NAME,
                "name",
                TypeRef::Classifier(c::TEMPORAL_OPERATOR_NAME_TYPE),
                1,
                1,
            )?
            .xml(XmlFeature::attribute("name"))?
            .finish(temporal_operator_type::FEATURE_COUNT)?;

        self.scope(c::AVAILABLE_FUNCTIONS_TYPE)
            .content("AvailableFunctionsType", ContentKind::ElementOnly)?
            .child(
                available_functions_type::FUNCTION,
                "function",
                c::AVAILABLE_FUNCTION_TYPE,
                1,
                UNBOUNDED,
                "Function",
            )?
            .finish(available_functions_type::FEATURE_COUNT)?;

        self.scope(c::AVAILABLE_FUNCTION_TYPE)
            .content("AvailableFunctionType", ContentKind::ElementOnly)?
            .metadata(available_function_type::METADATA)?
            .attribute(available_function_type::RETURNS, "returns", xml(XmlType::QName), 1, 1)?
            .xml(XmlFeature::element("Returns", FES_NAMESPACE))?
            .child(available_function_type::ARGUMENTS, "arguments", c::ARGUMENTS_TYPE, 0, 1, "Arguments")?
            .attribute(available_function_type::NAME, "name", xml(XmlType::String), 1, 1)?
            .xml(XmlFeature::attribute("name"))?
            .finish(available_function_type::FEATURE_COUNT)?;

        self.scope(c::ARGUMENTS_TYPE)
            .content("ArgumentsType", ContentKind::ElementOnly)?
            .child(arguments_type::ARGUMENT, "argument", c::ARGUMENT_TYPE, 1, UNBOUNDED, "Argument")?
            .finish(arguments_type::FEATURE_COUNT)?;

        self.scope(c::ARGUMENT_TYPE)
            .content("ArgumentType", ContentKind::ElementOnly)?
            .metadata(argument_type::METADATA)?
            .attribute(argument_type::TYPE, "type", xml(XmlType::QName), 1, 1)?
            .xml(XmlFeature::element("Type", FES_NAMESPACE))?
            .attribute(argument_type::NAME, "name", xml(XmlType::String), 1, 1)?
            .xml(XmlFeature::attribute("name"))?
            .finish(argument_type::FEATURE_COUNT)?;

        self.scope(c::EXTENDED_CAPABILITIES_TYPE)
            .content("Extended_CapabilitiesType", ContentKind::ElementOnly)?
            .child(
                extended_capabilities_type::ADDITIONAL_OPERATORS,
                "additionalOperators",
                c::ADDITIONAL_OPERATORS_TYPE,
                0,
                1,
                "AdditionalOperators",
            )?
            .finish(extended_capabilities_type::FEATURE_COUNT)?;

        self.scope(c::ADDITIONAL_OPERATORS_TYPE)
            .content("AdditionalOperatorsType", ContentKind::ElementOnly)?
            .child(
                additional_operators_type::OPERATOR,
                "operator",
                c::EXTENSION_OPERATOR_TYPE,
                0,
                UNBOUNDED,
                "Operator",
            )?
            .finish(additional_operators_type::FEATURE_COUNT)?;

        self.scope(c::EXTENSION_OPERATOR_TYPE)
            .content("ExtensionOperatorType", ContentKind::Empty)?
            .attribute(extension_operator_type::NAME, "name", xml(XmlType::QName), 1, 1)?
            .xml(XmlFeature::attribute("name"))?
            .finish(extension_operator_type::FEATURE_COUNT)?;

        self.scope(c::LOGICAL_OPERATORS_TYPE)
            .content("LogicalOperators_._type", ContentKind::Empty)?
            .finish(logical_operators_type::FEATURE_COUNT)
    }

    fn expressions(&mut self) -> Result<()> {
        use ids::{function_type, literal_type};

        self.scope(c::LITERAL_TYPE)
            .content("LiteralType", ContentKind::Mixed)?
            .attribute_with(
                literal_type::MIXED,
                "mixed",
                entries(),
                0,
                UNBOUNDED,
                FeatureFlags::DEFAULT.non_unique(),
            )?
            .xml(XmlFeature::wildcard(":mixed", &[]))?
            .attribute_with(literal_type::ANY, "any", entries(), 0, 1, FeatureFlags::derived_view())?
            .xml(XmlFeature::wildcard(":1", &["##any"]))?
            .attribute(literal_type::TYPE, "type", xml(XmlType::QName), 0, 1)?
            .xml(XmlFeature::attribute("type"))?
            .finish(literal_type::FEATURE_COUNT)?;

        self.scope(c::FUNCTION_TYPE)
            .content("FunctionType", ContentKind::ElementOnly)?
            .expression_group(function_type::EXPRESSION_GROUP, function_type::EXPRESSION, 0, UNBOUNDED)?
            .attribute(function_type::NAME, "name", xml(XmlType::String), 1, 1)?
            .xml(XmlFeature::attribute("name"))?
            .finish(function_type::FEATURE_COUNT)
    }

    fn comparison_operators(&mut self) -> Result<()> {
        use ids::*;

        self.scope(c::BINARY_COMPARISON_OP_TYPE)
            .supertype(c::COMPARISON_OPS_TYPE)?
            .content("BinaryComparisonOpType", ContentKind::ElementOnly)?
            .expression_group(
                binary_comparison_op_type::EXPRESSION_GROUP,
                binary_comparison_op_type::EXPRESSION,
                2,
                2,
            )?
            .defaulted(
                binary_comparison_op_type::MATCH_ACTION,
                "matchAction",
                TypeRef::Classifier(c::MATCH_ACTION_TYPE),
                MatchAction::Any.literal(),
            )?
            .xml(XmlFeature::attribute("matchAction"))?
            .defaulted(binary_comparison_op_type::MATCH_CASE, "matchCase", xml(XmlType::Boolean), "true")?
            .xml(XmlFeature::attribute("matchCase"))?
            .finish(binary_comparison_op_type::FEATURE_COUNT)?;

        self.scope(c::PROPERTY_IS_LIKE_TYPE)
            .supertype(c::COMPARISON_OPS_TYPE)?
            .content("PropertyIsLikeType", ContentKind::ElementOnly)?
            .expression_group(property_is_like_type::EXPRESSION_GROUP, property_is_like_type::EXPRESSION, 2, 2)?
            .attribute(property_is_like_type::ESCAPE_CHAR, "escapeChar", xml(XmlType::String), 1, 1)?
            .xml(XmlFeature::attribute("escapeChar"))?
            .attribute(property_is_like_type::SINGLE_CHAR, "singleChar", xml(XmlType::String), 1, 1)?
            .xml(XmlFeature::attribute("singleChar"))?
            .attribute(property_is_like_type::WILD_CARD, "wildCard", xml(XmlType::String), 1, 1)?
            .xml(XmlFeature::attribute("wildCard"))?
            .finish(property_is_like_type::FEATURE_COUNT)?;

        self.scope(c::PROPERTY_IS_NIL_TYPE)
            .supertype(c::COMPARISON_OPS_TYPE)?
            .content("PropertyIsNilType", ContentKind::ElementOnly)?
            .expression_group(property_is_nil_type::EXPRESSION_GROUP, property_is_nil_type::EXPRESSION, 0, 1)?
            .attribute(property_is_nil_type::NIL_REASON, "nilReason", xml(XmlType::String), 0, 1)?
            .xml(XmlFeature::attribute("nilReason"))?
            .finish(property_is_nil_type::FEATURE_COUNT)?;

        self.scope(c::PROPERTY_IS_NULL_TYPE)
            .supertype(c::COMPARISON_OPS_TYPE)?
            .content("PropertyIsNullType", ContentKind::ElementOnly)?
            .expression_group(single_expression_type::EXPRESSION_GROUP, single_expression_type::EXPRESSION, 0, 1)?
            .finish(single_expression_type::FEATURE_COUNT)?;

        self.scope(c::PROPERTY_IS_BETWEEN_TYPE)
            .supertype(c::COMPARISON_OPS_TYPE)?
            .content("PropertyIsBetweenType", ContentKind::ElementOnly)?
            .expression_group(
                property_is_between_type::EXPRESSION_GROUP,
                property_is_between_type::EXPRESSION,
                1,
                1,
            )?
            .child(
                property_is_between_type::LOWER_BOUNDARY,
                "lowerBoundary",
                c::LOWER_BOUNDARY_TYPE,
                1,
                1,
                "LowerBoundary",
            )?
            .child(
                property_is_between_type::UPPER_BOUNDARY,
                "upperBoundary",
                c::UPPER_BOUNDARY_TYPE,
                1,
                1,
                "UpperBoundary",
            )?
            .finish(property_is_between_type::FEATURE_COUNT)?;

        self.scope(c::LOWER_BOUNDARY_TYPE)
            .content("LowerBoundaryType", ContentKind::ElementOnly)?
            .expression_group(single_expression_type::EXPRESSION_GROUP, single_expression_type::EXPRESSION, 1, 1)?
            .finish(single_expression_type::FEATURE_COUNT)?;

        self.scope(c::UPPER_BOUNDARY_TYPE)
            .content("UpperBoundaryType", ContentKind::ElementOnly)?
            .expression_group(single_expression_type::EXPRESSION_GROUP, single_expression_type::EXPRESSION, 1, 1)?
            .finish(single_expression_type::FEATURE_COUNT)
    }

    fn spatial_and_temporal_operators(&mut self) -> Result<()> {
        use ids::*;

        self.scope(c::BBOX_TYPE)
            .supertype(c::SPATIAL_OPS_TYPE)?
            .content("BBOXType", ContentKind::ElementOnly)?
            .expression_group(bbox_type::EXPRESSION_GROUP, bbox_type::EXPRESSION, 0, 1)?
            .attribute_with(bbox_type::ANY, "any", entries(), 1, 1, FeatureFlags::DEFAULT)?
            .xml(XmlFeature::wildcard(":2", &["##other"]))?
            .finish(bbox_type::FEATURE_COUNT)?;

        for (class, supertype, xml_name) in [
            (c::BINARY_SPATIAL_OP_TYPE, c::SPATIAL_OPS_TYPE, "BinarySpatialOpType"),
            (c::BINARY_TEMPORAL_OP_TYPE, c::TEMPORAL_OPS_TYPE, "BinaryTemporalOpType"),
        ] {
            self.scope(class)
                .supertype(supertype)?
                .content(xml_name, ContentKind::ElementOnly)?
                .attribute(
                    binary_operand_op_type::VALUE_REFERENCE,
                    "valueReference",
                    xml(XmlType::String),
                    1,
                    1,
                )?
                .xml(XmlFeature::element("ValueReference", FES_NAMESPACE))?
                .expression_group(
                    binary_operand_op_type::EXPRESSION_GROUP,
                    binary_operand_op_type::EXPRESSION,
                    0,
                    1,
                )?
                .attribute_with(binary_operand_op_type::ANY, "any", entries(), 0, 1, FeatureFlags::DEFAULT)?
                .xml(XmlFeature::wildcard(":3", &["##other"]))?
                .finish(binary_operand_op_type::FEATURE_COUNT)?;
        }

        self.scope(c::DISTANCE_BUFFER_TYPE)
            .supertype(c::SPATIAL_OPS_TYPE)?
            .content("DistanceBufferType", ContentKind::ElementOnly)?
            .expression_group(distance_buffer_type::EXPRESSION_GROUP, distance_buffer_type::EXPRESSION, 0, 1)?
            .attribute_with(distance_buffer_type::ANY, "any", entries(), 1, 1, FeatureFlags::DEFAULT)?
            .xml(XmlFeature::wildcard(":2", &["##other"]))?
            .child(distance_buffer_type::DISTANCE, "distance", c::MEASURE_TYPE, 1, 1, "Distance")?
            .finish(distance_buffer_type::FEATURE_COUNT)?;

        self.scope(c::MEASURE_TYPE)
            .content("MeasureType", ContentKind::Simple)?
            .attribute_with(
                measure_type::VALUE,
                "value",
                xml(XmlType::Double),
                0,
                1,
                FeatureFlags::DEFAULT.unsettable(),
            )?
            .xml(XmlFeature::simple(":0"))?
            .attribute(measure_type::UOM, "uom", TypeRef::Classifier(c::UOM_IDENTIFIER), 1, 1)?
            .xml(XmlFeature::attribute("uom"))?
            .finish(measure_type::FEATURE_COUNT)
    }

    fn logic_operators(&mut self) -> Result<()> {
        use ids::{binary_logic_op_type as bl, predicate_holder as ph, resource_id_type as rid};

        self.scope(c::FILTER_TYPE)
            .supertype(c::ABSTRACT_SELECTION_CLAUSE_TYPE)?
            .content("FilterType", ContentKind::ElementOnly)?
            .predicate_holder()?
            .finish(ph::FEATURE_COUNT)?;

        self.scope(c::UNARY_LOGIC_OP_TYPE)
            .supertype(c::LOGIC_OPS_TYPE)?
            .content("UnaryLogicOpType", ContentKind::ElementOnly)?
            .predicate_holder()?
            .finish(ph::FEATURE_COUNT)?;

        let mut scope = self.scope(c::BINARY_LOGIC_OP_TYPE);
        scope
            .supertype(c::LOGIC_OPS_TYPE)?
            .content("BinaryLogicOpType", ContentKind::ElementOnly)?
            .attribute_with(
                bl::FILTER_PREDICATES,
                "filterPredicates",
                entries(),
                0,
                UNBOUNDED,
                FeatureFlags::DEFAULT.non_unique(),
            )?
            .xml(XmlFeature::group("FilterPredicates:0", None))?;
        for (i, &(head, class)) in PREDICATE_HEADS.iter().enumerate() {
            let group = format!("{}:group", head);
            scope
                .attribute_with(
                    bl::COMPARISON_OPS_GROUP + 2 * i,
                    &format!("{}Group", head),
                    entries(),
                    0,
                    UNBOUNDED,
                    FeatureFlags::derived_view().non_unique(),
                )?
                .xml(XmlFeature::group(group.as_str(), Some(FES_NAMESPACE)).in_group(FILTER_PREDICATES_REF))?
                .reference(
                    bl::COMPARISON_OPS + 2 * i,
                    head,
                    TypeRef::Classifier(class),
                    0,
                    UNBOUNDED,
                    FeatureFlags::derived_view().read_only(),
                )?
                .xml(XmlFeature::element(head, FES_NAMESPACE).in_group(group))?;
        }
        scope
            .reference(
                bl::FUNCTION,
                "function",
                TypeRef::Classifier(c::FUNCTION_TYPE),
                0,
                UNBOUNDED,
                FeatureFlags::derived_view(),
            )?
            .xml(XmlFeature::element("Function", FES_NAMESPACE).in_group(FILTER_PREDICATES_REF))?
            .attribute_with(
                bl::ID_GROUP,
                "idGroup",
                entries(),
                0,
                UNBOUNDED,
                FeatureFlags::derived_view().non_unique(),
            )?
            .xml(XmlFeature::group("_Id:group", Some(FES_NAMESPACE)).in_group(FILTER_PREDICATES_REF))?
            .reference(
                bl::ID,
                "id",
                TypeRef::Classifier(c::ABSTRACT_ID_TYPE),
                0,
                UNBOUNDED,
                FeatureFlags::derived_view().read_only(),
            )?
            .xml(XmlFeature::element("_Id", FES_NAMESPACE).in_group("_Id:group"))?
            .finish(bl::FEATURE_COUNT)?;

        self.scope(c::RESOURCE_ID_TYPE)
            .supertype(c::ABSTRACT_ID_TYPE)?
            .content("ResourceIdType", ContentKind::Empty)?
            .attribute(rid::END_DATE, "endDate", xml(XmlType::DateTime), 0, 1)?
            .xml(XmlFeature::attribute("endDate"))?
            .attribute(rid::PREVIOUS_RID, "previousRid", xml(XmlType::String), 0, 1)?
            .xml(XmlFeature::attribute("previousRid"))?
            .attribute(rid::RID, "rid", xml(XmlType::String), 1, 1)?
            .xml(XmlFeature::attribute("rid"))?
            .attribute(rid::START_DATE, "startDate", xml(XmlType::DateTime), 0, 1)?
            .xml(XmlFeature::attribute("startDate"))?
            .attribute(rid::VERSION, "version", TypeRef::Classifier(c::VERSION_TYPE), 0, 1)?
            .xml(XmlFeature::attribute("version"))?
            .finish(rid::FEATURE_COUNT)
    }

    fn sorting(&mut self) -> Result<()> {
        use ids::{sort_by_type, sort_property_type};

        self.scope(c::SORT_BY_TYPE)
            .content("SortByType", ContentKind::ElementOnly)?
            .child(
                sort_by_type::SORT_PROPERTY,
                "sortProperty",
                c::SORT_PROPERTY_TYPE,
                1,
                UNBOUNDED,
                "SortProperty",
            )?
            .finish(sort_by_type::FEATURE_COUNT)?;

        self.scope(c::SORT_PROPERTY_TYPE)
            .content("SortPropertyType", ContentKind::ElementOnly)?
            .attribute(sort_property_type::VALUE_REFERENCE, "valueReference", xml(XmlType::String), 1, 1)?
            .xml(XmlFeature::element("ValueReference", FES_NAMESPACE))?
            .attribute_with(
                sort_property_type::SORT_ORDER,
                "sortOrder",
                TypeRef::Classifier(c::SORT_ORDER_TYPE),
                0,
                1,
                FeatureFlags::DEFAULT.unsettable(),
            )?
            .xml(XmlFeature::element("SortOrder", FES_NAMESPACE))?
            .finish(sort_property_type::FEATURE_COUNT)
    }

    fn document_root(&mut self) -> Result<()> {
        use ids::document_root as dr;

        let mut scope = self.scope(c::DOCUMENT_ROOT);
        scope
            .content("", ContentKind::Mixed)?
            .attribute_with(dr::MIXED, "mixed", entries(), 0, UNBOUNDED, FeatureFlags::DEFAULT.non_unique())?
            .xml(XmlFeature::wildcard(":mixed", &[]))?
            .reference(
                dr::XMLNS_PREFIX_MAP,
                "xMLNSPrefixMap",
                TypeRef::Runtime(RuntimeType::StringToStringMapEntry),
                0,
                UNBOUNDED,
                FeatureFlags::DEFAULT.transient(),
            )?
            .xml(XmlFeature::attribute("xmlns:prefix"))?
            .reference(
                dr::XSI_SCHEMA_LOCATION,
                "xSISchemaLocation",
                TypeRef::Runtime(RuntimeType::StringToStringMapEntry),
                0,
                UNBOUNDED,
                FeatureFlags::DEFAULT.transient(),
            )?
            .xml(XmlFeature::attribute("xsi:schemaLocation"))?;

        for &element in Element::ALL {
            let name = root_feature_name(element.name());
            let flags = if element.is_abstract() {
                FeatureFlags::derived_view().read_only()
            } else {
                FeatureFlags::derived_view()
            };
            match element.content() {
                ElementType::String => {
                    scope.attribute_with(
                        element.feature(),
                        &name,
                        xml(XmlType::String),
                        0,
                        UNSPECIFIED,
                        flags.non_unique(),
                    )?;
                }
                ElementType::Class(class) => {
                    scope.reference(element.feature(), &name, TypeRef::Classifier(class), 0, UNSPECIFIED, flags)?;
                }
                ElementType::AnyObject => {
                    scope.reference(
                        element.feature(),
                        &name,
                        TypeRef::Runtime(RuntimeType::Object),
                        0,
                        UNSPECIFIED,
                        flags,
                    )?;
                }
            }
            let mut mapping = XmlFeature::element(element.name(), element.namespace());
            if let Some(head) = element.head() {
                mapping = mapping.affiliated_to(head.name());
            }
            scope.xml(mapping)?;
        }
        scope.finish(dr::FEATURE_COUNT)
    }

    /// Abstract heads and marker classes without features
    fn empty_classes(&mut self) -> Result<()> {
        for (class, xml_name) in [
            (c::ABSTRACT_ID_TYPE, "AbstractIdType"),
            (c::ABSTRACT_PROJECTION_CLAUSE_TYPE, "AbstractProjectionClauseType"),
            (c::ABSTRACT_SELECTION_CLAUSE_TYPE, "AbstractSelectionClauseType"),
            (c::ABSTRACT_SORTING_CLAUSE_TYPE, "AbstractSortingClauseType"),
            (c::COMPARISON_OPS_TYPE, "ComparisonOpsType"),
            (c::EXTENSION_OPS_TYPE, "ExtensionOpsType"),
            (c::LOGIC_OPS_TYPE, "LogicOpsType"),
            (c::SPATIAL_OPS_TYPE, "SpatialOpsType"),
            (c::TEMPORAL_OPS_TYPE, "TemporalOpsType"),
        ] {
            self.scope(class).content(xml_name, ContentKind::Empty)?.finish(0)?;
        }
        Ok(())
    }
}

/// Substitution-group heads a predicate slot can hold, in feature order
const PREDICATE_HEADS: [(&str, ClassifierId); 5] = [
    ("comparisonOps", c::COMPARISON_OPS_TYPE),
    ("spatialOps", c::SPATIAL_OPS_TYPE),
    ("temporalOps", c::TEMPORAL_OPS_TYPE),
    ("logicOps", c::LOGIC_OPS_TYPE),
    ("extensionOps", c::EXTENSION_OPS_TYPE),
];

const FILTER_PREDICATES_REF: &str = "#FilterPredicates:0";

fn check_classifier(name: &str, expected: ClassifierId, actual: ClassifierId) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::Configuration(format!(
            "classifier '{}' was registered as {} but its id constant is {}",
            name, actual, expected
        )))
    }
}

/// Document-root feature name of a global element: `_Id` is `id`,
/// `Filter_Capabilities` is `filterCapabilities`, `BBOX` is `bBOX`
fn root_feature_name(element: &str) -> String {
    let mut chars = element.chars().filter(|ch| *ch != '_');
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn xml(xml_type: XmlType) -> TypeRef {
    TypeRef::Xml(xml_type)
}

fn entries() -> TypeRef {
    TypeRef::Runtime(RuntimeType::FeatureMapEntry)
}

fn opaque() -> TypeRef {
    TypeRef::Runtime(RuntimeType::JavaObject)
}

fn ows(name: &str) -> TypeRef {
    TypeRef::External {
        namespace: OWS_NAMESPACE.to_string(),
        name: name.to_string(),
    }
}

/// Feature declarations of one class; every call checks the returned id
struct ClassScope<'r> {
    registry: &'r mut Registry,
    class: ClassifierId,
    last: Option<FeatureId>,
}

impl<'r> ClassScope<'r> {
    fn supertype(&mut self, supertype: ClassifierId) -> Result<&mut Self> {
        self.registry.add_supertype(self.class, supertype)?;
        Ok(self)
    }

    fn content(&mut self, xml_name: &str, content: ContentKind) -> Result<&mut Self> {
        self.registry.set_class_xml(self.class, xml_name, content)?;
        Ok(self)
    }

    fn attribute(
        &mut self,
        expected: FeatureId,
        name: &str,
        type_ref: TypeRef,
        lower: i32,
        upper: i32,
    ) -> Result<&mut Self> {
        self.attribute_with(expected, name, type_ref, lower, upper, FeatureFlags::DEFAULT)
    }

    fn attribute_with(
        &mut self,
        expected: FeatureId,
        name: &str,
        type_ref: TypeRef,
        lower: i32,
        upper: i32,
        flags: FeatureFlags,
    ) -> Result<&mut Self> {
        let id = self
            .registry
            .add_attribute_feature(self.class, name, type_ref, lower, upper, None, flags)?;
        self.check(name, expected, id)
    }

    /// Optional, unsettable attribute with a default literal
    fn defaulted(&mut self, expected: FeatureId, name: &str, type_ref: TypeRef, default: &str) -> Result<&mut Self> {
        let flags = FeatureFlags::DEFAULT.unsettable();
        let id = self
            .registry
            .add_attribute_feature(self.class, name, type_ref, 0, 1, Some(default), flags)?;
        self.check(name, expected, id)
    }

    /// Containment reference
    fn reference(
        &mut self,
        expected: FeatureId,
        name: &str,
        target: TypeRef,
        lower: i32,
        upper: i32,
        flags: FeatureFlags,
    ) -> Result<&mut Self> {
        let id = self
            .registry
            .add_reference_feature(self.class, name, target, true, false, lower, upper, flags)?;
        self.check(name, expected, id)
    }

    /// Contained child class written as an FES element
    fn child(
        &mut self,
        expected: FeatureId,
        name: &str,
        class: ClassifierId,
        lower: i32,
        upper: i32,
        element: &str,
    ) -> Result<&mut Self> {
        self.reference(expected, name, TypeRef::Classifier(class), lower, upper, FeatureFlags::DEFAULT)?
            .xml(XmlFeature::element(element, FES_NAMESPACE))
    }

    fn metadata(&mut self, expected: FeatureId) -> Result<&mut Self> {
        self.reference(expected, "metadata", ows("MetadataType"), 0, 1, FeatureFlags::DEFAULT)?
            .xml(XmlFeature::element("Metadata", OWS_NAMESPACE))
    }

    /// `expression:group` choice and its read-only `expression` view
    fn expression_group(
        &mut self,
        group: FeatureId,
        view: FeatureId,
        lower: i32,
        upper: i32,
    ) -> Result<&mut Self> {
        let flags = if upper == UNBOUNDED || upper > 1 {
            FeatureFlags::DEFAULT.non_unique()
        } else {
            FeatureFlags::DEFAULT
        };
        self.attribute_with(group, "expressionGroup", entries(), lower, upper, flags)?
            .xml(XmlFeature::group("expression:group", Some(FES_NAMESPACE)))?
            .reference(
                view,
                "expression",
                TypeRef::Runtime(RuntimeType::Object),
                lower,
                upper,
                FeatureFlags::derived_view().read_only(),
            )?
            .xml(XmlFeature::element("expression", FES_NAMESPACE).in_group("expression:group"))
    }

    /// The single-predicate layout shared by `Filter` and `Not`
    fn predicate_holder(&mut self) -> Result<&mut Self> {
        use ids::predicate_holder as ph;

        for (i, &(head, class)) in PREDICATE_HEADS.iter().enumerate() {
            let group = format!("{}:group", head);
            self.attribute_with(
                ph::COMPARISON_OPS_GROUP + 2 * i,
                &format!("{}Group", head),
                entries(),
                0,
                1,
                FeatureFlags::DEFAULT,
            )?
            .xml(XmlFeature::group(group.as_str(), Some(FES_NAMESPACE)))?
            .reference(
                ph::COMPARISON_OPS + 2 * i,
                head,
                TypeRef::Classifier(class),
                0,
                1,
                FeatureFlags::derived_view().read_only(),
            )?
            .xml(XmlFeature::element(head, FES_NAMESPACE).in_group(group))?;
        }
        self.reference(
            ph::FUNCTION,
            "function",
            TypeRef::Classifier(c::FUNCTION_TYPE),
            0,
            1,
            FeatureFlags::DEFAULT,
        )?
        .xml(XmlFeature::element("Function", FES_NAMESPACE))?
        .attribute_with(
            ph::ID_GROUP,
            "idGroup",
            entries(),
            0,
            UNBOUNDED,
            FeatureFlags::DEFAULT.non_unique(),
        )?
        .xml(XmlFeature::group("_Id:group", Some(FES_NAMESPACE)))?
        .reference(
            ph::ID,
            "id",
            TypeRef::Classifier(c::ABSTRACT_ID_TYPE),
            0,
            UNBOUNDED,
            FeatureFlags::derived_view().read_only(),
        )?
        .xml(XmlFeature::element("_Id", FES_NAMESPACE).in_group("_Id:group"))
    }

    /// XML mapping of the feature declared last
    fn xml(&mut self, mapping: XmlFeature) -> Result<&mut Self> {
        let feature = self.last.ok_or_else(|| {
            Error::Configuration(format!(
                "no feature declared on '{}' to attach XML metadata to",
                self.registry.classifier_name(self.class)
            ))
        })?;
        self.registry.set_feature_xml(self.class, feature, mapping)?;
        Ok(self)
    }

    fn check(&mut self, name: &str, expected: FeatureId, actual: FeatureId) -> Result<&mut Self> {
        if expected != actual {
            return Err(Error::Configuration(format!(
                "feature '{}.{}' was registered as {} but its id constant is {}",
                self.registry.classifier_name(self.class),
                name,
                actual,
                expected
            )));
        }
        self.last = Some(actual);
        Ok(self)
    }

    fn finish(&mut self, expected_count: usize) -> Result<()> {
        let count = self.registry.class(self.class)?.feature_count();
        if count == expected_count {
            Ok(())
        } else {
            Err(Error::Configuration(format!(
                "class '{}' has {} features, expected {}",
                self.registry.classifier_name(self.class),
                count,
                expected_count
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ids::{binary_comparison_op_type, document_root, filter_type};
    use crate::registry::{FeatureKind, XmlKind};

    #[test]
    fn test_package_shape() {
        let registry = fes20().unwrap();
        assert!(registry.is_frozen());
        assert_eq!(registry.name(), PACKAGE_NAME);
        assert_eq!(registry.ns_uri(), FES_NAMESPACE);
        assert_eq!(registry.classifiers().len(), c::COUNT);
        assert_eq!(registry.classes().count(), 57);
        assert_eq!(registry.data_types().count(), 26);
        assert_eq!(registry.data_types().filter(|d| d.is_enumeration()).count(), 6);
        assert_eq!(registry.classifier_name(c::BBOX_TYPE), "BBOXType");
    }

    #[test]
    fn test_accessor_returns_one_instance() {
        let first = fes20().unwrap() as *const Registry;
        let second = fes20().unwrap() as *const Registry;
        assert_eq!(first, second);
    }

    #[test]
    fn test_phases_run_once() {
        let mut builder = Fes20PackageBuilder::new();
        builder.create_contents().unwrap();
        builder.create_contents().unwrap();
        assert_eq!(builder.registry().classifiers().len(), c::COUNT);
        builder.initialize_contents().unwrap();
        builder.initialize_contents().unwrap();
        let filter = builder.registry().class(c::FILTER_TYPE).unwrap();
        assert_eq!(filter.feature_count(), filter_type::FEATURE_COUNT);
        assert!(!builder.registry().is_frozen());
    }

    #[test]
    fn test_supertypes() {
        let registry = fes20().unwrap();
        assert!(registry.is_subtype_of(c::FILTER_TYPE, c::ABSTRACT_SELECTION_CLAUSE_TYPE));
        assert!(registry.is_subtype_of(c::PROPERTY_IS_LIKE_TYPE, c::COMPARISON_OPS_TYPE));
        assert!(registry.is_subtype_of(c::BBOX_TYPE, c::SPATIAL_OPS_TYPE));
        assert!(!registry.is_subtype_of(c::SORT_BY_TYPE, c::ABSTRACT_SORTING_CLAUSE_TYPE));
        let adhoc = registry.class(c::ABSTRACT_ADHOC_QUERY_EXPRESSION_TYPE).unwrap();
        assert_eq!(adhoc.feature(0).unwrap().name, "handle");
        assert_eq!(adhoc.feature(0).unwrap().owner, "AbstractQueryExpressionType");
        assert_eq!(adhoc.feature(0).unwrap().xml.kind, XmlKind::Attribute);
    }

    #[test]
    fn test_feature_flags_follow_the_schema() {
        let registry = fes20().unwrap();
        let match_action = registry
            .feature(c::BINARY_COMPARISON_OP_TYPE, binary_comparison_op_type::MATCH_ACTION)
            .unwrap();
        assert_eq!(match_action.default_literal.as_deref(), Some("Any"));
        assert!(match_action.is_unsettable());

        let expression = registry
            .feature(c::BINARY_COMPARISON_OP_TYPE, binary_comparison_op_type::EXPRESSION)
            .unwrap();
        assert!(expression.is_derived());
        assert!(!expression.is_changeable());
        assert_eq!((expression.lower_bound, expression.upper_bound), (2, 2));

        let group = registry
            .feature(c::BINARY_LOGIC_OP_TYPE, ids::binary_logic_op_type::SPATIAL_OPS_GROUP)
            .unwrap();
        assert!(group.is_derived() && group.is_changeable());
        assert_eq!(group.xml.group.as_deref(), Some(FILTER_PREDICATES_REF));
    }

    #[test]
    fn test_document_root_features() {
        let registry = fes20().unwrap();
        let root = registry.class(c::DOCUMENT_ROOT).unwrap();
        assert_eq!(root.feature_count(), document_root::FEATURE_COUNT);
        assert_eq!(root.feature(document_root::ID).unwrap().name, "id");
        assert_eq!(root.feature(document_root::BBOX).unwrap().name, "bBOX");
        assert_eq!(root.feature(document_root::FILTER_CAPABILITIES).unwrap().name, "filterCapabilities");
        assert_eq!(root.feature(document_root::DWITHIN).unwrap().name, "dWithin");

        let value_reference = root.feature(document_root::VALUE_REFERENCE).unwrap();
        assert_eq!(value_reference.kind, FeatureKind::Attribute);
        assert_eq!(value_reference.upper_bound, UNSPECIFIED);
        assert_eq!(value_reference.xml.affiliation.as_deref(), Some("expression"));

        let head = root.feature(document_root::COMPARISON_OPS).unwrap();
        assert!(!head.is_changeable());
        assert!(root.feature(document_root::PROPERTY_IS_LIKE).unwrap().is_changeable());
    }

    #[test]
    fn test_xml_lookup() {
        let registry = fes20().unwrap();
        let feature = registry
            .feature_by_xml_name(c::FILTER_CAPABILITIES_TYPE, XmlKind::Element, Some(FES_NAMESPACE), "Id_Capabilities")
            .unwrap();
        assert_eq!(feature.name, "idCapabilities");
        assert_eq!(registry.class(c::FILTER_CAPABILITIES_TYPE).unwrap().xml_name, "Filter_Capabilities_._type");
        assert_eq!(registry.class(c::MEASURE_TYPE).unwrap().content, ContentKind::Simple);
    }

    #[test]
    fn test_root_feature_name() {
        assert_eq!(root_feature_name("_Id"), "id");
        assert_eq!(root_feature_name("TOverlaps"), "tOverlaps");
        assert_eq!(root_feature_name("temporalOps"), "temporalOps");
    }
}
