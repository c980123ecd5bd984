#![allow(missing_docs)]

//! Classifier and feature id constants
//!
//! Ids are array indexes into the registry and must not be renumbered.
//! Inherited features come first in every class, so a subtype reuses the
//! ids of its supertypes unchanged.

/// Index of a classifier in its package
pub type ClassifierId = usize;

/// Index of a feature in its class's feature table
pub type FeatureId = usize;

/// Classifier ids of the FES 2.0 package
pub mod classifier {
    use super::ClassifierId;

    // Complex types, alphabetical
    pub const ABSTRACT_ADHOC_QUERY_EXPRESSION_TYPE: ClassifierId = 0;
    pub const ABSTRACT_ID_TYPE: ClassifierId = 1;
    pub const ABSTRACT_PROJECTION_CLAUSE_TYPE: ClassifierId = 2;
    pub const ABSTRACT_QUERY_EXPRESSION_TYPE: ClassifierId = 3;
    pub const ABSTRACT_SELECTION_CLAUSE_TYPE: ClassifierId = 4;
    pub const ABSTRACT_SORTING_CLAUSE_TYPE: ClassifierId = 5;
    pub const ADDITIONAL_OPERATORS_TYPE: ClassifierId = 6;
    pub const ARGUMENTS_TYPE: ClassifierId = 7;
    pub const ARGUMENT_TYPE: ClassifierId = 8;
    pub const AVAILABLE_FUNCTIONS_TYPE: ClassifierId = 9;
    pub const AVAILABLE_FUNCTION_TYPE: ClassifierId = 10;
    pub const BBOX_TYPE: ClassifierId = 11;
    pub const BINARY_COMPARISON_OP_TYPE: ClassifierId = 12;
    pub const BINARY_LOGIC_OP_TYPE: ClassifierId = 13;
    pub const BINARY_SPATIAL_OP_TYPE: ClassifierId = 14;
    pub const BINARY_TEMPORAL_OP_TYPE: ClassifierId = 15;
    pub const COMPARISON_OPERATORS_TYPE: ClassifierId = 16;
    pub const COMPARISON_OPERATOR_TYPE: ClassifierId = 17;
    pub const COMPARISON_OPS_TYPE: ClassifierId = 18;
    pub const CONFORMANCE_TYPE: ClassifierId = 19;
    pub const DISTANCE_BUFFER_TYPE: ClassifierId = 20;
    pub const DOCUMENT_ROOT: ClassifierId = 21;
    pub const EXTENDED_CAPABILITIES_TYPE: ClassifierId = 22;
    pub const EXTENSION_OPERATOR_TYPE: ClassifierId = 23;
    pub const EXTENSION_OPS_TYPE: ClassifierId = 24;
    pub const FILTER_CAPABILITIES_TYPE: ClassifierId = 25;
    pub const FILTER_TYPE: ClassifierId = 26;
    pub const FUNCTION_TYPE: ClassifierId = 27;
    pub const GEOMETRY_OPERANDS_TYPE: ClassifierId = 28;
    pub const GEOMETRY_OPERAND_TYPE: ClassifierId = 29;
    pub const ID_CAPABILITIES_TYPE: ClassifierId = 30;
    pub const LITERAL_TYPE: ClassifierId = 31;
    pub const LOGICAL_OPERATORS_TYPE: ClassifierId = 32;
    pub const LOGIC_OPS_TYPE: ClassifierId = 33;
    pub const LOWER_BOUNDARY_TYPE: ClassifierId = 34;
    pub const MEASURE_TYPE: ClassifierId = 35;
    pub const PROPERTY_IS_BETWEEN_TYPE: ClassifierId = 36;
    pub const PROPERTY_IS_LIKE_TYPE: ClassifierId = 37;
    pub const PROPERTY_IS_NIL_TYPE: ClassifierId = 38;
    pub const PROPERTY_IS_NULL_TYPE: ClassifierId = 39;
    pub const RESOURCE_IDENTIFIER_TYPE: ClassifierId = 40;
    pub const RESOURCE_ID_TYPE: ClassifierId = 41;
    pub const SCALAR_CAPABILITIES_TYPE: ClassifierId = 42;
    pub const SORT_BY_TYPE: ClassifierId = 43;
    pub const SORT_PROPERTY_TYPE: ClassifierId = 44;
    pub const SPATIAL_CAPABILITIES_TYPE: ClassifierId = 45;
    pub const SPATIAL_OPERATORS_TYPE: ClassifierId = 46;
    pub const SPATIAL_OPERATOR_TYPE: ClassifierId = 47;
    pub const SPATIAL_OPS_TYPE: ClassifierId = 48;
    pub const TEMPORAL_CAPABILITIES_TYPE: ClassifierId = 49;
    pub const TEMPORAL_OPERANDS_TYPE: ClassifierId = 50;
    pub const TEMPORAL_OPERAND_TYPE: ClassifierId = 51;
    pub const TEMPORAL_OPERATORS_TYPE: ClassifierId = 52;
    pub const TEMPORAL_OPERATOR_TYPE: ClassifierId = 53;
    pub const TEMPORAL_OPS_TYPE: ClassifierId = 54;
    pub const UNARY_LOGIC_OP_TYPE: ClassifierId = 55;
    pub const UPPER_BOUNDARY_TYPE: ClassifierId = 56;

    // Enumerations
    pub const COMPARISON_OPERATOR_NAME_TYPE_MEMBER0: ClassifierId = 57;
    pub const MATCH_ACTION_TYPE: ClassifierId = 58;
    pub const SORT_ORDER_TYPE: ClassifierId = 59;
    pub const SPATIAL_OPERATOR_NAME_TYPE_MEMBER0: ClassifierId = 60;
    pub const TEMPORAL_OPERATOR_NAME_TYPE_MEMBER0: ClassifierId = 61;
    pub const VERSION_ACTION_TOKENS: ClassifierId = 62;

    // Simple types
    pub const ALIASES_TYPE: ClassifierId = 63;
    pub const COMPARISON_OPERATOR_NAME_TYPE: ClassifierId = 64;
    pub const COMPARISON_OPERATOR_NAME_TYPE_MEMBER0_OBJECT: ClassifierId = 65;
    pub const COMPARISON_OPERATOR_NAME_TYPE_MEMBER1: ClassifierId = 66;
    pub const MATCH_ACTION_TYPE_OBJECT: ClassifierId = 67;
    pub const SCHEMA_ELEMENT: ClassifierId = 68;
    pub const SORT_ORDER_TYPE_OBJECT: ClassifierId = 69;
    pub const SPATIAL_OPERATOR_NAME_TYPE: ClassifierId = 70;
    pub const SPATIAL_OPERATOR_NAME_TYPE_MEMBER0_OBJECT: ClassifierId = 71;
    pub const SPATIAL_OPERATOR_NAME_TYPE_MEMBER1: ClassifierId = 72;
    pub const TEMPORAL_OPERATOR_NAME_TYPE: ClassifierId = 73;
    pub const TEMPORAL_OPERATOR_NAME_TYPE_MEMBER0_OBJECT: ClassifierId = 74;
    pub const TEMPORAL_OPERATOR_NAME_TYPE_MEMBER1: ClassifierId = 75;
    pub const TYPE_NAMES_LIST_TYPE: ClassifierId = 76;
    pub const TYPE_NAMES_TYPE: ClassifierId = 77;
    pub const UOM_IDENTIFIER: ClassifierId = 78;
    pub const UOM_SYMBOL: ClassifierId = 79;
    pub const UOM_URI: ClassifierId = 80;
    pub const VERSION_ACTION_TOKENS_OBJECT: ClassifierId = 81;
    pub const VERSION_TYPE: ClassifierId = 82;

    /// Number of classifiers in the package
    pub const COUNT: usize = 83;

    /// First enumeration id; everything below is a class
    pub const FIRST_ENUM: ClassifierId = COMPARISON_OPERATOR_NAME_TYPE_MEMBER0;

    /// First non-enumeration simple type id
    pub const FIRST_DATA_TYPE: ClassifierId = ALIASES_TYPE;
}

pub mod abstract_query_expression_type {
    use super::FeatureId;
    pub const HANDLE: FeatureId = 0;
    pub const FEATURE_COUNT: usize = 1;
}

pub mod abstract_adhoc_query_expression_type {
    use super::FeatureId;
    pub const HANDLE: FeatureId = 0;
    pub const ABSTRACT_PROJECTION_CLAUSE: FeatureId = 1;
    pub const ABSTRACT_SELECTION_CLAUSE: FeatureId = 2;
    pub const ABSTRACT_SORTING_CLAUSE: FeatureId = 3;
    pub const ALIASES: FeatureId = 4;
    pub const TYPE_NAMES: FeatureId = 5;
    pub const FEATURE_COUNT: usize = 6;
}

pub mod additional_operators_type {
    use super::FeatureId;
    pub const OPERATOR: FeatureId = 0;
    pub const FEATURE_COUNT: usize = 1;
}

pub mod arguments_type {
    use super::FeatureId;
    pub const ARGUMENT: FeatureId = 0;
    pub const FEATURE_COUNT: usize = 1;
}

pub mod argument_type {
    use super::FeatureId;
    pub const METADATA: FeatureId = 0;
    pub const TYPE: FeatureId = 1;
    pub const NAME: FeatureId = 2;
    pub const FEATURE_COUNT: usize = 3;
}

pub mod available_functions_type {
    use super::FeatureId;
    pub const FUNCTION: FeatureId = 0;
    pub const FEATURE_COUNT: usize = 1;
}

pub mod available_function_type {
    use super::FeatureId;
    pub const METADATA: FeatureId = 0;
    pub const RETURNS: FeatureId = 1;
    pub const ARGUMENTS: FeatureId = 2;
    pub const NAME: FeatureId = 3;
    pub const FEATURE_COUNT: usize = 4;
}

pub mod bbox_type {
    use super::FeatureId;
    pub const EXPRESSION_GROUP: FeatureId = 0;
    pub const EXPRESSION: FeatureId = 1;
    pub const ANY: FeatureId = 2;
    pub const FEATURE_COUNT: usize = 3;
}

pub mod binary_comparison_op_type {
    use super::FeatureId;
    pub const EXPRESSION_GROUP: FeatureId = 0;
    pub const EXPRESSION: FeatureId = 1;
    pub const MATCH_ACTION: FeatureId = 2;
    pub const MATCH_CASE: FeatureId = 3;
    pub const FEATURE_COUNT: usize = 4;
}

pub mod binary_logic_op_type {
    use super::FeatureId;
    pub const FILTER_PREDICATES: FeatureId = 0;
    pub const COMPARISON_OPS_GROUP: FeatureId = 1;
    pub const COMPARISON_OPS: FeatureId = 2;
    pub const SPATIAL_OPS_GROUP: FeatureId = 3;
    pub const SPATIAL_OPS: FeatureId = 4;
    pub const TEMPORAL_OPS_GROUP: FeatureId = 5;
    pub const TEMPORAL_OPS: FeatureId = 6;
    pub const LOGIC_OPS_GROUP: FeatureId = 7;
    pub const LOGIC_OPS: FeatureId = 8;
    pub const EXTENSION_OPS_GROUP: FeatureId = 9;
    pub const EXTENSION_OPS: FeatureId = 10;
    pub const FUNCTION: FeatureId = 11;
    pub const ID_GROUP: FeatureId = 12;
    pub const ID: FeatureId = 13;
    pub const FEATURE_COUNT: usize = 14;
}

/// Shared by `BinarySpatialOpType` and `BinaryTemporalOpType`
pub mod binary_operand_op_type {
    use super::FeatureId;
    pub const VALUE_REFERENCE: FeatureId = 0;
    pub const EXPRESSION_GROUP: FeatureId = 1;
    pub const EXPRESSION: FeatureId = 2;
    pub const ANY: FeatureId = 3;
    pub const FEATURE_COUNT: usize = 4;
}

pub use binary_operand_op_type as binary_spatial_op_type;
pub use binary_operand_op_type as binary_temporal_op_type;

pub mod comparison_operators_type {
    use super::FeatureId;
    pub const GROUP: FeatureId = 0;
    pub const COMPARISON_OPERATOR: FeatureId = 1;
    pub const FEATURE_COUNT: usize = 2;
}

pub mod comparison_operator_type {
    use super::FeatureId;
    pub const NAME: FeatureId = 0;
    pub const FEATURE_COUNT: usize = 1;
}

pub mod conformance_type {
    use super::FeatureId;
    pub const CONSTRAINT: FeatureId = 0;
    pub const FEATURE_COUNT: usize = 1;
}

pub mod distance_buffer_type {
    use super::FeatureId;
    pub const EXPRESSION_GROUP: FeatureId = 0;
    pub const EXPRESSION: FeatureId = 1;
    pub const ANY: FeatureId = 2;
    pub const DISTANCE: FeatureId = 3;
    pub const FEATURE_COUNT: usize = 4;
}

pub mod document_root {
    use super::FeatureId;
    pub const MIXED: FeatureId = 0;
    pub const XMLNS_PREFIX_MAP: FeatureId = 1;
    pub const XSI_SCHEMA_LOCATION: FeatureId = 2;
    pub const ID: FeatureId = 3;
    pub const ABSTRACT_ADHOC_QUERY_EXPRESSION: FeatureId = 4;
    pub const ABSTRACT_QUERY_EXPRESSION: FeatureId = 5;
    pub const ABSTRACT_PROJECTION_CLAUSE: FeatureId = 6;
    pub const ABSTRACT_SELECTION_CLAUSE: FeatureId = 7;
    pub const ABSTRACT_SORTING_CLAUSE: FeatureId = 8;
    pub const AFTER: FeatureId = 9;
    pub const TEMPORAL_OPS: FeatureId = 10;
    pub const AND: FeatureId = 11;
    pub const LOGIC_OPS: FeatureId = 12;
    pub const ANY_INTERACTS: FeatureId = 13;
    pub const BBOX: FeatureId = 14;
    pub const SPATIAL_OPS: FeatureId = 15;
    pub const BEFORE: FeatureId = 16;
    pub const BEGINS: FeatureId = 17;
    pub const BEGUN_BY: FeatureId = 18;
    pub const BEYOND: FeatureId = 19;
    pub const COMPARISON_OPS: FeatureId = 20;
    pub const CONTAINS: FeatureId = 21;
    pub const CROSSES: FeatureId = 22;
    pub const DISJOINT: FeatureId = 23;
    pub const DURING: FeatureId = 24;
    pub const DWITHIN: FeatureId = 25;
    pub const ENDED_BY: FeatureId = 26;
    pub const ENDS: FeatureId = 27;
    pub const EQUALS: FeatureId = 28;
    pub const EXPRESSION: FeatureId = 29;
    pub const EXTENSION_OPS: FeatureId = 30;
    pub const FILTER: FeatureId = 31;
    pub const FILTER_CAPABILITIES: FeatureId = 32;
    pub const FUNCTION: FeatureId = 33;
    pub const INTERSECTS: FeatureId = 34;
    pub const LITERAL: FeatureId = 35;
    pub const LOGICAL_OPERATORS: FeatureId = 36;
    pub const MEETS: FeatureId = 37;
    pub const MET_BY: FeatureId = 38;
    pub const NOT: FeatureId = 39;
    pub const OR: FeatureId = 40;
    pub const OVERLAPPED_BY: FeatureId = 41;
    pub const OVERLAPS: FeatureId = 42;
    pub const PROPERTY_IS_BETWEEN: FeatureId = 43;
    pub const PROPERTY_IS_EQUAL_TO: FeatureId = 44;
    pub const PROPERTY_IS_GREATER_THAN: FeatureId = 45;
    pub const PROPERTY_IS_GREATER_THAN_OR_EQUAL_TO: FeatureId = 46;
    pub const PROPERTY_IS_LESS_THAN: FeatureId = 47;
    pub const PROPERTY_IS_LESS_THAN_OR_EQUAL_TO: FeatureId = 48;
    pub const PROPERTY_IS_LIKE: FeatureId = 49;
    pub const PROPERTY_IS_NIL: FeatureId = 50;
    pub const PROPERTY_IS_NOT_EQUAL_TO: FeatureId = 51;
    pub const PROPERTY_IS_NULL: FeatureId = 52;
    pub const RESOURCE_ID: FeatureId = 53;
    pub const SORT_BY: FeatureId = 54;
    pub const TCONTAINS: FeatureId = 55;
    pub const TEQUALS: FeatureId = 56;
    pub const TOUCHES: FeatureId = 57;
    pub const TOVERLAPS: FeatureId = 58;
    pub const VALUE_REFERENCE: FeatureId = 59;
    pub const WITHIN: FeatureId = 60;
    pub const FEATURE_COUNT: usize = 61;

    /// First feature that stands for a global element
    pub const FIRST_ELEMENT: FeatureId = ID;
}

pub mod extended_capabilities_type {
    use super::FeatureId;
    pub const ADDITIONAL_OPERATORS: FeatureId = 0;
    pub const FEATURE_COUNT: usize = 1;
}

pub mod extension_operator_type {
    use super::FeatureId;
    pub const NAME: FeatureId = 0;
    pub const FEATURE_COUNT: usize = 1;
}

pub mod filter_capabilities_type {
    use super::FeatureId;
    pub const CONFORMANCE: FeatureId = 0;
    pub const ID_CAPABILITIES: FeatureId = 1;
    pub const SCALAR_CAPABILITIES: FeatureId = 2;
    pub const SPATIAL_CAPABILITIES: FeatureId = 3;
    pub const TEMPORAL_CAPABILITIES: FeatureId = 4;
    pub const FUNCTIONS: FeatureId = 5;
    pub const EXTENDED_CAPABILITIES: FeatureId = 6;
    pub const FEATURE_COUNT: usize = 7;
}

/// Shared by `FilterType` and `UnaryLogicOpType`
pub mod predicate_holder {
    use super::FeatureId;
    pub const COMPARISON_OPS_GROUP: FeatureId = 0;
    pub const COMPARISON_OPS: FeatureId = 1;
    pub const SPATIAL_OPS_GROUP: FeatureId = 2;
    pub const SPATIAL_OPS: FeatureId = 3;
    pub const TEMPORAL_OPS_GROUP: FeatureId = 4;
    pub const TEMPORAL_OPS: FeatureId = 5;
    pub const LOGIC_OPS_GROUP: FeatureId = 6;
    pub const LOGIC_OPS: FeatureId = 7;
    pub const EXTENSION_OPS_GROUP: FeatureId = 8;
    pub const EXTENSION_OPS: FeatureId = 9;
    pub const FUNCTION: FeatureId = 10;
    pub const ID_GROUP: FeatureId = 11;
    pub const ID: FeatureId = 12;
    pub const FEATURE_COUNT: usize = 13;
}

pub use predicate_holder as filter_type;
pub use predicate_holder as unary_logic_op_type;

pub mod function_type {
    use super::FeatureId;
    pub const EXPRESSION_GROUP: FeatureId = 0;
    pub const EXPRESSION: FeatureId = 1;
    pub const NAME: FeatureId = 2;
    pub const FEATURE_COUNT: usize = 3;
}

pub mod geometry_operands_type {
    use super::FeatureId;
    pub const GEOMETRY_OPERAND: FeatureId = 0;
    pub const FEATURE_COUNT: usize = 1;
}

/// Shared by the operand and extension-operator types that only carry a name
pub mod named_type {
    use super::FeatureId;
    pub const NAME: FeatureId = 0;
    pub const FEATURE_COUNT: usize = 1;
}

pub use named_type as geometry_operand_type;
pub use named_type as temporal_operand_type;

pub mod id_capabilities_type {
    use super::FeatureId;
    pub const RESOURCE_IDENTIFIER: FeatureId = 0;
    pub const FEATURE_COUNT: usize = 1;
}

pub mod literal_type {
    use super::FeatureId;
    pub const MIXED: FeatureId = 0;
    pub const ANY: FeatureId = 1;
    pub const TYPE: FeatureId = 2;
    pub const FEATURE_COUNT: usize = 3;
}

pub mod logical_operators_type {
    pub const FEATURE_COUNT: usize = 0;
}

/// Shared by `LowerBoundaryType`, `UpperBoundaryType` and `PropertyIsNullType`
pub mod single_expression_type {
    use super::FeatureId;
    pub const EXPRESSION_GROUP: FeatureId = 0;
    pub const EXPRESSION: FeatureId = 1;
    pub const FEATURE_COUNT: usize = 2;
}

pub use single_expression_type as lower_boundary_type;
pub use single_expression_type as property_is_null_type;
pub use single_expression_type as upper_boundary_type;

pub mod measure_type {
    use super::FeatureId;
    pub const VALUE: FeatureId = 0;
    pub const UOM: FeatureId = 1;
    pub const FEATURE_COUNT: usize = 2;
}

pub mod property_is_between_type {
    use super::FeatureId;
    pub const EXPRESSION_GROUP: FeatureId = 0;
    pub const EXPRESSION: FeatureId = 1;
    pub const LOWER_BOUNDARY: FeatureId = 2;
    pub const UPPER_BOUNDARY: FeatureId = 3;
    pub const FEATURE_COUNT: usize = 4;
}

pub mod property_is_like_type {
    use super::FeatureId;
    pub const EXPRESSION_GROUP: FeatureId = 0;
    pub const EXPRESSION: FeatureId = 1;
    pub const ESCAPE_CHAR: FeatureId = 2;
    pub const SINGLE_CHAR: FeatureId = 3;
    pub const WILD_CARD: FeatureId = 4;
    pub const FEATURE_COUNT: usize = 5;
}

pub mod property_is_nil_type {
    use super::FeatureId;
    pub const EXPRESSION_GROUP: FeatureId = 0;
    pub const EXPRESSION: FeatureId = 1;
    pub const NIL_REASON: FeatureId = 2;
    pub const FEATURE_COUNT: usize = 3;
}

pub mod resource_identifier_type {
    use super::FeatureId;
    pub const METADATA: FeatureId = 0;
    pub const NAME: FeatureId = 1;
    pub const FEATURE_COUNT: usize = 2;
}

pub mod resource_id_type {
    use super::FeatureId;
    pub const END_DATE: FeatureId = 0;
    pub const PREVIOUS_RID: FeatureId = 1;
    pub const RID: FeatureId = 2;
    pub const START_DATE: FeatureId = 3;
    pub const VERSION: FeatureId = 4;
    pub const FEATURE_COUNT: usize = 5;
}

pub mod scalar_capabilities_type {
    use super::FeatureId;
    pub const LOGICAL_OPERATORS: FeatureId = 0;
    pub const COMPARISON_OPERATORS: FeatureId = 1;
    pub const FEATURE_COUNT: usize = 2;
}

pub mod sort_by_type {
    use super::FeatureId;
    pub const SORT_PROPERTY: FeatureId = 0;
    pub const FEATURE_COUNT: usize = 1;
}

pub mod sort_property_type {
    use super::FeatureId;
    pub const VALUE_REFERENCE: FeatureId = 0;
    pub const SORT_ORDER: FeatureId = 1;
    pub const FEATURE_COUNT: usize = 2;
}

pub mod spatial_capabilities_type {
    use super::FeatureId;
    pub const GEOMETRY_OPERANDS: FeatureId = 0;
    pub const SPATIAL_OPERATORS: FeatureId = 1;
    pub const FEATURE_COUNT: usize = 2;
}

pub mod spatial_operators_type {
    use super::FeatureId;
    pub const SPATIAL_OPERATOR: FeatureId = 0;
    pub const FEATURE_COUNT: usize = 1;
}

pub mod spatial_operator_type {
    use super::FeatureId;
    pub const GEOMETRY_OPERANDS: FeatureId = 0;
    pub const NAME: FeatureId = 1;
    pub const FEATURE_COUNT: usize = 2;
}

pub mod temporal_capabilities_type {
    use super::FeatureId;
    pub const TEMPORAL_OPERANDS: FeatureId = 0;
    pub const TEMPORAL_OPERATORS: FeatureId = 1;
    pub const FEATURE_COUNT: usize = 2;
}

pub mod temporal_operands_type {
    use super::FeatureId;
    pub const TEMPORAL_OPERAND: FeatureId = 0;
    pub const FEATURE_COUNT: usize = 1;
}

pub mod temporal_operators_type {
    use super::FeatureId;
    pub const TEMPORAL_OPERATOR: FeatureId = 0;
    pub const FEATURE_COUNT: usize = 1;
}

pub mod temporal_operator_type {
    use super::FeatureId;
    pub const TEMPORAL_OPERANDS: FeatureId = 0;
    pub const NAME: FeatureId = 1;
    pub const FEATURE_COUNT: usize = 2;
}
