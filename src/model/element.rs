//! Global elements of FES 2.0
//!
//! Every global element is a slot of the document root and most of them
//! belong to a substitution group. Choice groups in the model store entries
//! tagged with the element they were written as, so `And` and `Or` share
//! one type but stay distinguishable.

use crate::namespaces::FES_NAMESPACE;
use crate::registry::ids::{classifier as c, document_root as f};
use crate::registry::{ClassifierId, FeatureId};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Declared content of a global element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ElementType {
    /// Instance of the class or one of its subtypes
    Class(ClassifierId),
    /// Any model object
    AnyObject,
    /// Simple string content
    String,
}

/// Static description of a global element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementInfo {
    /// XML local name
    pub name: &'static str,
    /// Feature id on the document root
    pub feature: FeatureId,
    /// Substitution group head
    pub head: Option<Element>,
    /// Declared type
    pub content: ElementType,
    /// Abstract heads only stand for their members
    pub is_abstract: bool,
}

macro_rules! global_elements {
    (
        $( $variant:ident => $name:literal, $feature:expr, $head:expr, $content:expr, $is_abstract:expr; )+
    ) => {
        /// A global element of the FES namespace
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[allow(missing_docs)]
        pub enum Element {
            $( $variant ),+
        }

        impl Element {
            /// All global elements in document-root feature order
            pub const ALL: &'static [Element] = &[$(Element::$variant),+];
        }

        static TABLE: &[ElementInfo] = &[
            $( ElementInfo {
                name: $name,
                feature: $feature,
                head: $head,
                content: $content,
                is_abstract: $is_abstract,
            } ),+
        ];
    };
}

use ElementType::{AnyObject, Class};

global_elements! {
    Id => "_Id", f::ID, None, Class(c::ABSTRACT_ID_TYPE), true;
    AbstractAdhocQueryExpression => "AbstractAdhocQueryExpression", f::ABSTRACT_ADHOC_QUERY_EXPRESSION,
        Some(Element::AbstractQueryExpression), Class(c::ABSTRACT_ADHOC_QUERY_EXPRESSION_TYPE), true;
    AbstractQueryExpression => "AbstractQueryExpression", f::ABSTRACT_QUERY_EXPRESSION, None,
        Class(c::ABSTRACT_QUERY_EXPRESSION_TYPE), true;
    AbstractProjectionClause => "AbstractProjectionClause", f::ABSTRACT_PROJECTION_CLAUSE, None, AnyObject, true;
    AbstractSelectionClause => "AbstractSelectionClause", f::ABSTRACT_SELECTION_CLAUSE, None, AnyObject, true;
    AbstractSortingClause => "AbstractSortingClause", f::ABSTRACT_SORTING_CLAUSE, None, AnyObject, true;
    After => "After", f::AFTER, Some(Element::TemporalOps), Class(c::BINARY_TEMPORAL_OP_TYPE), false;
    TemporalOps => "temporalOps", f::TEMPORAL_OPS, None, Class(c::TEMPORAL_OPS_TYPE), true;
    And => "And", f::AND, Some(Element::LogicOps), Class(c::BINARY_LOGIC_OP_TYPE), false;
    LogicOps => "logicOps", f::LOGIC_OPS, None, Class(c::LOGIC_OPS_TYPE), true;
    AnyInteracts => "AnyInteracts", f::ANY_INTERACTS, Some(Element::TemporalOps), Class(c::BINARY_TEMPORAL_OP_TYPE), false;
    Bbox => "BBOX", f::BBOX, Some(Element::SpatialOps), Class(c::BBOX_TYPE), false;
    SpatialOps => "spatialOps", f::SPATIAL_OPS, None, Class(c::SPATIAL_OPS_TYPE), true;
    Before => "Before", f::BEFORE, Some(Element::TemporalOps), Class(c::BINARY_TEMPORAL_OP_TYPE), false;
    Begins => "Begins", f::BEGINS, Some(Element::TemporalOps), Class(c::BINARY_TEMPORAL_OP_TYPE), false;
    BegunBy => "BegunBy", f::BEGUN_BY, Some(Element::TemporalOps), Class(c::BINARY_TEMPORAL_OP_TYPE), false;
    Beyond => "Beyond", f::BEYOND, Some(Element::SpatialOps), Class(c::DISTANCE_BUFFER_TYPE), false;
    ComparisonOps => "comparisonOps", f::COMPARISON_OPS, None, Class(c::COMPARISON_OPS_TYPE), true;
    Contains => "Contains", f::CONTAINS, Some(Element::SpatialOps), Class(c::BINARY_SPATIAL_OP_TYPE), false;
    Crosses => "Crosses", f::CROSSES, Some(Element::SpatialOps), Class(c::BINARY_SPATIAL_OP_TYPE), false;
    Disjoint => "Disjoint", f::DISJOINT, Some(Element::SpatialOps), Class(c::BINARY_SPATIAL_OP_TYPE), false;
    During => "During", f::DURING, Some(Element::TemporalOps), Class(c::BINARY_TEMPORAL_OP_TYPE), false;
    DWithin => "DWithin", f::DWITHIN, Some(Element::SpatialOps), Class(c::DISTANCE_BUFFER_TYPE), false;
    EndedBy => "EndedBy", f::ENDED_BY, Some(Element::TemporalOps), Class(c::BINARY_TEMPORAL_OP_TYPE), false;
    Ends => "Ends", f::ENDS, Some(Element::TemporalOps), Class(c::BINARY_TEMPORAL_OP_TYPE), false;
    Equals => "Equals", f::EQUALS, Some(Element::SpatialOps), Class(c::BINARY_SPATIAL_OP_TYPE), false;
    Expression => "expression", f::EXPRESSION, None, AnyObject, true;
    ExtensionOps => "extensionOps", f::EXTENSION_OPS, None, Class(c::EXTENSION_OPS_TYPE), true;
    Filter => "Filter", f::FILTER, Some(Element::AbstractSelectionClause), Class(c::FILTER_TYPE), false;
    FilterCapabilities => "Filter_Capabilities", f::FILTER_CAPABILITIES, None, Class(c::FILTER_CAPABILITIES_TYPE), false;
    Function => "Function", f::FUNCTION, Some(Element::Expression), Class(c::FUNCTION_TYPE), false;
    Intersects => "Intersects", f::INTERSECTS, Some(Element::SpatialOps), Class(c::BINARY_SPATIAL_OP_TYPE), false;
    Literal => "Literal", f::LITERAL, Some(Element::Expression), Class(c::LITERAL_TYPE), false;
    LogicalOperators => "LogicalOperators", f::LOGICAL_OPERATORS, None, Class(c::LOGICAL_OPERATORS_TYPE), false;
    Meets => "Meets", f::MEETS, Some(Element::TemporalOps), Class(c::BINARY_TEMPORAL_OP_TYPE), false;
    MetBy => "MetBy", f::MET_BY, Some(Element::TemporalOps), Class(c::BINARY_TEMPORAL_OP_TYPE), false;
    Not => "Not", f::NOT, Some(Element::LogicOps), Class(c::UNARY_LOGIC_OP_TYPE), false;
    Or => "Or", f::OR, Some(Element::LogicOps), Class(c::BINARY_LOGIC_OP_TYPE), false;
    OverlappedBy => "OverlappedBy", f::OVERLAPPED_BY, Some(Element::TemporalOps), Class(c::BINARY_TEMPORAL_OP_TYPE), false;
    Overlaps => "Overlaps", f::OVERLAPS, Some(Element::SpatialOps), Class(c::BINARY_SPATIAL_OP_TYPE), false;
    PropertyIsBetween => "PropertyIsBetween", f::PROPERTY_IS_BETWEEN, Some(Element::ComparisonOps),
        Class(c::PROPERTY_IS_BETWEEN_TYPE), false;
    PropertyIsEqualTo => "PropertyIsEqualTo", f::PROPERTY_IS_EQUAL_TO, Some(Element::ComparisonOps),
        Class(c::BINARY_COMPARISON_OP_TYPE), false;
    PropertyIsGreaterThan => "PropertyIsGreaterThan", f::PROPERTY_IS_GREATER_THAN, Some(Element::ComparisonOps),
        Class(c::BINARY_COMPARISON_OP_TYPE), false;
    PropertyIsGreaterThanOrEqualTo => "PropertyIsGreaterThanOrEqualTo", f::PROPERTY_IS_GREATER_THAN_OR_EQUAL_TO,
        Some(Element::ComparisonOps), Class(c::BINARY_COMPARISON_OP_TYPE), false;
    PropertyIsLessThan => "PropertyIsLessThan", f::PROPERTY_IS_LESS_THAN, Some(Element::ComparisonOps),
        Class(c::BINARY_COMPARISON_OP_TYPE), false;
    PropertyIsLessThanOrEqualTo => "PropertyIsLessThanOrEqualTo", f::PROPERTY_IS_LESS_THAN_OR_EQUAL_TO,
        Some(Element::ComparisonOps), Class(c::BINARY_COMPARISON_OP_TYPE), false;
    PropertyIsLike => "PropertyIsLike", f::PROPERTY_IS_LIKE, Some(Element::ComparisonOps),
        Class(c::PROPERTY_IS_LIKE_TYPE), false;
    PropertyIsNil => "PropertyIsNil", f::PROPERTY_IS_NIL, Some(Element::ComparisonOps),
        Class(c::PROPERTY_IS_NIL_TYPE), false;
    PropertyIsNotEqualTo => "PropertyIsNotEqualTo", f::PROPERTY_IS_NOT_EQUAL_TO, Some(Element::ComparisonOps),
        Class(c::BINARY_COMPARISON_OP_TYPE), false;
    PropertyIsNull => "PropertyIsNull", f::PROPERTY_IS_NULL, Some(Element::ComparisonOps),
        Class(c::PROPERTY_IS_NULL_TYPE), false;
    ResourceId => "ResourceId", f::RESOURCE_ID, Some(Element::Id), Class(c::RESOURCE_ID_TYPE), false;
    SortBy => "SortBy", f::SORT_BY, Some(Element::AbstractSortingClause), Class(c::SORT_BY_TYPE), false;
    TContains => "TContains", f::TCONTAINS, Some(Element::TemporalOps), Class(c::BINARY_TEMPORAL_OP_TYPE), false;
    TEquals => "TEquals", f::TEQUALS, Some(Element::TemporalOps), Class(c::BINARY_TEMPORAL_OP_TYPE), false;
    Touches => "Touches", f::TOUCHES, Some(Element::SpatialOps), Class(c::BINARY_SPATIAL_OP_TYPE), false;
    TOverlaps => "TOverlaps", f::TOVERLAPS, Some(Element::TemporalOps), Class(c::BINARY_TEMPORAL_OP_TYPE), false;
    ValueReference => "ValueReference", f::VALUE_REFERENCE, Some(Element::Expression), ElementType::String, false;
    Within => "Within", f::WITHIN, Some(Element::SpatialOps), Class(c::BINARY_SPATIAL_OP_TYPE), false;
}

impl Element {
    /// Static description
    pub fn info(self) -> &'static ElementInfo {
        &TABLE[self as usize]
    }

    /// XML local name
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Namespace of every global element
    pub fn namespace(self) -> &'static str {
        FES_NAMESPACE
    }

    /// Document-root feature id
    pub fn feature(self) -> FeatureId {
        self.info().feature
    }

    /// Substitution group head
    pub fn head(self) -> Option<Element> {
        self.info().head
    }

    /// Declared type
    pub fn content(self) -> ElementType {
        self.info().content
    }

    /// Abstract head
    pub fn is_abstract(self) -> bool {
        self.info().is_abstract
    }

    /// True when the element is `head` or substitutes for it, directly or not
    pub fn substitutes_for(self, head: Element) -> bool {
        let mut current = Some(self);
        while let Some(element) = current {
            if element == head {
                return true;
            }
            current = element.head();
        }
        false
    }

    /// Element by XML local name
    pub fn from_local_name(name: &str) -> Option<Element> {
        BY_NAME.get(name).copied()
    }

    /// Element standing for a document-root feature
    pub fn from_feature(feature: FeatureId) -> Option<Element> {
        feature
            .checked_sub(f::FIRST_ELEMENT)
            .and_then(|index| Element::ALL.get(index).copied())
    }

    /// Concrete members of a substitution group, in table order
    pub fn members(head: Element) -> impl Iterator<Item = Element> {
        Element::ALL
            .iter()
            .copied()
            .filter(move |e| !e.is_abstract() && e.substitutes_for(head))
    }
}

lazy_static::lazy_static! {
    static ref BY_NAME: HashMap<&'static str, Element> =
        Element::ALL.iter().map(|e| (e.name(), *e)).collect();
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_follows_document_root_features() {
        assert_eq!(TABLE.len(), Element::ALL.len());
        assert_eq!(Element::ALL.len(), f::FEATURE_COUNT - f::FIRST_ELEMENT);
        for (index, element) in Element::ALL.iter().enumerate() {
            assert_eq!(*element as usize, index);
            assert_eq!(element.feature(), f::FIRST_ELEMENT + index, "{}", element);
            assert_eq!(Element::from_feature(element.feature()), Some(*element));
        }
        assert_eq!(Element::from_feature(f::MIXED), None);
    }

    #[test]
    fn test_substitution_groups() {
        assert!(Element::PropertyIsLike.substitutes_for(Element::ComparisonOps));
        assert!(!Element::PropertyIsLike.substitutes_for(Element::SpatialOps));
        assert!(Element::AbstractAdhocQueryExpression.substitutes_for(Element::AbstractQueryExpression));
        assert!(Element::Filter.substitutes_for(Element::Filter));
        assert_eq!(Element::members(Element::LogicOps).collect::<Vec<_>>(), vec![Element::And, Element::Not, Element::Or]);
        assert_eq!(Element::members(Element::Expression).count(), 3);
        assert_eq!(Element::members(Element::ComparisonOps).count(), 10);
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(Element::from_local_name("Filter_Capabilities"), Some(Element::FilterCapabilities));
        assert_eq!(Element::from_local_name("BBOX"), Some(Element::Bbox));
        assert_eq!(Element::from_local_name("bbox"), None);
        assert_eq!(Element::Id.name(), "_Id");
    }
}
