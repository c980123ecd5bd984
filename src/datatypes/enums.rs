//! FES 2.0 enumerations
//!
//! Each enumeration knows its literal, its integer value and the classifier
//! it is registered under. [`EnumValue`] wraps any of them for the
//! dispatcher.

use crate::error::{Error, Result};
use crate::registry::ids::classifier;
use crate::registry::ClassifierId;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

macro_rules! xsd_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $type_name:literal, $xml_name:literal, $classifier:path {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal => $literal:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        #[allow(missing_docs)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Registry name of the enumeration
            pub const TYPE_NAME: &'static str = $type_name;
            /// XML Schema name of the enumeration
            pub const XML_NAME: &'static str = $xml_name;
            /// Classifier id of the enumeration
            pub const CLASSIFIER: ClassifierId = $classifier;
            /// All literals in declaration order
            pub const VALUES: &'static [$name] = &[$($name::$variant),+];

            /// Lexical form
            pub fn literal(self) -> &'static str {
                match self {
                    $($name::$variant => $literal),+
                }
            }

            /// Integer value
            pub fn value(self) -> i32 {
                match self {
                    $($name::$variant => $value),+
                }
            }

            /// Parse a literal
            pub fn from_literal(literal: &str) -> Result<Self> {
                match literal {
                    $($literal => Ok($name::$variant),)+
                    _ => Err(Error::Value(format!(
                        "The value '{}' is not a valid enumerator of '{}'",
                        literal, $type_name
                    ))),
                }
            }

            /// Look up by integer value
            pub fn from_value(value: i32) -> Option<Self> {
                match value {
                    $($value => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// `(literal, value)` pairs in declaration order
            pub fn literals() -> Vec<(&'static str, i32)> {
                vec![$(($literal, $value)),+]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.literal())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::from_literal(s)
            }
        }

        impl From<$name> for EnumValue {
            fn from(value: $name) -> Self {
                EnumValue::$name(value)
            }
        }

        impl TryFrom<EnumValue> for $name {
            type Error = Error;

            fn try_from(value: EnumValue) -> Result<Self> {
                match value {
                    EnumValue::$name(v) => Ok(v),
                    other => Err(Error::Type(format!(
                        "expected a literal of '{}', found '{}'",
                        $type_name,
                        other.literal()
                    ))),
                }
            }
        }
    };
}

xsd_enum! {
    /// Standard comparison operator names
    pub enum ComparisonOperatorName: "ComparisonOperatorNameTypeMember0",
        "ComparisonOperatorNameType_._member_._0",
        classifier::COMPARISON_OPERATOR_NAME_TYPE_MEMBER0 {
        PropertyIsEqualTo = 0 => "PropertyIsEqualTo",
        PropertyIsNotEqualTo = 1 => "PropertyIsNotEqualTo",
        PropertyIsLessThan = 2 => "PropertyIsLessThan",
        PropertyIsGreaterThan = 3 => "PropertyIsGreaterThan",
        PropertyIsLessThanOrEqualTo = 4 => "PropertyIsLessThanOrEqualTo",
        PropertyIsGreaterThanOrEqualTo = 5 => "PropertyIsGreaterThanOrEqualTo",
        PropertyIsLike = 6 => "PropertyIsLike",
        PropertyIsNull = 7 => "PropertyIsNull",
        PropertyIsNil = 8 => "PropertyIsNil",
        PropertyIsBetween = 9 => "PropertyIsBetween",
    }
}

xsd_enum! {
    /// How multi-valued operands are compared
    pub enum MatchAction: "MatchActionType", "MatchActionType", classifier::MATCH_ACTION_TYPE {
        All = 0 => "All",
        Any = 1 => "Any",
        One = 2 => "One",
    }
}

xsd_enum! {
    /// Sort direction
    pub enum SortOrder: "SortOrderType", "SortOrderType", classifier::SORT_ORDER_TYPE {
        Desc = 0 => "DESC",
        Asc = 1 => "ASC",
    }
}

xsd_enum! {
    /// Standard spatial operator names
    pub enum SpatialOperatorName: "SpatialOperatorNameTypeMember0",
        "SpatialOperatorNameType_._member_._0",
        classifier::SPATIAL_OPERATOR_NAME_TYPE_MEMBER0 {
        Bbox = 0 => "BBOX",
        Equals = 1 => "Equals",
        Disjoint = 2 => "Disjoint",
        Intersects = 3 => "Intersects",
        Touches = 4 => "Touches",
        Crosses = 5 => "Crosses",
        Within = 6 => "Within",
        Contains = 7 => "Contains",
        Overlaps = 8 => "Overlaps",
        Beyond = 9 => "Beyond",
        DWithin = 10 => "DWithin",
    }
}

xsd_enum! {
    /// Standard temporal operator names
    pub enum TemporalOperatorName: "TemporalOperatorNameTypeMember0",
        "TemporalOperatorNameType_._member_._0",
        classifier::TEMPORAL_OPERATOR_NAME_TYPE_MEMBER0 {
        After = 0 => "After",
        Before = 1 => "Before",
        Begins = 2 => "Begins",
        BegunBy = 3 => "BegunBy",
        TContains = 4 => "TContains",
        During = 5 => "During",
        TEquals = 6 => "TEquals",
        TOverlaps = 7 => "TOverlaps",
        Meets = 8 => "Meets",
        OverlappedBy = 9 => "OverlappedBy",
        MetBy = 10 => "MetBy",
        Ends = 11 => "Ends",
        EndedBy = 12 => "EndedBy",
    }
}

xsd_enum! {
    /// Version navigation tokens of `ResourceId@version`
    pub enum VersionAction: "VersionActionTokens", "VersionActionTokens", classifier::VERSION_ACTION_TOKENS {
        First = 0 => "FIRST",
        Last = 1 => "LAST",
        Previous = 2 => "PREVIOUS",
        Next = 3 => "NEXT",
        All = 4 => "ALL",
    }
}

impl Default for MatchAction {
    fn default() -> Self {
        MatchAction::Any
    }
}

/// Any FES enumeration value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[allow(missing_docs)]
pub enum EnumValue {
    ComparisonOperatorName(ComparisonOperatorName),
    MatchAction(MatchAction),
    SortOrder(SortOrder),
    SpatialOperatorName(SpatialOperatorName),
    TemporalOperatorName(TemporalOperatorName),
    VersionAction(VersionAction),
}

impl EnumValue {
    /// Classifier id of the enumeration the value belongs to
    pub fn classifier(&self) -> ClassifierId {
        match self {
            EnumValue::ComparisonOperatorName(_) => ComparisonOperatorName::CLASSIFIER,
            EnumValue::MatchAction(_) => MatchAction::CLASSIFIER,
            EnumValue::SortOrder(_) => SortOrder::CLASSIFIER,
            EnumValue::SpatialOperatorName(_) => SpatialOperatorName::CLASSIFIER,
            EnumValue::TemporalOperatorName(_) => TemporalOperatorName::CLASSIFIER,
            EnumValue::VersionAction(_) => VersionAction::CLASSIFIER,
        }
    }

    /// Lexical form
    pub fn literal(&self) -> &'static str {
        match self {
            EnumValue::ComparisonOperatorName(v) => v.literal(),
            EnumValue::MatchAction(v) => v.literal(),
            EnumValue::SortOrder(v) => v.literal(),
            EnumValue::SpatialOperatorName(v) => v.literal(),
            EnumValue::TemporalOperatorName(v) => v.literal(),
            EnumValue::VersionAction(v) => v.literal(),
        }
    }

    /// Integer value
    pub fn value(&self) -> i32 {
        match self {
            EnumValue::ComparisonOperatorName(v) => v.value(),
            EnumValue::MatchAction(v) => v.value(),
            EnumValue::SortOrder(v) => v.value(),
            EnumValue::SpatialOperatorName(v) => v.value(),
            EnumValue::TemporalOperatorName(v) => v.value(),
            EnumValue::VersionAction(v) => v.value(),
        }
    }

    /// Parse a literal of the enumeration registered as `classifier`
    pub fn from_literal(classifier: ClassifierId, literal: &str) -> Result<Self> {
        Ok(match classifier {
            classifier::COMPARISON_OPERATOR_NAME_TYPE_MEMBER0 => ComparisonOperatorName::from_literal(literal)?.into(),
            classifier::MATCH_ACTION_TYPE => MatchAction::from_literal(literal)?.into(),
            classifier::SORT_ORDER_TYPE => SortOrder::from_literal(literal)?.into(),
            classifier::SPATIAL_OPERATOR_NAME_TYPE_MEMBER0 => SpatialOperatorName::from_literal(literal)?.into(),
            classifier::TEMPORAL_OPERATOR_NAME_TYPE_MEMBER0 => TemporalOperatorName::from_literal(literal)?.into(),
            classifier::VERSION_ACTION_TOKENS => VersionAction::from_literal(literal)?.into(),
            other => {
                return Err(Error::UnknownClassifier(format!(
                    "The classifier {} is not an enumeration",
                    other
                )))
            }
        })
    }

    /// Literals of the enumeration registered as `classifier`
    pub fn literals_of(classifier: ClassifierId) -> Option<Vec<(&'static str, i32)>> {
        match classifier {
            classifier::COMPARISON_OPERATOR_NAME_TYPE_MEMBER0 => Some(ComparisonOperatorName::literals()),
            classifier::MATCH_ACTION_TYPE => Some(MatchAction::literals()),
            classifier::SORT_ORDER_TYPE => Some(SortOrder::literals()),
            classifier::SPATIAL_OPERATOR_NAME_TYPE_MEMBER0 => Some(SpatialOperatorName::literals()),
            classifier::TEMPORAL_OPERATOR_NAME_TYPE_MEMBER0 => Some(TemporalOperatorName::literals()),
            classifier::VERSION_ACTION_TOKENS => Some(VersionAction::literals()),
            _ => None,
        }
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}
