//! Filters and logical operators
//!
//! A filter or a `Not` holds exactly one predicate out of a choice between
//! the operator substitution groups, a function and a list of ids. `And`
//! and `Or` hold any number of them in document order. Each substitution
//! group is exposed as a `*Group` feature plus a derived read-only view.

use super::element::Element;
use super::expression::FunctionType;
use super::object::ModelObject;
use super::operators::ResourceIdType;
use super::value::{GroupEntry, Value};
use crate::error::{Error, Result};
use crate::registry::ids::{binary_logic_op_type, classifier, predicate_holder};
use crate::registry::{ClassifierId, FeatureId};

/// The predicate of a filter or a `Not`
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// An operator element, or a `Function`
    Single(GroupEntry),
    /// One or more `_Id` members
    Ids(Vec<GroupEntry>),
}

impl Predicate {
    /// Operator predicate written as `element`
    pub fn operator(element: Element, object: impl Into<super::FesObject>) -> Result<Self> {
        Ok(Predicate::Single(GroupEntry::object(element, object)?))
    }

    /// Function predicate
    pub fn function(function: FunctionType) -> Self {
        Predicate::Single(GroupEntry {
            element: Element::Function,
            value: Value::object(function),
        })
    }

    /// Resource id predicate
    pub fn resource_ids(ids: impl IntoIterator<Item = ResourceIdType>) -> Self {
        Predicate::Ids(
            ids.into_iter()
                .map(|id| GroupEntry {
                    element: Element::ResourceId,
                    value: Value::object(id),
                })
                .collect(),
        )
    }

    /// Entries of the predicate
    pub fn entries(&self) -> &[GroupEntry] {
        match self {
            Predicate::Single(entry) => std::slice::from_ref(entry),
            Predicate::Ids(entries) => entries,
        }
    }
}

/// A substitution group selectable in a predicate
#[derive(Debug, Clone, Copy)]
struct OperatorGroup {
    group: FeatureId,
    derived: FeatureId,
    head: Element,
    name: &'static str,
}

const PREDICATE_GROUPS: [OperatorGroup; 6] = [
    OperatorGroup {
        group: predicate_holder::COMPARISON_OPS_GROUP,
        derived: predicate_holder::COMPARISON_OPS,
        head: Element::ComparisonOps,
        name: "comparisonOpsGroup",
    },
    OperatorGroup {
        group: predicate_holder::SPATIAL_OPS_GROUP,
        derived: predicate_holder::SPATIAL_OPS,
        head: Element::SpatialOps,
        name: "spatialOpsGroup",
    },
    OperatorGroup {
        group: predicate_holder::TEMPORAL_OPS_GROUP,
        derived: predicate_holder::TEMPORAL_OPS,
        head: Element::TemporalOps,
        name: "temporalOpsGroup",
    },
    OperatorGroup {
        group: predicate_holder::LOGIC_OPS_GROUP,
        derived: predicate_holder::LOGIC_OPS,
        head: Element::LogicOps,
        name: "logicOpsGroup",
    },
    OperatorGroup {
        group: predicate_holder::EXTENSION_OPS_GROUP,
        derived: predicate_holder::EXTENSION_OPS,
        head: Element::ExtensionOps,
        name: "extensionOpsGroup",
    },
    OperatorGroup {
        group: predicate_holder::ID_GROUP,
        derived: predicate_holder::ID,
        head: Element::Id,
        name: "idGroup",
    },
];

const LOGIC_GROUPS: [OperatorGroup; 6] = [
    OperatorGroup {
        group: binary_logic_op_type::COMPARISON_OPS_GROUP,
        derived: binary_logic_op_type::COMPARISON_OPS,
        head: Element::ComparisonOps,
        name: "comparisonOpsGroup",
    },
    OperatorGroup {
        group: binary_logic_op_type::SPATIAL_OPS_GROUP,
        derived: binary_logic_op_type::SPATIAL_OPS,
        head: Element::SpatialOps,
        name: "spatialOpsGroup",
    },
    OperatorGroup {
        group: binary_logic_op_type::TEMPORAL_OPS_GROUP,
        derived: binary_logic_op_type::TEMPORAL_OPS,
        head: Element::TemporalOps,
        name: "temporalOpsGroup",
    },
    OperatorGroup {
        group: binary_logic_op_type::LOGIC_OPS_GROUP,
        derived: binary_logic_op_type::LOGIC_OPS,
        head: Element::LogicOps,
        name: "logicOpsGroup",
    },
    OperatorGroup {
        group: binary_logic_op_type::EXTENSION_OPS_GROUP,
        derived: binary_logic_op_type::EXTENSION_OPS,
        head: Element::ExtensionOps,
        name: "extensionOpsGroup",
    },
    OperatorGroup {
        group: binary_logic_op_type::ID_GROUP,
        derived: binary_logic_op_type::ID,
        head: Element::Id,
        name: "idGroup",
    },
];

impl OperatorGroup {
    /// Name of the derived view, e.g. `comparisonOps`
    fn view_name(&self) -> &'static str {
        self.name.trim_end_matches("Group")
    }
}

/// Where a feature id points in a group table
enum GroupFeature {
    Group(OperatorGroup),
    Derived(OperatorGroup),
}

fn find_group(table: &[OperatorGroup], feature: FeatureId) -> Option<GroupFeature> {
    table.iter().find_map(|g| {
        if g.group == feature {
            Some(GroupFeature::Group(*g))
        } else if g.derived == feature {
            Some(GroupFeature::Derived(*g))
        } else {
            None
        }
    })
}

/// Re-check an entry handed in through the dispatcher
fn checked_entry(entry: GroupEntry, group: &OperatorGroup) -> Result<GroupEntry> {
    if !entry.is_in(group.head) {
        return Err(Error::Type(format!(
            "feature '{}' does not accept element '{}'",
            group.name, entry.element
        )));
    }
    GroupEntry::new(entry.element, entry.value)
}

fn function_entry(function: FunctionType) -> GroupEntry {
    GroupEntry {
        element: Element::Function,
        value: Value::object(function),
    }
}

// ============================================================================
// Single-predicate holders
// ============================================================================

fn predicate_in<'a>(slot: &'a Option<Predicate>, head: Element) -> &'a [GroupEntry] {
    match slot {
        Some(Predicate::Ids(entries)) if head == Element::Id => entries,
        Some(Predicate::Single(entry)) if entry.is_in(head) => std::slice::from_ref(entry),
        _ => &[],
    }
}

fn predicate_function(slot: &Option<Predicate>) -> Option<&GroupEntry> {
    match slot {
        Some(Predicate::Single(entry)) if entry.element == Element::Function => Some(entry),
        _ => None,
    }
}

fn get_predicate(slot: &Option<Predicate>, group: &OperatorGroup, core: bool) -> Value {
    let entries = predicate_in(slot, group.head);
    if core {
        Value::Group(entries.to_vec())
    } else if group.head == Element::Id {
        Value::List(entries.iter().map(|e| e.value.clone()).collect())
    } else {
        entries.first().map_or(Value::Null, |e| e.value.clone())
    }
}

fn set_predicate(slot: &mut Option<Predicate>, group: &OperatorGroup, value: Value) -> Result<()> {
    let entries = value
        .into_group(group.name)?
        .into_iter()
        .map(|entry| checked_entry(entry, group))
        .collect::<Result<Vec<_>>>()?;
    if entries.is_empty() {
        if !predicate_in(slot, group.head).is_empty() {
            *slot = None;
        }
        return Ok(());
    }
    if group.head == Element::Id {
        *slot = Some(Predicate::Ids(entries));
        return Ok(());
    }
    let mut entries = entries;
    if entries.len() > 1 {
        return Err(Error::Value(format!(
            "feature '{}' holds at most one entry, got {}",
            group.name,
            entries.len()
        )));
    }
    *slot = entries.pop().map(Predicate::Single);
    Ok(())
}

pub(crate) fn get_predicate_feature(
    slot: &Option<Predicate>,
    class: (&'static str, ClassifierId),
    feature: FeatureId,
    core: bool,
) -> Result<Value> {
    match find_group(&PREDICATE_GROUPS, feature) {
        Some(GroupFeature::Group(group)) => Ok(get_predicate(slot, &group, core)),
        Some(GroupFeature::Derived(group)) => Ok(get_predicate(slot, &group, false)),
        None if feature == predicate_holder::FUNCTION => {
            Ok(predicate_function(slot).map_or(Value::Null, |e| e.value.clone()))
        }
        None => Err(Error::unknown_feature(class.0, class.1, feature)),
    }
}

pub(crate) fn set_predicate_feature(
    slot: &mut Option<Predicate>,
    class: (&'static str, ClassifierId),
    feature: FeatureId,
    value: Value,
) -> Result<()> {
    match find_group(&PREDICATE_GROUPS, feature) {
        Some(GroupFeature::Group(group)) => set_predicate(slot, &group, value),
        Some(GroupFeature::Derived(group)) => Err(Error::not_changeable(class.0, group.view_name())),
        None if feature == predicate_holder::FUNCTION => {
            match value.into_object::<FunctionType>("function")? {
                Some(function) => *slot = Some(Predicate::function(function)),
                None if predicate_function(slot).is_some() => *slot = None,
                None => {}
            }
            Ok(())
        }
        None => Err(Error::unknown_feature(class.0, class.1, feature)),
    }
}

pub(crate) fn unset_predicate_feature(
    slot: &mut Option<Predicate>,
    class: (&'static str, ClassifierId),
    feature: FeatureId,
) -> Result<()> {
    match find_group(&PREDICATE_GROUPS, feature) {
        Some(GroupFeature::Group(group)) => {
            if !predicate_in(slot, group.head).is_empty() {
                *slot = None;
            }
            Ok(())
        }
        Some(GroupFeature::Derived(group)) => Err(Error::not_changeable(class.0, group.view_name())),
        None if feature == predicate_holder::FUNCTION => {
            if predicate_function(slot).is_some() {
                *slot = None;
            }
            Ok(())
        }
        None => Err(Error::unknown_feature(class.0, class.1, feature)),
    }
}

pub(crate) fn is_predicate_feature_set(
    slot: &Option<Predicate>,
    class: (&'static str, ClassifierId),
    feature: FeatureId,
) -> Result<bool> {
    match find_group(&PREDICATE_GROUPS, feature) {
        Some(GroupFeature::Group(group)) | Some(GroupFeature::Derived(group)) => {
            Ok(!predicate_in(slot, group.head).is_empty())
        }
        None if feature == predicate_holder::FUNCTION => Ok(predicate_function(slot).is_some()),
        None => Err(Error::unknown_feature(class.0, class.1, feature)),
    }
}

macro_rules! predicate_holder_object {
    ($ty:ty, $class:path, $name:literal) => {
        impl ModelObject for $ty {
            fn class_id(&self) -> ClassifierId {
                $class
            }

            fn class_name(&self) -> &'static str {
                $name
            }

            fn get_feature(&self, feature: FeatureId, _resolve: bool, core: bool) -> Result<Value> {
                get_predicate_feature(&self.predicate, ($name, $class), feature, core)
            }

            fn set_feature(&mut self, feature: FeatureId, value: Value) -> Result<()> {
                set_predicate_feature(&mut self.predicate, ($name, $class), feature, value)
            }

            fn unset_feature(&mut self, feature: FeatureId) -> Result<()> {
                unset_predicate_feature(&mut self.predicate, ($name, $class), feature)
            }

            fn is_feature_set(&self, feature: FeatureId) -> Result<bool> {
                is_predicate_feature_set(&self.predicate, ($name, $class), feature)
            }
        }
    };
}

/// `fes:Filter`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterType {
    /// The filter predicate
    pub predicate: Option<Predicate>,
}

impl FilterType {
    /// Filter with a predicate
    pub fn new(predicate: Predicate) -> Self {
        Self {
            predicate: Some(predicate),
        }
    }
}

predicate_holder_object!(FilterType, classifier::FILTER_TYPE, "FilterType");

/// `fes:Not`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnaryLogicOpType {
    /// The negated predicate
    pub predicate: Option<Predicate>,
}

impl UnaryLogicOpType {
    /// Negation of a predicate
    pub fn new(predicate: Predicate) -> Self {
        Self {
            predicate: Some(predicate),
        }
    }
}

predicate_holder_object!(UnaryLogicOpType, classifier::UNARY_LOGIC_OP_TYPE, "UnaryLogicOpType");

// ============================================================================
// And / Or
// ============================================================================

/// `fes:And` and `fes:Or`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinaryLogicOpType {
    /// Operands in document order
    pub predicates: Vec<GroupEntry>,
}

impl BinaryLogicOpType {
    /// Combination of operands
    pub fn new(predicates: Vec<GroupEntry>) -> Self {
        Self { predicates }
    }

    /// Append an operand written as `element`
    pub fn with_operand(mut self, element: Element, object: impl Into<super::FesObject>) -> Result<Self> {
        self.predicates.push(GroupEntry::object(element, object)?);
        Ok(self)
    }

    fn in_group(&self, head: Element) -> impl Iterator<Item = &GroupEntry> {
        self.predicates.iter().filter(move |e| e.is_in(head))
    }

    fn functions(&self) -> impl Iterator<Item = &GroupEntry> {
        self.predicates.iter().filter(|e| e.element == Element::Function)
    }

    fn check_predicate(entry: GroupEntry) -> Result<GroupEntry> {
        if entry.element == Element::Function {
            return GroupEntry::new(entry.element, entry.value);
        }
        match LOGIC_GROUPS.iter().find(|g| entry.is_in(g.head)) {
            Some(group) => checked_entry(entry, group),
            None => Err(Error::Type(format!(
                "feature 'filterPredicates' does not accept element '{}'",
                entry.element
            ))),
        }
    }
}

impl ModelObject for BinaryLogicOpType {
    fn class_id(&self) -> ClassifierId {
        classifier::BINARY_LOGIC_OP_TYPE
    }

    fn class_name(&self) -> &'static str {
        "BinaryLogicOpType"
    }

    fn get_feature(&self, feature: FeatureId, _resolve: bool, core: bool) -> Result<Value> {
        if feature == binary_logic_op_type::FILTER_PREDICATES {
            return Ok(Value::Group(self.predicates.clone()));
        }
        if feature == binary_logic_op_type::FUNCTION {
            return Ok(Value::List(self.functions().map(|e| e.value.clone()).collect()));
        }
        match find_group(&LOGIC_GROUPS, feature) {
            Some(GroupFeature::Group(group)) if core => Ok(Value::Group(self.in_group(group.head).cloned().collect())),
            Some(GroupFeature::Group(group)) | Some(GroupFeature::Derived(group)) => {
                Ok(Value::List(self.in_group(group.head).map(|e| e.value.clone()).collect()))
            }
            None => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn set_feature(&mut self, feature: FeatureId, value: Value) -> Result<()> {
        if feature == binary_logic_op_type::FILTER_PREDICATES {
            self.predicates = value
                .into_group("filterPredicates")?
                .into_iter()
                .map(Self::check_predicate)
                .collect::<Result<Vec<_>>>()?;
            return Ok(());
        }
        if feature == binary_logic_op_type::FUNCTION {
            let functions = value.into_list_of("function", |v, f| v.into_object::<FunctionType>(f))?;
            self.predicates.retain(|e| e.element != Element::Function);
            self.predicates.extend(functions.into_iter().map(function_entry));
            return Ok(());
        }
        match find_group(&LOGIC_GROUPS, feature) {
            Some(GroupFeature::Group(group)) => {
                let entries = value
                    .into_group(group.name)?
                    .into_iter()
                    .map(|entry| checked_entry(entry, &group))
                    .collect::<Result<Vec<_>>>()?;
                self.predicates.retain(|e| !e.is_in(group.head));
                self.predicates.extend(entries);
                Ok(())
            }
            Some(GroupFeature::Derived(group)) => Err(Error::not_changeable(self.class_name(), group.view_name())),
            None => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn unset_feature(&mut self, feature: FeatureId) -> Result<()> {
        if feature == binary_logic_op_type::FILTER_PREDICATES {
            self.predicates.clear();
            return Ok(());
        }
        if feature == binary_logic_op_type::FUNCTION {
            self.predicates.retain(|e| e.element != Element::Function);
            return Ok(());
        }
        match find_group(&LOGIC_GROUPS, feature) {
            Some(GroupFeature::Group(group)) => {
                self.predicates.retain(|e| !e.is_in(group.head));
                Ok(())
            }
            Some(GroupFeature::Derived(group)) => Err(Error::not_changeable(self.class_name(), group.view_name())),
            None => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn is_feature_set(&self, feature: FeatureId) -> Result<bool> {
        if feature == binary_logic_op_type::FILTER_PREDICATES {
            return Ok(!self.predicates.is_empty());
        }
        if feature == binary_logic_op_type::FUNCTION {
            return Ok(self.functions().next().is_some());
        }
        match find_group(&LOGIC_GROUPS, feature) {
            Some(GroupFeature::Group(group)) | Some(GroupFeature::Derived(group)) => {
                Ok(self.in_group(group.head).next().is_some())
            }
            None => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::expression::Expression;
    use crate::model::operators::{BinaryComparisonOpType, PropertyIsNullType};
    use predicate_holder as f;

    fn equal_to() -> BinaryComparisonOpType {
        BinaryComparisonOpType::new(Expression::value_reference("name"), Expression::literal("x"))
    }

    #[test]
    fn test_filter_exposes_predicate_through_its_group() {
        let filter = FilterType::new(Predicate::operator(Element::PropertyIsEqualTo, equal_to()).unwrap());

        let Value::Group(entries) = filter.get_feature(f::COMPARISON_OPS_GROUP, true, true).unwrap() else {
            panic!("expected group entries");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].element, Element::PropertyIsEqualTo);

        assert_eq!(filter.get(f::COMPARISON_OPS).unwrap(), Value::object(equal_to()));
        assert!(filter.is_feature_set(f::COMPARISON_OPS).unwrap());
        assert!(!filter.is_feature_set(f::SPATIAL_OPS_GROUP).unwrap());
        assert_eq!(filter.get(f::SPATIAL_OPS).unwrap(), Value::Null);
        assert_eq!(filter.get(f::FUNCTION).unwrap(), Value::Null);
    }

    #[test]
    fn test_setting_another_group_replaces_the_predicate() {
        let mut filter = FilterType::new(Predicate::operator(Element::PropertyIsEqualTo, equal_to()).unwrap());
        let ids = Value::Group(vec![GroupEntry::object(Element::ResourceId, ResourceIdType::new("a.1")).unwrap()]);
        filter.set_feature(f::ID_GROUP, ids).unwrap();
        assert!(!filter.is_feature_set(f::COMPARISON_OPS_GROUP).unwrap());
        assert_eq!(filter.get(f::ID).unwrap(), Value::List(vec![Value::object(ResourceIdType::new("a.1"))]));

        // clearing an inactive group leaves the predicate alone
        filter.set_feature(f::SPATIAL_OPS_GROUP, Value::Null).unwrap();
        assert!(filter.is_feature_set(f::ID_GROUP).unwrap());
    }

    #[test]
    fn test_group_rejects_foreign_elements() {
        let mut filter = FilterType::default();
        let entry = GroupEntry::object(Element::PropertyIsNull, PropertyIsNullType::default()).unwrap();
        let err = filter
            .set_feature(f::SPATIAL_OPS_GROUP, Value::Group(vec![entry]))
            .unwrap_err();
        assert!(err.to_string().contains("spatialOpsGroup"));
        assert!(filter.predicate.is_none());
    }

    #[test]
    fn test_derived_view_is_read_only() {
        let mut not = UnaryLogicOpType::default();
        assert!(matches!(
            not.set_feature(f::LOGIC_OPS, Value::Null),
            Err(Error::NotChangeable { .. })
        ));
        assert!(matches!(not.unset_feature(f::ID), Err(Error::NotChangeable { .. })));
    }

    #[test]
    fn test_function_predicate() {
        let mut filter = FilterType::default();
        filter
            .set_feature(f::FUNCTION, Value::object(FunctionType::new("isOpen")))
            .unwrap();
        assert!(filter.is_feature_set(f::FUNCTION).unwrap());
        assert!(!filter.is_feature_set(f::LOGIC_OPS_GROUP).unwrap());
        filter.unset_feature(f::FUNCTION).unwrap();
        assert!(filter.predicate.is_none());
    }

    #[test]
    fn test_binary_logic_keeps_document_order() {
        use binary_logic_op_type as b;
        let mut and = BinaryLogicOpType::default()
            .with_operand(Element::PropertyIsEqualTo, equal_to())
            .unwrap()
            .with_operand(Element::PropertyIsNull, PropertyIsNullType::default())
            .unwrap();
        and.set_feature(b::FUNCTION, Value::list(vec![Value::object(FunctionType::new("f"))]))
            .unwrap();

        let Value::Group(all) = and.get(b::FILTER_PREDICATES).unwrap() else {
            panic!("expected group entries");
        };
        let elements: Vec<_> = all.iter().map(|e| e.element).collect();
        assert_eq!(
            elements,
            vec![Element::PropertyIsEqualTo, Element::PropertyIsNull, Element::Function]
        );

        let Value::List(comparisons) = and.get(b::COMPARISON_OPS).unwrap() else {
            panic!("expected a list");
        };
        assert_eq!(comparisons.len(), 2);

        and.unset_feature(b::COMPARISON_OPS_GROUP).unwrap();
        assert_eq!(and.predicates.len(), 1);
        assert!(and.is_feature_set(b::FUNCTION).unwrap());
        assert!(matches!(
            and.set_feature(b::ID, Value::Null),
            Err(Error::NotChangeable { .. })
        ));
    }
}
