//! Reflective dispatch across the whole package
//!
//! Walks every concrete class through the registry and checks the
//! dispatcher contract, then follows a filter end to end and an extension
//! class that inherits from an FES abstract class.

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use fes20::datatypes::{MatchAction, TypeName};
use fes20::model::{
    AbstractAdhocQueryExpressionType, BinaryComparisonOpType, BinaryLogicOpType, Expression, FilterType, FunctionType,
    GroupEntry, LiteralType, MeasureType, MixedEntry, Predicate, PropertyIsLikeType,
};
use fes20::namespaces::QName;
use fes20::registry::ids::{
    abstract_adhoc_query_expression_type as adhoc, binary_comparison_op_type as cmp, binary_logic_op_type as bl,
    classifier as c, function_type, literal_type, measure_type, predicate_holder as ph, property_is_like_type as like,
};
use fes20::registry::{ClassDescriptor, ClassifierId, FeatureFlags, FeatureId, Registry, TypeRef, XmlType};
use fes20::{fes20, xml, Element, Error, FesObject, Fes20Factory, ModelObject, Result, Value};

fn concrete_classes() -> impl Iterator<Item = &'static ClassDescriptor> {
    fes20().unwrap().classes().filter(|class| !class.is_abstract)
}

#[test]
fn test_every_feature_is_readable_on_a_fresh_object() {
    let factory = Fes20Factory::global().unwrap();
    for class in concrete_classes() {
        let object = factory.create(class.id).unwrap();
        for feature in class.features() {
            object
                .get_feature(feature.id, true, false)
                .unwrap_or_else(|e| panic!("{}.{}: {}", class.name, feature.name, e));
            object
                .get_feature(feature.id, true, true)
                .unwrap_or_else(|e| panic!("{}.{} (core): {}", class.name, feature.name, e));
            assert!(!object.is_feature_set(feature.id).unwrap(), "{}.{}", class.name, feature.name);
        }
    }
}

#[test]
fn test_ids_past_the_table_are_unknown() {
    let factory = Fes20Factory::global().unwrap();
    for class in concrete_classes() {
        let mut object = factory.create(class.id).unwrap();
        let past = class.feature_count();
        assert!(
            matches!(object.get_feature(past, true, false), Err(Error::UnknownFeature { .. })),
            "{}",
            class.name
        );
        assert!(matches!(object.set_feature(past, Value::Null), Err(Error::UnknownFeature { .. })));
        assert!(matches!(object.unset_feature(past), Err(Error::UnknownFeature { .. })));
        assert!(matches!(object.is_feature_set(past), Err(Error::UnknownFeature { .. })));
    }
}

#[test]
fn test_read_only_features_reject_writes() {
    let factory = Fes20Factory::global().unwrap();
    let mut checked = 0;
    for class in concrete_classes() {
        for feature in class.features().iter().filter(|f| !f.is_changeable()) {
            let mut object = factory.create(class.id).unwrap();
            let err = object.set_feature(feature.id, Value::Null).unwrap_err();
            assert!(
                matches!(err, Error::NotChangeable { .. }),
                "{}.{}: {}",
                class.name,
                feature.name,
                err
            );
            checked += 1;
        }
    }
    assert!(checked > 20);
}

#[test]
fn test_unset_on_fresh_objects_is_harmless() {
    let factory = Fes20Factory::global().unwrap();
    for class in concrete_classes() {
        let mut object = factory.create(class.id).unwrap();
        for feature in class.features().iter().filter(|f| f.is_changeable()) {
            object
                .unset_feature(feature.id)
                .unwrap_or_else(|e| panic!("{}.{}: {}", class.name, feature.name, e));
            assert!(!object.is_feature_set(feature.id).unwrap());
        }
    }
}

#[test]
fn test_set_get_unset_cycle() {
    let mut measure = MeasureType::default();
    assert_eq!(measure.get(measure_type::VALUE).unwrap(), Value::Double(0.0));

    measure.set_feature(measure_type::VALUE, Value::Double(12.5)).unwrap();
    measure.set_feature(measure_type::UOM, Value::from("m")).unwrap();
    assert_eq!(measure.get(measure_type::VALUE).unwrap(), Value::Double(12.5));
    assert!(measure.is_feature_set(measure_type::UOM).unwrap());

    measure.unset_feature(measure_type::UOM).unwrap();
    assert_eq!(measure.get(measure_type::UOM).unwrap(), Value::Null);
    assert!(!measure.is_feature_set(measure_type::UOM).unwrap());

    let err = measure.set_feature(measure_type::UOM, Value::Boolean(true)).unwrap_err();
    assert!(err.to_string().contains("uom"), "{}", err);
}

#[test]
fn test_defaults_are_reported_but_not_set() {
    let mut op = BinaryComparisonOpType::default();
    assert_eq!(op.get(cmp::MATCH_CASE).unwrap(), Value::Boolean(true));
    assert_eq!(op.get(cmp::MATCH_ACTION).unwrap(), Value::Enum(MatchAction::Any.into()));
    assert!(!op.is_feature_set(cmp::MATCH_CASE).unwrap());

    // explicitly setting the default still counts as set
    op.set_feature(cmp::MATCH_CASE, Value::Boolean(true)).unwrap();
    assert!(op.is_feature_set(cmp::MATCH_CASE).unwrap());
}

#[test]
fn test_many_valued_set_replaces() {
    let mut like = PropertyIsLikeType::new("name", "Ma*");
    let replacement = Value::Group(vec![
        Expression::value_reference("street").to_entry(),
        Expression::literal("*St").to_entry(),
    ]);
    like.set_feature(like::EXPRESSION_GROUP, replacement).unwrap();

    let Value::List(expressions) = like.get(like::EXPRESSION).unwrap() else {
        panic!("expected a list");
    };
    assert_eq!(expressions.len(), 2);
    assert_eq!(expressions[0], Value::String("street".to_string()));
    assert_eq!(expressions[1], Value::object(LiteralType::new("*St")));

    like.set_feature(like::EXPRESSION_GROUP, Value::Group(Vec::new())).unwrap();
    assert!(!like.is_feature_set(like::EXPRESSION).unwrap());
}

#[test]
fn test_group_entries_keep_their_element() {
    let op = BinaryComparisonOpType::new(Expression::value_reference("depth"), Expression::literal("100"));
    let Value::Group(entries) = op.get_feature(cmp::EXPRESSION_GROUP, true, true).unwrap() else {
        panic!("expected group entries");
    };
    let elements: Vec<Element> = entries.iter().map(|e| e.element).collect();
    assert_eq!(elements, vec![Element::ValueReference, Element::Literal]);
    assert!(entries.iter().all(|e| e.is_in(Element::Expression)));
}

#[test]
fn test_mixed_literal_views() {
    let mut literal = LiteralType::new("Main St");
    assert!(literal.is_feature_set(literal_type::MIXED).unwrap());
    assert_eq!(literal.get(literal_type::ANY).unwrap(), Value::Null);

    literal
        .set_feature(literal_type::TYPE, Value::QName(QName::namespaced("http://www.w3.org/2001/XMLSchema", "string")))
        .unwrap();
    assert!(literal.is_feature_set(literal_type::TYPE).unwrap());
    assert_eq!(literal.text(), "Main St");
}

fn and_filter() -> FilterType {
    let equal = BinaryComparisonOpType::new(Expression::value_reference("name"), Expression::literal("Main St"));
    let mut less = BinaryComparisonOpType::new(Expression::value_reference("lanes"), Expression::literal("4"));
    less.match_case = Some(false);
    let and = BinaryLogicOpType::default()
        .with_operand(Element::PropertyIsEqualTo, equal)
        .unwrap()
        .with_operand(Element::PropertyIsLessThan, less)
        .unwrap();
    FilterType::new(Predicate::operator(Element::And, and).unwrap())
}

#[test]
fn test_filter_walk_through_the_dispatcher() {
    let filter = and_filter();
    assert!(filter.is_feature_set(ph::LOGIC_OPS_GROUP).unwrap());
    assert!(!filter.is_feature_set(ph::COMPARISON_OPS_GROUP).unwrap());

    let and = filter.get(ph::LOGIC_OPS).unwrap();
    let and = and.as_object().expect("And object");
    assert_eq!(and.class_id(), c::BINARY_LOGIC_OP_TYPE);
    assert!(and.is_feature_set(bl::COMPARISON_OPS_GROUP).unwrap());
    assert!(!and.is_feature_set(bl::TEMPORAL_OPS_GROUP).unwrap());

    let Value::Group(entries) = and.get_feature(bl::COMPARISON_OPS_GROUP, true, true).unwrap() else {
        panic!("expected group entries");
    };
    let elements: Vec<Element> = entries.iter().map(|e| e.element).collect();
    assert_eq!(elements, vec![Element::PropertyIsEqualTo, Element::PropertyIsLessThan]);

    let Value::List(comparisons) = and.get(bl::COMPARISON_OPS).unwrap() else {
        panic!("expected a list");
    };
    assert_eq!(comparisons.len(), 2);
    let second = comparisons[1].as_object().unwrap();
    assert_eq!(second.get(cmp::MATCH_CASE).unwrap(), Value::Boolean(false));
    let Value::List(operands) = second.get(cmp::EXPRESSION).unwrap() else {
        panic!("expected a list");
    };
    assert_eq!(operands[0], Value::String("lanes".to_string()));
}

#[test]
fn test_replacing_group_entries_through_the_dispatcher() {
    let mut and = BinaryLogicOpType::default();
    let entries = vec![
        GroupEntry::object(
            Element::PropertyIsGreaterThan,
            BinaryComparisonOpType::new(Expression::value_reference("a"), Expression::literal("1")),
        )
        .unwrap(),
    ];
    and.set_feature(bl::COMPARISON_OPS_GROUP, Value::Group(entries.clone())).unwrap();
    and.set_feature(bl::COMPARISON_OPS_GROUP, Value::Group(entries)).unwrap();
    assert_eq!(and.predicates.len(), 1);

    let foreign = GroupEntry::object(Element::And, BinaryLogicOpType::default()).unwrap();
    assert!(and
        .set_feature(bl::COMPARISON_OPS_GROUP, Value::Group(vec![foreign]))
        .is_err());
    assert_eq!(and.predicates.len(), 1);
}

const RICH_FILTER: &str = r#"<fes:Filter xmlns:fes="http://www.opengis.net/fes/2.0" xmlns:gml="http://www.opengis.net/gml/3.2"><fes:Or><fes:Not><fes:PropertyIsLike wildCard="*" singleChar="." escapeChar="\"><fes:ValueReference>name</fes:ValueReference><fes:Literal>Ma*</fes:Literal></fes:PropertyIsLike></fes:Not><fes:DWithin><fes:ValueReference>geom</fes:ValueReference><gml:Point gml:id="p1"><gml:pos>1 2</gml:pos></gml:Point><fes:Distance uom="m">10</fes:Distance></fes:DWithin><fes:After><fes:ValueReference>built</fes:ValueReference><gml:TimeInstant gml:id="t1"><gml:timePosition>2005-05-19T00:00:00Z</gml:timePosition></gml:TimeInstant></fes:After><fes:PropertyIsBetween><fes:ValueReference>depth</fes:ValueReference><fes:LowerBoundary><fes:Literal>100</fes:Literal></fes:LowerBoundary><fes:UpperBoundary><fes:Function name="max"><fes:ValueReference>a</fes:ValueReference><fes:Literal>200</fes:Literal></fes:Function></fes:UpperBoundary></fes:PropertyIsBetween><fes:PropertyIsNull><fes:ValueReference>owner</fes:ValueReference></fes:PropertyIsNull><fes:ResourceId rid="road.1" previousRid="road.0" version="3" startDate="2010-01-01T00:00:00Z"/></fes:Or></fes:Filter>"#;

const SORT_BY: &str = r#"<fes:SortBy xmlns:fes="http://www.opengis.net/fes/2.0"><fes:SortProperty><fes:ValueReference>age</fes:ValueReference><fes:SortOrder>DESC</fes:SortOrder></fes:SortProperty><fes:SortProperty><fes:ValueReference>name</fes:ValueReference></fes:SortProperty></fes:SortBy>"#;

/// Every object reachable from `value`, outermost first
fn collect_objects(value: &Value, out: &mut Vec<FesObject>) {
    match value {
        Value::Object(object) => {
            out.push((**object).clone());
            let class = fes20().unwrap().class(object.class_id()).unwrap();
            for feature in class.features().iter().filter(|f| !f.is_derived()) {
                collect_objects(&object.get_feature(feature.id, true, true).unwrap(), out);
            }
        }
        Value::List(items) => items.iter().for_each(|item| collect_objects(item, out)),
        Value::Group(entries) => entries.iter().for_each(|entry| collect_objects(&entry.value, out)),
        Value::Mixed(entries) => {
            for entry in entries {
                if let MixedEntry::Element(entry) = entry {
                    collect_objects(&entry.value, out);
                }
            }
        }
        _ => {}
    }
}

/// Fresh object with every stored feature of `object` written through the dispatcher
fn copy_through_dispatcher(object: &FesObject) -> FesObject {
    let class = fes20().unwrap().class(object.class_id()).unwrap();
    let mut copy = Fes20Factory::global().unwrap().create(class.id).unwrap();
    for feature in class.features().iter().filter(|f| f.is_changeable() && !f.is_derived()) {
        if object.is_feature_set(feature.id).unwrap() {
            let value = object.get_feature(feature.id, true, true).unwrap();
            copy.set_feature(feature.id, value)
                .unwrap_or_else(|e| panic!("{}.{}: {}", class.name, feature.name, e));
            assert!(copy.is_feature_set(feature.id).unwrap(), "{}.{}", class.name, feature.name);
        }
    }
    copy
}

#[test]
fn test_get_after_set_over_read_documents() {
    let mut objects = Vec::new();
    for text in [RICH_FILTER, SORT_BY] {
        let document = xml::from_str(text).unwrap();
        collect_objects(&document.root().unwrap().value, &mut objects);
    }

    let mut classes: Vec<ClassifierId> = objects.iter().map(|o| o.class_id()).collect();
    classes.sort_unstable();
    classes.dedup();
    assert!(classes.len() >= 14, "only {} classes reached", classes.len());

    for object in &objects {
        assert_eq!(&copy_through_dispatcher(object), object, "{}", object.class_name());
    }
}

fn paths() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,8}(/[a-z]{1,8}){0,2}", 0..6)
}

proptest! {
    #[test]
    fn prop_list_set_replaces_previous_content(first in paths(), second in paths()) {
        let mut function = FunctionType::new("concat");
        for values in [&first, &second] {
            let entries = values
                .iter()
                .map(|p| Expression::value_reference(p.as_str()).to_entry())
                .collect();
            function.set_feature(function_type::EXPRESSION_GROUP, Value::Group(entries)).unwrap();
        }
        let expected: Vec<Value> = second.iter().map(|p| Value::String(p.clone())).collect();
        prop_assert_eq!(function.get(function_type::EXPRESSION).unwrap(), Value::List(expected));
        prop_assert_eq!(function.is_feature_set(function_type::EXPRESSION_GROUP).unwrap(), !second.is_empty());
    }

    #[test]
    fn prop_aliases_round_trip(first in prop::collection::vec("[a-z][a-z0-9]{0,6}", 0..5),
                               second in prop::collection::vec("[a-z][a-z0-9]{0,6}", 0..5)) {
        let mut query = AbstractAdhocQueryExpressionType::default();
        query.set_feature(adhoc::ALIASES, Value::list(first.clone())).unwrap();
        query.set_feature(adhoc::ALIASES, Value::list(second.clone())).unwrap();
        prop_assert_eq!(query.get(adhoc::ALIASES).unwrap(), Value::list(second.clone()));

        query.unset_feature(adhoc::ALIASES).unwrap();
        prop_assert_eq!(query.get(adhoc::ALIASES).unwrap(), Value::List(Vec::new()));
        prop_assert!(!query.is_feature_set(adhoc::ALIASES).unwrap());
    }
}

// ----------------------------------------------------------------------------
// Extension package
// ----------------------------------------------------------------------------

const WFS_NAMESPACE: &str = "http://www.opengis.net/wfs/2.0";

fn wfs_registry() -> (Registry, ClassifierId, FeatureId) {
    let mut registry = Registry::new("wfs", WFS_NAMESPACE, "wfs");
    let query = registry.register_class("QueryType", false).unwrap();
    registry
        .add_external_supertype(query, fes20().unwrap(), c::ABSTRACT_ADHOC_QUERY_EXPRESSION_TYPE)
        .unwrap();
    let srs_name = registry
        .add_attribute_feature(query, "srsName", TypeRef::Xml(XmlType::AnyUri), 0, 1, None, FeatureFlags::DEFAULT)
        .unwrap();
    registry.freeze();
    (registry, query, srs_name)
}

/// A WFS query: the FES ad hoc query state plus its own features
#[derive(Debug, Default)]
struct QueryType {
    base: AbstractAdhocQueryExpressionType,
    srs_name: Option<String>,
}

const QUERY_TYPE: ClassifierId = 0;
const SRS_NAME: FeatureId = adhoc::FEATURE_COUNT;

impl ModelObject for QueryType {
    fn class_id(&self) -> ClassifierId {
        QUERY_TYPE
    }

    fn class_name(&self) -> &'static str {
        "QueryType"
    }

    fn get_feature(&self, feature: FeatureId, resolve: bool, core: bool) -> Result<Value> {
        match feature {
            f if f < adhoc::FEATURE_COUNT => self.base.get_feature(f, resolve, core),
            SRS_NAME => Ok(Value::from_option(self.srs_name.clone())),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn set_feature(&mut self, feature: FeatureId, value: Value) -> Result<()> {
        match feature {
            f if f < adhoc::FEATURE_COUNT => self.base.set_feature(f, value),
            SRS_NAME => {
                self.srs_name = value.into_string("srsName")?;
                Ok(())
            }
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn unset_feature(&mut self, feature: FeatureId) -> Result<()> {
        match feature {
            f if f < adhoc::FEATURE_COUNT => self.base.unset_feature(f),
            SRS_NAME => {
                self.srs_name = None;
                Ok(())
            }
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }

    fn is_feature_set(&self, feature: FeatureId) -> Result<bool> {
        match feature {
            f if f < adhoc::FEATURE_COUNT => self.base.is_feature_set(f),
            SRS_NAME => Ok(self.srs_name.is_some()),
            _ => Err(Error::unknown_feature(self.class_name(), self.class_id(), feature)),
        }
    }
}

#[test]
fn test_extension_class_continues_inherited_numbering() {
    let (registry, query, srs_name) = wfs_registry();
    assert_eq!(query, QUERY_TYPE);
    assert_eq!(srs_name, SRS_NAME);

    let class = registry.class(query).unwrap();
    assert_eq!(class.inherited_count(), adhoc::FEATURE_COUNT);
    assert_eq!(class.features()[adhoc::HANDLE].name, "handle");
    assert_eq!(class.features()[adhoc::TYPE_NAMES].name, "typeNames");
    assert_eq!(
        class.external_supertypes,
        vec!["{http://www.opengis.net/fes/2.0}AbstractAdhocQueryExpressionType".to_string()]
    );
}

#[test]
fn test_inherited_features_fall_through_to_the_base() {
    let (registry, query, _) = wfs_registry();
    let mut object = QueryType::default();

    object.set_feature(adhoc::HANDLE, Value::from("q1")).unwrap();
    object
        .set_feature(
            adhoc::TYPE_NAMES,
            Value::List(vec![TypeName::Name(QName::namespaced("urn:roads", "Road")).to_value()]),
        )
        .unwrap();
    object.set_feature(SRS_NAME, Value::from("urn:ogc:def:crs:EPSG::4326")).unwrap();
    object
        .set_feature(adhoc::ABSTRACT_SELECTION_CLAUSE, Value::object(and_filter()))
        .unwrap();

    assert_eq!(object.base.base.handle.as_deref(), Some("q1"));
    assert_eq!(object.base.type_names.len(), 1);

    for feature in registry.class(query).unwrap().features() {
        let expected = feature.id != adhoc::ABSTRACT_PROJECTION_CLAUSE
            && feature.id != adhoc::ABSTRACT_SORTING_CLAUSE
            && feature.id != adhoc::ALIASES;
        assert_eq!(object.is_feature_set(feature.id).unwrap(), expected, "{}", feature.name);
    }

    object.unset_feature(adhoc::HANDLE).unwrap();
    assert_eq!(object.get(adhoc::HANDLE).unwrap(), Value::Null);
    assert!(matches!(
        object.get(SRS_NAME + 1),
        Err(Error::UnknownFeature { .. })
    ));
}

#[test]
fn test_extension_registry_does_not_touch_the_package() {
    let _ = wfs_registry();
    let fes = fes20().unwrap();
    assert!(fes.classifier_by_name("QueryType").is_none());
    assert_eq!(
        fes.class(c::ABSTRACT_ADHOC_QUERY_EXPRESSION_TYPE).unwrap().feature_count(),
        adhoc::FEATURE_COUNT
    );
}
