//! Registry integration tests
//!
//! Classifier and feature ids are part of the package's public contract;
//! these tests pin them and check the bootstrap and freeze behavior.

use pretty_assertions::assert_eq;
use std::thread;

use fes20::registry::ids::{self, classifier as c};
use fes20::registry::{Classifier, Fes20PackageBuilder, FeatureFlags, TypeRef, XmlKind, XmlType};
use fes20::{fes20, Error};

#[test]
fn test_classifier_ids_are_stable() {
    let registry = fes20().unwrap();
    let expected = [
        (c::ABSTRACT_ADHOC_QUERY_EXPRESSION_TYPE, "AbstractAdhocQueryExpressionType"),
        (c::BINARY_LOGIC_OP_TYPE, "BinaryLogicOpType"),
        (c::DOCUMENT_ROOT, "DocumentRoot"),
        (c::FILTER_TYPE, "FilterType"),
        (c::UPPER_BOUNDARY_TYPE, "UpperBoundaryType"),
        (c::VERSION_ACTION_TOKENS, "VersionActionTokens"),
        (c::ALIASES_TYPE, "AliasesType"),
        (c::VERSION_TYPE, "VersionType"),
    ];
    for (id, name) in expected {
        assert_eq!(registry.classifier_name(id), name);
        assert_eq!(registry.classifier_by_name(name).map(Classifier::id), Some(id));
    }
    assert_eq!(c::ABSTRACT_ADHOC_QUERY_EXPRESSION_TYPE, 0);
    assert_eq!(c::UPPER_BOUNDARY_TYPE, 56);
    assert_eq!(c::VERSION_TYPE, 82);
    assert_eq!(registry.classifiers().len(), c::COUNT);
}

#[test]
fn test_classifier_order_is_classes_enums_datatypes() {
    let registry = fes20().unwrap();
    for (id, classifier) in registry.classifiers().iter().enumerate() {
        assert_eq!(classifier.id(), id);
        match classifier {
            Classifier::Class(_) => assert!(id <= c::UPPER_BOUNDARY_TYPE),
            Classifier::DataType(data_type) if data_type.is_enumeration() => {
                assert!((57..=62).contains(&id), "{} at {}", data_type.name, id)
            }
            Classifier::DataType(data_type) => assert!(id >= c::ALIASES_TYPE, "{} at {}", data_type.name, id),
        }
    }
}

#[test]
fn test_feature_ids_match_published_constants() {
    let registry = fes20().unwrap();
    let checks = [
        (c::BINARY_LOGIC_OP_TYPE, "filterPredicates", ids::binary_logic_op_type::FILTER_PREDICATES),
        (c::BINARY_LOGIC_OP_TYPE, "temporalOpsGroup", ids::binary_logic_op_type::TEMPORAL_OPS_GROUP),
        (c::BINARY_LOGIC_OP_TYPE, "id", ids::binary_logic_op_type::ID),
        (c::FILTER_TYPE, "comparisonOpsGroup", ids::predicate_holder::COMPARISON_OPS_GROUP),
        (c::FILTER_TYPE, "function", ids::predicate_holder::FUNCTION),
        (c::BINARY_COMPARISON_OP_TYPE, "matchCase", ids::binary_comparison_op_type::MATCH_CASE),
        (c::MEASURE_TYPE, "uom", ids::measure_type::UOM),
        (c::RESOURCE_ID_TYPE, "version", ids::resource_id_type::VERSION),
        (c::ABSTRACT_ADHOC_QUERY_EXPRESSION_TYPE, "typeNames", ids::abstract_adhoc_query_expression_type::TYPE_NAMES),
    ];
    for (class, name, id) in checks {
        let feature = registry.feature_by_name(class, name).unwrap();
        assert_eq!(feature.id, id, "{}.{}", registry.classifier_name(class), name);
    }
}

#[test]
fn test_subtypes_continue_supertype_numbering() {
    let registry = fes20().unwrap();
    let adhoc = registry.class(c::ABSTRACT_ADHOC_QUERY_EXPRESSION_TYPE).unwrap();
    assert_eq!(adhoc.inherited_count(), 1);
    assert_eq!(adhoc.features()[0].name, "handle");
    assert_eq!(adhoc.own_features()[0].id, 1);

    assert!(registry.is_subtype_of(c::BINARY_LOGIC_OP_TYPE, c::LOGIC_OPS_TYPE));
    assert!(registry.is_subtype_of(c::FILTER_TYPE, c::ABSTRACT_SELECTION_CLAUSE_TYPE));
    assert!(!registry.is_subtype_of(c::FILTER_TYPE, c::LOGIC_OPS_TYPE));
    assert!(registry.conforms_to(c::FILTER_TYPE, c::FILTER_TYPE));
}

#[test]
fn test_derived_views_are_flagged() {
    let registry = fes20().unwrap();
    let view = registry
        .feature(c::BINARY_LOGIC_OP_TYPE, ids::binary_logic_op_type::COMPARISON_OPS)
        .unwrap();
    assert!(view.is_derived());
    assert!(!view.is_changeable());
    assert_eq!(view.xml.kind, XmlKind::Element);
    assert_eq!(view.xml.group.as_deref(), Some("comparisonOps:group"));

    let group = registry
        .feature(c::BINARY_LOGIC_OP_TYPE, ids::binary_logic_op_type::FILTER_PREDICATES)
        .unwrap();
    assert!(!group.is_derived());
    assert!(group.is_many());
    assert_eq!(group.xml.kind, XmlKind::Group);
}

#[test]
fn test_process_wide_package_is_built_once() {
    let first = fes20().unwrap() as *const _ as usize;
    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(|| fes20().unwrap() as *const _ as usize))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), first);
    }
    assert!(fes20().unwrap().is_frozen());
}

#[test]
fn test_bootstrap_phases_are_idempotent() {
    let mut builder = Fes20PackageBuilder::new();
    builder.create_contents().unwrap();
    builder.create_contents().unwrap();
    builder.initialize_contents().unwrap();
    let features = builder.registry().class(c::FILTER_TYPE).unwrap().feature_count();
    builder.initialize_contents().unwrap();
    assert_eq!(builder.registry().class(c::FILTER_TYPE).unwrap().feature_count(), features);

    let registry = builder.build().unwrap();
    assert_eq!(registry.classifiers().len(), c::COUNT);
    assert_eq!(
        registry.class(c::FILTER_TYPE).unwrap().features(),
        fes20().unwrap().class(c::FILTER_TYPE).unwrap().features()
    );
}

#[test]
fn test_frozen_registry_rejects_mutation() {
    let mut registry = Fes20PackageBuilder::new().build().unwrap();
    assert!(registry.is_frozen());

    let err = registry.register_class("QueryType", false).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
    assert_eq!(err.to_string(), "configuration error: registry 'fes20' is frozen");

    let err = registry
        .add_attribute_feature(
            c::FILTER_TYPE,
            "extra",
            TypeRef::Xml(XmlType::String),
            0,
            1,
            None,
            FeatureFlags::DEFAULT,
        )
        .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_unknown_lookups_are_errors() {
    let registry = fes20().unwrap();
    assert!(matches!(registry.class(c::COUNT), Err(Error::UnknownClassifier(_))));
    assert_eq!(
        registry.class(c::VERSION_TYPE).unwrap_err().to_string(),
        "The class 'VersionType' is not a valid classifier"
    );
    assert!(registry.feature(c::FILTER_TYPE, 99).is_err());
    assert!(registry.classifier_by_name("QueryType").is_none());
}

#[test]
fn test_xml_name_lookup() {
    let registry = fes20().unwrap();
    let feature = registry
        .feature_by_xml_name(c::PROPERTY_IS_LIKE_TYPE, XmlKind::Attribute, None, "wildCard")
        .unwrap();
    assert_eq!(feature.id, ids::property_is_like_type::WILD_CARD);
    assert!(registry
        .feature_by_xml_name(c::PROPERTY_IS_LIKE_TYPE, XmlKind::Element, None, "wildCard")
        .is_none());
}
