//! XML binding integration tests
//!
//! Builds the filter from the package overview through the typed API,
//! writes it, reads it back and checks the documents agree.

use pretty_assertions::assert_eq;
use std::io::Write;

use fes20::datatypes::{VersionAction, Version};
use fes20::model::{
    BinaryComparisonOpType, BinaryLogicOpType, Expression, FilterType, Predicate, PropertyIsBetweenType,
    ResourceIdType,
};
use fes20::registry::ids::{binary_logic_op_type as bl, predicate_holder as ph};
use fes20::{
    fes20, xml, Diagnostician, DocumentRoot, Element, Error, Limits, ModelObject, Value, WriterConfig, XmlReader,
    XmlWriter,
};

const EXPECTED: &str = "<fes:Filter xmlns:fes=\"http://www.opengis.net/fes/2.0\"><fes:And>\
<fes:PropertyIsEqualTo matchCase=\"false\"><fes:ValueReference>name</fes:ValueReference>\
<fes:Literal>Main St</fes:Literal></fes:PropertyIsEqualTo>\
<fes:PropertyIsBetween><fes:ValueReference>depth</fes:ValueReference>\
<fes:LowerBoundary><fes:Literal>100</fes:Literal></fes:LowerBoundary>\
<fes:UpperBoundary><fes:Literal>200</fes:Literal></fes:UpperBoundary></fes:PropertyIsBetween>\
<fes:ResourceId rid=\"road.1\" version=\"LAST\"/></fes:And></fes:Filter>";

fn road_filter() -> DocumentRoot {
    let mut equal = BinaryComparisonOpType::new(Expression::value_reference("name"), Expression::literal("Main St"));
    equal.match_case = Some(false);
    let between = PropertyIsBetweenType::new(
        Expression::value_reference("depth"),
        Expression::literal("100"),
        Expression::literal("200"),
    );
    let and = BinaryLogicOpType::default()
        .with_operand(Element::PropertyIsEqualTo, equal)
        .unwrap()
        .with_operand(Element::PropertyIsBetween, between)
        .unwrap()
        .with_operand(
            Element::ResourceId,
            ResourceIdType::new("road.1").with_version(Version::Action(VersionAction::Last)),
        )
        .unwrap();
    let filter = FilterType::new(Predicate::operator(Element::And, and).unwrap());
    DocumentRoot::with_root(Element::Filter, Value::object(filter)).unwrap()
}

fn compact_writer() -> XmlWriter<'static> {
    XmlWriter::fes20()
        .unwrap()
        .with_config(WriterConfig::new().without_indent().with_xml_declaration(false))
}

#[test]
fn test_writes_the_road_filter() {
    let written = compact_writer().write_document(&road_filter()).unwrap();
    assert_eq!(written, EXPECTED);
}

#[test]
fn test_reads_back_what_was_written() {
    let document = road_filter();
    let written = xml::to_string(&document).unwrap();
    assert!(written.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));

    let reread = xml::from_str(&written).unwrap();
    assert_eq!(reread.root(), document.root());
    assert_eq!(
        reread.xmlns_prefix_map.get("fes").map(String::as_str),
        Some("http://www.opengis.net/fes/2.0")
    );
    assert_eq!(compact_writer().write_document(&reread).unwrap(), EXPECTED);
}

#[test]
fn test_read_filter_through_the_dispatcher() {
    let document = xml::from_str(EXPECTED).unwrap();
    let filter = document.root().and_then(|e| e.as_object()).unwrap();
    assert_eq!(filter.class_name(), "FilterType");

    let and = filter.get(ph::LOGIC_OPS).unwrap();
    let and = and.as_object().unwrap();
    let Value::Group(predicates) = and.get(bl::FILTER_PREDICATES).unwrap() else {
        panic!("expected group entries");
    };
    let elements: Vec<Element> = predicates.iter().map(|e| e.element).collect();
    assert_eq!(
        elements,
        vec![Element::PropertyIsEqualTo, Element::PropertyIsBetween, Element::ResourceId]
    );
    assert!(and.is_feature_set(bl::ID_GROUP).unwrap());
    assert!(!and.is_feature_set(bl::SPATIAL_OPS_GROUP).unwrap());

    assert!(Diagnostician::fes20().unwrap().is_valid(filter.as_model()));
}

#[test]
fn test_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(xml::to_string(&road_filter()).unwrap().as_bytes()).unwrap();

    let document = XmlReader::fes20().unwrap().read_file(file.path()).unwrap();
    assert_eq!(document.root(), road_filter().root());
}

#[test]
fn test_indented_output_reads_the_same() {
    let indented = XmlWriter::fes20()
        .unwrap()
        .with_config(WriterConfig::new().with_indent(4))
        .write_document(&road_filter())
        .unwrap();
    assert!(indented.contains("\n    <fes:And>"));
    assert_eq!(xml::from_str(&indented).unwrap().root(), road_filter().root());
}

#[test]
fn test_invalid_document_is_read_but_diagnosed() {
    let text = r#"<fes:Filter xmlns:fes="http://www.opengis.net/fes/2.0">
        <fes:PropertyIsLike wildCard="*" singleChar=".">
            <fes:ValueReference>name</fes:ValueReference>
            <fes:Literal>Ma*</fes:Literal>
        </fes:PropertyIsLike>
    </fes:Filter>"#;
    let document = xml::from_str(text).unwrap();
    let filter = document.root().and_then(|e| e.as_object()).unwrap();

    let diagnostics = Diagnostician::new(fes20().unwrap()).validate(filter.as_model());
    assert_eq!(diagnostics.len(), 1, "{:?}", diagnostics);
    assert!(diagnostics[0]
        .message
        .contains("The required feature 'escapeChar' of 'PropertyIsLikeType' must be set"));
}

#[test]
fn test_reader_errors() {
    assert!(matches!(xml::from_str("<fes:Filter"), Err(Error::Xml(_))));
    assert!(matches!(
        xml::from_str("<Filter xmlns=\"urn:other\"/>"),
        Err(Error::Decode(_))
    ));

    let deep = XmlReader::fes20()
        .unwrap()
        .with_limits(Limits::default().with_max_depth(2))
        .read_document(EXPECTED);
    assert!(matches!(deep, Err(Error::LimitExceeded(_))));
}

fn literal_with_nested(levels: usize, attributes: usize) -> String {
    let attrs: String = (0..attributes).map(|i| format!(" a{}=\"{}\"", i, i)).collect();
    format!(
        "<fes:Filter xmlns:fes=\"http://www.opengis.net/fes/2.0\" xmlns:g=\"urn:geometry\">\
         <fes:PropertyIsEqualTo><fes:ValueReference>shape</fes:ValueReference>\
         <fes:Literal>{}{}</fes:Literal></fes:PropertyIsEqualTo></fes:Filter>",
        format!("<g:a{}>", attrs).repeat(levels),
        "</g:a>".repeat(levels)
    )
}

#[test]
fn test_limits_cover_wildcard_content() {
    let reader = XmlReader::fes20().unwrap().with_limits(Limits::strict());

    let shallow = reader.read_document(&literal_with_nested(10, 0));
    assert!(shallow.is_ok(), "{:?}", shallow.err());

    let deep = reader.read_document(&literal_with_nested(100, 0));
    assert!(matches!(deep, Err(Error::LimitExceeded(_))), "{:?}", deep);

    let wide = reader.read_document(&literal_with_nested(1, 40));
    assert!(matches!(wide, Err(Error::LimitExceeded(_))), "{:?}", wide);
}
