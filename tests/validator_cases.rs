//! Rejection matrix for the conformance validator.
//!
//! Each case corrupts one aspect of an otherwise-valid wire document and
//! asserts the validator fails with the expected violation kind.

use rstest::rstest;

use parser_ir::ir::validate::{validate, validate_value};
use parser_ir::ir::{IrErrorKind, Value, ValueMap};

fn span_value(start: i64, end: i64) -> Value {
    let mut span = ValueMap::new();
    span.insert("start", start);
    span.insert("end", end);
    Value::Object(span)
}

fn node_value(id: &str) -> Value {
    let mut node = ValueMap::new();
    node.insert("id", id);
    node.insert("kind", "RuleDecl");
    node.insert("span", span_value(0, 0));
    Value::Object(node)
}

fn minimal_doc() -> ValueMap {
    let mut doc = ValueMap::new();
    doc.insert("irVersion", "1.0");
    doc.insert("source", "in-memory://g");
    doc.insert("nodes", vec![node_value("G::Start")]);
    doc.insert("diagnostics", Vec::<Value>::new());
    doc
}

#[test]
fn test_minimal_document_is_valid() {
    let document = validate_value(&Value::Object(minimal_doc())).unwrap();
    assert_eq!(document.ir_version(), "1.0");
    assert_eq!(document.nodes().len(), 1);
}

#[rstest]
#[case::blank_ir_version("irVersion", Value::string("  "), IrErrorKind::InputContract)]
#[case::non_string_ir_version("irVersion", Value::Int(1), IrErrorKind::StructuralType)]
#[case::blank_source("source", Value::string(" "), IrErrorKind::InputContract)]
#[case::non_string_source("source", Value::Bool(true), IrErrorKind::StructuralType)]
#[case::empty_nodes("nodes", Value::Array(Vec::new()), IrErrorKind::InputContract)]
#[case::non_array_nodes("nodes", Value::string("nodes"), IrErrorKind::StructuralType)]
#[case::non_array_diagnostics("diagnostics", Value::Int(0), IrErrorKind::StructuralType)]
fn test_rejects_corrupted_field(
    #[case] key: &str,
    #[case] value: Value,
    #[case] expected: IrErrorKind,
) {
    let mut doc = minimal_doc();
    doc.insert(key, value);

    let err = validate_value(&Value::Object(doc)).unwrap_err();
    assert_eq!(err.kind(), expected);
}

#[rstest]
#[case::missing_ir_version("irVersion")]
#[case::missing_source("source")]
#[case::missing_nodes("nodes")]
#[case::missing_diagnostics("diagnostics")]
fn test_rejects_missing_required_key(#[case] key: &str) {
    let mut doc = ValueMap::new();
    for (k, v) in minimal_doc().iter() {
        if k != key {
            doc.insert(k.clone(), v.clone());
        }
    }

    let err = validate_value(&Value::Object(doc)).unwrap_err();
    assert_eq!(err.kind(), IrErrorKind::InputContract);
    assert!(err.message().contains(key));
}

#[test]
fn test_rejects_duplicate_node_id() {
    let mut doc = minimal_doc();
    doc.insert("nodes", vec![node_value("G::Start"), node_value("G::Start")]);

    let err = validate_value(&Value::Object(doc)).unwrap_err();
    assert_eq!(err.kind(), IrErrorKind::Referential);
    assert!(err.message().contains("duplicate node id: G::Start"));
}

#[test]
fn test_rejects_inverted_span() {
    let mut node = ValueMap::new();
    node.insert("id", "G::Start");
    node.insert("kind", "RuleDecl");
    node.insert("span", span_value(5, 2));
    let mut doc = minimal_doc();
    doc.insert("nodes", vec![Value::Object(node)]);

    let err = validate_value(&Value::Object(doc)).unwrap_err();
    assert_eq!(err.kind(), IrErrorKind::StructuralType);
    assert!(err.message().contains("span.start <= span.end"));
}

#[test]
fn test_rejects_non_numeric_span_fields() {
    let mut span = ValueMap::new();
    span.insert("start", "0");
    span.insert("end", 0i64);
    let mut node = ValueMap::new();
    node.insert("id", "G::Start");
    node.insert("kind", "RuleDecl");
    node.insert("span", span);
    let mut doc = minimal_doc();
    doc.insert("nodes", vec![Value::Object(node)]);

    let err = validate_value(&Value::Object(doc)).unwrap_err();
    assert_eq!(err.kind(), IrErrorKind::StructuralType);
    assert!(err.message().contains("start"));
}

#[test]
fn test_rejects_non_object_node() {
    let mut doc = minimal_doc();
    doc.insert("nodes", vec![Value::string("G::Start")]);

    let err = validate_value(&Value::Object(doc)).unwrap_err();
    assert_eq!(err.kind(), IrErrorKind::StructuralType);
    assert!(err.message().contains("node must be an object"));
}

#[test]
fn test_rejects_dangling_parent_id() {
    let mut node = ValueMap::new();
    node.insert("id", "G::Child");
    node.insert("kind", "RuleDecl");
    node.insert("span", span_value(0, 0));
    node.insert("parentId", "G::Missing");
    let mut doc = minimal_doc();
    doc.insert("nodes", vec![Value::Object(node)]);

    let err = validate_value(&Value::Object(doc)).unwrap_err();
    assert_eq!(err.kind(), IrErrorKind::Referential);
    assert!(err.message().contains("G::Missing"));
}

#[test]
fn test_rejects_one_directional_parent_link() {
    let parent = node_value("G::Parent");
    let mut child = ValueMap::new();
    child.insert("id", "G::Child");
    child.insert("kind", "RuleDecl");
    child.insert("span", span_value(0, 0));
    child.insert("parentId", "G::Parent");
    let mut doc = minimal_doc();
    doc.insert("nodes", vec![parent, Value::Object(child)]);

    let err = validate_value(&Value::Object(doc)).unwrap_err();
    assert_eq!(err.kind(), IrErrorKind::Referential);
    assert!(err
        .message()
        .contains("parent G::Parent does not list G::Child"));
}

#[test]
fn test_accepts_bidirectional_parent_link() {
    let mut parent = ValueMap::new();
    parent.insert("id", "G::Parent");
    parent.insert("kind", "RuleDecl");
    parent.insert("span", span_value(0, 0));
    parent.insert("children", vec![Value::string("G::Child")]);
    let mut child = ValueMap::new();
    child.insert("id", "G::Child");
    child.insert("kind", "RuleDecl");
    child.insert("span", span_value(0, 0));
    child.insert("parentId", "G::Parent");
    let mut doc = minimal_doc();
    doc.insert("nodes", vec![Value::Object(parent), Value::Object(child)]);

    let document = validate_value(&Value::Object(doc)).unwrap();
    assert_eq!(document.nodes()[0].children(), ["G::Child".to_string()]);
}

#[rstest]
#[case::dangling(Value::string("G::Missing"), IrErrorKind::Referential)]
#[case::blank(Value::string("  "), IrErrorKind::StructuralType)]
#[case::non_string(Value::Int(1), IrErrorKind::StructuralType)]
fn test_rejects_bad_children_entries(#[case] entry: Value, #[case] expected: IrErrorKind) {
    let mut parent = ValueMap::new();
    parent.insert("id", "G::Parent");
    parent.insert("kind", "RuleDecl");
    parent.insert("span", span_value(0, 0));
    parent.insert("children", vec![entry]);
    let mut doc = minimal_doc();
    doc.insert("nodes", vec![Value::Object(parent)]);

    let err = validate_value(&Value::Object(doc)).unwrap_err();
    assert_eq!(err.kind(), expected);
}

#[test]
fn test_rejects_duplicate_children_entries() {
    let mut parent = ValueMap::new();
    parent.insert("id", "G::Parent");
    parent.insert("kind", "RuleDecl");
    parent.insert("span", span_value(0, 0));
    parent.insert(
        "children",
        vec![Value::string("G::Child"), Value::string("G::Child")],
    );
    let mut child = ValueMap::new();
    child.insert("id", "G::Child");
    child.insert("kind", "RuleDecl");
    child.insert("span", span_value(0, 0));
    child.insert("parentId", "G::Parent");
    let mut doc = minimal_doc();
    doc.insert("nodes", vec![Value::Object(parent), Value::Object(child)]);

    let err = validate_value(&Value::Object(doc)).unwrap_err();
    assert_eq!(err.kind(), IrErrorKind::Referential);
    assert!(err.message().contains("duplicate child id: G::Child"));
}

#[test]
fn test_rejects_dangling_annotation_target() {
    let mut payload = ValueMap::new();
    payload.insert("enabled", true);
    let mut annotation = ValueMap::new();
    annotation.insert("targetId", "G::Missing");
    annotation.insert("name", "root");
    annotation.insert("payload", payload);
    let mut doc = minimal_doc();
    doc.insert("annotations", vec![Value::Object(annotation)]);

    let err = validate_value(&Value::Object(doc)).unwrap_err();
    assert_eq!(err.kind(), IrErrorKind::Referential);
    assert!(err.message().contains("G::Missing"));
}

#[test]
fn test_rejects_unknown_annotation_name() {
    let mut annotation = ValueMap::new();
    annotation.insert("targetId", "G::Start");
    annotation.insert("name", "made-up");
    annotation.insert("payload", ValueMap::new());
    let mut doc = minimal_doc();
    doc.insert("annotations", vec![Value::Object(annotation)]);

    let err = validate_value(&Value::Object(doc)).unwrap_err();
    assert_eq!(err.kind(), IrErrorKind::Domain);
    assert!(err.message().contains("unsupported annotation name: made-up"));
}

#[test]
fn test_rejects_bad_scope_event_vocabulary() {
    let mut event = ValueMap::new();
    event.insert("event", "enterScope");
    event.insert("scopeId", "scope:G::Start");
    event.insert("scopeMode", "global");
    event.insert("span", span_value(0, 0));
    let mut doc = minimal_doc();
    doc.insert("scopeEvents", vec![Value::Object(event)]);

    let err = validate_value(&Value::Object(doc)).unwrap_err();
    assert_eq!(err.kind(), IrErrorKind::Domain);
    assert!(err.message().contains("unsupported scope mode"));

    let mut event = ValueMap::new();
    event.insert("event", "openScope");
    event.insert("scopeId", "scope:G::Start");
    event.insert("scopeMode", "lexical");
    event.insert("span", span_value(0, 0));
    let mut doc = minimal_doc();
    doc.insert("scopeEvents", vec![Value::Object(event)]);

    let err = validate_value(&Value::Object(doc)).unwrap_err();
    assert_eq!(err.kind(), IrErrorKind::Domain);
    assert!(err.message().contains("unsupported scope event"));
}

#[test]
fn test_revalidation_is_idempotent() {
    let wire = Value::Object(minimal_doc());
    let first = validate_value(&wire).unwrap();
    let second = validate_value(&wire).unwrap();
    assert_eq!(first, second);

    validate(&first).unwrap();
    validate(&first).unwrap();
    assert_eq!(first, second);
}
