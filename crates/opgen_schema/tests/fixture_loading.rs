//! Loading the workspace's schema fixtures through the public record-store API.

use std::path::PathBuf;

use opgen_schema::{Arity, AttrKind, RecordSet, SchemaError};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../tests/fixtures")
        .join(name)
}

#[test]
fn test_toy_ops_keep_document_order() {
    let records = RecordSet::from_path(&fixture("toy_ops.json")).unwrap();
    let names: Vec<&str> = records.ops.iter().map(|op| op.def_name.as_str()).collect();
    assert_eq!(names, vec!["Toy_ConcatOp", "Toy_PrintOp", "Toy_ConstantOp", "Toy_CallOp"]);
}

#[test]
fn test_toy_concat_shape() {
    let records = RecordSet::from_path(&fixture("toy_ops.json")).unwrap();
    let concat = records.get("Toy_ConcatOp").unwrap();

    assert_eq!(concat.qual_cpp_class_name(), "Toy::ConcatOp");
    assert_eq!(concat.operation_name(), "toy.concat");
    assert_eq!(concat.loc.as_deref(), Some("toy_ops.td:10"));
    assert_eq!(concat.operand_arity(), Arity::VariadicLast { fixed_prefix: 1 });
    assert_eq!(concat.result_arity(), Arity::Fixed(1));
    assert_eq!(concat.num_args(), 3);

    let axis = &concat.attributes[0];
    assert_eq!(axis.name, "axis");
    assert_eq!(axis.attr.default_value(), Some("0"));
    assert!(matches!(axis.attr.kind, AttrKind::Stored { optional: false, .. }));
}

#[test]
fn test_toy_call_derived_attribute_is_not_an_argument() {
    let records = RecordSet::from_path(&fixture("toy_ops.json")).unwrap();
    let call = records.get("Toy_CallOp").unwrap();
    assert_eq!(call.num_args(), 1);
    assert_eq!(call.attributes.len(), 1);
    assert!(call.attributes[0].attr.is_derived());
    assert_eq!(call.pred_traits().count(), 1);
}

#[test]
fn test_add_fixture_has_unnamed_values() {
    let records = RecordSet::from_path(&fixture("add.json")).unwrap();
    let add = &records.ops[0];
    assert!(add.operands.iter().all(|o| o.name().is_none()));
    assert!(add.results[0].name().is_none());
    assert!(add.has_trait("SameOperandsAndResultType"));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = RecordSet::from_path(&fixture("does_not_exist.json")).unwrap_err();
    assert!(matches!(err, SchemaError::Io { .. }));
    assert!(err.to_string().contains("does_not_exist.json"));
}

#[test]
fn test_malformed_json_points_into_source() {
    let err = RecordSet::from_json_str("{ \"ops\": [ { \"def\": } ] }", "broken.json").unwrap_err();
    match err {
        SchemaError::Json { span, .. } => assert!(span.offset() > 0),
        other => panic!("expected a JSON error, got {other:?}"),
    }
}

#[test]
fn test_duplicate_definitions_rejected() {
    let err = RecordSet::from_json_str(r#"{ "ops": [ { "def": "FooOp" }, { "def": "FooOp" } ] }"#, "dup.json")
        .unwrap_err();
    assert!(matches!(err, SchemaError::Duplicate(ref name) if name == "FooOp"));
}
