//! Integration tests for the batch generators
//!
//! These tests run `gen-op-decls` / `gen-op-defs` over the JSON fixtures end to end (load, validate, generate)
//! without going through the CLI binary.

use std::path::Path;

use opgen::backend::{EmitConfig, GenError, GenRegistry, build_op_class, emit_op_decls, emit_op_defs};
use opgen_schema::{RecordSet, SchemaError};

fn fixture(name: &str) -> RecordSet {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
    RecordSet::from_path(&path).expect("fixture should load")
}

fn decls(records: &RecordSet, config: &EmitConfig) -> String {
    let mut out = String::new();
    emit_op_decls(&records.ops, config, &mut out).expect("decls should generate");
    out
}

fn defs(records: &RecordSet, config: &EmitConfig) -> String {
    let mut out = String::new();
    emit_op_defs(&records.ops, config, &mut out).expect("defs should generate");
    out
}

// ============================================================================
// End-to-end: the `add` op
// ============================================================================

#[test]
fn test_add_op_name_accessor() {
    let records = fixture("add.json");
    let out = defs(&records, &EmitConfig::new());
    assert!(out.contains("StringRef add::getOperationName() {\n  return \"add\";\n}"));
}

#[test]
fn test_add_op_has_no_value_accessors() {
    let class = build_op_class(&fixture("add.json").ops[0]).unwrap();
    let names: Vec<&str> = class.methods().iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["getOperationName", "build", "build", "build"]);
}

#[test]
fn test_add_op_deduced_builder_copies_first_operand_type() {
    let class = build_op_class(&fixture("add.json").ops[0]).unwrap();
    let builds: Vec<_> = class.methods_named("build").collect();
    assert_eq!(builds.len(), 3);
    assert_eq!(
        builds[2].signature().params(),
        "Builder *, OperationState *tblgen_state, Value *tblgen_arg_0, Value *tblgen_arg_1"
    );
    assert!(
        builds[2]
            .body()
            .text()
            .unwrap()
            .contains("tblgen_state->addTypes({tblgen_arg_0->getType()});")
    );
}

#[test]
fn test_add_op_has_no_verifier() {
    let class = build_op_class(&fixture("add.json").ops[0]).unwrap();
    assert!(!class.has_method("verify"));
}

// ============================================================================
// Batch framing
// ============================================================================

#[test]
fn test_decls_batch_layout() {
    let out = decls(&fixture("toy_ops.json"), &EmitConfig::new());
    assert!(out.starts_with("/*===- Generated file "));
    assert!(out.contains("|* Op Declarations"));
    assert!(out.contains("#ifdef GET_OP_CLASSES\n#undef GET_OP_CLASSES\n\n"));
    assert!(!out.contains("GET_OP_LIST"));

    let concat = out.find("// Toy::ConcatOp declarations").unwrap();
    let print = out.find("// Toy::PrintOp declarations").unwrap();
    let constant = out.find("// Toy::ConstantOp declarations").unwrap();
    let call = out.find("// Toy::CallOp declarations").unwrap();
    assert!(concat < print && print < constant && constant < call);
    assert!(out.ends_with("};\n#endif  // GET_OP_CLASSES\n\n"));
}

#[test]
fn test_defs_batch_starts_with_op_list() {
    let out = defs(&fixture("toy_ops.json"), &EmitConfig::new().with_file_header(false));
    assert!(out.starts_with(
        "#ifdef GET_OP_LIST\n#undef GET_OP_LIST\n\nToy::ConcatOp,\nToy::PrintOp,\nToy::ConstantOp,\nToy::CallOp\n\
         #endif  // GET_OP_LIST\n\n#ifdef GET_OP_CLASSES\n"
    ));
}

#[test]
fn test_generation_is_deterministic() {
    let records = fixture("toy_ops.json");
    let config = EmitConfig::new();
    assert_eq!(decls(&records, &config), decls(&records, &config));
    assert_eq!(defs(&records, &config), defs(&records, &config));
}

#[test]
fn test_empty_schema_still_frames_output() {
    let records = RecordSet::from_json_str(r#"{ "ops": [] }"#, "empty.json").unwrap();
    let out = defs(&records, &EmitConfig::new().with_file_header(false));
    assert_eq!(
        out,
        "#ifdef GET_OP_LIST\n#undef GET_OP_LIST\n\n\n#endif  // GET_OP_LIST\n\n\
         #ifdef GET_OP_CLASSES\n#undef GET_OP_CLASSES\n\n\n#endif  // GET_OP_CLASSES\n\n"
    );
}

// ============================================================================
// Individual op shapes
// ============================================================================

#[test]
fn test_print_op_hooks() {
    let records = fixture("toy_ops.json");
    let out = defs(&records, &EmitConfig::new());
    assert!(out.contains(
        "bool PrintOp::parse(OpAsmParser *parser, OperationState *result) {\n  return parsePrintOp(parser, result);\n}"
    ));
    assert!(out.contains("void PrintOp::print(OpAsmPrinter *p) {\n  *p << \"toy.print \" << *input();\n}"));
    assert!(out.contains("LogicalResult PrintOp::verify() {\n  return verifyPrintOp(*this);\n}"));

    let decl_out = decls(&records, &EmitConfig::new());
    assert!(decl_out.contains("  static bool parse(OpAsmParser *parser, OperationState *result);\n"));
    assert!(decl_out.contains("  void print(OpAsmPrinter *p);\n"));
}

#[test]
fn test_call_op_variadics_and_trait_predicate() {
    let records = fixture("toy_ops.json");
    let call = records.get("Toy_CallOp").unwrap();
    let class = build_op_class(call).unwrap();

    assert_eq!(
        class.traits(),
        &[
            "OpTrait::VariadicResults".to_string(),
            "OpTrait::VariadicOperands".to_string(),
        ]
    );
    assert_eq!(class.methods_named("build").count(), 2);
    assert!(class.methods_named("getCanonicalizationPatterns").all(|m| m.body().is_decl_only()));

    let verify = class.methods_named("verify").next().unwrap();
    assert_eq!(
        verify.body().text().unwrap(),
        "  if (!((*this->getOperation()).getNumRegions() == 0))\n    \
         return emitOpError(\"failed to verify that op has no regions\");\n  return mlir::success();\n"
    );

    let aggregate = class.methods_named("build").nth(1).unwrap().body().text().unwrap();
    assert!(!aggregate.contains("assert("));
}

#[test]
fn test_derived_attribute_getter_and_no_builder_param() {
    let records = fixture("toy_ops.json");
    let class = build_op_class(records.get("Toy_CallOp").unwrap()).unwrap();
    let getter = class.methods_named("numInputs").next().unwrap();
    assert_eq!(getter.signature().return_type(), "unsigned");
    assert_eq!(getter.body().text(), Some("  return getOperation()->getNumOperands();\n"));

    let standalone = class.methods_named("build").next().unwrap();
    assert_eq!(
        standalone.signature().params(),
        "Builder *, OperationState *tblgen_state, ArrayRef<Type> resultType0, ArrayRef<Value *> inputs"
    );
}

// ============================================================================
// Verifier omission
// ============================================================================

#[test]
fn test_verifier_appears_with_one_predicated_operand() {
    let plain = RecordSet::from_json_str(r#"{ "ops": [ { "def": "NopOp" } ] }"#, "nop.json").unwrap();
    assert!(!build_op_class(&plain.ops[0]).unwrap().has_method("verify"));

    let checked = RecordSet::from_json_str(
        r#"{ "ops": [ { "def": "NopOp", "arguments": [ { "operand": { "predicate": "$_self.isInteger()", "description": "integer" } } ] } ] }"#,
        "nop.json",
    )
    .unwrap();
    assert!(build_op_class(&checked.ops[0]).unwrap().has_method("verify"));
}

// ============================================================================
// Fatal errors
// ============================================================================

#[test]
fn test_contradictory_traits_abort_batch() {
    let records = RecordSet::from_json_str(
        r#"{ "ops": [
            { "def": "GoodOp" },
            { "def": "BadOp", "loc": "bad.td:7",
              "traits": [ { "native": "SameOperandsAndResultType" }, { "native": "FirstAttrDerivedResultType" } ] }
        ] }"#,
        "bad.json",
    )
    .unwrap();

    for generator in GenRegistry::builtin().iter() {
        let mut out = String::new();
        let err = (generator.run)(&records.ops, &EmitConfig::new(), &mut out).unwrap_err();
        match err {
            GenError::SchemaContradiction { op, loc, .. } => {
                assert_eq!(op, "BadOp");
                assert_eq!(loc.as_deref(), Some("bad.td:7"));
            }
            other => panic!("expected contradiction from {}, got {other:?}", generator.name),
        }
        assert!(out.is_empty(), "{} wrote partial output", generator.name);
    }
}

#[test]
fn test_misplaced_variadic_rejected_at_load() {
    let err = RecordSet::from_json_str(
        r#"{ "ops": [ { "def": "BadOp", "results": [ { "variadic": true }, {} ] } ] }"#,
        "bad.json",
    )
    .unwrap_err();
    assert!(matches!(err, SchemaError::Shape { .. }));
}
