//! Property-based tests for op generation
//!
//! These tests use proptest to verify invariants across many randomly
//! generated schemas and parameter lists, catching edge cases that hand-written tests might miss.

use opgen::backend::params::{split_params, strip_param_defaults};
use opgen::backend::{build_op_class, emit_decl, emit_def};
use opgen_schema::{Operator, RecordSet};
use proptest::prelude::*;
use serde_json::{Value, json};

// =============================================================================
// Strategies
// =============================================================================

fn ident_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}"
}

fn param_type_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["int", "Value *", "ArrayRef<Type>", "std::pair<int, int>", "const Foo &"])
}

fn default_strategy() -> impl Strategy<Value = Option<&'static str>> {
    prop::option::of(prop::sample::select(vec![
        "0",
        "1.5",
        "nullptr",
        "{1, 2}",
        "foo(a, b)",
        "std::pair<int, int>(1, 2)",
        "\"a, b\"",
        "Bar{x, {y, z}}",
    ]))
}

/// A parameter as `(type, name, default)`.
fn param_strategy() -> impl Strategy<Value = (&'static str, String, Option<&'static str>)> {
    (param_type_strategy(), ident_strategy(), default_strategy())
}

#[derive(Debug, Clone)]
struct OpShape {
    fixed_operands: usize,
    variadic_operand: bool,
    fixed_results: usize,
    variadic_result: bool,
    /// `None`, `SameOperandsAndResultType` or `FirstAttrDerivedResultType`.
    deduction: Option<&'static str>,
}

fn op_shape_strategy() -> impl Strategy<Value = OpShape> {
    (
        0usize..4,
        any::<bool>(),
        0usize..4,
        any::<bool>(),
        prop::option::of(prop::sample::select(vec![
            "SameOperandsAndResultType",
            "FirstAttrDerivedResultType",
        ])),
    )
        .prop_map(|(fixed_operands, variadic_operand, fixed_results, variadic_result, deduction)| OpShape {
            // Deduction from the first operand needs one to exist.
            fixed_operands: if fixed_operands == 0 && !variadic_operand { 1 } else { fixed_operands },
            variadic_operand,
            fixed_results,
            variadic_result,
            deduction,
        })
}

/// Build a schema document for `shape`: a stored first attribute, then the operands.
fn schema_for(shape: &OpShape) -> Value {
    let mut arguments = vec![json!({
        "attribute": {
            "name": "value",
            "storageType": "IntegerAttr",
            "returnType": "APInt",
            "convertFromStorage": "$_self.getValue()",
            "description": "integer attribute"
        }
    })];
    for i in 0..shape.fixed_operands {
        arguments.push(json!({ "operand": { "name": format!("in{i}") } }));
    }
    if shape.variadic_operand {
        arguments.push(json!({ "operand": { "name": "rest", "variadic": true } }));
    }

    let mut results: Vec<Value> = (0..shape.fixed_results)
        .map(|i| json!({ "name": format!("out{i}") }))
        .collect();
    if shape.variadic_result {
        results.push(json!({ "name": "others", "variadic": true }));
    }

    let traits: Vec<Value> = shape.deduction.iter().map(|name| json!({ "native": name })).collect();

    json!({
        "ops": [{
            "def": "Prop_ShapeOp",
            "opName": "prop.shape",
            "arguments": arguments,
            "results": results,
            "traits": traits
        }]
    })
}

fn load(shape: &OpShape) -> Operator {
    let records = RecordSet::from_json_value(schema_for(shape)).expect("generated schema should load");
    records.ops.into_iter().next().expect("one op")
}

// =============================================================================
// Default stripping
// =============================================================================

proptest! {
    /// Property: stripping defaults keeps every parameter, in order, with its declarator intact.
    #[test]
    fn stripping_preserves_parameters(params in prop::collection::vec(param_strategy(), 1..6)) {
        let raw: Vec<String> = params
            .iter()
            .map(|(ty, name, default)| match default {
                Some(value) => format!("{ty} {name} = {value}"),
                None => format!("{ty} {name}"),
            })
            .collect();
        let expected: Vec<String> = params.iter().map(|(ty, name, _)| format!("{ty} {name}")).collect();

        let joined = raw.join(", ");
        prop_assert_eq!(split_params(&joined).len(), params.len());
        prop_assert_eq!(strip_param_defaults(&joined), expected.join(", "));
    }

    /// Property: stripping is idempotent.
    #[test]
    fn stripping_is_idempotent(params in prop::collection::vec(param_strategy(), 0..6)) {
        let joined = params
            .iter()
            .map(|(ty, name, default)| match default {
                Some(value) => format!("{ty} {name} = {value}"),
                None => format!("{ty} {name}"),
            })
            .collect::<Vec<_>>()
            .join(", ");
        let once = strip_param_defaults(&joined);
        prop_assert_eq!(strip_param_defaults(&once), once);
    }
}

// =============================================================================
// Class generation
// =============================================================================

proptest! {
    /// Property: emitting the same op twice is byte-identical.
    #[test]
    fn emission_is_deterministic(shape in op_shape_strategy()) {
        let op = load(&shape);

        let mut first = String::new();
        let mut second = String::new();
        emit_decl(&op, &mut first).unwrap();
        emit_decl(&op, &mut second).unwrap();
        prop_assert_eq!(first, second);

        let mut first = String::new();
        let mut second = String::new();
        emit_def(&op, &mut first).unwrap();
        emit_def(&op, &mut second).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: two generated builders, plus one when a deduction trait applies to fixed results.
    #[test]
    fn builder_count_follows_deduction(shape in op_shape_strategy()) {
        let class = build_op_class(&load(&shape)).unwrap();
        let expected = 2 + usize::from(shape.deduction.is_some() && !shape.variadic_result);
        prop_assert_eq!(class.methods_named("build").count(), expected);
    }

    /// Property: the first two traits encode the result and operand counts.
    #[test]
    fn arity_traits_lead(shape in op_shape_strategy()) {
        let class = build_op_class(&load(&shape)).unwrap();

        let results = match (shape.variadic_result, shape.fixed_results) {
            (false, 0) => "OpTrait::ZeroResult".to_string(),
            (false, 1) => "OpTrait::OneResult".to_string(),
            (false, n) => format!("OpTrait::NResults<{n}>::Impl"),
            (true, 0) => "OpTrait::VariadicResults".to_string(),
            (true, n) => format!("OpTrait::AtLeastNResults<{n}>::Impl"),
        };
        let operands = match (shape.variadic_operand, shape.fixed_operands) {
            (false, n) => format!("OpTrait::NOperands<{n}>::Impl"),
            (true, 0) => "OpTrait::VariadicOperands".to_string(),
            (true, n) => format!("OpTrait::AtLeastNOperands<{n}>::Impl"),
        };

        prop_assert_eq!(&class.traits()[0], &results);
        prop_assert_eq!(&class.traits()[1], &operands);
        prop_assert_eq!(class.traits().len(), 2 + usize::from(shape.deduction.is_some()));
    }
}
