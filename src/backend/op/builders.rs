//! `build` overloads.
//!
//! Every op gets, in order:
//! 1. the schema's custom builders (declaration-only when the body is empty),
//! 2. a stand-alone builder taking one parameter per result type, operand and attribute,
//! 3. an aggregated builder taking result types, operands and attributes as collections,
//! 4. a deduced-result-type builder, when exactly one deduction trait is declared and no result is variadic.
//!
//! ## Notes
//! - Declaring both deduction traits is a [`GenError::SchemaContradiction`], checked before any builder is emitted
//!   and regardless of result shape.

use std::fmt::Write;

use opgen_core::traits::{self as vocab, TraitId};
use opgen_schema::{Argument, Operator};

use crate::backend::class_emitter::{MethodBody, MethodScope, MethodSignature, OpClassBuilder};
use crate::backend::errors::GenError;

/// Name of the `OperationState *` parameter in generated builders.
pub const BUILDER_OP_STATE: &str = "tblgen_state";
/// Prefix for unnamed operands in builder parameter lists.
pub const GENERATED_ARG_NAME: &str = "tblgen_arg";

/// How the stand-alone builder obtains result types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTypes {
    /// One parameter per result.
    Explicit,
    /// Copy the first operand's type into every result.
    FromFirstOperand,
    /// Derive every result type from the first attribute.
    FromFirstAttr,
}

/// Determine the deduction strategy from the op's traits.
pub fn result_type_deduction(op: &Operator) -> Result<ResultTypes, GenError> {
    let same_type = op.has_trait(vocab::as_str(TraitId::SameOperandsAndResultType));
    let first_attr = op.has_trait(vocab::as_str(TraitId::FirstAttrDerivedResultType));
    match (same_type, first_attr) {
        (true, true) => Err(GenError::contradiction(
            op,
            format!(
                "op definition has both '{}' and '{}' traits specified",
                vocab::as_str(TraitId::SameOperandsAndResultType),
                vocab::as_str(TraitId::FirstAttrDerivedResultType)
            ),
        )),
        (true, false) => Ok(ResultTypes::FromFirstOperand),
        (false, true) => Ok(ResultTypes::FromFirstAttr),
        (false, false) => Ok(ResultTypes::Explicit),
    }
}

/// Builder parameter name for operand `index`.
pub fn argument_name(op: &Operator, index: usize) -> String {
    match op.operands.get(index).and_then(|o| o.name()) {
        Some(name) => name.to_string(),
        None => format!("{GENERATED_ARG_NAME}_{index}"),
    }
}

fn result_name(op: &Operator, index: usize) -> String {
    match op.results.get(index).and_then(|r| r.name()) {
        Some(name) => name.to_string(),
        None => format!("resultType{index}"),
    }
}

pub fn gen_builders(op: &Operator, class: &mut OpClassBuilder) -> Result<(), GenError> {
    for custom in &op.builders {
        let signature = MethodSignature::new("void", "build", custom.params.as_str());
        if custom.body.is_empty() {
            tracing::debug!(params = %custom.params, "custom builder is declaration-only");
            class.declare_method(signature, MethodScope::Static);
        } else {
            class.new_method(signature, MethodScope::Static).write_str(&custom.body)?;
        }
    }

    let deduction = result_type_deduction(op)?;

    gen_standalone_builder(op, class, ResultTypes::Explicit)?;
    gen_aggregate_builder(op, class)?;

    let deduced = deduction != ResultTypes::Explicit && !op.has_variadic_result();
    if deduced {
        gen_standalone_builder(op, class, deduction)?;
    }
    tracing::debug!(
        custom = op.builders.len(),
        generated = if deduced { 3 } else { 2 },
        "generated builder overloads"
    );
    Ok(())
}

fn standalone_params(op: &Operator, result_types: ResultTypes) -> Result<String, GenError> {
    let mut params = format!("Builder *, OperationState *{BUILDER_OP_STATE}");

    if result_types == ResultTypes::Explicit {
        for (i, result) in op.results.iter().enumerate() {
            let ty = if result.variadic { "ArrayRef<Type> " } else { "Type " };
            params.push_str(", ");
            params.push_str(ty);
            params.push_str(&result_name(op, i));
        }
    }

    let mut operands_seen = 0;
    for arg in &op.args {
        match *arg {
            Argument::Operand(i) => {
                let Some(operand) = op.operands.get(i).filter(|_| i == operands_seen) else {
                    return Err(GenError::shape(
                        op,
                        format!("argument list refers to operand #{i} out of order or out of range"),
                    ));
                };
                params.push_str(if operand.variadic { ", ArrayRef<Value *> " } else { ", Value *" });
                params.push_str(&argument_name(op, i));
                operands_seen += 1;
            }
            Argument::Attribute(i) => {
                let named = op
                    .attributes
                    .get(i)
                    .filter(|a| !a.attr.is_derived())
                    .ok_or_else(|| {
                        GenError::shape(op, "op arguments must be either operands or stored attributes")
                    })?;
                params.push_str(", ");
                if named.attr.is_optional() {
                    params.push_str("/*optional*/");
                }
                params.push_str(&named.attr.storage_type);
                params.push(' ');
                params.push_str(&named.name);
            }
        }
    }

    if operands_seen != op.num_operands() {
        return Err(GenError::shape(
            op,
            format!(
                "{} operand(s) declared but {} listed as arguments",
                op.num_operands(),
                operands_seen
            ),
        ));
    }
    Ok(params)
}

fn deduced_result_type(op: &Operator, result_types: ResultTypes) -> Result<String, GenError> {
    match result_types {
        ResultTypes::FromFirstAttr => {
            let named = op
                .attributes
                .first()
                .filter(|a| !a.attr.is_derived())
                .ok_or_else(|| {
                    GenError::shape(
                        op,
                        format!(
                            "'{}' requires a stored first attribute",
                            vocab::as_str(TraitId::FirstAttrDerivedResultType)
                        ),
                    )
                })?;
            let accessor = if named.attr.is_type_attr { "getValue" } else { "getType" };
            Ok(format!("{}.{}()", named.name, accessor))
        }
        ResultTypes::FromFirstOperand => {
            let first = op.operands.first().ok_or_else(|| {
                GenError::shape(
                    op,
                    format!(
                        "'{}' requires at least one operand",
                        vocab::as_str(TraitId::SameOperandsAndResultType)
                    ),
                )
            })?;
            let front = if first.variadic { ".front()" } else { "" };
            Ok(format!("{}{}->getType()", argument_name(op, 0), front))
        }
        ResultTypes::Explicit => Err(GenError::shape(op, "no result type deduction requested")),
    }
}

fn gen_standalone_builder(op: &Operator, class: &mut OpClassBuilder, result_types: ResultTypes) -> Result<(), GenError> {
    let params = standalone_params(op, result_types)?;
    let deduced = match result_types {
        ResultTypes::Explicit => None,
        _ if op.num_results() == 0 => None,
        _ => Some(deduced_result_type(op, result_types)?),
    };

    let body = class.new_method(MethodSignature::new("void", "build", params), MethodScope::Static);

    match deduced {
        Some(ty) => {
            let types = vec![ty; op.num_results()].join(", ");
            write!(body, "  {BUILDER_OP_STATE}->addTypes({{{types}}});\n\n")?;
        }
        None if result_types == ResultTypes::Explicit => {
            let names: Vec<String> = (0..op.num_results()).map(|i| result_name(op, i)).collect();
            push_values(body, "addTypes", &names, op.has_variadic_result())?;
        }
        None => {}
    }

    let names: Vec<String> = (0..op.num_operands()).map(|i| argument_name(op, i)).collect();
    push_values(body, "addOperands", &names, op.has_variadic_operand())?;

    for named in op.attributes.iter().filter(|a| !a.attr.is_derived()) {
        let optional = named.attr.is_optional();
        if optional {
            writeln!(body, "  if ({}) {{", named.name)?;
        }
        writeln!(body, "  {}->addAttribute(\"{}\", {});", BUILDER_OP_STATE, named.name, named.name)?;
        if optional {
            writeln!(body, "  }}")?;
        }
    }
    Ok(())
}

/// Push the fixed prefix of `names` as one batch, then the trailing variadic name on its own.
fn push_values(body: &mut MethodBody, method: &str, names: &[String], variadic: bool) -> Result<(), GenError> {
    let (fixed, rest) = match (variadic, names.split_last()) {
        (true, Some((last, fixed))) => (fixed, Some(last)),
        _ => (names, None),
    };
    if !fixed.is_empty() {
        writeln!(body, "  {}->{}({{{}}});", BUILDER_OP_STATE, method, fixed.join(", "))?;
    }
    if let Some(last) = rest {
        writeln!(body, "  {BUILDER_OP_STATE}->{method}({last});")?;
    }
    Ok(())
}

fn gen_aggregate_builder(op: &Operator, class: &mut OpClassBuilder) -> Result<(), GenError> {
    let params = format!(
        "Builder *, OperationState *{BUILDER_OP_STATE}, ArrayRef<Type> resultTypes, ArrayRef<Value *> operands, \
         ArrayRef<NamedAttribute> attributes"
    );
    let body = class.new_method(MethodSignature::new("void", "build", params), MethodScope::Static);

    let results = op.result_arity();
    if !(results.is_variadic() && results.fixed_count() == 0) {
        writeln!(
            body,
            "  assert(resultTypes.size() {} {}u && \"mismatched number of return types\");",
            if results.is_variadic() { ">=" } else { "==" },
            results.fixed_count()
        )?;
    }
    writeln!(body, "  {BUILDER_OP_STATE}->addTypes(resultTypes);")?;

    let operands = op.operand_arity();
    if !(operands.is_variadic() && operands.fixed_count() == 0) {
        writeln!(
            body,
            "  assert(operands.size() {} {}u && \"mismatched number of parameters\");",
            if operands.is_variadic() { ">=" } else { "==" },
            operands.fixed_count()
        )?;
    }
    write!(body, "  {BUILDER_OP_STATE}->addOperands(operands);\n\n")?;

    writeln!(body, "  for (const auto& pair : attributes)")?;
    writeln!(body, "    {BUILDER_OP_STATE}->addAttribute(pair.first, pair.second);")?;
    Ok(())
}
