//! Accessor rules: operation name, named operands, named results and attributes.

use std::fmt::Write;

use opgen_core::fmt::{FmtContext, escape_cpp_string, tgfmt};
use opgen_schema::{AttrKind, Operator};

use crate::backend::class_emitter::{MethodScope, MethodSignature, OpClassBuilder};
use crate::backend::errors::GenError;

/// Expression bound to `$_builder` inside generated accessors.
pub const ACCESSOR_BUILDER: &str = "mlir::Builder(this->getContext())";

pub fn gen_op_name_getter(op: &Operator, class: &mut OpClassBuilder) -> Result<(), GenError> {
    let body = class.new_method(
        MethodSignature::new("StringRef", "getOperationName", ""),
        MethodScope::Static,
    );
    writeln!(body, "  return \"{}\";", escape_cpp_string(op.operation_name()))?;
    Ok(())
}

pub fn gen_operand_getters(op: &Operator, class: &mut OpClassBuilder) -> Result<(), GenError> {
    for (i, operand) in op.operands.iter().enumerate() {
        let Some(name) = operand.name() else {
            continue;
        };
        if operand.variadic {
            let body = class.new_method(
                MethodSignature::new("Operation::operand_range", name, ""),
                MethodScope::Instance,
            );
            writeln!(body, "  assert(getOperation()->getNumOperands() >= {i});")?;
            writeln!(body, "  return {{std::next(operand_begin(), {i}), operand_end()}};")?;
        } else {
            let body = class.new_method(MethodSignature::new("Value *", name, ""), MethodScope::Instance);
            writeln!(body, "  return this->getOperation()->getOperand({i});")?;
        }
    }
    Ok(())
}

/// Variadic results get no accessor.
pub fn gen_result_getters(op: &Operator, class: &mut OpClassBuilder) -> Result<(), GenError> {
    for (i, result) in op.results.iter().enumerate() {
        let Some(name) = result.name() else {
            continue;
        };
        if result.variadic {
            continue;
        }
        let body = class.new_method(MethodSignature::new("Value *", name, ""), MethodScope::Instance);
        writeln!(body, "  return this->getOperation()->getResult({i});")?;
    }
    Ok(())
}

pub fn gen_attr_getters(op: &Operator, class: &mut OpClassBuilder) -> Result<(), GenError> {
    let ctx = FmtContext::new().with_builder(ACCESSOR_BUILDER);

    for named in &op.attributes {
        let attr = &named.attr;
        let body = class.new_method(
            MethodSignature::new(attr.return_type.as_str(), named.name.as_str(), ""),
            MethodScope::Instance,
        );

        match &attr.kind {
            AttrKind::Derived { body: derived } => {
                writeln!(body, "  {derived}")?;
            }
            AttrKind::Stored { default, .. } => {
                writeln!(
                    body,
                    "  auto attr = this->getAttr(\"{}\").dyn_cast_or_null<{}>();",
                    escape_cpp_string(&named.name),
                    attr.storage_type
                )?;
                if let Some(default) = default {
                    let value = default_storage_expr(&attr.const_builder, default, &ctx);
                    let converted = tgfmt(&attr.convert_from_storage, &ctx.clone().with_self(value), &[]);
                    write!(body, "    if (!attr)\n      return {converted};\n")?;
                }
                let converted = tgfmt(&attr.convert_from_storage, &ctx.clone().with_self("attr"), &[]);
                writeln!(body, "  return {converted};")?;
            }
        }
    }
    Ok(())
}

/// Storage expression for a default value: the constant builder applied to it, or the value itself.
fn default_storage_expr(const_builder: &Option<String>, default: &str, ctx: &FmtContext) -> String {
    match const_builder {
        Some(template) => tgfmt(template, ctx, &[default]),
        None => default.to_string(),
    }
}
