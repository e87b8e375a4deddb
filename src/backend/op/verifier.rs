//! `verify()` generation.
//!
//! The generated verifier checks, in order: stored attributes (presence, then predicate), predicated non-variadic
//! operands, predicated non-variadic results, trait predicates. It ends with the schema's verifier code, or with a
//! success return.
//!
//! ## Notes
//! - No method is emitted when there is nothing to check and no user verifier code.
//! - Variadic operands and results are never checked, not even their fixed prefix.

use std::fmt::Write;

use opgen_core::fmt::{FmtContext, escape_cpp_string, tgfmt};
use opgen_schema::{NamedTypeConstraint, Operator};

use crate::backend::class_emitter::{MethodBody, MethodScope, MethodSignature, OpClassBuilder};
use crate::backend::errors::GenError;
use crate::backend::op::hooks::fragment;

/// Prefix for local attribute variables, so they do not hide the attribute accessors.
const ATTR_VAR_PREFIX: &str = "tblgen_";
/// Expression bound to `$_op` inside the verifier.
pub const VERIFIER_OP: &str = "(*this->getOperation())";

/// Whether the op needs a `verify()` method at all.
pub fn needs_verifier(op: &Operator) -> bool {
    let has_custom = op.verifier.as_deref().is_some_and(|v| !v.trim().is_empty());
    let has_stored_attr = op.attributes.iter().any(|a| !a.attr.is_derived());
    let has_checked_value = op
        .operands
        .iter()
        .chain(op.results.iter())
        .any(|v| !v.variadic && v.has_predicate());
    has_custom || has_stored_attr || has_checked_value || op.num_pred_traits() > 0
}

pub fn gen_verifier(op: &Operator, class: &mut OpClassBuilder) -> Result<(), GenError> {
    let custom = fragment(op, "verifier", op.verifier.as_deref());
    if !needs_verifier(op) {
        tracing::debug!("nothing to verify, skipping verify()");
        return Ok(());
    }

    let body = class.new_method(MethodSignature::new("LogicalResult", "verify", ""), MethodScope::Instance);
    let op_ctx = FmtContext::new().with_op(VERIFIER_OP);

    for named in op.attributes.iter().filter(|a| !a.attr.is_derived()) {
        let attr = &named.attr;
        let var = format!("{ATTR_VAR_PREFIX}{}", named.name);
        let quoted_name = escape_cpp_string(&named.name);
        writeln!(body, "  auto {var} = this->getAttr(\"{quoted_name}\");")?;

        if attr.default_value().is_some() || attr.is_optional() {
            writeln!(body, "  if ({var}) {{")?;
        } else {
            writeln!(
                body,
                "  if (!{var}) return emitOpError(\"requires attribute '{quoted_name}'\");\n  {{"
            )?;
        }

        if let Some(predicate) = &attr.predicate {
            let condition = tgfmt(predicate, &op_ctx.clone().with_self(var.as_str()), &[]);
            writeln!(
                body,
                "    if (!({condition})) return emitOpError(\"attribute '{quoted_name}' failed to satisfy constraint: {}\");",
                escape_cpp_string(&attr.description)
            )?;
        }
        writeln!(body, "  }}")?;
    }

    for (i, operand) in op.operands.iter().enumerate() {
        verify_value(body, &op_ctx, operand, i, ValueKind::Operand)?;
    }
    for (i, result) in op.results.iter().enumerate() {
        verify_value(body, &op_ctx, result, i, ValueKind::Result)?;
    }

    for (condition, description) in op.pred_traits() {
        let condition = tgfmt(condition, &op_ctx, &[]);
        writeln!(body, "  if (!({condition}))")?;
        writeln!(
            body,
            "    return emitOpError(\"failed to verify that {}\");",
            escape_cpp_string(description)
        )?;
    }

    match custom {
        Some(custom) => writeln!(body, "  {custom}")?,
        None => writeln!(body, "  return mlir::success();")?,
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Operand,
    Result,
}

impl ValueKind {
    fn noun(self) -> &'static str {
        match self {
            ValueKind::Operand => "operand",
            ValueKind::Result => "result",
        }
    }

    fn getter(self) -> &'static str {
        match self {
            ValueKind::Operand => "getOperand",
            ValueKind::Result => "getResult",
        }
    }
}

fn verify_value(
    body: &mut MethodBody,
    ctx: &FmtContext,
    value: &NamedTypeConstraint,
    index: usize,
    kind: ValueKind,
) -> Result<(), GenError> {
    if value.variadic {
        return Ok(());
    }
    let Some(condition) = &value.constraint.condition else {
        return Ok(());
    };

    let subject = format!("this->getOperation()->{}({index})->getType()", kind.getter());
    let condition = tgfmt(condition, &ctx.clone().with_self(subject), &[]);
    let failure = match value.constraint.description.as_str() {
        "" => " type precondition failed".to_string(),
        description => format!(" must be {}", escape_cpp_string(description)),
    };
    writeln!(body, "  if (!({condition}))")?;
    writeln!(body, "    return emitOpError(\"{} #{index}{failure}\");", kind.noun())?;
    Ok(())
}
